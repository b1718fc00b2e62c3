use super::{Deserialize, Error, Serialize};
use byteorder::{ReadBytesExt, WriteBytesExt};
use std::fmt::Write;

/// Sentinel class name for exception handlers that catch every throwable
pub const ANY_CLASS_NAME: &str = "any";

/// Lookups the attribute decoder needs from a constant pool
///
/// The decoder never walks the pool itself: each attribute field that holds a constant pool
/// index is turned into text through one of these three lookups.
pub trait ConstantResolver {
    /// Resolve a `CONSTANT_Utf8` entry
    fn resolve_utf8(&self, index: ConstantIndex) -> Result<String, Error>;

    /// Resolve a `CONSTANT_Class` entry into a dotted class name
    ///
    /// Index `0` is not an error: it resolves to [`ANY_CLASS_NAME`].
    fn resolve_class_name(&self, index: ConstantIndex) -> Result<String, Error>;

    /// Resolve a loadable literal (`int`, `long`, `float`, `double` or `String`) into Java
    /// source text
    fn resolve_basic_value(&self, index: ConstantIndex) -> Result<String, Error>;
}

#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug)]
pub struct ConstantIndex(pub u16);

impl Serialize for ConstantIndex {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        self.0.serialize(writer)
    }
}

impl Deserialize for ConstantIndex {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self, Error> {
        Ok(ConstantIndex(u16::deserialize(reader)?))
    }
}

/// Constants as in the constant pool
///
/// [0]: https://docs.oracle.com/javase/specs/jvms/se15/html/jvms-4.html#jvms-4.4
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    /// Constant UTF-8 encoded raw string value
    ///
    /// Despite the name, the encoding is not quite UTF-8 (the encoding of the
    /// null character `\u{0000}` and the encoding of supplementary characters
    /// is different).
    Utf8(String),

    /// Constant primitive of type `int`
    Integer(i32),

    /// Constant primitive of type `float`
    Float(f32),

    /// Constant primitive of type `long`
    Long(i64),

    /// Constant primitive of type `double`
    Double(f64),

    /// Class or an interface
    Class(ConstantIndex),

    /// Constant object of type `java.lang.String`
    String(ConstantIndex),

    /// Field
    FieldRef {
        class: ConstantIndex,
        name_and_type: ConstantIndex,
    },

    /// Method (this combines `Methodref` and `InterfaceMethodref`)
    MethodRef {
        class: ConstantIndex,
        name_and_type: ConstantIndex,
        is_interface: bool,
    },

    /// Name and a type (eg. for a field or a method)
    NameAndType {
        name: ConstantIndex,
        descriptor: ConstantIndex,
    },

    /// Constant object of type `java.lang.invoke.MethodHandle`
    MethodHandle {
        reference_kind: u8,
        member: ConstantIndex,
    },

    /// Method type
    MethodType { descriptor: ConstantIndex },

    /// Dynamically-computed constant
    Dynamic {
        bootstrap_method: u16,
        name_and_type: ConstantIndex,
    },

    /// Dynamically-computed call site
    InvokeDynamic {
        bootstrap_method: u16,
        name_and_type: ConstantIndex,
    },

    Module(ConstantIndex),

    Package(ConstantIndex),
}

impl Constant {
    /// Almost all constants have width 1, except for `Constant::Long` and `Constant::Double`,
    /// which make the following constant pool index unusable.
    pub fn width(&self) -> usize {
        match self {
            Constant::Long(_) | Constant::Double(_) => 2,
            _ => 1,
        }
    }

    fn tag(&self) -> u8 {
        match self {
            Constant::Utf8(_) => 1,
            Constant::Integer(_) => 3,
            Constant::Float(_) => 4,
            Constant::Long(_) => 5,
            Constant::Double(_) => 6,
            Constant::Class(_) => 7,
            Constant::String(_) => 8,
            Constant::FieldRef { .. } => 9,
            Constant::MethodRef {
                is_interface: false,
                ..
            } => 10,
            Constant::MethodRef {
                is_interface: true, ..
            } => 11,
            Constant::NameAndType { .. } => 12,
            Constant::MethodHandle { .. } => 15,
            Constant::MethodType { .. } => 16,
            Constant::Dynamic { .. } => 17,
            Constant::InvokeDynamic { .. } => 18,
            Constant::Module(_) => 19,
            Constant::Package(_) => 20,
        }
    }
}

impl Serialize for Constant {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        self.tag().serialize(writer)?;
        match self {
            Constant::Utf8(string) => {
                let buffer = encode_modified_utf8(string);
                (buffer.len() as u16).serialize(writer)?;
                writer.write_all(&buffer)?;
            }
            Constant::Integer(integer) => integer.serialize(writer)?,
            Constant::Float(float) => float.serialize(writer)?,
            Constant::Long(long) => long.serialize(writer)?,
            Constant::Double(double) => double.serialize(writer)?,
            Constant::Class(index)
            | Constant::String(index)
            | Constant::MethodType { descriptor: index }
            | Constant::Module(index)
            | Constant::Package(index) => index.serialize(writer)?,
            Constant::FieldRef {
                class,
                name_and_type,
            }
            | Constant::MethodRef {
                class,
                name_and_type,
                ..
            } => {
                class.serialize(writer)?;
                name_and_type.serialize(writer)?;
            }
            Constant::NameAndType { name, descriptor } => {
                name.serialize(writer)?;
                descriptor.serialize(writer)?;
            }
            Constant::MethodHandle {
                reference_kind,
                member,
            } => {
                reference_kind.serialize(writer)?;
                member.serialize(writer)?;
            }
            Constant::Dynamic {
                bootstrap_method,
                name_and_type,
            }
            | Constant::InvokeDynamic {
                bootstrap_method,
                name_and_type,
            } => {
                bootstrap_method.serialize(writer)?;
                name_and_type.serialize(writer)?;
            }
        };
        Ok(())
    }
}

impl Deserialize for Constant {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self, Error> {
        let tag = u8::deserialize(reader)?;
        let constant = match tag {
            1 => {
                let len = u16::deserialize(reader)?;
                let bytes = super::read_bytes(reader, len as u64)?;
                Constant::Utf8(decode_modified_utf8(&bytes))
            }
            3 => Constant::Integer(i32::deserialize(reader)?),
            4 => Constant::Float(f32::deserialize(reader)?),
            5 => Constant::Long(i64::deserialize(reader)?),
            6 => Constant::Double(f64::deserialize(reader)?),
            7 => Constant::Class(ConstantIndex::deserialize(reader)?),
            8 => Constant::String(ConstantIndex::deserialize(reader)?),
            9 => Constant::FieldRef {
                class: ConstantIndex::deserialize(reader)?,
                name_and_type: ConstantIndex::deserialize(reader)?,
            },
            10 | 11 => Constant::MethodRef {
                class: ConstantIndex::deserialize(reader)?,
                name_and_type: ConstantIndex::deserialize(reader)?,
                is_interface: tag == 11,
            },
            12 => Constant::NameAndType {
                name: ConstantIndex::deserialize(reader)?,
                descriptor: ConstantIndex::deserialize(reader)?,
            },
            15 => Constant::MethodHandle {
                reference_kind: u8::deserialize(reader)?,
                member: ConstantIndex::deserialize(reader)?,
            },
            16 => Constant::MethodType {
                descriptor: ConstantIndex::deserialize(reader)?,
            },
            17 => Constant::Dynamic {
                bootstrap_method: u16::deserialize(reader)?,
                name_and_type: ConstantIndex::deserialize(reader)?,
            },
            18 => Constant::InvokeDynamic {
                bootstrap_method: u16::deserialize(reader)?,
                name_and_type: ConstantIndex::deserialize(reader)?,
            },
            19 => Constant::Module(ConstantIndex::deserialize(reader)?),
            20 => Constant::Package(ConstantIndex::deserialize(reader)?),
            other => return Err(Error::UnknownConstantTag(other)),
        };
        Ok(constant)
    }
}

/// Constant pool of a class file
///
/// Slot `0` and the slot after every `long`/`double` constant are unusable and hold `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantsPool {
    constants: Vec<Option<Constant>>,
}

impl Default for ConstantsPool {
    fn default() -> Self {
        ConstantsPool::new()
    }
}

impl ConstantsPool {
    /// Make a fresh empty constants pool
    pub fn new() -> ConstantsPool {
        ConstantsPool {
            constants: vec![None],
        }
    }

    /// Append a constant, returning its index
    pub fn push(&mut self, constant: Constant) -> ConstantIndex {
        let index = ConstantIndex(self.constants.len() as u16);
        let width = constant.width();
        self.constants.push(Some(constant));
        if width == 2 {
            self.constants.push(None);
        }
        index
    }

    /// Append a utf8 constant, returning its index
    pub fn push_utf8(&mut self, utf8: impl Into<String>) -> ConstantIndex {
        self.push(Constant::Utf8(utf8.into()))
    }

    /// Append a class constant (and the utf8 constant holding its binary name)
    pub fn push_class(&mut self, binary_name: impl Into<String>) -> ConstantIndex {
        let name = self.push_utf8(binary_name);
        self.push(Constant::Class(name))
    }

    /// Get a constant from the pool
    pub fn get(&self, index: ConstantIndex) -> Option<&Constant> {
        self.constants.get(index.0 as usize).and_then(Option::as_ref)
    }

    /// Number of slots, including the unusable slot `0`
    pub fn len(&self) -> usize {
        self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.len() <= 1
    }

    fn lookup_utf8(&self, index: ConstantIndex) -> Result<&str, Error> {
        match self.get(index) {
            Some(Constant::Utf8(utf8)) => Ok(utf8.as_str()),
            _ => Err(Error::UnresolvedConstant {
                index,
                expected: "utf8",
            }),
        }
    }
}

impl Serialize for ConstantsPool {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        (self.constants.len() as u16).serialize(writer)?;
        for constant in self.constants.iter().flatten() {
            constant.serialize(writer)?;
        }
        Ok(())
    }
}

impl Deserialize for ConstantsPool {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self, Error> {
        let count = u16::deserialize(reader)? as usize;
        let mut pool = ConstantsPool::new();
        while pool.constants.len() < count {
            let _ = pool.push(Constant::deserialize(reader)?);
        }
        log::trace!("Read {} constant pool slots", pool.constants.len());
        Ok(pool)
    }
}

impl ConstantResolver for ConstantsPool {
    fn resolve_utf8(&self, index: ConstantIndex) -> Result<String, Error> {
        self.lookup_utf8(index).map(String::from)
    }

    fn resolve_class_name(&self, index: ConstantIndex) -> Result<String, Error> {
        if index.0 == 0 {
            return Ok(String::from(ANY_CLASS_NAME));
        }
        match self.get(index) {
            Some(Constant::Class(name)) => Ok(self.lookup_utf8(*name)?.replace('/', ".")),
            _ => Err(Error::UnresolvedConstant {
                index,
                expected: "class",
            }),
        }
    }

    fn resolve_basic_value(&self, index: ConstantIndex) -> Result<String, Error> {
        match self.get(index) {
            Some(Constant::Integer(integer)) => Ok(integer.to_string()),
            Some(Constant::Long(long)) => Ok(format!("{}L", long)),
            Some(Constant::Float(float)) => Ok(non_finite_literal(*float as f64, "Float")
                .unwrap_or_else(|| format!("{:?}F", float))),
            Some(Constant::Double(double)) => Ok(non_finite_literal(*double, "Double")
                .unwrap_or_else(|| format!("{:?}D", double))),
            Some(Constant::String(utf8)) => Ok(string_literal(self.lookup_utf8(*utf8)?)),
            _ => Err(Error::UnresolvedConstant {
                index,
                expected: "literal",
            }),
        }
    }
}

/// Floating point values without a literal syntax are spelled with the boxed class constants
fn non_finite_literal(value: f64, class_name: &str) -> Option<String> {
    if value.is_nan() {
        Some(format!("{}.NaN", class_name))
    } else if value == f64::INFINITY {
        Some(format!("{}.POSITIVE_INFINITY", class_name))
    } else if value == f64::NEG_INFINITY {
        Some(format!("{}.NEGATIVE_INFINITY", class_name))
    } else {
        None
    }
}

/// Quote and escape a string as a Java string literal
fn string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            '\u{0008}' => literal.push_str("\\b"),
            '\u{000C}' => literal.push_str("\\f"),
            c if c.is_control() => {
                let _ = write!(literal, "\\u{:04x}", c as u32);
            }
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

/// Encode into the JVM's "modified UTF-8"
///
/// Each UTF-16 code unit is encoded on its own (so supplementary characters become two 3-byte
/// surrogates) and `\u{0000}` takes two bytes.
fn encode_modified_utf8(string: &str) -> Vec<u8> {
    let mut buffer = vec![];
    for unit in string.encode_utf16() {
        match unit {
            0x0001..=0x007F => buffer.push(unit as u8),
            0x0000 | 0x0080..=0x07FF => {
                buffer.push((unit >> 6 & 0x1F) as u8 | 0b1100_0000);
                buffer.push((unit & 0x3F) as u8 | 0b1000_0000);
            }
            _ => {
                buffer.push((unit >> 12 & 0x0F) as u8 | 0b1110_0000);
                buffer.push((unit >> 6 & 0x3F) as u8 | 0b1000_0000);
                buffer.push((unit & 0x3F) as u8 | 0b1000_0000);
            }
        }
    }
    buffer
}

/// Decode the JVM's "modified UTF-8"
///
/// Malformed sequences decode to `U+FFFD` rather than failing: names are only ever displayed.
fn decode_modified_utf8(bytes: &[u8]) -> String {
    let mut units: Vec<u16> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b0 = bytes[i] as u16;
        let continuation = |at: usize| bytes.get(at).filter(|b| *b & 0xC0 == 0x80);
        if b0 & 0x80 == 0 {
            units.push(b0);
            i += 1;
        } else if b0 & 0xE0 == 0xC0 {
            match continuation(i + 1) {
                Some(b1) => {
                    units.push((b0 & 0x1F) << 6 | (*b1 as u16 & 0x3F));
                    i += 2;
                }
                None => {
                    units.push(0xFFFD);
                    i += 1;
                }
            }
        } else if b0 & 0xF0 == 0xE0 {
            match (continuation(i + 1), continuation(i + 2)) {
                (Some(b1), Some(b2)) => {
                    units.push((b0 & 0x0F) << 12 | (*b1 as u16 & 0x3F) << 6 | (*b2 as u16 & 0x3F));
                    i += 3;
                }
                _ => {
                    units.push(0xFFFD);
                    i += 1;
                }
            }
        } else {
            units.push(0xFFFD);
            i += 1;
        }
    }
    String::from_utf16_lossy(&units)
}
