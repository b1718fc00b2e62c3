//! Decoding of method, field and class attributes
//!
//! Every attribute starts with the same header:
//!
//! ```txt
//! attribute_info {
//!     u2 attribute_name_index;
//!     u4 attribute_length;
//!     u1 info[attribute_length];
//! }
//! ```
//!
//! Attributes we interpret are decoded field by field. Everything else (including the debugging
//! tables we don't interpret yet) is skipped by consuming exactly `attribute_length` bytes, so
//! that the stream stays aligned on the next attribute.
//!
//! [0]: https://docs.oracle.com/javase/specs/jvms/se15/html/jvms-4.html#jvms-4.7

use super::{
    skip_bytes, ConstantIndex, ConstantResolver, Deserialize, Error, ANY_CLASS_NAME,
};
use crate::settings::Settings;
use byteorder::ReadBytesExt;

/// Decoded attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    /// Method body
    Code(Code),

    /// Java source text of the initial value of a constant field
    ConstantValue(String),

    Deprecated,

    Synthetic,

    /// Checked exceptions declared by a method (its `throws` clause), as dotted class names
    Exceptions(Vec<String>),

    /// Name of the source file the class was compiled from
    SourceFile(String),

    /// Framed but not interpreted
    LineNumberTable,

    /// Framed but not interpreted
    LocalVariableTable,

    /// Attribute we don't know about (eg. a vendor attribute)
    Unknown { name: String, length: u32 },
}

impl Attribute {
    /// Name of the attribute as it appears in the class file
    pub fn name(&self) -> &str {
        match self {
            Attribute::Code(_) => Code::NAME,
            Attribute::ConstantValue(_) => "ConstantValue",
            Attribute::Deprecated => "Deprecated",
            Attribute::Synthetic => "Synthetic",
            Attribute::Exceptions(_) => "Exceptions",
            Attribute::SourceFile(_) => "SourceFile",
            Attribute::LineNumberTable => "LineNumberTable",
            Attribute::LocalVariableTable => "LocalVariableTable",
            Attribute::Unknown { name, .. } => name,
        }
    }
}

/// Read one attribute record
///
/// On error, the position of `reader` is unspecified and the enclosing class or member decode
/// should be abandoned.
pub fn read_attribute<R, C>(
    reader: &mut R,
    constants: &C,
    settings: &Settings,
) -> Result<Attribute, Error>
where
    R: ReadBytesExt,
    C: ConstantResolver + ?Sized,
{
    let name_index = ConstantIndex::deserialize(reader)?;
    let name = constants.resolve_utf8(name_index)?;
    let length = u32::deserialize(reader)?;
    log::trace!("Reading `{}` attribute ({} bytes)", name, length);

    let attribute = match name.as_str() {
        Code::NAME => Attribute::Code(Code::read_body(reader, constants, settings)?),
        "ConstantValue" => {
            let value_index = ConstantIndex::deserialize(reader)?;
            Attribute::ConstantValue(constants.resolve_basic_value(value_index)?)
        }
        "Deprecated" => {
            read_marker(reader, &name, length, settings)?;
            Attribute::Deprecated
        }
        "Synthetic" => {
            read_marker(reader, &name, length, settings)?;
            Attribute::Synthetic
        }
        "Exceptions" => {
            let count = u16::deserialize(reader)?;
            let mut exceptions = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let class_index = ConstantIndex::deserialize(reader)?;
                exceptions.push(constants.resolve_class_name(class_index)?);
            }
            Attribute::Exceptions(exceptions)
        }
        "SourceFile" => {
            let source_index = ConstantIndex::deserialize(reader)?;
            Attribute::SourceFile(constants.resolve_utf8(source_index)?)
        }
        "LineNumberTable" => {
            skip_bytes(reader, length as u64)?;
            Attribute::LineNumberTable
        }
        "LocalVariableTable" => {
            skip_bytes(reader, length as u64)?;
            Attribute::LocalVariableTable
        }
        _ => {
            log::debug!("Skipping unknown `{}` attribute ({} bytes)", name, length);
            skip_bytes(reader, length as u64)?;
            Attribute::Unknown {
                name: name.clone(),
                length,
            }
        }
    };
    Ok(attribute)
}

/// Read a `u16` count followed by that many attribute records
pub fn read_attributes<R, C>(
    reader: &mut R,
    constants: &C,
    settings: &Settings,
) -> Result<Vec<Attribute>, Error>
where
    R: ReadBytesExt,
    C: ConstantResolver + ?Sized,
{
    let count = u16::deserialize(reader)?;
    let mut attributes = Vec::with_capacity(count as usize);
    for _ in 0..count {
        attributes.push(read_attribute(reader, constants, settings)?);
    }
    Ok(attributes)
}

/// `Deprecated` and `Synthetic` have no payload, but the length is only checked in strict mode
fn read_marker<R: ReadBytesExt>(
    reader: &mut R,
    name: &str,
    length: u32,
    settings: &Settings,
) -> Result<(), Error> {
    skip_bytes(reader, length as u64)?;
    if length != 0 && settings.strict_attribute_lengths {
        return Err(Error::MalformedAttribute {
            name: name.to_owned(),
            reason: format!("expected length 0, found {}", length),
        });
    }
    Ok(())
}

/// Anything that stores the decoded body of a method
pub trait CodeSink {
    fn set_max_stack(&mut self, max_stack: u16);
    fn set_max_locals(&mut self, max_locals: u16);
    fn set_code(&mut self, code: Vec<u8>);
    fn add_exception_handler(&mut self, handler: ExceptionHandler);
}

/// Decoded `Code` attribute
///
/// [0]: https://docs.oracle.com/javase/specs/jvms/se15/html/jvms-4.html#jvms-4.7.3
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    pub max_stack: u16,
    pub max_locals: u16,

    /// Raw instruction stream
    pub code: Vec<u8>,

    pub exception_table: Vec<ExceptionHandler>,

    /// Nested attributes (eg. `LineNumberTable`), in class file order
    pub attributes: Vec<Attribute>,
}

impl Code {
    pub const NAME: &'static str = "Code";

    /// Read the body of a `Code` attribute (everything after `attribute_length`)
    ///
    /// Every field is read by its own explicit size: the enclosing attribute length is not used
    /// to bound the reads.
    pub fn read_body<R, C>(reader: &mut R, constants: &C, settings: &Settings) -> Result<Code, Error>
    where
        R: ReadBytesExt,
        C: ConstantResolver + ?Sized,
    {
        let max_stack = u16::deserialize(reader)?;
        let max_locals = u16::deserialize(reader)?;

        let code_length = u32::deserialize(reader)?;
        let code = super::read_bytes(reader, code_length as u64)?;

        let exception_table_length = u16::deserialize(reader)?;
        let mut exception_table = Vec::with_capacity(exception_table_length as usize);
        for _ in 0..exception_table_length {
            exception_table.push(ExceptionHandler::read(reader, constants)?);
        }

        let attributes = read_attributes(reader, constants, settings)?;

        Ok(Code {
            max_stack,
            max_locals,
            code,
            exception_table,
            attributes,
        })
    }

    /// Copy sizing, bytecode and exception handlers into a method model
    ///
    /// Nested attributes are not forwarded.
    pub fn populate<S: CodeSink + ?Sized>(&self, sink: &mut S) {
        sink.set_max_stack(self.max_stack);
        sink.set_max_locals(self.max_locals);
        sink.set_code(self.code.clone());
        for handler in &self.exception_table {
            sink.add_exception_handler(handler.clone());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionHandler {
    /// Start of exception handler range (inclusive)
    pub start_pc: u16,

    /// End of exception handler range (exclusive)
    pub end_pc: u16,

    /// Start of the exception handler
    pub handler_pc: u16,

    /// Dotted name of the caught class, or [`ANY_CLASS_NAME`]
    pub catch_type: String,
}

impl ExceptionHandler {
    fn read<R, C>(reader: &mut R, constants: &C) -> Result<ExceptionHandler, Error>
    where
        R: ReadBytesExt,
        C: ConstantResolver + ?Sized,
    {
        let start_pc = u16::deserialize(reader)?;
        let end_pc = u16::deserialize(reader)?;
        let handler_pc = u16::deserialize(reader)?;
        let catch_index = ConstantIndex::deserialize(reader)?;
        let catch_type = if catch_index.0 == 0 {
            String::from(ANY_CLASS_NAME)
        } else {
            constants.resolve_class_name(catch_index)?
        };
        Ok(ExceptionHandler {
            start_pc,
            end_pc,
            handler_pc,
            catch_type,
        })
    }

    /// Does this handler catch every throwable (eg. a `finally` block)?
    pub fn catches_any(&self) -> bool {
        self.catch_type == ANY_CLASS_NAME
    }
}
