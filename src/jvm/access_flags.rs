use super::{Deserialize, Error, Serialize};
use bitflags::bitflags;
use byteorder::{ReadBytesExt, WriteBytesExt};
use std::io::Result;

bitflags! {
    /// Access flags on classes
    ///
    /// [0]: https://docs.oracle.com/javase/specs/jvms/se15/html/jvms-4.html#jvms-4.1-200-E.1
    pub struct ClassAccessFlags: u16 {
        const PUBLIC = 0x0001;
        const FINAL = 0x0010;
        const SUPER = 0x0020;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const SYNTHETIC = 0x1000;
        const ANNOTATION = 0x2000;
        const ENUM = 0x4000;
        const MODULE = 0x8000;
    }
}

bitflags! {
    /// Access flags on methods
    ///
    /// [0]: https://docs.oracle.com/javase/specs/jvms/se15/html/jvms-4.html#jvms-4.6-200-A.1
    pub struct MethodAccessFlags: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SYNCHRONIZED = 0x0020;
        const BRIDGE = 0x0040;
        const VARARGS = 0x0080;
        const NATIVE = 0x0100;
        const ABSTRACT = 0x0400;
        const STRICT = 0x0800;
        const SYNTHETIC = 0x1000;
    }
}

bitflags! {
    /// Access flags on fields
    ///
    /// [0]: https://docs.oracle.com/javase/specs/jvms/se15/html/jvms-4.html#jvms-4.5-200-A.1
    pub struct FieldAccessFlags: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const VOLATILE = 0x0040;
        const TRANSIENT = 0x0080;
        const SYNTHETIC = 0x1000;
        const ENUM = 0x4000;
    }
}

impl Serialize for ClassAccessFlags {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> Result<()> {
        self.bits().serialize(writer)
    }
}

impl Serialize for MethodAccessFlags {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> Result<()> {
        self.bits().serialize(writer)
    }
}

impl Serialize for FieldAccessFlags {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> Result<()> {
        self.bits().serialize(writer)
    }
}

/// Unknown bits are dropped: newer class file versions may define flags we don't model
impl Deserialize for ClassAccessFlags {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> std::result::Result<Self, Error> {
        Ok(ClassAccessFlags::from_bits_truncate(u16::deserialize(reader)?))
    }
}

impl Deserialize for MethodAccessFlags {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> std::result::Result<Self, Error> {
        Ok(MethodAccessFlags::from_bits_truncate(u16::deserialize(reader)?))
    }
}

impl Deserialize for FieldAccessFlags {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> std::result::Result<Self, Error> {
        Ok(FieldAccessFlags::from_bits_truncate(u16::deserialize(reader)?))
    }
}

/// Java modifier keywords for the flags that have one, in conventional source order
pub trait Modifiers {
    fn modifiers(&self) -> Vec<&'static str>;
}

impl Modifiers for ClassAccessFlags {
    fn modifiers(&self) -> Vec<&'static str> {
        let mut modifiers = vec![];
        if self.contains(ClassAccessFlags::PUBLIC) {
            modifiers.push("public");
        }
        if self.contains(ClassAccessFlags::ABSTRACT) && !self.contains(ClassAccessFlags::INTERFACE)
        {
            modifiers.push("abstract");
        }
        if self.contains(ClassAccessFlags::FINAL) {
            modifiers.push("final");
        }
        modifiers
    }
}

impl Modifiers for MethodAccessFlags {
    fn modifiers(&self) -> Vec<&'static str> {
        [
            (MethodAccessFlags::PUBLIC, "public"),
            (MethodAccessFlags::PROTECTED, "protected"),
            (MethodAccessFlags::PRIVATE, "private"),
            (MethodAccessFlags::ABSTRACT, "abstract"),
            (MethodAccessFlags::STATIC, "static"),
            (MethodAccessFlags::FINAL, "final"),
            (MethodAccessFlags::SYNCHRONIZED, "synchronized"),
            (MethodAccessFlags::NATIVE, "native"),
            (MethodAccessFlags::STRICT, "strictfp"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, keyword)| keyword)
        .collect()
    }
}

impl Modifiers for FieldAccessFlags {
    fn modifiers(&self) -> Vec<&'static str> {
        [
            (FieldAccessFlags::PUBLIC, "public"),
            (FieldAccessFlags::PROTECTED, "protected"),
            (FieldAccessFlags::PRIVATE, "private"),
            (FieldAccessFlags::STATIC, "static"),
            (FieldAccessFlags::FINAL, "final"),
            (FieldAccessFlags::TRANSIENT, "transient"),
            (FieldAccessFlags::VOLATILE, "volatile"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, keyword)| keyword)
        .collect()
    }
}
