use super::{Field, Method};
use crate::jvm::class_file::ClassFile;
use crate::jvm::{
    read_attributes, Attribute, ClassAccessFlags, ConstantIndex, ConstantResolver, ConstantsPool,
    Deserialize, Error, FieldAccessFlags, MethodAccessFlags, Modifiers, Version,
};
use crate::settings::Settings;
use byteorder::ReadBytesExt;
use std::fs;
use std::io::BufReader;
use std::path::Path;

/// Semantic representation of a class read from a class file
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub version: Version,
    pub constants: ConstantsPool,
    pub access_flags: ClassAccessFlags,

    /// Dotted name of this class
    pub this_class: String,

    /// Dotted name of the superclass (`None` only for `java.lang.Object`)
    pub super_class: Option<String>,

    pub interfaces: Vec<String>,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,

    pub source_file: Option<String>,
    pub deprecated: bool,
    pub synthetic: bool,
}

impl Class {
    /// Read a class file from disk
    pub fn read_from_path<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<Class, Error> {
        let file = fs::File::open(path).map_err(Error::IoError)?;
        Class::read(&mut BufReader::new(file), settings)
    }

    /// Read a class file
    ///
    /// [0]: https://docs.oracle.com/javase/specs/jvms/se15/html/jvms-4.html#jvms-4.1
    pub fn read<R: ReadBytesExt>(reader: &mut R, settings: &Settings) -> Result<Class, Error> {
        let magic = u32::deserialize(reader)?;
        if magic != u32::from_be_bytes(ClassFile::MAGIC) {
            return Err(Error::BadMagic(magic));
        }

        let version = Version::deserialize(reader)?;
        let constants = ConstantsPool::deserialize(reader)?;
        let access_flags = ClassAccessFlags::deserialize(reader)?;
        // Index `0` only means "any class" in exception tables
        let this_index = ConstantIndex::deserialize(reader)?;
        if this_index.0 == 0 {
            return Err(Error::UnresolvedConstant {
                index: this_index,
                expected: "class",
            });
        }
        let this_class = constants.resolve_class_name(this_index)?;
        let super_index = ConstantIndex::deserialize(reader)?;
        let super_class = if super_index.0 == 0 {
            None
        } else {
            Some(constants.resolve_class_name(super_index)?)
        };
        log::debug!("Reading class {} (version {})", this_class, version);

        let interfaces_count = u16::deserialize(reader)?;
        let mut interfaces = Vec::with_capacity(interfaces_count as usize);
        for _ in 0..interfaces_count {
            interfaces.push(constants.resolve_class_name(ConstantIndex::deserialize(reader)?)?);
        }

        let fields_count = u16::deserialize(reader)?;
        let mut fields = Vec::with_capacity(fields_count as usize);
        for _ in 0..fields_count {
            let access_flags = FieldAccessFlags::deserialize(reader)?;
            let name = constants.resolve_utf8(ConstantIndex::deserialize(reader)?)?;
            let descriptor = constants.resolve_utf8(ConstantIndex::deserialize(reader)?)?;
            let mut field = Field::new(access_flags, name, descriptor);
            for attribute in read_attributes(reader, &constants, settings)? {
                field.apply_attribute(attribute);
            }
            fields.push(field);
        }

        let methods_count = u16::deserialize(reader)?;
        let mut methods = Vec::with_capacity(methods_count as usize);
        for _ in 0..methods_count {
            let access_flags = MethodAccessFlags::deserialize(reader)?;
            let name = constants.resolve_utf8(ConstantIndex::deserialize(reader)?)?;
            let descriptor = constants.resolve_utf8(ConstantIndex::deserialize(reader)?)?;
            let mut method = Method::new(access_flags, name, descriptor);
            for attribute in read_attributes(reader, &constants, settings)? {
                method.apply_attribute(attribute);
            }
            methods.push(method);
        }

        let mut class = Class {
            version,
            constants,
            access_flags,
            this_class,
            super_class,
            interfaces,
            fields,
            methods,
            source_file: None,
            deprecated: false,
            synthetic: false,
        };
        for attribute in read_attributes(reader, &class.constants, settings)? {
            class.apply_attribute(attribute);
        }
        Ok(class)
    }

    /// Record a decoded class attribute
    pub fn apply_attribute(&mut self, attribute: Attribute) {
        match attribute {
            Attribute::SourceFile(source_file) => self.source_file = Some(source_file),
            Attribute::Deprecated => self.deprecated = true,
            Attribute::Synthetic => self.synthetic = true,
            other => log::trace!("Ignoring `{}` attribute on class", other.name()),
        }
    }

    /// Java declaration header (eg. `public final class a.B extends a.C implements a.D`)
    pub fn declaration(&self) -> String {
        let mut declaration = String::new();
        for modifier in self.access_flags.modifiers() {
            declaration.push_str(modifier);
            declaration.push(' ');
        }
        let keyword = if self.access_flags.contains(ClassAccessFlags::ANNOTATION) {
            "@interface"
        } else if self.access_flags.contains(ClassAccessFlags::INTERFACE) {
            "interface"
        } else if self.access_flags.contains(ClassAccessFlags::ENUM) {
            "enum"
        } else {
            "class"
        };
        declaration.push_str(keyword);
        declaration.push(' ');
        declaration.push_str(&self.this_class);

        let is_interface = self.access_flags.contains(ClassAccessFlags::INTERFACE);
        match &self.super_class {
            Some(super_class) if !is_interface && super_class != "java.lang.Object" => {
                declaration.push_str(" extends ");
                declaration.push_str(super_class);
            }
            _ => (),
        }
        if !self.interfaces.is_empty() {
            declaration.push_str(if is_interface { " extends " } else { " implements " });
            declaration.push_str(&self.interfaces.join(", "));
        }
        declaration
    }

    /// Find a method by name (the first overload wins)
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|method| method.name == name)
    }

    /// Find a field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}
