use crate::jvm::{Attribute, FieldAccessFlags, FieldType, Modifiers, ParseDescriptor};

/// Semantic representation of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub access_flags: FieldAccessFlags,
    pub name: String,

    /// Field descriptor (eg. `[Ljava/lang/String;`)
    pub descriptor: String,

    /// Initial value of a constant field, as Java source text
    pub constant_value: Option<String>,

    pub deprecated: bool,
    pub synthetic: bool,
}

impl Field {
    pub fn new(access_flags: FieldAccessFlags, name: String, descriptor: String) -> Field {
        Field {
            access_flags,
            name,
            descriptor,
            constant_value: None,
            deprecated: false,
            synthetic: false,
        }
    }

    /// Record a decoded field attribute
    pub fn apply_attribute(&mut self, attribute: Attribute) {
        match attribute {
            Attribute::ConstantValue(value) => self.constant_value = Some(value),
            Attribute::Deprecated => self.deprecated = true,
            Attribute::Synthetic => self.synthetic = true,
            other => log::trace!("Ignoring `{}` attribute on field {}", other.name(), self.name),
        }
    }

    /// Java declaration of the field (eg. `public static final int ANSWER = 42;`)
    ///
    /// Falls back on the raw descriptor for the type if it can't be parsed.
    pub fn declaration(&self) -> String {
        let mut declaration = String::new();
        for modifier in self.access_flags.modifiers() {
            declaration.push_str(modifier);
            declaration.push(' ');
        }
        match FieldType::parse(&self.descriptor) {
            Ok(field_type) => declaration.push_str(&field_type.java_source()),
            Err(_) => declaration.push_str(&self.descriptor),
        }
        declaration.push(' ');
        declaration.push_str(&self.name);
        if let Some(value) = &self.constant_value {
            declaration.push_str(" = ");
            declaration.push_str(value);
        }
        declaration.push(';');
        declaration
    }
}
