use crate::jvm::{
    Attribute, CodeSink, ExceptionHandler, MethodAccessFlags, MethodDescriptor, Modifiers,
    ParseDescriptor,
};

/// Semantic representation of a method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub access_flags: MethodAccessFlags,
    pub name: String,

    /// Method descriptor (eg. `(I)Ljava/lang/String;`)
    pub descriptor: String,

    pub max_stack: u16,
    pub max_locals: u16,

    /// Raw bytecode, absent for `abstract` and `native` methods
    pub code: Option<Vec<u8>>,

    pub exception_handlers: Vec<ExceptionHandler>,

    /// Which exceptions can this method throw?
    pub throws: Vec<String>,

    pub deprecated: bool,
    pub synthetic: bool,
}

impl Method {
    pub fn new(access_flags: MethodAccessFlags, name: String, descriptor: String) -> Method {
        Method {
            access_flags,
            name,
            descriptor,
            max_stack: 0,
            max_locals: 0,
            code: None,
            exception_handlers: vec![],
            throws: vec![],
            deprecated: false,
            synthetic: false,
        }
    }

    /// Record a decoded method attribute
    ///
    /// The attributes nested in `Code` are not kept.
    pub fn apply_attribute(&mut self, attribute: Attribute) {
        match attribute {
            Attribute::Code(code) => code.populate(self),
            Attribute::Exceptions(throws) => self.throws = throws,
            Attribute::Deprecated => self.deprecated = true,
            Attribute::Synthetic => self.synthetic = true,
            other => log::trace!("Ignoring `{}` attribute on method {}", other.name(), self.name),
        }
    }

    /// Java signature of the method (eg. `public static void main(java.lang.String[] arg0)`)
    ///
    /// Falls back on the raw descriptor if it can't be parsed.
    pub fn signature(&self) -> String {
        let mut signature = String::new();
        for modifier in self.access_flags.modifiers() {
            signature.push_str(modifier);
            signature.push(' ');
        }
        match MethodDescriptor::parse(&self.descriptor) {
            Ok(descriptor) => {
                signature.push_str(&descriptor.java_return_type());
                signature.push(' ');
                signature.push_str(&self.name);
                signature.push('(');
                let parameters: Vec<String> = descriptor
                    .parameters
                    .iter()
                    .enumerate()
                    .map(|(i, parameter)| format!("{} arg{}", parameter.java_source(), i))
                    .collect();
                signature.push_str(&parameters.join(", "));
                signature.push(')');
            }
            Err(_) => {
                signature.push_str(&self.name);
                signature.push_str(&self.descriptor);
            }
        }
        if !self.throws.is_empty() {
            signature.push_str(" throws ");
            signature.push_str(&self.throws.join(", "));
        }
        signature
    }
}

impl CodeSink for Method {
    fn set_max_stack(&mut self, max_stack: u16) {
        self.max_stack = max_stack;
    }

    fn set_max_locals(&mut self, max_locals: u16) {
        self.max_locals = max_locals;
    }

    fn set_code(&mut self, code: Vec<u8>) {
        self.code = Some(code);
    }

    fn add_exception_handler(&mut self, handler: ExceptionHandler) {
        self.exception_handlers.push(handler);
    }
}
