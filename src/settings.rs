/// Knobs shared by the attribute decoder and the block renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Reject `Deprecated` and `Synthetic` attributes whose declared length is not zero
    ///
    /// The payload is still consumed before the error is reported. When this is off, any payload
    /// on these marker attributes is skipped silently.
    pub strict_attribute_lengths: bool,

    /// Text added in front of rendered lines for every level of block nesting
    pub indent_unit: String,
}

impl Settings {
    /// Default indentation unit (five spaces)
    pub const DEFAULT_INDENT_UNIT: &'static str = "     ";

    pub fn new() -> Settings {
        Settings {
            strict_attribute_lengths: false,
            indent_unit: String::from(Self::DEFAULT_INDENT_UNIT),
        }
    }

    /// Settings with the indentation unit set to `width` spaces
    pub fn with_indent_width(mut self, width: usize) -> Settings {
        self.indent_unit = " ".repeat(width);
        self
    }
}

impl Default for Settings {
    fn default() -> Settings {
        Settings::new()
    }
}
