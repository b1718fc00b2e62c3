use super::{BlockId, BlockTree, Child};
use crate::settings::Settings;

/// Turns a [`BlockTree`] into indented source text
///
/// Every block is rendered as its indentation and entry decoration, then its children one
/// indentation unit deeper, then its indentation and exit decoration. Statements are emitted as
/// indentation, one extra unit, the statement text, and a newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRenderer {
    indent_unit: String,
}

impl CodeRenderer {
    pub fn new(indent_unit: impl Into<String>) -> CodeRenderer {
        CodeRenderer {
            indent_unit: indent_unit.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> CodeRenderer {
        CodeRenderer::new(settings.indent_unit.as_str())
    }

    pub fn indent_unit(&self) -> &str {
        &self.indent_unit
    }

    /// Render the block `id` (and everything under it) at indentation `indent`
    pub fn render(&self, tree: &BlockTree, id: BlockId, indent: &str) -> String {
        let mut output = String::new();
        self.walk(tree, id, indent, &mut |chunk| output.push_str(&chunk));
        output
    }

    /// Render the block `id` as the sequence of text pieces whose concatenation is [`render`]
    ///
    /// [`render`]: CodeRenderer::render
    pub fn flatten(&self, tree: &BlockTree, id: BlockId, indent: &str) -> Vec<String> {
        let mut pieces = vec![];
        self.walk(tree, id, indent, &mut |chunk| pieces.push(chunk));
        pieces
    }

    fn walk(&self, tree: &BlockTree, id: BlockId, indent: &str, emit: &mut dyn FnMut(String)) {
        let node = &tree[id];
        let inner_indent = format!("{}{}", indent, self.indent_unit);

        emit(format!("{}{}", indent, node.entry_code(indent)));

        for child in node.children() {
            match child {
                Child::Block(nested) => self.walk(tree, *nested, &inner_indent, emit),
                Child::Statement(line) => emit(format!("{}{}\n", inner_indent, line.text)),
            }
        }

        // Even an empty exit decoration (eg. `case`) leaves its indentation behind
        emit(format!("{}{}", indent, node.exit_code(indent)));
    }
}

impl Default for CodeRenderer {
    fn default() -> CodeRenderer {
        CodeRenderer::from_settings(&Settings::default())
    }
}
