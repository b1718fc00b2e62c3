//! Structuring core of a JVM decompiler
//!
//! Two independent halves:
//!
//!   - [`jvm`] decodes class files, with an emphasis on the attributes attached to methods and
//!     fields (`Code`, `ConstantValue`, `Exceptions`, ...).
//!   - [`structure`] holds the tree of structured control-flow blocks (`if`, `for`, `do`/`while`,
//!     `switch`/`case`) that a decompiler assembles from the flat statement stream, and renders
//!     that tree as Java-like source.
//!
//! ### Simple example
//!
//! ```
//! use class2src::structure::{BlockKind, BlockTree, CodeRenderer, Role};
//!
//! let mut tree = BlockTree::new(BlockKind::for_loop("int i = 0", "i < n", "i++"));
//! let root = tree.root();
//! tree.add_statement(root, "total += i;", Role::Body);
//!
//! let renderer = CodeRenderer::new("    ");
//! assert_eq!(
//!     renderer.render(&tree, root, ""),
//!     "for (int i = 0;i < n;i++) \n    total += i;\n\n"
//! );
//! ```

pub mod jvm;
mod settings;
pub mod structure;

pub use settings::*;
