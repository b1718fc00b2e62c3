//! Structured control flow
//!
//! The decompiler builds a [`BlockTree`] of nested `if`/`for`/`do-while`/`switch`/`case` blocks
//! whose leaves are decompiled statement lines, then renders it with a [`CodeRenderer`].

mod block;
mod render;

pub use block::*;
pub use render::*;
