//! Decoded view of a class file
//!
//! Members are populated attribute by attribute as the class file is read: each decoded
//! [`Attribute`](super::Attribute) is handed to the owning model, which keeps what it has a use
//! for.

mod class;
mod field;
mod method;

pub use class::*;
pub use field::*;
pub use method::*;
