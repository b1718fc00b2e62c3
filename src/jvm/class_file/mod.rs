//! Index-level form of class files, as laid out on the wire
//!
//! These structures refer to the constant pool by index and know how to serialize themselves.
//! They are the write-side counterpart of the decoded models in [`crate::jvm`].

mod attribute;
mod class;

pub use attribute::*;
pub use class::*;
