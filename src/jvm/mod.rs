//! Read JVM class files
//!
//! The interesting part is attribute decoding (see [`read_attribute`]): every attribute is framed
//! by a name and a length, and the decoder has to consume exactly that many bytes whether or not
//! it understands the payload.

mod access_flags;
mod attributes;
mod binary_format;
pub mod class_file;
mod constants;
mod descriptors;
mod errors;
pub mod model;
mod version;

pub use access_flags::*;
pub use attributes::*;
pub use binary_format::*;
pub use constants::*;
pub use descriptors::*;
pub use errors::*;
pub use version::*;
