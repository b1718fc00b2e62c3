use super::ConstantIndex;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum Error {
    /// The input ended before a field's declared width was available
    ///
    /// The stream position is undefined afterwards: the whole class or member decode has to be
    /// abandoned.
    TruncatedStream,

    /// A constant pool index has no backing entry, or the entry has the wrong type
    UnresolvedConstant {
        index: ConstantIndex,
        expected: &'static str,
    },

    /// An attribute whose framing contradicts its definition
    ///
    /// The declared length has already been consumed when this is reported.
    MalformedAttribute { name: String, reason: String },

    /// Class file does not start with `0xCAFEBABE`
    BadMagic(u32),

    /// Constant pool entry with a tag we don't know how to size
    UnknownConstantTag(u8),

    IoError(io::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::TruncatedStream
        } else {
            Error::IoError(err)
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TruncatedStream => write!(f, "unexpected end of class file data"),
            Error::UnresolvedConstant { index, expected } => {
                write!(f, "constant #{} is not a valid {} constant", index.0, expected)
            }
            Error::MalformedAttribute { name, reason } => {
                write!(f, "malformed `{}` attribute: {}", name, reason)
            }
            Error::BadMagic(magic) => write!(f, "bad class file magic {:#010x}", magic),
            Error::UnknownConstantTag(tag) => write!(f, "unknown constant pool tag {}", tag),
            Error::IoError(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}
