//! The version resource parser's error type
//!

use alloc::string::String;
use core::fmt;
use core::result;
#[cfg(feature = "std")]
use std::{error, io};

#[non_exhaustive]
#[derive(Debug)]
/// A structural error in a version resource.
///
/// Anything that is merely unexpected (a bad `VS_FIXEDFILEINFO` signature, an unknown block key,
/// a string table outside the language whitelist) is handled while walking the resource and never
/// shows up here.
pub enum Error {
    /// A mandatory field is cut short by the end of its enclosing block
    Truncated {
        /// The field being read
        what: &'static str,
        /// Absolute offset of the read in the resource
        offset: usize,
        /// Bytes needed to complete the read
        need: usize,
        /// Bytes left before the end of the enclosing block
        have: usize,
    },
    /// The resource is malformed somehow
    Malformed(String),
    /// An error emanating from reading and interpreting bytes
    Scroll(scroll::Error),
    /// An IO based error
    #[cfg(feature = "std")]
    IO(io::Error),
}

#[cfg(feature = "std")]
impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::IO(ref io) => Some(io),
            Error::Scroll(ref scroll) => Some(scroll),
            _ => None,
        }
    }
}

#[cfg(feature = "std")]
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::IO(err)
    }
}

impl From<scroll::Error> for Error {
    fn from(err: scroll::Error) -> Error {
        Error::Scroll(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            #[cfg(feature = "std")]
            Error::IO(ref err) => write!(fmt, "{}", err),
            Error::Scroll(ref err) => write!(fmt, "{}", err),
            Error::Truncated {
                what,
                offset,
                need,
                have,
            } => write!(
                fmt,
                "Truncated {} at offset {:#x}: need {} bytes, have {}",
                what, offset, need, have
            ),
            Error::Malformed(ref msg) => write!(fmt, "Malformed entity: {}", msg),
        }
    }
}

/// A version resource parsing result
pub type Result<T> = result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;
    use alloc::string::ToString;

    #[test]
    fn display_truncated() {
        let err = Error::Truncated {
            what: "wLength",
            offset: 0x10,
            need: 2,
            have: 1,
        };
        assert_eq!(
            err.to_string(),
            "Truncated wLength at offset 0x10: need 2 bytes, have 1"
        );
    }

    #[test]
    fn display_malformed() {
        let err = Error::Malformed("bad block".into());
        assert_eq!(err.to_string(), "Malformed entity: bad block");
    }
}
