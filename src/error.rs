//! Centralized error handling for packetbuf.
//!
//! Every failure is surfaced through [`Result`]; the library never panics on
//! bad input.
//!
//! ## Error Categories
//!
//! - **Transport Errors** ([`PacketError::Io`]): the sink or source could not
//!   move the requested bytes (end of stream, broken pipe, ...). The original
//!   `io::Error` is kept intact and exposed through `source()`.
//! - **UTF-8 Errors** ([`PacketError::Utf8`]): a decoded string payload is not
//!   valid UTF-8.
//! - **Format Errors** ([`PacketError::Format`]): decoded bytes describe a value
//!   the target type cannot hold (unknown enum discriminant, invalid `char`,
//!   negative `Duration`, trailing bytes after a whole-value decode).
//! - **Internal Errors** ([`PacketError::Internal`]): logic errors that should
//!   not occur in production.
//!
//! ## Usage
//!
//! ```rust
//! use packetbuf::{PacketBuffer, PacketError};
//!
//! // Only four of the eight length-prefix bytes are present.
//! let truncated = [0x01u8, 0x00, 0x00, 0x00];
//! match PacketBuffer::from_slice::<String>(&truncated) {
//!     Err(PacketError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```

use std::fmt;
use std::io;
use std::sync::Arc;

/// A specialized `Result` type for packetbuf operations.
pub type Result<T> = std::result::Result<T, PacketError>;

/// The master error enum covering all failure domains in packetbuf.
///
/// This type is `Clone`; the I/O variant wraps its `io::Error` in an `Arc`.
#[derive(Debug, Clone)]
pub enum PacketError {
    /// The byte transport failed to satisfy a write or read.
    ///
    /// Short reads (end of stream) show up here with
    /// `io::ErrorKind::UnexpectedEof`.
    Io(Arc<io::Error>),

    /// A string payload was not valid UTF-8.
    Utf8(String),

    /// Decoded bytes do not describe a valid value of the target type.
    Format(String),

    /// Logic error inside the library. Please report it with a reproduction.
    Internal(String),
}

impl PacketError {
    /// Returns the transport error kind, if this is a transport failure.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Io(e) => Some(e.kind()),
            _ => None,
        }
    }
}

impl fmt::Display for PacketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Transport Error: {e}"),
            Self::Utf8(s) => write!(f, "UTF-8 Error: {s}"),
            Self::Format(s) => write!(f, "Format Error: {s}"),
            Self::Internal(s) => write!(f, "Internal Logic Error: {s}"),
        }
    }
}

impl std::error::Error for PacketError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PacketError {
    fn from(err: io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

impl From<std::string::FromUtf8Error> for PacketError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::Utf8(err.to_string())
    }
}
