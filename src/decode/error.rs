//! Error Handling.
//!
//! This is a private module. Its public content is being re-exported by the
//! parent module.

use std::{error, fmt, io};


//------------ DecodeError ---------------------------------------------------

/// An error happened while decoding data.
///
/// All errors are final: once a stream parser or any of the containers
/// it produced returned an error, the position of the underlying source is
/// unspecified and decoding cannot sensibly continue.
///
/// The error contains the kind of problem and the position in the source
/// where it was detected. The position is for diagnostics only.
#[derive(Debug)]
pub struct DecodeError {
    /// What went wrong.
    kind: ErrorKind,

    /// Where it went wrong.
    pos: Pos,
}

impl DecodeError {
    /// Creates a new error from its kind and the position.
    pub fn new(kind: ErrorKind, pos: Pos) -> Self {
        Self { kind, pos }
    }

    /// Creates a new error for a failed read of the underlying reader.
    pub fn io(err: io::Error, pos: Pos) -> Self {
        Self::new(ErrorKind::Io(err), pos)
    }

    /// Returns the kind of the error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the position in the source where the error was detected.
    pub fn pos(&self) -> Pos {
        self.pos
    }

    /// Returns whether the error was caused by premature end of data.
    pub fn is_truncated(&self) -> bool {
        matches!(self.kind, ErrorKind::Truncated)
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at position {}", self.kind, self.pos)
    }
}

impl error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Io(err) => Some(err),
            _ => None
        }
    }
}


//------------ ErrorKind -----------------------------------------------------

/// The kind of a decoding error.
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The data ended where more octets were structurally required.
    ///
    /// This happens inside the length octets, inside a long-form tag
    /// number, or inside the content of a definite length value.
    Truncated,

    /// The length octets are malformed.
    ///
    /// Either more than four length octets are announced or the length
    /// doesn’t fit into a non-negative 32 bit integer.
    MalformedLength,

    /// A definite length is not smaller than the limit of the parser.
    OutOfBounds,

    /// An indefinite length was used with a type that doesn’t allow it.
    UnsupportedIndefiniteForm,

    /// The tag number does not fit into a `u32`.
    MalformedTag,

    /// Containers are nested deeper than the parser allows.
    NestingTooDeep,

    /// The content octets cannot represent a value of the given type.
    MalformedContent(&'static str),

    /// Reading from the underlying reader failed.
    Io(io::Error),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::Truncated => f.write_str("unexpected end of data"),
            ErrorKind::MalformedLength => f.write_str("malformed length"),
            ErrorKind::OutOfBounds => f.write_str("length out of bounds"),
            ErrorKind::UnsupportedIndefiniteForm => {
                f.write_str("indefinite length not supported for type")
            }
            ErrorKind::MalformedTag => f.write_str("tag number too large"),
            ErrorKind::NestingTooDeep => {
                f.write_str("containers nested too deeply")
            }
            ErrorKind::MalformedContent(msg) => {
                write!(f, "malformed content: {}", msg)
            }
            ErrorKind::Io(err) => write!(f, "read error: {}", err),
        }
    }
}


//------------ Pos -----------------------------------------------------------

/// The logical position within a source.
///
/// Values of this type can only be used for diagnostics. They can not be used
/// to determine how far a source has been advanced since it was created. This
/// is why we used a newtype.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Pos(usize);

impl From<usize> for Pos {
    fn from(pos: usize) -> Pos {
        Pos(pos)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}


//============ Tests =========================================================
