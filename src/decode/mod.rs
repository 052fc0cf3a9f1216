//! Decoding data in Basic Encoding Rules.
//!
//! Decoding happens one value at a time. A [`StreamParser`] wraps a
//! [`Source`] of octets, typically a [`ReaderSource`] atop something
//! implementing [`std::io::Read`]. Each call to [`StreamParser::next`]
//! produces one [`Object`]:
//!
//! * values of application or private class are returned as opaque
//!   [`ClassSpecific`] values carrying their content octets,
//! * primitive values of universal class are decoded into a
//!   [`Primitive`],
//! * constructed values of universal class and all values of context
//!   specific class are returned as a [`Container`] which holds a stream
//!   parser for the content.
//!
//! Containers borrow the parser they were produced by, so the content of
//! nested values is read directly from the underlying source. Nothing is
//! read ahead. If a caller needs all of a container’s content at once, it
//! can [`drain`] it into a vector of [`Element`]s.
//!
//! Both the definite and the indefinite length forms are supported. The
//! content of a value with definite length is read via a
//! [`DefiniteSource`], that of a value with indefinite length via an
//! [`IndefiniteSource`] that ends at the end-of-contents marker.
//!
//! Containers can be nested at most [`DEFAULT_MAX_DEPTH`] deep unless a
//! different maximum is set on the parser.
//!
//! Errors are reported as a [`DecodeError`]. Once an error has happened,
//! decoding cannot continue.

pub use self::container::{
    drain, Container, OctetStringParser, SequenceParser, SetParser,
    TaggedParser,
};
pub use self::error::{DecodeError, ErrorKind, Pos};
pub use self::object::{
    ClassSpecific, Element, Object, Primitive, TaggedContent, TaggedElement,
    UnknownTag,
};
pub use self::parser::{StreamParser, DEFAULT_MAX_DEPTH};
pub use self::source::{
    ContentSource, DefiniteSource, IndefiniteSource, ReaderSource, Source,
};

mod container;
mod error;
mod object;
mod parser;
mod source;
