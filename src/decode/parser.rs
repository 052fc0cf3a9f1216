//! The stream parser.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::{cmp, fmt, io};
use crate::ident::Ident;
use crate::length::Length;
use super::container::drain;
use super::error::{DecodeError, ErrorKind, Pos};
use super::object::{dispatch_definite, dispatch_indefinite, Element, Object};
use super::source::{DefiniteSource, IndefiniteSource, ReaderSource, Source};


//------------ Constants -----------------------------------------------------

/// The default for how deep containers can be nested.
pub const DEFAULT_MAX_DEPTH: usize = 128;


//------------ StreamParser --------------------------------------------------

/// A parser producing the BER encoded values of a source one by one.
///
/// The parser owns its source and a limit. Each call to
/// [`next`][Self::next] reads the identifier and length octets of the next
/// value and returns it as an [`Object`]. Primitive values are read
/// completely. For constructed values, only a container is returned that
/// reads the content when it is pulled.
///
/// Any definite length must be smaller than the limit of the parser, or
/// decoding fails with [`ErrorKind::OutOfBounds`]. Parsers for the content
/// of a definite length value use that length as their limit. Parsers for
/// the content of indefinite length values use the limit of the parser
/// they were created by. If the source knows how many octets it has left,
/// a smaller number of octets left takes the place of the limit.
///
/// Containers can only be nested up to a maximum depth,
/// [`DEFAULT_MAX_DEPTH`] unless changed via
/// [`set_max_depth`][Self::set_max_depth]. A container beyond it fails with
/// [`ErrorKind::NestingTooDeep`].
pub struct StreamParser<S> {
    /// The source to read from.
    source: S,

    /// The limit for definite lengths.
    limit: usize,

    /// How deep the parser is nested into containers.
    depth: Depth,
}

impl<R: io::Read> StreamParser<ReaderSource<R>> {
    /// Creates a parser reading from `reader` without a limit.
    pub fn new(reader: R) -> Self {
        Self::with_limit(reader, usize::MAX)
    }

    /// Creates a parser reading from `reader` with the given limit.
    ///
    /// If you know how many octets are available from the reader, use that
    /// as the limit.
    pub fn with_limit(reader: R, limit: usize) -> Self {
        Self::from_source(ReaderSource::new(reader), limit)
    }
}

impl<'a> StreamParser<ReaderSource<&'a [u8]>> {
    /// Creates a parser for the content of a slice.
    ///
    /// The length of the slice is used as the limit.
    pub fn from_slice(slice: &'a [u8]) -> Self {
        Self::with_limit(slice, slice.len())
    }
}

impl<S> StreamParser<S> {
    /// Creates a parser atop a source using the given limit.
    pub fn from_source(source: S, limit: usize) -> Self {
        Self::nested(source, limit, Depth::top(DEFAULT_MAX_DEPTH))
    }

    pub(crate) fn nested(source: S, limit: usize, depth: Depth) -> Self {
        StreamParser { source, limit, depth }
    }

    /// Returns the limit of the parser.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns how many containers the parser is nested in.
    pub fn depth(&self) -> usize {
        self.depth.current
    }

    /// Returns how deep containers may be nested.
    pub fn max_depth(&self) -> usize {
        self.depth.max
    }

    /// Sets how deep containers may be nested.
    ///
    /// The depth counts from the top-level parser, so for a nested parser
    /// its own depth is included. Parsers for containers found by this
    /// parser inherit the value.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.depth.max = max_depth
    }

    /// Converts the parser into its source.
    pub fn into_source(self) -> S {
        self.source
    }

    pub(crate) fn source(&self) -> &S {
        &self.source
    }

    pub(crate) fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: Source> StreamParser<S> {
    /// Returns the current position of the source.
    pub fn pos(&self) -> Pos {
        self.source.pos()
    }

    /// Takes the next object from the source.
    ///
    /// Returns `Ok(None)` if the source ends where the next object would
    /// start. If the source ends anywhere else, this is an
    /// [`ErrorKind::Truncated`] error.
    ///
    /// [`ErrorKind::Truncated`]: super::ErrorKind::Truncated
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Option<Object<'_>>, DecodeError> {
        next_object(&mut self.source, self.limit, self.depth)
    }

    /// Takes all remaining objects and materializes them.
    pub fn drain(&mut self) -> Result<Vec<Element>, DecodeError> {
        drain(self)
    }
}

impl<S> fmt::Debug for StreamParser<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("StreamParser")
            .field("limit", &self.limit)
            .field("depth", &self.depth.current)
            .finish_non_exhaustive()
    }
}


//------------ Depth ---------------------------------------------------------

/// The nesting depth of a parser and the maximum it may reach.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Depth {
    current: usize,
    max: usize,
}

impl Depth {
    fn top(max: usize) -> Self {
        Depth { current: 0, max }
    }

    /// Returns the depth for the content of a container found at `self`.
    pub(crate) fn enter(
        self, source: &dyn Source
    ) -> Result<Self, DecodeError> {
        if self.current >= self.max {
            return xerr!(Err(source.err(ErrorKind::NestingTooDeep)))
        }
        Ok(Depth { current: self.current + 1, max: self.max })
    }
}


//------------ next_object ---------------------------------------------------

/// Reads the header of the next object and dispatches on it.
///
/// The end-of-contents check of an indefinite length source is only
/// enabled while reading the first identifier octet. Zero octets further
/// into the value belong to the value.
///
/// The octets the source has left are counted before the identifier, so a
/// value can exactly fill the rest of the source.
fn next_object(
    source: &mut dyn Source, limit: usize, depth: Depth
) -> Result<Option<Object<'_>>, DecodeError> {
    let limit = match source.available() {
        Some(available) => cmp::min(limit, available),
        None => limit
    };
    source.set_eoc_check(true);
    let first = source.take_opt_u8();
    source.set_eoc_check(false);
    let first = match first? {
        Some(first) => first,
        None => {
            log::trace!(
                target: "berstream", "end of content at {}", source.pos()
            );
            return Ok(None)
        }
    };
    let ident = Ident::take_from(first, source)?;
    let length = Length::take_from(source, limit)?;
    log::trace!(
        target: "berstream",
        "{} with length {:?} at {}", ident, length, source.pos()
    );
    let object = match length {
        Length::Definite(len) => {
            dispatch_definite(
                ident, DefiniteSource::new(source, len), depth
            )?
        }
        Length::Indefinite => {
            dispatch_indefinite(
                ident, IndefiniteSource::new(source), limit, depth
            )?
        }
    };
    Ok(Some(object))
}
