//! Sources of octets.
//!
//! This is a private module. Its public items are re-exported by the
//! parent.

use std::{cmp, io};
use bytes::Bytes;
use super::error::{DecodeError, ErrorKind, Pos};


//------------ Source --------------------------------------------------------

/// A source of octets to decode from.
///
/// Sources hand out single octets and signal the end of their data by
/// returning `Ok(None)`. Octets are consumed by reading them; there is no
/// way back.
///
/// The trait is object safe. Nested sources refer to their parent source
/// as a `&mut dyn Source`, so an arbitrarily deep nesting doesn’t turn
/// into an arbitrarily deep type.
pub trait Source {
    /// Takes the next octet from the source.
    ///
    /// Returns `Ok(None)` if the source has reached its end.
    fn take_opt_u8(&mut self) -> Result<Option<u8>, DecodeError>;

    /// Returns the current logical position of the source.
    fn pos(&self) -> Pos;

    /// Returns how many octets the source has left at most, if it knows.
    ///
    /// The default implementation doesn’t know.
    fn available(&self) -> Option<usize> {
        None
    }

    /// Switches recognition of the end-of-contents marker on or off.
    ///
    /// Only sources for the content of indefinite length values recognize
    /// the marker. For all other sources, this is a no-op.
    fn set_eoc_check(&mut self, enabled: bool) {
        let _ = enabled;
    }

    /// Takes the next octet from the source.
    ///
    /// If there aren’t any more octets available from the source, returns
    /// a [`ErrorKind::Truncated`] error.
    fn take_u8(&mut self) -> Result<u8, DecodeError> {
        match self.take_opt_u8()? {
            Some(octet) => Ok(octet),
            None => xerr!(Err(self.err(ErrorKind::Truncated)))
        }
    }

    /// Returns an error of the given kind at the current position.
    fn err(&self, kind: ErrorKind) -> DecodeError {
        DecodeError::new(kind, self.pos())
    }
}


//------------ ReaderSource --------------------------------------------------

/// A source atop a reader.
///
/// The source reads octet by octet from the reader. For readers that are
/// expensive to call, such as files or sockets, wrap them into a
/// [`io::BufReader`] first.
///
/// The end of the reader ends the source. Interrupted reads are retried,
/// all other errors from the reader are returned as an
/// [`ErrorKind::Io`] error.
#[derive(Clone, Debug)]
pub struct ReaderSource<R> {
    reader: R,
    pos: usize,
}

impl<R> ReaderSource<R> {
    /// Creates a new source reading from `reader`.
    pub fn new(reader: R) -> Self {
        Self { reader, pos: 0 }
    }

    /// Returns a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Converts the source back into the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: io::Read> Source for ReaderSource<R> {
    fn take_opt_u8(&mut self) -> Result<Option<u8>, DecodeError> {
        let mut buf = [0u8];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.pos += 1;
                    return Ok(Some(buf[0]))
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => { }
                Err(err) => {
                    return xerr!(Err(DecodeError::io(err, self.pos.into())))
                }
            }
        }
    }

    fn pos(&self) -> Pos {
        self.pos.into()
    }
}


//------------ DefiniteSource ------------------------------------------------

/// The content of a definite length value.
///
/// The source allows reading exactly the given number of octets from the
/// underlying source and then reports its end. Reading past that end never
/// touches the underlying source.
///
/// If the underlying source ends before all octets have been read, the
/// content was truncated and a [`ErrorKind::Truncated`] error is returned.
pub struct DefiniteSource<'a> {
    source: &'a mut dyn Source,
    remaining: usize,
}

impl<'a> DefiniteSource<'a> {
    /// The maximum capacity allocated in advance when taking all content.
    ///
    /// The length of a value is only a claim until the octets have
    /// actually been read.
    const MAX_PREALLOC: usize = 0x1000;

    /// Creates a new source for `len` octets of `source`.
    pub fn new(source: &'a mut dyn Source, len: usize) -> Self {
        Self { source, remaining: len }
    }

    /// Returns the number of octets not yet read.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Returns whether all octets have been read.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Takes all the remaining octets.
    ///
    /// This reads exactly as many octets as remain. It fails if the
    /// underlying source ends before that.
    pub fn take_all(&mut self) -> Result<Bytes, DecodeError> {
        let mut res = Vec::with_capacity(
            cmp::min(self.remaining, Self::MAX_PREALLOC)
        );
        while let Some(octet) = self.take_opt_u8()? {
            res.push(octet)
        }
        Ok(res.into())
    }
}

impl<'a> Source for DefiniteSource<'a> {
    fn take_opt_u8(&mut self) -> Result<Option<u8>, DecodeError> {
        if self.remaining == 0 {
            return Ok(None)
        }
        match self.source.take_opt_u8()? {
            Some(octet) => {
                self.remaining -= 1;
                Ok(Some(octet))
            }
            None => xerr!(Err(self.err(ErrorKind::Truncated)))
        }
    }

    fn pos(&self) -> Pos {
        self.source.pos()
    }

    fn available(&self) -> Option<usize> {
        Some(self.remaining)
    }
}


//------------ IndefiniteSource ----------------------------------------------

/// The content of an indefinite length value.
///
/// The source passes through octets from the underlying source until it
/// encounters the end-of-contents marker, two consecutive zero octets. The
/// marker is consumed and the source reports its end from then on.
///
/// The marker is only looked for while the check is enabled via
/// [`Source::set_eoc_check`]. It is enabled initially. Because an isolated
/// zero octet has to be distinguished from the marker, the source may have
/// to read one octet ahead. That octet is kept and handed out next.
///
/// If the underlying source ends before the marker was found, the content
/// was truncated and a [`ErrorKind::Truncated`] error is returned.
pub struct IndefiniteSource<'a> {
    source: &'a mut dyn Source,
    eoc_check: bool,
    lookahead: Option<u8>,
    done: bool,
}

impl<'a> IndefiniteSource<'a> {
    /// Creates a new source for the content starting at `source`.
    pub fn new(source: &'a mut dyn Source) -> Self {
        Self {
            source,
            eoc_check: true,
            lookahead: None,
            done: false,
        }
    }

    /// Returns whether the end-of-contents marker has been read.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Skips over all octets up to and including the end-of-contents.
    ///
    /// Any pair of zero octets ends the content, regardless of where it
    /// appears.
    pub fn skip_to_end(&mut self) -> Result<(), DecodeError> {
        self.eoc_check = true;
        while self.take_opt_u8()?.is_some() { }
        Ok(())
    }

    /// Takes the next octet from the underlying source.
    fn take_next(&mut self) -> Result<u8, DecodeError> {
        match self.lookahead.take() {
            Some(octet) => Ok(octet),
            None => match self.source.take_opt_u8()? {
                Some(octet) => Ok(octet),
                None => xerr!(Err(self.err(ErrorKind::Truncated)))
            }
        }
    }
}

impl<'a> Source for IndefiniteSource<'a> {
    fn take_opt_u8(&mut self) -> Result<Option<u8>, DecodeError> {
        if self.done {
            return Ok(None)
        }
        let first = self.take_next()?;
        if !self.eoc_check || first != 0 {
            return Ok(Some(first))
        }
        match self.take_next()? {
            0 => {
                self.done = true;
                Ok(None)
            }
            second => {
                self.lookahead = Some(second);
                Ok(Some(first))
            }
        }
    }

    fn pos(&self) -> Pos {
        self.source.pos()
    }

    /// The content can’t be longer than what the underlying source has
    /// left, plus the octet read ahead.
    fn available(&self) -> Option<usize> {
        if self.done {
            return Some(0)
        }
        self.source.available().map(|available| {
            available + usize::from(self.lookahead.is_some())
        })
    }

    fn set_eoc_check(&mut self, enabled: bool) {
        self.eoc_check = enabled
    }
}


//------------ ContentSource -------------------------------------------------

/// The content of a value of either length form.
///
/// This is the source of all nested stream parsers.
pub enum ContentSource<'a> {
    /// The content of a definite length value.
    Definite(DefiniteSource<'a>),

    /// The content of an indefinite length value.
    Indefinite(IndefiniteSource<'a>),
}

impl<'a> ContentSource<'a> {
    /// Returns whether this is the content of an indefinite length value.
    pub fn is_indefinite(&self) -> bool {
        matches!(self, ContentSource::Indefinite(_))
    }
}

impl<'a> Source for ContentSource<'a> {
    fn take_opt_u8(&mut self) -> Result<Option<u8>, DecodeError> {
        match self {
            ContentSource::Definite(inner) => inner.take_opt_u8(),
            ContentSource::Indefinite(inner) => inner.take_opt_u8(),
        }
    }

    fn pos(&self) -> Pos {
        match self {
            ContentSource::Definite(inner) => inner.pos(),
            ContentSource::Indefinite(inner) => inner.pos(),
        }
    }

    fn available(&self) -> Option<usize> {
        match self {
            ContentSource::Definite(inner) => inner.available(),
            ContentSource::Indefinite(inner) => inner.available(),
        }
    }

    fn set_eoc_check(&mut self, enabled: bool) {
        if let ContentSource::Indefinite(inner) = self {
            inner.set_eoc_check(enabled)
        }
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reader_source() {
        let mut source = ReaderSource::new(b"\x01\x02".as_ref());
        assert_eq!(source.take_u8().unwrap(), 1);
        assert_eq!(source.take_opt_u8().unwrap(), Some(2));
        assert_eq!(source.pos(), Pos::from(2));
        assert_eq!(source.take_opt_u8().unwrap(), None);
        assert!(source.take_u8().unwrap_err().is_truncated());
    }

    #[test]
    fn reader_source_error() {
        struct Failing;

        impl io::Read for Failing {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "failing"))
            }
        }

        let err = ReaderSource::new(Failing).take_opt_u8().unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Io(_)));
    }

    #[test]
    fn definite_take_all() {
        let mut inner = ReaderSource::new(b"\x01\x02\x03".as_ref());
        {
            let mut source = DefiniteSource::new(&mut inner, 2);
            assert_eq!(source.remaining(), 2);
            assert_eq!(source.take_all().unwrap().as_ref(), b"\x01\x02");
            assert!(source.is_exhausted());

            // Reading past the end doesn’t touch the underlying source.
            assert_eq!(source.take_opt_u8().unwrap(), None);
            assert_eq!(source.take_all().unwrap().as_ref(), b"");
        }
        assert_eq!(inner.take_opt_u8().unwrap(), Some(3));
    }

    #[test]
    fn definite_truncated() {
        let mut inner = ReaderSource::new(b"\x01\x02".as_ref());
        let mut source = DefiniteSource::new(&mut inner, 3);
        assert!(source.take_all().unwrap_err().is_truncated());
    }

    #[test]
    fn indefinite_end_of_contents() {
        let mut inner = ReaderSource::new(b"\x01\x00\x02\x00\x00\x03".as_ref());
        {
            let mut source = IndefiniteSource::new(&mut inner);
            assert_eq!(source.take_opt_u8().unwrap(), Some(1));
            assert_eq!(source.take_opt_u8().unwrap(), Some(0));
            assert_eq!(source.take_opt_u8().unwrap(), Some(2));
            assert_eq!(source.take_opt_u8().unwrap(), None);
            assert!(source.is_done());
            assert_eq!(source.take_opt_u8().unwrap(), None);
        }
        assert_eq!(inner.take_opt_u8().unwrap(), Some(3));
    }

    #[test]
    fn indefinite_check_disabled() {
        let mut inner = ReaderSource::new(b"\x00\x00\x00\x00".as_ref());
        let mut source = IndefiniteSource::new(&mut inner);
        source.set_eoc_check(false);
        assert_eq!(source.take_opt_u8().unwrap(), Some(0));
        assert_eq!(source.take_opt_u8().unwrap(), Some(0));
        source.set_eoc_check(true);
        assert_eq!(source.take_opt_u8().unwrap(), None);
    }

    #[test]
    fn indefinite_lookahead_survives_toggle() {
        let mut inner = ReaderSource::new(b"\x00\x07\x00\x00".as_ref());
        let mut source = IndefiniteSource::new(&mut inner);
        assert_eq!(source.take_opt_u8().unwrap(), Some(0));
        source.set_eoc_check(false);
        assert_eq!(source.take_opt_u8().unwrap(), Some(7));
        source.set_eoc_check(true);
        assert_eq!(source.take_opt_u8().unwrap(), None);
    }

    #[test]
    fn indefinite_truncated() {
        let mut inner = ReaderSource::new(b"\x01".as_ref());
        let mut source = IndefiniteSource::new(&mut inner);
        assert_eq!(source.take_opt_u8().unwrap(), Some(1));
        assert!(source.take_opt_u8().unwrap_err().is_truncated());

        let mut inner = ReaderSource::new(b"\x00".as_ref());
        let mut source = IndefiniteSource::new(&mut inner);
        assert!(source.take_opt_u8().unwrap_err().is_truncated());
    }

    #[test]
    fn indefinite_skip_to_end() {
        let mut inner = ReaderSource::new(b"\x05\x01\x00\x00\x09".as_ref());
        {
            let mut source = IndefiniteSource::new(&mut inner);
            source.set_eoc_check(false);
            source.skip_to_end().unwrap();
        }
        assert_eq!(inner.take_opt_u8().unwrap(), Some(9));
    }

    #[test]
    fn available() {
        let mut inner = ReaderSource::new(b"\x01\x00\x02\x00\x00".as_ref());
        assert_eq!(inner.available(), None);
        let mut outer = DefiniteSource::new(&mut inner, 5);
        assert_eq!(outer.available(), Some(5));
        let mut source = IndefiniteSource::new(&mut outer);
        assert_eq!(source.take_opt_u8().unwrap(), Some(1));
        assert_eq!(source.available(), Some(4));

        // The octet read ahead still counts.
        assert_eq!(source.take_opt_u8().unwrap(), Some(0));
        assert_eq!(source.available(), Some(3));
        assert_eq!(source.take_opt_u8().unwrap(), Some(2));
        assert_eq!(source.take_opt_u8().unwrap(), None);
        assert_eq!(source.available(), Some(0));
    }

    #[test]
    fn content_source_toggle() {
        let mut inner = ReaderSource::new(b"\x00\x00\x00\x00".as_ref());
        let mut outer = IndefiniteSource::new(&mut inner);
        outer.set_eoc_check(false);

        // A definite source ignores the toggle and must not pass it on.
        let mut source = ContentSource::Definite(
            DefiniteSource::new(&mut outer, 2)
        );
        source.set_eoc_check(true);
        assert!(!source.is_indefinite());
        assert_eq!(source.take_opt_u8().unwrap(), Some(0));
        assert_eq!(source.take_opt_u8().unwrap(), Some(0));
        assert_eq!(source.take_opt_u8().unwrap(), None);
    }
}
