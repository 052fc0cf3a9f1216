//! Lazy containers.
//!
//! This is a private module. Its public items are re-exported by the parent.

use bytes::Bytes;
use crate::ident::{Class, Ident, Tag};
use crate::string::OctetString;
use super::error::{DecodeError, ErrorKind};
use super::object::{Element, Object, Primitive, TaggedContent, TaggedElement};
use super::parser::StreamParser;
use super::source::{ContentSource, Source};


//------------ Container -----------------------------------------------------

/// A constructed value whose content hasn’t been read yet.
///
/// Each variant wraps a stream parser over the content of the value. The
/// content is only read when the container is pulled.
#[derive(Debug)]
pub enum Container<'a> {
    Sequence(SequenceParser<'a>),
    Set(SetParser<'a>),
    Tagged(TaggedParser<'a>),
    OctetString(OctetStringParser<'a>),
}

impl<'a> Container<'a> {
    /// Takes the next object from the content.
    ///
    /// Returns `Ok(None)` once the content is exhausted.
    pub fn pull(&mut self) -> Result<Option<Object<'_>>, DecodeError> {
        match self {
            Container::Sequence(inner) => inner.pull(),
            Container::Set(inner) => inner.pull(),
            Container::Tagged(inner) => inner.pull(),
            Container::OctetString(inner) => inner.pull(),
        }
    }

    /// Drains the remaining content into its materialized form.
    pub fn into_element(self) -> Result<Element, DecodeError> {
        match self {
            Container::Sequence(mut inner) => {
                inner.drain().map(Element::Sequence)
            }
            Container::Set(mut inner) => inner.drain().map(Element::Set),
            Container::Tagged(inner) => inner.into_element(),
            Container::OctetString(mut inner) => {
                let content = inner.take_all()?;
                Ok(Element::Primitive(
                    Primitive::OctetString(OctetString::new(content))
                ))
            }
        }
    }

    /// Returns whether the content has indefinite length.
    pub fn is_indefinite(&self) -> bool {
        match self {
            Container::Sequence(inner) => inner.is_indefinite(),
            Container::Set(inner) => inner.is_indefinite(),
            Container::Tagged(inner) => inner.is_indefinite(),
            Container::OctetString(inner) => inner.is_indefinite(),
        }
    }
}


//------------ SequenceParser and SetParser ----------------------------------

macro_rules! collection_parser {
    ( $(#[$attr:meta])* $name:ident ) => {
        $(#[$attr])*
        #[derive(Debug)]
        pub struct $name<'a> {
            parser: StreamParser<ContentSource<'a>>,
        }

        impl<'a> $name<'a> {
            pub(crate) fn new(parser: StreamParser<ContentSource<'a>>) -> Self {
                $name { parser }
            }

            /// Takes the next element from the content.
            ///
            /// Returns `Ok(None)` once the content is exhausted.
            pub fn pull(
                &mut self
            ) -> Result<Option<Object<'_>>, DecodeError> {
                self.parser.next()
            }

            /// Takes all remaining elements.
            pub fn drain(&mut self) -> Result<Vec<Element>, DecodeError> {
                drain(&mut self.parser)
            }

            /// Returns whether the content has indefinite length.
            pub fn is_indefinite(&self) -> bool {
                self.parser.source().is_indefinite()
            }

            /// Returns how many containers the content is nested in.
            pub fn depth(&self) -> usize {
                self.parser.depth()
            }
        }
    }
}

collection_parser!(
    /// The content of a SEQUENCE or SEQUENCE OF value.
    SequenceParser
);

collection_parser!(
    /// The content of a SET or SET OF value.
    ///
    /// The elements are produced in the order they are encoded in.
    SetParser
);


//------------ TaggedParser --------------------------------------------------

/// The content of a value of context specific class.
///
/// Whether the content is a value on its own, i.e., an implicitly tagged
/// value, or a sequence of values, i.e., explicitly tagged, depends on the
/// definition of the data structure, so only the caller can know. It can
/// either [`pull`][Self::pull] the content as values, or take the raw
/// content octets via [`take_content`][Self::take_content].
///
/// Values of private class with indefinite length are produced as this
/// type, too.
#[derive(Debug)]
pub struct TaggedParser<'a> {
    ident: Ident,
    parser: StreamParser<ContentSource<'a>>,
}

impl<'a> TaggedParser<'a> {
    pub(crate) fn new(
        ident: Ident, parser: StreamParser<ContentSource<'a>>
    ) -> Self {
        TaggedParser { ident, parser }
    }

    /// Returns the identifier of the value.
    pub fn ident(&self) -> &Ident {
        &self.ident
    }

    /// Returns the tag of the value.
    pub fn tag(&self) -> Tag {
        self.ident.tag()
    }

    /// Returns the class of the value.
    pub fn class(&self) -> Class {
        self.ident.class()
    }

    /// Returns the tag number of the value.
    pub fn number(&self) -> u32 {
        self.ident.number()
    }

    /// Returns whether the value is constructed.
    ///
    /// Only the content of a constructed value can be pulled as values.
    pub fn is_constructed(&self) -> bool {
        self.ident.is_constructed()
    }

    /// Returns whether the content has indefinite length.
    pub fn is_indefinite(&self) -> bool {
        self.parser.source().is_indefinite()
    }

    /// Returns how many containers the content is nested in.
    pub fn depth(&self) -> usize {
        self.parser.depth()
    }

    /// Returns how deep containers inside the content may be nested.
    pub fn max_depth(&self) -> usize {
        self.parser.max_depth()
    }

    /// Takes the next value from the content.
    pub fn pull(&mut self) -> Result<Option<Object<'_>>, DecodeError> {
        self.parser.next()
    }

    /// Takes all remaining values from the content.
    pub fn drain(&mut self) -> Result<Vec<Element>, DecodeError> {
        drain(&mut self.parser)
    }

    /// Takes the remaining content octets.
    ///
    /// This is only possible for content of definite length. For
    /// indefinite length, the end of the content can only be found by
    /// parsing it, so an [`ErrorKind::UnsupportedIndefiniteForm`] error is
    /// returned.
    pub fn take_content(&mut self) -> Result<Bytes, DecodeError> {
        match self.parser.source_mut() {
            ContentSource::Definite(source) => source.take_all(),
            ContentSource::Indefinite(source) => {
                xerr!(Err(source.err(ErrorKind::UnsupportedIndefiniteForm)))
            }
        }
    }

    /// Drains the remaining content into its materialized form.
    ///
    /// The content of a constructed value is drained as values, that of
    /// a primitive value is taken as content octets.
    pub fn into_element(mut self) -> Result<Element, DecodeError> {
        let content = if self.is_constructed() {
            TaggedContent::Constructed(self.drain()?)
        }
        else {
            TaggedContent::Primitive(self.take_content()?)
        };
        Ok(Element::Tagged(TaggedElement::new(self.ident, content)))
    }
}


//------------ OctetStringParser ---------------------------------------------

/// The content of a constructed OCTET STRING.
///
/// The content is a sequence of octet strings which may themselves be
/// constructed. Their content octets concatenated form the value of the
/// octet string.
#[derive(Debug)]
pub struct OctetStringParser<'a> {
    parser: StreamParser<ContentSource<'a>>,
}

impl<'a> OctetStringParser<'a> {
    pub(crate) fn new(parser: StreamParser<ContentSource<'a>>) -> Self {
        OctetStringParser { parser }
    }

    /// Returns whether the content has indefinite length.
    pub fn is_indefinite(&self) -> bool {
        self.parser.source().is_indefinite()
    }

    /// Returns how many containers the content is nested in.
    pub fn depth(&self) -> usize {
        self.parser.depth()
    }

    /// Takes the next segment.
    ///
    /// The segment isn’t checked to actually be an octet string.
    pub fn pull(&mut self) -> Result<Option<Object<'_>>, DecodeError> {
        self.parser.next()
    }

    /// Takes all remaining segments.
    pub fn drain(&mut self) -> Result<Vec<Element>, DecodeError> {
        drain(&mut self.parser)
    }

    /// Takes all remaining segments and concatenates their octets.
    ///
    /// Fails with [`ErrorKind::MalformedContent`] if any of the segments is
    /// not an octet string.
    pub fn take_all(&mut self) -> Result<Bytes, DecodeError> {
        let mut res = Vec::new();
        self.append_to(&mut res)?;
        Ok(res.into())
    }

    fn append_to(&mut self, target: &mut Vec<u8>) -> Result<(), DecodeError> {
        loop {
            let pos = self.parser.pos();
            let segment = match self.parser.next()? {
                Some(segment) => segment,
                None => return Ok(())
            };
            match segment {
                Object::Primitive(Primitive::OctetString(segment)) => {
                    target.extend_from_slice(segment.as_slice())
                }
                Object::Container(Container::OctetString(mut segment)) => {
                    segment.append_to(target)?
                }
                _ => {
                    return xerr!(Err(DecodeError::new(
                        ErrorKind::MalformedContent(
                            "octet string segment is not an octet string"
                        ),
                        pos
                    )))
                }
            }
        }
    }
}


//------------ drain ---------------------------------------------------------

/// Pulls all remaining objects from a parser and materializes them.
///
/// Nested containers are drained as well.
pub fn drain<S: Source>(
    parser: &mut StreamParser<S>
) -> Result<Vec<Element>, DecodeError> {
    let mut res = Vec::new();
    while let Some(object) = parser.next()? {
        res.push(object.into_element()?);
    }
    log::trace!(
        target: "berstream",
        "drained {} elements, end at {}", res.len(), parser.pos()
    );
    Ok(res)
}


//============ Tests =========================================================
