//! Decoded objects.
//!
//! This is a private module. Its public items are re-exported by the parent.

use bytes::Bytes;
use crate::boolean::Boolean;
use crate::ident::{Class, Ident, Tag};
use crate::int::{Enumerated, Integer};
use crate::oid::Oid;
use crate::string::{
    BitString, BmpString, GeneralString, Ia5String, NumericString,
    OctetString, PrintableString, TeletexString, UniversalString, Utf8String,
    VisibleString,
};
use crate::time::{GeneralizedTime, UtcTime};
use super::container::{
    Container, OctetStringParser, SequenceParser, SetParser, TaggedParser,
};
use super::error::{DecodeError, ErrorKind};
use super::parser::{Depth, StreamParser};
use super::source::{
    ContentSource, DefiniteSource, IndefiniteSource, Source
};


//------------ Object --------------------------------------------------------

/// A single object produced by a stream parser.
///
/// Depending on the identifier octets, the object is one of three things.
/// Values of application and private class are returned as opaque values
/// with their content octets. Constructed values of universal class and all
/// values of context specific class are returned as lazy containers that
/// still need to be pulled. Everything else is decoded right away.
///
/// A container borrows the parser it was produced by. The parser can only
/// be advanced once the container is dropped. If the container wasn’t
/// pulled to its end by then, the parser continues in the middle of the
/// container’s content.
#[derive(Debug)]
pub enum Object<'a> {
    /// A value of application or private class.
    Opaque(ClassSpecific),

    /// A primitive value of universal class.
    Primitive(Primitive),

    /// A lazy container.
    Container(Container<'a>),
}

impl<'a> Object<'a> {
    /// Converts the object into its materialized form.
    ///
    /// Containers are drained, so this reads all the remaining content of
    /// a container including all its nested containers.
    pub fn into_element(self) -> Result<Element, DecodeError> {
        match self {
            Object::Opaque(value) => Ok(Element::Opaque(value)),
            Object::Primitive(value) => Ok(Element::Primitive(value)),
            Object::Container(container) => container.into_element(),
        }
    }

    /// Returns the primitive value if the object is one.
    pub fn into_primitive(self) -> Option<Primitive> {
        match self {
            Object::Primitive(value) => Some(value),
            _ => None
        }
    }

    /// Returns the container if the object is one.
    pub fn into_container(self) -> Option<Container<'a>> {
        match self {
            Object::Container(container) => Some(container),
            _ => None
        }
    }
}


//------------ ClassSpecific -------------------------------------------------

/// An opaque value of application or private class.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClassSpecific {
    ident: Ident,
    content: Bytes,
}

impl ClassSpecific {
    /// Creates a value from its identifier and content octets.
    pub fn new(ident: Ident, content: Bytes) -> Self {
        ClassSpecific { ident, content }
    }

    /// Returns the identifier of the value.
    pub fn ident(&self) -> &Ident {
        &self.ident
    }

    /// Returns the class of the value.
    pub fn class(&self) -> Class {
        self.ident.class()
    }

    /// Returns the tag number of the value.
    pub fn number(&self) -> u32 {
        self.ident.number()
    }

    /// Returns whether the value is marked as constructed.
    pub fn is_constructed(&self) -> bool {
        self.ident.is_constructed()
    }

    /// Returns the content octets.
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Converts the value into its content octets.
    pub fn into_content(self) -> Bytes {
        self.content
    }
}


//------------ UnknownTag ----------------------------------------------------

/// A value of universal class with a tag this crate doesn’t know.
///
/// The identifier octets are kept as read, so the value can be
/// reproduced exactly.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownTag {
    ident: Ident,
    content: Bytes,
}

impl UnknownTag {
    /// Creates a value from its identifier and content octets.
    pub fn new(ident: Ident, content: Bytes) -> Self {
        UnknownTag { ident, content }
    }

    /// Returns the identifier octets as read.
    pub fn ident(&self) -> &Ident {
        &self.ident
    }

    /// Returns the content octets.
    pub fn content(&self) -> &Bytes {
        &self.content
    }
}


//------------ Primitive -----------------------------------------------------

/// A decoded primitive value of universal class.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Primitive {
    Boolean(Boolean),
    Integer(Integer),
    Enumerated(Enumerated),
    BitString(BitString),
    OctetString(OctetString),
    Null,
    Oid(Oid),
    Utf8String(Utf8String),
    NumericString(NumericString),
    PrintableString(PrintableString),
    TeletexString(TeletexString),
    Ia5String(Ia5String),
    VisibleString(VisibleString),
    GeneralString(GeneralString),
    UniversalString(UniversalString),
    BmpString(BmpString),
    UtcTime(UtcTime),
    GeneralizedTime(GeneralizedTime),

    /// A value with a tag not listed above.
    Unknown(UnknownTag),
}

impl Primitive {
    /// Creates a primitive value from its identifier and content octets.
    ///
    /// Only a bit string and NULL have requirements on their content.
    /// Everything else is accepted as is.
    pub fn from_content(
        ident: Ident, content: Bytes
    ) -> Result<Self, ErrorKind> {
        Ok(match ident.tag() {
            Tag::BOOLEAN => Primitive::Boolean(Boolean::from_content(content)),
            Tag::INTEGER => Primitive::Integer(Integer::from_content(content)),
            Tag::ENUMERATED => {
                Primitive::Enumerated(Enumerated::from_content(content))
            }
            Tag::BIT_STRING => {
                Primitive::BitString(BitString::from_content(content)?)
            }
            Tag::OCTET_STRING => {
                Primitive::OctetString(OctetString::new(content))
            }
            Tag::NULL => {
                if !content.is_empty() {
                    return xerr!(Err(
                        ErrorKind::MalformedContent("NULL with content")
                    ))
                }
                Primitive::Null
            }
            Tag::OID => Primitive::Oid(Oid::from_content(content)),
            Tag::UTF8_STRING => {
                Primitive::Utf8String(Utf8String::from_content(content))
            }
            Tag::NUMERIC_STRING => {
                Primitive::NumericString(NumericString::from_content(content))
            }
            Tag::PRINTABLE_STRING => {
                Primitive::PrintableString(
                    PrintableString::from_content(content)
                )
            }
            Tag::TELETEX_STRING => {
                Primitive::TeletexString(TeletexString::from_content(content))
            }
            Tag::IA5_STRING => {
                Primitive::Ia5String(Ia5String::from_content(content))
            }
            Tag::VISIBLE_STRING => {
                Primitive::VisibleString(VisibleString::from_content(content))
            }
            Tag::GENERAL_STRING => {
                Primitive::GeneralString(GeneralString::from_content(content))
            }
            Tag::UNIVERSAL_STRING => {
                Primitive::UniversalString(
                    UniversalString::from_content(content)
                )
            }
            Tag::BMP_STRING => {
                Primitive::BmpString(BmpString::from_content(content))
            }
            Tag::UTC_TIME => Primitive::UtcTime(UtcTime::from_content(content)),
            Tag::GENERALIZED_TIME => {
                Primitive::GeneralizedTime(
                    GeneralizedTime::from_content(content)
                )
            }
            _ => {
                log::debug!(
                    target: "berstream",
                    "unknown universal tag {}, keeping {} content octets",
                    ident, content.len()
                );
                Primitive::Unknown(UnknownTag::new(ident, content))
            }
        })
    }

    /// Returns the tag of the value.
    pub fn tag(&self) -> Tag {
        match self {
            Primitive::Boolean(_) => Tag::BOOLEAN,
            Primitive::Integer(_) => Tag::INTEGER,
            Primitive::Enumerated(_) => Tag::ENUMERATED,
            Primitive::BitString(_) => Tag::BIT_STRING,
            Primitive::OctetString(_) => Tag::OCTET_STRING,
            Primitive::Null => Tag::NULL,
            Primitive::Oid(_) => Tag::OID,
            Primitive::Utf8String(_) => Tag::UTF8_STRING,
            Primitive::NumericString(_) => Tag::NUMERIC_STRING,
            Primitive::PrintableString(_) => Tag::PRINTABLE_STRING,
            Primitive::TeletexString(_) => Tag::TELETEX_STRING,
            Primitive::Ia5String(_) => Tag::IA5_STRING,
            Primitive::VisibleString(_) => Tag::VISIBLE_STRING,
            Primitive::GeneralString(_) => Tag::GENERAL_STRING,
            Primitive::UniversalString(_) => Tag::UNIVERSAL_STRING,
            Primitive::BmpString(_) => Tag::BMP_STRING,
            Primitive::UtcTime(_) => Tag::UTC_TIME,
            Primitive::GeneralizedTime(_) => Tag::GENERALIZED_TIME,
            Primitive::Unknown(value) => value.ident().tag(),
        }
    }
}


//------------ Element -------------------------------------------------------

/// The materialized form of an object.
///
/// This is what draining a parser produces. Other than an [`Object`], an
/// element doesn’t refer to the parser anymore.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Element {
    /// A value of application or private class.
    Opaque(ClassSpecific),

    /// A primitive value.
    ///
    /// A constructed OCTET STRING appears here with its segments
    /// concatenated.
    Primitive(Primitive),

    /// A SEQUENCE with its elements.
    Sequence(Vec<Element>),

    /// A SET with its elements.
    Set(Vec<Element>),

    /// A value of context specific class.
    Tagged(TaggedElement),
}


//------------ TaggedElement -------------------------------------------------

/// The materialized form of a tagged object.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TaggedElement {
    ident: Ident,
    content: TaggedContent,
}

/// The content of a tagged element.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TaggedContent {
    /// The content octets of a primitive value.
    ///
    /// This is an implicitly tagged primitive value. Its actual type is
    /// only known to the caller.
    Primitive(Bytes),

    /// The elements of a constructed value.
    Constructed(Vec<Element>),
}

impl TaggedElement {
    /// Creates an element from the identifier and the content.
    pub fn new(ident: Ident, content: TaggedContent) -> Self {
        TaggedElement { ident, content }
    }

    /// Returns the class of the element.
    pub fn class(&self) -> Class {
        self.ident.class()
    }

    /// Returns the tag number of the element.
    pub fn number(&self) -> u32 {
        self.ident.number()
    }

    /// Returns the content.
    pub fn content(&self) -> &TaggedContent {
        &self.content
    }

    /// Converts the element into its content.
    pub fn into_content(self) -> TaggedContent {
        self.content
    }
}


//------------ Dispatch ------------------------------------------------------

/// Decides what to make of a value with definite length.
pub(crate) fn dispatch_definite(
    ident: Ident, mut content: DefiniteSource<'_>, depth: Depth
) -> Result<Object<'_>, DecodeError> {
    match ident.class() {
        Class::Application | Class::Private => {
            let content = content.take_all()?;
            return Ok(Object::Opaque(ClassSpecific::new(ident, content)))
        }
        Class::Context => {
            let parser = nested_definite(content, depth)?;
            return Ok(Object::Container(
                Container::Tagged(TaggedParser::new(ident, parser))
            ))
        }
        Class::Universal => { }
    }
    match ident.tag() {
        Tag::SEQUENCE => {
            Ok(Object::Container(Container::Sequence(
                SequenceParser::new(nested_definite(content, depth)?)
            )))
        }
        Tag::SET => {
            Ok(Object::Container(Container::Set(
                SetParser::new(nested_definite(content, depth)?)
            )))
        }
        Tag::OCTET_STRING if ident.is_constructed() => {
            Ok(Object::Container(Container::OctetString(
                OctetStringParser::new(nested_definite(content, depth)?)
            )))
        }
        _ => {
            let octets = content.take_all()?;
            match Primitive::from_content(ident, octets) {
                Ok(value) => Ok(Object::Primitive(value)),
                Err(kind) => Err(content.err(kind)),
            }
        }
    }
}

/// Decides what to make of a value with indefinite length.
///
/// Nested parsers inherit `limit` from the parser the value was found in.
pub(crate) fn dispatch_indefinite(
    ident: Ident,
    mut content: IndefiniteSource<'_>,
    limit: usize,
    depth: Depth,
) -> Result<Object<'_>, DecodeError> {
    match ident.class() {
        Class::Context | Class::Private => {
            let parser = nested_indefinite(content, limit, depth)?;
            return Ok(Object::Container(
                Container::Tagged(TaggedParser::new(ident, parser))
            ))
        }
        Class::Application => {
            return xerr!(Err(
                content.err(ErrorKind::UnsupportedIndefiniteForm)
            ))
        }
        Class::Universal => { }
    }
    match ident.tag() {
        Tag::NULL => {
            content.skip_to_end()?;
            log::warn!(
                target: "berstream",
                "NULL with indefinite length before {}", content.pos()
            );
            Ok(Object::Primitive(Primitive::Null))
        }
        Tag::OCTET_STRING => {
            Ok(Object::Container(Container::OctetString(
                OctetStringParser::new(
                    nested_indefinite(content, limit, depth)?
                )
            )))
        }
        Tag::SEQUENCE => {
            Ok(Object::Container(Container::Sequence(
                SequenceParser::new(
                    nested_indefinite(content, limit, depth)?
                )
            )))
        }
        Tag::SET => {
            Ok(Object::Container(Container::Set(
                SetParser::new(
                    nested_indefinite(content, limit, depth)?
                )
            )))
        }
        _ => {
            xerr!(Err(content.err(ErrorKind::UnsupportedIndefiniteForm)))
        }
    }
}

/// Creates the parser for the content of a definite length value.
///
/// The length of the content is the limit for everything inside it.
fn nested_definite(
    content: DefiniteSource<'_>, depth: Depth
) -> Result<StreamParser<ContentSource<'_>>, DecodeError> {
    let depth = depth.enter(&content)?;
    let limit = content.remaining();
    Ok(StreamParser::nested(ContentSource::Definite(content), limit, depth))
}

fn nested_indefinite(
    content: IndefiniteSource<'_>, limit: usize, depth: Depth
) -> Result<StreamParser<ContentSource<'_>>, DecodeError> {
    let depth = depth.enter(&content)?;
    Ok(StreamParser::nested(
        ContentSource::Indefinite(content), limit, depth
    ))
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use crate::decode::ReaderSource;
    use super::*;

    fn ident(octets: &[u8]) -> Ident {
        Ident::take_opt_from(&mut ReaderSource::new(octets)).unwrap().unwrap()
    }

    #[test]
    fn primitive_kinds() {
        let cases: &[(&[u8], Tag)] = &[
            (b"\x01", Tag::BOOLEAN),
            (b"\x02", Tag::INTEGER),
            (b"\x0a", Tag::ENUMERATED),
            (b"\x04", Tag::OCTET_STRING),
            (b"\x06", Tag::OID),
            (b"\x0c", Tag::UTF8_STRING),
            (b"\x12", Tag::NUMERIC_STRING),
            (b"\x13", Tag::PRINTABLE_STRING),
            (b"\x14", Tag::TELETEX_STRING),
            (b"\x16", Tag::IA5_STRING),
            (b"\x17", Tag::UTC_TIME),
            (b"\x18", Tag::GENERALIZED_TIME),
            (b"\x1a", Tag::VISIBLE_STRING),
            (b"\x1b", Tag::GENERAL_STRING),
            (b"\x1c", Tag::UNIVERSAL_STRING),
            (b"\x1e", Tag::BMP_STRING),
        ];
        for (octets, tag) in cases {
            let value = Primitive::from_content(
                ident(octets), Bytes::from_static(b"\x31")
            ).unwrap();
            assert_eq!(value.tag(), *tag);
            assert!(!matches!(value, Primitive::Unknown(_)));
        }
    }

    #[test]
    fn null() {
        assert_eq!(
            Primitive::from_content(ident(b"\x05"), Bytes::new()).unwrap(),
            Primitive::Null
        );
        assert!(matches!(
            Primitive::from_content(ident(b"\x05"), Bytes::from_static(b"\0")),
            Err(ErrorKind::MalformedContent(_))
        ));
    }

    #[test]
    fn unknown() {
        let value = Primitive::from_content(
            ident(b"\x1f\x81\x00"), Bytes::from_static(b"\x01")
        ).unwrap();
        match value {
            Primitive::Unknown(unknown) => {
                assert_eq!(unknown.ident().as_slice(), b"\x1f\x81\x00");
                assert_eq!(unknown.content().as_ref(), b"\x01");
            }
            _ => panic!("expected unknown value")
        }
        assert_eq!(
            Primitive::from_content(ident(b"\x07"), Bytes::new())
                .unwrap().tag(),
            Tag::new(Class::Universal, 7)
        );
    }
}
