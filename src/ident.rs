//! The identifier octets of a BER encoded value.
//!
//! This is a private module. The relevant items are re-exported by the
//! parent.

use std::fmt;
use smallvec::SmallVec;
use crate::decode::{DecodeError, ErrorKind, Source};


//------------ Tag -----------------------------------------------------------

/// The tag of a value.
///
/// In ASN.1, tags are used to identify the type of a value. Tags consist of
/// one of four classes, represented by the [`Class`] enum, and a number
/// within this class. The number is an unsigned integer.
///
/// In BER encoding, the tag becomes part of the identifier octets by
/// combining it with a bit indicating whether a value is primitive or
/// constructed. That combination is represented by [`Ident`].
///
/// # Limitations
///
/// We only support tag numbers that fit into a `u32`. This should be more
/// than enough in practice.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Tag {
    class: Class,
    number: u32,
}

impl Tag {
    /// Creates a tag from a class and number.
    pub const fn new(class: Class, number: u32) -> Self {
        Self { class, number }
    }

    /// Creates a new tag in class “context dependent” with the given number.
    pub const fn ctx(number: u32) -> Self {
        Self::new(Class::Context, number)
    }

    /// Returns the class of the tag.
    pub const fn class(self) -> Class {
        self.class
    }

    /// Returns the number of the tag.
    pub const fn number(self) -> u32 {
        self.number
    }
}

/// # Constants for universal tags.
///
/// See clause 8.4 of ITU Recommendation X.690.
///
impl Tag {
    /// The tag marking the end-of-contents, UNIVERSAL 0.
    pub const END_OF_CONTENTS: Self = Self::new(Class::Universal, 0);

    /// The tag for the BOOLEAN type, UNIVERSAL 1.
    pub const BOOLEAN: Self = Self::new(Class::Universal, 1);

    /// The tag for the INTEGER type, UNIVERSAL 2.
    pub const INTEGER: Self = Self::new(Class::Universal, 2);

    /// The tag for the BIT STRING type, UNIVERSAL 3.
    pub const BIT_STRING: Self = Self::new(Class::Universal, 3);

    /// The tag for the OCTET STRING type, UNIVERSAL 4.
    pub const OCTET_STRING: Self = Self::new(Class::Universal, 4);

    /// The tag for the NULL type, UNIVERSAL 5.
    pub const NULL: Self = Self::new(Class::Universal, 5);

    /// The tag for the OBJECT IDENTIFIER type, UNIVERSAL 6.
    pub const OID: Self = Self::new(Class::Universal, 6);

    /// The tag for the ENUMERATED type, UNIVERSAL 10.
    pub const ENUMERATED: Self = Self::new(Class::Universal, 10);

    /// The tag for the UTF8String type, UNIVERSAL 12
    pub const UTF8_STRING: Self = Self::new(Class::Universal, 12);

    /// The tag for the SEQUENCE and SEQUENCE OF types, UNIVERSAL 16.
    pub const SEQUENCE: Self = Self::new(Class::Universal, 16);

    /// The tag for the SET and SET OF types, UNIVERSAL 17.
    pub const SET: Self = Self::new(Class::Universal, 17);

    /// The tag for the NumericString type, UNIVERSAL 18.
    pub const NUMERIC_STRING: Self = Self::new(Class::Universal, 18);

    /// The tag for the PrintableString type, UNIVERSAL 19.
    pub const PRINTABLE_STRING: Self = Self::new(Class::Universal, 19);

    /// The tag for the TeletexString (T61String) type, UNIVERSAL 20.
    pub const TELETEX_STRING: Self = Self::new(Class::Universal, 20);

    /// The tag for the IA5String type, UNIVERSAL 22.
    pub const IA5_STRING: Self = Self::new(Class::Universal, 22);

    /// The tag for the UTCTime type, UNIVERSAL 23.
    pub const UTC_TIME: Self = Self::new(Class::Universal, 23);

    /// The tag for the GeneralizedType type, UNIVERSAL 24.
    pub const GENERALIZED_TIME: Self = Self::new(Class::Universal, 24);

    /// The tag for the VisibleString type, UNIVERSAL 26.
    pub const VISIBLE_STRING: Self = Self::new(Class::Universal, 26);

    /// The tag for the GeneralString type, UNIVERSAL 27.
    pub const GENERAL_STRING: Self = Self::new(Class::Universal, 27);

    /// The tag for the UniversalString type, UNIVERSAL 28.
    pub const UNIVERSAL_STRING: Self = Self::new(Class::Universal, 28);

    /// The tag for the BMPString type, UNIVERSAL 30.
    pub const BMP_STRING: Self = Self::new(Class::Universal, 30);
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Tag::END_OF_CONTENTS => write!(f, "end-of-contents"),
            Tag::BOOLEAN => write!(f, "BOOLEAN"),
            Tag::INTEGER => write!(f, "INTEGER"),
            Tag::BIT_STRING => write!(f, "BIT STRING"),
            Tag::OCTET_STRING => write!(f, "OCTET STRING"),
            Tag::NULL => write!(f, "NULL"),
            Tag::OID => write!(f, "OBJECT IDENTIFIER"),
            Tag::ENUMERATED => write!(f, "ENUMERATED"),
            Tag::UTF8_STRING => write!(f, "UTF8String"),
            Tag::SEQUENCE => write!(f, "SEQUENCE"),
            Tag::SET => write!(f, "SET"),
            Tag::NUMERIC_STRING => write!(f, "NumericString"),
            Tag::PRINTABLE_STRING => write!(f, "PrintableString"),
            Tag::TELETEX_STRING => write!(f, "TeletexString"),
            Tag::IA5_STRING => write!(f, "IA5String"),
            Tag::UTC_TIME => write!(f, "UTCTime"),
            Tag::GENERALIZED_TIME => write!(f, "GeneralizedTime"),
            Tag::VISIBLE_STRING => write!(f, "VisibleString"),
            Tag::GENERAL_STRING => write!(f, "GeneralString"),
            Tag::UNIVERSAL_STRING => write!(f, "UniversalString"),
            Tag::BMP_STRING => write!(f, "BMPString"),
            tag => {
                match tag.class() {
                    Class::Universal => write!(f, "[UNIVERSAL ")?,
                    Class::Application => write!(f, "[APPLICATION ")?,
                    Class::Context => write!(f, "[")?,
                    Class::Private => write!(f, "[PRIVATE ")?,
                }
                write!(f, "{}]", tag.number())
            }
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({})", self)
    }
}


//------------ Ident ---------------------------------------------------------

/// The identifier octets of a value.
///
/// This is the tag plus the flag whether the value is constructed. The
/// identifier octets are kept exactly as read, so values of unknown type
/// can hand them back unaltered.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Ident {
    /// The tag encoded in the octets.
    tag: Tag,

    /// Whether the constructed bit is set.
    constructed: bool,

    /// The octets as read.
    octets: SmallVec<[u8; 6]>,
}

impl Ident {
    /// The largest number of octets for a tag number fitting a `u32`.
    const MAX_NUMBER_OCTETS: usize = 5;

    /// Reads the identifier octets from a source.
    ///
    /// Returns `Ok(None)` if the source is at its end before the first
    /// octet. This is not an error: it is how a sequence of values ends.
    pub fn take_opt_from<S: Source + ?Sized>(
        source: &mut S
    ) -> Result<Option<Self>, DecodeError> {
        match source.take_opt_u8()? {
            Some(first) => Self::take_from(first, source).map(Some),
            None => Ok(None)
        }
    }

    /// Resolves the identifier octets given their first octet.
    ///
    /// If the first octet announces a long-form tag number, the remaining
    /// octets of the number are taken from `source`. Running out of data
    /// before the last of them is a [`ErrorKind::Truncated`] error.
    pub fn take_from<S: Source + ?Sized>(
        first: u8, source: &mut S
    ) -> Result<Self, DecodeError> {
        let mut octets = SmallVec::new();
        octets.push(first);
        let class = Class::from_u8(first);
        let constructed = first & 0x20 != 0;

        // If we have a single octet tag, we can already return.
        if (first & 0x1f) < 0x1f {
            return Ok(Self {
                tag: Tag::new(class, u32::from(first & 0x1f)),
                constructed, octets
            })
        }

        let mut number = 0u32;
        loop {
            if octets.len() > Self::MAX_NUMBER_OCTETS {
                return xerr!(Err(source.err(ErrorKind::MalformedTag)))
            }
            let octet = source.take_u8()?;
            octets.push(octet);
            number = match number.checked_mul(0x80) {
                Some(number) => number | u32::from(octet & 0x7f),
                None => {
                    return xerr!(Err(source.err(ErrorKind::MalformedTag)))
                }
            };
            if octet & 0x80 == 0 {
                break
            }
        }
        Ok(Self { tag: Tag::new(class, number), constructed, octets })
    }

    /// Returns the tag.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Returns the class of the tag.
    pub fn class(&self) -> Class {
        self.tag.class()
    }

    /// Returns the tag number.
    pub fn number(&self) -> u32 {
        self.tag.number()
    }

    /// Returns whether the value is a constructed value.
    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    /// Returns the first identifier octet.
    pub fn first(&self) -> u8 {
        self.octets[0]
    }

    /// Returns the identifier octets as read.
    pub fn as_slice(&self) -> &[u8] {
        self.octets.as_slice()
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.constructed {
            write!(f, "{} (constructed)", self.tag)
        }
        else {
            self.tag.fmt(f)
        }
    }
}

impl fmt::Debug for Ident {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Ident({} - {:?})", self, self.as_slice())
    }
}


//------------ Class ---------------------------------------------------------

/// The class of a tag.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Class {
    Universal,
    Application,
    Context,
    Private,
}

impl Class {
    /// Determines the class from the first identifier octet.
    const fn from_u8(octet: u8) -> Self {
        match octet {
            0x00..=0x3F => Self::Universal,
            0x40..=0x7F => Self::Application,
            0x80..=0xBF => Self::Context,
            0xC0..=0xFF => Self::Private
        }
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use crate::decode::ReaderSource;
    use super::*;

    fn take(data: &[u8]) -> Result<Option<Ident>, DecodeError> {
        Ident::take_opt_from(&mut ReaderSource::new(data))
    }

    #[test]
    fn short_form() {
        for octet in 0..=255u8 {
            if octet & 0x1f == 0x1f {
                continue
            }
            let ident = take(&[octet]).unwrap().unwrap();
            assert_eq!(ident.number(), u32::from(octet & 0x1f));
            assert_eq!(ident.is_constructed(), octet & 0x20 != 0);
            assert_eq!(ident.as_slice(), &[octet]);
        }

        let ident = take(b"\x30").unwrap().unwrap();
        assert_eq!(ident.tag(), Tag::SEQUENCE);
        assert!(ident.is_constructed());
        assert_eq!(take(b"\x42").unwrap().unwrap().class(), Class::Application);
        assert_eq!(take(b"\xa3").unwrap().unwrap().tag(), Tag::ctx(3));
        assert_eq!(take(b"\xc1").unwrap().unwrap().class(), Class::Private);
    }

    #[test]
    fn long_form() {
        assert_eq!(take(b"\x9f\x1f").unwrap().unwrap().tag(), Tag::ctx(31));
        assert_eq!(take(b"\x9f\x81\x00").unwrap().unwrap().tag(), Tag::ctx(128));
        assert_eq!(
            take(b"\x5f\x83\xff\x7f").unwrap().unwrap().tag(),
            Tag::new(Class::Application, 0xffff)
        );
        assert_eq!(
            take(b"\xbf\x8f\xff\xff\xff\x7f").unwrap().unwrap().number(),
            u32::MAX
        );
        let ident = take(b"\x3f\x81\x00").unwrap().unwrap();
        assert_eq!(ident.tag(), Tag::new(Class::Universal, 128));
        assert_eq!(ident.as_slice(), b"\x3f\x81\x00");
    }

    #[test]
    fn long_form_errors() {
        assert!(take(b"\x9f").unwrap_err().is_truncated());
        assert!(take(b"\x9f\x81").unwrap_err().is_truncated());
        assert!(take(b"\x9f\x81\x80\x80").unwrap_err().is_truncated());
        assert!(matches!(
            take(b"\x9f\x9f\xff\xff\xff\x7f").unwrap_err().kind(),
            ErrorKind::MalformedTag
        ));
        assert!(matches!(
            take(b"\x9f\x80\x80\x80\x80\x80\x01").unwrap_err().kind(),
            ErrorKind::MalformedTag
        ));
    }

    #[test]
    fn end_of_data() {
        assert!(take(b"").unwrap().is_none());
    }

    #[test]
    fn display() {
        assert_eq!(Tag::SEQUENCE.to_string(), "SEQUENCE");
        assert_eq!(Tag::ctx(2).to_string(), "[2]");
        assert_eq!(
            Tag::new(Class::Application, 7).to_string(), "[APPLICATION 7]"
        );
        assert_eq!(
            Tag::new(Class::Universal, 9).to_string(), "[UNIVERSAL 9]"
        );
    }
}
