//! ASN.1 Object Identifiers.
//!
//! This module contains the [`Oid`] type that implements object identifiers,
//! a construct used by ANS.1 to uniquely identify all sorts of things. The
//! type is also re-exported at the top-level.

use std::{fmt, hash};
use bytes::Bytes;


//------------ Oid -----------------------------------------------------------

/// An object identifer.
///
/// Object identifiers are globally unique, hierarchical values that are used
/// to identify objects or their type. When written, they are presented as a
/// sequence of integers separated by dots such as ‘1.3.6.1.5.5.7.1’.
///
/// Values of this type keep a single object identifer in its BER encoding,
/// i.e., in some form of byte sequence. Because different representations
/// may be useful, the type is generic over something that can become a
/// reference to a bytes slice. Decoded values use `Bytes`.
///
/// The encoding is not checked when a value is created. Iterating over the
/// components of a malformed identifier simply stops early.
#[derive(Clone, Debug)]
pub struct Oid<T: AsRef<[u8]> = Bytes>(pub T);

impl Oid<Bytes> {
    /// Creates an object identifier from its content octets.
    pub fn from_content(content: Bytes) -> Self {
        Oid(content)
    }
}

/// # Access to Sub-identifiers
///
impl<T: AsRef<[u8]>> Oid<T> {
    /// Returns an iterator to the components of this object identifiers.
    ///
    /// The iterator stops at the first incomplete component.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.0.as_ref())
    }

    /// Returns the content octets.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }
}


//--- AsRef

impl<T: AsRef<[u8]>> AsRef<[u8]> for Oid<T> {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}


//--- PartialEq and Eq

impl<T: AsRef<[u8]>, U: AsRef<[u8]>> PartialEq<Oid<U>> for Oid<T> {
    fn eq(&self, other: &Oid<U>) -> bool {
        self.0.as_ref() == other.0.as_ref()
    }
}

impl<T: AsRef<[u8]>> Eq for Oid<T> { }


//--- Hash

impl<T: AsRef<[u8]>> hash::Hash for Oid<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.0.as_ref().hash(state)
    }
}


//--- Display

impl<T: AsRef<[u8]>> fmt::Display for Oid<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for component in self.iter() {
            if !first {
                f.write_str(".")?;
            }
            first = false;
            match component.to_u32() {
                Some(val) => write!(f, "{}", val)?,
                None => f.write_str("(too large)")?,
            }
        }
        Ok(())
    }
}


//------------ Component -----------------------------------------------------

/// A component of an object identifier.
///
/// Although these components are integers, they are encoded in a slightly
/// inconvenient way. Because of this we don’t convert them to native integers
/// but rather keep them as references to the underlying octets.
///
/// This type allows comparison and formatting, which hopefully is all you’ll
/// need. If you insist, the method `to_u32` allows you to try to convert a
/// component to a native integer.
#[derive(Clone, Copy, Debug)]
pub struct Component<'a> {
    /// The position of the component in the object identifer.
    position: Position,

    /// The octets of the subidentifer.
    ///
    /// The most significant bit of each octet indicates whether there are
    /// more octets to follow, the lower seven bits make up an unsigned
    /// integer in big endian notation.
    slice: &'a [u8],
}

/// The position of the component in the object identifier.
///
/// As the first two components of the object identifer are encoded in the
/// first subidentifier of the encoded value, we have three different cases.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
enum Position {
    /// This is the first component of the identifier.
    ///
    /// This is 0 if the integer value of the subidentifer is 0..39,
    /// 1 for 40..79, and 2 for anything else.
    First,

    /// This is the second component of the identifier.
    ///
    /// This is the integer value of the subidentifer module 40 if the value
    /// is below 80 and otherwise the value minus 80.
    Second,

    /// This is any later component of the identifier.
    Other,
}

impl<'a> Component<'a> {
    /// Creates a new component.
    fn new(slice: &'a [u8], position: Position) -> Self {
        Component { position, slice }
    }

    /// Attempts to convert the component to `u32`.
    ///
    /// Since the component’s value can be larger than the maximum value of
    /// a `u32`, this may fail in which case the method will return `None`.
    pub fn to_u32(self) -> Option<u32> {
        let mut res = 0u32;
        for &ch in self.slice {
            res = res.checked_mul(0x80)? | u32::from(ch & 0x7F);
        }
        match self.position {
            Position::First => {
                if res < 40 {
                    Some(0)
                }
                else if res < 80 {
                    Some(1)
                }
                else {
                    Some(2)
                }
            }
            Position::Second => {
                if res < 80 {
                    Some(res % 40)
                }
                else {
                    Some(res - 80)
                }
            }
            Position::Other => Some(res)
        }
    }
}


//--- PartialEq and Eq

impl<'a> PartialEq for Component<'a> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.slice == other.slice
    }
}

impl<'a> Eq for Component<'a> { }


//------------ Iter ----------------------------------------------------------

/// An iterator over the sub-identifiers in an object identifier.
///
/// The first subidentifier produces two components.
pub struct Iter<'a> {
    /// The remainder of the object identifier’s encoded octets.
    slice: &'a [u8],

    /// The first subidentifier when its second component is still due.
    pending: Option<&'a [u8]>,

    /// The position of the next component.
    position: Position,
}

impl<'a> Iter<'a> {
    /// Creates a new iterator.
    fn new(slice: &'a [u8]) -> Self {
        Iter {
            slice,
            pending: None,
            position: Position::First
        }
    }

    /// Takes the next complete subidentifier off the slice.
    fn take_subidentifier(&mut self) -> Option<&'a [u8]> {
        let end = self.slice.iter().position(|octet| octet & 0x80 == 0)?;
        let (res, tail) = self.slice.split_at(end + 1);
        self.slice = tail;
        Some(res)
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Component<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.position {
            Position::First => {
                let res = self.take_subidentifier()?;
                self.pending = Some(res);
                self.position = Position::Second;
                Some(Component::new(res, Position::First))
            }
            Position::Second => {
                let res = self.pending.take()?;
                self.position = Position::Other;
                Some(Component::new(res, Position::Second))
            }
            Position::Other => {
                self.take_subidentifier().map(|res| {
                    Component::new(res, Position::Other)
                })
            }
        }
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    fn components(slice: &'static [u8]) -> Vec<Option<u32>> {
        Oid(slice).iter().map(Component::to_u32).collect()
    }

    #[test]
    fn iter() {
        assert_eq!(
            components(b"\x2b\x06\x01\x05\x05\x07\x01"),
            [1, 3, 6, 1, 5, 5, 7, 1].iter().map(|&x| Some(x)).collect::<Vec<_>>()
        );
        assert_eq!(components(b"\x00"), [Some(0), Some(0)]);
        assert_eq!(components(b"\x81\x00\x01"), [Some(2), Some(48), Some(1)]);
        assert!(components(b"").is_empty());
    }

    #[test]
    fn iter_malformed() {
        assert!(components(b"\x81").is_empty());
        assert_eq!(components(b"\x2b\x86"), [Some(1), Some(3)]);
        assert_eq!(
            components(b"\x2b\x9f\xff\xff\xff\x7f"), [Some(1), Some(3), None]
        );
    }

    #[test]
    fn display() {
        assert_eq!(
            Oid::from_content(Bytes::from_static(
                b"\x2a\x86\x48\x86\xf7\x0d\x01\x01\x0b"
            )).to_string(),
            "1.2.840.113549.1.1.11"
        );
    }

    #[test]
    fn eq() {
        assert_eq!(
            Oid::from_content(Bytes::from_static(b"\x2b\x06")),
            Oid(b"\x2b\x06".as_ref())
        );
    }
}
