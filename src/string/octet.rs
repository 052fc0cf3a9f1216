//! A BER-encoded OCTET STRING.
//!
//! This is an internal module. It’s public types are re-exported by the
//! parent.

use std::fmt;
use bytes::{Buf, Bytes};
use bytes::buf::Reader;


//------------ OctetString ---------------------------------------------------

/// An octet string value.
///
/// An octet string is a sequence of octets, i.e., a glorified `[u8]`. Basic
/// Encoding Rules allow this sequence to be broken up into chunks that are
/// encoded separatedly. A value of this type always holds the complete,
/// reassembled sequence.
///
/// Octet strings are sometimes used to store BER encoded data. The
/// [`reader`][Self::reader] method provides an `io::Read` implementation
/// that can be handed to a new
/// [`StreamParser`][crate::decode::StreamParser] to decode it.
///
/// # BER Encoding
///
/// Octet strings are either encoded as a primitive or a constructed value.
/// In the primitive form, the content octets are the string’s octets. In a
/// constructed form, the content is a sequence of encoded octets strings
/// which in turn may be primitive or constructed. In this case, the string’s
/// octets are the concatenation of all the content octets of the primitive
/// forms in the order as encountered.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct OctetString(Bytes);

impl OctetString {
    /// Creates an octet string from a Bytes value.
    pub fn new(bytes: Bytes) -> Self {
        OctetString(bytes)
    }

    /// Returns the octets as a slice.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns the number of octets.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the octet string is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts the octet string into its octets.
    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    /// Returns a reader over the octets.
    ///
    /// The octet string is not consumed, reading happens on a cheap clone.
    pub fn reader(&self) -> Reader<Bytes> {
        self.0.clone().reader()
    }
}

impl AsRef<[u8]> for OctetString {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl From<Bytes> for OctetString {
    fn from(bytes: Bytes) -> Self {
        Self::new(bytes)
    }
}

impl fmt::Debug for OctetString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("OctetString(")?;
        for octet in self.as_slice() {
            write!(f, "{:02x}", octet)?;
        }
        f.write_str(")")
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use std::io::Read;
    use super::*;

    #[test]
    fn reader() {
        let string = OctetString::new(Bytes::from_static(b"foobar"));
        let mut buf = Vec::new();
        string.reader().read_to_end(&mut buf).unwrap();
        assert_eq!(buf, b"foobar");

        // Reading again starts from the beginning.
        let mut buf = [0u8; 3];
        string.reader().read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"foo");
        assert_eq!(string.len(), 6);
    }

    #[test]
    fn debug() {
        assert_eq!(
            format!("{:?}", OctetString::new(Bytes::from_static(b"\x01\xab"))),
            "OctetString(01ab)"
        );
    }
}
