//! BER-encoded bit strings.
//!
//! This is a private module. Its public items are re-exported by the parent.

use bytes::Bytes;
use crate::decode::ErrorKind;


//------------ BitString -----------------------------------------------------

/// A bit string value.
///
/// Bit strings are a sequence of bits. Unlike
/// [`OctetString`][crate::string::OctetString]s, they do not need to contain
/// a multiple of eight bits.
///
/// There are two types of methods for accessing the data in a bit string.
/// Methods starting with `bit` operate on the individual bits while those
/// prefixed with `octet` access entire octets and ignore the fact that there
/// may be unused bits in the final octet.
///
/// # BER Encoding
///
/// When encoded in BER as a primitive value, the first octet of the
/// content contains the number of unused bits in the last octet and the
/// following octets contain the bits with the first bit in the most
/// significant bit of the octet.
///
/// The constructed encoding is not supported.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct BitString {
    /// The number of unused bits in the last byte.
    unused: u8,

    /// The bytes of the bit string.
    bits: Bytes,
}

impl BitString {
    /// Creates a new bit string.
    ///
    /// Returns `None` if `unused` is larger than 7 or if it is not zero for
    /// an empty `bits`.
    pub fn new(unused: u8, bits: Bytes) -> Option<Self> {
        if unused > 7 || (unused > 0 && bits.is_empty()) {
            None
        }
        else {
            Some(Self { unused, bits })
        }
    }

    /// Parses the content octets of a bit string value.
    ///
    /// The first octet is the number of unused bits, the remaining octets
    /// are the bits.
    pub fn from_content(mut content: Bytes) -> Result<Self, ErrorKind> {
        if content.is_empty() {
            return xerr!(Err(
                ErrorKind::MalformedContent("empty bit string")
            ))
        }
        let bits = content.split_off(1);
        match Self::new(content[0], bits) {
            Some(res) => Ok(res),
            None => xerr!(Err(
                ErrorKind::MalformedContent("invalid unused bits in bit string")
            ))
        }
    }

    /// Returns the value of the given bit.
    ///
    /// Bits beyond the end of the bit string are false.
    pub fn bit(&self, bit: usize) -> bool {
        let idx = bit >> 3;
        if self.bits.len() <= idx {
            return false
        }
        let bit = 7 - (bit as u8 & 7);
        if self.bits.len() == idx + 1 && self.unused > bit {
            return false
        }
        self.bits[idx] & (1 << bit) != 0
    }

    /// Returns the number of bits in the bit string.
    pub fn bit_len(&self) -> usize {
        (self.bits.len() << 3) - usize::from(self.unused)
    }

    /// Returns the number of unused bits in the last octet.
    pub fn unused(&self) -> u8 {
        self.unused
    }

    /// Returns the number of octets in the bit string.
    pub fn octet_len(&self) -> usize {
        self.bits.len()
    }

    /// Returns a slice of the octets in the bit string.
    pub fn octet_slice(&self) -> &[u8] {
        self.bits.as_ref()
    }

    /// Returns a bytes value of the octets of the bit string.
    pub fn octet_bytes(&self) -> Bytes {
        self.bits.clone()
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_content() {
        let bits = BitString::from_content(
            Bytes::from_static(b"\x00\xff")
        ).unwrap();
        assert_eq!(bits.unused(), 0);
        assert_eq!(bits.octet_slice(), b"\xff");
        assert_eq!(bits.bit_len(), 8);

        let bits = BitString::from_content(Bytes::from_static(b"\x00")).unwrap();
        assert_eq!(bits.octet_len(), 0);
        assert_eq!(bits.bit_len(), 0);
    }

    #[test]
    fn malformed() {
        assert!(matches!(
            BitString::from_content(Bytes::new()),
            Err(ErrorKind::MalformedContent(_))
        ));
        assert!(matches!(
            BitString::from_content(Bytes::from_static(b"\x08\xff")),
            Err(ErrorKind::MalformedContent(_))
        ));
        assert!(matches!(
            BitString::from_content(Bytes::from_static(b"\x01")),
            Err(ErrorKind::MalformedContent(_))
        ));
    }

    #[test]
    fn bits() {
        let bits = BitString::from_content(
            Bytes::from_static(b"\x04\x81\xf0")
        ).unwrap();
        assert_eq!(bits.bit_len(), 12);
        assert!(bits.bit(0));
        assert!(!bits.bit(1));
        assert!(bits.bit(7));
        assert!(bits.bit(8));
        assert!(bits.bit(11));
        assert!(!bits.bit(12));
        assert!(!bits.bit(100));
    }
}
