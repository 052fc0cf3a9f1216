//! BER encoded integers.
//!
//! This module provides the [`Integer`] and [`Enumerated`] types. Both are
//! re-exported at the top level.

use bytes::Bytes;


//------------ Integer -------------------------------------------------------

/// A BER encoded integer.
///
/// As integers are variable length in BER, this type is just a simple wrapper
/// atop the underlying `Bytes` value containing the raw content. The content
/// is not checked when the value is created. Conversions into native
/// integer types fail if the content doesn’t fit.
///
/// # BER Encoding
///
/// In BER, an INTEGER is encoded as a primitive value with the content octets
/// providing a variable-length, big-endian, two‘s complement byte sequence of
/// that integer. Thus, the most-significant bit of the first octet serves as
/// the sign bit.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Integer(Bytes);

impl Integer {
    /// Creates an integer from its content octets.
    pub fn from_content(content: Bytes) -> Self {
        Integer(content)
    }

    /// Returns the content octets.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Converts the integer into its content octets.
    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    /// Returns whether the integer is negative.
    ///
    /// An integer without any content octets is not negative.
    pub fn is_negative(&self) -> bool {
        matches!(self.0.first(), Some(first) if first & 0x80 != 0)
    }

    /// Converts the integer into an `i64`.
    ///
    /// Returns `None` if there are no content octets or if the value is
    /// outside the range of an `i64`.
    pub fn to_i64(&self) -> Option<i64> {
        let slice = Self::strip_sign_extension(self.as_slice())?;
        if slice.len() > 8 {
            return None
        }
        let mut res: i64 = if self.is_negative() { -1 } else { 0 };
        for &octet in slice {
            res = (res << 8) | i64::from(octet);
        }
        Some(res)
    }

    /// Converts the integer into a `u64`.
    ///
    /// Returns `None` if there are no content octets, if the integer is
    /// negative, or if it is too large.
    pub fn to_u64(&self) -> Option<u64> {
        if self.is_negative() {
            return None
        }
        let slice = Self::strip_sign_extension(self.as_slice())?;
        let slice = match slice.split_first() {
            Some((0, tail)) if !tail.is_empty() => tail,
            _ => slice
        };
        if slice.len() > 8 {
            return None
        }
        let mut res = 0u64;
        for &octet in slice {
            res = (res << 8) | u64::from(octet);
        }
        Some(res)
    }

    /// Removes leading octets that only repeat the sign.
    ///
    /// Such octets are not allowed in DER but we are lenient here.
    fn strip_sign_extension(mut slice: &[u8]) -> Option<&[u8]> {
        if slice.is_empty() {
            return None
        }
        while slice.len() > 1 {
            match (slice[0], slice[1] & 0x80) {
                (0x00, 0) | (0xFF, 0x80) => slice = &slice[1..],
                _ => break
            }
        }
        Some(slice)
    }
}

impl AsRef<[u8]> for Integer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}


//------------ Enumerated ----------------------------------------------------

/// A BER encoded ENUMERATED value.
///
/// The content is encoded exactly like an [`Integer`], so this type derefs
/// to one.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Enumerated(Integer);

impl Enumerated {
    /// Creates an enumerated value from its content octets.
    pub fn from_content(content: Bytes) -> Self {
        Enumerated(Integer::from_content(content))
    }

    /// Converts the value into its content octets.
    pub fn into_bytes(self) -> Bytes {
        self.0.into_bytes()
    }
}

impl std::ops::Deref for Enumerated {
    type Target = Integer;

    fn deref(&self) -> &Integer {
        &self.0
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    fn int(slice: &'static [u8]) -> Integer {
        Integer::from_content(Bytes::from_static(slice))
    }

    #[test]
    fn to_i64() {
        assert_eq!(int(b"\x00").to_i64(), Some(0));
        assert_eq!(int(b"\x05").to_i64(), Some(5));
        assert_eq!(int(b"\x7f").to_i64(), Some(127));
        assert_eq!(int(b"\x00\x80").to_i64(), Some(128));
        assert_eq!(int(b"\xff").to_i64(), Some(-1));
        assert_eq!(int(b"\x80").to_i64(), Some(-128));
        assert_eq!(int(b"\xff\x7f").to_i64(), Some(-129));
        assert_eq!(
            int(b"\x7f\xff\xff\xff\xff\xff\xff\xff").to_i64(), Some(i64::MAX)
        );
        assert_eq!(
            int(b"\x80\x00\x00\x00\x00\x00\x00\x00").to_i64(), Some(i64::MIN)
        );
        assert_eq!(int(b"\x00\x00\x00\x00\x00\x00\x00\x00\x05").to_i64(), Some(5));
        assert_eq!(int(b"\x01\x00\x00\x00\x00\x00\x00\x00\x00").to_i64(), None);
        assert_eq!(int(b"").to_i64(), None);
    }

    #[test]
    fn to_u64() {
        assert_eq!(int(b"\x00").to_u64(), Some(0));
        assert_eq!(int(b"\x00\xff").to_u64(), Some(255));
        assert_eq!(
            int(b"\x00\xff\xff\xff\xff\xff\xff\xff\xff").to_u64(),
            Some(u64::MAX)
        );
        assert_eq!(int(b"\xff").to_u64(), None);
        assert_eq!(int(b"\x01\x00\x00\x00\x00\x00\x00\x00\x00").to_u64(), None);
        assert_eq!(int(b"").to_u64(), None);
    }

    #[test]
    fn sign() {
        assert!(int(b"\x80\x00").is_negative());
        assert!(!int(b"\x7f").is_negative());
        assert!(!int(b"").is_negative());
    }

    #[test]
    fn enumerated() {
        let value = Enumerated::from_content(Bytes::from_static(b"\x02"));
        assert_eq!(value.to_i64(), Some(2));
        assert_eq!(value.into_bytes().as_ref(), b"\x02");
    }
}
