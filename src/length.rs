//! The length octets.
//!
//! This is a private module. The [`Length`] defined herein is re-exported
//! by the parent.

use crate::decode::{DecodeError, ErrorKind, Source};


//------------ Length -------------------------------------------------------

/// The length octets of an encoded value.
///
/// A length value can either be definite, meaning it provides the actual
/// number of content octets in the value, or indefinite, in which case the
/// content is delimited by a special end-of-contents marker.
///
/// # BER Encoding
///
/// The length can be encoded in one of two basic ways. Which one is used is
/// determined by the most significant bit of the first octet. If it is not
/// set, the length octets is one octet long and the remaining bits of this
/// first octet provide the definite length. Thus, if the first octet is
/// less than 128, it provides the definite length already.
///
/// If the most significant bit is set, the remaining bits of the first
/// octet specify the number of octets that follow to encode the actual
/// length. If they specify that there are zero more octets, i.e., the
/// value of the first octet is 128, the length is indefinite. Otherwise,
/// those following octets give the big-endian encoding of the definite
/// length of the content octets.
///
/// We only accept up to four following octets and a resulting value that
/// fits into a non-negative 32 bit integer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Length {
    /// A definite length with the given number of content octets.
    Definite(usize),

    /// An indefinite length.
    Indefinite,
}

impl Length {
    /// The maximum number of octets following the first octet.
    const MAX_OCTETS: u8 = 4;

    /// Takes the length octets from the beginning of a source.
    ///
    /// A definite length has to be smaller than `limit`, which is the
    /// largest number of octets available to the value the length belongs
    /// to.
    ///
    /// Length octets always follow identifier octets, so running out of
    /// data here is always an error.
    pub fn take_from<S: Source + ?Sized>(
        source: &mut S, limit: usize
    ) -> Result<Self, DecodeError> {
        let len = match source.take_u8()? {
            // Bit 7 clear: single.
            n if (n & 0x80) == 0 => usize::from(n),

            // 0x80: indefinite.
            0x80 => return Ok(Length::Indefinite),

            // anything else: clear left bit, number of octets.
            n => {
                let count = n & 0x7F;
                if count > Self::MAX_OCTETS {
                    return xerr!(Err(source.err(ErrorKind::MalformedLength)))
                }
                let mut len = 0u32;
                for _ in 0..count {
                    len = (len << 8) | u32::from(source.take_u8()?);
                }
                if len > i32::MAX as u32 {
                    return xerr!(Err(source.err(ErrorKind::MalformedLength)))
                }
                match usize::try_from(len) {
                    Ok(len) => len,
                    Err(_) => {
                        return xerr!(
                            Err(source.err(ErrorKind::MalformedLength))
                        )
                    }
                }
            }
        };
        if len >= limit {
            return xerr!(Err(source.err(ErrorKind::OutOfBounds)))
        }
        Ok(Length::Definite(len))
    }

    /// Returns the length if it is definite.
    pub fn definite(self) -> Option<usize> {
        match self {
            Length::Definite(len) => Some(len),
            Length::Indefinite => None,
        }
    }

    /// Returns whether the length is indefinite.
    pub fn is_indefinite(self) -> bool {
        matches!(self, Length::Indefinite)
    }
}


//============ Tests =========================================================
