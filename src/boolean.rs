//! BER encoded booleans.

use bytes::Bytes;


//------------ Boolean -------------------------------------------------------

/// A BER encoded BOOLEAN value.
///
/// In BER, the content of a boolean is a single octet which is false if all
/// bits are zero and true otherwise. The type keeps the content as it was
/// received and doesn’t insist on it being exactly one octet.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Boolean(Bytes);

impl Boolean {
    /// Creates a boolean from its content octets.
    pub fn from_content(content: Bytes) -> Self {
        Boolean(content)
    }

    /// Returns the value of the boolean.
    ///
    /// Any non-zero octet makes the value true.
    pub fn value(&self) -> bool {
        self.0.iter().any(|&octet| octet != 0)
    }

    /// Returns the content octets.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl From<bool> for Boolean {
    fn from(value: bool) -> Self {
        Boolean(Bytes::from_static(if value { b"\xff" } else { b"\x00" }))
    }
}


//============ Tests =========================================================
