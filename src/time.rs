//! BER encoded time values.
//!
//! Both types keep the content octets as received. They are ASCII strings
//! in a restricted format which is not checked.

use std::str;
use bytes::Bytes;


//------------ UtcTime -------------------------------------------------------

/// A UTCTime value, such as `"991231235959Z"`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct UtcTime(Bytes);

impl UtcTime {
    /// Creates a value from its content octets.
    pub fn from_content(content: Bytes) -> Self {
        UtcTime(content)
    }

    /// Returns the content octets.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns the content as a string slice if it is valid UTF-8.
    pub fn to_str(&self) -> Result<&str, str::Utf8Error> {
        str::from_utf8(self.as_slice())
    }
}


//------------ GeneralizedTime -----------------------------------------------

/// A GeneralizedTime value, such as `"19991231235959.5Z"`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct GeneralizedTime(Bytes);

impl GeneralizedTime {
    /// Creates a value from its content octets.
    pub fn from_content(content: Bytes) -> Self {
        GeneralizedTime(content)
    }

    /// Returns the content octets.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns the content as a string slice if it is valid UTF-8.
    pub fn to_str(&self) -> Result<&str, str::Utf8Error> {
        str::from_utf8(self.as_slice())
    }
}


//============ Tests =========================================================
