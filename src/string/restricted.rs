//! BER-encoded Restricted Character String types.
//!
//! This is an internal module. It’s public items are re-exported by the
//! parent.
//!
//! The types only wrap the content octets. The character set of a type is
//! not checked when a value is created.

use std::{char, fmt, str};
use bytes::Bytes;


//------------ Macro for the string types ------------------------------------

macro_rules! character_string {
    ( $(#[$attr:meta])* $name:ident ) => {
        $(#[$attr])*
        #[derive(Clone, Eq, Hash, PartialEq)]
        pub struct $name(Bytes);

        impl $name {
            /// Creates a value from its content octets.
            pub fn from_content(content: Bytes) -> Self {
                $name(content)
            }

            /// Returns the content octets.
            pub fn as_slice(&self) -> &[u8] {
                self.0.as_ref()
            }

            /// Converts the value into its content octets.
            pub fn into_bytes(self) -> Bytes {
                self.0
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                self.as_slice()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(
                    f, concat!(stringify!($name), "({:?})"),
                    String::from_utf8_lossy(self.as_slice())
                )
            }
        }
    }
}

macro_rules! utf8_compatible {
    ( $($name:ident),* ) => {
        $(
            impl $name {
                /// Returns the content as a string slice.
                ///
                /// Fails if the content isn’t valid UTF-8. This includes
                /// characters outside of ASCII in character sets that
                /// aren’t a subset of Unicode.
                pub fn to_str(&self) -> Result<&str, str::Utf8Error> {
                    str::from_utf8(self.as_slice())
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    f.write_str(&String::from_utf8_lossy(self.as_slice()))
                }
            }
        )*
    }
}


//------------ Single octet character sets -----------------------------------

character_string!(
    /// A UTF8String: Unicode characters encoded in UTF-8.
    Utf8String
);

character_string!(
    /// A NumericString: decimal digits and space.
    NumericString
);

character_string!(
    /// A PrintableString: a subset of ASCII.
    ///
    /// The set contains letters, digits, space, and the symbols
    /// `'()+,-./:=?`.
    PrintableString
);

character_string!(
    /// A TeletexString, also known as T61String.
    ///
    /// The character set is complicated and rarely implemented correctly.
    /// In practice it is mostly used for Latin-1 or plain ASCII.
    TeletexString
);

character_string!(
    /// An IA5String: the ASCII characters.
    Ia5String
);

character_string!(
    /// A VisibleString: the printable ASCII characters.
    VisibleString
);

character_string!(
    /// A GeneralString.
    GeneralString
);

utf8_compatible!(
    Utf8String, NumericString, PrintableString, TeletexString, Ia5String,
    VisibleString, GeneralString
);


//------------ Multi-octet character sets ------------------------------------

character_string!(
    /// A UniversalString: Unicode characters encoded in UTF-32BE.
    UniversalString
);

impl UniversalString {
    /// Converts the content into a string.
    ///
    /// Invalid characters and an incomplete last character are replaced
    /// with U+FFFD.
    pub fn to_string_lossy(&self) -> String {
        let chunks = self.as_slice().chunks(4);
        chunks.map(|chunk| {
            match <[u8; 4]>::try_from(chunk) {
                Ok(octets) => {
                    char::from_u32(u32::from_be_bytes(octets))
                        .unwrap_or(char::REPLACEMENT_CHARACTER)
                }
                Err(_) => char::REPLACEMENT_CHARACTER
            }
        }).collect()
    }
}

character_string!(
    /// A BMPString: characters of the Basic Multilingual Plane in UCS-2.
    ///
    /// We treat the content as UTF-16BE.
    BmpString
);

impl BmpString {
    /// Converts the content into a string.
    ///
    /// Invalid characters and an odd last octet are replaced with U+FFFD.
    pub fn to_string_lossy(&self) -> String {
        let slice = self.as_slice();
        let units = slice.chunks_exact(2).map(|chunk| {
            u16::from_be_bytes([chunk[0], chunk[1]])
        });
        let mut res: String = char::decode_utf16(units).map(|ch| {
            ch.unwrap_or(char::REPLACEMENT_CHARACTER)
        }).collect();
        if slice.len() % 2 != 0 {
            res.push(char::REPLACEMENT_CHARACTER)
        }
        res
    }
}


//============ Tests =========================================================
