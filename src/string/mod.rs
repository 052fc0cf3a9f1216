//! BER encoding for various strings types.
//!
//! This module provides type that match the various string encodings provided
//! by ASN.1 and BER.
//!
//! There are two types of strings for binary data. [`OctetString`]s contain
//! a unrestricted sequence of octets while [`BitString`]s contain a sequence
//! of bits that does not need to be of a length divisible by eight.
//!
//! In addition, there are a number of so-called restricted character strings
//! that each conain a sequence of characters according to a pre-defined
//! character set. These types wrap their content octets and offer
//! conversion into Rust strings:
//!
//! * [`Utf8String`], [`NumericString`], [`PrintableString`],
//!   [`TeletexString`], [`Ia5String`], [`VisibleString`], and
//!   [`GeneralString`] can be viewed as a `str` if their content happens to
//!   be valid UTF-8,
//! * [`BmpString`] and [`UniversalString`] can be converted into a
//!   `String` from UTF-16 and UTF-32 respectively.

//--- Re-exports

pub use self::bit::BitString;
pub use self::octet::OctetString;
pub use self::restricted::{
    BmpString, GeneralString, Ia5String, NumericString, PrintableString,
    TeletexString, UniversalString, Utf8String, VisibleString,
};

//--- Private modules

mod bit;
mod octet;
mod restricted;
