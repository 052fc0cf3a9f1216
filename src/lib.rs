//! Streaming decoding of data in Basic Encoding Rules.
//!
//! This crate reads BER encoded data one value at a time. It never
//! builds a tree of the whole input unless asked to: constructed values
//! are handed out as lazy containers that read their content only when
//! pulled. Both the definite and the indefinite length form are
//! supported.
//!
//! Decoding starts with a [`StreamParser`][decode::StreamParser]:
//!
//! ```
//! use berstream::decode::{Container, Object, Primitive, StreamParser};
//!
//! let mut parser = StreamParser::from_slice(b"\x30\x03\x02\x01\x05");
//! let mut seq = match parser.next().unwrap().unwrap() {
//!     Object::Container(Container::Sequence(seq)) => seq,
//!     _ => panic!("expected a sequence"),
//! };
//! match seq.pull().unwrap().unwrap() {
//!     Object::Primitive(Primitive::Integer(int)) => {
//!         assert_eq!(int.to_i64(), Some(5))
//!     }
//!     _ => panic!("expected an integer"),
//! }
//! assert!(seq.pull().unwrap().is_none());
//! ```
//!
//! The types for the primitive values live in their own modules and are
//! re-exported here. They wrap the content octets and only do as much
//! checking as necessary.
//!
//! The crate only decodes. There is no support for producing BER and no
//! checking of DER or CER rules.

pub use self::boolean::Boolean;
pub use self::ident::{Class, Ident, Tag};
pub use self::int::{Enumerated, Integer};
pub use self::length::Length;
pub use self::oid::Oid;
pub use self::string::{BitString, OctetString};
pub use self::time::{GeneralizedTime, UtcTime};

#[macro_use] pub mod debug;

pub mod decode;

pub mod boolean;
pub mod int;
pub mod oid;
pub mod string;
pub mod time;

mod ident;
mod length;
