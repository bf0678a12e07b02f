//! Decoding of data in Basic and Distinguished Encoding Rules.
//!
//! This crate decodes data encoded in the Basic Encoding Rules (BER) or
//! their restricted subset, the Distinguished Encoding Rules (DER), both
//! defined in ITU-T X.690, into a tree of [`Node`]s. Each node keeps the
//! location and decoded form of its identifier, length, and content octets
//! as well as, for values of indefinite length, the end-of-contents octets.
//!
//! The tree is purely structural. Interpreting the content of a node is
//! left to the value types which check that the node has the expected tag
//! and encoding:
//!
//! * [`Integer`] for INTEGER,
//! * [`Null`] for NULL,
//! * [`Oid`] for OBJECT IDENTIFIER,
//! * [`OctetString`] for OCTET STRING,
//! * [`RestrictedString`] for the character string types, and
//! * [`UtcTime`] for UTCTime.
//!
//! ```
//! use bertree::{Integer, Node, Tag};
//!
//! let node = Node::decode(b"\x30\x03\x02\x01\x05").unwrap();
//! assert_eq!(node.tag(), Tag::SEQUENCE);
//! let int = Integer::from_node(&node.children().unwrap()[0]).unwrap();
//! assert_eq!(int.to_i64(), Some(5));
//! ```

pub use self::decode::{DecodeError, Decoder, ErrorKind, Node};
pub use self::ident::{Class, Ident, Tag};
pub use self::int::Integer;
pub use self::length::{LengthForm, LengthOctets};
pub use self::mode::Mode;
pub use self::null::Null;
pub use self::oid::Oid;
pub use self::string::{CharSet, OctetString, RestrictedString};
pub use self::time::UtcTime;

#[macro_use] pub mod debug;

pub mod decode;

pub mod ident;
pub mod int;
pub mod length;
pub mod mode;
pub mod null;
pub mod oid;
pub mod string;
pub mod time;
