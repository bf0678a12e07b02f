//! String types.
//!
//! This module provides types for the string encodings of ASN.1.
//!
//! [`OctetString`]s contain an unrestricted sequence of octets. The
//! so-called restricted character strings contain a sequence of characters
//! from a pre-defined character set. They are all represented by
//! [`RestrictedString`] with the character set given by a [`CharSet`]
//! value. Currently supported are:
//!
//! * NumericString containing only decimal digits and spaces,
//! * PrintableString containing letters, digits, and a few symbols,
//! * IA5String containing ASCII characters (IA5 is an alternative name for
//!   ASCII),
//! * VisibleString containing the printable ASCII characters,
//! * GeneralString whose content is kept as octets, and
//! * UTF8String containing Unicode characters encoded in UTF-8.
//!
//! All string types may be encoded in primitive or constructed form.

//--- Re-exports

pub use self::octet::OctetString;
pub use self::restricted::{CharSet, RestrictedString};

//--- Private modules

mod octet;
mod restricted;
