//! Restricted character strings.
//!
//! This is an internal module. Its public types are re-exported by the
//! parent.

use std::{fmt, str};
use bytes::Bytes;
use crate::decode::{DecodeError, Node, Pos};
use crate::ident::Tag;
use super::octet::{octet_pos, take_octets};


//------------ CharSet -------------------------------------------------------

/// The character set of a restricted character string type.
///
/// Each variant stands for one of the string types and defines which
/// octets may appear in a value of that type.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum CharSet {
    /// NumericString: the digits and the space character.
    Numeric,

    /// PrintableString: letters, digits, space, and `'()+,-./:=?`.
    Printable,

    /// IA5String: the 128 characters of ASCII.
    Ia5,

    /// VisibleString: the printable ASCII characters including space.
    Visible,

    /// GeneralString: any octet.
    ///
    /// The actual character set is negotiated through escape sequences
    /// which aren’t interpreted, so values of this type are only available
    /// as octets.
    General,

    /// UTF8String: Unicode characters encoded in UTF-8.
    Utf8,
}

impl CharSet {
    /// Returns the natural tag of the string type.
    pub const fn tag(self) -> Tag {
        match self {
            CharSet::Numeric => Tag::NUMERIC_STRING,
            CharSet::Printable => Tag::PRINTABLE_STRING,
            CharSet::Ia5 => Tag::IA5_STRING,
            CharSet::Visible => Tag::VISIBLE_STRING,
            CharSet::General => Tag::GENERAL_STRING,
            CharSet::Utf8 => Tag::UTF8_STRING,
        }
    }

    /// Returns the ASN.1 name of the string type.
    pub const fn name(self) -> &'static str {
        match self {
            CharSet::Numeric => "NumericString",
            CharSet::Printable => "PrintableString",
            CharSet::Ia5 => "IA5String",
            CharSet::Visible => "VisibleString",
            CharSet::General => "GeneralString",
            CharSet::Utf8 => "UTF8String",
        }
    }

    /// Returns whether a single octet is allowed.
    ///
    /// For UTF-8, this only considers the octet on its own. Use
    /// [`check`][Self::check] to validate a complete value.
    pub fn is_valid_octet(self, ch: u8) -> bool {
        match self {
            CharSet::Numeric => ch.is_ascii_digit() || ch == b' ',
            CharSet::Printable => {
                ch.is_ascii_alphanumeric()
                || matches!(
                    ch,
                    b' ' | b'\'' | b'(' | b')' | b'+' | b',' | b'-' | b'.'
                    | b'/' | b':' | b'=' | b'?'
                )
            }
            CharSet::Ia5 => ch.is_ascii(),
            CharSet::Visible => (0x20..0x7F).contains(&ch),
            CharSet::General | CharSet::Utf8 => true,
        }
    }

    /// Checks that a sequence of octets is a valid value.
    ///
    /// The position is that of the first octet and used for error reporting
    /// only.
    pub fn check(self, octets: &[u8], pos: Pos) -> Result<(), DecodeError> {
        match self.find_invalid(octets) {
            Some((idx, message)) => {
                xerr!(Err(DecodeError::value(message, pos + idx)))
            }
            None => Ok(())
        }
    }

    /// Returns the index of the first invalid octet and an error message.
    fn find_invalid(self, octets: &[u8]) -> Option<(usize, String)> {
        if let CharSet::Utf8 = self {
            return str::from_utf8(octets).err().map(|err| {
                (
                    err.valid_up_to(),
                    format!("invalid UTF-8 in {}: {}", self.name(), err)
                )
            })
        }
        octets.iter().enumerate().find(|&(_, &ch)| {
            !self.is_valid_octet(ch)
        }).map(|(idx, &ch)| {
            (
                idx,
                format!(
                    "invalid character {:?} (0x{:02X}) in {}",
                    char::from(ch), ch, self.name()
                )
            )
        })
    }
}

impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}


//------------ RestrictedString ----------------------------------------------

/// A restricted character string.
///
/// Restricted character strings are octet strings whose octets are limited
/// to a certain [character set][CharSet]. Like octet strings, they can be
/// encoded in primitive or constructed form. In the latter case, the nested
/// values are octet strings.
///
/// Except for GeneralString, the content of all character sets is valid
/// UTF-8 and can be accessed as a `str`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct RestrictedString {
    charset: CharSet,
    octets: Bytes,
}

impl RestrictedString {
    /// Decodes a string of the given character set from a node.
    pub fn from_node(
        node: &Node, charset: CharSet
    ) -> Result<Self, DecodeError> {
        let octets = take_octets(node, charset.tag())?;
        if let Some((idx, message)) = charset.find_invalid(&octets) {
            xerr!(return Err(DecodeError::value(
                message, octet_pos(node, idx)
            )))
        }
        Ok(RestrictedString { charset, octets })
    }

    /// Returns the character set of the string.
    pub fn charset(&self) -> CharSet {
        self.charset
    }

    /// Returns the string as a `str`.
    ///
    /// Returns `None` for a GeneralString.
    pub fn as_str(&self) -> Option<&str> {
        match self.charset {
            CharSet::General => None,
            _ => str::from_utf8(self.octets.as_ref()).ok()
        }
    }

    /// Returns the octets of the string.
    pub fn as_slice(&self) -> &[u8] {
        self.octets.as_ref()
    }

    /// Converts the string into its octets.
    pub fn into_bytes(self) -> Bytes {
        self.octets
    }
}

impl AsRef<[u8]> for RestrictedString {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl fmt::Display for RestrictedString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.as_str() {
            Some(s) => f.write_str(s),
            None => {
                f.write_str(&String::from_utf8_lossy(self.octets.as_ref()))
            }
        }
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use crate::decode::ErrorKind;
    use super::*;

    fn decode(
        data: &[u8], charset: CharSet
    ) -> Result<RestrictedString, DecodeError> {
        RestrictedString::from_node(&Node::decode(data)?, charset)
    }

    fn string(data: &[u8], charset: CharSet) -> String {
        decode(data, charset).unwrap().to_string()
    }

    #[test]
    fn numeric() {
        assert_eq!(string(b"\x12\x05123 4", CharSet::Numeric), "123 4");
        let err = decode(b"\x12\x03\x31\x41\x32", CharSet::Numeric)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueInvalid);
        assert_eq!(err.message(), "invalid character 'A' (0x41) in NumericString");
        assert_eq!(err.pos(), Pos::from(3));
    }

    #[test]
    fn printable() {
        assert_eq!(string(b"\x13\x05Jones", CharSet::Printable), "Jones");
        assert_eq!(
            string(b"\x13\x0FA'b(c)+,-./:=? ", CharSet::Printable),
            "A'b(c)+,-./:=? "
        );
        assert!(decode(b"\x13\x01*", CharSet::Printable).is_err());
        assert!(decode(b"\x13\x01@", CharSet::Printable).is_err());
        assert!(decode(b"\x13\x01&", CharSet::Printable).is_err());
    }

    #[test]
    fn ia5() {
        assert_eq!(
            string(b"\x16\x09test@rsa\x7F", CharSet::Ia5), "test@rsa\x7F"
        );
        assert_eq!(string(b"\x16\x02\x00\x01", CharSet::Ia5), "\x00\x01");
        assert!(decode(b"\x16\x01\x80", CharSet::Ia5).is_err());
    }

    #[test]
    fn visible() {
        assert_eq!(string(b"\x1A\x03 ~a", CharSet::Visible), " ~a");
        assert!(decode(b"\x1A\x01\x1F", CharSet::Visible).is_err());
        assert!(decode(b"\x1A\x01\x7F", CharSet::Visible).is_err());
        assert!(decode(b"\x1A\x01\x80", CharSet::Visible).is_err());
    }

    #[test]
    fn utf8() {
        assert_eq!(
            decode(b"\x0C\x08CAf\xC3\xA9\xE2\x82\xAC", CharSet::Utf8)
                .unwrap().as_str(),
            Some("CAfé€")
        );
        let err = decode(b"\x0C\x03ab\xFF", CharSet::Utf8).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueInvalid);
        assert_eq!(err.pos(), Pos::from(4));

        // A character split across segments.
        assert_eq!(
            string(b"\x2C\x08\x04\x02C\xC3\x04\x02\xA9A", CharSet::Utf8),
            "C\u{e9}A"
        );
        let err = decode(
            b"\x2C\x08\x04\x02C\xC3\x04\x02AA", CharSet::Utf8
        ).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueInvalid);
        assert_eq!(err.pos(), Pos::from(5));
    }

    #[test]
    fn general() {
        let res = decode(b"\x1B\x04\x41\x42\xC3\x44", CharSet::General)
            .unwrap();
        assert_eq!(res.as_slice(), b"\x41\x42\xC3\x44");
        assert_eq!(res.as_str(), None);
    }

    #[test]
    fn constructed() {
        assert_eq!(
            string(
                b"\x33\x80\x04\x02Jo\x24\x80\x04\x03nes\x00\x00\x00\x00",
                CharSet::Printable
            ),
            "Jones"
        );
        let err = decode(
            b"\x33\x07\x04\x02Jo\x04\x01*", CharSet::Printable
        ).unwrap_err();
        assert_eq!(err.pos(), Pos::from(8));
        let err = decode(
            b"\x33\x80\x04\x02Jo\x24\x80\x04\x00\x04\x02n@\x00\x00\x00\x00",
            CharSet::Printable
        ).unwrap_err();
        assert_eq!(err.pos(), Pos::from(13));
        assert!(
            decode(b"\x33\x04\x13\x02Jo", CharSet::Printable).is_err()
        );
    }

    #[test]
    fn wrong_tag() {
        let err = decode(b"\x13\x01a", CharSet::Ia5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueInvalid);
        assert!(err.message().contains("tag number = 22"));
    }
}
