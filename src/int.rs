//! BER encoded integers.

use std::fmt;
use bytes::Bytes;
use crate::decode::{DecodeError, Node, Pos};
use crate::ident::Tag;


//------------ Macros for built-in integers ----------------------------------

macro_rules! signed_impl {
    ( $slice:expr, $type:ident ) => {{
        let slice: &[u8] = $slice;
        if slice.len() > std::mem::size_of::<$type>() {
            None
        }
        else {
            // Start with all bits set for negative numbers and shift the
            // octets in. This sign-extends short encodings.
            let mut res: $type = match slice.first() {
                Some(first) if first & 0x80 != 0 => -1,
                _ => 0,
            };
            for &octet in slice {
                res = (res << 8) | $type::from(octet);
            }
            Some(res)
        }
    }}
}

macro_rules! unsigned_impl {
    ( $slice:expr, $type:ident ) => {{
        let slice: &[u8] = $slice;
        match slice.first() {
            Some(first) if first & 0x80 != 0 => None,
            _ => {
                // A leading zero octet is only there for the sign bit.
                let slice = match slice {
                    [0, rest @ ..] => rest,
                    _ => slice,
                };
                if slice.len() > std::mem::size_of::<$type>() {
                    None
                }
                else {
                    let mut res: $type = 0;
                    for &octet in slice {
                        res = (res << 8) | $type::from(octet);
                    }
                    Some(res)
                }
            }
        }
    }}
}


//------------ Integer -------------------------------------------------------

/// A BER encoded integer.
///
/// As integers are variable length in BER, this type is just a simple
/// wrapper atop the underlying `Bytes` value containing the raw content.
/// The content is guaranteed to be a valid, minimal two’s complement
/// encoding.
///
/// Conversion into the built-in integer types is available through methods
/// such as [`to_i64`][Integer::to_i64] which fail if the value does not fit.
/// The `Display` implementation prints the decimal value no matter how
/// large it is.
///
/// # BER Encoding
///
/// In BER, an INTEGER is encoded as a primitive value with the content
/// octets providing a variable-length, big-endian, two’s complement byte
/// sequence of that integer. Thus, the most-significant bit of the first
/// octet serves as the sign bit and, for negative numbers, all bits from
/// that bit on up are set. The content must be at least one octet and the
/// first nine bits must not all be equal, since then a shorter encoding
/// would exist.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Integer(Bytes);

impl Integer {
    /// Decodes an integer from a node.
    pub fn from_node(node: &Node) -> Result<Self, DecodeError> {
        let content = node.primitive_content(Tag::INTEGER)?;
        Self::from_content(content, node.content().header().pos())
    }

    /// Decodes an integer from its content octets.
    ///
    /// The position is used for error reporting only.
    pub fn from_content(
        content: &[u8], pos: Pos
    ) -> Result<Self, DecodeError> {
        Self::check_head(content, pos)?;
        Ok(Integer(Bytes::copy_from_slice(content)))
    }

    /// Checks that the content is present and minimally encoded.
    fn check_head(content: &[u8], pos: Pos) -> Result<(), DecodeError> {
        match (content.first(), content.get(1).map(|x| x & 0x80 != 0)) {
            (None, _) => {
                xerr!(Err(DecodeError::value(
                    "INTEGER value without content", pos
                )))
            }
            (Some(0), Some(false)) | (Some(0xFF), Some(true)) => {
                xerr!(Err(DecodeError::value(
                    "INTEGER not minimally encoded", pos
                )))
            }
            _ => Ok(())
        }
    }

    /// Returns the content octets.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Converts the integer into its content octets.
    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    /// Returns whether the integer is less than zero.
    pub fn is_negative(&self) -> bool {
        matches!(self.0.first(), Some(first) if first & 0x80 != 0)
    }

    /// Returns whether the integer is zero.
    pub fn is_zero(&self) -> bool {
        *self.0 == [0]
    }

    /// Returns the value as an `i64` if it fits.
    pub fn to_i64(&self) -> Option<i64> {
        signed_impl!(self.as_slice(), i64)
    }

    /// Returns the value as an `i128` if it fits.
    pub fn to_i128(&self) -> Option<i128> {
        signed_impl!(self.as_slice(), i128)
    }

    /// Returns the value as a `u64` if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        unsigned_impl!(self.as_slice(), u64)
    }

    /// Returns the value as a `u128` if it fits.
    pub fn to_u128(&self) -> Option<u128> {
        unsigned_impl!(self.as_slice(), u128)
    }

    /// Returns the decimal digits of the absolute value, least significant
    /// first.
    fn decimal_digits(&self) -> Vec<u8> {
        let mut magnitude = self.0.to_vec();
        if self.is_negative() {
            // Two’s complement: invert and add one.
            for octet in magnitude.iter_mut() {
                *octet = !*octet;
            }
            for octet in magnitude.iter_mut().rev() {
                let (sum, carry) = octet.overflowing_add(1);
                *octet = sum;
                if !carry {
                    break
                }
            }
        }

        let mut digits = Vec::new();
        loop {
            // Divide the big-endian magnitude by ten in place.
            let mut rem = 0u16;
            for octet in magnitude.iter_mut() {
                let cur = (rem << 8) | u16::from(*octet);
                *octet = (cur / 10) as u8;
                rem = cur % 10;
            }
            digits.push(b'0' + rem as u8);
            if magnitude.iter().all(|&octet| octet == 0) {
                break
            }
        }
        digits
    }
}

impl AsRef<[u8]> for Integer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        for digit in self.decimal_digits().iter().rev() {
            write!(f, "{}", char::from(*digit))?;
        }
        Ok(())
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use crate::decode::ErrorKind;
    use super::*;

    fn decode(data: &[u8]) -> Result<Integer, DecodeError> {
        Integer::from_node(&Node::decode(data)?)
    }

    fn int(content: &[u8]) -> Integer {
        Integer::from_content(content, Pos::default()).unwrap()
    }

    #[test]
    fn decode_integer() {
        assert_eq!(decode(b"\x02\x01\x00").unwrap().to_i64(), Some(0));
        assert_eq!(decode(b"\x02\x01\x05").unwrap().to_i64(), Some(5));
        assert_eq!(decode(b"\x02\x01\xFF").unwrap().to_i64(), Some(-1));
        assert_eq!(decode(b"\x02\x02\x00\x80").unwrap().to_i64(), Some(128));
        assert_eq!(
            decode(b"\x02\x02\xFF\x7F").unwrap().to_i64(), Some(-129)
        );
        assert_eq!(
            decode(b"\x02\x03\x01\x00\x00").unwrap().to_i64(), Some(65536)
        );
    }

    #[test]
    fn decode_failures() {
        let err = decode(b"\x02\x02\x00\x05").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueInvalid);
        assert_eq!(err.message(), "INTEGER not minimally encoded");
        assert_eq!(err.pos(), Pos::from(2));
        assert!(decode(b"\x02\x02\xFF\xFF").is_err());
        assert_eq!(
            decode(b"\x02\x00").unwrap_err().message(),
            "INTEGER value without content"
        );

        // Wrong tag and constructed encoding.
        assert!(decode(b"\x0A\x01\x05").is_err());
        assert!(decode(b"\x42\x01\x05").is_err());
        assert!(decode(b"\x22\x03\x02\x01\x05").is_err());
    }

    #[test]
    fn conversions() {
        assert_eq!(int(b"\x80").to_i64(), Some(-128));
        assert_eq!(int(b"\x80").to_u64(), None);
        assert_eq!(int(b"\x7F\xFF").to_u64(), Some(0x7FFF));
        assert_eq!(
            int(b"\x00\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF").to_u64(),
            Some(u64::MAX)
        );
        assert_eq!(
            int(b"\x00\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF").to_i64(), None
        );
        assert_eq!(
            int(b"\x00\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF").to_i128(),
            Some(i128::from(u64::MAX))
        );
        assert_eq!(
            int(b"\x80\x00\x00\x00\x00\x00\x00\x00").to_i64(), Some(i64::MIN)
        );
        assert_eq!(
            int(b"\x01\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
                  \x00\x00\x00").to_u128(),
            None
        );
        assert!(int(b"\x00").is_zero());
        assert!(int(b"\xFF").is_negative());
    }

    #[test]
    fn display() {
        assert_eq!(int(b"\x00").to_string(), "0");
        assert_eq!(int(b"\x05").to_string(), "5");
        assert_eq!(int(b"\xFF").to_string(), "-1");
        assert_eq!(int(b"\x80").to_string(), "-128");
        assert_eq!(int(b"\xFF\x7F").to_string(), "-129");
        assert_eq!(int(b"\x00\x80").to_string(), "128");
        assert_eq!(
            int(b"\x80\x00\x00\x00\x00\x00\x00\x00").to_string(),
            i64::MIN.to_string()
        );
        assert_eq!(
            int(b"\x01\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
                  \x00\x00\x00").to_string(),
            "340282366920938463463374607431768211456"
        );
    }
}
