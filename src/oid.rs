//! ASN.1 Object Identifiers.

use std::{fmt, slice};
use smallvec::SmallVec;
use crate::decode::{DecodeError, Node, Pos};
use crate::ident::Tag;


//------------ Oid -----------------------------------------------------------

/// An object identifer.
///
/// Object identifiers are globally unique, hierarchical values that are used
/// to identify objects or their type. When written, they are presented as a
/// sequence of integers separated by dots such as ‘1.3.6.1.5.5.7.1’. These
/// integers are called arcs.
///
/// Values of this type keep the decoded arcs. Each arc has to fit into a
/// `u128`, which is plenty for any object identifier found in the wild.
///
/// # BER Encoding
///
/// An object identifier is encoded as a primitive value. The content is a
/// sequence of subidentifiers, each an unsigned integer in base 128 with
/// bit 8 set in all but its last octet. The first subidentifier combines
/// the first two arcs as `40 * first + second`, where the first arc can
/// only be 0, 1, or 2 and the second arc is less than 40 unless the first
/// arc is 2.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Oid {
    arcs: SmallVec<[u128; 8]>,
}

impl Oid {
    /// Decodes an object identifier from a node.
    pub fn from_node(node: &Node) -> Result<Self, DecodeError> {
        let content = node.primitive_content(Tag::OID)?;
        Self::from_content(content, node.content().header().pos())
    }

    /// Decodes an object identifier from its content octets.
    ///
    /// The position is that of the first content octet. It is used for
    /// error reporting only.
    pub fn from_content(
        content: &[u8], pos: Pos
    ) -> Result<Self, DecodeError> {
        match content.last() {
            None => {
                xerr!(return Err(DecodeError::value(
                    "OBJECT IDENTIFIER value without content", pos
                )))
            }
            Some(last) if last & 0x80 != 0 => {
                xerr!(return Err(DecodeError::value(
                    "OBJECT IDENTIFIER with continuation bit set on last octet",
                    pos + (content.len() - 1)
                )))
            }
            _ => { }
        }

        let mut arcs = SmallVec::new();
        for (offset, octets) in Subidentifiers::new(content) {
            let value = Self::subidentifier(octets, pos + offset)?;
            if arcs.is_empty() {
                let (first, second) = Position::split_first(value);
                arcs.push(first);
                arcs.push(second);
            }
            else {
                arcs.push(value);
            }
        }
        Ok(Oid { arcs })
    }

    /// Converts the octets of a single subidentifier into its value.
    fn subidentifier(octets: &[u8], pos: Pos) -> Result<u128, DecodeError> {
        if octets.len() > 1 && octets.first() == Some(&0x80) {
            xerr!(return Err(DecodeError::value(
                "OBJECT IDENTIFIER subidentifier not minimally encoded", pos
            )))
        }
        let mut res = 0u128;
        for &octet in octets {
            if res > (u128::MAX >> 7) {
                xerr!(return Err(DecodeError::value(
                    "OBJECT IDENTIFIER subidentifier too large", pos
                )))
            }
            res = (res << 7) | u128::from(octet & 0x7F);
        }
        Ok(res)
    }

    /// Returns the arcs of the object identifier.
    pub fn arcs(&self) -> &[u128] {
        self.arcs.as_slice()
    }

    /// Returns an iterator over the arcs.
    pub fn iter(&self) -> slice::Iter<'_, u128> {
        self.arcs.iter()
    }
}

impl<'a> IntoIterator for &'a Oid {
    type Item = &'a u128;
    type IntoIter = slice::Iter<'a, u128>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut arcs = self.arcs.iter();
        if let Some(first) = arcs.next() {
            write!(f, "{}", first)?;
        }
        for arc in arcs {
            write!(f, ".{}", arc)?;
        }
        Ok(())
    }
}


//------------ Position ------------------------------------------------------

/// The position of an arc combined in the first subidentifier.
///
/// As the first two arcs of the object identifer are encoded in the first
/// subidentifier of the encoded value, they have to be separated.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
enum Position {
    /// This is the first arc of the identifier.
    ///
    /// This is 0 if the integer value of the subidentifer is 0..39,
    /// 1 for 40..79, and 2 for anything else.
    First,

    /// This is the second arc of the identifier.
    ///
    /// This is the integer value of the subidentifer modulo 40 if the value
    /// is below 80 and otherwise the value minus 80.
    Second,
}

impl Position {
    /// Returns the arc at this position for the first subidentifier.
    fn arc(self, value: u128) -> u128 {
        match self {
            Position::First => {
                if value < 40 {
                    0
                }
                else if value < 80 {
                    1
                }
                else {
                    2
                }
            }
            Position::Second => {
                if value < 80 {
                    value % 40
                }
                else {
                    value - 80
                }
            }
        }
    }

    /// Splits the first subidentifier into the first two arcs.
    fn split_first(value: u128) -> (u128, u128) {
        (Position::First.arc(value), Position::Second.arc(value))
    }
}


//------------ Subidentifiers ------------------------------------------------

/// An iterator over the encoded subidentifiers of an object identifier.
///
/// Yields the offset of each subidentifier within the content and its
/// octets, including the final octet with bit 8 cleared. Trailing octets
/// that all have bit 8 set are not returned.
struct Subidentifiers<'a> {
    /// The remainder of the object identifier’s encoded octets.
    slice: &'a [u8],

    /// The offset of the remainder within the content.
    offset: usize,
}

impl<'a> Subidentifiers<'a> {
    fn new(slice: &'a [u8]) -> Self {
        Subidentifiers { slice, offset: 0 }
    }
}

impl<'a> Iterator for Subidentifiers<'a> {
    type Item = (usize, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.slice.iter().position(|octet| octet & 0x80 == 0)?;
        let (res, tail) = self.slice.split_at(end + 1);
        let offset = self.offset;
        self.slice = tail;
        self.offset += res.len();
        Some((offset, res))
    }
}


//============ Tests =========================================================
