//! A BER-encoded OCTET STRING.
//!
//! This is an internal module. Its public types are re-exported by the
//! parent.

use std::slice;
use bytes::{Bytes, BytesMut};
use smallvec::SmallVec;
use crate::decode::{DecodeError, Node, Pos};
use crate::ident::Tag;


//------------ OctetString ---------------------------------------------------

/// An octet string value.
///
/// An octet string is a sequence of octets, i.e., a glorified `[u8]`. Basic
/// Encoding Rules, however, allow this sequence to be broken up into chunks
/// that are encoded separatedly to allow for very large octet strings and
/// cases where one doesn’t yet know the length of the string. This type
/// holds the assembled octets.
///
/// # BER Encoding
///
/// Octet strings are either encoded as a primitive or a constructed value.
/// In the primitive form, the content octets are the string’s octets. In a
/// constructed form, the content is a sequence of encoded octets strings
/// which in turn may be primitive or constructed. In this case, the string’s
/// octets are the concatenation of all the content octets of the primitive
/// forms in the order as encountered.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct OctetString(Bytes);

impl OctetString {
    /// Creates an octet string from a Bytes value.
    pub fn new(bytes: Bytes) -> Self {
        OctetString(bytes)
    }

    /// Decodes an octet string from a node.
    ///
    /// Both the primitive and constructed forms are accepted.
    pub fn from_node(node: &Node) -> Result<Self, DecodeError> {
        take_octets(node, Tag::OCTET_STRING).map(OctetString)
    }

    /// Returns the octets of the string.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Converts the string into its octets.
    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    /// Returns the number of octets.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the string is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for OctetString {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl From<OctetString> for Bytes {
    fn from(src: OctetString) -> Self {
        src.0
    }
}


//------------ take_octets ---------------------------------------------------

/// Assembles the octets of a string type value.
///
/// The value must have the tag `tag`. If it is constructed, all its nested
/// values must be octet strings, which may be constructed again.
pub(crate) fn take_octets(
    node: &Node, tag: Tag
) -> Result<Bytes, DecodeError> {
    node.check_tag(tag)?;
    let Some(children) = node.children() else {
        return node.primitive_content(tag).map(Bytes::copy_from_slice)
    };

    let mut target = BytesMut::new();
    let mut stack = SmallVec::<[slice::Iter<Node>; 4]>::new();
    stack.push(children.iter());
    while let Some(iter) = stack.last_mut() {
        let Some(child) = iter.next() else {
            stack.pop();
            continue
        };
        match child.children() {
            Some(children) => {
                child.check_tag(Tag::OCTET_STRING)?;
                stack.push(children.iter());
            }
            None => {
                target.extend_from_slice(
                    child.primitive_content(Tag::OCTET_STRING)?
                );
            }
        }
    }
    Ok(target.freeze())
}


/// Returns the position of an octet of an assembled string value.
///
/// The `index` is into the octets returned by [`take_octets`] for `node`.
/// Returns the start of the node if the index is past the end.
pub(crate) fn octet_pos(node: &Node, index: usize) -> Pos {
    let mut res = None;
    let mut seen = 0;
    node.walk(|_, child| {
        let Some(content) = child.primitive() else { return };
        if res.is_none() && index < seen + content.len() {
            res = Some(child.content().header().pos() + (index - seen));
        }
        seen += content.len();
    });
    res.unwrap_or_else(|| node.start())
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use crate::decode::{ErrorKind, Pos};
    use super::*;

    fn decode(data: &[u8]) -> Result<OctetString, DecodeError> {
        OctetString::from_node(&Node::decode(data)?)
    }

    #[test]
    fn primitive() {
        assert_eq!(decode(b"\x04\x03foo").unwrap().as_slice(), b"foo");
        assert!(decode(b"\x04\x00").unwrap().is_empty());
        assert_eq!(
            decode(b"\x04\x04\x04\x01\x01\x00").unwrap().as_slice(),
            b"\x04\x01\x01\x00"
        );
    }

    #[test]
    fn constructed() {
        assert_eq!(
            decode(b"\x24\x80\
                     \x04\x02\x01\x02\
                     \x24\x80\x04\x01\x03\x04\x00\x00\x00\
                     \x24\x03\x04\x01\x04\
                     \x00\x00"
            ).unwrap().as_slice(),
            b"\x01\x02\x03\x04"
        );
        assert!(decode(b"\x24\x00").unwrap().is_empty());
        assert!(decode(b"\x24\x02\x04\x00").unwrap().is_empty());
    }

    #[test]
    fn failures() {
        let err = decode(b"\x24\x03\x02\x01\x05").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueInvalid);
        assert_eq!(err.pos(), Pos::from(2));

        let err = decode(b"\x24\x05\x24\x03\x05\x01\x00").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueInvalid);
        assert!(decode(b"\x0C\x01a").is_err());
        assert!(decode(b"\x84\x01a").is_err());
    }
}
