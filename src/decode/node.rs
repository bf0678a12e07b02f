//! The decoded tree of values.
//!
//! This is a private module. The relevant items are re-exported by the
//! parent.

use std::fmt;
use smallvec::SmallVec;
use crate::ident::{Class, Ident, Tag};
use crate::length::{LengthForm, LengthOctets};
use super::content::{Content, EndOfContents};
use super::decoder::Decoder;
use super::error::DecodeError;
use super::source::Pos;
use super::value::Value;


//------------ Header --------------------------------------------------------

/// The location of some octets within the decoded data.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Header {
    offset: usize,
    length: usize,
}

impl Header {
    /// Creates a new header from an offset and a length.
    pub const fn new(offset: usize, length: usize) -> Self {
        Header { offset, length }
    }

    /// Returns the offset of the first octet.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the number of octets.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Returns the offset right after the last octet.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.length)
    }

    /// Returns the offset as a position for error reporting.
    pub fn pos(&self) -> Pos {
        self.offset.into()
    }
}


//------------ Node ----------------------------------------------------------

/// A decoded value.
///
/// A node consists of its identifier octets, its length octets, its
/// content, and, if the length is indefinite, the end-of-contents octets.
/// The content of a constructed node holds the nested nodes, the content of
/// a primitive node borrows its octets from the decoded data.
///
/// The header of the node covers all of these components. Its length is
/// the number of octets taken up by the value in the data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Node<'a> {
    header: Header,
    ident: Ident,
    length: LengthOctets,
    content: Content<'a>,
    eoc: Option<EndOfContents>,
}

impl<'a> Node<'a> {
    pub(crate) fn new(
        header: Header,
        ident: Ident,
        length: LengthOctets,
        content: Content<'a>,
        eoc: Option<EndOfContents>,
    ) -> Self {
        Node { header, ident, length, content, eoc }
    }

    /// Decodes the value at the start of `data` in BER mode.
    ///
    /// This is a shortcut for using a default [`Decoder`].
    pub fn decode(data: &'a [u8]) -> Result<Self, DecodeError> {
        Decoder::new().decode(data, 0)
    }

    /// Decodes the value starting at `offset` in BER mode.
    pub fn decode_at(
        data: &'a [u8], offset: usize
    ) -> Result<Self, DecodeError> {
        Decoder::new().decode(data, offset)
    }

    /// Returns the span of the complete value.
    pub fn header(&self) -> Header {
        self.header
    }

    /// Returns the identifier octets.
    pub fn ident(&self) -> &Ident {
        &self.ident
    }

    /// Returns the length octets.
    pub fn length(&self) -> &LengthOctets {
        &self.length
    }

    /// Returns the content.
    pub fn content(&self) -> &Content<'a> {
        &self.content
    }

    /// Returns the end-of-contents octets if the length is indefinite.
    pub fn eoc(&self) -> Option<&EndOfContents> {
        self.eoc.as_ref()
    }

    /// Returns the tag of the value.
    pub fn tag(&self) -> Tag {
        self.ident.tag()
    }

    /// Returns the class of the tag.
    pub fn class(&self) -> Class {
        self.ident.class()
    }

    /// Returns the number of the tag.
    pub fn number(&self) -> u32 {
        self.ident.number()
    }

    /// Returns whether the value is constructed.
    pub fn is_constructed(&self) -> bool {
        self.ident.is_constructed()
    }

    /// Returns the form of the length octets.
    pub fn length_form(&self) -> LengthForm {
        self.length.form()
    }

    /// Returns the content length if it is definite.
    pub fn content_length(&self) -> Option<usize> {
        self.length.definite()
    }

    /// Returns the decoded content.
    pub fn value(&self) -> &Value<'a> {
        self.content.value()
    }

    /// Returns the content octets of a primitive value.
    pub fn primitive(&self) -> Option<&'a [u8]> {
        self.content.value().as_primitive()
    }

    /// Returns the nested values of a constructed value.
    pub fn children(&self) -> Option<&[Node<'a>]> {
        self.content.value().as_constructed()
    }

    /// Returns the position of the first octet of the value.
    pub fn start(&self) -> Pos {
        self.header.pos()
    }

    /// Calls `op` for this node and all nested nodes.
    ///
    /// The nodes are visited in the order they appear in the data, i.e.,
    /// each node before its nested nodes. The first argument to `op` is the
    /// depth of the node with this node having a depth of 0.
    pub fn walk<F: FnMut(usize, &Node<'a>)>(&self, mut op: F) {
        let mut stack = SmallVec::<[(usize, &Node<'a>); 8]>::new();
        stack.push((0, self));
        while let Some((depth, node)) = stack.pop() {
            op(depth, node);
            if let Some(children) = node.children() {
                stack.extend(
                    children.iter().rev().map(|child| (depth + 1, child))
                );
            }
        }
    }

    /// Checks that the value has the `expected` tag.
    pub fn check_tag(&self, expected: Tag) -> Result<(), DecodeError> {
        if self.tag() == expected {
            Ok(())
        }
        else {
            xerr!(Err(DecodeError::value(
                format!(
                    "expected {} (tag number = {}), found {} \
                     (tag number = {})",
                    expected, expected.number(),
                    self.tag(), self.number(),
                ),
                self.start()
            )))
        }
    }

    /// Returns the content octets of a primitive value with the `expected`
    /// tag.
    ///
    /// Fails if the tag differs, if the value is constructed, or if the
    /// content does not match the declared length.
    pub fn primitive_content(
        &self, expected: Tag
    ) -> Result<&'a [u8], DecodeError> {
        self.check_tag(expected)?;
        let content = match self.primitive() {
            Some(content) => content,
            None => {
                xerr!(return Err(DecodeError::value(
                    format!("{} must use primitive encoding", expected),
                    self.start()
                )))
            }
        };
        if self.content_length() != Some(content.len()) {
            xerr!(return Err(DecodeError::value(
                format!(
                    "{} with length {} has {} content octets",
                    expected, self.length, content.len()
                ),
                self.start()
            )))
        }
        Ok(content)
    }
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f, "{} {} ",
            self.class(),
            if self.is_constructed() { "CONSTRUCTED" } else { "PRIMITIVE" },
        )?;
        match self.tag().name() {
            Some(name) => f.write_str(name)?,
            None if self.tag().is_universal() => write!(f, "{}", self.number())?,
            None => write!(f, "[{}]", self.number())?,
        }
        write!(f, " {}", self.length)?;
        if let Some(content) = self.primitive() {
            if !content.is_empty() {
                f.write_str(" ")?;
                for octet in content.iter().take(Self::PREVIEW_LEN) {
                    write!(f, "{:02x}", octet)?;
                }
                if content.len() > Self::PREVIEW_LEN {
                    f.write_str("..")?;
                }
            }
        }
        Ok(())
    }
}

impl Node<'_> {
    /// The number of content octets shown by the `Display` impl.
    const PREVIEW_LEN: usize = 16;
}
