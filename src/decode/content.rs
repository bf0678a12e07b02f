//! The content octets and end-of-contents marker of a value.
//!
//! This is a private module. The relevant items are re-exported by the
//! parent.

use super::node::Header;
use super::value::Value;


//------------ Content -------------------------------------------------------

/// The content octets of a value.
///
/// For a value of indefinite length, the span given by the header does not
/// include the end-of-contents octets.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Content<'a> {
    header: Header,
    value: Value<'a>,
}

impl<'a> Content<'a> {
    pub(crate) fn new(header: Header, value: Value<'a>) -> Self {
        Content { header, value }
    }

    /// Returns the offset and size of the content octets.
    pub fn header(&self) -> Header {
        self.header
    }

    /// Returns the decoded content.
    pub fn value(&self) -> &Value<'a> {
        &self.value
    }

    /// Converts the content into the decoded content.
    pub fn into_value(self) -> Value<'a> {
        self.value
    }
}


//------------ EndOfContents -------------------------------------------------

/// The end-of-contents octets terminating a value of indefinite length.
///
/// These are always the two octets `00 00`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct EndOfContents {
    header: Header,
}

impl EndOfContents {
    /// The number of end-of-contents octets.
    pub const LEN: usize = 2;

    pub(crate) fn new(offset: usize) -> Self {
        EndOfContents { header: Header::new(offset, Self::LEN) }
    }

    /// Returns the offset and size of the end-of-contents octets.
    pub fn header(&self) -> Header {
        self.header
    }
}
