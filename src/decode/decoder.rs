//! Decoding data into trees.
//!
//! This is a private module. The relevant items are re-exported by the
//! parent.

use crate::mode::Mode;
use super::error::DecodeError;
use super::nested::NodeBuilder;
use super::node::Node;
use super::trace::{NoTrace, Trace};


//------------ Decoder -------------------------------------------------------

/// The configuration for decoding data.
///
/// A decoder is a small value that can be created once and reused for any
/// number of inputs. By default, it decodes BER and allows values to be
/// nested up to [`Decoder::DEFAULT_MAX_DEPTH`] levels deep.
///
/// ```
/// use bertree::{Decoder, Mode};
///
/// let decoder = Decoder::new().mode(Mode::Der).max_depth(16);
/// let node = decoder.decode(b"\x30\x03\x02\x01\x05", 0).unwrap();
/// assert_eq!(node.header().length(), 5);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Decoder {
    mode: Mode,
    max_depth: usize,
}

impl Decoder {
    /// The default maximum nesting depth.
    pub const DEFAULT_MAX_DEPTH: usize = 128;

    /// Creates a new decoder with the default configuration.
    pub fn new() -> Self {
        Decoder {
            mode: Mode::default(),
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the encoding rules to enforce.
    pub fn mode(self, mode: Mode) -> Self {
        Decoder { mode, ..self }
    }

    /// Sets the maximum nesting depth.
    ///
    /// This is the number of constructed values that can be open at the
    /// same time. A value of 0 allows primitive values only.
    pub fn max_depth(self, max_depth: usize) -> Self {
        Decoder { max_depth, ..self }
    }

    /// Returns the encoding rules the decoder enforces.
    pub fn decode_mode(&self) -> Mode {
        self.mode
    }

    /// Returns the maximum nesting depth.
    pub fn depth_limit(&self) -> usize {
        self.max_depth
    }

    /// Decodes the value starting at `offset` in `data`.
    ///
    /// Data following the value is ignored. The number of octets taken up
    /// by the value is the length of the returned node’s header.
    pub fn decode<'a>(
        &self, data: &'a [u8], offset: usize
    ) -> Result<Node<'a>, DecodeError> {
        self.decode_traced(data, offset, &mut NoTrace)
    }

    /// Decodes a value reporting progress to a trace sink.
    pub fn decode_traced<'a, T: Trace>(
        &self, data: &'a [u8], offset: usize, trace: &mut T
    ) -> Result<Node<'a>, DecodeError> {
        NodeBuilder::new(data, offset, self.mode, self.max_depth, trace).build()
    }

    /// Decodes all consecutive values in `data`.
    pub fn decode_all<'a>(
        &self, data: &'a [u8]
    ) -> Result<Vec<Node<'a>>, DecodeError> {
        self.nodes(data).collect()
    }

    /// Returns an iterator over the consecutive values in `data`.
    pub fn nodes<'a>(&self, data: &'a [u8]) -> Nodes<'a> {
        Nodes { decoder: *self, data, offset: 0, failed: false }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}


//------------ Nodes ---------------------------------------------------------

/// An iterator over consecutive top-level values.
///
/// The iterator stops after the first error.
#[derive(Clone, Debug)]
pub struct Nodes<'a> {
    decoder: Decoder,
    data: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> Nodes<'a> {
    /// Returns the offset of the next value.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl<'a> Iterator for Nodes<'a> {
    type Item = Result<Node<'a>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.data.len() {
            return None
        }
        match self.decoder.decode(self.data, self.offset) {
            Ok(node) => {
                self.offset += node.header().length();
                Some(Ok(node))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
