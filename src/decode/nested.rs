//! Processing of nested values.
//!
//! Constructed values are decoded with an explicit stack of the values
//! currently open rather than by recursion, so the depth of the input can
//! never exhaust the native stack.

use smallvec::SmallVec;
use crate::ident::{Ident, Tag};
use crate::length::LengthOctets;
use crate::mode::Mode;
use super::content::{Content, EndOfContents};
use super::error::DecodeError;
use super::node::{Header, Node};
use super::source::SliceSource;
use super::trace::{Event, Trace};
use super::value::Value;


//------------ NodeBuilder ---------------------------------------------------

/// Builds the tree for a single value.
pub(super) struct NodeBuilder<'a, 't, T> {
    source: SliceSource<'a>,
    mode: Mode,
    max_depth: usize,
    trace: &'t mut T,
    stack: Stack<'a>,
}

impl<'a, 't, T: Trace> NodeBuilder<'a, 't, T> {
    pub fn new(
        data: &'a [u8],
        offset: usize,
        mode: Mode,
        max_depth: usize,
        trace: &'t mut T,
    ) -> Self {
        NodeBuilder {
            source: SliceSource::at(data, offset),
            mode, max_depth, trace,
            stack: Stack::default(),
        }
    }

    /// Decodes the value and all its nested values.
    pub fn build(mut self) -> Result<Node<'a>, DecodeError> {
        loop {
            let node = match self.stack.last().map(|frame| frame.end) {
                Some(FrameEnd::Definite(end))
                    if self.source.offset() == end =>
                {
                    self.close(None)
                }
                Some(FrameEnd::Indefinite) => {
                    match self.take_eoc()? {
                        Some(eoc) => self.close(Some(eoc)),
                        None => self.open()?,
                    }
                }
                _ => self.open()?,
            };

            // If we’ve finished a value, it either goes into the innermost
            // open value or it is the top-level value and we are done.
            let Some(node) = node else { continue };
            match self.stack.last_mut() {
                Some(frame) => frame.children.push(node),
                None => return Ok(node),
            }
        }
    }

    /// Decodes the next identifier and length octets.
    ///
    /// Returns the complete node for a primitive value. For a constructed
    /// value, pushes a new frame and returns `None`.
    fn open(&mut self) -> Result<Option<Node<'a>>, DecodeError> {
        let depth = self.stack.len();
        let start = self.source.offset();
        let ident = Ident::take_from(&mut self.source)?;
        let length = LengthOctets::take_from(&mut self.source, self.mode)?;

        if ident.tag() == Tag::END_OF_CONTENTS
            && !ident.is_constructed()
            && length.definite() == Some(0)
        {
            xerr!(return Err(DecodeError::unexpected_eoc(start)))
        }

        self.trace.event(Event::Header {
            depth, ident: &ident, length: &length
        });

        let content_start = self.source.offset();
        if !ident.is_constructed() {
            let Some(len) = length.definite() else {
                xerr!(return Err(DecodeError::length(
                    "primitive value with indefinite length", start
                )))
            };
            let content = self.source.take_slice(len)?;
            let header = Header::new(start, self.source.offset() - start);
            self.trace.event(Event::Complete { depth, header });
            return Ok(Some(Node::new(
                header, ident, length,
                Content::new(
                    Header::new(content_start, len), Value::Primitive(content)
                ),
                None
            )))
        }

        if depth >= self.max_depth {
            xerr!(return Err(DecodeError::depth(self.max_depth, start)))
        }
        let saved_limit = self.source.limit();
        let end = match length.definite() {
            Some(len) => {
                let end = self.source.check_span(len)?;
                self.source.set_limit(end);
                FrameEnd::Definite(end)
            }
            None => FrameEnd::Indefinite,
        };
        self.stack.push(Frame {
            start, content_start, ident, length, end, saved_limit,
            children: Vec::new(),
        });
        Ok(None)
    }

    /// Takes the end-of-contents octets if they are next.
    ///
    /// Errors out if there isn’t enough data left for them.
    fn take_eoc(&mut self) -> Result<Option<EndOfContents>, DecodeError> {
        let offset = self.source.offset();
        match (self.source.peek_nth(0), self.source.peek_nth(1)) {
            (Some(0), Some(0)) => {
                self.source.take_slice(EndOfContents::LEN)?;
                let eoc = EndOfContents::new(offset);
                self.trace.event(Event::EndOfContents {
                    depth: self.stack.len().saturating_sub(1),
                    eoc: &eoc,
                });
                Ok(Some(eoc))
            }
            (_, None) => xerr!(Err(DecodeError::missing_eoc(offset))),
            _ => Ok(None)
        }
    }

    /// Closes the innermost open value and returns its node.
    fn close(&mut self, eoc: Option<EndOfContents>) -> Option<Node<'a>> {
        let frame = self.stack.pop()?;
        self.source.set_limit(frame.saved_limit);
        let content_end = match eoc {
            Some(ref eoc) => eoc.header().offset(),
            None => self.source.offset(),
        };
        let header = Header::new(
            frame.start, self.source.offset() - frame.start
        );
        self.trace.event(Event::Complete {
            depth: self.stack.len(), header
        });
        Some(Node::new(
            header, frame.ident, frame.length,
            Content::new(
                Header::new(
                    frame.content_start, content_end - frame.content_start
                ),
                Value::Constructed(frame.children)
            ),
            eoc
        ))
    }
}


//------------ Stack ---------------------------------------------------------

/// The constructed values currently open.
type Stack<'a> = SmallVec<[Frame<'a>; 4]>;


//------------ Frame ---------------------------------------------------------

/// A constructed value whose content is being decoded.
struct Frame<'a> {
    /// The offset of the identifier octets.
    start: usize,

    /// The offset of the content octets.
    content_start: usize,

    ident: Ident,
    length: LengthOctets,
    end: FrameEnd,

    /// The limit of the source before the value was opened.
    saved_limit: usize,

    /// The nested values decoded so far.
    children: Vec<Node<'a>>,
}


//------------ FrameEnd ------------------------------------------------------

#[derive(Clone, Copy, Debug)]
enum FrameEnd {
    /// Definite constructed value.
    ///
    /// The content ends at the given offset.
    Definite(usize),

    /// Indefinite constructed value.
    ///
    /// The content ends with the end-of-contents octets.
    Indefinite,
}
