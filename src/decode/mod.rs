//! Decoding data in Basic Encoding Rules.
//!
//! This module contains the decoder turning encoded data into a tree of
//! [`Node`]s. The tree borrows the content of primitive values from the
//! data, so the data has to be kept around while the tree is in use.
//!
//! Decoding is configured through a [`Decoder`]. The shortcut
//! [`Node::decode`] uses the default configuration.
//!
//! Progress of the decoder can be observed by giving a [`Trace`] sink to
//! [`Decoder::decode_traced`]. Any closure taking an [`Event`] is such a
//! sink, [`LogTrace`] forwards events to the `log` crate.

pub use self::content::{Content, EndOfContents};
pub use self::decoder::{Decoder, Nodes};
pub use self::error::{DecodeError, ErrorKind};
pub use self::node::{Header, Node};
pub use self::source::{Pos, SliceSource};
pub use self::trace::{Event, LogTrace, NoTrace, Trace};
pub use self::value::Value;

mod content;
mod decoder;
mod error;
mod nested;
mod node;
mod source;
mod trace;
mod value;

#[cfg(test)]
mod test;
