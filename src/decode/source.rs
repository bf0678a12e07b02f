//! The input octets being decoded.
//!
//! This is a private module. Its public items are re-exported by the
//! parent.

use std::{fmt, ops};
use super::error::DecodeError;


//------------ SliceSource ---------------------------------------------------

/// A cursor over a bytes slice.
///
/// The source keeps the complete input so that positions are always
/// absolute offsets into it. Reading is restricted to the octets between
/// the current position and a limit. The limit starts out as the end of
/// the input and is moved in while decoding the content of a definite
/// length constructed value, so that nested values can’t reach past the
/// end of their parent.
#[derive(Clone, Copy, Debug)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
    limit: usize,
}

impl<'a> SliceSource<'a> {
    /// Creates a new source positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self::at(data, 0)
    }

    /// Creates a new source positioned at `pos`.
    ///
    /// A position past the end of `data` is allowed and results in an
    /// exhausted source.
    pub fn at(data: &'a [u8], pos: usize) -> Self {
        SliceSource { data, pos, limit: data.len() }
    }

    /// Returns the current position.
    pub fn pos(&self) -> Pos {
        self.pos.into()
    }

    /// Returns the current position as an offset into the input.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Returns the offset where reading currently has to stop.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Moves the limit.
    ///
    /// The limit must never be moved past the end of the input.
    pub(crate) fn set_limit(&mut self, limit: usize) {
        debug_assert!(limit <= self.data.len());
        self.limit = limit
    }

    /// Returns the octets left before the limit.
    pub fn remaining(&self) -> &'a [u8] {
        self.data.get(self.pos..self.limit).unwrap_or(&[])
    }

    /// Returns whether the limit has been reached.
    pub fn is_exhausted(&self) -> bool {
        self.remaining().is_empty()
    }

    /// Returns the n-th octet from the current position if available.
    ///
    /// Does not advance the source.
    pub fn peek_nth(&self, n: usize) -> Option<u8> {
        self.remaining().get(n).copied()
    }

    /// Takes a single octet from the source.
    pub fn take_u8(&mut self) -> Result<u8, DecodeError> {
        match self.peek_nth(0) {
            Some(value) => {
                self.pos += 1;
                Ok(value)
            }
            None => Err(self.end_err())
        }
    }

    /// Takes the next `len` octets from the source.
    pub fn take_slice(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let res = match self.remaining().get(..len) {
            Some(res) => res,
            None => return Err(self.end_err())
        };
        self.pos += len;
        Ok(res)
    }

    /// Checks that `len` octets are available and returns their end offset.
    pub fn check_span(&self, len: usize) -> Result<usize, DecodeError> {
        match self.pos.checked_add(len) {
            Some(end) if end <= self.limit => Ok(end),
            _ => Err(self.end_err())
        }
    }

    /// Returns the error for reading past the limit.
    ///
    /// If the limit is the end of the input, the data is truncated.
    /// Otherwise a nested value is longer than its parent’s content.
    fn end_err(&self) -> DecodeError {
        if self.limit < self.data.len() {
            xerr!(DecodeError::length(
                "constructed content length mismatch", self.pos
            ))
        }
        else {
            xerr!(DecodeError::truncated(self.pos))
        }
    }
}


//------------ Pos -----------------------------------------------------------

/// The position within the decoded input.
///
/// This is the offset of an octet from the start of the bytes slice given
/// to the decoder, not from the start of the value being decoded.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Pos(usize);

impl Pos {
    /// Returns the position as a `usize`.
    pub fn to_usize(self) -> usize {
        self.0
    }
}

impl From<usize> for Pos {
    fn from(pos: usize) -> Pos {
        Pos(pos)
    }
}

impl ops::Add<usize> for Pos {
    type Output = Self;

    fn add(self, rhs: usize) -> Self {
        Pos(self.0.saturating_add(rhs))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use crate::decode::ErrorKind;
    use super::*;

    #[test]
    fn take_within_limit() {
        let data = b"\x01\x02\x03\x04";
        let mut source = SliceSource::at(data, 1);
        assert_eq!(source.take_u8().unwrap(), 2);
        assert_eq!(source.peek_nth(1), Some(4));
        assert_eq!(source.take_slice(2).unwrap(), b"\x03\x04");
        assert!(source.is_exhausted());
        assert_eq!(source.take_u8().unwrap_err().kind(), ErrorKind::Truncated);
    }

    #[test]
    fn limited_reads() {
        let data = b"\x01\x02\x03\x04";
        let mut source = SliceSource::new(data);
        source.set_limit(2);
        assert_eq!(source.check_span(2).unwrap(), 2);
        assert_eq!(
            source.check_span(3).unwrap_err().kind(),
            ErrorKind::LengthMalformed
        );
        assert_eq!(
            source.take_slice(3).unwrap_err().kind(),
            ErrorKind::LengthMalformed
        );
        assert!(source.check_span(usize::MAX).is_err());
    }

    #[test]
    fn past_the_end() {
        let mut source = SliceSource::at(b"\x01", 5);
        assert!(source.is_exhausted());
        assert_eq!(source.take_u8().unwrap_err().pos(), Pos::from(5));
    }
}
