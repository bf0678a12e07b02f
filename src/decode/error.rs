//! Error Handling.
//!
//! This is a private module. Its public content is being re-exported by the
//! parent module.

use std::{error, fmt};
use std::borrow::Cow;
use super::source::Pos;


//------------ ErrorKind -----------------------------------------------------

/// The rule of X.690 or of a value type that was violated.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// The input ended before a value was complete.
    Truncated,

    /// The identifier octets are malformed.
    ///
    /// This covers a high tag number whose first subsequent octet has all
    /// seven data bits cleared, tag numbers that don’t fit a `u32`, and
    /// identifier octets cut off in the middle.
    TagMalformed,

    /// The length octets are malformed or contradict the value.
    ///
    /// This covers the reserved initial octet 0xFF, a primitive value with
    /// indefinite length, lengths too large for a `usize`, length forms
    /// not permitted by the decoding mode, and nested values that run past
    /// the end of their enclosing constructed value.
    LengthMalformed,

    /// An indefinite length value ran out of data before its
    /// end-of-contents octets.
    MissingEoc,

    /// End-of-contents octets appeared outside of an indefinite length
    /// value.
    UnexpectedEoc,

    /// The values are nested deeper than the decoder permits.
    DepthExceeded,

    /// The content of a value is not valid for its type.
    ValueInvalid,
}

impl ErrorKind {
    /// Returns a short description of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Truncated => "truncated data",
            ErrorKind::TagMalformed => "malformed tag",
            ErrorKind::LengthMalformed => "malformed length",
            ErrorKind::MissingEoc => "missing end-of-contents",
            ErrorKind::UnexpectedEoc => "unexpected end-of-contents",
            ErrorKind::DepthExceeded => "nesting too deep",
            ErrorKind::ValueInvalid => "invalid value",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


//------------ DecodeError ---------------------------------------------------

/// An error happened while decoding data.
///
/// The error consists of the [kind][ErrorKind] of rule that was violated,
/// a message describing the specific problem, and the position in the
/// input where the offending value or octet starts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecodeError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    pos: Pos,
}

impl DecodeError {
    /// Creates a new error from its parts.
    pub fn new(
        kind: ErrorKind,
        message: impl Into<Cow<'static, str>>,
        pos: impl Into<Pos>,
    ) -> Self {
        DecodeError { kind, message: message.into(), pos: pos.into() }
    }

    /// Creates an error for data ending prematurely.
    pub fn truncated(pos: impl Into<Pos>) -> Self {
        Self::new(ErrorKind::Truncated, "unexpected end of data", pos)
    }

    /// Creates an error for malformed identifier octets.
    pub fn tag(
        message: impl Into<Cow<'static, str>>, pos: impl Into<Pos>
    ) -> Self {
        Self::new(ErrorKind::TagMalformed, message, pos)
    }

    /// Creates an error for malformed length octets.
    pub fn length(
        message: impl Into<Cow<'static, str>>, pos: impl Into<Pos>
    ) -> Self {
        Self::new(ErrorKind::LengthMalformed, message, pos)
    }

    /// Creates an error for a missing end-of-contents marker.
    pub fn missing_eoc(pos: impl Into<Pos>) -> Self {
        Self::new(ErrorKind::MissingEoc, "missing required end-of-contents", pos)
    }

    /// Creates an error for a misplaced end-of-contents marker.
    pub fn unexpected_eoc(pos: impl Into<Pos>) -> Self {
        Self::new(
            ErrorKind::UnexpectedEoc,
            "end-of-contents outside of indefinite length value",
            pos
        )
    }

    /// Creates an error for exceeding the maximum nesting depth.
    pub fn depth(max_depth: usize, pos: impl Into<Pos>) -> Self {
        Self::new(
            ErrorKind::DepthExceeded,
            format!("values nested deeper than {}", max_depth),
            pos
        )
    }

    /// Creates an error for content that is invalid for its type.
    pub fn value(
        message: impl Into<Cow<'static, str>>, pos: impl Into<Pos>
    ) -> Self {
        Self::new(ErrorKind::ValueInvalid, message, pos)
    }

    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the message of the error.
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// Returns the position in the input the error refers to.
    pub fn pos(&self) -> Pos {
        self.pos
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at position {}", self.message, self.pos)
    }
}

impl error::Error for DecodeError { }


//============ Tests =========================================================
