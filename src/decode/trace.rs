//! Observing the decoder.
//!
//! This is a private module. Its public items are re-exported by the
//! parent.

use std::fmt;
use crate::ident::Ident;
use crate::length::LengthOctets;
use super::content::EndOfContents;
use super::node::Header;


//------------ Event ---------------------------------------------------------

/// Something the decoder came across.
///
/// The depth given with each event is the nesting depth of the value the
/// event refers to, with top-level values having a depth of 0.
#[derive(Clone, Copy, Debug)]
pub enum Event<'e> {
    /// The identifier and length octets of a value have been decoded.
    Header {
        depth: usize,
        ident: &'e Ident,
        length: &'e LengthOctets,
    },

    /// The end-of-contents octets of an indefinite length value were found.
    EndOfContents {
        depth: usize,
        eoc: &'e EndOfContents,
    },

    /// A value has been decoded completely.
    Complete {
        depth: usize,
        header: Header,
    },
}

impl fmt::Display for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Event::Header { depth, ident, length } => {
                write!(
                    f, "{:>6} depth {}: {} {} {} {}",
                    ident.header().offset(), depth,
                    ident.class(),
                    if ident.is_constructed() { "CONSTRUCTED" }
                    else { "PRIMITIVE" },
                    ident.tag(), length
                )
            }
            Event::EndOfContents { depth, eoc } => {
                write!(
                    f, "{:>6} depth {}: end-of-contents",
                    eoc.header().offset(), depth
                )
            }
            Event::Complete { depth, header } => {
                write!(
                    f, "{:>6} depth {}: complete, {} octets",
                    header.offset(), depth, header.length()
                )
            }
        }
    }
}


//------------ Trace ---------------------------------------------------------

/// A sink for decoder events.
///
/// Any closure taking an [`Event`] can be used as a sink.
pub trait Trace {
    /// Receives an event.
    fn event(&mut self, event: Event);
}

impl<F: FnMut(Event)> Trace for F {
    fn event(&mut self, event: Event) {
        (self)(event)
    }
}


//------------ NoTrace -------------------------------------------------------

/// A sink dropping all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTrace;

impl Trace for NoTrace {
    fn event(&mut self, _event: Event) { }
}


//------------ LogTrace ------------------------------------------------------

/// A sink forwarding all events to the `log` facade at trace level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTrace;

impl Trace for LogTrace {
    fn event(&mut self, event: Event) {
        log::trace!("{}", event);
    }
}
