//! The content of either type of value.
//!
//! This is a private module. The relevant items are re-exported by the
//! parent.

use super::node::Node;


//------------ Value ---------------------------------------------------------

/// The content of a decoded value.
///
/// Which variant is used is determined by the constructed bit of the
/// identifier octets.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value<'a> {
    /// The value is a primitive value.
    ///
    /// The content octets are borrowed from the decoded data.
    Primitive(&'a [u8]),

    /// The value is a constructed value.
    ///
    /// The nested values are kept in the order they appear in the data.
    Constructed(Vec<Node<'a>>),
}

impl<'a> Value<'a> {
    /// Returns whether this value is a primitive value.
    pub fn is_primitive(&self) -> bool {
        match *self {
            Value::Primitive(_) => true,
            Value::Constructed(_) => false,
        }
    }

    /// Returns whether this value is a constructed value.
    pub fn is_constructed(&self) -> bool {
        match *self {
            Value::Primitive(_) => false,
            Value::Constructed(_) => true,
        }
    }

    /// Returns the content octets of a primitive value.
    pub fn as_primitive(&self) -> Option<&'a [u8]> {
        match *self {
            Value::Primitive(inner) => Some(inner),
            Value::Constructed(_) => None,
        }
    }

    /// Returns the nested values of a constructed value.
    pub fn as_constructed(&self) -> Option<&[Node<'a>]> {
        match *self {
            Value::Primitive(_) => None,
            Value::Constructed(ref inner) => Some(inner.as_slice()),
        }
    }
}
