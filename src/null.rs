//! The NULL type.

use std::fmt;
use crate::decode::{DecodeError, Node};
use crate::ident::Tag;


//------------ Null ----------------------------------------------------------

/// A NULL value.
///
/// In BER, NULL is a primitive value with empty content.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Null;

impl Null {
    /// Decodes a NULL value from a node.
    pub fn from_node(node: &Node) -> Result<Self, DecodeError> {
        let content = node.primitive_content(Tag::NULL)?;
        if !content.is_empty() {
            xerr!(return Err(DecodeError::value(
                format!(
                    "NULL value with non-zero content length {}",
                    content.len()
                ),
                node.content().header().pos()
            )))
        }
        Ok(Null)
    }
}

impl fmt::Display for Null {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("NULL")
    }
}


//============ Tests =========================================================
