//! The length octets.

use std::fmt;
use crate::decode::{DecodeError, Header, Pos, SliceSource};
use crate::mode::Mode;


//------------ LengthForm ----------------------------------------------------

/// The form of the length octets.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LengthForm {
    /// The length octets give the number of content octets.
    Definite,

    /// The content is terminated by end-of-contents octets.
    Indefinite,
}


//------------ LengthOctets --------------------------------------------------

/// The length octets of an encoded value.
///
/// A length value can either be definite, meaning it provides the actual
/// number of content octets in the value, or indefinite, in which case the
/// content is delimited by a special end-of-contents marker.
///
/// # BER Encoding
///
/// The length can be encoded in one of two basic ways. Which one is used is
/// determined by the most significant bit of the first octet. If it is not
/// set, the length octets is one octet long and the remaining bits of this
/// first octet provide the definite length. Thus, if the first octet is
/// less than 128, it provides the definite length already.
///
/// If the most significant bit is set, the remaining bits of the first
/// octet specify the number of octets that follow to encode the actual
/// length. If they specify that there are zero more octets, i.e., the
/// value of the first octet is 128, the length is indefinite. Otherwise,
/// those following octets give the big-endian encoding of the definite
/// length of the content octets. The first octet 0xFF is reserved.
///
/// Under DER, indefinite lengths are not allowed and a definite length
/// must be encoded in the minimum number of octets.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct LengthOctets {
    /// The length.
    ///
    /// If this is `None`, the length is indefinite.
    length: Option<usize>,

    /// Where the length octets are.
    header: Header,
}

impl LengthOctets {
    /// Returns the length if it is definite.
    pub fn definite(&self) -> Option<usize> {
        self.length
    }

    /// Returns the form of the length octets.
    pub fn form(&self) -> LengthForm {
        match self.length {
            Some(_) => LengthForm::Definite,
            None => LengthForm::Indefinite,
        }
    }

    /// Returns whether the length is indefinite.
    pub fn is_indefinite(&self) -> bool {
        self.length.is_none()
    }

    /// Returns the offset and size of the length octets.
    pub fn header(&self) -> Header {
        self.header
    }

    /// Takes the length octets from the beginning of a source.
    pub fn take_from(
        source: &mut SliceSource, mode: Mode
    ) -> Result<Self, DecodeError> {
        let start = source.offset();
        let length = if mode.is_restricted() {
            Self::take_from_restricted(source)?
        }
        else {
            Self::take_from_relaxed(source)?
        };
        Ok(LengthOctets {
            length,
            header: Header::new(start, source.offset() - start),
        })
    }

    /// Parses a length in BER mode.
    fn take_from_relaxed(
        source: &mut SliceSource
    ) -> Result<Option<usize>, DecodeError> {
        let pos = source.pos();
        let len = match FirstOctet::take_from(source)? {
            FirstOctet::Single(res) => return Ok(res),
            FirstOctet::Multi(len) => len,
        };
        let octets = source.take_slice(len)?;

        // Leading zeros are fine in BER, they just don’t count towards the
        // size limit.
        let start = octets.iter().position(|&octet| octet != 0);
        let octets = match start {
            Some(start) => octets.get(start..).unwrap_or(&[]),
            None => return Ok(Some(0))
        };
        Self::from_be_octets(octets, pos).map(Some)
    }

    /// Parses a length in DER mode.
    fn take_from_restricted(
        source: &mut SliceSource
    ) -> Result<Option<usize>, DecodeError> {
        let pos = source.pos();
        let len = match FirstOctet::take_from(source)? {
            FirstOctet::Single(Some(res)) => return Ok(Some(res)),
            FirstOctet::Single(None) => {
                xerr!(return Err(DecodeError::length(
                    "indefinite length not allowed in DER", pos
                )))
            }
            FirstOctet::Multi(len) => len,
        };
        let octets = source.take_slice(len)?;

        // The second octet can’t be zero and it can’t be less than 0x80 if
        // it is the last octet as well. In both cases, there is a shorter
        // encoding.
        match octets {
            [first, ..] if *first == 0 => {
                xerr!(return Err(DecodeError::length(
                    "length not minimally encoded in DER", pos
                )))
            }
            [only] if *only < 0x80 => {
                xerr!(return Err(DecodeError::length(
                    "length not minimally encoded in DER", pos
                )))
            }
            _ => { }
        }
        Self::from_be_octets(octets, pos).map(Some)
    }

    /// Converts big-endian octets without leading zeros into a length.
    fn from_be_octets(
        octets: &[u8], pos: Pos
    ) -> Result<usize, DecodeError> {
        let mut res = 0usize.to_ne_bytes();
        let start = res.len().saturating_sub(octets.len());
        let to = res.as_mut_slice().get_mut(start..).filter(|to| {
            to.len() == octets.len()
        });
        let Some(to) = to else {
            // This means the length is too big for a usize.
            xerr!(return Err(DecodeError::length("excessive length", pos)))
        };
        to.copy_from_slice(octets);
        Ok(usize::from_be_bytes(res))
    }
}

impl fmt::Display for LengthOctets {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.length {
            Some(len) => write!(f, "DEFINITE={}", len),
            None => f.write_str("INDEFINITE"),
        }
    }
}


//------------ FirstOctet ----------------------------------------------------

/// The first octet of the encoded length.
enum FirstOctet {
    /// The first octet is a length in and of itself.
    ///
    /// `None` means an indefinite length.
    Single(Option<usize>),

    /// The first octet indicates the number of octets to follow.
    Multi(usize),
}

impl FirstOctet {
    /// Takes the first octet and checks what it means.
    fn take_from(source: &mut SliceSource) -> Result<Self, DecodeError> {
        let pos = source.pos();
        match source.take_u8()? {
            // Bit 7 clear: single.
            n if (n & 0x80) == 0 => Ok(FirstOctet::Single(Some(n.into()))),

            // 0x80: indefinite.
            0x80 => Ok(FirstOctet::Single(None)),

            // 0xFF: reserved.
            0xFF => {
                xerr!(Err(DecodeError::length(
                    "reserved length octet 0xFF", pos
                )))
            }

            // anything else: clear left bit, number of octets.
            n => Ok(FirstOctet::Multi((n & 0x7F).into()))
        }
    }
}


//============ Tests =========================================================
