//! The UTCTime type.

use std::fmt;
use crate::decode::{DecodeError, Node, Pos};
use crate::ident::Tag;


//------------ UtcTime -------------------------------------------------------

/// A UTCTime value.
///
/// The value is a point in time given with a precision of one second,
/// always in UTC.
///
/// # BER Encoding
///
/// A UTCTime is encoded as a primitive value whose content is the ASCII
/// string `YYMMDDHHMMSSZ`. Two-digit years from 50 to 99 refer to the
/// twentieth century, years from 00 to 49 to the twenty-first.
///
/// X.680 also allows omitting the seconds and using a time zone offset
/// instead of the trailing `Z`. Neither form is accepted here.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct UtcTime {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

impl UtcTime {
    /// The length of the content octets.
    const CONTENT_LEN: usize = 13;

    /// Decodes a time from a node.
    pub fn from_node(node: &Node) -> Result<Self, DecodeError> {
        let content = node.primitive_content(Tag::UTC_TIME)?;
        Self::from_content(content, node.content().header().pos())
    }

    /// Decodes a time from its content octets.
    ///
    /// The position is that of the first content octet. It is used for
    /// error reporting only.
    pub fn from_content(
        content: &[u8], pos: Pos
    ) -> Result<Self, DecodeError> {
        let content: &[u8; Self::CONTENT_LEN] = match content.try_into() {
            Ok(content) => content,
            Err(_) => {
                xerr!(return Err(DecodeError::value(
                    format!(
                        "UTCTime must have 13 content octets, found {}",
                        content.len()
                    ),
                    pos
                )))
            }
        };
        if content[12] != b'Z' {
            xerr!(return Err(DecodeError::value(
                "UTCTime must end in 'Z'", pos + 12
            )))
        }

        let year = field(content, 0, "year", 0, 99, pos)?;
        let year = if year < 50 {
            2000 + u16::from(year)
        }
        else {
            1900 + u16::from(year)
        };
        let month = field(content, 2, "month", 1, 12, pos)?;
        let day = field(
            content, 4, "day", 1, days_in_month(year, month), pos
        )?;
        Ok(UtcTime {
            year,
            month,
            day,
            hour: field(content, 6, "hour", 0, 23, pos)?,
            minute: field(content, 8, "minute", 0, 59, pos)?,
            second: field(content, 10, "second", 0, 59, pos)?,
        })
    }

    /// Returns the four-digit year.
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Returns the month, starting at 1 for January.
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Returns the day of the month, starting at 1.
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Returns the hour of the day, from 0 to 23.
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Returns the minute, from 0 to 59.
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Returns the second, from 0 to 59.
    pub fn second(&self) -> u8 {
        self.second
    }
}

impl fmt::Display for UtcTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f, "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day,
            self.hour, self.minute, self.second
        )
    }
}


//------------ Helper Functions ----------------------------------------------

/// Parses the two-digit field at `start` and checks its range.
fn field(
    content: &[u8; UtcTime::CONTENT_LEN],
    start: usize,
    name: &'static str,
    min: u8, max: u8,
    pos: Pos,
) -> Result<u8, DecodeError> {
    let (high, low) = (content[start], content[start + 1]);
    if !high.is_ascii_digit() || !low.is_ascii_digit() {
        xerr!(return Err(DecodeError::value(
            format!("UTCTime {} is not a two-digit number", name),
            pos + start
        )))
    }
    let res = (high - b'0') * 10 + (low - b'0');
    if res < min || res > max {
        xerr!(return Err(DecodeError::value(
            format!(
                "UTCTime {} {} out of range {}..={}", name, res, min, max
            ),
            pos + start
        )))
    }
    Ok(res)
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 => {
            if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) {
                29
            }
            else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}


//============ Tests =========================================================
