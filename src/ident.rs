//! The identifier octets of a BER encoded value.
//!
//! The identifier octets carry the tag of a value and whether the value is
//! primitive or constructed.

use std::fmt;
use crate::decode::{DecodeError, Header, SliceSource};


//------------ Class ---------------------------------------------------------

/// The class of a tag.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Class {
    /// Types defined in X.680.
    Universal,

    /// Types defined in a specific application.
    Application,

    /// Types whose meaning depends on the surrounding type.
    Context,

    /// Types defined privately.
    Private,
}

impl Class {
    /// Returns the class encoded in the two top bits of the first octet.
    pub const fn from_u8(octet: u8) -> Self {
        match octet & 0xc0 {
            0x00 => Class::Universal,
            0x40 => Class::Application,
            0x80 => Class::Context,
            _ => Class::Private,
        }
    }

    /// Returns the name of the class.
    pub const fn as_str(self) -> &'static str {
        match self {
            Class::Universal => "UNIVERSAL",
            Class::Application => "APPLICATION",
            Class::Context => "CONTEXT_SPECIFIC",
            Class::Private => "PRIVATE",
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


//------------ Tag -----------------------------------------------------------

/// The tag of a value.
///
/// In ASN.1, tags are used to identify the type of a value. Tags consist of
/// one of four classes, represented by the [`Class`] enum, and a number
/// within this class. The number is an unsigned integer.
///
/// In BER encoding, the tag becomes part of the identifier octets by
/// combining it with a bit indicating whether a value is primitive or
/// constructed.
///
/// # Limitations
///
/// We only support tag numbers that fit into a `u32`. This should be more
/// than enough in practice.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Tag {
    class: Class,
    number: u32,
}

impl Tag {
    /// Creates a tag from a class and number.
    pub const fn new(class: Class, number: u32) -> Self {
        Tag { class, number }
    }

    /// Creates a new tag in the universal class with the given number.
    pub const fn universal(number: u32) -> Self {
        Self::new(Class::Universal, number)
    }

    /// Creates a new tag in the application class with the given number.
    pub const fn application(number: u32) -> Self {
        Self::new(Class::Application, number)
    }

    /// Creates a new tag in class “context specific” with the given number.
    pub const fn ctx(number: u32) -> Self {
        Self::new(Class::Context, number)
    }

    /// Creates a new tag in the private class with the given number.
    pub const fn private(number: u32) -> Self {
        Self::new(Class::Private, number)
    }

    /// Returns the class of the tag.
    pub const fn class(self) -> Class {
        self.class
    }

    /// Returns the number of the tag.
    pub const fn number(self) -> u32 {
        self.number
    }

    /// Returns whether the tag is of the universal class.
    pub fn is_universal(self) -> bool {
        self.class == Class::Universal
    }

    /// Returns the name of a universal tag.
    ///
    /// Returns `None` for tags of other classes and for universal tag
    /// numbers beyond the ones defined by X.680.
    pub fn name(self) -> Option<&'static str> {
        if !self.is_universal() {
            return None
        }
        UNIVERSAL_NAMES.get(usize::try_from(self.number).ok()?).copied()
    }
}

/// # Constants for universal tags.
///
/// See clause 8.4 of ITU Recommendation X.690.
impl Tag {
    /// The tag marking the end-of-contents in an indefinite length value.
    ///
    /// This is UNIVERSAL 0.
    pub const END_OF_CONTENTS: Self = Self::universal(0);

    /// The tag for the BOOLEAN type, UNIVERSAL 1.
    pub const BOOLEAN: Self = Self::universal(1);

    /// The tag for the INTEGER type, UNIVERSAL 2.
    pub const INTEGER: Self = Self::universal(2);

    /// The tag for the BIT STRING type, UNIVERSAL 3.
    pub const BIT_STRING: Self = Self::universal(3);

    /// The tag for the OCTET STRING type, UNIVERSAL 4.
    pub const OCTET_STRING: Self = Self::universal(4);

    /// The tag for the NULL type, UNIVERSAL 5.
    pub const NULL: Self = Self::universal(5);

    /// The tag for the OBJECT IDENTIFIER type, UNIVERSAL 6.
    pub const OID: Self = Self::universal(6);

    /// The tag for the ObjectDescriptor type, UNIVERSAL 7.
    pub const OBJECT_DESCRIPTOR: Self = Self::universal(7);

    /// The tag for the EXTERNAL and Instance-of types, UNIVERSAL 8.
    pub const EXTERNAL: Self = Self::universal(8);

    /// The tag for the REAL type, UNIVERSAL 9.
    pub const REAL: Self = Self::universal(9);

    /// The tag for the ENUMERATED type, UNIVERSAL 10.
    pub const ENUMERATED: Self = Self::universal(10);

    /// The tag for the EMBEDDED PDV type, UNIVERSAL 11.
    pub const EMBEDDED_PDV: Self = Self::universal(11);

    /// The tag for the UTF8String type, UNIVERSAL 12
    pub const UTF8_STRING: Self = Self::universal(12);

    /// The tag for the RELATIVE-OID type, UNIVERSAL 13.
    pub const RELATIVE_OID: Self = Self::universal(13);

    /// The tag for the TIME type, UNIVERSAL 14.
    pub const TIME: Self = Self::universal(14);

    /// The tag for the SEQUENCE and SEQUENCE OF types, UNIVERSAL 16.
    pub const SEQUENCE: Self = Self::universal(16);

    /// The tag for the SET and SET OF types, UNIVERSAL 17.
    pub const SET: Self = Self::universal(17);

    /// The tag for the NumericString type, UNIVERSAL 18.
    pub const NUMERIC_STRING: Self = Self::universal(18);

    /// The tag for the PrintableString type, UNIVERSAL 19.
    pub const PRINTABLE_STRING: Self = Self::universal(19);

    /// The tag for the TeletexString type, UNIVERSAL 20.
    pub const TELETEX_STRING: Self = Self::universal(20);

    /// The tag for the VideotexString type, UNIVERSAL 21.
    pub const VIDEOTEX_STRING: Self = Self::universal(21);

    /// The tag for the IA5String type, UNIVERSAL 22.
    pub const IA5_STRING: Self = Self::universal(22);

    /// The tag for the UTCTime type, UNIVERSAL 23.
    pub const UTC_TIME: Self = Self::universal(23);

    /// The tag for the GeneralizedType type, UNIVERSAL 24.
    pub const GENERALIZED_TIME: Self = Self::universal(24);

    /// The tag for the GraphicString type, UNIVERSAL 25.
    pub const GRAPHIC_STRING: Self = Self::universal(25);

    /// The tag for the VisibleString type, UNIVERSAL 26.
    pub const VISIBLE_STRING: Self = Self::universal(26);

    /// The tag for the GeneralString type, UNIVERSAL 27.
    pub const GENERAL_STRING: Self = Self::universal(27);

    /// The tag for the UniversalString type, UNIVERSAL 28.
    pub const UNIVERSAL_STRING: Self = Self::universal(28);

    /// The tag for the CHARACTER STRING type, UNIVERSAL 29.
    pub const CHARACTER_STRING: Self = Self::universal(29);

    /// The tag for the BMPString type, UNIVERSAL 30.
    pub const BMP_STRING: Self = Self::universal(30);
}

/// The names of the universal tags indexed by tag number.
const UNIVERSAL_NAMES: [&str; 31] = [
    "EOC", "BOOLEAN", "INTEGER", "BIT-STRING", "OCTET-STRING", "NULL",
    "OBJECT-IDENTIFIER", "OBJECT-DESCRIPTOR", "EXTERNAL", "REAL",
    "ENUMERATED", "EMBEDDED-PDV", "UTF8-STRING", "RELATIVE-OID", "TIME",
    "RESERVED", "SEQUENCE", "SET", "NUMERIC-STRING", "PRINTABLE-STRING",
    "TELETEX-STRING", "VIDEOTEX-STRING", "IA5-STRING", "UTC-TIME",
    "GENERALIZED-TIME", "GRAPHIC-STRING", "VISIBLE-STRING",
    "GENERAL-STRING", "UNIVERSAL-STRING", "CHARACTER-STRING", "BMP-STRING",
];

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(name) = self.name() {
            return f.write_str(name)
        }
        match self.class {
            Class::Universal => write!(f, "[UNIVERSAL {}]", self.number),
            Class::Application => write!(f, "[APPLICATION {}]", self.number),
            Class::Context => write!(f, "[{}]", self.number),
            Class::Private => write!(f, "[PRIVATE {}]", self.number),
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({})", self)
    }
}


//------------ Ident ---------------------------------------------------------

/// The identifier octets of an encoded value.
///
/// There are two forms:
/// * low tag number (for tag numbers between 0 and 30):
///     One octet. Bits 8 and 7 specify the class, bit 6 indicates whether
///     the encoding is primitive (0), and bits 5-1 give the tag number.
/// * high tag number (for tag numbers 31 and greater):
///     Two or more octets. First octet is as in low-tag-number form,
///     except that bits 5-1 all have value 1. Second and following octets
///     give the tag number, base 128, most significant digit first, with
///     as few digits as possible, and with the bit 8 of each octet except
///     the last set to 1.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Ident {
    tag: Tag,
    constructed: bool,
    header: Header,
}

impl Ident {
    /// The mask for the constructed bit in the first octet.
    const CONSTRUCTED_MASK: u8 = 0x20;

    /// The mask for the number in the first octet.
    const SINGLEBYTE_DATA_MASK: u8 = 0x1f;

    /// The mask for the data bits of subsequent octets.
    const MULTIBYTE_DATA_MASK: u8 = 0x7f;

    /// The mask for the continuation bit of subsequent octets.
    const LAST_OCTET_MASK: u8 = 0x80;

    /// Takes the identifier octets from the beginning of a source.
    pub fn take_from(source: &mut SliceSource) -> Result<Self, DecodeError> {
        let start = source.offset();
        let first = source.take_u8()?;
        let class = Class::from_u8(first);
        let constructed = first & Self::CONSTRUCTED_MASK != 0;
        let mut number = u32::from(first & Self::SINGLEBYTE_DATA_MASK);

        if number == u32::from(Self::SINGLEBYTE_DATA_MASK) {
            number = 0;
            let mut first_subsequent = true;
            loop {
                let pos = source.pos();
                let octet = match source.take_u8() {
                    Ok(octet) => octet,
                    Err(_) => {
                        xerr!(return Err(DecodeError::tag(
                            "unexpected end of identifier octets", pos
                        )))
                    }
                };
                if first_subsequent && octet & Self::MULTIBYTE_DATA_MASK == 0 {
                    xerr!(return Err(DecodeError::tag(
                        "high tag number not minimally encoded", pos
                    )))
                }
                first_subsequent = false;
                if number > (u32::MAX >> 7) {
                    xerr!(return Err(DecodeError::tag(
                        "tag number too large", pos
                    )))
                }
                number = (number << 7)
                    | u32::from(octet & Self::MULTIBYTE_DATA_MASK);
                if octet & Self::LAST_OCTET_MASK == 0 {
                    break
                }
            }
        }

        Ok(Ident {
            tag: Tag::new(class, number),
            constructed,
            header: Header::new(start, source.offset() - start),
        })
    }

    /// Returns the tag.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Returns the class of the tag.
    pub fn class(&self) -> Class {
        self.tag.class()
    }

    /// Returns the number of the tag.
    pub fn number(&self) -> u32 {
        self.tag.number()
    }

    /// Returns whether the value uses constructed encoding.
    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    /// Returns the offset and size of the identifier octets.
    pub fn header(&self) -> Header {
        self.header
    }
}


//============ Tests =========================================================
