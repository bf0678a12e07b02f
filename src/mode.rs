//! The decoding mode.

use std::fmt;


//------------ Mode ----------------------------------------------------------

/// The encoding rules the decoder enforces.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Mode {
    /// Basic Encoding Rules.
    ///
    /// These are the most flexible rules, allowing alternative encodings
    /// for the length octets as well as indefinite length values.
    #[default]
    Ber,

    /// Distinguished Encoding Rules.
    ///
    /// These rules always employ definite length values and require the
    /// shortest possible encoding of the length octets.
    Der,
}

impl Mode {
    /// Returns whether the mode restricts the encodings BER permits.
    ///
    /// Restricted modes require definite length values with the length
    /// octets in their shortest form.
    pub fn is_restricted(self) -> bool {
        matches!(self, Mode::Der)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Mode::Ber => "BER",
            Mode::Der => "DER",
        })
    }
}


//============ Tests =========================================================
