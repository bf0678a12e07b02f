//! Macros for last-resort debugging.
//!
//! Error reporting of the decoder is deliberately compact: an error kind, a
//! message and the position in the input. When that isn’t enough to figure
//! out which check fired, build with the `extra-debug` feature. The macro
//! `xerr!()` then logs the source location where an error was produced
//! at debug level through the `log` facade before resolving into whatever
//! the expression it encloses resolves to otherwise. Use it whenever you
//! initially produce an error, i.e.:
//!
//! ```rust,ignore
//! if foo {
//!     xerr!(return Err(DecodeError::value("bad foo", pos)))
//! }
//! ```

#[cfg(feature = "extra-debug")]
#[doc(hidden)]
pub fn error_site(file: &'static str, line: u32) {
    log::debug!("decode error raised at {}:{}", file, line);
}

#[cfg(feature = "extra-debug")]
#[macro_export]
macro_rules! xerr {
    ($test:expr) => {{
        $crate::debug::error_site(file!(), line!());
        $test
    }}
}

#[cfg(not(feature = "extra-debug"))]
#[macro_export]
macro_rules! xerr {
    ($test:expr) => { $test };
}
