//! # Program Loader
//!
//! Places a program given as text of hexadecimal byte pairs into memory.
//! The input shape is whitespace-separated pairs:
//!
//! ```text
//! A2 0A 8E 00 00 A2 03 8E 01 00 AC 00 00 A9 00 18 6D 01 00 88 D0 FA
//! ```
//!
//! This is the exchange format the monitor consumes and the tests use to
//! set up programs; anything fancier (iNES images, listings with
//! addresses) is out of scope.

use crate::memory::Bus;

/// Errors from [`load_hex`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// A whitespace-separated token was not a two-digit hex byte.
    #[error("invalid hex byte {token:?} at index {index}")]
    InvalidByte {
        /// The offending token, verbatim.
        token: String,
        /// Zero-based index of the token within the input.
        index: usize,
    },
}

/// Parses `text` as whitespace-separated hex byte pairs and writes them to
/// `bus` starting at `origin` (wrapping past 0xFFFF). Returns the number of
/// bytes written.
///
/// # Errors
///
/// [`LoadError::InvalidByte`] on the first malformed token; bytes before it
/// have already been written.
///
/// # Examples
///
/// ```
/// use nes6502::{loader, Bus, FlatRam};
///
/// let mut ram = FlatRam::new();
/// let n = loader::load_hex(&mut ram, "A2 0A 8E 00 00", 0x8000).unwrap();
/// assert_eq!(n, 5);
/// assert_eq!(ram.read(0x8000), 0xA2);
/// assert_eq!(ram.read(0x8004), 0x00);
/// ```
pub fn load_hex<B: Bus>(bus: &mut B, text: &str, origin: u16) -> Result<u16, LoadError> {
    let mut count: u16 = 0;
    for (index, token) in text.split_whitespace().enumerate() {
        let byte = u8::from_str_radix(token, 16).map_err(|_| LoadError::InvalidByte {
            token: token.to_string(),
            index,
        })?;
        bus.write(origin.wrapping_add(count), byte);
        count = count.wrapping_add(1);
    }
    Ok(count)
}
