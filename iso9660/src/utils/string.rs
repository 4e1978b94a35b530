//! String handling utilities
//!
//! ISO9660 uses various string encodings: ASCII, d-characters, a-characters.

use std::fmt;

/// Decode identifier bytes, replacing invalid UTF-8
///
/// The self/parent identifiers (0x00 and 0x01) come through unchanged.
pub fn decode_identifier(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Strip a single-digit version suffix (e.g., `FILE.TXT;1` -> `FILE.TXT`)
///
/// Works on raw identifier bytes. Names without a `;<digit>` tail are
/// returned as-is.
pub fn strip_version(name: &[u8]) -> &[u8] {
    match name {
        [stem @ .., b';', digit] if !stem.is_empty() && digit.is_ascii_digit() => stem,
        _ => name,
    }
}

/// Fixed-width, space-padded text field from a volume descriptor
///
/// The raw value (padding included) is what the descriptor holds; call
/// [`PaddedText::trimmed`] for the display form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaddedText(String);

impl PaddedText {
    /// Decode a fixed-width field
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Field contents including padding
    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Field contents without trailing spaces
    pub fn trimmed(&self) -> &str {
        self.0.trim_end_matches(' ')
    }

    /// Field holds nothing but padding
    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }
}

impl fmt::Display for PaddedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
