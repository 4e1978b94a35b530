//! Byte-level helpers shared by the decoders

pub mod datetime;
pub mod sector;
pub mod string;

/// Little-endian `u16` at `offset`
///
/// Callers guarantee `offset + 2 <= buf.len()`.
#[inline]
pub(crate) fn le16(buf: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([buf[offset], buf[offset + 1]])
}

/// Little-endian `u32` at `offset`
///
/// Callers guarantee `offset + 4 <= buf.len()`.
#[inline]
pub(crate) fn le32(buf: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([buf[offset], buf[offset + 1], buf[offset + 2], buf[offset + 3]])
}

/// Big-endian `u32` at `offset`
#[inline]
pub(crate) fn be32(buf: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([buf[offset], buf[offset + 1], buf[offset + 2], buf[offset + 3]])
}
