//! Sector alignment and calculation utilities

use crate::types::SECTOR_SIZE;

/// Convert sector number to byte offset
pub fn sector_to_byte(sector: u64) -> u64 {
    sector * SECTOR_SIZE as u64
}

/// Convert a logical block address to a byte offset
pub fn block_to_byte(lba: u32, block_size: u16) -> u64 {
    u64::from(lba) * u64::from(block_size)
}

/// Round an extent offset up to the next sector boundary
pub fn next_sector_boundary(offset: usize) -> usize {
    (offset / SECTOR_SIZE + 1) * SECTOR_SIZE
}

/// Calculate number of blocks needed for byte count
pub fn blocks_for_bytes(byte_count: u64, block_size: u64) -> u64 {
    byte_count.div_ceil(block_size)
}
