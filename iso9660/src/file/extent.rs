//! File extent management
//!
//! Extents represent contiguous data regions on disk.

use crate::directory::record::DirectoryRecord;
use crate::utils::sector::{block_to_byte, blocks_for_bytes};

/// File extent (contiguous data region)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    /// Starting LBA
    pub lba: u32,

    /// Length in bytes
    pub length: u32,
}

impl Extent {
    /// Create new extent
    pub fn new(lba: u32, length: u32) -> Self {
        Self { lba, length }
    }

    /// Absolute byte offset of the first byte
    pub fn byte_offset(&self, block_size: u16) -> u64 {
        block_to_byte(self.lba, block_size)
    }

    /// Number of logical blocks covered
    pub fn block_count(&self, block_size: u16) -> u64 {
        blocks_for_bytes(u64::from(self.length), u64::from(block_size))
    }

    /// End LBA (exclusive)
    pub fn end_lba(&self, block_size: u16) -> u64 {
        u64::from(self.lba) + self.block_count(block_size)
    }
}

impl From<&DirectoryRecord> for Extent {
    fn from(record: &DirectoryRecord) -> Self {
        Self::new(record.extent_lba, record.data_length)
    }
}
