//! Common test utilities: image builder and an in-memory block device
#![allow(dead_code)]

pub mod builder;
pub use builder::IsoBuilder;

use gpt_disk_io::BlockIo;
use gpt_disk_types::{BlockSize, Lba};
use iso9660::Reader;
use std::io;

/// In-memory block device for testing
#[derive(Debug, Clone)]
pub struct MemoryBlockDevice {
    pub data: Vec<u8>,
    pub block_size: usize,
    pub reads: usize,
}

impl MemoryBlockDevice {
    /// Create a new memory block device from raw data
    pub fn new(data: Vec<u8>) -> Self {
        Self::with_block_size(data, 2048)
    }

    /// Device with a non-default block size; data is zero padded to whole blocks
    pub fn with_block_size(mut data: Vec<u8>, block_size: usize) -> Self {
        let blocks = data.len().div_ceil(block_size);
        data.resize(blocks * block_size, 0);
        Self {
            data,
            block_size,
            reads: 0,
        }
    }

    /// Place `image` after `blocks` blocks of unrelated data
    pub fn with_leading_blocks(image: &[u8], blocks: usize, block_size: usize) -> Self {
        let mut data = vec![0xA5u8; blocks * block_size];
        data.extend_from_slice(image);
        Self::with_block_size(data, block_size)
    }
}

impl BlockIo for MemoryBlockDevice {
    type Error = io::Error;

    fn block_size(&self) -> BlockSize {
        BlockSize::new(self.block_size as u32).expect("valid block size")
    }

    fn num_blocks(&mut self) -> Result<u64, Self::Error> {
        Ok((self.data.len() / self.block_size) as u64)
    }

    fn read_blocks(&mut self, start_lba: Lba, dst: &mut [u8]) -> Result<(), Self::Error> {
        let offset = start_lba.0 as usize * self.block_size;
        if offset + dst.len() > self.data.len() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "read beyond end of device",
            ));
        }
        dst.copy_from_slice(&self.data[offset..offset + dst.len()]);
        self.reads += 1;
        Ok(())
    }

    fn write_blocks(&mut self, _start_lba: Lba, _src: &[u8]) -> Result<(), Self::Error> {
        Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "read-only test device",
        ))
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Mount the standard fixture from memory
pub fn fixture_reader() -> Reader<Vec<u8>> {
    Reader::new(IsoBuilder::fixture().build()).expect("fixture mounts")
}

/// Identifiers of a listing, in order
pub fn identifiers(entries: &[iso9660::DirectoryRecord]) -> Vec<&str> {
    entries.iter().map(|e| e.identifier.as_str()).collect()
}
