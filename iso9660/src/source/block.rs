//! Block device backed images
//!
//! Adapts any [`gpt_disk_io::BlockIo`] device (partitions, chunked storage,
//! in-memory test devices) to byte-range reads. Unaligned windows are served
//! by reading the covering blocks and copying the requested slice out.

use super::{check_range, ByteSource};
use crate::error::{Iso9660Error, Result};
use crate::utils::sector::blocks_for_bytes;
use gpt_disk_io::BlockIo;
use gpt_disk_types::Lba;
use std::borrow::Cow;
use std::sync::Mutex;

/// Byte source over a block device
///
/// The device is locked per read so a [`Reader`](crate::Reader) can share it
/// across threads.
pub struct BlockSource<B: BlockIo> {
    device: Mutex<B>,
    start_block: u64,
    block_size: u64,
    len: u64,
}

impl<B: BlockIo> BlockSource<B> {
    /// Wrap a device, starting the image at `start_block`
    ///
    /// `start_block` is in device blocks, so an ISO stored inside a
    /// partition can be addressed without copying it out.
    pub fn new(mut device: B, start_block: u64) -> Result<Self> {
        let block_size = device.block_size().to_u64();
        let num_blocks = device
            .num_blocks()
            .map_err(|e| Iso9660Error::Device(e.to_string()))?;
        let len = num_blocks.saturating_sub(start_block) * block_size;
        tracing::debug!(block_size, num_blocks, start_block, "wrapped block device");
        Ok(Self {
            device: Mutex::new(device),
            start_block,
            block_size,
            len,
        })
    }

    /// Give the device back
    pub fn into_inner(self) -> B {
        self.device
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<B: BlockIo> ByteSource for BlockSource<B> {
    fn len(&self) -> u64 {
        self.len
    }

    fn read_range(&self, offset: u64, len: usize) -> Result<Cow<'_, [u8]>> {
        check_range(offset, len, self.len)?;
        if len == 0 {
            return Ok(Cow::Owned(Vec::new()));
        }

        let first_block = offset / self.block_size;
        let skip = (offset % self.block_size) as usize;
        let block_count = blocks_for_bytes(skip as u64 + len as u64, self.block_size);
        let mut buffer = vec![0u8; (block_count * self.block_size) as usize];

        let mut device = self
            .device
            .lock()
            .map_err(|_| Iso9660Error::Device("block device lock poisoned".into()))?;
        device
            .read_blocks(Lba(self.start_block + first_block), &mut buffer)
            .map_err(|e| Iso9660Error::Device(e.to_string()))?;
        drop(device);

        buffer.truncate(skip + len);
        buffer.drain(..skip);
        Ok(Cow::Owned(buffer))
    }
}
