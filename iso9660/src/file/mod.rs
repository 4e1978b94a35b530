//! File reading and extent management
//!
//! A file's content is the single extent its directory record points at;
//! it is always returned whole.

pub mod extent;
pub mod metadata;

use crate::directory::record::DirectoryRecord;
use crate::error::Result;
use crate::source::ByteSource;
use extent::Extent;
use std::borrow::Cow;

/// Read exactly `extent.length` bytes starting at `extent.lba * block_size`
///
/// Borrowed for in-memory and mapped sources, owned for block devices.
pub fn read_extent<S: ByteSource>(
    source: &S,
    extent: Extent,
    block_size: u16,
) -> Result<Cow<'_, [u8]>> {
    tracing::trace!(lba = extent.lba, length = extent.length, "reading extent");
    source.read_range(extent.byte_offset(block_size), extent.length as usize)
}

/// Read file contents
///
/// Directories are not rejected; their raw extent is returned.
pub fn read_file<'a, S: ByteSource>(
    source: &'a S,
    record: &DirectoryRecord,
    block_size: u16,
) -> Result<Cow<'a, [u8]>> {
    read_extent(source, record.extent(), block_size)
}
