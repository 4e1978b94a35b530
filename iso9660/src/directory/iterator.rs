//! Directory iteration
//!
//! Walks the records packed into a directory extent. Records never straddle
//! a sector; the unused tail of a sector is zero filled, so a zero length
//! byte means "continue at the next sector".

use crate::directory::record::DirectoryRecord;
use crate::error::Result;
use crate::utils::sector::next_sector_boundary;

/// Directory iterator over an in-memory extent
///
/// Yields every record in on-disk order, including the "." and ".."
/// entries. The iterator is `Clone`, so a walk can be restarted from any
/// point. After the first decode error it yields nothing more.
///
/// A zero length byte skips to the next sector rather than ending the walk,
/// as ECMA-119 requires for directories spanning several sectors.
#[derive(Debug, Clone)]
pub struct DirectoryIterator<'a> {
    extent: &'a [u8],
    offset: usize,
    rock_ridge: bool,
    failed: bool,
}

impl<'a> DirectoryIterator<'a> {
    /// Create a new directory iterator
    ///
    /// `extent` holds exactly the directory's data length.
    pub fn new(extent: &'a [u8], rock_ridge: bool) -> Self {
        Self {
            extent,
            offset: 0,
            rock_ridge,
            failed: false,
        }
    }

    /// Byte offset of the next record within the extent
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl<'a> Iterator for DirectoryIterator<'a> {
    type Item = Result<DirectoryRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.failed && self.offset < self.extent.len() {
            match DirectoryRecord::decode(self.extent, self.offset, self.rock_ridge) {
                Ok(Some(record)) => {
                    self.offset += usize::from(record.length);
                    return Some(Ok(record));
                }
                Ok(None) => self.offset = next_sector_boundary(self.offset),
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}
