//! Random-access views over a disc image
//!
//! Every decoder asks for an explicit `[offset, offset + len)` window through
//! [`ByteSource::read_range`]. Implementations check the window against the
//! image length and fail with [`Iso9660Error::OutOfBounds`] instead of
//! slicing past the end.

pub mod block;
#[cfg(feature = "mmap")]
pub mod mapped;

use crate::error::{Iso9660Error, Result};
use std::borrow::Cow;

pub use block::BlockSource;
#[cfg(feature = "mmap")]
pub use mapped::MappedImage;

/// Read-only, byte-addressable disc image
pub trait ByteSource {
    /// Image length in bytes
    fn len(&self) -> u64;

    /// Borrow or copy exactly `len` bytes starting at `offset`
    fn read_range(&self, offset: u64, len: usize) -> Result<Cow<'_, [u8]>>;

    /// Image holds no bytes at all
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Validate a window against the image length, returning it as a `usize` range
pub(crate) fn check_range(offset: u64, len: usize, size: u64) -> Result<core::ops::Range<usize>> {
    let out_of_bounds = || Iso9660Error::OutOfBounds {
        offset,
        len: len as u64,
        size,
    };
    let end = offset.checked_add(len as u64).ok_or_else(out_of_bounds)?;
    if end > size {
        return Err(out_of_bounds());
    }
    let start = usize::try_from(offset).map_err(|_| out_of_bounds())?;
    let end = usize::try_from(end).map_err(|_| out_of_bounds())?;
    Ok(start..end)
}

fn slice_range(bytes: &[u8], offset: u64, len: usize) -> Result<Cow<'_, [u8]>> {
    let range = check_range(offset, len, bytes.len() as u64)?;
    Ok(Cow::Borrowed(&bytes[range]))
}

impl ByteSource for Vec<u8> {
    fn len(&self) -> u64 {
        self.as_slice().len() as u64
    }

    fn read_range(&self, offset: u64, len: usize) -> Result<Cow<'_, [u8]>> {
        slice_range(self, offset, len)
    }
}

impl ByteSource for &[u8] {
    fn len(&self) -> u64 {
        <[u8]>::len(self) as u64
    }

    fn read_range(&self, offset: u64, len: usize) -> Result<Cow<'_, [u8]>> {
        slice_range(self, offset, len)
    }
}
