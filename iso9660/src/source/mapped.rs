//! Memory-mapped image files

use super::{slice_range, ByteSource};
use crate::error::{Iso9660Error, Result};
use memmap2::Mmap;
use std::borrow::Cow;
use std::fs::File;
use std::path::Path;

/// Read-only memory map of an image file
///
/// The file handle is only held while mapping; the map itself is released
/// when the value is dropped.
#[derive(Debug)]
pub struct MappedImage {
    map: Mmap,
}

impl MappedImage {
    /// Open and map `path` read-only
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let open_err = |source| Iso9660Error::Open {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(open_err)?;
        // SAFETY: the map is read-only; the image is expected not to be
        // truncated by another process while the reader is alive.
        let map = unsafe { Mmap::map(&file) }.map_err(open_err)?;
        tracing::debug!(path = %path.display(), len = map.len(), "mapped iso image");
        Ok(Self { map })
    }
}

impl ByteSource for MappedImage {
    fn len(&self) -> u64 {
        self.map.len() as u64
    }

    fn read_range(&self, offset: u64, len: usize) -> Result<Cow<'_, [u8]>> {
        slice_range(&self.map, offset, len)
    }
}
