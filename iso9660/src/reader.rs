//! Mounted image handle

use crate::directory::{self, path_table::PathTable, record::DirectoryRecord};
use crate::error::Result;
use crate::file;
use crate::source::ByteSource;
use crate::types::ReaderOptions;
use crate::volume::{self, PrimaryVolumeDescriptor};
use std::borrow::Cow;
use tracing::instrument;

#[cfg(feature = "mmap")]
use crate::source::MappedImage;
#[cfg(feature = "mmap")]
use std::path::Path;

/// A mounted ISO9660 image
///
/// The volume descriptor and path table are decoded once at construction
/// and never change afterwards; every lookup returns freshly decoded,
/// caller-owned records. All methods take `&self`, so a reader over a
/// `Sync` source can be shared between threads.
pub struct Reader<S: ByteSource> {
    source: S,
    volume: PrimaryVolumeDescriptor,
    path_table: PathTable,
    options: ReaderOptions,
}

impl<S: ByteSource> Reader<S> {
    /// Mount `source` with default options
    pub fn new(source: S) -> Result<Self> {
        Self::with_options(source, ReaderOptions::default())
    }

    /// Mount `source`
    ///
    /// On failure the source is dropped before the error is returned.
    #[instrument(skip_all, fields(rock_ridge = options.rock_ridge))]
    pub fn with_options(source: S, options: ReaderOptions) -> Result<Self> {
        let volume = volume::mount(&source, options.rock_ridge)?;
        let path_table = PathTable::build(
            &source,
            volume.type_l_path_table,
            volume.path_table_size,
            volume.logical_block_size,
        )?;
        tracing::debug!(image_len = source.len(), directories = path_table.len(), "reader ready");
        Ok(Self {
            source,
            volume,
            path_table,
            options,
        })
    }

    /// Entries of the directory at `path`, "." and ".." first
    ///
    /// `path` uses the names directory listings show (Rock Ridge names
    /// when enabled), e.g. `/dir2/dir3`. Components are compared as raw
    /// bytes, so a `&[u8]` path reaches names that are not valid UTF-8.
    pub fn read_dir(&self, path: impl AsRef<[u8]>) -> Result<Vec<DirectoryRecord>> {
        directory::read_dir(&self.source, &self.volume, path.as_ref(), &self.options)
    }

    /// Entries of a directory found through the path table
    ///
    /// `path` is an ISO-level path as returned by [`Reader::all_dirs`],
    /// e.g. `/DIR2/DIR3`.
    pub fn read_dir_indexed(&self, path: &str) -> Result<Vec<DirectoryRecord>> {
        directory::read_dir_indexed(&self.source, &self.volume, &self.path_table, path, &self.options)
    }

    /// Record for the file or directory at `path`
    pub fn entry(&self, path: impl AsRef<[u8]>) -> Result<DirectoryRecord> {
        directory::find_entry(&self.source, &self.volume, path.as_ref(), &self.options)
    }

    /// Whole content of the file at `path`
    pub fn read_file(&self, path: impl AsRef<[u8]>) -> Result<Cow<'_, [u8]>> {
        let record = self.entry(path)?;
        file::read_file(&self.source, &record, self.volume.logical_block_size)
    }

    /// Content of an already resolved record
    pub fn read_record(&self, record: &DirectoryRecord) -> Result<Cow<'_, [u8]>> {
        file::read_file(&self.source, record, self.volume.logical_block_size)
    }

    /// Full ISO-level path of every directory, root first, in path table order
    ///
    /// These are the names the path table stores, so they stay upper case
    /// and truncated on Rock Ridge volumes where [`Reader::read_dir`] shows
    /// the long names.
    pub fn all_dirs(&self) -> Vec<String> {
        self.path_table.all_dirs()
    }

    /// Primary volume descriptor
    pub fn volume(&self) -> &PrimaryVolumeDescriptor {
        &self.volume
    }

    /// Decoded path table
    pub fn path_table(&self) -> &PathTable {
        &self.path_table
    }

    /// Options this reader was built with
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Release the image
    pub fn close(self) {
        tracing::debug!("closing reader");
    }

    /// Hand the image back
    pub fn into_source(self) -> S {
        self.source
    }
}

#[cfg(feature = "mmap")]
impl Reader<MappedImage> {
    /// Map the image file at `path` and mount it
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, ReaderOptions::default())
    }

    /// Map the image file at `path` and mount it with `options`
    pub fn open_with(path: impl AsRef<Path>, options: ReaderOptions) -> Result<Self> {
        Self::with_options(MappedImage::open(path)?, options)
    }
}

impl<S: ByteSource> core::fmt::Debug for Reader<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Reader")
            .field("volume_id", &self.volume.volume_id.trimmed())
            .field("image_len", &self.source.len())
            .field("directories", &self.path_table.len())
            .field("options", &self.options)
            .finish()
    }
}
