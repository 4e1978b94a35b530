//! ISO9660 Filesystem Reader
//!
//! A read-only reader for single-volume ISO9660 images with Rock Ridge
//! alternate names.
//!
//! # Overview
//!
//! This crate provides:
//! - Primary Volume Descriptor parsing and validation
//! - Directory record decoding, with Rock Ridge `NM` names replacing the
//!   truncated ISO identifiers
//! - Path table decoding with full path reconstruction
//! - Path resolution by recursive descent or by path table lookup
//! - Whole-file reads, zero-copy for mapped and in-memory images
//!
//! # Architecture
//!
//! The implementation is layered:
//! 1. **Source layer** - bounds-checked byte ranges over a mapped file, a
//!    buffer or a block device
//! 2. **Volume layer** - parses the descriptor in sector 16
//! 3. **Directory layer** - navigates directory records and the path table
//! 4. **File layer** - reads file data from extents
//!
//! # Usage
//!
//! ```no_run
//! use iso9660::Reader;
//!
//! let reader = Reader::open("image.iso")?;
//! for entry in reader.read_dir("/dir2")? {
//!     println!("{} ({} bytes)", entry.name(), entry.size());
//! }
//! let content = reader.read_file("/dir2/dir3/file7.txt")?;
//! println!("{}", String::from_utf8_lossy(&content));
//! # Ok::<(), iso9660::Iso9660Error>(())
//! ```
//!
//! # Names
//!
//! [`Reader::read_dir`] and [`Reader::read_file`] match paths against the
//! names directory records decode to (Rock Ridge names when present).
//! [`Reader::all_dirs`] and [`Reader::read_dir_indexed`] use the path table,
//! which only stores ISO-level names, so `/dir2/dir3` in the former is
//! `/DIR2/DIR3` in the latter.

#![warn(missing_docs)]

pub mod directory;
pub mod error;
pub mod extensions;
pub mod file;
pub mod reader;
pub mod source;
pub mod types;
pub mod utils;
pub mod volume;

pub use directory::path_table::{PathTable, PathTableEntry};
pub use directory::record::DirectoryRecord;
pub use error::{Iso9660Error, Result};
pub use reader::Reader;
pub use source::{BlockSource, ByteSource};
pub use types::{FileFlags, ReaderOptions};
pub use volume::{mount, PrimaryVolumeDescriptor};

#[cfg(feature = "mmap")]
pub use source::MappedImage;

/// Map the image file at `path` and mount it
#[cfg(feature = "mmap")]
pub fn open(path: impl AsRef<std::path::Path>) -> Result<Reader<MappedImage>> {
    Reader::open(path)
}

/// Map the image file at `path` and mount it with `options`
#[cfg(feature = "mmap")]
pub fn open_with(
    path: impl AsRef<std::path::Path>,
    options: ReaderOptions,
) -> Result<Reader<MappedImage>> {
    Reader::open_with(path, options)
}
