//! Error types for ISO9660 operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type for ISO9660 operations
pub type Result<T> = core::result::Result<T, Iso9660Error>;

/// Errors that can occur during ISO9660 operations
#[derive(Debug, Error)]
pub enum Iso9660Error {
    /// Backing image could not be opened or mapped
    #[error("opening {} as mapped iso file: {source}", path.display())]
    Open {
        /// Image path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Block device read failed
    #[error("block device error: {0}")]
    Device(String),

    /// Sector 16 holds the set terminator
    #[error("no volumes found in iso")]
    NoVolumes,

    /// Sector 16 is not a primary volume descriptor
    #[error("expected volume type of 1 (primary): {0}")]
    UnexpectedDescriptorType(u8),

    /// Descriptor version is not 1
    #[error("expected volume version of 1: {0}")]
    UnsupportedVersion(u8),

    /// Standard identifier is not "CD001"
    #[error("expected volume id of CD001: {0}")]
    InvalidSignature(String),

    /// Sector 17 is not the set terminator
    #[error("expected to only find one volume")]
    MultipleVolumes,

    /// Logical block size is unusable
    #[error("invalid logical block size {0}")]
    InvalidBlockSize(u16),

    /// Requested byte range lies outside the image
    #[error("range {offset}+{len} exceeds image size {size}")]
    OutOfBounds {
        /// Absolute start offset
        offset: u64,
        /// Requested length
        len: u64,
        /// Image length
        size: u64,
    },

    /// Corrupted directory record
    #[error("invalid directory record at offset {offset}: {reason}")]
    InvalidDirectoryRecord {
        /// Offset within the extent
        offset: usize,
        /// What was wrong
        reason: &'static str,
    },

    /// Corrupted path table record
    #[error("invalid path table record at offset {offset}: {reason}")]
    InvalidPathTable {
        /// Offset within the path table
        offset: usize,
        /// What was wrong
        reason: &'static str,
    },

    /// SUSP entry carries a version other than 1
    #[error("expected version == 1 in SUSP record {signature}: {version}")]
    TruncatedRecord {
        /// Two character entry signature
        signature: String,
        /// Version byte found
        version: u8,
    },

    /// SUSP entry length is zero or runs past the system use area
    #[error("malformed SUSP entry at offset {offset}")]
    InvalidSuspEntry {
        /// Offset within the system use area
        offset: usize,
    },

    /// Directory lookup failed
    #[error("dir not found: {0}")]
    DirNotFound(String),

    /// File or directory lookup failed
    #[error("not found: {0}")]
    NotFound(String),

    /// Path component resolved to a file where a directory was needed
    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// Path nests deeper than the configured limit
    #[error("path exceeds maximum depth: {0}")]
    PathTooDeep(String),
}

impl Iso9660Error {
    /// Image structure is damaged or unsupported
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            Self::Device(_)
                | Self::NoVolumes
                | Self::UnexpectedDescriptorType(_)
                | Self::UnsupportedVersion(_)
                | Self::InvalidSignature(_)
                | Self::MultipleVolumes
                | Self::InvalidBlockSize(_)
                | Self::OutOfBounds { .. }
                | Self::InvalidDirectoryRecord { .. }
                | Self::InvalidPathTable { .. }
        )
    }

    /// Lookup failure local to a single call
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::DirNotFound(_) | Self::NotFound(_) | Self::NotADirectory(_) | Self::PathTooDeep(_)
        )
    }
}
