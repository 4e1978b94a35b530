//! Directory record parsing and navigation
//!
//! Two ways to reach a directory:
//! - [`read_dir`] descends from the root through directory extents, matching
//!   each component against the decoded (Rock Ridge when present) names.
//! - [`read_dir_indexed`] looks the directory up in the path table, which
//!   only knows ISO-level names.
//!
//! Matching is exact and case-sensitive, byte for byte against
//! [`DirectoryRecord::identifier_bytes`], so names that are not valid UTF-8
//! stay reachable.

pub mod flags;
pub mod iterator;
pub mod path_table;
pub mod record;

use crate::error::{Iso9660Error, Result};
use crate::file::{extent::Extent, read_extent};
use crate::source::ByteSource;
use crate::types::ReaderOptions;
use crate::volume::PrimaryVolumeDescriptor;
use iterator::DirectoryIterator;
use path_table::PathTable;
use record::DirectoryRecord;

fn trim_trailing_slashes(mut path: &[u8]) -> &[u8] {
    while let [rest @ .., b'/'] = path {
        path = rest;
    }
    path
}

/// Root spellings accepted by lookups
fn is_root(path: &[u8]) -> bool {
    matches!(trim_trailing_slashes(path), b"" | b"." | b"\\")
}

/// Split off the final component: `"/a/b/c"` -> `("/a/b", "c")`
fn split_path(path: &[u8]) -> (&[u8], &[u8]) {
    let trimmed = trim_trailing_slashes(path);
    match trimmed.iter().rposition(|&b| b == b'/') {
        Some(i) => (&trimmed[..i], &trimmed[i + 1..]),
        None => (&trimmed[..0], trimmed),
    }
}

/// Path as shown in errors
fn display(path: &[u8]) -> String {
    String::from_utf8_lossy(path).into_owned()
}

fn check_depth(path: &[u8], options: &ReaderOptions) -> Result<()> {
    let depth = path.split(|&b| b == b'/').filter(|c| !c.is_empty()).count();
    if depth > options.max_depth {
        return Err(Iso9660Error::PathTooDeep(display(path)));
    }
    Ok(())
}

/// Decode every record of a directory extent, "." and ".." included
pub fn list_extent<S: ByteSource>(
    source: &S,
    volume: &PrimaryVolumeDescriptor,
    extent: Extent,
    options: &ReaderOptions,
) -> Result<Vec<DirectoryRecord>> {
    let bytes = read_extent(source, extent, volume.logical_block_size)?;
    let records = DirectoryIterator::new(&bytes, options.rock_ridge).collect::<Result<Vec<_>>>()?;
    tracing::debug!(lba = extent.lba, length = extent.length, entries = records.len(), "directory decoded");
    Ok(records)
}

/// List the directory at `path` by descending from the root
pub fn read_dir<S: ByteSource>(
    source: &S,
    volume: &PrimaryVolumeDescriptor,
    path: &[u8],
    options: &ReaderOptions,
) -> Result<Vec<DirectoryRecord>> {
    check_depth(path, options)?;
    descend(source, volume, path, options)
}

fn descend<S: ByteSource>(
    source: &S,
    volume: &PrimaryVolumeDescriptor,
    path: &[u8],
    options: &ReaderOptions,
) -> Result<Vec<DirectoryRecord>> {
    if is_root(path) {
        return list_extent(source, volume, volume.root.extent(), options);
    }

    let (parent, base) = split_path(path);
    let dir = descend(source, volume, parent, options)?
        .into_iter()
        .find(|r| r.identifier_bytes == base)
        .ok_or_else(|| Iso9660Error::DirNotFound(display(path)))?;
    if !dir.is_directory() {
        return Err(Iso9660Error::NotADirectory(display(path)));
    }
    list_extent(source, volume, dir.extent(), options)
}

/// Find the record for a file or directory
///
/// The root resolves to the volume's root record. A missing parent
/// directory surfaces as [`Iso9660Error::DirNotFound`], a missing final
/// component as [`Iso9660Error::NotFound`].
pub fn find_entry<S: ByteSource>(
    source: &S,
    volume: &PrimaryVolumeDescriptor,
    path: &[u8],
    options: &ReaderOptions,
) -> Result<DirectoryRecord> {
    if is_root(path) {
        return Ok(volume.root.clone());
    }
    check_depth(path, options)?;

    let (parent, base) = split_path(path);
    descend(source, volume, parent, options)?
        .into_iter()
        .find(|r| r.identifier_bytes == base)
        .ok_or_else(|| Iso9660Error::NotFound(display(path)))
}

/// List a directory located through the path table
///
/// `path` is an ISO-level full path as produced by
/// [`PathTable::all_dirs`]. The extent length comes from the directory's
/// own "." record, since the path table only stores the location.
pub fn read_dir_indexed<S: ByteSource>(
    source: &S,
    volume: &PrimaryVolumeDescriptor,
    table: &PathTable,
    path: &str,
    options: &ReaderOptions,
) -> Result<Vec<DirectoryRecord>> {
    let entry = table
        .find(path)
        .ok_or_else(|| Iso9660Error::DirNotFound(path.to_owned()))?;

    let head = read_extent(
        source,
        Extent::new(entry.extent_lba, u32::from(volume.logical_block_size)),
        volume.logical_block_size,
    )?;
    let this = DirectoryRecord::decode(&head, 0, false)?
        .filter(DirectoryRecord::is_self)
        .ok_or(Iso9660Error::InvalidDirectoryRecord {
            offset: 0,
            reason: "directory extent does not start with its self entry",
        })?;

    list_extent(source, volume, Extent::new(entry.extent_lba, this.data_length), options)
}
