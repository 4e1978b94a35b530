//! Path Table parsing (fast directory lookup)
//!
//! The type L path table lists every directory once, parents before
//! children, each record pointing at its parent by 1-based index:
//!
//! | offset | size | field                              |
//! |--------|------|------------------------------------|
//! | 0      | 1    | directory identifier length        |
//! | 1      | 1    | extended attribute record length   |
//! | 2      | 4    | extent location (LE)               |
//! | 6      | 2    | parent directory number (LE)       |
//! | 8      | n    | directory identifier               |
//!
//! followed by a padding byte when `n` is odd.
//!
//! Path table records carry no System Use area, so the names (and full
//! paths) here are always the ISO-level identifiers, e.g. `/DIR2/DIR3`,
//! even on Rock Ridge volumes where directory listings show `dir2/dir3`.

use crate::error::{Iso9660Error, Result};
use crate::source::ByteSource;
use crate::utils::sector::block_to_byte;
use crate::utils::string::decode_identifier;
use crate::utils::{le16, le32};

/// Size of the fixed part preceding the identifier
const HEADER_LEN: usize = 8;

/// One directory listed in the path table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTableEntry {
    /// ISO-level directory identifier ("\0" for the root)
    pub name: String,

    /// Extent location (LBA)
    pub extent_lba: u32,

    /// Extended attribute record length
    pub extended_attr_length: u8,

    /// 1-based index of the parent entry
    pub parent_index: u16,

    /// Absolute path built from the parent chain
    pub full_path: String,
}

/// Decoded path table, in on-disk order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTable {
    entries: Vec<PathTableEntry>,
}

impl PathTable {
    /// Read `size` bytes at `location` and decode them
    pub fn build<S: ByteSource>(
        source: &S,
        location: u32,
        size: u32,
        block_size: u16,
    ) -> Result<Self> {
        let bytes = source.read_range(block_to_byte(location, block_size), size as usize)?;
        let table = Self::parse(&bytes)?;
        tracing::debug!(location, size, directories = table.len(), "path table decoded");
        Ok(table)
    }

    /// Decode a complete path table
    ///
    /// Stops at a zero length byte or at the end of `bytes`. The first entry
    /// is the root (`/`); each later entry must name an already decoded parent.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut entries: Vec<PathTableEntry> = Vec::new();
        let mut offset = 0usize;

        while offset < bytes.len() && bytes[offset] != 0 {
            let invalid = |reason| Iso9660Error::InvalidPathTable { offset, reason };

            let name_len = usize::from(bytes[offset]);
            let header = bytes
                .get(offset..offset + HEADER_LEN)
                .ok_or_else(|| invalid("record header overruns table"))?;
            let name_bytes = bytes
                .get(offset + HEADER_LEN..offset + HEADER_LEN + name_len)
                .ok_or_else(|| invalid("identifier overruns table"))?;

            let extended_attr_length = header[1];
            let extent_lba = le32(header, 2);
            let parent_index = le16(header, 6);
            let name = decode_identifier(name_bytes);

            let full_path = if entries.is_empty() {
                String::from("/")
            } else {
                let parent = usize::from(parent_index)
                    .checked_sub(1)
                    .and_then(|i| entries.get(i))
                    .ok_or_else(|| invalid("parent index does not precede entry"))?;
                join(&parent.full_path, &name)
            };

            tracing::trace!(offset, extent_lba, parent_index, path = %full_path, "path table record");
            entries.push(PathTableEntry {
                name,
                extent_lba,
                extended_attr_length,
                parent_index,
                full_path,
            });

            offset += HEADER_LEN + name_len + (name_len & 1);
        }

        Ok(Self { entries })
    }

    /// Full path of every directory, root first, in table order
    pub fn all_dirs(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.full_path.clone()).collect()
    }

    /// Entry whose full path equals `path` (case-sensitive)
    ///
    /// A trailing `/` is ignored; `""` and `"/"` name the root.
    pub fn find(&self, path: &str) -> Option<&PathTableEntry> {
        let trimmed = path.trim_end_matches('/');
        let wanted = if trimmed.is_empty() { "/" } else { trimmed };
        self.entries.iter().find(|e| e.full_path == wanted)
    }

    /// Entry by 1-based directory number
    pub fn get(&self, index: u16) -> Option<&PathTableEntry> {
        usize::from(index).checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Entries in table order
    pub fn iter(&self) -> core::slice::Iter<'_, PathTableEntry> {
        self.entries.iter()
    }

    /// Number of directories
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Table holds no directories
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a PathTable {
    type Item = &'a PathTableEntry;
    type IntoIter = core::slice::Iter<'a, PathTableEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn join(parent: &str, name: &str) -> String {
    if parent == "/" {
        format!("/{name}")
    } else {
        format!("{parent}/{name}")
    }
}
