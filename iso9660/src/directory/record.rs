//! Directory Record structure
//!
//! Directory records describe files and subdirectories.
//!
//! Layout (byte offsets within the record):
//!
//! | offset | size | field                                   |
//! |--------|------|-----------------------------------------|
//! | 0      | 1    | record length                           |
//! | 1      | 1    | extended attribute record length        |
//! | 2      | 8    | extent location (both-endian 32-bit)    |
//! | 10     | 8    | data length (both-endian 32-bit)        |
//! | 18     | 7    | recording date and time                 |
//! | 25     | 1    | file flags                              |
//! | 26     | 1    | file unit size (interleaved files)      |
//! | 27     | 1    | interleave gap size                     |
//! | 28     | 4    | volume sequence number (both-endian 16) |
//! | 32     | 1    | file identifier length                  |
//! | 33     | n    | file identifier                         |
//!
//! A padding byte follows an even-length identifier; the remaining bytes up
//! to the record length are the System Use area.

use crate::error::{Iso9660Error, Result};
use crate::extensions::rock_ridge;
use crate::types::FileFlags;
use crate::utils::datetime::RecordingTime;
use crate::utils::string::{decode_identifier, strip_version};
use crate::utils::{be32, le16, le32};

/// Size of the fixed part preceding the identifier
const FIXED_LENGTH: usize = 33;

/// Decoded directory record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRecord {
    /// Length of directory record
    pub length: u8,

    /// Extended attribute record length
    pub extended_attr_length: u8,

    /// Extent location (LBA)
    pub extent_lba: u32,

    /// Data length (bytes)
    pub data_length: u32,

    /// Recording date and time
    pub recorded_at: RecordingTime,

    /// File flags
    pub flags: FileFlags,

    /// File unit size (interleaved files)
    pub file_unit_size: u8,

    /// Interleave gap size
    pub interleave_gap: u8,

    /// Volume sequence number
    pub volume_sequence: u16,

    /// File identifier length as recorded
    pub identifier_length: u8,

    /// Effective name: the Rock Ridge name when present, otherwise the
    /// ISO identifier with its version suffix stripped. Invalid UTF-8 is
    /// replaced; lookups match [`DirectoryRecord::identifier_bytes`].
    pub identifier: String,

    /// Effective name exactly as recorded
    pub identifier_bytes: Vec<u8>,

    /// ISO identifier with its version suffix stripped
    pub iso_identifier: String,

    /// Alternate name from a Rock Ridge `NM` entry
    pub rock_ridge_name: Option<String>,
}

impl DirectoryRecord {
    /// Minimum record length
    pub const MIN_LENGTH: usize = 34;

    /// Identifier of the "." entry
    pub const SELF_ID: &'static str = "\u{0}";

    /// Identifier of the ".." entry
    pub const PARENT_ID: &'static str = "\u{1}";

    /// Decode the record starting at `offset` within `buffer`
    ///
    /// Returns `Ok(None)` for a zero length byte, which marks padding up to
    /// the end of the sector. With `rock_ridge` set, a non-empty `NM` name
    /// replaces the ISO identifier; a System Use area that fails to decode
    /// leaves the ISO identifier in place.
    pub fn decode(buffer: &[u8], offset: usize, rock_ridge: bool) -> Result<Option<Self>> {
        let invalid = |reason| Iso9660Error::InvalidDirectoryRecord { offset, reason };

        let length = *buffer.get(offset).ok_or_else(|| invalid("offset past end of extent"))?;
        if length == 0 {
            return Ok(None);
        }
        let record = buffer
            .get(offset..offset + usize::from(length))
            .ok_or_else(|| invalid("record overruns extent"))?;
        if record.len() < FIXED_LENGTH {
            return Err(invalid("record shorter than fixed header"));
        }

        let identifier_length = record[32];
        let id_end = FIXED_LENGTH + usize::from(identifier_length);
        if id_end > record.len() {
            return Err(invalid("identifier overruns record"));
        }

        let extent_lba = le32(record, 2);
        if extent_lba != be32(record, 6) {
            tracing::warn!(offset, extent_lba, "both-endian extent location mismatch");
        }
        let data_length = le32(record, 10);
        if data_length != be32(record, 14) {
            tracing::warn!(offset, data_length, "both-endian data length mismatch");
        }

        let mut datetime = [0u8; 7];
        datetime.copy_from_slice(&record[18..25]);

        let iso_bytes = strip_version(&record[FIXED_LENGTH..id_end]);
        let iso_identifier = decode_identifier(iso_bytes);

        let rock_ridge_bytes = if rock_ridge {
            Self::system_use(record, identifier_length).and_then(|area| {
                match rock_ridge::decode(area) {
                    Ok(rr) => rr.name().map(<[u8]>::to_vec),
                    Err(e) => {
                        tracing::warn!(offset, error = %e, name = %iso_identifier, "keeping ISO name");
                        None
                    }
                }
            })
        } else {
            None
        };

        let rock_ridge_name = rock_ridge_bytes.as_deref().map(decode_identifier);
        let identifier_bytes = rock_ridge_bytes.unwrap_or_else(|| iso_bytes.to_vec());
        let identifier = decode_identifier(&identifier_bytes);
        tracing::trace!(offset, length, extent_lba, data_length, name = %identifier, "directory record");

        Ok(Some(Self {
            length,
            extended_attr_length: record[1],
            extent_lba,
            data_length,
            recorded_at: RecordingTime::from_bytes(&datetime),
            flags: FileFlags::from_byte(record[25]),
            file_unit_size: record[26],
            interleave_gap: record[27],
            volume_sequence: le16(record, 28),
            identifier_length,
            identifier,
            identifier_bytes,
            iso_identifier,
            rock_ridge_name,
        }))
    }

    /// Bytes between the identifier (plus padding) and the record end
    fn system_use(record: &[u8], identifier_length: u8) -> Option<&[u8]> {
        let mut start = FIXED_LENGTH + usize::from(identifier_length);
        if identifier_length % 2 == 0 {
            start += 1;
        }
        record.get(start..).filter(|area| !area.is_empty())
    }

    /// The synthetic "." entry
    pub fn is_self(&self) -> bool {
        self.iso_identifier == Self::SELF_ID
    }

    /// The synthetic ".." entry
    pub fn is_parent(&self) -> bool {
        self.iso_identifier == Self::PARENT_ID
    }
}
