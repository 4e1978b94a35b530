//! Primary Volume Descriptor parsing
//!
//! The Primary Volume Descriptor (PVD) is always present and describes
//! the basic ISO9660 filesystem structure. Field offsets follow ECMA-119
//! 8.4 and are relative to the start of the 2048-byte sector.

use crate::directory::record::DirectoryRecord;
use crate::error::{Iso9660Error, Result};
use crate::types::SECTOR_SIZE;
use crate::utils::datetime::VolumeTime;
use crate::utils::string::PaddedText;
use crate::utils::{be32, le16, le32};

/// Primary Volume Descriptor (sector 16, type 1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryVolumeDescriptor {
    /// System identifier (32 a-characters)
    pub system_id: PaddedText,

    /// Volume identifier (32 d-characters)
    pub volume_id: PaddedText,

    /// Volume space size in logical blocks
    pub volume_space_size: u32,

    /// Volume set size
    pub volume_set_size: u16,

    /// Volume sequence number
    pub volume_sequence_number: u16,

    /// Logical block size (usually 2048)
    pub logical_block_size: u16,

    /// Path table size in bytes
    pub path_table_size: u32,

    /// Type L path table location
    pub type_l_path_table: u32,

    /// Optional type L path table location
    pub optional_type_l_path_table: u32,

    /// Type M path table location
    pub type_m_path_table: u32,

    /// Optional type M path table location
    pub optional_type_m_path_table: u32,

    /// Root directory record
    pub root: DirectoryRecord,

    /// Volume set identifier
    pub volume_set_id: PaddedText,

    /// Publisher identifier
    pub publisher_id: PaddedText,

    /// Data preparer identifier
    pub preparer_id: PaddedText,

    /// Application identifier
    pub application_id: PaddedText,

    /// Copyright file identifier
    pub copyright_file_id: PaddedText,

    /// Abstract file identifier
    pub abstract_file_id: PaddedText,

    /// Bibliographic file identifier
    pub bibliographic_file_id: PaddedText,

    /// Volume creation date
    pub created: Option<VolumeTime>,

    /// Volume modification date
    pub modified: Option<VolumeTime>,

    /// Volume expiration date
    pub expires: Option<VolumeTime>,

    /// Volume effective date
    pub effective: Option<VolumeTime>,

    /// File structure version (1)
    pub file_structure_version: u8,
}

/// Embedded root directory record
const ROOT_RECORD: core::ops::Range<usize> = 156..190;

/// Parse the body of a Primary Volume Descriptor
///
/// The header (type, signature, version) has already been validated by
/// [`mount`](super::mount).
pub fn parse(data: &[u8], rock_ridge: bool) -> Result<PrimaryVolumeDescriptor> {
    if data.len() < SECTOR_SIZE {
        return Err(Iso9660Error::OutOfBounds {
            offset: 0,
            len: SECTOR_SIZE as u64,
            size: data.len() as u64,
        });
    }

    let logical_block_size = both_endian16(data, 128, "logical block size");
    if !logical_block_size.is_power_of_two() || !(512..=2048).contains(&logical_block_size) {
        return Err(Iso9660Error::InvalidBlockSize(logical_block_size));
    }

    let root = DirectoryRecord::decode(&data[ROOT_RECORD], 0, rock_ridge)?.ok_or(
        Iso9660Error::InvalidDirectoryRecord {
            offset: ROOT_RECORD.start,
            reason: "empty root directory record",
        },
    )?;

    let text = |start: usize, end: usize| PaddedText::from_bytes(&data[start..end]);
    let date = |start: usize| {
        let mut raw = [0u8; 17];
        raw.copy_from_slice(&data[start..start + 17]);
        VolumeTime::from_bytes(&raw)
    };

    Ok(PrimaryVolumeDescriptor {
        system_id: text(8, 40),
        volume_id: text(40, 72),
        volume_space_size: both_endian32(data, 80, "volume space size"),
        volume_set_size: both_endian16(data, 120, "volume set size"),
        volume_sequence_number: both_endian16(data, 124, "volume sequence number"),
        logical_block_size,
        path_table_size: both_endian32(data, 132, "path table size"),
        type_l_path_table: le32(data, 140),
        optional_type_l_path_table: le32(data, 144),
        type_m_path_table: be32(data, 148),
        optional_type_m_path_table: be32(data, 152),
        root,
        volume_set_id: text(190, 318),
        publisher_id: text(318, 446),
        preparer_id: text(446, 574),
        application_id: text(574, 702),
        copyright_file_id: text(702, 739),
        abstract_file_id: text(739, 776),
        bibliographic_file_id: text(776, 813),
        created: date(813),
        modified: date(830),
        expires: date(847),
        effective: date(864),
        file_structure_version: data[881],
    })
}

/// Both-endian 16-bit value; the little-endian copy wins
fn both_endian16(data: &[u8], offset: usize, field: &'static str) -> u16 {
    let le = le16(data, offset);
    let be = u16::from_be_bytes([data[offset + 2], data[offset + 3]]);
    if le != be {
        tracing::warn!(field, le, be, "both-endian mismatch in volume descriptor");
    }
    le
}

/// Both-endian 32-bit value; the little-endian copy wins
fn both_endian32(data: &[u8], offset: usize, field: &'static str) -> u32 {
    let le = le32(data, offset);
    let be = be32(data, offset + 4);
    if le != be {
        tracing::warn!(field, le, be, "both-endian mismatch in volume descriptor");
    }
    le
}
