//! Volume descriptor parsing
//!
//! ISO9660 volume descriptors start at sector 16 and describe the filesystem
//! layout. This reader accepts exactly one layout: a Primary Volume
//! Descriptor in sector 16 followed directly by the set terminator in
//! sector 17.

pub mod primary;

use crate::error::{Iso9660Error, Result};
use crate::source::ByteSource;
use crate::types::{VolumeDescriptorType, SECTOR_SIZE, STANDARD_IDENTIFIER, VOLUME_DESCRIPTOR_START};
use crate::utils::sector::sector_to_byte;
use tracing::instrument;

pub use primary::PrimaryVolumeDescriptor;

/// Volume Descriptor header (first 7 bytes of each descriptor)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeDescriptorHeader {
    /// Type code (0=boot, 1=primary, 2=supplementary, 255=terminator)
    pub type_code: u8,

    /// Standard identifier "CD001"
    pub identifier: [u8; 5],

    /// Version (always 1)
    pub version: u8,
}

impl VolumeDescriptorHeader {
    /// Split the header off a descriptor sector
    pub fn from_bytes(sector: &[u8]) -> Option<Self> {
        let header = sector.get(..7)?;
        let mut identifier = [0u8; 5];
        identifier.copy_from_slice(&header[1..6]);
        Some(Self {
            type_code: header[0],
            identifier,
            version: header[6],
        })
    }

    /// Decoded type code, if it is one ECMA-119 defines
    pub fn kind(&self) -> Option<VolumeDescriptorType> {
        VolumeDescriptorType::from_byte(self.type_code)
    }
}

/// Read a whole descriptor sector and split off its header
fn read_descriptor<S: ByteSource>(
    source: &S,
    sector: u64,
) -> Result<(std::borrow::Cow<'_, [u8]>, VolumeDescriptorHeader)> {
    let bytes = source.read_range(sector_to_byte(sector), SECTOR_SIZE)?;
    let header = VolumeDescriptorHeader::from_bytes(&bytes).ok_or(Iso9660Error::OutOfBounds {
        offset: sector_to_byte(sector),
        len: SECTOR_SIZE as u64,
        size: source.len(),
    })?;
    Ok((bytes, header))
}

/// Mount an ISO9660 volume
///
/// Validates the Primary Volume Descriptor in sector 16 and requires the
/// set terminator in sector 17. Checks run in this order: terminator where
/// the primary should be, wrong type, wrong version, wrong signature, then
/// a second descriptor where the terminator should be.
#[instrument(skip_all)]
pub fn mount<S: ByteSource>(source: &S, rock_ridge: bool) -> Result<PrimaryVolumeDescriptor> {
    let (sector, header) = read_descriptor(source, VOLUME_DESCRIPTOR_START)?;

    match header.kind() {
        Some(VolumeDescriptorType::Primary) => {}
        Some(VolumeDescriptorType::Terminator) => return Err(Iso9660Error::NoVolumes),
        _ => return Err(Iso9660Error::UnexpectedDescriptorType(header.type_code)),
    }
    if header.version != 1 {
        return Err(Iso9660Error::UnsupportedVersion(header.version));
    }
    if &header.identifier != STANDARD_IDENTIFIER {
        return Err(Iso9660Error::InvalidSignature(
            String::from_utf8_lossy(&header.identifier).into_owned(),
        ));
    }

    let pvd = primary::parse(&sector, rock_ridge)?;

    let (_, next) = read_descriptor(source, VOLUME_DESCRIPTOR_START + 1)?;
    if next.kind() != Some(VolumeDescriptorType::Terminator) {
        tracing::debug!(type_code = next.type_code, "second volume descriptor present");
        return Err(Iso9660Error::MultipleVolumes);
    }

    tracing::debug!(
        volume_id = pvd.volume_id.trimmed(),
        block_size = pvd.logical_block_size,
        blocks = pvd.volume_space_size,
        root_lba = pvd.root.extent_lba,
        path_table_lba = pvd.type_l_path_table,
        path_table_size = pvd.path_table_size,
        "mounted primary volume"
    );
    Ok(pvd)
}
