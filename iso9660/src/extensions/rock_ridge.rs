//! Rock Ridge extension support
//!
//! Rock Ridge rides on the System Use Sharing Protocol: the tail of each
//! directory record holds a chain of `{signature, length, version, payload}`
//! entries. Only the alternate name (`NM`) is interpreted here; everything
//! else is skipped by its declared length.
//!
//! Continuation areas (`CE`) are not followed, and a name split across
//! several `NM` entries is not concatenated: each `NM` entry replaces the
//! previous one, so the last entry in the area wins.

use crate::error::{Iso9660Error, Result};

/// Signature constants
pub mod signatures {
    /// Rock Ridge presence marker
    pub const ROCK_RIDGE: &[u8; 2] = b"RR";
    /// Alternate name signature
    pub const ALTERNATE_NAME: &[u8; 2] = b"NM";
    /// SUSP continuation area
    pub const CONTINUATION: &[u8; 2] = b"CE";
    /// SUSP indicator (root "." record only)
    pub const SUSP_INDICATOR: &[u8; 2] = b"SP";
    /// SUSP area terminator
    pub const TERMINATOR: &[u8; 2] = b"ST";
    /// POSIX file attributes signature
    pub const POSIX_ATTRS: &[u8; 2] = b"PX";
    /// Timestamps signature
    pub const TIMESTAMPS: &[u8; 2] = b"TF";
}

/// Size of the `{signature, length, version}` header
const ENTRY_HEADER_LEN: usize = 4;

/// NM flag: name continues in the next NM entry
pub const NM_CONTINUE: u8 = 0x01;

/// System Use Entry (borrowed view)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemUseEntry<'a> {
    /// Signature (2 bytes, e.g. "PX", "NM")
    pub signature: [u8; 2],

    /// Version
    pub version: u8,

    /// Bytes following the 4-byte header, up to the entry length
    pub payload: &'a [u8],
}

/// Walk the entries of a system use area
///
/// Yields an error and stops on an entry whose version is not 1 or whose
/// length does not fit the area. Fewer than four trailing bytes, or an
/// all-zero header, end the walk quietly (record padding).
pub fn entries(area: &[u8]) -> SystemUseEntries<'_> {
    SystemUseEntries {
        area,
        offset: 0,
        failed: false,
    }
}

/// Iterator returned by [`entries`]
#[derive(Debug, Clone)]
pub struct SystemUseEntries<'a> {
    area: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> Iterator for SystemUseEntries<'a> {
    type Item = Result<SystemUseEntry<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let rest = self.area.get(self.offset..)?;
        if rest.len() < ENTRY_HEADER_LEN || rest[..3] == [0, 0, 0] {
            return None;
        }

        let signature = [rest[0], rest[1]];
        let length = rest[2] as usize;
        let version = rest[3];
        if version != 1 {
            self.failed = true;
            return Some(Err(Iso9660Error::TruncatedRecord {
                signature: String::from_utf8_lossy(&signature).into_owned(),
                version,
            }));
        }
        if length < ENTRY_HEADER_LEN || length > rest.len() {
            self.failed = true;
            return Some(Err(Iso9660Error::InvalidSuspEntry {
                offset: self.offset,
            }));
        }

        self.offset += length;
        Some(Ok(SystemUseEntry {
            signature,
            version,
            payload: &rest[ENTRY_HEADER_LEN..length],
        }))
    }
}

/// Alternate name (NM entry)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternateName {
    /// Flags
    pub flags: u8,

    /// Name bytes as recorded; Rock Ridge does not fix an encoding
    pub name: Vec<u8>,
}

/// What the SUSP area of one directory record says about its name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RockRidgeName {
    /// An `RR` marker entry was present
    pub marker: bool,

    /// Last `NM` entry seen
    pub alternate: Option<AlternateName>,
}

impl RockRidgeName {
    /// Non-empty alternate name, if any
    pub fn name(&self) -> Option<&[u8]> {
        self.alternate
            .as_ref()
            .map(|nm| nm.name.as_slice())
            .filter(|name| !name.is_empty())
    }
}

/// Decode the Rock Ridge name carried by a system use area
pub fn decode(area: &[u8]) -> Result<RockRidgeName> {
    let mut rr = RockRidgeName::default();
    for entry in entries(area) {
        let entry = entry?;
        match &entry.signature {
            signatures::ROCK_RIDGE => rr.marker = true,
            signatures::ALTERNATE_NAME => {
                let (flags, name) = match entry.payload.split_first() {
                    Some((&flags, name)) => (flags, name),
                    None => (0, &[][..]),
                };
                if flags & NM_CONTINUE != 0 {
                    tracing::trace!("NM continuation flag set, name not concatenated");
                }
                rr.alternate = Some(AlternateName {
                    flags,
                    name: name.to_vec(),
                });
            }
            signatures::SUSP_INDICATOR => {
                if entry.payload.get(..2) != Some(&[0xBE, 0xEF][..]) {
                    tracing::warn!("SP entry without check bytes");
                }
            }
            signatures::POSIX_ATTRS | signatures::TIMESTAMPS => {
                tracing::trace!(payload_len = entry.payload.len(), "attribute entry skipped");
            }
            signatures::TERMINATOR => break,
            signatures::CONTINUATION => {
                tracing::trace!("SUSP continuation area not followed");
            }
            _ => {}
        }
    }
    Ok(rr)
}
