//! File metadata extraction

use crate::directory::record::DirectoryRecord;
use crate::file::extent::Extent;

impl DirectoryRecord {
    /// Effective name (Rock Ridge when present)
    pub fn name(&self) -> &str {
        &self.identifier
    }

    /// Text after the last `.` of the name, if any
    pub fn extension(&self) -> Option<&str> {
        self.identifier
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }

    /// Is this a regular file?
    pub fn is_file(&self) -> bool {
        !self.flags.directory
    }

    /// Is this a directory?
    pub fn is_directory(&self) -> bool {
        self.flags.directory
    }

    /// Is this hidden?
    pub fn is_hidden(&self) -> bool {
        self.flags.hidden
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        u64::from(self.data_length)
    }

    /// Data location
    pub fn extent(&self) -> Extent {
        Extent::from(self)
    }
}
