//! File flags parsing and manipulation

use crate::types::FileFlags;

const HIDDEN: u8 = 0x01;
const DIRECTORY: u8 = 0x02;
const ASSOCIATED: u8 = 0x04;
const RECORD: u8 = 0x08;
const PROTECTION: u8 = 0x10;
const MULTI_EXTENT: u8 = 0x80;

impl FileFlags {
    /// Parse from raw byte; reserved bits 5 and 6 are ignored
    pub fn from_byte(byte: u8) -> Self {
        Self {
            hidden: byte & HIDDEN != 0,
            directory: byte & DIRECTORY != 0,
            associated: byte & ASSOCIATED != 0,
            extended_format: byte & RECORD != 0,
            extended_permissions: byte & PROTECTION != 0,
            not_final: byte & MULTI_EXTENT != 0,
        }
    }

    /// Convert to raw byte
    pub fn to_byte(&self) -> u8 {
        [
            (self.hidden, HIDDEN),
            (self.directory, DIRECTORY),
            (self.associated, ASSOCIATED),
            (self.extended_format, RECORD),
            (self.extended_permissions, PROTECTION),
            (self.not_final, MULTI_EXTENT),
        ]
        .into_iter()
        .filter(|&(set, _)| set)
        .fold(0, |byte, (_, bit)| byte | bit)
    }
}
