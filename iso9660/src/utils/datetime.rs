//! Date/time parsing
//!
//! ISO9660 has two datetime formats: 7-byte and 17-byte.

use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

/// Both formats count the GMT offset in 15 minute steps
fn gmt_offset(quarters: i8) -> Option<UtcOffset> {
    UtcOffset::from_whole_seconds(i32::from(quarters) * 15 * 60).ok()
}

/// 7-byte directory record datetime
///
/// The fields are kept as recorded. [`RecordingTime::datetime`] yields the
/// recorder's local time, [`RecordingTime::offset_datetime`] attaches the
/// GMT offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordingTime {
    /// Years since 1900
    pub year: u8,

    /// Month (1-12)
    pub month: u8,

    /// Day (1-31)
    pub day: u8,

    /// Hour (0-23)
    pub hour: u8,

    /// Minute (0-59)
    pub minute: u8,

    /// Second (0-59)
    pub second: u8,

    /// GMT offset in 15-minute intervals (-48 to +52)
    pub gmt_offset: i8,
}

impl RecordingTime {
    /// Parse from 7-byte array
    pub fn from_bytes(bytes: &[u8; 7]) -> Self {
        Self {
            year: bytes[0],
            month: bytes[1],
            day: bytes[2],
            hour: bytes[3],
            minute: bytes[4],
            second: bytes[5],
            gmt_offset: bytes[6] as i8,
        }
    }

    /// Get full year (1900 + year)
    pub fn full_year(&self) -> i32 {
        1900 + i32::from(self.year)
    }

    /// Local time without the GMT offset applied, `None` if out of range
    pub fn datetime(&self) -> Option<PrimitiveDateTime> {
        let month = Month::try_from(self.month).ok()?;
        let date = Date::from_calendar_date(self.full_year(), month, self.day).ok()?;
        let time = Time::from_hms(self.hour, self.minute, self.second).ok()?;
        Some(PrimitiveDateTime::new(date, time))
    }

    /// Local time tagged with the recorded GMT offset
    pub fn offset_datetime(&self) -> Option<OffsetDateTime> {
        Some(self.datetime()?.assume_offset(gmt_offset(self.gmt_offset)?))
    }
}

/// 17-byte ASCII datetime (volume descriptors)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeTime {
    /// Year (4 ASCII digits)
    pub year: u16,

    /// Month (2 ASCII digits, 1-12)
    pub month: u8,

    /// Day (2 ASCII digits, 1-31)
    pub day: u8,

    /// Hour (2 ASCII digits, 0-23)
    pub hour: u8,

    /// Minute (2 ASCII digits, 0-59)
    pub minute: u8,

    /// Second (2 ASCII digits, 0-59)
    pub second: u8,

    /// Hundredths (2 ASCII digits)
    pub hundredths: u8,

    /// GMT offset in 15-minute intervals
    pub gmt_offset: i8,
}

impl VolumeTime {
    /// Parse from 17-byte ASCII string
    ///
    /// Returns `None` for the "not specified" form (all digits zero) and for
    /// fields that are not ASCII digits.
    pub fn from_bytes(bytes: &[u8; 17]) -> Option<Self> {
        if bytes[..16].iter().all(|&b| b == b'0') && bytes[16] == 0 {
            return None;
        }
        let digits = |range: core::ops::Range<usize>| -> Option<u16> {
            bytes[range].iter().try_fold(0u16, |acc, &b| {
                b.is_ascii_digit().then(|| acc * 10 + u16::from(b - b'0'))
            })
        };
        Some(Self {
            year: digits(0..4)?,
            month: digits(4..6)? as u8,
            day: digits(6..8)? as u8,
            hour: digits(8..10)? as u8,
            minute: digits(10..12)? as u8,
            second: digits(12..14)? as u8,
            hundredths: digits(14..16)? as u8,
            gmt_offset: bytes[16] as i8,
        })
    }

    /// Convert to an offset-aware timestamp, `None` if out of range
    pub fn offset_datetime(&self) -> Option<OffsetDateTime> {
        let month = Month::try_from(self.month).ok()?;
        let date = Date::from_calendar_date(i32::from(self.year), month, self.day).ok()?;
        let time = Time::from_hms_milli(
            self.hour,
            self.minute,
            self.second,
            u16::from(self.hundredths) * 10,
        )
        .ok()?;
        Some(PrimitiveDateTime::new(date, time).assume_offset(gmt_offset(self.gmt_offset)?))
    }
}
