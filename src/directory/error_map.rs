/// IBM 3740 error map (ERMAP)
///
/// Spare tracks 74 and 75 replace the first and second defective tracks.

use crate::directory::{check_magic, check_record_length, optional_decimal_field};
use crate::error::Result;
use crate::format::EntryKind;

/// Error map entry of the disk directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMap {
    /// First defective track, replaced by spare track 74
    pub first_defective_track: Option<usize>,
    /// Second defective track, replaced by spare track 75
    pub second_defective_track: Option<usize>,
    /// Defective record indicator
    pub defective_record: bool,
}

impl ErrorMap {
    /// Parse an error map from a directory record
    pub fn parse(record: &[u8]) -> Result<Self> {
        check_record_length(record, "an error map")?;
        check_magic(record, EntryKind::ErrorMap)?;

        Ok(Self {
            first_defective_track: optional_decimal_field(record, 6, 2, "first defective track")?,
            second_defective_track: optional_decimal_field(
                record,
                10,
                2,
                "second defective track",
            )?,
            defective_record: record[22] == b'D',
        })
    }

    /// Check if the disk has a defective track
    pub fn has_defective_track(&self) -> bool {
        self.first_defective_track.is_some()
    }

    /// Check if the disk has defective records
    pub fn has_defective_record(&self) -> bool {
        self.defective_record
    }
}
