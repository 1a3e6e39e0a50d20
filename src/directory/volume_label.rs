/// IBM 3740 volume label (VOL1)
///
/// Record layout (offsets within the 128-byte record):
/// - 0..4: "VOL1"
/// - 4..10: volume identifier (usually "IBMIRD")
/// - 10: accessibility, anything but a space locks the volume
/// - 37..51: owner identifier
/// - 71: recording mode ('M' = double density, two sides; '2' = two sides)
/// - 75: sector size code
/// - 76..78: physical sector sequence
/// - 79: label version ('W' = standard IBM label)

use crate::directory::{check_magic, check_record_length, decimal_field, is_blank, text_field};
use crate::error::Result;
use crate::format::{size_code_to_bytes, EntryKind};

/// Volume label entry of the disk directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeLabel {
    /// Volume label identifier
    pub label: String,
    /// Volume is locked
    pub locked: bool,
    /// Owner identifier
    pub owner: String,
    /// Side count (1 or 2)
    pub sides: u8,
    /// Double density (true) or single density (false)
    pub double_density: bool,
    /// Bytes per sector (a multiple of 128)
    pub bytes_per_sector: usize,
    /// Sector sequence used to record sectors (1 to 13)
    pub sector_sequence: usize,
    /// Disk uses a standard IBM label (byte 79 is `W`)
    pub label_standard: bool,
}

impl VolumeLabel {
    /// Parse a volume label from a directory record
    pub fn parse(record: &[u8]) -> Result<Self> {
        check_record_length(record, "a volume label")?;
        check_magic(record, EntryKind::VolumeLabel)?;

        // 'M' implies two sides as well
        let (sides, double_density) = match record[71] {
            b'M' => (2, true),
            b'2' => (2, false),
            _ => (1, false),
        };

        let sector_sequence = if is_blank(record, 76, 2) {
            1
        } else {
            decimal_field(record, 76, 2, "sector sequence")?
        };

        Ok(Self {
            label: text_field(record, 4, 6),
            locked: record[10] != b' ',
            owner: text_field(record, 37, 14),
            sides,
            double_density,
            bytes_per_sector: size_code_to_bytes(record[75]),
            sector_sequence,
            label_standard: record[79] == b'W',
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::tests::record;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_defaults() {
        let label = VolumeLabel::parse(&record(&[(0, "VOL1")])).unwrap();
        assert_eq!(label.label, "");
        assert!(!label.locked);
        assert_eq!(label.owner, "");
        assert_eq!(label.sides, 1);
        assert!(!label.double_density);
        assert_eq!(label.bytes_per_sector, 128);
        assert_eq!(label.sector_sequence, 1);
        assert!(!label.label_standard);
    }

    #[test]
    fn test_parse_fields() {
        let raw = record(&[
            (0, "VOL1FOOBAR"),
            (37, "  UNITEL     "),
            (71, "M"),
            (75, "113W"),
        ]);
        let label = VolumeLabel::parse(&raw).unwrap();
        assert_eq!(label.label, "FOOBAR");
        assert_eq!(label.owner, "UNITEL");
        assert_eq!(label.sides, 2);
        assert!(label.double_density);
        assert_eq!(label.bytes_per_sector, 256);
        assert_eq!(label.sector_sequence, 13);
        assert!(label.label_standard);
    }

    #[test]
    fn test_label_standard_needs_w() {
        let label = VolumeLabel::parse(&record(&[(0, "VOL1"), (79, "W")])).unwrap();
        assert!(label.label_standard);

        for other in [" ", "V", "w"] {
            let label = VolumeLabel::parse(&record(&[(0, "VOL1"), (79, other)])).unwrap();
            assert!(!label.label_standard);
        }
    }

    #[test]
    fn test_locked_flag() {
        let raw = record(&[(0, "VOL1FOOBAR"), (10, " ")]);
        assert!(!VolumeLabel::parse(&raw).unwrap().locked);

        let raw = record(&[(0, "VOL1FOOBAR"), (10, "X")]);
        assert!(VolumeLabel::parse(&raw).unwrap().locked);
    }

    #[test]
    fn test_two_sides_single_density() {
        let label = VolumeLabel::parse(&record(&[(0, "VOL1"), (71, "2")])).unwrap();
        assert_eq!(label.sides, 2);
        assert!(!label.double_density);
    }

    #[test]
    fn test_unknown_recording_mode() {
        let label = VolumeLabel::parse(&record(&[(0, "VOL1"), (71, "X")])).unwrap();
        assert_eq!(label.sides, 1);
        assert!(!label.double_density);
    }

    #[test]
    fn test_bytes_per_sector_codes() {
        for (code, size) in [("1", 256), ("2", 512), ("3", 1024), (" ", 128), ("9", 128)] {
            let label = VolumeLabel::parse(&record(&[(0, "VOL1"), (75, code)])).unwrap();
            assert_eq!(label.bytes_per_sector, size);
        }
    }

    #[test]
    fn test_bad_sector_sequence() {
        let err = VolumeLabel::parse(&record(&[(0, "VOL1"), (76, "?A")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_missing_magic() {
        let err = VolumeLabel::parse(&record(&[(0, "HDR1")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(err.to_string().contains("VOL1"));
    }

    #[test]
    fn test_too_short() {
        assert!(VolumeLabel::parse(b"VOL1IBMIRD").is_err());
    }
}
