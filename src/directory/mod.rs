/// IBM 3740 directory entries
///
/// Track 0 holds one 128-byte record per sector. Each record is either an
/// error map (ERMAP), a volume label (VOL1), a data set header (HDR1, or
/// DDR1 once deleted) or an unused slot.

/// Data set headers (HDR1/DDR1)
pub mod data_set;
/// Error map (ERMAP)
pub mod error_map;
/// Volume label (VOL1)
pub mod volume_label;

pub use data_set::DataSet;
pub use error_map::ErrorMap;
pub use volume_label::VolumeLabel;

use crate::error::{Result, UnitelError};
use crate::format::{detect_entry_kind, EntryKind, Geometry, RECORD_SIZE};
use crate::transcode::text;

/// A decoded directory slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryEntry {
    /// Volume label (VOL1)
    VolumeLabel(VolumeLabel),
    /// Data set header (HDR1/DDR1)
    DataSet(DataSet),
    /// Error map (ERMAP)
    ErrorMap(ErrorMap),
    /// Unused slot
    Empty,
}

impl DirectoryEntry {
    /// Parse a directory record, dispatching on its magic number
    ///
    /// Only fails when the record is shorter than 128 bytes or when the
    /// selected entry type rejects one of its fields.
    pub fn parse(geometry: Geometry, record: &[u8]) -> Result<Self> {
        check_record_length(record, "entry in the disk directory")?;

        Ok(match detect_entry_kind(record) {
            Some(EntryKind::ErrorMap) => DirectoryEntry::ErrorMap(ErrorMap::parse(record)?),
            Some(EntryKind::VolumeLabel) => {
                DirectoryEntry::VolumeLabel(VolumeLabel::parse(record)?)
            }
            Some(EntryKind::DataSet) => DirectoryEntry::DataSet(DataSet::parse(geometry, record)?),
            None => DirectoryEntry::Empty,
        })
    }

    /// Entry kind, `None` for an unused slot
    pub fn kind(&self) -> Option<EntryKind> {
        match self {
            DirectoryEntry::VolumeLabel(_) => Some(EntryKind::VolumeLabel),
            DirectoryEntry::DataSet(_) => Some(EntryKind::DataSet),
            DirectoryEntry::ErrorMap(_) => Some(EntryKind::ErrorMap),
            DirectoryEntry::Empty => None,
        }
    }

    /// Get the data set, if this entry is one
    pub fn as_data_set(&self) -> Option<&DataSet> {
        match self {
            DirectoryEntry::DataSet(data_set) => Some(data_set),
            _ => None,
        }
    }

    /// Get the volume label, if this entry is one
    pub fn as_volume_label(&self) -> Option<&VolumeLabel> {
        match self {
            DirectoryEntry::VolumeLabel(label) => Some(label),
            _ => None,
        }
    }

    /// Get the error map, if this entry is one
    pub fn as_error_map(&self) -> Option<&ErrorMap> {
        match self {
            DirectoryEntry::ErrorMap(map) => Some(map),
            _ => None,
        }
    }

    /// Check if this slot is unused
    pub fn is_empty(&self) -> bool {
        matches!(self, DirectoryEntry::Empty)
    }
}

pub(crate) fn check_record_length(record: &[u8], what: &str) -> Result<()> {
    if record.len() < RECORD_SIZE {
        return Err(UnitelError::invalid_format(format!(
            "not enough bytes for {} ({} < {})",
            what,
            record.len(),
            RECORD_SIZE
        )));
    }
    Ok(())
}

pub(crate) fn check_magic(record: &[u8], kind: EntryKind) -> Result<()> {
    if detect_entry_kind(record) != Some(kind) {
        let magic = match kind {
            EntryKind::DataSet => "HDR1/DDR1".to_string(),
            _ => text(kind.magic_bytes()),
        };
        return Err(UnitelError::invalid_format(format!(
            "magic number {} not found",
            magic
        )));
    }
    Ok(())
}

/// Text field with surrounding spaces removed
pub(crate) fn text_field(record: &[u8], offset: usize, length: usize) -> String {
    text(&record[offset..offset + length])
        .trim_matches(' ')
        .to_string()
}

/// True when a field holds nothing but spaces
pub(crate) fn is_blank(record: &[u8], offset: usize, length: usize) -> bool {
    record[offset..offset + length].iter().all(|&b| b == b' ')
}

/// Decimal number field
pub(crate) fn decimal_field(
    record: &[u8],
    offset: usize,
    length: usize,
    name: &str,
) -> Result<usize> {
    let value = text_field(record, offset, length);
    value
        .parse()
        .map_err(|_| UnitelError::parse(offset, format!("{} {:?} is not a number", name, value)))
}

/// Decimal number field, `None` when blank
pub(crate) fn optional_decimal_field(
    record: &[u8],
    offset: usize,
    length: usize,
    name: &str,
) -> Result<Option<usize>> {
    if is_blank(record, offset, length) {
        Ok(None)
    } else {
        decimal_field(record, offset, length, name).map(Some)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use proptest::prelude::*;

    /// Blank 128-byte record with `fields` written at their offsets
    pub(crate) fn record(fields: &[(usize, &str)]) -> Vec<u8> {
        let mut record = vec![b' '; RECORD_SIZE];
        for (offset, value) in fields {
            record[*offset..*offset + value.len()].copy_from_slice(value.as_bytes());
        }
        record
    }

    fn geometry() -> Geometry {
        Geometry::new(77, 26, 128).unwrap()
    }

    #[test]
    fn test_dispatch_error_map() {
        let entry = DirectoryEntry::parse(geometry(), &record(&[(0, "ERMAP")])).unwrap();
        assert_eq!(entry.kind(), Some(EntryKind::ErrorMap));
        assert!(entry.as_error_map().is_some());
    }

    #[test]
    fn test_dispatch_volume_label() {
        let entry = DirectoryEntry::parse(geometry(), &record(&[(0, "VOL1IBMIRD")])).unwrap();
        assert_eq!(entry.as_volume_label().unwrap().label, "IBMIRD");
    }

    #[test]
    fn test_dispatch_data_set() {
        let raw = record(&[
            (0, "HDR1 FICMAC"),
            (22, "00080"),
            (28, "01001"),
            (34, "02026"),
            (74, "03001"),
        ]);
        let entry = DirectoryEntry::parse(geometry(), &raw).unwrap();
        assert_eq!(entry.as_data_set().unwrap().identifier, "FICMAC");
        assert_eq!(entry.kind(), Some(EntryKind::DataSet));
    }

    #[test]
    fn test_dispatch_empty() {
        let entry = DirectoryEntry::parse(geometry(), &record(&[])).unwrap();
        assert!(entry.is_empty());
        assert_eq!(entry.kind(), None);

        let entry = DirectoryEntry::parse(geometry(), &record(&[(0, "HDR2")])).unwrap();
        assert!(entry.is_empty());
    }

    #[test]
    fn test_dispatch_checks_length_first() {
        let err = DirectoryEntry::parse(geometry(), b"ERMAP").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_dispatch_propagates_field_errors() {
        let raw = record(&[(0, "HDR1 BROKEN"), (22, "ABCDE")]);
        let err = DirectoryEntry::parse(geometry(), &raw).unwrap_err();
        assert!(matches!(err, UnitelError::ParseError { offset: 22, .. }));
    }

    #[test]
    fn test_decimal_fields() {
        let raw = record(&[(10, " 42 "), (20, "x1")]);
        assert_eq!(decimal_field(&raw, 10, 4, "value").unwrap(), 42);
        assert_eq!(optional_decimal_field(&raw, 30, 2, "value").unwrap(), None);
        assert!(decimal_field(&raw, 20, 2, "value").is_err());
    }

    #[test]
    fn test_only_spaces_are_blank() {
        let mut raw = record(&[(5, "FICMAC")]);
        // NBSP and NEL are transcoded characters, not padding
        raw[45] = 0xA0;
        raw[66] = 0x85;
        raw[70] = 0x09;

        assert!(is_blank(&raw, 40, 5));
        assert!(!is_blank(&raw, 45, 2));
        assert!(!is_blank(&raw, 66, 6));
        assert!(!is_blank(&raw, 70, 2));
        assert_eq!(text_field(&raw, 0, 22), "FICMAC");
        assert_eq!(text_field(&raw, 45, 2), "\u{a0}");
        assert!(optional_decimal_field(&raw, 45, 2, "value").is_err());
    }

    proptest! {
        #[test]
        fn short_records_always_rejected(raw in proptest::collection::vec(any::<u8>(), 0..RECORD_SIZE)) {
            prop_assert!(DirectoryEntry::parse(geometry(), &raw).is_err());
            prop_assert!(VolumeLabel::parse(&raw).is_err());
            prop_assert!(ErrorMap::parse(&raw).is_err());
            prop_assert!(DataSet::parse(geometry(), &raw).is_err());
        }
    }
}
