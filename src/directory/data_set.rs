/// IBM 3740 data set header (HDR1, or DDR1 when deleted)
///
/// Record layout (offsets within the 128-byte record):
/// - 0..4: "HDR1" or "DDR1"
/// - 5..22: data set identifier
/// - 22..27: block length
/// - 27: record mode ('R' = blocked and spanned, 'B' = blocked)
/// - 28..33: beginning of extent (TT0SS)
/// - 33: physical record length code
/// - 34..39: end of extent (TT0SS)
/// - 39: record format (' ' or 'F' = fixed length)
/// - 40: bypass indicator ('B')
/// - 41: accessibility, anything but a space restricts access
/// - 42: write protect ('P')
/// - 44: multi-volume indicator ('C' or 'L')
/// - 45..47: volume sequence number
/// - 47..53: creation date (YYMMDD)
/// - 53..57: record length
/// - 66..72: expiration date (YYMMDD)
/// - 74..79: end of data (TT0SS)

use crate::directory::{
    check_magic, check_record_length, decimal_field, optional_decimal_field, text_field,
};
use crate::error::Result;
use crate::format::{size_code_to_bytes, EntryKind, Geometry};
use crate::image::SectorAddress;

/// Data set entry of the disk directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSet {
    /// Data set has been deleted (DDR1)
    pub deleted: bool,
    /// Data set identifier
    pub identifier: String,
    /// Block length, from 1 to the sector size
    pub block_length: usize,
    /// Records are blocked
    pub blocked_record: bool,
    /// Records are spanned
    pub spanned_record: bool,
    /// First sector of the extent
    pub beginning_of_extent: SectorAddress,
    /// Physical record length in bytes, usually the sector size
    pub physical_record_length: usize,
    /// Last sector reserved for the data set
    pub end_of_extent: SectorAddress,
    /// Records are fixed length
    pub fixed_length: bool,
    /// A disk copy should skip this data set
    pub bypass: bool,
    /// Access to the data set is restricted
    pub restricted: bool,
    /// Data set is write protected
    pub write_protect: bool,
    /// Data set continues on another volume
    pub multi_volume: bool,
    /// Volume sequence number of a multi-volume data set
    pub sequence_number: Option<usize>,
    /// Creation date (YYMMDD), empty when absent
    pub creation_date: String,
    /// Record length, same as the block length unless specified
    pub record_length: usize,
    /// Expiration date (YYMMDD), empty when absent
    pub expiration_date: String,
    /// First sector after the data (excluded)
    pub end_of_data: SectorAddress,
}

impl DataSet {
    /// Parse a data set header from a directory record
    ///
    /// The three extent addresses are decoded against `geometry`.
    pub fn parse(geometry: Geometry, record: &[u8]) -> Result<Self> {
        check_record_length(record, "a data set")?;
        check_magic(record, EntryKind::DataSet)?;

        let deleted = record[0] == b'D';
        let identifier = text_field(record, 5, 17);
        let block_length = decimal_field(record, 22, 5, "block length")?;

        let (blocked_record, spanned_record) = match record[27] {
            b'R' => (true, true),
            b'B' => (true, false),
            _ => (false, false),
        };

        let beginning_of_extent = SectorAddress::from_ibm(geometry, &record[28..33])?;
        let physical_record_length = size_code_to_bytes(record[33]);
        let end_of_extent = SectorAddress::from_ibm(geometry, &record[34..39])?;

        let sequence_number = optional_decimal_field(record, 45, 2, "sequence number")?;
        let creation_date = text_field(record, 47, 6);
        let record_length =
            optional_decimal_field(record, 53, 4, "record length")?.unwrap_or(block_length);
        let expiration_date = text_field(record, 66, 6);

        let end_of_data = SectorAddress::from_ibm(geometry, &record[74..79])?;

        Ok(Self {
            deleted,
            identifier,
            block_length,
            blocked_record,
            spanned_record,
            beginning_of_extent,
            physical_record_length,
            end_of_extent,
            fixed_length: matches!(record[39], b' ' | b'F'),
            bypass: record[40] == b'B',
            restricted: record[41] != b' ',
            write_protect: record[42] == b'P',
            multi_volume: matches!(record[44], b'C' | b'L'),
            sequence_number,
            creation_date,
            record_length,
            expiration_date,
            end_of_data,
        })
    }

    /// Check if the data set is deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Size of the extent in bytes, from its first to its last sector
    pub fn extent_len(&self) -> usize {
        (self.end_of_extent.last_offset() + 1).saturating_sub(self.beginning_of_extent.offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::tests::record;
    use crate::error::{ErrorKind, UnitelError};

    fn geometry() -> Geometry {
        Geometry::new(77, 26, 128).unwrap()
    }

    fn header(extra: &[(usize, &str)]) -> Vec<u8> {
        let mut fields = vec![
            (0, "HDR1 FICMAC"),
            (22, "00080"),
            (28, "01001"),
            (34, "02026"),
            (74, "02010"),
        ];
        fields.extend_from_slice(extra);
        record(&fields)
    }

    #[test]
    fn test_parse_minimal() {
        let data_set = DataSet::parse(geometry(), &header(&[])).unwrap();
        assert!(!data_set.deleted);
        assert_eq!(data_set.identifier, "FICMAC");
        assert_eq!(data_set.block_length, 80);
        assert!(!data_set.blocked_record);
        assert!(!data_set.spanned_record);
        assert_eq!(data_set.beginning_of_extent.track(), 1);
        assert_eq!(data_set.beginning_of_extent.sector(), 1);
        assert_eq!(data_set.physical_record_length, 128);
        assert_eq!(data_set.end_of_extent.track(), 2);
        assert_eq!(data_set.end_of_extent.sector(), 26);
        assert!(data_set.fixed_length);
        assert!(!data_set.bypass);
        assert!(!data_set.restricted);
        assert!(!data_set.write_protect);
        assert!(!data_set.multi_volume);
        assert_eq!(data_set.sequence_number, None);
        assert_eq!(data_set.creation_date, "");
        assert_eq!(data_set.record_length, 80);
        assert_eq!(data_set.expiration_date, "");
        assert_eq!(data_set.end_of_data.sector(), 10);
    }

    #[test]
    fn test_parse_all_flags() {
        let raw = header(&[
            (27, "R"),
            (33, "2"),
            (39, "V"),
            (40, "B"),
            (41, "X"),
            (42, "P"),
            (44, "C"),
            (45, "03"),
            (47, "860412"),
            (53, "0064"),
            (66, "991231"),
        ]);
        let data_set = DataSet::parse(geometry(), &raw).unwrap();
        assert!(data_set.blocked_record);
        assert!(data_set.spanned_record);
        assert_eq!(data_set.physical_record_length, 512);
        assert!(!data_set.fixed_length);
        assert!(data_set.bypass);
        assert!(data_set.restricted);
        assert!(data_set.write_protect);
        assert!(data_set.multi_volume);
        assert_eq!(data_set.sequence_number, Some(3));
        assert_eq!(data_set.creation_date, "860412");
        assert_eq!(data_set.record_length, 64);
        assert_eq!(data_set.expiration_date, "991231");
    }

    #[test]
    fn test_blocked_only() {
        let data_set = DataSet::parse(geometry(), &header(&[(27, "B")])).unwrap();
        assert!(data_set.blocked_record);
        assert!(!data_set.spanned_record);
    }

    #[test]
    fn test_fixed_length_f() {
        let data_set = DataSet::parse(geometry(), &header(&[(39, "F")])).unwrap();
        assert!(data_set.fixed_length);
    }

    #[test]
    fn test_multi_volume_last() {
        let data_set = DataSet::parse(geometry(), &header(&[(44, "L")])).unwrap();
        assert!(data_set.multi_volume);
    }

    #[test]
    fn test_record_length_defaults_to_block_length() {
        let data_set = DataSet::parse(geometry(), &header(&[(53, "    ")])).unwrap();
        assert_eq!(data_set.block_length, 80);
        assert_eq!(data_set.record_length, 80);
    }

    #[test]
    fn test_deleted() {
        let data_set = DataSet::parse(geometry(), &header(&[(0, "DDR1")])).unwrap();
        assert!(data_set.is_deleted());
        assert_eq!(data_set.identifier, "FICMAC");
    }

    #[test]
    fn test_extent_len() {
        let data_set = DataSet::parse(geometry(), &header(&[])).unwrap();
        // Two full tracks
        assert_eq!(data_set.extent_len(), 2 * 26 * 128);
    }

    #[test]
    fn test_bad_block_length() {
        let err = DataSet::parse(geometry(), &header(&[(22, "     ")])).unwrap_err();
        assert!(matches!(err, UnitelError::ParseError { offset: 22, .. }));
    }

    #[test]
    fn test_bad_extent() {
        let err = DataSet::parse(geometry(), &header(&[(28, "01 01")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);

        let err = DataSet::parse(geometry(), &header(&[(34, "02027")])).unwrap_err();
        assert!(matches!(err, UnitelError::InvalidSector { sector: 27, .. }));
    }

    #[test]
    fn test_bad_end_of_data() {
        let err = DataSet::parse(geometry(), &header(&[(74, "     ")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn test_missing_magic() {
        let err = DataSet::parse(geometry(), &record(&[(0, "VOL1")])).unwrap_err();
        assert!(err.to_string().contains("HDR1/DDR1"));
    }
}
