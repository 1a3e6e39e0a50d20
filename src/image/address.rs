/// Sector addresses and their on-disk textual encodings

use crate::error::{Result, UnitelError};
use crate::format::constants::{IBM_ADDRESS_LENGTH, UNITEL_ADDRESS_LENGTH};
use crate::format::Geometry;
use std::fmt;

/// A (track, sector) pair validated against a disk geometry
///
/// Two textual encodings are found on Unitel disks:
/// - IBM `TT0SS`: 5 decimal digits, the middle one unused (directory records)
/// - Unitel `TTSS`: 4 uppercase hexadecimal digits (FICMAC catalog)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorAddress {
    geometry: Geometry,
    track: usize,
    sector: usize,
}

impl SectorAddress {
    /// Create a sector address from a track and a sector
    pub fn new(geometry: Geometry, track: usize, sector: usize) -> Result<Self> {
        geometry.validate_track("track", track)?;
        geometry.validate_sector("sector", sector)?;

        Ok(Self {
            geometry,
            track,
            sector,
        })
    }

    /// Decode an IBM formatted sector address (TT0SS)
    pub fn from_ibm(geometry: Geometry, field: &[u8]) -> Result<Self> {
        check_length(field, IBM_ADDRESS_LENGTH)?;

        if let Some(&c) = field.iter().find(|c| !c.is_ascii_digit()) {
            return Err(UnitelError::range(format!(
                "character 0x{:02X} in IBM sector address is not a decimal digit",
                c
            )));
        }

        let track = digits(&field[0..2], 10);
        let sector = digits(&field[3..5], 10);

        Self::validated(geometry, track, sector)
    }

    /// Decode a Unitel formatted sector address (TTSS, hexadecimal)
    pub fn from_unitel(geometry: Geometry, field: &[u8]) -> Result<Self> {
        check_length(field, UNITEL_ADDRESS_LENGTH)?;

        if let Some(&c) = field.iter().find(|&&c| !is_upper_hex(c)) {
            return Err(UnitelError::range(format!(
                "character 0x{:02X} in Unitel sector address is not a hexadecimal digit",
                c
            )));
        }

        let track = digits(&field[0..2], 16);
        let sector = digits(&field[2..4], 16);

        Self::validated(geometry, track, sector)
    }

    fn validated(geometry: Geometry, track: usize, sector: usize) -> Result<Self> {
        geometry.validate_track("address track", track)?;
        geometry.validate_sector("address sector", sector)?;

        Ok(Self {
            geometry,
            track,
            sector,
        })
    }

    /// Track number (from 0)
    pub fn track(&self) -> usize {
        self.track
    }

    /// Sector number (from 1)
    pub fn sector(&self) -> usize {
        self.sector
    }

    /// Geometry this address was validated against
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Offset of the first byte of the sector
    pub fn offset(&self) -> usize {
        // Bounds were checked at construction
        self.track * self.geometry.track_size()
            + (self.sector - 1) * self.geometry.bytes_per_sector()
    }

    /// Offset of the last byte of the sector (inclusive)
    pub fn last_offset(&self) -> usize {
        self.offset() + self.geometry.bytes_per_sector() - 1
    }

    /// Encode as an IBM sector address (TT0SS)
    pub fn to_ibm(&self) -> String {
        format!("{:02}0{:02}", self.track, self.sector)
    }

    /// Encode as a Unitel sector address (TTSS)
    pub fn to_unitel(&self) -> String {
        format!("{:02X}{:02X}", self.track, self.sector)
    }
}

impl fmt::Display for SectorAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.track, self.sector)
    }
}

fn check_length(field: &[u8], expected: usize) -> Result<()> {
    if field.len() != expected {
        return Err(UnitelError::invalid_format(format!(
            "sector address must be exactly {} characters, got {}",
            expected,
            field.len()
        )));
    }
    Ok(())
}

#[inline]
fn is_upper_hex(c: u8) -> bool {
    c.is_ascii_digit() || (b'A'..=b'F').contains(&c)
}

/// Value of a run of already-validated digits
fn digits(field: &[u8], radix: u32) -> usize {
    field.iter().fold(0, |acc, &c| {
        acc * radix as usize + (c as char).to_digit(radix).unwrap_or(0) as usize
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use proptest::prelude::*;

    fn geometry() -> Geometry {
        Geometry::new(77, 26, 128).unwrap()
    }

    #[test]
    fn test_new() {
        let address = SectorAddress::new(geometry(), 1, 1).unwrap();
        assert_eq!(address.offset(), 3328);
        assert_eq!(address.last_offset(), 3328 + 127);
    }

    #[test]
    fn test_new_out_of_bounds() {
        assert!(SectorAddress::new(geometry(), 78, 1).is_err());
        assert!(SectorAddress::new(geometry(), 0, 0).is_err());
        assert!(SectorAddress::new(geometry(), 0, 27).is_err());
    }

    #[test]
    fn test_from_ibm() {
        let address = SectorAddress::from_ibm(geometry(), b"01001").unwrap();
        assert_eq!((address.track(), address.sector()), (1, 1));

        let address = SectorAddress::from_ibm(geometry(), b"73026").unwrap();
        assert_eq!((address.track(), address.sector()), (73, 26));
    }

    #[test]
    fn test_from_ibm_ignores_separator_digit() {
        let address = SectorAddress::from_ibm(geometry(), b"02915").unwrap();
        assert_eq!((address.track(), address.sector()), (2, 15));
    }

    #[test]
    fn test_from_ibm_bad_length() {
        let err = SectorAddress::from_ibm(geometry(), b"0101").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(SectorAddress::from_ibm(geometry(), b"010011").is_err());
    }

    #[test]
    fn test_from_ibm_bad_character() {
        let err = SectorAddress::from_ibm(geometry(), b"01 01").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert!(SectorAddress::from_ibm(geometry(), b"0A001").is_err());
    }

    #[test]
    fn test_from_ibm_out_of_bounds() {
        let err = SectorAddress::from_ibm(geometry(), b"01000").unwrap_err();
        assert!(matches!(err, UnitelError::InvalidSector { name: "address sector", .. }));

        let err = SectorAddress::from_ibm(geometry(), b"80001").unwrap_err();
        assert!(matches!(err, UnitelError::InvalidTrack { name: "address track", .. }));
    }

    #[test]
    fn test_from_unitel() {
        let address = SectorAddress::from_unitel(geometry(), b"0A1A").unwrap();
        assert_eq!((address.track(), address.sector()), (10, 26));
        assert_eq!(address.offset(), 10 * 3328 + 25 * 128);
    }

    #[test]
    fn test_from_unitel_rejects_lowercase() {
        let err = SectorAddress::from_unitel(geometry(), b"0a01").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn test_from_unitel_bad_length() {
        let err = SectorAddress::from_unitel(geometry(), b"0A01A").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_from_unitel_out_of_bounds() {
        assert!(SectorAddress::from_unitel(geometry(), b"4E01").is_err());
        assert!(SectorAddress::from_unitel(geometry(), b"011B").is_err());
    }

    #[test]
    fn test_encodings() {
        let address = SectorAddress::new(geometry(), 12, 3).unwrap();
        assert_eq!(address.to_ibm(), "12003");
        assert_eq!(address.to_unitel(), "0C03");
        assert_eq!(address.to_string(), "12/3");
    }

    proptest! {
        #[test]
        fn ibm_round_trip(track in 0usize..=77, sector in 1usize..=26) {
            let address = SectorAddress::new(geometry(), track, sector).unwrap();
            let decoded = SectorAddress::from_ibm(geometry(), address.to_ibm().as_bytes()).unwrap();
            prop_assert_eq!(decoded, address);
        }

        #[test]
        fn unitel_round_trip(track in 0usize..=77, sector in 1usize..=26) {
            let address = SectorAddress::new(geometry(), track, sector).unwrap();
            let decoded = SectorAddress::from_unitel(geometry(), address.to_unitel().as_bytes()).unwrap();
            prop_assert_eq!(decoded, address);
        }

        #[test]
        fn last_offset_closes_sector(track in 0usize..=77, sector in 1usize..=26) {
            let address = SectorAddress::new(geometry(), track, sector).unwrap();
            prop_assert_eq!(address.last_offset() + 1 - address.offset(), 128);
            prop_assert_eq!(address.offset(), geometry().offset(track, sector).unwrap());
        }
    }
}
