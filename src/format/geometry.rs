/// Disk geometry and byte offset arithmetic

use crate::error::{Result, UnitelError};
use crate::format::constants::SECTOR_SIZE_UNIT;

/// Physical layout of a disk: tracks, sectors and sector size
///
/// Tracks are numbered from 0, sectors from 1. A geometry is fixed once
/// built and is copied into every [`SectorAddress`](crate::SectorAddress)
/// decoded against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    tracks_per_side: usize,
    sectors_per_track: usize,
    bytes_per_sector: usize,
}

impl Geometry {
    /// Create a disk geometry
    ///
    /// Every parameter must be positive and `bytes_per_sector` must be a
    /// multiple of 128.
    pub fn new(
        tracks_per_side: usize,
        sectors_per_track: usize,
        bytes_per_sector: usize,
    ) -> Result<Self> {
        Self::assert_positive("tracks_per_side", tracks_per_side)?;
        Self::assert_positive("sectors_per_track", sectors_per_track)?;
        Self::assert_positive("bytes_per_sector", bytes_per_sector)?;

        if bytes_per_sector % SECTOR_SIZE_UNIT != 0 {
            return Err(UnitelError::config(format!(
                "bytes_per_sector {} is not a multiple of {}",
                bytes_per_sector, SECTOR_SIZE_UNIT
            )));
        }

        // Track `tracks_per_side` is addressable, so its last byte must fit too
        let fits = tracks_per_side
            .checked_add(1)
            .and_then(|tracks| tracks.checked_mul(sectors_per_track))
            .and_then(|sectors| sectors.checked_mul(bytes_per_sector))
            .is_some();
        if !fits {
            return Err(UnitelError::config(format!(
                "geometry {}x{}x{} is too large to address",
                tracks_per_side, sectors_per_track, bytes_per_sector
            )));
        }

        Ok(Self {
            tracks_per_side,
            sectors_per_track,
            bytes_per_sector,
        })
    }

    /// IBM 3740 layout: 77 tracks of 26 sectors
    pub(crate) const fn ibm_3740(bytes_per_sector: usize) -> Self {
        Self {
            tracks_per_side: 77,
            sectors_per_track: 26,
            bytes_per_sector,
        }
    }

    fn assert_positive(name: &str, value: usize) -> Result<()> {
        if value == 0 {
            return Err(UnitelError::config(format!("{} must be positive", name)));
        }
        Ok(())
    }

    /// Number of tracks per side
    pub fn tracks_per_side(&self) -> usize {
        self.tracks_per_side
    }

    /// Number of sectors per track
    pub fn sectors_per_track(&self) -> usize {
        self.sectors_per_track
    }

    /// Sector size in bytes
    pub fn bytes_per_sector(&self) -> usize {
        self.bytes_per_sector
    }

    /// Check a track number against the geometry
    ///
    /// The upper bound is inclusive: track `tracks_per_side` is accepted.
    pub fn validate_track(&self, name: &'static str, track: usize) -> Result<()> {
        if track > self.tracks_per_side {
            return Err(UnitelError::InvalidTrack {
                name,
                track,
                max: self.tracks_per_side,
            });
        }
        Ok(())
    }

    /// Check a sector number against the geometry
    pub fn validate_sector(&self, name: &'static str, sector: usize) -> Result<()> {
        if sector == 0 || sector > self.sectors_per_track {
            return Err(UnitelError::InvalidSector {
                name,
                sector,
                max: self.sectors_per_track,
            });
        }
        Ok(())
    }

    /// Size of a track in bytes
    pub fn track_size(&self) -> usize {
        self.sectors_per_track * self.bytes_per_sector
    }

    /// Size of a disk side in bytes
    pub fn disk_size(&self) -> usize {
        self.track_size() * self.tracks_per_side
    }

    /// Byte offset of the first byte of a sector
    pub fn offset(&self, track: usize, sector: usize) -> Result<usize> {
        self.validate_track("track", track)?;
        self.validate_sector("sector", sector)?;

        Ok(track * self.track_size() + (sector - 1) * self.bytes_per_sector)
    }
}
