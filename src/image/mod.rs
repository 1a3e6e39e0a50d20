/// Unitel disk image container

/// Sector addresses (IBM and Unitel forms)
pub mod address;
/// Image builder for loading disks with a custom configuration
pub mod builder;

pub use address::SectorAddress;
pub use builder::DiskImageBuilder;

use crate::catalog::{parse_catalog, PageDescriptor};
use crate::directory::{DataSet, DirectoryEntry, ErrorMap, VolumeLabel};
use crate::error::{Result, UnitelError};
use crate::format::constants::*;
use crate::format::{FormatSpec, Geometry};
use crate::transcode::Transcoder;
use log::{debug, warn};
use std::path::Path;

/// A fully loaded Unitel disk
///
/// Holds the transcoded disk content and the decoded track 0 directory.
/// Nothing is mutated after loading, so a `DiskImage` can be shared across
/// threads and queried concurrently.
#[derive(Debug, Clone)]
pub struct DiskImage {
    /// Transcoded disk content
    pub(crate) bytes: Vec<u8>,
    /// Directory, one entry per sector of track 0
    pub(crate) entries: Vec<DirectoryEntry>,
    /// Format specification used to decode the image
    pub(crate) spec: FormatSpec,
}

impl DiskImage {
    /// Load a raw EBCDIC disk with the IBM 3740 defaults
    pub fn load(raw: &[u8]) -> Result<Self> {
        DiskImageBuilder::new().load(raw)
    }

    /// Open a disk image file with the IBM 3740 defaults
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        crate::io::read_image(path, DiskImageBuilder::new())
    }

    /// Create a new builder for loading disk images
    pub fn builder() -> DiskImageBuilder {
        DiskImageBuilder::new()
    }

    /// Decode a raw disk
    ///
    /// The buffer must hold at least the directory track. It is transcoded
    /// as a whole, then every sector of track 0 is decoded as a directory
    /// entry. Slot 5 must hold the error map and slot 7 the volume label.
    pub(crate) fn decode(spec: FormatSpec, transcoder: &Transcoder, raw: &[u8]) -> Result<Self> {
        let geometry = spec.geometry;

        if raw.len() < geometry.track_size() {
            return Err(UnitelError::invalid_format(format!(
                "IBM 3740 image too short for its directory track ({} < {} bytes)",
                raw.len(),
                geometry.track_size()
            )));
        }

        let bytes = transcoder.transcode(raw);
        let entries = read_directory(geometry, &bytes)?;

        let image = Self {
            bytes,
            entries,
            spec,
        };
        image.check_mandatory_entries()?;

        debug!(
            "Loaded {} bytes, {} data sets",
            image.bytes.len(),
            image.dir().len()
        );
        Ok(image)
    }

    fn check_mandatory_entries(&self) -> Result<()> {
        if !matches!(self.entries.get(ERROR_MAP_SLOT), Some(DirectoryEntry::ErrorMap(_))) {
            return Err(UnitelError::structural(format!(
                "error map not found in directory slot {}",
                ERROR_MAP_SLOT + 1
            )));
        }

        if !matches!(
            self.entries.get(VOLUME_LABEL_SLOT),
            Some(DirectoryEntry::VolumeLabel(_))
        ) {
            return Err(UnitelError::structural(format!(
                "volume label not found in directory slot {}",
                VOLUME_LABEL_SLOT + 1
            )));
        }

        Ok(())
    }

    /// Get the format specification
    pub fn spec(&self) -> &FormatSpec {
        &self.spec
    }

    /// Get the disk geometry
    pub fn geometry(&self) -> Geometry {
        self.spec.geometry
    }

    /// Get the whole transcoded disk
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Extract `length` bytes starting at a sector
    ///
    /// The slice stops early at the end of the disk.
    pub fn get_bytes(&self, address: &SectorAddress, length: usize) -> Result<&[u8]> {
        if length == 0 {
            return Err(UnitelError::range("null length"));
        }

        Ok(self.slice(address.offset(), address.offset().saturating_add(length)))
    }

    /// Read one whole sector
    pub fn read_sector(&self, track: usize, sector: usize) -> Result<&[u8]> {
        let geometry = self.geometry();
        let address = SectorAddress::new(geometry, track, sector)?;
        self.get_bytes(&address, geometry.bytes_per_sector())
    }

    /// Get every directory entry, in sector order
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// List the data sets that are not deleted, in directory order
    pub fn dir(&self) -> Vec<&DataSet> {
        self.entries
            .iter()
            .filter_map(DirectoryEntry::as_data_set)
            .filter(|data_set| !data_set.is_deleted())
            .collect()
    }

    /// Get the volume label
    pub fn diskinfo(&self) -> Result<&VolumeLabel> {
        self.entries
            .iter()
            .find_map(DirectoryEntry::as_volume_label)
            .ok_or_else(|| UnitelError::not_found("volume label"))
    }

    /// Get the error map
    pub fn error_map(&self) -> Result<&ErrorMap> {
        self.entries
            .iter()
            .find_map(DirectoryEntry::as_error_map)
            .ok_or_else(|| UnitelError::not_found("error map"))
    }

    /// Find a data set that is not deleted by its exact identifier
    pub fn find(&self, identifier: &str) -> Result<&DataSet> {
        self.dir()
            .into_iter()
            .find(|data_set| data_set.identifier == identifier)
            .ok_or_else(|| UnitelError::not_found(format!("data set {:?}", identifier)))
    }

    /// Get the whole extent of a data set
    ///
    /// Returns every byte from the first sector of the extent to the last
    /// byte of its final sector.
    pub fn get_file(&self, identifier: &str) -> Result<&[u8]> {
        let data_set = self.find(identifier)?;
        let begin = data_set.beginning_of_extent;
        let end = data_set.end_of_extent;

        if end.offset() < begin.offset() {
            return Err(UnitelError::invalid_format(format!(
                "data set {:?} ends at {} before it begins at {}",
                identifier, end, begin
            )));
        }

        Ok(self.slice(begin.offset(), end.last_offset() + 1))
    }

    /// Get the used part of a data set extent
    ///
    /// Stops before the end of data sector.
    pub fn get_file_data(&self, identifier: &str) -> Result<&[u8]> {
        let data_set = self.find(identifier)?;
        let begin = data_set.beginning_of_extent;
        let end = data_set.end_of_data;

        if end.offset() < begin.offset() {
            return Err(UnitelError::invalid_format(format!(
                "data set {:?} data ends at {} before it begins at {}",
                identifier, end, begin
            )));
        }

        Ok(self.slice(begin.offset(), end.offset()))
    }

    /// List the videotex pages of the FICMAC catalog
    pub fn catalog(&self) -> Result<Vec<PageDescriptor>> {
        let ficmac = self.get_file(CATALOG_IDENTIFIER)?;
        parse_catalog(self.geometry(), &self.spec.catalog_layout, ficmac)
    }

    /// Get the content of a videotex page
    pub fn page(&self, page: &PageDescriptor) -> Result<&[u8]> {
        self.get_bytes(&page.offset, page.length)
    }

    /// Total capacity of the disk geometry in bytes
    pub fn total_capacity(&self) -> usize {
        self.spec.total_capacity()
    }

    fn slice(&self, start: usize, end: usize) -> &[u8] {
        let len = self.bytes.len();
        if end > len {
            warn!(
                "Range {:#X}..{:#X} clamped to the end of the disk ({:#X})",
                start, end, len
            );
        }
        let start = start.min(len);
        &self.bytes[start..end.clamp(start, len)]
    }
}

/// Decode every sector of track 0
fn read_directory(geometry: Geometry, bytes: &[u8]) -> Result<Vec<DirectoryEntry>> {
    let bytes_per_sector = geometry.bytes_per_sector();

    (1..=geometry.sectors_per_track())
        .map(|sector| {
            let offset = geometry.offset(0, sector)?;
            let record = &bytes[offset..offset + bytes_per_sector];
            let entry = DirectoryEntry::parse(geometry, record)?;
            debug!(
                "Directory slot {}: {}",
                sector,
                entry.kind().map_or("empty", |kind| kind.name())
            );
            Ok(entry)
        })
        .collect()
}
