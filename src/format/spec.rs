/// Unitel disk format specifications and presets

use crate::catalog::CatalogLayout;
use crate::error::Result;
use crate::format::Geometry;

/// Disk format specification
///
/// Bundles the disk geometry with the layout of the FICMAC page catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    /// Disk geometry
    pub geometry: Geometry,
    /// Screen layout of the FICMAC catalog
    pub catalog_layout: CatalogLayout,
}

impl FormatSpec {
    /// Create a new format specification with the default catalog layout
    pub fn new(
        tracks_per_side: usize,
        sectors_per_track: usize,
        bytes_per_sector: usize,
    ) -> Result<Self> {
        Ok(Self {
            geometry: Geometry::new(tracks_per_side, sectors_per_track, bytes_per_sector)?,
            catalog_layout: CatalogLayout::default(),
        })
    }

    /// IBM 3740 single density (77 tracks, 26 sectors, 128 bytes)
    pub fn ibm_3740() -> Self {
        Self {
            geometry: Geometry::ibm_3740(128),
            catalog_layout: CatalogLayout::default(),
        }
    }

    /// IBM 3740 "2D" double density (77 tracks, 26 sectors, 256 bytes)
    pub fn ibm_3740_2d() -> Self {
        Self {
            geometry: Geometry::ibm_3740(256),
            catalog_layout: CatalogLayout::default(),
        }
    }

    /// Set the geometry
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set the catalog layout
    pub fn with_catalog_layout(mut self, catalog_layout: CatalogLayout) -> Self {
        self.catalog_layout = catalog_layout;
        self
    }

    /// Total capacity of one side in bytes
    pub fn total_capacity(&self) -> usize {
        self.geometry.disk_size()
    }

    /// Total capacity of one side in kilobytes
    pub fn total_capacity_kb(&self) -> usize {
        self.total_capacity() / 1024
    }
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self::ibm_3740()
    }
}
