/// Builder for loading Unitel disk images

use crate::catalog::CatalogLayout;
use crate::error::Result;
use crate::format::{FormatSpec, Geometry};
use crate::image::DiskImage;
use crate::transcode::Transcoder;

/// Builder for decoding disk images with a custom configuration
///
/// Defaults to the IBM 3740 single density geometry, the built-in FICMAC
/// layout and the EBCDIC transcoding table.
#[derive(Debug, Clone, Default)]
pub struct DiskImageBuilder {
    spec: FormatSpec,
    transcoder: Transcoder,
}

impl DiskImageBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the format specification
    pub fn spec(mut self, spec: FormatSpec) -> Self {
        self.spec = spec;
        self
    }

    /// Set the disk geometry
    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.spec.geometry = geometry;
        self
    }

    /// Set the screen layout of the FICMAC catalog
    pub fn catalog_layout(mut self, catalog_layout: CatalogLayout) -> Self {
        self.spec.catalog_layout = catalog_layout;
        self
    }

    /// Set the transcoding table applied to the raw bytes
    pub fn transcoder(mut self, transcoder: Transcoder) -> Self {
        self.transcoder = transcoder;
        self
    }

    /// Get the format specification that will be used
    pub fn format_spec(&self) -> &FormatSpec {
        &self.spec
    }

    /// Decode a raw disk with the configured settings
    pub fn load(&self, raw: &[u8]) -> Result<DiskImage> {
        DiskImage::decode(self.spec.clone(), &self.transcoder, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Screen;
    use crate::error::ErrorKind;
    use crate::transcode::EBCDIC_TO_VDT;

    /// IBM 3740 directory track in EBCDIC with only the mandatory entries
    fn ebcdic_directory(bytes_per_sector: usize) -> Vec<u8> {
        let mut to_ebcdic = [0u8; 256];
        for (ebcdic, &vdt) in EBCDIC_TO_VDT.iter().enumerate() {
            to_ebcdic[vdt as usize] = ebcdic as u8;
        }

        let mut track = vec![b' '; 26 * bytes_per_sector];
        track[4 * bytes_per_sector..][..5].copy_from_slice(b"ERMAP");
        track[6 * bytes_per_sector..][..10].copy_from_slice(b"VOL1IBMIRD");
        track.iter().map(|&c| to_ebcdic[c as usize]).collect()
    }

    #[test]
    fn test_builder_default() {
        let builder = DiskImageBuilder::new();
        assert_eq!(builder.format_spec(), &FormatSpec::ibm_3740());

        let image = builder.load(&ebcdic_directory(128)).unwrap();
        assert_eq!(image.diskinfo().unwrap().label, "IBMIRD");
        assert!(image.dir().is_empty());
    }

    #[test]
    fn test_builder_with_spec() {
        let image = DiskImageBuilder::new()
            .spec(FormatSpec::ibm_3740_2d())
            .load(&ebcdic_directory(256))
            .unwrap();

        assert_eq!(image.geometry().bytes_per_sector(), 256);
        assert_eq!(image.entries().len(), 26);
    }

    #[test]
    fn test_builder_wrong_table() {
        // Raw EBCDIC read as videotex has no magic numbers
        let err = DiskImageBuilder::new()
            .transcoder(Transcoder::identity())
            .load(&ebcdic_directory(128))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
    }

    #[test]
    fn test_builder_catalog_layout() {
        let layout = CatalogLayout::new(vec![Screen { offset: 0x80, count: 2 }]).unwrap();
        let builder = DiskImageBuilder::new().catalog_layout(layout.clone());
        assert_eq!(builder.format_spec().catalog_layout, layout);
        assert_eq!(builder.format_spec().geometry, FormatSpec::ibm_3740().geometry);
    }

    #[test]
    fn test_builder_geometry() {
        let geometry = Geometry::new(77, 26, 256).unwrap();
        let builder = DiskImageBuilder::new().geometry(geometry);
        assert_eq!(builder.format_spec().geometry, geometry);

        // 128-byte track is too short for a 256-byte geometry
        let err = builder.load(&ebcdic_directory(128)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }
}
