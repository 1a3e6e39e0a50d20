/// Raw IBM 3740 image reader

use crate::error::Result;
use crate::image::{DiskImage, DiskImageBuilder};
use log::debug;
use std::path::Path;

/// Extensions commonly used for raw IBM 3740 dumps
const IMAGE_EXTENSIONS: [&str; 3] = ["img", "dsk", "bin"];

/// Check if a path looks like a raw disk image
pub fn is_image_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Read a whole image file and decode it with `builder`
pub fn read_image<P: AsRef<Path>>(path: P, builder: DiskImageBuilder) -> Result<DiskImage> {
    let raw = std::fs::read(&path)?;
    debug!("Read {} bytes from {}", raw.len(), path.as_ref().display());
    builder.load(&raw)
}
