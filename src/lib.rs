/*!
# unitel

A Rust library for decoding Unitel videotex disks stored as raw IBM 3740
floppy images.

## Features

- EBCDIC to videotex transcoding with a built-in or external table
- IBM 3740 directory decoding (error map, volume label, data sets)
- Data set extraction by identifier
- FICMAC page catalog with a configurable screen layout
- Idiomatic Rust API with comprehensive error handling

## Quick Start

```rust,no_run
use unitel::DiskImage;

// Open an existing image
let image = DiskImage::open("unitel.img")?;

// Volume label
let label = image.diskinfo()?;
println!("{} ({})", label.label, label.owner);

// Live data sets
for data_set in image.dir() {
    println!("{}: {} bytes", data_set.identifier, data_set.extent_len());
}

// Videotex pages
for page in image.catalog()? {
    let content = image.page(&page)?;
    println!("{}: {} bytes", page.offset, content.len());
}
# Ok::<(), unitel::UnitelError>(())
```

## Disk Layout

Track 0 holds the directory, one 128-byte record per sector. Sector 5 must
hold the error map and sector 7 the volume label. Data sets point to their
extents with IBM `TT0SS` addresses; the FICMAC catalog points to pages with
Unitel `TTSS` hexadecimal addresses.

## Modules

- `format`: geometry, constants and format presets
- `transcode`: EBCDIC to videotex transcoding
- `directory`: directory entries (ERMAP, VOL1, HDR1/DDR1)
- `catalog`: FICMAC page catalog
- `image`: loaded disk image and sector addresses
- `io`: reading images from the host
- `error`: Error types and Result alias
*/

#![warn(missing_docs)]

/// FICMAC page catalog
pub mod catalog;
/// Directory entries of track 0
pub mod directory;
/// Error types and Result alias
pub mod error;
/// Disk geometry, constants and format presets
pub mod format;
/// Loaded disk image and sector addresses
pub mod image;
/// I/O operations for reading disk images
pub mod io;
/// EBCDIC to videotex transcoding
pub mod transcode;

// Re-export common types
pub use catalog::{parse_catalog, CatalogLayout, PageDescriptor, Screen};
pub use directory::{DataSet, DirectoryEntry, ErrorMap, VolumeLabel};
pub use error::{ErrorKind, Result, UnitelError};
pub use format::{detect_entry_kind, EntryKind, FormatSpec, Geometry};
pub use image::{DiskImage, DiskImageBuilder, SectorAddress};
pub use transcode::Transcoder;
