/// FICMAC page catalog
///
/// The FICMAC data set holds the videotex page index, grouped by screen.
/// Each screen is a run of 64-byte slots; a used slot points to a page
/// with a Unitel sector address (4 hex digits) and a length (4 hex digits).

use crate::error::{Result, UnitelError};
use crate::format::constants::*;
use crate::format::Geometry;
use crate::image::SectorAddress;
use crate::transcode::text;
use log::{debug, trace};
use std::path::Path;

/// A screen of the FICMAC catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    /// Byte offset of the first slot within the FICMAC content
    pub offset: usize,
    /// Number of page slots on the screen
    pub count: usize,
}

impl Screen {
    /// Byte offset just past the last slot, `None` when it cannot be addressed
    pub fn end(&self) -> Option<usize> {
        self.count
            .checked_mul(CATALOG_SLOT_SIZE)
            .and_then(|size| self.offset.checked_add(size))
    }
}

/// Ordered list of catalog screens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLayout {
    screens: Vec<Screen>,
}

impl CatalogLayout {
    /// Create a layout, rejecting empty layouts and empty screens
    pub fn new(screens: Vec<Screen>) -> Result<Self> {
        if screens.is_empty() {
            return Err(UnitelError::config("catalog layout has no screens"));
        }

        if let Some(index) = screens.iter().position(|s| s.count == 0) {
            return Err(UnitelError::config(format!(
                "catalog screen {} has no slots",
                index + 1
            )));
        }

        Ok(Self { screens })
    }

    /// Parse a layout description
    ///
    /// One screen per line as `offset count`. Offsets may be written in
    /// hexadecimal with a `0x` prefix. Blank lines and lines starting with
    /// `#` are ignored.
    pub fn parse(description: &str) -> Result<Self> {
        let mut screens = Vec::new();

        for (index, line) in description.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            let screen = match parts.as_slice() {
                [offset, count] => parse_number(offset)
                    .zip(parse_number(count))
                    .map(|(offset, count)| Screen { offset, count }),
                _ => None,
            };

            match screen {
                Some(screen) => screens.push(screen),
                None => {
                    return Err(UnitelError::config(format!(
                        "catalog layout line {}: expected \"offset count\", got {:?}",
                        index + 1,
                        line
                    )))
                }
            }
        }

        Self::new(screens)
    }

    /// Load a layout description from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let description = std::fs::read_to_string(path)?;
        Self::parse(&description)
    }

    /// Get the screens in catalog order
    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    /// Total number of page slots
    pub fn slot_count(&self) -> usize {
        self.screens
            .iter()
            .fold(0, |total: usize, s| total.saturating_add(s.count))
    }
}

impl Default for CatalogLayout {
    /// Four screens of sixteen slots, packed from the start of FICMAC
    fn default() -> Self {
        let screens = (0..4)
            .map(|i| Screen {
                offset: i * 16 * CATALOG_SLOT_SIZE,
                count: 16,
            })
            .collect();
        Self { screens }
    }
}

fn parse_number(value: &str) -> Option<usize> {
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}

/// A videotex page located by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDescriptor {
    /// First sector of the page
    pub offset: SectorAddress,
    /// Page length in bytes
    pub length: usize,
}

/// Decode the page descriptors of a FICMAC data set
///
/// Screens are visited in layout order and slots in order within each
/// screen. A slot whose flag digit is `'0'` is unused and skipped.
pub fn parse_catalog(
    geometry: Geometry,
    layout: &CatalogLayout,
    ficmac: &[u8],
) -> Result<Vec<PageDescriptor>> {
    let mut pages = Vec::new();

    for (screen_index, screen) in layout.screens().iter().enumerate() {
        for slot_index in 0..screen.count {
            let slot = slot_index
                .checked_mul(CATALOG_SLOT_SIZE)
                .and_then(|relative| screen.offset.checked_add(relative))
                .and_then(|start| Some(start..start.checked_add(CATALOG_SLOT_SIZE)?))
                .and_then(|range| ficmac.get(range));
            let slot = slot.ok_or_else(|| {
                UnitelError::invalid_format(format!(
                    "catalog slot {} of screen {} ends past FICMAC ({} bytes)",
                    slot_index + 1,
                    screen_index + 1,
                    ficmac.len()
                ))
            })?;

            if slot[CATALOG_SLOT_FLAG_OFFSET] == b'0' {
                trace!("Screen {} slot {} unused", screen_index + 1, slot_index + 1);
                continue;
            }

            let offset = SectorAddress::from_unitel(
                geometry,
                &slot[CATALOG_SLOT_ADDRESS_OFFSET..CATALOG_SLOT_ADDRESS_OFFSET + UNITEL_ADDRESS_LENGTH],
            )?;
            let length = hex_field(
                &slot[CATALOG_SLOT_LENGTH_OFFSET..CATALOG_SLOT_LENGTH_OFFSET + CATALOG_SLOT_LENGTH_SIZE],
            )?;

            debug!(
                "Screen {} slot {}: page at {} ({} bytes)",
                screen_index + 1,
                slot_index + 1,
                offset,
                length
            );
            pages.push(PageDescriptor { offset, length });
        }
    }

    Ok(pages)
}

fn hex_field(field: &[u8]) -> Result<usize> {
    if !field.iter().all(u8::is_ascii_hexdigit) {
        return Err(UnitelError::range(format!(
            "page length {:?} is not hexadecimal",
            text(field)
        )));
    }
    usize::from_str_radix(&text(field), 16)
        .map_err(|e| UnitelError::range(format!("page length {:?}: {}", text(field), e)))
}
