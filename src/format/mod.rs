/// IBM 3740 directory format: geometry, constants and presets

/// Format constants
pub mod constants;
/// Disk geometry
pub mod geometry;
/// Format specification presets
pub mod spec;

pub use constants::*;
pub use geometry::Geometry;
pub use spec::FormatSpec;

/// Directory entry type, as announced by its magic number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// ERMAP record
    ErrorMap,
    /// VOL1 record
    VolumeLabel,
    /// HDR1 or DDR1 record
    DataSet,
}

impl EntryKind {
    /// Get the magic bytes for this entry kind
    pub fn magic_bytes(&self) -> &'static [u8] {
        match self {
            EntryKind::ErrorMap => ERROR_MAP_MAGIC,
            EntryKind::VolumeLabel => VOLUME_LABEL_MAGIC,
            EntryKind::DataSet => DATA_SET_MAGIC,
        }
    }

    /// Get a human-readable name for this entry kind
    pub fn name(&self) -> &'static str {
        match self {
            EntryKind::ErrorMap => "Error map",
            EntryKind::VolumeLabel => "Volume label",
            EntryKind::DataSet => "Data set",
        }
    }
}

/// Detect the entry kind of a directory record from its magic bytes
///
/// Magic numbers are checked in priority order: ERMAP, VOL1, HDR1/DDR1.
/// Returns `None` for an unused slot.
pub fn detect_entry_kind(record: &[u8]) -> Option<EntryKind> {
    if record.starts_with(ERROR_MAP_MAGIC) {
        Some(EntryKind::ErrorMap)
    } else if record.starts_with(VOLUME_LABEL_MAGIC) {
        Some(EntryKind::VolumeLabel)
    } else if record.starts_with(DATA_SET_MAGIC) || record.starts_with(DELETED_DATA_SET_MAGIC) {
        Some(EntryKind::DataSet)
    } else {
        None
    }
}
