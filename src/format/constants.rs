/// IBM 3740 directory and Unitel catalog magic bytes and offsets

/// Size of a directory record
pub const RECORD_SIZE: usize = 128;

/// Sector sizes must be a multiple of this
pub const SECTOR_SIZE_UNIT: usize = 128;

/// Error map magic number
pub const ERROR_MAP_MAGIC: &[u8] = b"ERMAP";

/// Volume label magic number
pub const VOLUME_LABEL_MAGIC: &[u8] = b"VOL1";

/// Data set header magic number
pub const DATA_SET_MAGIC: &[u8] = b"HDR1";

/// Deleted data set header magic number
pub const DELETED_DATA_SET_MAGIC: &[u8] = b"DDR1";

/// Directory slot (zero-based) holding the error map (sector 5)
pub const ERROR_MAP_SLOT: usize = 4;

/// Directory slot (zero-based) holding the volume label (sector 7)
pub const VOLUME_LABEL_SLOT: usize = 6;

/// Length of an IBM sector address field (TT0SS)
pub const IBM_ADDRESS_LENGTH: usize = 5;

/// Length of a Unitel sector address field (TTSS, hexadecimal)
pub const UNITEL_ADDRESS_LENGTH: usize = 4;

/// Identifier of the data set holding the page catalog
pub const CATALOG_IDENTIFIER: &str = "FICMAC";

/// Size of a page slot in the catalog
pub const CATALOG_SLOT_SIZE: usize = 0x40;

/// Offset of the "slot in use" digit within a catalog slot
pub const CATALOG_SLOT_FLAG_OFFSET: usize = 24;

/// Offset of the page sector address within a catalog slot
pub const CATALOG_SLOT_ADDRESS_OFFSET: usize = 25;

/// Offset of the page length within a catalog slot
pub const CATALOG_SLOT_LENGTH_OFFSET: usize = 29;

/// Length of the hexadecimal page length field
pub const CATALOG_SLOT_LENGTH_SIZE: usize = 4;

/// Sector size code to byte size mapping, as stored in VOL1 and HDR1 records
/// ('1'=256, '2'=512, '3'=1024, anything else=128)
#[inline]
pub fn size_code_to_bytes(code: u8) -> usize {
    match code {
        b'1' => 256,
        b'2' => 512,
        b'3' => 1024,
        _ => 128,
    }
}
