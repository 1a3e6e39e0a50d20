/// I/O operations for reading disk images from the host

/// Reader implementation for raw IBM 3740 images
pub mod reader;

pub use reader::{is_image_file, read_image};
