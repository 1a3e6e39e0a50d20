use thiserror::Error;

/// Result type alias for Unitel operations
pub type Result<T> = std::result::Result<T, UnitelError>;

/// Errors that can occur when decoding Unitel disk images
#[derive(Debug, Error)]
pub enum UnitelError {
    /// I/O error occurred while reading an image or a table
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid geometry parameters or missing/incomplete lookup tables
    #[error("Configuration error: {0}")]
    Config(String),

    /// Record too short, missing magic number or malformed field length
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Field parse error at a specific record offset
    #[error("Parse error at offset {offset}: {message}")]
    ParseError {
        /// Byte offset of the field within its record
        offset: usize,
        /// Error message
        message: String,
    },

    /// Track number outside the disk geometry
    #[error("Invalid {name} {track} (max: {max})")]
    InvalidTrack {
        /// Name of the offending parameter
        name: &'static str,
        /// Track number
        track: usize,
        /// Maximum allowed track number
        max: usize,
    },

    /// Sector number outside the disk geometry
    #[error("Invalid {name} {sector} (range: 1..={max})")]
    InvalidSector {
        /// Name of the offending parameter
        name: &'static str,
        /// Sector number
        sector: usize,
        /// Maximum allowed sector number
        max: usize,
    },

    /// Value outside its allowed range (bad digit, non-positive length)
    #[error("Out of range: {0}")]
    Range(String),

    /// Data set or directory entry not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Directory decoded but mandatory entries are missing
    #[error("Invalid disk image: {0}")]
    Structural(String),
}

/// Broad classification of an error, for presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Host I/O failure
    Io,
    /// Geometry or external table problem
    Config,
    /// Record-level decoding problem
    Format,
    /// Address, digit or length out of range
    Range,
    /// Lookup failed
    NotFound,
    /// Mandatory directory slots are wrong
    Structural,
}

impl UnitelError {
    /// Create a parse error with context
    pub fn parse<S: Into<String>>(offset: usize, message: S) -> Self {
        UnitelError::ParseError {
            offset,
            message: message.into(),
        }
    }

    /// Create an invalid format error
    pub fn invalid_format<S: Into<String>>(message: S) -> Self {
        UnitelError::InvalidFormat(message.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        UnitelError::Config(message.into())
    }

    /// Create a range error
    pub fn range<S: Into<String>>(message: S) -> Self {
        UnitelError::Range(message.into())
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        UnitelError::NotFound(message.into())
    }

    /// Create a structural error
    pub fn structural<S: Into<String>>(message: S) -> Self {
        UnitelError::Structural(message.into())
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            UnitelError::Io(_) => ErrorKind::Io,
            UnitelError::Config(_) => ErrorKind::Config,
            UnitelError::InvalidFormat(_) | UnitelError::ParseError { .. } => ErrorKind::Format,
            UnitelError::InvalidTrack { .. }
            | UnitelError::InvalidSector { .. }
            | UnitelError::Range(_) => ErrorKind::Range,
            UnitelError::NotFound(_) => ErrorKind::NotFound,
            UnitelError::Structural(_) => ErrorKind::Structural,
        }
    }
}
