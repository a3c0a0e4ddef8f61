//! Custom error types for GeoTIFF metadata processing

use std::fmt;

/// GeoTIFF metadata-specific error types
#[derive(Debug)]
pub enum GeoTiffError {
    /// The CRS kind is not geographic or projected
    UnsupportedCrsType(String),
    /// The projection family is not in the supported set
    UnsupportedProjection(String),
    /// A value does not fit the unsigned 16-bit range required by the format
    ValueOutOfRange(String),
    /// Two mutually exclusive fields were both set
    ConflictingFields(String),
    /// A GeoKey was read back under a different storage kind than it was stored
    WrongStorageKind { key_id: u16, expected: u16, actual: u16 },
    /// The metadata tree is missing required structure
    InvalidTree(String),
    /// A required key or parameter is missing
    MissingKey(String),
    /// Failure reported by the external authority/factory service
    Authority(String),
    /// No projection method matches the requested identifier
    NoSuchIdentifier(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for GeoTiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoTiffError::UnsupportedCrsType(msg) => write!(f, "Unsupported CRS type: {}", msg),
            GeoTiffError::UnsupportedProjection(msg) => write!(f, "Unsupported projection: {}", msg),
            GeoTiffError::ValueOutOfRange(msg) => write!(f, "Value out of range: {}", msg),
            GeoTiffError::ConflictingFields(msg) => write!(f, "Conflicting fields: {}", msg),
            GeoTiffError::WrongStorageKind { key_id, expected, actual } => write!(
                f,
                "Wrong storage kind for GeoKey {}: expected tag {}, found tag {}",
                key_id, expected, actual
            ),
            GeoTiffError::InvalidTree(msg) => write!(f, "Invalid metadata tree: {}", msg),
            GeoTiffError::MissingKey(msg) => write!(f, "Missing key: {}", msg),
            GeoTiffError::Authority(msg) => write!(f, "Authority service error: {}", msg),
            GeoTiffError::NoSuchIdentifier(msg) => write!(f, "No such identifier: {}", msg),
            GeoTiffError::GenericError(msg) => write!(f, "GeoTIFF error: {}", msg),
        }
    }
}

impl std::error::Error for GeoTiffError {}

impl From<String> for GeoTiffError {
    fn from(msg: String) -> Self {
        GeoTiffError::GenericError(msg)
    }
}

/// Result type for GeoTIFF metadata operations
pub type GeoTiffResult<T> = Result<T, GeoTiffError>;
