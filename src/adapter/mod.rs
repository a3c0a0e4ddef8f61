//! Metadata/CRS translation adapters
//!
//! The two directions of the translation layer plus the raster-to-model
//! transform builder.

mod crs_to_metadata;
mod metadata_to_crs;
mod raster_to_model;
mod tests;

// Re-export key types
pub use self::crs_to_metadata::CrsToMetadataAdapter;
pub use self::metadata_to_crs::MetadataToCrsAdapter;
pub use self::raster_to_model::{get_raster_to_model, get_raster_type, PixelAnchor};
