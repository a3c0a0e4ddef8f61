//! GeoTIFF metadata model
//!
//! This module provides the tag/field metadata tree, the GeoKey directory
//! types, and the decoder/encoder pair that translate between the two.

pub mod errors;
pub mod tree;
mod tests;
pub mod keys;
pub mod values;
pub mod decoder;
pub mod encoder;
pub mod citation;
pub(crate) mod constants;

pub use errors::{GeoTiffError, GeoTiffResult};
pub use tree::{FieldValues, MetadataTree, TiffField};
pub use keys::{GeoKeyEntry, get_code_name, get_key_name, get_tag_name, is_geotiff_tag};
pub use values::{ModelTransformation, PixelScale, TiePoint};
pub use decoder::{DirectoryHeader, MetadataDecoder};
pub use encoder::MetadataEncoder;
pub use citation::GeographicCitation;
