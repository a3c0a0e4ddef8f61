pub mod geotiff;
pub mod crs;
pub mod coordinate;
pub mod adapter;

pub use geotiff::{GeoTiffError, GeoTiffResult, MetadataDecoder, MetadataEncoder, MetadataTree};
pub use crs::{AuthorityService, Crs, WktParser};
pub use coordinate::AffineTransform;
pub use adapter::{get_raster_to_model, CrsToMetadataAdapter, MetadataToCrsAdapter};
