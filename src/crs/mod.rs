//! Coordinate reference system model
//!
//! This module provides the structured CRS description consumed and
//! produced by the metadata adapters, the unit-of-measure model, the
//! projection family registry and the external collaborator seams.

mod units;
mod model;
pub mod projection;
mod authority;

// Re-export key types
pub use self::units::{canonical_unit_name, Unit, UnitKind};
pub use self::model::{
    Conversion, Crs, Ellipsoid, GeodeticDatum, GeographicCrs, ParameterGroup,
    PrimeMeridian, ProjectedCrs,
};
pub use self::projection::{ProjectionDescriptor, ProjectionFamily};
pub use self::authority::{epsg_ref, parse_epsg_code, AuthorityError, AuthorityService, WktParser};
