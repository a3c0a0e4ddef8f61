//! Authority and factory collaborator seams
//!
//! Resolving an EPSG-style code to a fully parameterized object is the
//! job of an external registry service; this crate only defines the seam.
//! References are passed in the `"EPSG:<code>"` form throughout.

use std::fmt;

use crate::crs::model::{Conversion, Crs, Ellipsoid, GeodeticDatum, GeographicCrs, PrimeMeridian, ProjectedCrs};
use crate::crs::units::Unit;

/// Failure reported by an authority or factory collaborator
#[derive(Debug)]
pub struct AuthorityError {
    pub message: String,
}

impl AuthorityError {
    pub fn new(message: impl Into<String>) -> Self {
        AuthorityError { message: message.into() }
    }
}

impl fmt::Display for AuthorityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AuthorityError {}

/// Registry service resolving `"EPSG:<code>"` references
///
/// Implementations are expected to be internally thread-safe lookup
/// services; resolution may be expensive, so adapters keep results local
/// to one invocation and never ask twice for the same object.
pub trait AuthorityService {
    fn projected_crs(&self, code: &str) -> Result<ProjectedCrs, AuthorityError>;
    fn geographic_crs(&self, code: &str) -> Result<GeographicCrs, AuthorityError>;
    fn datum(&self, code: &str) -> Result<GeodeticDatum, AuthorityError>;
    fn ellipsoid(&self, code: &str) -> Result<Ellipsoid, AuthorityError>;
    fn prime_meridian(&self, code: &str) -> Result<PrimeMeridian, AuthorityError>;
    fn unit(&self, code: &str) -> Result<Unit, AuthorityError>;
    fn conversion(&self, code: &str) -> Result<Conversion, AuthorityError>;
}

/// Narrow WKT-parsing collaborator for the "ESRI PE String" citation form
pub trait WktParser {
    fn parse_wkt(&self, wkt: &str) -> Result<Crs, AuthorityError>;
}

/// Formats a code as an `"EPSG:<code>"` reference, leaving an existing
/// authority prefix alone
pub fn epsg_ref(code: &str) -> String {
    let trimmed = code.trim();
    if trimmed.starts_with("EPSG") || trimmed.starts_with("epsg") {
        trimmed.to_string()
    } else {
        format!("EPSG:{}", trimmed)
    }
}

/// Parses a numeric EPSG code out of a decoded key or reference string
///
/// Returns None for anything non-numeric; no exceptions-as-control-flow.
pub fn parse_epsg_code(text: &str) -> Option<u32> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("EPSG:")
        .or_else(|| trimmed.strip_prefix("epsg:"))
        .unwrap_or(trimmed);
    digits.parse::<u32>().ok()
}
