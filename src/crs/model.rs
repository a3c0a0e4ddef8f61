//! Coordinate reference system object model
//!
//! Structured description of geographic and projected reference systems:
//! ellipsoid, prime meridian, datum, the two CRS kinds and the conversion
//! (map projection) that links them. Every identified object may carry an
//! EPSG authority code; `None` means user-defined.

use crate::crs::units::Unit;

/// An ellipsoid defined by semi-major axis and inverse flattening
///
/// The semi-minor axis is always derived, mirroring the metadata encoding
/// which stores the (semi-major, inverse-flattening) pair. An infinite
/// inverse flattening denotes a perfect sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipsoid {
    pub name: String,
    pub semi_major_axis: f64,
    pub inverse_flattening: f64,
    pub unit: Unit,
    pub epsg: Option<u32>,
}

impl Ellipsoid {
    /// Builds an ellipsoid from semi-major axis and inverse flattening
    pub fn flattened_sphere(name: &str, semi_major_axis: f64, inverse_flattening: f64, unit: Unit) -> Self {
        Ellipsoid {
            name: name.to_string(),
            semi_major_axis,
            inverse_flattening,
            unit,
            epsg: None,
        }
    }

    /// The WGS 84 ellipsoid (EPSG:7030)
    pub fn wgs84() -> Self {
        Ellipsoid {
            name: "WGS 84".to_string(),
            semi_major_axis: 6378137.0,
            inverse_flattening: 298.257223563,
            unit: Unit::metre(),
            epsg: Some(7030),
        }
    }

    /// The derived semi-minor axis; equals the semi-major for a sphere
    pub fn semi_minor_axis(&self) -> f64 {
        if self.inverse_flattening.is_infinite() {
            self.semi_major_axis
        } else {
            self.semi_major_axis * (1.0 - 1.0 / self.inverse_flattening)
        }
    }
}

/// A prime meridian with its longitude from Greenwich
#[derive(Debug, Clone, PartialEq)]
pub struct PrimeMeridian {
    pub name: String,
    pub greenwich_longitude: f64,
    pub unit: Unit,
    pub epsg: Option<u32>,
}

impl PrimeMeridian {
    pub fn new(name: &str, greenwich_longitude: f64, unit: Unit) -> Self {
        PrimeMeridian {
            name: name.to_string(),
            greenwich_longitude,
            unit,
            epsg: None,
        }
    }

    /// The Greenwich meridian (EPSG:8901)
    pub fn greenwich() -> Self {
        PrimeMeridian {
            name: "Greenwich".to_string(),
            greenwich_longitude: 0.0,
            unit: Unit::degree(),
            epsg: Some(8901),
        }
    }
}

/// A geodetic datum owning exactly one ellipsoid and one prime meridian
#[derive(Debug, Clone, PartialEq)]
pub struct GeodeticDatum {
    pub name: String,
    pub ellipsoid: Ellipsoid,
    pub prime_meridian: PrimeMeridian,
    pub epsg: Option<u32>,
}

impl GeodeticDatum {
    pub fn new(name: &str, ellipsoid: Ellipsoid, prime_meridian: PrimeMeridian) -> Self {
        GeodeticDatum {
            name: name.to_string(),
            ellipsoid,
            prime_meridian,
            epsg: None,
        }
    }

    /// The World Geodetic System 1984 datum (EPSG:6326)
    pub fn wgs84() -> Self {
        GeodeticDatum {
            name: "World Geodetic System 1984".to_string(),
            ellipsoid: Ellipsoid::wgs84(),
            prime_meridian: PrimeMeridian::greenwich(),
            epsg: Some(6326),
        }
    }
}

/// A geographic (latitude/longitude) coordinate reference system
#[derive(Debug, Clone, PartialEq)]
pub struct GeographicCrs {
    pub name: String,
    pub datum: GeodeticDatum,
    pub angular_unit: Unit,
    pub epsg: Option<u32>,
}

impl GeographicCrs {
    pub fn new(name: &str, datum: GeodeticDatum, angular_unit: Unit) -> Self {
        GeographicCrs {
            name: name.to_string(),
            datum,
            angular_unit,
            epsg: None,
        }
    }

    /// WGS 84 geographic CRS (EPSG:4326)
    pub fn wgs84() -> Self {
        GeographicCrs {
            name: "WGS 84".to_string(),
            datum: GeodeticDatum::wgs84(),
            angular_unit: Unit::degree(),
            epsg: Some(4326),
        }
    }
}

/// An ordered group of named numeric parameter values
///
/// Setting an existing name replaces its value; names keep their first
/// insertion position so serialization order stays stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterGroup {
    values: Vec<(String, f64)>,
}

impl ParameterGroup {
    pub fn new() -> Self {
        ParameterGroup { values: Vec::new() }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    /// First hit among several alternative spellings of one parameter
    pub fn get_any(&self, names: &[&str]) -> Option<f64> {
        names.iter().find_map(|n| self.get(n))
    }

    pub fn set(&mut self, name: &str, value: f64) {
        if let Some(slot) = self.values.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value;
            return;
        }
        self.values.push((name.to_string(), value));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A named conversion from a geographic base to a projected system
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub name: String,
    /// Operation method name, e.g. "Transverse_Mercator"
    pub method_name: String,
    pub parameters: ParameterGroup,
    pub epsg: Option<u32>,
}

impl Conversion {
    pub fn new(name: &str, method_name: &str, parameters: ParameterGroup) -> Self {
        Conversion {
            name: name.to_string(),
            method_name: method_name.to_string(),
            parameters,
            epsg: None,
        }
    }
}

/// A projected coordinate reference system
///
/// Always owns exactly one base geographic CRS plus the conversion that
/// projects it, expressed in the given linear unit.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedCrs {
    pub name: String,
    pub base: GeographicCrs,
    pub conversion: Conversion,
    pub linear_unit: Unit,
    pub epsg: Option<u32>,
}

impl ProjectedCrs {
    pub fn new(name: &str, base: GeographicCrs, conversion: Conversion, linear_unit: Unit) -> Self {
        ProjectedCrs {
            name: name.to_string(),
            base,
            conversion,
            linear_unit,
            epsg: None,
        }
    }
}

/// A coordinate reference system this crate can describe
///
/// Vertical, compound, fitted and local systems are deliberately absent.
#[derive(Debug, Clone, PartialEq)]
pub enum Crs {
    Geographic(GeographicCrs),
    Projected(ProjectedCrs),
}

impl Crs {
    pub fn name(&self) -> &str {
        match self {
            Crs::Geographic(gcrs) => &gcrs.name,
            Crs::Projected(pcrs) => &pcrs.name,
        }
    }

    pub fn epsg(&self) -> Option<u32> {
        match self {
            Crs::Geographic(gcrs) => gcrs.epsg,
            Crs::Projected(pcrs) => pcrs.epsg,
        }
    }
}
