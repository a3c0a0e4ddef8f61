//! Map projection family registry
//!
//! One table describes every supported projection family: its coordinate
//! transformation code, its method name and the alternate spellings seen
//! in the wild, and the ordered parameter list with the GeoKey written on
//! export and the GeoKey fallback chain consulted on import. Both
//! translation directions read this same table, so the two can never
//! drift apart.
//!
//! The fallback chains are a compatibility contract with real-world files
//! whose writers routinely store a parameter under a neighbouring key;
//! their order must be preserved key-for-key.

use crate::crs::model::ParameterGroup;
use crate::geotiff::constants::{coord_trans, geo_keys};
use crate::geotiff::errors::{GeoTiffError, GeoTiffResult};

/// Supported projection families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionFamily {
    TransverseMercator,
    EquidistantCylindrical,
    Mercator1Sp,
    Mercator2Sp,
    LambertConformalConic1Sp,
    LambertConformalConic2Sp,
    Stereographic,
    PolarStereographic,
    ObliqueStereographic,
    ObliqueMercator,
    AlbersEqualArea,
    Orthographic,
    LambertAzimuthalEqualArea,
    AzimuthalEquidistant,
    VanDerGrinten,
    Sinusoidal,
}

/// Where an imported parameter value comes from
///
/// Each source names a fixed, ordered GeoKey fallback chain and the
/// default substituted when the whole chain is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
    OriginLong,
    OriginLat,
    FalseEasting,
    FalseNorthing,
    ScaleFactor,
    StdParallel1,
    StdParallel2,
    Azimuth,
}

impl ParamSource {
    /// The GeoKey fallback chain, most specific first
    pub fn chain(&self) -> &'static [u16] {
        match self {
            ParamSource::OriginLong => &[
                geo_keys::PROJ_CENTER_LONG,
                geo_keys::PROJ_NAT_ORIGIN_LONG,
                geo_keys::PROJ_FALSE_ORIGIN_LONG,
                geo_keys::PROJ_STRAIGHT_VERT_POLE_LONG,
                geo_keys::PROJ_FALSE_NORTHING,
            ],
            ParamSource::OriginLat => &[
                geo_keys::PROJ_CENTER_LAT,
                geo_keys::PROJ_NAT_ORIGIN_LAT,
                geo_keys::PROJ_FALSE_ORIGIN_LAT,
            ],
            ParamSource::FalseEasting => &[
                geo_keys::PROJ_FALSE_EASTING,
                geo_keys::PROJ_FALSE_ORIGIN_EASTING,
            ],
            ParamSource::FalseNorthing => &[
                geo_keys::PROJ_FALSE_NORTHING,
                geo_keys::PROJ_FALSE_ORIGIN_NORTHING,
            ],
            ParamSource::ScaleFactor => &[
                geo_keys::PROJ_SCALE_AT_CENTER,
                geo_keys::PROJ_SCALE_AT_NAT_ORIGIN,
            ],
            ParamSource::StdParallel1 => &[geo_keys::PROJ_STD_PARALLEL_1],
            ParamSource::StdParallel2 => &[geo_keys::PROJ_STD_PARALLEL_2],
            ParamSource::Azimuth => &[geo_keys::PROJ_AZIMUTH_ANGLE],
        }
    }

    /// Default when the whole chain is exhausted
    pub fn default_value(&self) -> f64 {
        match self {
            ParamSource::ScaleFactor => 1.0,
            _ => 0.0,
        }
    }
}

/// One parameter of a projection family
#[derive(Debug)]
pub struct ParamMapping {
    /// Accepted parameter names; the first is canonical
    pub names: &'static [&'static str],
    /// GeoKey the parameter is written to on export
    pub export_key: u16,
    /// GeoKey chain the parameter is read from on import
    pub source: ParamSource,
}

/// Full description of one projection family
#[derive(Debug)]
pub struct ProjectionDescriptor {
    pub family: ProjectionFamily,
    pub ct_code: u16,
    /// Canonical operation method name
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub params: &'static [ParamMapping],
}

const CENTRAL_MERIDIAN: &[&str] = &["central_meridian", "longitude_of_origin"];
const LATITUDE_OF_ORIGIN: &[&str] = &["latitude_of_origin"];
const LONGITUDE_OF_CENTER: &[&str] = &["longitude_of_center", "central_meridian"];
const LATITUDE_OF_CENTER: &[&str] = &["latitude_of_center", "latitude_of_origin"];
const SCALE_FACTOR: &[&str] = &["scale_factor"];
const STANDARD_PARALLEL_1: &[&str] = &["standard_parallel_1"];
const STANDARD_PARALLEL_2: &[&str] = &["standard_parallel_2"];
const FALSE_EASTING: &[&str] = &["false_easting"];
const FALSE_NORTHING: &[&str] = &["false_northing"];
const AZIMUTH: &[&str] = &["azimuth"];

/// Registry of every supported family
pub static DESCRIPTORS: &[ProjectionDescriptor] = &[
    ProjectionDescriptor {
        family: ProjectionFamily::TransverseMercator,
        ct_code: coord_trans::CT_TRANSVERSE_MERCATOR,
        name: "Transverse_Mercator",
        aliases: &[],
        params: &[
            ParamMapping { names: CENTRAL_MERIDIAN, export_key: geo_keys::PROJ_NAT_ORIGIN_LONG, source: ParamSource::OriginLong },
            ParamMapping { names: LATITUDE_OF_ORIGIN, export_key: geo_keys::PROJ_NAT_ORIGIN_LAT, source: ParamSource::OriginLat },
            ParamMapping { names: SCALE_FACTOR, export_key: geo_keys::PROJ_SCALE_AT_NAT_ORIGIN, source: ParamSource::ScaleFactor },
            ParamMapping { names: FALSE_EASTING, export_key: geo_keys::PROJ_FALSE_EASTING, source: ParamSource::FalseEasting },
            ParamMapping { names: FALSE_NORTHING, export_key: geo_keys::PROJ_FALSE_NORTHING, source: ParamSource::FalseNorthing },
        ],
    },
    ProjectionDescriptor {
        family: ProjectionFamily::EquidistantCylindrical,
        ct_code: coord_trans::CT_EQUIRECTANGULAR,
        name: "Equidistant_Cylindrical",
        aliases: &["Plate_Carree", "Equirectangular"],
        params: &[
            ParamMapping { names: LATITUDE_OF_ORIGIN, export_key: geo_keys::PROJ_NAT_ORIGIN_LAT, source: ParamSource::OriginLat },
            ParamMapping { names: CENTRAL_MERIDIAN, export_key: geo_keys::PROJ_NAT_ORIGIN_LONG, source: ParamSource::OriginLong },
            ParamMapping { names: FALSE_EASTING, export_key: geo_keys::PROJ_FALSE_EASTING, source: ParamSource::FalseEasting },
            ParamMapping { names: FALSE_NORTHING, export_key: geo_keys::PROJ_FALSE_NORTHING, source: ParamSource::FalseNorthing },
        ],
    },
    ProjectionDescriptor {
        family: ProjectionFamily::Mercator1Sp,
        ct_code: coord_trans::CT_MERCATOR,
        name: "Mercator_1SP",
        aliases: &[],
        params: &[
            ParamMapping { names: CENTRAL_MERIDIAN, export_key: geo_keys::PROJ_NAT_ORIGIN_LONG, source: ParamSource::OriginLong },
            ParamMapping { names: LATITUDE_OF_ORIGIN, export_key: geo_keys::PROJ_NAT_ORIGIN_LAT, source: ParamSource::OriginLat },
            ParamMapping { names: SCALE_FACTOR, export_key: geo_keys::PROJ_SCALE_AT_NAT_ORIGIN, source: ParamSource::ScaleFactor },
            ParamMapping { names: FALSE_EASTING, export_key: geo_keys::PROJ_FALSE_EASTING, source: ParamSource::FalseEasting },
            ParamMapping { names: FALSE_NORTHING, export_key: geo_keys::PROJ_FALSE_NORTHING, source: ParamSource::FalseNorthing },
        ],
    },
    ProjectionDescriptor {
        family: ProjectionFamily::Mercator2Sp,
        ct_code: coord_trans::CT_MERCATOR,
        name: "Mercator_2SP",
        aliases: &[],
        params: &[
            ParamMapping { names: CENTRAL_MERIDIAN, export_key: geo_keys::PROJ_NAT_ORIGIN_LONG, source: ParamSource::OriginLong },
            ParamMapping { names: LATITUDE_OF_ORIGIN, export_key: geo_keys::PROJ_NAT_ORIGIN_LAT, source: ParamSource::OriginLat },
            ParamMapping { names: STANDARD_PARALLEL_1, export_key: geo_keys::PROJ_STD_PARALLEL_1, source: ParamSource::StdParallel1 },
            ParamMapping { names: FALSE_EASTING, export_key: geo_keys::PROJ_FALSE_EASTING, source: ParamSource::FalseEasting },
            ParamMapping { names: FALSE_NORTHING, export_key: geo_keys::PROJ_FALSE_NORTHING, source: ParamSource::FalseNorthing },
        ],
    },
    ProjectionDescriptor {
        family: ProjectionFamily::LambertConformalConic1Sp,
        ct_code: coord_trans::CT_LAMBERT_CONF_CONIC_HELMERT,
        name: "Lambert_Conformal_Conic_1SP",
        aliases: &[],
        params: &[
            ParamMapping { names: CENTRAL_MERIDIAN, export_key: geo_keys::PROJ_NAT_ORIGIN_LONG, source: ParamSource::OriginLong },
            ParamMapping { names: LATITUDE_OF_ORIGIN, export_key: geo_keys::PROJ_NAT_ORIGIN_LAT, source: ParamSource::OriginLat },
            ParamMapping { names: SCALE_FACTOR, export_key: geo_keys::PROJ_SCALE_AT_NAT_ORIGIN, source: ParamSource::ScaleFactor },
            ParamMapping { names: FALSE_EASTING, export_key: geo_keys::PROJ_FALSE_EASTING, source: ParamSource::FalseEasting },
            ParamMapping { names: FALSE_NORTHING, export_key: geo_keys::PROJ_FALSE_NORTHING, source: ParamSource::FalseNorthing },
        ],
    },
    ProjectionDescriptor {
        family: ProjectionFamily::LambertConformalConic2Sp,
        ct_code: coord_trans::CT_LAMBERT_CONF_CONIC_2SP,
        name: "Lambert_Conformal_Conic_2SP",
        aliases: &["Lambert_Conformal_Conic_2SP_Belgium"],
        params: &[
            ParamMapping { names: CENTRAL_MERIDIAN, export_key: geo_keys::PROJ_NAT_ORIGIN_LONG, source: ParamSource::OriginLong },
            ParamMapping { names: LATITUDE_OF_ORIGIN, export_key: geo_keys::PROJ_NAT_ORIGIN_LAT, source: ParamSource::OriginLat },
            ParamMapping { names: STANDARD_PARALLEL_1, export_key: geo_keys::PROJ_STD_PARALLEL_1, source: ParamSource::StdParallel1 },
            ParamMapping { names: STANDARD_PARALLEL_2, export_key: geo_keys::PROJ_STD_PARALLEL_2, source: ParamSource::StdParallel2 },
            ParamMapping { names: FALSE_EASTING, export_key: geo_keys::PROJ_FALSE_EASTING, source: ParamSource::FalseEasting },
            ParamMapping { names: FALSE_NORTHING, export_key: geo_keys::PROJ_FALSE_NORTHING, source: ParamSource::FalseNorthing },
        ],
    },
    ProjectionDescriptor {
        family: ProjectionFamily::Stereographic,
        ct_code: coord_trans::CT_STEREOGRAPHIC,
        name: "Stereographic",
        aliases: &[],
        params: &[
            ParamMapping { names: CENTRAL_MERIDIAN, export_key: geo_keys::PROJ_NAT_ORIGIN_LONG, source: ParamSource::OriginLong },
            ParamMapping { names: LATITUDE_OF_ORIGIN, export_key: geo_keys::PROJ_NAT_ORIGIN_LAT, source: ParamSource::OriginLat },
            ParamMapping { names: SCALE_FACTOR, export_key: geo_keys::PROJ_SCALE_AT_NAT_ORIGIN, source: ParamSource::ScaleFactor },
            ParamMapping { names: FALSE_EASTING, export_key: geo_keys::PROJ_FALSE_EASTING, source: ParamSource::FalseEasting },
            ParamMapping { names: FALSE_NORTHING, export_key: geo_keys::PROJ_FALSE_NORTHING, source: ParamSource::FalseNorthing },
        ],
    },
    ProjectionDescriptor {
        family: ProjectionFamily::PolarStereographic,
        ct_code: coord_trans::CT_POLAR_STEREOGRAPHIC,
        name: "Polar_Stereographic",
        aliases: &[],
        params: &[
            // The straight-vertical-pole key carries the central meridian;
            // the origin-longitude chain includes it on the way back in.
            ParamMapping { names: CENTRAL_MERIDIAN, export_key: geo_keys::PROJ_STRAIGHT_VERT_POLE_LONG, source: ParamSource::OriginLong },
            ParamMapping { names: LATITUDE_OF_ORIGIN, export_key: geo_keys::PROJ_NAT_ORIGIN_LAT, source: ParamSource::OriginLat },
            ParamMapping { names: SCALE_FACTOR, export_key: geo_keys::PROJ_SCALE_AT_NAT_ORIGIN, source: ParamSource::ScaleFactor },
            ParamMapping { names: FALSE_EASTING, export_key: geo_keys::PROJ_FALSE_EASTING, source: ParamSource::FalseEasting },
            ParamMapping { names: FALSE_NORTHING, export_key: geo_keys::PROJ_FALSE_NORTHING, source: ParamSource::FalseNorthing },
        ],
    },
    ProjectionDescriptor {
        family: ProjectionFamily::ObliqueStereographic,
        ct_code: coord_trans::CT_OBLIQUE_STEREOGRAPHIC,
        name: "Oblique_Stereographic",
        aliases: &[],
        params: &[
            ParamMapping { names: CENTRAL_MERIDIAN, export_key: geo_keys::PROJ_NAT_ORIGIN_LONG, source: ParamSource::OriginLong },
            ParamMapping { names: LATITUDE_OF_ORIGIN, export_key: geo_keys::PROJ_NAT_ORIGIN_LAT, source: ParamSource::OriginLat },
            ParamMapping { names: SCALE_FACTOR, export_key: geo_keys::PROJ_SCALE_AT_NAT_ORIGIN, source: ParamSource::ScaleFactor },
            ParamMapping { names: FALSE_EASTING, export_key: geo_keys::PROJ_FALSE_EASTING, source: ParamSource::FalseEasting },
            ParamMapping { names: FALSE_NORTHING, export_key: geo_keys::PROJ_FALSE_NORTHING, source: ParamSource::FalseNorthing },
        ],
    },
    ProjectionDescriptor {
        family: ProjectionFamily::ObliqueMercator,
        ct_code: coord_trans::CT_OBLIQUE_MERCATOR,
        name: "Oblique_Mercator",
        aliases: &["Hotine_Oblique_Mercator"],
        params: &[
            ParamMapping { names: LONGITUDE_OF_CENTER, export_key: geo_keys::PROJ_CENTER_LONG, source: ParamSource::OriginLong },
            ParamMapping { names: LATITUDE_OF_CENTER, export_key: geo_keys::PROJ_CENTER_LAT, source: ParamSource::OriginLat },
            ParamMapping { names: SCALE_FACTOR, export_key: geo_keys::PROJ_SCALE_AT_CENTER, source: ParamSource::ScaleFactor },
            ParamMapping { names: AZIMUTH, export_key: geo_keys::PROJ_AZIMUTH_ANGLE, source: ParamSource::Azimuth },
            ParamMapping { names: FALSE_EASTING, export_key: geo_keys::PROJ_FALSE_EASTING, source: ParamSource::FalseEasting },
            ParamMapping { names: FALSE_NORTHING, export_key: geo_keys::PROJ_FALSE_NORTHING, source: ParamSource::FalseNorthing },
        ],
    },
    ProjectionDescriptor {
        family: ProjectionFamily::AlbersEqualArea,
        ct_code: coord_trans::CT_ALBERS_EQUAL_AREA,
        name: "Albers_Conic_Equal_Area",
        aliases: &["Albers_Equal_Area"],
        params: &[
            ParamMapping { names: LONGITUDE_OF_CENTER, export_key: geo_keys::PROJ_NAT_ORIGIN_LONG, source: ParamSource::OriginLong },
            ParamMapping { names: LATITUDE_OF_CENTER, export_key: geo_keys::PROJ_NAT_ORIGIN_LAT, source: ParamSource::OriginLat },
            ParamMapping { names: STANDARD_PARALLEL_1, export_key: geo_keys::PROJ_STD_PARALLEL_1, source: ParamSource::StdParallel1 },
            ParamMapping { names: STANDARD_PARALLEL_2, export_key: geo_keys::PROJ_STD_PARALLEL_2, source: ParamSource::StdParallel2 },
            ParamMapping { names: FALSE_EASTING, export_key: geo_keys::PROJ_FALSE_EASTING, source: ParamSource::FalseEasting },
            ParamMapping { names: FALSE_NORTHING, export_key: geo_keys::PROJ_FALSE_NORTHING, source: ParamSource::FalseNorthing },
        ],
    },
    ProjectionDescriptor {
        family: ProjectionFamily::Orthographic,
        ct_code: coord_trans::CT_ORTHOGRAPHIC,
        name: "Orthographic",
        aliases: &[],
        params: &[
            ParamMapping { names: &["longitude_of_origin", "central_meridian"], export_key: geo_keys::PROJ_CENTER_LONG, source: ParamSource::OriginLong },
            ParamMapping { names: LATITUDE_OF_ORIGIN, export_key: geo_keys::PROJ_CENTER_LAT, source: ParamSource::OriginLat },
            ParamMapping { names: FALSE_EASTING, export_key: geo_keys::PROJ_FALSE_EASTING, source: ParamSource::FalseEasting },
            ParamMapping { names: FALSE_NORTHING, export_key: geo_keys::PROJ_FALSE_NORTHING, source: ParamSource::FalseNorthing },
        ],
    },
    ProjectionDescriptor {
        family: ProjectionFamily::LambertAzimuthalEqualArea,
        ct_code: coord_trans::CT_LAMBERT_AZIM_EQUAL_AREA,
        name: "Lambert_Azimuthal_Equal_Area",
        aliases: &[],
        params: &[
            ParamMapping { names: LATITUDE_OF_CENTER, export_key: geo_keys::PROJ_CENTER_LAT, source: ParamSource::OriginLat },
            ParamMapping { names: LONGITUDE_OF_CENTER, export_key: geo_keys::PROJ_CENTER_LONG, source: ParamSource::OriginLong },
            ParamMapping { names: FALSE_EASTING, export_key: geo_keys::PROJ_FALSE_EASTING, source: ParamSource::FalseEasting },
            ParamMapping { names: FALSE_NORTHING, export_key: geo_keys::PROJ_FALSE_NORTHING, source: ParamSource::FalseNorthing },
        ],
    },
    ProjectionDescriptor {
        family: ProjectionFamily::AzimuthalEquidistant,
        ct_code: coord_trans::CT_AZIMUTHAL_EQUIDISTANT,
        name: "Azimuthal_Equidistant",
        aliases: &[],
        params: &[
            ParamMapping { names: LATITUDE_OF_CENTER, export_key: geo_keys::PROJ_CENTER_LAT, source: ParamSource::OriginLat },
            ParamMapping { names: LONGITUDE_OF_CENTER, export_key: geo_keys::PROJ_CENTER_LONG, source: ParamSource::OriginLong },
            ParamMapping { names: FALSE_EASTING, export_key: geo_keys::PROJ_FALSE_EASTING, source: ParamSource::FalseEasting },
            ParamMapping { names: FALSE_NORTHING, export_key: geo_keys::PROJ_FALSE_NORTHING, source: ParamSource::FalseNorthing },
        ],
    },
    ProjectionDescriptor {
        family: ProjectionFamily::VanDerGrinten,
        ct_code: coord_trans::CT_VAN_DER_GRINTEN,
        name: "Van_der_Grinten_I",
        aliases: &["Van_der_Grinten"],
        params: &[
            ParamMapping { names: CENTRAL_MERIDIAN, export_key: geo_keys::PROJ_CENTER_LONG, source: ParamSource::OriginLong },
            ParamMapping { names: FALSE_EASTING, export_key: geo_keys::PROJ_FALSE_EASTING, source: ParamSource::FalseEasting },
            ParamMapping { names: FALSE_NORTHING, export_key: geo_keys::PROJ_FALSE_NORTHING, source: ParamSource::FalseNorthing },
        ],
    },
    ProjectionDescriptor {
        family: ProjectionFamily::Sinusoidal,
        ct_code: coord_trans::CT_SINUSOIDAL,
        name: "Sinusoidal",
        aliases: &[],
        params: &[
            ParamMapping { names: LONGITUDE_OF_CENTER, export_key: geo_keys::PROJ_CENTER_LONG, source: ParamSource::OriginLong },
            ParamMapping { names: FALSE_EASTING, export_key: geo_keys::PROJ_FALSE_EASTING, source: ParamSource::FalseEasting },
            ParamMapping { names: FALSE_NORTHING, export_key: geo_keys::PROJ_FALSE_NORTHING, source: ParamSource::FalseNorthing },
        ],
    },
];

/// Trims and folds a method name to the `lower_snake` matching form
pub fn normalize_method_name(name: &str) -> String {
    name.trim().replace(' ', "_").to_lowercase()
}

/// Looks a family up by operation method name or alias
///
/// Lambert Conformal Conic spellings come in too many variants to list,
/// so any name in that family is disambiguated by whether it mentions a
/// single or a double standard parallel.
pub fn find_by_name(method_name: &str) -> Option<&'static ProjectionDescriptor> {
    let needle = normalize_method_name(method_name);

    if needle.contains("lambert_conformal_conic") {
        let family = if needle.contains('1') {
            ProjectionFamily::LambertConformalConic1Sp
        } else if needle.contains('2') {
            ProjectionFamily::LambertConformalConic2Sp
        } else {
            return None;
        };
        return DESCRIPTORS.iter().find(|d| d.family == family);
    }

    DESCRIPTORS.iter().find(|d| {
        normalize_method_name(d.name) == needle
            || d.aliases.iter().any(|a| normalize_method_name(a) == needle)
    })
}

/// Looks a family up by coordinate transformation code
///
/// The Mercator code is shared by the 1SP and 2SP forms; this returns the
/// 1SP descriptor and the import side switches on the presence of a
/// standard parallel.
pub fn find_by_code(ct_code: u16) -> Option<&'static ProjectionDescriptor> {
    DESCRIPTORS.iter().find(|d| d.ct_code == ct_code)
}

/// Finds the descriptor for a family variant directly
pub fn find_by_family(family: ProjectionFamily) -> Option<&'static ProjectionDescriptor> {
    DESCRIPTORS.iter().find(|d| d.family == family)
}

/// Builds the default parameter group for a method name
///
/// This is the math-transform-factory boundary: an unknown identifier is
/// a `NoSuchIdentifier` error. The group contains every family parameter
/// at its default plus semi-major/semi-minor axes seeded with WGS 84;
/// callers overwrite the axes with the actual ellipsoid.
pub fn default_parameters(method_name: &str) -> GeoTiffResult<(&'static ProjectionDescriptor, ParameterGroup)> {
    let descriptor = find_by_name(method_name).ok_or_else(|| {
        GeoTiffError::NoSuchIdentifier(format!("projection method {:?}", method_name))
    })?;
    Ok((descriptor, descriptor_defaults(descriptor)))
}

/// Default parameter group for a descriptor
pub fn descriptor_defaults(descriptor: &ProjectionDescriptor) -> ParameterGroup {
    let mut group = ParameterGroup::new();
    for mapping in descriptor.params {
        group.set(mapping.names[0], mapping.source.default_value());
    }
    group.set("semi_major", 6378137.0);
    group.set("semi_minor", 6356752.314245179);
    group
}
