//! GeoTIFF wire-format constants
//!
//! This module defines the numeric constants used throughout the metadata
//! translation code, replacing magic numbers with descriptive names. All
//! values here are assigned by the published GeoTIFF specification and must
//! never be changed.

/// TIFF tags carrying georeferencing information
pub mod tags {
    pub const MODEL_PIXEL_SCALE_TAG: u16 = 33550;    // Pixel size in model units
    pub const MODEL_TIEPOINT_TAG: u16 = 33922;       // Links raster to model coordinates
    pub const MODEL_TRANSFORMATION_TAG: u16 = 34264; // Full transformation matrix
    pub const GEO_KEY_DIRECTORY_TAG: u16 = 34735;    // GeoKey directory structure
    pub const GEO_DOUBLE_PARAMS_TAG: u16 = 34736;    // Double-precision parameters
    pub const GEO_ASCII_PARAMS_TAG: u16 = 34737;     // ASCII parameters

    // GDAL specific tags
    pub const GDAL_METADATA: u16 = 42112;            // XML metadata
    pub const GDAL_NODATA: u16 = 42113;              // NoData marker value
}

/// GeoKey directory header defaults
pub mod directory {
    /// GeoTIFF spec version emitted by the encoder
    pub const GEOTIFF_VERSION: u16 = 1;
    /// Major revision of the key set
    pub const KEY_REVISION_MAJOR: u16 = 1;
    /// Minor revision of the key set
    pub const KEY_REVISION_MINOR: u16 = 2;
}

/// Configuration and common geographic/projected GeoKey IDs
pub mod geo_keys {
    // GeoTIFF configuration keys
    pub const GT_MODEL_TYPE: u16 = 1024;            // GTModelTypeGeoKey
    pub const GT_RASTER_TYPE: u16 = 1025;           // GTRasterTypeGeoKey
    pub const GT_CITATION: u16 = 1026;              // GTCitationGeoKey

    // Geographic CS parameter keys
    pub const GEOGRAPHIC_TYPE: u16 = 2048;          // GeographicTypeGeoKey
    pub const GEOG_CITATION: u16 = 2049;            // GeogCitationGeoKey
    pub const GEOG_GEODETIC_DATUM: u16 = 2050;      // GeogGeodeticDatumGeoKey
    pub const GEOG_PRIME_MERIDIAN: u16 = 2051;      // GeogPrimeMeridianGeoKey
    pub const GEOG_LINEAR_UNITS: u16 = 2052;        // GeogLinearUnitsGeoKey
    pub const GEOG_LINEAR_UNIT_SIZE: u16 = 2053;    // GeogLinearUnitSizeGeoKey
    pub const GEOG_ANGULAR_UNITS: u16 = 2054;       // GeogAngularUnitsGeoKey
    pub const GEOG_ANGULAR_UNIT_SIZE: u16 = 2055;   // GeogAngularUnitSizeGeoKey
    pub const GEOG_ELLIPSOID: u16 = 2056;           // GeogEllipsoidGeoKey
    pub const GEOG_SEMI_MAJOR_AXIS: u16 = 2057;     // GeogSemiMajorAxisGeoKey
    pub const GEOG_SEMI_MINOR_AXIS: u16 = 2058;     // GeogSemiMinorAxisGeoKey
    pub const GEOG_INV_FLATTENING: u16 = 2059;      // GeogInvFlatteningGeoKey
    pub const GEOG_AZIMUTH_UNITS: u16 = 2060;       // GeogAzimuthUnitsGeoKey
    pub const GEOG_PRIME_MERIDIAN_LONG: u16 = 2061; // GeogPrimeMeridianLongGeoKey

    // Projected CS parameter keys
    pub const PROJECTED_CS_TYPE: u16 = 3072;        // ProjectedCSTypeGeoKey
    pub const PCS_CITATION: u16 = 3073;             // PCSCitationGeoKey
    pub const PROJECTION: u16 = 3074;               // ProjectionGeoKey
    pub const PROJ_COORD_TRANS: u16 = 3075;         // ProjCoordTransGeoKey
    pub const PROJ_LINEAR_UNITS: u16 = 3076;        // ProjLinearUnitsGeoKey
    pub const PROJ_LINEAR_UNIT_SIZE: u16 = 3077;    // ProjLinearUnitSizeGeoKey
    pub const PROJ_STD_PARALLEL_1: u16 = 3078;      // ProjStdParallel1GeoKey
    pub const PROJ_STD_PARALLEL_2: u16 = 3079;      // ProjStdParallel2GeoKey
    pub const PROJ_NAT_ORIGIN_LONG: u16 = 3080;     // ProjNatOriginLongGeoKey
    pub const PROJ_NAT_ORIGIN_LAT: u16 = 3081;      // ProjNatOriginLatGeoKey
    pub const PROJ_FALSE_EASTING: u16 = 3082;       // ProjFalseEastingGeoKey
    pub const PROJ_FALSE_NORTHING: u16 = 3083;      // ProjFalseNorthingGeoKey
    pub const PROJ_FALSE_ORIGIN_LONG: u16 = 3084;   // ProjFalseOriginLongGeoKey
    pub const PROJ_FALSE_ORIGIN_LAT: u16 = 3085;    // ProjFalseOriginLatGeoKey
    pub const PROJ_FALSE_ORIGIN_EASTING: u16 = 3086;  // ProjFalseOriginEastingGeoKey
    pub const PROJ_FALSE_ORIGIN_NORTHING: u16 = 3087; // ProjFalseOriginNorthingGeoKey
    pub const PROJ_CENTER_LONG: u16 = 3088;         // ProjCenterLongGeoKey
    pub const PROJ_CENTER_LAT: u16 = 3089;          // ProjCenterLatGeoKey
    pub const PROJ_CENTER_EASTING: u16 = 3090;      // ProjCenterEastingGeoKey
    pub const PROJ_CENTER_NORTHING: u16 = 3091;     // ProjCenterNorthingGeoKey
    pub const PROJ_SCALE_AT_NAT_ORIGIN: u16 = 3092; // ProjScaleAtNatOriginGeoKey
    pub const PROJ_SCALE_AT_CENTER: u16 = 3093;     // ProjScaleAtCenterGeoKey
    pub const PROJ_AZIMUTH_ANGLE: u16 = 3094;       // ProjAzimuthAngleGeoKey
    pub const PROJ_STRAIGHT_VERT_POLE_LONG: u16 = 3095; // ProjStraightVertPoleLongGeoKey
}

/// Model type and raster interpretation codes
pub mod model_type {
    pub const PROJECTED: u16 = 1;       // ModelTypeProjected
    pub const GEOGRAPHIC: u16 = 2;      // ModelTypeGeographic
    pub const GEOCENTRIC: u16 = 3;      // ModelTypeGeocentric (unsupported)
}

/// Raster space conventions
pub mod raster_type {
    pub const PIXEL_IS_AREA: u16 = 1;   // Raster coordinate names a cell area
    pub const PIXEL_IS_POINT: u16 = 2;  // Raster coordinate names a cell centre
}

/// Sentinel values shared across key sets
pub mod values {
    /// "This component has no registry code; the definition follows inline"
    pub const USER_DEFINED: u16 = 32767;
    /// String form of the user-defined sentinel as it appears in decoded keys
    pub const USER_DEFINED_STR: &str = "32767";
    /// "Key absent" sentinel used by tolerant integer accessors
    pub const UNDEFINED: u16 = 0;
}

/// EPSG unit-of-measure codes referenced by GeoTIFF
pub mod uom {
    // Linear units
    pub const LINEAR_METER: u16 = 9001;
    pub const LINEAR_FOOT: u16 = 9002;
    pub const LINEAR_FOOT_US_SURVEY: u16 = 9003;
    pub const LINEAR_YARD_SEARS: u16 = 9012;
    pub const LINEAR_MILE_INTERNATIONAL_NAUTICAL: u16 = 9015;

    // Angular units
    pub const ANGULAR_RADIAN: u16 = 9101;
    pub const ANGULAR_DEGREE: u16 = 9102;
    pub const ANGULAR_ARC_MINUTE: u16 = 9103;
    pub const ANGULAR_ARC_SECOND: u16 = 9104;
    pub const ANGULAR_GRAD: u16 = 9105;
}

/// Coordinate transformation method codes
pub mod coord_trans {
    pub const CT_TRANSVERSE_MERCATOR: u16 = 1;
    pub const CT_OBLIQUE_MERCATOR: u16 = 3;
    pub const CT_MERCATOR: u16 = 7;
    pub const CT_LAMBERT_CONF_CONIC_2SP: u16 = 8;
    pub const CT_LAMBERT_CONF_CONIC_HELMERT: u16 = 9;
    pub const CT_LAMBERT_AZIM_EQUAL_AREA: u16 = 10;
    pub const CT_ALBERS_EQUAL_AREA: u16 = 11;
    pub const CT_AZIMUTHAL_EQUIDISTANT: u16 = 12;
    pub const CT_STEREOGRAPHIC: u16 = 14;
    pub const CT_POLAR_STEREOGRAPHIC: u16 = 15;
    pub const CT_OBLIQUE_STEREOGRAPHIC: u16 = 16;
    pub const CT_EQUIRECTANGULAR: u16 = 17;
    pub const CT_ORTHOGRAPHIC: u16 = 21;
    pub const CT_SINUSOIDAL: u16 = 24;
    pub const CT_VAN_DER_GRINTEN: u16 = 25;
}
