//! Integration tests for the metadata/CRS translation adapters

extern crate std;

use georefkit::adapter::{CrsToMetadataAdapter, MetadataToCrsAdapter};
use georefkit::crs::{
    AuthorityError, AuthorityService, Conversion, Crs, Ellipsoid, GeodeticDatum,
    GeographicCrs, ParameterGroup, PrimeMeridian, ProjectedCrs, Unit, WktParser,
};
use georefkit::geotiff::{GeoTiffError, MetadataDecoder, MetadataEncoder};

/// Small registry standing in for the external authority service
struct TestAuthority;

impl AuthorityService for TestAuthority {
    fn projected_crs(&self, code: &str) -> Result<ProjectedCrs, AuthorityError> {
        match code {
            "EPSG:32633" => Ok(utm_zone_33n()),
            _ => Err(AuthorityError::new(format!("unknown projected CRS {}", code))),
        }
    }

    fn geographic_crs(&self, code: &str) -> Result<GeographicCrs, AuthorityError> {
        match code {
            "EPSG:4326" => Ok(GeographicCrs::wgs84()),
            _ => Err(AuthorityError::new(format!("unknown geographic CRS {}", code))),
        }
    }

    fn datum(&self, code: &str) -> Result<GeodeticDatum, AuthorityError> {
        match code {
            "EPSG:6326" => Ok(GeodeticDatum::wgs84()),
            _ => Err(AuthorityError::new(format!("unknown datum {}", code))),
        }
    }

    fn ellipsoid(&self, code: &str) -> Result<Ellipsoid, AuthorityError> {
        match code {
            "EPSG:7030" => Ok(Ellipsoid::wgs84()),
            _ => Err(AuthorityError::new(format!("unknown ellipsoid {}", code))),
        }
    }

    fn prime_meridian(&self, code: &str) -> Result<PrimeMeridian, AuthorityError> {
        match code {
            "EPSG:8901" => Ok(PrimeMeridian::greenwich()),
            _ => Err(AuthorityError::new(format!("unknown prime meridian {}", code))),
        }
    }

    fn unit(&self, code: &str) -> Result<Unit, AuthorityError> {
        Err(AuthorityError::new(format!("unknown unit {}", code)))
    }

    fn conversion(&self, code: &str) -> Result<Conversion, AuthorityError> {
        Err(AuthorityError::new(format!("unknown conversion {}", code)))
    }
}

fn utm_zone_33n() -> ProjectedCrs {
    let mut parameters = ParameterGroup::new();
    parameters.set("central_meridian", 15.0);
    parameters.set("latitude_of_origin", 0.0);
    parameters.set("scale_factor", 0.9996);
    parameters.set("false_easting", 500000.0);
    parameters.set("false_northing", 0.0);

    let mut pcrs = ProjectedCrs::new(
        "WGS 84 / UTM zone 33N",
        GeographicCrs::wgs84(),
        Conversion::new("UTM zone 33N", "Transverse_Mercator", parameters),
        Unit::metre(),
    );
    pcrs.epsg = Some(32633);
    pcrs
}

/// A fully user-defined projected CRS on the Clarke 1866 ellipsoid
fn nad27_utm_18n() -> Crs {
    let ellipsoid = Ellipsoid::flattened_sphere(
        "Clarke 1866", 6378206.4, 294.978698213898, Unit::metre());
    let datum = GeodeticDatum::new(
        "North American Datum 1927", ellipsoid, PrimeMeridian::new("Greenwich", 0.0, Unit::degree()));
    let base = GeographicCrs::new("NAD27", datum, Unit::degree());

    let mut parameters = ParameterGroup::new();
    parameters.set("central_meridian", -75.0);
    parameters.set("latitude_of_origin", 0.0);
    parameters.set("scale_factor", 0.9996);
    parameters.set("false_easting", 500000.0);
    parameters.set("false_northing", 0.0);

    Crs::Projected(ProjectedCrs::new(
        "NAD27 / UTM zone 18N",
        base,
        Conversion::new("Transverse Mercator zone 18", "Transverse_Mercator", parameters),
        Unit::metre(),
    ))
}

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn round_trip(crs: &Crs) -> Crs {
    init_logs();
    let encoder = CrsToMetadataAdapter::new(crs)
        .parse_coordinate_reference_system()
        .unwrap();
    let tree = encoder.build_tree();
    let decoder = MetadataDecoder::new(&tree).unwrap();
    MetadataToCrsAdapter::new(&TestAuthority)
        .create_coordinate_system(&decoder)
        .unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    std::assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
}

#[test]
fn test_user_defined_transverse_mercator_round_trip() {
    let original = nad27_utm_18n();
    let rebuilt = round_trip(&original);

    let pcrs = match rebuilt {
        Crs::Projected(p) => p,
        other => std::panic!("expected a projected CRS, got {:?}", other),
    };

    std::assert_eq!(pcrs.name, "NAD27 / UTM zone 18N");
    std::assert_eq!(pcrs.conversion.method_name, "Transverse_Mercator");
    std::assert!(pcrs.linear_unit.approx_eq(&Unit::metre()));

    let params = &pcrs.conversion.parameters;
    assert_close(params.get("central_meridian").unwrap(), -75.0);
    assert_close(params.get("latitude_of_origin").unwrap(), 0.0);
    assert_close(params.get("scale_factor").unwrap(), 0.9996);
    assert_close(params.get("false_easting").unwrap(), 500000.0);
    assert_close(params.get("false_northing").unwrap(), 0.0);

    // the ellipsoid's semi-axes displace the method's stale defaults
    assert_close(params.get("semi_major").unwrap(), 6378206.4);
    assert_close(
        params.get("semi_minor").unwrap(),
        6378206.4 * (1.0 - 1.0 / 294.978698213898));

    std::assert_eq!(pcrs.base.name, "NAD27");
    std::assert_eq!(pcrs.base.datum.name, "North American Datum 1927");
    std::assert_eq!(pcrs.base.datum.ellipsoid.name, "Clarke 1866");
    assert_close(pcrs.base.datum.ellipsoid.semi_major_axis, 6378206.4);
    assert_close(pcrs.base.datum.ellipsoid.inverse_flattening, 294.978698213898);
    assert_close(pcrs.base.datum.prime_meridian.greenwich_longitude, 0.0);
    std::assert!(pcrs.base.angular_unit.approx_eq(&Unit::degree()));
}

#[test]
fn test_mercator_2sp_round_trip() {
    let mut parameters = ParameterGroup::new();
    parameters.set("central_meridian", 110.0);
    parameters.set("latitude_of_origin", 0.0);
    parameters.set("standard_parallel_1", -2.0);
    parameters.set("false_easting", 3900000.0);
    parameters.set("false_northing", 900000.0);

    let original = Crs::Projected(ProjectedCrs::new(
        "Batavia / NEIEZ",
        GeographicCrs::wgs84(),
        Conversion::new("Mercator south of Java", "Mercator_2SP", parameters),
        Unit::metre(),
    ));

    let pcrs = match round_trip(&original) {
        Crs::Projected(p) => p,
        other => std::panic!("expected a projected CRS, got {:?}", other),
    };

    // the shared Mercator code resolves to 2SP because a standard
    // parallel travelled with the metadata
    std::assert_eq!(pcrs.conversion.method_name, "Mercator_2SP");
    assert_close(pcrs.conversion.parameters.get("standard_parallel_1").unwrap(), -2.0);
    assert_close(pcrs.conversion.parameters.get("central_meridian").unwrap(), 110.0);
    std::assert!(pcrs.base.epsg == Some(4326));
}

#[test]
fn test_epsg_short_circuit_keeps_only_the_code() {
    let original = Crs::Projected(utm_zone_33n());
    let encoder = CrsToMetadataAdapter::new(&original)
        .parse_coordinate_reference_system()
        .unwrap();

    std::assert_eq!(encoder.num_geo_keys(), 2);
    std::assert_eq!(encoder.get_geo_short_param(1024).unwrap(), 1);
    std::assert_eq!(encoder.get_geo_short_param(3072).unwrap(), 32633);

    let tree = encoder.build_tree();
    let decoder = MetadataDecoder::new(&tree).unwrap();
    let rebuilt = MetadataToCrsAdapter::new(&TestAuthority)
        .create_coordinate_system(&decoder)
        .unwrap();
    std::assert_eq!(rebuilt.epsg(), Some(32633));
    std::assert_eq!(rebuilt.name(), "WGS 84 / UTM zone 33N");
}

#[test]
fn test_projected_authority_unit_substitution() {
    let mut encoder = MetadataEncoder::new();
    encoder.add_geo_short_param(1024u32, 1u32).unwrap();
    encoder.add_geo_short_param(3072u32, 32633u32).unwrap();
    encoder.add_geo_short_param(3076u32, 9002u32).unwrap(); // foot
    let tree = encoder.build_tree();
    let decoder = MetadataDecoder::new(&tree).unwrap();

    let pcrs = match MetadataToCrsAdapter::new(&TestAuthority)
        .create_coordinate_system(&decoder)
        .unwrap()
    {
        Crs::Projected(p) => p,
        other => std::panic!("expected a projected CRS, got {:?}", other),
    };

    // name, conversion and base survive; only the axis unit moves
    std::assert_eq!(pcrs.name, "WGS 84 / UTM zone 33N");
    std::assert!(pcrs.linear_unit.approx_eq(&Unit::foot()));
    std::assert_eq!(pcrs.epsg, None);
    std::assert_eq!(pcrs.conversion.method_name, "Transverse_Mercator");
}

#[test]
fn test_geographic_angular_unit_substitution() {
    let mut encoder = MetadataEncoder::new();
    encoder.add_geo_short_param(1024u32, 2u32).unwrap();
    encoder.add_geo_short_param(2048u32, 4326u32).unwrap();
    encoder.add_geo_short_param(2054u32, 9105u32).unwrap(); // grad
    let tree = encoder.build_tree();
    let decoder = MetadataDecoder::new(&tree).unwrap();

    let gcrs = match MetadataToCrsAdapter::new(&TestAuthority)
        .create_coordinate_system(&decoder)
        .unwrap()
    {
        Crs::Geographic(g) => g,
        other => std::panic!("expected a geographic CRS, got {:?}", other),
    };

    std::assert_eq!(gcrs.name, "WGS 84");
    std::assert_eq!(gcrs.datum.epsg, Some(6326));
    std::assert!(gcrs.angular_unit.approx_eq(&Unit::grad()));
    std::assert_eq!(gcrs.epsg, None);
}

#[test]
fn test_origin_longitude_falls_back_to_false_origin_key() {
    init_logs();
    let mut encoder = MetadataEncoder::new();
    encoder.add_geo_short_param(1024u32, 1u32).unwrap();
    encoder.add_geo_short_param(3072u32, 32767u32).unwrap();
    encoder.add_geo_short_param(3074u32, 32767u32).unwrap();
    encoder.add_geo_short_param(3075u32, 1u32).unwrap(); // transverse mercator
    encoder.add_geo_double_param(3084u32, 45.0).unwrap(); // false-origin longitude only
    encoder.add_geo_short_param(2048u32, 32767u32).unwrap();
    encoder.add_geo_ascii(2049u32, "GCS Name = Test GCS|Datum = WGS84").unwrap();
    encoder.add_geo_short_param(2050u32, 32767u32).unwrap();
    let tree = encoder.build_tree();
    let decoder = MetadataDecoder::new(&tree).unwrap();

    let pcrs = match MetadataToCrsAdapter::new(&TestAuthority)
        .create_coordinate_system(&decoder)
        .unwrap()
    {
        Crs::Projected(p) => p,
        other => std::panic!("expected a projected CRS, got {:?}", other),
    };

    assert_close(pcrs.conversion.parameters.get("central_meridian").unwrap(), 45.0);
    // exhausted chains substitute their defaults
    assert_close(pcrs.conversion.parameters.get("false_easting").unwrap(), 0.0);
    assert_close(pcrs.conversion.parameters.get("scale_factor").unwrap(), 1.0);
    // the WGS84 citation shortcut supplies the whole datum
    std::assert_eq!(pcrs.base.datum.epsg, Some(6326));
}

#[test]
fn test_sphere_ellipsoid_gets_infinite_inverse_flattening() {
    let mut encoder = MetadataEncoder::new();
    encoder.add_geo_short_param(1024u32, 2u32).unwrap();
    encoder.add_geo_short_param(2048u32, 32767u32).unwrap();
    encoder
        .add_geo_ascii(
            2049u32,
            "GCS Name = Sphere GCS|Datum = Sphere Datum|Ellipsoid = Authalic Sphere")
        .unwrap();
    encoder.add_geo_short_param(2050u32, 32767u32).unwrap();
    encoder.add_geo_short_param(2056u32, 32767u32).unwrap();
    encoder.add_geo_double_param(2057u32, 6371000.0).unwrap();
    encoder.add_geo_double_param(2058u32, 6371000.0).unwrap();
    let tree = encoder.build_tree();
    let decoder = MetadataDecoder::new(&tree).unwrap();

    let gcrs = match MetadataToCrsAdapter::new(&TestAuthority)
        .create_coordinate_system(&decoder)
        .unwrap()
    {
        Crs::Geographic(g) => g,
        other => std::panic!("expected a geographic CRS, got {:?}", other),
    };

    let ellipsoid = &gcrs.datum.ellipsoid;
    std::assert_eq!(ellipsoid.name, "Authalic Sphere");
    std::assert!(ellipsoid.inverse_flattening.is_infinite());
    assert_close(ellipsoid.semi_minor_axis(), 6371000.0);
}

#[test]
fn test_unsupported_projection_export_is_refused() {
    let mut parameters = ParameterGroup::new();
    parameters.set("central_meridian", 0.0);

    let crs = Crs::Projected(ProjectedCrs::new(
        "Bogus",
        GeographicCrs::wgs84(),
        Conversion::new("Bogus projection", "Cassini_Soldner", parameters),
        Unit::metre(),
    ));

    let result = CrsToMetadataAdapter::new(&crs).parse_coordinate_reference_system();
    std::assert!(matches!(result, Err(GeoTiffError::UnsupportedProjection(_))));
}

#[test]
fn test_geocentric_model_type_is_refused() {
    let mut encoder = MetadataEncoder::new();
    encoder.add_geo_short_param(1024u32, 3u32).unwrap();
    let tree = encoder.build_tree();
    let decoder = MetadataDecoder::new(&tree).unwrap();

    let result = MetadataToCrsAdapter::new(&TestAuthority).create_coordinate_system(&decoder);
    std::assert!(matches!(result, Err(GeoTiffError::UnsupportedCrsType(_))));
}

struct FixedWktParser;

impl WktParser for FixedWktParser {
    fn parse_wkt(&self, wkt: &str) -> Result<Crs, AuthorityError> {
        if wkt.starts_with("GEOGCS") {
            Ok(Crs::Geographic(GeographicCrs::wgs84()))
        } else {
            Err(AuthorityError::new("unparseable WKT"))
        }
    }
}

#[test]
fn test_pe_string_citation_delegates_to_the_wkt_parser() {
    let mut encoder = MetadataEncoder::new();
    encoder.add_geo_short_param(1024u32, 32767u32).unwrap();
    encoder
        .add_geo_ascii(1026u32, "ESRI PE String = GEOGCS[\"GCS_WGS_1984\"]")
        .unwrap();
    let tree = encoder.build_tree();
    let decoder = MetadataDecoder::new(&tree).unwrap();

    // without a parser attached the citation cannot be honoured
    let result = MetadataToCrsAdapter::new(&TestAuthority).create_coordinate_system(&decoder);
    std::assert!(matches!(result, Err(GeoTiffError::UnsupportedCrsType(_))));

    let parser = FixedWktParser;
    let rebuilt = MetadataToCrsAdapter::with_wkt_parser(&TestAuthority, &parser)
        .create_coordinate_system(&decoder)
        .unwrap();
    std::assert_eq!(rebuilt.epsg(), Some(4326));
}

#[test]
fn test_geographic_round_trip_of_user_defined_gcs() {
    let ellipsoid = Ellipsoid::flattened_sphere(
        "Bessel 1841", 6377397.155, 299.1528128, Unit::metre());
    let datum = GeodeticDatum::new(
        "Deutsches Hauptdreiecksnetz",
        ellipsoid,
        PrimeMeridian::new("Greenwich", 0.0, Unit::degree()));
    let original = Crs::Geographic(GeographicCrs::new("DHDN", datum, Unit::degree()));

    let gcrs = match round_trip(&original) {
        Crs::Geographic(g) => g,
        other => std::panic!("expected a geographic CRS, got {:?}", other),
    };

    std::assert_eq!(gcrs.name, "DHDN");
    std::assert_eq!(gcrs.datum.name, "Deutsches Hauptdreiecksnetz");
    std::assert_eq!(gcrs.datum.ellipsoid.name, "Bessel 1841");
    assert_close(gcrs.datum.ellipsoid.semi_major_axis, 6377397.155);
    assert_close(gcrs.datum.ellipsoid.inverse_flattening, 299.1528128);
    std::assert!(gcrs.angular_unit.approx_eq(&Unit::degree()));
}
