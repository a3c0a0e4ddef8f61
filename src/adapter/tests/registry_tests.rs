//! Tests for the projection family registry

extern crate std;

use crate::crs::projection::{self, ParamSource, ProjectionFamily};
use crate::geotiff::errors::GeoTiffError;

#[test]
fn test_name_lookup_normalizes_spaces_and_case() {
    let descriptor = projection::find_by_name("Transverse Mercator").unwrap();
    std::assert_eq!(descriptor.family, ProjectionFamily::TransverseMercator);

    let descriptor = projection::find_by_name(" hotine_oblique_mercator ").unwrap();
    std::assert_eq!(descriptor.family, ProjectionFamily::ObliqueMercator);
}

#[test]
fn test_lambert_conformal_variants_disambiguate_on_parallel_count() {
    let descriptor = projection::find_by_name("Lambert_Conformal_Conic_1SP").unwrap();
    std::assert_eq!(descriptor.family, ProjectionFamily::LambertConformalConic1Sp);

    let descriptor = projection::find_by_name("lambert_conformal_conic_2SP_Belgium").unwrap();
    std::assert_eq!(descriptor.family, ProjectionFamily::LambertConformalConic2Sp);

    std::assert!(projection::find_by_name("Lambert_Conformal_Conic").is_none());
}

#[test]
fn test_code_lookup_covers_every_family() {
    std::assert_eq!(
        projection::find_by_code(1).unwrap().family,
        ProjectionFamily::TransverseMercator);
    // the shared Mercator code resolves to the 1SP form
    std::assert_eq!(
        projection::find_by_code(7).unwrap().family,
        ProjectionFamily::Mercator1Sp);
    std::assert_eq!(
        projection::find_by_code(15).unwrap().family,
        ProjectionFamily::PolarStereographic);
    std::assert!(projection::find_by_code(999).is_none());
}

#[test]
fn test_origin_longitude_fallback_chain_order() {
    // this order is a compatibility contract, not a style choice
    std::assert_eq!(
        ParamSource::OriginLong.chain(),
        &[3088, 3080, 3084, 3095, 3083]);
    std::assert_eq!(ParamSource::OriginLat.chain(), &[3089, 3081, 3085]);
    std::assert_eq!(ParamSource::FalseEasting.chain(), &[3082, 3086]);
    std::assert_eq!(ParamSource::FalseNorthing.chain(), &[3083, 3087]);
    std::assert_eq!(ParamSource::ScaleFactor.chain(), &[3093, 3092]);
}

#[test]
fn test_scale_factor_defaults_to_one() {
    std::assert_eq!(ParamSource::ScaleFactor.default_value(), 1.0);
    std::assert_eq!(ParamSource::OriginLong.default_value(), 0.0);
}

#[test]
fn test_default_parameters_rejects_unknown_methods() {
    let result = projection::default_parameters("Cassini_Soldner");
    std::assert!(matches!(result, Err(GeoTiffError::NoSuchIdentifier(_))));

    let (descriptor, group) = projection::default_parameters("Mercator_2SP").unwrap();
    std::assert_eq!(descriptor.family, ProjectionFamily::Mercator2Sp);
    std::assert_eq!(group.get("standard_parallel_1"), Some(0.0));
    std::assert_eq!(group.get("semi_major"), Some(6378137.0));
}

#[test]
fn test_every_descriptor_has_false_easting_and_northing() {
    for descriptor in projection::DESCRIPTORS {
        let names: Vec<&str> = descriptor.params.iter().map(|p| p.names[0]).collect();
        std::assert!(names.contains(&"false_easting"), "{:?}", descriptor.family);
        std::assert!(names.contains(&"false_northing"), "{:?}", descriptor.family);
    }
}
