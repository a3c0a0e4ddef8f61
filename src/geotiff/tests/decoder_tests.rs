//! Tests for the metadata decoder

extern crate std;

use crate::geotiff::constants::tags;
use crate::geotiff::decoder::MetadataDecoder;
use crate::geotiff::encoder::MetadataEncoder;
use crate::geotiff::tree::{FieldValues, MetadataTree, TiffField};

#[test]
fn test_empty_tree_is_refused() {
    let tree = MetadataTree::new();
    std::assert!(MetadataDecoder::new(&tree).is_err());
}

#[test]
fn test_embedded_short_value_decodes_as_decimal_string() {
    let mut encoder = MetadataEncoder::new();
    encoder.add_geo_short_param(1024u32, 1u32).unwrap();
    encoder.add_geo_short_param(3072u32, 32633u32).unwrap();
    let tree = encoder.build_tree();

    let decoder = MetadataDecoder::new(&tree).unwrap();
    std::assert_eq!(decoder.get_geo_key(1024).as_deref(), Some("1"));
    std::assert_eq!(decoder.get_geo_key(3072).as_deref(), Some("32633"));
    std::assert!(decoder.has_geo_key(3072));
    std::assert!(!decoder.has_geo_key(2048));
    std::assert_eq!(decoder.get_geo_key(2048), None);
}

#[test]
fn test_double_param_lookup_follows_the_offset() {
    let mut encoder = MetadataEncoder::new();
    encoder.add_geo_double_param(3080u32, -75.0).unwrap();
    encoder.add_geo_double_param(3082u32, 500000.0).unwrap();
    let tree = encoder.build_tree();

    let decoder = MetadataDecoder::new(&tree).unwrap();
    std::assert_eq!(decoder.get_geo_key(3080).as_deref(), Some("-75"));
    std::assert_eq!(decoder.get_geo_key(3082).as_deref(), Some("500000"));
}

#[test]
fn test_ascii_runs_decode_without_separator() {
    let mut encoder = MetadataEncoder::new();
    encoder.add_geo_ascii(2049u32, "GCS Name = WGS 84").unwrap();
    encoder.add_geo_ascii(3073u32, "unnamed projection").unwrap();
    encoder.add_geo_ascii(2049u32, "Datum = WGS_1984").unwrap();
    let tree = encoder.build_tree();

    let decoder = MetadataDecoder::new(&tree).unwrap();
    std::assert_eq!(
        decoder.get_geo_key(2049).as_deref(),
        Some("GCS Name = WGS 84|Datum = WGS_1984"));
    std::assert_eq!(decoder.get_geo_key(3073).as_deref(), Some("unnamed projection"));
}

#[test]
fn test_directory_header_round_trips() {
    let mut encoder = MetadataEncoder::new();
    encoder.add_geo_short_param(1024u32, 2u32).unwrap();
    encoder.add_geo_short_param(2048u32, 4326u32).unwrap();
    let tree = encoder.build_tree();

    let decoder = MetadataDecoder::new(&tree).unwrap();
    let header = decoder.directory_header();
    std::assert_eq!(header.version, 1);
    std::assert_eq!(header.revision_major, 1);
    std::assert_eq!(header.revision_minor, 2);
    std::assert_eq!(header.num_keys, 2);
    std::assert_eq!(decoder.num_geo_keys(), 2);
}

#[test]
fn test_first_match_wins_on_duplicate_records() {
    // a hand-built directory with a duplicated key id
    let mut tree = MetadataTree::new();
    tree.add_field(TiffField::new(
        tags::GEO_KEY_DIRECTORY_TAG,
        FieldValues::Shorts(vec![
            1, 1, 2, 2,
            1024, 0, 1, 1,
            1024, 0, 1, 2,
        ]),
    ));

    let decoder = MetadataDecoder::new(&tree).unwrap();
    std::assert_eq!(decoder.get_geo_key(1024).as_deref(), Some("1"));
}

#[test]
fn test_georeferencing_block_accessors() {
    let mut encoder = MetadataEncoder::new();
    encoder.set_model_pixel_scale(30.0, 30.0, 0.0).unwrap();
    encoder.add_model_tie_point(0.0, 0.0, 0.0, 440720.0, 3751320.0, 0.0).unwrap();
    let tree = encoder.build_tree();

    let decoder = MetadataDecoder::new(&tree).unwrap();
    std::assert!(decoder.has_pixel_scales());
    std::assert!(decoder.has_tie_points());
    std::assert!(!decoder.has_model_transformation());

    let scales = decoder.get_model_pixel_scales().unwrap();
    std::assert_eq!(scales.scale_x, 30.0);
    std::assert_eq!(scales.scale_y, 30.0);

    let tie_points = decoder.get_model_tie_points();
    std::assert_eq!(tie_points.len(), 1);
    std::assert_eq!(tie_points[0].get_value_at(3), 440720.0);
}

#[test]
fn test_model_transformation_decodes_both_layouts() {
    let mut encoder = MetadataEncoder::new();
    let mut matrix = [0.0; 16];
    matrix[0] = 30.0;
    matrix[3] = 440720.0;
    matrix[5] = -30.0;
    matrix[7] = 3751320.0;
    encoder.set_model_transformation(matrix).unwrap();
    let tree = encoder.build_tree();

    let decoder = MetadataDecoder::new(&tree).unwrap();
    std::assert!(decoder.has_model_transformation());
    let affine = decoder.get_model_transformation().unwrap().to_affine();
    std::assert_eq!(affine, [30.0, 0.0, 440720.0, 0.0, -30.0, 3751320.0]);

    // legacy 3x3 layout
    let mut tree = MetadataTree::new();
    tree.add_field(TiffField::new(
        tags::MODEL_TRANSFORMATION_TAG,
        FieldValues::Doubles(vec![30.0, 0.0, 440720.0, 0.0, -30.0, 3751320.0, 0.0, 0.0, 1.0]),
    ));
    let decoder = MetadataDecoder::new(&tree).unwrap();
    let affine = decoder.get_model_transformation().unwrap().to_affine();
    std::assert_eq!(affine, [30.0, 0.0, 440720.0, 0.0, -30.0, 3751320.0]);
}

#[test]
fn test_no_data_parse_failure_yields_nan() {
    let mut tree = MetadataTree::new();
    tree.add_field(TiffField::new(
        tags::GDAL_NODATA,
        FieldValues::Asciis(vec!["not a number".to_string()]),
    ));

    let decoder = MetadataDecoder::new(&tree).unwrap();
    std::assert!(decoder.has_no_data());
    std::assert!(decoder.get_no_data().unwrap().is_nan());
}

#[test]
fn test_no_data_round_trip() {
    let mut encoder = MetadataEncoder::new();
    encoder.set_no_data(-9999.0);
    let tree = encoder.build_tree();

    let decoder = MetadataDecoder::new(&tree).unwrap();
    std::assert_eq!(decoder.get_no_data(), Some(-9999.0));
}

#[test]
fn test_truncated_directory_is_tolerated() {
    let mut tree = MetadataTree::new();
    tree.add_field(TiffField::new(
        tags::GEO_KEY_DIRECTORY_TAG,
        FieldValues::Shorts(vec![1, 1, 2, 2, 1024, 0, 1, 1, 3072]),
    ));

    let decoder = MetadataDecoder::new(&tree).unwrap();
    // the complete record survives, the truncated tail is dropped
    std::assert_eq!(decoder.num_geo_keys(), 1);
    std::assert_eq!(decoder.get_geo_key(1024).as_deref(), Some("1"));
    std::assert_eq!(decoder.get_geo_key(3072), None);
}
