//! Tests for the citation parser

extern crate std;

use crate::geotiff::citation::GeographicCitation;

#[test]
fn test_full_geographic_citation() {
    let citation = GeographicCitation::parse(
        "GCS Name=WGS 84|Datum=WGS_1984|Ellipsoid=WGS 84|Primem=Greenwich");

    std::assert_eq!(citation.gcs_name.as_deref(), Some("WGS 84"));
    std::assert_eq!(citation.datum.as_deref(), Some("WGS_1984"));
    std::assert_eq!(citation.ellipsoid.as_deref(), Some("WGS 84"));
    std::assert_eq!(citation.primem.as_deref(), Some("Greenwich"));
    std::assert_eq!(citation.pcs_name, None);
    std::assert_eq!(citation.prj_name, None);
}

#[test]
fn test_whitespace_around_separator_is_trimmed() {
    let citation = GeographicCitation::parse("PCS Name = NAD27 / UTM zone 18N | Lunits = metre");
    std::assert_eq!(citation.pcs_name.as_deref(), Some("NAD27 / UTM zone 18N"));
    std::assert_eq!(citation.lunits.as_deref(), Some("metre"));
}

#[test]
fn test_unknown_labels_are_dropped() {
    let citation = GeographicCitation::parse("Vertical Datum=NAVD88|GCS Name=NAD83");
    std::assert_eq!(citation.gcs_name.as_deref(), Some("NAD83"));
    std::assert_eq!(citation, GeographicCitation {
        gcs_name: Some("NAD83".to_string()),
        ..GeographicCitation::default()
    });
}

#[test]
fn test_malformed_segments_are_skipped() {
    let citation = GeographicCitation::parse("no separator here|=leading|trailing=|Datum=D");
    std::assert_eq!(citation.datum.as_deref(), Some("D"));
    std::assert_eq!(citation.gcs_name, None);
}

#[test]
fn test_labels_match_case_sensitively() {
    let citation = GeographicCitation::parse("datum=lowercase|DATUM=upper");
    std::assert_eq!(citation.datum, None);
}

#[test]
fn test_empty_string_yields_empty_citation() {
    std::assert_eq!(GeographicCitation::parse(""), GeographicCitation::default());
}
