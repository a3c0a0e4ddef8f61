//! Citation string parsing
//!
//! Writers that cannot attach a registry code to a component describe it
//! inside the geographic citation key as a pipe-delimited list of
//! `Label = Value` segments. This parser splits such a string into its
//! named sub-fields, which the CRS reconstruction uses as a fallback
//! source for names and units.

/// Parsed view of a geographic citation string
///
/// Absent fields stay None. Parsing never fails; a string with no
/// recognizable segments yields an all-empty citation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeographicCitation {
    pub pcs_name: Option<String>,
    pub prj_name: Option<String>,
    pub lunits: Option<String>,
    pub gcs_name: Option<String>,
    pub datum: Option<String>,
    pub ellipsoid: Option<String>,
    pub primem: Option<String>,
    pub aunits: Option<String>,
}

impl GeographicCitation {
    /// Parses a `Key = Value|Key = Value` citation string
    ///
    /// Labels are matched case-sensitively; unrecognized labels and
    /// malformed segments (no `=`, or an empty side) are silently skipped.
    pub fn parse(citation: &str) -> Self {
        let mut result = GeographicCitation::default();

        for segment in citation.split('|') {
            let (label, value) = match segment.split_once('=') {
                Some(parts) => parts,
                None => continue,
            };
            let label = label.trim();
            let value = value.trim();
            if label.is_empty() || value.is_empty() {
                continue;
            }

            match label {
                "PCS Name" => result.pcs_name = Some(value.to_string()),
                "PRJ Name" => result.prj_name = Some(value.to_string()),
                "Lunits" => result.lunits = Some(value.to_string()),
                "GCS Name" => result.gcs_name = Some(value.to_string()),
                "Datum" => result.datum = Some(value.to_string()),
                "Ellipsoid" => result.ellipsoid = Some(value.to_string()),
                "Primem" => result.primem = Some(value.to_string()),
                "Aunits" => result.aunits = Some(value.to_string()),
                _ => {}
            }
        }

        result
    }
}
