//! GeoKey definitions and record type
//!
//! This module provides the GeoKey record structure and the name tables
//! used to render keys and codes for logs and diagnostics.

use std::collections::HashMap;
use lazy_static::lazy_static;
use crate::geotiff::errors::{GeoTiffError, GeoTiffResult};

lazy_static! {
    // Parse the TOML file at startup
    static ref GEOKEY_DEFINITIONS: GeoKeyDefinitions = {
        let content = include_str!("../../geokey_definitions.toml");
        GeoKeyDefinitions::from_str(content).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse GeoKey definitions: {}", e);
                GeoKeyDefinitions::default()
            })
    };
}

/// Container for GeoKey and code name tables
#[derive(Debug, Default)]
pub struct GeoKeyDefinitions {
    // Maps tag IDs to tag names
    pub tag_names: HashMap<u16, String>,
    // Maps GeoKey IDs to key names
    pub key_names: HashMap<u16, String>,
    // Maps model type codes to names
    pub model_type_names: HashMap<u16, String>,
    // Maps raster type codes to names
    pub raster_type_names: HashMap<u16, String>,
    // Maps linear unit codes to names
    pub linear_unit_names: HashMap<u16, String>,
    // Maps angular unit codes to names
    pub angular_unit_names: HashMap<u16, String>,
    // Maps coordinate transformation codes to names
    pub coord_transform_names: HashMap<u16, String>,
}

impl GeoKeyDefinitions {
    /// Parse GeoKey definitions from a TOML string
    pub fn from_str(content: &str) -> GeoTiffResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(GeoTiffError::GenericError(format!("Failed to parse TOML: {}", e))),
        };

        let mut defs = GeoKeyDefinitions::default();

        Self::parse_code_table(&toml_value, "tag_ids", &mut defs.tag_names);
        Self::parse_code_table(&toml_value, "key_ids", &mut defs.key_names);
        Self::parse_code_table(&toml_value, "model_type_codes", &mut defs.model_type_names);
        Self::parse_code_table(&toml_value, "raster_type_codes", &mut defs.raster_type_names);
        Self::parse_code_table(&toml_value, "linear_unit_codes", &mut defs.linear_unit_names);
        Self::parse_code_table(&toml_value, "angular_unit_codes", &mut defs.angular_unit_names);
        Self::parse_code_table(&toml_value, "coord_transformation_codes", &mut defs.coord_transform_names);

        Ok(defs)
    }

    /// Helper to parse code tables from TOML
    fn parse_code_table(toml_value: &toml::Value, table_name: &str, target: &mut HashMap<u16, String>) {
        if let Some(table) = toml_value.get(table_name).and_then(|v| v.as_table()) {
            for (k, v) in table {
                if let (Ok(id), Some(name)) = (k.parse::<u16>(), v.as_str()) {
                    target.insert(id, name.to_string());
                }
            }
        }
    }

    /// Get a tag name by ID
    pub fn get_tag_name(&self, tag_id: u16) -> String {
        self.tag_names.get(&tag_id)
            .cloned()
            .unwrap_or_else(|| format!("Unknown-{}", tag_id))
    }

    /// Get a GeoKey name by ID
    pub fn get_key_name(&self, key_id: u16) -> String {
        self.key_names.get(&key_id)
            .cloned()
            .unwrap_or_else(|| format!("Unknown-{}", key_id))
    }

    /// Get a code name from the appropriate table
    pub fn get_code_name(&self, code_type: &str, code_id: u16) -> String {
        let lookup_result = match code_type {
            "model_type" => self.model_type_names.get(&code_id),
            "raster_type" => self.raster_type_names.get(&code_id),
            "linear_unit" => self.linear_unit_names.get(&code_id),
            "angular_unit" => self.angular_unit_names.get(&code_id),
            "coord_transform" => self.coord_transform_names.get(&code_id),
            _ => None,
        };

        lookup_result.map_or_else(
            || format!("{}", code_id),
            |s| s.clone()
        )
    }
}

/// Represents one record of a GeoKey directory
///
/// A record either embeds its value directly (`tiff_tag_location == 0`,
/// value in `value_offset`, implied count 1) or points into the double or
/// ASCII parameter block named by `tiff_tag_location`, at `value_offset`
/// for `count` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoKeyEntry {
    pub key_id: u16,
    pub tiff_tag_location: u16,
    pub count: u16,
    pub value_offset: u16,
}

impl GeoKeyEntry {
    /// Create a new GeoKey entry
    pub fn new(key_id: u16, tiff_tag_location: u16, count: u16, value_offset: u16) -> Self {
        GeoKeyEntry {
            key_id,
            tiff_tag_location,
            count,
            value_offset,
        }
    }

    /// Get the name of this key
    pub fn get_name(&self) -> String {
        get_key_name(self.key_id)
    }

    /// Whether the value is embedded directly in `value_offset`
    pub fn is_inline(&self) -> bool {
        self.tiff_tag_location == 0
    }
}

/// Check if a tag carries georeferencing information
pub fn is_geotiff_tag(tag: u16) -> bool {
    use crate::geotiff::constants::tags;
    matches!(tag,
        tags::MODEL_PIXEL_SCALE_TAG |
        tags::MODEL_TRANSFORMATION_TAG |
        tags::MODEL_TIEPOINT_TAG |
        tags::GEO_KEY_DIRECTORY_TAG |
        tags::GEO_DOUBLE_PARAMS_TAG |
        tags::GEO_ASCII_PARAMS_TAG)
}

/// Get a GeoTIFF tag name
pub fn get_tag_name(tag: u16) -> String {
    GEOKEY_DEFINITIONS.get_tag_name(tag)
}

/// Get a GeoKey name
pub fn get_key_name(key: u16) -> String {
    GEOKEY_DEFINITIONS.get_key_name(key)
}

/// Get a code name
pub fn get_code_name(code_type: &str, code: u16) -> String {
    GEOKEY_DEFINITIONS.get_code_name(code_type, code)
}
