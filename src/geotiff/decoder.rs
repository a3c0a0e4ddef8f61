//! Read-side metadata adapter
//!
//! The decoder wraps a generic metadata tree and exposes the semantic
//! queries the CRS reconstruction code needs: GeoKey lookup (including the
//! offset-based indirection into the double and ASCII parameter blocks),
//! tie points, pixel scales, the model transformation and the NoData value.
//!
//! Lookups are deliberately tolerant: real-world files violate the
//! specification often enough that any failure to decode a value yields
//! `None`/NaN/false instead of an error. Callers decide significance.

use log::{debug, warn};

use crate::geotiff::constants::tags;
use crate::geotiff::errors::{GeoTiffError, GeoTiffResult};
use crate::geotiff::keys::{get_key_name, GeoKeyEntry};
use crate::geotiff::tree::{FieldValues, MetadataTree};
use crate::geotiff::values::{ModelTransformation, PixelScale, TiePoint};

/// GeoKey directory header record (version, revision, key count)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectoryHeader {
    pub version: u16,
    pub revision_major: u16,
    pub revision_minor: u16,
    pub num_keys: u16,
}

/// Decoder for GeoTIFF georeferencing metadata
pub struct MetadataDecoder<'a> {
    tree: &'a MetadataTree,
    header: DirectoryHeader,
    entries: Vec<GeoKeyEntry>,
}

impl<'a> MetadataDecoder<'a> {
    /// Wraps a metadata tree, parsing the GeoKey directory up front
    ///
    /// Fails when the tree carries no fields at all; a tree without a
    /// GeoKey directory is still accepted (bare tie-point/pixel-scale
    /// files exist) and simply answers None for every key.
    pub fn new(tree: &'a MetadataTree) -> GeoTiffResult<Self> {
        if tree.is_empty() {
            return Err(GeoTiffError::InvalidTree(
                "metadata tree has no field list".to_string()));
        }

        let (header, entries) = Self::parse_directory(tree);
        debug!("GeoKey directory: version={}, revision={}.{}, keys={}",
               header.version, header.revision_major, header.revision_minor,
               entries.len());

        Ok(MetadataDecoder { tree, header, entries })
    }

    fn parse_directory(tree: &MetadataTree) -> (DirectoryHeader, Vec<GeoKeyEntry>) {
        let shorts = match tree.get_field(tags::GEO_KEY_DIRECTORY_TAG) {
            Some(field) => match &field.values {
                FieldValues::Shorts(v) => v.as_slice(),
                other => {
                    warn!("GeoKeyDirectoryTag stored as {}, expected shorts", other.kind());
                    return (DirectoryHeader::default(), Vec::new());
                }
            },
            None => return (DirectoryHeader::default(), Vec::new()),
        };

        if shorts.len() < 4 {
            warn!("GeoKey directory too short: {} values", shorts.len());
            return (DirectoryHeader::default(), Vec::new());
        }

        let header = DirectoryHeader {
            version: shorts[0],
            revision_major: shorts[1],
            revision_minor: shorts[2],
            num_keys: shorts[3],
        };

        // Records follow the header, four shorts each. A truncated tail is
        // dropped rather than refused.
        let mut entries = Vec::with_capacity(header.num_keys as usize);
        for record in shorts[4..].chunks_exact(4) {
            entries.push(GeoKeyEntry::new(record[0], record[1], record[2], record[3]));
        }
        if entries.len() != header.num_keys as usize {
            warn!("GeoKey directory header declares {} keys, found {}",
                  header.num_keys, entries.len());
        }

        (header, entries)
    }

    /// The directory header record
    pub fn directory_header(&self) -> DirectoryHeader {
        self.header
    }

    /// Number of GeoKey records, excluding the header
    pub fn num_geo_keys(&self) -> usize {
        self.entries.len()
    }

    /// Finds the record for a key id; first match wins
    pub fn get_geo_key_record(&self, key_id: u16) -> Option<GeoKeyEntry> {
        self.entries.iter().find(|e| e.key_id == key_id).copied()
    }

    /// Checks for the presence of a key in the directory
    pub fn has_geo_key(&self, key_id: u16) -> bool {
        self.get_geo_key_record(key_id).is_some()
    }

    /// Gets a GeoKey value rendered as a string
    ///
    /// Embedded values come back as their decimal form. Values stored in
    /// the double-params block come back as the double at the record's
    /// offset; ASCII values as the record's substring of the ASCII block,
    /// minus the trailing separator. Any failure yields None.
    pub fn get_geo_key(&self, key_id: u16) -> Option<String> {
        let record = self.get_geo_key_record(key_id)?;

        if record.is_inline() {
            return Some(format!("{}", record.value_offset));
        }

        if record.tiff_tag_location == tags::GEO_ASCII_PARAMS_TAG {
            return self.ascii_param(&record);
        }

        // Any other location names a field holding a numeric array
        let field = self.tree.get_field(record.tiff_tag_location)?;
        let value = field.numeric_at(record.value_offset as usize)?;
        Some(format!("{}", value))
    }

    /// Slices the record's run out of the ASCII parameter block
    fn ascii_param(&self, record: &GeoKeyEntry) -> Option<String> {
        let field = self.tree.get_field(tags::GEO_ASCII_PARAMS_TAG)?;
        let blob: String = match &field.values {
            FieldValues::Asciis(parts) => parts.concat(),
            _ => return None,
        };

        let start = record.value_offset as usize;
        let end = start.checked_add(record.count as usize)?;
        let run = match blob.get(start..end) {
            Some(run) => run,
            None => {
                warn!("ASCII run for {} out of bounds: [{}, {}) of {}",
                      get_key_name(record.key_id), start, end, blob.len());
                return None;
            }
        };

        // The run carries the trailing '|' terminator; callers never see it
        Some(run.strip_suffix('|').unwrap_or(run).to_string())
    }

    /// Gets the model pixel scales, if present and plausible
    pub fn get_model_pixel_scales(&self) -> Option<PixelScale> {
        let field = self.tree.get_field(tags::MODEL_PIXEL_SCALE_TAG)?;
        let doubles = match &field.values {
            FieldValues::Doubles(v) => v,
            _ => return None,
        };
        if doubles.len() < 2 {
            return None;
        }
        let z = doubles.get(2).copied().unwrap_or(0.0);
        Some(PixelScale::new(doubles[0], doubles[1], z))
    }

    /// Gets all model tie points; each is six doubles
    pub fn get_model_tie_points(&self) -> Vec<TiePoint> {
        let field = match self.tree.get_field(tags::MODEL_TIEPOINT_TAG) {
            Some(f) => f,
            None => return Vec::new(),
        };
        let doubles = match &field.values {
            FieldValues::Doubles(v) => v,
            _ => return Vec::new(),
        };

        doubles
            .chunks_exact(6)
            .map(|c| TiePoint::new(c[0], c[1], c[2], c[3], c[4], c[5]))
            .collect()
    }

    /// Gets the model transformation matrix, if present
    ///
    /// Both the 16-element (4x4) and the legacy 9-element (3x3) layouts
    /// are accepted.
    pub fn get_model_transformation(&self) -> Option<ModelTransformation> {
        let field = self.tree.get_field(tags::MODEL_TRANSFORMATION_TAG)?;
        let doubles = match &field.values {
            FieldValues::Doubles(v) => v,
            _ => return None,
        };

        if doubles.len() >= 16 {
            let mut values = [0.0; 16];
            values.copy_from_slice(&doubles[..16]);
            Some(ModelTransformation::new(values))
        } else if doubles.len() >= 9 {
            Some(ModelTransformation::from_affine(
                doubles[0], doubles[1], doubles[2],
                doubles[3], doubles[4], doubles[5],
            ))
        } else {
            None
        }
    }

    /// True when a usable pixel-scale block is present
    pub fn has_pixel_scales(&self) -> bool {
        self.get_model_pixel_scales().map_or(false, |s| s.is_set())
    }

    /// True when at least one tie point is present
    pub fn has_tie_points(&self) -> bool {
        !self.get_model_tie_points().is_empty()
    }

    /// True when a non-trivial model transformation is present
    pub fn has_model_transformation(&self) -> bool {
        self.get_model_transformation().map_or(false, |t| t.is_set())
    }

    /// True when a NoData marker is present
    pub fn has_no_data(&self) -> bool {
        self.tree.has_field(tags::GDAL_NODATA)
    }

    /// Gets the NoData value; NaN when present but unparseable
    pub fn get_no_data(&self) -> Option<f64> {
        let field = self.tree.get_field(tags::GDAL_NODATA)?;
        let text = match &field.values {
            FieldValues::Asciis(parts) => parts.first()?.clone(),
            FieldValues::Doubles(v) => return v.first().copied(),
            FieldValues::Shorts(v) => return v.first().map(|s| *s as f64),
        };
        Some(text.trim().parse::<f64>().unwrap_or(f64::NAN))
    }

    /// Renders every GeoKey and georeferencing block for error reports
    pub fn diagnostic_dump(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "GeoKey directory (version {}, revision {}.{}):\n",
            self.header.version, self.header.revision_major, self.header.revision_minor));

        for entry in &self.entries {
            let value = self.get_geo_key(entry.key_id)
                .unwrap_or_else(|| "<undecodable>".to_string());
            out.push_str(&format!(
                "  {} ({}): location={}, count={}, value={}\n",
                entry.key_id, entry.get_name(), entry.tiff_tag_location,
                entry.count, value));
        }

        if let Some(scales) = self.get_model_pixel_scales() {
            out.push_str(&format!("Pixel scales: {:?}\n", scales.as_array()));
        }
        for (i, tp) in self.get_model_tie_points().iter().enumerate() {
            out.push_str(&format!("Tie point {}: {:?}\n", i, tp.as_slice()));
        }
        if let Some(tx) = self.get_model_transformation() {
            out.push_str(&format!("Model transformation: {:?}\n", tx.as_slice()));
        }

        out
    }
}
