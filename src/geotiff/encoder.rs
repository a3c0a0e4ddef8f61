//! Write-side metadata encoder
//!
//! The encoder accumulates GeoKey entries, parameter arenas and the model
//! georeferencing blocks, then serializes everything into a metadata tree
//! in the conventional field order downstream consumers expect.
//!
//! Invariants enforced here rather than at serialization time:
//! - every short input (key ids, counts, offsets, values) fits in u16
//! - the directory stays sorted by key id with the header record first
//! - the header's key count always equals the number of real entries
//! - pixel scale / tie points and the model transformation are mutually
//!   exclusive

use std::collections::BTreeMap;
use log::debug;

use crate::geotiff::constants::{directory, tags};
use crate::geotiff::errors::{GeoTiffError, GeoTiffResult};
use crate::geotiff::keys::{get_key_name, GeoKeyEntry};
use crate::geotiff::tree::{FieldValues, MetadataTree, TiffField};
use crate::geotiff::values::{ModelTransformation, PixelScale, TiePoint};

/// Encoder for GeoTIFF georeferencing metadata
pub struct MetadataEncoder {
    /// GeoKey directory; index 0 is the reserved header record
    entries: Vec<GeoKeyEntry>,
    /// Growable arena backing double-valued keys
    double_params: Vec<f64>,
    /// Growable arena backing ASCII-valued keys, '|'-separated runs
    ascii_params: String,
    tie_points: Vec<TiePoint>,
    pixel_scale: Option<PixelScale>,
    transformation: Option<ModelTransformation>,
    no_data: Option<f64>,
    /// Free-form ASCII tag metadata appended after the GeoTIFF blocks
    tag_metadata: BTreeMap<u16, String>,
}

impl MetadataEncoder {
    /// Creates an encoder seeded with the reserved header record
    pub fn new() -> Self {
        let header = GeoKeyEntry::new(
            directory::GEOTIFF_VERSION,
            directory::KEY_REVISION_MAJOR,
            directory::KEY_REVISION_MINOR,
            0,
        );
        MetadataEncoder {
            entries: vec![header],
            double_params: Vec::new(),
            ascii_params: String::new(),
            tie_points: Vec::new(),
            pixel_scale: None,
            transformation: None,
            no_data: None,
            tag_metadata: BTreeMap::new(),
        }
    }

    /// Whether a value is representable as an unsigned 16-bit TIFF short
    pub fn is_tiff_ushort(value: i64) -> bool {
        (0..=i64::from(u16::MAX)).contains(&value)
    }

    fn check_ushort(value: u32, what: &str) -> GeoTiffResult<u16> {
        if value > u32::from(u16::MAX) {
            return Err(GeoTiffError::ValueOutOfRange(format!(
                "{} {} exceeds the unsigned 16-bit range", what, value)));
        }
        Ok(value as u16)
    }

    /// Number of GeoKey entries, excluding the header
    pub fn num_geo_keys(&self) -> usize {
        self.entries.len() - 1
    }

    /// Finds the directory record for a key id
    pub fn get_geo_key_entry(&self, key_id: u16) -> Option<GeoKeyEntry> {
        self.entries[1..].iter().find(|e| e.key_id == key_id).copied()
    }

    fn position_of(&self, key_id: u16) -> Option<usize> {
        self.entries[1..]
            .iter()
            .position(|e| e.key_id == key_id)
            .map(|p| p + 1)
    }

    /// Inserts keeping ascending key order; the header keeps slot 0 and its
    /// count field tracks the number of real entries.
    fn insert_entry(&mut self, entry: GeoKeyEntry) {
        let slot = self.entries[1..]
            .iter()
            .position(|e| e.key_id > entry.key_id)
            .map(|p| p + 1)
            .unwrap_or(self.entries.len());
        self.entries.insert(slot, entry);
        self.entries[0].value_offset = (self.entries.len() - 1) as u16;
    }

    /// Adds a short-valued GeoKey, replacing a previous value for the key
    pub fn add_geo_short_param(&mut self, key_id: u32, value: u32) -> GeoTiffResult<()> {
        let key_id = Self::check_ushort(key_id, "GeoKey id")?;
        let value = Self::check_ushort(value, "GeoKey value")?;

        debug!("addGeoShortParam: {} ({}) = {}", key_id, get_key_name(key_id), value);

        if let Some(slot) = self.position_of(key_id) {
            self.entries[slot] = GeoKeyEntry::new(key_id, 0, 1, value);
            return Ok(());
        }
        self.insert_entry(GeoKeyEntry::new(key_id, 0, 1, value));
        Ok(())
    }

    /// Adds a double-valued GeoKey
    pub fn add_geo_double_param(&mut self, key_id: u32, value: f64) -> GeoTiffResult<()> {
        self.add_geo_double_params(key_id, &[value])
    }

    /// Adds a GeoKey carrying several doubles
    ///
    /// Values land in the double-parameter arena; re-adding a key points its
    /// record at the fresh values and orphans the old arena slots, matching
    /// first-match directory semantics.
    pub fn add_geo_double_params(&mut self, key_id: u32, values: &[f64]) -> GeoTiffResult<()> {
        let key_id = Self::check_ushort(key_id, "GeoKey id")?;
        let count = Self::check_ushort(values.len() as u32, "double param count")?;
        let offset = Self::check_ushort(self.double_params.len() as u32, "double param offset")?;

        debug!("addGeoDoubleParams: {} ({}) = {:?}", key_id, get_key_name(key_id), values);

        self.double_params.extend_from_slice(values);
        let entry = GeoKeyEntry::new(key_id, tags::GEO_DOUBLE_PARAMS_TAG, count, offset);

        if let Some(slot) = self.position_of(key_id) {
            self.entries[slot] = entry;
            return Ok(());
        }
        self.insert_entry(entry);
        Ok(())
    }

    /// Adds an ASCII-valued GeoKey
    ///
    /// Calling this twice for the same key extends the existing run with a
    /// `|` separator instead of creating a second entry; this is how
    /// multi-valued citation fields are clarified incrementally.
    pub fn add_geo_ascii(&mut self, key_id: u32, value: &str) -> GeoTiffResult<()> {
        let key_id = Self::check_ushort(key_id, "GeoKey id")?;

        debug!("addGeoAscii: {} ({}) += {:?}", key_id, get_key_name(key_id), value);

        if let Some(slot) = self.position_of(key_id) {
            let entry = self.entries[slot];
            if entry.tiff_tag_location != tags::GEO_ASCII_PARAMS_TAG {
                return Err(GeoTiffError::WrongStorageKind {
                    key_id,
                    expected: tags::GEO_ASCII_PARAMS_TAG,
                    actual: entry.tiff_tag_location,
                });
            }
            let new_count = Self::check_ushort(
                u32::from(entry.count) + value.len() as u32 + 1,
                "ASCII param count")?;
            self.ascii_params.push_str(value);
            self.ascii_params.push('|');
            self.entries[slot] = GeoKeyEntry::new(
                key_id, tags::GEO_ASCII_PARAMS_TAG, new_count, entry.value_offset);
            return Ok(());
        }

        let offset = Self::check_ushort(self.ascii_params.len() as u32, "ASCII param offset")?;
        let count = Self::check_ushort(value.len() as u32 + 1, "ASCII param count")?;
        self.ascii_params.push_str(value);
        self.ascii_params.push('|');
        self.insert_entry(GeoKeyEntry::new(key_id, tags::GEO_ASCII_PARAMS_TAG, count, offset));
        Ok(())
    }

    /// Reads back a short-valued key, validating the storage kind
    pub fn get_geo_short_param(&self, key_id: u16) -> GeoTiffResult<u16> {
        let entry = self.get_geo_key_entry(key_id).ok_or_else(|| {
            GeoTiffError::MissingKey(format!("GeoKey {} ({})", key_id, get_key_name(key_id)))
        })?;
        if !entry.is_inline() {
            return Err(GeoTiffError::WrongStorageKind {
                key_id,
                expected: 0,
                actual: entry.tiff_tag_location,
            });
        }
        Ok(entry.value_offset)
    }

    /// Reads back the doubles stored for a key, validating the storage kind
    pub fn get_geo_double_params(&self, key_id: u16) -> GeoTiffResult<Vec<f64>> {
        let entry = self.get_geo_key_entry(key_id).ok_or_else(|| {
            GeoTiffError::MissingKey(format!("GeoKey {} ({})", key_id, get_key_name(key_id)))
        })?;
        if entry.tiff_tag_location != tags::GEO_DOUBLE_PARAMS_TAG {
            return Err(GeoTiffError::WrongStorageKind {
                key_id,
                expected: tags::GEO_DOUBLE_PARAMS_TAG,
                actual: entry.tiff_tag_location,
            });
        }
        let start = entry.value_offset as usize;
        let end = start + entry.count as usize;
        if end > self.double_params.len() {
            return Err(GeoTiffError::GenericError(format!(
                "double param run for GeoKey {} out of bounds", key_id)));
        }
        Ok(self.double_params[start..end].to_vec())
    }

    /// Reads back the first double stored for a key
    pub fn get_geo_double_param(&self, key_id: u16) -> GeoTiffResult<f64> {
        let values = self.get_geo_double_params(key_id)?;
        values.first().copied().ok_or_else(|| {
            GeoTiffError::GenericError(format!("GeoKey {} has an empty double run", key_id))
        })
    }

    /// Reads back the ASCII run stored for a key, without the separator
    pub fn get_geo_ascii_param(&self, key_id: u16) -> GeoTiffResult<String> {
        let entry = self.get_geo_key_entry(key_id).ok_or_else(|| {
            GeoTiffError::MissingKey(format!("GeoKey {} ({})", key_id, get_key_name(key_id)))
        })?;
        if entry.tiff_tag_location != tags::GEO_ASCII_PARAMS_TAG {
            return Err(GeoTiffError::WrongStorageKind {
                key_id,
                expected: tags::GEO_ASCII_PARAMS_TAG,
                actual: entry.tiff_tag_location,
            });
        }
        let start = entry.value_offset as usize;
        let end = start + entry.count as usize;
        if end > self.ascii_params.len() {
            return Err(GeoTiffError::GenericError(format!(
                "ASCII param run for GeoKey {} out of bounds", key_id)));
        }
        let run = &self.ascii_params[start..end];
        Ok(run.strip_suffix('|').unwrap_or(run).to_string())
    }

    /// Sets the model pixel scale; conflicts with a prior transformation
    pub fn set_model_pixel_scale(&mut self, scale_x: f64, scale_y: f64, scale_z: f64) -> GeoTiffResult<()> {
        if self.transformation.is_some() {
            return Err(GeoTiffError::ConflictingFields(
                "model pixel scale cannot be set after a model transformation".to_string()));
        }
        self.pixel_scale = Some(PixelScale::new(scale_x, scale_y, scale_z));
        Ok(())
    }

    /// Replaces the tie point list with a single point
    pub fn set_model_tie_point(&mut self, i: f64, j: f64, k: f64, x: f64, y: f64, z: f64) -> GeoTiffResult<()> {
        if self.transformation.is_some() {
            return Err(GeoTiffError::ConflictingFields(
                "tie points cannot be set after a model transformation".to_string()));
        }
        self.tie_points.clear();
        self.tie_points.push(TiePoint::new(i, j, k, x, y, z));
        Ok(())
    }

    /// Appends a tie point; conflicts with a prior transformation
    pub fn add_model_tie_point(&mut self, i: f64, j: f64, k: f64, x: f64, y: f64, z: f64) -> GeoTiffResult<()> {
        if self.transformation.is_some() {
            return Err(GeoTiffError::ConflictingFields(
                "tie points cannot be added after a model transformation".to_string()));
        }
        self.tie_points.push(TiePoint::new(i, j, k, x, y, z));
        Ok(())
    }

    /// Sets the model transformation matrix; conflicts with pixel
    /// scale or tie points
    pub fn set_model_transformation(&mut self, values: [f64; 16]) -> GeoTiffResult<()> {
        if self.pixel_scale.is_some() || !self.tie_points.is_empty() {
            return Err(GeoTiffError::ConflictingFields(
                "a model transformation cannot be set after pixel scale or tie points".to_string()));
        }
        self.transformation = Some(ModelTransformation::new(values));
        Ok(())
    }

    /// Sets the NoData marker value
    pub fn set_no_data(&mut self, value: f64) {
        self.no_data = Some(value);
    }

    /// Adds a free-form ASCII tag, serialized after the GeoTIFF blocks
    pub fn add_tag_metadata(&mut self, tag: u32, value: &str) -> GeoTiffResult<()> {
        let tag = Self::check_ushort(tag, "tag id")?;
        self.tag_metadata.insert(tag, value.to_string());
        Ok(())
    }

    /// Serializes the accumulated state into a fresh metadata tree
    pub fn build_tree(&self) -> MetadataTree {
        let mut tree = MetadataTree::new();
        self.assign_to(&mut tree);
        tree
    }

    /// Serializes the accumulated state into an existing tree
    ///
    /// The block order is a compatibility contract: pixel scale, tie
    /// points or transformation (tie points win if both exist), GeoKey
    /// directory, double params, ASCII params, NoData, free-form tags.
    pub fn assign_to(&self, tree: &mut MetadataTree) {
        if let Some(scale) = &self.pixel_scale {
            tree.add_field(TiffField::new(
                tags::MODEL_PIXEL_SCALE_TAG,
                FieldValues::Doubles(scale.as_array().to_vec()),
            ));
        }

        if !self.tie_points.is_empty() {
            let doubles: Vec<f64> = self.tie_points
                .iter()
                .flat_map(|tp| tp.as_slice().iter().copied())
                .collect();
            tree.add_field(TiffField::new(
                tags::MODEL_TIEPOINT_TAG,
                FieldValues::Doubles(doubles),
            ));
        } else if let Some(tx) = &self.transformation {
            tree.add_field(TiffField::new(
                tags::MODEL_TRANSFORMATION_TAG,
                FieldValues::Doubles(tx.as_slice().to_vec()),
            ));
        }

        if self.entries.len() > 1 {
            let mut shorts = Vec::with_capacity(self.entries.len() * 4);
            for entry in &self.entries {
                shorts.push(entry.key_id);
                shorts.push(entry.tiff_tag_location);
                shorts.push(entry.count);
                shorts.push(entry.value_offset);
            }
            tree.add_field(TiffField::new(
                tags::GEO_KEY_DIRECTORY_TAG,
                FieldValues::Shorts(shorts),
            ));
        }

        if !self.double_params.is_empty() {
            tree.add_field(TiffField::new(
                tags::GEO_DOUBLE_PARAMS_TAG,
                FieldValues::Doubles(self.double_params.clone()),
            ));
        }

        if !self.ascii_params.is_empty() {
            tree.add_field(TiffField::new(
                tags::GEO_ASCII_PARAMS_TAG,
                FieldValues::Asciis(vec![self.ascii_params.clone()]),
            ));
        }

        if let Some(no_data) = self.no_data {
            tree.add_field(TiffField::new(
                tags::GDAL_NODATA,
                FieldValues::Asciis(vec![format!("{}", no_data)]),
            ));
        }

        for (tag, value) in &self.tag_metadata {
            tree.add_field(TiffField::new(
                *tag,
                FieldValues::Asciis(vec![value.clone()]),
            ));
        }
    }
}

impl Default for MetadataEncoder {
    fn default() -> Self {
        Self::new()
    }
}
