//! Generic tag-indexed metadata tree
//!
//! This module implements the already-parsed tag/field abstraction the
//! decoder reads from and the encoder serializes into. A tree holds a list
//! of fields, each carrying a numeric tag id, a human-readable name and a
//! typed value sequence. Raw TIFF byte layout is out of scope; a container
//! reader is expected to produce this structure.

use std::collections::HashMap;
use std::fmt;
use log::trace;
use crate::geotiff::keys::get_tag_name;

/// Typed value sequence carried by a field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValues {
    Shorts(Vec<u16>),
    Doubles(Vec<f64>),
    Asciis(Vec<String>),
}

impl FieldValues {
    /// Number of elements in the sequence
    pub fn len(&self) -> usize {
        match self {
            FieldValues::Shorts(v) => v.len(),
            FieldValues::Doubles(v) => v.len(),
            FieldValues::Asciis(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Kind label used in log output
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValues::Shorts(_) => "Shorts",
            FieldValues::Doubles(_) => "Doubles",
            FieldValues::Asciis(_) => "Asciis",
        }
    }
}

/// One field of a metadata tree
#[derive(Debug, Clone, PartialEq)]
pub struct TiffField {
    /// TIFF tag identifier
    pub tag: u16,
    /// Human-readable tag name
    pub name: String,
    /// The field's value sequence
    pub values: FieldValues,
}

impl TiffField {
    /// Creates a new field, deriving the name from the tag tables
    pub fn new(tag: u16, values: FieldValues) -> Self {
        TiffField {
            tag,
            name: get_tag_name(tag),
            values,
        }
    }

    /// Get a numeric value at `index`, whatever the storage kind
    ///
    /// ASCII sequences have no numeric reading and yield None.
    pub fn numeric_at(&self, index: usize) -> Option<f64> {
        match &self.values {
            FieldValues::Shorts(v) => v.get(index).map(|s| *s as f64),
            FieldValues::Doubles(v) => v.get(index).copied(),
            FieldValues::Asciis(_) => None,
        }
    }
}

/// An insertion-ordered collection of metadata fields
///
/// Fields keep their insertion order for serialization while a tag map
/// provides constant-time lookup, the same split the IFD structures in
/// TIFF readers use.
#[derive(Debug, Clone, Default)]
pub struct MetadataTree {
    fields: Vec<TiffField>,
    tag_map: HashMap<u16, usize>,
}

impl MetadataTree {
    /// Creates an empty tree
    pub fn new() -> Self {
        MetadataTree {
            fields: Vec::new(),
            tag_map: HashMap::new(),
        }
    }

    /// Adds a field, replacing any previous field with the same tag
    pub fn add_field(&mut self, field: TiffField) {
        trace!("Adding field: tag={} ({}), kind={}, count={}",
               field.tag, field.name, field.values.kind(), field.values.len());

        if let Some(&index) = self.tag_map.get(&field.tag) {
            self.fields[index] = field;
        } else {
            self.tag_map.insert(field.tag, self.fields.len());
            self.fields.push(field);
        }
    }

    /// Gets a field by tag
    pub fn get_field(&self, tag: u16) -> Option<&TiffField> {
        self.tag_map.get(&tag).map(|&index| &self.fields[index])
    }

    /// Checks if this tree has a specific tag
    pub fn has_field(&self, tag: u16) -> bool {
        self.tag_map.contains_key(&tag)
    }

    /// Removes a field by tag, if present
    pub fn remove_field(&mut self, tag: u16) {
        if let Some(index) = self.tag_map.remove(&tag) {
            self.fields.remove(index);
            // indices after the removed slot shift down by one
            for slot in self.tag_map.values_mut() {
                if *slot > index {
                    *slot -= 1;
                }
            }
        }
    }

    /// All fields in insertion order
    pub fn fields(&self) -> &[TiffField] {
        &self.fields
    }

    /// Number of fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for MetadataTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MetadataTree ({} fields)", self.fields.len())?;
        for field in &self.fields {
            writeln!(f, "  {} ({}): {} x{}",
                     field.tag, field.name, field.values.kind(), field.values.len())?;
        }
        Ok(())
    }
}
