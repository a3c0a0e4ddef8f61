//! Units of measure
//!
//! A small unit model sufficient for georeferencing metadata: every unit
//! carries a kind and a conversion factor to its base unit (metre for
//! linear units, radian for angular units). Identity is by kind and
//! factor, not by name, since the same unit travels under many spellings.

use std::f64::consts::PI;

/// Unit system a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Linear,
    Angular,
    Scale,
}

/// A unit of measure with its factor to the base unit of its kind
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub name: String,
    pub kind: UnitKind,
    /// Factor converting one of this unit to the base (metre / radian)
    pub to_base: f64,
}

impl Unit {
    pub fn linear(name: &str, to_metre: f64) -> Self {
        Unit { name: name.to_string(), kind: UnitKind::Linear, to_base: to_metre }
    }

    pub fn angular(name: &str, to_radian: f64) -> Self {
        Unit { name: name.to_string(), kind: UnitKind::Angular, to_base: to_radian }
    }

    pub fn scale(name: &str, factor: f64) -> Self {
        Unit { name: name.to_string(), kind: UnitKind::Scale, to_base: factor }
    }

    pub fn metre() -> Self {
        Unit::linear("metre", 1.0)
    }

    pub fn foot() -> Self {
        Unit::linear("foot", 0.3048)
    }

    pub fn us_survey_foot() -> Self {
        Unit::linear("US survey foot", 12.0 / 39.37)
    }

    pub fn yard() -> Self {
        Unit::linear("yard", 0.9144)
    }

    pub fn nautical_mile() -> Self {
        Unit::linear("nautical mile", 1852.0)
    }

    pub fn degree() -> Self {
        Unit::angular("degree", PI / 180.0)
    }

    pub fn radian() -> Self {
        Unit::angular("radian", 1.0)
    }

    pub fn grad() -> Self {
        Unit::angular("grad", PI / 200.0)
    }

    pub fn arc_minute() -> Self {
        Unit::angular("arc-minute", PI / 180.0 / 60.0)
    }

    pub fn arc_second() -> Self {
        Unit::angular("arc-second", PI / 180.0 / 3600.0)
    }

    /// Derives a unit scaled from this one, as in "base times size"
    pub fn times(&self, factor: f64, name: &str) -> Self {
        Unit {
            name: name.to_string(),
            kind: self.kind,
            to_base: self.to_base * factor,
        }
    }

    /// Converts a quantity in this unit to the base unit
    pub fn to_base_units(&self, value: f64) -> f64 {
        value * self.to_base
    }

    /// Same kind and (within rounding) the same size
    pub fn approx_eq(&self, other: &Unit) -> bool {
        self.kind == other.kind && approx(self.to_base, other.to_base)
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-12 * a.abs().max(b.abs()).max(1.0)
}

/// Folds well-known alternate spellings onto the canonical unit name
///
/// Writers disagree on how to spell degrees and the US survey foot; this
/// keeps table matching from tripping over them.
pub fn canonical_unit_name(name: &str) -> &str {
    match name.trim() {
        "degree" | "degrees" | "Degree" | "deg" | "DMS" | "D.MS" | "DMSH" => "degree",
        "foot_survey_us" | "Foot_US" | "us_survey_foot" | "US survey foot" => "US survey foot",
        other => other,
    }
}
