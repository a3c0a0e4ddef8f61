//! Auxiliary georeferencing value blocks
//!
//! Tie points, pixel scales and the model transformation matrix are stored
//! in their own TIFF fields, separate from the GeoKey directory. Each type
//! here carries the "set" rules that decide whether a block holds usable
//! data or is just a zero-filled placeholder.

/// Magnitude below which a component counts as unset
const EPS: f64 = 1e-6;

/// A paired raster-space / model-space anchor point
///
/// Components are (i, j, k) in raster space and (x, y, z) in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiePoint {
    values: [f64; 6],
}

impl TiePoint {
    pub fn new(i: f64, j: f64, k: f64, x: f64, y: f64, z: f64) -> Self {
        TiePoint { values: [i, j, k, x, y, z] }
    }

    /// Get a component by index (0..6)
    pub fn get_value_at(&self, index: usize) -> f64 {
        self.values[index]
    }

    /// Replace all six components
    pub fn set(&mut self, i: f64, j: f64, k: f64, x: f64, y: f64, z: f64) {
        self.values = [i, j, k, x, y, z];
    }

    /// True when every component is finite and non-negligible
    pub fn is_set(&self) -> bool {
        self.values.iter().all(|v| v.is_finite() && v.abs() > EPS)
    }

    pub fn as_slice(&self) -> &[f64; 6] {
        &self.values
    }
}

impl Default for TiePoint {
    fn default() -> Self {
        TiePoint { values: [0.0; 6] }
    }
}

/// Per-axis raster-to-model distance per pixel
///
/// Zero-initialised; the zero state doubles as the "unset" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelScale {
    pub scale_x: f64,
    pub scale_y: f64,
    pub scale_z: f64,
}

impl PixelScale {
    pub fn new(scale_x: f64, scale_y: f64, scale_z: f64) -> Self {
        PixelScale { scale_x, scale_y, scale_z }
    }

    /// True when the horizontal scales are finite and non-negligible.
    /// The Z scale is routinely zero for 2-D rasters and is not consulted.
    pub fn is_set(&self) -> bool {
        [self.scale_x, self.scale_y]
            .iter()
            .all(|v| v.is_finite() && v.abs() > EPS)
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.scale_x, self.scale_y, self.scale_z]
    }
}

/// A 4x4 row-major raster-to-model transformation matrix
///
/// For 2-D rasters only elements 0, 1, 3 (first row) and 4, 5, 7
/// (second row) are meaningful; the rest stay zero or fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTransformation {
    values: [f64; 16],
}

impl ModelTransformation {
    pub fn new(values: [f64; 16]) -> Self {
        ModelTransformation { values }
    }

    /// Build from the six coefficients of a 2-D affine transform
    pub fn from_affine(m00: f64, m01: f64, m02: f64, m10: f64, m11: f64, m12: f64) -> Self {
        let mut values = [0.0; 16];
        values[0] = m00;
        values[1] = m01;
        values[3] = m02;
        values[4] = m10;
        values[5] = m11;
        values[7] = m12;
        values[10] = 1.0;
        values[15] = 1.0;
        ModelTransformation { values }
    }

    /// True when any element is non-zero
    pub fn is_set(&self) -> bool {
        self.values.iter().any(|v| *v != 0.0)
    }

    /// Extract the 2-D affine subset (m00, m01, m02, m10, m11, m12)
    pub fn to_affine(&self) -> [f64; 6] {
        [
            self.values[0], self.values[1], self.values[3],
            self.values[4], self.values[5], self.values[7],
        ]
    }

    pub fn as_slice(&self) -> &[f64; 16] {
        &self.values
    }
}

impl Default for ModelTransformation {
    fn default() -> Self {
        ModelTransformation { values: [0.0; 16] }
    }
}
