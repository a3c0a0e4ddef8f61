//! Coordinate handling for georeferencing math
//!
//! This module provides the affine transform used to relate raster
//! (pixel/line) space to model (world) space.

mod affine;

// Re-export key types
pub use self::affine::AffineTransform;
