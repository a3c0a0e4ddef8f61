//! Raster-to-model transform builder
//!
//! Derives the transform between raster (pixel/line) space and model
//! (world) space from either a tie point plus pixel scales or a full
//! model transformation matrix. The result always follows the cell-centre
//! convention: integer raster coordinates refer to pixel centres, so a
//! pixel-is-area file gets the half-pixel correction folded in.

use log::warn;

use crate::adapter::metadata_to_crs::get_geo_key_as_int;
use crate::coordinate::AffineTransform;
use crate::geotiff::constants::{geo_keys, raster_type, values};
use crate::geotiff::errors::{GeoTiffError, GeoTiffResult};
use crate::geotiff::MetadataDecoder;

/// What an integer raster coordinate refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelAnchor {
    /// Pixel-is-area: the coordinate names the cell's upper-left corner
    Corner,
    /// Pixel-is-point: the coordinate names the cell's centre
    Center,
}

/// Reads the raster type key; an absent key means pixel-is-area
fn raster_type_of(metadata: &MetadataDecoder) -> i32 {
    let code = get_geo_key_as_int(geo_keys::GT_RASTER_TYPE, metadata);
    if code == i32::from(values::UNDEFINED) {
        i32::from(raster_type::PIXEL_IS_AREA)
    } else {
        code
    }
}

/// Maps the raster type key onto the pixel anchor convention
pub fn get_raster_type(metadata: &MetadataDecoder) -> GeoTiffResult<PixelAnchor> {
    match raster_type_of(metadata) {
        code if code == i32::from(raster_type::PIXEL_IS_AREA) => Ok(PixelAnchor::Corner),
        code if code == i32::from(raster_type::PIXEL_IS_POINT) => Ok(PixelAnchor::Center),
        other => Err(GeoTiffError::GenericError(format!(
            "unsupported raster type {}", other))),
    }
}

/// Builds the raster-to-model transform for this metadata
///
/// Tie point plus pixel scales take precedence; a model transformation
/// matrix is used otherwise. Having neither is an error, but a transform
/// that turns out to be non-invertible yields `Ok(None)`; callers treat
/// that as "no usable georeferencing".
pub fn get_raster_to_model(metadata: &MetadataDecoder) -> GeoTiffResult<Option<AffineTransform>> {
    let has_tie_points = metadata.has_tie_points();
    let has_pixel_scales = metadata.has_pixel_scales();
    let has_transformation = metadata.has_model_transformation();
    let pixel_is_area = raster_type_of(metadata) == i32::from(raster_type::PIXEL_IS_AREA);

    let xform = if has_tie_points && has_pixel_scales {
        let tie_points = metadata.get_model_tie_points();
        let scales = match metadata.get_model_pixel_scales() {
            Some(s) => s,
            None => {
                return Err(GeoTiffError::GenericError(
                    "pixel scale block vanished between checks".to_string()))
            }
        };

        // raster rows grow downward while model northing grows upward
        let scale_lon = scales.scale_x;
        let scale_lat = -scales.scale_y;

        // anchor in raster space, moved to the cell-centre convention
        // when the file anchors on pixel corners
        let shift = if pixel_is_area { -0.5 } else { 0.0 };
        let tie_point_column = tie_points[0].get_value_at(0) + shift;
        let tie_point_row = tie_points[0].get_value_at(1) + shift;

        AffineTransform::new(
            scale_lon,
            0.0,
            tie_points[0].get_value_at(3) - scale_lon * tie_point_column,
            0.0,
            scale_lat,
            tie_points[0].get_value_at(4) - scale_lat * tie_point_row,
        )
    } else if has_transformation {
        let matrix = match metadata.get_model_transformation() {
            Some(m) => m,
            None => {
                return Err(GeoTiffError::GenericError(
                    "model transformation vanished between checks".to_string()))
            }
        };
        let [m00, m01, m02, m10, m11, m12] = matrix.to_affine();
        let affine = AffineTransform::new(m00, m01, m02, m10, m11, m12);

        if pixel_is_area {
            affine.concatenate(&AffineTransform::translation(0.5, 0.5))
        } else {
            affine
        }
    } else {
        return Err(GeoTiffError::GenericError(
            "unknown raster-to-model configuration".to_string()));
    };

    if xform.try_invert().is_none() {
        warn!("raster-to-model transform is not invertible: {:?}", xform.as_array());
        return Ok(None);
    }
    Ok(Some(xform))
}
