//! CRS to metadata export adapter
//!
//! Walks a structured CRS and populates a metadata encoder. Whenever a
//! component carries a representable EPSG code the adapter emits just that
//! code and stops descending; otherwise it emits the user-defined sentinel,
//! a labeled citation segment, and the minimal parameter set needed to
//! rebuild the component on the way back in.

use log::debug;

use crate::crs::{canonical_unit_name, Conversion, Crs, Ellipsoid, GeodeticDatum,
                 GeographicCrs, PrimeMeridian, ProjectedCrs, Unit, UnitKind};
use crate::crs::projection;
use crate::geotiff::constants::{geo_keys, model_type, uom, values};
use crate::geotiff::errors::{GeoTiffError, GeoTiffResult};
use crate::geotiff::MetadataEncoder;

/// Adapter translating a CRS into GeoTIFF metadata
pub struct CrsToMetadataAdapter<'a> {
    crs: &'a Crs,
}

impl<'a> CrsToMetadataAdapter<'a> {
    pub fn new(crs: &'a Crs) -> Self {
        CrsToMetadataAdapter { crs }
    }

    /// Translates the CRS into a populated metadata encoder
    ///
    /// Only geographic and projected reference systems can be encoded;
    /// vertical, compound, local and fitted systems are refused.
    pub fn parse_coordinate_reference_system(&self) -> GeoTiffResult<MetadataEncoder> {
        let mut encoder = MetadataEncoder::new();

        match self.crs {
            Crs::Projected(pcrs) => {
                encoder.add_geo_short_param(
                    u32::from(geo_keys::GT_MODEL_TYPE),
                    u32::from(model_type::PROJECTED))?;
                self.parse_projected_crs(pcrs, &mut encoder)?;
            }
            Crs::Geographic(gcrs) => {
                encoder.add_geo_short_param(
                    u32::from(geo_keys::GT_MODEL_TYPE),
                    u32::from(model_type::GEOGRAPHIC))?;
                self.parse_geographic_crs(gcrs, &mut encoder)?;
            }
        }

        Ok(encoder)
    }

    /// Whether an authority code can ride in a TIFF short
    fn ushort_code(epsg: Option<u32>) -> Option<u32> {
        epsg.filter(|c| MetadataEncoder::is_tiff_ushort(i64::from(*c)))
    }

    fn parse_projected_crs(&self, pcrs: &ProjectedCrs, encoder: &mut MetadataEncoder) -> GeoTiffResult<()> {
        if let Some(code) = Self::ushort_code(pcrs.epsg) {
            debug!("projected CRS resolves to EPSG:{}", code);
            encoder.add_geo_short_param(u32::from(geo_keys::PROJECTED_CS_TYPE), code)?;
            return Ok(());
        }

        // user-defined projected coordinate reference system
        encoder.add_geo_short_param(
            u32::from(geo_keys::PROJECTED_CS_TYPE),
            u32::from(values::USER_DEFINED))?;
        encoder.add_geo_ascii(
            u32::from(geo_keys::PCS_CITATION),
            &format!("PCS Name = {}", pcrs.name))?;

        self.parse_projection(pcrs, encoder)?;
        self.parse_geographic_crs(&pcrs.base, encoder)
    }

    fn parse_projection(&self, pcrs: &ProjectedCrs, encoder: &mut MetadataEncoder) -> GeoTiffResult<()> {
        let conversion = &pcrs.conversion;
        if let Some(code) = Self::ushort_code(conversion.epsg) {
            debug!("conversion resolves to EPSG:{}", code);
            encoder.add_geo_short_param(u32::from(geo_keys::PROJECTION), code)?;
            return Ok(());
        }

        // user-defined projection
        encoder.add_geo_short_param(
            u32::from(geo_keys::PROJECTION),
            u32::from(values::USER_DEFINED))?;
        encoder.add_geo_ascii(
            u32::from(geo_keys::PCS_CITATION),
            &format!("PRJ Name = {}", conversion.name))?;

        self.parse_coordinate_transform(conversion, encoder)?;
        self.parse_linear_unit(&pcrs.linear_unit, encoder)
    }

    /// Emits the coordinate transformation code and its parameter keys
    fn parse_coordinate_transform(&self, conversion: &Conversion, encoder: &mut MetadataEncoder) -> GeoTiffResult<()> {
        let descriptor = projection::find_by_name(&conversion.method_name)
            .ok_or_else(|| GeoTiffError::UnsupportedProjection(format!(
                "projection {:?} is not supported for export", conversion.method_name)))?;

        debug!("exporting projection family {:?} (CT code {})",
               descriptor.family, descriptor.ct_code);

        encoder.add_geo_short_param(
            u32::from(geo_keys::PROJ_COORD_TRANS),
            u32::from(descriptor.ct_code))?;

        for mapping in descriptor.params {
            if let Some(value) = conversion.parameters.get_any(mapping.names) {
                encoder.add_geo_double_param(u32::from(mapping.export_key), value)?;
            }
        }
        Ok(())
    }

    /// Emits the projected linear unit from the fixed export set
    ///
    /// Units outside the set produce no keys at all; this gap is kept
    /// deliberately, see DESIGN.md.
    fn parse_linear_unit(&self, unit: &Unit, encoder: &mut MetadataEncoder) -> GeoTiffResult<()> {
        if unit.kind != UnitKind::Linear {
            return Err(GeoTiffError::GenericError(format!(
                "unit {:?} is not a linear unit", unit.name)));
        }

        let table = [
            (Unit::metre(), uom::LINEAR_METER),
            (Unit::nautical_mile(), uom::LINEAR_MILE_INTERNATIONAL_NAUTICAL),
            (Unit::foot(), uom::LINEAR_FOOT),
            (Unit::yard(), uom::LINEAR_YARD_SEARS),
            (Unit::us_survey_foot(), uom::LINEAR_FOOT_US_SURVEY),
        ];
        for (candidate, code) in &table {
            if unit.approx_eq(candidate) {
                encoder.add_geo_short_param(
                    u32::from(geo_keys::PROJ_LINEAR_UNITS), u32::from(*code))?;
                encoder.add_geo_double_param(
                    u32::from(geo_keys::PROJ_LINEAR_UNIT_SIZE), unit.to_base)?;
                return Ok(());
            }
        }

        debug!("linear unit {:?} outside the export set, emitting nothing", unit.name);
        Ok(())
    }

    fn parse_geographic_crs(&self, gcrs: &GeographicCrs, encoder: &mut MetadataEncoder) -> GeoTiffResult<()> {
        if let Some(code) = Self::ushort_code(gcrs.epsg) {
            debug!("geographic CRS resolves to EPSG:{}", code);
            encoder.add_geo_short_param(u32::from(geo_keys::GEOGRAPHIC_TYPE), code)?;
            return Ok(());
        }

        // user-defined geographic coordinate reference system
        encoder.add_geo_short_param(
            u32::from(geo_keys::GEOGRAPHIC_TYPE),
            u32::from(values::USER_DEFINED))?;
        encoder.add_geo_ascii(
            u32::from(geo_keys::GEOG_CITATION),
            &format!("GCS Name = {}", gcrs.name))?;

        self.parse_datum(&gcrs.datum, encoder)?;
        self.parse_unit(
            &gcrs.angular_unit,
            geo_keys::GEOG_ANGULAR_UNITS,
            geo_keys::GEOG_ANGULAR_UNIT_SIZE,
            "Aunits",
            encoder)?;
        self.parse_prime_meridian(&gcrs.datum.prime_meridian, encoder)?;
        self.parse_unit(
            &gcrs.datum.ellipsoid.unit,
            geo_keys::GEOG_LINEAR_UNITS,
            geo_keys::GEOG_LINEAR_UNIT_SIZE,
            "Lunits",
            encoder)
    }

    fn parse_datum(&self, datum: &GeodeticDatum, encoder: &mut MetadataEncoder) -> GeoTiffResult<()> {
        if let Some(code) = Self::ushort_code(datum.epsg) {
            encoder.add_geo_short_param(u32::from(geo_keys::GEOG_GEODETIC_DATUM), code)?;
            return Ok(());
        }

        encoder.add_geo_short_param(
            u32::from(geo_keys::GEOG_GEODETIC_DATUM),
            u32::from(values::USER_DEFINED))?;
        encoder.add_geo_ascii(
            u32::from(geo_keys::GEOG_CITATION),
            &format!("Datum = {}", datum.name))?;

        self.parse_spheroid(&datum.ellipsoid, encoder)
    }

    fn parse_spheroid(&self, ellipsoid: &Ellipsoid, encoder: &mut MetadataEncoder) -> GeoTiffResult<()> {
        if let Some(code) = Self::ushort_code(ellipsoid.epsg) {
            encoder.add_geo_short_param(u32::from(geo_keys::GEOG_ELLIPSOID), code)?;
            return Ok(());
        }

        encoder.add_geo_short_param(
            u32::from(geo_keys::GEOG_ELLIPSOID),
            u32::from(values::USER_DEFINED))?;
        encoder.add_geo_ascii(
            u32::from(geo_keys::GEOG_CITATION),
            &format!("Ellipsoid = {}", ellipsoid.name))?;

        // the (semi-major, inverse-flattening) pair is always the one
        // written, matching what the reconstruction reads back
        encoder.add_geo_double_param(
            u32::from(geo_keys::GEOG_SEMI_MAJOR_AXIS), ellipsoid.semi_major_axis)?;
        encoder.add_geo_double_param(
            u32::from(geo_keys::GEOG_INV_FLATTENING), ellipsoid.inverse_flattening)?;
        Ok(())
    }

    fn parse_prime_meridian(&self, pm: &PrimeMeridian, encoder: &mut MetadataEncoder) -> GeoTiffResult<()> {
        if let Some(code) = Self::ushort_code(pm.epsg) {
            encoder.add_geo_short_param(u32::from(geo_keys::GEOG_PRIME_MERIDIAN), code)?;
            return Ok(());
        }

        encoder.add_geo_short_param(
            u32::from(geo_keys::GEOG_PRIME_MERIDIAN),
            u32::from(values::USER_DEFINED))?;
        encoder.add_geo_ascii(
            u32::from(geo_keys::GEOG_CITATION),
            &format!("Primem = {}", pm.name))?;
        encoder.add_geo_double_param(
            u32::from(geo_keys::GEOG_PRIME_MERIDIAN_LONG), pm.greenwich_longitude)?;
        Ok(())
    }

    /// Generic unit export used for angular and ellipsoid-linear units
    ///
    /// Known units are emitted as their bare code; anything else becomes
    /// user-defined with a labeled citation and a factor to the compatible
    /// base unit (metre for lengths, radian for angles, 1 otherwise).
    fn parse_unit(&self, unit: &Unit, units_key: u16, size_key: u16,
                  citation_label: &str, encoder: &mut MetadataEncoder) -> GeoTiffResult<()> {
        let code = match canonical_unit_name(&unit.name) {
            "degree" => Some(uom::ANGULAR_DEGREE),
            "US survey foot" => Some(uom::LINEAR_FOOT_US_SURVEY),
            _ => {
                let table = [
                    (Unit::metre(), uom::LINEAR_METER),
                    (Unit::foot(), uom::LINEAR_FOOT),
                    (Unit::us_survey_foot(), uom::LINEAR_FOOT_US_SURVEY),
                    (Unit::grad(), uom::ANGULAR_GRAD),
                    (Unit::radian(), uom::ANGULAR_RADIAN),
                    (Unit::degree(), uom::ANGULAR_DEGREE),
                ];
                table.iter()
                    .find(|(candidate, _)| unit.approx_eq(candidate))
                    .map(|(_, code)| *code)
            }
        };

        if let Some(code) = code {
            encoder.add_geo_short_param(u32::from(units_key), u32::from(code))?;
            return Ok(());
        }

        encoder.add_geo_short_param(u32::from(units_key), u32::from(values::USER_DEFINED))?;
        encoder.add_geo_ascii(
            u32::from(geo_keys::GEOG_CITATION),
            &format!("{} = {}", citation_label, unit.name))?;
        let factor = match unit.kind {
            UnitKind::Linear | UnitKind::Angular => unit.to_base,
            UnitKind::Scale => 1.0,
        };
        encoder.add_geo_double_param(u32::from(size_key), factor)?;
        Ok(())
    }
}
