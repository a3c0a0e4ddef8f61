//! Metadata to CRS reconstruction adapter
//!
//! Interprets decoded GeoTIFF metadata and rebuilds the coordinate
//! reference system it describes. Components carrying an EPSG code are
//! resolved through the authority service; user-defined components are
//! reassembled from their GeoKeys, with the parameter fallback chains and
//! numeric defaults real-world files require.

use log::{debug, warn};

use crate::crs::projection::{self, ParamSource, ProjectionFamily};
use crate::crs::{epsg_ref, parse_epsg_code, AuthorityError, AuthorityService, WktParser};
use crate::crs::{Conversion, Crs, Ellipsoid, GeodeticDatum, GeographicCrs,
                 ParameterGroup, PrimeMeridian, ProjectedCrs, Unit};
use crate::geotiff::citation::GeographicCitation;
use crate::geotiff::constants::{geo_keys, model_type, uom, values};
use crate::geotiff::errors::{GeoTiffError, GeoTiffResult};
use crate::geotiff::MetadataDecoder;

/// Prefix marking a citation that carries a WKT definition
const ESRI_PE_STRING: &str = "ESRI PE String = ";

/// Adapter reconstructing a CRS from GeoTIFF metadata
pub struct MetadataToCrsAdapter<'a> {
    authority: &'a dyn AuthorityService,
    wkt_parser: Option<&'a dyn WktParser>,
}

impl<'a> MetadataToCrsAdapter<'a> {
    pub fn new(authority: &'a dyn AuthorityService) -> Self {
        MetadataToCrsAdapter { authority, wkt_parser: None }
    }

    /// Attaches the WKT collaborator used for "ESRI PE String" citations
    pub fn with_wkt_parser(authority: &'a dyn AuthorityService, wkt_parser: &'a dyn WktParser) -> Self {
        MetadataToCrsAdapter { authority, wkt_parser: Some(wkt_parser) }
    }

    /// Rebuilds the CRS described by the metadata
    ///
    /// Dispatches on the model type key. Geocentric and every other model
    /// type are unsupported, except for the user-defined sentinel when an
    /// "ESRI PE String" citation is present.
    pub fn create_coordinate_system(&self, metadata: &MetadataDecoder) -> GeoTiffResult<Crs> {
        match get_geo_key_as_int(geo_keys::GT_MODEL_TYPE, metadata) {
            t if t == i32::from(model_type::PROJECTED) => {
                Ok(Crs::Projected(self.create_projected_crs(metadata)?))
            }
            t if t == i32::from(model_type::GEOGRAPHIC) => {
                Ok(Crs::Geographic(self.create_geographic_crs(metadata)?))
            }
            t if t == i32::from(values::USER_DEFINED) => self.create_from_citation(metadata),
            other => Err(GeoTiffError::UnsupportedCrsType(format!(
                "model type {}: only geographic and projected systems are supported", other))),
        }
    }

    /// Handles the user-defined model type via the WKT citation form
    fn create_from_citation(&self, metadata: &MetadataDecoder) -> GeoTiffResult<Crs> {
        let citation = metadata.get_geo_key(geo_keys::GT_CITATION);
        if let Some(wkt) = citation.as_deref().and_then(|c| c.strip_prefix(ESRI_PE_STRING)) {
            let parser = self.wkt_parser.ok_or_else(|| GeoTiffError::UnsupportedCrsType(
                "citation carries a PE string but no WKT parser is attached".to_string()))?;
            return parser.parse_wkt(wkt)
                .map_err(|e| self.wrap_authority(metadata, e));
        }
        Err(GeoTiffError::UnsupportedCrsType(
            "user-defined model type without a PE string citation".to_string()))
    }

    fn wrap_authority(&self, metadata: &MetadataDecoder, error: AuthorityError) -> GeoTiffError {
        debug!("authority failure; metadata was:\n{}", metadata.diagnostic_dump());
        GeoTiffError::Authority(error.to_string())
    }

    // ------------------------------------------------------------------
    // projected
    // ------------------------------------------------------------------

    fn create_projected_crs(&self, metadata: &MetadataDecoder) -> GeoTiffResult<ProjectedCrs> {
        let code_text = metadata
            .get_geo_key(geo_keys::PROJECTED_CS_TYPE)
            .map(|t| t.trim().to_string())
            .unwrap_or_else(|| "unnamed".to_string());

        // resolved up front since every path needs it; failures are not
        // fatal here, the CRS may still carry its own unit
        let linear_unit = self
            .create_unit(geo_keys::PROJ_LINEAR_UNITS, geo_keys::PROJ_LINEAR_UNIT_SIZE,
                         Unit::metre(), Unit::metre(), metadata)
            .ok();

        if code_text.eq_ignore_ascii_case("unnamed") || code_text == values::USER_DEFINED_STR {
            return self.create_user_defined_pcs(metadata, linear_unit);
        }

        let pcrs = self.authority
            .projected_crs(&epsg_ref(&code_text))
            .map_err(|e| self.wrap_authority(metadata, e))?;

        match linear_unit {
            Some(unit) if !unit.approx_eq(&pcrs.linear_unit) => {
                // same name, conversion and base; only the axis unit moves
                debug!("re-expressing {} in decoded unit {}", pcrs.name, unit.name);
                Ok(ProjectedCrs {
                    name: pcrs.name.clone(),
                    base: pcrs.base.clone(),
                    conversion: pcrs.conversion.clone(),
                    linear_unit: unit,
                    epsg: None,
                })
            }
            _ => Ok(pcrs),
        }
    }

    fn create_user_defined_pcs(&self, metadata: &MetadataDecoder, linear_unit: Option<Unit>) -> GeoTiffResult<ProjectedCrs> {
        let pcs_citation = metadata.get_geo_key(geo_keys::PCS_CITATION);
        let parsed = pcs_citation
            .as_deref()
            .map(GeographicCitation::parse)
            .unwrap_or_default();

        let name = parsed.pcs_name.clone()
            .or_else(|| pcs_citation.as_deref().map(clean_name))
            .or_else(|| metadata.get_geo_key(geo_keys::GT_CITATION))
            .unwrap_or_else(|| "unnamed".to_string());

        let proj_code = metadata.get_geo_key(geo_keys::PROJECTION);
        let proj_user_defined = match proj_code.as_deref() {
            None => true,
            Some(code) => code == values::USER_DEFINED_STR,
        };

        let base = self.create_geographic_crs(metadata)?;
        let ellipsoid = base.datum.ellipsoid.clone();

        let conversion = if proj_user_defined {
            let projection_name = parsed.prj_name.clone().unwrap_or_else(|| name.clone());
            let mut parameters = self.create_user_defined_projection_parameters(
                &projection_name, metadata)?;
            refine_with_ellipsoid(&mut parameters.1, &ellipsoid);
            Conversion::new(&projection_name, parameters.0, parameters.1)
        } else {
            let code = proj_code.unwrap_or_default();
            let mut conversion = self.authority
                .conversion(&epsg_ref(&code))
                .map_err(|e| self.wrap_authority(metadata, e))?;
            refine_with_ellipsoid(&mut conversion.parameters, &ellipsoid);
            conversion
        };

        Ok(ProjectedCrs {
            name,
            base,
            conversion,
            linear_unit: linear_unit.unwrap_or_else(Unit::metre),
            epsg: None,
        })
    }

    /// Builds the projection parameter group from raw GeoKeys
    ///
    /// The coordinate transformation code takes precedence over the
    /// projection name when both resolve; the Mercator code alone cannot
    /// distinguish its 1SP and 2SP forms, so a present first standard
    /// parallel promotes the match.
    fn create_user_defined_projection_parameters(
        &self,
        projection_name: &str,
        metadata: &MetadataDecoder,
    ) -> GeoTiffResult<(&'static str, ParameterGroup)> {
        let ct_text = metadata.get_geo_key(geo_keys::PROJ_COORD_TRANS);
        let ct_text = match ct_text {
            None => {
                return Err(GeoTiffError::MissingKey(
                    "user-defined projections must specify a coordinate transformation code in ProjCoordTransGeoKey".to_string()))
            }
            Some(t) if t == values::USER_DEFINED_STR => {
                return Err(GeoTiffError::MissingKey(
                    "user-defined projections must specify a coordinate transformation code in ProjCoordTransGeoKey".to_string()))
            }
            Some(t) => t,
        };

        let ct_code = ct_text.trim().parse::<u16>().ok();
        let mut descriptor = ct_code
            .and_then(projection::find_by_code)
            .or_else(|| projection::find_by_name(projection_name))
            .ok_or_else(|| GeoTiffError::UnsupportedProjection(format!(
                "coordinate transformation {:?} ({:?})", ct_text, projection_name)))?;

        if descriptor.family == ProjectionFamily::Mercator1Sp
            && metadata.has_geo_key(geo_keys::PROJ_STD_PARALLEL_1)
        {
            if let Some(two_sp) = projection::find_by_family(ProjectionFamily::Mercator2Sp) {
                descriptor = two_sp;
            }
        }

        debug!("reconstructing projection family {:?} from GeoKeys", descriptor.family);

        let mut group = projection::descriptor_defaults(descriptor);
        for mapping in descriptor.params {
            group.set(mapping.names[0], chain_value(metadata, mapping.source));
        }
        Ok((descriptor.name, group))
    }

    // ------------------------------------------------------------------
    // geographic
    // ------------------------------------------------------------------

    fn create_geographic_crs(&self, metadata: &MetadataDecoder) -> GeoTiffResult<GeographicCrs> {
        let code_text = metadata.get_geo_key(geo_keys::GEOGRAPHIC_TYPE);

        let angular_unit = self
            .create_unit(geo_keys::GEOG_ANGULAR_UNITS, geo_keys::GEOG_ANGULAR_UNIT_SIZE,
                         Unit::radian(), Unit::degree(), metadata)
            .ok();
        let linear_unit = self
            .create_unit(geo_keys::GEOG_LINEAR_UNITS, geo_keys::GEOG_LINEAR_UNIT_SIZE,
                         Unit::metre(), Unit::metre(), metadata)
            .ok();

        let code_text = match code_text {
            None => return self.create_user_defined_gcs(metadata, linear_unit, angular_unit),
            Some(t) if t == values::USER_DEFINED_STR => {
                return self.create_user_defined_gcs(metadata, linear_unit, angular_unit)
            }
            Some(t) => t,
        };

        let gcs = self.authority
            .geographic_crs(&epsg_ref(&code_text))
            .map_err(|e| self.wrap_authority(metadata, e))?;

        match angular_unit {
            Some(unit) if !unit.approx_eq(&gcs.angular_unit) => {
                debug!("re-expressing {} in decoded angular unit {}", gcs.name, unit.name);
                Ok(GeographicCrs {
                    name: gcs.name.clone(),
                    datum: gcs.datum.clone(),
                    angular_unit: unit,
                    epsg: None,
                })
            }
            _ => Ok(gcs),
        }
    }

    fn create_user_defined_gcs(
        &self,
        metadata: &MetadataDecoder,
        linear_unit: Option<Unit>,
        angular_unit: Option<Unit>,
    ) -> GeoTiffResult<GeographicCrs> {
        let citation_text = metadata.get_geo_key(geo_keys::GEOG_CITATION);
        let citation = citation_text
            .as_deref()
            .map(GeographicCitation::parse)
            .unwrap_or_default();

        let name = citation.gcs_name.clone()
            .or_else(|| citation_text.clone())
            .unwrap_or_else(|| "unnamed".to_string());

        let datum = self.create_geodetic_datum(
            &linear_unit, &angular_unit, metadata, &citation, citation_text.as_deref())?;

        Ok(GeographicCrs {
            name,
            datum,
            angular_unit: angular_unit.unwrap_or_else(Unit::degree),
            epsg: None,
        })
    }

    fn create_geodetic_datum(
        &self,
        linear_unit: &Option<Unit>,
        angular_unit: &Option<Unit>,
        metadata: &MetadataDecoder,
        citation: &GeographicCitation,
        citation_text: Option<&str>,
    ) -> GeoTiffResult<GeodeticDatum> {
        let datum_code = metadata.get_geo_key(geo_keys::GEOG_GEODETIC_DATUM).ok_or_else(|| {
            GeoTiffError::MissingKey(
                "a user-defined geographic coordinate system must include a predefined datum".to_string())
        })?;

        if datum_code != values::USER_DEFINED_STR {
            return self.authority
                .datum(&epsg_ref(&datum_code))
                .map_err(|e| self.wrap_authority(metadata, e));
        }

        let datum_name = citation.datum.clone()
            .or_else(|| citation_text.map(|t| t.to_string()))
            .unwrap_or_else(|| "unnamed".to_string());

        if datum_name.trim().eq_ignore_ascii_case("WGS84") {
            return Ok(GeodeticDatum::wgs84());
        }

        let ellipsoid = self.create_ellipsoid(linear_unit, metadata, citation, citation_text)?;
        let prime_meridian = self.create_prime_meridian(metadata, angular_unit, citation)?;

        Ok(GeodeticDatum::new(&datum_name, ellipsoid, prime_meridian))
    }

    /// Builds the ellipsoid from its GeoKeys
    ///
    /// The (semi-major, inverse-flattening) pair is preferred; when only
    /// the semi-minor axis is present the flattening is derived, with the
    /// equal-axes sphere mapped to infinite inverse flattening.
    fn create_ellipsoid(
        &self,
        unit: &Option<Unit>,
        metadata: &MetadataDecoder,
        citation: &GeographicCitation,
        citation_text: Option<&str>,
    ) -> GeoTiffResult<Ellipsoid> {
        let ellipsoid_key = metadata.get_geo_key(geo_keys::GEOG_ELLIPSOID);
        let user_defined = match ellipsoid_key.as_deref() {
            None => true,
            Some(code) => code == values::USER_DEFINED_STR,
        };

        if !user_defined {
            let code = ellipsoid_key.unwrap_or_default();
            return self.authority
                .ellipsoid(&epsg_ref(&code))
                .map_err(|e| self.wrap_authority(metadata, e));
        }

        let name = citation.ellipsoid.clone()
            .or_else(|| citation_text.map(|t| t.to_string()))
            .unwrap_or_else(|| "unnamed".to_string());

        if name.trim().eq_ignore_ascii_case("WGS84") {
            return Ok(Ellipsoid::wgs84());
        }

        let semi_major = get_geo_key_as_double(geo_keys::GEOG_SEMI_MAJOR_AXIS, metadata);
        let inverse_flattening = match metadata.get_geo_key(geo_keys::GEOG_INV_FLATTENING) {
            Some(text) => text.trim().parse::<f64>().unwrap_or(f64::NAN),
            None => {
                let semi_minor = get_geo_key_as_double(geo_keys::GEOG_SEMI_MINOR_AXIS, metadata);
                if (semi_major - semi_minor).abs() <= f64::EPSILON * semi_major.abs() {
                    // perfect sphere
                    f64::INFINITY
                } else {
                    semi_major / (semi_major - semi_minor)
                }
            }
        };

        Ok(Ellipsoid::flattened_sphere(
            &name,
            semi_major,
            inverse_flattening,
            unit.clone().unwrap_or_else(Unit::metre),
        ))
    }

    /// Builds the prime meridian from its GeoKeys
    ///
    /// Absent key means Greenwich; so does an explicit zero longitude.
    fn create_prime_meridian(
        &self,
        metadata: &MetadataDecoder,
        angular_unit: &Option<Unit>,
        citation: &GeographicCitation,
    ) -> GeoTiffResult<PrimeMeridian> {
        let pm_code = match metadata.get_geo_key(geo_keys::GEOG_PRIME_MERIDIAN) {
            None => return Ok(PrimeMeridian::greenwich()),
            Some(code) => code,
        };

        if pm_code != values::USER_DEFINED_STR {
            return self.authority
                .prime_meridian(&epsg_ref(&pm_code))
                .map_err(|e| self.wrap_authority(metadata, e));
        }

        let longitude = metadata
            .get_geo_key(geo_keys::GEOG_PRIME_MERIDIAN_LONG)
            .and_then(|t| t.trim().parse::<f64>().ok())
            .ok_or_else(|| GeoTiffError::GenericError(
                "invalid user-defined prime meridian specification".to_string()))?;

        if longitude == 0.0 {
            return Ok(PrimeMeridian::greenwich());
        }

        let name = citation.primem.clone()
            .unwrap_or_else(|| "user-defined prime meridian".to_string());
        Ok(PrimeMeridian::new(
            &name,
            longitude,
            angular_unit.clone().unwrap_or_else(Unit::degree),
        ))
    }

    // ------------------------------------------------------------------
    // units
    // ------------------------------------------------------------------

    /// Resolves a unit from its code key and user-defined size key
    ///
    /// Absent key yields the default unit. The user-defined sentinel
    /// requires the size key and scales the base unit by it. Coded units
    /// resolve from the built-in GeoTIFF table first, then through the
    /// authority service.
    fn create_unit(
        &self,
        key: u16,
        size_key: u16,
        base: Unit,
        default: Unit,
        metadata: &MetadataDecoder,
    ) -> GeoTiffResult<Unit> {
        let code_text = match metadata.get_geo_key(key) {
            None => return Ok(default),
            Some(t) => t,
        };

        if code_text == values::USER_DEFINED_STR {
            let size_text = metadata.get_geo_key(size_key).ok_or_else(|| {
                GeoTiffError::MissingKey(
                    "a unit length must be defined when using a user-defined unit".to_string())
            })?;
            let size = size_text.trim().parse::<f64>().map_err(|e| {
                GeoTiffError::GenericError(format!("invalid unit size {:?}: {}", size_text, e))
            })?;
            return Ok(base.times(size, "user-defined unit"));
        }

        if let Some(unit) = parse_epsg_code(&code_text).and_then(builtin_uom) {
            return Ok(unit);
        }

        self.authority
            .unit(&epsg_ref(&code_text))
            .map_err(|e| self.wrap_authority(metadata, e))
    }
}

/// Units named directly by GeoTIFF unit-of-measure codes
fn builtin_uom(code: u32) -> Option<Unit> {
    match code {
        c if c == u32::from(uom::LINEAR_METER) => Some(Unit::metre()),
        c if c == u32::from(uom::LINEAR_FOOT) => Some(Unit::foot()),
        c if c == u32::from(uom::LINEAR_FOOT_US_SURVEY) => Some(Unit::us_survey_foot()),
        c if c == u32::from(uom::LINEAR_YARD_SEARS) => Some(Unit::yard()),
        c if c == u32::from(uom::LINEAR_MILE_INTERNATIONAL_NAUTICAL) => Some(Unit::nautical_mile()),
        c if c == u32::from(uom::ANGULAR_RADIAN) => Some(Unit::radian()),
        c if c == u32::from(uom::ANGULAR_DEGREE) => Some(Unit::degree()),
        c if c == u32::from(uom::ANGULAR_ARC_MINUTE) => Some(Unit::arc_minute()),
        c if c == u32::from(uom::ANGULAR_ARC_SECOND) => Some(Unit::arc_second()),
        c if c == u32::from(uom::ANGULAR_GRAD) => Some(Unit::grad()),
        _ => None,
    }
}

/// Overwrites the semi-axes with the reconstructed ellipsoid's values,
/// displacing whatever defaults the projection method carried
fn refine_with_ellipsoid(parameters: &mut ParameterGroup, ellipsoid: &Ellipsoid) {
    parameters.set("semi_major", ellipsoid.semi_major_axis);
    parameters.set("semi_minor", ellipsoid.semi_minor_axis());
}

/// Walks a parameter's GeoKey fallback chain, substituting the chain
/// default when every key is absent or unparseable
pub(crate) fn chain_value(metadata: &MetadataDecoder, source: ParamSource) -> f64 {
    for key in source.chain() {
        if let Some(text) = metadata.get_geo_key(*key) {
            match text.trim().parse::<f64>() {
                Ok(value) => return value,
                Err(_) => warn!("unparseable value {:?} for GeoKey {}", text, key),
            }
        }
    }
    source.default_value()
}

/// Tolerant integer read: 0 when the key is absent or malformed
pub(crate) fn get_geo_key_as_int(key: u16, metadata: &MetadataDecoder) -> i32 {
    match metadata.get_geo_key(key) {
        Some(text) => text.trim().parse::<i32>().unwrap_or_else(|e| {
            debug!("GeoKey {} is not an integer ({}): {}", key, text, e);
            i32::from(values::UNDEFINED)
        }),
        None => i32::from(values::UNDEFINED),
    }
}

/// Tolerant double read: NaN when the key is absent or malformed
pub(crate) fn get_geo_key_as_double(key: u16, metadata: &MetadataDecoder) -> f64 {
    match metadata.get_geo_key(key) {
        Some(text) => text.trim().parse::<f64>().unwrap_or_else(|e| {
            warn!("GeoKey {} is not a number ({}): {}", key, text, e);
            f64::NAN
        }),
        None => f64::NAN,
    }
}

/// Strips the noise some writers leave ahead of names
fn clean_name(tiff_name: &str) -> String {
    let mut name = tiff_name;
    for marker in ['$', '\n', '\r'] {
        if let Some(index) = name.rfind(marker) {
            name = &name[index + 1..];
        }
    }
    name.to_string()
}
