use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::core::error::AppError;
use crate::features::chargesites::models::{StatusFilter, Viewport};

/// Request DTO for creating or replacing a charge site
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChargeSiteRequestDto {
    /// Ignored: the identifier is assigned by the store on create and taken
    /// from the path on update
    #[serde(default)]
    pub id: Option<i64>,

    /// Owner of the charge site
    #[serde(default)]
    pub user_id: Option<i64>,

    /// True latitude (never returned to clients)
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,

    /// True longitude (never returned to clients)
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: f64,

    #[serde(default)]
    pub obfuscated_status: bool,

    #[serde(default)]
    pub reserved_status: bool,

    #[serde(default)]
    pub private_status: bool,

    /// Charging rate in kW
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Rate of charge must not be negative"))]
    pub rate_of_charge: f64,
}

/// Public view of a charge site. `latitude`/`longitude` are the obfuscated
/// location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChargeSiteResponseDto {
    pub id: i64,
    pub user_id: Option<i64>,
    pub latitude: f64,
    pub longitude: f64,
    pub obfuscated_status: bool,
    pub reserved_status: bool,
    pub private_status: bool,
    pub rate_of_charge: f64,
}

/// Query params for the region search
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RegionQueryParams {
    /// Latitude of the viewport center
    pub lat: f64,
    /// Longitude of the viewport center
    pub lon: f64,
    /// Half of the viewport's latitude extent
    #[validate(range(min = 0.0, message = "latd must not be negative"))]
    pub latd: f64,
    /// Half of the viewport's longitude extent
    #[validate(range(min = 0.0, message = "lond must not be negative"))]
    pub lond: f64,
    /// Only sites with this obfuscated status (omit for no filter)
    pub obf: Option<bool>,
    /// Only sites with this reserved status (omit for no filter)
    pub res: Option<bool>,
    /// Only sites with this private status (omit for no filter)
    pub pri: Option<bool>,
}

impl RegionQueryParams {
    pub fn viewport(&self) -> Result<Viewport, AppError> {
        let values = [
            ("lat", self.lat),
            ("lon", self.lon),
            ("latd", self.latd),
            ("lond", self.lond),
        ];
        if let Some((name, _)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(AppError::Validation(format!(
                "{} must be a finite number",
                name
            )));
        }

        Ok(Viewport {
            latitude: self.lat,
            longitude: self.lon,
            latitude_delta: self.latd,
            longitude_delta: self.lond,
        })
    }

    pub fn status_filters(&self) -> (StatusFilter, StatusFilter, StatusFilter) {
        (self.obf.into(), self.res.into(), self.pri.into())
    }
}

/// Policy values a map client needs to decide when to refetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryPolicyResponseDto {
    pub query_distance_scale: f64,
    pub max_obfuscated_radius: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> RegionQueryParams {
        RegionQueryParams {
            lat: 45.5,
            lon: -122.6,
            latd: 0.1,
            lond: 0.2,
            obf: None,
            res: Some(true),
            pri: Some(false),
        }
    }

    #[test]
    fn test_region_params_validation() {
        assert!(params().validate().is_ok());

        let mut negative = params();
        negative.latd = -0.1;
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_viewport_rejects_non_finite() {
        let mut p = params();
        p.lon = f64::NAN;
        assert!(matches!(p.viewport(), Err(AppError::Validation(_))));

        let mut p = params();
        p.lond = f64::INFINITY;
        assert!(matches!(p.viewport(), Err(AppError::Validation(_))));

        let viewport = params().viewport().unwrap();
        assert_eq!(viewport.latitude, 45.5);
        assert_eq!(viewport.longitude_delta, 0.2);
    }

    #[test]
    fn test_status_filters_from_params() {
        assert_eq!(
            params().status_filters(),
            (
                StatusFilter::Any,
                StatusFilter::Only(true),
                StatusFilter::Only(false)
            )
        );
    }

    #[test]
    fn test_request_defaults_and_camel_case() {
        let dto: ChargeSiteRequestDto = serde_json::from_value(serde_json::json!({
            "latitude": 10.0,
            "longitude": 20.0,
            "reservedStatus": true,
            "rateOfCharge": 7.2
        }))
        .unwrap();

        assert_eq!(dto.id, None);
        assert!(dto.reserved_status);
        assert!(!dto.obfuscated_status);
        assert_eq!(dto.rate_of_charge, 7.2);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_request_rejects_out_of_range_coordinates() {
        let dto: ChargeSiteRequestDto = serde_json::from_value(serde_json::json!({
            "latitude": 91.0,
            "longitude": 20.0
        }))
        .unwrap();
        assert!(dto.validate().is_err());

        let dto: ChargeSiteRequestDto = serde_json::from_value(serde_json::json!({
            "latitude": 0.0,
            "longitude": -180.5
        }))
        .unwrap();
        assert!(dto.validate().is_err());
    }
}
