use chrono::{DateTime, Utc};
use rand::Rng;
use sqlx::FromRow;
use std::f64::consts::TAU;

use crate::features::chargesites::dtos::{ChargeSiteRequestDto, ChargeSiteResponseDto};
use crate::shared::geo::{wrap_coordinate, wrapped_planar_distance};

/// Database model for a charge site
///
/// `latitude`/`longitude` are the precise location and never leave the
/// service; clients only ever see the obfuscated pair.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ChargeSite {
    pub id: i64,
    pub user_id: Option<i64>,
    pub latitude: f64,
    pub longitude: f64,
    pub obfuscated_latitude: f64,
    pub obfuscated_longitude: f64,
    pub obfuscated_status: bool,
    pub reserved_status: bool,
    pub private_status: bool,
    pub rate_of_charge: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChargeSite {
    /// Public projection: obfuscated location, flags and identifiers only
    pub fn response(&self) -> ChargeSiteResponseDto {
        ChargeSiteResponseDto {
            id: self.id,
            user_id: self.user_id,
            latitude: self.obfuscated_latitude,
            longitude: self.obfuscated_longitude,
            obfuscated_status: self.obfuscated_status,
            reserved_status: self.reserved_status,
            private_status: self.private_status,
            rate_of_charge: self.rate_of_charge,
        }
    }

    pub fn responses(sites: &[ChargeSite]) -> Vec<ChargeSiteResponseDto> {
        sites.iter().map(ChargeSite::response).collect()
    }
}

impl From<ChargeSite> for ChargeSiteResponseDto {
    fn from(site: ChargeSite) -> Self {
        site.response()
    }
}

/// A charge site ready to be written: everything except the store-assigned
/// identifier and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewChargeSite {
    pub user_id: Option<i64>,
    pub latitude: f64,
    pub longitude: f64,
    pub obfuscated_latitude: f64,
    pub obfuscated_longitude: f64,
    pub obfuscated_status: bool,
    pub reserved_status: bool,
    pub private_status: bool,
    pub rate_of_charge: f64,
}

impl NewChargeSite {
    /// Build from a client payload and generate a fresh obfuscated location.
    /// Any identifier in the payload is dropped here.
    pub fn from_request(dto: ChargeSiteRequestDto, max_radius: f64) -> Self {
        let mut site = Self {
            user_id: dto.user_id,
            latitude: dto.latitude,
            longitude: dto.longitude,
            obfuscated_latitude: dto.latitude,
            obfuscated_longitude: dto.longitude,
            obfuscated_status: dto.obfuscated_status,
            reserved_status: dto.reserved_status,
            private_status: dto.private_status,
            rate_of_charge: dto.rate_of_charge,
        };
        site.generate_obfuscation(max_radius);
        site
    }

    pub fn generate_obfuscation(&mut self, max_radius: f64) {
        self.generate_obfuscation_with(max_radius, &mut rand::rng());
    }

    /// Overwrite the obfuscated location with a point drawn uniformly from the
    /// disk of `max_radius` degrees around the true location, wrapped back
    /// onto the globe when it crosses a pole or the antimeridian.
    pub fn generate_obfuscation_with<R: Rng + ?Sized>(&mut self, max_radius: f64, rng: &mut R) {
        // sqrt keeps the density uniform over the disk area
        let distance = max_radius * rng.random::<f64>().sqrt();
        let bearing = TAU * rng.random::<f64>();

        let (latitude, longitude) = wrap_coordinate(
            self.latitude + distance * bearing.sin(),
            self.longitude + distance * bearing.cos(),
        );

        debug_assert!(
            wrapped_planar_distance(self.latitude, self.longitude, latitude, longitude)
                <= max_radius + 1e-9
        );

        self.obfuscated_latitude = latitude;
        self.obfuscated_longitude = longitude;
    }
}
