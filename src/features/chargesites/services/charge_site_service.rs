use std::sync::Arc;

use crate::core::config::GeoConfig;
use crate::core::error::{AppError, Result};
use crate::features::chargesites::dtos::{
    ChargeSiteRequestDto, ChargeSiteResponseDto, QueryPolicyResponseDto, RegionQueryParams,
};
use crate::features::chargesites::models::{ChargeSite, NewChargeSite, RegionFilter};
use crate::features::chargesites::repositories::ChargeSiteRepository;

/// Service for managing charge sites
pub struct ChargeSiteService {
    repository: Arc<dyn ChargeSiteRepository>,
    geo: GeoConfig,
}

impl ChargeSiteService {
    pub fn new(repository: Arc<dyn ChargeSiteRepository>, geo: GeoConfig) -> Self {
        Self { repository, geo }
    }

    pub fn query_policy(&self) -> QueryPolicyResponseDto {
        QueryPolicyResponseDto {
            query_distance_scale: self.geo.query_distance_scale,
            max_obfuscated_radius: self.geo.max_obfuscated_radius,
        }
    }

    /// Charge sites around a viewport center, fetched `query_distance_scale`
    /// times farther than the viewport's larger half extent
    pub async fn find_in_region(
        &self,
        params: &RegionQueryParams,
    ) -> Result<Vec<ChargeSiteResponseDto>> {
        let viewport = params.viewport()?;
        let (obfuscated, reserved, private) = params.status_filters();
        let filter = RegionFilter::new(
            viewport,
            self.geo.query_distance_scale,
            self.geo.max_obfuscated_radius,
        )
        .with_statuses(obfuscated, reserved, private);

        let sites = self.repository.find_in_region(&filter).await?;

        tracing::debug!(
            "Region query: center=({}, {}), radius={}, matched={}",
            filter.center_latitude,
            filter.center_longitude,
            filter.search_radius,
            sites.len()
        );

        Ok(ChargeSite::responses(&sites))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<ChargeSiteResponseDto> {
        let site = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        Ok(site.response())
    }

    /// Create a charge site; obfuscation is always generated here
    pub async fn create(&self, dto: ChargeSiteRequestDto) -> Result<ChargeSiteResponseDto> {
        let site = NewChargeSite::from_request(dto, self.geo.max_obfuscated_radius);
        let created = self.repository.insert(site).await?;

        tracing::info!("Charge site created: id={}", created.id);

        Ok(created.into())
    }

    /// Replace a charge site. The path id wins over any id in the body and
    /// the obfuscated location is regenerated.
    pub async fn update(
        &self,
        id: i64,
        dto: ChargeSiteRequestDto,
    ) -> Result<ChargeSiteResponseDto> {
        if let Some(body_id) = dto.id.filter(|body_id| *body_id != id) {
            tracing::debug!(
                "Ignoring body id {} in favour of path id {}",
                body_id,
                id
            );
        }

        let site = NewChargeSite::from_request(dto, self.geo.max_obfuscated_radius);
        let updated = self
            .repository
            .update(id, site)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!("Charge site updated: id={}", updated.id);

        Ok(updated.into())
    }

    /// Delete a charge site; unknown ids are NotFound
    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }

        tracing::info!("Charge site deleted: id={}", id);
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Charge site with id {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::chargesites::repositories::InMemoryChargeSiteRepository;
    use crate::shared::constants::MAX_OBFUSCATED_RADIUS;
    use crate::shared::geo::planar_distance;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn service() -> (ChargeSiteService, Arc<InMemoryChargeSiteRepository>) {
        let repo = Arc::new(InMemoryChargeSiteRepository::new());
        let service = ChargeSiteService::new(repo.clone(), GeoConfig::default());
        (service, repo)
    }

    fn dto(lat: f64, lon: f64, obfuscated: bool, reserved: bool, private: bool) -> ChargeSiteRequestDto {
        ChargeSiteRequestDto {
            id: None,
            user_id: None,
            latitude: lat,
            longitude: lon,
            obfuscated_status: obfuscated,
            reserved_status: reserved,
            private_status: private,
            rate_of_charge: 0.0,
        }
    }

    fn query(
        lat: f64,
        lon: f64,
        latd: f64,
        lond: f64,
        obf: Option<bool>,
        res: Option<bool>,
        pri: Option<bool>,
    ) -> RegionQueryParams {
        RegionQueryParams {
            lat,
            lon,
            latd,
            lond,
            obf,
            res,
            pri,
        }
    }

    #[tokio::test]
    async fn test_create_never_exposes_true_location() {
        let (service, repo) = service();
        let created = service
            .create(dto(10.0, 10.0, true, false, false))
            .await
            .unwrap();

        let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(created.latitude, stored.obfuscated_latitude);
        assert_eq!(created.longitude, stored.obfuscated_longitude);
        assert!(
            planar_distance(
                stored.latitude,
                stored.longitude,
                stored.obfuscated_latitude,
                stored.obfuscated_longitude
            ) <= MAX_OBFUSCATED_RADIUS + 1e-12
        );
    }

    #[tokio::test]
    async fn test_update_regenerates_obfuscation_and_uses_path_id() {
        let (service, repo) = service();
        for _ in 0..5 {
            service
                .create(dto(1.0, 1.0, false, false, false))
                .await
                .unwrap();
        }

        let mut body = dto(20.0, 30.0, true, true, true);
        body.id = Some(999);
        let updated = service.update(5, body).await.unwrap();

        assert_eq!(updated.id, 5);
        assert!(repo.find_by_id(999).await.unwrap().is_none());

        let stored = repo.find_by_id(5).await.unwrap().unwrap();
        assert_eq!(stored.latitude, 20.0);
        assert_eq!(stored.longitude, 30.0);
        assert!(
            planar_distance(20.0, 30.0, stored.obfuscated_latitude, stored.obfuscated_longitude)
                <= MAX_OBFUSCATED_RADIUS + 1e-12
        );
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let (service, _) = service();
        let result = service.update(5, dto(0.0, 0.0, false, false, false)).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (service, _) = service();
        let created = service
            .create(dto(0.0, 0.0, false, false, false))
            .await
            .unwrap();

        service.delete(created.id).await.unwrap();

        assert!(matches!(
            service.get_by_id(created.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(created.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_region_query_returns_nearby_site() {
        let (service, _) = service();
        let created = service
            .create(dto(10.0, 10.0, false, false, false))
            .await
            .unwrap();

        let found = service
            .find_in_region(&query(10.0, 10.0, 0.1, 0.1, None, None, None))
            .await
            .unwrap();
        assert_eq!(found, vec![created]);
    }

    #[tokio::test]
    async fn test_region_query_matches_predicate_exactly() {
        let (service, repo) = service();
        let mut rng = StdRng::seed_from_u64(2024);

        for _ in 0..200 {
            service
                .create(dto(
                    rng.random_range(9.0..11.0),
                    rng.random_range(9.0..11.0),
                    rng.random(),
                    rng.random(),
                    rng.random(),
                ))
                .await
                .unwrap();
        }

        let params = query(10.0, 10.0, 0.3, 0.2, Some(true), None, Some(false));
        let found: Vec<i64> = service
            .find_in_region(&params)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();

        let radius = 2.0 * 0.3 + MAX_OBFUSCATED_RADIUS;
        let mut expected = Vec::new();
        for id in 1..=200 {
            let site = repo.find_by_id(id).await.unwrap().unwrap();
            if planar_distance(10.0, 10.0, site.obfuscated_latitude, site.obfuscated_longitude)
                <= radius
                && site.obfuscated_status
                && !site.private_status
            {
                expected.push(id);
            }
        }

        assert!(!expected.is_empty());
        assert_eq!(found, expected);
    }

    #[tokio::test]
    async fn test_region_query_rejects_non_finite_center() {
        let (service, _) = service();
        let result = service
            .find_in_region(&query(f64::NAN, 10.0, 0.1, 0.1, None, None, None))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_query_policy_reflects_config() {
        let repo = Arc::new(InMemoryChargeSiteRepository::new());
        let service = ChargeSiteService::new(repo, GeoConfig::new(3.5).unwrap());
        let policy = service.query_policy();
        assert_eq!(policy.query_distance_scale, 3.5);
        assert_eq!(policy.max_obfuscated_radius, MAX_OBFUSCATED_RADIUS);
    }
}
