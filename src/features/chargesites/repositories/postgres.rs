use async_trait::async_trait;
use sqlx::PgPool;

use super::ChargeSiteRepository;
use crate::core::error::{AppError, Result};
use crate::features::chargesites::models::{ChargeSite, NewChargeSite, RegionFilter};

const CHARGE_SITE_COLUMNS: &str = "id, user_id, latitude, longitude, \
    obfuscated_latitude, obfuscated_longitude, \
    obfuscated_status, reserved_status, private_status, \
    rate_of_charge, created_at, updated_at";

/// Postgres-backed repository
pub struct PgChargeSiteRepository {
    pool: PgPool,
}

impl std::fmt::Debug for PgChargeSiteRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgChargeSiteRepository")
            .field("pool", &"<PgPool>")
            .finish()
    }
}

impl PgChargeSiteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChargeSiteRepository for PgChargeSiteRepository {
    async fn insert(&self, site: NewChargeSite) -> Result<ChargeSite> {
        let query = format!(
            r#"
            INSERT INTO charge_sites (
                user_id, latitude, longitude,
                obfuscated_latitude, obfuscated_longitude,
                obfuscated_status, reserved_status, private_status,
                rate_of_charge
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            CHARGE_SITE_COLUMNS
        );

        sqlx::query_as::<_, ChargeSite>(&query)
            .bind(site.user_id)
            .bind(site.latitude)
            .bind(site.longitude)
            .bind(site.obfuscated_latitude)
            .bind(site.obfuscated_longitude)
            .bind(site.obfuscated_status)
            .bind(site.reserved_status)
            .bind(site.private_status)
            .bind(site.rate_of_charge)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert charge site: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ChargeSite>> {
        let query = format!(
            "SELECT {} FROM charge_sites WHERE id = $1",
            CHARGE_SITE_COLUMNS
        );

        sqlx::query_as::<_, ChargeSite>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_in_region(&self, filter: &RegionFilter) -> Result<Vec<ChargeSite>> {
        // `<->` on two points is plain Euclidean distance on the raw pairs
        let query = format!(
            r#"
            SELECT {}
            FROM charge_sites
            WHERE point(obfuscated_latitude, obfuscated_longitude)
                  <-> point($1::float8, $2::float8) <= $3::float8
              AND ($4::boolean IS NULL OR obfuscated_status = $4)
              AND ($5::boolean IS NULL OR reserved_status = $5)
              AND ($6::boolean IS NULL OR private_status = $6)
            ORDER BY id
            "#,
            CHARGE_SITE_COLUMNS
        );

        sqlx::query_as::<_, ChargeSite>(&query)
            .bind(filter.center_latitude)
            .bind(filter.center_longitude)
            .bind(filter.search_radius)
            .bind(filter.obfuscated_status.as_option())
            .bind(filter.reserved_status.as_option())
            .bind(filter.private_status.as_option())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch charge sites in region: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn update(&self, id: i64, site: NewChargeSite) -> Result<Option<ChargeSite>> {
        let query = format!(
            r#"
            UPDATE charge_sites
            SET user_id = $2,
                latitude = $3,
                longitude = $4,
                obfuscated_latitude = $5,
                obfuscated_longitude = $6,
                obfuscated_status = $7,
                reserved_status = $8,
                private_status = $9,
                rate_of_charge = $10,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CHARGE_SITE_COLUMNS
        );

        sqlx::query_as::<_, ChargeSite>(&query)
            .bind(id)
            .bind(site.user_id)
            .bind(site.latitude)
            .bind(site.longitude)
            .bind(site.obfuscated_latitude)
            .bind(site.obfuscated_longitude)
            .bind(site.obfuscated_status)
            .bind(site.reserved_status)
            .bind(site.private_status)
            .bind(site.rate_of_charge)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update charge site {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM charge_sites WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete charge site {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
