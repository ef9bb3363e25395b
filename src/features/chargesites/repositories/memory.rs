use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::ChargeSiteRepository;
use crate::core::error::Result;
use crate::features::chargesites::models::{ChargeSite, NewChargeSite, RegionFilter};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, ChargeSite>,
    last_id: i64,
}

/// Process-local repository with the same filtering semantics as the
/// Postgres one. Data is lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryChargeSiteRepository {
    table: RwLock<Table>,
}

impl InMemoryChargeSiteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn materialize(id: i64, site: NewChargeSite, created_at: chrono::DateTime<Utc>) -> ChargeSite {
    ChargeSite {
        id,
        user_id: site.user_id,
        latitude: site.latitude,
        longitude: site.longitude,
        obfuscated_latitude: site.obfuscated_latitude,
        obfuscated_longitude: site.obfuscated_longitude,
        obfuscated_status: site.obfuscated_status,
        reserved_status: site.reserved_status,
        private_status: site.private_status,
        rate_of_charge: site.rate_of_charge,
        created_at,
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl ChargeSiteRepository for InMemoryChargeSiteRepository {
    async fn insert(&self, site: NewChargeSite) -> Result<ChargeSite> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let id = table.last_id;

        let row = materialize(id, site, Utc::now());
        table.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ChargeSite>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_in_region(&self, filter: &RegionFilter) -> Result<Vec<ChargeSite>> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .filter(|site| filter.matches(site))
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, site: NewChargeSite) -> Result<Option<ChargeSite>> {
        let mut table = self.table.write().await;
        let Some(existing) = table.rows.get_mut(&id) else {
            return Ok(None);
        };

        *existing = materialize(id, site, existing.created_at);
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}
