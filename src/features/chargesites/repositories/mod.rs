//! Storage access for charge sites.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::chargesites::models::{ChargeSite, NewChargeSite, RegionFilter};

pub use memory::InMemoryChargeSiteRepository;
pub use postgres::PgChargeSiteRepository;

/// Every method is a single atomic store call. Concurrent updates to the same
/// row are last-writer-wins.
#[async_trait]
pub trait ChargeSiteRepository: Send + Sync {
    /// Insert a new charge site and return it with its assigned id
    async fn insert(&self, site: NewChargeSite) -> Result<ChargeSite>;

    /// Find a charge site by id
    async fn find_by_id(&self, id: i64) -> Result<Option<ChargeSite>>;

    /// All charge sites matching the region filter, ordered by id
    async fn find_in_region(&self, filter: &RegionFilter) -> Result<Vec<ChargeSite>>;

    /// Replace the stored fields of an existing charge site.
    /// Returns `None` when no row has this id.
    async fn update(&self, id: i64, site: NewChargeSite) -> Result<Option<ChargeSite>>;

    /// Delete by id. Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool>;
}
