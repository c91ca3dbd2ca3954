use anyhow::Result;
use async_trait::async_trait;

use crate::models::subscription::Subscription;
use crate::services::aggregator::{AggregateFilters, QueryWindow};

/// Persistence operations the subscription service needs.
///
/// The service computes ids and validates records; implementations only store them.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Subscription>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Subscription>>;

    /// Insert a new record. Fails if the id is already taken.
    async fn insert(&self, sub: &Subscription) -> Result<()>;

    /// Overwrite the record stored under `id`. Returns false if there is none.
    async fn replace(&self, id: &str, sub: &Subscription) -> Result<bool>;

    /// Returns true if a record was removed.
    async fn delete_by_id(&self, id: &str) -> Result<bool>;

    /// Candidates for a price query. May return a superset; the aggregator
    /// re-applies the overlap and filter predicates.
    async fn find_overlapping(
        &self,
        window: &QueryWindow,
        filters: &AggregateFilters,
    ) -> Result<Vec<Subscription>>;
}
