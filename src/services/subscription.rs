use std::sync::Arc;

use uuid::Uuid;

use crate::errors::SubscriptionError;
use crate::models::common::PriceQuery;
use crate::models::month::{parse_month, CalendarMonth};
use crate::models::subscription::{Subscription, SubscriptionRequest};
use crate::services::aggregator::{aggregate, AggregateFilters, QueryWindow};
use crate::services::repository::SubscriptionRepository;
use crate::services::validation::validate_subscription;

/// Orchestrates validation, id assignment, storage and price aggregation.
#[derive(Clone)]
pub struct SubscriptionService {
    repo: Arc<dyn SubscriptionRepository>,
}

impl SubscriptionService {
    pub fn new(repo: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_subscriptions(&self) -> Result<Vec<Subscription>, SubscriptionError> {
        let subscriptions = self.repo.find_all().await.map_err(storage_failure)?;
        log::debug!("Listed {} subscriptions", subscriptions.len());
        Ok(subscriptions)
    }

    pub async fn get_subscription(&self, id: &str) -> Result<Subscription, SubscriptionError> {
        log::debug!("Getting subscription {}", id);
        self.repo
            .find_by_id(id)
            .await
            .map_err(storage_failure)?
            .ok_or_else(|| SubscriptionError::NotFound(id.to_string()))
    }

    pub async fn create_subscription(
        &self,
        request: SubscriptionRequest,
    ) -> Result<Subscription, SubscriptionError> {
        let mut subscription = request.into_subscription(String::new()).map_err(rejected)?;
        validate_subscription(&mut subscription).map_err(rejected)?;

        subscription.id = Uuid::new_v4().to_string();
        self.repo.insert(&subscription).await.map_err(storage_failure)?;

        log::info!(
            "Created subscription {} ({} for user {})",
            subscription.id,
            subscription.service_name,
            subscription.user_id
        );
        Ok(subscription)
    }

    /// Replace every field of an existing subscription; the id is kept.
    pub async fn update_subscription(
        &self,
        id: &str,
        request: SubscriptionRequest,
    ) -> Result<Subscription, SubscriptionError> {
        let existing = self.get_subscription(id).await?;

        let mut subscription = request.into_subscription(existing.id).map_err(rejected)?;
        validate_subscription(&mut subscription).map_err(rejected)?;

        let replaced = self
            .repo
            .replace(id, &subscription)
            .await
            .map_err(storage_failure)?;
        if !replaced {
            // Deleted between lookup and replace
            return Err(SubscriptionError::NotFound(id.to_string()));
        }

        log::info!("Updated subscription {}", id);
        Ok(subscription)
    }

    /// Idempotent: deleting an unknown id succeeds without effect.
    pub async fn delete_subscription(&self, id: &str) -> Result<(), SubscriptionError> {
        let removed = self.repo.delete_by_id(id).await.map_err(storage_failure)?;
        if removed {
            log::info!("Deleted subscription {}", id);
        } else {
            log::debug!("Delete of unknown subscription {} ignored", id);
        }
        Ok(())
    }

    /// Total prorated cost of subscriptions overlapping `[start_date, end_date]`.
    pub async fn total_price(&self, query: &PriceQuery) -> Result<i64, SubscriptionError> {
        let start = parse_date_param("start_date", query.start_date.as_deref())?;
        let end = parse_date_param("end_date", query.end_date.as_deref())?;
        let window = QueryWindow::new(start, end).map_err(rejected)?;
        let filters = AggregateFilters::new(query.user_id.as_deref(), query.service_name.as_deref())
            .map_err(rejected)?;

        let candidates = self
            .repo
            .find_overlapping(&window, &filters)
            .await
            .map_err(storage_failure)?;
        let total = aggregate(&candidates, &window, &filters);

        log::debug!(
            "Total price {} for {}..{} over {} candidates",
            total,
            window.start(),
            window.end(),
            candidates.len()
        );
        Ok(total)
    }
}

fn parse_date_param(
    name: &str,
    value: Option<&str>,
) -> Result<CalendarMonth, SubscriptionError> {
    parse_month(value.unwrap_or_default())
        .map_err(|e| rejected(SubscriptionError::format(format!("{} must be MM-YYYY: {}", name, e))))
}

fn rejected(err: SubscriptionError) -> SubscriptionError {
    log::warn!("Rejected subscription input: {}", err);
    err
}

fn storage_failure(err: anyhow::Error) -> SubscriptionError {
    log::error!("Subscription storage failed: {:#}", err);
    SubscriptionError::storage(err)
}
