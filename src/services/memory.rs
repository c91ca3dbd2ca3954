use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::subscription::Subscription;
use crate::services::aggregator::{overlaps, AggregateFilters, QueryWindow};
use crate::services::repository::SubscriptionRepository;

/// Process-local store for tests, insertion ordered.
#[derive(Default)]
pub struct InMemorySubscriptionRepository {
    subscriptions: RwLock<Vec<Subscription>>,
}

impl InMemorySubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subscriptions(subscriptions: Vec<Subscription>) -> Self {
        Self {
            subscriptions: RwLock::new(subscriptions),
        }
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn find_all(&self) -> Result<Vec<Subscription>> {
        Ok(self.subscriptions.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Subscription>> {
        let subscriptions = self.subscriptions.read().await;
        Ok(subscriptions.iter().find(|s| s.id == id).cloned())
    }

    async fn insert(&self, sub: &Subscription) -> Result<()> {
        let mut subscriptions = self.subscriptions.write().await;
        if subscriptions.iter().any(|s| s.id == sub.id) {
            return Err(anyhow!("Subscription {} already exists", sub.id));
        }
        subscriptions.push(sub.clone());
        Ok(())
    }

    async fn replace(&self, id: &str, sub: &Subscription) -> Result<bool> {
        let mut subscriptions = self.subscriptions.write().await;
        match subscriptions.iter_mut().find(|s| s.id == id) {
            Some(existing) => {
                *existing = Subscription {
                    id: id.to_string(),
                    ..sub.clone()
                };
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool> {
        let mut subscriptions = self.subscriptions.write().await;
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != id);
        Ok(subscriptions.len() != before)
    }

    async fn find_overlapping(
        &self,
        window: &QueryWindow,
        filters: &AggregateFilters,
    ) -> Result<Vec<Subscription>> {
        let subscriptions = self.subscriptions.read().await;
        Ok(subscriptions
            .iter()
            .filter(|s| filters.matches(s) && overlaps(s, window))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::month::CalendarMonth;

    fn month(year: i32, month: u32) -> CalendarMonth {
        CalendarMonth::new(year, month).unwrap()
    }

    fn sample(id: &str, start: CalendarMonth, end: Option<CalendarMonth>) -> Subscription {
        Subscription {
            id: id.to_string(),
            service_name: "Netflix".to_string(),
            price: 100,
            user_id: "60601fee-2bf1-4721-ae6f-7636e79a0cba".to_string(),
            start_month: start,
            end_month: end,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemorySubscriptionRepository::new();
        let sub = sample("a", month(2024, 1), None);
        repo.insert(&sub).await.unwrap();

        assert_eq!(repo.find_by_id("a").await.unwrap(), Some(sub.clone()));
        assert_eq!(repo.find_by_id("b").await.unwrap(), None);
        assert_eq!(repo.find_all().await.unwrap(), vec![sub]);
    }

    #[tokio::test]
    async fn test_duplicate_insert_fails() {
        let repo = InMemorySubscriptionRepository::new();
        let sub = sample("a", month(2024, 1), None);
        repo.insert(&sub).await.unwrap();
        assert!(repo.insert(&sub).await.is_err());
    }

    #[tokio::test]
    async fn test_replace_keeps_id() {
        let repo = InMemorySubscriptionRepository::with_subscriptions(vec![sample("a", month(2024, 1), None)]);
        let mut replacement = sample("ignored", month(2024, 5), Some(month(2024, 6)));
        replacement.price = 300;

        assert!(repo.replace("a", &replacement).await.unwrap());
        let stored = repo.find_by_id("a").await.unwrap().unwrap();
        assert_eq!(stored.id, "a");
        assert_eq!(stored.price, 300);
        assert_eq!(stored.end_month, Some(month(2024, 6)));

        assert!(!repo.replace("missing", &replacement).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_reports_removal() {
        let repo = InMemorySubscriptionRepository::with_subscriptions(vec![sample("a", month(2024, 1), None)]);
        assert!(repo.delete_by_id("a").await.unwrap());
        assert!(!repo.delete_by_id("a").await.unwrap());
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_overlapping_applies_predicates() {
        let repo = InMemorySubscriptionRepository::with_subscriptions(vec![
            sample("early", month(2023, 1), Some(month(2023, 12))),
            sample("open", month(2023, 6), None),
            sample("late", month(2025, 1), None),
        ]);
        let window = QueryWindow::new(month(2024, 1), month(2024, 12)).unwrap();
        let found = repo
            .find_overlapping(&window, &AggregateFilters::default())
            .await
            .unwrap();
        let ids: Vec<&str> = found.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["open"]);
    }
}
