use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;

use crate::config::DatabaseConfig;
use crate::models::month::CalendarMonth;
use crate::models::subscription::Subscription;
use crate::services::aggregator::{AggregateFilters, QueryWindow};
use crate::services::repository::SubscriptionRepository;

const SELECT_FIELDS: &str =
    "meta::id(id) AS subscription_id, service_name, price, user_id, start_month, end_month";

/// Stored shape of a subscription; months are kept as ordinals.
#[derive(Debug, Deserialize)]
struct SubscriptionRow {
    #[serde(rename = "subscription_id")]
    id: String,
    service_name: String,
    price: i64,
    user_id: String,
    start_month: i64,
    #[serde(default)]
    end_month: Option<i64>,
}

#[derive(Debug, Serialize)]
struct SubscriptionContent {
    service_name: String,
    price: i64,
    user_id: String,
    start_month: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_month: Option<i64>,
}

impl From<&Subscription> for SubscriptionContent {
    fn from(sub: &Subscription) -> Self {
        Self {
            service_name: sub.service_name.clone(),
            price: sub.price,
            user_id: sub.user_id.clone(),
            start_month: sub.start_month.ordinal() as i64,
            end_month: sub.end_month.map(|m| m.ordinal() as i64),
        }
    }
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = anyhow::Error;

    fn try_from(row: SubscriptionRow) -> Result<Self> {
        let month = |ordinal: i64| -> Result<CalendarMonth> {
            let ordinal = i32::try_from(ordinal)
                .map_err(|_| anyhow!("Stored month ordinal {} out of range", ordinal))?;
            Ok(CalendarMonth::from_ordinal(ordinal))
        };

        Ok(Subscription {
            start_month: month(row.start_month)?,
            end_month: row.end_month.map(month).transpose()?,
            id: row.id,
            service_name: row.service_name,
            price: row.price,
            user_id: row.user_id,
        })
    }
}

/// SurrealDB-backed subscription store.
#[derive(Clone)]
pub struct SurrealSubscriptionRepository {
    db: Surreal<Any>,
}

impl SurrealSubscriptionRepository {
    /// Connect, authenticate, select namespace/database and define the schema.
    ///
    /// `mem://` gives an embedded in-memory store; `http://` and `ws://` reach a server.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db = any::connect(config.url.as_str()).await?;

        if let Some(credentials) = &config.credentials {
            db.signin(Root {
                username: &credentials.username,
                password: &credentials.password,
            })
            .await?;
        }

        db.use_ns(config.namespace.as_str())
            .use_db(config.database.as_str())
            .await?;

        let repo = Self { db };
        repo.initialize_schema().await?;

        log::info!(
            "Connected to SurrealDB at {} (ns={}, db={})",
            config.url,
            config.namespace,
            config.database
        );
        Ok(repo)
    }

    async fn initialize_schema(&self) -> Result<()> {
        self.db
            .query(
                "
            DEFINE TABLE subscriptions SCHEMAFULL;
            DEFINE FIELD service_name ON subscriptions TYPE string;
            DEFINE FIELD price ON subscriptions TYPE int ASSERT $value > 0;
            DEFINE FIELD user_id ON subscriptions TYPE string;
            DEFINE FIELD start_month ON subscriptions TYPE int;
            DEFINE FIELD end_month ON subscriptions TYPE option<int>;
            DEFINE INDEX subscriptions_user_id ON subscriptions COLUMNS user_id;
        ",
            )
            .await?
            .check()?;

        log::info!("Database schema initialized successfully");
        Ok(())
    }

    fn into_subscriptions(rows: Vec<SubscriptionRow>) -> Result<Vec<Subscription>> {
        rows.into_iter().map(Subscription::try_from).collect()
    }
}

#[async_trait]
impl SubscriptionRepository for SurrealSubscriptionRepository {
    async fn find_all(&self) -> Result<Vec<Subscription>> {
        let rows: Vec<SubscriptionRow> = self
            .db
            .query(format!(
                "SELECT {} FROM subscriptions ORDER BY start_month, service_name",
                SELECT_FIELDS
            ))
            .await?
            .take(0)?;
        Self::into_subscriptions(rows)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Subscription>> {
        let rows: Vec<SubscriptionRow> = self
            .db
            .query(format!(
                "SELECT {} FROM type::thing('subscriptions', $id)",
                SELECT_FIELDS
            ))
            .bind(("id", id.to_string()))
            .await?
            .take(0)?;
        Ok(Self::into_subscriptions(rows)?.into_iter().next())
    }

    async fn insert(&self, sub: &Subscription) -> Result<()> {
        self.db
            .query("CREATE type::thing('subscriptions', $id) CONTENT $content RETURN NONE")
            .bind(("id", sub.id.clone()))
            .bind(("content", SubscriptionContent::from(sub)))
            .await?
            .check()?;
        Ok(())
    }

    async fn replace(&self, id: &str, sub: &Subscription) -> Result<bool> {
        // UPDATE on a missing record id would create it
        if self.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        self.db
            .query("UPDATE type::thing('subscriptions', $id) CONTENT $content RETURN NONE")
            .bind(("id", id.to_string()))
            .bind(("content", SubscriptionContent::from(sub)))
            .await?
            .check()?;
        Ok(true)
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool> {
        if self.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        self.db
            .query("DELETE type::thing('subscriptions', $id)")
            .bind(("id", id.to_string()))
            .await?
            .check()?;
        Ok(true)
    }

    async fn find_overlapping(
        &self,
        window: &QueryWindow,
        filters: &AggregateFilters,
    ) -> Result<Vec<Subscription>> {
        let mut sql = format!(
            "SELECT {} FROM subscriptions \
             WHERE start_month <= $window_end AND (end_month = NONE OR end_month >= $window_start)",
            SELECT_FIELDS
        );
        if filters.user_id().is_some() {
            sql.push_str(" AND user_id = $user_id");
        }
        if filters.service_name().is_some() {
            sql.push_str(" AND service_name = $service_name");
        }

        let mut query = self
            .db
            .query(sql)
            .bind(("window_start", window.start().ordinal() as i64))
            .bind(("window_end", window.end().ordinal() as i64));
        if let Some(user_id) = filters.user_id() {
            query = query.bind(("user_id", user_id.hyphenated().to_string()));
        }
        if let Some(service_name) = filters.service_name() {
            query = query.bind(("service_name", service_name.to_string()));
        }

        let rows: Vec<SubscriptionRow> = query.await?.take(0)?;
        Self::into_subscriptions(rows)
    }
}
