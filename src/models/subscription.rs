use serde::{Deserialize, Serialize};

use crate::errors::SubscriptionError;
use crate::models::month::{format_month, parse_month, CalendarMonth};

/// Canonical subscription record.
///
/// `end_month` of `None` means the subscription is still active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: String,
    pub service_name: String,
    pub price: i64,
    pub user_id: String,
    pub start_month: CalendarMonth,
    pub end_month: Option<CalendarMonth>,
}

/// Incoming payload for create and update. Dates are `MM-YYYY` text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    pub service_name: String,
    pub price: i64,
    pub user_id: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Outgoing representation of a stored subscription.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionDto {
    pub id: String,
    pub service_name: String,
    pub price: i64,
    pub user_id: String,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl SubscriptionRequest {
    /// Convert the textual payload into a record with the given id.
    ///
    /// Only date syntax is checked here; field invariants belong to the validator.
    pub fn into_subscription(self, id: String) -> Result<Subscription, SubscriptionError> {
        let start_month = parse_month(&self.start_date).map_err(|e| {
            SubscriptionError::format(format!("start_date must be MM-YYYY: {}", e))
        })?;

        let end_month = match self.end_date.as_deref() {
            Some(text) => Some(parse_month(text).map_err(|e| {
                SubscriptionError::format(format!("end_date must be MM-YYYY: {}", e))
            })?),
            None => None,
        };

        Ok(Subscription {
            id,
            service_name: self.service_name,
            price: self.price,
            user_id: self.user_id,
            start_month,
            end_month,
        })
    }
}

impl From<&Subscription> for SubscriptionDto {
    fn from(sub: &Subscription) -> Self {
        Self {
            id: sub.id.clone(),
            service_name: sub.service_name.clone(),
            price: sub.price,
            user_id: sub.user_id.clone(),
            start_date: format_month(sub.start_month),
            end_date: sub.end_month.map(format_month),
        }
    }
}

impl From<Subscription> for SubscriptionDto {
    fn from(sub: Subscription) -> Self {
        SubscriptionDto::from(&sub)
    }
}
