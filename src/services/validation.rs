use uuid::Uuid;

use crate::errors::SubscriptionError;
use crate::models::subscription::Subscription;

/// Normalize and check a candidate record before it is persisted.
///
/// Trimmed text is written back before any check runs, so the record is
/// normalized even when validation fails. Every failing check is reported,
/// in check order.
pub fn validate_subscription(sub: &mut Subscription) -> Result<(), SubscriptionError> {
    sub.service_name = sub.service_name.trim().to_string();
    sub.user_id = sub.user_id.trim().to_string();

    let mut reasons = Vec::new();

    if sub.service_name.is_empty() {
        reasons.push("service_name is required".to_string());
    }

    if sub.price <= 0 {
        reasons.push(format!("price must be > 0, got {}", sub.price));
    }

    match Uuid::parse_str(&sub.user_id) {
        Ok(user_id) => sub.user_id = user_id.hyphenated().to_string(),
        Err(_) => reasons.push(format!("user_id must be a UUID, got {:?}", sub.user_id)),
    }

    if let Some(end) = sub.end_month {
        if end < sub.start_month {
            reasons.push(format!(
                "end_date {} cannot be before start_date {}",
                end, sub.start_month
            ));
        }
    }

    if reasons.is_empty() {
        Ok(())
    } else {
        Err(SubscriptionError::Validation(reasons))
    }
}
