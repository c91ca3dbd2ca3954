use uuid::Uuid;

use crate::errors::SubscriptionError;
use crate::models::month::CalendarMonth;
use crate::models::subscription::Subscription;

/// Inclusive calendar-month window of a price query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    start: CalendarMonth,
    end: CalendarMonth,
}

impl QueryWindow {
    pub fn new(start: CalendarMonth, end: CalendarMonth) -> Result<Self, SubscriptionError> {
        if end < start {
            return Err(SubscriptionError::Range(format!(
                "end_date {} cannot be before start_date {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> CalendarMonth {
        self.start
    }

    pub fn end(&self) -> CalendarMonth {
        self.end
    }
}

/// Optional owner and service filters, AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateFilters {
    user_id: Option<Uuid>,
    service_name: Option<String>,
}

impl AggregateFilters {
    /// Blank values count as unset. A set `user_id` must be a UUID.
    pub fn new(user_id: Option<&str>, service_name: Option<&str>) -> Result<Self, SubscriptionError> {
        let user_id = match user_id.map(str::trim).filter(|s| !s.is_empty()) {
            Some(text) => Some(Uuid::parse_str(text).map_err(|_| {
                SubscriptionError::format(format!("user_id must be a UUID, got {:?}", text))
            })?),
            None => None,
        };

        let service_name = service_name
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self {
            user_id,
            service_name,
        })
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    pub fn service_name(&self) -> Option<&str> {
        self.service_name.as_deref()
    }

    pub fn matches(&self, sub: &Subscription) -> bool {
        if let Some(user_id) = self.user_id {
            if Uuid::parse_str(sub.user_id.trim()).ok() != Some(user_id) {
                return false;
            }
        }
        if let Some(name) = &self.service_name {
            if sub.service_name != *name {
                return false;
            }
        }
        true
    }
}

/// Whether the record's active range intersects the window.
pub fn overlaps(sub: &Subscription, window: &QueryWindow) -> bool {
    sub.start_month <= window.end && sub.end_month.map_or(true, |end| end >= window.start)
}

/// Last billed month within the query: the record's own end, capped at the window end.
pub fn effective_end(sub: &Subscription, window: &QueryWindow) -> CalendarMonth {
    match sub.end_month {
        Some(end) if end <= window.end => end,
        _ => window.end,
    }
}

/// Inclusive number of calendar months from `a` to `b`.
pub fn months_between(a: CalendarMonth, b: CalendarMonth) -> i64 {
    (b.year() as i64 - a.year() as i64) * 12 + (b.month() as i64 - a.month() as i64) + 1
}

/// Cost of one overlapping record. Billing starts at the record's own start
/// month even when that precedes the window.
pub fn record_cost(sub: &Subscription, window: &QueryWindow) -> i64 {
    let months = months_between(sub.start_month, effective_end(sub, window));
    sub.price.saturating_mul(months)
}

/// Total cost of all filtered records overlapping the window.
pub fn aggregate(records: &[Subscription], window: &QueryWindow, filters: &AggregateFilters) -> i64 {
    records
        .iter()
        .filter(|sub| filters.matches(sub))
        .filter(|sub| overlaps(sub, window))
        .map(|sub| record_cost(sub, window))
        .fold(0i64, |total, cost| total.saturating_add(cost))
}
