use serde::{Deserialize, Serialize};

/// `{"data": ...}` envelope used by every record endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TotalPriceResponse {
    pub total_price: i64,
}

/// Raw query string of the price aggregation endpoint.
///
/// Every field is optional at this layer so missing dates are reported
/// as format errors rather than as query-string rejections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceQuery {
    pub user_id: Option<String>,
    pub service_name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
