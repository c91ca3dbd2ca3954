use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Failures surfaced by the subscription service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// Malformed date or UUID text.
    #[error("{0}")]
    Format(String),

    /// Semantically invalid record; reasons are in check order.
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),

    /// Query window with end before start.
    #[error("{0}")]
    Range(String),

    #[error("subscription {0} not found")]
    NotFound(String),

    /// The storage collaborator failed.
    #[error("storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: &'static str,
}

impl SubscriptionError {
    pub fn format<S: Into<String>>(reason: S) -> Self {
        SubscriptionError::Format(reason.into())
    }

    pub fn storage(err: impl std::fmt::Display) -> Self {
        SubscriptionError::Storage(err.to_string())
    }

    pub fn message(&self) -> &'static str {
        match self {
            SubscriptionError::Format(_) => "Invalid data format",
            SubscriptionError::Validation(_) => "Invalid subscription data",
            SubscriptionError::Range(_) => "Invalid date range",
            SubscriptionError::NotFound(_) => "Subscription not found",
            SubscriptionError::Storage(_) => "Storage failure",
        }
    }
}

impl ResponseError for SubscriptionError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubscriptionError::Format(_)
            | SubscriptionError::Validation(_)
            | SubscriptionError::Range(_) => StatusCode::BAD_REQUEST,
            SubscriptionError::NotFound(_) => StatusCode::NOT_FOUND,
            SubscriptionError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
            message: self.message(),
        })
    }
}
