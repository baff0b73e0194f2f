//! Error codes attached to error log lines.
//!
//! Clients only ever see the `{"error": "..."}` body; the numeric code and the
//! identifier exist for log search and dashboards.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! assert_eq!(ErrorCode::InvalidId.as_str(), "INVALID_ID");
//! assert_eq!(ErrorCode::InvalidId.code(), 1002);
//! assert_eq!(ErrorCode::InvalidId.default_message(), "invalid user id");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000s)
    /// Body was not valid JSON or failed field validation
    InvalidRequest,

    /// Path id is not an unsigned 32-bit integer
    InvalidId,

    /// Request rejected by a business rule
    BadRequest,

    NotFound,

    MethodNotAllowed,

    // Server errors (1100s)
    InternalError,

    ServiceUnavailable,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::InvalidId => "INVALID_ID",
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidRequest => 1001,
            Self::InvalidId => 1002,
            Self::BadRequest => 1003,
            Self::NotFound => 1004,
            Self::MethodNotAllowed => 1005,
            Self::InternalError => 1101,
            Self::ServiceUnavailable => 1102,
        }
    }

    /// Message used when the caller does not supply one.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid request",
            Self::InvalidId => "invalid user id",
            Self::BadRequest => "bad request",
            Self::NotFound => "The requested resource was not found",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::InternalError => "An unexpected error occurred",
            Self::ServiceUnavailable => "Service temporarily unavailable",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
