use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

pub const NAME_REQUIRED: &str = "name is required";
pub const EMAIL_REQUIRED: &str = "email is required";
pub const EMAIL_REGISTERED: &str = "email already registered";
pub const EMAIL_IN_USE: &str = "email already in use";
pub const INVALID_USER_ID: &str = "invalid user id";
pub const USER_NOT_FOUND: &str = "user not found";
pub const CREATE_FAILED: &str = "failed to create user";
pub const FETCH_FAILED: &str = "failed to fetch users";
pub const UPDATE_FAILED: &str = "failed to update user";

/// Failure reported by a [`UserRepository`](crate::repository::UserRepository).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// A unique constraint rejected the write.
    #[error("unique constraint violated: {0}")]
    Duplicate(String),

    #[error("storage failure: {0}")]
    Backend(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<DbErr> for StorageError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => StorageError::Duplicate(detail),
            _ => StorageError::Backend(err.to_string()),
        }
    }
}

/// Domain error. Each variant carries the exact message returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("{0}")]
    Conflict(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Internal(&'static str),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    pub fn message(&self) -> &'static str {
        match self {
            UserError::Validation(msg)
            | UserError::Conflict(msg)
            | UserError::NotFound(msg)
            | UserError::Internal(msg) => msg,
        }
    }
}

/// Conflicts are answered with 400, not 409; existing clients depend on it.
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(msg) | UserError::Conflict(msg) => {
                AppError::BadRequest(msg.to_string())
            }
            UserError::NotFound(msg) => AppError::NotFound(msg.to_string()),
            UserError::Internal(msg) => AppError::InternalServerError(msg.to_string()),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
