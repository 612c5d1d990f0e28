use axum::{
    extract::rejection::{FormRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::constants::*;
use crate::security::PasswordError;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error(transparent)]
    Form(#[from] FormRejection),

    #[error(transparent)]
    Query(#[from] QueryRejection),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Invalid {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    #[error("Weak password: {0}")]
    WeakPassword(#[from] PasswordError),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("Task belongs to another user")]
    NotTaskOwner,

    #[error("Task not found")]
    TaskNotFound,

    #[error("Task not found or not owned by caller")]
    DeleteForbidden,

    #[error("No task was created")]
    TaskNotCreated,
}

impl AppError {
    /// Shorthand for a 400 tied to a form field
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        AppError::InvalidInput {
            field,
            message: message.into(),
        }
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(err: argon2::password_hash::Error) -> Self {
        AppError::PasswordHash(err.to_string())
    }
}

impl From<argon2::Error> for AppError {
    fn from(err: argon2::Error) -> Self {
        AppError::PasswordHash(err.to_string())
    }
}

/// Implement IntoResponse to convert AppError into `{"field", "message"}` responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, field, message) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                internal("Internal server error")
            }
            AppError::Migration(ref e) => {
                tracing::error!("Migration error: {:?}", e);
                internal("Internal server error")
            }
            AppError::TaskJoin(ref e) => {
                tracing::error!("Task join error: {:?}", e);
                internal("Internal server error")
            }
            AppError::Template(ref e) => {
                tracing::error!("Template error: {:?}", e);
                internal("Internal server error")
            }
            AppError::PasswordHash(ref e) => {
                tracing::error!("Password hashing error: {}", e);
                internal("Could not hash password")
            }
            AppError::Form(ref rejection) => {
                tracing::debug!("Rejected form body: {}", rejection.body_text());
                (rejection.status(), "", rejection.body_text())
            }
            AppError::Query(ref rejection) => {
                tracing::debug!("Rejected query string: {}", rejection.body_text());
                (rejection.status(), "", rejection.body_text())
            }
            AppError::InvalidInput { field, message } => (StatusCode::BAD_REQUEST, field, message),
            AppError::WeakPassword(ref e) => (StatusCode::BAD_REQUEST, "password", e.to_string()),
            AppError::PasswordMismatch => (
                StatusCode::BAD_REQUEST,
                "confirmPassword",
                ERR_PASSWORD_MISMATCH.to_string(),
            ),
            AppError::UsernameTaken => (
                StatusCode::CONFLICT,
                "username",
                ERR_USERNAME_TAKEN.to_string(),
            ),
            AppError::UserNotFound => (
                StatusCode::UNAUTHORIZED,
                "username",
                ERR_USER_NOT_FOUND.to_string(),
            ),
            AppError::IncorrectPassword => (
                StatusCode::UNAUTHORIZED,
                "password",
                ERR_INCORRECT_PASSWORD.to_string(),
            ),
            AppError::NotTaskOwner => (StatusCode::UNAUTHORIZED, "", "Unauthorized".to_string()),
            AppError::TaskNotFound => (StatusCode::NOT_FOUND, "", "Task not found".to_string()),
            AppError::DeleteForbidden => (
                StatusCode::FORBIDDEN,
                "",
                ERR_DELETE_FORBIDDEN.to_string(),
            ),
            AppError::TaskNotCreated => internal("No task was created"),
        };

        let body = Json(json!({
            "field": field,
            "message": message,
        }));

        (status, body).into_response()
    }
}

fn internal(message: &str) -> (StatusCode, &'static str, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, "", message.to_string())
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;
