use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use trailhead_core::error::CoreError;
use trailhead_media::MediaError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the uniform
/// `{ "success": false, "message": ... }` error envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `trailhead_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A media validation or storage error.
    #[error(transparent)]
    Media(#[from] MediaError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A malformed multipart request body.
    #[error("Multipart error: {0}")]
    Multipart(String),

    /// A missing resource or empty collection with a caller-facing message.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Message returned for every 500-class response. Internals are logged,
/// never sent to the client.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Message accompanying a 422 response with a per-field error map.
pub const INVALID_DATA_MESSAGE: &str = "The given data was invalid.";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Field-level validation failures carry an extra `errors` map.
        if let AppError::Core(CoreError::Fields(errors)) = &self {
            let body = json!({
                "success": false,
                "message": INVALID_DATA_MESSAGE,
                "errors": errors,
            });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response();
        }

        let (status, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, .. } => {
                    (StatusCode::NOT_FOUND, format!("{entity} not found"))
                }
                CoreError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
                CoreError::Fields(_) => unreachable!("handled above"),
                CoreError::RateLimited(msg) => (StatusCode::TOO_MANY_REQUESTS, msg.clone()),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.into())
                }
            },

            AppError::Media(err) => classify_media_error(err),

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::Multipart(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),

            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.into())
            }
        };

        let body = json!({
            "success": false,
            "message": message,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a media error into an HTTP status and client message.
///
/// Content rejections (wrong format, too large, not an image) are validation
/// failures; storage-level failures are internal and sanitized.
fn classify_media_error(err: &MediaError) -> (StatusCode, String) {
    match err {
        MediaError::UnsupportedFormat { .. } | MediaError::TooLarge { .. } | MediaError::NotAnImage => {
            (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
        }
        MediaError::Io { path, source } => {
            tracing::error!(path = %path.display(), error = %source, "Media storage error");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.into())
        }
        MediaError::InvalidPath(path) => {
            tracing::error!(path = %path, "Invalid media path");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.into())
        }
    }
}

/// Classify a sqlx error into an HTTP status and client message.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations (Postgres 23505) map to 409, phrased like the field
///   validation messages (`tours_slug_key` -> "The slug has already been taken.").
/// - Foreign key violations (23503) map to 422 (`reviews_trek_id_fkey` ->
///   "The selected trek_id is invalid.").
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String) {
    match err {
        sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            let message = match db_err.constraint().and_then(unique_constraint_field) {
                Some(field) => format!("The {field} has already been taken."),
                None => "A record with this value already exists.".to_string(),
            };
            (StatusCode::CONFLICT, message)
        }
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23503") => {
            let message = match db_err.constraint().and_then(foreign_key_field) {
                Some(field) => format!("The selected {field} is invalid."),
                None => "A referenced record does not exist.".to_string(),
            };
            (StatusCode::UNPROCESSABLE_ENTITY, message)
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.into())
        }
    }
}

/// Extract the column name from a default-named Postgres unique constraint
/// (`{table}_{column}_key`).
fn unique_constraint_field(constraint: &str) -> Option<String> {
    let stem = constraint.strip_suffix("_key")?;
    let (_table, field) = stem.split_once('_')?;
    Some(field.to_string())
}

/// Extract the column name from a default-named Postgres foreign key
/// constraint (`{table}_{column}_fkey`).
fn foreign_key_field(constraint: &str) -> Option<String> {
    let stem = constraint.strip_suffix("_fkey")?;
    let (_table, field) = stem.split_once('_')?;
    Some(field.to_string())
}
