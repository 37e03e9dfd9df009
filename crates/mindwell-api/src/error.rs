use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mindwell_checkin::error::CheckinError;
use mindwell_core::error::CoreError;
use mindwell_instruments::error::InstrumentError;
use mindwell_storage::error::StorageError;
use serde::Serialize;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    /// Lost a write race or the document already exists; safe to retry.
    Conflict(String),
    /// The store is unreachable; safe to retry.
    Unavailable(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    retryable: bool,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unavailable(msg) => {
                tracing::warn!("store unavailable: {msg}");
                (StatusCode::SERVICE_UNAVAILABLE, "storage temporarily unavailable".to_string())
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };
        let retryable = matches!(status, StatusCode::CONFLICT | StatusCode::SERVICE_UNAVAILABLE);

        (status, Json(ErrorBody { error: message, retryable })).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { key } => ApiError::NotFound(format!("document not found: {key}")),
            // A repeated request reloads before writing, so each of these may clear.
            StorageError::PreconditionFailed { .. }
            | StorageError::AlreadyExists { .. }
            | StorageError::Conflict { .. } => {
                ApiError::Conflict(e.to_string())
            }
            StorageError::GetObject(_) | StorageError::PutObject(_) | StorageError::ListObjects(_) => {
                ApiError::Unavailable(e.to_string())
            }
            StorageError::Core(core) => core.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidAnswer { .. } | CoreError::InvalidUserId(_) => ApiError::BadRequest(e.to_string()),
            CoreError::Serialization(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<CheckinError> for ApiError {
    fn from(e: CheckinError) -> Self {
        match e {
            CheckinError::CatalogMisconfiguration(msg) => {
                ApiError::Internal(format!("question catalog misconfigured: {msg}"))
            }
            CheckinError::InvalidAnswer(core) => core.into(),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<InstrumentError> for ApiError {
    fn from(e: InstrumentError) -> Self {
        match e {
            InstrumentError::UnknownInstrument(id) => ApiError::NotFound(format!("instrument not found: {id}")),
            InstrumentError::CatalogMisconfiguration(_) => ApiError::Internal(e.to_string()),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}
