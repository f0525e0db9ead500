use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use leadbook_core::CoreError;
use leadbook_store::error::{StoreError, StoreErrorKind};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    /// Details are logged where the failure is converted, never returned.
    #[error("internal server error")]
    Internal,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub fn invalid_input(message: impl Into<String>) -> ApiError {
    ApiError::InvalidInput(message.into())
}

pub fn not_found(message: impl Into<String>) -> ApiError {
    ApiError::NotFound(message.into())
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err.kind() {
            StoreErrorKind::NotFound => ApiError::NotFound(err.to_string()),
            StoreErrorKind::Core
            | StoreErrorKind::InvalidId
            | StoreErrorKind::DuplicateEmail
            | StoreErrorKind::AgentNotFound
            | StoreErrorKind::TagNotFound
            | StoreErrorKind::AgentInUse => ApiError::InvalidInput(err.to_string()),
            StoreErrorKind::Io
            | StoreErrorKind::Sql
            | StoreErrorKind::MissingHomeDir
            | StoreErrorKind::Migration
            | StoreErrorKind::InvalidDataPath
            | StoreErrorKind::InvalidData => {
                error!(error = %err, "store failure");
                ApiError::Internal
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use leadbook_core::{AgentId, CoreError};
    use leadbook_store::error::StoreError;

    #[test]
    fn store_errors_map_to_statuses() {
        let missing: ApiError = StoreError::NotFound("lead x".to_string()).into();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let agent: ApiError = StoreError::AgentNotFound(AgentId::new()).into();
        assert_eq!(agent.status(), StatusCode::BAD_REQUEST);

        let duplicate: ApiError = StoreError::DuplicateEmail("a@b.com".to_string()).into();
        assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);

        let corrupt: ApiError = StoreError::InvalidData("status 'Won'".to_string()).into();
        assert_eq!(corrupt.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(corrupt.to_string(), "internal server error");
    }

    #[test]
    fn validation_errors_keep_field_message() {
        let err: ApiError = CoreError::MissingField("name").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "name is required");
    }
}
