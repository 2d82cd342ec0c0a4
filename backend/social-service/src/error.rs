/// Error types for Social Service
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use doc_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed or missing caller input; surfaced verbatim, never retried.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Referenced post or user is absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// No verified identity on the request; rejected before any read.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// Document-store I/O failure. Transient; the caller may resubmit the
    /// whole operation, all of which are safe to repeat.
    #[error("upstream store failure: {0}")]
    Upstream(StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(path) => AppError::NotFound(path),
            other => AppError::Upstream(other),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::Upstream(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }))
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_maps_to_not_found() {
        let err = AppError::from(StoreError::NotFound("posts/p1".to_string()));
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_other_store_errors_are_upstream() {
        let err = AppError::from(StoreError::BatchTooLarge { size: 501, limit: 500 });
        assert!(matches!(err, AppError::Upstream(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_argument_and_identity_status_codes() {
        assert_eq!(
            AppError::InvalidArgument("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthenticated("no identity".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
    }
}
