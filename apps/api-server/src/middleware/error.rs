//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use scribe_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to RFC 7807 responses.
///
/// There is deliberately no Forbidden variant: failed ownership checks
/// surface as NotFound so protected resources are never confirmed to exist.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized,
    Conflict(String),
    Internal(String),
    Validation(Vec<String>),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail.clone()),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail.clone()),
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            AppError::Conflict(detail) => {
                ErrorResponse::new(409, "Conflict").with_detail(detail.clone())
            }
            AppError::Internal(detail) => {
                // Log internal errors, keep the detail out of the response
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
            AppError::Validation(errors) => {
                ErrorResponse::new(422, "Validation Failed").with_detail(errors.join(", "))
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<scribe_core::error::DomainError> for AppError {
    fn from(err: scribe_core::error::DomainError) -> Self {
        match err {
            // The record id stays out of the response: a denied lookup must
            // read exactly like a missing one.
            scribe_core::error::DomainError::NotFound { entity_type, id: _ } => {
                AppError::NotFound(format!("{} not found", entity_type))
            }
            scribe_core::error::DomainError::Validation(msg) => AppError::BadRequest(msg),
            scribe_core::error::DomainError::Duplicate(msg) => AppError::Conflict(msg),
            scribe_core::error::DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<scribe_core::error::RepoError> for AppError {
    fn from(err: scribe_core::error::RepoError) -> Self {
        match err {
            scribe_core::error::RepoError::NotFound => {
                AppError::NotFound("Resource not found".to_string())
            }
            scribe_core::error::RepoError::Constraint(msg) => AppError::Conflict(msg),
            scribe_core::error::RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            scribe_core::error::RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_core::error::DomainError;
    use uuid::Uuid;

    #[test]
    fn test_domain_not_found_detail_omits_record_id() {
        let id = Uuid::new_v4();
        let err: AppError = DomainError::NotFound {
            entity_type: "post",
            id,
        }
        .into();

        match err {
            AppError::NotFound(detail) => {
                assert_eq!(detail, "post not found");
                assert!(!detail.contains(&id.to_string()));
            }
            other => panic!("expected NotFound, got {}", other),
        }
    }
}
