use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use log::{debug, error, warn};
use serde_json::json;
use thiserror::Error;

// Every failure a handler can produce maps to exactly one status code and a
// JSON {"error": msg} body. Server-side messages are returned to the client
// unfiltered.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Authentication error: {0}")]
    AuthError(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not found: {0}")]
    NotFoundError(String),
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::DatabaseError(msg) => {
                error!("\x1B[1;31mDATABASE ERROR:\x1B[0m {}", msg);
                HttpResponse::InternalServerError().json(json!({ "error": msg }))
            }
            ApiError::ValidationError(msg) => {
                warn!("\x1B[1;33mVALIDATION ERROR:\x1B[0m {}", msg);
                HttpResponse::BadRequest().json(json!({ "error": msg }))
            }
            ApiError::AuthError(msg) => {
                warn!("\x1B[1;33mAUTHENTICATION ERROR:\x1B[0m {}", msg);
                HttpResponse::Unauthorized().json(json!({ "error": msg }))
            }
            ApiError::Forbidden(msg) => {
                warn!("\x1B[1;33mAUTHORIZATION ERROR:\x1B[0m {}", msg);
                HttpResponse::Forbidden().json(json!({ "error": msg }))
            }
            ApiError::NotFoundError(msg) => {
                debug!("\x1B[1;36mNOT FOUND ERROR:\x1B[0m {}", msg);
                HttpResponse::NotFound().json(json!({ "error": msg }))
            }
            ApiError::InternalError(msg) => {
                error!("\x1B[1;31mINTERNAL SERVER ERROR:\x1B[0m {}", msg);
                HttpResponse::InternalServerError().json(json!({ "error": msg }))
            }
        }
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::AuthError(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFoundError(_) => StatusCode::NOT_FOUND,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(
            ApiError::ValidationError("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::AuthError("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFoundError("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::DatabaseError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
