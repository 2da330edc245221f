use actix_web::web;
use diesel::pg::PgConnection;
use diesel::r2d2::{self, ConnectionManager};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use log::error;

use crate::errors::ApiError;

// Type aliases
pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

/// Runs a blocking diesel query on the actix blocking pool.
///
/// Checks out a pooled connection, moves the closure onto `web::block` and
/// collapses the three failure layers (pool checkout, blocking-pool cancel,
/// query error) into `ApiError`.
pub async fn run<F, T>(pool: &DbPool, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&mut PgConnection) -> Result<T, DieselError> + Send + 'static,
    T: Send + 'static,
{
    let mut conn = pool.get().map_err(|e| {
        error!("Failed to get database connection: {}", e);
        ApiError::DatabaseError(e.to_string())
    })?;

    web::block(move || f(&mut conn))
        .await
        .map_err(|e| {
            error!("Database operation error: {}", e);
            ApiError::DatabaseError(e.to_string())
        })?
        .map_err(translate_diesel_error)
}

/// Maps diesel failures onto the API error taxonomy: row misses become 404,
/// constraint violations become 400, everything else is a 500.
pub fn translate_diesel_error(e: DieselError) -> ApiError {
    match e {
        DieselError::NotFound => ApiError::NotFoundError("Record not found".to_string()),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            ApiError::ValidationError(info.message().to_string())
        }
        DieselError::DatabaseError(DatabaseErrorKind::NotNullViolation, info) => {
            ApiError::ValidationError(info.message().to_string())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            ApiError::ValidationError(info.message().to_string())
        }
        other => {
            error!("Query failed: {}", other);
            ApiError::DatabaseError(other.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::error::ResponseError;
    use actix_web::http::StatusCode;

    #[test]
    fn missing_rows_map_to_not_found() {
        let err = translate_diesel_error(DieselError::NotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn rollback_maps_to_server_error() {
        let err = translate_diesel_error(DieselError::RollbackTransaction);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
