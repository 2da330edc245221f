use actix_web::http::header;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use std::ops::Deref;

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::errors::ApiError;
use crate::models::{AccountStatus, UserAccount};
use crate::services::{AuthService, UserService};

/// The authentication gate, as a request extractor.
///
/// Resolves the bearer token to a live user record on every request: verify
/// the token, re-read the account row, reject suspended or vanished accounts.
/// The live re-read means suspending a user kills their already-issued tokens
/// on the very next request, with no revocation list.
pub struct AuthUser(pub UserAccount);

impl Deref for AuthUser {
    type Target = UserAccount;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let pool = req
                .app_data::<web::Data<DbPool>>()
                .ok_or_else(|| {
                    ApiError::InternalError("Database pool not configured".to_string())
                })?
                .clone();
            let config = req
                .app_data::<web::Data<AppConfig>>()
                .ok_or_else(|| ApiError::InternalError("App config not configured".to_string()))?
                .clone();

            let token = bearer_token(&req)?.to_string();
            let claims = AuthService::decode_token(&token, &config)?;

            // 404 if the account no longer exists, 403 if it is suspended
            let user = UserService::get_user_by_id(claims.user_id, &pool).await?;
            if user.status() != AccountStatus::Active {
                return Err(ApiError::Forbidden(
                    "User account is suspended".to_string(),
                ));
            }

            Ok(AuthUser(user))
        })
    }
}

/// Pulls the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(req: &HttpRequest) -> Result<&str, ApiError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::AuthError("No token provided".to_string()))?;

    let value = header_value
        .to_str()
        .map_err(|_| ApiError::AuthError("Invalid authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::AuthError("Invalid token format".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn extracts_token_from_bearer_header() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(bearer_token(&req).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn missing_header_is_unauthenticated() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(bearer_token(&req), Err(ApiError::AuthError(_))));
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert!(matches!(bearer_token(&req), Err(ApiError::AuthError(_))));
    }
}
