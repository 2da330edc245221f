use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use diesel::prelude::*;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use log::{debug, error, info};

use crate::config::AppConfig;
use crate::db::{self, DbPool};
use crate::errors::ApiError;
use crate::models::{AccountStatus, Claims, NewUserAccount, RegisterRequest, Role, UserAccount};

pub struct AuthService;

impl AuthService {
    pub fn hash_password(password: &str) -> Result<String, ApiError> {
        hash(password, DEFAULT_COST).map_err(|e| {
            error!("Failed to hash password: {}", e);
            ApiError::InternalError("Failed to hash password".to_string())
        })
    }

    pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
        verify(password, hash).map_err(|e| {
            error!("Failed to verify password: {}", e);
            ApiError::InternalError("Failed to verify password".to_string())
        })
    }

    /// Issues a signed session token carrying identity and role, valid for
    /// `jwt_expiry` hours (one day by default). There is no revocation list;
    /// expiry is the only cancellation mechanism.
    pub fn generate_token(user_id: i32, role: Role, config: &AppConfig) -> Result<String, ApiError> {
        let now = Utc::now();
        let iat = now.timestamp() as usize;
        let exp = (now + Duration::hours(config.jwt_expiry)).timestamp() as usize;

        let claims = Claims {
            sub: user_id.to_string(),
            exp,
            iat,
            user_id,
            role,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .map_err(|e| {
            error!("Failed to generate token: {}", e);
            ApiError::InternalError("Failed to generate token".to_string())
        })
    }

    /// Signature mismatch, expiry and malformed payloads all fail with the
    /// same message - callers learn nothing beyond "invalid or expired".
    pub fn decode_token(token: &str, config: &AppConfig) -> Result<Claims, ApiError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| {
            debug!("Token verification failed: {}", e);
            ApiError::AuthError("Invalid or expired token".to_string())
        })
    }
}

pub struct UserService;

impl UserService {
    /// Any requested role is honored except SUPER_ADMIN, which is silently
    /// downgraded to USER.
    pub fn safe_role(requested: Option<Role>) -> Role {
        match requested {
            Some(Role::SuperAdmin) | None => Role::User,
            Some(role) => role,
        }
    }

    /// Minimal email shape check: exactly one '@' with non-empty local and
    /// dotted domain parts, and no whitespace anywhere.
    pub fn is_valid_email(email: &str) -> bool {
        if email.contains(char::is_whitespace) {
            return false;
        }
        match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && !domain.contains('@')
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
            }
            None => false,
        }
    }

    pub async fn find_by_email(
        email_addr: &str,
        pool: &DbPool,
    ) -> Result<Option<UserAccount>, ApiError> {
        let email_copy = email_addr.to_string();
        db::run(pool, move |conn| {
            use crate::schema::user_account::dsl::*;
            user_account
                .filter(email.eq(email_copy))
                .first::<UserAccount>(conn)
                .optional()
        })
        .await
    }

    pub async fn get_user_by_id(id: i32, pool: &DbPool) -> Result<UserAccount, ApiError> {
        db::run(pool, move |conn| {
            use crate::schema::user_account::dsl::*;
            user_account.find(id).first::<UserAccount>(conn)
        })
        .await
        .map_err(|e| match e {
            ApiError::NotFoundError(_) => {
                debug!("User not found with ID {}", id);
                ApiError::NotFoundError("User not found".to_string())
            }
            other => other,
        })
    }

    pub async fn register(
        request: &RegisterRequest,
        pool: &DbPool,
    ) -> Result<UserAccount, ApiError> {
        if !UserService::is_valid_email(&request.email) {
            debug!("Registration failed: malformed email {}", request.email);
            return Err(ApiError::ValidationError(
                "Invalid email format".to_string(),
            ));
        }

        if UserService::find_by_email(&request.email, pool)
            .await?
            .is_some()
        {
            debug!(
                "Registration failed: email already registered {}",
                request.email
            );
            return Err(ApiError::ValidationError(
                "Email already registered".to_string(),
            ));
        }

        let password_hash = AuthService::hash_password(&request.password)?;
        let role = UserService::safe_role(request.role);

        let new_user = NewUserAccount {
            name: request.name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            password_hash,
            role: role.as_str().to_string(),
            status: AccountStatus::Active.as_str().to_string(),
            profile_image: request.profile_image.clone(),
            address: request.address.clone(),
        };

        let user = db::run(pool, move |conn| {
            use crate::schema::user_account::dsl::*;
            diesel::insert_into(user_account)
                .values(&new_user)
                .get_result::<UserAccount>(conn)
        })
        .await?;

        info!("Created new user with ID: {}", user.user_id);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        AppConfig {
            jwt_secret: "unit-test-secret".to_string(),
            jwt_expiry: 24,
            admin_email: "admin@gmail.com".to_string(),
            admin_password: "secure123".to_string(),
        }
    }

    #[test]
    fn password_hash_round_trips() {
        let hashed = AuthService::hash_password("hunter2").unwrap();
        assert_ne!(hashed, "hunter2");
        assert!(AuthService::verify_password("hunter2", &hashed).unwrap());
        assert!(!AuthService::verify_password("hunter3", &hashed).unwrap());
    }

    #[test]
    fn token_round_trips_with_identity_and_role() {
        let config = test_config();
        let token = AuthService::generate_token(42, Role::MiniAdmin, &config).unwrap();
        let claims = AuthService::decode_token(&token, &config).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.role, Role::MiniAdmin);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let config = test_config();
        let mut other = test_config();
        other.jwt_secret = "a-different-secret".to_string();
        let token = AuthService::generate_token(42, Role::Admin, &other).unwrap();
        assert!(AuthService::decode_token(&token, &config).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let config = test_config();
        assert!(AuthService::decode_token("not.a.token", &config).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut config = test_config();
        config.jwt_expiry = -1;
        let token = AuthService::generate_token(1, Role::User, &config).unwrap();
        assert!(AuthService::decode_token(&token, &config).is_err());
    }

    #[test]
    fn super_admin_registration_downgrades_to_user() {
        assert_eq!(UserService::safe_role(Some(Role::SuperAdmin)), Role::User);
        assert_eq!(UserService::safe_role(None), Role::User);
        assert_eq!(
            UserService::safe_role(Some(Role::MiniAdmin)),
            Role::MiniAdmin
        );
        assert_eq!(UserService::safe_role(Some(Role::Admin)), Role::Admin);
    }

    #[test]
    fn email_shape_is_validated() {
        assert!(UserService::is_valid_email("user@example.com"));
        assert!(UserService::is_valid_email("first.last+tag@sub.example.co"));

        assert!(!UserService::is_valid_email("not-an-email"));
        assert!(!UserService::is_valid_email("@example.com"));
        assert!(!UserService::is_valid_email("user@"));
        assert!(!UserService::is_valid_email("user@nodot"));
        assert!(!UserService::is_valid_email("user@.com"));
        assert!(!UserService::is_valid_email("user@example.com."));
        assert!(!UserService::is_valid_email("user name@example.com"));
        assert!(!UserService::is_valid_email("user@one@two.com"));
        assert!(!UserService::is_valid_email(""));
    }
}
