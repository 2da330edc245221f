use actix_web::{get, post, web, HttpResponse};
use log::{debug, info};

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::errors::ApiError;
use crate::extractors::AuthUser;
use crate::models::{AccountStatus, AuthResponse, LoginRequest, RegisterRequest};
use crate::services::{AuthService, UserService};

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(register).service(login).service(me);
}

#[post("/auth/register")]
async fn register(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    debug!("Registration attempt for: {}", request.email);

    let user = UserService::register(&request, &pool).await?;
    let token = AuthService::generate_token(user.user_id, user.role(), &config)?;

    info!("User {} registered successfully", user.email);

    Ok(HttpResponse::Created().json(AuthResponse {
        message: "User registered successfully".to_string(),
        token,
        user: user.public(),
    }))
}

#[post("/auth/login")]
async fn login(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    debug!("Login attempt for: {}", request.email);

    // Unknown email and bad password produce the same response, so the
    // endpoint cannot be used to enumerate accounts.
    let user = match UserService::find_by_email(&request.email, &pool).await? {
        Some(user) => user,
        None => {
            debug!("Login failed: no user with email {}", request.email);
            return Err(ApiError::AuthError("Invalid email or password".to_string()));
        }
    };

    if user.status() != AccountStatus::Active {
        return Err(ApiError::Forbidden("Account is not active".to_string()));
    }

    if !AuthService::verify_password(&request.password, &user.password_hash)? {
        debug!("Login failed: bad password for {}", request.email);
        return Err(ApiError::AuthError("Invalid email or password".to_string()));
    }

    let token = AuthService::generate_token(user.user_id, user.role(), &config)?;

    info!("User {} logged in successfully", user.email);

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: user.public(),
    }))
}

#[get("/auth/me")]
async fn me(user: AuthUser) -> Result<HttpResponse, ApiError> {
    // UserAccount never serializes the password hash
    Ok(HttpResponse::Ok().json(&user.0))
}
