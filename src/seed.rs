use diesel::prelude::*;
use log::{error, info};

use crate::config::AppConfig;
use crate::db::{self, DbPool};
use crate::errors::ApiError;
use crate::models::{AccountStatus, NewUserAccount, Role};
use crate::services::{AuthService, UserService};

/// Creates the SUPER_ADMIN account from the configured seed credentials if it
/// does not exist yet. Idempotent across restarts.
pub async fn seed_admin(config: &AppConfig, pool: &DbPool) -> Result<(), ApiError> {
    if UserService::find_by_email(&config.admin_email, pool)
        .await?
        .is_some()
    {
        info!("Main admin already exists, skipping seeding");
        return Ok(());
    }

    let password_hash = AuthService::hash_password(&config.admin_password)?;
    let admin = NewUserAccount {
        name: "Main Admin".to_string(),
        email: config.admin_email.clone(),
        phone: "0000000000".to_string(),
        password_hash,
        role: Role::SuperAdmin.as_str().to_string(),
        status: AccountStatus::Active.as_str().to_string(),
        profile_image: None,
        address: None,
    };

    match db::run(pool, move |conn| {
        use crate::schema::user_account::dsl::*;
        diesel::insert_into(user_account)
            .values(&admin)
            .execute(conn)
    })
    .await
    {
        Ok(_) => {
            info!("Main admin seeded successfully");
            Ok(())
        }
        Err(e) => {
            error!("Failed to seed main admin: {}", e);
            Err(e)
        }
    }
}
