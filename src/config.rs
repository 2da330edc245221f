use log::warn;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use std::env;

// Database initialization SQL - executed once at startup, idempotent
pub const DB_INIT_SQL: &str = r#"
-- Create tables if they don't exist
CREATE TABLE IF NOT EXISTS user_account (
    user_id SERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    email VARCHAR(255) UNIQUE NOT NULL,
    phone VARCHAR(50) NOT NULL,
    password_hash VARCHAR(255) NOT NULL,
    role VARCHAR(20) NOT NULL DEFAULT 'USER',
    status VARCHAR(20) NOT NULL DEFAULT 'ACTIVE',
    profile_image VARCHAR(255),
    address TEXT,
    date_registered TIMESTAMP NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS location (
    location_id SERIAL PRIMARY KEY,
    city_name VARCHAR(100) NOT NULL,
    country VARCHAR(100) NOT NULL DEFAULT 'Pakistan',
    description TEXT,
    best_time_to_visit VARCHAR(100),
    coordinates VARCHAR(100),
    thumbnail VARCHAR(255),
    user_id INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS view_point (
    view_point_id SERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    description TEXT,
    banner_image VARCHAR(255),
    opening_hours VARCHAR(100),
    entry_fee INTEGER NOT NULL DEFAULT 0,
    location_id INTEGER,
    user_id INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS view_point_image (
    image_id SERIAL PRIMARY KEY,
    view_point_id INTEGER NOT NULL,
    image_url VARCHAR(255) NOT NULL,
    caption VARCHAR(255)
);

CREATE TABLE IF NOT EXISTS hotel (
    hotel_id SERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    address VARCHAR(255) NOT NULL,
    description TEXT,
    star_category VARCHAR(20) NOT NULL,
    price_per_night INTEGER NOT NULL,
    amenities TEXT,
    rating REAL NOT NULL DEFAULT 0,
    contact_number VARCHAR(50),
    website VARCHAR(255),
    image VARCHAR(255),
    view_point_id INTEGER,
    user_id INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS airline (
    airline_id SERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    code VARCHAR(10) NOT NULL,
    logo VARCHAR(255),
    country VARCHAR(100),
    website VARCHAR(255),
    contact_email VARCHAR(255),
    user_id INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS flight (
    flight_id SERIAL PRIMARY KEY,
    flight_number VARCHAR(20) NOT NULL,
    from_city VARCHAR(100) NOT NULL,
    to_city VARCHAR(100) NOT NULL,
    departure_time TIMESTAMP NOT NULL,
    arrival_time TIMESTAMP NOT NULL,
    duration VARCHAR(20),
    price INTEGER NOT NULL,
    class VARCHAR(20) NOT NULL DEFAULT 'ECONOMY',
    status VARCHAR(20) NOT NULL DEFAULT 'SCHEDULED',
    airline_id INTEGER,
    user_id INTEGER NOT NULL
);

-- Add foreign keys if not exist
DO $$
BEGIN
    IF NOT EXISTS (
        SELECT 1 FROM pg_constraint WHERE conname = 'fk_location_owner'
    ) THEN
        ALTER TABLE location ADD CONSTRAINT fk_location_owner
        FOREIGN KEY (user_id) REFERENCES user_account(user_id) ON DELETE CASCADE;
    END IF;

    IF NOT EXISTS (
        SELECT 1 FROM pg_constraint WHERE conname = 'fk_view_point_owner'
    ) THEN
        ALTER TABLE view_point ADD CONSTRAINT fk_view_point_owner
        FOREIGN KEY (user_id) REFERENCES user_account(user_id) ON DELETE CASCADE;
    END IF;

    IF NOT EXISTS (
        SELECT 1 FROM pg_constraint WHERE conname = 'fk_view_point_location'
    ) THEN
        ALTER TABLE view_point ADD CONSTRAINT fk_view_point_location
        FOREIGN KEY (location_id) REFERENCES location(location_id) ON DELETE SET NULL;
    END IF;

    IF NOT EXISTS (
        SELECT 1 FROM pg_constraint WHERE conname = 'fk_view_point_image_parent'
    ) THEN
        ALTER TABLE view_point_image ADD CONSTRAINT fk_view_point_image_parent
        FOREIGN KEY (view_point_id) REFERENCES view_point(view_point_id) ON DELETE CASCADE;
    END IF;

    IF NOT EXISTS (
        SELECT 1 FROM pg_constraint WHERE conname = 'fk_hotel_owner'
    ) THEN
        ALTER TABLE hotel ADD CONSTRAINT fk_hotel_owner
        FOREIGN KEY (user_id) REFERENCES user_account(user_id) ON DELETE CASCADE;
    END IF;

    IF NOT EXISTS (
        SELECT 1 FROM pg_constraint WHERE conname = 'fk_hotel_view_point'
    ) THEN
        ALTER TABLE hotel ADD CONSTRAINT fk_hotel_view_point
        FOREIGN KEY (view_point_id) REFERENCES view_point(view_point_id) ON DELETE SET NULL;
    END IF;

    IF NOT EXISTS (
        SELECT 1 FROM pg_constraint WHERE conname = 'fk_airline_owner'
    ) THEN
        ALTER TABLE airline ADD CONSTRAINT fk_airline_owner
        FOREIGN KEY (user_id) REFERENCES user_account(user_id) ON DELETE CASCADE;
    END IF;

    IF NOT EXISTS (
        SELECT 1 FROM pg_constraint WHERE conname = 'fk_flight_owner'
    ) THEN
        ALTER TABLE flight ADD CONSTRAINT fk_flight_owner
        FOREIGN KEY (user_id) REFERENCES user_account(user_id) ON DELETE CASCADE;
    END IF;

    IF NOT EXISTS (
        SELECT 1 FROM pg_constraint WHERE conname = 'fk_flight_airline'
    ) THEN
        ALTER TABLE flight ADD CONSTRAINT fk_flight_airline
        FOREIGN KEY (airline_id) REFERENCES airline(airline_id) ON DELETE SET NULL;
    END IF;
END $$;
"#;

// Config
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub jwt_expiry: i64, // In hours
    pub admin_email: String,
    pub admin_password: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(val) => val,
            Err(e) => {
                warn!("Failed to load JWT_SECRET: {}", e);
                warn!("Using default JWT secret - THIS IS NOT SECURE FOR PRODUCTION!");
                "your_jwt_secret".to_string()
            }
        };

        let jwt_expiry = env::var("JWT_EXPIRY_HOURS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(24);

        let admin_email =
            env::var("MAIN_ADMIN_EMAIL").unwrap_or_else(|_| "admin@gmail.com".to_string());
        let admin_password =
            env::var("MAIN_ADMIN_PASSWORD").unwrap_or_else(|_| "secure123".to_string());

        Self {
            jwt_secret,
            jwt_expiry,
            admin_email,
            admin_password,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret == "your_jwt_secret" {
            warn!("Using default JWT secret is not secure for production!");
        }

        if self.admin_password == "secure123" {
            warn!("Using default seed admin password is not secure for production!");
        }

        if self.jwt_expiry <= 0 {
            return Err("JWT_EXPIRY_HOURS must be positive".to_string());
        }

        Ok(())
    }

    pub fn generate_secure_secret() -> String {
        thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_secret_is_32_alphanumeric_chars() {
        let secret = AppConfig::generate_secure_secret();
        assert_eq!(secret.len(), 32);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn validate_rejects_non_positive_expiry() {
        let config = AppConfig {
            jwt_secret: "s".into(),
            jwt_expiry: 0,
            admin_email: "a@b.c".into(),
            admin_password: "p".into(),
        };
        assert!(config.validate().is_err());
    }
}
