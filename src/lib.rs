// Exports all the modules for use in the application and the tests

pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod logger;
pub mod middleware;
pub mod models;
pub mod policy;
pub mod schema;
pub mod seed;
pub mod services;

// Re-export common types
pub use crate::config::AppConfig;
pub use crate::db::DbPool;
pub use crate::errors::ApiError;
pub use crate::models::UserAccount;
