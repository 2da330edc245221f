use actix_web::{web, App, HttpServer};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{self, ConnectionManager};
use diesel::Connection;
use log::{error, info};
use std::env;

use travelbase::config::{AppConfig, DB_INIT_SQL};
use travelbase::handlers;
use travelbase::logger::setup_logger;
use travelbase::middleware::RequestLogger;
use travelbase::seed;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables and initialize logger
    dotenvy::dotenv().ok();
    setup_logger();

    // Get host and port from environment or use defaults
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT")
        .unwrap_or_else(|_| "5000".to_string())
        .parse::<u16>()
        .expect("PORT must be a number");

    // Connecting to database
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    info!("Connecting to database: {}", db_url);

    // Initialize database schema
    let mut conn = PgConnection::establish(&db_url)
        .expect("Failed to establish connection for schema bootstrap");
    conn.batch_execute(DB_INIT_SQL)
        .expect("Failed to execute database initialization script");
    info!("Database initialization complete.");

    // Set up database connection pool
    let manager = ConnectionManager::<PgConnection>::new(db_url);
    let pool = r2d2::Pool::builder()
        .build(manager)
        .expect("Failed to create database connection pool");

    // Load and validate configuration
    let config = AppConfig::from_env();
    if let Err(e) = config.validate() {
        error!("Configuration validation error: {}", e);
        panic!("Invalid configuration: {}", e);
    }

    // Seed the main admin account if it does not exist yet
    if let Err(e) = seed::seed_admin(&config, &pool).await {
        error!("Admin seeding failed: {}", e);
    }

    info!("Starting HTTP server at http://{}:{}", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            // Enable request logger middleware
            .wrap(RequestLogger)
            // Register app data
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config.clone()))
            // API routes
            .service(web::scope("/api").configure(handlers::api_routes))
    })
    .workers(2) // Specify number of workers
    .keep_alive(std::time::Duration::from_secs(75)) // Configure keep-alive
    .shutdown_timeout(30) // Graceful shutdown timeout in seconds
    .bind((host, port))?
    .run()
    .await
}
