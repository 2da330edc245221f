//! End-to-end API tests against a live Postgres instance.
//!
//! These are ignored by default; run them with a database available:
//!
//! ```sh
//! DATABASE_URL=postgres://... cargo test -- --ignored
//! ```

use actix_web::http::header;
use actix_web::{test, web, App};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use serde_json::{json, Value};
use uuid::Uuid;

use travelbase::config::{AppConfig, DB_INIT_SQL};
use travelbase::handlers;
use travelbase::DbPool;

fn test_config() -> AppConfig {
    AppConfig {
        jwt_secret: "integration-test-secret".to_string(),
        jwt_expiry: 24,
        admin_email: "admin@gmail.com".to_string(),
        admin_password: "secure123".to_string(),
    }
}

fn setup_pool() -> DbPool {
    dotenvy::dotenv().ok();
    let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for API tests");

    let mut conn =
        PgConnection::establish(&db_url).expect("failed to connect to the test database");
    conn.batch_execute(DB_INIT_SQL)
        .expect("failed to bootstrap the test schema");

    let manager = ConnectionManager::<PgConnection>::new(db_url);
    r2d2::Pool::builder()
        .max_size(2)
        .build(manager)
        .expect("failed to build the test pool")
}

macro_rules! call {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req).await;
        let status = resp.status().as_u16();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Registers a user with a unique email; returns (token, user id).
macro_rules! register {
    ($app:expr, $role:expr) => {{
        let email = format!("{}-{}@test.local", $role.to_lowercase(), Uuid::new_v4());
        let (status, body) = call!(
            $app,
            test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(json!({
                    "name": "Test Account",
                    "email": email,
                    "phone": "0300",
                    "password": "hunter2",
                    "role": $role,
                }))
                .to_request()
        );
        assert_eq!(status, 201, "registration failed: {}", body);
        (
            body["token"].as_str().unwrap().to_string(),
            body["user"]["id"].as_i64().unwrap() as i32,
            email,
        )
    }};
}

#[actix_web::test]
#[ignore]
async fn ownership_scenario_across_roles() {
    let pool = setup_pool();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(test_config()))
            .service(web::scope("/api").configure(handlers::api_routes)),
    )
    .await;

    let (token_a, _a_id, _) = register!(app, "USER");
    let (token_b, b_id, _) = register!(app, "MINI_ADMIN");
    let (token_c, _c_id, _) = register!(app, "ADMIN");

    // Plain USER cannot create catalog entries
    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/locations")
            .insert_header(bearer(&token_a))
            .set_json(json!({ "cityName": "Skardu" }))
            .to_request()
    );
    assert_eq!(status, 403);

    // MINI_ADMIN creates; the owner in the payload is ignored in favor of
    // the authenticated caller
    let (status, created) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/locations")
            .insert_header(bearer(&token_b))
            .set_json(json!({ "cityName": "Skardu", "userId": 424242 }))
            .to_request()
    );
    assert_eq!(status, 201);
    assert_eq!(created["userId"].as_i64().unwrap() as i32, b_id);
    assert_eq!(created["country"], "Pakistan");
    let location_id = created["locationId"].as_i64().unwrap();

    // Read-after-write: unauthenticated get returns the same fields
    let (status, fetched) = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/locations/{}", location_id))
            .to_request()
    );
    assert_eq!(status, 200);
    assert_eq!(fetched, created);

    // Non-owning, non-admin caller cannot update
    let (status, _) = call!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/locations/{}", location_id))
            .insert_header(bearer(&token_a))
            .set_json(json!({ "description": "hijacked" }))
            .to_request()
    );
    assert_eq!(status, 403);

    // ADMIN can update anything
    let (status, updated) = call!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/locations/{}", location_id))
            .insert_header(bearer(&token_c))
            .set_json(json!({ "description": "gateway to K2" }))
            .to_request()
    );
    assert_eq!(status, 200);
    assert_eq!(updated["description"], "gateway to K2");
    assert_eq!(updated["cityName"], "Skardu");

    // Absent records 404 before any ownership answer
    let (status, _) = call!(
        app,
        test::TestRequest::put()
            .uri("/api/locations/999999999")
            .insert_header(bearer(&token_a))
            .set_json(json!({ "description": "x" }))
            .to_request()
    );
    assert_eq!(status, 404);

    // The owner deletes their own record
    let (status, confirmation) = call!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/locations/{}", location_id))
            .insert_header(bearer(&token_b))
            .to_request()
    );
    assert_eq!(status, 200);
    assert_eq!(confirmation["message"], "Location deleted successfully");

    let (status, _) = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/locations/{}", location_id))
            .to_request()
    );
    assert_eq!(status, 404);
}

#[actix_web::test]
#[ignore]
async fn login_failure_does_not_reveal_which_credential_was_wrong() {
    let pool = setup_pool();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(test_config()))
            .service(web::scope("/api").configure(handlers::api_routes)),
    )
    .await;

    let (_token, _id, email) = register!(app, "USER");

    let (bad_password_status, bad_password_body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": email, "password": "wrong" }))
            .to_request()
    );
    let (unknown_email_status, unknown_email_body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "nobody@test.local", "password": "wrong" }))
            .to_request()
    );

    assert_eq!(bad_password_status, 401);
    assert_eq!(unknown_email_status, 401);
    assert_eq!(bad_password_body["error"], unknown_email_body["error"]);
}

#[actix_web::test]
#[ignore]
async fn suspension_invalidates_issued_tokens_immediately() {
    let pool = setup_pool();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(test_config()))
            .service(web::scope("/api").configure(handlers::api_routes)),
    )
    .await;

    let (token, id, _) = register!(app, "MINI_ADMIN");

    let (status, profile) = call!(
        app,
        test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(bearer(&token))
            .to_request()
    );
    assert_eq!(status, 200);
    assert!(profile.get("passwordHash").is_none());

    // Suspend the account behind the token's back
    {
        use travelbase::schema::user_account::dsl;
        let mut conn = pool.get().unwrap();
        diesel::update(dsl::user_account.find(id))
            .set(dsl::status.eq("BANNED"))
            .execute(&mut conn)
            .unwrap();
    }

    // The still-valid token is rejected on the very next request
    let (status, _) = call!(
        app,
        test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(bearer(&token))
            .to_request()
    );
    assert_eq!(status, 403);
}

#[actix_web::test]
#[ignore]
async fn super_admin_registration_is_downgraded() {
    let pool = setup_pool();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(test_config()))
            .service(web::scope("/api").configure(handlers::api_routes)),
    )
    .await;

    let email = format!("wannabe-{}@test.local", Uuid::new_v4());
    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "name": "Wannabe Root",
                "email": email,
                "phone": "0300",
                "password": "hunter2",
                "role": "SUPER_ADMIN",
            }))
            .to_request()
    );
    assert_eq!(status, 201);
    assert_eq!(body["user"]["role"], "USER");

    // Duplicate registration conflicts
    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "name": "Wannabe Root",
                "email": email,
                "phone": "0300",
                "password": "hunter2",
            }))
            .to_request()
    );
    assert_eq!(status, 400);
}

#[actix_web::test]
#[ignore]
async fn owner_filter_narrows_list_results() {
    let pool = setup_pool();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(test_config()))
            .service(web::scope("/api").configure(handlers::api_routes)),
    )
    .await;

    let (token, id, _) = register!(app, "MINI_ADMIN");

    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/airlines")
            .insert_header(bearer(&token))
            .set_json(json!({ "name": "Test Air", "code": "TA" }))
            .to_request()
    );
    assert_eq!(status, 201);

    let (status, listed) = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/airlines?userId={}", id))
            .to_request()
    );
    assert_eq!(status, 200);
    let listed = listed.as_array().unwrap();
    assert!(!listed.is_empty());
    assert!(listed
        .iter()
        .all(|airline| airline["userId"].as_i64().unwrap() as i32 == id));
}
