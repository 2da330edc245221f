use actix_web::{delete, get, post, put, web, HttpResponse};
use diesel::prelude::*;
use log::{debug, info};
use serde_json::json;

use crate::db::{self, DbPool};
use crate::errors::ApiError;
use crate::extractors::AuthUser;
use crate::models::{Location, NewLocation, OwnerFilter, UpdateLocation};
use crate::policy;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_locations)
        .service(get_location)
        .service(create_location)
        .service(update_location)
        .service(delete_location);
}

#[get("/locations")]
async fn list_locations(
    pool: web::Data<DbPool>,
    filter: web::Query<OwnerFilter>,
) -> Result<HttpResponse, ApiError> {
    let owner = filter.user_id;
    let locations = db::run(&pool, move |conn| {
        use crate::schema::location::dsl::*;
        match owner {
            Some(owner_id) => location
                .filter(user_id.eq(owner_id))
                .load::<Location>(conn),
            None => location.load::<Location>(conn),
        }
    })
    .await?;

    debug!("Listed {} locations", locations.len());
    Ok(HttpResponse::Ok().json(locations))
}

#[get("/locations/{id}")]
async fn get_location(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let found = db::run(&pool, move |conn| {
        use crate::schema::location::dsl::*;
        location.find(id).first::<Location>(conn).optional()
    })
    .await?;

    match found {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Err(ApiError::NotFoundError("Location not found".to_string())),
    }
}

#[post("/locations")]
async fn create_location(
    pool: web::Data<DbPool>,
    user: AuthUser,
    payload: web::Json<NewLocation>,
) -> Result<HttpResponse, ApiError> {
    policy::require_staff(&user)?;

    // Owner always comes from the authenticated caller, never the payload
    let new_location = NewLocation {
        user_id: user.user_id,
        ..payload.into_inner()
    };

    let created = db::run(&pool, move |conn| {
        use crate::schema::location::dsl::*;
        diesel::insert_into(location)
            .values(&new_location)
            .get_result::<Location>(conn)
    })
    .await?;

    info!(
        "User {} created location {}",
        user.user_id, created.location_id
    );
    Ok(HttpResponse::Created().json(created))
}

#[put("/locations/{id}")]
async fn update_location(
    pool: web::Data<DbPool>,
    user: AuthUser,
    path: web::Path<i32>,
    payload: web::Json<UpdateLocation>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    // Existence first: a missing record is 404 before any ownership answer
    let existing = db::run(&pool, move |conn| {
        use crate::schema::location::dsl::*;
        location.find(id).first::<Location>(conn).optional()
    })
    .await?
    .ok_or_else(|| ApiError::NotFoundError("Location not found".to_string()))?;

    policy::authorize_mutation(&user, existing.user_id)?;

    let changes = payload.into_inner();
    if changes.is_noop() {
        return Ok(HttpResponse::Ok().json(existing));
    }

    let updated = db::run(&pool, move |conn| {
        use crate::schema::location::dsl::*;
        diesel::update(location.find(id))
            .set(&changes)
            .get_result::<Location>(conn)
    })
    .await?;

    info!("User {} updated location {}", user.user_id, id);
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/locations/{id}")]
async fn delete_location(
    pool: web::Data<DbPool>,
    user: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let existing = db::run(&pool, move |conn| {
        use crate::schema::location::dsl::*;
        location.find(id).first::<Location>(conn).optional()
    })
    .await?
    .ok_or_else(|| ApiError::NotFoundError("Location not found".to_string()))?;

    policy::authorize_mutation(&user, existing.user_id)?;

    db::run(&pool, move |conn| {
        use crate::schema::location::dsl::*;
        diesel::delete(location.find(id)).execute(conn)
    })
    .await?;

    info!("User {} deleted location {}", user.user_id, id);
    Ok(HttpResponse::Ok().json(json!({ "message": "Location deleted successfully" })))
}
