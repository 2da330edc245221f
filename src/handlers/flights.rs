use actix_web::{delete, get, post, put, web, HttpResponse};
use diesel::prelude::*;
use log::{debug, info};
use serde_json::json;

use crate::db::{self, DbPool};
use crate::errors::ApiError;
use crate::extractors::AuthUser;
use crate::models::{Flight, NewFlight, OwnerFilter, UpdateFlight};
use crate::policy;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_flights)
        .service(get_flight)
        .service(create_flight)
        .service(update_flight)
        .service(delete_flight);
}

#[get("/flights")]
async fn list_flights(
    pool: web::Data<DbPool>,
    filter: web::Query<OwnerFilter>,
) -> Result<HttpResponse, ApiError> {
    let owner = filter.user_id;
    let flights = db::run(&pool, move |conn| {
        use crate::schema::flight::dsl::*;
        match owner {
            Some(owner_id) => flight.filter(user_id.eq(owner_id)).load::<Flight>(conn),
            None => flight.load::<Flight>(conn),
        }
    })
    .await?;

    debug!("Listed {} flights", flights.len());
    Ok(HttpResponse::Ok().json(flights))
}

#[get("/flights/{id}")]
async fn get_flight(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let found = db::run(&pool, move |conn| {
        use crate::schema::flight::dsl::*;
        flight.find(id).first::<Flight>(conn).optional()
    })
    .await?;

    match found {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Err(ApiError::NotFoundError("Flight not found".to_string())),
    }
}

#[post("/flights")]
async fn create_flight(
    pool: web::Data<DbPool>,
    user: AuthUser,
    payload: web::Json<NewFlight>,
) -> Result<HttpResponse, ApiError> {
    policy::require_staff(&user)?;

    let new_flight = NewFlight {
        user_id: user.user_id,
        ..payload.into_inner()
    };

    let created = db::run(&pool, move |conn| {
        use crate::schema::flight::dsl::*;
        diesel::insert_into(flight)
            .values(&new_flight)
            .get_result::<Flight>(conn)
    })
    .await?;

    info!("User {} created flight {}", user.user_id, created.flight_id);
    Ok(HttpResponse::Created().json(created))
}

#[put("/flights/{id}")]
async fn update_flight(
    pool: web::Data<DbPool>,
    user: AuthUser,
    path: web::Path<i32>,
    payload: web::Json<UpdateFlight>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let existing = db::run(&pool, move |conn| {
        use crate::schema::flight::dsl::*;
        flight.find(id).first::<Flight>(conn).optional()
    })
    .await?
    .ok_or_else(|| ApiError::NotFoundError("Flight not found".to_string()))?;

    policy::authorize_mutation(&user, existing.user_id)?;

    let changes = payload.into_inner();
    if changes.is_noop() {
        return Ok(HttpResponse::Ok().json(existing));
    }

    let updated = db::run(&pool, move |conn| {
        use crate::schema::flight::dsl::*;
        diesel::update(flight.find(id))
            .set(&changes)
            .get_result::<Flight>(conn)
    })
    .await?;

    info!("User {} updated flight {}", user.user_id, id);
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/flights/{id}")]
async fn delete_flight(
    pool: web::Data<DbPool>,
    user: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let existing = db::run(&pool, move |conn| {
        use crate::schema::flight::dsl::*;
        flight.find(id).first::<Flight>(conn).optional()
    })
    .await?
    .ok_or_else(|| ApiError::NotFoundError("Flight not found".to_string()))?;

    policy::authorize_mutation(&user, existing.user_id)?;

    db::run(&pool, move |conn| {
        use crate::schema::flight::dsl::*;
        diesel::delete(flight.find(id)).execute(conn)
    })
    .await?;

    info!("User {} deleted flight {}", user.user_id, id);
    Ok(HttpResponse::Ok().json(json!({ "message": "Flight deleted successfully" })))
}
