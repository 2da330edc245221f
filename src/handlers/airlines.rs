use actix_web::{delete, get, post, put, web, HttpResponse};
use diesel::prelude::*;
use log::{debug, info};
use serde_json::json;

use crate::db::{self, DbPool};
use crate::errors::ApiError;
use crate::extractors::AuthUser;
use crate::models::{Airline, NewAirline, OwnerFilter, UpdateAirline};
use crate::policy;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_airlines)
        .service(get_airline)
        .service(create_airline)
        .service(update_airline)
        .service(delete_airline);
}

#[get("/airlines")]
async fn list_airlines(
    pool: web::Data<DbPool>,
    filter: web::Query<OwnerFilter>,
) -> Result<HttpResponse, ApiError> {
    let owner = filter.user_id;
    let airlines = db::run(&pool, move |conn| {
        use crate::schema::airline::dsl::*;
        match owner {
            Some(owner_id) => airline.filter(user_id.eq(owner_id)).load::<Airline>(conn),
            None => airline.load::<Airline>(conn),
        }
    })
    .await?;

    debug!("Listed {} airlines", airlines.len());
    Ok(HttpResponse::Ok().json(airlines))
}

#[get("/airlines/{id}")]
async fn get_airline(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let found = db::run(&pool, move |conn| {
        use crate::schema::airline::dsl::*;
        airline.find(id).first::<Airline>(conn).optional()
    })
    .await?;

    match found {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Err(ApiError::NotFoundError("Airline not found".to_string())),
    }
}

#[post("/airlines")]
async fn create_airline(
    pool: web::Data<DbPool>,
    user: AuthUser,
    payload: web::Json<NewAirline>,
) -> Result<HttpResponse, ApiError> {
    policy::require_staff(&user)?;

    let new_airline = NewAirline {
        user_id: user.user_id,
        ..payload.into_inner()
    };

    let created = db::run(&pool, move |conn| {
        use crate::schema::airline::dsl::*;
        diesel::insert_into(airline)
            .values(&new_airline)
            .get_result::<Airline>(conn)
    })
    .await?;

    info!(
        "User {} created airline {}",
        user.user_id, created.airline_id
    );
    Ok(HttpResponse::Created().json(created))
}

#[put("/airlines/{id}")]
async fn update_airline(
    pool: web::Data<DbPool>,
    user: AuthUser,
    path: web::Path<i32>,
    payload: web::Json<UpdateAirline>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let existing = db::run(&pool, move |conn| {
        use crate::schema::airline::dsl::*;
        airline.find(id).first::<Airline>(conn).optional()
    })
    .await?
    .ok_or_else(|| ApiError::NotFoundError("Airline not found".to_string()))?;

    policy::authorize_mutation(&user, existing.user_id)?;

    let changes = payload.into_inner();
    if changes.is_noop() {
        return Ok(HttpResponse::Ok().json(existing));
    }

    let updated = db::run(&pool, move |conn| {
        use crate::schema::airline::dsl::*;
        diesel::update(airline.find(id))
            .set(&changes)
            .get_result::<Airline>(conn)
    })
    .await?;

    info!("User {} updated airline {}", user.user_id, id);
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/airlines/{id}")]
async fn delete_airline(
    pool: web::Data<DbPool>,
    user: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let existing = db::run(&pool, move |conn| {
        use crate::schema::airline::dsl::*;
        airline.find(id).first::<Airline>(conn).optional()
    })
    .await?
    .ok_or_else(|| ApiError::NotFoundError("Airline not found".to_string()))?;

    policy::authorize_mutation(&user, existing.user_id)?;

    db::run(&pool, move |conn| {
        use crate::schema::airline::dsl::*;
        diesel::delete(airline.find(id)).execute(conn)
    })
    .await?;

    info!("User {} deleted airline {}", user.user_id, id);
    Ok(HttpResponse::Ok().json(json!({ "message": "Airline deleted successfully" })))
}
