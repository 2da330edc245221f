use actix_web::{delete, get, post, put, web, HttpResponse};
use diesel::prelude::*;
use log::{debug, info};
use serde_json::json;

use crate::db::{self, DbPool};
use crate::errors::ApiError;
use crate::extractors::AuthUser;
use crate::models::{Hotel, NewHotel, OwnerFilter, UpdateHotel};
use crate::policy;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_hotels)
        .service(get_hotel)
        .service(create_hotel)
        .service(update_hotel)
        .service(delete_hotel);
}

#[get("/hotels")]
async fn list_hotels(
    pool: web::Data<DbPool>,
    filter: web::Query<OwnerFilter>,
) -> Result<HttpResponse, ApiError> {
    let owner = filter.user_id;
    let hotels = db::run(&pool, move |conn| {
        use crate::schema::hotel::dsl::*;
        match owner {
            Some(owner_id) => hotel.filter(user_id.eq(owner_id)).load::<Hotel>(conn),
            None => hotel.load::<Hotel>(conn),
        }
    })
    .await?;

    debug!("Listed {} hotels", hotels.len());
    Ok(HttpResponse::Ok().json(hotels))
}

#[get("/hotels/{id}")]
async fn get_hotel(pool: web::Data<DbPool>, path: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let found = db::run(&pool, move |conn| {
        use crate::schema::hotel::dsl::*;
        hotel.find(id).first::<Hotel>(conn).optional()
    })
    .await?;

    match found {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Err(ApiError::NotFoundError("Hotel not found".to_string())),
    }
}

#[post("/hotels")]
async fn create_hotel(
    pool: web::Data<DbPool>,
    user: AuthUser,
    payload: web::Json<NewHotel>,
) -> Result<HttpResponse, ApiError> {
    policy::require_staff(&user)?;

    let new_hotel = NewHotel {
        user_id: user.user_id,
        ..payload.into_inner()
    };

    let created = db::run(&pool, move |conn| {
        use crate::schema::hotel::dsl::*;
        diesel::insert_into(hotel)
            .values(&new_hotel)
            .get_result::<Hotel>(conn)
    })
    .await?;

    info!("User {} created hotel {}", user.user_id, created.hotel_id);
    Ok(HttpResponse::Created().json(created))
}

#[put("/hotels/{id}")]
async fn update_hotel(
    pool: web::Data<DbPool>,
    user: AuthUser,
    path: web::Path<i32>,
    payload: web::Json<UpdateHotel>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let existing = db::run(&pool, move |conn| {
        use crate::schema::hotel::dsl::*;
        hotel.find(id).first::<Hotel>(conn).optional()
    })
    .await?
    .ok_or_else(|| ApiError::NotFoundError("Hotel not found".to_string()))?;

    policy::authorize_mutation(&user, existing.user_id)?;

    let changes = payload.into_inner();
    if changes.is_noop() {
        return Ok(HttpResponse::Ok().json(existing));
    }

    let updated = db::run(&pool, move |conn| {
        use crate::schema::hotel::dsl::*;
        diesel::update(hotel.find(id))
            .set(&changes)
            .get_result::<Hotel>(conn)
    })
    .await?;

    info!("User {} updated hotel {}", user.user_id, id);
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/hotels/{id}")]
async fn delete_hotel(
    pool: web::Data<DbPool>,
    user: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let existing = db::run(&pool, move |conn| {
        use crate::schema::hotel::dsl::*;
        hotel.find(id).first::<Hotel>(conn).optional()
    })
    .await?
    .ok_or_else(|| ApiError::NotFoundError("Hotel not found".to_string()))?;

    policy::authorize_mutation(&user, existing.user_id)?;

    db::run(&pool, move |conn| {
        use crate::schema::hotel::dsl::*;
        diesel::delete(hotel.find(id)).execute(conn)
    })
    .await?;

    info!("User {} deleted hotel {}", user.user_id, id);
    Ok(HttpResponse::Ok().json(json!({ "message": "Hotel deleted successfully" })))
}
