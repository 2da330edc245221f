use actix_web::{delete, get, post, put, web, HttpResponse};
use diesel::prelude::*;
use log::{debug, info};
use serde_json::json;

use crate::db::{self, DbPool};
use crate::errors::ApiError;
use crate::extractors::AuthUser;
use crate::models::{
    NewViewPoint, OwnerFilter, UpdateViewPoint, ViewPoint, ViewPointDetail, ViewPointImage,
};
use crate::policy;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_viewpoints)
        .service(get_viewpoint)
        .service(create_viewpoint)
        .service(update_viewpoint)
        .service(delete_viewpoint);
}

#[get("/viewpoints")]
async fn list_viewpoints(
    pool: web::Data<DbPool>,
    filter: web::Query<OwnerFilter>,
) -> Result<HttpResponse, ApiError> {
    let owner = filter.user_id;
    let viewpoints = db::run(&pool, move |conn| {
        use crate::schema::view_point::dsl::*;
        match owner {
            Some(owner_id) => view_point
                .filter(user_id.eq(owner_id))
                .load::<ViewPoint>(conn),
            None => view_point.load::<ViewPoint>(conn),
        }
    })
    .await?;

    debug!("Listed {} viewpoints", viewpoints.len());
    Ok(HttpResponse::Ok().json(viewpoints))
}

// Get-one also returns the attachment images for the view point
#[get("/viewpoints/{id}")]
async fn get_viewpoint(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let found = db::run(&pool, move |conn| {
        use crate::schema::view_point::dsl as vp;
        use crate::schema::view_point_image::dsl as vpi;

        let record = vp::view_point.find(id).first::<ViewPoint>(conn).optional()?;
        match record {
            Some(record) => {
                let images = vpi::view_point_image
                    .filter(vpi::view_point_id.eq(id))
                    .load::<ViewPointImage>(conn)?;
                Ok(Some((record, images)))
            }
            None => Ok(None),
        }
    })
    .await?;

    match found {
        Some((view_point, images)) => Ok(HttpResponse::Ok().json(ViewPointDetail {
            view_point,
            images,
        })),
        None => Err(ApiError::NotFoundError("ViewPoint not found".to_string())),
    }
}

#[post("/viewpoints")]
async fn create_viewpoint(
    pool: web::Data<DbPool>,
    user: AuthUser,
    payload: web::Json<NewViewPoint>,
) -> Result<HttpResponse, ApiError> {
    policy::require_staff(&user)?;

    let new_viewpoint = NewViewPoint {
        user_id: user.user_id,
        ..payload.into_inner()
    };

    let created = db::run(&pool, move |conn| {
        use crate::schema::view_point::dsl::*;
        diesel::insert_into(view_point)
            .values(&new_viewpoint)
            .get_result::<ViewPoint>(conn)
    })
    .await?;

    info!(
        "User {} created viewpoint {}",
        user.user_id, created.view_point_id
    );
    Ok(HttpResponse::Created().json(created))
}

#[put("/viewpoints/{id}")]
async fn update_viewpoint(
    pool: web::Data<DbPool>,
    user: AuthUser,
    path: web::Path<i32>,
    payload: web::Json<UpdateViewPoint>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let existing = db::run(&pool, move |conn| {
        use crate::schema::view_point::dsl::*;
        view_point.find(id).first::<ViewPoint>(conn).optional()
    })
    .await?
    .ok_or_else(|| ApiError::NotFoundError("ViewPoint not found".to_string()))?;

    policy::authorize_mutation(&user, existing.user_id)?;

    let changes = payload.into_inner();
    if changes.is_noop() {
        return Ok(HttpResponse::Ok().json(existing));
    }

    let updated = db::run(&pool, move |conn| {
        use crate::schema::view_point::dsl::*;
        diesel::update(view_point.find(id))
            .set(&changes)
            .get_result::<ViewPoint>(conn)
    })
    .await?;

    info!("User {} updated viewpoint {}", user.user_id, id);
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/viewpoints/{id}")]
async fn delete_viewpoint(
    pool: web::Data<DbPool>,
    user: AuthUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let existing = db::run(&pool, move |conn| {
        use crate::schema::view_point::dsl::*;
        view_point.find(id).first::<ViewPoint>(conn).optional()
    })
    .await?
    .ok_or_else(|| ApiError::NotFoundError("ViewPoint not found".to_string()))?;

    policy::authorize_mutation(&user, existing.user_id)?;

    db::run(&pool, move |conn| {
        use crate::schema::view_point::dsl::*;
        diesel::delete(view_point.find(id)).execute(conn)
    })
    .await?;

    info!("User {} deleted viewpoint {}", user.user_id, id);
    Ok(HttpResponse::Ok().json(json!({ "message": "ViewPoint deleted successfully" })))
}
