use actix_web::{Responder, delete, get, post, web};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use common::{
    error::{AppError, Res},
    http::Success,
    jwt::JwtClaims,
};

const JOURNAL_PAGE_SIZE: i64 = 50;

/// The user's saved readings, newest first.
#[get("")]
async fn get_readings(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let readings = db::reading::list_readings(pg_pool, claims.id, JOURNAL_PAGE_SIZE).await?;
    Success::ok(readings)
}

#[delete("/{id}")]
async fn delete_reading(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let deleted = db::reading::delete_reading(pg_pool, claims.id, path.into_inner()).await?;
    if !deleted {
        return Err(AppError::NotFound("Reading not found".to_string()));
    }
    Success::ok(json!({ "success": true }))
}

#[post("/{id}/favorite")]
async fn post_favorite(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let reading = db::reading::toggle_favorite(pg_pool, claims.id, path.into_inner()).await?;
    Success::ok(reading)
}
