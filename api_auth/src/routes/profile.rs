use actix_web::{HttpRequest, Responder, get, put, web};
use common::error::Res;
use common::http::Success;
use common::jwt::require_jwt_claims;
use db::dtos::user::ProfileUpdateRequest;
use sqlx::PgPool;
use std::sync::Arc;

use crate::dtos::auth::{ProfileResponse, ProfileUpdateBody};

/// Current user's profile plus their live subscription row.
#[get("/profile")]
async fn get_profile(
    req: HttpRequest,
    pool: web::Data<Arc<sqlx::PgPool>>,
) -> Res<impl Responder> {
    let claims = require_jwt_claims(&req)?;
    let pg_pool: &PgPool = &**pool;

    let user = db::user::get_user_by_id(pg_pool, claims.id).await?;
    let subscription = db::subscription::get_subscription(pg_pool, claims.id).await?;

    Success::ok(ProfileResponse { user, subscription })
}

/// Updates profile fields (name, birth data). Omitted fields keep their
/// current value.
#[put("/profile")]
async fn put_profile(
    req: HttpRequest,
    body: web::Json<ProfileUpdateBody>,
    pool: web::Data<Arc<sqlx::PgPool>>,
) -> Res<impl Responder> {
    let claims = require_jwt_claims(&req)?;
    let pg_pool: &PgPool = &**pool;
    let body = body.into_inner();

    let user = db::user::update_profile(
        pg_pool,
        claims.id,
        ProfileUpdateRequest {
            name: body.name,
            birth_date: body.birth_date,
            birth_time: body.birth_time,
            birth_place: body.birth_place,
        },
    )
    .await?;

    Success::ok(user)
}
