use actix_web::{Responder, post, web};
use common::error::{AppError, Res};
use common::http::Success;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::dtos::auth::NewsletterRequest;

#[post("")]
async fn post_subscribe(
    body: web::Json<NewsletterRequest>,
    pool: web::Data<Arc<sqlx::PgPool>>,
) -> Res<impl Responder> {
    if !body.email.contains('@') {
        return Err(AppError::BadRequest("A valid email is required".to_string()));
    }
    let pg_pool: &PgPool = &**pool;
    db::newsletter::subscribe(pg_pool, &body.email).await?;
    Success::ok(json!({ "success": true }))
}
