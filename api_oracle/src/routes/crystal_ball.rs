use actix_web::{HttpRequest, Responder, post, web};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use common::{
    error::{AppError, Res},
    http::{Envelope, Success},
    jwt::maybe_jwt_claims,
};
use gateway::{GenerateInput, TextGateway};

use crate::dtos::CrystalBallRequest;
use crate::prompts::CRYSTAL_BALL_SYSTEM;
use crate::services::{context::build_context, persist::save_reading_background};

/// Ungated; auth is optional and only adds profile context plus journal
/// persistence. The client applies its own cooldown between questions.
#[post("/crystal-ball")]
async fn post_crystal_ball(
    req: HttpRequest,
    body: web::Json<CrystalBallRequest>,
    pool: web::Data<Arc<PgPool>>,
    text_gateway: web::Data<TextGateway>,
) -> Res<impl Responder> {
    let question = body.question.trim().to_string();
    if question.is_empty() {
        return Err(AppError::BadRequest("A question is required".to_string()));
    }

    let claims = maybe_jwt_claims(&req);
    let pg_pool: &PgPool = &**pool;
    let context = build_context(pg_pool, claims.as_ref()).await;

    let text = text_gateway
        .generate(
            CRYSTAL_BALL_SYSTEM,
            GenerateInput::Prompt(question.clone()),
            Some(&context),
        )
        .await?;

    if let Some(claims) = &claims {
        save_reading_background(
            pg_pool.clone(),
            claims.id,
            "crystal_ball",
            json!({ "question": question, "response": text }),
        );
    }

    Success::ok(Envelope::text(text))
}
