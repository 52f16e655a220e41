use actix_web::{HttpRequest, Responder, post, web};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use common::{
    env_config::Config,
    error::{AppError, Res},
    http::{Envelope, Success},
    jwt::maybe_jwt_claims,
};
use gate::Feature;
use gateway::{GenerateInput, TextGateway};

use crate::dtos::AstrocartographyRequest;
use crate::prompts::{self, ASTROCARTOGRAPHY_SYSTEM};
use crate::services::persist::save_reading_background;
use crate::zodiac::sign_for_date;

/// Hard gated: the gate rejects non-premium callers before any prompt is
/// built or gateway call attempted.
#[post("/astrocartography")]
async fn post_astrocartography(
    req: HttpRequest,
    body: web::Json<AstrocartographyRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
    text_gateway: web::Data<TextGateway>,
) -> Res<impl Responder> {
    let body = body.into_inner();
    if body.birth_place.trim().is_empty() {
        return Err(AppError::BadRequest("A birth place is required".to_string()));
    }

    let claims = maybe_jwt_claims(&req);
    let pg_pool: &PgPool = &**pool;
    gate::apply(
        Feature::Astrocartography,
        pg_pool,
        claims.as_ref(),
        &config.admin_emails,
    )
    .await?;

    let sun_sign = sign_for_date(body.birth_date);
    let prompt = prompts::astrocartography_prompt(
        sun_sign,
        body.birth_place.trim(),
        body.destination.as_deref(),
    );
    let text = text_gateway
        .generate(ASTROCARTOGRAPHY_SYSTEM, GenerateInput::Prompt(prompt), None)
        .await?;

    if let Some(claims) = &claims {
        save_reading_background(
            pg_pool.clone(),
            claims.id,
            "astrocartography",
            json!({
                "birth_place": body.birth_place,
                "destination": body.destination,
                "response": text,
            }),
        );
    }

    Success::ok(Envelope::text(text))
}
