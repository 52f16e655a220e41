use actix_web::{HttpRequest, Responder, post, web};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use common::{
    error::Res,
    http::{Envelope, Success},
    jwt::maybe_jwt_claims,
};
use gateway::{GenerateInput, TextGateway};

use crate::dtos::NatalChartRequest;
use crate::prompts::{self, NATAL_SYSTEM};
use crate::services::persist::save_reading_background;
use crate::zodiac::sign_for_date;

/// Ungated. Monetization for birth-chart work lives in astrocartography.
#[post("/natal-chart")]
async fn post_natal_chart(
    req: HttpRequest,
    body: web::Json<NatalChartRequest>,
    pool: web::Data<Arc<PgPool>>,
    text_gateway: web::Data<TextGateway>,
) -> Res<impl Responder> {
    let body = body.into_inner();
    let sun_sign = sign_for_date(body.birth_date);

    let prompt = prompts::natal_prompt(
        sun_sign,
        body.birth_date,
        body.birth_time.as_deref(),
        body.birth_place.as_deref(),
    );
    let text = text_gateway
        .generate(NATAL_SYSTEM, GenerateInput::Prompt(prompt), None)
        .await?;

    let claims = maybe_jwt_claims(&req);
    if let Some(claims) = &claims {
        let pg_pool: &PgPool = &**pool;
        save_reading_background(
            pg_pool.clone(),
            claims.id,
            "natal_chart",
            json!({
                "birth_date": body.birth_date,
                "sun_sign": sun_sign.as_str(),
                "response": text,
            }),
        );
    }

    Success::ok(Envelope::text(text).with_extra(json!({ "sunSign": sun_sign.as_str() })))
}
