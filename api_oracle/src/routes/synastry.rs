use actix_web::{HttpRequest, Responder, post, web};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use common::{
    env_config::Config,
    error::Res,
    http::{Envelope, Success},
    jwt::maybe_jwt_claims,
};
use gate::{Decision, Feature};
use gateway::{GenerateInput, TextGateway};

use crate::dtos::SynastryRequest;
use crate::prompts::{self, SYNASTRY_SYSTEM, SYNASTRY_TEASER};
use crate::services::persist::save_reading_background;
use crate::synastry::compatibility;
use crate::zodiac::ZodiacSign;

/// Soft gated. The numeric overall score is always computed locally and
/// shown; the detailed sub-scores and AI narrative are premium.
#[post("/synastry")]
async fn post_synastry(
    req: HttpRequest,
    body: web::Json<SynastryRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
    text_gateway: web::Data<TextGateway>,
) -> Res<impl Responder> {
    let first = ZodiacSign::from_str(&body.first_sign)?;
    let second = ZodiacSign::from_str(&body.second_sign)?;
    let scores = compatibility(first, second);

    let claims = maybe_jwt_claims(&req);
    let pg_pool: &PgPool = &**pool;
    let (decision, _access) =
        gate::apply(Feature::Synastry, pg_pool, claims.as_ref(), &config.admin_emails).await?;

    match decision {
        Decision::Full => {
            let prompt = prompts::synastry_prompt(first, second, &scores);
            let text = text_gateway
                .generate(SYNASTRY_SYSTEM, GenerateInput::Prompt(prompt), None)
                .await?;

            if let Some(claims) = &claims {
                save_reading_background(
                    pg_pool.clone(),
                    claims.id,
                    "synastry",
                    json!({
                        "signs": [first.as_str(), second.as_str()],
                        "overall": scores.overall,
                        "response": text,
                    }),
                );
            }

            Success::ok(Envelope::text(text).with_extra(json!({ "scores": scores })))
        }
        Decision::Teaser => Success::ok(
            Envelope::text(SYNASTRY_TEASER)
                .teaser()
                .with_extra(json!({
                    "overall": scores.overall,
                    "unlock": "Upgrade to premium for the full synastry report",
                })),
        ),
    }
}
