use actix_web::{HttpRequest, Responder, post, web};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use common::{
    error::Res,
    http::{Envelope, Success},
    jwt::maybe_jwt_claims,
};
use gateway::TextGateway;

use crate::dtos::NumerologyRequest;
use crate::numerology::life_path_number;
use crate::prompts::{self, NUMEROLOGY_SYSTEM};
use crate::services::horoscope::cached_or_generate_keyed;
use crate::services::persist::save_reading_background;

/// Cache-or-generate keyed on the life path number: everyone sharing a
/// number on the same day reads the same interpretation verbatim.
#[post("/numerology")]
async fn post_numerology(
    req: HttpRequest,
    body: web::Json<NumerologyRequest>,
    pool: web::Data<Arc<PgPool>>,
    text_gateway: web::Data<TextGateway>,
) -> Res<impl Responder> {
    let life_path = life_path_number(body.birth_date);
    let cache_key = format!("lifepath_{}", life_path);

    let pg_pool: &PgPool = &**pool;
    let (text, cached) = cached_or_generate_keyed(
        pg_pool,
        &text_gateway,
        &cache_key,
        "numerology",
        NUMEROLOGY_SYSTEM,
        prompts::numerology_prompt(life_path, body.birth_date),
    )
    .await?;

    let claims = maybe_jwt_claims(&req);
    if let Some(claims) = &claims {
        save_reading_background(
            pg_pool.clone(),
            claims.id,
            "numerology",
            json!({
                "birth_date": body.birth_date,
                "life_path": life_path,
                "response": text,
            }),
        );
    }

    Success::ok(
        Envelope::text(text)
            .cached(cached)
            .with_extra(json!({ "lifePathNumber": life_path })),
    )
}
