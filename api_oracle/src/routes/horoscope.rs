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
use gate::Feature;
use gateway::TextGateway;

use crate::dtos::{HoroscopeRequest, Period};
use crate::services::horoscope::cached_or_generate;
use crate::services::persist::save_reading_background;
use crate::zodiac::ZodiacSign;

/// Daily horoscopes are free and cache-backed; weekly and monthly are hard
/// gated, so the gate rejects before any cache or gateway work happens.
#[post("/horoscope")]
async fn post_horoscope(
    req: HttpRequest,
    body: web::Json<HoroscopeRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
    text_gateway: web::Data<TextGateway>,
) -> Res<impl Responder> {
    let sign = ZodiacSign::from_str(&body.sign)?;
    let period = match &body.period {
        Some(raw) => Period::from_str(raw)?,
        None => Period::Daily,
    };

    let feature = match period {
        Period::Daily => Feature::HoroscopeDaily,
        Period::Weekly => Feature::HoroscopeWeekly,
        Period::Monthly => Feature::HoroscopeMonthly,
    };

    let claims = maybe_jwt_claims(&req);
    let pg_pool: &PgPool = &**pool;
    gate::apply(feature, pg_pool, claims.as_ref(), &config.admin_emails).await?;

    let result = cached_or_generate(pg_pool, &text_gateway, sign, period).await?;

    if let Some(claims) = &claims {
        save_reading_background(
            pg_pool.clone(),
            claims.id,
            "horoscope",
            json!({
                "sign": sign.as_str(),
                "period": period.as_str(),
                "prediction": result.prediction,
            }),
        );
    }

    Success::ok(
        Envelope::text(result.prediction)
            .cached(result.cached)
            .with_extra(json!({
                "affirmation": result.affirmation,
                "luckyNumber": result.lucky_number,
            })),
    )
}
