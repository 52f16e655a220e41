use actix_web::{Responder, get, web};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use common::{error::Res, http::Success, jwt::JwtClaims};

/// The caller's current subscription. Users without a row are reported as
/// the free tier rather than a 404.
#[get("/current")]
async fn get_current(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let subscription = db::subscription::get_subscription(pg_pool, claims.id).await?;

    match subscription {
        Some(sub) => {
            let is_premium = sub.is_premium();
            Success::ok(json!({
                "plan_type": sub.plan_type,
                "status": sub.status,
                "current_period_end": sub.current_period_end,
                "credits": sub.credits,
                "is_premium": is_premium,
            }))
        }
        None => Success::ok(json!({
            "plan_type": "free",
            "status": "inactive",
            "current_period_end": null,
            "credits": 0,
            "is_premium": false,
        })),
    }
}
