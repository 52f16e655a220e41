use actix_web::{HttpRequest, Responder, post, web};
use sqlx::PgPool;
use std::sync::Arc;
use stripe::CustomerId;

use common::{
    env_config::Config,
    error::{AppError, Res},
    http::Success,
    jwt::JwtClaims,
    plans::PlanType,
};

use crate::dtos::pay::{CheckoutRequest, CheckoutResponse};
use crate::services;

/// Starts a subscription purchase: maps the plan id to a checkout session
/// and returns the provider-hosted URL to redirect the user to.
#[post("/checkout")]
async fn post_checkout(
    claims: web::ReqData<JwtClaims>,
    body: web::Json<CheckoutRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
    stripe_client: web::Data<stripe::Client>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let plan = PlanType::from_str(&body.plan_id)?;

    let user = db::user::get_user_by_id(pg_pool, claims.id).await?;
    let customer_id: CustomerId = match &user.stripe_customer_id {
        Some(id) => id
            .parse()
            .map_err(|e| AppError::Internal(format!("Stored customer id is invalid: {}", e)))?,
        None => {
            let customer = common::stripe::create_customer(
                &stripe_client,
                &user.email,
                user.name.as_deref(),
            )
            .await?;
            db::user::set_stripe_customer_id(pg_pool, user.id, customer.id.to_string()).await?;
            customer.id
        }
    };

    let session = services::pay::create_checkout_session(
        &stripe_client,
        customer_id,
        user.id,
        plan,
        &config.app_url,
    )
    .await?;

    let url = session
        .url
        .ok_or_else(|| AppError::Internal("Checkout session has no URL".to_string()))?;
    Success::ok(CheckoutResponse { url })
}

/// Stripe webhook endpoint. Consumes the raw body (signature verification
/// requires the exact bytes) plus the `Stripe-Signature` header; events
/// that fail verification are rejected before any state is touched.
#[post("/stripe")]
async fn post_webhook(
    req: HttpRequest,
    payload: web::Bytes,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let signature = req
        .headers()
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("Missing Stripe-Signature header".to_string()))?;

    let payload_str = std::str::from_utf8(&payload)
        .map_err(|_| AppError::BadRequest("Webhook payload is not valid UTF-8".to_string()))?;

    let event =
        services::pay::construct_event(payload_str, signature, &config.stripe_webhook_secret)?;

    let pg_pool: &PgPool = &**pool;
    services::pay::apply_webhook_event(pg_pool, event).await?;

    Success::ok(serde_json::json!({ "received": true }))
}
