use std::collections::HashMap;

use chrono::{Months, Utc};
use sqlx::PgPool;
use stripe::{
    CheckoutSession, CheckoutSessionMode, Client, CreateCheckoutSession, Currency, CustomerId,
    Event, EventObject, EventType, Expandable, Webhook,
};
use uuid::Uuid;

use common::{
    error::{AppError, Res},
    plans::{PlanType, plan_offer},
};

use crate::misc::pay::recurring_for_plan;

/// Creates a subscription checkout session for a user. The user id and
/// resolved plan type ride in session metadata so the webhook can
/// reconcile the purchase without any extra lookups.
pub async fn create_checkout_session(
    client: &Client,
    customer_id: CustomerId,
    user_id: Uuid,
    plan: PlanType,
    app_url: &str,
) -> Res<CheckoutSession> {
    let offer = plan_offer(plan)?;
    let success_url = format!("{}/premium/success?session_id={{CHECKOUT_SESSION_ID}}", app_url);
    let cancel_url = format!("{}/premium", app_url);

    let mut metadata = HashMap::new();
    metadata.insert("userId".to_string(), user_id.to_string());
    metadata.insert("planType".to_string(), plan.as_str().to_string());

    let params = CreateCheckoutSession {
        payment_method_types: Some(vec![stripe::CreateCheckoutSessionPaymentMethodTypes::Card]),
        line_items: Some(vec![stripe::CreateCheckoutSessionLineItems {
            price_data: Some(stripe::CreateCheckoutSessionLineItemsPriceData {
                currency: Currency::USD,
                product_data: Some(stripe::CreateCheckoutSessionLineItemsPriceDataProductData {
                    name: offer.display_name.to_string(),
                    ..Default::default()
                }),
                recurring: Some(recurring_for_plan(plan)),
                unit_amount: Some(offer.unit_amount_cents),
                ..Default::default()
            }),
            quantity: Some(1),
            ..Default::default()
        }]),
        mode: Some(CheckoutSessionMode::Subscription),
        success_url: Some(success_url.as_str()),
        cancel_url: Some(cancel_url.as_str()),
        customer: Some(customer_id),
        metadata: Some(metadata),
        ..Default::default()
    };
    CheckoutSession::create(client, params)
        .await
        .map_err(AppError::from)
}

/// Creates an event for the webhook based on the request payload and signature.
/// Requires a webhook secret key.
pub fn construct_event(payload: &str, signature: &str, webhook_secret: &str) -> Res<Event> {
    match Webhook::construct_event(payload, signature, webhook_secret) {
        Ok(event) => Ok(event),
        Err(e) => {
            log::error!("Error constructing webhook event: {}", e);
            Err(AppError::BadRequest(format!("Webhook Error: {}", e)))
        }
    }
}

/// Applies a verified webhook event to subscription state. Only called
/// after signature verification succeeds.
pub async fn apply_webhook_event(pool: &PgPool, event: Event) -> Res<()> {
    log::info!("Processing webhook event: {}", event.type_);

    match event.type_ {
        EventType::CheckoutSessionCompleted => {
            if let EventObject::CheckoutSession(session) = event.data.object {
                let metadata = session.metadata.clone().unwrap_or_default();

                let user_id = metadata
                    .get("userId")
                    .and_then(|raw| Uuid::parse_str(raw).ok())
                    .ok_or_else(|| {
                        AppError::BadRequest(
                            "Checkout session has no usable userId metadata".to_string(),
                        )
                    })?;
                let plan = metadata
                    .get("planType")
                    .map(|raw| PlanType::from_str(raw))
                    .transpose()?
                    .ok_or_else(|| {
                        AppError::BadRequest(
                            "Checkout session has no planType metadata".to_string(),
                        )
                    })?;

                let period_end = Utc::now() + Months::new(plan.period_months());
                db::subscription::upsert_active_subscription(
                    pool,
                    user_id,
                    plan.as_str(),
                    period_end.naive_utc(),
                )
                .await?;
                log::info!(
                    "Checkout completed: user {} now on {} until {}",
                    user_id,
                    plan.as_str(),
                    period_end
                );
            }
        }
        EventType::CustomerSubscriptionDeleted => {
            if let EventObject::Subscription(subscription) = event.data.object {
                let customer_id = match &subscription.customer {
                    Expandable::Id(id) => id.to_string(),
                    Expandable::Object(customer) => customer.id.to_string(),
                };
                if let Some(user) =
                    db::user::get_user_by_stripe_customer_id(pool, customer_id.clone()).await?
                {
                    db::subscription::mark_subscription_inactive(pool, user.id).await?;
                    log::info!("Subscription cancelled for user {}", user.id);
                } else {
                    log::warn!(
                        "Subscription deleted for unknown Stripe customer {}",
                        customer_id
                    );
                }
            }
        }
        EventType::PaymentIntentSucceeded => {
            if let EventObject::PaymentIntent(payment_intent) = event.data.object {
                log::info!("PaymentIntent was successful: {}", payment_intent.id);
            }
        }
        _ => {
            log::info!("Unhandled event type: {}", event.type_);
        }
    }

    Ok(())
}
