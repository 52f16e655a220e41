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
use gate::{Decision, Feature};
use gateway::{GenerateInput, TextGateway};

use crate::dtos::{CardReveal, TarotRequest};
use crate::prompts::{self, TAROT_SYSTEM};
use crate::services::{context::build_context, persist::save_reading_background};
use crate::tarot::{Card, card_by_name};

const MAX_SPREAD_SIZE: usize = 10; // Celtic cross

/// Single-card pulls are free. Spreads are soft gated: non-premium callers
/// get the first card's table meaning and locked placeholders for the rest,
/// without any gateway call. The one-free-spread-per-day sample is tracked
/// client-side.
#[post("/tarot")]
async fn post_tarot(
    req: HttpRequest,
    body: web::Json<TarotRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
    text_gateway: web::Data<TextGateway>,
) -> Res<impl Responder> {
    let body = body.into_inner();
    if body.cards.is_empty() {
        return Err(AppError::BadRequest("At least one card is required".to_string()));
    }
    if body.cards.len() > MAX_SPREAD_SIZE {
        return Err(AppError::BadRequest(format!(
            "A spread has at most {} cards",
            MAX_SPREAD_SIZE
        )));
    }

    let cards: Vec<&'static Card> = body
        .cards
        .iter()
        .map(|name| {
            card_by_name(name)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown card: {}", name)))
        })
        .collect::<Res<_>>()?;

    let feature = if cards.len() == 1 {
        Feature::TarotSingle
    } else {
        Feature::TarotSpread
    };

    let claims = maybe_jwt_claims(&req);
    let pg_pool: &PgPool = &**pool;
    let (decision, _access) =
        gate::apply(feature, pg_pool, claims.as_ref(), &config.admin_emails).await?;

    match decision {
        Decision::Full => {
            let context = build_context(pg_pool, claims.as_ref()).await;
            let prompt = prompts::tarot_prompt(&cards, body.question.as_deref());
            let text = text_gateway
                .generate(TAROT_SYSTEM, GenerateInput::Prompt(prompt), Some(&context))
                .await?;

            let reveals: Vec<CardReveal> = cards
                .iter()
                .map(|card| CardReveal {
                    name: card.name.clone(),
                    meaning: Some(card.upright.clone()),
                    locked: false,
                })
                .collect();

            if let Some(claims) = &claims {
                save_reading_background(
                    pg_pool.clone(),
                    claims.id,
                    "tarot",
                    json!({
                        "cards": body.cards,
                        "question": body.question,
                        "response": text,
                    }),
                );
            }

            Success::ok(Envelope::text(text).with_extra(json!({ "cards": reveals })))
        }
        Decision::Teaser => {
            let first = cards[0];
            let reveals: Vec<CardReveal> = cards
                .iter()
                .enumerate()
                .map(|(position, card)| CardReveal {
                    name: card.name.clone(),
                    meaning: (position == 0).then(|| card.upright.clone()),
                    locked: position != 0,
                })
                .collect();

            let text = format!(
                "Your first card is {}. It speaks of {}. The remaining cards \
                 hold the rest of the story.",
                first.name, first.upright
            );

            Success::ok(
                Envelope::text(text)
                    .teaser()
                    .with_extra(json!({ "cards": reveals })),
            )
        }
    }
}
