use actix_web::{HttpRequest, Responder, post, web};
use sqlx::PgPool;
use std::sync::Arc;

use common::{
    env_config::Config,
    error::{AppError, Res},
    http::{Envelope, Success},
    jwt::require_jwt_claims,
};
use gate::{Decision, Feature};
use gateway::{GenerateInput, Role, TextGateway, Turn};

use crate::prompts::{MENTOR_SYSTEM, MENTOR_TEASER};
use crate::dtos::MentorRequest;
use crate::services::context::build_context;

/// Free-tier daily message allowance; the client tracks its own counter,
/// this is the server-side backstop.
const FREE_MESSAGES_PER_DAY: i64 = 3;

/// How many past messages feed the conversation context.
const HISTORY_LIMIT: i64 = 20;

/// Soft gated chat with a per-day quota for the free tier. Over quota the
/// handler returns the canned teaser without touching the gateway or the
/// message log.
#[post("/mentor")]
async fn post_mentor(
    req: HttpRequest,
    body: web::Json<MentorRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
    text_gateway: web::Data<TextGateway>,
) -> Res<impl Responder> {
    let message = body.message.trim().to_string();
    if message.is_empty() {
        return Err(AppError::BadRequest("A message is required".to_string()));
    }

    let claims = require_jwt_claims(&req)?;
    let pg_pool: &PgPool = &**pool;
    let (decision, _access) = gate::apply(
        Feature::MentorChat,
        pg_pool,
        Some(&claims),
        &config.admin_emails,
    )
    .await?;

    if decision == Decision::Teaser {
        let sent_today = db::mentor::count_user_messages_today(pg_pool, claims.id).await?;
        if sent_today >= FREE_MESSAGES_PER_DAY {
            return Success::ok(Envelope::text(MENTOR_TEASER).teaser());
        }
    }

    // The user's message is part of the conversation record, so this write
    // is synchronous; only the mentor's reply is persisted write-behind.
    db::mentor::insert_message(pg_pool, claims.id, "user", &message).await?;

    let mut recent = db::mentor::recent_messages(pg_pool, claims.id, HISTORY_LIMIT).await?;
    recent.reverse();
    let turns: Vec<Turn> = recent
        .into_iter()
        .map(|msg| Turn {
            role: if msg.role == "mentor" {
                Role::Mentor
            } else {
                Role::User
            },
            content: msg.content,
        })
        .collect();

    let context = build_context(pg_pool, Some(&claims)).await;
    let reply = text_gateway
        .generate(MENTOR_SYSTEM, GenerateInput::History(turns), Some(&context))
        .await?;

    let pool_for_save = pg_pool.clone();
    let user_id = claims.id;
    let reply_for_save = reply.clone();
    tokio::spawn(async move {
        if let Err(e) =
            db::mentor::insert_message(&pool_for_save, user_id, "mentor", &reply_for_save).await
        {
            log::warn!("Failed to persist mentor reply for {}: {}", user_id, e);
        }
    });

    Success::ok(Envelope::text(reply))
}
