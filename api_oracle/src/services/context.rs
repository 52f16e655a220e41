use chrono::Utc;
use sqlx::PgPool;

use common::jwt::JwtClaims;
use gateway::PromptContext;

use crate::zodiac::{moon_phase, sign_for_date};

/// App-derived context for the gateway: moon phase always, profile summary
/// and recent readings when the caller is known. Lookups are best-effort;
/// a failed read just means a thinner context.
pub async fn build_context(pool: &PgPool, claims: Option<&JwtClaims>) -> PromptContext {
    let mut context = PromptContext {
        moon_phase: Some(moon_phase(Utc::now().date_naive()).to_string()),
        ..PromptContext::default()
    };

    let Some(claims) = claims else {
        return context;
    };

    match db::user::get_user_by_id(pool, claims.id).await {
        Ok(user) => {
            let mut summary = user.name.unwrap_or_else(|| "anonymous seeker".to_string());
            if let Some(birth_date) = user.birth_date {
                summary.push_str(&format!(
                    ", born {} ({} sun)",
                    birth_date.format("%Y-%m-%d"),
                    sign_for_date(birth_date).as_str()
                ));
            }
            context.profile_summary = Some(summary);
        }
        Err(e) => log::debug!("No profile context for {}: {}", claims.id, e),
    }

    match db::reading::list_readings(pool, claims.id, 3).await {
        Ok(readings) => {
            context.recent_readings = readings
                .into_iter()
                .map(|reading| reading.reading_type)
                .collect();
        }
        Err(e) => log::debug!("No reading context for {}: {}", claims.id, e),
    }

    context
}
