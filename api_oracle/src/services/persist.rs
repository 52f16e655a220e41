use sqlx::PgPool;
use uuid::Uuid;

use db::dtos::reading::ReadingCreateRequest;

/// Best-effort journal write. The AI response has already been produced;
/// losing the journal row must never fail the request, so the insert runs
/// detached and failures are only logged.
pub fn save_reading_background(
    pool: PgPool,
    user_id: Uuid,
    reading_type: &str,
    payload: serde_json::Value,
) {
    let reading_type = reading_type.to_string();
    tokio::spawn(async move {
        let request = ReadingCreateRequest {
            user_id,
            reading_type,
            payload,
        };
        if let Err(e) = db::reading::insert_reading(&pool, request).await {
            log::warn!("Failed to persist reading for {}: {}", user_id, e);
        }
    });
}
