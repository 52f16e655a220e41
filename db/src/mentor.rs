use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::mentor::MentorMessage;

pub async fn insert_message<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    role: &str,
    content: &str,
) -> Res<MentorMessage> {
    sqlx::query_as::<_, MentorMessage>(
        r#"
        INSERT INTO mentor_messages (user_id, role, content)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(role)
    .bind(content)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Most recent messages first; callers reverse for prompt order.
pub async fn recent_messages<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    limit: i64,
) -> Res<Vec<MentorMessage>> {
    sqlx::query_as::<_, MentorMessage>(
        "SELECT * FROM mentor_messages WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

/// How many messages the user has sent today (UTC), for the free-tier
/// daily quota.
pub async fn count_user_messages_today<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM mentor_messages
        WHERE user_id = $1 AND role = 'user'
          AND created_at >= date_trunc('day', now() AT TIME ZONE 'utc')
        "#,
    )
    .bind(user_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}
