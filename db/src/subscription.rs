use chrono::NaiveDateTime;
use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::subscription::Subscription;

pub async fn get_subscription<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Option<Subscription>> {
    sqlx::query_as::<_, Subscription>("SELECT * FROM subscriptions WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

/// Applies a completed checkout: one row per user, later events overwrite.
pub async fn upsert_active_subscription<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    plan_type: &str,
    current_period_end: NaiveDateTime,
) -> Res<Subscription> {
    sqlx::query_as::<_, Subscription>(
        r#"
        INSERT INTO subscriptions (user_id, plan_type, status, current_period_end, updated_at)
        VALUES ($1, $2, 'active', $3, now())
        ON CONFLICT (user_id) DO UPDATE
        SET plan_type = EXCLUDED.plan_type,
            status = 'active',
            current_period_end = EXCLUDED.current_period_end,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(plan_type)
    .bind(current_period_end)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn mark_subscription_inactive<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<()> {
    sqlx::query("UPDATE subscriptions SET status = 'inactive', updated_at = now() WHERE user_id = $1")
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(())
}
