use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

/// Idempotent subscribe; repeat signups are not an error.
pub async fn subscribe<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<()> {
    sqlx::query(
        "INSERT INTO newsletter_subscribers (email) VALUES ($1) ON CONFLICT (email) DO NOTHING",
    )
    .bind(email)
    .execute(executor)
    .await
    .map_err(AppError::from)?;
    Ok(())
}
