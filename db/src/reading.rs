use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{dtos::reading::ReadingCreateRequest, models::reading::Reading};

pub async fn insert_reading<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: ReadingCreateRequest,
) -> Res<Reading> {
    sqlx::query_as::<_, Reading>(
        r#"
        INSERT INTO readings (user_id, reading_type, payload)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.reading_type)
    .bind(data.payload)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn list_readings<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    limit: i64,
) -> Res<Vec<Reading>> {
    sqlx::query_as::<_, Reading>(
        "SELECT * FROM readings WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn delete_reading<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    reading_id: Uuid,
) -> Res<bool> {
    let result = sqlx::query("DELETE FROM readings WHERE id = $1 AND user_id = $2")
        .bind(reading_id)
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn toggle_favorite<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    reading_id: Uuid,
) -> Res<Reading> {
    sqlx::query_as::<_, Reading>(
        r#"
        UPDATE readings SET favorite = NOT favorite
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(reading_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await?
    .ok_or_else(|| AppError::NotFound("Reading not found".to_string()))
}
