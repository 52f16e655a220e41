use chrono::NaiveDate;
use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::models::horoscope::HoroscopeCacheEntry;

pub async fn get_cached<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    sign: &str,
    period: &str,
    cache_date: NaiveDate,
) -> Res<Option<HoroscopeCacheEntry>> {
    sqlx::query_as::<_, HoroscopeCacheEntry>(
        "SELECT * FROM cache_horoscopes WHERE sign = $1 AND period = $2 AND cache_date = $3",
    )
    .bind(sign)
    .bind(period)
    .bind(cache_date)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

/// Upsert on the (sign, period, date) key. Two racing cache-misses both
/// generate; the later write wins. Duplicate work, not a correctness bug.
pub async fn save<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    sign: &str,
    period: &str,
    cache_date: NaiveDate,
    prediction: &str,
    affirmation: Option<&str>,
    lucky_number: Option<i32>,
) -> Res<HoroscopeCacheEntry> {
    sqlx::query_as::<_, HoroscopeCacheEntry>(
        r#"
        INSERT INTO cache_horoscopes (sign, period, cache_date, prediction, affirmation, lucky_number)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (sign, period, cache_date) DO UPDATE
        SET prediction = EXCLUDED.prediction,
            affirmation = EXCLUDED.affirmation,
            lucky_number = EXCLUDED.lucky_number
        RETURNING *
        "#,
    )
    .bind(sign)
    .bind(period)
    .bind(cache_date)
    .bind(prediction)
    .bind(affirmation)
    .bind(lucky_number)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}
