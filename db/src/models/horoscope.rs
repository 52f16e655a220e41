use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One generated horoscope, reused by every caller asking for the same
/// (sign, period) on the same calendar date.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct HoroscopeCacheEntry {
    pub id: Uuid,
    pub sign: String,
    pub period: String,
    pub cache_date: NaiveDate,
    pub prediction: String,
    pub affirmation: Option<String>,
    pub lucky_number: Option<i32>,
    pub created_at: NaiveDateTime,
}
