use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved journal entry: one past divination result.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Reading {
    pub id: Uuid,
    pub user_id: Uuid,
    pub reading_type: String,
    pub payload: serde_json::Value,
    pub favorite: bool,
    pub created_at: NaiveDateTime,
}
