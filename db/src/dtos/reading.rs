use uuid::Uuid;

pub struct ReadingCreateRequest {
    pub user_id: Uuid,
    pub reading_type: String,
    pub payload: serde_json::Value,
}
