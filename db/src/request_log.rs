use common::error::{AppError, Res};
use sqlx::types::ipnetwork::IpNetwork;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

pub struct RequestLogCreate {
    pub user_id: Option<Uuid>,
    pub method: String,
    pub path: String,
    pub status: i16,
    pub ip_address: IpNetwork,
    pub user_agent: Option<String>,
    pub latency_ms: i64,
}

pub async fn insert_request_log<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: RequestLogCreate,
) -> Res<()> {
    sqlx::query(
        r#"
        INSERT INTO request_logs (user_id, method, path, status, ip_address, user_agent, latency_ms)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(data.user_id)
    .bind(data.method)
    .bind(data.path)
    .bind(data.status)
    .bind(data.ip_address)
    .bind(data.user_agent)
    .bind(data.latency_ms)
    .execute(executor)
    .await
    .map_err(AppError::from)?;
    Ok(())
}
