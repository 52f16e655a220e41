use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use actix_web::{
    Error, web,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures::future::{Ready, ready};
use sqlx::PgPool;
use sqlx::types::ipnetwork::IpNetwork;

use common::jwt::get_jwt_claims_or_error;
use db::request_log::{RequestLogCreate, insert_request_log};

/// Request journaling middleware: one console line per request plus a
/// write-behind row in `request_logs`. The DB write is best-effort and
/// never delays or fails the response.
pub struct LoggerMiddleware {}

impl LoggerMiddleware {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for LoggerMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for LoggerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = LoggerMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoggerMiddlewareService {
            service: Arc::new(service),
        }))
    }
}

pub struct LoggerMiddlewareService<S> {
    service: Arc<S>,
}

impl<S, B> Service<ServiceRequest> for LoggerMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let method = req.method().to_string();
        let path = req.path().to_string();

        let ip_str = req
            .connection_info()
            .realip_remote_addr()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        let ip_address = IpNetwork::from_str(&ip_str)
            .unwrap_or_else(|_| IpNetwork::from_str("0.0.0.0").unwrap());

        let user_agent = req
            .headers()
            .get("User-Agent")
            .and_then(|ua| ua.to_str().ok())
            .map(|ua| ua.to_string());

        let pool = req.app_data::<web::Data<Arc<PgPool>>>().cloned();
        let srv = Arc::clone(&self.service);
        let start = Instant::now();

        Box::pin(async move {
            let user_id = get_jwt_claims_or_error(&req).ok().map(|claims| claims.id);

            let res = srv.call(req).await?;

            let status = res.status().as_u16() as i16;
            let latency_ms = start.elapsed().as_millis() as i64;
            log::info!("{} {} -> {} ({}ms)", method, path, status, latency_ms);

            if let Some(pool) = pool {
                let entry = RequestLogCreate {
                    user_id,
                    method,
                    path,
                    status,
                    ip_address,
                    user_agent,
                    latency_ms,
                };
                tokio::spawn(async move {
                    if let Err(e) = insert_request_log(&**pool, entry).await {
                        log::warn!("Failed to persist request log: {}", e);
                    }
                });
            }

            Ok(res.map_into_boxed_body())
        })
    }
}
