use std::{future::Future, pin::Pin, rc::Rc};

use actix_web::{
    Error, web,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use chrono::Utc;
use common::error::AppError;
use redis::AsyncCommands;

/// Fixed-window per-IP rate limiting middleware. One Redis counter per
/// (scope, ip, minute); the window key carries the minute so counters
/// expire naturally.
pub struct WindowLimiter {
    scope: String,
    limit_per_minute: u32,
}

impl WindowLimiter {
    pub fn new(scope: &str, limit_per_minute: u32) -> Self {
        WindowLimiter {
            scope: scope.to_string(),
            limit_per_minute,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for WindowLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = WindowLimiterService<S>;
    type InitError = ();
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(WindowLimiterService {
            service: Rc::new(service),
            scope: self.scope.clone(),
            limit_per_minute: self.limit_per_minute,
        }))
    }
}

pub struct WindowLimiterService<S> {
    service: Rc<S>,
    scope: String,
    limit_per_minute: u32,
}

impl<S, B> Service<ServiceRequest> for WindowLimiterService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = Rc::clone(&self.service);
        let scope = self.scope.clone();
        let limit = self.limit_per_minute;

        let ip = req
            .connection_info()
            .realip_remote_addr()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());

        Box::pin(async move {
            let redis_pool = match req.app_data::<web::Data<deadpool_redis::Pool>>() {
                Some(pool) => pool.clone(),
                None => {
                    log::error!("Redis pool not registered, skipping rate limit");
                    return srv.call(req).await.map(|res| res.map_into_boxed_body());
                }
            };

            let mut redis_conn = match redis_pool.get().await {
                Ok(conn) => conn,
                Err(e) => {
                    // Fail open: losing the limiter is better than losing the API.
                    log::error!("Failed to get Redis connection for rate limit: {}", e);
                    return srv.call(req).await.map(|res| res.map_into_boxed_body());
                }
            };

            let window = Utc::now().format("%Y%m%d%H%M").to_string();
            let key = format!("ratelimit:{}:{}:{}", scope, ip, window);

            let count: Result<u64, redis::RedisError> = redis_conn.incr(&key, 1).await;
            match count {
                Ok(count) => {
                    if count == 1 {
                        let _: Result<(), redis::RedisError> =
                            redis_conn.expire(&key, 60).await;
                    }
                    if count > limit as u64 {
                        return Ok(req.error_response(AppError::TooManyRequests(format!(
                            "Rate limit exceeded for {}. Try again in a minute.",
                            scope
                        ))));
                    }
                }
                Err(e) => {
                    log::error!("Redis error incrementing rate limit counter: {}", e);
                }
            }

            srv.call(req).await.map(|res| res.map_into_boxed_body())
        })
    }
}
