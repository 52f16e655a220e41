use actix_web::{Responder, post, web};
use common::env_config::Config;
use common::error::{AppError, Res};
use common::http::Success;
use common::jwt::{self, ClaimsSpec};
use sqlx::PgPool;
use std::sync::Arc;

use crate::dtos::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::services;

/// Registers a new user with email and password authentication.
///
/// # Input
/// - `req`: JSON payload containing registration information (email, password, optional name)
///
/// # Output
/// - Success: Returns the created user object with 201 Created status
/// - Error: Returns 400 Bad Request if the email already exists or the
///   payload fails validation
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/auth/register', {
///   method: 'POST',
///   headers: { 'Content-Type': 'application/json' },
///   body: JSON.stringify({
///     email: 'user@example.com',
///     password: 'securepassword',
///     name: 'Luna' // Optional
///   })
/// });
/// ```
#[post("/register")]
async fn post_register(
    req: web::Json<RegisterRequest>,
    pool: web::Data<Arc<sqlx::PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;

    if !req.email.contains('@') {
        return Err(AppError::BadRequest("A valid email is required".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let email_exists = services::user::exists_by_email(pg_pool, &req.email).await?;
    if email_exists {
        return Err(AppError::BadRequest(
            "An account with this email already exists".to_string(),
        ));
    }

    let user = services::user::create_user_with_credentials(pg_pool, &req.into_inner()).await?;
    Success::created(user)
}

/// Authenticates a user with email and password.
///
/// Returns a JWT whose claims carry the user's id, email and the
/// subscription tier at login time. The tier string is a UI hint; premium
/// gates re-check the database on every request.
///
/// # Output
/// - Success: Returns an auth response with JWT token and user details
/// - Error: Returns 401 Unauthorized for invalid credentials
#[post("/login")]
pub async fn post_login(
    login_data: web::Json<LoginRequest>,
    config: web::Data<Arc<Config>>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let user = services::auth::authenticate_user(pg_pool, &login_data.into_inner()).await?;

    let subscription_status = db::subscription::get_subscription(pg_pool, user.id)
        .await?
        .map(|sub| sub.plan_type)
        .unwrap_or_else(|| "free".to_string());

    let token = jwt::generate_jwt(
        ClaimsSpec {
            id: user.id,
            email: user.email.clone(),
            subscription_status,
        },
        &config.jwt_config,
    )?;
    Success::ok(AuthResponse { token, user })
}
