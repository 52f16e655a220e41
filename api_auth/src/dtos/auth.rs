use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use db::models::{subscription::Subscription, user::User};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct ProfileUpdateBody {
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub birth_time: Option<String>,
    pub birth_place: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: User,
    /// The live subscription row; `None` means the free tier.
    pub subscription: Option<Subscription>,
}

#[derive(Debug, Deserialize)]
pub struct NewsletterRequest {
    pub email: String,
}
