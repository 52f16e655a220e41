use actix_web::HttpResponse;
use serde_json::json;
use thiserror::Error;

pub type Res<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    // === CONVERSION ERRORS ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JWT error: {0}")]
    JWT(#[from] jsonwebtoken::errors::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Stripe error: {0}")]
    Stripe(#[from] stripe::StripeError),

    // === APPLICATION ERRORS ===
    #[error("Authorization error: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Too Many Requests: {0}")]
    TooManyRequests(String),

    #[error("Premium subscription required")]
    PremiumRequired { current_plan: Option<String> },

    #[error("The stars are silent right now. Please try again in a moment.")]
    ServiceUnavailable,

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn to_http_response(&self) -> HttpResponse {
        let is_dev = cfg!(debug_assertions);

        let to_internal_json = |err_msg: &str| {
            if is_dev {
                json!({ "success": false, "error": err_msg })
            } else {
                json!({ "success": false, "error": "Internal server error" })
            }
        };

        match self {
            // === CONVERSION ERRORS ===
            AppError::Database(error) => {
                log::error!("Database error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }
            AppError::JWT(error) => {
                log::error!("JWT error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }
            AppError::Reqwest(error) => {
                log::error!("Reqwest error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }
            AppError::Stripe(error) => {
                log::error!("Stripe error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }

            // === APPLICATION ERRORS ===
            AppError::Unauthorized(_) => HttpResponse::Unauthorized()
                .json(json!({ "success": false, "error": self.to_string() })),
            AppError::Forbidden(_) => HttpResponse::Forbidden()
                .json(json!({ "success": false, "error": self.to_string() })),
            AppError::NotFound(_) => HttpResponse::NotFound()
                .json(json!({ "success": false, "error": self.to_string() })),
            AppError::BadRequest(_) => HttpResponse::BadRequest()
                .json(json!({ "success": false, "error": self.to_string() })),
            AppError::TooManyRequests(_) => HttpResponse::TooManyRequests()
                .json(json!({ "success": false, "error": self.to_string() })),

            // Machine-readable upsell signal. `currentPlan` lets the client
            // distinguish "no subscription" from "insufficient/expired plan".
            AppError::PremiumRequired { current_plan } => {
                let mut body = json!({
                    "success": false,
                    "error": self.to_string(),
                    "code": "PREMIUM_REQUIRED",
                });
                if let Some(plan) = current_plan {
                    body["currentPlan"] = json!(plan);
                }
                HttpResponse::PaymentRequired().json(body)
            }

            AppError::ServiceUnavailable => HttpResponse::ServiceUnavailable()
                .json(json!({ "success": false, "error": self.to_string() })),

            AppError::Internal(error) => {
                log::error!("Internal error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        self.to_http_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    #[test]
    fn premium_required_renders_402() {
        let err = AppError::PremiumRequired {
            current_plan: Some("free".to_string()),
        };
        assert_eq!(err.error_response().status(), StatusCode::PAYMENT_REQUIRED);
    }

    #[test]
    fn service_unavailable_renders_503() {
        let err = AppError::ServiceUnavailable;
        assert_eq!(
            err.error_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn unauthorized_and_forbidden_are_distinct() {
        let missing = AppError::Unauthorized("No authorization token provided".to_string());
        let invalid = AppError::Forbidden("Invalid or expired token".to_string());
        assert_eq!(missing.error_response().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(invalid.error_response().status(), StatusCode::FORBIDDEN);
    }
}
