use actix_web::{HttpMessage, HttpRequest, HttpResponse, dev::ServiceRequest};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    env_config::JwtConfig,
    error::{AppError, Res},
};

/// Token payload. `subscription_status` is the tier at login time and is a
/// display hint only: gates always re-read the subscription row.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JwtClaims {
    pub id: Uuid,
    pub email: String,
    pub subscription_status: String,
    pub exp: usize,
}

pub struct ClaimsSpec {
    pub id: Uuid,
    pub email: String,
    pub subscription_status: String,
}

/// Generates JWT token based on user object and JWT configuration options
pub fn generate_jwt(spec: ClaimsSpec, config: &JwtConfig) -> Res<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::days(config.expiration_days))
        .expect("valid timestamp")
        .timestamp();

    let claims = JwtClaims {
        id: spec.id,
        email: spec.email,
        subscription_status: spec.subscription_status,
        exp: expiration as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(AppError::from)
}

/// Extracts claims object from JWT token.
/// Requires JWT secret.
pub fn validate_jwt(token: &str, secret: &str) -> Res<JwtClaims> {
    let token_data = jsonwebtoken::decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

pub fn get_jwt_claims_or_error(req: &ServiceRequest) -> Result<JwtClaims, HttpResponse> {
    if let Some(jwt_claims_res) = req.extensions().get::<Res<JwtClaims>>() {
        match jwt_claims_res {
            Ok(claims) => Ok(claims.clone()),
            Err(app_error) => Err(app_error.to_http_response()),
        }
    } else {
        Err(
            AppError::Unauthorized("No authorization token provided".to_string())
                .to_http_response(),
        )
    }
}

/// Claims for handlers where authentication is optional. A missing or
/// invalid token is simply `None` rather than an error.
pub fn maybe_jwt_claims(req: &HttpRequest) -> Option<JwtClaims> {
    req.extensions()
        .get::<Res<JwtClaims>>()
        .and_then(|res| res.as_ref().ok().cloned())
}

/// Claims for handlers that require authentication. Distinguishes a missing
/// token (401) from one that failed verification (403).
pub fn require_jwt_claims(req: &HttpRequest) -> Res<JwtClaims> {
    match req.extensions().get::<Res<JwtClaims>>() {
        Some(Ok(claims)) => Ok(claims.clone()),
        Some(Err(_)) => Err(AppError::Forbidden("Invalid or expired token".to_string())),
        None => Err(AppError::Unauthorized(
            "No authorization token provided".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expiration_days: 30,
        }
    }

    fn spec() -> ClaimsSpec {
        ClaimsSpec {
            id: Uuid::new_v4(),
            email: "seer@example.com".to_string(),
            subscription_status: "premium_monthly".to_string(),
        }
    }

    #[test]
    fn round_trip_preserves_claims() {
        let config = test_config();
        let spec = spec();
        let id = spec.id;

        let token = generate_jwt(spec, &config).unwrap();
        let claims = validate_jwt(&token, &config.secret).unwrap();

        assert_eq!(claims.id, id);
        assert_eq!(claims.email, "seer@example.com");
        assert_eq!(claims.subscription_status, "premium_monthly");
    }

    #[test]
    fn rejects_wrong_secret() {
        let config = test_config();
        let token = generate_jwt(spec(), &config).unwrap();
        assert!(validate_jwt(&token, "other-secret").is_err());
    }

    #[test]
    fn rejects_tampered_token() {
        let config = test_config();
        let mut token = generate_jwt(spec(), &config).unwrap();
        token.push('x');
        assert!(validate_jwt(&token, &config.secret).is_err());
    }
}
