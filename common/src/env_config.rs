use std::{env, sync::Arc};

#[derive(Clone, Debug)]
/// Configuration struct for the server.
///
/// Holds everything required to initialize and run the server: database and
/// Redis connections, JWT signing, the AI text provider, Stripe credentials,
/// CORS origins and the admin bypass list.
pub struct Config {
    // environment
    pub environment: String, // development or production
    /// The URL of the database to connect to.
    pub database_url: String,
    /// The URL of Redis server to connect to.
    pub redis_url: String,
    /// Configuration for JWT (JSON Web Token) authentication.
    pub jwt_config: JwtConfig,
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// Allowed origins for CORS, comma-separated in `ALLOWED_ORIGINS`.
    pub allowed_origins: Vec<String>,
    /// Emails that bypass the premium gate, comma-separated in `ADMIN_EMAILS`.
    pub admin_emails: Vec<String>,
    /// Public base URL of the web app (checkout redirects).
    pub app_url: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
    /// AI text provider settings.
    pub ai: AiConfig,
    /// Stripe secret key
    pub stripe_secret_key: String,
    /// Stripe webhook secret
    pub stripe_webhook_secret: String,
}

#[derive(Clone, Debug)]
/// Settings for the generative-text provider behind the gateway.
pub struct AiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

#[derive(Clone, Debug)]
/// Configuration for JSON Web Token (JWT) authentication.
pub struct JwtConfig {
    /// The secret key used to sign and verify JWTs.
    pub secret: String,
    /// The expiration time for JWTs in days.
    pub expiration_days: i64,
}

impl JwtConfig {
    /// Creates a new `JwtConfig` instance from environment variables.
    ///
    /// `JWT_SECRET` is required in production and the process refuses to
    /// start without it. In development a placeholder is substituted so the
    /// server can run locally, with a loud warning.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is unset while `ENVIRONMENT=production`, or if
    /// `JWT_EXPIRATION_DAYS` is set but not a valid number.
    pub fn from_env(environment: &str) -> Self {
        dotenvy::dotenv().ok();

        let secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if environment == "production" => {
                panic!("JWT_SECRET must be set in production")
            }
            Err(_) => {
                log::warn!("JWT_SECRET not set, using insecure development secret");
                "insecure-dev-secret".to_string()
            }
        };

        JwtConfig {
            secret,
            expiration_days: env::var("JWT_EXPIRATION_DAYS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("JWT_EXPIRATION_DAYS must be a valid number"),
        }
    }
}

fn csv_list(value: String) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// Required:
    /// - `DATABASE_URL`, `REDIS_URL`
    /// - `JWT_SECRET` (production only, see [`JwtConfig::from_env`])
    /// - `GEMINI_API_KEY` (production only; dev runs warn and produce
    ///   gateway errors on first AI call)
    /// - `STRIPE_WEBHOOK_SECRET` (production only)
    ///
    /// Optional (with defaults): `ENVIRONMENT`, `IP`, `PORT`, `WORKERS`,
    /// `ALLOWED_ORIGINS`, `ADMIN_EMAILS`, `APP_URL`, `ENABLE_CONSOLE_LOGGING`,
    /// `GEMINI_BASE_URL`, `GEMINI_MODEL`, `STRIPE_SECRET_KEY`.
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or a numeric value cannot be
    /// parsed.
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();

        let environment =
            env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let is_production = environment == "production";

        let ai_api_key = match env::var("GEMINI_API_KEY") {
            Ok(key) => key,
            Err(_) if is_production => panic!("GEMINI_API_KEY must be set in production"),
            Err(_) => {
                log::warn!("GEMINI_API_KEY not set, AI calls will fail");
                String::new()
            }
        };

        let stripe_webhook_secret = match env::var("STRIPE_WEBHOOK_SECRET") {
            Ok(secret) => secret,
            Err(_) if is_production => {
                panic!("STRIPE_WEBHOOK_SECRET must be set in production")
            }
            Err(_) => String::new(),
        };

        Arc::new(Config {
            jwt_config: JwtConfig::from_env(&environment),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            redis_url: env::var("REDIS_URL").expect("REDIS_URL must be set"),
            server_host: env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            num_workers: env::var("WORKERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),
            allowed_origins: csv_list(
                env::var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            ),
            admin_emails: csv_list(env::var("ADMIN_EMAILS").unwrap_or_default()),
            app_url: env::var("APP_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            console_logging_enabled: env::var("ENABLE_CONSOLE_LOGGING")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                == "true",
            ai: AiConfig {
                api_key: ai_api_key,
                base_url: env::var("GEMINI_BASE_URL").unwrap_or_else(|_| {
                    "https://generativelanguage.googleapis.com/v1beta".to_string()
                }),
                model: env::var("GEMINI_MODEL")
                    .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            },
            stripe_secret_key: env::var("STRIPE_SECRET_KEY").unwrap_or_default(),
            stripe_webhook_secret,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_list_splits_and_trims() {
        let origins = csv_list("https://a.example, https://b.example ,".to_string());
        assert_eq!(origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn csv_list_empty_input() {
        assert!(csv_list(String::new()).is_empty());
    }
}
