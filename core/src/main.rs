mod cors;
mod redis;

use std::sync::Arc;

use actix_web::{
    App, HttpServer,
    web::{self},
};
use common::env_config::Config;
use gateway::{CircuitBreaker, TextGateway};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();

    let is_production = config.environment == "production";

    // init logger
    if config.console_logging_enabled {
        logger::setup().expect("Failed to set up logger");
    }

    // init db connection
    let pool = db::setup(&config.database_url, is_production)
        .await
        .expect("Failed to set up database");

    // init Stripe
    let stripe_client = common::stripe::create_client(&config.stripe_secret_key);

    // init Redis
    let redis_pool = redis::setup_redis(&config).await;

    // one circuit breaker per process, injected into the AI gateway
    let text_gateway = web::Data::new(TextGateway::new(
        &config.ai,
        Arc::new(CircuitBreaker::default()),
    ));

    HttpServer::new(move || {
        let origins = config_data.allowed_origins.clone();
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config_data.clone()))
            .app_data(web::Data::new(stripe_client.clone()))
            .app_data(web::Data::new(redis_pool.clone()))
            .app_data(text_gateway.clone())
            .wrap(limiter::global_middleware(10)) // max 10 requests per second
            .wrap(logger::middleware()) // 3rd
            .wrap(extractor::middleware()) // 2nd
            .wrap(cors::middleware(&origins)) // 1st
            .service(api_subs::mount_webhook())
            .service(
                web::scope("/api")
                    .service(
                        api_auth::mount_auth()
                            .wrap(limiter::window_middleware("auth", 10)),
                    )
                    .service(api_auth::mount_newsletter())
                    .service(api_subs::mount_subs().wrap(api_auth::auth_middleware()))
                    .service(api_oracle::mount_readings().wrap(api_auth::auth_middleware()))
                    // the oracle scope has an empty prefix, keep it last
                    .service(
                        api_oracle::mount_oracle()
                            .wrap(limiter::window_middleware("oracle", 20)),
                    ),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
