use actix_web::web;

use middleware::auth::AuthMiddleware;

pub mod middleware {
    pub mod auth;
}

pub mod routes {
    pub mod auth;
    pub mod newsletter;
    pub mod profile;
}

mod services {
    pub(crate) mod auth;
    pub(crate) mod user;
}

mod dtos {
    pub(crate) mod auth;
}

/// Guard for scopes that require a verified bearer token.
pub fn auth_middleware() -> AuthMiddleware {
    AuthMiddleware::new()
}

pub fn mount_auth() -> actix_web::Scope {
    web::scope("/auth")
        .service(routes::auth::post_register)
        .service(routes::auth::post_login)
        .service(routes::profile::get_profile)
        .service(routes::profile::put_profile)
}

pub fn mount_newsletter() -> actix_web::Scope {
    web::scope("/newsletter").service(routes::newsletter::post_subscribe)
}
