use actix_web::web::{self};

pub mod routes {
    pub mod pay;
    pub mod sub;
}

pub mod services {
    pub mod pay;
}

mod dtos {
    pub(crate) mod pay;
}

mod misc {
    pub(crate) mod pay;
}

/// Checkout and subscription routes; mounted behind the auth guard.
pub fn mount_subs() -> actix_web::Scope {
    web::scope("/subs")
        .service(routes::pay::post_checkout)
        .service(routes::sub::get_current)
}

/// The Stripe webhook; mounted outside `/api` on the raw body.
pub fn mount_webhook() -> actix_web::Scope {
    web::scope("/webhook").service(routes::pay::post_webhook)
}
