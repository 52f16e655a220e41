use actix_web::web;

pub mod dtos;
pub mod numerology;
pub mod prompts;
pub mod synastry;
pub mod tarot;
pub mod zodiac;

pub mod routes {
    pub mod astrocartography;
    pub mod crystal_ball;
    pub mod horoscope;
    pub mod mentor;
    pub mod natal;
    pub mod numerology;
    pub mod readings;
    pub mod synastry;
    pub mod tarot;
}

mod services {
    pub(crate) mod context;
    pub(crate) mod horoscope;
    pub(crate) mod persist;
}

/// Every divination endpoint: `POST /api/<feature>`. Mounted last inside
/// the `/api` scope since its own prefix is empty.
pub fn mount_oracle() -> actix_web::Scope {
    web::scope("")
        .service(routes::crystal_ball::post_crystal_ball)
        .service(routes::horoscope::post_horoscope)
        .service(routes::tarot::post_tarot)
        .service(routes::natal::post_natal_chart)
        .service(routes::synastry::post_synastry)
        .service(routes::numerology::post_numerology)
        .service(routes::astrocartography::post_astrocartography)
        .service(routes::mentor::post_mentor)
}

/// The readings journal; mounted behind the auth guard.
pub fn mount_readings() -> actix_web::Scope {
    web::scope("/readings")
        .service(routes::readings::get_readings)
        .service(routes::readings::delete_reading)
        .service(routes::readings::post_favorite)
}
