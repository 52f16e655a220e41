use chrono::Utc;
use rand::Rng;
use sqlx::PgPool;

use common::error::Res;
use gateway::{GenerateInput, TextGateway};

use crate::dtos::Period;
use crate::prompts::{self, HOROSCOPE_SYSTEM};
use crate::zodiac::ZodiacSign;

pub struct HoroscopeResult {
    pub prediction: String,
    pub affirmation: Option<String>,
    pub lucky_number: i32,
    pub cached: bool,
}

/// Cache-or-generate on the (sign, period, calendar date) key. Every caller
/// asking for the same triple on the same day gets the same text; a miss
/// generates once and persists the split fields.
pub async fn cached_or_generate(
    pool: &PgPool,
    text_gateway: &TextGateway,
    sign: ZodiacSign,
    period: Period,
) -> Res<HoroscopeResult> {
    let today = Utc::now().date_naive();

    if let Some(entry) =
        db::horoscope_cache::get_cached(pool, sign.as_str(), period.as_str(), today).await?
    {
        return Ok(HoroscopeResult {
            prediction: entry.prediction,
            affirmation: entry.affirmation,
            lucky_number: entry.lucky_number.unwrap_or(7),
            cached: true,
        });
    }

    let raw = text_gateway
        .generate(
            HOROSCOPE_SYSTEM,
            GenerateInput::Prompt(prompts::horoscope_prompt(sign, period, today)),
            None,
        )
        .await?;

    let (prediction, affirmation) = prompts::split_affirmation(&raw);
    let lucky_number = rand::thread_rng().gen_range(1..=99);

    let entry = db::horoscope_cache::save(
        pool,
        sign.as_str(),
        period.as_str(),
        today,
        &prediction,
        affirmation.as_deref(),
        Some(lucky_number),
    )
    .await?;

    Ok(HoroscopeResult {
        prediction: entry.prediction,
        affirmation: entry.affirmation,
        lucky_number: entry.lucky_number.unwrap_or(lucky_number),
        cached: false,
    })
}

/// Same cache-or-generate shape for numerology readings, which ride the
/// horoscope cache with a synthetic `lifepath_<n>` key. Returns the text
/// and whether it came from cache.
pub async fn cached_or_generate_keyed(
    pool: &PgPool,
    text_gateway: &TextGateway,
    cache_key: &str,
    period_tag: &str,
    system_instruction: &str,
    prompt: String,
) -> Res<(String, bool)> {
    let today = Utc::now().date_naive();

    if let Some(entry) = db::horoscope_cache::get_cached(pool, cache_key, period_tag, today).await?
    {
        return Ok((entry.prediction, true));
    }

    let text = text_gateway
        .generate(system_instruction, GenerateInput::Prompt(prompt), None)
        .await?;

    db::horoscope_cache::save(pool, cache_key, period_tag, today, &text, None, None).await?;
    Ok((text, false))
}
