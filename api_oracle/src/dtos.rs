use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use common::error::{AppError, Res};

/// Horoscope period. Daily is free; weekly and monthly are premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
}

impl Period {
    pub fn from_str(value: &str) -> Res<Self> {
        match value.to_lowercase().as_str() {
            "daily" => Ok(Period::Daily),
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            other => Err(AppError::BadRequest(format!("Invalid period: {}", other))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CrystalBallRequest {
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct HoroscopeRequest {
    pub sign: String,
    /// Defaults to daily when omitted.
    pub period: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TarotRequest {
    /// Cards the client dealt, by name. A non-array value fails
    /// deserialization and is rejected with 400 before anything runs.
    pub cards: Vec<String>,
    pub question: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NatalChartRequest {
    pub birth_date: NaiveDate,
    pub birth_time: Option<String>,
    pub birth_place: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SynastryRequest {
    pub first_sign: String,
    pub second_sign: String,
}

#[derive(Debug, Deserialize)]
pub struct NumerologyRequest {
    pub birth_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct AstrocartographyRequest {
    pub birth_date: NaiveDate,
    pub birth_place: String,
    /// Where the user is thinking of moving; free-form.
    pub destination: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MentorRequest {
    pub message: String,
}

/// One card in a tarot response. Locked cards show no meaning; the client
/// renders them as face-down upsell placeholders.
#[derive(Debug, Serialize)]
pub struct CardReveal {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    pub locked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_parse_round_trip() {
        for p in [Period::Daily, Period::Weekly, Period::Monthly] {
            assert_eq!(Period::from_str(p.as_str()).unwrap(), p);
        }
    }

    #[test]
    fn invalid_period_is_bad_request() {
        assert!(matches!(
            Period::from_str("fortnightly"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn tarot_request_rejects_non_array_cards() {
        let result =
            serde_json::from_str::<TarotRequest>(r#"{ "cards": "The Fool" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn tarot_request_accepts_card_array() {
        let parsed =
            serde_json::from_str::<TarotRequest>(r#"{ "cards": ["The Fool", "The Sun"] }"#)
                .unwrap();
        assert_eq!(parsed.cards.len(), 2);
    }
}
