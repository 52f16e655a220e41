use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use common::error::{AppError, Res};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

pub const ALL_SIGNS: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    pub fn from_str(value: &str) -> Res<Self> {
        match value.to_lowercase().as_str() {
            "aries" => Ok(ZodiacSign::Aries),
            "taurus" => Ok(ZodiacSign::Taurus),
            "gemini" => Ok(ZodiacSign::Gemini),
            "cancer" => Ok(ZodiacSign::Cancer),
            "leo" => Ok(ZodiacSign::Leo),
            "virgo" => Ok(ZodiacSign::Virgo),
            "libra" => Ok(ZodiacSign::Libra),
            "scorpio" => Ok(ZodiacSign::Scorpio),
            "sagittarius" => Ok(ZodiacSign::Sagittarius),
            "capricorn" => Ok(ZodiacSign::Capricorn),
            "aquarius" => Ok(ZodiacSign::Aquarius),
            "pisces" => Ok(ZodiacSign::Pisces),
            other => Err(AppError::BadRequest(format!("Unknown zodiac sign: {}", other))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "aries",
            ZodiacSign::Taurus => "taurus",
            ZodiacSign::Gemini => "gemini",
            ZodiacSign::Cancer => "cancer",
            ZodiacSign::Leo => "leo",
            ZodiacSign::Virgo => "virgo",
            ZodiacSign::Libra => "libra",
            ZodiacSign::Scorpio => "scorpio",
            ZodiacSign::Sagittarius => "sagittarius",
            ZodiacSign::Capricorn => "capricorn",
            ZodiacSign::Aquarius => "aquarius",
            ZodiacSign::Pisces => "pisces",
        }
    }

    pub fn element(&self) -> Element {
        match self {
            ZodiacSign::Aries | ZodiacSign::Leo | ZodiacSign::Sagittarius => Element::Fire,
            ZodiacSign::Taurus | ZodiacSign::Virgo | ZodiacSign::Capricorn => Element::Earth,
            ZodiacSign::Gemini | ZodiacSign::Libra | ZodiacSign::Aquarius => Element::Air,
            ZodiacSign::Cancer | ZodiacSign::Scorpio | ZodiacSign::Pisces => Element::Water,
        }
    }

    pub fn modality(&self) -> Modality {
        match self {
            ZodiacSign::Aries | ZodiacSign::Cancer | ZodiacSign::Libra | ZodiacSign::Capricorn => {
                Modality::Cardinal
            }
            ZodiacSign::Taurus | ZodiacSign::Leo | ZodiacSign::Scorpio | ZodiacSign::Aquarius => {
                Modality::Fixed
            }
            ZodiacSign::Gemini
            | ZodiacSign::Virgo
            | ZodiacSign::Sagittarius
            | ZodiacSign::Pisces => Modality::Mutable,
        }
    }
}

/// Tropical zodiac date ranges. Boundary days follow the common Western
/// convention (Aries starts March 21).
pub fn sign_for_date(date: NaiveDate) -> ZodiacSign {
    match (date.month(), date.day()) {
        (3, 21..) | (4, ..=19) => ZodiacSign::Aries,
        (4, 20..) | (5, ..=20) => ZodiacSign::Taurus,
        (5, 21..) | (6, ..=20) => ZodiacSign::Gemini,
        (6, 21..) | (7, ..=22) => ZodiacSign::Cancer,
        (7, 23..) | (8, ..=22) => ZodiacSign::Leo,
        (8, 23..) | (9, ..=22) => ZodiacSign::Virgo,
        (9, 23..) | (10, ..=22) => ZodiacSign::Libra,
        (10, 23..) | (11, ..=21) => ZodiacSign::Scorpio,
        (11, 22..) | (12, ..=21) => ZodiacSign::Sagittarius,
        (12, 22..) | (1, ..=19) => ZodiacSign::Capricorn,
        (1, 20..) | (2, ..=18) => ZodiacSign::Aquarius,
        _ => ZodiacSign::Pisces,
    }
}

/// Approximate moon phase for a date, good enough for prompt flavor.
/// Counts days from a known new moon (2000-01-06) modulo the synodic month.
pub fn moon_phase(date: NaiveDate) -> &'static str {
    let epoch = NaiveDate::from_ymd_opt(2000, 1, 6).expect("valid epoch");
    let days = (date - epoch).num_days() as f64;
    let age = days.rem_euclid(29.530_588);

    match age {
        a if a < 1.85 => "New Moon",
        a if a < 5.54 => "Waxing Crescent",
        a if a < 9.23 => "First Quarter",
        a if a < 12.92 => "Waxing Gibbous",
        a if a < 16.61 => "Full Moon",
        a if a < 20.30 => "Waning Gibbous",
        a if a < 23.99 => "Last Quarter",
        a if a < 27.68 => "Waning Crescent",
        _ => "New Moon",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sign_boundaries() {
        assert_eq!(sign_for_date(date(1990, 3, 20)), ZodiacSign::Pisces);
        assert_eq!(sign_for_date(date(1990, 3, 21)), ZodiacSign::Aries);
        assert_eq!(sign_for_date(date(1990, 4, 19)), ZodiacSign::Aries);
        assert_eq!(sign_for_date(date(1990, 4, 20)), ZodiacSign::Taurus);
        assert_eq!(sign_for_date(date(1990, 12, 21)), ZodiacSign::Sagittarius);
        assert_eq!(sign_for_date(date(1990, 12, 22)), ZodiacSign::Capricorn);
        assert_eq!(sign_for_date(date(1991, 1, 19)), ZodiacSign::Capricorn);
        assert_eq!(sign_for_date(date(1991, 1, 20)), ZodiacSign::Aquarius);
    }

    #[test]
    fn sign_parse_round_trip() {
        for sign in ALL_SIGNS {
            assert_eq!(ZodiacSign::from_str(sign.as_str()).unwrap(), sign);
        }
    }

    #[test]
    fn sign_parse_is_case_insensitive() {
        assert_eq!(ZodiacSign::from_str("Leo").unwrap(), ZodiacSign::Leo);
        assert_eq!(ZodiacSign::from_str("SCORPIO").unwrap(), ZodiacSign::Scorpio);
    }

    #[test]
    fn unknown_sign_is_rejected() {
        assert!(ZodiacSign::from_str("ophiuchus").is_err());
    }

    #[test]
    fn every_element_has_three_signs() {
        for element in [Element::Fire, Element::Earth, Element::Air, Element::Water] {
            let count = ALL_SIGNS.iter().filter(|s| s.element() == element).count();
            assert_eq!(count, 3);
        }
    }

    #[test]
    fn every_modality_has_four_signs() {
        for modality in [Modality::Cardinal, Modality::Fixed, Modality::Mutable] {
            let count = ALL_SIGNS.iter().filter(|s| s.modality() == modality).count();
            assert_eq!(count, 4);
        }
    }

    #[test]
    fn known_full_moon_date() {
        // 2000-01-21 was a full moon, ~15 days after the epoch new moon
        assert_eq!(moon_phase(date(2000, 1, 21)), "Full Moon");
    }

    #[test]
    fn epoch_is_a_new_moon() {
        assert_eq!(moon_phase(date(2000, 1, 6)), "New Moon");
    }

    #[test]
    fn moon_phase_handles_dates_before_epoch() {
        // must not panic on negative day counts
        let _ = moon_phase(date(1970, 1, 1));
    }
}
