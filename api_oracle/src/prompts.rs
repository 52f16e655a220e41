use chrono::NaiveDate;

use crate::dtos::Period;
use crate::synastry::SynastryScores;
use crate::tarot::Card;
use crate::zodiac::ZodiacSign;

pub const CRYSTAL_BALL_SYSTEM: &str = "You are a mystical crystal ball oracle. \
Answer the seeker's question in two or three evocative sentences. Speak in \
images and omens, never in certainties, and never break character.";

pub const HOROSCOPE_SYSTEM: &str = "You are a seasoned astrologer writing \
horoscopes for a divination site. Write warm, specific guidance covering \
love, work and wellbeing. End with a single line starting exactly with \
'Affirmation:' containing a short affirmation for the period.";

pub const TAROT_SYSTEM: &str = "You are a tarot reader interpreting a spread \
that has already been dealt. Weave the given cards and their positions into \
one coherent reading addressed directly to the seeker.";

pub const NATAL_SYSTEM: &str = "You are an astrologer delivering a natal \
chart reading. Ground every statement in the birth data you are given and \
keep the tone encouraging but honest.";

pub const SYNASTRY_SYSTEM: &str = "You are a relationship astrologer. You are \
given two signs and their computed compatibility scores; write the narrative \
that explains those numbers. Do not invent different scores.";

pub const NUMEROLOGY_SYSTEM: &str = "You are a numerologist. Interpret the \
given life path number for the seeker: its strengths, its shadow side, and \
one piece of practical advice.";

pub const ASTROCARTOGRAPHY_SYSTEM: &str = "You are an astrocartography \
specialist mapping how places shift a person's chart. Describe the energetic \
character of the places asked about and what they favor.";

pub const MENTOR_SYSTEM: &str = "You are a personal spiritual mentor in an \
ongoing conversation. Remember the thread of the dialogue, answer the latest \
message, and keep replies under two hundred words.";

/// Fixed teaser shown to non-premium synastry callers in place of the AI
/// narrative and detailed sub-scores.
pub const SYNASTRY_TEASER: &str = "The stars see a story unfolding between \
you two - currents of attraction, friction and growth that deserve a full \
reading. Unlock the complete synastry report to see your detailed scores \
and what the planets advise.";

/// Canned mentor reply once a free-tier user exhausts the daily quota.
pub const MENTOR_TEASER: &str = "Your mentor has more to say, but the \
connection grows faint... Free guidance renews tomorrow, or upgrade to \
continue the conversation without limits.";

pub fn horoscope_prompt(sign: ZodiacSign, period: Period, date: NaiveDate) -> String {
    format!(
        "Write the {} horoscope for {} for {}.",
        period.as_str(),
        sign.as_str(),
        date.format("%B %-d, %Y")
    )
}

pub fn tarot_prompt(cards: &[&Card], question: Option<&str>) -> String {
    let mut prompt = String::new();
    match question {
        Some(q) => prompt.push_str(&format!("The seeker asks: \"{}\"\n\n", q)),
        None => prompt.push_str("The seeker asks for general guidance.\n\n"),
    }
    prompt.push_str("The spread, in order:\n");
    for (position, card) in cards.iter().enumerate() {
        prompt.push_str(&format!(
            "{}. {} (upright: {})\n",
            position + 1,
            card.name,
            card.upright
        ));
    }
    prompt.push_str("\nInterpret the spread as one reading.");
    prompt
}

pub fn natal_prompt(
    sun_sign: ZodiacSign,
    birth_date: NaiveDate,
    birth_time: Option<&str>,
    birth_place: Option<&str>,
) -> String {
    let mut prompt = format!(
        "Natal reading for someone born {} (sun sign {}).",
        birth_date.format("%B %-d, %Y"),
        sun_sign.as_str()
    );
    if let Some(time) = birth_time {
        prompt.push_str(&format!(" Birth time: {}.", time));
    }
    if let Some(place) = birth_place {
        prompt.push_str(&format!(" Birth place: {}.", place));
    }
    prompt
}

pub fn synastry_prompt(a: ZodiacSign, b: ZodiacSign, scores: &SynastryScores) -> String {
    format!(
        "Compatibility reading for {} and {}. Computed scores: overall {}, \
         emotional {}, communication {}, long-term {}. Explain what these \
         numbers mean for the pair.",
        a.as_str(),
        b.as_str(),
        scores.overall,
        scores.emotional,
        scores.communication,
        scores.long_term
    )
}

pub fn numerology_prompt(life_path: u32, birth_date: NaiveDate) -> String {
    format!(
        "The seeker was born {} and has life path number {}. Interpret it.",
        birth_date.format("%B %-d, %Y"),
        life_path
    )
}

pub fn astrocartography_prompt(
    sun_sign: ZodiacSign,
    birth_place: &str,
    destination: Option<&str>,
) -> String {
    match destination {
        Some(dest) => format!(
            "The seeker ({} sun) was born in {} and is drawn to {}. Describe \
             how that place sits on their astrocartography map.",
            sun_sign.as_str(),
            birth_place,
            dest
        ),
        None => format!(
            "The seeker ({} sun) was born in {}. Name the kinds of places on \
             their astrocartography map that favor love, work and renewal.",
            sun_sign.as_str(),
            birth_place
        ),
    }
}

/// Splits a generated horoscope into prediction and affirmation. The model
/// is instructed to end with an 'Affirmation:' line, but the split tolerates
/// it appearing anywhere (and missing entirely).
pub fn split_affirmation(raw: &str) -> (String, Option<String>) {
    let lower = raw.to_lowercase();
    match lower.rfind("affirmation:") {
        Some(idx) => {
            let prediction = raw[..idx].trim().to_string();
            let affirmation = raw[idx + "affirmation:".len()..].trim().to_string();
            if affirmation.is_empty() {
                (prediction, None)
            } else {
                (prediction, Some(affirmation))
            }
        }
        None => (raw.trim().to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn split_extracts_trailing_affirmation() {
        let raw = "A bright day awaits.\n\nAffirmation: I welcome what comes.";
        let (prediction, affirmation) = split_affirmation(raw);
        assert_eq!(prediction, "A bright day awaits.");
        assert_eq!(affirmation.as_deref(), Some("I welcome what comes."));
    }

    #[test]
    fn split_is_case_insensitive() {
        let (_, affirmation) = split_affirmation("Text. AFFIRMATION: stay open.");
        assert_eq!(affirmation.as_deref(), Some("stay open."));
    }

    #[test]
    fn split_without_marker_keeps_everything() {
        let (prediction, affirmation) = split_affirmation("Just a prediction.");
        assert_eq!(prediction, "Just a prediction.");
        assert_eq!(affirmation, None);
    }

    #[test]
    fn split_with_empty_affirmation_returns_none() {
        let (_, affirmation) = split_affirmation("Prediction.\nAffirmation:   ");
        assert_eq!(affirmation, None);
    }

    #[test]
    fn horoscope_prompt_names_sign_and_period() {
        let prompt = horoscope_prompt(ZodiacSign::Leo, Period::Daily, date());
        assert!(prompt.contains("daily"));
        assert!(prompt.contains("leo"));
    }

    #[test]
    fn tarot_prompt_lists_cards_in_order() {
        let fool = crate::tarot::card_by_name("The Fool").unwrap();
        let sun = crate::tarot::card_by_name("The Sun").unwrap();
        let prompt = tarot_prompt(&[fool, sun], Some("what next?"));
        let fool_pos = prompt.find("1. The Fool").unwrap();
        let sun_pos = prompt.find("2. The Sun").unwrap();
        assert!(fool_pos < sun_pos);
        assert!(prompt.contains("what next?"));
    }

    #[test]
    fn synastry_prompt_carries_computed_scores() {
        let scores = crate::synastry::compatibility(ZodiacSign::Leo, ZodiacSign::Libra);
        let prompt = synastry_prompt(ZodiacSign::Leo, ZodiacSign::Libra, &scores);
        assert!(prompt.contains(&format!("overall {}", scores.overall)));
    }
}
