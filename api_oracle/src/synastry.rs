use serde::Serialize;

use crate::zodiac::{Element, ZodiacSign};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SynastryScores {
    pub overall: u32,
    pub emotional: u32,
    pub communication: u32,
    pub long_term: u32,
}

/// Classical element affinity: same element resonates, fire/air and
/// earth/water feed each other, the rest pull in different directions.
fn element_affinity(a: Element, b: Element) -> u32 {
    use Element::*;
    if a == b {
        return 40;
    }
    match (a, b) {
        (Fire, Air) | (Air, Fire) | (Earth, Water) | (Water, Earth) => 34,
        _ => 12,
    }
}

/// Deterministic compatibility scores for a pair of signs. Symmetric by
/// construction; the AI narrative is layered on top of these numbers, it
/// never produces them.
pub fn compatibility(a: ZodiacSign, b: ZodiacSign) -> SynastryScores {
    let element = element_affinity(a.element(), b.element());
    let modality = if a.modality() == b.modality() { 12 } else { 20 };
    let same_sign_bonus = if a == b { 10 } else { 0 };

    let overall = (30 + element + modality + same_sign_bonus).min(100);
    let emotional = (element * 2 + 10).min(100);
    let communication = (modality * 4).min(100);
    let long_term = (overall + emotional) / 2;

    SynastryScores {
        overall,
        emotional,
        communication,
        long_term,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zodiac::ALL_SIGNS;

    #[test]
    fn scores_are_symmetric() {
        for a in ALL_SIGNS {
            for b in ALL_SIGNS {
                let ab = compatibility(a, b);
                let ba = compatibility(b, a);
                assert_eq!(ab.overall, ba.overall);
                assert_eq!(ab.emotional, ba.emotional);
                assert_eq!(ab.communication, ba.communication);
                assert_eq!(ab.long_term, ba.long_term);
            }
        }
    }

    #[test]
    fn scores_stay_in_range() {
        for a in ALL_SIGNS {
            for b in ALL_SIGNS {
                let scores = compatibility(a, b);
                for value in [
                    scores.overall,
                    scores.emotional,
                    scores.communication,
                    scores.long_term,
                ] {
                    assert!(value <= 100);
                }
            }
        }
    }

    #[test]
    fn same_sign_scores_highest_overall() {
        let same = compatibility(ZodiacSign::Leo, ZodiacSign::Leo);
        let clash = compatibility(ZodiacSign::Leo, ZodiacSign::Taurus);
        assert!(same.overall > clash.overall);
    }

    #[test]
    fn complementary_elements_beat_clashing_ones() {
        // Leo (fire) with Libra (air) vs Leo with Scorpio (water)
        let friendly = compatibility(ZodiacSign::Leo, ZodiacSign::Libra);
        let tense = compatibility(ZodiacSign::Leo, ZodiacSign::Scorpio);
        assert!(friendly.overall > tense.overall);
    }
}
