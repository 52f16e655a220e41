use std::sync::OnceLock;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arcana {
    Major,
    Minor,
}

#[derive(Debug, Clone, Serialize)]
pub struct Card {
    pub name: String,
    pub arcana: Arcana,
    pub upright: String,
    pub reversed: String,
}

const MAJOR_ARCANA: [(&str, &str, &str); 22] = [
    ("The Fool", "new beginnings, spontaneity, a leap of faith", "recklessness, hesitation, fear of the unknown"),
    ("The Magician", "willpower, skill, manifestation", "manipulation, untapped talent, illusion"),
    ("The High Priestess", "intuition, hidden knowledge, stillness", "secrets withheld, disconnection from instinct"),
    ("The Empress", "abundance, nurture, creativity", "dependence, creative block, smothering"),
    ("The Emperor", "structure, authority, stability", "rigidity, domination, lack of discipline"),
    ("The Hierophant", "tradition, guidance, shared belief", "rebellion, dogma, breaking convention"),
    ("The Lovers", "union, alignment, a meaningful choice", "disharmony, imbalance, avoidance of choice"),
    ("The Chariot", "determination, victory, directed will", "scattered force, loss of control"),
    ("Strength", "quiet courage, compassion, resilience", "self-doubt, raw emotion, weakness of resolve"),
    ("The Hermit", "introspection, solitude, inner guidance", "isolation, withdrawal, lost direction"),
    ("Wheel of Fortune", "cycles, destiny, a turning point", "resistance to change, bad luck, interruption"),
    ("Justice", "fairness, truth, cause and effect", "dishonesty, imbalance, avoidance of accountability"),
    ("The Hanged Man", "surrender, new perspective, pause", "stalling, indecision, needless sacrifice"),
    ("Death", "transformation, endings, release", "clinging to the past, stagnation"),
    ("Temperance", "balance, moderation, patience", "excess, impatience, discord"),
    ("The Devil", "attachment, temptation, restriction", "release, reclaiming power, breaking chains"),
    ("The Tower", "sudden upheaval, revelation, collapse", "averted disaster, fear of change, lingering ruin"),
    ("The Star", "hope, renewal, serenity", "despair, faithlessness, discouragement"),
    ("The Moon", "illusion, dreams, the subconscious", "clarity emerging, confusion lifting, fear exposed"),
    ("The Sun", "joy, vitality, success", "dimmed optimism, delayed happiness"),
    ("Judgement", "awakening, reckoning, absolution", "self-doubt, harsh judgement, refusal of the call"),
    ("The World", "completion, integration, fulfilment", "incompletion, loose ends, delayed closure"),
];

const SUITS: [(&str, &str); 4] = [
    ("Wands", "creative fire and ambition"),
    ("Cups", "emotion and relationship"),
    ("Swords", "intellect and conflict"),
    ("Pentacles", "material work and security"),
];

const RANKS: [(&str, &str, &str); 14] = [
    ("Ace", "a seed of pure potential", "potential delayed or squandered"),
    ("Two", "a balance or choice forming", "imbalance, avoidance of the choice"),
    ("Three", "first fruits of collaboration", "friction in shared effort"),
    ("Four", "consolidation and rest", "restlessness, clinging to comfort"),
    ("Five", "disruption and contest", "recovery from loss, lessons accepted"),
    ("Six", "harmony restored, generosity", "one-sidedness, nostalgia that binds"),
    ("Seven", "assessment and perseverance", "doubt, shortcuts, wavering effort"),
    ("Eight", "skilled movement and progress", "haste or stagnation out of fear"),
    ("Nine", "near-completion, resilience", "burden carried too long"),
    ("Ten", "culmination of the suit's journey", "an ending resisted or overdrawn"),
    ("Page", "a curious messenger, study", "immaturity, scattered attention"),
    ("Knight", "driven pursuit of the suit's aim", "obsession or stalled momentum"),
    ("Queen", "inward mastery of the suit", "self-absorption, guarded feeling"),
    ("King", "outward mastery of the suit", "misused authority, rigidity"),
];

fn build_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(78);

    for (name, upright, reversed) in MAJOR_ARCANA {
        deck.push(Card {
            name: name.to_string(),
            arcana: Arcana::Major,
            upright: upright.to_string(),
            reversed: reversed.to_string(),
        });
    }

    for (suit, theme) in SUITS {
        for (rank, upright, reversed) in RANKS {
            deck.push(Card {
                name: format!("{} of {}", rank, suit),
                arcana: Arcana::Minor,
                upright: format!("{} in the realm of {}", upright, theme),
                reversed: format!("{} in the realm of {}", reversed, theme),
            });
        }
    }

    deck
}

/// The full 78-card deck, built once.
pub fn deck() -> &'static [Card] {
    static DECK: OnceLock<Vec<Card>> = OnceLock::new();
    DECK.get_or_init(build_deck)
}

/// Case-insensitive lookup by card name.
pub fn card_by_name(name: &str) -> Option<&'static Card> {
    let wanted = name.trim().to_lowercase();
    deck().iter().find(|card| card.name.to_lowercase() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_has_seventy_eight_cards() {
        assert_eq!(deck().len(), 78);
        assert_eq!(
            deck().iter().filter(|c| c.arcana == Arcana::Major).count(),
            22
        );
        assert_eq!(
            deck().iter().filter(|c| c.arcana == Arcana::Minor).count(),
            56
        );
    }

    #[test]
    fn card_names_are_unique() {
        let mut names: Vec<_> = deck().iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 78);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(card_by_name("the fool").is_some());
        assert!(card_by_name("ACE OF WANDS").is_some());
        assert!(card_by_name("  The Tower  ").is_some());
    }

    #[test]
    fn unknown_card_is_none() {
        assert!(card_by_name("The Jester").is_none());
    }

    #[test]
    fn every_card_has_both_meanings() {
        for card in deck() {
            assert!(!card.upright.is_empty(), "{} has no upright text", card.name);
            assert!(!card.reversed.is_empty(), "{} has no reversed text", card.name);
        }
    }
}
