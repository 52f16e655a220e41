/// How a feature treats non-premium callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePolicy {
    /// Full response for everyone, authenticated or not.
    Ungated,
    /// Reject outright with the payment-required signal.
    Hard,
    /// Always answer, but degrade to a teaser for non-premium callers.
    Soft,
}

/// Every divination feature, one entry per endpoint-level policy decision.
/// Horoscope periods gate differently, so they are distinct features here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    CrystalBall,
    HoroscopeDaily,
    HoroscopeWeekly,
    HoroscopeMonthly,
    TarotSingle,
    TarotSpread,
    NatalChart,
    Astrocartography,
    Synastry,
    Numerology,
    MentorChat,
}

impl Feature {
    /// The single source of truth for premium policy. Handlers consult this
    /// table instead of re-implementing the branch locally.
    pub fn policy(&self) -> GatePolicy {
        match self {
            Feature::CrystalBall => GatePolicy::Ungated,
            Feature::HoroscopeDaily => GatePolicy::Ungated,
            Feature::HoroscopeWeekly => GatePolicy::Hard,
            Feature::HoroscopeMonthly => GatePolicy::Hard,
            Feature::TarotSingle => GatePolicy::Ungated,
            Feature::TarotSpread => GatePolicy::Soft,
            Feature::NatalChart => GatePolicy::Ungated,
            Feature::Astrocartography => GatePolicy::Hard,
            Feature::Synastry => GatePolicy::Soft,
            Feature::Numerology => GatePolicy::Ungated,
            Feature::MentorChat => GatePolicy::Soft,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_table_matches_product_matrix() {
        assert_eq!(Feature::CrystalBall.policy(), GatePolicy::Ungated);
        assert_eq!(Feature::HoroscopeDaily.policy(), GatePolicy::Ungated);
        assert_eq!(Feature::HoroscopeWeekly.policy(), GatePolicy::Hard);
        assert_eq!(Feature::HoroscopeMonthly.policy(), GatePolicy::Hard);
        assert_eq!(Feature::TarotSingle.policy(), GatePolicy::Ungated);
        assert_eq!(Feature::TarotSpread.policy(), GatePolicy::Soft);
        assert_eq!(Feature::NatalChart.policy(), GatePolicy::Ungated);
        assert_eq!(Feature::Astrocartography.policy(), GatePolicy::Hard);
        assert_eq!(Feature::Synastry.policy(), GatePolicy::Soft);
        assert_eq!(Feature::Numerology.policy(), GatePolicy::Ungated);
        assert_eq!(Feature::MentorChat.policy(), GatePolicy::Soft);
    }
}
