use serde::{Deserialize, Serialize};

use crate::error::{AppError, Res};

/// Subscription tiers sold through checkout. `Free` is the implicit tier of
/// users without a subscription row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    Free,
    PremiumMonthly,
    PremiumYearly,
    PremiumPro,
    ExclusiveMonthly,
    Vip,
}

impl PlanType {
    pub fn from_str(value: &str) -> Res<Self> {
        match value {
            "free" => Ok(PlanType::Free),
            "premium_monthly" => Ok(PlanType::PremiumMonthly),
            "premium_yearly" => Ok(PlanType::PremiumYearly),
            "premium_pro" => Ok(PlanType::PremiumPro),
            "exclusive_monthly" => Ok(PlanType::ExclusiveMonthly),
            "vip" => Ok(PlanType::Vip),
            other => Err(AppError::BadRequest(format!("Unknown plan: {}", other))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Free => "free",
            PlanType::PremiumMonthly => "premium_monthly",
            PlanType::PremiumYearly => "premium_yearly",
            PlanType::PremiumPro => "premium_pro",
            PlanType::ExclusiveMonthly => "exclusive_monthly",
            PlanType::Vip => "vip",
        }
    }

    /// Membership in the premium set. Every paid tier unlocks the same
    /// gated features; tiers differ in billing period and perks.
    pub fn is_premium(&self) -> bool {
        !matches!(self, PlanType::Free)
    }

    /// Billing period length, used to compute `current_period_end` when a
    /// checkout completes.
    pub fn period_months(&self) -> u32 {
        match self {
            PlanType::PremiumYearly | PlanType::Vip => 12,
            _ => 1,
        }
    }
}

/// A purchasable plan as presented to checkout: display name and price.
/// Prices live here rather than in pre-provisioned Stripe price objects so
/// a fresh Stripe account works without setup.
pub struct PlanOffer {
    pub plan: PlanType,
    pub display_name: &'static str,
    pub unit_amount_cents: i64,
}

pub fn plan_offer(plan: PlanType) -> Res<PlanOffer> {
    let (display_name, unit_amount_cents) = match plan {
        PlanType::PremiumMonthly => ("Premium Monthly", 999),
        PlanType::PremiumYearly => ("Premium Yearly", 7999),
        PlanType::PremiumPro => ("Premium Pro", 1999),
        PlanType::ExclusiveMonthly => ("Exclusive Monthly", 2999),
        PlanType::Vip => ("VIP", 19999),
        PlanType::Free => {
            return Err(AppError::BadRequest(
                "The free plan cannot be purchased".to_string(),
            ));
        }
    };
    Ok(PlanOffer {
        plan,
        display_name,
        unit_amount_cents,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trip() {
        for name in [
            "free",
            "premium_monthly",
            "premium_yearly",
            "premium_pro",
            "exclusive_monthly",
            "vip",
        ] {
            assert_eq!(PlanType::from_str(name).unwrap().as_str(), name);
        }
    }

    #[test]
    fn unknown_plan_is_bad_request() {
        assert!(matches!(
            PlanType::from_str("gold"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn only_free_is_not_premium() {
        assert!(!PlanType::Free.is_premium());
        assert!(PlanType::PremiumMonthly.is_premium());
        assert!(PlanType::Vip.is_premium());
    }

    #[test]
    fn yearly_tiers_bill_twelve_months() {
        assert_eq!(PlanType::PremiumYearly.period_months(), 12);
        assert_eq!(PlanType::Vip.period_months(), 12);
        assert_eq!(PlanType::PremiumMonthly.period_months(), 1);
        assert_eq!(PlanType::ExclusiveMonthly.period_months(), 1);
    }

    #[test]
    fn free_plan_has_no_offer() {
        assert!(plan_offer(PlanType::Free).is_err());
        assert_eq!(
            plan_offer(PlanType::PremiumMonthly).unwrap().unit_amount_cents,
            999
        );
    }
}
