use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::plans::PlanType;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Subscription {
    pub user_id: Uuid,
    pub plan_type: String,
    pub status: String,
    pub current_period_end: Option<NaiveDateTime>,
    pub credits: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Subscription {
    /// The premium predicate: active, unexpired, and on a paid tier.
    pub fn is_premium(&self) -> bool {
        let plan_is_premium = PlanType::from_str(&self.plan_type)
            .map(|p| p.is_premium())
            .unwrap_or(false);
        self.status == "active"
            && plan_is_premium
            && self
                .current_period_end
                .map(|end| end > Utc::now().naive_utc())
                .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn subscription(plan: &str, status: &str, days_from_now: i64) -> Subscription {
        let now = Utc::now().naive_utc();
        Subscription {
            user_id: Uuid::new_v4(),
            plan_type: plan.to_string(),
            status: status.to_string(),
            current_period_end: Some(now + Duration::days(days_from_now)),
            credits: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn active_unexpired_paid_plan_is_premium() {
        assert!(subscription("premium_monthly", "active", 10).is_premium());
        assert!(subscription("vip", "active", 300).is_premium());
    }

    #[test]
    fn expired_subscription_is_not_premium() {
        assert!(!subscription("premium_yearly", "active", -1).is_premium());
    }

    #[test]
    fn inactive_subscription_is_not_premium() {
        assert!(!subscription("premium_monthly", "inactive", 10).is_premium());
    }

    #[test]
    fn free_plan_is_never_premium() {
        assert!(!subscription("free", "active", 10).is_premium());
    }

    #[test]
    fn missing_period_end_is_not_premium() {
        let mut sub = subscription("premium_monthly", "active", 10);
        sub.current_period_end = None;
        assert!(!sub.is_premium());
    }

    #[test]
    fn unknown_plan_string_is_not_premium() {
        assert!(!subscription("legacy_gold", "active", 10).is_premium());
    }
}
