use common::{
    error::{AppError, Res},
    jwt::JwtClaims,
    plans::PlanType,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::policy::{Feature, GatePolicy};

/// The caller's premium standing as of this request, read live from the
/// subscription row (the JWT tier string is never trusted for gating).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Access {
    pub is_premium: bool,
    pub plan: Option<PlanType>,
}

impl Access {
    pub fn anonymous() -> Self {
        Access {
            is_premium: false,
            plan: None,
        }
    }

    pub fn plan_name(&self) -> Option<String> {
        self.plan.map(|p| p.as_str().to_string())
    }
}

/// What a gated handler is allowed to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Full,
    Teaser,
}

/// Evaluates the premium predicate for a user: active subscription, not
/// past its period end, on a paid tier. Admin emails bypass the check.
pub async fn premium_status(
    pool: &PgPool,
    user_id: Uuid,
    email: &str,
    admin_emails: &[String],
) -> Res<Access> {
    if admin_emails.iter().any(|admin| admin == email) {
        return Ok(Access {
            is_premium: true,
            plan: None,
        });
    }

    let subscription = db::subscription::get_subscription(pool, user_id).await?;
    Ok(match subscription {
        Some(sub) => Access {
            is_premium: sub.is_premium(),
            plan: PlanType::from_str(&sub.plan_type).ok(),
        },
        None => Access::anonymous(),
    })
}

/// Hard gate: resolves access and rejects non-premium callers with the
/// machine-readable upsell signal. Pure read, no side effects.
pub async fn require_premium(
    pool: &PgPool,
    claims: Option<&JwtClaims>,
    admin_emails: &[String],
) -> Res<Access> {
    let access = match claims {
        Some(claims) => premium_status(pool, claims.id, &claims.email, admin_emails).await?,
        None => Access::anonymous(),
    };
    if access.is_premium {
        Ok(access)
    } else {
        Err(AppError::PremiumRequired {
            current_plan: access.plan_name(),
        })
    }
}

/// Soft gate: never rejects. Unauthenticated callers are simply limited.
pub async fn soft_access(
    pool: &PgPool,
    claims: Option<&JwtClaims>,
    admin_emails: &[String],
) -> Res<Access> {
    match claims {
        Some(claims) => premium_status(pool, claims.id, &claims.email, admin_emails).await,
        None => Ok(Access::anonymous()),
    }
}

/// The single gate-application function: maps the feature's policy and the
/// caller's access to what the handler may produce. Kept pure so the
/// policy × access matrix is testable without a database.
pub fn decide(policy: GatePolicy, access: &Access) -> Res<Decision> {
    match policy {
        GatePolicy::Ungated => Ok(Decision::Full),
        GatePolicy::Soft => Ok(if access.is_premium {
            Decision::Full
        } else {
            Decision::Teaser
        }),
        GatePolicy::Hard => {
            if access.is_premium {
                Ok(Decision::Full)
            } else {
                Err(AppError::PremiumRequired {
                    current_plan: access.plan_name(),
                })
            }
        }
    }
}

/// Convenience wrapper handlers call: resolve access, then decide.
pub async fn apply(
    feature: Feature,
    pool: &PgPool,
    claims: Option<&JwtClaims>,
    admin_emails: &[String],
) -> Res<(Decision, Access)> {
    let access = soft_access(pool, claims, admin_emails).await?;
    let decision = decide(feature.policy(), &access)?;
    Ok((decision, access))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn premium() -> Access {
        Access {
            is_premium: true,
            plan: Some(PlanType::PremiumMonthly),
        }
    }

    fn free() -> Access {
        Access {
            is_premium: false,
            plan: Some(PlanType::Free),
        }
    }

    #[test]
    fn ungated_is_full_for_everyone() {
        assert_eq!(decide(GatePolicy::Ungated, &premium()).unwrap(), Decision::Full);
        assert_eq!(
            decide(GatePolicy::Ungated, &Access::anonymous()).unwrap(),
            Decision::Full
        );
    }

    #[test]
    fn soft_gate_degrades_instead_of_rejecting() {
        assert_eq!(decide(GatePolicy::Soft, &premium()).unwrap(), Decision::Full);
        assert_eq!(decide(GatePolicy::Soft, &free()).unwrap(), Decision::Teaser);
        assert_eq!(
            decide(GatePolicy::Soft, &Access::anonymous()).unwrap(),
            Decision::Teaser
        );
    }

    #[test]
    fn hard_gate_rejects_with_current_plan() {
        assert_eq!(decide(GatePolicy::Hard, &premium()).unwrap(), Decision::Full);

        match decide(GatePolicy::Hard, &free()) {
            Err(AppError::PremiumRequired { current_plan }) => {
                assert_eq!(current_plan.as_deref(), Some("free"));
            }
            other => panic!("expected PremiumRequired, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn hard_gate_rejects_anonymous_without_plan() {
        match decide(GatePolicy::Hard, &Access::anonymous()) {
            Err(AppError::PremiumRequired { current_plan }) => {
                assert_eq!(current_plan, None);
            }
            other => panic!("expected PremiumRequired, got {:?}", other.map(|_| ())),
        }
    }
}
