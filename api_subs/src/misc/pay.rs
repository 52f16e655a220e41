use stripe::{
    CreateCheckoutSessionLineItemsPriceDataRecurring,
    CreateCheckoutSessionLineItemsPriceDataRecurringInterval,
};

use common::plans::PlanType;

/// Billing cadence for the checkout line item, derived from the plan's
/// period length.
pub fn recurring_for_plan(plan: PlanType) -> CreateCheckoutSessionLineItemsPriceDataRecurring {
    let interval = match plan.period_months() {
        12 => CreateCheckoutSessionLineItemsPriceDataRecurringInterval::Year,
        _ => CreateCheckoutSessionLineItemsPriceDataRecurringInterval::Month,
    };
    CreateCheckoutSessionLineItemsPriceDataRecurring {
        interval,
        interval_count: Some(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yearly_plans_get_yearly_interval() {
        assert_eq!(
            recurring_for_plan(PlanType::PremiumYearly).interval,
            CreateCheckoutSessionLineItemsPriceDataRecurringInterval::Year
        );
        assert_eq!(
            recurring_for_plan(PlanType::Vip).interval,
            CreateCheckoutSessionLineItemsPriceDataRecurringInterval::Year
        );
    }

    #[test]
    fn monthly_plans_get_monthly_interval() {
        assert_eq!(
            recurring_for_plan(PlanType::PremiumMonthly).interval,
            CreateCheckoutSessionLineItemsPriceDataRecurringInterval::Month
        );
        assert_eq!(
            recurring_for_plan(PlanType::ExclusiveMonthly).interval,
            CreateCheckoutSessionLineItemsPriceDataRecurringInterval::Month
        );
    }
}
