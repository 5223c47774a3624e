//! Goal feasibility calculation.
//!
//! Solves `(1 + r)^months = target / initial` for the per-month compounding
//! rate `r` and classifies the result into a feasibility tier with fixed
//! threshold boundaries.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use tracing::debug;
use tradecast_domain::enums::Feasibility;
use tradecast_domain::error::EngineError;
use tradecast_domain::goal::{GoalPlanInput, GoalPlanResult};
use tradecast_domain::report::{format_money, format_pct};

/// Tier boundaries on the required monthly return, in percent. Inclusive
/// upper bounds: exactly 10% is still `Realistic`, exactly 20% still
/// `Challenging`, exactly 50% still `Ambitious`.
pub const REALISTIC_MAX_PCT: Decimal = Decimal::from_parts(10, 0, 0, false, 0);
pub const CHALLENGING_MAX_PCT: Decimal = Decimal::from_parts(20, 0, 0, false, 0);
pub const AMBITIOUS_MAX_PCT: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Classifies a required monthly return into its feasibility tier.
#[must_use]
pub fn classify_required_return(required_pct: Decimal) -> Feasibility {
    if required_pct <= REALISTIC_MAX_PCT {
        Feasibility::Realistic
    } else if required_pct <= CHALLENGING_MAX_PCT {
        Feasibility::Challenging
    } else if required_pct <= AMBITIOUS_MAX_PCT {
        Feasibility::Ambitious
    } else {
        Feasibility::VeryUnlikely
    }
}

/// Solves the required monthly return for a growth target.
///
/// A target at or below the starting balance is not an error: it reports
/// tier `Achieved` with a required return of zero, matching the behavior
/// the product's regression tests pin down.
pub fn plan_goal(input: &GoalPlanInput) -> Result<GoalPlanResult, EngineError> {
    input.validate()?;

    if input.target_balance <= input.initial_balance {
        return Ok(GoalPlanResult {
            required_monthly_return_pct: Decimal::ZERO,
            feasibility: Feasibility::Achieved,
            message: format!(
                "Your balance of ${} already meets the ${} target. No growth required.",
                format_money(input.initial_balance),
                format_money(input.target_balance),
            ),
        });
    }

    // The n-th root has no exact Decimal form; the surrounding arithmetic
    // stays in Decimal and only the root goes through f64.
    let growth_ratio = (input.target_balance / input.initial_balance)
        .to_f64()
        .unwrap_or(1.0);
    let monthly_rate = growth_ratio.powf(1.0 / f64::from(input.deadline_months)) - 1.0;
    let required_pct = Decimal::from_f64(monthly_rate * 100.0).unwrap_or(Decimal::ZERO);

    let feasibility = classify_required_return(required_pct);

    debug!(%required_pct, ?feasibility, "goal plan solved");

    let message = format!(
        "Growing ${} into ${} within {} months requires a compounding return of {} per month. \
         Feasibility: {}.",
        format_money(input.initial_balance),
        format_money(input.target_balance),
        input.deadline_months,
        format_pct(required_pct),
        feasibility.label(),
    );

    Ok(GoalPlanResult {
        required_monthly_return_pct: required_pct,
        feasibility,
        message,
    })
}
