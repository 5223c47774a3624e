//! Goal planning records.

use crate::enums::Feasibility;
use crate::error::EngineError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Upper bound on the planning horizon (ten years of monthly steps).
pub const MAX_DEADLINE_MONTHS: u32 = 120;

/// A growth target to evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalPlanInput {
    /// Current account balance.
    pub initial_balance: Decimal,
    /// Desired account balance.
    pub target_balance: Decimal,
    /// Months available to reach the target, in 1..=[`MAX_DEADLINE_MONTHS`].
    pub deadline_months: u32,
}

impl GoalPlanInput {
    /// Rejects malformed inputs before any solving.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.initial_balance <= Decimal::ZERO {
            return Err(EngineError::validation(
                "initial_balance",
                "must be greater than 0",
            ));
        }
        if self.target_balance <= Decimal::ZERO {
            return Err(EngineError::validation(
                "target_balance",
                "must be greater than 0",
            ));
        }
        if self.deadline_months == 0 || self.deadline_months > MAX_DEADLINE_MONTHS {
            return Err(EngineError::validation(
                "deadline_months",
                format!("must be between 1 and {MAX_DEADLINE_MONTHS}"),
            ));
        }
        Ok(())
    }
}

/// Outcome of the feasibility calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalPlanResult {
    /// Compounding return required each month, in percent.
    pub required_monthly_return_pct: Decimal,
    /// Feasibility tier the required return falls into.
    pub feasibility: Feasibility,
    /// Human-readable message embedding the inputs and the tier.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_input() {
        let input = GoalPlanInput {
            initial_balance: dec!(10000),
            target_balance: dec!(50000),
            deadline_months: 12,
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_months() {
        let input = GoalPlanInput {
            initial_balance: dec!(10000),
            target_balance: dec!(50000),
            deadline_months: 0,
        };
        assert_eq!(input.validate().unwrap_err().kind(), "VALIDATION");
    }

    #[test]
    fn test_rejects_months_beyond_cap() {
        let input = GoalPlanInput {
            initial_balance: dec!(10000),
            target_balance: dec!(50000),
            deadline_months: 121,
        };
        assert!(input.validate().is_err());
    }
}
