//! Simulation configuration.
//!
//! A [`SimulationConfig`] captures the trading assumptions behind one
//! projection run. It is plain data: validation happens through
//! [`SimulationConfig::validate`], which every engine calls before doing
//! any work, and the named presets mirror common strategy archetypes.

use crate::enums::RiskBasis;
use crate::error::EngineError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Upper bound on the simulated horizon (ten years of daily steps).
pub const MAX_SIMULATION_DAYS: u32 = 3650;

/// Trading assumptions for a single simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Starting account balance in currency units.
    pub initial_balance: Decimal,
    /// Percent of the balance deployed as active capital, in (0, 100].
    pub capital_utilization_pct: Decimal,
    /// Percent of active capital risked per trade, in (0, 100].
    pub risk_per_trade_pct: Decimal,
    /// Reward target as a multiple of the risked amount.
    pub risk_reward_ratio: Decimal,
    /// Probability of a winning trade, in [0, 100].
    pub win_rate_pct: Decimal,
    /// Trades taken each simulated day.
    pub trades_per_day: u32,
    /// Number of days to simulate, in 1..=[`MAX_SIMULATION_DAYS`].
    pub simulation_days: u32,
    /// Flat fee charged on every trade regardless of outcome.
    pub fees_per_trade: Decimal,
    /// Whether position size follows the initial or the running balance.
    pub risk_basis: RiskBasis,
}

impl SimulationConfig {
    /// A balanced starting point: the original product's default form values.
    #[must_use]
    pub fn new(initial_balance: Decimal) -> Self {
        Self {
            initial_balance,
            capital_utilization_pct: Decimal::from(30),
            risk_per_trade_pct: Decimal::ONE,
            risk_reward_ratio: Decimal::TWO,
            win_rate_pct: Decimal::from(50),
            trades_per_day: 3,
            simulation_days: 30,
            fees_per_trade: Decimal::ZERO,
            risk_basis: RiskBasis::Dynamic,
        }
    }

    /// Sets the capital utilization percentage.
    #[must_use]
    pub fn with_capital_utilization_pct(mut self, pct: Decimal) -> Self {
        self.capital_utilization_pct = pct;
        self
    }

    /// Sets the risk per trade percentage.
    #[must_use]
    pub fn with_risk_per_trade_pct(mut self, pct: Decimal) -> Self {
        self.risk_per_trade_pct = pct;
        self
    }

    /// Sets the risk-reward ratio.
    #[must_use]
    pub fn with_risk_reward_ratio(mut self, ratio: Decimal) -> Self {
        self.risk_reward_ratio = ratio;
        self
    }

    /// Sets the win rate percentage.
    #[must_use]
    pub fn with_win_rate_pct(mut self, pct: Decimal) -> Self {
        self.win_rate_pct = pct;
        self
    }

    /// Sets the number of trades per day.
    #[must_use]
    pub fn with_trades_per_day(mut self, trades: u32) -> Self {
        self.trades_per_day = trades;
        self
    }

    /// Sets the simulated horizon in days.
    #[must_use]
    pub fn with_simulation_days(mut self, days: u32) -> Self {
        self.simulation_days = days;
        self
    }

    /// Sets the flat per-trade fee.
    #[must_use]
    pub fn with_fees_per_trade(mut self, fees: Decimal) -> Self {
        self.fees_per_trade = fees;
        self
    }

    /// Sets the risk basis.
    #[must_use]
    pub fn with_risk_basis(mut self, basis: RiskBasis) -> Self {
        self.risk_basis = basis;
        self
    }

    /// High-frequency scalping preset: small account, full utilization.
    #[must_use]
    pub fn scalper() -> Self {
        Self {
            initial_balance: Decimal::from(2000),
            capital_utilization_pct: Decimal::from(100),
            risk_per_trade_pct: Decimal::ONE,
            risk_reward_ratio: Decimal::new(15, 1), // 1.5
            win_rate_pct: Decimal::from(60),
            trades_per_day: 10,
            simulation_days: 30,
            fees_per_trade: Decimal::new(5, 1), // 0.50
            risk_basis: RiskBasis::Dynamic,
        }
    }

    /// Balanced intraday preset.
    #[must_use]
    pub fn day_trader() -> Self {
        Self {
            initial_balance: Decimal::from(10000),
            capital_utilization_pct: Decimal::from(50),
            risk_per_trade_pct: Decimal::ONE,
            risk_reward_ratio: Decimal::TWO,
            win_rate_pct: Decimal::from(50),
            trades_per_day: 3,
            simulation_days: 30,
            fees_per_trade: Decimal::TWO,
            risk_basis: RiskBasis::Dynamic,
        }
    }

    /// Low-frequency swing preset with fixed sizing.
    #[must_use]
    pub fn swing_trader() -> Self {
        Self {
            initial_balance: Decimal::from(5000),
            capital_utilization_pct: Decimal::from(30),
            risk_per_trade_pct: Decimal::TWO,
            risk_reward_ratio: Decimal::from(3),
            win_rate_pct: Decimal::from(40),
            trades_per_day: 1,
            simulation_days: 90,
            fees_per_trade: Decimal::from(5),
            risk_basis: RiskBasis::Fixed,
        }
    }

    /// Oversized-risk preset, useful for demonstrating ruin.
    #[must_use]
    pub fn gambler() -> Self {
        Self {
            initial_balance: Decimal::from(1000),
            capital_utilization_pct: Decimal::from(100),
            risk_per_trade_pct: Decimal::TEN,
            risk_reward_ratio: Decimal::ONE,
            win_rate_pct: Decimal::from(40),
            trades_per_day: 5,
            simulation_days: 30,
            fees_per_trade: Decimal::ZERO,
            risk_basis: RiskBasis::Fixed,
        }
    }

    /// The minimum win rate (in percent) at which the configured
    /// risk-reward ratio breaks even: `1 / (1 + RR) * 100`.
    #[must_use]
    pub fn break_even_win_rate_pct(&self) -> Decimal {
        Decimal::ONE_HUNDRED / (Decimal::ONE + self.risk_reward_ratio)
    }

    /// Total number of trades over the configured horizon.
    #[must_use]
    pub fn total_trades(&self) -> u64 {
        u64::from(self.trades_per_day) * u64::from(self.simulation_days)
    }

    /// Rejects malformed or out-of-range assumptions.
    ///
    /// Called by every engine entry point before any simulation work, so a
    /// bad config never produces a partial result.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.initial_balance <= Decimal::ZERO {
            return Err(EngineError::validation(
                "initial_balance",
                "must be greater than 0",
            ));
        }
        if self.capital_utilization_pct <= Decimal::ZERO
            || self.capital_utilization_pct > Decimal::ONE_HUNDRED
        {
            return Err(EngineError::validation(
                "capital_utilization_pct",
                "must be in (0, 100]",
            ));
        }
        if self.risk_per_trade_pct <= Decimal::ZERO
            || self.risk_per_trade_pct > Decimal::ONE_HUNDRED
        {
            return Err(EngineError::validation(
                "risk_per_trade_pct",
                "must be in (0, 100]",
            ));
        }
        if self.risk_reward_ratio <= Decimal::ZERO {
            return Err(EngineError::validation(
                "risk_reward_ratio",
                "must be greater than 0",
            ));
        }
        if self.win_rate_pct < Decimal::ZERO || self.win_rate_pct > Decimal::ONE_HUNDRED {
            return Err(EngineError::validation(
                "win_rate_pct",
                "must be between 0 and 100",
            ));
        }
        if self.trades_per_day == 0 {
            return Err(EngineError::validation(
                "trades_per_day",
                "must be greater than 0",
            ));
        }
        if self.simulation_days == 0 || self.simulation_days > MAX_SIMULATION_DAYS {
            return Err(EngineError::validation(
                "simulation_days",
                format!("must be between 1 and {MAX_SIMULATION_DAYS}"),
            ));
        }
        if self.fees_per_trade < Decimal::ZERO {
            return Err(EngineError::validation(
                "fees_per_trade",
                "must not be negative",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::new(dec!(10000)).validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        for preset in [
            SimulationConfig::scalper(),
            SimulationConfig::day_trader(),
            SimulationConfig::swing_trader(),
            SimulationConfig::gambler(),
        ] {
            assert!(preset.validate().is_ok());
        }
    }

    #[test]
    fn test_rejects_non_positive_balance() {
        let config = SimulationConfig::new(dec!(0));
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), "VALIDATION");
        assert!(err.to_string().contains("initial_balance"));
    }

    #[test]
    fn test_rejects_win_rate_above_100() {
        let config = SimulationConfig::new(dec!(10000)).with_win_rate_pct(dec!(100.01));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_accepts_win_rate_boundaries() {
        assert!(SimulationConfig::new(dec!(10000))
            .with_win_rate_pct(dec!(0))
            .validate()
            .is_ok());
        assert!(SimulationConfig::new(dec!(10000))
            .with_win_rate_pct(dec!(100))
            .validate()
            .is_ok());
    }

    #[test]
    fn test_rejects_horizon_beyond_cap() {
        let config = SimulationConfig::new(dec!(10000)).with_simulation_days(3651);
        assert!(config.validate().is_err());
        let config = SimulationConfig::new(dec!(10000)).with_simulation_days(3650);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_fees() {
        let config = SimulationConfig::new(dec!(10000)).with_fees_per_trade(dec!(-1));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_break_even_win_rate() {
        let config = SimulationConfig::new(dec!(10000)).with_risk_reward_ratio(dec!(1));
        assert_eq!(config.break_even_win_rate_pct(), dec!(50));
        let config = config.with_risk_reward_ratio(dec!(3));
        assert_eq!(config.break_even_win_rate_pct(), dec!(25));
    }

    #[test]
    fn test_total_trades() {
        let config = SimulationConfig::new(dec!(10000))
            .with_trades_per_day(3)
            .with_simulation_days(30);
        assert_eq!(config.total_trades(), 90);
    }
}
