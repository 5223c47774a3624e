//! Output records produced by a simulation run.
//!
//! All balances and percentages stay in full-precision [`Decimal`] here;
//! fixed two-decimal rendering happens in [`crate::report`].

use crate::config::SimulationConfig;
use crate::enums::TradeOutcome;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One simulated day of trading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyResult {
    /// 1-based day index, strictly increasing with no gaps.
    pub day: u32,
    /// Balance at the start of the day.
    pub start_balance: Decimal,
    /// Net profit or loss over the day.
    pub profit_loss: Decimal,
    /// Balance at the end of the day.
    pub end_balance: Decimal,
    /// Day return relative to the starting balance, in percent.
    /// Zero when the day started with nothing left.
    pub roi_pct: Decimal,
}

/// One simulated trade, kept for the first [`TRADE_LOG_LIMIT`] trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeLogEntry {
    /// 1-based trade sequence number.
    pub trade_no: u64,
    /// Day the trade occurred on.
    pub day: u32,
    /// Win or loss.
    pub result: TradeOutcome,
    /// Signed P&L including fees.
    pub profit_loss: Decimal,
    /// Balance after the trade settled.
    pub balance: Decimal,
}

/// Maximum number of entries retained in the trade log.
pub const TRADE_LOG_LIMIT: usize = 100;

/// Sentinel profit factor reported when gross losses are zero and the
/// ratio has no finite value.
pub const PROFIT_FACTOR_CAP: Decimal = Decimal::from_parts(9999, 0, 0, false, 2); // 99.99

/// Distribution estimate from the Monte Carlo engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloSummary {
    /// Number of independent iterations run.
    pub iterations: usize,
    /// 5th percentile terminal balance.
    pub worst_case: Decimal,
    /// 50th percentile terminal balance.
    pub median: Decimal,
    /// 95th percentile terminal balance.
    pub best_case: Decimal,
    /// Share of iterations that hit the ruin threshold, in percent.
    pub ruin_probability_pct: Decimal,
    /// Mean of the per-iteration maximum drawdowns, in percent.
    pub mean_max_drawdown_pct: Decimal,
}

/// Aggregate metrics for a completed projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Starting balance.
    pub initial_balance: Decimal,
    /// Balance after the last simulated day.
    pub final_balance: Decimal,
    /// `final_balance - initial_balance`.
    pub total_profit: Decimal,
    /// Total return relative to the starting balance, in percent.
    pub total_roi_pct: Decimal,
    /// Largest percentage decline from a running peak.
    pub max_drawdown_pct: Decimal,
    /// Gross profit divided by gross loss (fees included in losses).
    /// Capped at 99.99 when there were no losing amounts.
    pub profit_factor: Decimal,
    /// Average net P&L per executed trade.
    pub expectancy: Decimal,
    /// Closed-form risk-of-ruin estimate, in percent.
    pub risk_of_ruin_pct: Decimal,
    /// Days actually simulated (may be fewer than requested on ruin).
    pub days_simulated: u32,
    /// Trades actually executed.
    pub trades_executed: u64,
}

/// Complete result of one simulation call.
///
/// Built once per call and never mutated afterwards; persistence, if any,
/// is the caller's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Configuration the run was produced from.
    pub config: SimulationConfig,
    /// Aggregate metrics.
    pub summary: SimulationSummary,
    /// Day-by-day breakdown, truncated on ruin.
    pub daily_breakdown: Vec<DailyResult>,
    /// Outcome distribution estimate.
    pub monte_carlo: MonteCarloSummary,
    /// First [`TRADE_LOG_LIMIT`] trades.
    pub trade_log: Vec<TradeLogEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_daily_result_serializes_fields() {
        let day = DailyResult {
            day: 1,
            start_balance: dec!(10000),
            profit_loss: dec!(25.50),
            end_balance: dec!(10025.50),
            roi_pct: dec!(0.255),
        };
        let json = serde_json::to_value(&day).unwrap();
        assert_eq!(json["day"], 1);
        assert_eq!(json["end_balance"], "10025.50");
    }

    #[test]
    fn test_trade_log_entry_outcome_uppercase() {
        let entry = TradeLogEntry {
            trade_no: 1,
            day: 1,
            result: TradeOutcome::Win,
            profit_loss: dec!(60),
            balance: dec!(10060),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["result"], "WIN");
    }
}
