//! Presentation-layer rendering of results.
//!
//! The numeric formatting contract: currency renders as fixed two-decimal
//! strings, percentages as fixed two-decimal strings suffixed with `%`.
//! Everything upstream keeps full [`Decimal`] precision; rounding happens
//! exactly once, here.

use crate::goal::GoalPlanResult;
use crate::health::HealthReport;
use crate::results::{SimulationResult, TradeLogEntry};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Renders a currency amount as a fixed two-decimal string.
#[must_use]
pub fn format_money(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Renders a percentage as a fixed two-decimal string suffixed with `%`.
#[must_use]
pub fn format_pct(value: Decimal) -> String {
    format!(
        "{:.2}%",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Serialized view of one simulated day.
#[derive(Debug, Clone, Serialize)]
pub struct DailyRow {
    pub day: u32,
    pub start_balance: String,
    pub profit_loss: String,
    pub end_balance: String,
    pub roi: String,
}

/// Serialized view of one logged trade.
#[derive(Debug, Clone, Serialize)]
pub struct TradeRow {
    pub trade_no: u64,
    pub day: u32,
    pub result: &'static str,
    pub profit_loss: String,
    pub balance: String,
}

/// Serialized view of the aggregate metrics.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryView {
    pub initial_balance: String,
    pub final_balance: String,
    pub total_profit: String,
    pub total_roi: String,
    pub max_drawdown: String,
    pub profit_factor: String,
    pub expectancy: String,
    pub risk_of_ruin: String,
    pub days_simulated: u32,
}

/// Serialized view of the Monte Carlo estimate.
#[derive(Debug, Clone, Serialize)]
pub struct MonteCarloView {
    pub iterations: usize,
    pub worst_case: String,
    pub median: String,
    pub best_case: String,
    pub ruin_probability: String,
    pub mean_max_drawdown: String,
}

/// The full serialized simulation response.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub status: &'static str,
    pub summary: SummaryView,
    pub daily_breakdown: Vec<DailyRow>,
    pub monte_carlo: MonteCarloView,
    pub trade_log: Vec<TradeRow>,
}

impl From<&SimulationResult> for SimulationReport {
    fn from(result: &SimulationResult) -> Self {
        let summary = SummaryView {
            initial_balance: format_money(result.summary.initial_balance),
            final_balance: format_money(result.summary.final_balance),
            total_profit: format_money(result.summary.total_profit),
            total_roi: format_pct(result.summary.total_roi_pct),
            max_drawdown: format_pct(result.summary.max_drawdown_pct),
            profit_factor: format!(
                "{:.2}",
                result
                    .summary
                    .profit_factor
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            ),
            expectancy: format_money(result.summary.expectancy),
            risk_of_ruin: format_pct(result.summary.risk_of_ruin_pct),
            days_simulated: result.summary.days_simulated,
        };

        let monte_carlo = MonteCarloView {
            iterations: result.monte_carlo.iterations,
            worst_case: format_money(result.monte_carlo.worst_case),
            median: format_money(result.monte_carlo.median),
            best_case: format_money(result.monte_carlo.best_case),
            ruin_probability: format_pct(result.monte_carlo.ruin_probability_pct),
            mean_max_drawdown: format_pct(result.monte_carlo.mean_max_drawdown_pct),
        };

        Self {
            status: "success",
            summary,
            daily_breakdown: result
                .daily_breakdown
                .iter()
                .map(|d| DailyRow {
                    day: d.day,
                    start_balance: format_money(d.start_balance),
                    profit_loss: format_money(d.profit_loss),
                    end_balance: format_money(d.end_balance),
                    roi: format_pct(d.roi_pct),
                })
                .collect(),
            monte_carlo,
            trade_log: result.trade_log.iter().map(TradeRow::from).collect(),
        }
    }
}

impl From<&TradeLogEntry> for TradeRow {
    fn from(entry: &TradeLogEntry) -> Self {
        Self {
            trade_no: entry.trade_no,
            day: entry.day,
            result: match entry.result {
                crate::enums::TradeOutcome::Win => "WIN",
                crate::enums::TradeOutcome::Loss => "LOSS",
            },
            profit_loss: format_money(entry.profit_loss),
            balance: format_money(entry.balance),
        }
    }
}

/// The serialized goal planning response.
#[derive(Debug, Clone, Serialize)]
pub struct GoalPlanReport {
    pub status: &'static str,
    pub required_monthly_return: String,
    pub feasibility: &'static str,
    pub message: String,
}

impl From<&GoalPlanResult> for GoalPlanReport {
    fn from(result: &GoalPlanResult) -> Self {
        Self {
            status: "success",
            required_monthly_return: format_pct(result.required_monthly_return_pct),
            feasibility: result.feasibility.label(),
            message: result.message.clone(),
        }
    }
}

/// The serialized health analysis response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReportView {
    pub overall_score: u8,
    pub risk_score: u8,
    pub emotional_score: u8,
    pub system_score: u8,
    pub summary: String,
    pub warnings: Vec<String>,
    pub recommended_risk: String,
    pub recommendation: String,
    pub trading_identity: &'static str,
    pub identity_insight: String,
}

impl From<&HealthReport> for HealthReportView {
    fn from(report: &HealthReport) -> Self {
        Self {
            overall_score: report.overall_score,
            risk_score: report.risk_score,
            emotional_score: report.emotional_score,
            system_score: report.system_score,
            summary: report.summary.clone(),
            warnings: report.warnings.clone(),
            recommended_risk: format_pct(report.recommended_risk_pct),
            recommendation: report.recommendation.clone(),
            trading_identity: report.trading_identity.label(),
            identity_insight: report.identity_insight.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_money_pads_and_rounds() {
        assert_eq!(format_money(dec!(10000)), "10000.00");
        assert_eq!(format_money(dec!(0.005)), "0.01");
        assert_eq!(format_money(dec!(-12.3)), "-12.30");
    }

    #[test]
    fn test_format_pct_suffix() {
        assert_eq!(format_pct(dec!(14.466)), "14.47%");
        assert_eq!(format_pct(dec!(0)), "0.00%");
    }

    #[test]
    fn test_goal_report_formatting() {
        let result = GoalPlanResult {
            required_monthly_return_pct: dec!(14.4714),
            feasibility: crate::enums::Feasibility::Challenging,
            message: "msg".to_string(),
        };
        let report = GoalPlanReport::from(&result);
        assert_eq!(report.required_monthly_return, "14.47%");
        assert_eq!(report.feasibility, "Challenging");
    }
}
