//! Trade health records.

use crate::enums::TradingIdentity;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One closed trade from a trader's history, in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Signed profit or loss of the trade.
    pub pnl: Decimal,
    /// Amount that was at risk on the trade.
    pub risk_amount: Decimal,
    /// Account balance before the trade was opened.
    pub balance: Decimal,
    /// Whether the trade closed in profit.
    pub is_win: bool,
}

impl TradeRecord {
    /// Convenience constructor used heavily in tests and fixtures.
    #[must_use]
    pub fn new(pnl: Decimal, risk_amount: Decimal, balance: Decimal, is_win: bool) -> Self {
        Self {
            pnl,
            risk_amount,
            balance,
            is_win,
        }
    }
}

/// Multi-factor health assessment of a trade history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Weighted composite of the three sub-scores, 0..=100.
    pub overall_score: u8,
    /// Position-sizing consistency score, 0..=100.
    pub risk_score: u8,
    /// Behavioral/emotional pattern score, 0..=100.
    pub emotional_score: u8,
    /// Strategy quality score, 0..=100.
    pub system_score: u8,
    /// One-line summary of the assessment.
    pub summary: String,
    /// Specific issues detected, in detection order.
    pub warnings: Vec<String>,
    /// Suggested risk per trade, in percent.
    pub recommended_risk_pct: Decimal,
    /// Why that risk level is suggested.
    pub recommendation: String,
    /// Behavioral classification.
    pub trading_identity: TradingIdentity,
    /// Insight paragraph matching the identity.
    pub identity_insight: String,
}

impl HealthReport {
    /// The fixed report returned for an empty trade history.
    #[must_use]
    pub fn newcomer() -> Self {
        Self {
            overall_score: 0,
            risk_score: 0,
            emotional_score: 0,
            system_score: 0,
            summary: "Not enough data.".to_string(),
            warnings: Vec::new(),
            recommended_risk_pct: Decimal::ONE,
            recommendation: "Start with small position sizes while building a track record."
                .to_string(),
            trading_identity: TradingIdentity::Newcomer,
            identity_insight: TradingIdentity::Newcomer.insight().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newcomer_report_is_zeroed() {
        let report = HealthReport::newcomer();
        assert_eq!(report.overall_score, 0);
        assert_eq!(report.summary, "Not enough data.");
        assert_eq!(report.trading_identity, TradingIdentity::Newcomer);
        assert!(report.warnings.is_empty());
    }
}
