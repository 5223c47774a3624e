use serde::{Deserialize, Serialize};

/// How position size is derived during a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBasis {
    /// Risk a constant amount derived from the initial balance.
    Fixed,
    /// Risk a fraction of the running balance, compounding position size.
    Dynamic,
}

/// Result of a single simulated trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeOutcome {
    Win,
    Loss,
}

/// Feasibility tier for a growth target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feasibility {
    /// Target is already met by the starting balance.
    Achieved,
    /// Required return is within reach of a consistent strategy.
    Realistic,
    /// Required return demands strong, sustained performance.
    Challenging,
    /// Required return is at the edge of what disciplined trading produces.
    Ambitious,
    /// Required return is beyond sustained real-world performance.
    VeryUnlikely,
}

impl Feasibility {
    /// Human-readable tier label used in formatted messages.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Achieved => "Achieved",
            Self::Realistic => "Realistic",
            Self::Challenging => "Challenging",
            Self::Ambitious => "Ambitious",
            Self::VeryUnlikely => "Very Unlikely",
        }
    }
}

/// Behavioral classification produced by the health scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradingIdentity {
    /// Too little history to classify.
    Newcomer,
    /// Sizes up immediately after losses.
    RevengeTrader,
    /// Keeps trading through long losing streaks.
    TiltedTrader,
    /// Consistently risks too much per trade.
    RiskTaker,
    /// Trades a system with no demonstrated edge.
    SystemGambler,
    /// No behavioral red flags detected.
    DisciplinedTrader,
}

impl TradingIdentity {
    /// Display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Newcomer => "Newcomer",
            Self::RevengeTrader => "Revenge Trader",
            Self::TiltedTrader => "Tilted Trader",
            Self::RiskTaker => "Risk Taker",
            Self::SystemGambler => "System Gambler",
            Self::DisciplinedTrader => "Disciplined Trader",
        }
    }

    /// One-paragraph insight shown alongside the label.
    #[must_use]
    pub fn insight(&self) -> &'static str {
        match self {
            Self::Newcomer => {
                "Not enough closed trades to read a pattern yet. Keep position sizes small and \
                 build a sample before drawing conclusions."
            }
            Self::RevengeTrader => {
                "Risk jumps right after losses. Step away after a losing trade and re-enter only \
                 at your planned size."
            }
            Self::TiltedTrader => {
                "Long losing streaks without a pause. Set a daily stop and honor it before the \
                 streak decides for you."
            }
            Self::RiskTaker => {
                "Position sizes are large relative to the account. Cutting risk per trade is the \
                 fastest way to extend survival."
            }
            Self::SystemGambler => {
                "The win rate and payoff do not add up to an edge. Re-test the setup before \
                 putting more capital behind it."
            }
            Self::DisciplinedTrader => {
                "Sizing is consistent and losses are handled calmly. Keep doing what you are \
                 doing."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_basis_serde_lowercase() {
        assert_eq!(serde_json::to_string(&RiskBasis::Fixed).unwrap(), "\"fixed\"");
        let parsed: RiskBasis = serde_json::from_str("\"dynamic\"").unwrap();
        assert_eq!(parsed, RiskBasis::Dynamic);
    }

    #[test]
    fn test_trade_outcome_serde_uppercase() {
        assert_eq!(serde_json::to_string(&TradeOutcome::Win).unwrap(), "\"WIN\"");
        assert_eq!(serde_json::to_string(&TradeOutcome::Loss).unwrap(), "\"LOSS\"");
    }

    #[test]
    fn test_identity_labels() {
        assert_eq!(TradingIdentity::Newcomer.label(), "Newcomer");
        assert_eq!(TradingIdentity::RevengeTrader.label(), "Revenge Trader");
        assert_eq!(Feasibility::VeryUnlikely.label(), "Very Unlikely");
    }
}
