//! Trade health scoring.
//!
//! Scores a chronological trade history on three axes — position-sizing
//! consistency, behavioral patterns, and system quality — then combines
//! them into a capped overall score, a behavioral identity, and a risk
//! recommendation. Every threshold lives in [`HealthThresholds`] so the
//! heuristics stay auditable and testable apart from the narrative copy.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use tracing::debug;
use tradecast_domain::enums::TradingIdentity;
use tradecast_domain::health::{HealthReport, TradeRecord};
use tradecast_domain::results::PROFIT_FACTOR_CAP;

/// Every tunable constant behind the health heuristics.
#[derive(Debug, Clone)]
pub struct HealthThresholds {
    /// A single trade risking more than this share of the account is
    /// oversized, in percent.
    pub max_single_risk_pct: Decimal,
    /// Average risk above this share of the account is oversized, in percent.
    pub max_avg_risk_pct: Decimal,
    /// Sizing counts as inconsistent when the standard deviation of risk
    /// amounts exceeds this fraction of their mean.
    pub sizing_spread_ratio: Decimal,
    /// Penalty for any oversized single trade.
    pub single_risk_penalty: i32,
    /// Penalty for an oversized average risk.
    pub avg_risk_penalty: i32,
    /// Penalty for inconsistent sizing.
    pub sizing_spread_penalty: i32,

    /// Losing streak length that starts costing points.
    pub loss_streak_warn: usize,
    /// Losing streak length that costs heavily.
    pub loss_streak_severe: usize,
    /// Penalty at the warning streak length.
    pub loss_streak_warn_penalty: i32,
    /// Additional penalty at the severe streak length.
    pub loss_streak_severe_penalty: i32,
    /// A trade after a loss risking more than the prior risk times this
    /// multiplier counts as revenge trading.
    pub revenge_multiplier: Decimal,
    /// Flat penalty once revenge trading is detected at all.
    pub revenge_penalty: i32,

    /// Win rate below this costs heavily, in percent.
    pub low_win_rate_pct: Decimal,
    /// Win rate below this costs moderately, in percent.
    pub mid_win_rate_pct: Decimal,
    /// Penalty below the low win-rate band.
    pub low_win_rate_penalty: i32,
    /// Penalty below the mid win-rate band.
    pub mid_win_rate_penalty: i32,
    /// Profit factor below this costs heavily.
    pub low_profit_factor: Decimal,
    /// Profit factor below this costs moderately.
    pub mid_profit_factor: Decimal,
    /// Penalty below the low profit-factor band.
    pub low_profit_factor_penalty: i32,
    /// Penalty below the mid profit-factor band.
    pub mid_profit_factor_penalty: i32,

    /// Sub-score weights (risk, emotional, system); must sum to one.
    pub weights: (Decimal, Decimal, Decimal),
    /// Overall score is capped here while the history is net unprofitable.
    pub unprofitable_cap: u8,
    /// Histories shorter than this classify as `Newcomer`.
    pub min_trades: usize,
    /// Risk score below this classifies as `RiskTaker`.
    pub low_risk_score: u8,
    /// System score below this classifies as `SystemGambler`.
    pub low_system_score: u8,

    /// Drawdown from the in-window peak that triggers a risk cut, in percent.
    pub drawdown_warn_pct: Decimal,
    /// How much the recommended risk drops on a deep drawdown, in points.
    pub drawdown_risk_cut_pct: Decimal,
    /// Recommended risk never drops below this, in percent.
    pub min_recommended_risk_pct: Decimal,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            max_single_risk_pct: Decimal::from(3),
            max_avg_risk_pct: Decimal::TWO,
            sizing_spread_ratio: Decimal::new(5, 1), // 0.5
            single_risk_penalty: 25,
            avg_risk_penalty: 20,
            sizing_spread_penalty: 20,

            loss_streak_warn: 3,
            loss_streak_severe: 5,
            loss_streak_warn_penalty: 20,
            loss_streak_severe_penalty: 30,
            revenge_multiplier: Decimal::new(12, 1), // 1.2
            revenge_penalty: 30,

            low_win_rate_pct: Decimal::from(40),
            mid_win_rate_pct: Decimal::from(50),
            low_win_rate_penalty: 30,
            mid_win_rate_penalty: 15,
            low_profit_factor: Decimal::ONE,
            mid_profit_factor: Decimal::new(15, 1), // 1.5
            low_profit_factor_penalty: 40,
            mid_profit_factor_penalty: 20,

            weights: (
                Decimal::new(3, 1), // 0.3 risk
                Decimal::new(4, 1), // 0.4 emotional
                Decimal::new(3, 1), // 0.3 system
            ),
            unprofitable_cap: 45,
            min_trades: 5,
            low_risk_score: 50,
            low_system_score: 50,

            drawdown_warn_pct: Decimal::from(5),
            drawdown_risk_cut_pct: Decimal::new(5, 1), // 0.5
            min_recommended_risk_pct: Decimal::new(5, 1), // 0.5
        }
    }
}

/// Scores a trade history with the default thresholds.
#[must_use]
pub fn score_health(trades: &[TradeRecord]) -> HealthReport {
    HealthAnalyzer::default().analyze(trades)
}

/// Intermediate facts extracted from one pass over the history.
#[derive(Debug)]
struct HistoryFacts {
    max_loss_streak: usize,
    revenge_detected: bool,
    win_rate_pct: Decimal,
    profit_factor: Decimal,
    max_drawdown_pct: Decimal,
}

/// Scores trade histories against a set of thresholds.
#[derive(Debug, Clone, Default)]
pub struct HealthAnalyzer {
    thresholds: HealthThresholds,
}

impl HealthAnalyzer {
    /// Creates an analyzer with custom thresholds.
    #[must_use]
    pub fn new(thresholds: HealthThresholds) -> Self {
        Self { thresholds }
    }

    /// Scores a chronological trade history.
    ///
    /// An empty history is a defined terminal case, not an error: it
    /// returns the fixed zeroed `Newcomer` report.
    #[must_use]
    pub fn analyze(&self, trades: &[TradeRecord]) -> HealthReport {
        if trades.is_empty() {
            return HealthReport::newcomer();
        }

        let t = &self.thresholds;
        let mut warnings = Vec::new();

        let facts = extract_facts(trades, t);
        let risk_score = self.score_risk(trades, &mut warnings);
        let emotional_score = self.score_emotions(&facts, &mut warnings);
        let system_score = self.score_system(&facts, &mut warnings);

        let (w_risk, w_emotional, w_system) = t.weights;
        let weighted = w_risk * Decimal::from(risk_score)
            + w_emotional * Decimal::from(emotional_score)
            + w_system * Decimal::from(system_score);
        let mut overall_score = decimal_to_score(weighted);

        // An unprofitable history can never read as healthy, no matter how
        // disciplined the sizing looks.
        if facts.profit_factor < t.low_profit_factor {
            overall_score = overall_score.min(t.unprofitable_cap);
        }

        let trading_identity = self.classify(trades.len(), risk_score, system_score, &facts);
        let (recommended_risk_pct, recommendation) =
            self.recommend_risk(trading_identity, &facts);

        debug!(
            trades = trades.len(),
            overall_score,
            identity = trading_identity.label(),
            "health analysis complete"
        );

        HealthReport {
            overall_score,
            risk_score,
            emotional_score,
            system_score,
            summary: summary_for(overall_score).to_string(),
            warnings,
            recommended_risk_pct,
            recommendation,
            trading_identity,
            identity_insight: trading_identity.insight().to_string(),
        }
    }

    /// Position-sizing consistency: 100 minus penalties.
    fn score_risk(&self, trades: &[TradeRecord], warnings: &mut Vec<String>) -> u8 {
        let t = &self.thresholds;
        let mut score: i32 = 100;

        let risk_ratios: Vec<Decimal> = trades
            .iter()
            .map(|trade| {
                if trade.balance > Decimal::ZERO {
                    trade.risk_amount / trade.balance * Decimal::ONE_HUNDRED
                } else {
                    Decimal::ZERO
                }
            })
            .collect();

        if risk_ratios.iter().any(|r| *r > t.max_single_risk_pct) {
            score -= t.single_risk_penalty;
            warnings.push(format!(
                "At least one trade risked more than {}% of the account.",
                t.max_single_risk_pct
            ));
        }

        let avg_risk = risk_ratios.iter().sum::<Decimal>() / Decimal::from(risk_ratios.len());
        if avg_risk > t.max_avg_risk_pct {
            score -= t.avg_risk_penalty;
            warnings.push(format!(
                "Average risk per trade exceeds {}% of the account.",
                t.max_avg_risk_pct
            ));
        }

        let amounts: Vec<Decimal> = trades.iter().map(|tr| tr.risk_amount.abs()).collect();
        let mean = amounts.iter().sum::<Decimal>() / Decimal::from(amounts.len());
        if mean > Decimal::ZERO && std_deviation(&amounts, mean) > t.sizing_spread_ratio * mean {
            score -= t.sizing_spread_penalty;
            warnings.push("Position sizing is inconsistent from trade to trade.".to_string());
        }

        clamp_score(score)
    }

    /// Behavioral patterns: 100 minus penalties.
    fn score_emotions(&self, facts: &HistoryFacts, warnings: &mut Vec<String>) -> u8 {
        let t = &self.thresholds;
        let mut score: i32 = 100;

        if facts.max_loss_streak >= t.loss_streak_warn {
            score -= t.loss_streak_warn_penalty;
            warnings.push(format!(
                "Hit a streak of {} consecutive losses.",
                facts.max_loss_streak
            ));
        }
        if facts.max_loss_streak >= t.loss_streak_severe {
            score -= t.loss_streak_severe_penalty;
        }

        if facts.revenge_detected {
            score -= t.revenge_penalty;
            warnings.push(format!(
                "Risk increased by more than {}% immediately after a loss.",
                (t.revenge_multiplier - Decimal::ONE) * Decimal::ONE_HUNDRED
            ));
        }

        clamp_score(score)
    }

    /// System quality: 100 minus penalties from win-rate and payoff bands.
    fn score_system(&self, facts: &HistoryFacts, warnings: &mut Vec<String>) -> u8 {
        let t = &self.thresholds;
        let mut score: i32 = 100;

        if facts.win_rate_pct < t.low_win_rate_pct {
            score -= t.low_win_rate_penalty;
            warnings.push(format!(
                "Win rate is below {}%.",
                t.low_win_rate_pct
            ));
        } else if facts.win_rate_pct < t.mid_win_rate_pct {
            score -= t.mid_win_rate_penalty;
        }

        if facts.profit_factor < t.low_profit_factor {
            score -= t.low_profit_factor_penalty;
            warnings.push("Gross losses outweigh gross profits.".to_string());
        } else if facts.profit_factor < t.mid_profit_factor {
            score -= t.mid_profit_factor_penalty;
        }

        clamp_score(score)
    }

    /// Fixed decision table; the first matching rule wins.
    fn classify(
        &self,
        trade_count: usize,
        risk_score: u8,
        system_score: u8,
        facts: &HistoryFacts,
    ) -> TradingIdentity {
        let t = &self.thresholds;
        if facts.revenge_detected {
            TradingIdentity::RevengeTrader
        } else if facts.max_loss_streak >= t.loss_streak_severe {
            TradingIdentity::TiltedTrader
        } else if risk_score < t.low_risk_score {
            TradingIdentity::RiskTaker
        } else if system_score < t.low_system_score {
            TradingIdentity::SystemGambler
        } else if trade_count < t.min_trades {
            TradingIdentity::Newcomer
        } else {
            TradingIdentity::DisciplinedTrader
        }
    }

    /// Base risk per identity, cut further after a deep in-window drawdown.
    fn recommend_risk(
        &self,
        identity: TradingIdentity,
        facts: &HistoryFacts,
    ) -> (Decimal, String) {
        let t = &self.thresholds;
        let base = match identity {
            TradingIdentity::DisciplinedTrader => Decimal::TWO,
            TradingIdentity::Newcomer | TradingIdentity::RiskTaker
            | TradingIdentity::SystemGambler => Decimal::ONE,
            TradingIdentity::TiltedTrader => Decimal::new(75, 2), // 0.75
            TradingIdentity::RevengeTrader => Decimal::new(5, 1), // 0.5
        };

        if facts.max_drawdown_pct > t.drawdown_warn_pct {
            let cut = (base - t.drawdown_risk_cut_pct).max(t.min_recommended_risk_pct);
            let reason = format!(
                "Account is more than {}% off its recent peak; risk is reduced until the \
                 drawdown recovers.",
                t.drawdown_warn_pct
            );
            (cut, reason)
        } else {
            let reason = match identity {
                TradingIdentity::DisciplinedTrader => {
                    "Consistent history supports standard position sizing.".to_string()
                }
                _ => "Reduced sizing until the flagged patterns clear up.".to_string(),
            };
            (base, reason)
        }
    }
}

/// One pass over the history extracting streaks, revenge events, win rate,
/// profit factor, and the in-window drawdown.
fn extract_facts(trades: &[TradeRecord], thresholds: &HealthThresholds) -> HistoryFacts {
    let mut max_loss_streak = 0usize;
    let mut current_streak = 0usize;
    let mut revenge_detected = false;
    let mut wins = 0usize;
    let mut gross_profit = Decimal::ZERO;
    let mut gross_loss = Decimal::ZERO;
    let mut peak_equity: Option<Decimal> = None;
    let mut max_drawdown_pct = Decimal::ZERO;

    for (i, trade) in trades.iter().enumerate() {
        if trade.is_win {
            wins += 1;
            current_streak = 0;
        } else {
            current_streak += 1;
            max_loss_streak = max_loss_streak.max(current_streak);
        }

        if trade.pnl > Decimal::ZERO {
            gross_profit += trade.pnl;
        } else {
            gross_loss += trade.pnl.abs();
        }

        if i > 0 {
            let prior = &trades[i - 1];
            if !prior.is_win
                && trade.risk_amount > prior.risk_amount * thresholds.revenge_multiplier
            {
                revenge_detected = true;
            }
        }

        let equity = trade.balance + trade.pnl;
        let peak = peak_equity.get_or_insert(equity);
        if equity > *peak {
            *peak = equity;
        } else if *peak > Decimal::ZERO {
            let drawdown = (*peak - equity) / *peak * Decimal::ONE_HUNDRED;
            if drawdown > max_drawdown_pct {
                max_drawdown_pct = drawdown;
            }
        }
    }

    let win_rate_pct =
        Decimal::from(wins) / Decimal::from(trades.len()) * Decimal::ONE_HUNDRED;
    let profit_factor = if gross_loss > Decimal::ZERO {
        (gross_profit / gross_loss).min(PROFIT_FACTOR_CAP)
    } else {
        PROFIT_FACTOR_CAP
    };

    HistoryFacts {
        max_loss_streak,
        revenge_detected,
        win_rate_pct,
        profit_factor,
        max_drawdown_pct,
    }
}

/// Population standard deviation. The square root goes through f64; the
/// comparison it feeds tolerates that precision.
fn std_deviation(values: &[Decimal], mean: Decimal) -> Decimal {
    let variance = values
        .iter()
        .map(|v| (*v - mean) * (*v - mean))
        .sum::<Decimal>()
        / Decimal::from(values.len());
    let std = variance.to_f64().unwrap_or(0.0).sqrt();
    Decimal::from_f64(std).unwrap_or(Decimal::ZERO)
}

fn clamp_score(score: i32) -> u8 {
    score.clamp(0, 100) as u8
}

fn decimal_to_score(value: Decimal) -> u8 {
    value
        .round()
        .to_u32()
        .unwrap_or(0)
        .min(100) as u8
}

fn summary_for(overall: u8) -> &'static str {
    match overall {
        80..=100 => "Strong discipline across risk, behavior, and system quality.",
        60..=79 => "Solid foundation with specific areas to tighten.",
        40..=59 => "Meaningful leaks detected; address the warnings before sizing up.",
        _ => "Trading health is poor; cut risk while rebuilding consistency.",
    }
}
