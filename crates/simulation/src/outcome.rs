//! Per-trade outcome assignment.
//!
//! Two materially different models exist for deciding what a single trade
//! does to the balance, and both are preserved as named modes behind the
//! [`OutcomeSource`] trait:
//!
//! - [`ExpectationOutcomes`] books each trade at its probability-weighted
//!   expected value. Fully deterministic; the equity curve is smooth.
//! - [`ShuffledOutcomes`] pre-generates the exact win/loss multiset implied
//!   by the win rate, shuffles it once, and replays it. The aggregate win
//!   rate is deterministic while the ordering depends on the injected RNG.

use rand::Rng;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tradecast_domain::enums::TradeOutcome;
use tradecast_domain::value_objects::Percentage;

/// Which outcome model a simulation run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeMode {
    /// Book every trade at its expected value.
    Expectation,
    /// Replay a shuffled fixed win/loss sequence.
    ShuffledSequence,
}

/// Effect of one settled trade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeFill {
    /// Signed balance change, fees included.
    pub net_pnl: Decimal,
    /// Contribution to gross winning proceeds.
    pub gross_profit: Decimal,
    /// Contribution to gross losses. All fees land here.
    pub gross_loss: Decimal,
    /// Win/loss label for the trade log.
    pub outcome: TradeOutcome,
}

/// Produces one [`TradeFill`] per trade given the sized risk and reward.
pub trait OutcomeSource {
    /// Settles the next trade.
    fn next_fill(
        &mut self,
        risk_amount: Decimal,
        reward_amount: Decimal,
        fees: Decimal,
    ) -> TradeFill;
}

/// Deterministic expected-value model.
///
/// Each trade's P&L is `win_prob * reward - loss_prob * risk - fees`. The
/// probability-weighted pieces also feed the gross profit/loss buckets so a
/// profit factor is still meaningful without discrete wins and losses.
#[derive(Debug, Clone)]
pub struct ExpectationOutcomes {
    win_prob: Decimal,
    loss_prob: Decimal,
}

impl ExpectationOutcomes {
    /// Creates the model from a win-rate percentage.
    #[must_use]
    pub fn new(win_rate: Percentage) -> Self {
        Self {
            win_prob: win_rate.fraction(),
            loss_prob: win_rate.complement(),
        }
    }
}

impl OutcomeSource for ExpectationOutcomes {
    fn next_fill(
        &mut self,
        risk_amount: Decimal,
        reward_amount: Decimal,
        fees: Decimal,
    ) -> TradeFill {
        let expected_win = self.win_prob * reward_amount;
        let expected_loss = self.loss_prob * risk_amount;
        let net_pnl = expected_win - expected_loss - fees;

        TradeFill {
            net_pnl,
            gross_profit: expected_win,
            gross_loss: expected_loss + fees,
            // An expectation trade has no coin flip; label it by the sign
            // of its net effect so the trade log stays meaningful.
            outcome: if net_pnl >= Decimal::ZERO {
                TradeOutcome::Win
            } else {
                TradeOutcome::Loss
            },
        }
    }
}

/// Shuffled fixed-sequence model.
///
/// Exactly `round(total_trades * win_rate)` wins are generated up front,
/// the remainder losses, shuffled once with the supplied generator, then
/// replayed in order.
#[derive(Debug, Clone)]
pub struct ShuffledOutcomes {
    outcomes: Vec<bool>,
    cursor: usize,
}

impl ShuffledOutcomes {
    /// Generates and shuffles the outcome sequence.
    #[must_use]
    pub fn generate<R: Rng>(total_trades: u64, win_rate: Percentage, rng: &mut R) -> Self {
        let wins = (Decimal::from(total_trades) * win_rate.fraction())
            .round()
            .to_u64()
            .unwrap_or(0)
            .min(total_trades);

        let mut outcomes = Vec::with_capacity(total_trades as usize);
        outcomes.extend(std::iter::repeat_n(true, wins as usize));
        outcomes.extend(std::iter::repeat_n(false, (total_trades - wins) as usize));
        outcomes.shuffle(rng);

        Self {
            outcomes,
            cursor: 0,
        }
    }

    /// Number of wins in the generated sequence.
    #[must_use]
    pub fn win_count(&self) -> usize {
        self.outcomes.iter().filter(|w| **w).count()
    }
}

impl OutcomeSource for ShuffledOutcomes {
    fn next_fill(
        &mut self,
        risk_amount: Decimal,
        reward_amount: Decimal,
        fees: Decimal,
    ) -> TradeFill {
        // A projector that stops early on ruin never exhausts the sequence;
        // reads past the end settle as losses rather than panicking.
        let is_win = self.outcomes.get(self.cursor).copied().unwrap_or(false);
        self.cursor += 1;

        if is_win {
            TradeFill {
                net_pnl: reward_amount - fees,
                gross_profit: reward_amount,
                gross_loss: fees,
                outcome: TradeOutcome::Win,
            }
        } else {
            TradeFill {
                net_pnl: -risk_amount - fees,
                gross_profit: Decimal::ZERO,
                gross_loss: risk_amount + fees,
                outcome: TradeOutcome::Loss,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal_macros::dec;

    #[test]
    fn test_expectation_positive_edge() {
        // 60% win rate at 2R: EV = 0.6*200 - 0.4*100 = 80 per trade.
        let mut source = ExpectationOutcomes::new(Percentage::from_percent(dec!(60)));
        let fill = source.next_fill(dec!(100), dec!(200), Decimal::ZERO);
        assert_eq!(fill.net_pnl, dec!(80));
        assert_eq!(fill.outcome, TradeOutcome::Win);
        assert_eq!(fill.gross_profit, dec!(120));
        assert_eq!(fill.gross_loss, dec!(40));
    }

    #[test]
    fn test_expectation_fees_reduce_pnl() {
        let mut source = ExpectationOutcomes::new(Percentage::from_percent(dec!(50)));
        let without = source.next_fill(dec!(100), dec!(100), Decimal::ZERO);
        let with = source.next_fill(dec!(100), dec!(100), dec!(2));
        assert_eq!(without.net_pnl - with.net_pnl, dec!(2));
        assert_eq!(with.gross_loss - without.gross_loss, dec!(2));
    }

    #[test]
    fn test_shuffled_win_count_is_exact() {
        let mut rng = StdRng::seed_from_u64(7);
        let source = ShuffledOutcomes::generate(90, Percentage::from_percent(dec!(50)), &mut rng);
        assert_eq!(source.win_count(), 45);
    }

    #[test]
    fn test_shuffled_rounding_of_win_count() {
        let mut rng = StdRng::seed_from_u64(7);
        // 10 trades at 55% -> round(5.5) banker's-rounds to 6... Decimal
        // round() half-to-even gives 6 here (5.5 -> 6).
        let source = ShuffledOutcomes::generate(10, Percentage::from_percent(dec!(55)), &mut rng);
        assert_eq!(source.win_count(), 6);
    }

    #[test]
    fn test_shuffled_fill_amounts() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut source =
            ShuffledOutcomes::generate(1, Percentage::from_percent(dec!(100)), &mut rng);
        let fill = source.next_fill(dec!(50), dec!(150), dec!(1));
        assert_eq!(fill.outcome, TradeOutcome::Win);
        assert_eq!(fill.net_pnl, dec!(149));
        assert_eq!(fill.gross_loss, dec!(1));
    }

    #[test]
    fn test_shuffled_same_seed_same_order() {
        let win_rate = Percentage::from_percent(dec!(40));
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let a = ShuffledOutcomes::generate(50, win_rate, &mut rng_a);
        let b = ShuffledOutcomes::generate(50, win_rate, &mut rng_b);
        assert_eq!(a.outcomes, b.outcomes);
    }

    #[test]
    fn test_shuffled_exhaustion_settles_as_loss() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut source =
            ShuffledOutcomes::generate(1, Percentage::from_percent(dec!(100)), &mut rng);
        let _ = source.next_fill(dec!(50), dec!(100), Decimal::ZERO);
        let past_end = source.next_fill(dec!(50), dec!(100), Decimal::ZERO);
        assert_eq!(past_end.outcome, TradeOutcome::Loss);
    }
}
