//! Monte Carlo outcome-distribution estimation.
//!
//! Runs many independent randomized trade sequences over the same
//! configuration and reports the spread of terminal balances plus the
//! probability of ruin. Each call constructs its own generator from an
//! optional seed, so concurrent runs never share randomness and a fixed
//! seed reproduces the summary bit for bit.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Bernoulli, Distribution};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;
use tradecast_domain::config::SimulationConfig;
use tradecast_domain::enums::RiskBasis;
use tradecast_domain::results::MonteCarloSummary;
use tradecast_domain::value_objects::Percentage;

/// Number of independent iterations per run.
pub const MONTE_CARLO_ITERATIONS: usize = 500;

/// Dynamic sizing treats an account shrunk below this fraction of its
/// starting balance as blown; fixed sizing only at zero.
const DYNAMIC_RUIN_FRACTION: Decimal = Decimal::from_parts(1, 0, 0, false, 2); // 0.01

/// Monte Carlo risk engine.
#[derive(Debug, Clone)]
pub struct MonteCarloEngine {
    iterations: usize,
    seed: Option<u64>,
}

impl MonteCarloEngine {
    /// Creates an engine with the standard iteration count.
    #[must_use]
    pub fn new() -> Self {
        Self {
            iterations: MONTE_CARLO_ITERATIONS,
            seed: None,
        }
    }

    /// Fixes the RNG seed for reproducible runs.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides the iteration count.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Runs the full set of iterations for a validated config.
    pub fn run(&self, config: &SimulationConfig) -> MonteCarloSummary {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let utilization = Percentage::from_percent(config.capital_utilization_pct);
        let risk_rate = Percentage::from_percent(config.risk_per_trade_pct);
        let win_prob = Percentage::from_percent(config.win_rate_pct)
            .fraction()
            .to_f64()
            .unwrap_or(0.0)
            .clamp(0.0, 1.0);
        let coin = Bernoulli::new(win_prob).unwrap();

        let ruin_threshold = match config.risk_basis {
            RiskBasis::Fixed => Decimal::ZERO,
            RiskBasis::Dynamic => config.initial_balance * DYNAMIC_RUIN_FRACTION,
        };

        let trades_per_iteration = config.total_trades();
        let mut terminal_balances = Vec::with_capacity(self.iterations);
        let mut max_drawdowns = Vec::with_capacity(self.iterations);
        let mut ruined_iterations: usize = 0;

        for _ in 0..self.iterations {
            let mut balance = config.initial_balance;
            let mut peak = balance;
            let mut max_drawdown = Decimal::ZERO;

            for _ in 0..trades_per_iteration {
                let sizing_balance = match config.risk_basis {
                    RiskBasis::Fixed => config.initial_balance,
                    RiskBasis::Dynamic => balance,
                };
                let risk_amount =
                    sizing_balance * utilization.fraction() * risk_rate.fraction();

                if coin.sample(&mut rng) {
                    balance += risk_amount * config.risk_reward_ratio - config.fees_per_trade;
                } else {
                    balance -= risk_amount + config.fees_per_trade;
                }

                if balance > peak {
                    peak = balance;
                } else if peak > Decimal::ZERO {
                    let drawdown = (peak - balance.max(Decimal::ZERO)) / peak
                        * Decimal::ONE_HUNDRED;
                    if drawdown > max_drawdown {
                        max_drawdown = drawdown;
                    }
                }

                if balance <= ruin_threshold {
                    balance = Decimal::ZERO;
                    ruined_iterations += 1;
                    break;
                }
            }

            terminal_balances.push(balance);
            max_drawdowns.push(max_drawdown);
        }

        terminal_balances.sort();

        let iterations = terminal_balances.len();
        let ruin_probability_pct = Decimal::from(ruined_iterations) / Decimal::from(iterations)
            * Decimal::ONE_HUNDRED;
        let mean_max_drawdown_pct =
            max_drawdowns.iter().sum::<Decimal>() / Decimal::from(iterations);

        debug!(
            iterations,
            ruined_iterations,
            %ruin_probability_pct,
            "monte carlo run complete"
        );

        MonteCarloSummary {
            iterations,
            worst_case: terminal_balances[percentile_index(iterations, 5)],
            median: terminal_balances[percentile_index(iterations, 50)],
            best_case: terminal_balances[percentile_index(iterations, 95)],
            ruin_probability_pct,
            mean_max_drawdown_pct,
        }
    }
}

impl Default for MonteCarloEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Index of the `pct`-th percentile in a sorted sample:
/// `floor(len * pct / 100)`, clamped to the last element.
fn percentile_index(len: usize, pct: usize) -> usize {
    (len * pct / 100).min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_config() -> SimulationConfig {
        SimulationConfig::new(dec!(10000))
            .with_capital_utilization_pct(dec!(10))
            .with_risk_per_trade_pct(dec!(2))
            .with_trades_per_day(5)
            .with_simulation_days(10)
    }

    #[test]
    fn test_percentile_index_policy() {
        assert_eq!(percentile_index(500, 5), 25);
        assert_eq!(percentile_index(500, 50), 250);
        assert_eq!(percentile_index(500, 95), 475);
        // Clamped for degenerate sample sizes.
        assert_eq!(percentile_index(1, 95), 0);
    }

    #[test]
    fn test_percentiles_are_ordered() {
        let summary = MonteCarloEngine::new().with_seed(3).run(&base_config());
        assert!(summary.worst_case <= summary.median);
        assert!(summary.median <= summary.best_case);
        assert_eq!(summary.iterations, MONTE_CARLO_ITERATIONS);
    }

    #[test]
    fn test_ruin_probability_bounds() {
        let summary = MonteCarloEngine::new().with_seed(3).run(&base_config());
        assert!(summary.ruin_probability_pct >= Decimal::ZERO);
        assert!(summary.ruin_probability_pct <= Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_fixed_seed_reproduces_summary() {
        let config = base_config();
        let a = MonteCarloEngine::new().with_seed(99).run(&config);
        let b = MonteCarloEngine::new().with_seed(99).run(&config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let config = base_config();
        let a = MonteCarloEngine::new().with_seed(1).run(&config);
        let b = MonteCarloEngine::new().with_seed(2).run(&config);
        // Identical output across seeds would mean the seed is ignored.
        assert_ne!(a, b);
    }

    #[test]
    fn test_certain_loss_always_ruins() {
        let config = SimulationConfig::new(dec!(1000))
            .with_capital_utilization_pct(dec!(100))
            .with_risk_per_trade_pct(dec!(100))
            .with_win_rate_pct(dec!(0))
            .with_trades_per_day(1)
            .with_simulation_days(10);
        let summary = MonteCarloEngine::new().with_seed(5).run(&config);
        assert_eq!(summary.ruin_probability_pct, Decimal::ONE_HUNDRED);
        assert_eq!(summary.best_case, Decimal::ZERO);
    }

    #[test]
    fn test_certain_win_never_ruins() {
        let config = base_config().with_win_rate_pct(dec!(100));
        let summary = MonteCarloEngine::new().with_seed(5).run(&config);
        assert_eq!(summary.ruin_probability_pct, Decimal::ZERO);
        assert!(summary.worst_case > config.initial_balance);
    }

    #[test]
    fn test_dynamic_ruin_threshold_trips_above_zero() {
        // Dynamic sizing can only asymptote toward zero; the 1% threshold
        // is what lets those iterations register as ruined.
        let config = SimulationConfig::new(dec!(1000))
            .with_capital_utilization_pct(dec!(100))
            .with_risk_per_trade_pct(dec!(90))
            .with_win_rate_pct(dec!(0))
            .with_trades_per_day(10)
            .with_simulation_days(10)
            .with_risk_basis(RiskBasis::Dynamic);
        let summary = MonteCarloEngine::new().with_seed(5).run(&config);
        assert_eq!(summary.ruin_probability_pct, Decimal::ONE_HUNDRED);
    }
}
