//! The top-level simulation engine.
//!
//! [`SimulationEngine`] validates a config, runs the compounding projector
//! under the configured outcome mode, runs the Monte Carlo engine over the
//! same config, and merges both into one immutable
//! [`SimulationResult`].

use crate::monte_carlo::{MONTE_CARLO_ITERATIONS, MonteCarloEngine};
use crate::outcome::{ExpectationOutcomes, OutcomeMode, ShuffledOutcomes};
use crate::projector::{Projection, project};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use tracing::info;
use tradecast_domain::config::SimulationConfig;
use tradecast_domain::error::EngineError;
use tradecast_domain::results::{PROFIT_FACTOR_CAP, SimulationResult, SimulationSummary};
use tradecast_domain::value_objects::Percentage;

/// Engine-level policy, fixed at construction.
///
/// This is the explicit replacement for the original's process-wide numeric
/// context: every knob that used to be ambient global state is set once
/// here and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// How per-trade outcomes are assigned in the projection.
    pub outcome_mode: OutcomeMode,
    /// Monte Carlo iteration count.
    pub monte_carlo_iterations: usize,
    /// Fixed RNG seed; `None` draws from OS entropy per call.
    pub seed: Option<u64>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            outcome_mode: OutcomeMode::Expectation,
            monte_carlo_iterations: MONTE_CARLO_ITERATIONS,
            seed: None,
        }
    }
}

/// Runs complete simulations from trading assumptions.
#[derive(Debug, Clone, Default)]
pub struct SimulationEngine {
    settings: EngineSettings,
}

impl SimulationEngine {
    /// Creates an engine with the given settings.
    #[must_use]
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    /// Runs the projection and the Monte Carlo estimate for one config.
    ///
    /// Fails fast with a `Validation` error before any simulation work if
    /// the config is malformed; valid configs never error.
    pub fn simulate(&self, config: &SimulationConfig) -> Result<SimulationResult, EngineError> {
        config.validate()?;

        let projection = match self.settings.outcome_mode {
            OutcomeMode::Expectation => {
                let mut outcomes =
                    ExpectationOutcomes::new(Percentage::from_percent(config.win_rate_pct));
                project(config, &mut outcomes)
            }
            OutcomeMode::ShuffledSequence => {
                let mut rng = match self.settings.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_os_rng(),
                };
                let mut outcomes = ShuffledOutcomes::generate(
                    config.total_trades(),
                    Percentage::from_percent(config.win_rate_pct),
                    &mut rng,
                );
                project(config, &mut outcomes)
            }
        };

        let mut monte_carlo = MonteCarloEngine::new()
            .with_iterations(self.settings.monte_carlo_iterations);
        if let Some(seed) = self.settings.seed {
            monte_carlo = monte_carlo.with_seed(seed);
        }
        let monte_carlo = monte_carlo.run(config);

        let summary = build_summary(config, &projection);

        info!(
            days_simulated = summary.days_simulated,
            trades = summary.trades_executed,
            %summary.final_balance,
            "simulation complete"
        );

        Ok(SimulationResult {
            config: config.clone(),
            summary,
            daily_breakdown: projection.daily,
            monte_carlo,
            trade_log: projection.trade_log,
        })
    }
}

/// Assembles the aggregate summary from a finished projection.
fn build_summary(config: &SimulationConfig, projection: &Projection) -> SimulationSummary {
    let total_profit = projection.final_balance - config.initial_balance;
    let total_roi_pct = total_profit / config.initial_balance * Decimal::ONE_HUNDRED;

    let profit_factor = if projection.gross_loss > Decimal::ZERO {
        (projection.gross_profit / projection.gross_loss).min(PROFIT_FACTOR_CAP)
    } else {
        PROFIT_FACTOR_CAP
    };

    let expectancy = if projection.trades_executed > 0 {
        total_profit / Decimal::from(projection.trades_executed)
    } else {
        Decimal::ZERO
    };

    SimulationSummary {
        initial_balance: config.initial_balance,
        final_balance: projection.final_balance,
        total_profit,
        total_roi_pct,
        max_drawdown_pct: projection.max_drawdown_pct,
        profit_factor,
        expectancy,
        risk_of_ruin_pct: closed_form_risk_of_ruin(config),
        days_simulated: projection.daily.len() as u32,
        trades_executed: projection.trades_executed,
    }
}

/// Closed-form risk-of-ruin approximation.
///
/// With a positive edge (`win_prob * RR - loss_prob > 0`) the estimate is
/// `((1 - win_prob) / (win_prob * RR)) ^ (1 / risk_rate)`, clamped to
/// [0, 100]%. Without an edge, ruin is certain over a long enough horizon.
pub fn closed_form_risk_of_ruin(config: &SimulationConfig) -> Decimal {
    let win_prob = Percentage::from_percent(config.win_rate_pct).fraction();
    let loss_prob = Decimal::ONE - win_prob;
    let edge = win_prob * config.risk_reward_ratio - loss_prob;

    if edge <= Decimal::ZERO {
        return Decimal::ONE_HUNDRED;
    }

    let risk_rate = Percentage::from_percent(config.risk_per_trade_pct).fraction();
    let base = loss_prob / (win_prob * config.risk_reward_ratio);

    // Fractional powers are not exact in Decimal; the estimate itself is an
    // approximation, so f64 is precise enough here.
    let base = base.to_f64().unwrap_or(1.0);
    let exponent = (Decimal::ONE / risk_rate).to_f64().unwrap_or(1.0);
    let ruin = base.powf(exponent) * 100.0;

    Decimal::from_f64(ruin)
        .unwrap_or(Decimal::ZERO)
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}
