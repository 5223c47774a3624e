//! Day-by-day compounding projection.
//!
//! The projector walks the configured horizon one day at a time, sizing
//! each trade from the risk basis and settling it through the supplied
//! [`OutcomeSource`]. The balance clamps at zero and the run stops there;
//! days after ruin are truncated, never padded.

use crate::outcome::OutcomeSource;
use rust_decimal::Decimal;
use tradecast_domain::config::SimulationConfig;
use tradecast_domain::enums::RiskBasis;
use tradecast_domain::results::{DailyResult, TRADE_LOG_LIMIT, TradeLogEntry};
use tradecast_domain::value_objects::Percentage;

/// Raw output of a projection, before summary assembly.
#[derive(Debug, Clone)]
pub struct Projection {
    /// Day-by-day breakdown in day order.
    pub daily: Vec<DailyResult>,
    /// First [`TRADE_LOG_LIMIT`] settled trades.
    pub trade_log: Vec<TradeLogEntry>,
    /// Balance after the last simulated trade, clamped at zero.
    pub final_balance: Decimal,
    /// Largest percentage decline from the running peak.
    pub max_drawdown_pct: Decimal,
    /// Accumulated gross winning proceeds.
    pub gross_profit: Decimal,
    /// Accumulated gross losses, fees included.
    pub gross_loss: Decimal,
    /// Trades actually settled before the run ended.
    pub trades_executed: u64,
}

/// Runs the compounding projection for a validated config.
pub fn project<O: OutcomeSource>(config: &SimulationConfig, outcomes: &mut O) -> Projection {
    let utilization = Percentage::from_percent(config.capital_utilization_pct);
    let risk_rate = Percentage::from_percent(config.risk_per_trade_pct);

    let mut current_balance = config.initial_balance;
    let mut peak_balance = config.initial_balance;
    let mut max_drawdown_pct = Decimal::ZERO;
    let mut gross_profit = Decimal::ZERO;
    let mut gross_loss = Decimal::ZERO;
    let mut trades_executed: u64 = 0;

    let mut daily = Vec::with_capacity(config.simulation_days as usize);
    let mut trade_log = Vec::with_capacity(TRADE_LOG_LIMIT);

    'days: for day in 1..=config.simulation_days {
        let start_balance = current_balance;
        let mut daily_pnl = Decimal::ZERO;
        let mut ruined = false;

        for _ in 0..config.trades_per_day {
            let sizing_balance = match config.risk_basis {
                RiskBasis::Fixed => config.initial_balance,
                RiskBasis::Dynamic => current_balance,
            };
            let active_capital = sizing_balance * utilization.fraction();
            let risk_amount = active_capital * risk_rate.fraction();
            let reward_amount = risk_amount * config.risk_reward_ratio;

            let fill = outcomes.next_fill(risk_amount, reward_amount, config.fees_per_trade);

            current_balance += fill.net_pnl;
            daily_pnl += fill.net_pnl;
            trades_executed += 1;
            gross_profit += fill.gross_profit;
            gross_loss += fill.gross_loss;

            if current_balance <= Decimal::ZERO {
                // The account cannot go below zero; the shortfall stays
                // with the broker, not the trader.
                daily_pnl += -current_balance;
                current_balance = Decimal::ZERO;
                ruined = true;
            }

            if trade_log.len() < TRADE_LOG_LIMIT {
                trade_log.push(TradeLogEntry {
                    trade_no: trades_executed,
                    day,
                    result: fill.outcome,
                    profit_loss: fill.net_pnl,
                    balance: current_balance,
                });
            }

            if current_balance > peak_balance {
                peak_balance = current_balance;
            } else if peak_balance > Decimal::ZERO {
                let drawdown =
                    (peak_balance - current_balance) / peak_balance * Decimal::ONE_HUNDRED;
                if drawdown > max_drawdown_pct {
                    max_drawdown_pct = drawdown;
                }
            }

            if ruined {
                break;
            }
        }

        let roi_pct = if start_balance > Decimal::ZERO {
            daily_pnl / start_balance * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        daily.push(DailyResult {
            day,
            start_balance,
            profit_loss: daily_pnl,
            end_balance: current_balance,
            roi_pct,
        });

        if ruined {
            break 'days;
        }
    }

    Projection {
        daily,
        trade_log,
        final_balance: current_balance,
        max_drawdown_pct,
        gross_profit,
        gross_loss,
        trades_executed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::{ExpectationOutcomes, ShuffledOutcomes};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal_macros::dec;
    use tradecast_domain::enums::TradeOutcome;

    fn base_config() -> SimulationConfig {
        SimulationConfig::new(dec!(10000))
            .with_capital_utilization_pct(dec!(10))
            .with_risk_per_trade_pct(dec!(2))
            .with_trades_per_day(5)
            .with_simulation_days(10)
    }

    fn expectation(config: &SimulationConfig) -> ExpectationOutcomes {
        ExpectationOutcomes::new(Percentage::from_percent(config.win_rate_pct))
    }

    #[test]
    fn test_days_are_contiguous_from_one() {
        let config = base_config();
        let projection = project(&config, &mut expectation(&config));
        assert_eq!(projection.daily.len(), 10);
        for (i, day) in projection.daily.iter().enumerate() {
            assert_eq!(day.day, i as u32 + 1);
        }
    }

    #[test]
    fn test_full_win_rate_grows_balance() {
        let config = base_config().with_win_rate_pct(dec!(100));
        let projection = project(&config, &mut expectation(&config));
        assert!(projection.final_balance > config.initial_balance);
    }

    #[test]
    fn test_zero_win_rate_shrinks_balance() {
        let config = base_config().with_win_rate_pct(dec!(0));
        let projection = project(&config, &mut expectation(&config));
        assert!(projection.final_balance < config.initial_balance);
        assert!(projection.final_balance >= Decimal::ZERO);
    }

    #[test]
    fn test_ruin_truncates_days_and_clamps_at_zero() {
        // 0% win rate risking the whole account each trade dies on day one.
        let config = SimulationConfig::new(dec!(1000))
            .with_capital_utilization_pct(dec!(100))
            .with_risk_per_trade_pct(dec!(100))
            .with_win_rate_pct(dec!(0))
            .with_trades_per_day(3)
            .with_simulation_days(30);
        let projection = project(&config, &mut expectation(&config));
        assert_eq!(projection.final_balance, Decimal::ZERO);
        assert_eq!(projection.daily.len(), 1);
        assert_eq!(projection.max_drawdown_pct, dec!(100));
        // Trades stop mid-day once the balance is gone.
        assert!(projection.trades_executed < config.total_trades());
    }

    #[test]
    fn test_expectation_mode_is_deterministic() {
        let config = base_config();
        let a = project(&config, &mut expectation(&config));
        let b = project(&config, &mut expectation(&config));
        assert_eq!(a.daily, b.daily);
        assert_eq!(a.final_balance, b.final_balance);
    }

    #[test]
    fn test_fixed_risk_sizes_from_initial_balance() {
        let config = base_config()
            .with_risk_basis(RiskBasis::Fixed)
            .with_win_rate_pct(dec!(100))
            .with_fees_per_trade(dec!(0));
        let projection = project(&config, &mut expectation(&config));
        // Every trade risks the same amount, so every trade nets the same:
        // 10000 * 10% * 2% * RR 2 = 40.
        let first = projection.trade_log.first().unwrap();
        let last = projection.trade_log.last().unwrap();
        assert_eq!(first.profit_loss, dec!(40));
        assert_eq!(first.profit_loss, last.profit_loss);
    }

    #[test]
    fn test_dynamic_risk_compounds_position_size() {
        let config = base_config()
            .with_risk_basis(RiskBasis::Dynamic)
            .with_win_rate_pct(dec!(100));
        let projection = project(&config, &mut expectation(&config));
        let first = projection.trade_log.first().unwrap();
        let last = projection.trade_log.last().unwrap();
        assert!(last.profit_loss > first.profit_loss);
    }

    #[test]
    fn test_trade_log_capped_at_limit() {
        let config = base_config()
            .with_trades_per_day(20)
            .with_simulation_days(10);
        let projection = project(&config, &mut expectation(&config));
        assert_eq!(projection.trades_executed, 200);
        assert_eq!(projection.trade_log.len(), TRADE_LOG_LIMIT);
    }

    #[test]
    fn test_shuffled_mode_hits_exact_win_rate() {
        let config = base_config().with_win_rate_pct(dec!(40));
        let mut rng = StdRng::seed_from_u64(11);
        let mut outcomes = ShuffledOutcomes::generate(
            config.total_trades(),
            Percentage::from_percent(config.win_rate_pct),
            &mut rng,
        );
        let projection = project(&config, &mut outcomes);
        let wins = projection
            .trade_log
            .iter()
            .filter(|t| t.result == TradeOutcome::Win)
            .count();
        // 50 trades at 40% -> exactly 20 wins in the log (log holds all 50).
        assert_eq!(projection.trade_log.len(), 50);
        assert_eq!(wins, 20);
    }

    #[test]
    fn test_fees_reduce_final_balance() {
        let config = base_config();
        let free = project(&config, &mut expectation(&config));
        let config_with_fees = base_config().with_fees_per_trade(dec!(2));
        let taxed = project(&config_with_fees, &mut expectation(&config_with_fees));
        assert!(taxed.final_balance < free.final_balance);
    }

    #[test]
    fn test_ruin_day_roi_measured_against_start() {
        let config = SimulationConfig::new(dec!(1000))
            .with_capital_utilization_pct(dec!(100))
            .with_risk_per_trade_pct(dec!(100))
            .with_win_rate_pct(dec!(0))
            .with_trades_per_day(1)
            .with_simulation_days(5);
        let projection = project(&config, &mut expectation(&config));
        let last = projection.daily.last().unwrap();
        assert_eq!(last.end_balance, Decimal::ZERO);
        // Ruin day still reports ROI against its positive starting balance.
        assert_eq!(last.roi_pct, dec!(-100));
    }
}
