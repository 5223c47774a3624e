//! Command Line Interface for the tradecast toolkit.
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use prettytable::{Table, row};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tradecast_analysis::goal::plan_goal;
use tradecast_analysis::health::HealthAnalyzer;
use tradecast_domain::config::SimulationConfig;
use tradecast_domain::enums::RiskBasis;
use tradecast_domain::goal::GoalPlanInput;
use tradecast_domain::health::TradeRecord;
use tradecast_domain::report::{GoalPlanReport, HealthReportView, SimulationReport};
use tradecast_simulation::engine::{EngineSettings, SimulationEngine};
use tradecast_simulation::outcome::OutcomeMode;

/// Number of daily rows shown in table mode before the output is elided.
const DAILY_TABLE_LIMIT: usize = 30;
/// Number of trade-log rows shown in table mode.
const TRADE_TABLE_LIMIT: usize = 10;

#[derive(Parser)]
#[command(name = "tradecast")]
#[command(about = "Trading outcome simulator and risk analysis toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a compounding projection plus Monte Carlo risk estimate
    Simulate {
        /// Start from a named preset (scalper, day-trader, swing-trader, gambler)
        #[arg(long)]
        preset: Option<String>,

        /// Initial account balance
        #[arg(long, default_value = "10000")]
        balance: Decimal,

        /// Capital utilization in percent
        #[arg(long, default_value = "30")]
        utilization: Decimal,

        /// Risk per trade in percent
        #[arg(long, default_value = "1")]
        risk: Decimal,

        /// Risk-reward ratio
        #[arg(long, default_value = "2")]
        rr: Decimal,

        /// Win rate in percent
        #[arg(long, default_value = "50")]
        win_rate: Decimal,

        /// Trades per day
        #[arg(long, default_value_t = 3)]
        trades_per_day: u32,

        /// Days to simulate
        #[arg(long, default_value_t = 30)]
        days: u32,

        /// Flat fee per trade
        #[arg(long, default_value = "0")]
        fees: Decimal,

        /// Position sizing basis: dynamic or fixed
        #[arg(long, default_value = "dynamic")]
        risk_basis: String,

        /// Outcome model: expectation or shuffled
        #[arg(long, default_value = "expectation")]
        mode: String,

        /// Fixed RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Emit the full report as JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Solve the monthly return required to reach a balance target
    Goal {
        /// Current balance
        #[arg(long)]
        balance: Decimal,

        /// Target balance
        #[arg(long)]
        target: Decimal,

        /// Months available
        #[arg(long)]
        months: u32,

        /// Emit the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Score a trade history for risk, behavior, and system quality
    Health {
        /// Path to a JSON array of trades:
        /// [{"pnl": "-100", "risk_amount": "100", "balance": "10000", "is_win": false}, ...]
        #[arg(long)]
        trades_file: PathBuf,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            preset,
            balance,
            utilization,
            risk,
            rr,
            win_rate,
            trades_per_day,
            days,
            fees,
            risk_basis,
            mode,
            seed,
            json,
        } => {
            let config = match preset.as_deref() {
                Some("scalper") => SimulationConfig::scalper(),
                Some("day-trader") => SimulationConfig::day_trader(),
                Some("swing-trader") => SimulationConfig::swing_trader(),
                Some("gambler") => SimulationConfig::gambler(),
                Some(other) => bail!("unknown preset `{other}`"),
                None => SimulationConfig::new(balance)
                    .with_capital_utilization_pct(utilization)
                    .with_risk_per_trade_pct(risk)
                    .with_risk_reward_ratio(rr)
                    .with_win_rate_pct(win_rate)
                    .with_trades_per_day(trades_per_day)
                    .with_simulation_days(days)
                    .with_fees_per_trade(fees)
                    .with_risk_basis(parse_risk_basis(&risk_basis)?),
            };

            let settings = EngineSettings {
                outcome_mode: parse_mode(&mode)?,
                seed,
                ..EngineSettings::default()
            };

            info!(?settings.outcome_mode, "running simulation");
            let result = SimulationEngine::new(settings).simulate(&config)?;
            let report = SimulationReport::from(&result);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_simulation(&report);
            }
        }
        Commands::Goal {
            balance,
            target,
            months,
            json,
        } => {
            let input = GoalPlanInput {
                initial_balance: balance,
                target_balance: target,
                deadline_months: months,
            };
            let result = plan_goal(&input)?;
            let report = GoalPlanReport::from(&result);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Required monthly return: {}", report.required_monthly_return);
                println!("Feasibility: {}", report.feasibility);
                println!("{}", report.message);
            }
        }
        Commands::Health { trades_file, json } => {
            let raw = fs::read_to_string(&trades_file)
                .with_context(|| format!("reading {}", trades_file.display()))?;
            let trades: Vec<TradeRecord> =
                serde_json::from_str(&raw).context("parsing trade history")?;

            let report = HealthAnalyzer::default().analyze(&trades);
            let view = HealthReportView::from(&report);

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_health(&view);
            }
        }
    }

    Ok(())
}

fn parse_risk_basis(value: &str) -> Result<RiskBasis> {
    match value {
        "dynamic" => Ok(RiskBasis::Dynamic),
        "fixed" => Ok(RiskBasis::Fixed),
        other => bail!("unknown risk basis `{other}` (expected `dynamic` or `fixed`)"),
    }
}

fn parse_mode(value: &str) -> Result<OutcomeMode> {
    match value {
        "expectation" => Ok(OutcomeMode::Expectation),
        "shuffled" => Ok(OutcomeMode::ShuffledSequence),
        other => bail!("unknown outcome mode `{other}` (expected `expectation` or `shuffled`)"),
    }
}

fn print_simulation(report: &SimulationReport) {
    let mut summary = Table::new();
    summary.add_row(row!["Initial balance", report.summary.initial_balance]);
    summary.add_row(row!["Final balance", report.summary.final_balance]);
    summary.add_row(row!["Total profit", report.summary.total_profit]);
    summary.add_row(row!["Total ROI", report.summary.total_roi]);
    summary.add_row(row!["Max drawdown", report.summary.max_drawdown]);
    summary.add_row(row!["Profit factor", report.summary.profit_factor]);
    summary.add_row(row!["Expectancy / trade", report.summary.expectancy]);
    summary.add_row(row!["Risk of ruin", report.summary.risk_of_ruin]);
    summary.add_row(row!["Days simulated", report.summary.days_simulated]);
    println!("Summary");
    summary.printstd();

    let mc = &report.monte_carlo;
    let mut monte_carlo = Table::new();
    monte_carlo.add_row(row!["Iterations", mc.iterations]);
    monte_carlo.add_row(row!["Worst case (p5)", mc.worst_case]);
    monte_carlo.add_row(row!["Median (p50)", mc.median]);
    monte_carlo.add_row(row!["Best case (p95)", mc.best_case]);
    monte_carlo.add_row(row!["Ruin probability", mc.ruin_probability]);
    monte_carlo.add_row(row!["Mean max drawdown", mc.mean_max_drawdown]);
    println!("\nMonte Carlo ({} iterations)", mc.iterations);
    monte_carlo.printstd();

    println!("\nDaily breakdown");
    let mut daily = Table::new();
    daily.add_row(row!["Day", "Start", "P/L", "End", "ROI"]);
    for day in report.daily_breakdown.iter().take(DAILY_TABLE_LIMIT) {
        daily.add_row(row![
            day.day,
            day.start_balance,
            day.profit_loss,
            day.end_balance,
            day.roi
        ]);
    }
    daily.printstd();
    if report.daily_breakdown.len() > DAILY_TABLE_LIMIT {
        println!(
            "... {} more days (use --json for the full breakdown)",
            report.daily_breakdown.len() - DAILY_TABLE_LIMIT
        );
    }

    if !report.trade_log.is_empty() {
        println!("\nTrade log (first {} shown)", TRADE_TABLE_LIMIT);
        let mut trades = Table::new();
        trades.add_row(row!["#", "Day", "Result", "P/L", "Balance"]);
        for trade in report.trade_log.iter().take(TRADE_TABLE_LIMIT) {
            trades.add_row(row![
                trade.trade_no,
                trade.day,
                trade.result,
                trade.profit_loss,
                trade.balance
            ]);
        }
        trades.printstd();
    }
}

fn print_health(view: &HealthReportView) {
    let mut scores = Table::new();
    scores.add_row(row!["Overall", view.overall_score]);
    scores.add_row(row!["Risk", view.risk_score]);
    scores.add_row(row!["Emotional", view.emotional_score]);
    scores.add_row(row!["System", view.system_score]);
    println!("Health scores");
    scores.printstd();

    println!("\nIdentity: {}", view.trading_identity);
    println!("{}", view.identity_insight);
    println!("\nSummary: {}", view.summary);
    if !view.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &view.warnings {
            println!("  - {warning}");
        }
    }
    println!(
        "\nRecommended risk per trade: {} ({})",
        view.recommended_risk, view.recommendation
    );
}
