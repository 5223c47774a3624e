//! Domain types for the tradecast simulation toolkit.
//!
//! This crate holds the plain inputs and outputs shared by the simulation
//! and analysis engines: simulation configuration, per-day and per-trade
//! results, goal planning records, trade health records, and the error
//! types reported at the call boundary. It contains no simulation logic.

/// Simulation configuration and validation.
pub mod config;
/// Shared enums.
pub mod enums;
/// Error types reported at the call boundary.
pub mod error;
/// Goal planning inputs and results.
pub mod goal;
/// Trade health inputs and reports.
pub mod health;
/// Presentation-layer formatting of results.
pub mod report;
/// Simulation output records.
pub mod results;
/// Small wrapper types for domain values.
pub mod value_objects;

pub use config::SimulationConfig;
pub use enums::{Feasibility, RiskBasis, TradeOutcome, TradingIdentity};
pub use error::EngineError;
pub use goal::{GoalPlanInput, GoalPlanResult};
pub use health::{HealthReport, TradeRecord};
pub use results::{
    DailyResult, MonteCarloSummary, SimulationResult, SimulationSummary, TradeLogEntry,
};
