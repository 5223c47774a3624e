//! Goal planning and trade health analysis.
//!
//! Two independent entry points over plain domain records:
//! - [`goal::plan_goal`] solves the compounding return required to reach a
//!   balance target and classifies its feasibility.
//! - [`health::HealthAnalyzer`] scores a chronological trade history for
//!   risk consistency, behavioral patterns, and system quality.

/// Goal feasibility calculation.
pub mod goal;
/// Trade health scoring.
pub mod health;

pub use goal::plan_goal;
pub use health::{HealthAnalyzer, HealthThresholds, score_health};
