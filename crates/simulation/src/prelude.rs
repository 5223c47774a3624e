//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use tradecast_simulation::prelude::*;
//! ```

// Engine
pub use crate::engine::{EngineSettings, SimulationEngine, closed_form_risk_of_ruin};

// Monte Carlo
pub use crate::monte_carlo::{MONTE_CARLO_ITERATIONS, MonteCarloEngine};

// Outcome models
pub use crate::outcome::{
    ExpectationOutcomes, OutcomeMode, OutcomeSource, ShuffledOutcomes, TradeFill,
};

// Projector
pub use crate::projector::{Projection, project};
