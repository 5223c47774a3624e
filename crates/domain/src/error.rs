use thiserror::Error;

/// Errors reported by the simulation and analysis engines.
///
/// Every error is recoverable at the call boundary: validation failures are
/// raised before any simulation work starts, and domain failures describe a
/// semantically impossible request. Nothing here is fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Malformed or out-of-range input, rejected before any work.
    #[error("Validation failed for `{field}`: {message}")]
    Validation {
        /// Name of the offending input field.
        field: &'static str,
        /// Why the value was rejected.
        message: String,
    },

    /// Input that is well-formed but semantically impossible to satisfy.
    #[error("Domain error: {0}")]
    Domain(String),
}

impl EngineError {
    /// Shorthand for a validation failure on a named field.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Machine-checkable error kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION",
            Self::Domain(_) => "DOMAIN",
        }
    }
}
