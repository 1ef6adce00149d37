//! Error types for the optimizer core.
//!
//! Evaluation faults raised by the external problem collaborator are
//! propagated unmodified — the engine never retries a failed evaluation.

/// Fault raised by an external evaluator.
///
/// Typically signals that a genotype could not be mapped to a scorable
/// phenotype. The engine aborts the run and surfaces this as
/// [`Error::Evaluation`].
#[derive(Debug, thiserror::Error)]
#[error("evaluation failed: {reason}")]
pub struct EvalError {
    reason: String,
}

impl EvalError {
    /// Creates an evaluation fault with a human-readable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Errors produced by the evolution engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The run configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An engine method was called in the wrong lifecycle state,
    /// e.g. `execute()` before `initialize()`.
    #[error("invalid engine state: {0}")]
    InvalidState(&'static str),

    /// The external evaluator faulted. Propagated unmodified, no retry.
    #[error(transparent)]
    Evaluation(#[from] EvalError),
}
