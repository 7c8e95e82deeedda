use std::io;

use thiserror::Error;

/// Errors raised while evaluating the relative dynamics.
///
/// Every term is a deterministic function of its inputs, so these are
/// reported to the caller as-is and never retried.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum DynamicsError {
    #[error("absolute position r_c has zero norm")]
    ZeroSeparation,
    #[error("chaser mass must be positive, got {0}")]
    NonPositiveMass(f64),
    #[error("chaser inertia tensor is not symmetric")]
    InertiaNotSymmetric,
    #[error("chaser inertia tensor is not positive-definite")]
    InertiaNotPositiveDefinite,
    #[error("gravitational parameter must be positive, got {0}")]
    InvalidGravitationalParameter(f64),
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),
    #[error("{quantity} expects {expected} components, got {actual}")]
    Shape {
        quantity: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Errors raised by the CSV state logger.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("failed to write log record: {0}")]
    Io(#[from] io::Error),
    #[error("field `{field}` holds a non-finite value")]
    NonFinite { field: String },
}

/// Errors that stop a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Dynamics(#[from] DynamicsError),
    #[error(transparent)]
    Log(#[from] LogError),
    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),
}
