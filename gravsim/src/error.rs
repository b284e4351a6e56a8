//! Error type shared by the simulation, configuration and demo drivers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// A value rejected at the API boundary (non-positive mass, bad time step, ...)
    #[error("invalid argument `{name}` = {value}: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("invalid scenario: {0}")]
    Config(String),

    #[error("render output failed")]
    Render(#[from] std::io::Error),
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        SimError::InvalidArgument { name, value, reason }
    }
}

/// Reject values that are NaN, infinite or `<= 0`
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64, SimError> {
    if !value.is_finite() {
        return Err(SimError::invalid(name, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(SimError::invalid(name, value, "must be greater than zero"));
    }
    Ok(value)
}

/// Reject values that are NaN, infinite or `< 0`
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64, SimError> {
    if !value.is_finite() {
        return Err(SimError::invalid(name, value, "must be finite"));
    }
    if value < 0.0 {
        return Err(SimError::invalid(name, value, "must not be negative"));
    }
    Ok(value)
}
