//! Closed-form gravitational evaluators (Kepler periods, escape and surface gravity, tidal
//! and event-horizon radii).
//!
//! Every evaluator validates its inputs up front and reports a non-positive or non-finite
//! magnitude as an [`OrbitError`] instead of returning NaN or infinity.

pub mod gravity;
pub mod kepler;
pub mod relativity;
pub mod tidal;

use thiserror::Error;

/// Validation failures raised by the gravitational evaluators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrbitError {
    #[error("{quantity} must be positive (got {value})")]
    NonPositive { quantity: &'static str, value: f64 },
    #[error("{quantity} must be a finite number")]
    NotFinite { quantity: &'static str },
    #[error("{quantity} must lie within [{min}, {max}] (got {value})")]
    OutOfRange {
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("a planetary system needs between {min} and {max} planets (got {count})")]
    PlanetCount {
        count: usize,
        min: usize,
        max: usize,
    },
}

/// Reject NaN, infinities, zero, and negative values.
pub(crate) fn require_positive(quantity: &'static str, value: f64) -> Result<f64, OrbitError> {
    if !value.is_finite() {
        return Err(OrbitError::NotFinite { quantity });
    }
    if value <= 0.0 {
        return Err(OrbitError::NonPositive { quantity, value });
    }
    Ok(value)
}

pub(crate) fn require_within(
    quantity: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, OrbitError> {
    if !value.is_finite() {
        return Err(OrbitError::NotFinite { quantity });
    }
    if !(min..=max).contains(&value) {
        return Err(OrbitError::OutOfRange {
            quantity,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

/// Reject results that overflowed even though every input was valid.
pub(crate) fn require_finite(quantity: &'static str, value: f64) -> Result<f64, OrbitError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(OrbitError::NotFinite { quantity })
    }
}
