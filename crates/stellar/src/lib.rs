//! Stellar radiation and distance evaluators.
//!
//! Luminosity and flux follow the Stefan–Boltzmann law, spectral output follows Planck's
//! law, and perceived colour goes through a pluggable [`color::Colorimeter`].

pub mod color;
pub mod luminosity;
pub mod parallax;
pub mod planck;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StellarError {
    #[error("{quantity} must be positive (got {value})")]
    NonPositive { quantity: &'static str, value: f64 },
    #[error("{quantity} must be a finite number")]
    NotFinite { quantity: &'static str },
}

pub(crate) fn require_positive(quantity: &'static str, value: f64) -> Result<f64, StellarError> {
    if !value.is_finite() {
        return Err(StellarError::NotFinite { quantity });
    }
    if value <= 0.0 {
        return Err(StellarError::NonPositive { quantity, value });
    }
    Ok(value)
}

pub(crate) fn require_finite(quantity: &'static str, value: f64) -> Result<f64, StellarError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StellarError::NotFinite { quantity })
    }
}
