//! Planck's law for blackbody spectral radiance.

use astro_core::constants::{BOLTZMANN_K, C, PLANCK_H};

/// Exponent beyond which `exp(hc/λkT)` is treated as infinite and the sample contributes
/// nothing. `exp(709)` is the largest finite `f64`.
pub const EXPONENT_CUTOFF: f64 = 700.0;

/// Spectral radiance `B(λ, T)` in W·sr⁻¹·m⁻³.
///
/// Returns `0.0` where the exponent overflows and for non-positive or non-finite inputs.
pub fn spectral_radiance(wavelength_m: f64, temperature_k: f64) -> f64 {
    if !(wavelength_m > 0.0 && temperature_k > 0.0) {
        return 0.0;
    }
    if !(wavelength_m.is_finite() && temperature_k.is_finite()) {
        return 0.0;
    }
    let exp_term = PLANCK_H * C / (wavelength_m * BOLTZMANN_K * temperature_k);
    if exp_term > EXPONENT_CUTOFF {
        return 0.0;
    }
    let radiance = 2.0 * PLANCK_H * C * C / (wavelength_m.powi(5) * exp_term.exp_m1());
    if radiance.is_finite() { radiance } else { 0.0 }
}
