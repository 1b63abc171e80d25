//! Luminosity, flux, and peak wavelength of a spherical blackbody star.

use std::f64::consts::PI;

use astro_core::constants::{SIGMA, SOLAR_CONSTANT_W_M2, SOLAR_LUMINOSITY_W, WIEN_B};
use astro_core::units::m_to_nm;
use tracing::debug;

use crate::{StellarError, require_finite, require_positive};

/// Radiative output of a star and the flux received at a given distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StellarOutput {
    pub luminosity_w: f64,
    pub flux_w_m2: f64,
    pub luminosity_solar: f64,
    pub flux_solar: f64,
    pub peak_wavelength_m: f64,
    pub peak_wavelength_nm: f64,
}

/// Stefan–Boltzmann luminosity `L = 4πR²σT⁴`.
pub fn luminosity(radius_m: f64, temperature_k: f64) -> Result<f64, StellarError> {
    let r = require_positive("stellar radius", radius_m)?;
    let t = require_positive("temperature", temperature_k)?;
    require_finite("luminosity", 4.0 * PI * r * r * SIGMA * t.powi(4))
}

/// Flux through a sphere of radius `distance_m`, `F = L / (4πD²)`.
pub fn flux(luminosity_w: f64, distance_m: f64) -> Result<f64, StellarError> {
    let l = require_positive("luminosity", luminosity_w)?;
    let d = require_positive("distance", distance_m)?;
    require_finite("flux", l / (4.0 * PI * d * d))
}

/// Wien peak `λ_max = b / T` in metres.
pub fn peak_wavelength(temperature_k: f64) -> Result<f64, StellarError> {
    let t = require_positive("temperature", temperature_k)?;
    Ok(WIEN_B / t)
}

/// Evaluate luminosity, flux at `distance_m`, their solar ratios, and the Wien peak.
pub fn stellar_output(
    radius_m: f64,
    temperature_k: f64,
    distance_m: f64,
) -> Result<StellarOutput, StellarError> {
    require_positive("distance", distance_m)?;
    let luminosity_w = luminosity(radius_m, temperature_k)?;
    let flux_w_m2 = flux(luminosity_w, distance_m)?;
    let peak_wavelength_m = peak_wavelength(temperature_k)?;
    debug!(luminosity_w, flux_w_m2, peak_wavelength_m, "evaluated stellar output");
    Ok(StellarOutput {
        luminosity_w,
        flux_w_m2,
        luminosity_solar: luminosity_w / SOLAR_LUMINOSITY_W,
        flux_solar: flux_w_m2 / SOLAR_CONSTANT_W_M2,
        peak_wavelength_m,
        peak_wavelength_nm: m_to_nm(peak_wavelength_m),
    })
}
