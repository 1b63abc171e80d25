//! Rigid-body Roche limit.

use astro_core::units::{m_to_earth_radii, m_to_km};

use crate::{OrbitError, require_finite, require_positive};

/// Rigid-body Roche coefficient.
pub const RIGID_ROCHE_FACTOR: f64 = 2.44;

/// Roche limit in several length units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RocheLimit {
    pub meters: f64,
    pub kilometers: f64,
    pub earth_radii: f64,
}

/// `d = R · 2.44 · (M/m)^(1/3)`, where `R` is the satellite radius.
pub fn roche_limit(
    primary_mass_kg: f64,
    satellite_mass_kg: f64,
    satellite_radius_m: f64,
) -> Result<RocheLimit, OrbitError> {
    let big_m = require_positive("primary mass", primary_mass_kg)?;
    let m = require_positive("satellite mass", satellite_mass_kg)?;
    let r = require_positive("satellite radius", satellite_radius_m)?;

    let d = require_finite("roche limit", r * RIGID_ROCHE_FACTOR * (big_m / m).cbrt())?;
    Ok(RocheLimit {
        meters: d,
        kilometers: m_to_km(d),
        earth_radii: m_to_earth_radii(d),
    })
}
