//! Event-horizon radius of a non-rotating, uncharged black hole.

use astro_core::constants::{C, G};
use astro_core::units::m_to_km;

use crate::{OrbitError, require_finite, require_positive};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchwarzschildRadius {
    pub meters: f64,
    pub kilometers: f64,
}

/// `Rs = 2GM / c²`.
pub fn schwarzschild_radius(mass_kg: f64) -> Result<SchwarzschildRadius, OrbitError> {
    let m = require_positive("mass", mass_kg)?;
    let rs = require_finite("schwarzschild radius", 2.0 * G * m / (C * C))?;
    Ok(SchwarzschildRadius {
        meters: rs,
        kilometers: m_to_km(rs),
    })
}
