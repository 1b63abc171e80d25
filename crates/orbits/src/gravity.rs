//! Escape velocity and surface gravity of a spherical body.

use astro_core::constants::{G, G0};
use astro_core::units::ms_to_kms;

use crate::{OrbitError, require_finite, require_positive};

/// Escape speed from a given radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscapeVelocity {
    pub m_s: f64,
    pub km_s: f64,
}

/// Gravitational acceleration at the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGravity {
    pub m_s2: f64,
    /// Multiples of standard gravity (9.80665 m/s²).
    pub in_g: f64,
}

/// `v = sqrt(2GM / r)`.
pub fn escape_velocity(mass_kg: f64, radius_m: f64) -> Result<EscapeVelocity, OrbitError> {
    let m = require_positive("mass", mass_kg)?;
    let r = require_positive("radius", radius_m)?;
    let v = require_finite("escape velocity", (2.0 * G * m / r).sqrt())?;
    Ok(EscapeVelocity {
        m_s: v,
        km_s: ms_to_kms(v),
    })
}

/// `g = GM / r²`.
pub fn surface_gravity(mass_kg: f64, radius_m: f64) -> Result<SurfaceGravity, OrbitError> {
    let m = require_positive("mass", mass_kg)?;
    let r = require_positive("radius", radius_m)?;
    let g = require_finite("surface gravity", G * m / (r * r))?;
    Ok(SurfaceGravity {
        m_s2: g,
        in_g: g / G0,
    })
}

/// Share of the escape energy carried by a body moving at `speed_m_s`, in percent.
pub fn escape_energy_percent(speed_m_s: f64, escape_m_s: f64) -> f64 {
    if escape_m_s <= 0.0 {
        return 0.0;
    }
    let escape_kinetic = 0.5 * escape_m_s * escape_m_s;
    0.5 * speed_m_s * speed_m_s / escape_kinetic * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earth_surface_gravity_is_one_g() {
        let g = surface_gravity(5.972e24, 6.371e6).unwrap();
        assert!((g.m_s2 - 9.82).abs() < 0.02, "g = {}", g.m_s2);
        assert!((g.in_g - 1.0).abs() < 0.01);
    }

    #[test]
    fn earth_escape_velocity() {
        let v = escape_velocity(5.972e24, 6.371e6).unwrap();
        assert!((v.km_s - 11.186).abs() < 0.01, "v = {} km/s", v.km_s);
    }

    #[test]
    fn escape_energy_reaches_hundred_percent_at_escape_speed() {
        assert!((escape_energy_percent(11_186.0, 11_186.0) - 100.0).abs() < 1e-9);
        assert_eq!(escape_energy_percent(0.0, 11_186.0), 0.0);
        assert_eq!(escape_energy_percent(5.0, 0.0), 0.0);
    }
}
