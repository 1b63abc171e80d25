//! Parallax ↔ distance conversion.

use astro_core::units::pc_to_ly;

use crate::{StellarError, require_finite, require_positive};

/// A consistent parallax/distance pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxDistance {
    pub parallax_arcsec: f64,
    pub distance_pc: f64,
    pub distance_ly: f64,
}

/// `d = 1/p` with `p` in arcseconds and `d` in parsecs.
pub fn from_parallax(parallax_arcsec: f64) -> Result<ParallaxDistance, StellarError> {
    let p = require_positive("parallax", parallax_arcsec)?;
    let d = require_finite("distance", 1.0 / p)?;
    Ok(ParallaxDistance {
        parallax_arcsec: p,
        distance_pc: d,
        distance_ly: pc_to_ly(d),
    })
}

/// `p = 1/d`, the inverse of [`from_parallax`].
pub fn from_distance(distance_pc: f64) -> Result<ParallaxDistance, StellarError> {
    let d = require_positive("distance", distance_pc)?;
    let p = require_finite("parallax", 1.0 / d)?;
    Ok(ParallaxDistance {
        parallax_arcsec: p,
        distance_pc: d,
        distance_ly: pc_to_ly(d),
    })
}
