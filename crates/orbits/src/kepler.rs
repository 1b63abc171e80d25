//! Keplerian period estimators.
//!
//! Periods use the two-body form of Kepler's third law. Planetary systems are evaluated as a
//! set of independent two-body problems sharing one central mass; planet–planet
//! perturbations are not modelled.

use std::f64::consts::PI;

use astro_core::constants::G;
use astro_core::time::{seconds_to_days, seconds_to_years};
use tracing::{debug, warn};

use crate::{OrbitError, require_finite, require_positive, require_within};

/// Smallest planet count accepted by [`planetary_periods`].
pub const MIN_PLANETS: usize = 2;
/// Largest planet count accepted by [`planetary_periods`].
pub const MAX_PLANETS: usize = 5;

/// Orbital period expressed in several time units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalPeriod {
    pub t_squared_s2: f64,
    pub seconds: f64,
    pub days: f64,
    pub years: f64,
}

impl OrbitalPeriod {
    fn from_t_squared(t_squared_s2: f64) -> Result<Self, OrbitError> {
        let t_squared_s2 = require_finite("orbital period", t_squared_s2)?;
        let seconds = t_squared_s2.sqrt();
        Ok(Self {
            t_squared_s2,
            seconds,
            days: seconds_to_days(seconds),
            years: seconds_to_years(seconds),
        })
    }
}

/// Two-body period `T = 2π·sqrt(a³ / (G(M + m)))`.
///
/// Inputs:
/// - `central_mass_kg`: mass of the larger body (kg)
/// - `body_mass_kg`: mass of the orbiting body (kg)
/// - `semi_major_axis_m`: semi-major axis of the relative orbit (m)
pub fn orbital_period(
    central_mass_kg: f64,
    body_mass_kg: f64,
    semi_major_axis_m: f64,
) -> Result<OrbitalPeriod, OrbitError> {
    let big_m = require_positive("central mass", central_mass_kg)?;
    let m = require_positive("orbiting mass", body_mass_kg)?;
    let a = require_positive("semi-major axis", semi_major_axis_m)?;

    let t_squared = 4.0 * PI * PI * a.powi(3) / (G * (big_m + m));
    let period = OrbitalPeriod::from_t_squared(t_squared)?;
    debug!(
        central_mass_kg,
        body_mass_kg,
        semi_major_axis_m,
        seconds = period.seconds,
        "evaluated two-body period"
    );
    Ok(period)
}

/// Period of an equal-mass binary on a circular orbit, `T² = 16π² r³ / (G M)`.
///
/// `star_mass_kg` is the mass of one star and `separation_m` the distance between them.
pub fn binary_period(star_mass_kg: f64, separation_m: f64) -> Result<OrbitalPeriod, OrbitError> {
    let m = require_positive("star mass", star_mass_kg)?;
    let r = require_positive("separation", separation_m)?;

    let t_squared = 16.0 * PI * PI * r.powi(3) / (G * m);
    OrbitalPeriod::from_t_squared(t_squared)
}

/// Eccentricity must be a finite value in `[0, 1]`.
pub fn validate_eccentricity(eccentricity: f64) -> Result<f64, OrbitError> {
    require_within("eccentricity", eccentricity, 0.0, 1.0)
}

/// One planet of a planetary system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetSpec {
    pub mass_kg: f64,
    pub semi_major_axis_m: f64,
    pub eccentricity: f64,
}

/// Period of one planet, tagged with its position in the input list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetPeriod {
    pub index: usize,
    pub period: OrbitalPeriod,
}

/// Periods for every valid planet plus the planets that were skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemPeriods {
    pub periods: Vec<PlanetPeriod>,
    pub skipped: Vec<(usize, OrbitError)>,
}

impl SystemPeriods {
    pub fn valid_count(&self) -> usize {
        self.periods.len()
    }
}

/// Evaluate each planet independently around `central_mass_kg`.
///
/// An invalid central mass or a planet count outside
/// [`MIN_PLANETS`]..=[`MAX_PLANETS`] fails the whole system. An invalid planet is
/// recorded in [`SystemPeriods::skipped`] and the remaining planets are still evaluated.
pub fn planetary_periods(
    central_mass_kg: f64,
    planets: &[PlanetSpec],
) -> Result<SystemPeriods, OrbitError> {
    if !(MIN_PLANETS..=MAX_PLANETS).contains(&planets.len()) {
        return Err(OrbitError::PlanetCount {
            count: planets.len(),
            min: MIN_PLANETS,
            max: MAX_PLANETS,
        });
    }
    require_positive("central mass", central_mass_kg)?;

    let mut periods = Vec::with_capacity(planets.len());
    let mut skipped = Vec::new();
    for (index, planet) in planets.iter().enumerate() {
        let result = validate_eccentricity(planet.eccentricity).and_then(|_| {
            orbital_period(central_mass_kg, planet.mass_kg, planet.semi_major_axis_m)
        });
        match result {
            Ok(period) => periods.push(PlanetPeriod { index, period }),
            Err(err) => {
                warn!(planet = index + 1, %err, "skipping planet with invalid input");
                skipped.push((index, err));
            }
        }
    }
    Ok(SystemPeriods { periods, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;

    const M_SUN: f64 = 1.989e30;
    const M_EARTH: f64 = 5.972e24;
    const AU_M: f64 = 1.496e11;

    #[test]
    fn earth_year_is_about_one_year() {
        let p = orbital_period(M_SUN, M_EARTH, AU_M).unwrap();
        assert!((p.years - 1.0).abs() < 0.01, "years = {}", p.years);
        assert!((p.days - p.seconds / 86_400.0).abs() < 1e-9);
    }

    #[test]
    fn binary_period_matches_closed_form() {
        let p = binary_period(M_SUN, 1.5e11).unwrap();
        let expected = (16.0 * PI * PI * 1.5e11_f64.powi(3) / (G * M_SUN)).sqrt();
        assert!((p.seconds - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn rejects_non_positive_inputs() {
        assert!(matches!(
            orbital_period(0.0, M_EARTH, AU_M),
            Err(OrbitError::NonPositive { quantity: "central mass", .. })
        ));
        assert!(orbital_period(M_SUN, -1.0, AU_M).is_err());
        assert!(orbital_period(M_SUN, M_EARTH, f64::NAN).is_err());
        assert!(binary_period(M_SUN, 0.0).is_err());
    }

    #[test]
    fn eccentricity_bounds() {
        assert!(validate_eccentricity(0.0).is_ok());
        assert!(validate_eccentricity(1.0).is_ok());
        assert!(validate_eccentricity(1.01).is_err());
        assert!(validate_eccentricity(-0.1).is_err());
    }

    #[test]
    fn planetary_system_skips_invalid_planets() {
        let planets = [
            PlanetSpec {
                mass_kg: M_EARTH,
                semi_major_axis_m: AU_M,
                eccentricity: 0.0167,
            },
            PlanetSpec {
                mass_kg: -M_EARTH,
                semi_major_axis_m: AU_M,
                eccentricity: 0.0167,
            },
            PlanetSpec {
                mass_kg: M_EARTH,
                semi_major_axis_m: 2.0 * AU_M,
                eccentricity: 0.0167,
            },
        ];
        let system = planetary_periods(M_SUN, &planets).unwrap();
        assert_eq!(system.valid_count(), 2);
        assert_eq!(system.skipped.len(), 1);
        assert_eq!(system.skipped[0].0, 1);
        assert_eq!(system.periods[1].index, 2);
        // Independent two-body evaluation: doubling a scales T by 2^(3/2).
        let ratio = system.periods[1].period.seconds / system.periods[0].period.seconds;
        assert!((ratio - 2f64.powf(1.5)).abs() < 1e-9, "ratio = {ratio}");
    }

    #[test]
    fn planetary_system_count_is_bounded() {
        let planet = PlanetSpec {
            mass_kg: M_EARTH,
            semi_major_axis_m: AU_M,
            eccentricity: 0.0,
        };
        assert!(matches!(
            planetary_periods(M_SUN, &[planet]),
            Err(OrbitError::PlanetCount { count: 1, .. })
        ));
        assert!(planetary_periods(M_SUN, &[planet; 6]).is_err());
        assert!(planetary_periods(0.0, &[planet; 2]).is_err());
    }
}
