//! JSON records handed to the external visualizer, one per calculator.
//!
//! Field names follow the files the visualizer projects already read, hence the
//! occasional `T_seconds`-style key.

use astro_core::ScientificValue;
use serde::{Deserialize, Serialize};

/// A scientific input as `{ "value", "coeff", "exp" }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScientificField {
    pub value: f64,
    pub coeff: f64,
    pub exp: i32,
}

impl From<ScientificValue> for ScientificField {
    fn from(v: ScientificValue) -> Self {
        Self {
            value: v.magnitude(),
            coeff: v.coefficient,
            exp: v.exponent,
        }
    }
}

impl From<&ScientificValue> for ScientificField {
    fn from(v: &ScientificValue) -> Self {
        Self::from(*v)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetRecord {
    pub planet: String,
    pub mass: ScientificField,
    pub semi_major_axis: ScientificField,
    pub eccentricity: f64,
    #[serde(rename = "T_seconds")]
    pub t_seconds: f64,
    #[serde(rename = "T_days")]
    pub t_days: f64,
    #[serde(rename = "T_years")]
    pub t_years: f64,
}

/// Single orbit or planetary system around one central mass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitsRecord {
    pub central_mass: ScientificField,
    pub planets: Vec<PlanetRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryStarRecord {
    pub mass_one_star: ScientificField,
    pub distance_between_stars: ScientificField,
    #[serde(rename = "T_squared")]
    pub t_squared: f64,
    #[serde(rename = "T_seconds")]
    pub t_seconds: f64,
    #[serde(rename = "T_days")]
    pub t_days: f64,
    #[serde(rename = "T_years")]
    pub t_years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocheRecord {
    pub primary_mass: ScientificField,
    pub satellite_mass: ScientificField,
    pub satellite_radius: ScientificField,
    pub roche_limit_m: f64,
    pub roche_limit_km: f64,
    pub roche_limit_earth_radii: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscapeRecord {
    pub body_mass: ScientificField,
    pub body_radius: ScientificField,
    pub escape_velocity_m_per_s: f64,
    pub escape_velocity_km_per_s: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GravityRecord {
    pub planet_mass: ScientificField,
    pub planet_radius: ScientificField,
    pub gravity_m_per_s2: f64,
    pub gravity_in_g: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlackHoleRecord {
    pub mass: ScientificField,
    pub schwarzschild_radius_m: f64,
    pub schwarzschild_radius_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LuminosityRecord {
    pub star_radius: ScientificField,
    pub star_temp: ScientificField,
    pub distance: ScientificField,
    pub luminosity_watt: f64,
    pub flux_watt_per_m2: f64,
    pub peak_wavelength_nm: f64,
    pub spectral_rgb: [f64; 3],
    pub hex_color: String,
    pub luminosity_readable: String,
    pub flux_readable: String,
    pub luminosity_solar_units: f64,
    pub flux_solar_units: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallaxRecord {
    pub parallax_arcsec: ScientificField,
    pub distance_pc: f64,
    pub distance_ly: f64,
}
