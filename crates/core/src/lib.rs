//! Core constants, unit conversions, and scientific-notation values shared by every calculator.

pub mod sci;

pub use sci::{ExponentRange, ParseScientificError, ScientificValue, encode};

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Newtonian gravitational constant (m³·kg⁻¹·s⁻²).
    pub const G: f64 = 6.674_30e-11;
    /// Speed of light in vacuum (m/s).
    pub const C: f64 = 299_792_458.0;
    /// Stefan–Boltzmann constant (W·m⁻²·K⁻⁴).
    pub const SIGMA: f64 = 5.670_374_419e-8;
    /// Wien displacement constant (m·K).
    pub const WIEN_B: f64 = 2.897_771_955e-3;
    /// Planck constant (J·s).
    pub const PLANCK_H: f64 = 6.626_070_15e-34;
    /// Boltzmann constant (J/K).
    pub const BOLTZMANN_K: f64 = 1.380_649e-23;
    /// Standard gravity at Earth's surface (m/s²).
    pub const G0: f64 = 9.80665;
    /// Mean Earth radius (m).
    pub const EARTH_RADIUS_M: f64 = 6.371e6;
    /// Nominal solar luminosity (W).
    pub const SOLAR_LUMINOSITY_W: f64 = 3.828e26;
    /// Solar constant at 1 AU (W/m²).
    pub const SOLAR_CONSTANT_W_M2: f64 = 1361.0;
    /// Light years per parsec.
    pub const LY_PER_PARSEC: f64 = 3.26156;
    /// Seconds per day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
    /// Days per Julian year.
    pub const DAYS_PER_YEAR: f64 = 365.25;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::{EARTH_RADIUS_M, LY_PER_PARSEC};

    /// Convert metres to kilometres.
    #[inline]
    pub fn m_to_km(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert metres per second to kilometres per second.
    #[inline]
    pub fn ms_to_kms(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert metres to nanometres.
    #[inline]
    pub fn m_to_nm(v: f64) -> f64 {
        v * 1e9
    }

    /// Convert nanometres to metres.
    #[inline]
    pub fn nm_to_m(v: f64) -> f64 {
        v * 1e-9
    }

    /// Express a length in mean Earth radii.
    #[inline]
    pub fn m_to_earth_radii(v: f64) -> f64 {
        v / EARTH_RADIUS_M
    }

    /// Convert parsecs to light years.
    #[inline]
    pub fn pc_to_ly(v: f64) -> f64 {
        v * LY_PER_PARSEC
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use super::constants::{DAYS_PER_YEAR, SECONDS_PER_DAY};

    /// Convert seconds to days.
    #[inline]
    pub fn seconds_to_days(seconds: f64) -> f64 {
        seconds / SECONDS_PER_DAY
    }

    /// Convert days to Julian years.
    #[inline]
    pub fn days_to_years(days: f64) -> f64 {
        days / DAYS_PER_YEAR
    }

    /// Convert seconds to Julian years.
    #[inline]
    pub fn seconds_to_years(seconds: f64) -> f64 {
        days_to_years(seconds_to_days(seconds))
    }
}
