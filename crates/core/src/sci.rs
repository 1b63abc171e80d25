//! Scientific-notation input values.
//!
//! Inputs are entered as a coefficient and a power of ten. The decoded magnitude is
//! always recomputed from the pair so that the two never drift apart.

use std::fmt;
use std::str::FromStr;

/// Decode a `(coefficient, exponent)` pair into its magnitude.
#[inline]
pub fn encode(coefficient: f64, exponent: i32) -> f64 {
    coefficient * 10f64.powi(exponent)
}

/// A value entered as `coefficient × 10^exponent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScientificValue {
    pub coefficient: f64,
    pub exponent: i32,
}

impl ScientificValue {
    pub const fn new(coefficient: f64, exponent: i32) -> Self {
        Self {
            coefficient,
            exponent,
        }
    }

    /// Decoded floating-point value.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        encode(self.coefficient, self.exponent)
    }

    /// Normalize a magnitude to one leading digit and a power of ten.
    ///
    /// Zero and non-finite values keep a zero exponent.
    pub fn from_magnitude(value: f64) -> Self {
        if value == 0.0 || !value.is_finite() {
            return Self::new(value, 0);
        }
        let mut exponent = value.abs().log10().floor() as i32;
        let mut coefficient = value / 10f64.powi(exponent);
        // log10 can land one ulp on the wrong side of a power of ten.
        if coefficient.abs() >= 10.0 {
            exponent += 1;
            coefficient = value / 10f64.powi(exponent);
        } else if coefficient.abs() < 1.0 {
            exponent -= 1;
            coefficient = value / 10f64.powi(exponent);
        }
        Self::new(coefficient, exponent)
    }

    /// Same coefficient with the exponent clamped into `range`.
    pub fn clamp_exponent(self, range: ExponentRange) -> Self {
        Self::new(self.coefficient, range.clamp(self.exponent))
    }
}

impl fmt::Display for ScientificValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}e{}", self.coefficient, self.exponent)
    }
}

/// Error returned when a scientific literal cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseScientificError {
    input: String,
}

impl fmt::Display for ParseScientificError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid scientific value '{}' (expected COEFFICIENT[eEXPONENT], e.g. 5.972e24)",
            self.input
        )
    }
}

impl std::error::Error for ParseScientificError {}

impl FromStr for ScientificValue {
    type Err = ParseScientificError;

    /// Parse `5.972e24` as coefficient `5.972` and exponent `24`, keeping the pair as typed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseScientificError {
            input: s.to_string(),
        };
        let trimmed = s.trim();
        let (coeff_str, exp_str) = match trimmed.find(['e', 'E']) {
            Some(idx) => (&trimmed[..idx], Some(&trimmed[idx + 1..])),
            None => (trimmed, None),
        };
        let coefficient: f64 = coeff_str.parse().map_err(|_| err())?;
        if !coefficient.is_finite() {
            return Err(err());
        }
        let exponent = match exp_str {
            Some(e) => e.trim_start_matches('+').parse().map_err(|_| err())?,
            None => 0,
        };
        Ok(Self::new(coefficient, exponent))
    }
}

/// Inclusive bounds on the exponent a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExponentRange {
    pub min: i32,
    pub max: i32,
}

impl ExponentRange {
    /// Masses, lengths, and most astronomical inputs.
    pub const ASTRONOMICAL: Self = Self::new(1, 100);
    /// Stellar inputs that may legitimately sit below ten.
    pub const STELLAR: Self = Self::new(0, 100);
    /// Parallax angles in arcseconds.
    pub const PARALLAX: Self = Self::new(-6, 2);
    /// Distances in parsecs.
    pub const PARSECS: Self = Self::new(-3, 6);

    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn clamp(&self, exponent: i32) -> i32 {
        exponent.clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, exponent: i32) -> bool {
        (self.min..=self.max).contains(&exponent)
    }
}
