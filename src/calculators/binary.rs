//! Period of an equal-mass binary star.

use astro_config::PageDefaults;
use astro_core::{ExponentRange, ScientificValue};
use astro_export::{BinaryStarRecord, HandoffTarget};
use astro_orbits::kepler::{OrbitalPeriod, binary_period};

use super::{Calculator, PageError};
use crate::format::{Report, grouped, latex_input, sci_plain};
use crate::input::{FieldSpec, PageInput};

pub const STAR_MASS: FieldSpec = FieldSpec::new(
    "star_mass",
    "Mass of one star (M)",
    "kg",
    ScientificValue::new(1.989, 30),
    ExponentRange::ASTRONOMICAL,
);
pub const SEPARATION: FieldSpec = FieldSpec::new(
    "separation",
    "Distance between stars (r)",
    "m",
    ScientificValue::new(1.5, 11),
    ExponentRange::ASTRONOMICAL,
);

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryInput {
    pub star_mass: ScientificValue,
    pub separation: ScientificValue,
}

impl Default for BinaryInput {
    fn default() -> Self {
        Self {
            star_mass: STAR_MASS.reset(),
            separation: SEPARATION.reset(),
        }
    }
}

impl PageInput for BinaryInput {
    fn with_defaults(defaults: Option<&PageDefaults>) -> Self {
        Self {
            star_mass: STAR_MASS.resolve(defaults),
            separation: SEPARATION.resolve(defaults),
        }
    }
}

pub struct BinaryPage;

impl Calculator for BinaryPage {
    const PAGE: &'static str = "binary";
    const TITLE: &'static str = "Binary Star Period";

    type Input = BinaryInput;
    type Output = OrbitalPeriod;
    type Record = BinaryStarRecord;

    fn fields() -> Vec<FieldSpec> {
        vec![STAR_MASS, SEPARATION]
    }

    fn evaluate(input: &BinaryInput) -> Result<OrbitalPeriod, PageError> {
        Ok(binary_period(
            input.star_mass.magnitude(),
            input.separation.magnitude(),
        )?)
    }

    fn report(input: &BinaryInput, output: &OrbitalPeriod) -> Report {
        Report::new(Self::TITLE)
            .row("T²", sci_plain(output.t_squared_s2, 3), "s²")
            .row("Period (seconds)", grouped(output.seconds, 3), "s")
            .row("Period (days)", grouped(output.days, 3), "days")
            .row("Period (years)", grouped(output.years, 5), "years")
            .formula(r"T^2 = \frac{16\pi^2 r^3}{G M}")
            .substitution(format!(
                r"T^2 = \frac{{16 \times \pi^2 \times {}^3}}{{6.67430 \times 10^{{-11}} \times {}}}",
                latex_input(&input.separation),
                latex_input(&input.star_mass),
            ))
            .note("Both stars have the same mass and move on a circular orbit.")
    }

    fn record(input: &BinaryInput, output: &OrbitalPeriod) -> Result<BinaryStarRecord, PageError> {
        Ok(BinaryStarRecord {
            mass_one_star: input.star_mass.into(),
            distance_between_stars: input.separation.into(),
            t_squared: output.t_squared_s2,
            t_seconds: output.seconds,
            t_days: output.days,
            t_years: output.years,
        })
    }

    fn targets() -> &'static [HandoffTarget] {
        &[HandoffTarget::BinaryStars]
    }
}
