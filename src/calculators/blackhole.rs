//! Schwarzschild radius.

use astro_config::PageDefaults;
use astro_core::{ExponentRange, ScientificValue};
use astro_export::{BlackHoleRecord, HandoffTarget};
use astro_orbits::relativity::{SchwarzschildRadius, schwarzschild_radius};

use super::{Calculator, PageError};
use crate::format::{Report, grouped, latex_input};
use crate::input::{FieldSpec, PageInput};

pub const MASS: FieldSpec = FieldSpec::new(
    "mass",
    "Black hole mass (M)",
    "kg",
    ScientificValue::new(1.989, 30),
    ExponentRange::ASTRONOMICAL,
);

#[derive(Debug, Clone, PartialEq)]
pub struct BlackHoleInput {
    pub mass: ScientificValue,
}

impl Default for BlackHoleInput {
    fn default() -> Self {
        Self { mass: MASS.reset() }
    }
}

impl PageInput for BlackHoleInput {
    fn with_defaults(defaults: Option<&PageDefaults>) -> Self {
        Self {
            mass: MASS.resolve(defaults),
        }
    }
}

pub struct BlackHolePage;

impl Calculator for BlackHolePage {
    const PAGE: &'static str = "blackhole";
    const TITLE: &'static str = "Schwarzschild Radius Calculator";

    type Input = BlackHoleInput;
    type Output = SchwarzschildRadius;
    type Record = BlackHoleRecord;

    fn fields() -> Vec<FieldSpec> {
        vec![MASS]
    }

    fn evaluate(input: &BlackHoleInput) -> Result<SchwarzschildRadius, PageError> {
        Ok(schwarzschild_radius(input.mass.magnitude())?)
    }

    fn report(input: &BlackHoleInput, output: &SchwarzschildRadius) -> Report {
        Report::new(Self::TITLE)
            .row("Rₛ (meters)", grouped(output.meters, 3), "m")
            .row("Rₛ (kilometers)", grouped(output.kilometers, 3), "km")
            .formula(r"R_s = \frac{2GM}{c^2}")
            .substitution(format!(
                r"R_s = \frac{{2 \times 6.67430 \times 10^{{-11}} \times {}}}{{(2.998 \times 10^{{8}})^2}}",
                latex_input(&input.mass),
            ))
            .note(format!(
                "Event horizon of a non-rotating, uncharged black hole with mass {} × 10^{} kg.",
                input.mass.coefficient, input.mass.exponent
            ))
    }

    fn record(
        input: &BlackHoleInput,
        output: &SchwarzschildRadius,
    ) -> Result<BlackHoleRecord, PageError> {
        Ok(BlackHoleRecord {
            mass: input.mass.into(),
            schwarzschild_radius_m: output.meters,
            schwarzschild_radius_km: output.kilometers,
        })
    }

    fn targets() -> &'static [HandoffTarget] {
        &[HandoffTarget::BlackHole]
    }
}
