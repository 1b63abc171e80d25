//! Surface gravity.

use astro_config::PageDefaults;
use astro_core::{ExponentRange, ScientificValue};
use astro_export::{GravityRecord, HandoffTarget};
use astro_orbits::gravity::{SurfaceGravity, surface_gravity};

use super::{Calculator, PageError};
use crate::format::{Report, grouped, latex_input};
use crate::input::{FieldSpec, PageInput};

pub const PLANET_MASS: FieldSpec = FieldSpec::new(
    "planet_mass",
    "Mass (M)",
    "kg",
    ScientificValue::new(5.972, 24),
    ExponentRange::ASTRONOMICAL,
);
pub const PLANET_RADIUS: FieldSpec = FieldSpec::new(
    "planet_radius",
    "Radius (R)",
    "m",
    ScientificValue::new(6.371, 6),
    ExponentRange::ASTRONOMICAL,
);

#[derive(Debug, Clone, PartialEq)]
pub struct GravityInput {
    pub mass: ScientificValue,
    pub radius: ScientificValue,
}

impl Default for GravityInput {
    fn default() -> Self {
        Self {
            mass: PLANET_MASS.reset(),
            radius: PLANET_RADIUS.reset(),
        }
    }
}

impl PageInput for GravityInput {
    fn with_defaults(defaults: Option<&PageDefaults>) -> Self {
        Self {
            mass: PLANET_MASS.resolve(defaults),
            radius: PLANET_RADIUS.resolve(defaults),
        }
    }
}

pub struct GravityPage;

impl Calculator for GravityPage {
    const PAGE: &'static str = "gravity";
    const TITLE: &'static str = "Surface Gravity Calculator";

    type Input = GravityInput;
    type Output = SurfaceGravity;
    type Record = GravityRecord;

    fn fields() -> Vec<FieldSpec> {
        vec![PLANET_MASS, PLANET_RADIUS]
    }

    fn evaluate(input: &GravityInput) -> Result<SurfaceGravity, PageError> {
        Ok(surface_gravity(
            input.mass.magnitude(),
            input.radius.magnitude(),
        )?)
    }

    fn report(input: &GravityInput, output: &SurfaceGravity) -> Report {
        Report::new(Self::TITLE)
            .row("Surface gravity", grouped(output.m_s2, 5), "m/s²")
            .row("Compared to Earth's gravity", grouped(output.in_g, 3), "g")
            .formula(r"g = \frac{GM}{R^2}")
            .substitution(format!(
                r"g = \frac{{6.674 \times 10^{{-11}} \times {}}}{{{}^2}}",
                latex_input(&input.mass),
                latex_input(&input.radius),
            ))
    }

    fn record(input: &GravityInput, output: &SurfaceGravity) -> Result<GravityRecord, PageError> {
        Ok(GravityRecord {
            planet_mass: input.mass.into(),
            planet_radius: input.radius.into(),
            gravity_m_per_s2: output.m_s2,
            gravity_in_g: output.in_g,
        })
    }

    fn targets() -> &'static [HandoffTarget] {
        &[HandoffTarget::Gravity, HandoffTarget::Pong]
    }
}
