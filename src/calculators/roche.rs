//! Rigid-body Roche limit.

use astro_config::PageDefaults;
use astro_core::{ExponentRange, ScientificValue};
use astro_export::{HandoffTarget, RocheRecord};
use astro_orbits::tidal::{RocheLimit, roche_limit};

use super::{Calculator, PageError};
use crate::format::{Report, grouped, latex_input};
use crate::input::{FieldSpec, PageInput};

pub const PRIMARY_MASS: FieldSpec = FieldSpec::new(
    "primary_mass",
    "Mass of the primary object (M)",
    "kg",
    ScientificValue::new(5.972, 24),
    ExponentRange::ASTRONOMICAL,
);
pub const SATELLITE_MASS: FieldSpec = FieldSpec::new(
    "satellite_mass",
    "Mass of the satellite (m)",
    "kg",
    ScientificValue::new(7.348, 22),
    ExponentRange::ASTRONOMICAL,
);
pub const SATELLITE_RADIUS: FieldSpec = FieldSpec::new(
    "satellite_radius",
    "Radius of the satellite (R)",
    "m",
    ScientificValue::new(1.737, 6),
    ExponentRange::ASTRONOMICAL,
);

#[derive(Debug, Clone, PartialEq)]
pub struct RocheInput {
    pub primary_mass: ScientificValue,
    pub satellite_mass: ScientificValue,
    pub satellite_radius: ScientificValue,
}

impl Default for RocheInput {
    fn default() -> Self {
        Self {
            primary_mass: PRIMARY_MASS.reset(),
            satellite_mass: SATELLITE_MASS.reset(),
            satellite_radius: SATELLITE_RADIUS.reset(),
        }
    }
}

impl PageInput for RocheInput {
    fn with_defaults(defaults: Option<&PageDefaults>) -> Self {
        Self {
            primary_mass: PRIMARY_MASS.resolve(defaults),
            satellite_mass: SATELLITE_MASS.resolve(defaults),
            satellite_radius: SATELLITE_RADIUS.resolve(defaults),
        }
    }
}

pub struct RochePage;

impl Calculator for RochePage {
    const PAGE: &'static str = "roche";
    const TITLE: &'static str = "Roche Limit Calculator";

    type Input = RocheInput;
    type Output = RocheLimit;
    type Record = RocheRecord;

    fn fields() -> Vec<FieldSpec> {
        vec![PRIMARY_MASS, SATELLITE_MASS, SATELLITE_RADIUS]
    }

    fn evaluate(input: &RocheInput) -> Result<RocheLimit, PageError> {
        Ok(roche_limit(
            input.primary_mass.magnitude(),
            input.satellite_mass.magnitude(),
            input.satellite_radius.magnitude(),
        )?)
    }

    fn report(input: &RocheInput, output: &RocheLimit) -> Report {
        Report::new(Self::TITLE)
            .row("Roche limit (meters)", grouped(output.meters, 3), "m")
            .row("Roche limit (kilometers)", grouped(output.kilometers, 3), "km")
            .row("Roche limit (Earth radii)", grouped(output.earth_radii, 3), "R⊕")
            .formula(r"d = R \cdot 2.44 \cdot \left( \frac{M}{m} \right)^{1/3}")
            .substitution(format!(
                r"d = {} \cdot 2.44 \cdot \left( \frac{{{}}}{{{}}} \right)^{{1/3}}",
                latex_input(&input.satellite_radius),
                latex_input(&input.primary_mass),
                latex_input(&input.satellite_mass),
            ))
            .note("Rigid-body approximation; a fluid satellite breaks up farther out.")
    }

    fn record(input: &RocheInput, output: &RocheLimit) -> Result<RocheRecord, PageError> {
        Ok(RocheRecord {
            primary_mass: input.primary_mass.into(),
            satellite_mass: input.satellite_mass.into(),
            satellite_radius: input.satellite_radius.into(),
            roche_limit_m: output.meters,
            roche_limit_km: output.kilometers,
            roche_limit_earth_radii: output.earth_radii,
        })
    }

    fn targets() -> &'static [HandoffTarget] {
        &[HandoffTarget::Roche]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::evaluate;

    #[test]
    fn earth_moon_report() {
        let eval = evaluate::<RochePage>(RocheInput::default()).expect("roche");
        let text = eval.report().to_string();
        assert!(text.contains("18,358.6"), "{text}");
        assert!(text.contains(r"\frac{(5.972 \times 10^{24})}{(7.348 \times 10^{22})}"), "{text}");
    }

    #[test]
    fn record_matches_result() {
        let eval = evaluate::<RochePage>(RocheInput::default()).expect("roche");
        let record = eval.record().expect("record");
        assert_eq!(record.roche_limit_km, eval.output.kilometers);
        assert_eq!(record.satellite_radius.exp, 6);
    }
}
