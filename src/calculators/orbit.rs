//! Two-body orbital period.

use astro_config::PageDefaults;
use astro_core::{ExponentRange, ScientificValue};
use astro_export::{HandoffTarget, OrbitsRecord, PlanetRecord};
use astro_orbits::kepler::{OrbitalPeriod, orbital_period, validate_eccentricity};

use super::{Calculator, PageError};
use crate::format::{Report, grouped, latex_input, sci_plain};
use crate::input::{FieldSpec, PageInput, ScalarSpec};

pub const CENTRAL_MASS: FieldSpec = FieldSpec::new(
    "central_mass",
    "Mass of larger object (M)",
    "kg",
    ScientificValue::new(1.989, 30),
    ExponentRange::ASTRONOMICAL,
);
pub const BODY_MASS: FieldSpec = FieldSpec::new(
    "body_mass",
    "Mass of smaller object (m)",
    "kg",
    ScientificValue::new(5.972, 24),
    ExponentRange::ASTRONOMICAL,
);
pub const SEMI_MAJOR_AXIS: FieldSpec = FieldSpec::new(
    "semi_major_axis",
    "Semi-major axis (a)",
    "m",
    ScientificValue::new(1.496, 11),
    ExponentRange::ASTRONOMICAL,
);
pub const ECCENTRICITY: ScalarSpec = ScalarSpec {
    key: "eccentricity",
    label: "Eccentricity (e)",
    default: 0.0167,
    min: 0.0,
    max: 1.0,
};

pub const PERIOD_FORMULA: &str = r"T^2 = \frac{4\pi^2 a^3}{G(M + m)}";

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitInput {
    pub central_mass: ScientificValue,
    pub body_mass: ScientificValue,
    pub semi_major_axis: ScientificValue,
    /// Carried into the export; the period does not depend on it.
    pub eccentricity: f64,
}

impl Default for OrbitInput {
    fn default() -> Self {
        Self {
            central_mass: CENTRAL_MASS.reset(),
            body_mass: BODY_MASS.reset(),
            semi_major_axis: SEMI_MAJOR_AXIS.reset(),
            eccentricity: ECCENTRICITY.default,
        }
    }
}

impl PageInput for OrbitInput {
    fn with_defaults(defaults: Option<&PageDefaults>) -> Self {
        Self {
            central_mass: CENTRAL_MASS.resolve(defaults),
            body_mass: BODY_MASS.resolve(defaults),
            semi_major_axis: SEMI_MAJOR_AXIS.resolve(defaults),
            eccentricity: ECCENTRICITY.resolve(defaults),
        }
    }
}

/// `T²` with the user's inputs substituted.
pub(crate) fn period_substitution(
    central_mass: &ScientificValue,
    body_mass: &ScientificValue,
    semi_major_axis: &ScientificValue,
) -> String {
    format!(
        r"T^2 = \frac{{4 \times \pi^2 \times {}^3}}{{6.67430 \times 10^{{-11}} \times ({} + {})}}",
        latex_input(semi_major_axis),
        latex_input(central_mass),
        latex_input(body_mass),
    )
}

/// Period rows shared by the single- and multi-planet pages.
pub(crate) fn period_rows(report: Report, prefix: &str, period: &OrbitalPeriod) -> Report {
    report
        .row(format!("{prefix}T (seconds)"), grouped(period.seconds, 3), "s")
        .row(format!("{prefix}T (days)"), grouped(period.days, 3), "days")
        .row(format!("{prefix}T (years)"), grouped(period.years, 6), "years")
}

pub struct OrbitPage;

impl Calculator for OrbitPage {
    const PAGE: &'static str = "orbit";
    const TITLE: &'static str = "Orbital Period Calculator";

    type Input = OrbitInput;
    type Output = OrbitalPeriod;
    type Record = OrbitsRecord;

    fn fields() -> Vec<FieldSpec> {
        vec![CENTRAL_MASS, BODY_MASS, SEMI_MAJOR_AXIS]
    }

    fn scalars() -> Vec<ScalarSpec> {
        vec![ECCENTRICITY]
    }

    fn evaluate(input: &OrbitInput) -> Result<OrbitalPeriod, PageError> {
        validate_eccentricity(input.eccentricity)?;
        Ok(orbital_period(
            input.central_mass.magnitude(),
            input.body_mass.magnitude(),
            input.semi_major_axis.magnitude(),
        )?)
    }

    fn report(input: &OrbitInput, output: &OrbitalPeriod) -> Report {
        let report = Report::new(Self::TITLE)
            .row("T²", sci_plain(output.t_squared_s2, 3), "s²");
        period_rows(report, "", output)
            .formula(PERIOD_FORMULA)
            .substitution(period_substitution(
                &input.central_mass,
                &input.body_mass,
                &input.semi_major_axis,
            ))
    }

    fn record(input: &OrbitInput, output: &OrbitalPeriod) -> Result<OrbitsRecord, PageError> {
        Ok(OrbitsRecord {
            central_mass: input.central_mass.into(),
            planets: vec![PlanetRecord {
                planet: "Planet 1".to_string(),
                mass: input.body_mass.into(),
                semi_major_axis: input.semi_major_axis.into(),
                eccentricity: input.eccentricity,
                t_seconds: output.seconds,
                t_days: output.days,
                t_years: output.years,
            }],
        })
    }

    fn targets() -> &'static [HandoffTarget] {
        &[HandoffTarget::Orbits, HandoffTarget::Kepler]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::evaluate;

    #[test]
    fn earth_year_from_defaults() {
        let eval = evaluate::<OrbitPage>(OrbitInput::default()).expect("orbit");
        assert!(
            (eval.output.days - 365.2).abs() < 0.5,
            "Earth period should be about a year, got {} days",
            eval.output.days
        );
        let text = eval.report().to_string();
        assert!(text.contains("T (years)"), "{text}");
        assert!(text.contains(r"(1.496 \times 10^{11})^3"), "{text}");
    }

    #[test]
    fn eccentricity_out_of_range_is_rejected() {
        let input = OrbitInput {
            eccentricity: 1.5,
            ..OrbitInput::default()
        };
        assert!(matches!(
            evaluate::<OrbitPage>(input),
            Err(PageError::Orbit(astro_orbits::OrbitError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn record_keeps_user_pairs() {
        let eval = evaluate::<OrbitPage>(OrbitInput::default()).expect("orbit");
        let record = eval.record().expect("record");
        assert_eq!(record.central_mass.coeff, 1.989);
        assert_eq!(record.central_mass.exp, 30);
        assert_eq!(record.planets.len(), 1);
        assert_eq!(record.planets[0].t_seconds, eval.output.seconds);
    }
}
