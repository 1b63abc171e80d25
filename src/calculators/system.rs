//! Periods of 2–5 planets around one central mass.
//!
//! Each planet is an independent two-body orbit around the central mass. Planets do not
//! perturb one another.

use std::str::FromStr;

use astro_config::PageDefaults;
use astro_core::{ExponentRange, ParseScientificError, ScientificValue};
use astro_export::{HandoffTarget, OrbitsRecord, PlanetRecord};
use astro_orbits::kepler::{MAX_PLANETS, MIN_PLANETS, PlanetSpec, SystemPeriods, planetary_periods};
use thiserror::Error;

use super::orbit::{CENTRAL_MASS, ECCENTRICITY, PERIOD_FORMULA, period_rows, period_substitution};
use super::{Calculator, PageError};
use crate::format::Report;
use crate::input::{FieldSpec, PageInput, ScalarSpec};
use crate::plot::{Axis, Bar, PlotBody, PlotSpec, Rgb};

const fn mass(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec::new(
        key,
        label,
        "kg",
        ScientificValue::new(5.972, 24),
        ExponentRange::ASTRONOMICAL,
    )
}

const fn axis(key: &'static str, label: &'static str, coefficient: f64) -> FieldSpec {
    FieldSpec::new(
        key,
        label,
        "m",
        ScientificValue::new(coefficient, 11),
        ExponentRange::ASTRONOMICAL,
    )
}

const fn eccentricity(key: &'static str, label: &'static str) -> ScalarSpec {
    ScalarSpec {
        key,
        label,
        default: ECCENTRICITY.default,
        min: ECCENTRICITY.min,
        max: ECCENTRICITY.max,
    }
}

/// Per-planet mass fields; planet `i` (1-based) defaults to an Earth mass.
pub const PLANET_MASSES: [FieldSpec; MAX_PLANETS] = [
    mass("planet1_mass", "Mass of planet 1 (m)"),
    mass("planet2_mass", "Mass of planet 2 (m)"),
    mass("planet3_mass", "Mass of planet 3 (m)"),
    mass("planet4_mass", "Mass of planet 4 (m)"),
    mass("planet5_mass", "Mass of planet 5 (m)"),
];

/// Per-planet semi-major axes; planet `i` defaults to `(1.496 + i - 1) × 10^11 m`.
pub const PLANET_AXES: [FieldSpec; MAX_PLANETS] = [
    axis("planet1_semi_major_axis", "Semi-major axis of planet 1 (a)", 1.496),
    axis("planet2_semi_major_axis", "Semi-major axis of planet 2 (a)", 2.496),
    axis("planet3_semi_major_axis", "Semi-major axis of planet 3 (a)", 3.496),
    axis("planet4_semi_major_axis", "Semi-major axis of planet 4 (a)", 4.496),
    axis("planet5_semi_major_axis", "Semi-major axis of planet 5 (a)", 5.496),
];

pub const PLANET_ECCENTRICITIES: [ScalarSpec; MAX_PLANETS] = [
    eccentricity("planet1_eccentricity", "Eccentricity of planet 1 (e)"),
    eccentricity("planet2_eccentricity", "Eccentricity of planet 2 (e)"),
    eccentricity("planet3_eccentricity", "Eccentricity of planet 3 (e)"),
    eccentricity("planet4_eccentricity", "Eccentricity of planet 4 (e)"),
    eccentricity("planet5_eccentricity", "Eccentricity of planet 5 (e)"),
];

pub const PLANET_COUNT: ScalarSpec = ScalarSpec {
    key: "planet_count",
    label: "Number of planets",
    default: MAX_PLANETS as f64,
    min: MIN_PLANETS as f64,
    max: MAX_PLANETS as f64,
};

/// Inputs of one planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetInput {
    pub mass: ScientificValue,
    pub semi_major_axis: ScientificValue,
    pub eccentricity: f64,
}

impl PlanetInput {
    /// Built-in defaults of planet `index` (0-based).
    pub fn default_at(index: usize) -> Self {
        let slot = index.min(MAX_PLANETS - 1);
        Self {
            mass: PLANET_MASSES[slot].reset(),
            semi_major_axis: PLANET_AXES[slot].reset(),
            eccentricity: PLANET_ECCENTRICITIES[slot].default,
        }
    }

    /// Clamp exponents into the ranges of planet slot `index`.
    pub fn accept(self, index: usize) -> Self {
        let slot = index.min(MAX_PLANETS - 1);
        Self {
            mass: PLANET_MASSES[slot].accept(self.mass),
            semi_major_axis: PLANET_AXES[slot].accept(self.semi_major_axis),
            eccentricity: self.eccentricity,
        }
    }

    fn spec(&self) -> PlanetSpec {
        PlanetSpec {
            mass_kg: self.mass.magnitude(),
            semi_major_axis_m: self.semi_major_axis.magnitude(),
            eccentricity: self.eccentricity,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PlanetArgError {
    #[error("expected MASS,AXIS[,ECCENTRICITY], got '{0}'")]
    Shape(String),
    #[error(transparent)]
    Scientific(#[from] ParseScientificError),
    #[error("invalid eccentricity '{0}'")]
    Eccentricity(String),
}

/// `MASS,AXIS[,ECCENTRICITY]`, e.g. `6.39e23,2.279e11,0.0934`.
impl FromStr for PlanetInput {
    type Err = PlanetArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(PlanetArgError::Shape(s.to_string()));
        }
        let eccentricity = match parts.get(2) {
            Some(e) => e
                .parse::<f64>()
                .map_err(|_| PlanetArgError::Eccentricity(e.to_string()))?,
            None => ECCENTRICITY.default,
        };
        Ok(Self {
            mass: parts[0].parse()?,
            semi_major_axis: parts[1].parse()?,
            eccentricity,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemInput {
    pub central_mass: ScientificValue,
    pub planets: Vec<PlanetInput>,
}

impl SystemInput {
    /// Built-in defaults for the first `count` planets.
    pub fn with_count(count: usize) -> Self {
        Self {
            central_mass: CENTRAL_MASS.reset(),
            planets: (0..count).map(PlanetInput::default_at).collect(),
        }
    }
}

impl Default for SystemInput {
    fn default() -> Self {
        Self::with_count(MAX_PLANETS)
    }
}

impl PageInput for SystemInput {
    fn with_defaults(defaults: Option<&PageDefaults>) -> Self {
        let count = PLANET_COUNT
            .resolve(defaults)
            .clamp(PLANET_COUNT.min, PLANET_COUNT.max) as usize;
        let planets = (0..count)
            .map(|i| PlanetInput {
                mass: PLANET_MASSES[i].resolve(defaults),
                semi_major_axis: PLANET_AXES[i].resolve(defaults),
                eccentricity: PLANET_ECCENTRICITIES[i].resolve(defaults),
            })
            .collect();
        Self {
            central_mass: CENTRAL_MASS.resolve(defaults),
            planets,
        }
    }
}

pub struct SystemPage;

impl Calculator for SystemPage {
    const PAGE: &'static str = "system";
    const TITLE: &'static str = "Planetary System Periods";

    type Input = SystemInput;
    type Output = SystemPeriods;
    type Record = OrbitsRecord;

    fn fields() -> Vec<FieldSpec> {
        let mut fields = vec![CENTRAL_MASS];
        for (mass, axis) in PLANET_MASSES.into_iter().zip(PLANET_AXES) {
            fields.push(mass);
            fields.push(axis);
        }
        fields
    }

    fn scalars() -> Vec<ScalarSpec> {
        let mut scalars = vec![PLANET_COUNT];
        scalars.extend(PLANET_ECCENTRICITIES);
        scalars
    }

    fn evaluate(input: &SystemInput) -> Result<SystemPeriods, PageError> {
        let planets: Vec<PlanetSpec> = input.planets.iter().map(PlanetInput::spec).collect();
        Ok(planetary_periods(input.central_mass.magnitude(), &planets)?)
    }

    fn report(input: &SystemInput, output: &SystemPeriods) -> Report {
        let mut report = Report::new(Self::TITLE)
            .formula(PERIOD_FORMULA)
            .note("Each planet orbits the central mass independently; planet-planet interactions are ignored.");
        for planet in &output.periods {
            report = period_rows(report, &format!("Planet {} ", planet.index + 1), &planet.period);
        }
        for planet in &output.periods {
            let p = &input.planets[planet.index];
            report = report.substitution(format!(
                "Planet {}: {}",
                planet.index + 1,
                period_substitution(&input.central_mass, &p.mass, &p.semi_major_axis),
            ));
        }
        for (index, err) in &output.skipped {
            report = report.note(format!("Planet {} skipped: {err}", index + 1));
        }
        report
    }

    fn plot(_input: &SystemInput, output: &SystemPeriods) -> Option<PlotSpec> {
        if output.periods.is_empty() {
            return None;
        }
        let bars = output
            .periods
            .iter()
            .map(|p| Bar {
                label: format!("Planet {}", p.index + 1),
                value: p.period.years,
            })
            .collect();
        Some(PlotSpec {
            title: "Orbital Periods of Planets".to_string(),
            x_axis: Axis::linear("Planet"),
            y_axis: Axis::linear("Period (years)"),
            body: PlotBody::Bars {
                bars,
                color: Rgb(65, 105, 225),
                unit: "yr".to_string(),
            },
        })
    }

    fn record(input: &SystemInput, output: &SystemPeriods) -> Result<OrbitsRecord, PageError> {
        if output.valid_count() < MIN_PLANETS {
            return Err(PageError::TooFewPlanets {
                valid: output.valid_count(),
                required: MIN_PLANETS,
            });
        }
        let planets = output
            .periods
            .iter()
            .map(|p| {
                let planet = &input.planets[p.index];
                PlanetRecord {
                    planet: format!("Planet {}", p.index + 1),
                    mass: planet.mass.into(),
                    semi_major_axis: planet.semi_major_axis.into(),
                    eccentricity: planet.eccentricity,
                    t_seconds: p.period.seconds,
                    t_days: p.period.days,
                    t_years: p.period.years,
                }
            })
            .collect();
        Ok(OrbitsRecord {
            central_mass: input.central_mass.into(),
            planets,
        })
    }

    fn targets() -> &'static [HandoffTarget] {
        &[HandoffTarget::Orbits]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::evaluate;

    #[test]
    fn defaults_spread_planets_outward() {
        let input = SystemInput::default();
        assert_eq!(input.planets.len(), MAX_PLANETS);
        assert_eq!(input.planets[2].semi_major_axis, ScientificValue::new(3.496, 11));

        let eval = evaluate::<SystemPage>(input).expect("system");
        let years: Vec<f64> = eval.output.periods.iter().map(|p| p.period.years).collect();
        assert!(years.windows(2).all(|w| w[0] < w[1]), "{years:?}");
    }

    #[test]
    fn invalid_planet_is_skipped_and_reported() {
        let mut input = SystemInput::with_count(3);
        input.planets[1].semi_major_axis = ScientificValue::new(0.0, 11);
        let eval = evaluate::<SystemPage>(input).expect("system");
        assert_eq!(eval.output.valid_count(), 2);
        assert!(eval.report().to_string().contains("Planet 2 skipped"));

        let record = eval.record().expect("two valid planets export");
        let names: Vec<&str> = record.planets.iter().map(|p| p.planet.as_str()).collect();
        assert_eq!(names, ["Planet 1", "Planet 3"]);
    }

    #[test]
    fn each_valid_planet_gets_a_substitution() {
        let mut input = SystemInput::with_count(3);
        input.planets[1].semi_major_axis = ScientificValue::new(0.0, 11);
        let report = evaluate::<SystemPage>(input).expect("system").report();
        assert_eq!(report.substitutions.len(), 2);
        assert!(report.substitutions[0].starts_with("Planet 1: "));
        assert!(report.substitutions[1].starts_with("Planet 3: "));
        assert!(
            report.substitutions[1].contains(r"(3.496 \times 10^{11})^3"),
            "{}",
            report.substitutions[1]
        );
    }

    #[test]
    fn export_needs_two_valid_planets() {
        let mut input = SystemInput::with_count(2);
        input.planets[0].eccentricity = 2.0;
        let eval = evaluate::<SystemPage>(input).expect("system");
        assert!(matches!(
            eval.record(),
            Err(PageError::TooFewPlanets { valid: 1, required: 2 })
        ));
    }

    #[test]
    fn planet_count_is_bounded() {
        let input = SystemInput::with_count(1);
        assert!(matches!(
            evaluate::<SystemPage>(input),
            Err(PageError::Orbit(astro_orbits::OrbitError::PlanetCount { count: 1, .. }))
        ));
    }

    #[test]
    fn planet_argument_parses() {
        let planet: PlanetInput = "6.39e23, 2.279e11, 0.0934".parse().expect("planet");
        assert_eq!(planet.mass, ScientificValue::new(6.39, 23));
        assert_eq!(planet.eccentricity, 0.0934);
        let planet: PlanetInput = "1e24,1e11".parse().expect("planet");
        assert_eq!(planet.eccentricity, ECCENTRICITY.default);
        assert!("1e24".parse::<PlanetInput>().is_err());
    }
}
