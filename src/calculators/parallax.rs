//! Parallax to distance, or distance to parallax.

use astro_config::PageDefaults;
use astro_core::{ExponentRange, ScientificValue};
use astro_export::{HandoffTarget, ParallaxRecord};
use astro_stellar::parallax::{ParallaxDistance, from_distance, from_parallax};

use super::{Calculator, PageError};
use crate::format::{Report, grouped, latex_input, sci_plain};
use crate::input::{FieldSpec, PageInput};
use crate::plot::{Axis, Marker, PlotBody, PlotSpec, Rgb, Series, logspace};

pub const PARALLAX: FieldSpec = FieldSpec::new(
    "parallax",
    "Parallax (p)",
    "arcsec",
    ScientificValue::new(7.687, -1),
    ExponentRange::PARALLAX,
);
pub const DISTANCE: FieldSpec = FieldSpec::new(
    "distance",
    "Distance (d)",
    "pc",
    ScientificValue::new(1.301, 0),
    ExponentRange::PARSECS,
);

/// Log-spaced parallaxes on the chart, `10^-6 … 10^0` arcsec.
pub const CURVE_EXPONENTS: (f64, f64) = (-6.0, 0.0);
pub const CURVE_SAMPLES: usize = 500;

/// Which quantity the user entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParallaxMode {
    #[default]
    Parallax,
    Distance,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParallaxInput {
    pub mode: ParallaxMode,
    pub parallax: ScientificValue,
    pub distance: ScientificValue,
}

impl Default for ParallaxInput {
    fn default() -> Self {
        Self {
            mode: ParallaxMode::default(),
            parallax: PARALLAX.reset(),
            distance: DISTANCE.reset(),
        }
    }
}

impl PageInput for ParallaxInput {
    fn with_defaults(defaults: Option<&PageDefaults>) -> Self {
        Self {
            mode: ParallaxMode::default(),
            parallax: PARALLAX.resolve(defaults),
            distance: DISTANCE.resolve(defaults),
        }
    }
}

impl ParallaxInput {
    /// The parallax as a coefficient/exponent pair: as typed, or decomposed from `d`.
    pub fn parallax_pair(&self, output: &ParallaxDistance) -> ScientificValue {
        match self.mode {
            ParallaxMode::Parallax => self.parallax,
            ParallaxMode::Distance => ScientificValue::from_magnitude(output.parallax_arcsec),
        }
    }
}

pub struct ParallaxPage;

impl Calculator for ParallaxPage {
    const PAGE: &'static str = "parallax";
    const TITLE: &'static str = "Parallax Distance Calculator";

    type Input = ParallaxInput;
    type Output = ParallaxDistance;
    type Record = ParallaxRecord;

    fn fields() -> Vec<FieldSpec> {
        vec![PARALLAX, DISTANCE]
    }

    fn evaluate(input: &ParallaxInput) -> Result<ParallaxDistance, PageError> {
        let result = match input.mode {
            ParallaxMode::Parallax => from_parallax(input.parallax.magnitude())?,
            ParallaxMode::Distance => from_distance(input.distance.magnitude())?,
        };
        Ok(result)
    }

    fn report(input: &ParallaxInput, output: &ParallaxDistance) -> Report {
        let report = Report::new(Self::TITLE)
            .row("Parallax", sci_plain(output.parallax_arcsec, 3), "arcsec")
            .row("Distance (parsecs)", grouped(output.distance_pc, 5), "pc")
            .row("Distance (light-years)", grouped(output.distance_ly, 5), "ly");
        match input.mode {
            ParallaxMode::Parallax => report
                .formula(r"d = \frac{1}{p}")
                .substitution(format!(r"d = \frac{{1}}{{{}}}", latex_input(&input.parallax))),
            ParallaxMode::Distance => report
                .formula(r"p = \frac{1}{d}")
                .substitution(format!(r"p = \frac{{1}}{{{}}}", latex_input(&input.distance))),
        }
    }

    /// `d = 1/p` on log-log axes with the computed pair highlighted.
    fn plot(_input: &ParallaxInput, output: &ParallaxDistance) -> Option<PlotSpec> {
        let points = logspace(CURVE_EXPONENTS.0, CURVE_EXPONENTS.1, CURVE_SAMPLES)
            .into_iter()
            .map(|p| (p, 1.0 / p))
            .collect();
        let (p, d) = (output.parallax_arcsec, output.distance_pc);
        Some(PlotSpec {
            title: "Parallax vs. Distance".to_string(),
            x_axis: Axis::log("Parallax (arcsec)"),
            y_axis: Axis::log("Distance (parsecs)"),
            body: PlotBody::Lines {
                series: vec![Series {
                    label: "d = 1/p".to_string(),
                    color: Rgb(0, 0, 255),
                    points,
                }],
                markers: vec![Marker::Point {
                    x: p,
                    y: d,
                    label: format!("({p:.3e}, {d:.2} pc)"),
                    color: Rgb(255, 0, 0),
                }],
                bands: Vec::new(),
            },
        })
    }

    fn record(input: &ParallaxInput, output: &ParallaxDistance) -> Result<ParallaxRecord, PageError> {
        Ok(ParallaxRecord {
            parallax_arcsec: input.parallax_pair(output).into(),
            distance_pc: output.distance_pc,
            distance_ly: output.distance_ly,
        })
    }

    fn targets() -> &'static [HandoffTarget] {
        &[HandoffTarget::Parallax]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::evaluate;

    #[test]
    fn both_modes_agree() {
        let by_parallax = evaluate::<ParallaxPage>(ParallaxInput::default()).expect("parallax");
        let input = ParallaxInput {
            mode: ParallaxMode::Distance,
            distance: ScientificValue::from_magnitude(by_parallax.output.distance_pc),
            ..ParallaxInput::default()
        };
        let by_distance = evaluate::<ParallaxPage>(input).expect("distance");
        let (a, b) = (by_parallax.output, by_distance.output);
        assert!((a.parallax_arcsec - b.parallax_arcsec).abs() < 1e-12);
        assert!((a.distance_pc - b.distance_pc).abs() < 1e-12);
    }

    #[test]
    fn distance_mode_exports_decomposed_parallax() {
        let input = ParallaxInput {
            mode: ParallaxMode::Distance,
            distance: ScientificValue::new(4.0, 0),
            ..ParallaxInput::default()
        };
        let eval = evaluate::<ParallaxPage>(input).expect("distance");
        let record = eval.record().expect("record");
        assert_eq!(record.parallax_arcsec.exp, -1);
        assert!((record.parallax_arcsec.coeff - 2.5).abs() < 1e-12);
        assert!((record.parallax_arcsec.value - 0.25).abs() < 1e-15);
    }

    #[test]
    fn chart_highlights_the_result() {
        let eval = evaluate::<ParallaxPage>(ParallaxInput::default()).expect("parallax");
        let plot = eval.plot().expect("plot");
        assert_eq!(plot.x_axis.scale, crate::plot::AxisScale::Log);
        let PlotBody::Lines { series, markers, .. } = &plot.body else {
            panic!("expected a line chart");
        };
        assert_eq!(series[0].points.len(), CURVE_SAMPLES);
        let Marker::Point { label, .. } = &markers[0] else {
            panic!("expected a point marker");
        };
        assert!(label.ends_with("1.30 pc)"), "{label}");
    }

    #[test]
    fn zero_parallax_is_rejected() {
        let input = ParallaxInput {
            parallax: ScientificValue::new(0.0, -1),
            ..ParallaxInput::default()
        };
        assert!(matches!(
            evaluate::<ParallaxPage>(input),
            Err(PageError::Stellar(_))
        ));
    }
}
