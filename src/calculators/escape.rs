//! Escape velocity and the energy-versus-speed chart.

use astro_config::PageDefaults;
use astro_core::units::ms_to_kms;
use astro_core::{ExponentRange, ScientificValue};
use astro_export::{EscapeRecord, HandoffTarget};
use astro_orbits::gravity::{EscapeVelocity, escape_energy_percent, escape_velocity};

use super::{Calculator, PageError};
use crate::format::{Report, grouped, latex_input};
use crate::input::{FieldSpec, PageInput};
use crate::plot::{Axis, Marker, PlotBody, PlotSpec, Rgb, Series, linspace};

pub const BODY_MASS: FieldSpec = FieldSpec::new(
    "body_mass",
    "Mass of the celestial body (M)",
    "kg",
    ScientificValue::new(5.972, 24),
    ExponentRange::ASTRONOMICAL,
);
pub const BODY_RADIUS: FieldSpec = FieldSpec::new(
    "body_radius",
    "Radius from center (R)",
    "m",
    ScientificValue::new(6.371, 6),
    ExponentRange::ASTRONOMICAL,
);

/// Speeds sampled by the chart.
pub const CURVE_SAMPLES: usize = 300;
/// The chart runs up to this multiple of the escape velocity.
pub const SPEED_SPAN: f64 = 1.5;

#[derive(Debug, Clone, PartialEq)]
pub struct EscapeInput {
    pub mass: ScientificValue,
    pub radius: ScientificValue,
}

impl Default for EscapeInput {
    fn default() -> Self {
        Self {
            mass: BODY_MASS.reset(),
            radius: BODY_RADIUS.reset(),
        }
    }
}

impl PageInput for EscapeInput {
    fn with_defaults(defaults: Option<&PageDefaults>) -> Self {
        Self {
            mass: BODY_MASS.resolve(defaults),
            radius: BODY_RADIUS.resolve(defaults),
        }
    }
}

pub struct EscapePage;

impl Calculator for EscapePage {
    const PAGE: &'static str = "escape";
    const TITLE: &'static str = "Escape Velocity Calculator";

    type Input = EscapeInput;
    type Output = EscapeVelocity;
    type Record = EscapeRecord;

    fn fields() -> Vec<FieldSpec> {
        vec![BODY_MASS, BODY_RADIUS]
    }

    fn evaluate(input: &EscapeInput) -> Result<EscapeVelocity, PageError> {
        Ok(escape_velocity(
            input.mass.magnitude(),
            input.radius.magnitude(),
        )?)
    }

    fn report(input: &EscapeInput, output: &EscapeVelocity) -> Report {
        Report::new(Self::TITLE)
            .row("Escape velocity (m/s)", grouped(output.m_s, 3), "m/s")
            .row("Escape velocity (km/s)", grouped(output.km_s, 3), "km/s")
            .formula(r"v = \sqrt{\frac{2GM}{r}}")
            .substitution(format!(
                r"v = \sqrt{{\frac{{2 \times 6.67430 \times 10^{{-11}} \times {}}}{{{}}}}}",
                latex_input(&input.mass),
                latex_input(&input.radius),
            ))
    }

    /// Kinetic energy as a share of the escape energy for speeds up to 1.5 `v_esc`.
    fn plot(_input: &EscapeInput, output: &EscapeVelocity) -> Option<PlotSpec> {
        let points = linspace(0.0, SPEED_SPAN * output.m_s, CURVE_SAMPLES)
            .into_iter()
            .map(|v| (ms_to_kms(v), escape_energy_percent(v, output.m_s)))
            .collect();
        Some(PlotSpec {
            title: "Progress Toward Escape vs. Speed".to_string(),
            x_axis: Axis::linear("Speed (km/s)").with_range(0.0, SPEED_SPAN * output.km_s),
            y_axis: Axis::linear("Kinetic Energy (% of required to escape)").with_range(0.0, 160.0),
            body: PlotBody::Lines {
                series: vec![Series {
                    label: "Energy toward escape".to_string(),
                    color: Rgb(255, 99, 71),
                    points,
                }],
                markers: vec![Marker::Vertical {
                    x: output.km_s,
                    label: "Escape velocity".to_string(),
                    color: Rgb(0, 128, 0),
                }],
                bands: Vec::new(),
            },
        })
    }

    fn record(input: &EscapeInput, output: &EscapeVelocity) -> Result<EscapeRecord, PageError> {
        Ok(EscapeRecord {
            body_mass: input.mass.into(),
            body_radius: input.radius.into(),
            escape_velocity_m_per_s: output.m_s,
            escape_velocity_km_per_s: output.km_s,
        })
    }

    fn targets() -> &'static [HandoffTarget] {
        &[HandoffTarget::Escape]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::evaluate;

    #[test]
    fn curve_reaches_full_energy_at_escape_speed() {
        let eval = evaluate::<EscapePage>(EscapeInput::default()).expect("escape");
        let plot = eval.plot().expect("plot");
        let PlotBody::Lines { series, markers, .. } = &plot.body else {
            panic!("expected a line chart");
        };
        let points = &series[0].points;
        assert_eq!(points.len(), CURVE_SAMPLES);
        assert_eq!(points[0], (0.0, 0.0));
        let (last_x, last_y) = points[CURVE_SAMPLES - 1];
        assert!((last_x - 1.5 * eval.output.km_s).abs() < 1e-9);
        assert!((last_y - 225.0).abs() < 1e-6, "1.5² × 100 = 225, got {last_y}");
        assert!(matches!(markers[0], Marker::Vertical { x, .. } if x == eval.output.km_s));
    }

    #[test]
    fn sampling_is_deterministic() {
        let a = evaluate::<EscapePage>(EscapeInput::default()).expect("escape");
        let b = evaluate::<EscapePage>(EscapeInput::default()).expect("escape");
        assert_eq!(a.plot(), b.plot());
    }

    #[test]
    fn negative_radius_is_rejected() {
        let input = EscapeInput {
            radius: ScientificValue::new(-6.371, 6),
            ..EscapeInput::default()
        };
        assert!(evaluate::<EscapePage>(input).is_err());
    }
}
