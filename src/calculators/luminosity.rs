//! Stellar luminosity, received flux, Wien peak, and perceived colour.

use astro_config::PageDefaults;
use astro_core::{ExponentRange, ScientificValue};
use astro_export::{HandoffTarget, LuminosityRecord};
use astro_stellar::color::{BlackbodyColor, blackbody_color, spectrum_color};
use astro_stellar::luminosity::{StellarOutput, stellar_output};
use astro_stellar::planck::spectral_radiance;

use super::{Calculator, PageError};
use crate::format::{Report, latex_input, sci_notation, sci_plain};
use crate::input::{FieldSpec, PageInput};
use crate::plot::{Axis, Band, PlotBody, PlotSpec, Rgb, Series, linspace};

pub const STAR_RADIUS: FieldSpec = FieldSpec::new(
    "star_radius",
    "Star radius (R)",
    "m",
    ScientificValue::new(6.96, 8),
    ExponentRange::STELLAR,
);
pub const STAR_TEMPERATURE: FieldSpec = FieldSpec::new(
    "star_temp",
    "Surface temperature (T)",
    "K",
    ScientificValue::new(5.778, 3),
    ExponentRange::STELLAR,
);
pub const DISTANCE: FieldSpec = FieldSpec::new(
    "distance",
    "Distance from star (D)",
    "m",
    ScientificValue::new(1.496, 11),
    ExponentRange::STELLAR,
);

/// Wavelength window of the Planck chart, in nm.
pub const CURVE_RANGE_NM: (f64, f64) = (100.0, 3000.0);
pub const CURVE_SAMPLES: usize = 500;
/// Visible band drawn behind the curve, in nm; the last band starts at the upper bound.
pub const VISIBLE_BAND_NM: (f64, f64) = (380.0, 750.0);
pub const BAND_STEP_NM: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LuminosityInput {
    pub radius: ScientificValue,
    pub temperature: ScientificValue,
    pub distance: ScientificValue,
}

impl Default for LuminosityInput {
    fn default() -> Self {
        Self {
            radius: STAR_RADIUS.reset(),
            temperature: STAR_TEMPERATURE.reset(),
            distance: DISTANCE.reset(),
        }
    }
}

impl PageInput for LuminosityInput {
    fn with_defaults(defaults: Option<&PageDefaults>) -> Self {
        Self {
            radius: STAR_RADIUS.resolve(defaults),
            temperature: STAR_TEMPERATURE.resolve(defaults),
            distance: DISTANCE.resolve(defaults),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LuminosityOutput {
    pub stellar: StellarOutput,
    pub color: BlackbodyColor,
}

pub struct LuminosityPage;

impl Calculator for LuminosityPage {
    const PAGE: &'static str = "luminosity";
    const TITLE: &'static str = "Stellar Luminosity and Flux";

    type Input = LuminosityInput;
    type Output = LuminosityOutput;
    type Record = LuminosityRecord;

    fn fields() -> Vec<FieldSpec> {
        vec![STAR_RADIUS, STAR_TEMPERATURE, DISTANCE]
    }

    fn evaluate(input: &LuminosityInput) -> Result<LuminosityOutput, PageError> {
        let stellar = stellar_output(
            input.radius.magnitude(),
            input.temperature.magnitude(),
            input.distance.magnitude(),
        )?;
        let color = blackbody_color(input.temperature.magnitude())?;
        Ok(LuminosityOutput { stellar, color })
    }

    fn report(input: &LuminosityInput, output: &LuminosityOutput) -> Report {
        let s = &output.stellar;
        Report::new(Self::TITLE)
            .row("Luminosity (L)", sci_plain(s.luminosity_w, 3), "W")
            .row("Luminosity relative to Sun", sci_plain(s.luminosity_solar, 3), "L☉")
            .row("Flux (F)", sci_plain(s.flux_w_m2, 3), "W/m²")
            .row("Flux relative to Sun", sci_plain(s.flux_solar, 3), "F☉")
            .row("Peak wavelength", format!("{:.0}", s.peak_wavelength_nm), "nm")
            .row("Spectral RGB colour", output.color.hex(), "")
            .formula(r"L = 4\pi R^2 \sigma T^4, \quad F = \frac{L}{4\pi D^2}, \quad \lambda_{max} = \frac{b}{T}")
            .substitution(format!(
                r"L = 4\pi {}^2 \cdot 5.67 \times 10^{{-8}} \cdot {}^4 = {} \ \text{{W}}, \quad F = \frac{{{}}}{{4\pi {}^2}} = {} \ \text{{W/m²}}",
                latex_input(&input.radius),
                latex_input(&input.temperature),
                sci_notation(s.luminosity_w, 3),
                sci_notation(s.luminosity_w, 3),
                latex_input(&input.distance),
                sci_notation(s.flux_w_m2, 3),
            ))
    }

    /// Planck curve over 100–3000 nm on top of the visible spectrum.
    fn plot(input: &LuminosityInput, _output: &LuminosityOutput) -> Option<PlotSpec> {
        let temperature = input.temperature.magnitude();
        let points: Vec<(f64, f64)> = linspace(CURVE_RANGE_NM.0, CURVE_RANGE_NM.1, CURVE_SAMPLES)
            .into_iter()
            .map(|nm| (nm, spectral_radiance(nm * 1e-9, temperature)))
            .collect();
        let peak = points.iter().map(|p| p.1).fold(0.0_f64, f64::max);
        let y_max = if peak > 0.0 { peak } else { 1.0 };

        let band_count = ((VISIBLE_BAND_NM.1 - VISIBLE_BAND_NM.0) / BAND_STEP_NM) as usize + 1;
        let bands = (0..band_count)
            .map(|i| {
                let x0 = VISIBLE_BAND_NM.0 + i as f64 * BAND_STEP_NM;
                Band {
                    x0,
                    x1: x0 + BAND_STEP_NM,
                    color: spectrum_color(x0),
                }
            })
            .collect();

        Some(PlotSpec {
            title: "Spectral Radiance (Planck Curve) with Visible Spectrum".to_string(),
            x_axis: Axis::linear("Wavelength (nm)").with_range(CURVE_RANGE_NM.0, CURVE_RANGE_NM.1),
            y_axis: Axis::linear("Spectral Radiance (W·sr⁻¹·m⁻³)").with_range(0.0, y_max * 1.1),
            body: PlotBody::Lines {
                series: vec![Series {
                    label: format!("T = {temperature:.0} K"),
                    color: Rgb(255, 165, 0),
                    points,
                }],
                markers: Vec::new(),
                bands,
            },
        })
    }

    fn record(
        input: &LuminosityInput,
        output: &LuminosityOutput,
    ) -> Result<LuminosityRecord, PageError> {
        let s = &output.stellar;
        Ok(LuminosityRecord {
            star_radius: input.radius.into(),
            star_temp: input.temperature.into(),
            distance: input.distance.into(),
            luminosity_watt: s.luminosity_w,
            flux_watt_per_m2: s.flux_w_m2,
            peak_wavelength_nm: s.peak_wavelength_nm,
            spectral_rgb: output.color.rgb,
            hex_color: output.color.hex(),
            luminosity_readable: format!("{} W", sci_notation(s.luminosity_w, 3)),
            flux_readable: format!("{} W/m²", sci_notation(s.flux_w_m2, 3)),
            luminosity_solar_units: s.luminosity_solar,
            flux_solar_units: s.flux_solar,
        })
    }

    fn targets() -> &'static [HandoffTarget] {
        &[HandoffTarget::Luminosity]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::evaluate;

    #[test]
    fn sun_from_defaults() {
        let eval = evaluate::<LuminosityPage>(LuminosityInput::default()).expect("luminosity");
        assert!((eval.output.stellar.luminosity_solar - 1.0).abs() < 0.01);
        assert_eq!(eval.output.color.hex(), "#fffbf4");
        let text = eval.report().to_string();
        assert!(text.contains("501 nm") || text.contains("502 nm"), "{text}");
    }

    #[test]
    fn planck_chart_layout() {
        let eval = evaluate::<LuminosityPage>(LuminosityInput::default()).expect("luminosity");
        let plot = eval.plot().expect("plot");
        let PlotBody::Lines { series, bands, .. } = &plot.body else {
            panic!("expected a line chart");
        };
        assert_eq!(series[0].points.len(), CURVE_SAMPLES);
        assert_eq!(bands.len(), 186);
        assert_eq!(bands[0].x0, 380.0);
        assert_eq!(bands[185].x0, 750.0);
        assert_eq!(bands[185].x1, 752.0);
        let peak = series[0].points.iter().map(|p| p.1).fold(0.0_f64, f64::max);
        assert_eq!(plot.y_axis.range, Some((0.0, peak * 1.1)));
    }

    #[test]
    fn cold_star_chart_keeps_unit_scale() {
        let input = LuminosityInput {
            temperature: ScientificValue::new(1.0, 0),
            ..LuminosityInput::default()
        };
        let eval = evaluate::<LuminosityPage>(input).expect("luminosity");
        let plot = eval.plot().expect("plot");
        assert_eq!(plot.y_axis.range, Some((0.0, 1.1)));
        assert_eq!(eval.output.color.hex(), "#000000");
    }

    #[test]
    fn readable_strings_in_record() {
        let eval = evaluate::<LuminosityPage>(LuminosityInput::default()).expect("luminosity");
        let record = eval.record().expect("record");
        assert!(record.luminosity_readable.ends_with(r"\times 10^{26} W"));
        assert_eq!(record.hex_color, "#fffbf4");
    }
}
