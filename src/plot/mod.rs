//! Chart descriptions produced by the calculator pages.
//!
//! A [`PlotSpec`] is plain data: sampled series, axes, markers, and background bands.
//! Building one is deterministic; [`render`] turns it into an image.

pub mod render;

pub use astro_stellar::color::Rgb;
pub use render::{PlotError, RenderOptions, render};

/// Axis scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    Linear,
    Log,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub label: String,
    pub scale: AxisScale,
    /// Fixed bounds; derived from the data when absent.
    pub range: Option<(f64, f64)>,
}

impl Axis {
    pub fn linear(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            scale: AxisScale::Linear,
            range: None,
        }
    }

    pub fn log(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            scale: AxisScale::Log,
            range: None,
        }
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }

    /// CSV column name derived from the label, e.g. `Speed (km/s)` becomes `speed_km_s`.
    pub fn column_name(&self) -> String {
        let mut out = String::with_capacity(self.label.len());
        let mut gap = false;
        for ch in self.label.chars() {
            if ch.is_ascii_alphanumeric() {
                if gap && !out.is_empty() {
                    out.push('_');
                }
                gap = false;
                out.push(ch.to_ascii_lowercase());
            } else {
                gap = true;
            }
        }
        if out.is_empty() { "value".to_string() } else { out }
    }
}

/// A sampled curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub color: Rgb,
    pub points: Vec<(f64, f64)>,
}

/// Annotation drawn over the series.
#[derive(Debug, Clone, PartialEq)]
pub enum Marker {
    /// Vertical line at `x`.
    Vertical { x: f64, label: String, color: Rgb },
    /// Highlighted point with a text label.
    Point {
        x: f64,
        y: f64,
        label: String,
        color: Rgb,
    },
}

/// Filled background span between `x0` and `x1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub x0: f64,
    pub x1: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlotBody {
    Lines {
        series: Vec<Series>,
        markers: Vec<Marker>,
        bands: Vec<Band>,
    },
    Bars {
        bars: Vec<Bar>,
        color: Rgb,
        /// Suffix used on the value labels above each bar.
        unit: String,
    },
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub body: PlotBody,
}

impl PlotSpec {
    /// Samples of every series as `(name, points)`; bars become `(index + 1, value)`.
    pub fn samples(&self) -> Vec<(String, Vec<(f64, f64)>)> {
        match &self.body {
            PlotBody::Lines { series, .. } => series
                .iter()
                .map(|s| (s.label.clone(), s.points.clone()))
                .collect(),
            PlotBody::Bars { bars, .. } => bars
                .iter()
                .enumerate()
                .map(|(i, bar)| (bar.label.clone(), vec![((i + 1) as f64, bar.value)]))
                .collect(),
        }
    }

    /// X bounds: the fixed range, else the extent of the data.
    pub fn x_range(&self) -> (f64, f64) {
        match &self.body {
            PlotBody::Bars { bars, .. } => (-0.5, bars.len() as f64 - 0.5),
            PlotBody::Lines { series, .. } => self.x_axis.range.unwrap_or_else(|| {
                extent(series.iter().flat_map(|s| s.points.iter().map(|p| p.0)), self.x_axis.scale)
            }),
        }
    }

    /// Y bounds: the fixed range, else the extent of the data.
    pub fn y_range(&self) -> (f64, f64) {
        if let Some(range) = self.y_axis.range {
            return range;
        }
        match &self.body {
            PlotBody::Bars { bars, .. } => {
                let max = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
                (0.0, if max > 0.0 { max * 1.15 } else { 1.0 })
            }
            PlotBody::Lines { series, .. } => extent(
                series.iter().flat_map(|s| s.points.iter().map(|p| p.1)),
                self.y_axis.scale,
            ),
        }
    }
}

/// Min/max of the finite values (positive only on log axes), widened when degenerate.
fn extent(values: impl Iterator<Item = f64>, scale: AxisScale) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        if !v.is_finite() || (scale == AxisScale::Log && v <= 0.0) {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return match scale {
            AxisScale::Linear => (0.0, 1.0),
            AxisScale::Log => (1.0, 10.0),
        };
    }
    if min == max {
        return match scale {
            AxisScale::Linear => (min - 0.5, max + 0.5),
            AxisScale::Log => (min / 10.0, max * 10.0),
        };
    }
    (min, max)
}

/// `n` evenly spaced values from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// `n` values evenly spaced in log10 from `10^start_exp` to `10^end_exp`.
pub fn logspace(start_exp: f64, end_exp: f64, n: usize) -> Vec<f64> {
    linspace(start_exp, end_exp, n)
        .into_iter()
        .map(|e| 10f64.powf(e))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_ends() {
        let v = linspace(0.0, 1.5, 4);
        assert_eq!(v, vec![0.0, 0.5, 1.0, 1.5]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
    }

    #[test]
    fn logspace_spans_decades() {
        let v = logspace(-6.0, 0.0, 7);
        assert_eq!(v.len(), 7);
        assert!((v[0] - 1e-6).abs() < 1e-18);
        assert!((v[6] - 1.0).abs() < 1e-12);
        assert!((v[3] - 1e-3).abs() < 1e-15);
    }

    #[test]
    fn column_names_from_labels() {
        assert_eq!(Axis::linear("Speed (km/s)").column_name(), "speed_km_s");
        assert_eq!(
            Axis::linear("Spectral Radiance (W·sr⁻¹·m⁻³)").column_name(),
            "spectral_radiance_w_sr_m"
        );
        assert_eq!(Axis::log("··").column_name(), "value");
    }

    #[test]
    fn ranges_fall_back_to_data_extent() {
        let spec = PlotSpec {
            title: "t".into(),
            x_axis: Axis::log("x"),
            y_axis: Axis::linear("y").with_range(0.0, 160.0),
            body: PlotBody::Lines {
                series: vec![Series {
                    label: "s".into(),
                    color: Rgb::BLACK,
                    points: vec![(0.0, 1.0), (1e-3, 5.0), (10.0, f64::NAN)],
                }],
                markers: Vec::new(),
                bands: Vec::new(),
            },
        };
        assert_eq!(spec.x_range(), (1e-3, 10.0));
        assert_eq!(spec.y_range(), (0.0, 160.0));
    }

    #[test]
    fn bar_samples_are_indexed_from_one() {
        let spec = PlotSpec {
            title: "t".into(),
            x_axis: Axis::linear("Planet"),
            y_axis: Axis::linear("Period (years)"),
            body: PlotBody::Bars {
                bars: vec![
                    Bar {
                        label: "Planet 1".into(),
                        value: 1.0,
                    },
                    Bar {
                        label: "Planet 2".into(),
                        value: 2.0,
                    },
                ],
                color: Rgb::BLACK,
                unit: "yr".into(),
            },
        };
        let samples = spec.samples();
        assert_eq!(samples[1], ("Planet 2".to_string(), vec![(2.0, 2.0)]));
        assert_eq!(spec.x_range(), (-0.5, 1.5));
        assert_eq!(spec.y_range(), (0.0, 2.0 * 1.15));
    }
}
