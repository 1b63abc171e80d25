//! Rasterize a [`PlotSpec`] with plotters. `.svg` paths use the SVG backend, everything
//! else goes through the bitmap backend.
//!
//! Log axes are drawn in log10 space on a linear coordinate system; tick labels are
//! printed back as powers of ten.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;
use tracing::debug;

use super::{AxisScale, Marker, PlotBody, PlotSpec, Rgb};

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("failed to render {}: {message}", path.display())]
    Render { path: PathBuf, message: String },
    #[error("nothing to draw for {}", path.display())]
    Empty { path: PathBuf },
}

/// Output image size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 700,
        }
    }
}

/// Draw `spec` to `path`, creating parent directories as needed.
pub fn render(spec: &PlotSpec, path: &Path, options: RenderOptions) -> Result<(), PlotError> {
    if spec.samples().iter().all(|(_, points)| points.is_empty()) {
        return Err(PlotError::Empty {
            path: path.to_path_buf(),
        });
    }
    let render_err = |message: String| PlotError::Render {
        path: path.to_path_buf(),
        message,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| render_err(e.to_string()))?;
        }
    }

    let size = (options.width, options.height);
    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    let drawn = if is_svg {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw_on_area(&root, spec)
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw_on_area(&root, spec)
    };
    drawn.map_err(|e| render_err(e.to_string()))?;
    debug!(path = %path.display(), title = %spec.title, "plot rendered");
    Ok(())
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

/// Map a data value into drawing space; non-positive values vanish on log axes.
fn project(value: f64, scale: AxisScale) -> Option<f64> {
    match scale {
        AxisScale::Linear if value.is_finite() => Some(value),
        AxisScale::Log if value.is_finite() && value > 0.0 => Some(value.log10()),
        _ => None,
    }
}

fn project_range((min, max): (f64, f64), scale: AxisScale) -> (f64, f64) {
    match scale {
        AxisScale::Linear => (min, max),
        AxisScale::Log => (
            project(min, scale).unwrap_or(0.0),
            project(max, scale).unwrap_or(1.0),
        ),
    }
}

fn linear_tick(v: &f64) -> String {
    let a = v.abs();
    if a == 0.0 {
        "0".to_string()
    } else if !(1e-2..1e4).contains(&a) {
        format!("{v:.1e}")
    } else {
        let text = format!("{v:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn log_tick(v: &f64) -> String {
    format!("1e{v:.0}")
}

fn tick_formatter(scale: AxisScale) -> fn(&f64) -> String {
    match scale {
        AxisScale::Linear => linear_tick,
        AxisScale::Log => log_tick,
    }
}

fn draw_on_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &PlotSpec,
) -> Result<(), Box<dyn Error>>
where
    <DB as DrawingBackend>::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 16.0, FontStyle::Normal);

    let (x0, x1) = match spec.body {
        PlotBody::Bars { .. } => spec.x_range(),
        PlotBody::Lines { .. } => project_range(spec.x_range(), spec.x_axis.scale),
    };
    let (y0, y1) = project_range(spec.y_range(), spec.y_axis.scale);

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .caption(spec.title.clone(), caption_font)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    match &spec.body {
        PlotBody::Lines {
            series,
            markers,
            bands,
        } => {
            let x_fmt = tick_formatter(spec.x_axis.scale);
            let y_fmt = tick_formatter(spec.y_axis.scale);
            chart
                .configure_mesh()
                .x_desc(spec.x_axis.label.as_str())
                .y_desc(spec.y_axis.label.as_str())
                .label_style(label_font.clone())
                .x_label_formatter(&x_fmt)
                .y_label_formatter(&y_fmt)
                .draw()?;

            for band in bands {
                let (Some(bx0), Some(bx1)) = (
                    project(band.x0, spec.x_axis.scale),
                    project(band.x1, spec.x_axis.scale),
                ) else {
                    continue;
                };
                chart.draw_series(std::iter::once(Rectangle::new(
                    [(bx0, y0), (bx1, y1)],
                    rgb(band.color).mix(0.35).filled(),
                )))?;
            }

            for s in series {
                let color = rgb(s.color);
                let points = s.points.iter().filter_map(|&(x, y)| {
                    Some((
                        project(x, spec.x_axis.scale)?,
                        project(y, spec.y_axis.scale)?,
                    ))
                });
                chart
                    .draw_series(LineSeries::new(points, color.stroke_width(2)))?
                    .label(s.label.as_str())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
            }

            for marker in markers {
                match marker {
                    Marker::Vertical { x, label, color } => {
                        let Some(mx) = project(*x, spec.x_axis.scale) else {
                            continue;
                        };
                        let color = rgb(*color);
                        chart.draw_series(std::iter::once(PathElement::new(
                            vec![(mx, y0), (mx, y1)],
                            ShapeStyle::from(&color).stroke_width(2),
                        )))?;
                        chart.draw_series(std::iter::once(Text::new(
                            label.clone(),
                            (mx, y0 + 0.95 * (y1 - y0)),
                            label_font.clone().color(&color),
                        )))?;
                    }
                    Marker::Point { x, y, label, color } => {
                        let (Some(mx), Some(my)) =
                            (project(*x, spec.x_axis.scale), project(*y, spec.y_axis.scale))
                        else {
                            continue;
                        };
                        let color = rgb(*color);
                        chart.draw_series(std::iter::once(Circle::new(
                            (mx, my),
                            6,
                            color.filled(),
                        )))?;
                        chart.draw_series(std::iter::once(Text::new(
                            label.clone(),
                            (mx + 0.02 * (x1 - x0), my),
                            label_font.clone().color(&color),
                        )))?;
                    }
                }
            }

            if !series.is_empty() {
                chart
                    .configure_series_labels()
                    .label_font(label_font.clone())
                    .background_style(WHITE.mix(0.8))
                    .border_style(BLACK)
                    .draw()?;
            }
        }
        PlotBody::Bars { bars, color, unit } => {
            let names: Vec<&str> = bars.iter().map(|b| b.label.as_str()).collect();
            let x_fmt = |v: &f64| {
                let i = v.round();
                if (v - i).abs() < 1e-6 && i >= 0.0 {
                    names.get(i as usize).map(|s| s.to_string()).unwrap_or_default()
                } else {
                    String::new()
                }
            };
            let y_fmt = tick_formatter(spec.y_axis.scale);
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_desc(spec.x_axis.label.as_str())
                .y_desc(spec.y_axis.label.as_str())
                .label_style(label_font.clone())
                .x_labels(bars.len() * 2 + 1)
                .x_label_formatter(&x_fmt)
                .y_label_formatter(&y_fmt)
                .draw()?;

            let fill = rgb(*color);
            for (i, bar) in bars.iter().enumerate() {
                let center = i as f64;
                chart.draw_series(std::iter::once(Rectangle::new(
                    [(center - 0.35, 0.0), (center + 0.35, bar.value)],
                    fill.filled(),
                )))?;
                chart.draw_series(std::iter::once(Text::new(
                    format!("{:.3} {unit}", bar.value),
                    (center - 0.3, bar.value + 0.03 * (y1 - y0)),
                    label_font.clone(),
                )))?;
            }
        }
    }

    root.present()?;
    Ok(())
}
