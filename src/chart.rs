//! PNG line charts of per-sample differences.

use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use thiserror::Error;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 700;
/// Smallest half-height of the value axis, so all-zero differences still get a valid range.
const MIN_AXIS_MAX: f64 = 1e-20;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to prepare chart directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to render chart {path}: {message}")]
    Render { path: PathBuf, message: String },
}

/// One plotted series.
#[derive(Debug, Clone)]
pub struct ChartLine {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct LineChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub lines: Vec<ChartLine>,
}

impl LineChart {
    pub fn new(title: impl Into<String>, x_desc: impl Into<String>, y_desc: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_desc: x_desc.into(),
            y_desc: y_desc.into(),
            lines: Vec::new(),
        }
    }

    pub fn push_line(&mut self, label: impl Into<String>, points: Vec<(f64, f64)>) {
        self.lines.push(ChartLine {
            label: label.into(),
            points,
        });
    }

    fn points(&self) -> impl Iterator<Item = &(f64, f64)> {
        self.lines.iter().flat_map(|line| line.points.iter())
    }
}

/// Symmetric value range showing every difference with a 20% margin.
pub fn display_range<I>(values: I) -> (f64, f64)
where
    I: IntoIterator<Item = f64>,
{
    let max = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let axis_max = max.max(MIN_AXIS_MAX);
    (-1.2 * axis_max, 1.2 * axis_max)
}

/// Range of the time axis; a single instant is widened to a unit interval.
pub fn time_range<I>(times: I) -> (f64, f64)
where
    I: IntoIterator<Item = f64>,
{
    let (min, max) = times
        .into_iter()
        .filter(|t| t.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
            (lo.min(t), hi.max(t))
        });
    if !min.is_finite() {
        (0.0, 1.0)
    } else if max <= min {
        (min, min + 1.0)
    } else {
        (min, max)
    }
}

/// Render `chart` as a PNG at `path`.
pub fn render_line_chart(path: &Path, chart: &LineChart) -> Result<(), ChartError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let render_error = |err: &dyn std::fmt::Display| ChartError::Render {
        path: path.to_path_buf(),
        message: err.to_string(),
    };

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| render_error(&e))?;

    let (x_min, x_max) = time_range(chart.points().map(|p| p.0));
    let (y_min, y_max) = display_range(chart.points().map(|p| p.1));

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 16.0, FontStyle::Normal);

    let mut ctx = ChartBuilder::on(&root)
        .margin(20)
        .caption(chart.title.as_str(), caption_font)
        .x_label_area_size(50)
        .y_label_area_size(100)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| render_error(&e))?;

    ctx.configure_mesh()
        .x_desc(chart.x_desc.as_str())
        .y_desc(chart.y_desc.as_str())
        .label_style(label_font.clone())
        .axis_desc_style(label_font.clone())
        .x_labels(8)
        .y_labels(8)
        .y_label_formatter(&|v| format!("{v:.3e}"))
        .draw()
        .map_err(|e| render_error(&e))?;

    for (idx, line) in chart.lines.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        ctx.draw_series(LineSeries::new(line.points.iter().copied(), &color))
            .map_err(|e| render_error(&e))?
            .label(line.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    ctx.configure_series_labels()
        .label_font(label_font)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| render_error(&e))?;

    root.present().map_err(|e| render_error(&e))?;
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
