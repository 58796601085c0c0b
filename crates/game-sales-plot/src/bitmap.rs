//! Image output for [`Figure`]s using the [`plotters`] crate
//!
//! Every figure becomes one file named after [`Figure::name`] inside the
//! renderer's output directory, either as PNG (bitmap backend) or SVG.

use std::{fs, ops::Range, path::PathBuf};

use plotters::{coord::Shift, drawing::DrawingAreaErrorKind, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    PlotError,
    figure::{
        BarChart, BoxChart, Chart, Figure, LineChart, Orientation, Panel, ScatterChart,
        SeriesColor,
    },
    renderer::Renderer,
};

/// Share of a category slot covered by its group of bars.
const BAR_GROUP_WIDTH: f64 = 0.8;
/// Share of a category slot covered by a box.
const BOX_WIDTH: f64 = 0.5;
/// Relative padding added around automatically computed axis ranges.
const RANGE_PADDING: f64 = 0.05;

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::FromStr,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    #[display("png")]
    Png,
    #[display("svg")]
    Svg,
}

/// Output settings shared by all figures of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// Width in pixels for figures without a preferred size.
    pub width: u32,
    /// Height in pixels for figures without a preferred size.
    pub height: u32,
    /// Multiplier applied to figures' preferred sizes.
    pub scale: f64,
    pub format: ImageFormat,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            scale: 1.0,
            format: ImageFormat::Png,
        }
    }
}

/// Renderer writing each figure to `<output_dir>/<name>.<png|svg>`.
#[derive(Debug, Clone)]
pub struct BitmapRenderer {
    output_dir: PathBuf,
    options: ChartOptions,
    written: Vec<PathBuf>,
}

impl BitmapRenderer {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>, options: ChartOptions) -> Self {
        Self {
            output_dir: output_dir.into(),
            options,
            written: vec![],
        }
    }

    /// Files written so far, in rendering order.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    #[must_use]
    pub fn path_for(&self, figure: &Figure) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", figure.name, self.options.format))
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_lossless
    )]
    #[must_use]
    pub fn size_for(&self, figure: &Figure) -> (u32, u32) {
        match figure.size {
            Some((width, height)) => {
                let scale = |v: u32| ((v as f64) * self.options.scale).round().max(1.0) as u32;
                (scale(width), scale(height))
            }
            None => (self.options.width, self.options.height),
        }
    }
}

impl Renderer for BitmapRenderer {
    fn render(&mut self, figure: &Figure) -> Result<(), PlotError> {
        figure
            .validate()
            .map_err(|reason| PlotError::InvalidFigure {
                figure: figure.name.clone(),
                reason,
            })?;
        fs::create_dir_all(&self.output_dir).map_err(|source| PlotError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })?;

        let path = self.path_for(figure);
        let size = self.size_for(figure);
        debug!(figure = %figure.name, path = %path.display(), ?size, "rendering figure");

        let drawn = match self.options.format {
            ImageFormat::Png => {
                draw_figure(&BitMapBackend::new(&path, size).into_drawing_area(), figure)
            }
            ImageFormat::Svg => {
                draw_figure(&SVGBackend::new(&path, size).into_drawing_area(), figure)
            }
        };
        drawn.map_err(|DrawFailure(message)| PlotError::Drawing {
            figure: figure.name.clone(),
            message,
        })?;

        info!(path = %path.display(), "figure written");
        self.written.push(path);
        Ok(())
    }
}

/// Backend error flattened to text, so drawing code stays backend-generic.
struct DrawFailure(String);

impl<E> From<DrawingAreaErrorKind<E>> for DrawFailure
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        Self(err.to_string())
    }
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
) -> Result<(), DrawFailure> {
    root.fill(&WHITE)?;
    let body = match &figure.title {
        Some(title) => root.titled(title, ("sans-serif", 28.0).into_font())?,
        None => root.clone(),
    };
    for (cell, panel) in body.split_evenly(figure.grid).iter().zip(&figure.panels) {
        match &panel.chart {
            Chart::Bar(bars) => draw_bar_chart(cell, panel, bars)?,
            Chart::Box(boxes) => draw_box_chart(cell, panel, boxes)?,
            Chart::Line(lines) => draw_line_chart(cell, panel, lines)?,
            Chart::Scatter(points) => draw_scatter_chart(cell, panel, points)?,
        }
    }
    root.present()?;
    Ok(())
}

fn configure_builder<DB: DrawingBackend>(builder: &mut ChartBuilder<'_, '_, DB>, panel: &Panel) {
    builder
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(72);
    if let Some(title) = &panel.title {
        builder.caption(title, ("sans-serif", 20));
    }
}

#[expect(clippy::cast_precision_loss)]
fn draw_bar_chart<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    bars: &BarChart,
) -> Result<(), DrawFailure> {
    let value_range = panel.value_range.clone().unwrap_or_else(|| {
        let max = bars
            .series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0, f64::max);
        zero_based_range(max)
    });
    let bar_width = BAR_GROUP_WIDTH / bars.series.len().max(1) as f64;
    let bar_start = |category: usize, series: usize| {
        category as f64 - BAR_GROUP_WIDTH / 2.0 + bar_width * series as f64
    };
    let labels = |position: &f64| category_label(&bars.categories, *position);
    let has_legend = bars.series.iter().any(|s| s.label.is_some());

    let mut builder = ChartBuilder::on(area);
    configure_builder(&mut builder, panel);

    match bars.orientation {
        Orientation::Vertical => {
            let mut chart = builder
                .build_cartesian_2d(category_range(bars.categories.len()), value_range.clone())?;
            let mut mesh = chart.configure_mesh();
            mesh.disable_x_mesh()
                .x_labels(bars.categories.len())
                .x_label_formatter(&labels);
            if let Some(label) = &panel.x_label {
                mesh.x_desc(label.as_str());
            }
            if let Some(label) = &panel.y_label {
                mesh.y_desc(label.as_str());
            }
            mesh.draw()?;

            for (index, series) in bars.series.iter().enumerate() {
                let color = palette_color(index);
                let anno = chart.draw_series(series.values.iter().enumerate().map(|(c, &v)| {
                    let start = bar_start(c, index);
                    Rectangle::new(
                        [(start, 0.0), (start + bar_width, clip(v, &value_range))],
                        color.filled(),
                    )
                }))?;
                if let Some(label) = &series.label {
                    anno.label(label.as_str()).legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                    });
                }
            }
            if has_legend {
                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::UpperRight)
                    .background_style(&WHITE.mix(0.8))
                    .border_style(&BLACK)
                    .draw()?;
            }
        }
        Orientation::Horizontal => {
            let mut chart = builder
                .build_cartesian_2d(value_range.clone(), category_range(bars.categories.len()))?;
            let mut mesh = chart.configure_mesh();
            mesh.disable_y_mesh()
                .y_labels(bars.categories.len())
                .y_label_formatter(&labels);
            if let Some(label) = &panel.x_label {
                mesh.x_desc(label.as_str());
            }
            if let Some(label) = &panel.y_label {
                mesh.y_desc(label.as_str());
            }
            mesh.draw()?;

            for (index, series) in bars.series.iter().enumerate() {
                let color = palette_color(index);
                let anno = chart.draw_series(series.values.iter().enumerate().map(|(c, &v)| {
                    let start = bar_start(c, index);
                    Rectangle::new(
                        [(0.0, start), (clip(v, &value_range), start + bar_width)],
                        color.filled(),
                    )
                }))?;
                if let Some(label) = &series.label {
                    anno.label(label.as_str()).legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                    });
                }
            }
            if has_legend {
                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::LowerRight)
                    .background_style(&WHITE.mix(0.8))
                    .border_style(&BLACK)
                    .draw()?;
            }
        }
    }
    Ok(())
}

#[expect(clippy::cast_precision_loss)]
fn draw_box_chart<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    boxes: &BoxChart,
) -> Result<(), DrawFailure> {
    let value_range = panel.value_range.clone().unwrap_or_else(|| {
        let (min, max) = boxes.groups.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), group| {
                let stats = &group.stats;
                let low = stats
                    .outliers
                    .first()
                    .map_or(stats.whisker_low, |&v| v.min(stats.whisker_low));
                let high = stats
                    .outliers
                    .last()
                    .map_or(stats.whisker_high, |&v| v.max(stats.whisker_high));
                (min.min(low), max.max(high))
            },
        );
        padded_range(min, max)
    });
    let labels = |position: &f64| {
        let names = boxes.groups.iter().map(|g| g.label.clone()).collect::<Vec<_>>();
        category_label(&names, *position)
    };

    let mut builder = ChartBuilder::on(area);
    configure_builder(&mut builder, panel);
    let mut chart =
        builder.build_cartesian_2d(category_range(boxes.groups.len()), value_range.clone())?;
    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .x_labels(boxes.groups.len())
        .x_label_formatter(&labels);
    if let Some(label) = &panel.x_label {
        mesh.x_desc(label.as_str());
    }
    if let Some(label) = &panel.y_label {
        mesh.y_desc(label.as_str());
    }
    mesh.draw()?;

    let half = BOX_WIDTH / 2.0;
    let line = BLACK.stroke_width(1);
    for (index, group) in boxes.groups.iter().enumerate() {
        let x = index as f64;
        let stats = &group.stats;
        let at = |v: f64| clip(v, &value_range);

        let corners = [(x - half, at(stats.q1)), (x + half, at(stats.q3))];
        chart.draw_series([Rectangle::new(corners, BLUE.mix(0.25).filled())])?;
        chart.draw_series([Rectangle::new(corners, line)])?;
        chart.draw_series([
            PathElement::new(vec![(x, at(stats.q3)), (x, at(stats.whisker_high))], line),
            PathElement::new(vec![(x, at(stats.q1)), (x, at(stats.whisker_low))], line),
            PathElement::new(
                vec![
                    (x - half / 2.0, at(stats.whisker_high)),
                    (x + half / 2.0, at(stats.whisker_high)),
                ],
                line,
            ),
            PathElement::new(
                vec![
                    (x - half / 2.0, at(stats.whisker_low)),
                    (x + half / 2.0, at(stats.whisker_low)),
                ],
                line,
            ),
            PathElement::new(
                vec![(x - half, at(stats.median)), (x + half, at(stats.median))],
                RED.stroke_width(2),
            ),
        ])?;
        chart.draw_series(
            stats
                .outliers
                .iter()
                .filter(|v| value_range.contains(*v))
                .map(|&v| Circle::new((x, v), 3, line)),
        )?;
    }
    Ok(())
}

fn draw_line_chart<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    lines: &LineChart,
) -> Result<(), DrawFailure> {
    let points = || lines.lines.iter().flat_map(|l| l.points.iter().copied());
    let x_range = padded_range(
        points().map(|(x, _)| x).fold(f64::INFINITY, f64::min),
        points().map(|(x, _)| x).fold(f64::NEG_INFINITY, f64::max),
    );
    let value_range = panel
        .value_range
        .clone()
        .unwrap_or_else(|| zero_based_range(points().map(|(_, y)| y).fold(0.0, f64::max)));
    let whole_numbers = |x: &f64| format!("{x:.0}");

    let mut builder = ChartBuilder::on(area);
    configure_builder(&mut builder, panel);
    let mut chart = builder.build_cartesian_2d(x_range, value_range)?;
    let mut mesh = chart.configure_mesh();
    mesh.x_label_formatter(&whole_numbers);
    if let Some(label) = &panel.x_label {
        mesh.x_desc(label.as_str());
    }
    if let Some(label) = &panel.y_label {
        mesh.y_desc(label.as_str());
    }
    mesh.draw()?;

    for (index, line) in lines.lines.iter().enumerate() {
        let color = palette_color(index);
        chart
            .draw_series(LineSeries::new(line.points.iter().copied(), color.stroke_width(2)))?
            .label(line.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }
    if !lines.lines.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }
    Ok(())
}

fn draw_scatter_chart<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    scatter: &ScatterChart,
) -> Result<(), DrawFailure> {
    let xs = || scatter.points.iter().map(|(x, _)| *x);
    let ys = || scatter.points.iter().map(|(_, y)| *y);
    let x_range = padded_range(
        xs().fold(f64::INFINITY, f64::min),
        xs().fold(f64::NEG_INFINITY, f64::max),
    );
    let value_range = panel.value_range.clone().unwrap_or_else(|| {
        padded_range(
            ys().fold(f64::INFINITY, f64::min),
            ys().fold(f64::NEG_INFINITY, f64::max),
        )
    });
    let color = named_color(scatter.color);

    let mut builder = ChartBuilder::on(area);
    configure_builder(&mut builder, panel);
    let mut chart = builder.build_cartesian_2d(x_range, value_range)?;
    let mut mesh = chart.configure_mesh();
    if let Some(label) = &panel.x_label {
        mesh.x_desc(label.as_str());
    }
    if let Some(label) = &panel.y_label {
        mesh.y_desc(label.as_str());
    }
    mesh.draw()?;

    chart.draw_series(
        scatter
            .points
            .iter()
            .map(|&point| Circle::new(point, 4, color.filled())),
    )?;
    chart.draw_series(
        scatter
            .points
            .iter()
            .map(|&point| Circle::new(point, 4, BLACK.stroke_width(1))),
    )?;
    Ok(())
}

fn palette_color(index: usize) -> RGBAColor {
    Palette99::pick(index).to_rgba()
}

fn named_color(color: SeriesColor) -> RGBAColor {
    match color {
        SeriesColor::Red => RED.to_rgba(),
        SeriesColor::Green => GREEN.to_rgba(),
        SeriesColor::Blue => BLUE.to_rgba(),
        SeriesColor::Black => BLACK.to_rgba(),
    }
}

fn clip(value: f64, range: &Range<f64>) -> f64 {
    value.clamp(range.start, range.end)
}

/// Slots `0..count` centered on whole numbers.
#[expect(clippy::cast_precision_loss)]
fn category_range(count: usize) -> Range<f64> {
    -0.5..(count.max(1) as f64 - 0.5)
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn category_label(categories: &[String], position: f64) -> String {
    let index = position.round();
    if index < 0.0 || (position - index).abs() > 1e-6 {
        return String::new();
    }
    categories.get(index as usize).cloned().unwrap_or_default()
}

fn zero_based_range(max: f64) -> Range<f64> {
    if max.is_finite() && max > 0.0 {
        0.0..max * (1.0 + RANGE_PADDING)
    } else {
        0.0..1.0
    }
}

fn padded_range(min: f64, max: f64) -> Range<f64> {
    if !min.is_finite() || !max.is_finite() || min > max {
        return 0.0..1.0;
    }
    if max - min < f64::EPSILON {
        return (min - 0.5)..(max + 0.5);
    }
    let pad = (max - min) * RANGE_PADDING;
    (min - pad)..(max + pad)
}
