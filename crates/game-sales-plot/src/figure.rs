//! Backend-independent description of a chart figure
//!
//! A [`Figure`] is a grid of [`Panel`]s, each holding one [`Chart`]. Analysis
//! code builds figures as plain values and hands them to a
//! [`Renderer`](crate::renderer::Renderer); nothing in here draws.

use std::ops::Range;

use game_sales_stats::box_plot::BoxPlotStats;

/// A complete figure: an optional title over a `rows x cols` grid of panels.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// File stem used when the figure is written out (e.g. `release_by_year`).
    pub name: String,
    /// Title drawn above the whole grid.
    pub title: Option<String>,
    /// Grid shape as `(rows, cols)`. Panels fill it row by row.
    pub grid: (usize, usize),
    /// Preferred pixel size `(width, height)`; the renderer default applies otherwise.
    pub size: Option<(u32, u32)>,
    pub panels: Vec<Panel>,
}

/// One chart with its axes decoration.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// Visible range of the value axis. Data outside it is clipped when
    /// drawn, never removed from the chart data.
    pub value_range: Option<Range<f64>>,
    pub chart: Chart,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Bar(BarChart),
    Box(BoxChart),
    Line(LineChart),
    Scatter(ScatterChart),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Grouped bar chart: one bar per series for each category.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarChart {
    pub orientation: Orientation,
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    /// Legend entry; unlabeled series get no legend.
    pub label: Option<String>,
    /// One value per category, in category order.
    pub values: Vec<f64>,
}

/// Box plot with one box per group.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoxChart {
    pub groups: Vec<BoxGroup>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxGroup {
    pub label: String,
    pub stats: BoxPlotStats,
}

/// Line chart with one labeled line per series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineChart {
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub label: String,
    /// Points in drawing order.
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub color: SeriesColor,
    pub points: Vec<(f64, f64)>,
}

/// Fixed color for a series. Bars and lines take theirs from the palette by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesColor {
    Red,
    Green,
    Blue,
    Black,
}

impl Figure {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            grid: (1, 1),
            size: None,
            panels: vec![],
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_grid(mut self, rows: usize, cols: usize) -> Self {
        self.grid = (rows, cols);
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Some((width, height));
        self
    }

    #[must_use]
    pub fn with_panel(mut self, panel: Panel) -> Self {
        self.panels.push(panel);
        self
    }

    /// Checks that the figure can be drawn as described.
    ///
    /// Returns a human-readable reason when it cannot.
    pub fn validate(&self) -> Result<(), String> {
        let (rows, cols) = self.grid;
        if rows == 0 || cols == 0 {
            return Err(format!("grid {rows}x{cols} has no cells"));
        }
        if self.panels.len() > rows * cols {
            return Err(format!(
                "{} panels do not fit a {rows}x{cols} grid",
                self.panels.len()
            ));
        }
        for panel in &self.panels {
            if let Some(range) = &panel.value_range {
                if range.start.partial_cmp(&range.end) != Some(std::cmp::Ordering::Less) {
                    return Err(format!("empty value range {range:?}"));
                }
            }
            if let Chart::Bar(bars) = &panel.chart {
                let expected = bars.categories.len();
                if let Some(series) = bars.series.iter().find(|s| s.values.len() != expected) {
                    return Err(format!(
                        "bar series {:?} has {} values for {expected} categories",
                        series.label,
                        series.values.len()
                    ));
                }
            }
        }
        Ok(())
    }
}

impl Panel {
    #[must_use]
    pub fn new(chart: Chart) -> Self {
        Self {
            title: None,
            x_label: None,
            y_label: None,
            value_range: None,
            chart,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_value_range(mut self, range: Range<f64>) -> Self {
        self.value_range = Some(range);
        self
    }
}

impl BarChart {
    /// Single-series bar chart from `(category, value)` pairs, in order.
    pub fn from_pairs<I, S>(orientation: Orientation, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let (categories, values): (Vec<String>, Vec<f64>) =
            pairs.into_iter().map(|(c, v)| (c.into(), v)).unzip();
        Self {
            orientation,
            categories,
            series: vec![BarSeries {
                label: None,
                values,
            }],
        }
    }
}
