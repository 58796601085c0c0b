//! Chart descriptions and renderers for the game sales analysis.
//!
//! Analysis code describes what to show as [`figure::Figure`] values. A
//! [`renderer::Renderer`] turns them into something visible:
//!
//! - [`bitmap::BitmapRenderer`] writes PNG or SVG files with `plotters`
//! - [`renderer::RecordingRenderer`] keeps them in memory, for tests and
//!   for callers that want the chart data itself
//!
//! # Examples
//!
//! ```
//! use game_sales_plot::{
//!     figure::{BarChart, Chart, Figure, Orientation, Panel},
//!     renderer::{RecordingRenderer, Renderer},
//! };
//!
//! let figure = Figure::new("sales_by_genre").with_panel(
//!     Panel::new(Chart::Bar(BarChart::from_pairs(
//!         Orientation::Vertical,
//!         [("Action", 12.5), ("Shooter", 9.1)],
//!     )))
//!     .with_y_label("sales (millions)"),
//! );
//!
//! let mut renderer = RecordingRenderer::new();
//! renderer.render(&figure).unwrap();
//! assert_eq!(renderer.figures.len(), 1);
//! ```

use std::{io, path::PathBuf};

pub mod bitmap;
pub mod figure;
pub mod renderer;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum PlotError {
    #[display("failed to create output directory {}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[display("failed to draw figure {figure}: {message}")]
    Drawing {
        figure: String,
        message: String,
    },
    #[display("figure {figure} cannot be drawn: {reason}")]
    InvalidFigure {
        figure: String,
        reason: String,
    },
}
