use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use game_sales_plot::{
    bitmap::{BitmapRenderer, ChartOptions, ImageFormat},
    figure::Figure,
    renderer::Renderer,
};

use self::{explore::ExploreArg, missing::MissingArg, report::ReportArg, top_five::TopFiveArg};
use crate::{logging, util};

mod explore;
mod missing;
mod report;
mod top_five;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log filter used when `RUST_LOG` is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Show the share of missing values per column
    Missing(#[clap(flatten)] MissingArg),
    /// Draw distribution and trend charts
    Explore(#[clap(flatten)] ExploreArg),
    /// Rank the best-selling genres or platforms per region
    TopFive(#[clap(flatten)] TopFiveArg),
    /// Run every analysis and draw every chart
    Report(#[clap(flatten)] ReportArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logging::init_tracing(&args.log_level)?;
    match args.mode {
        Mode::Missing(arg) => missing::run(&arg)?,
        Mode::Explore(arg) => explore::run(&arg)?,
        Mode::TopFive(arg) => top_five::run(&arg)?,
        Mode::Report(arg) => report::run(&arg)?,
    }
    Ok(())
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DataArg {
    /// Path to the game sales CSV file
    pub data: PathBuf,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReportOutputArg {
    /// Print reports as JSON
    #[arg(long)]
    pub json: bool,
    /// Write reports to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl ReportOutputArg {
    pub fn write<T>(&self, value: &T, text: impl FnOnce() -> String) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        if self.json {
            util::Output::save_json(value, self.output.clone())
        } else {
            util::Output::from_output_path(self.output.clone())?.write_text(&text())
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ChartArg {
    /// Directory the chart images are written to
    #[arg(long, default_value = "charts")]
    pub output_dir: PathBuf,
    /// JSON file with chart settings (width, height, scale, format)
    #[arg(long)]
    pub chart_config: Option<PathBuf>,
    /// Image format, overriding the chart config
    #[arg(long)]
    pub format: Option<ImageFormat>,
    /// Default image width in pixels, overriding the chart config
    #[arg(long)]
    pub width: Option<u32>,
    /// Default image height in pixels, overriding the chart config
    #[arg(long)]
    pub height: Option<u32>,
}

impl ChartArg {
    pub fn options(&self) -> anyhow::Result<ChartOptions> {
        let mut options = match &self.chart_config {
            Some(path) => util::read_chart_config_file(path)?,
            None => ChartOptions::default(),
        };
        if let Some(format) = self.format {
            options.format = format;
        }
        if let Some(width) = self.width {
            options.width = width;
        }
        if let Some(height) = self.height {
            options.height = height;
        }
        Ok(options)
    }

    pub fn renderer(&self) -> anyhow::Result<BitmapRenderer> {
        Ok(BitmapRenderer::new(&self.output_dir, self.options()?))
    }
}

pub(crate) fn render_all<R>(renderer: &mut R, figures: &[Figure]) -> anyhow::Result<()>
where
    R: Renderer,
{
    for figure in figures {
        renderer
            .render(figure)
            .with_context(|| format!("Failed to render chart {}", figure.name))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parses_top_five_with_region() {
        let args = CommandArgs::try_parse_from([
            "game-sales",
            "top-five",
            "games.csv",
            "genres",
            "--region",
            "JP",
            "--json",
        ])
        .unwrap();
        let Mode::TopFive(arg) = args.mode else {
            panic!("expected top-five");
        };
        assert!(format!("{arg:?}").contains("Japan"));
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_rejects_unsupported_region() {
        let result = CommandArgs::try_parse_from([
            "game-sales",
            "top-five",
            "games.csv",
            "platforms",
            "--region",
            "other",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_chart_flags_override_defaults() {
        let args = CommandArgs::try_parse_from([
            "game-sales",
            "explore",
            "games.csv",
            "sales-by-esrb",
            "--format",
            "svg",
            "--width",
            "640",
        ])
        .unwrap();
        let Mode::Explore(arg) = args.mode else {
            panic!("expected explore");
        };
        let options = arg.chart.options().unwrap();
        assert_eq!(options.format, ImageFormat::Svg);
        assert_eq!(options.width, 640);
        assert_eq!(options.height, ChartOptions::default().height);
        assert_eq!(arg.chart.output_dir, PathBuf::from("charts"));
    }
}
