use anyhow::Context;
use game_sales_analysis::discovery::{ScoreCorrelation, SummaryExplorer, View};
use tracing::info;

use super::{ChartArg, DataArg, ReportOutputArg};
use crate::util;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum ExploreView {
    All,
    ReleaseByYear,
    GlobalSalesByPlatform,
    GlobalSalesByGenre,
    SalesDynamicsByPlatform,
    SalesVsScores,
    SalesByEsrb,
}

impl ExploreView {
    fn views(self) -> Vec<View> {
        match self {
            Self::All => View::ALL.to_vec(),
            Self::ReleaseByYear => vec![View::ReleaseByYear],
            Self::GlobalSalesByPlatform => vec![View::GlobalSalesByPlatform],
            Self::GlobalSalesByGenre => vec![View::GlobalSalesByGenre],
            Self::SalesDynamicsByPlatform => vec![View::SalesDynamicsByPlatform],
            Self::SalesVsScores => vec![View::SalesVsScores],
            Self::SalesByEsrb => vec![View::SalesByEsrb],
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ExploreArg {
    #[clap(flatten)]
    pub data: DataArg,
    /// Chart to draw
    #[arg(value_enum, default_value = "all")]
    pub view: ExploreView,
    #[clap(flatten)]
    pub chart: ChartArg,
    #[clap(flatten)]
    pub output: ReportOutputArg,
}

pub(crate) fn run(arg: &ExploreArg) -> anyhow::Result<()> {
    let preprocessor = util::load_sales_data(&arg.data.data)?;
    let explorer =
        SummaryExplorer::new(preprocessor.data()).context("Failed to prepare the explorer")?;

    let views = arg.view.views();
    let figures = views
        .iter()
        .map(|view| {
            explorer
                .figure(*view)
                .with_context(|| format!("Failed to build chart {view:?}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut renderer = arg.chart.renderer()?;
    super::render_all(&mut renderer, &figures)?;
    info!(
        charts = renderer.written().len(),
        output_dir = %arg.chart.output_dir.display(),
        "charts written"
    );

    if views.contains(&View::SalesVsScores) {
        let correlations = explorer
            .score_correlations()
            .context("Failed to compute score correlations")?;
        arg.output
            .write(&correlations, || correlation_text(&correlations))?;
    }
    Ok(())
}

pub(crate) fn correlation_text(correlations: &[ScoreCorrelation]) -> String {
    correlations
        .iter()
        .map(|c| format!("{c}\n\n"))
        .collect()
}
