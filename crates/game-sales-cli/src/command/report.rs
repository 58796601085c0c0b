use anyhow::Context;
use game_sales_analysis::{
    discovery::{EsrbSales, ScoreCorrelation, SummaryExplorer, View},
    missing::MissingReport,
    top_five::{RegionalRankings, TopFiveReporter},
};
use serde::Serialize;
use tracing::info;

use super::{ChartArg, DataArg, ReportOutputArg, explore};
use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    #[clap(flatten)]
    pub data: DataArg,
    #[clap(flatten)]
    pub chart: ChartArg,
    #[clap(flatten)]
    pub output: ReportOutputArg,
}

#[derive(Debug, Serialize)]
struct FullReport {
    missing: MissingReport,
    score_correlations: Vec<ScoreCorrelation>,
    esrb_sales: Vec<EsrbSales>,
    top_genres: RegionalRankings,
    top_platforms: RegionalRankings,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let preprocessor = util::load_sales_data(&arg.data.data)?;
    let data = preprocessor.data();
    let explorer = SummaryExplorer::new(data).context("Failed to prepare the explorer")?;
    let reporter = TopFiveReporter::new(data).context("Failed to prepare the reporter")?;

    let mut figures = View::ALL
        .into_iter()
        .map(|view| {
            explorer
                .figure(view)
                .with_context(|| format!("Failed to build chart {view:?}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let report = FullReport {
        missing: preprocessor.missing_report(),
        score_correlations: explorer
            .score_correlations()
            .context("Failed to compute score correlations")?,
        esrb_sales: explorer
            .esrb_sales()
            .context("Failed to sum sales by rating")?,
        top_genres: reporter
            .top_genres_by_region()
            .context("Failed to rank genres")?,
        top_platforms: reporter
            .top_platforms_by_region()
            .context("Failed to rank platforms")?,
    };
    figures.push(report.top_genres.figure());
    figures.push(report.top_platforms.figure());

    let mut renderer = arg.chart.renderer()?;
    super::render_all(&mut renderer, &figures)?;
    info!(
        charts = renderer.written().len(),
        output_dir = %arg.chart.output_dir.display(),
        "charts written"
    );

    arg.output.write(&report, || text_report(&report))
}

fn text_report(report: &FullReport) -> String {
    let mut text = format!("{}\n", report.missing);
    text.push_str(&explore::correlation_text(&report.score_correlations));
    for ranking in report
        .top_genres
        .rankings
        .iter()
        .chain(&report.top_platforms.rankings)
    {
        text.push_str(&format!("{ranking}\n"));
    }
    text
}
