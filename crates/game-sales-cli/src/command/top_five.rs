use anyhow::Context;
use game_sales_analysis::{
    region::Region,
    top_five::{RankedBy, TopFiveReporter},
};

use super::{ChartArg, DataArg, ReportOutputArg};
use crate::util;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum RankingKind {
    Genres,
    Platforms,
}

impl From<RankingKind> for RankedBy {
    fn from(kind: RankingKind) -> Self {
        match kind {
            RankingKind::Genres => RankedBy::Genre,
            RankingKind::Platforms => RankedBy::Platform,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TopFiveArg {
    #[clap(flatten)]
    pub data: DataArg,
    /// What to rank
    #[arg(value_enum)]
    pub kind: RankingKind,
    /// Only rank this region (jp, na or eu); no chart is drawn
    #[arg(long)]
    pub region: Option<Region>,
    #[clap(flatten)]
    pub chart: ChartArg,
    #[clap(flatten)]
    pub output: ReportOutputArg,
}

pub(crate) fn run(arg: &TopFiveArg) -> anyhow::Result<()> {
    let preprocessor = util::load_sales_data(&arg.data.data)?;
    let reporter =
        TopFiveReporter::new(preprocessor.data()).context("Failed to prepare the reporter")?;
    let ranked_by = RankedBy::from(arg.kind);

    if let Some(region) = arg.region {
        let ranking = reporter
            .ranking(ranked_by, region)
            .with_context(|| format!("Failed to rank {ranked_by:?} in {region}"))?;
        return arg.output.write(&ranking, || ranking.to_string());
    }

    let rankings = reporter
        .by_region(ranked_by)
        .with_context(|| format!("Failed to rank {ranked_by:?} by region"))?;
    let mut renderer = arg.chart.renderer()?;
    super::render_all(&mut renderer, &[rankings.figure()])?;
    arg.output.write(&rankings, || {
        rankings
            .rankings
            .iter()
            .map(|r| format!("{r}\n"))
            .collect()
    })
}
