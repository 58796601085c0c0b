use super::{DataArg, ReportOutputArg};
use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct MissingArg {
    #[clap(flatten)]
    pub data: DataArg,
    #[clap(flatten)]
    pub output: ReportOutputArg,
}

pub(crate) fn run(arg: &MissingArg) -> anyhow::Result<()> {
    let preprocessor = util::load_sales_data(&arg.data.data)?;
    let report = preprocessor.missing_report();
    arg.output.write(&report, || report.to_string())
}
