use crate::reports;
use clap::Args;
use std::path::PathBuf;
use textgram::error::TgResult;
use textgram::report::load_report;

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// A report previously written by `words`, `ngrams` or `transitions`.
    pub report: PathBuf,

    #[arg(short, long, default_value_t = 20)]
    pub top: usize,
}

pub fn run(args: &InspectArgs) -> TgResult<()> {
    let report = load_report(&args.report)?;
    reports::print_report(&args.report, &report, args.top);
    Ok(())
}
