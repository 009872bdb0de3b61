use crate::reports;
use clap::Args;
use textgram::aggregate::Mode;
use textgram::api;
use textgram::config::Config;
use textgram::error::TgResult;
use textgram::source::TextSource;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub config: Config,
}

pub fn run(mode: Mode, config: &Config, source: &dyn TextSource) -> TgResult<()> {
    let reports = api::run_mode(source, mode, config)?;
    let paths = api::write_reports(&reports, config)?;

    reports::print_run_summary(&reports, &paths);
    info!("✅ {} analysis complete: {} report(s)", mode, paths.len());
    Ok(())
}
