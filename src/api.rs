use crate::aggregate::{aggregate, Mode};
use crate::config::Config;
use crate::error::TgResult;
use crate::normalize::Normalizer;
use crate::rank::rank;
use crate::report::{build_rows, save_report, Row};
use crate::source::TextSource;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Rows for one mode and (where the mode uses it) one n-gram length.
#[derive(Debug, Clone)]
pub struct ModeReport {
    pub mode: Mode,
    pub n: Option<usize>,
    pub rows: Vec<Row>,
}

impl ModeReport {
    pub fn output_path<P: AsRef<Path>>(&self, output_dir: P) -> PathBuf {
        output_dir
            .as_ref()
            .join(self.mode.to_string())
            .join(self.mode.file_name(self.n.unwrap_or(0)))
    }
}

/// Aggregate, rank and tabulate an already normalized token sequence.
pub fn analyze_tokens(
    tokens: &[String],
    mode: Mode,
    n: usize,
    config: &Config,
) -> TgResult<Vec<Row>> {
    let records = aggregate(tokens, mode, n)?;
    let mut ranked = rank(&records, config.sample_limit);
    if config.row_limit > 0 {
        ranked.truncate(config.row_limit);
    }
    Ok(build_rows(&ranked))
}

/// Full pipeline over a single text body.
pub fn analyze(text: &str, mode: Mode, n: usize, config: &Config) -> TgResult<Vec<Row>> {
    let tokens = Normalizer::new(config.keep_apostrophes).tokenize(text);
    analyze_tokens(&tokens, mode, n, config)
}

/// Fetches text once and produces every report a mode calls for.
///
/// Each n-gram length is analyzed on its own thread with its own maps; the
/// token sequence is shared read-only. Reports come back in ascending `n`.
pub fn run_mode(
    source: &dyn TextSource,
    mode: Mode,
    config: &Config,
) -> TgResult<Vec<ModeReport>> {
    info!("📖 Reading text from {}", source.describe());
    let text = source.fetch()?;

    let tokens = Normalizer::new(config.keep_apostrophes).tokenize(&text);
    if tokens.is_empty() {
        warn!("⚠️  No tokens survived normalization. Reports will be header-only.");
    } else {
        info!("🔤 {} tokens after normalization", tokens.len());
    }

    if !mode.uses_n() {
        let rows = analyze_tokens(&tokens, mode, 0, config)?;
        return Ok(vec![ModeReport {
            mode,
            n: None,
            rows,
        }]);
    }

    let sizes = config.get_ngram_sizes()?;
    sizes
        .par_iter()
        .map(|&n| -> TgResult<ModeReport> {
            info!("🔎 Looking for {}-letter {}...", n, mode);
            let rows = analyze_tokens(&tokens, mode, n, config)?;
            Ok(ModeReport {
                mode,
                n: Some(n),
                rows,
            })
        })
        .collect()
}

pub fn write_reports(reports: &[ModeReport], config: &Config) -> TgResult<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(reports.len());
    for report in reports {
        let path = report.output_path(&config.output_dir);
        save_report(&path, report.mode, &report.rows)?;
        paths.push(path);
    }
    Ok(paths)
}
