use crate::aggregate::Mode;
use crate::error::TgResult;
use crate::rank::RankedRecord;
use csv::{QuoteStyle, Terminator};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info};

pub const COUNT_COLUMN: &str = "count";
pub const SAMPLE_COLUMN: &str = "common_words";
pub const SAMPLE_JOIN: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub key: String,
    pub count: u64,
    pub sample: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoadedReport {
    /// First header column: "sequence" or "transition".
    pub key_column: String,
    pub rows: Vec<Row>,
}

pub fn header(mode: Mode) -> [&'static str; 3] {
    [mode.header(), COUNT_COLUMN, SAMPLE_COLUMN]
}

pub fn build_rows(ranked: &[RankedRecord]) -> Vec<Row> {
    ranked
        .iter()
        .map(|r| Row {
            key: r.key.clone(),
            count: r.count,
            sample: r.sample.join(SAMPLE_JOIN),
        })
        .collect()
}

/// Writes the header line then one `key,count,sample` line per row.
/// Fields are never quoted; keys and samples hold no commas other than the
/// sample separator.
pub fn write_rows<W: Write>(writer: W, mode: Mode, rows: &[Row]) -> TgResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(header(mode))?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn render_rows(mode: Mode, rows: &[Row]) -> TgResult<String> {
    let mut buf = Vec::new();
    write_rows(&mut buf, mode, rows)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn save_report<P: AsRef<Path>>(path: P, mode: Mode, rows: &[Row]) -> TgResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    write_rows(BufWriter::new(file), mode, rows)?;
    info!("💾 Saved {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Reads a report back. The sample column is unquoted and contains the
/// `", "` separator, so every field after the count is rejoined.
pub fn read_rows<R: Read>(reader: R) -> TgResult<LoadedReport> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .quoting(false)
        .flexible(true)
        .from_reader(reader);

    let key_column = rdr
        .headers()?
        .get(0)
        .map(|h| h.trim().to_string())
        .unwrap_or_default();

    let mut rows = Vec::new();
    let mut skipped = 0;

    for (idx, result) in rdr.records().enumerate() {
        let rec = match result {
            Ok(rec) => rec,
            Err(e) => {
                debug!("[Row {}] CSV Parse Error: {}", idx + 1, e);
                skipped += 1;
                continue;
            }
        };
        if rec.len() < 2 {
            skipped += 1;
            continue;
        }
        let count: u64 = match rec[1].trim().parse() {
            Ok(v) => v,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        let sample = rec.iter().skip(2).collect::<Vec<_>>().join(",");

        rows.push(Row {
            key: rec[0].to_string(),
            count,
            sample,
        });
    }

    if skipped > 0 {
        debug!("Skipped {} malformed report rows", skipped);
    }

    Ok(LoadedReport { key_column, rows })
}

pub fn load_report<P: AsRef<Path>>(path: P) -> TgResult<LoadedReport> {
    let file = File::open(path)?;
    read_rows(file)
}
