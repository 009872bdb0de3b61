use crate::error::{TextgramError, TgResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Comma-separated n-gram lengths analyzed by `ngrams` and `transitions`.
    #[arg(long, default_value = "2,3,4")]
    pub ngram_sizes: String,

    /// Maximum number of distinct source tokens listed per record.
    #[arg(long, default_value_t = 3)]
    pub sample_limit: usize,

    /// Keep apostrophes inside source tokens (keys are always letters only).
    #[arg(long, default_value_t = false)]
    pub keep_apostrophes: bool,

    /// Truncate each report after this many rows (0 = unlimited).
    #[arg(long, default_value_t = 0)]
    pub row_limit: usize,

    #[arg(short, long, default_value = "data")]
    pub output_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ngram_sizes: "2,3,4".to_string(),
            sample_limit: 3,
            keep_apostrophes: false,
            row_limit: 0,
            output_dir: "data".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> TgResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TextgramError::Config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overwrites fields with values the user typed on the command line,
    /// leaving file-provided values in place for everything else.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(ngram_sizes);
        update_if_present!(sample_limit);
        update_if_present!(keep_apostrophes);
        update_if_present!(row_limit);
        update_if_present!(output_dir);
    }

    /// Parsed, sorted and deduplicated n-gram lengths. Zero is rejected.
    pub fn get_ngram_sizes(&self) -> TgResult<Vec<usize>> {
        let mut sizes = Vec::new();
        for part in self.ngram_sizes.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let n: usize = part.parse().map_err(|_| {
                TextgramError::Config(format!("Invalid number '{}' in ngram_sizes", part))
            })?;
            if n == 0 {
                return Err(TextgramError::InvalidParameter(
                    "n-gram length must be at least 1".to_string(),
                ));
            }
            sizes.push(n);
        }

        if sizes.is_empty() {
            return Err(TextgramError::Config(
                "ngram_sizes requires at least one value".to_string(),
            ));
        }

        sizes.sort_unstable();
        sizes.dedup();
        Ok(sizes)
    }
}
