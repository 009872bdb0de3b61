use crate::aggregate::FrequencyMap;
use std::cmp::Ordering;
use std::collections::HashMap;

pub const DEFAULT_SAMPLE_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedRecord {
    pub key: String,
    pub count: u64,
    /// Distinct most frequent sources, at most `sample_limit` long, never padded.
    pub sample: Vec<String>,
}

/// Count descending, then key ascending.
fn by_count_then_key(a: (&str, u64), b: (&str, u64)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

/// Up to `limit` distinct sources, most frequent first.
pub fn top_sources(sources: &HashMap<String, u64>, limit: usize) -> Vec<String> {
    let mut entries: Vec<(&String, &u64)> = sources.iter().collect();
    entries.sort_by(|a, b| by_count_then_key((a.0.as_str(), *a.1), (b.0.as_str(), *b.1)));

    let mut sample: Vec<String> = Vec::with_capacity(limit.min(entries.len()));
    for (source, _) in entries {
        if sample.len() >= limit {
            break;
        }
        if !sample.iter().any(|s| s == source) {
            sample.push(source.clone());
        }
    }
    sample
}

/// Orders records deterministically and attaches a representative sample.
pub fn rank(records: &FrequencyMap, sample_limit: usize) -> Vec<RankedRecord> {
    let mut keys: Vec<(&String, u64)> = records.iter().map(|(k, r)| (k, r.count)).collect();
    keys.sort_by(|a, b| by_count_then_key((a.0.as_str(), a.1), (b.0.as_str(), b.1)));

    keys.into_iter()
        .map(|(key, count)| RankedRecord {
            key: key.clone(),
            count,
            sample: top_sources(&records[key].sources, sample_limit),
        })
        .collect()
}
