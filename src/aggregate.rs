use crate::error::{TextgramError, TgResult};
use crate::normalize::strip_apostrophes;
use std::collections::HashMap;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

/// Separator between the two halves of a transition key and a source pair.
/// Never a comma, so keys stay safe in the unquoted report format.
pub const TRANSITION_SEPARATOR: char = ' ';

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum Mode {
    Words,
    Ngrams,
    Transitions,
}

impl Mode {
    /// First column name of the report header.
    pub fn header(&self) -> &'static str {
        match self {
            Self::Words | Self::Ngrams => "sequence",
            Self::Transitions => "transition",
        }
    }

    /// Whether the mode is parameterized by an n-gram length.
    pub fn uses_n(&self) -> bool {
        !matches!(self, Self::Words)
    }

    pub fn file_name(&self, n: usize) -> String {
        match self {
            Self::Words => "words.csv".to_string(),
            Self::Ngrams => format!("{}grams.csv", n),
            Self::Transitions => format!("{}grams_transitions.csv", n),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyRecord {
    /// Total occurrences of the key, summed over every contributing occurrence.
    pub count: u64,
    /// Originating word (or "word word" pair) -> occurrences it contributed.
    pub sources: HashMap<String, u64>,
}

impl FrequencyRecord {
    fn add(&mut self, source: &str, amount: u64) {
        self.count += amount;
        *self.sources.entry(source.to_string()).or_default() += amount;
    }
}

pub type FrequencyMap = HashMap<String, FrequencyRecord>;

fn check_n(n: usize) -> TgResult<()> {
    if n == 0 {
        return Err(TextgramError::InvalidParameter(
            "n-gram length must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Plain multiset tally of tokens.
pub fn count_words(tokens: &[String]) -> HashMap<String, u64> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_default() += 1;
    }
    counts
}

/// Word tally as records, each word being its own single source.
pub fn word_records(tokens: &[String]) -> FrequencyMap {
    count_words(tokens)
        .into_iter()
        .map(|(word, freq)| {
            let mut record = FrequencyRecord::default();
            record.add(&word, freq);
            (word, record)
        })
        .collect()
}

/// Character n-grams inside each word, weighted by word frequency.
///
/// A word seen `f` times adds `f` to every n-gram at every offset, so an
/// n-gram occurring twice inside one word accumulates `2 * f`.
pub fn count_ngrams(tokens: &[String], n: usize) -> TgResult<FrequencyMap> {
    check_n(n)?;
    let mut results = FrequencyMap::new();

    for (word, freq) in count_words(tokens) {
        let letters: Vec<char> = strip_apostrophes(&word).chars().collect();
        if letters.len() < n {
            continue;
        }
        for window in letters.windows(n) {
            let gram: String = window.iter().collect();
            results.entry(gram).or_default().add(&word, freq);
        }
    }

    debug!("{}-grams: {} distinct keys", n, results.len());
    Ok(results)
}

/// Tail of one word joined to the head of the next, per adjacent pair.
///
/// Counted per pair occurrence in token order; pairs where either word is
/// shorter than `n` are skipped.
pub fn count_transitions(tokens: &[String], n: usize) -> TgResult<FrequencyMap> {
    check_n(n)?;
    let mut results = FrequencyMap::new();

    for pair in tokens.windows(2) {
        let (first, second) = (&pair[0], &pair[1]);
        let a: Vec<char> = strip_apostrophes(first).chars().collect();
        let b: Vec<char> = strip_apostrophes(second).chars().collect();
        if a.len() < n || b.len() < n {
            continue;
        }

        let mut key: String = a[a.len() - n..].iter().collect();
        key.push(TRANSITION_SEPARATOR);
        key.extend(&b[..n]);

        let source = format!("{}{}{}", first, TRANSITION_SEPARATOR, second);
        results.entry(key).or_default().add(&source, 1);
    }

    debug!("{}-gram transitions: {} distinct keys", n, results.len());
    Ok(results)
}

/// Single entry point over all modes. `n` is ignored in word mode.
pub fn aggregate(tokens: &[String], mode: Mode, n: usize) -> TgResult<FrequencyMap> {
    match mode {
        Mode::Words => Ok(word_records(tokens)),
        Mode::Ngrams => count_ngrams(tokens, n),
        Mode::Transitions => count_transitions(tokens, n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_count_words_tally() {
        let counts = count_words(&toks(&["the", "cat", "the"]));
        assert_eq!(counts["the"], 2);
        assert_eq!(counts["cat"], 1);
    }

    #[test]
    fn test_ngram_repeated_within_word_counts_per_offset() {
        let map = count_ngrams(&toks(&["aaa", "aaa"]), 2).unwrap();
        let rec = &map["aa"];
        assert_eq!(rec.count, 4);
        assert_eq!(rec.sources["aaa"], 4);
    }

    #[test]
    fn test_ngram_skips_short_words() {
        let map = count_ngrams(&toks(&["a", "to", "cat"]), 3).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["cat"].count, 1);
    }

    #[test]
    fn test_ngram_keys_ignore_apostrophes() {
        let map = count_ngrams(&toks(&["don't"]), 4).unwrap();
        assert_eq!(map["dont"].count, 1);
        assert_eq!(map["dont"].sources["don't"], 1);
    }

    #[test]
    fn test_transitions_use_adjacent_pairs_only() {
        let map = count_transitions(&toks(&["run", "ning", "fast"]), 2).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["un ni"].count, 1);
        assert_eq!(map["un ni"].sources["run ning"], 1);
        assert_eq!(map["ng fa"].count, 1);
    }

    #[test]
    fn test_transitions_skip_short_members() {
        let map = count_transitions(&toks(&["a", "cat", "is", "here"]), 3).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_zero_n_fails_fast() {
        assert!(count_ngrams(&toks(&["cat"]), 0).is_err());
        assert!(count_transitions(&toks(&["cat", "dog"]), 0).is_err());
    }

    #[test]
    fn test_oversized_n_is_empty_not_error() {
        let map = aggregate(&toks(&["cat", "dog"]), Mode::Ngrams, 10).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_every_mode_round_trips_its_name() {
        for mode in Mode::iter() {
            assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_mode_names_and_headers() {
        assert_eq!(Mode::Transitions.to_string(), "transitions");
        assert_eq!("ngrams".parse::<Mode>().unwrap(), Mode::Ngrams);
        assert_eq!(Mode::Words.header(), "sequence");
        assert_eq!(Mode::Transitions.header(), "transition");
        assert_eq!(Mode::Transitions.file_name(3), "3grams_transitions.csv");
    }
}
