//! Raw text to cleaned token sequence.
//!
//! Cleaning is a fixed pipeline of substitutions applied in order, so a later
//! step never reintroduces noise removed by an earlier one. Token order is
//! preserved because transition analysis depends on adjacency.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;
use tracing::debug;

struct Patterns {
    escapes: Regex,
    http: Regex,
    www: Regex,
    path: Regex,
    entity: Regex,
    non_letter: Regex,
    non_letter_keep_apostrophe: Regex,
    whitespace: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        escapes: Regex::new(r"\\[nrt]").expect("valid regex"),
        http: Regex::new(r"https?://\S+").expect("valid regex"),
        www: Regex::new(r"www\.\S+").expect("valid regex"),
        path: Regex::new(r"/\S+").expect("valid regex"),
        entity: Regex::new(r"&[a-z]+;").expect("valid regex"),
        non_letter: Regex::new(r"[^a-z\s]").expect("valid regex"),
        non_letter_keep_apostrophe: Regex::new(r"[^a-z'\s]").expect("valid regex"),
        whitespace: Regex::new(r"\s+").expect("valid regex"),
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    pub keep_apostrophes: bool,
}

impl Normalizer {
    pub fn new(keep_apostrophes: bool) -> Self {
        Self { keep_apostrophes }
    }

    pub fn clean_text(&self, raw: &str) -> String {
        clean_text(raw, self.keep_apostrophes)
    }

    pub fn extract_tokens(&self, clean: &str) -> Vec<String> {
        extract_tokens(clean, self.keep_apostrophes)
    }

    pub fn tokenize(&self, raw: &str) -> Vec<String> {
        let tokens = self.extract_tokens(&self.clean_text(raw));
        debug!(
            "Normalized {} bytes into {} tokens",
            raw.len(),
            tokens.len()
        );
        tokens
    }
}

/// Lowercases and strips escape artifacts, URLs, paths, entities and every
/// character outside `a-z` and whitespace, then collapses whitespace.
pub fn clean_text(raw: &str, keep_apostrophes: bool) -> String {
    let p = patterns();
    let text = raw.to_lowercase();

    let text = p.escapes.replace_all(&text, " ");
    let text = p.http.replace_all(&text, " ");
    let text = p.www.replace_all(&text, " ");
    let text = p.path.replace_all(&text, " ");
    let text = p.entity.replace_all(&text, " ");
    let text = if keep_apostrophes {
        p.non_letter_keep_apostrophe.replace_all(&text, " ")
    } else {
        p.non_letter.replace_all(&text, " ")
    };
    let text = p.whitespace.replace_all(&text, " ");

    text.trim().to_string()
}

/// Splits cleaned text into tokens. One-letter tokens survive only as "a" or "i";
/// the length check looks at the letters-only form.
pub fn extract_tokens(clean: &str, keep_apostrophes: bool) -> Vec<String> {
    let mut tokens = Vec::new();

    for piece in clean.split_whitespace() {
        let token: String = piece
            .chars()
            .filter(|c| c.is_ascii_lowercase() || (keep_apostrophes && *c == '\''))
            .collect();

        let keep = {
            let letters = strip_apostrophes(&token);
            letters.len() > 1 || letters == "a" || letters == "i"
        };
        if keep {
            tokens.push(token);
        }
    }

    tokens
}

/// Convenience entry point with the default (apostrophe-dropping) rules.
pub fn normalize(raw: &str) -> Vec<String> {
    Normalizer::default().tokenize(raw)
}

pub fn strip_apostrophes(token: &str) -> Cow<'_, str> {
    if token.contains('\'') {
        Cow::Owned(token.replace('\'', ""))
    } else {
        Cow::Borrowed(token)
    }
}
