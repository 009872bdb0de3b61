//! Raw-text providers. The engine only needs a string per run; where it
//! comes from is up to the caller.

use crate::error::{TextgramError, TgResult};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

pub trait TextSource {
    fn describe(&self) -> String;
    fn fetch(&self) -> TgResult<String>;
}

pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl TextSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> TgResult<String> {
        let bytes = fs::read(&self.path).map_err(|e| {
            TextgramError::SourceUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

pub struct StdinSource;

impl TextSource for StdinSource {
    fn describe(&self) -> String {
        "<stdin>".to_string()
    }

    fn fetch(&self) -> TgResult<String> {
        let mut bytes = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .map_err(|e| TextgramError::SourceUnavailable(format!("<stdin>: {}", e)))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Literal text, mostly for tests and embedding.
pub struct InlineSource(pub String);

impl TextSource for InlineSource {
    fn describe(&self) -> String {
        "<inline>".to_string()
    }

    fn fetch(&self) -> TgResult<String> {
        Ok(self.0.clone())
    }
}

/// `None` or `"-"` reads stdin, anything else is a file path.
pub fn resolve_source(input: Option<&str>) -> Box<dyn TextSource> {
    match input {
        None | Some("-") => Box::new(StdinSource),
        Some(path) => Box::new(FileSource::new(path)),
    }
}
