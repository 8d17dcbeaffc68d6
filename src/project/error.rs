use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Fatal outcomes of a projection. The source file is unchanged after any of them.
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("cannot read source CSV {}: {source}", .path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("source CSV is not valid UTF-8 (line {line}): {source}")]
    Decode {
        line: usize,
        #[source]
        source: std::str::Utf8Error,
    },
    #[error("source CSV has no header row")]
    MissingHeaderRow,
    #[error("no headers requested")]
    NoHeadersRequested,
    #[error("none of the requested headers {requested:?} exist in the source CSV")]
    EmptyProjection { requested: Vec<String> },
    #[error("record on line {line} has no value for column `{header}`")]
    MissingField { line: u64, header: String },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("replacing source CSV: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Non-fatal: some requested headers do not exist in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialHeaderMatch {
    pub missing: Vec<String>,
}

impl fmt::Display for PartialHeaderMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "missing headers in source CSV: {{{}}}",
            self.missing.join(", ")
        )
    }
}
