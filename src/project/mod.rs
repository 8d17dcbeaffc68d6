//! Column projection: keep an ordered allow-list of columns of a CSV file and
//! replace the file in place.
//!
//! ```text
//!  translations.csv ──read──▶ resolve headers ──stream rows──▶ .translations.csv.XXXX.tmp
//!                                                                      │
//!                                      translations.csv ◀──rename──────┘
//! ```
//!
//! Nothing touches the source until the final rename. Any error before it
//! drops the temp file and leaves the source byte-for-byte as it was.

pub mod error;
pub mod headers;
pub mod source;
pub mod write;

use csv::{ReaderBuilder, StringRecord};
use std::path::Path;
use tracing::{info, warn};

pub use error::{PartialHeaderMatch, ProjectError};

/// Successful projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    /// Header row that was written, in allow-list order.
    pub headers: Vec<String>,
    /// Data rows written (header excluded).
    pub rows: usize,
    /// Requested headers absent from the source, in allow-list order.
    pub missing: Vec<String>,
}

impl Projection {
    pub fn warning(&self) -> Option<PartialHeaderMatch> {
        if self.missing.is_empty() {
            None
        } else {
            Some(PartialHeaderMatch {
                missing: self.missing.clone(),
            })
        }
    }
}

/// Restrict the CSV at `path` to `requested` columns, in that order, and
/// atomically replace it.
///
/// Requested headers that the source lacks are skipped with a warning; if
/// none resolve the call fails with [`ProjectError::EmptyProjection`].
#[tracing::instrument(level = "info", skip(path, requested), fields(path = %path.as_ref().display()))]
pub fn project<P, S>(path: P, requested: &[S]) -> Result<Projection, ProjectError>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    let requested = headers::dedupe(requested);
    if requested.is_empty() {
        return Err(ProjectError::NoHeadersRequested);
    }

    // 1) Decode and read the header row
    let source = source::read_source(path)?;
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_reader(source.body().as_bytes());
    let available = rdr.headers()?.clone();
    if available.is_empty() {
        return Err(ProjectError::MissingHeaderRow);
    }

    // 2) Resolve the allow-list against it
    let resolution = headers::resolve(&requested, &available);
    if resolution.columns.is_empty() {
        return Err(ProjectError::EmptyProjection { requested });
    }
    if !resolution.missing.is_empty() {
        warn!(missing = ?resolution.missing, "headers missing from source CSV; continuing without them");
    }

    // 3) Stream projected rows into the temp file, then swap it in
    let rows = write::replace_atomically(path, source.terminator, |wtr| {
        wtr.write_record(resolution.names())?;

        let mut record = StringRecord::new();
        let mut rows = 0usize;
        while rdr.read_record(&mut record)? {
            let line = record.position().map_or(0, |p| p.line());
            let projected = resolution
                .columns
                .iter()
                .map(|col| {
                    record.get(col.index).ok_or_else(|| ProjectError::MissingField {
                        line,
                        header: col.name.clone(),
                    })
                })
                .collect::<Result<Vec<&str>, _>>()?;
            wtr.write_record(&projected)?;
            rows += 1;
        }
        Ok(rows)
    })?;

    info!(rows, columns = resolution.columns.len(), "projection written");
    Ok(Projection {
        headers: resolution.names().into_iter().map(str::to_string).collect(),
        rows,
        missing: resolution.missing,
    })
}
