use csv::Terminator;
use std::{fs, path::Path};
use tracing::debug;

use super::error::ProjectError;

const BOM: char = '\u{feff}';

/// The decoded source CSV plus the record terminator its header line uses.
#[derive(Debug)]
pub struct SourceText {
    text: String,
    pub terminator: Terminator,
}

impl SourceText {
    /// CSV content without a leading byte-order mark.
    pub fn body(&self) -> &str {
        self.text.strip_prefix(BOM).unwrap_or(&self.text)
    }
}

/// Read and strictly decode `path`. Invalid UTF-8 is an error, never replaced.
pub fn read_source(path: &Path) -> Result<SourceText, ProjectError> {
    let bytes = fs::read(path).map_err(|e| ProjectError::SourceNotFound {
        path: path.to_path_buf(),
        source: e,
    })?;

    let text = String::from_utf8(bytes).map_err(|e| {
        let err = e.utf8_error();
        let line = e.as_bytes()[..err.valid_up_to()]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
            + 1;
        ProjectError::Decode { line, source: err }
    })?;

    let terminator = detect_terminator(&text);
    debug!(bytes = text.len(), ?terminator, "read source CSV");
    Ok(SourceText { text, terminator })
}

/// `\r\n` if the first line ends with it, `\n` otherwise.
fn detect_terminator(text: &str) -> Terminator {
    match text.find('\n') {
        Some(pos) if text[..pos].ends_with('\r') => Terminator::CRLF,
        _ => Terminator::Any(b'\n'),
    }
}
