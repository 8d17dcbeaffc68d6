// src/audit/mod.rs

use anyhow::{bail, Context, Result};
use std::{borrow::Cow, fs, path::Path};
use tracing::{info, warn};

pub const DEFAULT_PREVIEW_CHARS: usize = 200;

/// One line containing the needle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditMatch {
    /// 1-based line number.
    pub line: usize,
    /// Trimmed line, cut to the preview length in characters.
    pub preview: String,
}

/// Case-insensitive substring scan of `path`, line by line.
///
/// Read-only, so invalid UTF-8 is replaced rather than rejected.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn scan<P: AsRef<Path>>(path: P, needle: &str, preview_chars: usize) -> Result<Vec<AuditMatch>> {
    if needle.is_empty() {
        bail!("audit needle must not be empty");
    }
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    let text = String::from_utf8_lossy(&bytes);
    if let Cow::Owned(_) = text {
        warn!("invalid UTF-8 replaced while scanning");
    }

    let needle = needle.to_lowercase();
    let matches: Vec<AuditMatch> = text
        .lines()
        .enumerate()
        .filter(|(_, line)| line.to_lowercase().contains(&needle))
        .map(|(i, line)| AuditMatch {
            line: i + 1,
            preview: preview(line, preview_chars),
        })
        .collect();

    info!(matches = matches.len(), "scan complete");
    Ok(matches)
}

fn preview(line: &str, max_chars: usize) -> String {
    line.trim().chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;
    use std::io::Write;

    fn file_with(bytes: &[u8]) -> Result<NamedTempFile> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(bytes)?;
        tmp.flush()?;
        Ok(tmp)
    }

    #[test]
    fn finds_lines_case_insensitively() -> Result<()> {
        let tmp = file_with(
            b"Key,en,hi\nappName,Cashew,Cashew\nbudget,Budget,x\nabout,About CASHEW,y\n",
        )?;

        let found = scan(tmp.path(), "cashew", DEFAULT_PREVIEW_CHARS)?;

        assert_eq!(
            found,
            vec![
                AuditMatch { line: 2, preview: "appName,Cashew,Cashew".into() },
                AuditMatch { line: 4, preview: "about,About CASHEW,y".into() },
            ]
        );
        Ok(())
    }

    #[test]
    fn preview_is_trimmed_and_cut_on_chars() -> Result<()> {
        let tmp = file_with("  cashew नमस्ते दुनिया  \r\n".as_bytes())?;

        let found = scan(tmp.path(), "CASHEW", 10)?;

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].preview, "cashew नमस");
        assert_eq!(found[0].preview.chars().count(), 10);
        Ok(())
    }

    #[test]
    fn invalid_utf8_does_not_abort() -> Result<()> {
        let mut bytes = b"ok line\n".to_vec();
        bytes.extend_from_slice(&[0xff, b'c', b'a', b's', b'h', b'e', b'w', b'\n']);
        let tmp = file_with(&bytes)?;

        let found = scan(tmp.path(), "cashew", DEFAULT_PREVIEW_CHARS)?;

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 2);
        assert_eq!(found[0].preview, "\u{fffd}cashew");
        Ok(())
    }

    #[test]
    fn no_matches_is_empty() -> Result<()> {
        let tmp = file_with(b"Key,en\nk1,Hello\n")?;
        assert!(scan(tmp.path(), "cashew", DEFAULT_PREVIEW_CHARS)?.is_empty());
        Ok(())
    }

    #[test]
    fn empty_needle_and_missing_file_are_errors() {
        let tmp = file_with(b"x\n").unwrap();
        assert!(scan(tmp.path(), "", DEFAULT_PREVIEW_CHARS).is_err());
        assert!(scan("/definitely/not/here.csv", "x", DEFAULT_PREVIEW_CHARS).is_err());
    }
}
