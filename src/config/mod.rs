// src/config/mod.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::audit::DEFAULT_PREVIEW_CHARS;

/// Columns kept by `restrict` when nothing else is configured.
pub const DEFAULT_HEADERS: [&str; 10] = ["Key", "en", "hi", "bn", "gu", "ml", "mr", "ta", "te", "ur"];
pub const DEFAULT_NEEDLE: &str = "cashew";

/// Settings read from an optional YAML file.
///
/// ```yaml
/// file: assets/translations/translations.csv
/// headers: [Key, en, hi]
/// audit:
///   needle: cashew
///   preview_chars: 200
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Translations CSV. Relative paths are resolved against the config file's directory.
    pub file: Option<PathBuf>,
    pub headers: Vec<String>,
    pub audit: AuditSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditSettings {
    pub needle: String,
    pub preview_chars: usize,
}

/// Command-line / environment values; `Some` wins over the file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub file: Option<PathBuf>,
    pub headers: Option<Vec<String>>,
    pub needle: Option<String>,
    pub preview_chars: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file: None,
            headers: DEFAULT_HEADERS.iter().map(|h| h.to_string()).collect(),
            audit: AuditSettings::default(),
        }
    }
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            needle: DEFAULT_NEEDLE.to_string(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

impl Settings {
    /// Load from `path`, or defaults when no config file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut settings = Self::from_yaml(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;

        if let (Some(file), Some(base)) = (settings.file.as_mut(), path.parent()) {
            if file.is_relative() {
                *file = base.join(&*file);
            }
        }
        Ok(settings)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        // an empty document deserializes as unit, not a map
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn with_overrides(mut self, o: Overrides) -> Self {
        if let Some(file) = o.file {
            self.file = Some(file);
        }
        if let Some(headers) = o.headers {
            self.headers = headers;
        }
        if let Some(needle) = o.needle {
            self.audit.needle = needle;
        }
        if let Some(n) = o.preview_chars {
            self.audit.preview_chars = n;
        }
        self
    }

    /// The translations CSV to operate on; there is no built-in default.
    pub fn source_path(&self) -> Result<&Path> {
        self.file.as_deref().context(
            "no translations CSV configured: pass --file, set TRANSLATIONS_CSV or add `file:` to the config",
        )
    }
}
