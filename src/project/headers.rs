use csv::StringRecord;
use std::collections::{HashMap, HashSet};

/// A requested header that exists in the source, with its source column index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub index: usize,
}

/// Requested headers split into the ones the source has and the ones it lacks.
#[derive(Debug, Default)]
pub struct Resolution {
    /// In allow-list order.
    pub columns: Vec<Column>,
    /// In allow-list order.
    pub missing: Vec<String>,
}

impl Resolution {
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Drop repeated names, keeping the first occurrence's position.
pub fn dedupe<S: AsRef<str>>(requested: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    requested
        .iter()
        .map(|h| h.as_ref())
        .filter(|h| seen.insert(*h))
        .map(str::to_string)
        .collect()
}

/// Match `requested` (already de-duplicated) against the source header row.
///
/// A header name that occurs twice in the source resolves to its last
/// occurrence.
pub fn resolve(requested: &[String], available: &StringRecord) -> Resolution {
    let mut by_name: HashMap<&str, usize> = HashMap::with_capacity(available.len());
    for (index, name) in available.iter().enumerate() {
        by_name.insert(name, index);
    }

    let mut resolution = Resolution::default();
    for name in requested {
        match by_name.get(name.as_str()) {
            Some(&index) => resolution.columns.push(Column {
                name: name.clone(),
                index,
            }),
            None => resolution.missing.push(name.clone()),
        }
    }
    resolution
}
