use csv::{Terminator, WriterBuilder};
use std::{
    fs::{self, File},
    io::BufWriter,
    path::Path,
};
use tracing::debug;

use super::error::ProjectError;

pub type CsvSink<'a> = csv::Writer<BufWriter<&'a mut File>>;

/// Write CSV into a temp file next to `path`, then rename it over `path`.
///
/// - `fill` writes every record; its error aborts the replace
/// - the temp file is removed on any failure (it is a `NamedTempFile`)
/// - `path` keeps its permissions
pub fn replace_atomically<T, F>(path: &Path, terminator: Terminator, fill: F) -> Result<T, ProjectError>
where
    F: FnOnce(&mut CsvSink<'_>) -> Result<T, ProjectError>,
{
    // 1) Temp file in the same directory, so the rename never crosses filesystems
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "projection".to_string());
    let mut tmp = tempfile::Builder::new()
        .prefix(&format!(".{}.", file_name))
        .suffix(".tmp")
        .tempfile_in(dir)?;
    debug!(tmp = %tmp.path().display(), "writing projection");

    // 2) Stream records through the caller
    let out = {
        let mut wtr = WriterBuilder::new()
            .terminator(terminator)
            .from_writer(BufWriter::new(tmp.as_file_mut()));
        let out = fill(&mut wtr)?;
        wtr.flush()?;
        out
    };
    tmp.as_file().sync_all()?;

    // 3) Carry permissions over; temp files are created owner-only
    let perms = fs::metadata(path)?.permissions();
    fs::set_permissions(tmp.path(), perms)?;

    // 4) Single rename over the original
    tmp.persist(path)?;
    Ok(out)
}
