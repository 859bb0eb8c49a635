//! JSON file output.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

/// Write `records` to `path` as a pretty-printed JSON array, `indent` spaces
/// per level. Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created, or the
/// records cannot be serialized.
pub(crate) fn export_to_json<T: Serialize>(
    records: &[T],
    path: &Path,
    indent: usize,
) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create output directory {}", dir.display()))?;
            tracing::info!(dir = %dir.display(), "created output directory");
        }
    }

    let file = File::create(path)
        .with_context(|| format!("failed to create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let indent = b" ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    records
        .serialize(&mut serializer)
        .with_context(|| format!("failed to serialize records to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(records = records.len(), path = %path.display(), "wrote output file");
    Ok(())
}
