//! Per-template-set zip archives.
//!
//! Every run starts by clearing the previous run's archives from the output
//! directory, then writes one archive per template set that produced at
//! least one mockup:
//!
//! ```text
//! generated-zips/classic.20261019_142501_37_images.zip
//! ```

use chrono::{DateTime, TimeZone};
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write archive {path}: {source}")]
    Zip {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("refusing to write an empty archive for '{0}'")]
    Empty(String),
}

/// One file stored in an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ArchiveError {
    ArchiveError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Create `dir` if needed and delete every `*.zip` directly inside it.
///
/// Returns the number of archives removed. Files that cannot be removed are
/// logged and left in place.
pub fn cleanup_old_archives(dir: &Path) -> Result<usize, ArchiveError> {
    std::fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;

    let mut removed = 0;
    for entry in std::fs::read_dir(dir).map_err(|e| io_error(dir, e))? {
        let path = entry.map_err(|e| io_error(dir, e))?.path();
        let is_zip = path.is_file()
            && path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("zip"))
                .unwrap_or(false);
        if !is_zip {
            continue;
        }

        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Removed old archive");
                removed += 1;
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to remove old archive"
                );
            }
        }
    }

    tracing::info!(dir = %dir.display(), removed, "Cleaned output directory");
    Ok(removed)
}

/// `{set}.{YYYYmmdd_HHMMSS}_{count}_images.zip`
pub fn archive_name<Tz: TimeZone>(
    template_set: &str,
    timestamp: &DateTime<Tz>,
    count: usize,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}.{}_{}_images.zip",
        template_set,
        timestamp.format("%Y%m%d_%H%M%S"),
        count
    )
}

/// Make `name` unique among `taken` by inserting ` (2)`, ` (3)`, ... before
/// the extension.
pub fn unique_entry_name(name: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(name) {
        return name.to_string();
    }

    let (stem, ext) = match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    };

    (2..)
        .map(|n| format!("{} ({}){}", stem, n, ext))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| name.to_string())
}

/// Write `entries` to `dir` as one deflated zip named after the template set.
pub fn write_archive<Tz: TimeZone>(
    dir: &Path,
    template_set: &str,
    entries: &[ArchiveEntry],
    timestamp: &DateTime<Tz>,
) -> Result<PathBuf, ArchiveError>
where
    Tz::Offset: std::fmt::Display,
{
    if entries.is_empty() {
        return Err(ArchiveError::Empty(template_set.to_string()));
    }

    let path = dir.join(archive_name(template_set, timestamp, entries.len()));
    let zip_error = |source: zip::result::ZipError| ArchiveError::Zip {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(&path).map_err(|e| io_error(&path, e))?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut taken = HashSet::with_capacity(entries.len());
    for entry in entries {
        let name = unique_entry_name(&entry.name, &taken);
        writer.start_file(name.as_str(), options).map_err(zip_error)?;
        writer
            .write_all(&entry.bytes)
            .map_err(|e| io_error(&path, e))?;
        taken.insert(name);
    }

    writer.finish().map_err(zip_error)?;

    tracing::info!(
        path = %path.display(),
        template_set = %template_set,
        images = entries.len(),
        "Archive written"
    );
    Ok(path)
}
