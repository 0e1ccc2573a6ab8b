//! Persistence of assembled records.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::csv::write_records;
use crate::normalize::slugify;
use crate::record::MenuRecord;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("save requested but no sink is configured")]
    Unconfigured,

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl SinkError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Destination for a non-empty record set. Returns the path it wrote.
pub trait MenuSink: Send + Sync {
    /// # Errors
    ///
    /// Returns [`SinkError`] if serialization or the write fails.
    fn save(&self, records: &[MenuRecord]) -> Result<PathBuf, SinkError>;
}

/// File stem derived from the restaurant name alone, so repeated saves of the
/// same restaurant land on the same path.
#[must_use]
pub fn file_stem(restaurant: &str) -> String {
    let slug = slugify(restaurant);
    if slug.is_empty() { "restaurant".to_owned() } else { slug }
}

fn artifact_path(dir: &Path, records: &[MenuRecord], ext: &str) -> PathBuf {
    let restaurant = records.first().map_or("", |r| r.restaurant.as_str());
    dir.join(format!("{}.{ext}", file_stem(restaurant)))
}

// Readers of `path` see either the previous file or the complete new one.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), SinkError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| SinkError::io(dir, e))?;

    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("menu");
    let tmp = dir.join(format!(".{file_name}.{}.tmp", std::process::id()));

    let result = std::fs::File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|()| std::fs::rename(&tmp, path));

    result.map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        SinkError::io(path, e)
    })
}

/// Writes `<dir>/<restaurant-slug>.csv`.
#[derive(Debug, Clone)]
pub struct CsvFileSink {
    dir: PathBuf,
}

impl CsvFileSink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl MenuSink for CsvFileSink {
    fn save(&self, records: &[MenuRecord]) -> Result<PathBuf, SinkError> {
        let path = artifact_path(&self.dir, records, "csv");
        let mut buf = Vec::new();
        write_records(&mut buf, records).map_err(|e| SinkError::io(&path, e))?;
        write_atomically(&path, &buf)?;
        Ok(path)
    }
}

/// Writes `<dir>/<restaurant-slug>.json` as a pretty-printed array.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl MenuSink for JsonFileSink {
    fn save(&self, records: &[MenuRecord]) -> Result<PathBuf, SinkError> {
        let path = artifact_path(&self.dir, records, "json");
        let mut buf = serde_json::to_vec_pretty(records)?;
        buf.push(b'\n');
        write_atomically(&path, &buf)?;
        Ok(path)
    }
}
