//! Writing results to disk.
//!
//! Each export opens its destination, writes everything, flushes and closes
//! it before returning. Existing files are overwritten, so identical input
//! (including the metadata timestamp) produces byte-identical files.
//!
//! # Example
//!
//! ```no_run
//! use f1_results_core::export::{OutputPaths, export_csv};
//!
//! # fn example(results: &[f1_results_core::RaceResult]) -> Result<(), Box<dyn std::error::Error>> {
//! let paths = OutputPaths::new("output", "f1", 2024);
//! paths.ensure_dir()?;
//! export_csv(results, &paths.csv())?;
//! # Ok(())
//! # }
//! ```

mod csv;
mod error;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

pub use csv::{SEPARATOR, write_row};
pub use error::ExportError;

use crate::record::{CSV_COLUMNS, RaceResult, RunMetadata};

/// File locations for one season's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    dir: PathBuf,
    prefix: String,
    year: i32,
}

impl OutputPaths {
    /// Paths for `<dir>/<prefix>_<year>_results.{csv,json}`.
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>, year: i32) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            year,
        }
    }

    /// The output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<prefix>_<year>_results.csv`
    #[must_use]
    pub fn csv(&self) -> PathBuf {
        self.dir.join(format!("{}_{}_results.csv", self.prefix, self.year))
    }

    /// `<prefix>_<year>_results.json`
    #[must_use]
    pub fn json(&self) -> PathBuf {
        self.dir.join(format!("{}_{}_results.json", self.prefix, self.year))
    }

    /// `debug_page_<year>.html`
    #[must_use]
    pub fn debug_markup(&self) -> PathBuf {
        self.dir.join(format!("debug_page_{}.html", self.year))
    }

    /// `f1_scraper_<year>.log`
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.dir.join(format!("f1_scraper_{}.log", self.year))
    }

    /// Creates the output directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] if the directory cannot be created.
    pub fn ensure_dir(&self) -> Result<(), ExportError> {
        fs::create_dir_all(&self.dir).map_err(|e| ExportError::io(&self.dir, e))
    }
}

/// The JSON file layout: a metadata envelope around the results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsDocument {
    pub metadata: RunMetadata,
    pub results: Vec<RaceResult>,
}

#[derive(Serialize)]
struct ResultsDocumentRef<'a> {
    metadata: &'a RunMetadata,
    results: &'a [RaceResult],
}

/// Writes `results` as CSV with a header row.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be created or written.
#[instrument(skip(results), fields(path = %path.display(), rows = results.len()))]
pub fn export_csv(results: &[RaceResult], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    write_row(&mut writer, &CSV_COLUMNS).map_err(|e| ExportError::io(path, e))?;
    for result in results {
        write_row(&mut writer, &result.csv_fields()).map_err(|e| ExportError::io(path, e))?;
    }
    writer.flush().map_err(|e| ExportError::io(path, e))?;

    info!("results saved to CSV");
    Ok(())
}

/// Writes `results` with `metadata` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be created or written, or
/// [`ExportError::Json`] if serialization fails.
#[instrument(skip(results, metadata), fields(path = %path.display(), rows = results.len()))]
pub fn export_json(
    results: &[RaceResult],
    metadata: &RunMetadata,
    path: &Path,
) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    let document = ResultsDocumentRef { metadata, results };
    serde_json::to_writer_pretty(&mut writer, &document).map_err(|e| ExportError::json(path, e))?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|e| ExportError::io(path, e))?;

    info!("results saved to JSON");
    Ok(())
}

/// Writes fetched markup verbatim for offline inspection.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be written.
pub fn export_debug_markup(markup: &str, path: &Path) -> Result<(), ExportError> {
    fs::write(path, markup).map_err(|e| ExportError::io(path, e))?;
    debug!(path = %path.display(), bytes = markup.len(), "debug markup saved");
    Ok(())
}

/// Reads back a file written by [`export_json`].
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be read, or
/// [`ExportError::Json`] if it is not a results document.
pub fn read_json(path: &Path) -> Result<ResultsDocument, ExportError> {
    let raw = fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
    serde_json::from_str(&raw).map_err(|e| ExportError::json(path, e))
}
