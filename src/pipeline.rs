//! One scrape run: fetch, extract, validate, export, summarize.
//!
//! Stages run strictly in order. Only a fetch failure aborts the run;
//! everything after that, including an unusable output directory, is
//! recorded in the returned [`RunReport`] instead.

use std::fmt;
use std::path::PathBuf;

use chrono::Utc;
use tracing::{error, info, instrument, warn};

use crate::config::ScrapeConfig;
use crate::export::{ExportError, OutputPaths, export_csv, export_debug_markup, export_json};
use crate::extract::{Extractor, RowSkip};
use crate::fetch::{FetchError, Fetcher};
use crate::record::{RaceResult, RunMetadata, format_timestamp};
use crate::summary::{Summary, summarize};
use crate::validate::{Rejection, validate};

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "CSV"),
            Self::Json => write!(f, "JSON"),
        }
    }
}

/// What happened to one export.
#[derive(Debug)]
pub struct ExportOutcome {
    pub format: ExportFormat,
    pub path: PathBuf,
    pub result: Result<(), ExportError>,
}

impl ExportOutcome {
    /// True when the file was written.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Everything a run produced.
#[derive(Debug)]
pub struct RunReport {
    /// URL the page was fetched from.
    pub source_url: String,
    /// Season scraped.
    pub year: i32,
    /// Fetch attempts used, including the successful one.
    pub attempts: u32,
    /// Whether a results table was found in the page.
    pub table_found: bool,
    /// Records produced by extraction, before validation.
    pub extracted: usize,
    /// Cleaned records that passed validation.
    pub accepted: Vec<RaceResult>,
    /// Table rows that could not be mapped.
    pub skipped: Vec<RowSkip>,
    /// Records that failed validation.
    pub rejections: Vec<Rejection>,
    /// Aggregates over `accepted`.
    pub summary: Summary,
    /// One entry per export format, in the order written.
    pub exports: Vec<ExportOutcome>,
    /// Where the raw markup was saved, if it was.
    pub debug_markup: Option<PathBuf>,
}

impl RunReport {
    /// Number of exports that were written.
    #[must_use]
    pub fn exports_written(&self) -> usize {
        self.exports.iter().filter(|e| e.is_ok()).count()
    }

    /// Number of exports that failed.
    #[must_use]
    pub fn exports_failed(&self) -> usize {
        self.exports.len() - self.exports_written()
    }

    /// True when no race survived to the output.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}

/// Runs the scrape pipeline for one season.
#[derive(Debug)]
pub struct Scraper {
    config: ScrapeConfig,
    fetcher: Fetcher,
}

impl Scraper {
    /// Builds the HTTP client for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the client cannot be constructed.
    pub fn new(config: ScrapeConfig) -> Result<Self, FetchError> {
        let fetcher = Fetcher::new(&config.fetch)?;
        Ok(Self { config, fetcher })
    }

    /// The configuration this scraper was built with.
    #[must_use]
    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Executes one run.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] if the page cannot be fetched. Output
    /// failures are not errors here; they are recorded in
    /// [`RunReport::exports`].
    #[instrument(skip(self), fields(year = self.config.year))]
    pub async fn run(&self) -> Result<RunReport, FetchError> {
        let source_url = self.config.source_url();
        let paths = self.config.output_paths();
        let scraped_at = format_timestamp(Utc::now());

        info!(url = %source_url, "fetching results page");
        let page = self.fetcher.fetch(&source_url).await?;
        info!(
            bytes = page.markup.len(),
            attempts = page.attempts,
            "results page fetched"
        );

        // Exports into a missing directory fail on their own and are recorded.
        if let Err(e) = paths.ensure_dir() {
            error!(error = %e, "cannot prepare output directory");
        }

        let mut debug_markup = None;
        if self.config.debug {
            debug_markup = save_debug_markup(&page.markup, &paths);
        }

        let extraction = Extractor::new(scraped_at.as_str()).extract(&page.markup);
        if !extraction.table_found && debug_markup.is_none() {
            debug_markup = save_debug_markup(&page.markup, &paths);
        }
        if extraction.is_empty() {
            warn!(
                url = %source_url,
                table_found = extraction.table_found,
                "no race results found; the page layout may have changed"
            );
        }

        let validation = validate(&extraction.results);
        for rejection in &validation.rejections {
            warn!(
                grand_prix = %rejection.record.grand_prix,
                date = %rejection.record.date,
                reason = %rejection.reason,
                "rejected record"
            );
        }
        info!(
            accepted = validation.accepted.len(),
            rejected = validation.rejections.len(),
            skipped = extraction.skipped.len(),
            "validation complete"
        );

        let metadata = RunMetadata::new(
            source_url.as_str(),
            self.config.year,
            validation.accepted.len(),
            scraped_at,
        );
        let exports = write_exports(&validation.accepted, &metadata, &paths);

        let summary = summarize(&validation.accepted);
        info!(
            total_races = summary.total_races,
            unique_winners = summary.unique_winners,
            "summary computed"
        );

        Ok(RunReport {
            source_url,
            year: self.config.year,
            attempts: page.attempts,
            table_found: extraction.table_found,
            extracted: extraction.results.len(),
            accepted: validation.accepted,
            skipped: extraction.skipped,
            rejections: validation.rejections,
            summary,
            exports,
            debug_markup,
        })
    }
}

fn write_exports(
    results: &[RaceResult],
    metadata: &RunMetadata,
    paths: &OutputPaths,
) -> Vec<ExportOutcome> {
    let csv_path = paths.csv();
    let csv = ExportOutcome {
        format: ExportFormat::Csv,
        result: export_csv(results, &csv_path),
        path: csv_path,
    };

    let json_path = paths.json();
    let json = ExportOutcome {
        format: ExportFormat::Json,
        result: export_json(results, metadata, &json_path),
        path: json_path,
    };

    let outcomes = vec![csv, json];
    for outcome in &outcomes {
        if let Err(e) = &outcome.result {
            error!(format = %outcome.format, error = %e, "export failed");
        }
    }
    outcomes
}

fn save_debug_markup(markup: &str, paths: &OutputPaths) -> Option<PathBuf> {
    let path = paths.debug_markup();
    match export_debug_markup(markup, &path) {
        Ok(()) => {
            info!(path = %path.display(), "saved page markup for inspection");
            Some(path)
        }
        Err(e) => {
            warn!(error = %e, "could not save page markup");
            None
        }
    }
}
