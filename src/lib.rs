//! F1 Results Core Library
//!
//! Fetches a season's race results page, extracts one record per race,
//! validates and cleans the records, and writes them out as CSV and JSON
//! together with summary statistics.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`fetch`] - HTTP fetching with retry, backoff and rate limiting
//! - [`extract`] - HTML table extraction into [`RaceResult`]s
//! - [`validate`] - Field cleaning and validation
//! - [`export`] - CSV, JSON and debug markup output
//! - [`summary`] - Win counts per driver and per car
//! - [`pipeline`] - The [`Scraper`] that runs all stages for one season

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod record;
pub mod summary;
pub mod user_agent;
pub mod validate;

// Re-export commonly used types
pub use config::{DEFAULT_URL_TEMPLATE, DEFAULT_YEAR, ScrapeConfig};
pub use export::{ExportError, OutputPaths, export_csv, export_json};
pub use extract::{ColumnLayout, Extraction, Extractor, RowSkip};
pub use fetch::{
    DEFAULT_MAX_RETRIES, FailureType, FetchConfig, FetchError, Fetcher, RateLimiter,
    RetryDecision, RetryPolicy, classify_error,
};
pub use pipeline::{ExportFormat, ExportOutcome, RunReport, Scraper};
pub use record::{RaceResult, RunMetadata};
pub use summary::{Summary, WinCount, summarize};
pub use validate::{Rejection, Validation, validate};
