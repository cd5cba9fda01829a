//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use f1_results_core::DEFAULT_MAX_RETRIES;
use f1_results_core::config::{DEFAULT_OUTPUT_DIR, DEFAULT_PREFIX, DEFAULT_YEAR};
use f1_results_core::fetch::{
    DEFAULT_BACKOFF_MULTIPLIER, DEFAULT_RATE_LIMIT_SECS, DEFAULT_TIMEOUT_SECS,
};

/// Scrape Formula 1 race results for a season.
///
/// Fetches the season's results page, extracts one record per race, and
/// writes the validated results as CSV and JSON.
#[derive(Parser, Debug)]
#[command(name = "f1-results")]
#[command(author, version, about)]
pub struct Args {
    /// Season to scrape
    #[arg(short, long, default_value_t = DEFAULT_YEAR, value_parser = clap::value_parser!(i32).range(1950..=2100))]
    pub year: i32,

    /// Results page URL (overrides the year-based default)
    #[arg(long)]
    pub url: Option<String>,

    /// Directory for output files
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Output file name prefix
    #[arg(long, default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Delay between requests in seconds (0 to disable, max 60)
    #[arg(short = 'l', long, default_value_t = DEFAULT_RATE_LIMIT_SECS, value_parser = parse_rate_limit)]
    pub rate_limit: f64,

    /// Maximum fetch attempts (1-10)
    #[arg(short = 'r', long, default_value_t = DEFAULT_MAX_RETRIES, value_parser = clap::value_parser!(u32).range(1..=10))]
    pub max_retries: u32,

    /// Request timeout in seconds (1-300)
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub timeout: u64,

    /// Growth factor for the delay between retries (1.0-4.0)
    #[arg(long, default_value_t = DEFAULT_BACKOFF_MULTIPLIER, value_parser = parse_backoff)]
    pub backoff: f64,

    /// Save the fetched page markup next to the results
    #[arg(long)]
    pub debug: bool,

    /// Print a win summary after scraping
    #[arg(short, long)]
    pub summary: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_rate_limit(raw: &str) -> Result<f64, String> {
    parse_bounded_f64(raw, 0.0, 60.0)
}

fn parse_backoff(raw: &str) -> Result<f64, String> {
    parse_bounded_f64(raw, 1.0, 4.0)
}

fn parse_bounded_f64(raw: &str, min: f64, max: f64) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if !value.is_finite() || value < min || value > max {
        return Err(format!("{value} is not in {min}..={max}"));
    }
    Ok(value)
}
