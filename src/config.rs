//! Run configuration for [`Scraper`](crate::Scraper).

use std::path::PathBuf;

use crate::export::OutputPaths;
use crate::fetch::FetchConfig;

/// Results page URL with a `{year}` placeholder.
pub const DEFAULT_URL_TEMPLATE: &str = "https://www.formula1.com/en/results/{year}/races";

/// Season scraped when none is given.
pub const DEFAULT_YEAR: i32 = 2025;

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Default output file prefix.
pub const DEFAULT_PREFIX: &str = "f1";

/// Everything one scrape run needs.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Season to scrape.
    pub year: i32,
    /// Explicit source URL. Takes precedence over `url_template`.
    pub url: Option<String>,
    /// Source URL template; `{year}` is replaced with the season.
    pub url_template: String,
    /// Directory receiving the output files.
    pub output_dir: PathBuf,
    /// Output file name prefix.
    pub prefix: String,
    /// HTTP settings.
    pub fetch: FetchConfig,
    /// Always write the fetched markup next to the results.
    pub debug: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            year: DEFAULT_YEAR,
            url: None,
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            prefix: DEFAULT_PREFIX.to_string(),
            fetch: FetchConfig::default(),
            debug: false,
        }
    }
}

impl ScrapeConfig {
    /// Config for `year` with every other setting at its default.
    #[must_use]
    pub fn for_year(year: i32) -> Self {
        Self {
            year,
            ..Self::default()
        }
    }

    /// The URL this run fetches.
    #[must_use]
    pub fn source_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => self.url_template.replace("{year}", &self.year.to_string()),
        }
    }

    /// Output file locations for this run.
    #[must_use]
    pub fn output_paths(&self) -> OutputPaths {
        OutputPaths::new(&self.output_dir, &self.prefix, self.year)
    }
}
