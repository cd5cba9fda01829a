//! CLI entry point for the F1 results scraper.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches};
use f1_results_core::{FetchConfig, ScrapeConfig, Scraper};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod app_config;
mod cli;
mod exit_handler;
mod output;

use app_config::CliValueSources;
use cli::Args;
use exit_handler::ProcessExit;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(exit) => ExitCode::from(u8::try_from(exit.code()).unwrap_or(1)),
        Err(e) => {
            error!(error = %format!("{e:#}"), "run failed");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

async fn run() -> Result<ProcessExit> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let matches = Args::command().get_matches();
    let mut args = Args::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());
    let cli_sources = CliValueSources::from_matches(&matches);

    // The log file lives in the resolved output dir, so tracing starts after the merge.
    let loaded = app_config::load_default_file_config()?;
    let url_template =
        app_config::apply_config_defaults(&mut args, &cli_sources, loaded.config.as_ref());
    let config = scrape_config(&args, url_template);

    let log_file = init_tracing(&args, &config.output_paths().log_file());
    if let Some(path) = loaded.path.as_deref()
        && loaded.config.is_some()
    {
        debug!(path = %path.display(), "loaded config file");
    }
    debug!(?args, "CLI arguments resolved");
    info!(year = config.year, url = %config.source_url(), "F1 results scraper starting");

    let scraper = Scraper::new(config).context("Invalid fetch settings")?;
    let report = scraper
        .run()
        .await
        .with_context(|| format!("Scrape of {} failed", args.year))?;

    if !args.quiet {
        print!("{}", output::render_report(&report, log_file.as_deref()));
        if args.summary {
            println!();
            print!("{}", output::render_summary(&report.summary));
        }
    }

    Ok(exit_handler::determine_exit_outcome(&report))
}

/// Logs to stderr and, when it can be opened, appends to `log_path` as well.
///
/// Returns the log file path if file logging is active.
fn init_tracing(args: &Args, log_path: &Path) -> Option<PathBuf> {
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let log_file = open_log_file(log_path);
    let file_layer = log_file
        .as_ref()
        .ok()
        .map(|file| fmt::layer().with_ansi(false).with_writer(Arc::clone(file)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .init();

    match log_file {
        Ok(_) => Some(log_path.to_path_buf()),
        Err(e) => {
            warn!(
                path = %log_path.display(),
                error = %e,
                "cannot open log file; logging to stderr only"
            );
            None
        }
    }
}

fn open_log_file(path: &Path) -> io::Result<Arc<File>> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(Arc::new(file))
}

fn scrape_config(args: &Args, url_template: Option<String>) -> ScrapeConfig {
    let defaults = ScrapeConfig::for_year(args.year);
    ScrapeConfig {
        url: args.url.clone(),
        url_template: url_template.unwrap_or(defaults.url_template),
        output_dir: args.output_dir.clone(),
        prefix: args.prefix.clone(),
        fetch: FetchConfig {
            timeout: Duration::from_secs(args.timeout),
            max_retries: args.max_retries,
            rate_limit: Duration::from_secs_f64(args.rate_limit),
            backoff_multiplier: args.backoff,
            ..FetchConfig::default()
        },
        debug: args.debug,
        year: args.year,
    }
}
