//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use clap::parser::ValueSource;
use serde::Deserialize;

use crate::cli::Args;

const APP_DIR: &str = "f1-results";

/// TOML-backed file configuration for scraper defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Default output directory.
    pub output_dir: Option<PathBuf>,
    /// Default output file prefix.
    pub prefix: Option<String>,
    /// Default delay between requests in seconds.
    pub rate_limit: Option<f64>,
    /// Default maximum fetch attempts.
    pub max_retries: Option<u32>,
    /// Default request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Results page URL with a `{year}` placeholder.
    pub url_template: Option<String>,
    /// Save page markup on every run.
    pub debug: Option<bool>,
}

impl FileConfig {
    /// Validates config values against the same ranges the CLI accepts.
    pub fn validate(&self) -> Result<()> {
        if let Some(rate_limit) = self.rate_limit
            && !(0.0..=60.0).contains(&rate_limit)
        {
            bail!("Invalid config value for `rate_limit`: {rate_limit}. Expected range: 0..=60");
        }
        if let Some(max_retries) = self.max_retries
            && !(1..=10).contains(&max_retries)
        {
            bail!("Invalid config value for `max_retries`: {max_retries}. Expected range: 1..=10");
        }
        if let Some(timeout) = self.timeout_secs
            && !(1..=300).contains(&timeout)
        {
            bail!("Invalid config value for `timeout_secs`: {timeout}. Expected range: 1..=300");
        }
        if let Some(template) = &self.url_template
            && !template.contains("{year}")
        {
            bail!("Invalid config value for `url_template`: '{template}' has no {{year}} placeholder");
        }
        if let Some(prefix) = &self.prefix
            && prefix.trim().is_empty()
        {
            bail!("Invalid config value for `prefix`: must not be empty");
        }
        Ok(())
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/f1-results/config.toml`
/// 2. `$HOME/.config/f1-results/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config_home).join(APP_DIR).join("config.toml"));
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from the default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let config = match path.as_deref() {
        Some(path_ref) if path_ref.exists() => Some(load_file_config(path_ref)?),
        _ => None,
    };
    Ok(LoadedConfig { path, config })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let cfg: FileConfig = toml::from_str(raw)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Which arguments were given explicitly on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliValueSources {
    pub output_dir: bool,
    pub prefix: bool,
    pub rate_limit: bool,
    pub max_retries: bool,
    pub timeout: bool,
    pub debug: bool,
}

impl CliValueSources {
    /// Reads value sources from parsed matches.
    #[must_use]
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            output_dir: is_commandline_value(matches, "output_dir"),
            prefix: is_commandline_value(matches, "prefix"),
            rate_limit: is_commandline_value(matches, "rate_limit"),
            max_retries: is_commandline_value(matches, "max_retries"),
            timeout: is_commandline_value(matches, "timeout"),
            debug: is_commandline_value(matches, "debug"),
        }
    }
}

fn is_commandline_value(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}

/// Fills arguments not given on the command line from the config file.
///
/// Returns the URL template from the file, if any; the CLI has no flag for it.
pub fn apply_config_defaults(
    args: &mut Args,
    cli_sources: &CliValueSources,
    file_config: Option<&FileConfig>,
) -> Option<String> {
    let file_config = file_config?;

    if !cli_sources.output_dir
        && let Some(output_dir) = &file_config.output_dir
    {
        args.output_dir.clone_from(output_dir);
    }
    if !cli_sources.prefix
        && let Some(prefix) = &file_config.prefix
    {
        args.prefix.clone_from(prefix);
    }
    if !cli_sources.rate_limit
        && let Some(rate_limit) = file_config.rate_limit
    {
        args.rate_limit = rate_limit;
    }
    if !cli_sources.max_retries
        && let Some(max_retries) = file_config.max_retries
    {
        args.max_retries = max_retries;
    }
    if !cli_sources.timeout
        && let Some(timeout) = file_config.timeout_secs
    {
        args.timeout = timeout;
    }
    if !cli_sources.debug
        && let Some(debug) = file_config.debug
    {
        args.debug = debug;
    }

    file_config.url_template.clone()
}
