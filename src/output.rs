//! Console output for a finished run.

use std::fmt::Write as _;
use std::path::Path;

use f1_results_core::{RunReport, Summary};

const TOP_WINNERS: usize = 10;
const PREVIEW_RACES: usize = 5;

/// One-paragraph run report: counts, a few races and the files written.
pub(crate) fn render_report(report: &RunReport, log_file: Option<&Path>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Scraped {} ({})", report.year, report.source_url);
    let _ = writeln!(
        out,
        "  races: {} accepted, {} rejected, {} rows skipped",
        report.accepted.len(),
        report.rejections.len(),
        report.skipped.len()
    );
    if !report.table_found {
        let _ = writeln!(out, "  no results table found in the page");
    }
    for race in report.accepted.iter().take(PREVIEW_RACES) {
        let _ = writeln!(out, "  {} ({}) - {}", race.grand_prix, race.date, race.winner);
    }
    if report.accepted.len() > PREVIEW_RACES {
        let _ = writeln!(out, "  ... and {} more races", report.accepted.len() - PREVIEW_RACES);
    }
    for export in &report.exports {
        match &export.result {
            Ok(()) => {
                let _ = writeln!(out, "  {}: {}", export.format, export.path.display());
            }
            Err(e) => {
                let _ = writeln!(out, "  {}: FAILED ({e})", export.format);
            }
        }
    }
    if let Some(path) = &report.debug_markup {
        let _ = writeln!(out, "  page markup: {}", path.display());
    }
    if let Some(path) = log_file {
        let _ = writeln!(out, "  log: {}", path.display());
    }
    out
}

/// Season summary: race count, top winners and winning cars.
pub(crate) fn render_summary(summary: &Summary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total races: {}", summary.total_races);
    let _ = writeln!(out, "Unique winners: {}", summary.unique_winners);
    if !summary.winners.is_empty() {
        let _ = writeln!(out, "Winners:");
        for entry in summary.top_winners(TOP_WINNERS) {
            let _ = writeln!(out, "  {:<28} {}", entry.name, entry.wins);
        }
    }
    if !summary.cars.is_empty() {
        let _ = writeln!(out, "Cars:");
        for entry in &summary.cars {
            let _ = writeln!(out, "  {:<28} {}", entry.name, entry.wins);
        }
    }
    out
}
