//! Exit code logic for the scraper process.
//!
//! Single responsibility: map a run report to the process exit outcome.

use f1_results_core::RunReport;

/// How the process ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    Success,
    Failure,
    Partial,
}

impl ProcessExit {
    pub(crate) fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
            Self::Partial => 2,
        }
    }
}

/// Determines the process exit outcome from a completed run.
///
/// No export written is a failure. One export failing, or a run that found
/// no races, is partial.
pub(crate) fn determine_exit_outcome(report: &RunReport) -> ProcessExit {
    exit_outcome_from_counts(
        report.exports_written(),
        report.exports_failed(),
        report.accepted.len(),
    )
}

fn exit_outcome_from_counts(written: usize, failed: usize, races: usize) -> ProcessExit {
    if written == 0 {
        ProcessExit::Failure
    } else if failed > 0 || races == 0 {
        ProcessExit::Partial
    } else {
        ProcessExit::Success
    }
}
