//! Run reports: failure labels, the report structure and the console summary.

use crate::constants::{DIVIDER_RATIO, FALLBACK_TERM_WIDTH};
use crate::error::Error;
use console::{style, Term};
use std::fmt;
use std::time::Duration;

/// One failed pipeline stage, labelled with the input that caused it.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    Data { path: String },
    Processor { path: String },
    Template { path: String },
    Output { path: String },
    Fmt { command: String },
    Check { command: String },
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Data { path } => write!(f, "data ({})", path),
            Failure::Processor { path } => write!(f, "processor ({})", path),
            Failure::Template { path } => write!(f, "template ({})", path),
            Failure::Output { path } => write!(f, "output ({})", path),
            Failure::Fmt { command } | Failure::Check { command } => write!(f, "{}", command),
        }
    }
}

impl Failure {
    /// Short form used in the aggregate error: command failures drop the
    /// program name (`fmt` instead of `deno fmt`).
    pub fn summary(&self) -> String {
        match self {
            Failure::Fmt { command } | Failure::Check { command } => command
                .split_once(' ')
                .map(|(_, rest)| rest.to_string())
                .unwrap_or_else(|| command.clone()),
            other => other.to_string(),
        }
    }
}

/// Outcome of one pipeline run.
#[derive(Debug)]
pub struct Report {
    /// The rendered output, empty when rendering failed
    pub output: String,
    /// Failed stages in pipeline order
    pub failures: Vec<Failure>,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl Report {
    pub fn success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Aggregate error summarizing the failed stages, if any.
    pub fn to_error(&self) -> Option<Error> {
        if self.failures.is_empty() {
            return None;
        }
        let steps = self
            .failures
            .iter()
            .map(Failure::summary)
            .collect::<Vec<_>>()
            .join(", ");
        Some(Error::FailedStepsError(steps))
    }
}

/// Prints the end-of-run summary banner to stderr.
///
/// The banner is observational only and never changes the report or the exit
/// status; it goes to stderr so piped stdout stays clean.
pub fn print_summary(report: &Report) {
    let term = Term::stderr();
    let width = term
        .size_checked()
        .map(|(_, columns)| columns as usize)
        .unwrap_or(FALLBACK_TERM_WIDTH);
    let divider = "=".repeat((width as f64 * DIVIDER_RATIO) as usize);
    let millis = report.elapsed.as_millis();

    eprintln!("{}", divider);
    if report.success() {
        let message = format!("✅ Codegen finished successfully in {}ms", millis);
        eprintln!("{}", style(message).green().bold());
    } else {
        let message = format!("⚠️ Codegen finished with errors in {}ms", millis);
        eprintln!("{}", style(message).red().bold());
        eprintln!("Failed steps:");
        for failure in &report.failures {
            eprintln!("\t· {}", style(failure).bold());
        }
    }
    eprintln!("{}", divider);
}
