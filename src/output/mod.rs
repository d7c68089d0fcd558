mod reporter;
mod styling;

use chrono::Duration;

use crate::providers::gitlab::{PipelineId, PipelineSnapshot, TriggerRequest};
use crate::runner::PipelineOutcome;

pub use reporter::ConsoleReporter;
use styling::{dim, magenta_bold};

/// Receives every user-facing decision point of a run.
pub trait Reporter {
    fn target_branch_defaulted(&mut self, branch: &str);

    fn triggering(&mut self, request: &TriggerRequest);

    fn triggered(&mut self, id: PipelineId);

    /// Called after each poll whose status is not terminal.
    fn still_running(&mut self, elapsed: Duration, snapshot: &PipelineSnapshot);

    fn finished(&mut self, outcome: &PipelineOutcome);
}

/// Prints the `citrigger` banner to stderr.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        magenta_bold("🚀 citrigger"),
        dim(env!("CARGO_PKG_VERSION")),
        dim("Trigger a CI pipeline and wait for it")
    );
}
