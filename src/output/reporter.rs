use chrono::Duration;

use super::styling::{bright_green, bright_red, bright_yellow, cyan, dim};
use super::Reporter;
use crate::providers::gitlab::{PipelineId, PipelineSnapshot, TriggerRequest};
use crate::runner::PipelineOutcome;

/// Writes progress lines to stdout so they show up in CI job logs.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn target_branch_defaulted(&mut self, branch: &str) {
        println!("{}", branch_default_line(branch));
    }

    fn triggering(&mut self, request: &TriggerRequest) {
        println!("{}", triggering_line(request));
    }

    fn triggered(&mut self, id: PipelineId) {
        println!("{} {}", bright_green("✓ Pipeline triggered:"), cyan(id));
    }

    fn still_running(&mut self, elapsed: Duration, snapshot: &PipelineSnapshot) {
        println!("{}", still_running_line(elapsed, snapshot));
    }

    fn finished(&mut self, outcome: &PipelineOutcome) {
        println!("{}", finished_line(outcome));
    }
}

fn branch_default_line(branch: &str) -> String {
    format!(
        "{} no target branch set, using {}",
        bright_yellow("⚠"),
        cyan(branch)
    )
}

fn triggering_line(request: &TriggerRequest) -> String {
    let source = request.source_branch.as_deref().unwrap_or("<unset>");
    format!(
        "Triggering pipeline on {} {}",
        cyan(&request.target_ref),
        dim(format!("(source branch: {source})"))
    )
}

fn still_running_line(elapsed: Duration, snapshot: &PipelineSnapshot) -> String {
    format!(
        "{} pipeline not yet complete, status: {}",
        dim(format!("[{}]", format_elapsed(elapsed))),
        bright_yellow(&snapshot.status)
    )
}

fn finished_line(outcome: &PipelineOutcome) -> String {
    let summary = format!(
        "after {} ({} polls)",
        format_elapsed(outcome.elapsed),
        outcome.polls
    );

    if outcome.succeeded() {
        format!(
            "{} {} {}",
            bright_green(format!("✓ Pipeline {} succeeded", outcome.id)),
            dim(summary),
            cyan(&outcome.snapshot.web_url)
        )
    } else {
        format!(
            "{} {} {}",
            bright_red(format!(
                "✗ Pipeline {} {}",
                outcome.id, outcome.snapshot.status
            )),
            dim(summary),
            cyan(&outcome.snapshot.web_url)
        )
    }
}

/// Renders a duration as `1h 02m 03s`, `4m 05s` or `6s`.
fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.num_seconds().max(0);
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{hours}h {minutes:02}m {seconds:02}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}
