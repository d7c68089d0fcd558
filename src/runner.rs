use chrono::{DateTime, Duration as Elapsed, Utc};
use log::{debug, info};
use std::process::ExitCode;
use std::time::Duration;

use crate::config::RunnerConfig;
use crate::error::Result;
use crate::output::Reporter;
use crate::providers::gitlab::{PipelineId, PipelineSnapshot, TriggerRequest};

/// Remote CI operations the runner depends on.
pub trait PipelineApi {
    /// Starts one pipeline run and returns its identifier.
    async fn trigger(&self, request: &TriggerRequest) -> Result<PipelineId>;

    /// Reads the current status of a pipeline.
    async fn fetch_pipeline(&self, id: PipelineId) -> Result<PipelineSnapshot>;
}

/// Source of time for the poll loop.
pub trait Ticker {
    fn now(&self) -> DateTime<Utc>;

    async fn sleep(&self, interval: Duration);
}

/// Wall clock backed by tokio's timer.
pub struct TokioTicker;

impl Ticker for TokioTicker {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, interval: Duration) {
        tokio::time::sleep(interval).await;
    }
}

/// Final result of a run, once a terminal status was observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    pub id: PipelineId,
    pub snapshot: PipelineSnapshot,
    /// Number of status requests issued, the terminal one included
    pub polls: usize,
    pub elapsed: Elapsed,
}

impl PipelineOutcome {
    pub fn succeeded(&self) -> bool {
        self.snapshot.status.is_success()
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.succeeded() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// Triggers one pipeline and waits for it to reach a terminal status.
///
/// There is no overall deadline: the loop only ends on `success`, `failed`
/// or `canceled`, or when a request fails.
///
/// # Errors
///
/// Propagates any error from the trigger call or from a status request.
/// A pipeline that ends in `failed` or `canceled` is not an error; it is
/// reported through the returned [`PipelineOutcome`].
pub async fn run<A, T, R>(
    config: &RunnerConfig,
    api: &A,
    ticker: &T,
    reporter: &mut R,
) -> Result<PipelineOutcome>
where
    A: PipelineApi,
    T: Ticker,
    R: Reporter,
{
    if config.target_defaulted {
        reporter.target_branch_defaulted(&config.target_branch);
    }

    let request = TriggerRequest {
        target_ref: config.target_branch.clone(),
        source_branch: config.source_branch.clone(),
    };

    reporter.triggering(&request);
    let id = api.trigger(&request).await?;
    reporter.triggered(id);

    let started = ticker.now();
    let mut polls = 0;

    loop {
        let snapshot = api.fetch_pipeline(id).await?;
        polls += 1;
        let elapsed = ticker.now() - started;
        debug!("Poll {polls} for pipeline {id}: {}", snapshot.status);

        if snapshot.status.is_terminal() {
            info!(
                "Pipeline {id} finished with status {} after {polls} polls",
                snapshot.status
            );
            let outcome = PipelineOutcome {
                id,
                snapshot,
                polls,
                elapsed,
            };
            reporter.finished(&outcome);
            return Ok(outcome);
        }

        reporter.still_running(elapsed, &snapshot);
        ticker.sleep(config.poll_interval).await;
    }
}
