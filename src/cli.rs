use anyhow::Result;
use clap::Parser;
use log::info;

use crate::config::{
    RunnerConfig, RunnerInputs, DEFAULT_BASE_URL, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_PROJECT,
    READ_API_TOKEN_VAR, SOURCE_BRANCH_VAR, TARGET_BRANCH_VAR, TRIGGER_TOKEN_VAR,
};
use crate::output::ConsoleReporter;
use crate::providers::gitlab::GitLabClient;
use crate::runner::{self, PipelineOutcome, TokioTicker};

#[derive(Parser)]
#[command(name = "citrigger")]
#[command(author, version, about = "Trigger a CI pipeline and wait for it", long_about = None)]
pub struct Cli {
    /// Token used to start the pipeline
    #[arg(long, env = TRIGGER_TOKEN_VAR, hide_env_values = true)]
    trigger_token: Option<String>,

    /// Token used to read the pipeline status
    #[arg(long, env = READ_API_TOKEN_VAR, hide_env_values = true)]
    read_token: Option<String>,

    /// Source branch, passed to the pipeline as a variable
    #[arg(long, env = SOURCE_BRANCH_VAR)]
    source_branch: Option<String>,

    /// Branch the pipeline runs against
    #[arg(long, env = TARGET_BRANCH_VAR)]
    target_branch: Option<String>,

    #[arg(long, env = "CI_TRIGGER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    url: String,

    #[arg(long, env = "CI_TRIGGER_PROJECT", default_value = DEFAULT_PROJECT)]
    project: String,

    /// Seconds to wait between status checks
    #[arg(long, env = "CI_TRIGGER_POLL_INTERVAL", default_value_t = DEFAULT_POLL_INTERVAL_SECS)]
    poll_interval: u64,
}

impl Cli {
    fn inputs(&self) -> RunnerInputs {
        RunnerInputs {
            trigger_token: self.trigger_token.clone(),
            read_token: self.read_token.clone(),
            source_branch: self.source_branch.clone(),
            target_branch: self.target_branch.clone(),
            base_url: self.url.clone(),
            project: self.project.clone(),
            poll_interval_secs: self.poll_interval,
        }
    }

    pub async fn execute(&self) -> Result<PipelineOutcome> {
        // Validation happens before the HTTP client exists, so a missing
        // token can never reach the network.
        let config = RunnerConfig::from_inputs(self.inputs())?;

        info!(
            "Triggering pipeline for project {} on {}",
            config.project, config.base_url
        );

        let client = GitLabClient::new(
            &config.base_url,
            &config.project,
            config.trigger_token.clone(),
            config.read_token.clone(),
        )?;

        let mut reporter = ConsoleReporter;
        let outcome = runner::run(&config, &client, &TokioTicker, &mut reporter).await?;

        Ok(outcome)
    }
}
