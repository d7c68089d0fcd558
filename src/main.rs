mod auth;
mod cli;
mod config;
mod error;
mod output;
mod providers;
mod runner;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    output::print_banner();

    let cli = Cli::parse();
    info!("Starting citrigger - CI pipeline trigger");
    let outcome = cli.execute().await?;

    Ok(outcome.exit_code())
}
