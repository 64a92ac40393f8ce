use anyhow::Result;
use clap::Parser;
use colored::*;
use std::process::ExitCode;

use seolyzer::config::{FileConfig, Settings};
use seolyzer::logging::init_tracing;
use seolyzer::processor;
use seolyzer::types::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "[Error]".red(), err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let file_config = FileConfig::load(cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, &file_config);
    processor::run(cli, settings).await
}
