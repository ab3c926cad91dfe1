//! Marginalia CLI - AI writing tools for notes from the command line.

use anyhow::Context;
use clap::Parser;
use marginalia_assist::Assistant;
use marginalia_cli::{commands, Cli, Config, Formatter};
use marginalia_llm::OpenAiProvider;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<bool> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let provider = OpenAiProvider::new(config.openai_config()?)
        .context("failed to create inference client")?;
    let assistant = Assistant::new(provider, config.assist.clone());

    let report = commands::execute(cli.command, &assistant, &formatter, std::io::stdin()).await?;
    if report.success {
        println!("{}", report.output);
    } else {
        eprintln!("{}", report.output);
    }
    Ok(report.success)
}
