mod claude;
mod cli;
mod config;
mod dialogue;
mod error;
mod goals;
mod questionnaire;
mod setup;
mod tasks;
mod ui;
mod workspace;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, GoalsArgs, GoalsOptions};

#[tokio::main]
async fn main() -> ExitCode {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt::init();
    }

    let cli = Cli::parse();

    let result = run(cli).await;

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let root = cli.workspace_root();

    match cli.command {
        Some(Command::Check) => Ok(cli::check(&root)),
        Some(Command::Config) => {
            cli::config_cmd()?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Tasks { command }) => {
            cli::tasks(&root, &command)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Goals(args)) => {
            cli::goals(&root, GoalsOptions::from(&args)).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Setup(args)) => {
            cli::setup(&root, GoalsOptions::from(&args)).await?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            cli::setup(&root, GoalsOptions::from(&GoalsArgs::default())).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
