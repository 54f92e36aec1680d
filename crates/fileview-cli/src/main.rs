//! Fileview CLI - browse a record's file attachments from the terminal
//!
//! Loads attachments from a JSON fixture and replays gallery interactions.

mod cli;
mod commands;
mod error;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::common::{fixture_path_from_env, resolve_config_path};
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::preview::{run_preview, run_related_list};
use crate::commands::show::{run_show, ShowOptions};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fileview=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Show {
            sorts,
            toggles,
            more,
            upload,
            json,
        }) => {
            let fixture_path = fixture_path_from_env(cli.fixture)?;
            let config_path = resolve_config_path(cli.config)?;
            let options = ShowOptions {
                sorts: &sorts,
                toggles: &toggles,
                more,
                upload: upload.as_deref(),
            };
            run_show(options, json, &fixture_path, &config_path).await?;
        }
        Some(Commands::Preview { id, more }) => {
            let fixture_path = fixture_path_from_env(cli.fixture)?;
            let config_path = resolve_config_path(cli.config)?;
            run_preview(&id, more, &fixture_path, &config_path).await?;
        }
        Some(Commands::RelatedList) => {
            let fixture_path = fixture_path_from_env(cli.fixture)?;
            let config_path = resolve_config_path(cli.config)?;
            run_related_list(&fixture_path, &config_path).await?;
        }
        Some(Commands::Config { command }) => {
            let config_path = resolve_config_path(cli.config)?;
            run_config(command, &config_path)?;
        }
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        None => {
            Cli::command().print_help().map_err(CliError::Io)?;
            println!();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
