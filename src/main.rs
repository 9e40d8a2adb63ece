mod cli;
mod commands;
mod config;
mod error;
mod github;
mod http;
mod logger;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use config::Config;
use github::{github_client::GithubClient, resolver::ReleaseSelector};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logger::init(logger::level(cli.verbose, cli.quiet)) {
        eprintln!("Cannot initialize the logger: {}", err);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match error::strip_url_queries(&format!("{:#}", err)) {
                Ok(message) => eprintln!("{}", message),
                Err(_) => eprintln!("The command failed; run with -v for details"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref(), cli.overrides())
        .await
        .context("Cannot load configuration")?;
    let client = GithubClient::new(&config.client);
    let repo = &config.repository;

    match &cli.command {
        Command::Upload { files } => {
            let selector = ReleaseSelector::new(cli.tag().as_ref(), cli.release_id)?;
            let release =
                commands::upload(&client, repo, &selector, cli.release_fields(), files).await?;
            log::info!("release {} is up to date", release.id);
        }
        Command::Delete { patterns } => {
            let selector = ReleaseSelector::new(cli.tag().as_ref(), cli.release_id)?;
            commands::delete(&client, repo, &selector, patterns).await?;
        }
        Command::List => {
            commands::list(&client, repo, &mut std::io::stdout().lock()).await?;
        }
    }

    Ok(())
}
