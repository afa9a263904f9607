use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, load_settings_from, ClientSettings, CommitmentsApi, HttpCommitmentsClient,
};
use shared::domain::CommitmentId;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;
use view_state::{Orchestrator, Selection};

mod commands;
mod ui;

use commands::{ConsoleCommand, HELP};
use ui::report::Report;

#[derive(Parser, Debug)]
#[command(name = "analyzer", about = "Compare committed spend against actual spend per company")]
struct Cli {
    /// Settings file; defaults to ./analyzer.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    server_url: Option<String>,
    #[arg(long, global = true)]
    api_base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load everything once and print the report.
    Show {
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        commitment: Option<i64>,
    },
    /// Print the company list.
    Companies,
    /// Read selection commands from stdin and re-render after each one.
    Interactive,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = resolve_settings(&cli)?;

    let filter =
        EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(api_root = settings.api_root(), "using commitments service");
    let api: Arc<dyn CommitmentsApi> =
        Arc::new(HttpCommitmentsClient::from_settings(&settings));

    match cli.command {
        Command::Companies => {
            let companies = api
                .list_companies()
                .await
                .context("failed to list companies")?;
            for company in companies {
                println!("{company}");
            }
        }
        Command::Show {
            company,
            commitment,
        } => {
            let mut orchestrator = Orchestrator::new(api);
            orchestrator.settle().await;
            if let Some(company) = company {
                orchestrator.select_company(Selection::Selected(company));
                orchestrator.settle().await;
            }
            if let Some(id) = commitment {
                orchestrator.select_commitment(Selection::Selected(CommitmentId(id)));
                orchestrator.settle().await;
            }
            print!("{}", Report::new(orchestrator.controller()));
        }
        Command::Interactive => run_interactive(api).await?,
    }

    Ok(())
}

fn resolve_settings(cli: &Cli) -> Result<ClientSettings> {
    let mut settings = match &cli.config {
        Some(path) => load_settings_from(path),
        None => load_settings(),
    }
    .context("failed to load analyzer settings")?;

    if let Some(v) = &cli.server_url {
        settings.server_url = v.clone();
    }
    if let Some(v) = &cli.api_base_url {
        settings.api_base_url = v.clone();
    }
    Ok(settings)
}

async fn run_interactive(api: Arc<dyn CommitmentsApi>) -> Result<()> {
    let mut orchestrator = Orchestrator::new(api);
    orchestrator.settle().await;
    print!("{}", Report::new(orchestrator.controller()));
    println!("\n{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match ConsoleCommand::parse(&line) {
            Ok(ConsoleCommand::SelectCompany(company)) => orchestrator.select_company(company),
            Ok(ConsoleCommand::SelectCommitment(commitment)) => {
                orchestrator.select_commitment(commitment)
            }
            Ok(ConsoleCommand::Show) => {}
            Ok(ConsoleCommand::Help) => {
                println!("{HELP}");
                continue;
            }
            Ok(ConsoleCommand::Quit) => break,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        }
        orchestrator.settle().await;
        print!("{}", Report::new(orchestrator.controller()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_loaded_settings() {
        let cli = Cli::parse_from([
            "analyzer",
            "--config",
            "/nonexistent/analyzer.toml",
            "--api-base-url",
            "http://gateway:8080/",
            "show",
            "--company",
            "ingen",
        ]);
        let settings = resolve_settings(&cli).expect("settings");

        assert_eq!(settings.api_base_url, "http://gateway:8080/");
        assert_eq!(settings.api_root(), "http://gateway:8080");
        match cli.command {
            Command::Show {
                company,
                commitment,
            } => {
                assert_eq!(company.as_deref(), Some("ingen"));
                assert_eq!(commitment, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
