mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use release_relay::config::{load_config, RelayConfig};
use release_relay::download::save_response;
use release_relay::server::{serve, AppState};
use release_relay::{handle, GitHubClient, ProxyResponse};
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(&cli)?;

    // Load configuration
    let mut config = load_config()?;

    match cli.command {
        Commands::Version => {
            println!("release-relay v{}", env!("CARGO_PKG_VERSION"));
        }

        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            let state = Arc::new(AppState {
                client: client_for(&config)?,
                credential: config.credential.clone(),
            });
            serve(config.bind, state).await?;
        }

        Commands::Fetch { file, output } => {
            if let Err(e) = fetch(&config, file.as_deref(), output).await {
                tracing::error!("{:#}", e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn setup_logging(cli: &Cli) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if cli.quiet {
        "error"
    } else if cli.verbose == 0 {
        "warn"
    } else if cli.verbose == 1 {
        "info"
    } else {
        "debug"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    Ok(())
}

fn client_for(config: &RelayConfig) -> Result<GitHubClient> {
    GitHubClient::new(config.api_base_url.clone()).context("Failed to build HTTP client")
}

/// Run the relay handler once and report the outcome on stdout.
async fn fetch(config: &RelayConfig, file: Option<&str>, output: Option<PathBuf>) -> Result<()> {
    let client = client_for(config)?;
    let file = file.unwrap_or_default();
    let path = format!("/{}", file);

    match handle(&client, &path, config.credential.as_ref()).await {
        ProxyResponse::Version(version) => {
            println!("{}", version);
        }
        ProxyResponse::Asset(response) => {
            let target = output.unwrap_or_else(|| PathBuf::from(file));
            let written = save_response(response, &target).await?;
            println!("{} ({} bytes)", target.display(), written);
        }
        ProxyResponse::Error(e) => {
            return Err(anyhow::Error::new(e).context(format!("Could not fetch '{}'", path)));
        }
    }

    Ok(())
}
