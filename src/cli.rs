use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

fn get_version() -> &'static str {
    const BASE_VERSION: &str = env!("CARGO_PKG_VERSION");

    // If there's a git tag at HEAD, use just the tag (release build)
    if let Some(tag) = option_env!("RELAY_GIT_TAG") {
        return tag;
    }

    // Not on a tag - include commit hash and branch (dev build)
    let commit = option_env!("RELAY_GIT_COMMIT").unwrap_or("unknown");
    let branch = option_env!("RELAY_GIT_BRANCH").unwrap_or("unknown");

    // Leaked once at startup to get a 'static str for clap
    let version = format!("v{}-{} ({})", BASE_VERSION, commit, branch);
    Box::leak(version.into_boxed_str())
}

#[derive(Parser)]
#[command(name = "release-relay")]
#[command(about = "Relay a GitHub repository's latest release and its assets over HTTP")]
#[command(version = get_version(), propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (use multiple times for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce output to errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the relay server
    Serve {
        /// Address to listen on (overrides RELAY_BIND)
        #[arg(long)]
        bind: Option<SocketAddr>,
    },

    /// Resolve one request without a server: print the latest version, or download an asset
    #[command(
        after_help = "Examples:\n  release-relay fetch\n  release-relay fetch app.bin -o ./app.bin"
    )]
    Fetch {
        /// Asset name from the latest release (omit to print the version)
        file: Option<String>,
        /// Where to write the asset (defaults to the asset name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the current version
    Version,
}
