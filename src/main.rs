// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Load a .env file if there is one (for GITHUB_TOKEN)
// 2. Parse command-line arguments using clap
// 3. Set up logging (stderr, so stdout stays clean for --json)
// 4. Build the GitHub client and dispatch to the subcommand handler
// 5. Exit with proper code (0 = success, 1 = not found, 2 = error)
//
// The runtime is single-threaded on purpose: every request is awaited before
// the next one starts, so there is never more than one call in flight.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - API URL, token, page size, cache TTL
mod github; // src/github/ - GitHub REST API access
mod render; // src/render/ - terminal output
mod session; // src/session.rs - commands and the interactive loop
mod table; // src/table/ - sorted repository table and CSV

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::Config;
use github::{GitHubClient, ReadmeMode};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // A missing .env file is the normal case
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<i32> {
    let config = Config::resolve(cli.api_url, cli.token, cli.command.per_page());
    tracing::debug!(api_url = %config.api_url, authenticated = config.is_authenticated(), "resolved config");

    let mut client = GitHubClient::new(&config)?;

    match cli.command {
        Commands::User { username, json, csv, .. } => {
            session::run_user(&mut client, &username, json, csv.as_deref()).await
        }
        Commands::Readme {
            repo,
            json_mode,
            output,
            plain,
        } => {
            let mode = ReadmeMode::from_raw_flag(!json_mode);
            session::run_readme(&mut client, &repo, mode, output.as_deref(), plain).await
        }
        Commands::Explore {
            username, json_mode, ..
        } => session::Explorer::new(&mut client, !json_mode).run(username).await,
    }
}

// RUST_LOG wins when set; otherwise warnings only, or debug with --verbose
fn init_logging(verbose: bool) {
    let default = if verbose {
        "github_explorer=debug"
    } else {
        "github_explorer=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
