// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Global options (--token, --api-url, --verbose) work with every subcommand.
// --token and --api-url fall back to the GITHUB_TOKEN and GITHUB_API_URL
// environment variables, which main() may have loaded from a .env file.
// =============================================================================

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "github-explorer",
    version,
    about = "Browse a GitHub user's profile, repositories and README files",
    long_about = "github-explorer looks up a GitHub user, lists all of their repositories \
                  sorted by stars and last update, and shows README files on demand. \
                  Set GITHUB_TOKEN to raise the API rate limit."
)]
pub struct Cli {
    /// GitHub token sent as a bearer credential (optional)
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, global = true, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Show debug logs on stderr (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a user's profile and their repositories
    ///
    /// Example: github-explorer user octocat --csv data.csv
    User {
        /// GitHub username
        username: String,

        /// Output profile and repositories as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Also save the repository table as CSV to this path
        #[arg(long, value_name = "PATH")]
        csv: Option<PathBuf>,

        /// Repositories requested per page (the API allows at most 100)
        #[arg(long, value_name = "N")]
        per_page: Option<u32>,
    },

    /// Show a repository's README
    ///
    /// Example: github-explorer readme octocat/Hello-World
    Readme {
        /// Repository as owner/repo or a github.com URL
        repo: String,

        /// Fetch the JSON envelope and decode its base64 content locally
        /// instead of asking for raw text
        #[arg(long)]
        json_mode: bool,

        /// Save the README to this path
        #[arg(long, short, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Print the README as-is instead of rendering the Markdown
        #[arg(long)]
        plain: bool,
    },

    /// Interactive session: search users, open READMEs, download data
    ///
    /// Example: github-explorer explore torvalds
    Explore {
        /// User to search first (prompted for when omitted)
        username: Option<String>,

        /// Start with READMEs fetched as JSON and decoded locally
        #[arg(long)]
        json_mode: bool,

        /// Repositories requested per page (the API allows at most 100)
        #[arg(long, value_name = "N")]
        per_page: Option<u32>,
    },
}

impl Commands {
    // Page size override; only the subcommands that list repositories have one
    pub fn per_page(&self) -> Option<u32> {
        match self {
            Commands::User { per_page, .. } | Commands::Explore { per_page, .. } => *per_page,
            Commands::Readme { .. } => None,
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Where do the --help texts come from?
//    - clap turns the `///` doc comments above each field into help text
//
// 2. What does `env = "GITHUB_TOKEN"` do?
//    - If the flag is missing, clap reads the environment variable instead
//    - `hide_env_values` keeps the token out of --help output
//
// 3. Why Option<...> for some arguments?
//    - None means "not given", so a default can be applied later (config.rs)
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_user_command() {
        let cli = Cli::try_parse_from(["github-explorer", "user", "octocat", "--csv", "out.csv", "--per-page", "50"])
            .unwrap();
        assert_eq!(cli.command.per_page(), Some(50));
        match cli.command {
            Commands::User { username, json, csv, .. } => {
                assert_eq!(username, "octocat");
                assert!(!json);
                assert_eq!(csv, Some(PathBuf::from("out.csv")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_readme_defaults_to_raw() {
        let cli = Cli::try_parse_from(["github-explorer", "readme", "octocat/Hello-World"]).unwrap();
        match cli.command {
            Commands::Readme { repo, json_mode, output, plain } => {
                assert_eq!(repo, "octocat/Hello-World");
                assert!(!json_mode);
                assert!(output.is_none());
                assert!(!plain);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "github-explorer",
            "explore",
            "--api-url",
            "http://localhost:9999",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:9999"));
        assert!(cli.verbose);
    }
}
