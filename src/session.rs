// src/session.rs
// =============================================================================
// This module drives what the user sees: one-shot commands and the
// interactive explore loop.
//
// What happens on a search:
// 1. Fetch the profile (stop here if that fails)
// 2. Fetch every repository page and sort them into a table
// 3. Print the profile card and the table
//
// READMEs are fetched on demand, per repository. Every failure is caught at
// the boundary of the action that caused it: the user gets one line explaining
// what went wrong and the session carries on. Nothing is retried.
//
// Exit codes for one-shot commands:
//   0 = success
//   1 = the user / README does not exist (or is not accessible)
//   2 = any other error (returned as Err and printed by main)
// =============================================================================

use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::info;

use crate::github::{parse_repo_ref, GitHubClient, GitHubError, Profile, ReadmeMode};
use crate::render;
use crate::table::{tabulate, to_csv, RepoRow, RepositoryTable};

/// Default file name for the repository table download.
pub const DEFAULT_CSV_PATH: &str = "data.csv";

/// Username pre-filled by the explore prompt.
pub const DEFAULT_USERNAME: &str = "meta";

const HELP: &str = "\
Commands:
  search <user>        look up a user and list their repositories
  list                 show the repository table again
  show <repo|#n>       show one repository's details
  readme <repo|#n>     fetch and show a repository's README
  raw on|off           fetch READMEs as raw text (on) or decode from JSON (off)
  csv [path]           save the repository table as CSV (default: data.csv)
  save [path]          save the last README (default: <repo>_README.md)
  refresh              forget cached responses
  help                 show this help
  quit                 leave";

// -----------------------------------------------------------------------------
// One-shot commands
// -----------------------------------------------------------------------------

/// `user` subcommand: profile card + repository table.
pub async fn run_user(
    client: &mut GitHubClient,
    username: &str,
    json: bool,
    csv: Option<&Path>,
) -> Result<i32> {
    let (profile, table) = match load_user(client, username).await {
        Ok(loaded) => loaded,
        Err(e) if e.is_not_found() => {
            eprintln!("❌ {}", e);
            return Ok(1);
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to load `{}`", username)),
    };

    if json {
        println!("{}", render::format_json(&profile, &table)?);
    } else {
        println!("{}", render::format_profile(&profile));
        print!("{}", render::format_listing(&table));
    }

    if let Some(path) = csv {
        write_file(path, &to_csv(&table)).await?;
        eprintln!("💾 Saved {} repositories to {}", table.len(), path.display());
    }

    Ok(0)
}

/// `readme` subcommand: one README, rendered and optionally saved.
pub async fn run_readme(
    client: &mut GitHubClient,
    repo_ref: &str,
    mode: ReadmeMode,
    output: Option<&Path>,
    plain: bool,
) -> Result<i32> {
    let (owner, repo) = parse_repo_ref(repo_ref)?;

    let text = match client.fetch_readme(&owner, &repo, mode).await {
        Ok(text) => text,
        Err(e) if e.is_not_found() => {
            eprintln!("⚠️  No README or cannot access README for {}/{}: {}", owner, repo, e);
            return Ok(1);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to fetch README for {}/{}", owner, repo))
        }
    };

    print!("{}", render::format_readme(&owner, &repo, &text, plain));

    if let Some(path) = output {
        write_file(path, &text).await?;
        eprintln!("💾 Saved README to {}", path.display());
    }

    Ok(0)
}

// -----------------------------------------------------------------------------
// Interactive explore loop
// -----------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Search(String),
    List,
    Show(String),
    Readme(String),
    Raw(bool),
    Csv(Option<PathBuf>),
    Save(Option<PathBuf>),
    Refresh,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (word, arg) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let arg_path = || (!arg.is_empty()).then(|| PathBuf::from(arg));

    match word.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "search" | "user" if !arg.is_empty() => Command::Search(arg.to_string()),
        "list" | "ls" => Command::List,
        "show" if !arg.is_empty() => Command::Show(arg.to_string()),
        "readme" if !arg.is_empty() => Command::Readme(arg.to_string()),
        "raw" => match arg {
            "on" | "true" | "yes" => Command::Raw(true),
            "off" | "false" | "no" => Command::Raw(false),
            _ => Command::Invalid("usage: raw on|off".to_string()),
        },
        "csv" => Command::Csv(arg_path()),
        "save" => Command::Save(arg_path()),
        "refresh" => Command::Refresh,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "search" | "user" => Command::Invalid("usage: search <user>".to_string()),
        "show" | "readme" => Command::Invalid(format!("usage: {} <repo|#n>", word)),
        _ => Command::Invalid(format!("unknown command `{}` (type `help`)", word)),
    }
}

/// The user and table currently on screen.
struct Loaded {
    profile: Profile,
    table: RepositoryTable,
}

/// The last README shown, for `save`.
struct LastReadme {
    repo: String,
    text: String,
}

pub struct Explorer<'a> {
    client: &'a mut GitHubClient,
    raw: bool,
    loaded: Option<Loaded>,
    last_readme: Option<LastReadme>,
}

impl<'a> Explorer<'a> {
    /// `raw` picks the initial README mode; `raw on|off` changes it later.
    pub fn new(client: &'a mut GitHubClient, raw: bool) -> Self {
        Self {
            client,
            raw,
            loaded: None,
            last_readme: None,
        }
    }

    /// Runs the prompt loop until `quit` or end of input.
    pub async fn run(mut self, initial_user: Option<String>) -> Result<i32> {
        let mut input = BufReader::new(tokio::io::stdin());

        let first = match initial_user {
            Some(user) => user,
            None => {
                prompt(&format!("GitHub username [{}]: ", DEFAULT_USERNAME))?;
                match read_line_lossy(&mut input).await? {
                    Some(line) if !line.trim().is_empty() => line.trim().to_string(),
                    Some(_) => DEFAULT_USERNAME.to_string(),
                    None => return Ok(0),
                }
            }
        };
        self.search(&first).await;
        println!("\nType `help` for commands.");

        loop {
            prompt("> ")?;
            let Some(line) = read_line_lossy(&mut input).await? else {
                break;
            };
            if !self.execute(parse_command(&line)).await? {
                break;
            }
        }

        Ok(0)
    }

    /// Runs one command. Returns false when the session should end.
    async fn execute(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::Search(user) => self.search(&user).await,
            Command::List => match &self.loaded {
                Some(loaded) => print!("{}", render::format_table(&loaded.table)),
                None => println!("Search for a user first."),
            },
            Command::Show(selection) => {
                if let Some(row) = self.select(&selection) {
                    print!("{}", render::format_repo_card(row));
                }
            }
            Command::Readme(selection) => self.readme(&selection).await,
            Command::Raw(raw) => {
                self.raw = raw;
                println!(
                    "READMEs will be fetched {}.",
                    if raw { "as raw text" } else { "as JSON and decoded locally" }
                );
            }
            Command::Csv(path) => {
                if let Err(e) = self.save_csv(path).await {
                    info!(error = %format!("{:#}", e), "CSV download failed");
                    println!("❌ {:#}", e);
                }
            }
            Command::Save(path) => {
                if let Err(e) = self.save_readme(path).await {
                    info!(error = %format!("{:#}", e), "README download failed");
                    println!("❌ {:#}", e);
                }
            }
            Command::Refresh => {
                self.client.clear_cache();
                println!("Cache cleared.");
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => return Ok(false),
            Command::Empty => {}
            Command::Invalid(message) => println!("{}", message),
        }
        Ok(true)
    }

    async fn search(&mut self, username: &str) {
        match load_user(self.client, username).await {
            Ok((profile, table)) => {
                println!("{}", render::format_profile(&profile));
                print!("{}", render::format_listing(&table));
                self.loaded = Some(Loaded { profile, table });
            }
            Err(e) => {
                info!(username, error = %e, "search failed");
                report(&format!("Failed to fetch user `{}`", username), &e);
                self.loaded = None;
            }
        }
        self.last_readme = None;
    }

    async fn readme(&mut self, selection: &str) {
        let Some(row) = self.select(selection) else {
            return;
        };
        let repo = row.name.clone();
        let owner = match &self.loaded {
            Some(loaded) => loaded.profile.login.clone(),
            None => return,
        };

        let mode = ReadmeMode::from_raw_flag(self.raw);
        match self.client.fetch_readme(&owner, &repo, mode).await {
            Ok(text) => {
                print!("{}", render::format_readme(&owner, &repo, &text, false));
                println!("\n(use `save` to download this README)");
                self.last_readme = Some(LastReadme { repo, text });
            }
            Err(e) => {
                info!(owner = %owner, repo = %repo, error = %e, "README fetch failed");
                report(&format!("No README or cannot access README for {}", repo), &e);
            }
        }
    }

    async fn save_csv(&self, path: Option<PathBuf>) -> Result<()> {
        let Some(loaded) = &self.loaded else {
            println!("Search for a user first.");
            return Ok(());
        };
        let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_PATH));
        write_file(&path, &to_csv(&loaded.table)).await?;
        println!("💾 Saved {} repositories to {}", loaded.table.len(), path.display());
        Ok(())
    }

    async fn save_readme(&self, path: Option<PathBuf>) -> Result<()> {
        let Some(last) = &self.last_readme else {
            println!("Open a README first (`readme <repo>`).");
            return Ok(());
        };
        let path = path.unwrap_or_else(|| PathBuf::from(readme_file_name(&last.repo)));
        write_file(&path, &last.text).await?;
        println!("💾 Saved README to {}", path.display());
        Ok(())
    }

    /// Resolves "#3", "3" or a repository name against the current table.
    fn select(&self, selection: &str) -> Option<&RepoRow> {
        let Some(loaded) = &self.loaded else {
            println!("Search for a user first.");
            return None;
        };
        let row = select_row(&loaded.table, selection);
        if row.is_none() {
            let some: Vec<&str> = loaded.table.names().take(5).collect();
            println!(
                "No repository `{}` in the current list. Try one of: {}",
                selection,
                some.join(", ")
            );
        }
        row
    }
}

// -----------------------------------------------------------------------------
// Shared helpers
// -----------------------------------------------------------------------------

/// Profile first, then every repository page.
async fn load_user(
    client: &mut GitHubClient,
    username: &str,
) -> Result<(Profile, RepositoryTable), GitHubError> {
    let username = username.trim();
    let profile = client.fetch_profile(username).await?;
    let repos = client.list_repositories(username).await?;
    Ok((profile, tabulate(&repos)))
}

fn select_row<'t>(table: &'t RepositoryTable, selection: &str) -> Option<&'t RepoRow> {
    let selection = selection.trim();
    let index = selection.strip_prefix('#').unwrap_or(selection);
    if let Ok(n) = index.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| table.rows().get(i));
    }
    table.find(selection)
}

pub fn readme_file_name(repo: &str) -> String {
    format!("{}_README.md", repo)
}

fn report(action: &str, error: &GitHubError) {
    let icon = if error.is_not_found() {
        "⚠️ "
    } else if error.is_transport() {
        "🌐"
    } else {
        "❌"
    };
    println!("{} {}: {}", icon, action, error);
}

// Reads one line without its line ending. Bytes that are not valid UTF-8
// become U+FFFD, so a stray byte on stdin can't end the session.
// Returns Ok(None) at end of input.
async fn read_line_lossy<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<Option<String>> {
    let mut buf = Vec::new();
    let n = reader
        .read_until(b'\n', &mut buf)
        .await
        .context("Failed to read from stdin")?;
    if n == 0 {
        return Ok(None);
    }
    while matches!(buf.last(), Some(b'\n' | b'\r')) {
        buf.pop();
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

fn prompt(text: &str) -> Result<()> {
    print!("{}", text);
    std::io::stdout().flush().context("Failed to flush stdout")
}

async fn write_file(path: &Path, contents: &str) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}
