// src/render/mod.rs
// =============================================================================
// This module turns fetched data into terminal output.
//
// Submodules:
// - markdown: Renders README Markdown as plain text
//
// Everything here returns a String instead of printing, so the session layer
// decides where output goes and the tests can check it.
// =============================================================================

mod markdown;

use serde::Serialize;

use crate::github::Profile;
use crate::table::{RepoRow, RepositoryTable};

pub use markdown::render_markdown;

/// Profile card shown at the top of a search.
///
/// Optional fields are left out entirely when the user hasn't set them.
pub fn format_profile(profile: &Profile) -> String {
    let mut lines = Vec::new();

    lines.push(format!("👤 {}  {}", profile.login, profile.html_url));
    if let Some(name) = non_empty(&profile.name) {
        lines.push(format!("   {}", name));
    }
    if let Some(bio) = non_empty(&profile.bio) {
        lines.push(format!("   {}", bio));
    }
    lines.push(format!(
        "   Followers: {}  •  Following: {}",
        profile.followers, profile.following
    ));
    if let Some(company) = non_empty(&profile.company) {
        lines.push(format!("   Company: {}", company));
    }
    if let Some(location) = non_empty(&profile.location) {
        lines.push(format!("   Location: {}", location));
    }
    if let Some(blog) = profile.website() {
        lines.push(format!("   Blog/Website: {}", blog));
    }
    if let Some(avatar) = non_empty(&profile.avatar_url) {
        lines.push(format!("   Avatar: {}", avatar));
    }

    lines.join("\n") + "\n"
}

/// Compact table: one line per repository, numbered for selection.
pub fn format_table(table: &RepositoryTable) -> String {
    if table.is_empty() {
        return "No repositories found.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<4} {:<40} {:>7} {:>6} {:<14} {:<10}\n",
        "#", "NAME", "STARS", "FORKS", "LANGUAGE", "UPDATED"
    ));
    out.push_str(&"=".repeat(86));
    out.push('\n');

    for (i, row) in table.rows().iter().enumerate() {
        let name = if row.private {
            format!("{} 🔒", row.name)
        } else {
            row.name.clone()
        };
        out.push_str(&format!(
            "{:<4} {:<40} {:>7} {:>6} {:<14} {:<10}\n",
            i + 1,
            truncate(&name, 40),
            row.stars,
            row.forks,
            truncate(language(row), 14),
            // Date part of the ISO 8601 timestamp
            row.updated_at.get(..10).unwrap_or(&row.updated_at),
        ));
    }

    out.push_str(&format!("\n📋 Total: {} repositories\n", table.len()));
    out
}

/// What a search shows: the compact table, then one card per repository.
pub fn format_listing(table: &RepositoryTable) -> String {
    let mut out = format_table(table);
    for row in table.rows() {
        out.push('\n');
        out.push_str(&format_repo_card(row));
    }
    out
}

/// Detailed card for one repository.
pub fn format_repo_card(row: &RepoRow) -> String {
    let mut out = format!("## {}  {}\n", row.name, row.html_url);
    if let Some(description) = non_empty(&row.description) {
        out.push_str(description);
        out.push('\n');
    }
    out.push_str(&format!(
        "⭐ Stars: {}   🍴 Forks: {}   💻 Language: {}\n",
        row.stars,
        row.forks,
        language(row)
    ));
    out
}

/// README view: a title line followed by the rendered (or verbatim) text.
pub fn format_readme(owner: &str, repo: &str, text: &str, plain: bool) -> String {
    let body = if plain {
        text.to_string()
    } else {
        render_markdown(text)
    };
    format!("## README — {}/{}\n\n{}", owner, repo, body)
}

/// Profile plus table as one JSON document.
pub fn format_json(profile: &Profile, table: &RepositoryTable) -> serde_json::Result<String> {
    #[derive(Serialize)]
    struct Output<'a> {
        profile: &'a Profile,
        repositories: &'a RepositoryTable,
    }

    serde_json::to_string_pretty(&Output {
        profile,
        repositories: table,
    })
}

fn language(row: &RepoRow) -> &str {
    non_empty(&row.language).unwrap_or("N/A")
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// Cuts a string to at most `max` characters, marking the cut with "..."
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::Repository;
    use crate::table::tabulate;

    fn profile() -> Profile {
        Profile {
            login: "octocat".to_string(),
            name: Some("The Octocat".to_string()),
            bio: None,
            avatar_url: None,
            followers: 12,
            following: 3,
            company: Some("@github".to_string()),
            location: Some("".to_string()),
            blog: Some("".to_string()),
            html_url: "https://github.com/octocat".to_string(),
        }
    }

    fn repo(name: &str, language: Option<&str>) -> Repository {
        Repository {
            name: name.to_string(),
            description: Some("A repo".to_string()),
            language: language.map(str::to_string),
            stars: 4,
            forks: 2,
            updated_at: "2024-03-01T10:00:00Z".to_string(),
            html_url: format!("https://github.com/octocat/{}", name),
            private: false,
        }
    }

    #[test]
    fn test_profile_skips_unset_fields() {
        let card = format_profile(&profile());
        assert!(card.contains("The Octocat"));
        assert!(card.contains("Followers: 12  •  Following: 3"));
        assert!(card.contains("Company: @github"));
        assert!(!card.contains("Location"));
        assert!(!card.contains("Blog"));
        assert!(!card.contains("Avatar"));
    }

    #[test]
    fn test_empty_table_message() {
        assert_eq!(format_table(&RepositoryTable::default()), "No repositories found.\n");
    }

    #[test]
    fn test_table_lists_rows_in_order() {
        let table = tabulate(&[repo("alpha", Some("Rust")), repo("beta", None)]);
        let text = format_table(&table);
        let alpha = text.find("alpha").unwrap();
        let beta = text.find("beta").unwrap();
        assert!(alpha < beta);
        assert!(text.contains("2024-03-01"));
        assert!(text.contains("N/A"));
        assert!(text.contains("Total: 2"));
    }

    #[test]
    fn test_listing_has_a_card_per_row() {
        let table = tabulate(&[repo("alpha", Some("Rust")), repo("beta", None)]);
        let text = format_listing(&table);
        assert!(text.starts_with(&format_table(&table)));
        assert!(text.contains("## alpha  https://github.com/octocat/alpha\n"));
        assert!(text.contains("## beta  https://github.com/octocat/beta\n"));
        assert_eq!(text.matches("⭐ Stars:").count(), 2);
    }

    #[test]
    fn test_empty_listing_has_no_cards() {
        assert_eq!(format_listing(&RepositoryTable::default()), "No repositories found.\n");
    }

    #[test]
    fn test_repo_card_language_fallback() {
        let table = tabulate(&[repo("beta", None)]);
        let card = format_repo_card(&table.rows()[0]);
        assert!(card.starts_with("## beta  https://github.com/octocat/beta\n"));
        assert!(card.contains("A repo"));
        assert!(card.contains("Language: N/A"));
    }

    #[test]
    fn test_readme_title() {
        let text = format_readme("octocat", "Hello-World", "# Hi", true);
        assert_eq!(text, "## README — octocat/Hello-World\n\n# Hi");
    }

    #[test]
    fn test_json_output_shape() {
        let table = tabulate(&[repo("alpha", Some("Rust"))]);
        let json = format_json(&profile(), &table).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["profile"]["login"], "octocat");
        assert_eq!(value["repositories"][0]["name"], "alpha");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-very-long-repository-name", 10), "a-very-...");
    }
}
