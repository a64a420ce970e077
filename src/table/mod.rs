// src/table/mod.rs
// =============================================================================
// Turns a raw repository listing into the table the user sees.
//
// Submodules:
// - csv: Renders the table as a downloadable CSV file
//
// The table is recomputed from the listing every time; nothing here is cached
// or merged with an earlier result.
// =============================================================================

mod csv;

use serde::Serialize;

use crate::github::Repository;

pub use self::csv::to_csv;

/// One row of the repository table, in download column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoRow {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub updated_at: String,
    pub html_url: String,
    pub private: bool,
}

impl From<&Repository> for RepoRow {
    fn from(repo: &Repository) -> Self {
        Self {
            name: repo.name.clone(),
            description: repo.description.clone(),
            language: repo.language.clone(),
            stars: repo.stars,
            forks: repo.forks,
            updated_at: repo.updated_at.clone(),
            html_url: repo.html_url.clone(),
            private: repo.private,
        }
    }
}

/// Repositories sorted by stars, then last update, both descending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RepositoryTable {
    rows: Vec<RepoRow>,
}

impl RepositoryTable {
    pub fn rows(&self) -> &[RepoRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.name.as_str())
    }

    /// Finds a row by exact name, falling back to a case-insensitive match.
    pub fn find(&self, name: &str) -> Option<&RepoRow> {
        self.rows
            .iter()
            .find(|row| row.name == name)
            .or_else(|| self.rows.iter().find(|row| row.name.eq_ignore_ascii_case(name)))
    }
}

/// Builds the sorted table from a listing.
///
/// `sort_by` is stable, so rows with equal stars and timestamps keep the
/// order the API returned them in. Timestamps are ISO 8601, which sorts
/// correctly as plain strings.
pub fn tabulate(repos: &[Repository]) -> RepositoryTable {
    let mut rows: Vec<RepoRow> = repos.iter().map(RepoRow::from).collect();
    rows.sort_by(|a, b| {
        b.stars
            .cmp(&a.stars)
            .then_with(|| b.updated_at.cmp(&a.updated_at))
    });
    RepositoryTable { rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, stars: u64, updated_at: &str) -> Repository {
        Repository {
            name: name.to_string(),
            description: None,
            language: None,
            stars,
            forks: 0,
            updated_at: updated_at.to_string(),
            html_url: format!("https://github.com/octocat/{}", name),
            private: false,
        }
    }

    fn is_sorted(table: &RepositoryTable) -> bool {
        table.rows().windows(2).all(|pair| {
            let (a, b) = (&pair[0], &pair[1]);
            a.stars > b.stars || (a.stars == b.stars && a.updated_at >= b.updated_at)
        })
    }

    #[test]
    fn test_sorts_by_stars_then_updated() {
        let repos = vec![
            repo("old", 5, "2023-01-01"),
            repo("new", 5, "2024-01-01"),
            repo("popular", 10, "2022-01-01"),
        ];

        let table = tabulate(&repos);
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, vec!["popular", "new", "old"]);
        assert!(is_sorted(&table));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let repos = vec![
            repo("first", 3, "2024-05-05T00:00:00Z"),
            repo("second", 3, "2024-05-05T00:00:00Z"),
            repo("third", 3, "2024-05-05T00:00:00Z"),
        ];

        let names: Vec<String> = tabulate(&repos).names().map(str::to_string).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_missing_timestamp_sorts_last_among_equal_stars() {
        let repos = vec![repo("no-date", 1, ""), repo("dated", 1, "2020-01-01T00:00:00Z")];
        let table = tabulate(&repos);
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, vec!["dated", "no-date"]);
    }

    #[test]
    fn test_empty_input_gives_empty_table() {
        let table = tabulate(&[]);
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_tabulate_is_idempotent() {
        let repos = vec![
            repo("a", 1, "2021-01-01"),
            repo("b", 7, "2020-01-01"),
            repo("c", 7, "2022-01-01"),
            repo("d", 0, "2023-01-01"),
        ];

        let once = tabulate(&repos);
        let back: Vec<Repository> = once
            .rows()
            .iter()
            .map(|row| repo(&row.name, row.stars, &row.updated_at))
            .collect();
        let twice = tabulate(&back);

        assert_eq!(once, twice);
        assert!(is_sorted(&twice));
    }

    #[test]
    fn test_find_is_case_insensitive_fallback() {
        let table = tabulate(&[repo("Hello-World", 1, "2020-01-01")]);
        assert!(table.find("Hello-World").is_some());
        assert!(table.find("hello-world").is_some());
        assert!(table.find("missing").is_none());
    }

    #[test]
    fn test_json_is_a_plain_array() {
        let table = tabulate(&[repo("a", 2, "2020-01-01")]);
        let json = serde_json::to_value(&table).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["stars"], 2);
        assert_eq!(json[0]["description"], serde_json::Value::Null);
    }
}
