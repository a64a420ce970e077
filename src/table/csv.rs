// src/table/csv.rs
// =============================================================================
// CSV rendering of the repository table (the "download repo data" artifact).
//
// Columns: name, description, language, stars, forks, updated_at, html_url,
// private. Absent values are empty cells. Fields containing a comma, quote,
// CR or LF are quoted with inner quotes doubled (RFC 4180). Lines end in LF.
// =============================================================================

use std::borrow::Cow;

use super::{RepoRow, RepositoryTable};

pub const CSV_HEADER: [&str; 8] = [
    "name",
    "description",
    "language",
    "stars",
    "forks",
    "updated_at",
    "html_url",
    "private",
];

pub fn to_csv(table: &RepositoryTable) -> String {
    let mut out = String::new();
    push_record(&mut out, CSV_HEADER.iter().map(|h| Cow::Borrowed(*h)));
    for row in table.rows() {
        push_record(&mut out, fields(row));
    }
    out
}

fn fields(row: &RepoRow) -> impl Iterator<Item = Cow<'_, str>> {
    [
        Cow::Borrowed(row.name.as_str()),
        Cow::Borrowed(row.description.as_deref().unwrap_or("")),
        Cow::Borrowed(row.language.as_deref().unwrap_or("")),
        Cow::Owned(row.stars.to_string()),
        Cow::Owned(row.forks.to_string()),
        Cow::Borrowed(row.updated_at.as_str()),
        Cow::Borrowed(row.html_url.as_str()),
        Cow::Borrowed(if row.private { "true" } else { "false" }),
    ]
    .into_iter()
}

fn push_record<'a>(out: &mut String, fields: impl Iterator<Item = Cow<'a, str>>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape(&field));
    }
    out.push('\n');
}

fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::Repository;
    use crate::table::tabulate;

    #[test]
    fn test_header_only_for_empty_table() {
        let csv = to_csv(&RepositoryTable::default());
        assert_eq!(csv, "name,description,language,stars,forks,updated_at,html_url,private\n");
    }

    #[test]
    fn test_row_with_missing_values() {
        let repo = Repository {
            name: "Hello-World".to_string(),
            description: None,
            language: None,
            stars: 80,
            forks: 9,
            updated_at: "2024-01-26T19:14:43Z".to_string(),
            html_url: "https://github.com/octocat/Hello-World".to_string(),
            private: false,
        };

        let csv = to_csv(&tabulate(&[repo]));
        let line = csv.lines().nth(1).unwrap();
        assert_eq!(
            line,
            "Hello-World,,,80,9,2024-01-26T19:14:43Z,https://github.com/octocat/Hello-World,false"
        );
    }

    #[test]
    fn test_quoting() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a, b"), "\"a, b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape("two\nlines"), "\"two\nlines\"");
    }
}
