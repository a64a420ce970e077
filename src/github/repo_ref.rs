// src/github/repo_ref.rs
// =============================================================================
// Turns what the user typed into an (owner, repo) pair.
//
// Supported formats:
//   - owner/repo
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo.git
//   - github.com/owner/repo/tree/main/docs   (anything after repo is ignored)
// =============================================================================

use anyhow::{anyhow, Result};

// Parses a repository reference
//
// Returns: (owner, repo) tuple
//
// Example:
//   "https://github.com/rust-lang/rust" -> ("rust-lang", "rust")
//   "octocat/Hello-World"               -> ("octocat", "Hello-World")
pub fn parse_repo_ref(input: &str) -> Result<(String, String)> {
    let trimmed = input.trim();

    // Remove common prefixes
    let without_scheme = trimmed
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");

    let path = if let Some(rest) = without_scheme.strip_prefix("github.com/") {
        rest
    } else if without_scheme.contains("://") || without_scheme.starts_with("github.com") {
        return Err(anyhow!("Not a GitHub repository: {}", trimmed));
    } else if trimmed != without_scheme {
        // Had a scheme but points somewhere other than github.com
        return Err(anyhow!("Not a GitHub URL: {}", trimmed));
    } else {
        without_scheme
    };

    // Split by '/' to get owner and repo
    let mut parts = path.split('/').filter(|p| !p.is_empty());
    let (owner, repo) = match (parts.next(), parts.next()) {
        (Some(owner), Some(repo)) => (owner, repo),
        _ => return Err(anyhow!("Expected owner/repo, got: {}", trimmed)),
    };

    // Remove .git suffix if present
    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    if repo.is_empty() {
        return Err(anyhow!("Expected owner/repo, got: {}", trimmed));
    }

    Ok((owner.to_string(), repo.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_github_url() {
        let (owner, repo) = parse_repo_ref("https://github.com/rust-lang/rust").unwrap();
        assert_eq!(owner, "rust-lang");
        assert_eq!(repo, "rust");
    }

    #[test]
    fn test_parse_github_url_with_git() {
        let (owner, repo) = parse_repo_ref("https://github.com/user/repo.git").unwrap();
        assert_eq!(owner, "user");
        assert_eq!(repo, "repo");
    }

    #[test]
    fn test_parse_short_form() {
        let (owner, repo) = parse_repo_ref("octocat/Hello-World").unwrap();
        assert_eq!(owner, "octocat");
        assert_eq!(repo, "Hello-World");
    }

    #[test]
    fn test_parse_deep_link() {
        let (owner, repo) = parse_repo_ref("github.com/octocat/Spoon-Knife/tree/main/docs").unwrap();
        assert_eq!(owner, "octocat");
        assert_eq!(repo, "Spoon-Knife");
    }

    #[test]
    fn test_parse_invalid_url() {
        assert!(parse_repo_ref("https://gitlab.com/user/repo").is_err());
    }

    #[test]
    fn test_parse_missing_repo() {
        assert!(parse_repo_ref("octocat").is_err());
        assert!(parse_repo_ref("https://github.com/octocat/").is_err());
    }
}
