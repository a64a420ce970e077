// src/github/error.rs
// =============================================================================
// Error types for the GitHub data access layer.
//
// Every fetch either returns a complete record or one of these. There are no
// partial results and no retries: the caller (the session layer) decides how
// to show the failure to the user.
//
// Taxonomy:
// - NotFound:         the resource is absent or inaccessible (404/403 class)
// - Transport/Status: the network failed, or the server answered with some
//                     other non-2xx status
// - Decode:           the body was not the JSON or base64 we expected
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("{resource} not found (HTTP {status}){}", suffix(.message))]
    NotFound {
        resource: String,
        status: u16,
        message: Option<String>,
    },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned HTTP {status}{}", suffix(.message))]
    Status {
        url: String,
        status: u16,
        message: Option<String>,
    },

    #[error("could not decode response from {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, GitHubError>;

impl GitHubError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GitHubError::NotFound { .. })
    }

    /// Network failures and unclassified HTTP statuses.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            GitHubError::Transport { .. } | GitHubError::Status { .. }
        )
    }
}

/// Which non-2xx statuses an endpoint reports as `NotFound`.
///
/// Each endpoint has its own rule:
/// - user lookup: any 4xx (bad usernames come back as 404, sometimes 422)
/// - README: 404 (no README) and 403 (private / blocked repository)
/// - repository listing: never, every failure is a transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundRule {
    AnyClientError,
    MissingOrForbidden,
    Never,
}

impl NotFoundRule {
    pub fn matches(self, status: StatusCode) -> bool {
        match self {
            NotFoundRule::AnyClientError => status.is_client_error(),
            NotFoundRule::MissingOrForbidden => {
                matches!(status, StatusCode::NOT_FOUND | StatusCode::FORBIDDEN)
            }
            NotFoundRule::Never => false,
        }
    }
}

/// Maps a non-2xx response to the right error variant.
///
/// `message` is the `message` field of GitHub's JSON error body, when there
/// was one.
pub fn classify_status(
    rule: NotFoundRule,
    resource: &str,
    url: &str,
    status: StatusCode,
    message: Option<String>,
) -> GitHubError {
    if rule.matches(status) {
        GitHubError::NotFound {
            resource: resource.to_string(),
            status: status.as_u16(),
            message,
        }
    } else {
        GitHubError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            message,
        }
    }
}

fn suffix(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {}", m),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_lookup_treats_any_4xx_as_not_found() {
        for code in [400, 403, 404, 422] {
            let status = StatusCode::from_u16(code).unwrap();
            let err = classify_status(
                NotFoundRule::AnyClientError,
                "user nobody",
                "https://api.github.com/users/nobody",
                status,
                None,
            );
            assert!(err.is_not_found(), "HTTP {} should be NotFound", code);
        }

        let err = classify_status(
            NotFoundRule::AnyClientError,
            "user nobody",
            "https://api.github.com/users/nobody",
            StatusCode::BAD_GATEWAY,
            None,
        );
        assert!(err.is_transport());
    }

    #[test]
    fn test_readme_only_404_and_403_are_not_found() {
        assert!(NotFoundRule::MissingOrForbidden.matches(StatusCode::NOT_FOUND));
        assert!(NotFoundRule::MissingOrForbidden.matches(StatusCode::FORBIDDEN));
        assert!(!NotFoundRule::MissingOrForbidden.matches(StatusCode::UNAUTHORIZED));
        assert!(!NotFoundRule::MissingOrForbidden.matches(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn test_listing_never_reports_not_found() {
        assert!(!NotFoundRule::Never.matches(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_display_includes_api_message() {
        let err = GitHubError::NotFound {
            resource: "user ghost-404".to_string(),
            status: 404,
            message: Some("Not Found".to_string()),
        };
        assert_eq!(err.to_string(), "user ghost-404 not found (HTTP 404): Not Found");

        let err = GitHubError::Status {
            url: "https://api.github.com/users/x/repos".to_string(),
            status: 500,
            message: None,
        };
        assert_eq!(
            err.to_string(),
            "request to https://api.github.com/users/x/repos returned HTTP 500"
        );
    }
}
