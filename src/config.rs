// src/config.rs
// =============================================================================
// Runtime settings for talking to the GitHub REST API.
//
// Resolution order (highest wins):
// 1. CLI flags (--token, --api-url, --per-page)
// 2. Environment variables (GITHUB_TOKEN, GITHUB_API_URL), including values
//    loaded from a .env file by main()
// 3. Built-in defaults below
//
// clap already folds steps 1 and 2 together through `#[arg(env = ...)]`, so
// this module only has to apply defaults and normalise empty values.
// =============================================================================

use std::time::Duration;

/// Public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Value sent in the `X-GitHub-Api-Version` header.
pub const API_VERSION: &str = "2022-11-28";

/// The API's practical maximum for `per_page`.
pub const DEFAULT_PER_PAGE: u32 = 100;

/// How long a memoized response stays fresh.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Per-request timeout handed to reqwest.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL without a trailing slash, e.g. "https://api.github.com"
    pub api_url: String,
    pub api_version: String,
    /// Bearer credential. `None` means unauthenticated (rate-limited) access.
    pub token: Option<String>,
    pub per_page: u32,
    pub cache_ttl: Duration,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_version: API_VERSION.to_string(),
            token: None,
            per_page: DEFAULT_PER_PAGE,
            cache_ttl: DEFAULT_CACHE_TTL,
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl Config {
    /// Builds a config from already-resolved flag/env values.
    ///
    /// Blank strings count as "not set": `GITHUB_TOKEN=` in a .env file must
    /// not produce an `Authorization: Bearer ` header.
    pub fn resolve(api_url: Option<String>, token: Option<String>, per_page: Option<u32>) -> Self {
        let defaults = Self::default();

        let api_url = non_blank(api_url)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);

        Self {
            api_url,
            token: non_blank(token),
            // The API serves at most 100 per page; asking for more would make
            // the first full page look short and end the listing early.
            per_page: clamp_per_page(per_page.unwrap_or(defaults.per_page)),
            ..defaults
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Keeps a page size within what the API actually serves (1..=100).
pub fn clamp_per_page(per_page: u32) -> u32 {
    per_page.clamp(1, DEFAULT_PER_PAGE)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
