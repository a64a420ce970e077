// src/github/client.rs
// =============================================================================
// The GitHub data access layer: three read-only fetches against the REST API.
//
// - fetch_profile:     GET /users/{username}
// - list_repositories: GET /users/{username}/repos, every page
// - fetch_readme:      GET /repos/{owner}/{repo}/readme, raw or base64 JSON
//
// Every request carries the API version header, a User-Agent (GitHub rejects
// requests without one) and, when a token is configured, a bearer
// Authorization header. The Accept header is chosen per request.
//
// Each operation is memoized for the configured TTL (5 minutes by default).
// Requests are awaited one at a time; nothing here runs concurrently, which is
// why the caches need no locking and the methods simply take `&mut self`.
// =============================================================================

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use super::cache::TtlCache;
use super::error::{classify_status, GitHubError, NotFoundRule, Result};
use super::models::{Profile, ReadmeEnvelope, Repository};
use super::readme::{decode_content, ReadmeMode, ACCEPT_JSON};
use crate::config::{clamp_per_page, Config};

const USER_AGENT_VALUE: &str = concat!("github-explorer/", env!("CARGO_PKG_VERSION"));

pub struct GitHubClient {
    http: Client,
    base_url: Url,
    per_page: u32,
    profiles: TtlCache<String, Profile>,
    repositories: TtlCache<(String, u32), Vec<Repository>>,
    readmes: TtlCache<(String, String, ReadmeMode), String>,
}

impl GitHubClient {
    /// Builds a client with the headers every request needs.
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = Url::parse(&config.api_url).map_err(|e| {
            GitHubError::InvalidArgument(format!("API URL '{}': {}", config.api_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GitHubError::InvalidArgument(format!(
                "API URL '{}' cannot be used as a base URL",
                config.api_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_str(&config.api_version).map_err(|_| {
                GitHubError::InvalidArgument(format!("API version '{}'", config.api_version))
            })?,
        );

        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| GitHubError::InvalidArgument("token contains invalid characters".to_string()))?;
            // Keeps the token out of Debug output
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|source| GitHubError::Transport {
                url: config.api_url.clone(),
                source,
            })?;

        debug!(
            api_url = %base_url,
            authenticated = config.is_authenticated(),
            "created GitHub client"
        );

        Ok(Self {
            http,
            base_url,
            per_page: clamp_per_page(config.per_page),
            profiles: TtlCache::new(config.cache_ttl),
            repositories: TtlCache::new(config.cache_ttl),
            readmes: TtlCache::new(config.cache_ttl),
        })
    }

    /// Fetches a user's public profile.
    ///
    /// Any 4xx answer (unknown or malformed username) is `NotFound`.
    pub async fn fetch_profile(&mut self, username: &str) -> Result<Profile> {
        require("username", username)?;

        if let Some(profile) = self.profiles.get(&username.to_string()) {
            debug!(username, "profile cache hit");
            return Ok(profile);
        }

        let url = self.endpoint(&["users", username])?;
        let resource = format!("user '{}'", username);
        let response = self
            .get(url.clone(), ACCEPT_JSON, NotFoundRule::AnyClientError, &resource)
            .await?;
        let profile: Profile = read_json(&url, response).await?;

        info!(login = %profile.login, "fetched profile");
        self.profiles.insert(username.to_string(), profile.clone());
        Ok(profile)
    }

    /// Lists every repository of a user using the configured page size.
    pub async fn list_repositories(&mut self, username: &str) -> Result<Vec<Repository>> {
        self.list_repositories_paged(username, self.per_page).await
    }

    /// Lists every repository of a user, `per_page` at a time.
    ///
    /// `per_page` is kept within 1..=100, the most the API will serve.
    ///
    /// Pages are requested in order starting at 1. A page holding fewer than
    /// `per_page` items (including none) is taken as the last one; the API
    /// only returns a short page at the end of the listing, so no total count
    /// is consulted. Items keep the server's `sort=updated` order.
    ///
    /// If any page fails the pages already fetched are dropped and the error
    /// is returned.
    pub async fn list_repositories_paged(
        &mut self,
        username: &str,
        per_page: u32,
    ) -> Result<Vec<Repository>> {
        require("username", username)?;
        let per_page = clamp_per_page(per_page);

        let key = (username.to_string(), per_page);
        if let Some(repos) = self.repositories.get(&key) {
            debug!(username, "repository list cache hit");
            return Ok(repos);
        }

        let resource = format!("repositories of '{}'", username);
        let mut repos = Vec::new();
        let mut page: u32 = 1;

        loop {
            let mut url = self.endpoint(&["users", username, "repos"])?;
            url.query_pairs_mut()
                .append_pair("per_page", &per_page.to_string())
                .append_pair("page", &page.to_string())
                .append_pair("type", "all")
                .append_pair("sort", "updated");

            debug!(username, page, per_page, "fetching repository page");
            let response = self
                .get(url.clone(), ACCEPT_JSON, NotFoundRule::Never, &resource)
                .await?;
            let batch: Vec<Repository> = read_json(&url, response).await?;

            let count = batch.len();
            repos.extend(batch);

            if count < per_page as usize {
                break;
            }
            page += 1;
        }

        info!(username, pages = page, repositories = repos.len(), "listed repositories");
        self.repositories.insert(key, repos.clone());
        Ok(repos)
    }

    /// Fetches a repository's README as text.
    ///
    /// 404 (no README) and 403 (inaccessible) are `NotFound`.
    pub async fn fetch_readme(&mut self, owner: &str, repo: &str, mode: ReadmeMode) -> Result<String> {
        require("owner", owner)?;
        require("repository", repo)?;

        let key = (owner.to_string(), repo.to_string(), mode);
        if let Some(text) = self.readmes.get(&key) {
            debug!(owner, repo, raw = mode.is_raw(), "README cache hit");
            return Ok(text);
        }

        let url = self.endpoint(&["repos", owner, repo, "readme"])?;
        let resource = format!("README of {}/{}", owner, repo);
        let response = self
            .get(url.clone(), mode.accept_header(), NotFoundRule::MissingOrForbidden, &resource)
            .await?;

        let text = match mode {
            ReadmeMode::Raw => response
                .text()
                .await
                .map_err(|source| GitHubError::Transport {
                    url: url.to_string(),
                    source,
                })?,
            ReadmeMode::Json => {
                let envelope: ReadmeEnvelope = read_json(&url, response).await?;
                if let Some(encoding) = envelope.encoding.as_deref().filter(|e| *e != "base64") {
                    debug!(owner, repo, encoding, "unexpected README encoding, decoding as base64");
                }
                decode_content(&envelope.content).map_err(|e| GitHubError::Decode {
                    url: url.to_string(),
                    reason: format!("invalid base64 content: {}", e),
                })?
            }
        };

        info!(owner, repo, raw = mode.is_raw(), bytes = text.len(), "fetched README");
        self.readmes.insert(key, text.clone());
        Ok(text)
    }

    /// Forgets every memoized response so the next calls hit the API.
    pub fn clear_cache(&mut self) {
        self.profiles.clear();
        self.repositories.clear();
        self.readmes.clear();
    }

    // Joins percent-encoded path segments onto the base URL
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GitHubError::InvalidArgument(format!("API URL '{}'", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // Sends one GET and turns any non-2xx answer into an error
    async fn get(&self, url: Url, accept: &str, rule: NotFoundRule, resource: &str) -> Result<Response> {
        debug!(%url, accept, "GET");

        let response = self
            .http
            .get(url.clone())
            .header(ACCEPT, accept)
            .send()
            .await
            .map_err(|source| GitHubError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // The body is only used for the message, so a failed read is ignored
        let body = response.text().await.unwrap_or_default();
        Err(classify_status(rule, resource, url.as_str(), status, api_message(&body)))
    }
}

// Reads the whole body, then deserializes it; bad JSON is a Decode error
async fn read_json<T: DeserializeOwned>(url: &Url, response: Response) -> Result<T> {
    let body = response.text().await.map_err(|source| GitHubError::Transport {
        url: url.to_string(),
        source,
    })?;

    serde_json::from_str(&body).map_err(|e| GitHubError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

// Pulls `message` out of a GitHub JSON error body
fn api_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("message")?.as_str().map(str::to_string)
}

// Blank identifiers are rejected before any request is built
fn require(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GitHubError::InvalidArgument(format!("{} must not be empty", what)));
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why do the fetch methods take `&mut self`?
//    - They write into the caches after a successful request
//    - Only one request runs at a time, so exclusive access is enough and
//      no Mutex is needed
//
// 2. What does `?` do after `.await`?
//    - `.await` waits for the future to finish
//    - `?` returns early with the error if the result is Err
//
// 3. Why `url.path_segments_mut().extend(...)` instead of format!()?
//    - Each segment is percent-encoded, so a name like "a b" stays one
//      segment instead of breaking the URL
// -----------------------------------------------------------------------------
