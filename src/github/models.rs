// src/github/models.rs
// =============================================================================
// Typed records for the three GitHub endpoints we use.
//
// GitHub returns a lot more fields than we need; serde ignores the rest.
// Every field the API may omit or send as null is either an Option or has a
// #[serde(default)], so deserialization never fails because a field is
// missing and the rest of the program never has to guess what exists.
// =============================================================================

use serde::{Deserialize, Serialize};

/// A user's public profile from `GET /users/{username}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub login: String,
    /// Display name
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    pub company: Option<String>,
    pub location: Option<String>,
    /// Blog / website. GitHub sends "" rather than null when unset.
    pub blog: Option<String>,
    #[serde(default)]
    pub html_url: String,
}

impl Profile {
    /// Blog URL, treating the empty string GitHub uses for "unset" as absent.
    pub fn website(&self) -> Option<&str> {
        self.blog.as_deref().filter(|b| !b.trim().is_empty())
    }
}

/// One element of `GET /users/{username}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default, rename = "stargazers_count")]
    pub stars: u64,
    #[serde(default, rename = "forks_count")]
    pub forks: u64,
    /// ISO 8601 timestamp, compared as a string when sorting
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub private: bool,
}

/// The JSON envelope of `GET /repos/{owner}/{repo}/readme`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadmeEnvelope {
    /// Base64 text, wrapped with newlines every 60 characters
    #[serde(default)]
    pub content: String,
    /// Always "base64" in practice
    pub encoding: Option<String>,
}
