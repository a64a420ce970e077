// src/github/mod.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Currently implements:
// - Looking up a user's public profile
// - Listing all of a user's repositories (page by page)
// - Fetching a repository's README, as raw text or decoded from base64
// - Memoizing each of those for a few minutes within one session
// - Parsing "owner/repo" and github.com URLs into an owner/repo pair
//
// Rust concepts:
// - Modules: Organizing related functionality
// - Public API: What other parts of the app can use
// =============================================================================

mod cache;
mod client;
mod error;
mod models;
mod readme;
mod repo_ref;

// Re-export the pieces the rest of the app uses
pub use client::GitHubClient;
pub use error::GitHubError;
pub use models::{Profile, Repository};
pub use readme::ReadmeMode;
pub use repo_ref::parse_repo_ref;
