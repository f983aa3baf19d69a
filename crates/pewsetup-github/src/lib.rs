//! GitHub Releases backed [`ReleaseProvider`](pewsetup_backend::ReleaseProvider).

mod client;
mod release;

pub use client::{DEFAULT_API_URL, GitHubReleaseProvider};
pub use release::{GitHubAsset, GitHubRelease};
