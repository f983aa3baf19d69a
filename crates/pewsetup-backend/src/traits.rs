use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::SetupError;
use crate::types::{CacheKey, ReleaseAsset, ReleaseDetail, ReleaseSummary};

/// Remote source of releases for a single repository.
#[async_trait]
pub trait ReleaseProvider: Send + Sync {
    async fn latest_release(&self) -> Result<ReleaseSummary, SetupError>;

    /// The most recent releases, newest first, limited to one page of
    /// `per_page` entries.
    async fn list_releases(&self, per_page: u8) -> Result<Vec<ReleaseSummary>, SetupError>;

    async fn release_by_tag(&self, tag: &str) -> Result<ReleaseDetail, SetupError>;

    /// Raw asset content, requested as `application/octet-stream`.
    async fn download_asset(&self, asset: &ReleaseAsset) -> Result<Vec<u8>, SetupError>;
}

/// Persistent store of installed tool directories.
pub trait ToolCache: Send + Sync {
    fn find(&self, key: &CacheKey) -> Option<PathBuf>;

    /// Commit `source` as the directory for `key` and return the committed
    /// location.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be copied or marked complete.
    fn cache_dir(&self, source: &Path, key: &CacheKey) -> Result<PathBuf, SetupError>;
}

/// Destination for the values a successful run publishes to later steps.
pub trait OutputSink {
    /// Record every `(name, value)` pair in one write, so either all of
    /// them become visible or none do.
    ///
    /// # Errors
    /// Returns an error if the outputs cannot be recorded.
    fn set_outputs(&mut self, outputs: &[(&str, &str)]) -> Result<(), SetupError>;

    /// # Errors
    /// Returns an error if the search path cannot be updated.
    fn add_path(&mut self, dir: &Path) -> Result<(), SetupError>;
}
