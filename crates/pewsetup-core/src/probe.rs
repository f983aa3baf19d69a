use std::path::PathBuf;

use log::info;
use pewsetup_backend::{CacheKey, ToolCache};

/// Look up a previously installed copy. Never touches the network.
#[must_use]
pub fn find_cached(cache: &dyn ToolCache, key: &CacheKey) -> Option<PathBuf> {
    let found = cache.find(key)?;
    info!("Found cached {} at {}", key.tool, found.display());
    Some(found)
}
