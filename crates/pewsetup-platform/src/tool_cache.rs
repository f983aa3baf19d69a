//! On-disk tool cache using the hosted runner layout:
//! `<root>/<tool>/<version>/<arch>` plus a sibling `<arch>.complete` marker.
//!
//! An entry only counts as present once its marker exists, so a directory
//! left behind by an interrupted copy is never returned by [`FsToolCache::find`].

use std::path::{Path, PathBuf};

use log::debug;
use pewsetup_backend::{CacheKey, SetupError, ToolCache};

#[derive(Debug, Clone)]
pub struct FsToolCache {
    root: PathBuf,
}

impl FsToolCache {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn entry_dir(&self, key: &CacheKey) -> PathBuf {
        self.root
            .join(&key.tool)
            .join(normalize_version(&key.version))
            .join(&key.arch)
    }

    fn marker_path(&self, key: &CacheKey) -> PathBuf {
        self.root
            .join(&key.tool)
            .join(normalize_version(&key.version))
            .join(format!("{}.complete", key.arch))
    }
}

/// Drop a leading `v` from semver-valid versions so `v1.2.3` and `1.2.3`
/// share an entry. Anything else is kept as-is.
fn normalize_version(version: &str) -> String {
    let trimmed = version.trim();
    let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
    semver::Version::parse(bare).map_or_else(|_| trimmed.to_string(), |v| v.to_string())
}

impl ToolCache for FsToolCache {
    fn find(&self, key: &CacheKey) -> Option<PathBuf> {
        if key.tool.is_empty() || key.version.trim().is_empty() || key.arch.is_empty() {
            return None;
        }

        let dir = self.entry_dir(key);
        let marker = self.marker_path(key);
        if dir.is_dir() && marker.is_file() {
            debug!("Tool cache hit for {key} at {}", dir.display());
            Some(dir)
        } else {
            debug!("Tool cache miss for {key} ({})", dir.display());
            None
        }
    }

    fn cache_dir(&self, source: &Path, key: &CacheKey) -> Result<PathBuf, SetupError> {
        if !source.is_dir() {
            return Err(SetupError::filesystem(
                "cache",
                source,
                &std::io::Error::new(std::io::ErrorKind::NotFound, "source is not a directory"),
            ));
        }

        let dest = self.entry_dir(key);
        let marker = self.marker_path(key);
        debug!("Caching {} as {key} in {}", source.display(), dest.display());

        if marker.exists() {
            std::fs::remove_file(&marker)
                .map_err(|error| SetupError::filesystem("remove marker", &marker, &error))?;
        }

        if is_same_dir(source, &dest) {
            debug!("Source already lives in the cache entry, skipping copy");
        } else {
            if dest.exists() {
                std::fs::remove_dir_all(&dest)
                    .map_err(|error| SetupError::filesystem("replace", &dest, &error))?;
            }
            copy_dir_recursive(source, &dest)?;
        }

        std::fs::write(&marker, b"")
            .map_err(|error| SetupError::filesystem("write marker", &marker, &error))?;

        Ok(dest)
    }
}

fn is_same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<(), SetupError> {
    std::fs::create_dir_all(dest)
        .map_err(|error| SetupError::filesystem("create directory", dest, &error))?;

    for entry in std::fs::read_dir(src)
        .map_err(|error| SetupError::filesystem("read directory", src, &error))?
    {
        let entry = entry.map_err(|error| SetupError::filesystem("read entry in", src, &error))?;
        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dest_path)?;
        } else {
            std::fs::copy(&src_path, &dest_path)
                .map_err(|error| SetupError::filesystem("copy", &src_path, &error))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(version: &str) -> CacheKey {
        CacheKey::new("pewbuild", version, "x64")
    }

    #[test]
    fn normalize_version_strips_v_only_for_semver() {
        assert_eq!(normalize_version("v1.2.3"), "1.2.3");
        assert_eq!(normalize_version("1.2.3"), "1.2.3");
        assert_eq!(normalize_version("v2.0.0-rc.1"), "2.0.0-rc.1");
        assert_eq!(normalize_version("v1.2"), "v1.2");
        assert_eq!(normalize_version("nightly"), "nightly");
    }

    #[test]
    fn find_misses_on_empty_cache() {
        let root = tempfile::tempdir().expect("temporary directory should be created");
        let cache = FsToolCache::new(root.path());

        assert!(cache.find(&key("v1.0.0")).is_none());
        assert!(cache.find(&key("")).is_none());
    }

    #[test]
    fn find_ignores_directories_without_marker() {
        let root = tempfile::tempdir().expect("temporary directory should be created");
        let cache = FsToolCache::new(root.path());
        std::fs::create_dir_all(cache.entry_dir(&key("v1.0.0"))).expect("entry dir");

        assert!(cache.find(&key("v1.0.0")).is_none());
    }

    #[test]
    fn cache_dir_copies_source_and_makes_entry_findable() {
        let root = tempfile::tempdir().expect("temporary directory should be created");
        let source = root.path().join("staging");
        std::fs::create_dir_all(source.join("nested")).expect("staging dir");
        std::fs::write(source.join("pewbuild.exe"), b"binary").expect("binary");
        std::fs::write(source.join("nested").join("README"), b"docs").expect("nested file");

        let cache = FsToolCache::new(root.path().join("cache"));
        let committed = cache
            .cache_dir(&source, &key("v1.4.0"))
            .expect("cache_dir should commit staging dir");

        assert_eq!(committed, root.path().join("cache/pewbuild/1.4.0/x64"));
        assert_eq!(
            std::fs::read(committed.join("pewbuild.exe")).expect("copied binary"),
            b"binary"
        );
        assert!(committed.join("nested").join("README").is_file());
        assert_eq!(cache.find(&key("v1.4.0")), Some(committed.clone()));
        assert_eq!(cache.find(&key("1.4.0")), Some(committed));
    }

    #[test]
    fn cache_dir_in_place_keeps_contents() {
        let root = tempfile::tempdir().expect("temporary directory should be created");
        let cache = FsToolCache::new(root.path());
        let entry = cache.entry_dir(&key("1.0.0"));
        std::fs::create_dir_all(&entry).expect("entry dir");
        std::fs::write(entry.join("pewbuild.exe"), b"in place").expect("binary");

        let committed = cache
            .cache_dir(&entry, &key("1.0.0"))
            .expect("in-place commit");

        assert_eq!(committed, entry);
        assert_eq!(
            std::fs::read(entry.join("pewbuild.exe")).expect("binary still present"),
            b"in place"
        );
        assert!(cache.find(&key("1.0.0")).is_some());
    }

    #[test]
    fn cache_dir_overwrites_previous_entry() {
        let root = tempfile::tempdir().expect("temporary directory should be created");
        let cache = FsToolCache::new(root.path().join("cache"));

        let first = root.path().join("first");
        std::fs::create_dir_all(&first).expect("first staging");
        std::fs::write(first.join("stale.txt"), b"old").expect("stale file");
        cache.cache_dir(&first, &key("v3.0.0")).expect("first commit");

        let second = root.path().join("second");
        std::fs::create_dir_all(&second).expect("second staging");
        std::fs::write(second.join("pewbuild.exe"), b"new").expect("new binary");
        let committed = cache.cache_dir(&second, &key("v3.0.0")).expect("second commit");

        assert!(!committed.join("stale.txt").exists());
        assert!(committed.join("pewbuild.exe").is_file());
    }

    #[test]
    fn cache_dir_rejects_missing_source() {
        let root = tempfile::tempdir().expect("temporary directory should be created");
        let cache = FsToolCache::new(root.path());

        let result = cache.cache_dir(&root.path().join("missing"), &key("v1.0.0"));

        assert!(matches!(
            result,
            Err(SetupError::Filesystem {
                kind: std::io::ErrorKind::NotFound,
                ..
            })
        ));
    }
}
