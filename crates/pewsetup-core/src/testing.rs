use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pewsetup_backend::{
    CacheKey, OutputSink, ReleaseAsset, ReleaseDetail, ReleaseProvider, ReleaseSummary,
    SetupError, ToolCache,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProviderCalls {
    pub latest: usize,
    pub list: usize,
    pub by_tag: usize,
    pub download: usize,
}

impl ProviderCalls {
    pub fn total(self) -> usize {
        self.latest + self.list + self.by_tag + self.download
    }
}

#[derive(Default)]
pub struct MockProvider {
    tags: Vec<String>,
    details: HashMap<String, ReleaseDetail>,
    payload: Vec<u8>,
    failure: Option<SetupError>,
    calls: Mutex<ProviderCalls>,
    last_page_size: Mutex<Option<u8>>,
}

impl MockProvider {
    pub fn with_releases(tags: &[&str]) -> Self {
        Self {
            tags: tags.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    pub fn failing(error: SetupError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn with_release(mut self, tag: &str, assets: &[&str]) -> Self {
        let detail = ReleaseDetail {
            tag: tag.to_string(),
            assets: assets
                .iter()
                .map(|name| ReleaseAsset {
                    name: (*name).to_string(),
                    url: format!("https://api.example.test/assets/{tag}/{name}"),
                })
                .collect(),
        };
        self.details.insert(tag.to_string(), detail);
        self
    }

    pub fn with_payload(mut self, payload: &[u8]) -> Self {
        self.payload = payload.to_vec();
        self
    }

    pub fn calls(&self) -> ProviderCalls {
        *self.calls.lock().expect("calls lock")
    }

    pub fn last_page_size(&self) -> Option<u8> {
        *self.last_page_size.lock().expect("page size lock")
    }

    fn record(&self, update: impl FnOnce(&mut ProviderCalls)) -> Result<(), SetupError> {
        update(&mut self.calls.lock().expect("calls lock"));
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ReleaseProvider for MockProvider {
    async fn latest_release(&self) -> Result<ReleaseSummary, SetupError> {
        self.record(|calls| calls.latest += 1)?;
        self.tags
            .first()
            .map(|tag| ReleaseSummary::from_tag(tag.clone()))
            .ok_or_else(|| SetupError::provider_status("get latest release", "HTTP 404"))
    }

    async fn list_releases(&self, per_page: u8) -> Result<Vec<ReleaseSummary>, SetupError> {
        self.record(|calls| calls.list += 1)?;
        *self.last_page_size.lock().expect("page size lock") = Some(per_page);
        Ok(self
            .tags
            .iter()
            .take(usize::from(per_page))
            .map(|tag| ReleaseSummary::from_tag(tag.clone()))
            .collect())
    }

    async fn release_by_tag(&self, tag: &str) -> Result<ReleaseDetail, SetupError> {
        self.record(|calls| calls.by_tag += 1)?;
        self.details
            .get(tag)
            .cloned()
            .ok_or_else(|| SetupError::provider_status("get release by tag", "HTTP 404"))
    }

    async fn download_asset(&self, _asset: &ReleaseAsset) -> Result<Vec<u8>, SetupError> {
        self.record(|calls| calls.download += 1)?;
        Ok(self.payload.clone())
    }
}

#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<CacheKey, PathBuf>>,
    lookups: AtomicUsize,
    commits: AtomicUsize,
}

impl MemoryCache {
    pub fn with_entry(key: CacheKey, dir: PathBuf) -> Self {
        let cache = Self::default();
        cache.entries.lock().expect("entries lock").insert(key, dir);
        cache
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }
}

impl ToolCache for MemoryCache {
    fn find(&self, key: &CacheKey) -> Option<PathBuf> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().expect("entries lock").get(key).cloned()
    }

    fn cache_dir(&self, source: &Path, key: &CacheKey) -> Result<PathBuf, SetupError> {
        self.commits.fetch_add(1, Ordering::SeqCst);
        self.entries
            .lock()
            .expect("entries lock")
            .insert(key.clone(), source.to_path_buf());
        Ok(source.to_path_buf())
    }
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub outputs: Vec<(String, String)>,
    pub paths: Vec<PathBuf>,
    pub output_batches: usize,
    pub reject_outputs: Option<SetupError>,
}

impl OutputSink for RecordingSink {
    fn set_outputs(&mut self, outputs: &[(&str, &str)]) -> Result<(), SetupError> {
        if let Some(error) = &self.reject_outputs {
            return Err(error.clone());
        }
        self.output_batches += 1;
        self.outputs.extend(
            outputs
                .iter()
                .map(|(name, value)| ((*name).to_string(), (*value).to_string())),
        );
        Ok(())
    }

    fn add_path(&mut self, dir: &Path) -> Result<(), SetupError> {
        self.paths.push(dir.to_path_buf());
        Ok(())
    }
}
