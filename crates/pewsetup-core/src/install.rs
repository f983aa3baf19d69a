use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{debug, info};
use pewsetup_backend::{CacheKey, ReleaseAsset, ReleaseProvider, SetupError, ToolCache};
use sha2::{Digest, Sha256};

/// Downloads a release binary and commits it to the tool cache.
#[derive(Debug, Clone)]
pub struct Installer {
    scratch_dir: PathBuf,
    cache_root: PathBuf,
    binary_name: String,
}

impl Installer {
    #[must_use]
    pub fn new(
        scratch_dir: impl Into<PathBuf>,
        cache_root: impl Into<PathBuf>,
        binary_name: impl Into<String>,
    ) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
            cache_root: cache_root.into(),
            binary_name: binary_name.into(),
        }
    }

    #[must_use]
    pub fn binary_name(&self) -> &str {
        &self.binary_name
    }

    /// `<cache root>/<tool>/<version>/<arch>`, where the binary is placed
    /// before it is committed.
    #[must_use]
    pub fn tool_dir(&self, key: &CacheKey) -> PathBuf {
        self.cache_root
            .join(&key.tool)
            .join(&key.version)
            .join(&key.arch)
    }

    /// Download `asset`, install it as an executable and commit the
    /// directory to `cache` under `key`. Returns the committed directory.
    ///
    /// The downloaded temp file is left in the scratch directory on failure.
    ///
    /// # Errors
    /// Returns provider errors from the download, or filesystem errors from
    /// writing, copying, setting permissions or committing to the cache.
    pub async fn install(
        &self,
        provider: &dyn ReleaseProvider,
        cache: &dyn ToolCache,
        asset: &ReleaseAsset,
        key: &CacheKey,
    ) -> Result<PathBuf, SetupError> {
        let bytes = provider.download_asset(asset).await?;
        let download_path = self.write_download(&bytes).await?;
        debug!(
            "Downloaded {} bytes to {}",
            bytes.len(),
            download_path.display()
        );

        let tool_dir = self.tool_dir(key);
        tokio::fs::create_dir_all(&tool_dir)
            .await
            .map_err(|error| SetupError::filesystem("create", &tool_dir, &error))?;

        let final_path = tool_dir.join(&self.binary_name);
        tokio::fs::copy(&download_path, &final_path)
            .await
            .map_err(|error| SetupError::filesystem("copy download to", &final_path, &error))?;
        make_executable(&final_path).await?;

        info!(
            "Installed {} ({}) sha256 {}",
            self.binary_name,
            key.version,
            sha256_hex(&bytes)
        );

        let committed = cache.cache_dir(&tool_dir, key)?;
        info!(
            "Successfully installed {} {} to {}",
            key.tool,
            key.version,
            committed.display()
        );
        Ok(committed)
    }

    async fn write_download(&self, bytes: &[u8]) -> Result<PathBuf, SetupError> {
        tokio::fs::create_dir_all(&self.scratch_dir)
            .await
            .map_err(|error| SetupError::filesystem("create", &self.scratch_dir, &error))?;

        let path = self.scratch_dir.join(format!(
            "{}-{}",
            self.binary_name,
            Utc::now().timestamp_millis()
        ));
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|error| SetupError::filesystem("write download to", &path, &error))?;
        Ok(path)
    }
}

#[cfg(unix)]
async fn make_executable(path: &Path) -> Result<(), SetupError> {
    use std::os::unix::fs::PermissionsExt;

    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .await
        .map_err(|error| SetupError::filesystem("set permissions on", path, &error))
}

// Executability on Windows comes from the file extension.
#[cfg(not(unix))]
async fn make_executable(_path: &Path) -> Result<(), SetupError> {
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
