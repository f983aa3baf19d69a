use log::{debug, info};
use pewsetup_backend::{
    CacheKey, InstalledTool, OutputSink, ReleaseProvider, SetupError, ToolCache, VersionSpecifier,
};
use pewsetup_platform::{HostPlatform, SUPPORTED_OS, TOOL_ARCH};

use crate::fetch::fetch_asset;
use crate::install::Installer;
use crate::probe::find_cached;
use crate::resolve::resolve_version;
use crate::TOOL_NAME;

pub const OUTPUT_PATH: &str = "pewbuild-path";
pub const OUTPUT_VERSION: &str = "pewbuild-version";

/// Fail fast when the host cannot run pewbuild.
///
/// # Errors
/// Returns [`SetupError::UnsupportedPlatform`] for any host other than the
/// supported operating system.
pub fn check_platform(host: &HostPlatform) -> Result<(), SetupError> {
    if host.is_supported() {
        Ok(())
    } else {
        Err(SetupError::UnsupportedPlatform {
            supported: SUPPORTED_OS,
            current: host.os.clone(),
        })
    }
}

/// Cleanup phase of the step. Nothing is torn down yet.
pub fn run_cleanup() {
    debug!("Cleanup phase: nothing to clean up");
}

/// One setup run: resolve, probe the cache, install on a miss, publish.
pub struct Setup<'a> {
    provider: &'a dyn ReleaseProvider,
    cache: &'a dyn ToolCache,
    installer: Installer,
    host: HostPlatform,
}

impl<'a> Setup<'a> {
    #[must_use]
    pub fn new(
        provider: &'a dyn ReleaseProvider,
        cache: &'a dyn ToolCache,
        installer: Installer,
        host: HostPlatform,
    ) -> Self {
        Self {
            provider,
            cache,
            installer,
            host,
        }
    }

    /// Run the setup phase for the raw `version` input and publish the
    /// result to `sink`. Nothing is published unless every step succeeds.
    ///
    /// # Errors
    /// Returns the first error raised by the platform check, parsing,
    /// resolution, cache commit, download or publishing.
    pub async fn run(
        &self,
        raw_version: &str,
        sink: &mut dyn OutputSink,
    ) -> Result<InstalledTool, SetupError> {
        let tool = self.acquire(raw_version).await?;
        publish(&tool, sink)?;
        Ok(tool)
    }

    async fn acquire(&self, raw_version: &str) -> Result<InstalledTool, SetupError> {
        check_platform(&self.host)?;

        let spec = VersionSpecifier::parse(raw_version)?;
        info!("Setting up {TOOL_NAME} version: {spec}");

        let resolved = resolve_version(&spec, self.provider).await?;
        info!("Resolved version: {resolved}");

        let key = CacheKey::new(TOOL_NAME, resolved.as_str(), TOOL_ARCH);
        let dir = if let Some(dir) = find_cached(self.cache, &key) {
            dir
        } else {
            let asset = fetch_asset(self.provider, &resolved, self.installer.binary_name()).await?;
            self.installer
                .install(self.provider, self.cache, &asset, &key)
                .await?
        };

        Ok(InstalledTool {
            path: dir.join(self.installer.binary_name()),
            version: resolved,
        })
    }
}

/// Publish the binary path and version, and put the binary's directory on
/// the search path for later steps. Both outputs go out in a single batch.
///
/// # Errors
/// Returns an error if the sink rejects the outputs or the path entry.
pub fn publish(tool: &InstalledTool, sink: &mut dyn OutputSink) -> Result<(), SetupError> {
    let path = tool.path.display().to_string();
    sink.set_outputs(&[(OUTPUT_PATH, &path), (OUTPUT_VERSION, &tool.version)])?;
    if let Some(dir) = tool.path.parent() {
        sink.add_path(dir)?;
    }
    Ok(())
}
