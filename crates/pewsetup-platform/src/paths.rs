use std::ffi::OsString;
use std::path::PathBuf;

use thiserror::Error;

const APP_DIR: &str = "setup-pewbuild";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RunnerPathsError {
    #[error("RUNNER_TOOL_CACHE is not set and no cache directory could be determined")]
    ToolCacheUnavailable,
}

/// Directories the runner hands to a job step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerPaths {
    /// Run-scoped scratch space, cleaned up by the runner.
    pub temp_dir: PathBuf,
    /// Root of the persistent tool cache.
    pub tool_cache_dir: PathBuf,
}

impl RunnerPaths {
    /// Read `RUNNER_TEMP` and `RUNNER_TOOL_CACHE`, falling back to local
    /// directories when running outside a runner.
    ///
    /// # Errors
    /// Returns an error when `RUNNER_TOOL_CACHE` is unset and the user cache
    /// directory cannot be determined.
    pub fn from_env() -> Result<Self, RunnerPathsError> {
        Self::from_vars(
            std::env::var_os("RUNNER_TEMP"),
            std::env::var_os("RUNNER_TOOL_CACHE"),
        )
    }

    fn from_vars(
        runner_temp: Option<OsString>,
        tool_cache: Option<OsString>,
    ) -> Result<Self, RunnerPathsError> {
        let temp_dir = non_empty(runner_temp)
            .map_or_else(|| std::env::temp_dir().join(APP_DIR), PathBuf::from);

        let tool_cache_dir = match non_empty(tool_cache) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::cache_dir()
                .ok_or(RunnerPathsError::ToolCacheUnavailable)?
                .join(APP_DIR)
                .join("tool-cache"),
        };

        Ok(Self {
            temp_dir,
            tool_cache_dir,
        })
    }
}

fn non_empty(value: Option<OsString>) -> Option<OsString> {
    value.filter(|v| !v.is_empty())
}
