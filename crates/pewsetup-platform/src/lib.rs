mod commands;
mod host;
mod paths;
mod tool_cache;

pub use commands::{WorkflowCommands, error_annotation};
pub use host::{HostPlatform, SUPPORTED_OS, TOOL_ARCH};
pub use paths::{RunnerPaths, RunnerPathsError};
pub use tool_cache::FsToolCache;
