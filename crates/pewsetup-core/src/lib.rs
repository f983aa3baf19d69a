//! Version resolution and acquisition for the pewbuild setup step.
//!
//! This crate sequences the step independently of the concrete release
//! provider and tool cache:
//! - Resolving a version specifier to a release tag.
//! - Probing the tool cache for an installed copy.
//! - Locating and downloading the release asset on a miss.
//! - Installing and committing the binary into the tool cache.
//! - Publishing the binary path and version to later steps.

mod fetch;
mod install;
mod probe;
mod resolve;
mod setup;

#[cfg(test)]
mod testing;

pub use fetch::{fetch_asset, locate_asset};
pub use install::Installer;
pub use probe::find_cached;
pub use resolve::{RELEASE_PAGE_SIZE, resolve_version, select_matching};
pub use setup::{OUTPUT_PATH, OUTPUT_VERSION, Setup, check_platform, publish, run_cleanup};

/// GitHub owner of the pewbuild repository.
pub const REPO_OWNER: &str = "PlayEveryWare";
/// GitHub repository that publishes pewbuild releases.
pub const REPO_NAME: &str = "pewbuild";
/// Tool name used for tool cache entries.
pub const TOOL_NAME: &str = "pewbuild";
/// Release asset name, also the installed file name.
pub const BINARY_NAME: &str = "pewbuild.exe";
