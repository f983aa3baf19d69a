mod error;
mod traits;
mod types;

pub use error::{ProviderStage, SetupError};
pub use traits::{OutputSink, ReleaseProvider, ToolCache};
pub use types::{
    CacheKey, InstalledTool, RangeOp, ReleaseAsset, ReleaseDetail, ReleaseSummary,
    ReleaseVersion, VersionSpecifier,
};
