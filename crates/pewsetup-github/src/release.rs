use pewsetup_backend::{ReleaseAsset, ReleaseDetail, ReleaseSummary};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubAsset {
    pub name: String,
    /// API endpoint for the asset; serves the binary when requested with
    /// `Accept: application/octet-stream`.
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRelease {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<GitHubAsset>,
}

impl From<GitHubRelease> for ReleaseSummary {
    fn from(release: GitHubRelease) -> Self {
        ReleaseSummary::from_tag(release.tag_name)
    }
}

impl From<GitHubRelease> for ReleaseDetail {
    fn from(release: GitHubRelease) -> Self {
        ReleaseDetail {
            tag: release.tag_name,
            assets: release
                .assets
                .into_iter()
                .map(|asset| ReleaseAsset {
                    name: asset.name,
                    url: asset.url,
                })
                .collect(),
        }
    }
}
