use log::info;
use pewsetup_backend::{ReleaseAsset, ReleaseDetail, ReleaseProvider, SetupError};

/// Fetch the manifest for `tag` and return the asset named `asset_name`.
///
/// # Errors
/// Returns provider errors (including a missing release) or
/// [`SetupError::AssetNotFound`] when the release has no such asset.
pub async fn fetch_asset(
    provider: &dyn ReleaseProvider,
    tag: &str,
    asset_name: &str,
) -> Result<ReleaseAsset, SetupError> {
    info!("Fetching release information for {tag}...");
    let release = provider.release_by_tag(tag).await?;
    locate_asset(&release, asset_name).cloned()
}

/// Exact, case-sensitive lookup of an asset by name.
///
/// # Errors
/// Returns [`SetupError::AssetNotFound`] listing the assets that do exist.
pub fn locate_asset<'a>(
    release: &'a ReleaseDetail,
    asset_name: &str,
) -> Result<&'a ReleaseAsset, SetupError> {
    release
        .assets
        .iter()
        .find(|asset| asset.name == asset_name)
        .ok_or_else(|| SetupError::AssetNotFound {
            asset: asset_name.to_string(),
            tag: release.tag.clone(),
            available: release.asset_names().join(", "),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockProvider;

    #[tokio::test]
    async fn returns_matching_asset_handle() {
        let provider = MockProvider::with_releases(&[])
            .with_release("v1.2.0", &["checksums.txt", "pewbuild.exe"]);

        let asset = fetch_asset(&provider, "v1.2.0", "pewbuild.exe")
            .await
            .expect("asset found");

        assert_eq!(asset.name, "pewbuild.exe");
        assert_eq!(asset.url, "https://api.example.test/assets/v1.2.0/pewbuild.exe");
        assert_eq!(provider.calls().by_tag, 1);
    }

    #[tokio::test]
    async fn name_match_is_case_sensitive_and_never_downloads() {
        let provider = MockProvider::with_releases(&[])
            .with_release("v1.2.0", &["PewBuild.exe", "pewbuild-linux"]);

        let result = fetch_asset(&provider, "v1.2.0", "pewbuild.exe").await;

        assert_eq!(
            result,
            Err(SetupError::AssetNotFound {
                asset: "pewbuild.exe".to_string(),
                tag: "v1.2.0".to_string(),
                available: "PewBuild.exe, pewbuild-linux".to_string(),
            })
        );
        assert_eq!(provider.calls().download, 0);
    }

    #[tokio::test]
    async fn unknown_exact_tag_fails_at_fetch_time() {
        let provider = MockProvider::with_releases(&[]);

        let result = fetch_asset(&provider, "v0.0.1", "pewbuild.exe").await;

        assert!(matches!(result, Err(SetupError::Provider { .. })));
    }
}
