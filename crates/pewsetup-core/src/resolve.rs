use log::{debug, info};
use pewsetup_backend::{
    RangeOp, ReleaseProvider, ReleaseSummary, ReleaseVersion, SetupError, VersionSpecifier,
};

/// Number of most recent releases considered when resolving a range. Older
/// releases are never matched.
pub const RELEASE_PAGE_SIZE: u8 = 100;

/// Resolve a parsed specifier to a concrete release tag.
///
/// Exact tags are returned without asking the provider; whether the release
/// exists is only checked once its manifest is fetched.
///
/// # Errors
/// Returns provider errors unchanged, or [`SetupError::NoMatchingRelease`]
/// when no listed release satisfies a range.
pub async fn resolve_version(
    spec: &VersionSpecifier,
    provider: &dyn ReleaseProvider,
) -> Result<String, SetupError> {
    match spec {
        VersionSpecifier::Latest => {
            let latest = provider.latest_release().await?;
            debug!("Latest release is {}", latest.tag);
            Ok(latest.tag)
        }
        VersionSpecifier::Exact { tag } => Ok(tag.clone()),
        VersionSpecifier::Range { op, major, minor } => {
            let releases = provider.list_releases(RELEASE_PAGE_SIZE).await?;
            info!(
                "Matching {spec} against {} recent releases",
                releases.len()
            );
            select_matching(&releases, *op, *major, *minor)
                .map(|release| release.tag.clone())
                .ok_or_else(|| SetupError::NoMatchingRelease {
                    range: spec.to_string(),
                })
        }
    }
}

/// Pick the highest release satisfying `op major.minor`. Releases without a
/// plain three-part version never match. On equal versions the earlier entry
/// wins.
#[must_use]
pub fn select_matching(
    releases: &[ReleaseSummary],
    op: RangeOp,
    major: u64,
    minor: u64,
) -> Option<&ReleaseSummary> {
    let mut best: Option<(ReleaseVersion, &ReleaseSummary)> = None;

    for release in releases {
        let Some(version) = release.version else {
            debug!("Skipping release {} (not a three-part version)", release.tag);
            continue;
        };
        if !matches_range(version, op, major, minor) {
            continue;
        }
        if best.is_none_or(|(current, _)| version > current) {
            best = Some((version, release));
        }
    }

    best.map(|(_, release)| release)
}

fn matches_range(version: ReleaseVersion, op: RangeOp, major: u64, minor: u64) -> bool {
    match op {
        RangeOp::Caret => version.major == major,
        RangeOp::Tilde => version.major == major && version.minor == minor,
    }
}
