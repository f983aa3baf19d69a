use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::SetupError;

const LATEST: &str = "latest";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeOp {
    /// `^X.Y`: any release with the same major version.
    Caret,
    /// `~X.Y`: any release with the same major and minor version.
    Tilde,
}

impl RangeOp {
    fn from_prefix(c: char) -> Option<Self> {
        match c {
            '^' => Some(Self::Caret),
            '~' => Some(Self::Tilde),
            _ => None,
        }
    }

    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Caret => '^',
            Self::Tilde => '~',
        }
    }
}

/// A parsed `version` input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionSpecifier {
    Exact { tag: String },
    Latest,
    Range { op: RangeOp, major: u64, minor: u64 },
}

impl VersionSpecifier {
    /// Parse a raw `version` input.
    ///
    /// # Errors
    /// Returns [`SetupError::MalformedRange`] when a `^`/`~` range does not
    /// start with two non-negative integer components.
    pub fn parse(raw: &str) -> Result<Self, SetupError> {
        raw.parse()
    }
}

impl FromStr for VersionSpecifier {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();

        if raw.is_empty() || raw == LATEST {
            return Ok(Self::Latest);
        }

        let mut chars = raw.chars();
        if let Some(op) = chars.next().and_then(RangeOp::from_prefix) {
            let mut parts = chars.as_str().split('.');
            let major = parse_range_component(raw, "major", parts.next())?;
            let minor = parse_range_component(raw, "minor", parts.next())?;
            return Ok(Self::Range { op, major, minor });
        }

        let tag = if raw.starts_with('v') {
            raw.to_string()
        } else {
            format!("v{raw}")
        };
        Ok(Self::Exact { tag })
    }
}

fn parse_range_component(
    input: &str,
    component: &'static str,
    value: Option<&str>,
) -> Result<u64, SetupError> {
    let value = value.ok_or_else(|| {
        SetupError::malformed_range(input, format!("missing {component} component"))
    })?;
    value.parse().map_err(|_| {
        SetupError::malformed_range(input, format!("invalid {component} component '{value}'"))
    })
}

impl fmt::Display for VersionSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact { tag } => write!(f, "{tag}"),
            Self::Latest => write!(f, "{LATEST}"),
            Self::Range { op, major, minor } => write!(f, "{}{major}.{minor}", op.symbol()),
        }
    }
}

/// The comparable `major.minor.patch` triple of a release tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReleaseVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl ReleaseVersion {
    #[must_use]
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Read a tag such as `v1.4.2`. Anything that is not exactly three
    /// integer components after an optional leading `v` yields `None`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.strip_prefix('v').unwrap_or(tag);
        let mut parts = tag.split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        let patch = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(major, minor, patch))
    }
}

impl Ord for ReleaseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
    }
}

impl PartialOrd for ReleaseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSummary {
    pub tag: String,
    pub version: Option<ReleaseVersion>,
}

impl ReleaseSummary {
    #[must_use]
    pub fn from_tag(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let version = ReleaseVersion::from_tag(&tag);
        Self { tag, version }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseAsset {
    pub name: String,
    /// Provider download handle for the asset content.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDetail {
    pub tag: String,
    pub assets: Vec<ReleaseAsset>,
}

impl ReleaseDetail {
    #[must_use]
    pub fn asset_names(&self) -> Vec<&str> {
        self.assets.iter().map(|asset| asset.name.as_str()).collect()
    }
}

/// Identifies one installed tool directory in the tool cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub tool: String,
    pub version: String,
    pub arch: String,
}

impl CacheKey {
    pub fn new(tool: impl Into<String>, version: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            version: version.into(),
            arch: arch.into(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.tool, self.version, self.arch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledTool {
    pub path: PathBuf,
    pub version: String,
}
