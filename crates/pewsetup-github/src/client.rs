use std::fmt;

use async_trait::async_trait;
use log::{debug, info};
use pewsetup_backend::{ReleaseAsset, ReleaseDetail, ReleaseProvider, ReleaseSummary, SetupError};
use reqwest::Url;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use serde::de::DeserializeOwned;

use crate::release::GitHubRelease;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("setup-pewbuild/", env!("CARGO_PKG_VERSION"));
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";
const JSON_ACCEPT: &str = "application/vnd.github+json";
const BINARY_ACCEPT: &str = "application/octet-stream";

/// Release provider for one GitHub repository, authenticated with a token.
#[derive(Clone)]
pub struct GitHubReleaseProvider {
    client: reqwest::Client,
    api_url: String,
    owner: String,
    repo: String,
    token: String,
}

impl fmt::Debug for GitHubReleaseProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubReleaseProvider")
            .field("api_url", &self.api_url)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &"***")
            .finish_non_exhaustive()
    }
}

impl GitHubReleaseProvider {
    /// Create a provider for `owner/repo` against the public GitHub API.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, SetupError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|error| SetupError::provider_request_from("build http client", error))?;

        Ok(Self {
            client,
            api_url: DEFAULT_API_URL.to_string(),
            owner: owner.into(),
            repo: repo.into(),
            token: token.into(),
        })
    }

    /// Point the provider at another API root, for example a GitHub
    /// Enterprise Server instance.
    #[must_use]
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        let trimmed = api_url.trim().trim_end_matches('/');
        if !trimmed.is_empty() {
            self.api_url = trimmed.to_string();
        }
        self
    }

    /// `{api}/repos/{owner}/{repo}/releases` followed by `segments`, each
    /// percent-encoded as a single path segment.
    fn releases_url(&self, segments: &[&str]) -> Result<Url, SetupError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|error| SetupError::provider_request_from("build request url", error))?;
        url.path_segments_mut()
            .map_err(|()| {
                SetupError::provider_request(
                    "build request url",
                    format!("{} cannot be used as an API root", self.api_url),
                )
            })?
            .pop_if_empty()
            .extend(["repos", self.owner.as_str(), self.repo.as_str(), "releases"])
            .extend(segments);
        Ok(url)
    }

    fn request(&self, url: &str, accept: &'static str) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, HeaderValue::from_static(accept))
            .header(API_VERSION_HEADER, API_VERSION);
        if !self.token.is_empty() {
            request = request.header(AUTHORIZATION, format!("Bearer {}", self.token));
        }
        request
    }

    async fn send(
        &self,
        operation: &'static str,
        url: &str,
        accept: &'static str,
    ) -> Result<reqwest::Response, SetupError> {
        debug!("GET {url} ({operation})");
        let response = self
            .request(url, accept)
            .send()
            .await
            .map_err(|error| SetupError::provider_request_from(operation, error))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_snippet = response
                .text()
                .await
                .ok()
                .map(|body| response_snippet(&body, 160))
                .unwrap_or_default();
            return Err(SetupError::provider_status(
                operation,
                format!("HTTP {status} for {url}{body_snippet}"),
            ));
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: &str,
    ) -> Result<T, SetupError> {
        self.send(operation, url, JSON_ACCEPT)
            .await?
            .json()
            .await
            .map_err(|error| SetupError::provider_parse_from(operation, error))
    }
}

fn response_snippet(body: &str, max_chars: usize) -> String {
    let snippet: String = body.trim().chars().take(max_chars).collect();
    if snippet.is_empty() {
        String::new()
    } else {
        format!(": {snippet}")
    }
}

#[async_trait]
impl ReleaseProvider for GitHubReleaseProvider {
    async fn latest_release(&self) -> Result<ReleaseSummary, SetupError> {
        let url = self.releases_url(&["latest"])?;
        let release: GitHubRelease = self.get_json("get latest release", url.as_str()).await?;
        Ok(release.into())
    }

    async fn list_releases(&self, per_page: u8) -> Result<Vec<ReleaseSummary>, SetupError> {
        let mut url = self.releases_url(&[])?;
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string());
        let releases: Vec<GitHubRelease> = self.get_json("list releases", url.as_str()).await?;
        debug!("Listed {} releases", releases.len());
        Ok(releases.into_iter().map(Into::into).collect())
    }

    async fn release_by_tag(&self, tag: &str) -> Result<ReleaseDetail, SetupError> {
        let url = self.releases_url(&["tags", tag])?;
        let release: GitHubRelease = self.get_json("get release by tag", url.as_str()).await?;
        Ok(release.into())
    }

    async fn download_asset(&self, asset: &ReleaseAsset) -> Result<Vec<u8>, SetupError> {
        info!("Downloading {} from {}", asset.name, asset.url);
        let bytes = self
            .send("download asset", &asset.url, BINARY_ACCEPT)
            .await?
            .bytes()
            .await
            .map_err(|error| SetupError::provider_request_from("download asset", error))?;
        info!("Download complete: {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}
