use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("pewbuild is only supported on {supported}. Current platform: {current}")]
    UnsupportedPlatform {
        supported: &'static str,
        current: String,
    },

    #[error("Malformed version range '{input}': {reason}")]
    MalformedRange { input: String, reason: String },

    #[error("Release provider error during {operation} ({stage}): {details}")]
    Provider {
        operation: &'static str,
        stage: ProviderStage,
        details: String,
    },

    #[error("No release found matching version range {range}")]
    NoMatchingRelease { range: String },

    #[error("{asset} not found in release {tag} (available: {available})")]
    AssetNotFound {
        asset: String,
        tag: String,
        available: String,
    },

    #[error("Filesystem error while trying to {context} {path} ({kind}): {message}")]
    Filesystem {
        context: &'static str,
        path: String,
        kind: std::io::ErrorKind,
        message: String,
    },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderStage {
    #[error("request")]
    Request,
    #[error("response status")]
    Status,
    #[error("response parse")]
    ResponseParse,
}

impl SetupError {
    pub fn malformed_range(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRange {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn provider_request(operation: &'static str, details: impl Into<String>) -> Self {
        Self::Provider {
            operation,
            stage: ProviderStage::Request,
            details: details.into(),
        }
    }

    pub fn provider_request_from<E>(operation: &'static str, error: E) -> Self
    where
        E: std::fmt::Display,
    {
        Self::provider_request(operation, error.to_string())
    }

    pub fn provider_status(operation: &'static str, details: impl Into<String>) -> Self {
        Self::Provider {
            operation,
            stage: ProviderStage::Status,
            details: details.into(),
        }
    }

    pub fn provider_parse_from<E>(operation: &'static str, error: E) -> Self
    where
        E: std::fmt::Display,
    {
        Self::Provider {
            operation,
            stage: ProviderStage::ResponseParse,
            details: error.to_string(),
        }
    }

    pub fn filesystem(context: &'static str, path: &Path, error: &std::io::Error) -> Self {
        Self::Filesystem {
            context,
            path: path.display().to_string(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}
