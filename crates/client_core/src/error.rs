//! Failures of a single analysis call and their mapping onto the user-facing taxonomy.

use shared::{
    domain::MalformedResponse,
    error::{FailureKind, FailureNotice},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analysis request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("analysis service returned status {status}")]
    Status { status: u16 },
    #[error(transparent)]
    Malformed(#[from] MalformedResponse),
}

impl AnalysisError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Http(_) | Self::Status { .. } => FailureKind::Transport,
            Self::Malformed(_) => FailureKind::MalformedResponse,
        }
    }

    /// Every failure collapses to the same banner text.
    pub fn user_message(&self) -> &'static str {
        shared::error::GENERIC_FAILURE_MESSAGE
    }

    pub fn to_notice(&self) -> FailureNotice {
        FailureNotice::new(self.kind(), self.user_message())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid api base url '{value}': {source}")]
    InvalidBaseUrl {
        value: String,
        source: url::ParseError,
    },
    #[error("api base url '{value}' must use http or https")]
    UnsupportedScheme { value: String },
}
