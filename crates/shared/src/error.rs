use serde::{Deserialize, Serialize};

/// User-facing text for every failed analysis, whatever the cause.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Server error. Please verify the analysis service is running.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Network failure or a non-2xx status.
    Transport,
    /// A 2xx body without usable `normalized_keywords`/`sections` arrays.
    MalformedResponse,
}

/// What the UI keeps when a request fails: a banner message plus the kind for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureNotice {
    pub kind: FailureKind,
    pub message: String,
}

impl FailureNotice {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        };
        Self { kind, message }
    }

    pub fn generic(kind: FailureKind) -> Self {
        Self::new(kind, GENERIC_FAILURE_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_message_is_replaced_with_generic_text() {
        let notice = FailureNotice::new(FailureKind::Transport, "   ");
        assert_eq!(notice.message, GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn kind_serializes_as_snake_case() {
        let json = serde_json::to_string(&FailureKind::MalformedResponse).expect("serialize");
        assert_eq!(json, "\"malformed_response\"");
    }
}
