use serde::{Deserialize, Serialize};

/// Body of `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

impl AnalyzeRequest {
    /// Builds a request from raw input, or `None` when nothing is left after trimming.
    pub fn from_input(input: &str) -> Option<Self> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
        })
    }
}

/// Body of `GET /` on the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ServiceStatus {
    pub fn is_running(&self) -> bool {
        self.status.eq_ignore_ascii_case("running")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_input_and_rejects_blank() {
        assert_eq!(
            AnalyzeRequest::from_input("  A man stole a phone.\n"),
            Some(AnalyzeRequest {
                text: "A man stole a phone.".into()
            })
        );
        assert_eq!(AnalyzeRequest::from_input(""), None);
        assert_eq!(AnalyzeRequest::from_input(" \t\n"), None);
    }

    #[test]
    fn request_body_is_a_single_text_field() {
        let body = serde_json::to_value(AnalyzeRequest { text: "x".into() }).expect("serialize");
        assert_eq!(body, serde_json::json!({ "text": "x" }));
    }

    #[test]
    fn status_tolerates_missing_descriptive_fields() {
        let status: ServiceStatus =
            serde_json::from_str(r#"{"status":"running"}"#).expect("parse");
        assert!(status.is_running());
        assert_eq!(status.service, None);
    }
}
