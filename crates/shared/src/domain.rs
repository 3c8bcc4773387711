use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Statute assumed when a section arrives without an `act_name`.
pub const DEFAULT_ACT_NAME: &str = "BNS";

/// Monotonic counter distinguishing successive submission attempts.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RequestId(pub u64);

impl RequestId {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalSection {
    pub section_id: String,
    pub section_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub act_name: Option<String>,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_offence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity_level: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub victim_type: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_sexual_offence: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_property_offence: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_weapon: bool,
    /// Dataset row id, diagnostic only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_core_offence: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipc_equivalent: Option<String>,
}

impl LegalSection {
    /// Act name for display, falling back to [`DEFAULT_ACT_NAME`] when absent or blank.
    pub fn act_label(&self) -> &str {
        self.act_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_ACT_NAME)
    }
}

#[derive(Debug, Error)]
#[error("malformed analysis response: {0}")]
pub struct MalformedResponse(#[from] pub serde_json::Error);

/// Immutable snapshot of one successful analysis.
///
/// `normalized_keywords` and `sections` are required and must be arrays; every
/// other field tolerates absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub normalized_keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemmas: Option<Vec<String>>,
    pub sections: Vec<LegalSection>,
}

impl AnalysisResult {
    pub fn from_json(body: &str) -> Result<Self, MalformedResponse> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn from_slice(body: &[u8]) -> Result<Self, MalformedResponse> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Lemmas as a slice; absent and empty look the same here.
    pub fn lemmas(&self) -> &[String] {
        self.lemmas.as_deref().unwrap_or_default()
    }

    pub fn tag_count(&self) -> usize {
        self.normalized_keywords.len()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn has_sections(&self) -> bool {
        !self.sections.is_empty()
    }
}
