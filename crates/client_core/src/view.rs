//! Read-only display projections over an [`AnalysisResult`].
//!
//! Nothing here mutates or caches the result; every call derives fresh values.

use std::{borrow::Cow, fmt};

use shared::domain::{AnalysisResult, LegalSection};

use crate::orchestrator::{RequestOrchestrator, RequestPhase};

/// Characters of statutory text shown on a section card.
pub const SNIPPET_LIMIT: usize = 260;
pub const ELLIPSIS: &str = "...";
pub const SEVERITY_SCALE_MAX: i32 = 5;

/// Prefix of `text` limited to `limit` characters, with [`ELLIPSIS`] appended when cut.
pub fn truncate_chars(text: &str, limit: usize) -> Cow<'_, str> {
    match text.char_indices().nth(limit) {
        None => Cow::Borrowed(text),
        Some((cut, _)) => Cow::Owned(format!("{}{ELLIPSIS}", &text[..cut])),
    }
}

pub fn truncated_text(section: &LegalSection, limit: usize) -> Cow<'_, str> {
    truncate_chars(&section.full_text, limit)
}

/// Underscores in taxonomy tags read as spaces.
pub fn display_label(raw_tag: &str) -> String {
    raw_tag.replace('_', " ")
}

pub fn severity_fraction(level: i32) -> String {
    format!("{level}/{SEVERITY_SCALE_MAX}")
}

pub fn sections_summary(count: usize) -> String {
    if count == 1 {
        "1 section suggested".to_string()
    } else {
        format!("{count} sections suggested")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Badge {
    Offence(String),
    Subtype(String),
    Severity(i32),
    SexualOffence,
    PropertyOffence,
    Weapon,
    Victims(String),
    IpcEquivalent(String),
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offence(label) | Self::Subtype(label) => f.write_str(label),
            Self::Severity(level) => write!(f, "Severity: {}", severity_fraction(*level)),
            Self::SexualOffence => f.write_str("Sexual offence"),
            Self::PropertyOffence => f.write_str("Property offence"),
            Self::Weapon => f.write_str("Weapon involved"),
            Self::Victims(victims) => write!(f, "Victim: {victims}"),
            Self::IpcEquivalent(section) => write!(f, "IPC {section}"),
        }
    }
}

/// Metadata chips for a section, in display order.
pub fn section_badges(section: &LegalSection) -> Vec<Badge> {
    let mut badges = Vec::new();

    if let Some(offence) = non_blank(section.primary_offence.as_deref()) {
        badges.push(Badge::Offence(display_label(offence)));
    }
    if let Some(subtype) = non_blank(section.subtype.as_deref()) {
        badges.push(Badge::Subtype(display_label(subtype)));
    }
    if let Some(level) = section.severity_level {
        badges.push(Badge::Severity(level));
    }
    if section.is_sexual_offence {
        badges.push(Badge::SexualOffence);
    }
    if section.is_property_offence {
        badges.push(Badge::PropertyOffence);
    }
    if section.has_weapon {
        badges.push(Badge::Weapon);
    }
    if !section.victim_type.is_empty() {
        badges.push(Badge::Victims(section.victim_type.join(", ")));
    }
    if let Some(ipc) = non_blank(section.ipc_equivalent.as_deref()) {
        badges.push(Badge::IpcEquivalent(ipc.to_string()));
    }

    badges
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionCard<'a> {
    pub key: &'a str,
    pub header: String,
    pub title: &'a str,
    pub badges: Vec<Badge>,
    pub snippet: Cow<'a, str>,
}

impl<'a> SectionCard<'a> {
    pub fn from_section(section: &'a LegalSection) -> Self {
        Self {
            key: &section.section_id,
            header: format!(
                "{} · Section {}",
                section.act_label(),
                section.section_number
            ),
            title: &section.title,
            badges: section_badges(section),
            snippet: truncated_text(section, SNIPPET_LIMIT),
        }
    }
}

pub fn section_cards(result: &AnalysisResult) -> Vec<SectionCard<'_>> {
    result.sections.iter().map(SectionCard::from_section).collect()
}

/// What the tag/lemma panel shows for the current lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionPanel<'a> {
    Loading,
    Placeholder,
    Extracted {
        tags: &'a [String],
        lemmas: &'a [String],
    },
}

impl ExtractionPanel<'_> {
    pub const LOADING_TEXT: &'static str = "Understanding incident text...";
    pub const PLACEHOLDER_TEXT: &'static str =
        "Tags and lemmas will appear here after you analyze an incident.";
    pub const NO_TAGS_TEXT: &'static str = "No tags detected yet.";
}

pub fn extraction_panel(orchestrator: &RequestOrchestrator) -> ExtractionPanel<'_> {
    if orchestrator.phase() == RequestPhase::Pending {
        return ExtractionPanel::Loading;
    }
    match orchestrator.result() {
        Some(result) => ExtractionPanel::Extracted {
            tags: &result.normalized_keywords,
            lemmas: result.lemmas(),
        },
        None => ExtractionPanel::Placeholder,
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
