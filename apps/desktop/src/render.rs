//! Plain-text rendering of analysis results for the terminal.

use client_core::view::{self, ExtractionPanel};
use shared::{
    domain::{AnalysisResult, RequestId},
    protocol::ServiceStatus,
};

pub fn status_line(status: &ServiceStatus) -> String {
    let service = status.service.as_deref().unwrap_or("analysis service");
    match status.message.as_deref() {
        Some(message) => format!("{service}: {} ({message})", status.status),
        None => format!("{service}: {}", status.status),
    }
}

pub fn analysis(request_id: RequestId, result: &AnalysisResult) -> String {
    let tags = if result.normalized_keywords.is_empty() {
        ExtractionPanel::NO_TAGS_TEXT.to_string()
    } else {
        result.normalized_keywords.join(", ")
    };
    let mut lines = vec![
        format!("Request {request_id}"),
        format!("Normalized crime tags: {tags}"),
    ];
    if !result.lemmas().is_empty() {
        lines.push(format!("Debug lemmas: {}", result.lemmas().join(" ")));
    }
    lines.push(String::new());
    lines.push(view::sections_summary(result.section_count()));

    for card in view::section_cards(result) {
        lines.push(String::new());
        lines.push(format!("{}  [{}]", card.header, card.key));
        lines.push(format!("  {}", card.title));
        if !card.badges.is_empty() {
            let badges: Vec<String> = card.badges.iter().map(ToString::to_string).collect();
            lines.push(format!("  {}", badges.join(" | ")));
        }
        if !card.snippet.is_empty() {
            lines.push(format!("  {}", card.snippet));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
