//! # Content Sniffing
//!
//! Classifies a content-type string, or a declaration line in a template,
//! as XML, JSON or neither. Matching is a case-sensitive substring test and
//! "xml" wins over "json".

use crate::playground::events::HighlightMode;

/// Classify a MIME type or a free-text declaration
pub fn classify(declaration: &str) -> HighlightMode {
    if declaration.contains("xml") {
        HighlightMode::Xml
    } else if declaration.contains("json") {
        HighlightMode::Json
    } else {
        HighlightMode::PlainText
    }
}

/// Find the line of a template that declares the input payload type
///
/// The first line that starts with `input` and mentions `payload`, e.g.
/// `input payload application/json`.
pub fn payload_declaration(template: &str) -> Option<&str> {
    template
        .lines()
        .find(|line| line.starts_with("input") && line.contains("payload"))
}

/// Infer the Input pane mode from a template
///
/// Returns `None` when the template has no payload declaration.
pub fn classify_payload_declaration(template: &str) -> Option<HighlightMode> {
    payload_declaration(template).map(classify)
}
