//! # Pretty Printers
//!
//! Formatting for transform results: four-space indented JSON and XML.
//! Text that cannot be formatted passes through untouched.

use crate::playground::events::HighlightMode;
use regex::Regex;
use serde::de::IgnoredAny;
use std::sync::OnceLock;

const INDENT: &str = "    ";

/// Signature of a pretty-printing function
pub type FormatFn = fn(&str) -> String;

/// The formatters applied to transform results, by detected mode
#[derive(Debug, Clone, Copy)]
pub struct Formatters {
    pub xml: FormatFn,
    pub json: FormatFn,
}

impl Formatters {
    /// Format `raw` for `mode`; plain text is returned as-is
    pub fn format(&self, mode: HighlightMode, raw: &str) -> String {
        match mode {
            HighlightMode::Xml => (self.xml)(raw),
            HighlightMode::Json => (self.json)(raw),
            HighlightMode::PlainText => raw.to_string(),
        }
    }
}

impl Default for Formatters {
    fn default() -> Self {
        Self {
            xml: format_xml,
            json: format_json,
        }
    }
}

/// Re-indent a JSON document
///
/// Only whitespace between tokens changes: keys keep their order and
/// duplicates, numbers and strings keep their exact text.
pub fn format_json(raw: &str) -> String {
    if let Err(e) = serde_json::from_str::<IgnoredAny>(raw) {
        tracing::debug!("Leaving JSON unformatted: {e}");
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len() * 2);
    let mut depth = 0usize;
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                out.push(c);
                while let Some(c) = chars.next() {
                    out.push(c);
                    match c {
                        '\\' => {
                            if let Some(escaped) = chars.next() {
                                out.push(escaped);
                            }
                        }
                        '"' => break,
                        _ => {}
                    }
                }
            }
            '{' | '[' => {
                out.push(c);
                while chars.next_if(|c| c.is_whitespace()).is_some() {}
                if let Some(close) = chars.next_if(|&c| matches!(c, '}' | ']')) {
                    out.push(close);
                } else {
                    depth += 1;
                    new_line(&mut out, depth);
                }
            }
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                new_line(&mut out, depth);
                out.push(c);
            }
            ',' => {
                out.push(c);
                new_line(&mut out, depth);
            }
            ':' => out.push_str(": "),
            c if c.is_whitespace() => {}
            c => out.push(c),
        }
    }
    out
}

fn new_line(out: &mut String, depth: usize) {
    out.push('\n');
    out.push_str(&INDENT.repeat(depth));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum XmlToken {
    /// `<name ...>`
    Open,
    /// `</name>`
    Close,
    /// Self-closing tags, declarations, comments, CDATA
    Standalone,
    Text,
}

fn xml_token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)<!--.*?-->|<!\[CDATA\[.*?\]\]>|<[^>]*>|[^<]+")
            .expect("XML token pattern is valid")
    })
}

/// Element name of an open or close tag
fn xml_tag_name(token: &str) -> &str {
    token
        .trim_start_matches('<')
        .trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .next()
        .unwrap_or_default()
}

/// Every close tag matches the innermost open one and none is left open
fn xml_is_balanced(tokens: &[(XmlToken, &str)]) -> bool {
    let mut open = Vec::new();
    for (kind, token) in tokens {
        match kind {
            XmlToken::Open => open.push(xml_tag_name(token)),
            XmlToken::Close => match open.pop() {
                Some(name) if !name.is_empty() && name == xml_tag_name(token) => {}
                _ => return false,
            },
            XmlToken::Standalone | XmlToken::Text => {}
        }
    }
    open.is_empty()
}

fn xml_token_kind(token: &str) -> XmlToken {
    if !token.starts_with('<') {
        XmlToken::Text
    } else if token.starts_with("</") {
        XmlToken::Close
    } else if token.starts_with("<?") || token.starts_with("<!") || token.ends_with("/>") {
        XmlToken::Standalone
    } else {
        XmlToken::Open
    }
}

/// Put each XML element on its own line, indented by nesting depth
///
/// An element whose only content is text stays on a single line. Markup whose
/// tags do not nest properly is returned unchanged.
pub fn format_xml(raw: &str) -> String {
    if !raw.contains('<') {
        return raw.to_string();
    }

    let tokens: Vec<(XmlToken, &str)> = xml_token_pattern()
        .find_iter(raw)
        .map(|m| m.as_str().trim())
        .filter(|token| !token.is_empty())
        .map(|token| (xml_token_kind(token), token))
        .collect();
    if !xml_is_balanced(&tokens) {
        tracing::debug!("Leaving XML unformatted: unbalanced tags");
        return raw.to_string();
    }

    let mut lines = Vec::with_capacity(tokens.len());
    let mut depth = 0usize;
    let kind_at = |index: usize| tokens.get(index).map(|(kind, _)| *kind);
    let mut i = 0;
    while i < tokens.len() {
        let (kind, token) = tokens[i];

        match kind {
            XmlToken::Open => {
                let text_only = kind_at(i + 1) == Some(XmlToken::Text)
                    && kind_at(i + 2) == Some(XmlToken::Close);
                if text_only {
                    lines.push(indented(depth, &[token, tokens[i + 1].1, tokens[i + 2].1]));
                    i += 3;
                    continue;
                }
                if kind_at(i + 1) == Some(XmlToken::Close) {
                    lines.push(indented(depth, &[token, tokens[i + 1].1]));
                    i += 2;
                    continue;
                }
                lines.push(indented(depth, &[token]));
                depth += 1;
            }
            XmlToken::Close => {
                depth = depth.saturating_sub(1);
                lines.push(indented(depth, &[token]));
            }
            XmlToken::Standalone | XmlToken::Text => lines.push(indented(depth, &[token])),
        }
        i += 1;
    }

    lines.join("\n")
}

fn indented(depth: usize, parts: &[&str]) -> String {
    let mut line = INDENT.repeat(depth);
    for part in parts {
        line.push_str(part);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_json_should_indent_with_four_spaces() {
        assert_eq!(
            format_json(r#"{"root":{"message":"hi","n":[1,2]}}"#),
            "{\n    \"root\": {\n        \"message\": \"hi\",\n        \"n\": [\n            1,\n            2\n        ]\n    }\n}"
        );
    }

    #[test]
    fn format_json_should_keep_key_order() {
        assert_eq!(format_json(r#"{"b":1,"a":2}"#), "{\n    \"b\": 1,\n    \"a\": 2\n}");
    }

    #[test]
    fn format_json_should_pass_through_invalid_text() {
        assert_eq!(format_json("{not json"), "{not json");
    }

    #[test]
    fn format_json_should_keep_number_text() {
        assert_eq!(
            format_json(r#"{"id":12345678901234567890123,"price":0.30000000000000004000001}"#),
            "{\n    \"id\": 12345678901234567890123,\n    \"price\": 0.30000000000000004000001\n}"
        );
    }

    #[test]
    fn format_json_should_keep_duplicate_keys() {
        assert_eq!(format_json(r#"{"a":1,"a":2}"#), "{\n    \"a\": 1,\n    \"a\": 2\n}");
    }

    #[test]
    fn format_json_should_leave_strings_alone() {
        assert_eq!(
            format_json(r#"{ "k" : "a, b: {\"c\"} [ ]" , "e" : [ ] , "o" : { } }"#),
            "{\n    \"k\": \"a, b: {\\\"c\\\"} [ ]\",\n    \"e\": [],\n    \"o\": {}\n}"
        );
    }

    #[test]
    fn format_json_should_keep_scalar_documents() {
        assert_eq!(format_json(" 42 "), "42");
    }

    #[test]
    fn format_xml_should_pass_through_unbalanced_markup() {
        assert_eq!(format_xml("<r>1 < 2</r>"), "<r>1 < 2</r>");
        assert_eq!(format_xml("<a><b></a>"), "<a><b></a>");
        assert_eq!(format_xml("</a><a>"), "</a><a>");
    }

    #[test]
    fn format_xml_should_keep_self_closing_root() {
        assert_eq!(format_xml("<a/>"), "<a/>");
    }

    #[test]
    fn format_xml_should_indent_nested_elements() {
        let raw = "<?xml version='1.0' encoding='UTF-8'?><root><message>hello world!</message><empty></empty><list><item/></list></root>";

        assert_eq!(
            format_xml(raw),
            "<?xml version='1.0' encoding='UTF-8'?>\n<root>\n    <message>hello world!</message>\n    <empty></empty>\n    <list>\n        <item/>\n    </list>\n</root>"
        );
    }

    #[test]
    fn format_xml_should_normalize_existing_whitespace() {
        let raw = "<root>\n      <a>1</a>\n</root>\n";

        assert_eq!(format_xml(raw), "<root>\n    <a>1</a>\n</root>");
    }

    #[test]
    fn format_xml_should_keep_comments_and_cdata_whole() {
        let raw = "<r><!-- a <b> c --><![CDATA[x < y]]></r>";

        assert_eq!(
            format_xml(raw),
            "<r>\n    <!-- a <b> c -->\n    <![CDATA[x < y]]>\n</r>"
        );
    }

    #[test]
    fn format_xml_should_pass_through_plain_text() {
        assert_eq!(format_xml("no markup here"), "no markup here");
    }

    #[test]
    fn formatters_should_pass_plain_text_through() {
        let formatters = Formatters::default();

        assert_eq!(
            formatters.format(HighlightMode::PlainText, "{\"a\":1}"),
            "{\"a\":1}"
        );
        assert_eq!(formatters.format(HighlightMode::Xml, "<a/>"), "<a/>");
    }
}
