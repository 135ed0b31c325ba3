//! Section body normalization: strong emphasis and list detection

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub strong: bool,
}

/// A line of report text with `**...**` emphasis lifted into strong spans
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RichText {
    pub spans: Vec<Span>,
}

impl RichText {
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::default();
        }
        Self {
            spans: vec![Span { text, strong: false }],
        }
    }

    pub fn to_plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Rebuild Markdown with `**` around strong spans
    pub fn to_markdown(&self) -> String {
        self.spans
            .iter()
            .map(|s| {
                if s.strong {
                    format!("**{}**", s.text)
                } else {
                    s.text.clone()
                }
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|s| s.text.trim().is_empty())
    }
}

impl fmt::Display for RichText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_plain())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SectionContent {
    Items(Vec<RichText>),
    Paragraph(RichText),
}

impl SectionContent {
    pub fn is_empty(&self) -> bool {
        match self {
            SectionContent::Items(items) => items.is_empty(),
            SectionContent::Paragraph(text) => text.is_empty(),
        }
    }

    pub fn items(&self) -> Option<&[RichText]> {
        match self {
            SectionContent::Items(items) => Some(items),
            SectionContent::Paragraph(_) => None,
        }
    }
}

pub struct ContentNormalizer {
    strong_regex: Regex,
    bullet_regex: Regex,
}

impl Default for ContentNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentNormalizer {
    pub fn new() -> Self {
        let strong_regex = Regex::new(r"\*\*(.+?)\*\*").expect("Invalid strong emphasis regex");

        // Bullet marker followed by whitespace, so `**bold**` lines are not bullets
        let bullet_regex = Regex::new(r"^(?:[*+\-•])\s+(.*)$").expect("Invalid bullet regex");

        Self {
            strong_regex,
            bullet_regex,
        }
    }

    /// Turn a captured section body into a list or a paragraph.
    /// Returns `None` when nothing but whitespace and empty emphasis was captured.
    pub fn normalize(&self, body: &str) -> Option<SectionContent> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return None;
        }

        let lines: Vec<&str> = trimmed
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let has_bullets = lines.iter().any(|line| self.bullet_regex.is_match(line));

        if has_bullets || lines.len() > 1 {
            let items = lines
                .iter()
                .map(|line| self.parse_inline(self.strip_bullet(line)))
                .filter(|item| !item.is_empty())
                .collect();
            return Self::non_empty(SectionContent::Items(items));
        }

        Self::non_empty(SectionContent::Paragraph(self.parse_inline(trimmed)))
    }

    fn non_empty(content: SectionContent) -> Option<SectionContent> {
        (!content.is_empty()).then_some(content)
    }

    fn strip_bullet<'a>(&self, line: &'a str) -> &'a str {
        match self.bullet_regex.captures(line).and_then(|caps| caps.get(1)) {
            Some(rest) => rest.as_str().trim(),
            None => line,
        }
    }

    pub fn parse_inline(&self, text: &str) -> RichText {
        let mut spans = Vec::new();
        let mut last = 0;

        for caps in self.strong_regex.captures_iter(text) {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if whole.start() > last {
                spans.push(Span {
                    text: text[last..whole.start()].to_string(),
                    strong: false,
                });
            }
            spans.push(Span {
                text: inner.as_str().to_string(),
                strong: true,
            });
            last = whole.end();
        }

        if last < text.len() {
            spans.push(Span {
                text: text[last..].to_string(),
                strong: false,
            });
        }

        RichText { spans }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_texts(content: &SectionContent) -> Vec<String> {
        content
            .items()
            .unwrap_or_default()
            .iter()
            .map(RichText::to_plain)
            .collect()
    }

    #[test]
    fn test_bullets_become_items() {
        let normalizer = ContentNormalizer::new();
        let content = normalizer.normalize("\n* Python\n* SQL\n").unwrap();
        assert_eq!(item_texts(&content), vec!["Python", "SQL"]);
    }

    #[test]
    fn test_mixed_bullet_markers() {
        let normalizer = ContentNormalizer::new();
        let content = normalizer.normalize("- Docker\n+ Kubernetes\n• Terraform").unwrap();
        assert_eq!(item_texts(&content), vec!["Docker", "Kubernetes", "Terraform"]);
    }

    #[test]
    fn test_plain_lines_become_items() {
        let normalizer = ContentNormalizer::new();
        let content = normalizer.normalize("Strong backend focus\n\nClear communication").unwrap();
        assert_eq!(
            item_texts(&content),
            vec!["Strong backend focus", "Clear communication"]
        );
    }

    #[test]
    fn test_single_line_is_paragraph() {
        let normalizer = ContentNormalizer::new();
        let content = normalizer.normalize("  Add metrics to each role.  ").unwrap();
        assert_eq!(
            content,
            SectionContent::Paragraph(RichText::plain("Add metrics to each role."))
        );
    }

    #[test]
    fn test_whitespace_body_is_none() {
        let normalizer = ContentNormalizer::new();
        assert!(normalizer.normalize(" \n\t\n").is_none());
    }

    #[test]
    fn test_strong_emphasis_spans() {
        let normalizer = ContentNormalizer::new();
        let text = normalizer.parse_inline("**Cloud:** AWS and **GCP** experience");
        assert_eq!(
            text.spans,
            vec![
                Span { text: "Cloud:".into(), strong: true },
                Span { text: " AWS and ".into(), strong: false },
                Span { text: "GCP".into(), strong: true },
                Span { text: " experience".into(), strong: false },
            ]
        );
        assert_eq!(text.to_markdown(), "**Cloud:** AWS and **GCP** experience");
    }

    #[test]
    fn test_bold_line_is_not_a_bullet() {
        let normalizer = ContentNormalizer::new();
        let content = normalizer.normalize("**Highlight your Rust work**").unwrap();
        match content {
            SectionContent::Paragraph(text) => {
                assert_eq!(text.to_plain(), "Highlight your Rust work");
                assert!(text.spans[0].strong);
            }
            other => panic!("expected paragraph, got {:?}", other),
        }
    }

    #[test]
    fn test_bullet_with_emphasis() {
        let normalizer = ContentNormalizer::new();
        let content = normalizer.normalize("*   **Languages:** Rust, Go").unwrap();
        let items = content.items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].to_markdown(), "**Languages:** Rust, Go");
    }

    #[test]
    fn test_empty_emphasis_is_no_content() {
        let normalizer = ContentNormalizer::new();
        assert!(normalizer.normalize("- **  **").is_none());
        assert!(normalizer.normalize("**   **").is_none());
        assert!(normalizer.normalize("-  **\t**\n*  ** **").is_none());
    }
}
