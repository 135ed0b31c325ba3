//! Score and section extraction from semi-structured report text

use crate::report::content::{ContentNormalizer, RichText, SectionContent};
use crate::report::{AnalysisReport, ReportSection, SectionKind};
use log::debug;
use regex::Regex;

/// One way of finding the headline score. Extractors are tried in order and
/// the first one that yields a value in 0..=100 wins.
struct PercentageExtractor {
    name: &'static str,
    pattern: Regex,
}

impl PercentageExtractor {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("Invalid percentage regex"),
        }
    }

    fn extract(&self, text: &str) -> Option<u8> {
        self.pattern
            .captures_iter(text)
            .find_map(|caps| parse_percentage(caps.get(1)?.as_str()))
    }
}

fn parse_percentage(digits: &str) -> Option<u8> {
    digits.parse::<u8>().ok().filter(|n| *n <= 100)
}

pub struct ReportInterpreter {
    extractors: Vec<PercentageExtractor>,
    section_headers: Vec<(SectionKind, Regex)>,
    percent_token: Regex,
    normalizer: ContentNormalizer,
}

impl Default for ReportInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportInterpreter {
    pub fn new() -> Self {
        let extractors = vec![
            PercentageExtractor::new(
                "numbered header",
                r"(?i)###\s*1\.\s*Match Percentage:\s*\*\*(\d+)%?\*\*",
            ),
            PercentageExtractor::new("emphasized label", r"(?i)Match Percentage:\s*\*\*(\d+)%?\*\*"),
            PercentageExtractor::new("bare label", r"(?i)Match Percentage:\s*(?:\*\*)?\s*(\d+)%?"),
            PercentageExtractor::new("loose match", r"(?i)match.*?(\d+)%"),
        ];

        let section_headers = SectionKind::ALL
            .iter()
            .map(|kind| {
                let pattern = format!(
                    r"(?i)###\s*{}\.\s*{}:",
                    kind.number(),
                    kind.title().replace(' ', r"\s+")
                );
                (*kind, Regex::new(&pattern).expect("Invalid section header regex"))
            })
            .collect();

        let percent_token = Regex::new(r"(\d+)%").expect("Invalid percent regex");

        Self {
            extractors,
            section_headers,
            percent_token,
            normalizer: ContentNormalizer::new(),
        }
    }

    pub fn interpret(&self, raw: &str) -> AnalysisReport {
        let match_percentage = self.extract_match_percentage(raw);
        let sections = self.extract_sections(raw);
        debug!(
            "Interpreted report: {}% with {} section(s)",
            match_percentage,
            sections.len()
        );

        AnalysisReport {
            match_percentage,
            sections,
            raw_text: raw.to_string(),
        }
    }

    /// Headline score, or 0 when no extractor finds one
    pub fn extract_match_percentage(&self, raw: &str) -> u8 {
        self.extractors
            .iter()
            .enumerate()
            .find_map(|(i, extractor)| {
                extractor.extract(raw).map(|value| {
                    debug!("Match found with pattern {} ({}): {}", i + 1, extractor.name, value);
                    value
                })
            })
            .unwrap_or_else(|| {
                debug!("No match percentage found, defaulting to 0");
                0
            })
    }

    /// Present sections in header order; missing or empty ones are skipped
    pub fn extract_sections(&self, raw: &str) -> Vec<ReportSection> {
        self.section_headers
            .iter()
            .filter_map(|(kind, header)| {
                let body = Self::section_body(header, raw)?;
                let content = match kind {
                    SectionKind::MatchPercentage => self.percentage_content(body)?,
                    _ => self.normalizer.normalize(body)?,
                };
                Some(ReportSection::new(*kind, content))
            })
            .collect()
    }

    /// Text after the header up to the next `###` or the end of the report
    fn section_body<'a>(header: &Regex, raw: &'a str) -> Option<&'a str> {
        let start = header.find(raw)?.end();
        let rest = &raw[start..];
        let end = rest.find("###").unwrap_or(rest.len());
        Some(&rest[..end])
    }

    fn percentage_content(&self, body: &str) -> Option<SectionContent> {
        let digits = self.percent_token.captures(body)?.get(1)?.as_str();
        let value = parse_percentage(digits)?;
        Some(SectionContent::Paragraph(RichText::plain(format!("{}%", value))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FULL_REPORT: &str = "\
### 1. Match Percentage: **68%**

The resume covers most backend requirements.

### 2. Matching Skills:
* **Languages:** Python, SQL
* REST API design

### 3. Missing Skills:
* Kubernetes
* Terraform

### 4. Strengths:
Solid data engineering background.

### 5. Improvement Suggestions:
1. Quantify the impact of the ETL migration.
2. Mention any container orchestration exposure.
";

    fn item_texts(section: &ReportSection) -> Vec<String> {
        section
            .content
            .items()
            .unwrap_or_default()
            .iter()
            .map(RichText::to_plain)
            .collect()
    }

    #[test]
    fn test_full_report() {
        let report = ReportInterpreter::new().interpret(FULL_REPORT);
        assert_eq!(report.match_percentage, 68);

        let kinds: Vec<SectionKind> = report.sections.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, SectionKind::ALL.to_vec());

        let headline = report.section(SectionKind::MatchPercentage).unwrap();
        assert_eq!(
            headline.content,
            SectionContent::Paragraph(RichText::plain("68%"))
        );

        let missing = report.section(SectionKind::MissingSkills).unwrap();
        assert_eq!(item_texts(missing), vec!["Kubernetes", "Terraform"]);

        let strengths = report.section(SectionKind::Strengths).unwrap();
        assert!(matches!(strengths.content, SectionContent::Paragraph(_)));

        let suggestions = report.section(SectionKind::ImprovementSuggestions).unwrap();
        assert_eq!(item_texts(suggestions).len(), 2);
    }

    #[test]
    fn test_headline_example() {
        let raw = "### 1. Match Percentage: **73%**\n### 2. Matching Skills:\n* Python\n* SQL";
        let report = ReportInterpreter::new().interpret(raw);

        assert_eq!(report.match_percentage, 73);
        let skills: Vec<&ReportSection> = report
            .sections
            .iter()
            .filter(|s| s.title == "Matching Skills")
            .collect();
        assert_eq!(skills.len(), 1);
        assert_eq!(item_texts(skills[0]), vec!["Python", "SQL"]);
    }

    #[test]
    fn test_absent_sections_are_omitted() {
        let raw = "\
Overall the candidate is promising.
### 2. Matching Skills:
* Go
### 4. Strengths:
* Mentoring
";
        let report = ReportInterpreter::new().interpret(raw);
        let titles: Vec<&str> = report.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Matching Skills", "Strengths"]);
        assert!(report.sections.iter().all(|s| !s.content.is_empty()));
    }

    #[test]
    fn test_sections_keep_header_order() {
        let raw = "### 4. Strengths:\n* Ownership\n### 2. Matching Skills:\n* Rust\n";
        let report = ReportInterpreter::new().interpret(raw);
        let kinds: Vec<SectionKind> = report.sections.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SectionKind::MatchingSkills, SectionKind::Strengths]);
    }

    #[test]
    fn test_empty_section_is_omitted() {
        let raw = "### 3. Missing Skills:\n\n### 4. Strengths:\n* Curiosity";
        let report = ReportInterpreter::new().interpret(raw);
        assert!(report.section(SectionKind::MissingSkills).is_none());
        assert!(report.section(SectionKind::Strengths).is_some());
    }

    #[test]
    fn test_percentage_fallbacks() {
        let interpreter = ReportInterpreter::new();
        assert_eq!(interpreter.extract_match_percentage("Match Percentage: **56**"), 56);
        assert_eq!(interpreter.extract_match_percentage("match percentage: 41%"), 41);
        assert_eq!(interpreter.extract_match_percentage("Match Percentage: **88%**"), 88);
        assert_eq!(
            interpreter.extract_match_percentage("Overall match is roughly 64% for this role"),
            64
        );
        assert_eq!(
            interpreter.extract_match_percentage("### 1. Match Percentage (0-100): **77%**"),
            77
        );
    }

    #[test]
    fn test_earlier_pattern_wins() {
        let raw = "A loose match of 12% was noted.\n### 1. Match Percentage: **90%**";
        assert_eq!(ReportInterpreter::new().extract_match_percentage(raw), 90);
    }

    #[test]
    fn test_out_of_range_falls_through() {
        let raw = "Match Percentage: **250%**\nOverall match: 45%";
        assert_eq!(ReportInterpreter::new().extract_match_percentage(raw), 45);
    }

    #[test]
    fn test_no_percentage() {
        let raw = "The resume lists Python and SQL but no score was produced.";
        let report = ReportInterpreter::new().interpret(raw);
        assert_eq!(report.match_percentage, 0);
        assert!(report.sections.is_empty());
    }

    #[test]
    fn test_section_of_empty_emphasis_is_omitted() {
        let report = ReportInterpreter::new().interpret("### 4. Strengths:\n- **  **\n");
        assert!(report.sections.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let report = ReportInterpreter::new().interpret("");
        assert_eq!(report.match_percentage, 0);
        assert!(report.sections.is_empty());
    }

    proptest! {
        #[test]
        fn prop_emphasized_percentage_round_trips(n in 0u8..=100, prefix in "[A-Za-z ,.\n]{0,40}") {
            let raw = format!("{}Match Percentage: **{}%**\nMore text", prefix, n);
            prop_assert_eq!(ReportInterpreter::new().extract_match_percentage(&raw), n);
        }

        #[test]
        fn prop_no_digits_means_zero(text in "[A-Za-z #*:\n]{0,200}") {
            prop_assert_eq!(ReportInterpreter::new().extract_match_percentage(&text), 0);
        }

        #[test]
        fn prop_interpret_never_panics(text in "\\PC{0,300}") {
            let report = ReportInterpreter::new().interpret(&text);
            prop_assert!(report.match_percentage <= 100);
        }
    }
}
