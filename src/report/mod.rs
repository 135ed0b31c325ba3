//! Interpretation of the free-text ATS report returned by the analysis service

pub mod classify;
pub mod content;
pub mod interpreter;

pub use classify::{classify, Classification, ScoreClass};
pub use content::{RichText, SectionContent, Span};
pub use interpreter::ReportInterpreter;

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five numbered sections the analysis service is prompted to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    MatchPercentage,
    MatchingSkills,
    MissingSkills,
    Strengths,
    ImprovementSuggestions,
}

impl SectionKind {
    pub const ALL: [SectionKind; 5] = [
        SectionKind::MatchPercentage,
        SectionKind::MatchingSkills,
        SectionKind::MissingSkills,
        SectionKind::Strengths,
        SectionKind::ImprovementSuggestions,
    ];

    /// Header number used in `### <n>. <title>:`
    pub fn number(&self) -> u8 {
        match self {
            SectionKind::MatchPercentage => 1,
            SectionKind::MatchingSkills => 2,
            SectionKind::MissingSkills => 3,
            SectionKind::Strengths => 4,
            SectionKind::ImprovementSuggestions => 5,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::MatchPercentage => "Match Percentage",
            SectionKind::MatchingSkills => "Matching Skills",
            SectionKind::MissingSkills => "Missing Skills",
            SectionKind::Strengths => "Strengths",
            SectionKind::ImprovementSuggestions => "Improvement Suggestions",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SectionKind::MatchPercentage => "📊",
            SectionKind::MatchingSkills => "✅",
            SectionKind::MissingSkills => "❌",
            SectionKind::Strengths => "💪",
            SectionKind::ImprovementSuggestions => "💡",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            SectionKind::MatchPercentage => Category::Highlight,
            SectionKind::MatchingSkills => Category::Success,
            SectionKind::MissingSkills => Category::Warning,
            SectionKind::Strengths => Category::Info,
            SectionKind::ImprovementSuggestions => Category::Primary,
        }
    }
}

/// Presentation tag attached to each section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Highlight,
    Success,
    Warning,
    Info,
    Primary,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Highlight => "highlight",
            Category::Success => "success",
            Category::Warning => "warning",
            Category::Info => "info",
            Category::Primary => "primary",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    pub kind: SectionKind,
    pub title: String,
    pub category: Category,
    pub content: SectionContent,
}

impl ReportSection {
    pub fn new(kind: SectionKind, content: SectionContent) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            category: kind.category(),
            content,
        }
    }
}

/// Best-effort structured view of one raw report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub match_percentage: u8,
    pub sections: Vec<ReportSection>,
    pub raw_text: String,
}

impl AnalysisReport {
    pub fn classification(&self) -> Classification {
        classify(self.match_percentage)
    }

    pub fn section(&self, kind: SectionKind) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

/// Interpret a raw report with the default patterns
pub fn interpret(raw: &str) -> AnalysisReport {
    ReportInterpreter::new().interpret(raw)
}
