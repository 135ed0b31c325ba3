//! Output formatters: console, JSON, Markdown and HTML renderings of a report

use crate::config::{OutputConfig, OutputFormat};
use crate::error::{AtsError, Result};
use crate::report::{
    classify, AnalysisReport, Classification, ReportSection, RichText, ScoreClass, SectionContent,
    Span,
};
use askama::Template;
use chrono::{DateTime, Utc};
use colored::{Color, Colorize};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Circumference of the HTML score ring (2 * pi * 90, rounded)
const RING_CIRCUMFERENCE: f32 = 565.0;

/// Facts about the run that produced a report
#[derive(Debug, Clone, Serialize)]
pub struct ReportContext {
    pub generated_at: DateTime<Utc>,
    pub resume_file: Option<String>,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_resume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_job_description: Option<String>,
}

impl ReportContext {
    pub fn new(resume_file: Option<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            resume_file,
            version: env!("CARGO_PKG_VERSION").to_string(),
            parsed_resume: None,
            parsed_job_description: None,
        }
    }

    fn generated_label(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}

/// Trait for formatting interpreted reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport, context: &ReportContext) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Colored terminal output
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Standalone HTML page modeled on the results modal
pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>ATS Analysis Results</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #2d3748;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f7fafc;
        }
        .results-content {
            background: white;
            padding: 30px;
            border-radius: 16px;
            box-shadow: 0 10px 40px rgba(0,0,0,0.1);
        }
        .results-header { text-align: center; margin-bottom: 20px; }
        .results-header h2 { color: #4a5568; margin-bottom: 4px; }
        .score-container { text-align: center; margin: 20px 0 30px; }
        .score-circle { position: relative; width: 200px; height: 200px; margin: 0 auto; }
        .score-text {
            position: absolute;
            top: 50%;
            left: 50%;
            transform: translate(-50%, -50%);
            display: flex;
            flex-direction: column;
        }
        .score-number { font-size: 3em; font-weight: bold; color: #667eea; }
        .score-label { color: #718096; }
        .score-status {
            display: inline-block;
            margin-top: 15px;
            padding: 8px 20px;
            border-radius: 20px;
            font-weight: bold;
            color: white;
        }
        .score-status.excellent { background: #38a169; }
        .score-status.good { background: #3182ce; }
        .score-status.fair { background: #d69e2e; }
        .score-status.poor { background: #e53e3e; }
        .result-section {
            margin: 15px 0;
            padding: 15px 20px;
            border-radius: 10px;
            border-left: 5px solid #667eea;
            background: #f8f9fa;
        }
        .result-section.highlight { border-left-color: #667eea; background: #eef2ff; }
        .result-section.success { border-left-color: #38a169; background: #f0fff4; }
        .result-section.warning { border-left-color: #e53e3e; background: #fff5f5; }
        .result-section.info { border-left-color: #3182ce; background: #ebf8ff; }
        .result-section.primary { border-left-color: #805ad5; background: #faf5ff; }
        .section-title { margin-top: 0; }
        ul { margin: 10px 0; }
        li { margin: 5px 0; }
        .metadata { margin-top: 30px; font-size: 0.9em; color: #718096; }
    </style>
    {% endif %}
</head>
<body>
    <div class="results-content">
        <div class="results-header">
            <h2>📈 ATS Analysis Results</h2>
            <p>Your resume compatibility score</p>
        </div>

        <div class="score-container">
            <div class="score-circle">
                <svg width="200" height="200" viewBox="0 0 200 200">
                    <circle cx="100" cy="100" r="90" fill="none" stroke="#e2e8f0" stroke-width="12"/>
                    <circle cx="100" cy="100" r="90" fill="none" stroke="url(#gradient)" stroke-width="12"
                            stroke-dasharray="{{ dash_length }} 565"
                            stroke-linecap="round"
                            transform="rotate(-90 100 100)"/>
                    <defs>
                        <linearGradient id="gradient" x1="0%" y1="0%" x2="100%" y2="100%">
                            <stop offset="0%" style="stop-color:#667eea;stop-opacity:1" />
                            <stop offset="100%" style="stop-color:#764ba2;stop-opacity:1" />
                        </linearGradient>
                    </defs>
                </svg>
                <div class="score-text">
                    <span class="score-number">{{ score }}</span>
                    <span class="score-label">ATS Score</span>
                </div>
            </div>
            <div class="score-status {{ score_class }}" data-icon="{{ score_icon }}">
                <span>{{ score_phrase }}</span>
            </div>
        </div>

        <div class="analysis-content">
            <div class="result-text">
            {% for section in sections %}
                <div class="result-section {{ section.category }}">
                    <h3 class="section-title">{{ section.icon }} {{ section.title }}</h3>
                    <div class="section-content">
                    {% if section.is_list %}
                        <ul>
                        {% for item in section.items %}
                            <li>{% for span in item %}{% if span.strong %}<strong>{{ span.text }}</strong>{% else %}{{ span.text }}{% endif %}{% endfor %}</li>
                        {% endfor %}
                        </ul>
                    {% else %}
                        <p>{% for span in section.paragraph %}{% if span.strong %}<strong>{{ span.text }}</strong>{% else %}{{ span.text }}{% endif %}{% endfor %}</p>
                    {% endif %}
                    </div>
                </div>
            {% endfor %}
            </div>
        </div>

        <div class="metadata">
            <p>Generated {{ generated_at }} by ATS Analyzer v{{ version }}{% if has_resume_file %} | Resume: {{ resume_file }}{% endif %}</p>
        </div>
    </div>
</body>
</html>"##, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    score: u8,
    dash_length: String,
    score_class: &'static str,
    score_icon: &'static str,
    score_phrase: &'static str,
    sections: Vec<HtmlSection>,
    generated_at: String,
    version: String,
    has_resume_file: bool,
    resume_file: String,
}

#[derive(Debug, Clone)]
struct HtmlSection {
    title: String,
    icon: &'static str,
    category: &'static str,
    is_list: bool,
    items: Vec<Vec<Span>>,
    paragraph: Vec<Span>,
}

impl HtmlSection {
    fn from_section(section: &ReportSection) -> Self {
        let (is_list, items, paragraph) = match &section.content {
            SectionContent::Items(items) => (
                true,
                items.iter().map(|item| item.spans.clone()).collect(),
                Vec::new(),
            ),
            SectionContent::Paragraph(text) => (false, Vec::new(), text.spans.clone()),
        };

        Self {
            title: section.title.clone(),
            icon: section.kind.icon(),
            category: section.category.as_str(),
            is_list,
            items,
            paragraph,
        }
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn score_color(class: ScoreClass) -> Color {
        match class {
            ScoreClass::Excellent => Color::Green,
            ScoreClass::Good => Color::BrightGreen,
            ScoreClass::Fair => Color::Yellow,
            ScoreClass::Poor => Color::Red,
        }
    }

    fn format_score_badge(&self, classification: &Classification) -> String {
        let badge = format!("{} {}", classification.class.emoji(), classification.phrase);
        if self.use_colors {
            format!("[{}]", badge.color(Self::score_color(classification.class)).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    /// 20-cell gauge of the score
    fn format_gauge(&self, score: u8, class: ScoreClass) -> String {
        let filled = ((score as usize * 20 + 50) / 100).min(20);
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled));
        self.colorize(&bar, Self::score_color(class))
    }

    fn format_rich(&self, text: &RichText) -> String {
        text.spans
            .iter()
            .map(|span| {
                if span.strong && self.use_colors {
                    span.text.bold().to_string()
                } else {
                    span.text.clone()
                }
            })
            .collect()
    }

    fn format_section(&self, section: &ReportSection) -> String {
        let mut output = self.format_header(&format!("{} {}", section.kind.icon(), section.title), 2);
        match &section.content {
            SectionContent::Items(items) => {
                for item in items {
                    output.push_str(&format!("  • {}\n", self.format_rich(item)));
                }
            }
            SectionContent::Paragraph(text) => {
                output.push_str(&format!("  {}\n", self.format_rich(text)));
            }
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport, context: &ReportContext) -> Result<String> {
        let mut output = String::new();
        let classification = report.classification();

        output.push_str(&self.format_header("📈 ATS ANALYSIS RESULTS", 1));
        output.push_str(&format!("Generated: {}", context.generated_label()));
        if let Some(resume) = &context.resume_file {
            output.push_str(&format!(" | Resume: {}", resume));
        }
        output.push('\n');

        output.push_str(&self.format_header("Your resume compatibility score", 2));
        output.push_str(&format!(
            "ATS Score: {}% {}\n",
            report.match_percentage,
            self.format_score_badge(&classification)
        ));
        output.push_str(&format!(
            "{}\n",
            self.format_gauge(report.match_percentage, classification.class)
        ));

        if report.sections.is_empty() {
            output.push_str(&format!(
                "\n{}\n",
                self.colorize("No structured sections were found in the analysis.", Color::Yellow)
            ));
        }

        for section in &report.sections {
            output.push_str(&self.format_section(section));
        }

        if self.detailed {
            if let Some(parsed) = &context.parsed_resume {
                output.push_str(&self.format_header("Parsed Resume", 3));
                output.push_str(parsed.trim());
                output.push('\n');
            }
            if let Some(parsed) = &context.parsed_job_description {
                output.push_str(&self.format_header("Parsed Job Description", 3));
                output.push_str(parsed.trim());
                output.push('\n');
            }
            output.push_str(&self.format_header("Raw Analysis", 3));
            output.push_str(report.raw_text.trim());
            output.push('\n');
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    match_percentage: u8,
    classification: Classification,
    sections: &'a [ReportSection],
    metadata: &'a ReportContext,
    raw_text: &'a str,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport, context: &ReportContext) -> Result<String> {
        let json = JsonReport {
            match_percentage: report.match_percentage,
            classification: classify(report.match_percentage),
            sections: &report.sections,
            metadata: context,
            raw_text: &report.raw_text,
        };

        if self.pretty {
            Ok(serde_json::to_string_pretty(&json)?)
        } else {
            Ok(serde_json::to_string(&json)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport, context: &ReportContext) -> Result<String> {
        let classification = report.classification();
        let mut output = String::new();

        output.push_str("# 📈 ATS Analysis Results\n\n");
        output.push_str(&format!(
            "**ATS Score:** {}% ({} {})\n\n",
            report.match_percentage,
            classification.class.emoji(),
            classification.phrase
        ));

        for section in &report.sections {
            output.push_str(&format!("## {} {}\n\n", section.kind.icon(), section.title));
            match &section.content {
                SectionContent::Items(items) => {
                    for item in items {
                        output.push_str(&format!("- {}\n", item.to_markdown()));
                    }
                }
                SectionContent::Paragraph(text) => {
                    output.push_str(&text.to_markdown());
                    output.push('\n');
                }
            }
            output.push('\n');
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated {} by ATS Analyzer v{}*\n",
                context.generated_label(),
                context.version
            ));
            if let Some(resume) = &context.resume_file {
                output.push_str(&format!("*Resume: {}*\n", resume));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &AnalysisReport, context: &ReportContext) -> HtmlTemplate {
        let classification = report.classification();

        HtmlTemplate {
            include_styles: self.include_styles,
            score: report.match_percentage,
            dash_length: format!(
                "{:.2}",
                report.match_percentage as f32 * RING_CIRCUMFERENCE / 100.0
            ),
            score_class: classification.label,
            score_icon: classification.icon,
            score_phrase: classification.phrase,
            sections: report.sections.iter().map(HtmlSection::from_section).collect(),
            generated_at: context.generated_label(),
            version: context.version.clone(),
            has_resume_file: context.resume_file.is_some(),
            resume_file: context.resume_file.clone().unwrap_or_default(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport, context: &ReportContext) -> Result<String> {
        let template_data = self.create_template_data(report, context);
        template_data
            .render()
            .map_err(|e| AtsError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn from_config(output: &OutputConfig) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(output.color_output, output.detailed),
            json_formatter: JsonFormatter::new(output.pretty_json),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(output.include_styles),
        }
    }

    pub fn generate_report(
        &self,
        report: &AnalysisReport,
        context: &ReportContext,
        format: OutputFormat,
    ) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report, context),
            OutputFormat::Json => self.json_formatter.format_report(report, context),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report, context),
            OutputFormat::Html => self.html_formatter.format_report(report, context),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();
    let base_name = if base_name.is_empty() { "resume".into() } else { base_name };

    let timestamp_suffix = if timestamp {
        format!("_{}", Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_ats_report{}.{}", base_name, timestamp_suffix, extension)
}

/// Where `--save` should write: the path itself, or a suggested file inside it
/// when it names an existing directory
pub fn resolve_save_path(target: &Path, format: OutputFormat, resume_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(suggest_filename(format, resume_name, true))
    } else {
        target.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::interpret;

    const RAW: &str = "### 1. Match Percentage: **73%**\n### 2. Matching Skills:\n* **Python** 3\n* SQL <joins>\n### 4. Strengths:\nClear ownership of data pipelines.";

    fn context() -> ReportContext {
        ReportContext::new(Some("jane_doe.pdf".to_string()))
    }

    #[test]
    fn test_console_plain_output() {
        let report = interpret(RAW);
        let output = ConsoleFormatter::new(false, false)
            .format_report(&report, &context())
            .unwrap();

        assert!(output.contains("ATS Score: 73% [👍 Good Match]"));
        assert!(output.contains("✅ Matching Skills"));
        assert!(output.contains("  • Python 3"));
        assert!(output.contains("Resume: jane_doe.pdf"));
        assert!(!output.contains("Raw Analysis"));
    }

    #[test]
    fn test_console_detailed_output() {
        let report = interpret(RAW);
        let mut ctx = context();
        ctx.parsed_resume = Some("* Python\n* Airflow".to_string());

        let output = ConsoleFormatter::new(false, true)
            .format_report(&report, &ctx)
            .unwrap();
        assert!(output.contains("Parsed Resume"));
        assert!(output.contains("* Airflow"));
        assert!(output.contains("Raw Analysis"));
        assert!(!output.contains("Parsed Job Description"));
    }

    #[test]
    fn test_console_gauge() {
        let formatter = ConsoleFormatter::new(false, false);
        assert_eq!(formatter.format_gauge(0, ScoreClass::Poor), "░".repeat(20));
        assert_eq!(formatter.format_gauge(100, ScoreClass::Excellent), "█".repeat(20));
        assert_eq!(formatter.format_gauge(50, ScoreClass::Fair).chars().filter(|c| *c == '█').count(), 10);
    }

    #[test]
    fn test_markdown_output() {
        let report = interpret(RAW);
        let output = MarkdownFormatter::new(false)
            .format_report(&report, &context())
            .unwrap();

        assert!(output.starts_with("# 📈 ATS Analysis Results"));
        assert!(output.contains("## ✅ Matching Skills\n\n- **Python** 3\n- SQL <joins>\n"));
        assert!(output.contains("## 💪 Strengths\n\nClear ownership of data pipelines.\n"));
        assert!(!output.contains("Generated"));
    }

    #[test]
    fn test_json_output() {
        let report = interpret(RAW);
        let output = JsonFormatter::new(false)
            .format_report(&report, &context())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["match_percentage"], 73);
        assert_eq!(value["classification"]["label"], "good");
        assert_eq!(value["sections"][1]["title"], "Matching Skills");
        assert_eq!(value["sections"][1]["category"], "success");
        assert_eq!(value["sections"][1]["content"]["kind"], "items");
        assert_eq!(value["metadata"]["resume_file"], "jane_doe.pdf");
    }

    #[test]
    fn test_html_output_escapes_text() {
        let report = interpret(RAW);
        let output = HtmlFormatter::new(false)
            .format_report(&report, &context())
            .unwrap();

        assert!(output.contains(r#"stroke-dasharray="412.45 565""#));
        assert!(output.contains(r#"<div class="score-status good""#));
        assert!(output.contains(r#"<div class="result-section success">"#));
        assert!(output.contains("<strong>Python</strong>"));
        assert!(output.contains("SQL &#60;joins&#62;"));
        assert!(!output.contains("<joins>"));
        assert!(!output.contains("<style>"));
    }

    #[test]
    fn test_html_without_sections() {
        let report = interpret("Nothing structured here.");
        let output = HtmlFormatter::new(true)
            .format_report(&report, &ReportContext::new(None))
            .unwrap();
        assert!(output.contains(r#"<span class="score-number">0</span>"#));
        assert!(output.contains("Needs Improvement"));
        assert!(!output.contains("result-section highlight"));
        assert!(!output.contains("Resume:"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::new();
        let report = interpret(RAW);
        let json = generator
            .generate_report(&report, &context(), OutputFormat::Json)
            .unwrap();
        assert!(json.contains("\"match_percentage\": 73"));
        assert_eq!(generator.html_formatter.supports_format(), OutputFormat::Html);
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(OutputFormat::Html, "cv/jane_doe.pdf", false),
            "jane_doe_ats_report.html"
        );
        assert_eq!(suggest_filename(OutputFormat::Markdown, "", false), "resume_ats_report.md");
        assert!(suggest_filename(OutputFormat::Json, "a.docx", true).ends_with(".json"));
    }

    #[test]
    fn test_save_and_resolve_path() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_save_path(dir.path(), OutputFormat::Markdown, "jane_doe.pdf");
        assert!(resolved.starts_with(dir.path()));
        assert!(resolved.to_string_lossy().ends_with(".md"));

        let explicit = dir.path().join("out").join("report.html");
        assert_eq!(resolve_save_path(&explicit, OutputFormat::Html, "x.pdf"), explicit);

        save_report_to_file("<html></html>", &explicit).unwrap();
        assert_eq!(std::fs::read_to_string(&explicit).unwrap(), "<html></html>");
    }
}
