//! Media type detection for resume uploads

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const PDF_MIME: &str = "application/pdf";
pub const DOC_MIME: &str = "application/msword";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    Pdf,
    Doc,
    Docx,
    Other(String),
}

impl MediaType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => MediaType::Pdf,
            "doc" => MediaType::Doc,
            "docx" => MediaType::Docx,
            other => MediaType::Other(other.to_string()),
        }
    }

    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => Self::from_extension(ext),
            None => MediaType::Other(String::new()),
        }
    }

    pub fn from_mime(mime: &str) -> Self {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_lowercase().as_str() {
            PDF_MIME => MediaType::Pdf,
            DOC_MIME => MediaType::Doc,
            DOCX_MIME => MediaType::Docx,
            _ => MediaType::Other(mime.to_string()),
        }
    }

    /// MIME type declared on the multipart file part
    pub fn mime(&self) -> &str {
        match self {
            MediaType::Pdf => PDF_MIME,
            MediaType::Doc => DOC_MIME,
            MediaType::Docx => DOCX_MIME,
            MediaType::Other(_) => "application/octet-stream",
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, MediaType::Other(_))
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Pdf => write!(f, "PDF"),
            MediaType::Doc => write!(f, "DOC"),
            MediaType::Docx => write!(f, "DOCX"),
            MediaType::Other(raw) if raw.is_empty() => write!(f, "unknown type"),
            MediaType::Other(raw) => write!(f, "{}", raw),
        }
    }
}
