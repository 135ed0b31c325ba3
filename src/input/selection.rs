//! The resume file picked by the user and the checks it must pass before upload

use crate::error::{AtsError, Result};
use crate::input::file_detector::MediaType;
use bytes::Bytes;
use std::path::Path;
use tokio::fs;

/// 5 MiB, the largest resume the analysis service accepts
pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct SelectedFile {
    name: String,
    media_type: MediaType,
    data: Bytes,
}

impl SelectedFile {
    pub fn from_bytes(name: impl Into<String>, media_type: MediaType, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            media_type,
            data: data.into(),
        }
    }

    /// Read a file from disk. The media type comes from `declared_mime` when
    /// given, otherwise from the file extension. With `max_bytes` set, type
    /// and size are checked against the file's metadata before any bytes are read.
    pub async fn from_path(
        path: &Path,
        declared_mime: Option<&str>,
        max_bytes: Option<u64>,
    ) -> Result<Self> {
        if !path.exists() {
            return Err(AtsError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let media_type = match declared_mime {
            Some(mime) => MediaType::from_mime(mime),
            None => MediaType::from_path(path),
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "resume".to_string());

        if let Some(limit) = max_bytes {
            if !media_type.is_supported() {
                return Err(AtsError::UnsupportedType(media_type.to_string()));
            }
            let size = fs::metadata(path).await?.len();
            if size > limit {
                return Err(AtsError::FileTooLarge { size, limit });
            }
        }

        let data = fs::read(path).await?;
        Ok(Self::from_bytes(name, media_type, data))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

/// Type and size checks applied when a file is selected and again at submit time
pub fn validate_file(file: &SelectedFile, max_bytes: u64) -> Result<()> {
    if !file.media_type().is_supported() {
        return Err(AtsError::UnsupportedType(file.media_type().to_string()));
    }

    if file.size() > max_bytes {
        return Err(AtsError::FileTooLarge {
            size: file.size(),
            limit: max_bytes,
        });
    }

    Ok(())
}

pub fn validate_description(job_description: &str) -> Result<()> {
    if job_description.trim().is_empty() {
        return Err(AtsError::MissingDescription);
    }
    Ok(())
}

/// Every check that must hold before the network call is attempted, in order:
/// presence, media type, size, then job description.
pub fn validate_submission(
    file: Option<&SelectedFile>,
    job_description: &str,
    max_bytes: u64,
) -> Result<()> {
    let file = file.ok_or(AtsError::MissingFile)?;
    validate_file(file, max_bytes)?;
    validate_description(job_description)
}
