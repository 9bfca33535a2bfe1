// src/core/intake.rs
//! File intake - accepts a picked or dropped file and keeps only PDFs

use anyhow::{Context, Result};
use std::path::Path;

use crate::app_log;
use crate::utils::{format_size_kb, is_pdf_filename};

pub const NOT_PDF_ALERT: &str = "Please choose a PDF file.";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeError {
    #[error("{}", NOT_PDF_ALERT)]
    NotPdf { file_name: String },
}

impl IntakeError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotPdf { .. } => "NOT_PDF",
        }
    }

    /// Message shown to the user as an alert.
    pub fn alert(&self) -> String {
        self.to_string()
    }
}

/// A file chosen by the user, held in memory until it is uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    content: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    /// Read a file from disk, keeping its base name.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", path.display()))?
            .to_string();

        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(Self::new(name, content))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// `"resume.pdf (12 KB)"`
    pub fn label(&self) -> String {
        format!("{} ({} KB)", self.name, format_size_kb(self.size()))
    }
}

/// Check a candidate file before it becomes the selection.
pub fn accept(file: SelectedFile) -> Result<SelectedFile, IntakeError> {
    if !is_pdf_filename(&file.name) {
        app_log!(warn, "Rejected non-PDF file: {}", file.name);
        return Err(IntakeError::NotPdf {
            file_name: file.name,
        });
    }

    app_log!(debug, "Accepted {}", file.label());
    Ok(file)
}

/// Drag-and-drop delivers a list; only the first entry counts.
pub fn first_dropped<I>(files: I) -> Option<SelectedFile>
where
    I: IntoIterator<Item = SelectedFile>,
{
    files.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_pdf_any_case() {
        assert!(accept(SelectedFile::new("cv.pdf", vec![1])).is_ok());
        assert!(accept(SelectedFile::new("CV.PDF", vec![1])).is_ok());
        assert!(accept(SelectedFile::new("my.resume.Pdf", vec![1])).is_ok());
    }

    #[test]
    fn test_reject_non_pdf() {
        let err = accept(SelectedFile::new("cv.docx", vec![1])).unwrap_err();
        assert_eq!(err.code(), "NOT_PDF");
        assert_eq!(err.alert(), "Please choose a PDF file.");

        assert!(accept(SelectedFile::new("pdf", vec![])).is_err());
        assert!(accept(SelectedFile::new("cv.pdf.txt", vec![])).is_err());
    }

    #[test]
    fn test_label_rounds_kilobytes() {
        assert_eq!(SelectedFile::new("a.pdf", vec![0; 1536]).label(), "a.pdf (2 KB)");
        assert_eq!(SelectedFile::new("b.pdf", vec![0; 100]).label(), "b.pdf (0 KB)");
    }

    #[test]
    fn test_first_dropped() {
        let files = vec![
            SelectedFile::new("one.pdf", vec![]),
            SelectedFile::new("two.pdf", vec![]),
        ];
        assert_eq!(first_dropped(files).map(|f| f.name().to_string()).as_deref(), Some("one.pdf"));
        assert_eq!(first_dropped(Vec::new()), None);
    }

    #[tokio::test]
    async fn test_from_path_reads_name_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        tokio::fs::write(&path, b"%PDF-1.4").await.unwrap();

        let file = SelectedFile::from_path(&path).await.unwrap();
        assert_eq!(file.name(), "resume.pdf");
        assert_eq!(file.content(), b"%PDF-1.4");
        assert_eq!(file.size(), 8);
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SelectedFile::from_path(&dir.path().join("nope.pdf")).await.is_err());
    }
}
