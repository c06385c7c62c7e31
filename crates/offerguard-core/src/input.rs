//! Staging for the two competing input modes.
//!
//! Both buffers survive mode switches so a user can flip between the upload
//! and paste tabs without losing work. Only the active mode is submitted.

use tracing::debug;

use crate::error::ValidationError;
use crate::model::{AnalysisRequest, DocumentFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionMode {
    #[default]
    File,
    Text,
}

/// A file offered by a picker or a drop, before type checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

/// A file that passed the type check and is waiting to be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub format: DocumentFormat,
}

#[derive(Debug, Default)]
pub struct SubmissionInput {
    mode: SubmissionMode,
    staged_file: Option<StagedFile>,
    text: String,
}

impl SubmissionInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SubmissionMode {
        self.mode
    }

    pub fn staged_file(&self) -> Option<&StagedFile> {
        self.staged_file.as_ref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn select_mode(&mut self, mode: SubmissionMode) {
        self.mode = mode;
    }

    /// Stage a dropped or picked file, replacing any previous one.
    ///
    /// A candidate of an unsupported type leaves the staged file untouched.
    pub fn accept_file(&mut self, candidate: FileCandidate) -> Result<(), ValidationError> {
        let Some(format) = DocumentFormat::from_mime(&candidate.mime_type) else {
            debug!(
                file_name = %candidate.file_name,
                mime_type = %candidate.mime_type,
                "rejected unsupported file"
            );
            return Err(ValidationError::UnsupportedFileType {
                file_name: candidate.file_name,
                mime_type: candidate.mime_type,
            });
        };

        debug!(file_name = %candidate.file_name, ?format, "staged file");
        self.staged_file = Some(StagedFile {
            bytes: candidate.bytes,
            file_name: candidate.file_name,
            format,
        });
        Ok(())
    }

    /// Multi-select entry point: only the first candidate is considered.
    pub fn accept_files(
        &mut self,
        candidates: impl IntoIterator<Item = FileCandidate>,
    ) -> Result<(), ValidationError> {
        match candidates.into_iter().next() {
            Some(first) => self.accept_file(first),
            None => Ok(()),
        }
    }

    pub fn clear_file(&mut self) {
        self.staged_file = None;
    }

    /// Store raw text. No length cap, no trimming.
    pub fn update_text(&mut self, value: impl Into<String>) {
        self.text = value.into();
    }

    pub fn is_submittable(&self) -> bool {
        match self.mode {
            SubmissionMode::File => self.staged_file.is_some(),
            SubmissionMode::Text => !self.text.trim().is_empty(),
        }
    }

    /// Build the request for the active mode.
    pub fn build_request(&self) -> Result<AnalysisRequest, ValidationError> {
        match self.mode {
            SubmissionMode::File => {
                let file = self
                    .staged_file
                    .as_ref()
                    .ok_or(ValidationError::NoFileStaged)?;
                Ok(AnalysisRequest::File {
                    bytes: file.bytes.clone(),
                    file_name: file.file_name.clone(),
                    format: file.format,
                })
            }
            SubmissionMode::Text => {
                if self.text.trim().is_empty() {
                    return Err(ValidationError::EmptyText);
                }
                Ok(AnalysisRequest::Text {
                    text: self.text.clone(),
                })
            }
        }
    }
}
