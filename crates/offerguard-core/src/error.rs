use thiserror::Error;

use crate::model::{RequestKind, SchemaViolation};

/// Local input problems. Recoverable by changing the staged input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unsupported file type {mime_type:?} for {file_name}; expected PDF, DOC or DOCX")]
    UnsupportedFileType { file_name: String, mime_type: String },

    #[error("no file selected")]
    NoFileStaged,

    #[error("text is empty")]
    EmptyText,
}

/// A failed call to the analysis service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    /// Transport or server error. `message` is the server's `detail` when it
    /// sent one, otherwise the fallback for the request kind.
    #[error("{message}")]
    Analysis {
        message: String,
        status: Option<u16>,
    },

    /// The service answered with a body that does not match the result schema.
    #[error("malformed response from analysis service: {reason}")]
    MalformedResponse { reason: String },
}

impl SubmitError {
    pub fn analysis(kind: RequestKind, detail: Option<String>, status: Option<u16>) -> Self {
        let message = detail
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| kind.fallback_message().to_string());
        Self::Analysis { message, status }
    }

    /// Text to show inline on the input screen.
    pub fn user_message(&self) -> String {
        match self {
            Self::Analysis { message, .. } => message.clone(),
            Self::MalformedResponse { .. } => {
                "The analysis service returned an unexpected response".to_string()
            }
        }
    }
}

impl From<SchemaViolation> for SubmitError {
    fn from(v: SchemaViolation) -> Self {
        Self::MalformedResponse {
            reason: v.to_string(),
        }
    }
}

/// Transitions the submission state machine refuses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("nothing to submit: {0}")]
    NothingToSubmit(#[from] ValidationError),

    #[error("a submission is already in flight")]
    InFlight,

    #[error("outcome for submission #{got} does not match the in-flight submission")]
    StaleResponse { got: u64 },
}

/// The result screen was reached without a handed-off result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no analysis results found")]
pub struct MissingResultError;
