//! Shared data contract between the client and the analysis service.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Document formats the upload path accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Doc,
    Docx,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 3] = [Self::Pdf, Self::Doc, Self::Docx];

    /// Canonical MIME type sent with the multipart part.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Doc => "application/msword",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Doc => "doc",
            Self::Docx => "docx",
        }
    }

    /// Look up a format by MIME type. Parameters (`; charset=...`) and case are ignored.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        Self::ALL
            .into_iter()
            .find(|f| f.mime_type().eq_ignore_ascii_case(essence))
    }

    /// Look up a format by file extension, with or without the leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim().trim_start_matches('.');
        Self::ALL
            .into_iter()
            .find(|f| f.extension().eq_ignore_ascii_case(ext))
    }

    /// Infer a format from the extension of a file name.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        Self::from_extension(ext)
    }
}

/// Which endpoint a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Document,
    Text,
}

impl RequestKind {
    /// Path relative to the API base.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Document => "/analyze/document",
            Self::Text => "/analyze/text",
        }
    }

    /// Message shown when the server gives no usable `detail`.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::Document => "Error analyzing document",
            Self::Text => "Error analyzing text",
        }
    }
}

/// A normalized, validated submission. Built fresh per submit and dropped after.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisRequest {
    File {
        bytes: Vec<u8>,
        file_name: String,
        format: DocumentFormat,
    },
    Text {
        text: String,
    },
}

impl AnalysisRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::File { .. } => RequestKind::Document,
            Self::Text { .. } => RequestKind::Text,
        }
    }
}

/// Company details extracted by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: Option<String>,
    pub domain: Option<String>,
    pub verified: bool,
}

/// The verdict returned by the analysis service.
///
/// Every field is required on the wire; `company_info.name` and
/// `company_info.domain` may be null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: String,
    pub document_type: String,
    pub legitimacy_score: f64,
    pub confidence_score: f64,
    pub is_legitimate: bool,
    pub company_info: CompanyInfo,
    /// Display order, not sorted.
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaViolation {
    #[error("result id is empty")]
    EmptyId,
    #[error("{field} must be within [0, 1], got {value}")]
    ScoreOutOfRange { field: &'static str, value: f64 },
}

impl AnalysisResult {
    /// Check the invariants rendering depends on that serde cannot express.
    pub fn validate(&self) -> Result<(), SchemaViolation> {
        if self.id.trim().is_empty() {
            return Err(SchemaViolation::EmptyId);
        }
        for (field, value) in [
            ("legitimacy_score", self.legitimacy_score),
            ("confidence_score", self.confidence_score),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(SchemaViolation::ScoreOutOfRange { field, value });
            }
        }
        Ok(())
    }
}
