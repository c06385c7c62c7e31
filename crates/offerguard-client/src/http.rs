//! HTTP client for the analysis service's `/analyze/*` endpoints.

use async_trait::async_trait;
use offerguard_core::{
    AnalysisRequest, AnalysisResult, Analyzer, RequestKind, SchemaViolation, SubmitError,
};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}")]
    Server { status: u16, detail: Option<String> },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response violates result schema: {0}")]
    Schema(#[from] SchemaViolation),
}

impl ClientError {
    /// Classify for the workflow. Transport and server errors become an
    /// analysis failure with the server's `detail` or the per-kind fallback;
    /// bodies that don't match the schema become a malformed response.
    pub fn into_submit_error(self, kind: RequestKind) -> SubmitError {
        match self {
            Self::Http(e) => SubmitError::analysis(kind, None, e.status().map(|s| s.as_u16())),
            Self::Server { status, detail } => SubmitError::analysis(kind, detail, Some(status)),
            Self::Json(e) => SubmitError::MalformedResponse {
                reason: e.to_string(),
            },
            Self::Schema(v) => v.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, e.g. `http://localhost:8000/api`.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Structured error body. FastAPI-style validation errors carry a list in
/// `detail`; only a string is shown to the user.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

fn extract_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    }
}

/// Single-attempt client: one outbound call per [`submit`](Self::submit), no retries.
pub struct AnalysisClient {
    client: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, kind: RequestKind) -> String {
        format!("{}{}", self.base_url, kind.endpoint())
    }

    /// Send the request and parse the verdict.
    pub async fn submit(&self, request: &AnalysisRequest) -> Result<AnalysisResult, SubmitError> {
        let kind = request.kind();
        self.send(request).await.map_err(|e| {
            warn!(error = %e, ?kind, "analysis request failed");
            e.into_submit_error(kind)
        })
    }

    async fn send(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ClientError> {
        let url = self.url_for(request.kind());

        let builder = match request {
            AnalysisRequest::File {
                bytes,
                file_name,
                format,
            } => {
                info!(url = %url, file_name = %file_name, size = bytes.len(), "submitting document");
                let part = Part::bytes(bytes.clone())
                    .file_name(file_name.clone())
                    .mime_str(format.mime_type())?;
                self.client.post(&url).multipart(Form::new().part("file", part))
            }
            AnalysisRequest::Text { text } => {
                info!(url = %url, chars = text.chars().count(), "submitting text");
                self.client
                    .post(&url)
                    .json(&serde_json::json!({ "text": text }))
            }
        };

        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        if !status.is_success() {
            return Err(ClientError::Server {
                status: status.as_u16(),
                detail: extract_detail(&body),
            });
        }

        let result: AnalysisResult = serde_json::from_slice(&body)?;
        result.validate()?;
        info!(id = %result.id, is_legitimate = result.is_legitimate, "analysis complete");
        Ok(result)
    }
}

#[async_trait]
impl Analyzer for AnalysisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, SubmitError> {
        self.submit(request).await
    }
}
