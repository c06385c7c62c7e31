//! Client-side core for OfferGuard: stage a document, submit it once, render the verdict.

pub mod error;
pub mod input;
pub mod model;
pub mod report;
pub mod workflow;

pub use error::{MissingResultError, SubmitError, ValidationError, WorkflowError};
pub use input::{FileCandidate, StagedFile, SubmissionInput, SubmissionMode};
pub use model::{
    AnalysisRequest, AnalysisResult, CompanyInfo, DocumentFormat, RequestKind, SchemaViolation,
};
pub use report::{ReportExporter, ResultScreen, VerdictReport, render};
pub use workflow::{
    Analyzer, InertReason, PendingSubmission, SubmissionState, SubmissionWorkflow, SubmitOutcome,
};
