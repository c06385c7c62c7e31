//! Submission state machine: `Idle -> Submitting -> (Succeeded | Failed)`.
//!
//! One submission may be in flight at a time. Every outcome, including
//! transport failures, ends up as workflow state; nothing escapes as an error
//! from [`SubmissionWorkflow::submit`].

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::{SubmitError, WorkflowError};
use crate::input::SubmissionInput;
use crate::model::{AnalysisRequest, AnalysisResult};

/// Sends a request to the analysis service. Exactly one attempt per call.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, SubmitError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    Submitting { submission: u64 },
    Succeeded(AnalysisResult),
    Failed(String),
}

/// Ticket for the in-flight submission, returned by [`SubmissionWorkflow::begin`].
#[derive(Debug)]
pub struct PendingSubmission {
    submission: u64,
    request: AnalysisRequest,
}

impl PendingSubmission {
    pub fn id(&self) -> u64 {
        self.submission
    }

    pub fn request(&self) -> &AnalysisRequest {
        &self.request
    }
}

/// Why a submit action did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InertReason {
    NothingToSubmit,
    InFlight,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The submit affordance was disabled; no call was made.
    Inert(InertReason),
    /// The result is handed to the display collaborator by value.
    HandedOff(AnalysisResult),
    /// The message is shown on the input screen, which stays usable.
    Failed(String),
}

#[derive(Debug)]
pub struct SubmissionWorkflow {
    state: SubmissionState,
    last_submission: u64,
}

impl Default for SubmissionWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionWorkflow {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
            last_submission: 0,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SubmissionState::Submitting { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            SubmissionState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Whether the submit affordance should be enabled.
    pub fn can_submit(&self, input: &SubmissionInput) -> bool {
        !self.is_loading() && input.is_submittable()
    }

    /// Enter `Submitting` with a freshly built request.
    ///
    /// Allowed from `Idle` and `Failed`. A pending `Succeeded` result that was
    /// never handed off is discarded.
    pub fn begin(&mut self, input: &SubmissionInput) -> Result<PendingSubmission, WorkflowError> {
        if self.is_loading() {
            return Err(WorkflowError::InFlight);
        }
        let request = input.build_request()?;

        self.last_submission += 1;
        let submission = self.last_submission;
        self.state = SubmissionState::Submitting { submission };
        debug!(submission, kind = ?request.kind(), "submission started");

        Ok(PendingSubmission {
            submission,
            request,
        })
    }

    /// Record the outcome of the in-flight call.
    pub fn resolve(
        &mut self,
        pending: PendingSubmission,
        outcome: Result<AnalysisResult, SubmitError>,
    ) -> Result<(), WorkflowError> {
        match self.state {
            SubmissionState::Submitting { submission } if submission == pending.submission => {}
            _ => {
                return Err(WorkflowError::StaleResponse {
                    got: pending.submission,
                });
            }
        }

        self.state = match outcome {
            Ok(result) => {
                info!(submission = pending.submission, id = %result.id, "analysis succeeded");
                SubmissionState::Succeeded(result)
            }
            Err(err) => {
                warn!(submission = pending.submission, error = %err, "analysis failed");
                SubmissionState::Failed(err.user_message())
            }
        };
        Ok(())
    }

    /// Move a successful result out to the display collaborator and return to `Idle`.
    pub fn hand_off(&mut self) -> Option<AnalysisResult> {
        match std::mem::replace(&mut self.state, SubmissionState::Idle) {
            SubmissionState::Succeeded(result) => Some(result),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Run one full submission against `analyzer`.
    pub async fn submit<A>(&mut self, input: &SubmissionInput, analyzer: &A) -> SubmitOutcome
    where
        A: Analyzer + ?Sized,
    {
        let pending = match self.begin(input) {
            Ok(pending) => pending,
            Err(WorkflowError::InFlight) => return SubmitOutcome::Inert(InertReason::InFlight),
            Err(_) => return SubmitOutcome::Inert(InertReason::NothingToSubmit),
        };

        let outcome = analyzer.analyze(pending.request()).await;
        if let Err(err) = self.resolve(pending, outcome) {
            // Unreachable while `submit` holds `&mut self` across the call.
            warn!(error = %err, "dropping outcome");
            return SubmitOutcome::Inert(InertReason::InFlight);
        }

        match self.hand_off() {
            Some(result) => SubmitOutcome::HandedOff(result),
            None => SubmitOutcome::Failed(self.error_message().unwrap_or_default().to_string()),
        }
    }
}
