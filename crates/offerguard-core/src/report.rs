//! Verdict rendering: a pure mapping from [`AnalysisResult`] to a display-ready report.
//!
//! Every string a result screen shows is computed here so that front ends only
//! lay the report out. Nothing in this module touches the network or mutates
//! its input.

use serde::Serialize;

use crate::error::MissingResultError;
use crate::model::AnalysisResult;

pub const NOT_DETECTED: &str = "Not detected";
pub const NO_RESULTS: &str = "No analysis results found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Legitimate,
    Suspicious,
}

impl Verdict {
    pub fn title(self) -> &'static str {
        match self {
            Self::Legitimate => "Legitimate Document",
            Self::Suspicious => "Suspicious Document",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headline {
    pub verdict: Verdict,
    pub title: String,
    /// e.g. `"88.0%"`.
    pub confidence: String,
}

/// A 0-100 bar plus its label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreIndicator {
    pub value: f64,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationBadge {
    Verified,
    Unverified,
}

impl VerificationBadge {
    pub fn label(self) -> &'static str {
        match self {
            Self::Verified => "Verified",
            Self::Unverified => "Unverified",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyRow {
    pub name: String,
    pub domain: String,
    pub badge: VerificationBadge,
}

/// Follow-up actions offered under a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportAction {
    /// Hands the report to a [`ReportExporter`].
    DownloadReport,
    AnalyzeAnother,
    BackToHome,
}

impl ReportAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::DownloadReport => "Download Report",
            Self::AnalyzeAnother => "Analyze Another Document",
            Self::BackToHome => "Back to Home",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerdictReport {
    pub result_id: String,
    pub headline: Headline,
    pub document_type: String,
    pub legitimacy: ScoreIndicator,
    pub company: CompanyRow,
    /// `None` hides the warnings section.
    pub warnings: Option<Vec<String>>,
    pub actions: Vec<ReportAction>,
}

/// Extension point for turning a rendered report into a downloadable artifact.
pub trait ReportExporter {
    type Error;

    fn export(&self, report: &VerdictReport) -> Result<(), Self::Error>;
}

/// Placeholder for a result screen reached without a hand-off.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoResultsView {
    pub message: String,
    pub action: ReportAction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum ResultScreen {
    Report(VerdictReport),
    NoResults(NoResultsView),
}

impl ResultScreen {
    /// Build the result screen from whatever the workflow handed over.
    pub fn from_handoff(result: Option<AnalysisResult>) -> Self {
        match result {
            Some(result) => Self::Report(render(&result)),
            None => Self::NoResults(NoResultsView {
                message: NO_RESULTS.to_string(),
                action: ReportAction::BackToHome,
            }),
        }
    }

    pub fn report(&self) -> Result<&VerdictReport, MissingResultError> {
        match self {
            Self::Report(report) => Ok(report),
            Self::NoResults(_) => Err(MissingResultError),
        }
    }
}

/// Format a [0,1] score as a percentage with one decimal place.
///
/// Ties round away from zero (`0.0625` -> `"6.3%"`), not to even.
pub fn percent(score: f64) -> String {
    format!("{:.1}%", (score * 1000.0).round() / 10.0)
}

/// `"offer_letter"` -> `"OFFER LETTER"`.
pub fn document_type_label(document_type: &str) -> String {
    document_type
        .chars()
        .map(|c| if c == '_' { ' ' } else { c })
        .collect::<String>()
        .to_uppercase()
}

fn or_not_detected(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => NOT_DETECTED.to_string(),
    }
}

/// Render a verdict. Pure and deterministic.
pub fn render(result: &AnalysisResult) -> VerdictReport {
    let verdict = if result.is_legitimate {
        Verdict::Legitimate
    } else {
        Verdict::Suspicious
    };

    let badge = if result.company_info.verified {
        VerificationBadge::Verified
    } else {
        VerificationBadge::Unverified
    };

    VerdictReport {
        result_id: result.id.clone(),
        headline: Headline {
            verdict,
            title: verdict.title().to_string(),
            confidence: percent(result.confidence_score),
        },
        document_type: document_type_label(&result.document_type),
        legitimacy: ScoreIndicator {
            value: (result.legitimacy_score * 100.0).clamp(0.0, 100.0),
            text: percent(result.legitimacy_score),
        },
        company: CompanyRow {
            name: or_not_detected(result.company_info.name.as_deref()),
            domain: or_not_detected(result.company_info.domain.as_deref()),
            badge,
        },
        warnings: (!result.warnings.is_empty()).then(|| result.warnings.clone()),
        actions: vec![
            ReportAction::DownloadReport,
            ReportAction::AnalyzeAnother,
            ReportAction::BackToHome,
        ],
    }
}
