use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    CaseOutcomeAtSubmission, CaseStatusAtSubmission, CaseTwoType, DocumentNumber, DocumentType,
    ElementaryStatus, LandingOutcome, LandingSource, LandingStatus, RiskLevel,
};

/// Compliance record for a single landing line, as assembled at submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingComplianceRecord {
    pub document_number: DocumentNumber,
    pub pln: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rss_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vessel_name: Option<String>,
    pub species_code: String,
    pub date_landed: NaiveDate,
    pub weight_on_cert: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<LandingSource>,
    pub risk_score: f64,
    pub risk: RiskLevel,
    pub status: ElementaryStatus,
    pub outcome: LandingOutcome,
    pub is_14_day_limit_reached: bool,
    pub is_legally_due: bool,
    pub is_late: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overused_info: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vessel_length: Option<f64>,
}

/// Document-level compliance outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentCase {
    pub document_number: DocumentNumber,
    pub document_type: DocumentType,
    pub case_type: CaseTwoType,
    pub status_at_submission: CaseStatusAtSubmission,
    pub outcome_at_submission: CaseOutcomeAtSubmission,
    pub risk: RiskLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exporter_administration: Option<String>,
    pub classified_at: DateTime<Utc>,
    pub landings: Vec<LandingComplianceRecord>,
}

impl DocumentCase {
    pub fn rejected_landings(&self) -> usize {
        self.landings
            .iter()
            .filter(|landing| landing.outcome == LandingOutcome::Rejected)
            .count()
    }

    pub fn status_view(&self) -> CaseStatusView {
        CaseStatusView {
            document_number: self.document_number.clone(),
            case_type: self.case_type.label(),
            status_at_submission: self.status_at_submission.label(),
            outcome_at_submission: self.outcome_at_submission.label(),
            risk: self.risk.label(),
            landings: self.landings.len(),
            rejected_landings: self.rejected_landings(),
        }
    }
}

/// Compact summary used by the CLI and list responses.
#[derive(Debug, Clone, Serialize)]
pub struct CaseStatusView {
    pub document_number: DocumentNumber,
    pub case_type: &'static str,
    pub status_at_submission: &'static str,
    pub outcome_at_submission: &'static str,
    pub risk: &'static str,
    pub landings: usize,
    pub rejected_landings: usize,
}

/// A landing re-evaluated after submission. The rejection verdict is recomputed against the
/// current risk scores and may differ from the one recorded at submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrospectiveLanding {
    pub document_number: DocumentNumber,
    pub pln: String,
    pub species_code: String,
    pub date_landed: NaiveDate,
    pub status: LandingStatus,
    pub status_at_submission: ElementaryStatus,
    pub risk: RiskLevel,
    pub is_rejected: bool,
    pub was_rejected_at_submission: bool,
    pub is_in_retrospective_period: bool,
    pub is_14_day_limit_reached: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrospectiveCase {
    pub document_number: DocumentNumber,
    pub case_type: CaseTwoType,
    pub checked_at: DateTime<Utc>,
    pub landings: Vec<RetrospectiveLanding>,
}

impl RetrospectiveCase {
    /// Landings whose rejection verdict changed since submission.
    pub fn diverged(&self) -> impl Iterator<Item = &RetrospectiveLanding> {
        self.landings
            .iter()
            .filter(|landing| landing.is_rejected != landing.was_rejected_at_submission)
    }
}
