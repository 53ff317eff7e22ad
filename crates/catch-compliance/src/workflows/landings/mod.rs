//! Landing and case classification for export documents.
//!
//! Landing facts flow through the rejection gate and temporal overrides into per-landing
//! compliance records, which are then reduced into the document-level case type, recorded
//! status, outcome and risk. The service and router wrap the engine with validation and
//! storage so cases can be rechecked once more landing data has arrived.

pub mod case;
pub mod classification;
pub mod domain;
pub(crate) mod guard;
pub mod import;
pub mod reference;
pub mod repository;
pub mod risk;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use case::{
    CaseStatusView, DocumentCase, LandingComplianceRecord, RetrospectiveCase, RetrospectiveLanding,
};
pub use classification::{
    is_rejected, to_case_outcome_at_submission, to_case_risk, to_case_status_at_submission,
    to_case_type2, to_landing_status, ClassificationEngine, SubmittedLanding,
};
pub use domain::{
    CaseOutcomeAtSubmission, CaseStatusAtSubmission, CaseTwoType, DocumentNumber,
    DocumentSubmission, DocumentType, ElementaryStatus, LandingFact, LandingOutcome,
    LandingSource, LandingStatus, RiskLevel,
};
pub use guard::SubmissionViolation;
pub use import::{LandingCsvImporter, LandingImportError};
pub use repository::{CaseRecord, CaseRepository, RepositoryError};
pub use risk::{RiskAssessment, RiskModel, RiskScoreOverrides, RiskWeighting};
pub use router::case_router;
pub use service::{CaseServiceError, ComplianceCaseService, VoidActor};
