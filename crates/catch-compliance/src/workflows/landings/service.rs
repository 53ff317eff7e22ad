use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::case::{DocumentCase, RetrospectiveCase};
use super::classification::temporal::fourteen_day_limit_reached;
use super::classification::ClassificationEngine;
use super::domain::{CaseTwoType, DocumentNumber, DocumentSubmission};
use super::guard::{SubmissionGuard, SubmissionViolation};
use super::repository::{CaseRecord, CaseRepository, RepositoryError};
use super::risk::{RiskModel, RiskScoreOverrides};

/// Who voided a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoidActor {
    Admin,
    Exporter,
}

impl VoidActor {
    pub const fn case_type(self) -> CaseTwoType {
        match self {
            VoidActor::Admin => CaseTwoType::VoidByAdmin,
            VoidActor::Exporter => CaseTwoType::VoidByExporter,
        }
    }
}

/// Service composing the submission guard, classification engine, and case repository.
pub struct ComplianceCaseService<R> {
    guard: SubmissionGuard,
    engine: Arc<ClassificationEngine>,
    repository: Arc<R>,
}

impl<R> ComplianceCaseService<R>
where
    R: CaseRepository + 'static,
{
    pub fn new(repository: Arc<R>, risk: RiskModel) -> Self {
        Self::with_engine(ClassificationEngine::new(risk), repository)
    }

    pub fn with_engine(engine: ClassificationEngine, repository: Arc<R>) -> Self {
        Self {
            guard: SubmissionGuard,
            engine: Arc::new(engine),
            repository,
        }
    }

    pub fn engine(&self) -> &ClassificationEngine {
        &self.engine
    }

    /// Validate, classify and store a newly submitted document.
    pub fn submit(
        &self,
        document: DocumentSubmission,
        now: DateTime<Utc>,
    ) -> Result<DocumentCase, CaseServiceError> {
        let document = self.guard.admit(document)?;

        let case = self.engine.classify(&document, now);
        let stored = self.repository.insert(CaseRecord {
            submission: document,
            case,
        })?;

        info!(
            document_number = stored.document_number().as_str(),
            case_type = stored.case.case_type.label(),
            outcome = stored.case.outcome_at_submission.label(),
            "case submitted"
        );

        Ok(stored.case)
    }

    pub fn get(&self, document_number: &DocumentNumber) -> Result<CaseRecord, CaseServiceError> {
        let record = self
            .repository
            .fetch(document_number)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Re-evaluate a stored case at `now`, optionally against updated risk scores.
    pub fn recheck(
        &self,
        document_number: &DocumentNumber,
        now: DateTime<Utc>,
        overrides: Option<&RiskScoreOverrides>,
    ) -> Result<RetrospectiveCase, CaseServiceError> {
        let record = self.get(document_number)?;

        let retrospective = match overrides.filter(|overrides| !overrides.is_empty()) {
            Some(overrides) => {
                let mut risk = self.engine.risk_model().clone();
                risk.extend_scores(overrides);
                self.engine
                    .recheck_with_risk(&record.submission, &record.case, &risk, now)
            }
            None => self.engine.recheck(&record.submission, &record.case, now),
        };

        let diverged = retrospective.diverged().count();
        info!(
            document_number = document_number.as_str(),
            landings = retrospective.landings.len(),
            diverged,
            "case rechecked"
        );

        Ok(retrospective)
    }

    /// Void a stored case. Submission-time statuses are kept; the 14-day flags are re-derived.
    pub fn void(
        &self,
        document_number: &DocumentNumber,
        actor: VoidActor,
        now: DateTime<Utc>,
    ) -> Result<DocumentCase, CaseServiceError> {
        let mut record = self.get(document_number)?;
        if record.case.case_type.is_void() {
            return Err(CaseServiceError::AlreadyVoid(document_number.0.clone()));
        }

        let case_type = actor.case_type();
        record.submission.prior_case_type = Some(case_type);
        record.case.case_type = case_type;
        for (landing, fact) in record
            .case
            .landings
            .iter_mut()
            .zip(record.submission.landings.iter())
        {
            landing.is_14_day_limit_reached = fourteen_day_limit_reached(case_type, fact, now);
        }

        let case = record.case.clone();
        self.repository.update(record)?;

        info!(
            document_number = document_number.as_str(),
            case_type = case.case_type.label(),
            "case voided"
        );

        Ok(case)
    }
}

/// Error raised by the case service.
#[derive(Debug, thiserror::Error)]
pub enum CaseServiceError {
    #[error(transparent)]
    Submission(#[from] SubmissionViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("case {0} is already void")]
    AlreadyVoid(String),
}
