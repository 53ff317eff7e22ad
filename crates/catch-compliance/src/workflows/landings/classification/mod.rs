mod case_type;
mod gate;
pub mod rules;
mod submission;
pub mod taxonomy;
pub mod temporal;

pub use case_type::to_case_type2;
pub use gate::{is_rejected, rejection_checks, RejectionCheck};
pub use submission::{
    to_case_outcome_at_submission, to_case_risk, to_case_status_at_submission, SubmittedLanding,
};
pub use taxonomy::to_landing_status;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::case::{DocumentCase, LandingComplianceRecord, RetrospectiveCase, RetrospectiveLanding};
use super::domain::{CaseTwoType, DocumentSubmission, LandingFact, LandingOutcome, RiskLevel};
use super::reference::{
    default_postcode_table, postcode_da_lookup, DevolvedAdministrationEntry, VesselRegister,
};
use super::risk::{RiskAssessment, RiskModel};
use temporal::{
    exposed_overused_info, fourteen_day_limit_reached, is_in_retrospective_period,
    is_landing_data_late, legally_due, retrospective_status,
};

/// Stateless engine composing the landing rules into case records.
pub struct ClassificationEngine {
    risk: RiskModel,
    vessels: VesselRegister,
    postcodes: Vec<DevolvedAdministrationEntry>,
}

impl ClassificationEngine {
    pub fn new(risk: RiskModel) -> Self {
        Self::with_reference_data(risk, VesselRegister::default(), default_postcode_table())
    }

    pub fn with_reference_data(
        risk: RiskModel,
        vessels: VesselRegister,
        postcodes: Vec<DevolvedAdministrationEntry>,
    ) -> Self {
        Self {
            risk,
            vessels,
            postcodes,
        }
    }

    pub fn risk_model(&self) -> &RiskModel {
        &self.risk
    }

    pub fn classify(&self, document: &DocumentSubmission, now: DateTime<Utc>) -> DocumentCase {
        self.classify_with_risk(document, &self.risk, now)
    }

    /// Classify a document at submission. A prior void case type is kept as-is; every other
    /// document gets a fresh real-time case type.
    pub fn classify_with_risk<R>(
        &self,
        document: &DocumentSubmission,
        risk: &R,
        now: DateTime<Utc>,
    ) -> DocumentCase
    where
        R: RiskAssessment + ?Sized,
    {
        let case_type = match document.prior_case_type {
            Some(prior) if prior.is_void() => prior,
            _ => to_case_type2(&document.landings, risk, now),
        };

        let lookup = postcode_da_lookup(&self.postcodes);
        let landings: Vec<LandingComplianceRecord> = document
            .landings
            .iter()
            .map(|landing| self.landing_record(landing, case_type, risk, now))
            .collect();

        let submitted: Vec<SubmittedLanding> = landings
            .iter()
            .map(|record| SubmittedLanding {
                status: record.status,
                outcome: record.outcome,
                risk: record.risk,
            })
            .collect();

        let case = DocumentCase {
            document_number: document.document_number.clone(),
            document_type: document.document_type,
            case_type,
            status_at_submission: to_case_status_at_submission(&submitted),
            outcome_at_submission: to_case_outcome_at_submission(&submitted),
            risk: to_case_risk(&submitted),
            exporter_administration: document.exporter_postcode.as_deref().map(&lookup),
            classified_at: now,
            landings,
        };

        debug!(
            document_number = case.document_number.as_str(),
            case_type = case.case_type.label(),
            status_at_submission = case.status_at_submission.label(),
            landings = case.landings.len(),
            "classified document"
        );

        case
    }

    /// Re-evaluate a submitted document's landings against the current risk scores.
    pub fn recheck_with_risk<R>(
        &self,
        document: &DocumentSubmission,
        submitted: &DocumentCase,
        risk: &R,
        now: DateTime<Utc>,
    ) -> RetrospectiveCase
    where
        R: RiskAssessment + ?Sized,
    {
        let landings = document
            .landings
            .iter()
            .enumerate()
            .map(|(index, landing)| {
                let at_submission = submitted.landings.get(index);
                let risk_score = risk.total_risk_score(landing);
                let is_high_risk = risk.is_high_risk(risk_score);
                let status_now = to_landing_status(landing, is_high_risk);

                RetrospectiveLanding {
                    document_number: landing.document_number.clone(),
                    pln: landing.pln.clone(),
                    species_code: landing.species_code.clone(),
                    date_landed: landing.date_landed,
                    status: retrospective_status(status_now),
                    status_at_submission: at_submission
                        .map(|record| record.status)
                        .unwrap_or(status_now),
                    risk: RiskLevel::from_high_risk(is_high_risk),
                    is_rejected: is_rejected(landing, risk),
                    was_rejected_at_submission: at_submission
                        .map(|record| record.outcome == LandingOutcome::Rejected)
                        .unwrap_or(false),
                    is_in_retrospective_period: is_in_retrospective_period(now, landing),
                    is_14_day_limit_reached: fourteen_day_limit_reached(
                        submitted.case_type,
                        landing,
                        now,
                    ),
                }
            })
            .collect();

        RetrospectiveCase {
            document_number: submitted.document_number.clone(),
            case_type: submitted.case_type,
            checked_at: now,
            landings,
        }
    }

    pub fn recheck(
        &self,
        document: &DocumentSubmission,
        submitted: &DocumentCase,
        now: DateTime<Utc>,
    ) -> RetrospectiveCase {
        self.recheck_with_risk(document, submitted, &self.risk, now)
    }

    fn landing_record<R>(
        &self,
        landing: &LandingFact,
        case_type: CaseTwoType,
        risk: &R,
        now: DateTime<Utc>,
    ) -> LandingComplianceRecord
    where
        R: RiskAssessment + ?Sized,
    {
        let risk_score = risk.total_risk_score(landing);
        let is_high_risk = risk.is_high_risk(risk_score);

        LandingComplianceRecord {
            document_number: landing.document_number.clone(),
            pln: landing.pln.clone(),
            rss_number: landing.rss_number.clone(),
            vessel_name: landing.vessel_name.clone(),
            species_code: landing.species_code.clone(),
            date_landed: landing.date_landed,
            weight_on_cert: landing.weight_on_cert,
            source: landing.source,
            risk_score,
            risk: RiskLevel::from_high_risk(is_high_risk),
            status: to_landing_status(landing, is_high_risk),
            outcome: LandingOutcome::from_rejected(is_rejected(landing, risk)),
            is_14_day_limit_reached: fourteen_day_limit_reached(case_type, landing, now),
            is_legally_due: legally_due(landing),
            is_late: is_landing_data_late(
                landing.first_date_time_landing_data_retrieved,
                landing.landing_data_expected_date,
            ),
            overused_info: exposed_overused_info(landing),
            vessel_length: self.vessels.vessel_length(&landing.pln, landing.date_landed),
        }
    }
}

impl Default for ClassificationEngine {
    fn default() -> Self {
        Self::new(RiskModel::default())
    }
}
