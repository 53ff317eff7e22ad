use serde::{Deserialize, Serialize};

use super::super::domain::{
    CaseOutcomeAtSubmission, CaseStatusAtSubmission, ElementaryStatus, LandingOutcome, RiskLevel,
};

/// Status, outcome and risk captured for one landing when the document was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedLanding {
    pub status: ElementaryStatus,
    pub outcome: LandingOutcome,
    pub risk: RiskLevel,
}

/// First match wins, top to bottom. `ValidationSuccess` is the fallback.
const SUBMISSION_PRIORITY: [CaseStatusAtSubmission; 5] = [
    CaseStatusAtSubmission::ValidationFailureNoLandingData,
    CaseStatusAtSubmission::ValidationFailure,
    CaseStatusAtSubmission::PendingLandingDataDataExpected,
    CaseStatusAtSubmission::PendingLandingDataDataNotYetExpected,
    CaseStatusAtSubmission::DataNeverExpected,
];

/// Recorded document status at submission.
///
/// Rejected landings, when present, hide the rest; among what remains, high-risk landings hide
/// the low-risk ones. Only the surviving subset is ranked.
pub fn to_case_status_at_submission(landings: &[SubmittedLanding]) -> CaseStatusAtSubmission {
    let rejected: Vec<SubmittedLanding> = landings
        .iter()
        .filter(|landing| landing.outcome == LandingOutcome::Rejected)
        .copied()
        .collect();
    let working = if rejected.is_empty() {
        landings.to_vec()
    } else {
        rejected
    };

    let high_risk: Vec<SubmittedLanding> = working
        .iter()
        .filter(|landing| landing.risk == RiskLevel::High)
        .copied()
        .collect();
    let working = if high_risk.is_empty() {
        working
    } else {
        high_risk
    };

    SUBMISSION_PRIORITY
        .into_iter()
        .find(|candidate| {
            working
                .iter()
                .any(|landing| submission_bucket(landing.status) == *candidate)
        })
        .unwrap_or(CaseStatusAtSubmission::ValidationSuccess)
}

pub fn to_case_outcome_at_submission(landings: &[SubmittedLanding]) -> CaseOutcomeAtSubmission {
    if landings
        .iter()
        .any(|landing| landing.outcome == LandingOutcome::Rejected)
    {
        CaseOutcomeAtSubmission::Rejected
    } else {
        CaseOutcomeAtSubmission::Issued
    }
}

pub fn to_case_risk(landings: &[SubmittedLanding]) -> RiskLevel {
    if landings.iter().any(|landing| landing.risk == RiskLevel::High) {
        RiskLevel::High
    } else {
        RiskLevel::Low
    }
}

fn submission_bucket(status: ElementaryStatus) -> CaseStatusAtSubmission {
    match status {
        ElementaryStatus::ValidationFailureNoLandingData => {
            CaseStatusAtSubmission::ValidationFailureNoLandingData
        }
        ElementaryStatus::ValidationFailureWeight
        | ElementaryStatus::ValidationFailureOveruse
        | ElementaryStatus::ValidationFailureWeightAndOveruse
        | ElementaryStatus::ValidationFailureSpecies => CaseStatusAtSubmission::ValidationFailure,
        ElementaryStatus::PendingLandingDataDataExpected
        | ElementaryStatus::PendingLandingDataElogSpecies => {
            CaseStatusAtSubmission::PendingLandingDataDataExpected
        }
        ElementaryStatus::PendingLandingDataDataNotYetExpected => {
            CaseStatusAtSubmission::PendingLandingDataDataNotYetExpected
        }
        ElementaryStatus::DataNeverExpected => CaseStatusAtSubmission::DataNeverExpected,
        ElementaryStatus::ValidationSuccess => CaseStatusAtSubmission::ValidationSuccess,
    }
}
