use chrono::{DateTime, Utc};

use super::super::domain::{CaseTwoType, LandingFact};
use super::super::risk::RiskAssessment;
use super::gate::is_rejected;
use super::rules::{is_elog_within_deminimis, is_overuse_only_failure};
use super::temporal::{is_after_landing_data_end, is_in_retrospective_period};

/// Real-time document classification.
///
/// Each condition is evaluated in turn and overwrites the running result when it holds, so a
/// later condition wins over an earlier one: Rejected > NoLandingData > Overuse >
/// PendingLandingData > DataNeverExpected > Success. This is not the same precedence as
/// [`super::to_case_status_at_submission`] and must stay a separate procedure.
pub fn to_case_type2<R>(landings: &[LandingFact], risk: &R, now: DateTime<Utc>) -> CaseTwoType
where
    R: RiskAssessment + ?Sized,
{
    let mut case_type = CaseTwoType::Success;

    if landings.iter().any(|landing| is_data_never_expected_high_risk(landing, risk)) {
        case_type = CaseTwoType::DataNeverExpected;
    }

    if landings.iter().any(|landing| is_pending_landing_data(landing, now)) {
        case_type = CaseTwoType::PendingLandingData;
    }

    if landings.iter().any(|landing| {
        let is_high_risk = risk.is_high_risk(risk.total_risk_score(landing));
        is_overuse_only_failure(landing, risk.is_risk_enabled(), is_high_risk)
    }) {
        case_type = CaseTwoType::RealTimeValidationOveruse;
    }

    if landings.iter().any(is_no_landing_data) {
        case_type = CaseTwoType::RealTimeValidationNoLandingData;
    }

    let any_pre_approved = landings.iter().any(|landing| landing.is_pre_approved);
    if !any_pre_approved && landings.iter().any(|landing| is_rejected(landing, risk)) {
        case_type = CaseTwoType::RealTimeValidationRejected;
    }

    case_type
}

fn is_data_never_expected_high_risk<R>(landing: &LandingFact, risk: &R) -> bool
where
    R: RiskAssessment + ?Sized,
{
    landing.is_data_never_expected() && risk.is_high_risk(risk.total_risk_score(landing))
}

fn is_pending_landing_data(landing: &LandingFact, now: DateTime<Utc>) -> bool {
    (landing.is_data_ever_expected() && !landing.is_landing_exists)
        || (is_elog_within_deminimis(landing) && is_in_retrospective_period(now, landing))
}

fn is_no_landing_data(landing: &LandingFact) -> bool {
    !landing.is_landing_exists
        && landing.is_data_ever_expected()
        && is_after_landing_data_end(landing.created_at, landing.landing_data_end_date)
}
