//! Time-window facts consumed by the gate and classifiers, plus the overrides applied when a
//! landing is presented on a case record.
//!
//! Every comparison here is at calendar-day granularity (UTC) and takes "now" explicitly.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::super::domain::{CaseTwoType, ElementaryStatus, LandingFact, LandingStatus};

/// Days after landing during which late landing data is still chased.
pub const RETROSPECTIVE_PERIOD_DAYS: i64 = 14;

/// Landing data was due on or before the day the document was created.
pub fn is_landing_data_expected_at_submission(
    created_at: DateTime<Utc>,
    expected_date: Option<NaiveDate>,
) -> bool {
    expected_date
        .map(|expected| created_at.date_naive() >= expected)
        .unwrap_or(false)
}

/// The document was created strictly after the last day landing data could arrive. An absent
/// end date is not yet determinable and never counts as passed.
pub fn is_after_landing_data_end(created_at: DateTime<Utc>, end_date: Option<NaiveDate>) -> bool {
    end_date
        .map(|end| created_at.date_naive() > end)
        .unwrap_or(false)
}

pub fn is_landing_data_late(
    first_retrieved_at: Option<DateTime<Utc>>,
    expected_date: Option<NaiveDate>,
) -> bool {
    match (first_retrieved_at, expected_date) {
        (Some(retrieved), Some(expected)) => retrieved.date_naive() > expected,
        _ => false,
    }
}

pub fn is_in_retrospective_period(now: DateTime<Utc>, landing: &LandingFact) -> bool {
    now.date_naive() <= retrospective_period_end(landing)
}

pub fn has_14_day_limit_reached(
    landing: &LandingFact,
    is_data_never_expected: bool,
    now: DateTime<Utc>,
) -> bool {
    is_data_never_expected || now.date_naive() > fourteen_day_limit(landing.date_landed)
}

/// The batch flag holds unless the document is rejected or void, or the limit has been
/// reached by now, in which case it is forced on for every landing of the document.
pub fn fourteen_day_limit_reached(
    case_type: CaseTwoType,
    landing: &LandingFact,
    now: DateTime<Utc>,
) -> bool {
    let forced = match case_type {
        CaseTwoType::RealTimeValidationRejected
        | CaseTwoType::VoidByAdmin
        | CaseTwoType::VoidByExporter => true,
        CaseTwoType::Success
        | CaseTwoType::RealTimeValidationOveruse
        | CaseTwoType::RealTimeValidationNoLandingData
        | CaseTwoType::PendingLandingData
        | CaseTwoType::DataNeverExpected => false,
    };

    if forced || has_14_day_limit_reached(landing, landing.is_data_never_expected(), now) {
        true
    } else {
        landing.is_14_day_limit_reached
    }
}

/// Admin-overridden vessels without a registration number are never legally due.
pub fn legally_due(landing: &LandingFact) -> bool {
    if landing.vessel_overridden_by_admin && !landing.has_rss_number() {
        return false;
    }

    landing.is_legally_due
}

impl LandingStatus {
    /// Collapse the pending sub-statuses into the generic bucket used outside submission.
    pub const fn collapse_pending(self) -> Self {
        match self {
            LandingStatus::PendingLandingDataElogSpecies
            | LandingStatus::PendingLandingDataDataExpected
            | LandingStatus::PendingLandingDataDataNotYetExpected
            | LandingStatus::PendingLandingData => LandingStatus::PendingLandingData,
            LandingStatus::ValidationSuccess
            | LandingStatus::ValidationFailureWeight
            | LandingStatus::ValidationFailureSpecies
            | LandingStatus::ValidationFailureOveruse
            | LandingStatus::ValidationFailureWeightAndOveruse
            | LandingStatus::ValidationFailureNoLandingData
            | LandingStatus::DataNeverExpected => self,
        }
    }
}

pub fn retrospective_status(status: ElementaryStatus) -> LandingStatus {
    LandingStatus::from(status).collapse_pending()
}

/// Other documents sharing the landing. `None` when the landing's own document is the only one.
pub fn exposed_overused_info(landing: &LandingFact) -> Option<Vec<String>> {
    let own = landing.document_number.as_str().trim();
    let others: Vec<String> = landing
        .over_used_info
        .iter()
        .filter(|document| document.trim() != own)
        .cloned()
        .collect();

    if others.is_empty() {
        None
    } else {
        Some(others)
    }
}

fn fourteen_day_limit(date_landed: NaiveDate) -> NaiveDate {
    date_landed + Duration::days(RETROSPECTIVE_PERIOD_DAYS)
}

fn retrospective_period_end(landing: &LandingFact) -> NaiveDate {
    landing
        .landing_data_end_date
        .unwrap_or_else(|| fourteen_day_limit(landing.date_landed))
}
