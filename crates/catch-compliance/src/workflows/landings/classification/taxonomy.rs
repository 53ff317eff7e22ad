use super::super::domain::{ElementaryStatus, LandingFact};
use super::rules::{is_elog_within_deminimis, is_weight_failure};
use super::temporal::{is_after_landing_data_end, is_landing_data_expected_at_submission};

/// Elementary per-landing status at the time the document was created.
pub fn to_landing_status(landing: &LandingFact, is_high_risk: bool) -> ElementaryStatus {
    if landing.is_landing_exists {
        if !landing.is_species_exists {
            return if is_elog_within_deminimis(landing) {
                ElementaryStatus::PendingLandingDataElogSpecies
            } else {
                ElementaryStatus::ValidationFailureSpecies
            };
        }

        let weight = is_weight_failure(landing, is_high_risk);
        let overuse = landing.is_overused_all_certs && is_high_risk;

        return match (weight, overuse) {
            (true, true) => ElementaryStatus::ValidationFailureWeightAndOveruse,
            (true, false) => ElementaryStatus::ValidationFailureWeight,
            (false, true) => ElementaryStatus::ValidationFailureOveruse,
            (false, false) => ElementaryStatus::ValidationSuccess,
        };
    }

    if landing.is_data_never_expected() {
        return ElementaryStatus::DataNeverExpected;
    }

    if is_after_landing_data_end(landing.created_at, landing.landing_data_end_date) {
        return ElementaryStatus::ValidationFailureNoLandingData;
    }

    if is_landing_data_expected_at_submission(landing.created_at, landing.landing_data_expected_date)
    {
        ElementaryStatus::PendingLandingDataDataExpected
    } else {
        ElementaryStatus::PendingLandingDataDataNotYetExpected
    }
}
