use super::common::{
    date, elog_species_mismatch, high_risk, landing, low_risk, missing_landing,
    overweight_landing,
};
use crate::workflows::landings::classification::{is_rejected, rejection_checks, RejectionCheck};
use crate::workflows::landings::domain::LandingSource;
use crate::workflows::landings::risk::{RiskModel, RiskWeighting};

#[test]
fn clean_landing_passes_at_any_risk() {
    assert!(!is_rejected(&landing(), &low_risk()));
    assert!(!is_rejected(&landing(), &high_risk()));
}

#[test]
fn weight_failure_only_rejects_high_risk_landings() {
    let fact = overweight_landing();

    assert!(!is_rejected(&fact, &low_risk()));
    assert_eq!(
        rejection_checks(&fact, &high_risk()),
        vec![RejectionCheck::Weight]
    );
}

#[test]
fn species_mismatch_rejects_when_risk_scoring_disabled() {
    let mut fact = landing();
    fact.is_species_exists = false;
    let disabled = RiskModel::new(1.0, false, RiskWeighting::default());

    assert!(!is_rejected(&fact, &low_risk()));
    assert_eq!(
        rejection_checks(&fact, &disabled),
        vec![RejectionCheck::Species]
    );
}

#[test]
fn elog_deminimis_boundary_is_inclusive() {
    let at_threshold = elog_species_mismatch(50.0);
    let over_threshold = elog_species_mismatch(51.0);

    assert!(!is_rejected(&at_threshold, &high_risk()));
    assert_eq!(
        rejection_checks(&over_threshold, &high_risk()),
        vec![RejectionCheck::Species]
    );
}

#[test]
fn deminimis_tolerance_does_not_apply_to_declarations() {
    let mut fact = elog_species_mismatch(20.0);
    fact.source = Some(LandingSource::LandingDeclaration);

    assert!(is_rejected(&fact, &high_risk()));
}

#[test]
fn missing_landing_data_rejects_once_expected() {
    let fact = missing_landing();

    assert_eq!(
        rejection_checks(&fact, &high_risk()),
        vec![RejectionCheck::NoLandingData]
    );
    assert!(!is_rejected(&fact, &low_risk()));
}

#[test]
fn missing_landing_data_passes_before_expected_date() {
    let mut fact = missing_landing();
    fact.landing_data_expected_date = Some(date(2024, 3, 20));

    assert!(!is_rejected(&fact, &high_risk()));

    fact.landing_data_expected_date = None;
    assert!(!is_rejected(&fact, &high_risk()));
}

#[test]
fn expected_on_creation_day_counts_as_expected() {
    let mut fact = missing_landing();
    fact.landing_data_expected_date = Some(fact.created_at.date_naive());

    assert!(is_rejected(&fact, &high_risk()));
}

#[test]
fn admin_vessel_override_rejects_missing_data_regardless_of_expectation() {
    let mut fact = missing_landing();
    fact.data_ever_expected = Some(false);
    assert!(!is_rejected(&fact, &high_risk()));

    fact.vessel_overridden_by_admin = true;
    fact.landing_data_expected_date = None;
    assert_eq!(
        rejection_checks(&fact, &high_risk()),
        vec![RejectionCheck::NoLandingData]
    );
}

#[test]
fn missing_licence_holder_rejects_at_any_risk() {
    let mut fact = landing();
    fact.licence_holder = None;
    assert_eq!(
        rejection_checks(&fact, &low_risk()),
        vec![RejectionCheck::MissingLicenceHolder]
    );

    fact.licence_holder = Some("   ".to_string());
    assert!(is_rejected(&fact, &low_risk()));
}

#[test]
fn failing_checks_are_all_reported() {
    let mut fact = overweight_landing();
    fact.licence_holder = None;

    let checks = rejection_checks(&fact, &high_risk());
    assert_eq!(
        checks,
        vec![RejectionCheck::Weight, RejectionCheck::MissingLicenceHolder]
    );
    assert_eq!(checks[1].label(), "missing licence holder");
}

#[test]
fn pre_approved_landings_are_never_rejected() {
    let mut fact = overweight_landing();
    fact.licence_holder = None;
    fact.is_pre_approved = true;

    assert!(rejection_checks(&fact, &high_risk()).is_empty());
    assert!(!is_rejected(&fact, &high_risk()));
}
