use super::super::domain::{LandingFact, LandingSource};
use super::super::risk::RiskAssessment;
use super::rules::{
    is_weight_failure, is_within_deminimis, species_failure, DEMINIMIS_THRESHOLD_KG,
};
use super::temporal::is_landing_data_expected_at_submission;

/// Individual reasons a landing can be rejected. A landing may fail several at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionCheck {
    Weight,
    Species,
    NoLandingData,
    MissingLicenceHolder,
}

impl RejectionCheck {
    pub const fn label(self) -> &'static str {
        match self {
            RejectionCheck::Weight => "weight",
            RejectionCheck::Species => "species",
            RejectionCheck::NoLandingData => "no landing data",
            RejectionCheck::MissingLicenceHolder => "missing licence holder",
        }
    }
}

/// Is this landing rejected at the current risk score?
pub fn is_rejected<R>(landing: &LandingFact, risk: &R) -> bool
where
    R: RiskAssessment + ?Sized,
{
    !rejection_checks(landing, risk).is_empty()
}

/// Every failing check for a landing; empty for pre-approved landings.
pub fn rejection_checks<R>(landing: &LandingFact, risk: &R) -> Vec<RejectionCheck>
where
    R: RiskAssessment + ?Sized,
{
    if landing.is_pre_approved {
        return Vec::new();
    }

    let is_high_risk = risk.is_high_risk(risk.total_risk_score(landing));
    let mut failed = Vec::new();

    if is_weight_failure(landing, is_high_risk) {
        failed.push(RejectionCheck::Weight);
    }

    if fails_species_check(landing, risk.is_risk_enabled(), is_high_risk) {
        failed.push(RejectionCheck::Species);
    }

    if fails_no_landing_data_check(landing, is_high_risk) {
        failed.push(RejectionCheck::NoLandingData);
    }

    if !landing.has_licence_holder() {
        failed.push(RejectionCheck::MissingLicenceHolder);
    }

    failed
}

fn fails_species_check(landing: &LandingFact, risk_enabled: bool, is_high_risk: bool) -> bool {
    let elog_within_deminimis = landing.source == Some(LandingSource::ELog)
        && is_within_deminimis(
            landing.is_species_exists,
            landing.weight_on_cert,
            DEMINIMIS_THRESHOLD_KG,
        );

    species_failure(risk_enabled, landing.is_species_exists, is_high_risk)
        && !elog_within_deminimis
        && landing.is_landing_exists
}

fn fails_no_landing_data_check(landing: &LandingFact, is_high_risk: bool) -> bool {
    let expected = landing.is_data_ever_expected()
        && is_landing_data_expected_at_submission(
            landing.created_at,
            landing.landing_data_expected_date,
        );

    !landing.is_landing_exists
        && is_high_risk
        && (expected || landing.vessel_overridden_by_admin)
}
