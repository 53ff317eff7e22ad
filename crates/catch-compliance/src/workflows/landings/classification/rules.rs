use super::super::domain::{LandingFact, LandingSource};

/// Species mismatches up to this weight are tolerated for electronic-logbook landings.
pub const DEMINIMIS_THRESHOLD_KG: f64 = 50.0;

/// With risk scoring enabled only high-risk species mismatches fail; with it disabled every
/// mismatch does.
pub fn species_failure(risk_enabled: bool, species_exists: bool, is_high_risk: bool) -> bool {
    if risk_enabled {
        !species_exists && is_high_risk
    } else {
        !species_exists
    }
}

/// Inclusive at the threshold.
pub fn is_within_deminimis(species_exists: bool, weight_on_cert_kg: f64, threshold_kg: f64) -> bool {
    !species_exists && weight_on_cert_kg <= threshold_kg
}

pub fn is_elog<F>(predicate: F) -> impl Fn(&LandingFact) -> bool
where
    F: Fn(&LandingFact) -> bool,
{
    move |landing| landing.source == Some(LandingSource::ELog) && predicate(landing)
}

pub fn is_elog_within_deminimis(landing: &LandingFact) -> bool {
    is_elog(|fact: &LandingFact| {
        is_within_deminimis(
            fact.is_species_exists,
            fact.weight_on_cert,
            DEMINIMIS_THRESHOLD_KG,
        )
    })(landing)
}

/// Weight check: the species was landed but this certificate claims more than the landing.
pub(crate) fn is_weight_failure(landing: &LandingFact, is_high_risk: bool) -> bool {
    landing.is_species_exists && landing.is_overused_this_cert && is_high_risk
}

/// Weight and species pass for this certificate, but the landing is exhausted across all
/// certificates.
pub(crate) fn is_overuse_only_failure(
    landing: &LandingFact,
    risk_enabled: bool,
    is_high_risk: bool,
) -> bool {
    landing.is_landing_exists
        && !is_weight_failure(landing, is_high_risk)
        && !species_failure(risk_enabled, landing.is_species_exists, is_high_risk)
        && landing.is_overused_all_certs
        && is_high_risk
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::landings::tests::common::landing;

    #[test]
    fn species_failure_respects_risk_toggle() {
        assert!(species_failure(true, false, true));
        assert!(!species_failure(true, false, false));
        assert!(species_failure(false, false, false));
        assert!(!species_failure(false, true, true));
    }

    #[test]
    fn deminimis_is_inclusive_at_threshold() {
        assert!(is_within_deminimis(false, 50.0, DEMINIMIS_THRESHOLD_KG));
        assert!(!is_within_deminimis(false, 50.01, DEMINIMIS_THRESHOLD_KG));
        assert!(!is_within_deminimis(true, 10.0, DEMINIMIS_THRESHOLD_KG));
    }

    #[test]
    fn deminimis_exemption_only_applies_to_elog() {
        let mut fact = landing();
        fact.is_species_exists = false;
        fact.weight_on_cert = 20.0;

        fact.source = Some(LandingSource::LandingDeclaration);
        assert!(!is_elog_within_deminimis(&fact));

        fact.source = None;
        assert!(!is_elog_within_deminimis(&fact));

        fact.source = Some(LandingSource::ELog);
        assert!(is_elog_within_deminimis(&fact));
    }
}
