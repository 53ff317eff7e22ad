use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::domain::LandingFact;

const DEFAULT_RISK_THRESHOLD: f64 = 1.0;
const UNKNOWN_ENTITY_SCORE: f64 = 1.0;

/// Risk-scoring seam consumed by the classification rules.
pub trait RiskAssessment: Send + Sync {
    /// Combined vessel, species and exporter score for a landing line.
    fn total_risk_score(&self, landing: &LandingFact) -> f64;
    fn is_high_risk(&self, score: f64) -> bool;
    /// Feature toggle gating the risk-aware species check.
    fn is_risk_enabled(&self) -> bool;
}

/// Relative importance of each risk dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskWeighting {
    pub vessel: f64,
    pub species: f64,
    pub exporter: f64,
}

impl Default for RiskWeighting {
    fn default() -> Self {
        Self {
            vessel: 1.0,
            species: 1.0,
            exporter: 1.0,
        }
    }
}

/// Table-driven risk model. Unknown vessels, species and exporters score 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskModel {
    threshold: f64,
    enabled: bool,
    weighting: RiskWeighting,
    #[serde(default)]
    vessel_scores: HashMap<String, f64>,
    #[serde(default)]
    species_scores: HashMap<String, f64>,
    #[serde(default)]
    exporter_scores: HashMap<String, f64>,
}

impl Default for RiskModel {
    fn default() -> Self {
        Self::new(DEFAULT_RISK_THRESHOLD, true, RiskWeighting::default())
    }
}

impl RiskModel {
    pub fn new(threshold: f64, enabled: bool, weighting: RiskWeighting) -> Self {
        let threshold = if threshold.is_finite() {
            threshold
        } else {
            DEFAULT_RISK_THRESHOLD
        };

        Self {
            threshold,
            enabled,
            weighting,
            vessel_scores: HashMap::new(),
            species_scores: HashMap::new(),
            exporter_scores: HashMap::new(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn with_vessel_score(mut self, pln: impl Into<String>, score: f64) -> Self {
        self.vessel_scores.insert(normalize_key(&pln.into()), score);
        self
    }

    pub fn with_species_score(mut self, species_code: impl Into<String>, score: f64) -> Self {
        self.species_scores
            .insert(normalize_key(&species_code.into()), score);
        self
    }

    /// Exporter scores are keyed by either the account id or the contact id.
    pub fn with_exporter_score(mut self, exporter_id: impl Into<String>, score: f64) -> Self {
        self.exporter_scores
            .insert(normalize_key(&exporter_id.into()), score);
        self
    }

    /// Merge score tables into this model; later entries win.
    pub fn extend_scores(&mut self, overrides: &RiskScoreOverrides) {
        for (pln, score) in &overrides.vessels {
            self.vessel_scores.insert(normalize_key(pln), *score);
        }
        for (species, score) in &overrides.species {
            self.species_scores.insert(normalize_key(species), *score);
        }
        for (exporter, score) in &overrides.exporters {
            self.exporter_scores.insert(normalize_key(exporter), *score);
        }
    }

    fn vessel_score(&self, pln: &str) -> f64 {
        lookup(&self.vessel_scores, pln)
    }

    fn species_score(&self, species_code: &str) -> f64 {
        lookup(&self.species_scores, species_code)
    }

    fn exporter_score(&self, account_id: Option<&str>, contact_id: Option<&str>) -> f64 {
        account_id
            .and_then(|id| self.exporter_scores.get(&normalize_key(id)))
            .or_else(|| contact_id.and_then(|id| self.exporter_scores.get(&normalize_key(id))))
            .copied()
            .unwrap_or(UNKNOWN_ENTITY_SCORE)
    }
}

impl RiskAssessment for RiskModel {
    fn total_risk_score(&self, landing: &LandingFact) -> f64 {
        let vessel = self.weighting.vessel * self.vessel_score(&landing.pln);
        let species = self.weighting.species * self.species_score(&landing.species_code);
        let exporter = self.weighting.exporter
            * self.exporter_score(
                landing.exporter_account_id.as_deref(),
                landing.exporter_contact_id.as_deref(),
            );

        vessel * species * exporter
    }

    fn is_high_risk(&self, score: f64) -> bool {
        score > self.threshold
    }

    fn is_risk_enabled(&self) -> bool {
        self.enabled
    }
}

/// Score tables supplied alongside a request, e.g. vessels of interest flagged after submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskScoreOverrides {
    #[serde(default)]
    pub vessels: HashMap<String, f64>,
    #[serde(default)]
    pub species: HashMap<String, f64>,
    #[serde(default)]
    pub exporters: HashMap<String, f64>,
}

impl RiskScoreOverrides {
    pub fn is_empty(&self) -> bool {
        self.vessels.is_empty() && self.species.is_empty() && self.exporters.is_empty()
    }
}

fn lookup(table: &HashMap<String, f64>, key: &str) -> f64 {
    table
        .get(&normalize_key(key))
        .copied()
        .unwrap_or(UNKNOWN_ENTITY_SCORE)
}

fn normalize_key(value: &str) -> String {
    value.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::landings::tests::common::landing;

    #[test]
    fn unknown_entities_score_one_and_stay_low_risk() {
        let model = RiskModel::default();
        let score = model.total_risk_score(&landing());

        assert_eq!(score, 1.0);
        assert!(!model.is_high_risk(score));
    }

    #[test]
    fn scores_multiply_across_dimensions() {
        let mut fact = landing();
        fact.exporter_contact_id = Some("contact-9".to_string());
        let model = RiskModel::default()
            .with_vessel_score(fact.pln.to_lowercase(), 2.0)
            .with_species_score(fact.species_code.clone(), 0.5)
            .with_exporter_score("CONTACT-9", 3.0);

        let score = model.total_risk_score(&fact);

        assert_eq!(score, 3.0);
        assert!(model.is_high_risk(score));
    }

    #[test]
    fn threshold_itself_is_not_high_risk() {
        let model = RiskModel::new(2.0, true, RiskWeighting::default());
        assert!(!model.is_high_risk(2.0));
        assert!(model.is_high_risk(2.01));
    }

    #[test]
    fn overrides_replace_existing_scores() {
        let fact = landing();
        let mut model = RiskModel::default().with_vessel_score(fact.pln.clone(), 5.0);
        let mut overrides = RiskScoreOverrides::default();
        overrides.vessels.insert(fact.pln.clone(), 0.2);

        model.extend_scores(&overrides);

        assert!((model.total_risk_score(&fact) - 0.2).abs() < f64::EPSILON);
    }
}
