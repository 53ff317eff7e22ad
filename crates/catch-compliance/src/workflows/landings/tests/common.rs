use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::landings::domain::{
    DocumentNumber, DocumentSubmission, DocumentType, LandingFact, LandingSource,
};
use crate::workflows::landings::repository::{CaseRecord, CaseRepository, RepositoryError};
use crate::workflows::landings::risk::{RiskModel, RiskWeighting};
use crate::workflows::landings::{case_router, ComplianceCaseService};

pub(crate) const DOCUMENT_NUMBER: &str = "GBR-2024-CC-C58DF9A4C";

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(crate) fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid timestamp")
}

/// A landing that passes every check: landed, species matched, no overuse, licence holder set.
pub(crate) fn landing() -> LandingFact {
    LandingFact {
        document_number: DocumentNumber(DOCUMENT_NUMBER.to_string()),
        pln: "BM111".to_string(),
        rss_number: Some("C20514".to_string()),
        vessel_name: Some("WIRON 5".to_string()),
        species_code: "COD".to_string(),
        exporter_account_id: None,
        exporter_contact_id: Some("contact-4f1".to_string()),
        weight_on_cert: 100.0,
        raw_weight_on_cert: 100.0,
        weight_on_all_certs: 100.0,
        weight_on_landing: Some(250.0),
        is_landing_exists: true,
        is_species_exists: true,
        is_overused_this_cert: false,
        is_overused_all_certs: false,
        over_used_info: BTreeSet::new(),
        created_at: at(2024, 3, 5, 9, 30),
        date_landed: date(2024, 3, 1),
        landing_data_expected_date: Some(date(2024, 3, 2)),
        landing_data_end_date: Some(date(2024, 3, 15)),
        first_date_time_landing_data_retrieved: Some(at(2024, 3, 2, 6, 0)),
        data_ever_expected: None,
        vessel_overridden_by_admin: false,
        species_overridden_by_admin: false,
        is_pre_approved: false,
        source: Some(LandingSource::LandingDeclaration),
        licence_holder: Some("Jane Skipper".to_string()),
        is_14_day_limit_reached: false,
        is_legally_due: true,
    }
}

/// Landing line with no landing data matched yet.
pub(crate) fn missing_landing() -> LandingFact {
    let mut fact = landing();
    fact.is_landing_exists = false;
    fact.is_species_exists = false;
    fact.weight_on_landing = None;
    fact.first_date_time_landing_data_retrieved = None;
    fact.source = None;
    fact
}

/// Landing where this certificate claims more than was landed.
pub(crate) fn overweight_landing() -> LandingFact {
    let mut fact = landing();
    fact.is_overused_this_cert = true;
    fact.weight_on_cert = 300.0;
    fact
}

/// ELog landing with an unmatched species.
pub(crate) fn elog_species_mismatch(weight_on_cert: f64) -> LandingFact {
    let mut fact = landing();
    fact.is_species_exists = false;
    fact.weight_on_cert = weight_on_cert;
    fact.source = Some(LandingSource::ELog);
    fact
}

/// Every landing scores 1.0, which stays at or under the default threshold.
pub(crate) fn low_risk() -> RiskModel {
    RiskModel::default()
}

/// Every landing scores 1.0, which is above this threshold.
pub(crate) fn high_risk() -> RiskModel {
    RiskModel::new(0.5, true, RiskWeighting::default())
}

pub(crate) fn document(landings: Vec<LandingFact>) -> DocumentSubmission {
    DocumentSubmission {
        document_number: DocumentNumber(DOCUMENT_NUMBER.to_string()),
        document_type: DocumentType::CatchCertificate,
        exporter_postcode: Some("AB10 1AA".to_string()),
        prior_case_type: None,
        landings,
    }
}

pub(crate) fn build_service(
    risk: RiskModel,
) -> (ComplianceCaseService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = ComplianceCaseService::new(repository.clone(), risk);
    (service, repository)
}

pub(crate) fn case_router_with_service(
    service: ComplianceCaseService<MemoryRepository>,
) -> axum::Router {
    case_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(crate) struct MemoryRepository {
    pub(crate) records: Arc<Mutex<HashMap<DocumentNumber, CaseRecord>>>,
}

impl CaseRepository for MemoryRepository {
    fn insert(&self, record: CaseRecord) -> Result<CaseRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(record.document_number()) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.document_number().clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: CaseRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.document_number().clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &DocumentNumber) -> Result<Option<CaseRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(crate) struct UnavailableRepository;

impl CaseRepository for UnavailableRepository {
    fn insert(&self, _record: CaseRecord) -> Result<CaseRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: CaseRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &DocumentNumber) -> Result<Option<CaseRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(crate) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(crate) fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected);
}
