use serde::{Deserialize, Serialize};

use super::case::DocumentCase;
use super::domain::{DocumentNumber, DocumentSubmission};

/// Stored case: the facts as submitted and the case assembled from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRecord {
    pub submission: DocumentSubmission,
    pub case: DocumentCase,
}

impl CaseRecord {
    pub fn document_number(&self) -> &DocumentNumber {
        &self.case.document_number
    }
}

/// Storage abstraction so the service can be exercised without a backing store.
pub trait CaseRepository: Send + Sync {
    fn insert(&self, record: CaseRecord) -> Result<CaseRecord, RepositoryError>;
    fn update(&self, record: CaseRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &DocumentNumber) -> Result<Option<CaseRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("case already exists")]
    Conflict,
    #[error("case not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
