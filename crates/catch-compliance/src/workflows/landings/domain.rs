use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for export documents (catch certificates, processing statements, storage documents).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentNumber(pub String);

impl DocumentNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "catchCertificate")]
    CatchCertificate,
    #[serde(rename = "processingStatement")]
    ProcessingStatement,
    #[serde(rename = "storageDocument")]
    StorageDocument,
}

impl DocumentType {
    pub const fn label(self) -> &'static str {
        match self {
            DocumentType::CatchCertificate => "catchCertificate",
            DocumentType::ProcessingStatement => "processingStatement",
            DocumentType::StorageDocument => "storageDocument",
        }
    }
}

/// Provenance of the landing data matched against a document line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LandingSource {
    #[serde(rename = "ELOG")]
    ELog,
    #[serde(rename = "LANDING_DECLARATION")]
    LandingDeclaration,
    #[serde(rename = "CATCH_RECORDING")]
    CatchRecording,
}

impl LandingSource {
    pub const fn label(self) -> &'static str {
        match self {
            LandingSource::ELog => "ELOG",
            LandingSource::LandingDeclaration => "LANDING_DECLARATION",
            LandingSource::CatchRecording => "CATCH_RECORDING",
        }
    }
}

/// Read-only snapshot of one catch/landing line on an export document, joined with the
/// landing evidence available at the time it was taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingFact {
    pub document_number: DocumentNumber,
    pub pln: String,
    #[serde(default)]
    pub rss_number: Option<String>,
    #[serde(default)]
    pub vessel_name: Option<String>,
    pub species_code: String,
    #[serde(default)]
    pub exporter_account_id: Option<String>,
    #[serde(default)]
    pub exporter_contact_id: Option<String>,

    pub weight_on_cert: f64,
    #[serde(default)]
    pub raw_weight_on_cert: f64,
    #[serde(default)]
    pub weight_on_all_certs: f64,
    #[serde(default)]
    pub weight_on_landing: Option<f64>,

    pub is_landing_exists: bool,
    pub is_species_exists: bool,
    #[serde(default)]
    pub is_overused_this_cert: bool,
    #[serde(default)]
    pub is_overused_all_certs: bool,
    #[serde(default)]
    pub over_used_info: BTreeSet<String>,

    pub created_at: DateTime<Utc>,
    pub date_landed: NaiveDate,
    #[serde(default)]
    pub landing_data_expected_date: Option<NaiveDate>,
    #[serde(default)]
    pub landing_data_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub first_date_time_landing_data_retrieved: Option<DateTime<Utc>>,
    /// Absent and `Some(true)` both mean landing data is expected for this vessel.
    #[serde(default)]
    pub data_ever_expected: Option<bool>,

    #[serde(default)]
    pub vessel_overridden_by_admin: bool,
    #[serde(default)]
    pub species_overridden_by_admin: bool,
    #[serde(default)]
    pub is_pre_approved: bool,
    #[serde(default)]
    pub source: Option<LandingSource>,
    #[serde(default)]
    pub licence_holder: Option<String>,

    /// Batch-computed flags carried through from the landing reconciliation job.
    #[serde(default)]
    pub is_14_day_limit_reached: bool,
    #[serde(default)]
    pub is_legally_due: bool,
}

impl LandingFact {
    pub fn is_data_ever_expected(&self) -> bool {
        self.data_ever_expected != Some(false)
    }

    pub fn is_data_never_expected(&self) -> bool {
        self.data_ever_expected == Some(false)
    }

    /// Blank and whitespace-only holders count as missing.
    pub fn has_licence_holder(&self) -> bool {
        self.licence_holder
            .as_deref()
            .map(|holder| !holder.trim().is_empty())
            .unwrap_or(false)
    }

    /// Blank and whitespace-only numbers count as missing.
    pub fn has_rss_number(&self) -> bool {
        self.rss_number
            .as_deref()
            .map(|rss| !rss.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Per-landing status produced by the elementary taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementaryStatus {
    ValidationSuccess,
    #[serde(rename = "ValidationFailure_Weight")]
    ValidationFailureWeight,
    #[serde(rename = "ValidationFailure_Species")]
    ValidationFailureSpecies,
    #[serde(rename = "ValidationFailure_Overuse")]
    ValidationFailureOveruse,
    #[serde(rename = "ValidationFailure_WeightAndOveruse")]
    ValidationFailureWeightAndOveruse,
    #[serde(rename = "ValidationFailure_NoLandingData")]
    ValidationFailureNoLandingData,
    #[serde(rename = "PendingLandingData_DataExpected")]
    PendingLandingDataDataExpected,
    #[serde(rename = "PendingLandingData_DataNotYetExpected")]
    PendingLandingDataDataNotYetExpected,
    #[serde(rename = "PendingLandingData_ElogSpecies")]
    PendingLandingDataElogSpecies,
    DataNeverExpected,
}

impl ElementaryStatus {
    pub const fn ordered() -> [Self; 10] {
        [
            Self::ValidationSuccess,
            Self::ValidationFailureWeight,
            Self::ValidationFailureSpecies,
            Self::ValidationFailureOveruse,
            Self::ValidationFailureWeightAndOveruse,
            Self::ValidationFailureNoLandingData,
            Self::PendingLandingDataDataExpected,
            Self::PendingLandingDataDataNotYetExpected,
            Self::PendingLandingDataElogSpecies,
            Self::DataNeverExpected,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ValidationSuccess => "ValidationSuccess",
            Self::ValidationFailureWeight => "ValidationFailure_Weight",
            Self::ValidationFailureSpecies => "ValidationFailure_Species",
            Self::ValidationFailureOveruse => "ValidationFailure_Overuse",
            Self::ValidationFailureWeightAndOveruse => "ValidationFailure_WeightAndOveruse",
            Self::ValidationFailureNoLandingData => "ValidationFailure_NoLandingData",
            Self::PendingLandingDataDataExpected => "PendingLandingData_DataExpected",
            Self::PendingLandingDataDataNotYetExpected => {
                "PendingLandingData_DataNotYetExpected"
            }
            Self::PendingLandingDataElogSpecies => "PendingLandingData_ElogSpecies",
            Self::DataNeverExpected => "DataNeverExpected",
        }
    }
}

/// Landing status as presented outside the submission context. Identical to
/// [`ElementaryStatus`] apart from the generic `PendingLandingData` bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LandingStatus {
    ValidationSuccess,
    #[serde(rename = "ValidationFailure_Weight")]
    ValidationFailureWeight,
    #[serde(rename = "ValidationFailure_Species")]
    ValidationFailureSpecies,
    #[serde(rename = "ValidationFailure_Overuse")]
    ValidationFailureOveruse,
    #[serde(rename = "ValidationFailure_WeightAndOveruse")]
    ValidationFailureWeightAndOveruse,
    #[serde(rename = "ValidationFailure_NoLandingData")]
    ValidationFailureNoLandingData,
    #[serde(rename = "PendingLandingData_DataExpected")]
    PendingLandingDataDataExpected,
    #[serde(rename = "PendingLandingData_DataNotYetExpected")]
    PendingLandingDataDataNotYetExpected,
    #[serde(rename = "PendingLandingData_ElogSpecies")]
    PendingLandingDataElogSpecies,
    PendingLandingData,
    DataNeverExpected,
}

impl LandingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ValidationSuccess => "ValidationSuccess",
            Self::ValidationFailureWeight => "ValidationFailure_Weight",
            Self::ValidationFailureSpecies => "ValidationFailure_Species",
            Self::ValidationFailureOveruse => "ValidationFailure_Overuse",
            Self::ValidationFailureWeightAndOveruse => "ValidationFailure_WeightAndOveruse",
            Self::ValidationFailureNoLandingData => "ValidationFailure_NoLandingData",
            Self::PendingLandingDataDataExpected => "PendingLandingData_DataExpected",
            Self::PendingLandingDataDataNotYetExpected => {
                "PendingLandingData_DataNotYetExpected"
            }
            Self::PendingLandingDataElogSpecies => "PendingLandingData_ElogSpecies",
            Self::PendingLandingData => "PendingLandingData",
            Self::DataNeverExpected => "DataNeverExpected",
        }
    }
}

impl From<ElementaryStatus> for LandingStatus {
    fn from(status: ElementaryStatus) -> Self {
        match status {
            ElementaryStatus::ValidationSuccess => Self::ValidationSuccess,
            ElementaryStatus::ValidationFailureWeight => Self::ValidationFailureWeight,
            ElementaryStatus::ValidationFailureSpecies => Self::ValidationFailureSpecies,
            ElementaryStatus::ValidationFailureOveruse => Self::ValidationFailureOveruse,
            ElementaryStatus::ValidationFailureWeightAndOveruse => {
                Self::ValidationFailureWeightAndOveruse
            }
            ElementaryStatus::ValidationFailureNoLandingData => {
                Self::ValidationFailureNoLandingData
            }
            ElementaryStatus::PendingLandingDataDataExpected => {
                Self::PendingLandingDataDataExpected
            }
            ElementaryStatus::PendingLandingDataDataNotYetExpected => {
                Self::PendingLandingDataDataNotYetExpected
            }
            ElementaryStatus::PendingLandingDataElogSpecies => Self::PendingLandingDataElogSpecies,
            ElementaryStatus::DataNeverExpected => Self::DataNeverExpected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Low,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Low => "Low",
        }
    }

    pub const fn from_high_risk(is_high_risk: bool) -> Self {
        if is_high_risk {
            RiskLevel::High
        } else {
            RiskLevel::Low
        }
    }
}

/// Per-landing verdict of the rejection gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LandingOutcome {
    Success,
    Rejected,
}

impl LandingOutcome {
    pub const fn label(self) -> &'static str {
        match self {
            LandingOutcome::Success => "Success",
            LandingOutcome::Rejected => "Rejected",
        }
    }

    pub const fn from_rejected(is_rejected: bool) -> Self {
        if is_rejected {
            LandingOutcome::Rejected
        } else {
            LandingOutcome::Success
        }
    }
}

/// Real-time, document-level classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseTwoType {
    Success,
    #[serde(rename = "RealTimeValidation_Rejected")]
    RealTimeValidationRejected,
    #[serde(rename = "RealTimeValidation_Overuse")]
    RealTimeValidationOveruse,
    #[serde(rename = "RealTimeValidation_NoLandingData")]
    RealTimeValidationNoLandingData,
    PendingLandingData,
    DataNeverExpected,
    VoidByAdmin,
    VoidByExporter,
}

impl CaseTwoType {
    pub const fn label(self) -> &'static str {
        match self {
            CaseTwoType::Success => "Success",
            CaseTwoType::RealTimeValidationRejected => "RealTimeValidation_Rejected",
            CaseTwoType::RealTimeValidationOveruse => "RealTimeValidation_Overuse",
            CaseTwoType::RealTimeValidationNoLandingData => "RealTimeValidation_NoLandingData",
            CaseTwoType::PendingLandingData => "PendingLandingData",
            CaseTwoType::DataNeverExpected => "DataNeverExpected",
            CaseTwoType::VoidByAdmin => "VoidByAdmin",
            CaseTwoType::VoidByExporter => "VoidByExporter",
        }
    }

    pub const fn is_void(self) -> bool {
        matches!(self, CaseTwoType::VoidByAdmin | CaseTwoType::VoidByExporter)
    }

    /// Parses either the wire label or the variant name.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        [
            CaseTwoType::Success,
            CaseTwoType::RealTimeValidationRejected,
            CaseTwoType::RealTimeValidationOveruse,
            CaseTwoType::RealTimeValidationNoLandingData,
            CaseTwoType::PendingLandingData,
            CaseTwoType::DataNeverExpected,
            CaseTwoType::VoidByAdmin,
            CaseTwoType::VoidByExporter,
        ]
        .into_iter()
        .find(|case_type| {
            case_type.label().eq_ignore_ascii_case(trimmed)
                || format!("{case_type:?}").eq_ignore_ascii_case(trimmed)
        })
    }
}

/// Document status recorded for audit at submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseStatusAtSubmission {
    ValidationSuccess,
    ValidationFailure,
    #[serde(rename = "ValidationFailure_NoLandingData")]
    ValidationFailureNoLandingData,
    #[serde(rename = "PendingLandingData_DataExpected")]
    PendingLandingDataDataExpected,
    #[serde(rename = "PendingLandingData_DataNotYetExpected")]
    PendingLandingDataDataNotYetExpected,
    DataNeverExpected,
}

impl CaseStatusAtSubmission {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ValidationSuccess => "ValidationSuccess",
            Self::ValidationFailure => "ValidationFailure",
            Self::ValidationFailureNoLandingData => "ValidationFailure_NoLandingData",
            Self::PendingLandingDataDataExpected => "PendingLandingData_DataExpected",
            Self::PendingLandingDataDataNotYetExpected => {
                "PendingLandingData_DataNotYetExpected"
            }
            Self::DataNeverExpected => "DataNeverExpected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseOutcomeAtSubmission {
    Issued,
    Rejected,
}

impl CaseOutcomeAtSubmission {
    pub const fn label(self) -> &'static str {
        match self {
            CaseOutcomeAtSubmission::Issued => "Issued",
            CaseOutcomeAtSubmission::Rejected => "Rejected",
        }
    }
}

/// Inbound document: all landing lines of one export document plus the case type
/// previously recorded for it, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSubmission {
    pub document_number: DocumentNumber,
    pub document_type: DocumentType,
    #[serde(default)]
    pub exporter_postcode: Option<String>,
    #[serde(default)]
    pub prior_case_type: Option<CaseTwoType>,
    pub landings: Vec<LandingFact>,
}
