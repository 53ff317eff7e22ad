use super::domain::{DocumentSubmission, LandingFact};

/// Contract violations rejected before a document reaches the classifier.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SubmissionViolation {
    #[error("document number is required")]
    MissingDocumentNumber,
    #[error("document {0} has no landings")]
    NoLandings(String),
    #[error("landing {index} is missing {field}")]
    MissingLandingField { index: usize, field: &'static str },
    #[error("landing {index} belongs to document {found}, expected {expected}")]
    ForeignLanding {
        index: usize,
        expected: String,
        found: String,
    },
    #[error("landing {index} has an invalid {field} weight ({value})")]
    InvalidWeight {
        index: usize,
        field: &'static str,
        value: f64,
    },
}

/// Guard checking that a submission is well formed enough to classify.
#[derive(Debug, Clone, Default)]
pub struct SubmissionGuard;

impl SubmissionGuard {
    /// Canonicalise document numbers, then validate. The engine and repository only ever see
    /// the returned document.
    pub fn admit(
        &self,
        mut document: DocumentSubmission,
    ) -> Result<DocumentSubmission, SubmissionViolation> {
        canonicalize(&mut document);
        self.validate(&document)?;
        Ok(document)
    }

    pub fn validate(&self, document: &DocumentSubmission) -> Result<(), SubmissionViolation> {
        let document_number = document.document_number.as_str().trim();
        if document_number.is_empty() {
            return Err(SubmissionViolation::MissingDocumentNumber);
        }

        if document.landings.is_empty() {
            return Err(SubmissionViolation::NoLandings(document_number.to_string()));
        }

        for (index, landing) in document.landings.iter().enumerate() {
            validate_landing(index, document_number, landing)?;
        }

        Ok(())
    }
}

fn canonicalize(document: &mut DocumentSubmission) {
    trim_in_place(&mut document.document_number.0);
    for landing in &mut document.landings {
        trim_in_place(&mut landing.document_number.0);
        landing.over_used_info = std::mem::take(&mut landing.over_used_info)
            .into_iter()
            .map(|other| other.trim().to_string())
            .filter(|other| !other.is_empty())
            .collect();
    }
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

fn validate_landing(
    index: usize,
    document_number: &str,
    landing: &LandingFact,
) -> Result<(), SubmissionViolation> {
    let landing_document = landing.document_number.as_str().trim();
    if landing_document.is_empty() {
        return Err(SubmissionViolation::MissingLandingField {
            index,
            field: "document_number",
        });
    }
    if landing_document != document_number {
        return Err(SubmissionViolation::ForeignLanding {
            index,
            expected: document_number.to_string(),
            found: landing_document.to_string(),
        });
    }
    if landing.pln.trim().is_empty() {
        return Err(SubmissionViolation::MissingLandingField { index, field: "pln" });
    }
    if landing.species_code.trim().is_empty() {
        return Err(SubmissionViolation::MissingLandingField {
            index,
            field: "species_code",
        });
    }

    for (field, value) in [
        ("weight_on_cert", landing.weight_on_cert),
        ("raw_weight_on_cert", landing.raw_weight_on_cert),
        ("weight_on_all_certs", landing.weight_on_all_certs),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(SubmissionViolation::InvalidWeight {
                index,
                field,
                value,
            });
        }
    }

    Ok(())
}
