use crate::infra::{parse_case_type, parse_timestamp, InMemoryCaseRepository};
use catch_compliance::config::AppConfig;
use catch_compliance::error::AppError;
use catch_compliance::workflows::landings::{
    CaseTwoType, ComplianceCaseService, DocumentCase, DocumentNumber, DocumentSubmission,
    DocumentType, LandingCsvImporter, LandingFact, LandingSource, RiskModel, VoidActor,
};
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// JSON document submission, or a CSV export of landing lines (by `.csv` extension)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Document number for CSV input; defaults to the first row's document number
    #[arg(long)]
    pub(crate) document_number: Option<String>,
    /// Evaluation instant (RFC 3339 or YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Case type previously recorded for the document, e.g. VoidByAdmin
    #[arg(long, value_parser = parse_case_type)]
    pub(crate) prior_case_type: Option<CaseTwoType>,
    /// Print the full case record as JSON instead of the summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation instant for the demo (RFC 3339 or YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) now: Option<DateTime<Utc>>,
}

pub(crate) fn run_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let ClassifyArgs {
        input,
        document_number,
        now,
        prior_case_type,
        json,
    } = args;

    let config = AppConfig::load()?;
    let now = now.unwrap_or_else(Utc::now);
    let mut document = load_submission(&input, document_number)?;
    if prior_case_type.is_some() {
        document.prior_case_type = prior_case_type;
    }

    let service = ComplianceCaseService::new(
        Arc::new(InMemoryCaseRepository::default()),
        config.risk.risk_model(),
    );
    let case = service.submit(document, now)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&case)?);
    } else {
        render_case(&case);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let now = args.now.unwrap_or_else(Utc::now);
    let risk = RiskModel::default().with_vessel_score(VESSEL_OF_INTEREST, 2.5);
    let service = ComplianceCaseService::new(Arc::new(InMemoryCaseRepository::default()), risk);

    println!("Catch compliance demo (evaluated at {})", now.to_rfc3339());
    for document in demo_documents(now) {
        let case = service.submit(document, now)?;
        println!();
        render_case(&case);
    }

    let pending = DocumentNumber("GBR-DEMO-CC-002".to_string());
    let later = now + Duration::days(21);
    let retrospective = service.recheck(&pending, later, None)?;
    println!(
        "\nRecheck of {} at {}",
        pending.as_str(),
        later.date_naive()
    );
    for landing in &retrospective.landings {
        println!(
            "  - {} {} -> {} | retrospective period: {} | 14-day limit reached: {}",
            landing.pln,
            landing.species_code,
            landing.status.label(),
            yes_no(landing.is_in_retrospective_period),
            yes_no(landing.is_14_day_limit_reached)
        );
    }

    let voided = service.void(
        &DocumentNumber("GBR-DEMO-CC-001".to_string()),
        VoidActor::Exporter,
        now + Duration::hours(2),
    )?;
    println!(
        "\nVoided {} -> {}",
        voided.document_number.as_str(),
        voided.case_type.label()
    );

    Ok(())
}

fn load_submission(
    input: &Path,
    document_number: Option<String>,
) -> Result<DocumentSubmission, AppError> {
    let is_csv = input
        .extension()
        .map(|extension| extension.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if !is_csv {
        let reader = BufReader::new(File::open(input)?);
        return Ok(serde_json::from_reader(reader)?);
    }

    let landings = LandingCsvImporter::from_path(input)?;
    let document_number = document_number
        .or_else(|| {
            landings
                .first()
                .map(|landing| landing.document_number.0.clone())
        })
        .unwrap_or_default();

    Ok(DocumentSubmission {
        document_number: DocumentNumber(document_number),
        document_type: DocumentType::CatchCertificate,
        exporter_postcode: None,
        prior_case_type: None,
        landings,
    })
}

fn render_case(case: &DocumentCase) {
    let view = case.status_view();
    println!(
        "{} ({}) -> {}",
        view.document_number.as_str(),
        case.document_type.label(),
        view.case_type
    );
    println!(
        "  Recorded status: {} | outcome: {} | risk: {}",
        view.status_at_submission, view.outcome_at_submission, view.risk
    );
    if let Some(administration) = &case.exporter_administration {
        println!("  Exporter administration: {administration}");
    }
    println!(
        "  Landings: {} ({} rejected)",
        view.landings, view.rejected_landings
    );
    for landing in &case.landings {
        println!(
            "    - {} {} {:.1}kg landed {} -> {} / {} (risk {:.2})",
            landing.pln,
            landing.species_code,
            landing.weight_on_cert,
            landing.date_landed,
            landing.status.label(),
            landing.outcome.label(),
            landing.risk_score
        );
        if let Some(documents) = &landing.overused_info {
            println!("      shared with: {}", documents.join(", "));
        }
    }
}

const fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

const VESSEL_OF_INTEREST: &str = "PZ1001";

fn demo_documents(now: DateTime<Utc>) -> Vec<DocumentSubmission> {
    let issued = demo_document(
        "GBR-DEMO-CC-001",
        "EH6 7EQ",
        vec![
            demo_landing("GBR-DEMO-CC-001", "BM111", "COD", 120.0, now),
            LandingFact {
                source: Some(LandingSource::ELog),
                is_species_exists: false,
                ..demo_landing("GBR-DEMO-CC-001", "BM111", "LBE", 35.0, now)
            },
        ],
    );

    let pending = demo_document(
        "GBR-DEMO-CC-002",
        "SA1 1NW",
        vec![LandingFact {
            is_landing_exists: false,
            is_species_exists: false,
            weight_on_landing: None,
            first_date_time_landing_data_retrieved: None,
            ..demo_landing("GBR-DEMO-CC-002", "FR22", "MAC", 800.0, now)
        }],
    );

    let mut overused = demo_landing("GBR-DEMO-CC-003", VESSEL_OF_INTEREST, "HAD", 420.0, now);
    overused.is_overused_this_cert = true;
    overused.is_overused_all_certs = true;
    overused.over_used_info =
        BTreeSet::from(["GBR-DEMO-CC-003".to_string(), "GBR-DEMO-CC-017".to_string()]);
    let rejected = demo_document("GBR-DEMO-CC-003", "BT1 5GS", vec![overused]);

    vec![issued, pending, rejected]
}

fn demo_document(
    document_number: &str,
    postcode: &str,
    landings: Vec<LandingFact>,
) -> DocumentSubmission {
    DocumentSubmission {
        document_number: DocumentNumber(document_number.to_string()),
        document_type: DocumentType::CatchCertificate,
        exporter_postcode: Some(postcode.to_string()),
        prior_case_type: None,
        landings,
    }
}

fn demo_landing(
    document_number: &str,
    pln: &str,
    species_code: &str,
    weight_on_cert: f64,
    now: DateTime<Utc>,
) -> LandingFact {
    let date_landed = (now - Duration::days(4)).date_naive();

    LandingFact {
        document_number: DocumentNumber(document_number.to_string()),
        pln: pln.to_string(),
        rss_number: Some(format!("C{pln}")),
        vessel_name: None,
        species_code: species_code.to_string(),
        exporter_account_id: None,
        exporter_contact_id: Some("demo-exporter".to_string()),
        weight_on_cert,
        raw_weight_on_cert: weight_on_cert,
        weight_on_all_certs: weight_on_cert,
        weight_on_landing: Some(weight_on_cert * 2.0),
        is_landing_exists: true,
        is_species_exists: true,
        is_overused_this_cert: false,
        is_overused_all_certs: false,
        over_used_info: BTreeSet::new(),
        created_at: now - Duration::hours(1),
        date_landed,
        landing_data_expected_date: Some(date_landed + Duration::days(1)),
        landing_data_end_date: Some(date_landed + Duration::days(14)),
        first_date_time_landing_data_retrieved: Some(now - Duration::days(3)),
        data_ever_expected: None,
        vessel_overridden_by_admin: false,
        species_overridden_by_admin: false,
        is_pre_approved: false,
        source: Some(LandingSource::LandingDeclaration),
        licence_holder: Some("Demo Fishing Ltd".to_string()),
        is_14_day_limit_reached: false,
        is_legally_due: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catch_compliance::workflows::landings::{CaseOutcomeAtSubmission, ClassificationEngine};
    use chrono::TimeZone;

    fn demo_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn demo_documents_cover_issued_pending_and_rejected_cases() {
        let engine = ClassificationEngine::new(
            RiskModel::default().with_vessel_score(VESSEL_OF_INTEREST, 2.5),
        );

        let case_types: Vec<CaseTwoType> = demo_documents(demo_now())
            .iter()
            .map(|document| engine.classify(document, demo_now()).case_type)
            .collect();

        assert_eq!(
            case_types,
            vec![
                CaseTwoType::PendingLandingData,
                CaseTwoType::PendingLandingData,
                CaseTwoType::RealTimeValidationRejected,
            ]
        );
    }

    #[test]
    fn run_demo_completes() {
        run_demo(DemoArgs {
            now: Some(demo_now()),
        })
        .expect("demo runs");
    }

    #[test]
    fn csv_input_takes_document_number_from_first_row() {
        let path = std::env::temp_dir().join("catch-compliance-classify-input.csv");
        std::fs::write(
            &path,
            "document_number,pln,species_code,weight_on_cert,is_landing_exists,is_species_exists,created_at,date_landed,licence_holder\nGBR-2024-CC-42,BM111,COD,50,true,true,2024-03-02T10:00:00Z,2024-03-01,Jane Skipper\n",
        )
        .expect("write csv");

        let document = load_submission(&path, None).expect("csv loads");
        let _ = std::fs::remove_file(&path);

        assert_eq!(document.document_number.as_str(), "GBR-2024-CC-42");
        let case = ClassificationEngine::default().classify(&document, demo_now());
        assert_eq!(case.outcome_at_submission, CaseOutcomeAtSubmission::Issued);
    }
}
