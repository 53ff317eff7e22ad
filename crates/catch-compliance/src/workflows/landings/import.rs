use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

use super::domain::{DocumentNumber, LandingFact, LandingSource};

#[derive(Debug)]
pub enum LandingImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },
}

impl std::fmt::Display for LandingImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LandingImportError::Io(err) => write!(f, "failed to read landings export: {}", err),
            LandingImportError::Csv(err) => write!(f, "invalid landings CSV data: {}", err),
            LandingImportError::InvalidField { row, field, value } => write!(
                f,
                "row {} has an invalid value for {}: '{}'",
                row, field, value
            ),
        }
    }
}

impl std::error::Error for LandingImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LandingImportError::Io(err) => Some(err),
            LandingImportError::Csv(err) => Some(err),
            LandingImportError::InvalidField { .. } => None,
        }
    }
}

impl From<std::io::Error> for LandingImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LandingImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads landing facts from a reconciliation CSV export, one row per landing line.
pub struct LandingCsvImporter;

impl LandingCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<LandingFact>, LandingImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<LandingFact>, LandingImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut landings = Vec::new();

        for (index, record) in csv_reader.deserialize::<LandingRow>().enumerate() {
            let row = record?;
            landings.push(row.into_fact(index + 1)?);
        }

        Ok(landings)
    }
}

#[derive(Debug, Deserialize)]
struct LandingRow {
    document_number: String,
    pln: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    rss_number: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    vessel_name: Option<String>,
    species_code: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    exporter_account_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    exporter_contact_id: Option<String>,
    weight_on_cert: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    raw_weight_on_cert: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    weight_on_all_certs: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    weight_on_landing: Option<String>,
    is_landing_exists: String,
    is_species_exists: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    is_overused_this_cert: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    is_overused_all_certs: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    over_used_info: Option<String>,
    created_at: String,
    date_landed: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    landing_data_expected_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    landing_data_end_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    first_date_time_landing_data_retrieved: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    data_ever_expected: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    vessel_overridden_by_admin: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    species_overridden_by_admin: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    is_pre_approved: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    source: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    licence_holder: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    is_14_day_limit_reached: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    is_legally_due: Option<String>,
}

impl LandingRow {
    fn into_fact(self, row: usize) -> Result<LandingFact, LandingImportError> {
        let flag = |field: &'static str, value: Option<&str>| -> Result<bool, LandingImportError> {
            value
                .map(|raw| parse_bool(row, field, raw))
                .transpose()
                .map(|parsed| parsed.unwrap_or(false))
        };

        Ok(LandingFact {
            weight_on_cert: parse_weight(row, "weight_on_cert", &self.weight_on_cert)?,
            raw_weight_on_cert: self
                .raw_weight_on_cert
                .as_deref()
                .map(|raw| parse_weight(row, "raw_weight_on_cert", raw))
                .transpose()?
                .unwrap_or(0.0),
            weight_on_all_certs: self
                .weight_on_all_certs
                .as_deref()
                .map(|raw| parse_weight(row, "weight_on_all_certs", raw))
                .transpose()?
                .unwrap_or(0.0),
            weight_on_landing: self
                .weight_on_landing
                .as_deref()
                .map(|raw| parse_weight(row, "weight_on_landing", raw))
                .transpose()?,
            is_landing_exists: parse_bool(row, "is_landing_exists", &self.is_landing_exists)?,
            is_species_exists: parse_bool(row, "is_species_exists", &self.is_species_exists)?,
            is_overused_this_cert: flag(
                "is_overused_this_cert",
                self.is_overused_this_cert.as_deref(),
            )?,
            is_overused_all_certs: flag(
                "is_overused_all_certs",
                self.is_overused_all_certs.as_deref(),
            )?,
            over_used_info: self
                .over_used_info
                .as_deref()
                .map(split_documents)
                .unwrap_or_default(),
            created_at: parse_timestamp(row, "created_at", &self.created_at)?,
            date_landed: parse_date(row, "date_landed", &self.date_landed)?,
            landing_data_expected_date: self
                .landing_data_expected_date
                .as_deref()
                .map(|raw| parse_date(row, "landing_data_expected_date", raw))
                .transpose()?,
            landing_data_end_date: self
                .landing_data_end_date
                .as_deref()
                .map(|raw| parse_date(row, "landing_data_end_date", raw))
                .transpose()?,
            first_date_time_landing_data_retrieved: self
                .first_date_time_landing_data_retrieved
                .as_deref()
                .map(|raw| parse_timestamp(row, "first_date_time_landing_data_retrieved", raw))
                .transpose()?,
            data_ever_expected: self
                .data_ever_expected
                .as_deref()
                .map(|raw| parse_bool(row, "data_ever_expected", raw))
                .transpose()?,
            vessel_overridden_by_admin: flag(
                "vessel_overridden_by_admin",
                self.vessel_overridden_by_admin.as_deref(),
            )?,
            species_overridden_by_admin: flag(
                "species_overridden_by_admin",
                self.species_overridden_by_admin.as_deref(),
            )?,
            is_pre_approved: flag("is_pre_approved", self.is_pre_approved.as_deref())?,
            source: self
                .source
                .as_deref()
                .map(|raw| parse_source(row, raw))
                .transpose()?,
            is_14_day_limit_reached: flag(
                "is_14_day_limit_reached",
                self.is_14_day_limit_reached.as_deref(),
            )?,
            is_legally_due: flag("is_legally_due", self.is_legally_due.as_deref())?,
            document_number: DocumentNumber(self.document_number),
            pln: self.pln,
            rss_number: self.rss_number,
            vessel_name: self.vessel_name,
            species_code: self.species_code,
            exporter_account_id: self.exporter_account_id,
            exporter_contact_id: self.exporter_contact_id,
            licence_holder: self.licence_holder,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn invalid(row: usize, field: &'static str, value: &str) -> LandingImportError {
    LandingImportError::InvalidField {
        row,
        field,
        value: value.to_string(),
    }
}

fn parse_bool(row: usize, field: &'static str, value: &str) -> Result<bool, LandingImportError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(invalid(row, field, value)),
    }
}

fn parse_weight(row: usize, field: &'static str, value: &str) -> Result<f64, LandingImportError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|weight| weight.is_finite())
        .ok_or_else(|| invalid(row, field, value))
}

fn parse_date(row: usize, field: &'static str, value: &str) -> Result<NaiveDate, LandingImportError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| invalid(row, field, value))
}

fn parse_timestamp(
    row: usize,
    field: &'static str,
    value: &str,
) -> Result<DateTime<Utc>, LandingImportError> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| invalid(row, field, value))
}

fn parse_source(row: usize, value: &str) -> Result<LandingSource, LandingImportError> {
    match value.trim().to_ascii_uppercase().replace([' ', '-'], "_").as_str() {
        "ELOG" | "E_LOG" => Ok(LandingSource::ELog),
        "LANDING_DECLARATION" => Ok(LandingSource::LandingDeclaration),
        "CATCH_RECORDING" => Ok(LandingSource::CatchRecording),
        _ => Err(invalid(row, "source", value)),
    }
}

fn split_documents(value: &str) -> BTreeSet<String> {
    value
        .split([';', '|'])
        .map(str::trim)
        .filter(|document| !document.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "document_number,pln,species_code,weight_on_cert,is_landing_exists,is_species_exists,over_used_info,created_at,date_landed,landing_data_end_date,source,data_ever_expected,licence_holder";

    #[test]
    fn imports_rows_with_optional_fields() {
        let csv = format!(
            "{HEADER}\nGBR-2024-CC-1,BM111,COD,120.5,true,true,GBR-2024-CC-1;GBR-2024-CC-9,2024-03-02T10:00:00Z,2024-03-01,,ELOG,,Jane Skipper\nGBR-2024-CC-1,PZ1,HAD,10,false,false,,2024-03-02,2024-02-28,2024-03-10,landing declaration,false,\n"
        );

        let landings = LandingCsvImporter::from_reader(Cursor::new(csv)).expect("csv parses");

        assert_eq!(landings.len(), 2);
        let first = &landings[0];
        assert_eq!(first.document_number.as_str(), "GBR-2024-CC-1");
        assert_eq!(first.source, Some(LandingSource::ELog));
        assert_eq!(first.over_used_info.len(), 2);
        assert_eq!(first.data_ever_expected, None);
        assert!(first.has_licence_holder());

        let second = &landings[1];
        assert_eq!(second.source, Some(LandingSource::LandingDeclaration));
        assert_eq!(second.data_ever_expected, Some(false));
        assert_eq!(
            second.landing_data_end_date,
            NaiveDate::from_ymd_opt(2024, 3, 10)
        );
        assert!(!second.has_licence_holder());
    }

    #[test]
    fn reports_row_and_field_for_invalid_values() {
        let csv = format!(
            "{HEADER}\nGBR-2024-CC-1,BM111,COD,heavy,true,true,,2024-03-02,2024-03-01,,,,Jane\n"
        );

        match LandingCsvImporter::from_reader(Cursor::new(csv)) {
            Err(LandingImportError::InvalidField { row, field, value }) => {
                assert_eq!(row, 1);
                assert_eq!(field, "weight_on_cert");
                assert_eq!(value, "heavy");
            }
            other => panic!("expected invalid field error, got {other:?}"),
        }
    }
}
