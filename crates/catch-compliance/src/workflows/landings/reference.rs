use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A vessel licence period; the length recorded on a licence applies while it is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselLicence {
    pub pln: String,
    pub vessel_length: f64,
    pub licence_valid_from: NaiveDate,
    #[serde(default)]
    pub licence_valid_to: Option<NaiveDate>,
}

impl VesselLicence {
    fn covers(&self, date_landed: NaiveDate) -> bool {
        date_landed >= self.licence_valid_from
            && self
                .licence_valid_to
                .map(|valid_to| date_landed <= valid_to)
                .unwrap_or(true)
    }
}

/// In-memory vessel register keyed by PLN.
#[derive(Debug, Clone, Default)]
pub struct VesselRegister {
    licences: HashMap<String, Vec<VesselLicence>>,
}

impl VesselRegister {
    pub fn new(licences: impl IntoIterator<Item = VesselLicence>) -> Self {
        let mut register = Self::default();
        for licence in licences {
            register.insert(licence);
        }
        register
    }

    pub fn insert(&mut self, licence: VesselLicence) {
        self.licences
            .entry(normalize_pln(&licence.pln))
            .or_default()
            .push(licence);
    }

    /// Length on the licence valid on the landing date, if any.
    pub fn vessel_length(&self, pln: &str, date_landed: NaiveDate) -> Option<f64> {
        self.licences
            .get(&normalize_pln(pln))?
            .iter()
            .find(|licence| licence.covers(date_landed))
            .map(|licence| licence.vessel_length)
    }
}

/// Postcode area prefix to devolved administration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevolvedAdministrationEntry {
    pub postcode_area: String,
    pub administration: String,
}

pub const DEFAULT_ADMINISTRATION: &str = "England";

pub fn default_postcode_table() -> Vec<DevolvedAdministrationEntry> {
    const AREAS: [(&str, &str); 22] = [
        ("AB", "Scotland"),
        ("DD", "Scotland"),
        ("DG", "Scotland"),
        ("EH", "Scotland"),
        ("FK", "Scotland"),
        ("G", "Scotland"),
        ("HS", "Scotland"),
        ("IV", "Scotland"),
        ("KA", "Scotland"),
        ("KW", "Scotland"),
        ("KY", "Scotland"),
        ("ML", "Scotland"),
        ("PA", "Scotland"),
        ("PH", "Scotland"),
        ("TD", "Scotland"),
        ("ZE", "Scotland"),
        ("CF", "Wales"),
        ("LL", "Wales"),
        ("SA", "Wales"),
        ("BT", "Northern Ireland"),
        ("GY", "Guernsey"),
        ("JE", "Jersey"),
    ];

    AREAS
        .iter()
        .map(|(area, administration)| DevolvedAdministrationEntry {
            postcode_area: area.to_string(),
            administration: administration.to_string(),
        })
        .collect()
}

/// Builds a lookup resolving a postcode to its devolved administration. The postcode area is
/// the leading letters of the outward code.
pub fn postcode_da_lookup(
    table: &[DevolvedAdministrationEntry],
) -> impl Fn(&str) -> String + '_ {
    move |postcode| {
        let area: String = postcode
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_ascii_uppercase();

        table
            .iter()
            .find(|entry| entry.postcode_area.eq_ignore_ascii_case(&area))
            .map(|entry| entry.administration.clone())
            .unwrap_or_else(|| DEFAULT_ADMINISTRATION.to_string())
    }
}

fn normalize_pln(pln: &str) -> String {
    pln.split_whitespace()
        .collect::<String>()
        .to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn vessel_length_uses_licence_valid_on_landing_date() {
        let register = VesselRegister::new([
            VesselLicence {
                pln: "BM 111".to_string(),
                vessel_length: 9.8,
                licence_valid_from: date(2020, 1, 1),
                licence_valid_to: Some(date(2023, 12, 31)),
            },
            VesselLicence {
                pln: "BM111".to_string(),
                vessel_length: 11.2,
                licence_valid_from: date(2024, 1, 1),
                licence_valid_to: None,
            },
        ]);

        assert_eq!(register.vessel_length("bm111", date(2022, 6, 1)), Some(9.8));
        assert_eq!(register.vessel_length("BM 111", date(2025, 3, 1)), Some(11.2));
        assert_eq!(register.vessel_length("BM111", date(2019, 3, 1)), None);
        assert_eq!(register.vessel_length("PZ1", date(2025, 3, 1)), None);
    }

    #[test]
    fn postcode_lookup_matches_whole_area() {
        let table = default_postcode_table();
        let lookup = postcode_da_lookup(&table);

        assert_eq!(lookup("AB10 1AA"), "Scotland");
        assert_eq!(lookup("g2 1dy"), "Scotland");
        assert_eq!(lookup("GY1 2AB"), "Guernsey");
        assert_eq!(lookup("GL1 1AA"), DEFAULT_ADMINISTRATION);
        assert_eq!(lookup("CF10 3NQ"), "Wales");
        assert_eq!(lookup("BT1 5GS"), "Northern Ireland");
    }
}
