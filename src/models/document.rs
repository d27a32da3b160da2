//! Accident notification record.
//!
//! `DocumentData` carries the flat field set of the EWYP notification form:
//! injured person identity, address groups, reporting person, and accident
//! circumstances. `Document` wraps it with storage identity and witnesses.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::witness::Witness;

static POSTAL_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{2}-\d{3}$").unwrap());

/// Form fields of an accident notification.
///
/// Field names follow the official form vocabulary; they are also the JSON
/// contract of the API and the keys of the PDF field mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentData {
    // Injured person identity
    pub pesel: String,
    pub nr_dowodu: String,
    pub imie: String,
    pub nazwisko: String,
    pub data_urodzenia: NaiveDate,
    pub miejsce_urodzenia: String,
    #[serde(default)]
    pub numer_telefonu: Option<String>,

    // Residence address
    pub ulica: String,
    pub nr_domu: String,
    #[serde(default)]
    pub nr_lokalu: Option<String>,
    pub miejscowosc: String,
    pub kod_pocztowy: String,
    #[serde(default)]
    pub nazwa_panstwa: Option<String>,

    // Last residence address in Poland
    #[serde(default)]
    pub ulica_ostatniego_zamieszkania: Option<String>,
    #[serde(default)]
    pub nr_domu_ostatniego_zamieszkania: Option<String>,
    #[serde(default)]
    pub nr_lokalu_ostatniego_zamieszkania: Option<String>,
    #[serde(default)]
    pub miejscowosc_ostatniego_zamieszkania: Option<String>,
    #[serde(default)]
    pub kod_pocztowy_ostatniego_zamieszkania: Option<String>,

    // Correspondence address
    #[serde(default)]
    pub typ_korespondencji: Option<String>,
    #[serde(default)]
    pub ulica_korespondencji: Option<String>,
    #[serde(default)]
    pub nr_domu_korespondencji: Option<String>,
    #[serde(default)]
    pub nr_lokalu_korespondencji: Option<String>,
    #[serde(default)]
    pub miejscowosc_korespondencji: Option<String>,
    #[serde(default)]
    pub kod_pocztowy_korespondencji: Option<String>,
    #[serde(default)]
    pub nazwa_panstwa_korespondencji: Option<String>,

    // Business activity address
    #[serde(default)]
    pub ulica_dzialalnosci: Option<String>,
    #[serde(default)]
    pub nr_domu_dzialalnosci: Option<String>,
    #[serde(default)]
    pub nr_lokalu_dzialalnosci: Option<String>,
    #[serde(default)]
    pub miejscowosc_dzialalnosci: Option<String>,
    #[serde(default)]
    pub kod_pocztowy_dzialalnosci: Option<String>,
    #[serde(default)]
    pub nr_telefonu_dzialalnosci: Option<String>,

    // Childcare address
    #[serde(default)]
    pub ulica_opieki: Option<String>,
    #[serde(default)]
    pub nr_domu_opieki: Option<String>,
    #[serde(default)]
    pub nr_lokalu_opieki: Option<String>,
    #[serde(default)]
    pub miejscowosc_opieki: Option<String>,
    #[serde(default)]
    pub kod_pocztowy_opieki: Option<String>,
    #[serde(default)]
    pub nr_telefonu_opieki: Option<String>,

    // Reporting person identity
    #[serde(default)]
    pub imie_zglaszajacego: Option<String>,
    #[serde(default)]
    pub nazwisko_zglaszajacego: Option<String>,
    #[serde(default)]
    pub pesel_zglaszajacego: Option<String>,
    #[serde(default)]
    pub nr_dowodu_zglaszajacego: Option<String>,
    #[serde(default)]
    pub data_urodzenia_zglaszajacego: Option<NaiveDate>,
    #[serde(default)]
    pub nr_telefonu_zglaszajacego: Option<String>,

    // Reporting person residence address
    #[serde(default)]
    pub ulica_zglaszajacego: Option<String>,
    #[serde(default)]
    pub nr_domu_zglaszajacego: Option<String>,
    #[serde(default)]
    pub nr_lokalu_zglaszajacego: Option<String>,
    #[serde(default)]
    pub miejscowosc_zglaszajacego: Option<String>,
    #[serde(default)]
    pub kod_pocztowy_zglaszajacego: Option<String>,

    // Reporting person last residence address in Poland
    #[serde(default)]
    pub ulica_zglaszajacego_ostatniego_zamieszkania: Option<String>,
    #[serde(default)]
    pub nr_domu_zglaszajacego_ostatniego_zamieszkania: Option<String>,
    #[serde(default)]
    pub nr_lokalu_zglaszajacego_ostatniego_zamieszkania: Option<String>,
    #[serde(default)]
    pub miejscowosc_zglaszajacego_ostatniego_zamieszkania: Option<String>,
    #[serde(default)]
    pub kod_pocztowy_zglaszajacego_ostatniego_zamieszkania: Option<String>,

    // Reporting person correspondence address
    #[serde(default)]
    pub typ_korespondencji_zglaszajacego: Option<String>,
    #[serde(default)]
    pub ulica_korespondencji_zglaszajacego: Option<String>,
    #[serde(default)]
    pub nr_domu_korespondencji_zglaszajacego: Option<String>,
    #[serde(default)]
    pub nr_lokalu_korespondencji_zglaszajacego: Option<String>,
    #[serde(default)]
    pub miejscowosc_korespondencji_zglaszajacego: Option<String>,
    #[serde(default)]
    pub kod_pocztowy_korespondencji_zglaszajacego: Option<String>,
    #[serde(default)]
    pub nazwa_panstwa_korespondencji_zglaszajacego: Option<String>,

    // Accident circumstances
    pub data_wypadku: NaiveDate,
    #[serde(with = "super::time_format")]
    pub godzina_wypadku: NaiveTime,
    pub miejsce_wypadku: String,
    #[serde(with = "super::time_format")]
    pub planowana_godzina_rozpoczecia_pracy: NaiveTime,
    #[serde(with = "super::time_format")]
    pub planowana_godzina_zakonczenia_pracy: NaiveTime,
    pub rodzaj_urazow: String,
    pub szczegoly_okolicznosci: String,
    #[serde(default)]
    pub czy_udzielona_pomoc: bool,
    #[serde(default)]
    pub miejsce_udzielenia_pomocy: Option<String>,
    #[serde(default)]
    pub organ_postepowania: Option<String>,
    #[serde(default)]
    pub czy_wypadek_podczas_uzywania_maszyny: bool,
    #[serde(default)]
    pub opis_maszyn: Option<String>,
    #[serde(default)]
    pub czy_maszyna_posiada_atest: Option<bool>,
    #[serde(default)]
    pub czy_maszyna_w_ewidencji: Option<bool>,
}

/// A stored accident notification with its witnesses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Database row ID (UUID).
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub data: DocumentData,
    #[serde(default)]
    pub witnesses: Vec<Witness>,
}

/// Validation failure with per-field messages.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}", .problems.join("; "))]
pub struct ValidationError {
    pub problems: Vec<String>,
}

impl DocumentData {
    /// Validate field formats and cross-field requirements.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut problems = Vec::new();

        if !pesel_valid(&self.pesel) {
            problems.push("pesel: expected 11 digits with a valid checksum".to_string());
        }
        if let Some(pesel) = non_empty(&self.pesel_zglaszajacego) {
            if !pesel_valid(pesel) {
                problems.push(
                    "pesel_zglaszajacego: expected 11 digits with a valid checksum".to_string(),
                );
            }
        }

        for (name, value) in [
            ("nr_dowodu", &self.nr_dowodu),
            ("imie", &self.imie),
            ("nazwisko", &self.nazwisko),
            ("miejsce_urodzenia", &self.miejsce_urodzenia),
            ("ulica", &self.ulica),
            ("nr_domu", &self.nr_domu),
            ("miejscowosc", &self.miejscowosc),
            ("miejsce_wypadku", &self.miejsce_wypadku),
            ("rodzaj_urazow", &self.rodzaj_urazow),
            ("szczegoly_okolicznosci", &self.szczegoly_okolicznosci),
        ] {
            if value.trim().is_empty() {
                problems.push(format!("{}: must not be empty", name));
            }
        }

        if !POSTAL_CODE.is_match(&self.kod_pocztowy) {
            problems.push("kod_pocztowy: expected NN-NNN".to_string());
        }
        for (name, value) in [
            (
                "kod_pocztowy_ostatniego_zamieszkania",
                &self.kod_pocztowy_ostatniego_zamieszkania,
            ),
            (
                "kod_pocztowy_korespondencji",
                &self.kod_pocztowy_korespondencji,
            ),
            ("kod_pocztowy_dzialalnosci", &self.kod_pocztowy_dzialalnosci),
            ("kod_pocztowy_opieki", &self.kod_pocztowy_opieki),
            (
                "kod_pocztowy_zglaszajacego",
                &self.kod_pocztowy_zglaszajacego,
            ),
            (
                "kod_pocztowy_zglaszajacego_ostatniego_zamieszkania",
                &self.kod_pocztowy_zglaszajacego_ostatniego_zamieszkania,
            ),
            (
                "kod_pocztowy_korespondencji_zglaszajacego",
                &self.kod_pocztowy_korespondencji_zglaszajacego,
            ),
        ] {
            if let Some(code) = non_empty(value) {
                if !POSTAL_CODE.is_match(code) {
                    problems.push(format!("{}: expected NN-NNN", name));
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { problems })
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Check a PESEL number: 11 digits and a valid weighted checksum.
pub fn pesel_valid(pesel: &str) -> bool {
    if pesel.len() != 11 || !pesel.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    const WEIGHTS: [u32; 10] = [1, 3, 7, 9, 1, 3, 7, 9, 1, 3];
    let digits: Vec<u32> = pesel.bytes().map(|b| (b - b'0') as u32).collect();
    let sum: u32 = WEIGHTS.iter().zip(&digits).map(|(w, d)| w * d).sum();
    (10 - sum % 10) % 10 == digits[10]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::sample_data;

    #[test]
    fn test_pesel_checksum() {
        assert!(pesel_valid("44051401359"));
        // Wrong check digit
        assert!(!pesel_valid("44051401358"));
        // Wrong length / non-digits
        assert!(!pesel_valid("4405140135"));
        assert!(!pesel_valid("4405140135a"));
    }

    #[test]
    fn test_validate_accepts_sample() {
        assert!(sample_data().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let mut data = sample_data();
        data.pesel = "123".to_string();
        data.kod_pocztowy = "12345".to_string();
        data.imie = String::new();

        let err = data.validate().unwrap_err();
        assert_eq!(err.problems.len(), 3);
        assert!(err.problems[0].starts_with("pesel:"));
    }

    #[test]
    fn test_validate_optional_postal_code() {
        let mut data = sample_data();
        data.kod_pocztowy_korespondencji = Some("00300".to_string());
        assert!(data.validate().is_err());

        data.kod_pocztowy_korespondencji = Some("00-300".to_string());
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let data = sample_data();
        let json = serde_json::to_string(&data).unwrap();
        let back: DocumentData = serde_json::from_str(&json).unwrap();
        assert_eq!(data, back);
    }

    #[test]
    fn test_accepts_short_time_format() {
        let mut value = serde_json::to_value(sample_data()).unwrap();
        value["godzina_wypadku"] = serde_json::json!("09:15");
        let data: DocumentData = serde_json::from_value(value).unwrap();
        assert_eq!(
            data.godzina_wypadku,
            chrono::NaiveTime::from_hms_opt(9, 15, 0).unwrap()
        );
    }
}
