//! Accident witness record.

use serde::{Deserialize, Serialize};

/// Form fields of a single witness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WitnessData {
    pub imie: String,
    pub nazwisko: String,
    pub ulica: String,
    pub nr_domu: String,
    #[serde(default)]
    pub nr_lokalu: Option<String>,
    pub miejscowosc: String,
    pub kod_pocztowy: String,
    #[serde(default)]
    pub nazwa_panstwa: Option<String>,
}

/// A stored witness, always attached to exactly one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Witness {
    pub id: i64,
    pub document_id: String,
    #[serde(flatten)]
    pub data: WitnessData,
}

impl WitnessData {
    /// Basic completeness check; witnesses share the address format rules
    /// of the main record.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("imie", &self.imie),
            ("nazwisko", &self.nazwisko),
            ("ulica", &self.ulica),
            ("nr_domu", &self.nr_domu),
            ("miejscowosc", &self.miejscowosc),
        ] {
            if value.trim().is_empty() {
                return Err(format!("witness {}: must not be empty", name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_witness_validation() {
        let witness = WitnessData {
            imie: "Anna".to_string(),
            nazwisko: "Lis".to_string(),
            ulica: "Polna".to_string(),
            nr_domu: "3".to_string(),
            nr_lokalu: None,
            miejscowosc: "Radom".to_string(),
            kod_pocztowy: "26-600".to_string(),
            nazwa_panstwa: None,
        };
        assert!(witness.validate().is_ok());

        let mut missing = witness.clone();
        missing.nazwisko = " ".to_string();
        assert!(missing.validate().is_err());
    }
}
