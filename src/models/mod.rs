//! Data models for accident notification records.

mod document;
mod witness;

pub(crate) mod time_format;

pub use document::{pesel_valid, Document, DocumentData, ValidationError};
pub use witness::{Witness, WitnessData};

#[cfg(test)]
pub mod test_support {
    //! Shared fixtures for unit tests.

    use chrono::{NaiveDate, NaiveTime};

    use super::{DocumentData, WitnessData};

    /// A complete, valid notification record.
    pub fn sample_data() -> DocumentData {
        DocumentData {
            pesel: "44051401359".to_string(),
            nr_dowodu: "ABC123456".to_string(),
            imie: "Jan".to_string(),
            nazwisko: "Kowalski".to_string(),
            data_urodzenia: NaiveDate::from_ymd_opt(1985, 3, 14).unwrap(),
            miejsce_urodzenia: "Warszawa".to_string(),
            numer_telefonu: Some("600100200".to_string()),

            ulica: "Kwiatowa".to_string(),
            nr_domu: "12".to_string(),
            nr_lokalu: Some("4".to_string()),
            miejscowosc: "Warszawa".to_string(),
            kod_pocztowy: "00-001".to_string(),
            nazwa_panstwa: None,

            ulica_ostatniego_zamieszkania: None,
            nr_domu_ostatniego_zamieszkania: None,
            nr_lokalu_ostatniego_zamieszkania: None,
            miejscowosc_ostatniego_zamieszkania: None,
            kod_pocztowy_ostatniego_zamieszkania: None,

            typ_korespondencji: None,
            ulica_korespondencji: None,
            nr_domu_korespondencji: None,
            nr_lokalu_korespondencji: None,
            miejscowosc_korespondencji: None,
            kod_pocztowy_korespondencji: None,
            nazwa_panstwa_korespondencji: None,

            ulica_dzialalnosci: Some("Przemysłowa".to_string()),
            nr_domu_dzialalnosci: Some("7".to_string()),
            nr_lokalu_dzialalnosci: None,
            miejscowosc_dzialalnosci: Some("Warszawa".to_string()),
            kod_pocztowy_dzialalnosci: Some("00-002".to_string()),
            nr_telefonu_dzialalnosci: None,

            ulica_opieki: None,
            nr_domu_opieki: None,
            nr_lokalu_opieki: None,
            miejscowosc_opieki: None,
            kod_pocztowy_opieki: None,
            nr_telefonu_opieki: None,

            imie_zglaszajacego: None,
            nazwisko_zglaszajacego: None,
            pesel_zglaszajacego: None,
            nr_dowodu_zglaszajacego: None,
            data_urodzenia_zglaszajacego: None,
            nr_telefonu_zglaszajacego: None,

            ulica_zglaszajacego: None,
            nr_domu_zglaszajacego: None,
            nr_lokalu_zglaszajacego: None,
            miejscowosc_zglaszajacego: None,
            kod_pocztowy_zglaszajacego: None,

            ulica_zglaszajacego_ostatniego_zamieszkania: None,
            nr_domu_zglaszajacego_ostatniego_zamieszkania: None,
            nr_lokalu_zglaszajacego_ostatniego_zamieszkania: None,
            miejscowosc_zglaszajacego_ostatniego_zamieszkania: None,
            kod_pocztowy_zglaszajacego_ostatniego_zamieszkania: None,

            typ_korespondencji_zglaszajacego: None,
            ulica_korespondencji_zglaszajacego: None,
            nr_domu_korespondencji_zglaszajacego: None,
            nr_lokalu_korespondencji_zglaszajacego: None,
            miejscowosc_korespondencji_zglaszajacego: None,
            kod_pocztowy_korespondencji_zglaszajacego: None,
            nazwa_panstwa_korespondencji_zglaszajacego: None,

            data_wypadku: NaiveDate::from_ymd_opt(2024, 11, 8).unwrap(),
            godzina_wypadku: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            miejsce_wypadku: "Hala produkcyjna, Warszawa".to_string(),
            planowana_godzina_rozpoczecia_pracy: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            planowana_godzina_zakonczenia_pracy: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            rodzaj_urazow: "Złamanie lewego przedramienia".to_string(),
            szczegoly_okolicznosci: "Upadek z drabiny podczas zdejmowania towaru z regału."
                .to_string(),
            czy_udzielona_pomoc: true,
            miejsce_udzielenia_pomocy: Some("SOR, Szpital Wolski".to_string()),
            organ_postepowania: None,
            czy_wypadek_podczas_uzywania_maszyny: false,
            opis_maszyn: None,
            czy_maszyna_posiada_atest: None,
            czy_maszyna_w_ewidencji: None,
        }
    }

    /// A valid witness.
    pub fn sample_witness() -> WitnessData {
        WitnessData {
            imie: "Anna".to_string(),
            nazwisko: "Lis".to_string(),
            ulica: "Polna".to_string(),
            nr_domu: "3".to_string(),
            nr_lokalu: None,
            miejscowosc: "Radom".to_string(),
            kod_pocztowy: "26-600".to_string(),
            nazwa_panstwa: None,
        }
    }
}
