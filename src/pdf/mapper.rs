//! Mapping between notification records and the AcroForm field names of
//! the government EWYP template.
//!
//! Only known and reasonably certain mappings are present; unmapped
//! template fields keep their defaults. The address groups reuse the same
//! base names with a group suffix ("2" last residence, "2A" correspondence,
//! "3" business activity) and the reporting person uses index `[1]`.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::time_format::parse_time;
use crate::models::DocumentData;

/// Map a record to PDF field values. Empty values are omitted so template
/// defaults are not overwritten.
pub fn document_to_fields(data: &DocumentData) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();

    let mut set = |key: &str, value: String| {
        if !value.is_empty() {
            map.insert(key.to_string(), value);
        }
    };
    let opt = |value: &Option<String>| value.clone().unwrap_or_default();

    // Injured person identity
    set("PESEL[0]", data.pesel.clone());
    set("Rodzajseriainumerdokumentu[0]", data.nr_dowodu.clone());
    set("Imię[0]", data.imie.clone());
    set("Nazwisko[0]", data.nazwisko.clone());
    set("Dataurodzenia[0]", data.data_urodzenia.to_string());
    set("Miejsceurodzenia[0]", data.miejsce_urodzenia.clone());
    set("Numertelefonu[0]", opt(&data.numer_telefonu));

    // Residence address
    set("Ulica[0]", data.ulica.clone());
    set("Numerdomu[0]", data.nr_domu.clone());
    set("Numerlokalu[0]", opt(&data.nr_lokalu));
    set("Kodpocztowy[0]", data.kod_pocztowy.clone());
    set("Poczta[0]", data.miejscowosc.clone());
    set("Nazwapaństwa[0]", opt(&data.nazwa_panstwa));

    // Last residence address in Poland -> group "2"
    set("Ulica2[0]", opt(&data.ulica_ostatniego_zamieszkania));
    set("Numerdomu2[0]", opt(&data.nr_domu_ostatniego_zamieszkania));
    set("Numerlokalu2[0]", opt(&data.nr_lokalu_ostatniego_zamieszkania));
    set("Kodpocztowy2[0]", opt(&data.kod_pocztowy_ostatniego_zamieszkania));
    set("Poczta2[0]", opt(&data.miejscowosc_ostatniego_zamieszkania));

    // Correspondence address -> group "2A"
    set("Ulica2A[0]", opt(&data.ulica_korespondencji));
    set("Numerdomu2A[0]", opt(&data.nr_domu_korespondencji));
    set("Numerlokalu2A[0]", opt(&data.nr_lokalu_korespondencji));
    set("Kodpocztowy2A[0]", opt(&data.kod_pocztowy_korespondencji));
    set("Poczta2A[0]", opt(&data.miejscowosc_korespondencji));
    set("Nazwapaństwa2[0]", opt(&data.nazwa_panstwa_korespondencji));

    // Business activity address -> group "3"
    set("Ulica3[0]", opt(&data.ulica_dzialalnosci));
    set("Numerdomu3[0]", opt(&data.nr_domu_dzialalnosci));
    set("Numerlokalu3[0]", opt(&data.nr_lokalu_dzialalnosci));
    set("Kodpocztowy3[0]", opt(&data.kod_pocztowy_dzialalnosci));
    set("Poczta3[0]", opt(&data.miejscowosc_dzialalnosci));
    set("Numertelefonu3[0]", opt(&data.nr_telefonu_dzialalnosci));

    // Reporting person -> index [1]
    set("Imię[1]", opt(&data.imie_zglaszajacego));
    set("Nazwisko[1]", opt(&data.nazwisko_zglaszajacego));
    set("PESEL[1]", opt(&data.pesel_zglaszajacego));
    set(
        "Rodzajseriainumerdokumentu[1]",
        opt(&data.nr_dowodu_zglaszajacego),
    );
    set("Numertelefonu2[0]", opt(&data.nr_telefonu_zglaszajacego));

    // Reporting person residence address -> index [1]
    set("Ulica[1]", opt(&data.ulica_zglaszajacego));
    set("Numerdomu[1]", opt(&data.nr_domu_zglaszajacego));
    set("Numerlokalu[1]", opt(&data.nr_lokalu_zglaszajacego));
    set("Kodpocztowy[1]", opt(&data.kod_pocztowy_zglaszajacego));
    set("Poczta[1]", opt(&data.miejscowosc_zglaszajacego));

    // Reporting person last residence in Poland -> group "2" index [1]
    set(
        "Ulica2[1]",
        opt(&data.ulica_zglaszajacego_ostatniego_zamieszkania),
    );
    set(
        "Numerdomu2[1]",
        opt(&data.nr_domu_zglaszajacego_ostatniego_zamieszkania),
    );
    set(
        "Numerlokalu2[1]",
        opt(&data.nr_lokalu_zglaszajacego_ostatniego_zamieszkania),
    );
    set(
        "Kodpocztowy2[1]",
        opt(&data.kod_pocztowy_zglaszajacego_ostatniego_zamieszkania),
    );
    set(
        "Poczta2[1]",
        opt(&data.miejscowosc_zglaszajacego_ostatniego_zamieszkania),
    );

    // Accident information
    set("Datawyp[0]", data.data_wypadku.to_string());
    set(
        "Godzina[0]",
        data.godzina_wypadku.format("%H:%M:%S").to_string(),
    );
    set("Miejscewyp[0]", data.miejsce_wypadku.clone());
    set(
        "Godzina3A[0]",
        data.planowana_godzina_rozpoczecia_pracy
            .format("%H:%M:%S")
            .to_string(),
    );
    set(
        "Godzina3B[0]",
        data.planowana_godzina_zakonczenia_pracy
            .format("%H:%M:%S")
            .to_string(),
    );

    // Narrative answers
    set("Tekst7[0]", data.rodzaj_urazow.clone());
    set("Tekst8[0]", data.szczegoly_okolicznosci.clone());
    set("Tekst6[0]", opt(&data.organ_postepowania));
    set("Tekst5[0]", opt(&data.miejsce_udzielenia_pomocy));
    set("Tekst4[0]", opt(&data.opis_maszyn));

    // The template's checkboxes have no certain mapping; booleans stay out
    // of the generated form.

    map
}

/// Build a record from the field values read out of a filled form.
///
/// Unreadable or absent values become empty strings (or `None`); callers
/// decide whether the result is complete enough to store.
pub fn fields_to_document(fields: &BTreeMap<String, String>) -> DocumentData {
    let text = |key: &str| -> String {
        fields
            .get(key)
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    };
    let opt = |key: &str| -> Option<String> {
        fields
            .get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };
    let date = |key: &str| -> NaiveDate {
        fields
            .get(key)
            .and_then(|v| NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").ok())
            .unwrap_or_default()
    };
    let opt_date = |key: &str| -> Option<NaiveDate> {
        fields
            .get(key)
            .and_then(|v| NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").ok())
    };
    let time = |key: &str| {
        fields
            .get(key)
            .and_then(|v| parse_time(v.trim()))
            .unwrap_or_default()
    };

    DocumentData {
        pesel: text("PESEL[0]"),
        nr_dowodu: text("Rodzajseriainumerdokumentu[0]"),
        imie: text("Imię[0]"),
        nazwisko: text("Nazwisko[0]"),
        data_urodzenia: date("Dataurodzenia[0]"),
        miejsce_urodzenia: text("Miejsceurodzenia[0]"),
        numer_telefonu: opt("Numertelefonu[0]"),

        ulica: text("Ulica[0]"),
        nr_domu: text("Numerdomu[0]"),
        nr_lokalu: opt("Numerlokalu[0]"),
        miejscowosc: text("Poczta[0]"),
        kod_pocztowy: text("Kodpocztowy[0]"),
        nazwa_panstwa: opt("Nazwapaństwa[0]"),

        ulica_ostatniego_zamieszkania: opt("Ulica2[0]"),
        nr_domu_ostatniego_zamieszkania: opt("Numerdomu2[0]"),
        nr_lokalu_ostatniego_zamieszkania: opt("Numerlokalu2[0]"),
        miejscowosc_ostatniego_zamieszkania: opt("Poczta2[0]"),
        kod_pocztowy_ostatniego_zamieszkania: opt("Kodpocztowy2[0]"),

        typ_korespondencji: None,
        ulica_korespondencji: opt("Ulica2A[0]"),
        nr_domu_korespondencji: opt("Numerdomu2A[0]"),
        nr_lokalu_korespondencji: opt("Numerlokalu2A[0]"),
        miejscowosc_korespondencji: opt("Poczta2A[0]"),
        kod_pocztowy_korespondencji: opt("Kodpocztowy2A[0]"),
        nazwa_panstwa_korespondencji: opt("Nazwapaństwa2[0]"),

        ulica_dzialalnosci: opt("Ulica3[0]"),
        nr_domu_dzialalnosci: opt("Numerdomu3[0]"),
        nr_lokalu_dzialalnosci: opt("Numerlokalu3[0]"),
        miejscowosc_dzialalnosci: opt("Poczta3[0]"),
        kod_pocztowy_dzialalnosci: opt("Kodpocztowy3[0]"),
        nr_telefonu_dzialalnosci: opt("Numertelefonu3[0]"),

        ulica_opieki: None,
        nr_domu_opieki: None,
        nr_lokalu_opieki: None,
        miejscowosc_opieki: None,
        kod_pocztowy_opieki: None,
        nr_telefonu_opieki: None,

        imie_zglaszajacego: opt("Imię[1]"),
        nazwisko_zglaszajacego: opt("Nazwisko[1]"),
        pesel_zglaszajacego: opt("PESEL[1]"),
        nr_dowodu_zglaszajacego: opt("Rodzajseriainumerdokumentu[1]"),
        data_urodzenia_zglaszajacego: opt_date("Dataurodzenia[1]"),
        nr_telefonu_zglaszajacego: opt("Numertelefonu2[0]"),

        ulica_zglaszajacego: opt("Ulica[1]"),
        nr_domu_zglaszajacego: opt("Numerdomu[1]"),
        nr_lokalu_zglaszajacego: opt("Numerlokalu[1]"),
        miejscowosc_zglaszajacego: opt("Poczta[1]"),
        kod_pocztowy_zglaszajacego: opt("Kodpocztowy[1]"),

        ulica_zglaszajacego_ostatniego_zamieszkania: opt("Ulica2[1]"),
        nr_domu_zglaszajacego_ostatniego_zamieszkania: opt("Numerdomu2[1]"),
        nr_lokalu_zglaszajacego_ostatniego_zamieszkania: opt("Numerlokalu2[1]"),
        miejscowosc_zglaszajacego_ostatniego_zamieszkania: opt("Poczta2[1]"),
        kod_pocztowy_zglaszajacego_ostatniego_zamieszkania: opt("Kodpocztowy2[1]"),

        typ_korespondencji_zglaszajacego: None,
        ulica_korespondencji_zglaszajacego: None,
        nr_domu_korespondencji_zglaszajacego: None,
        nr_lokalu_korespondencji_zglaszajacego: None,
        miejscowosc_korespondencji_zglaszajacego: None,
        kod_pocztowy_korespondencji_zglaszajacego: None,
        nazwa_panstwa_korespondencji_zglaszajacego: None,

        data_wypadku: date("Datawyp[0]"),
        godzina_wypadku: time("Godzina[0]"),
        miejsce_wypadku: text("Miejscewyp[0]"),
        planowana_godzina_rozpoczecia_pracy: time("Godzina3A[0]"),
        planowana_godzina_zakonczenia_pracy: time("Godzina3B[0]"),
        rodzaj_urazow: text("Tekst7[0]"),
        szczegoly_okolicznosci: text("Tekst8[0]"),
        czy_udzielona_pomoc: false,
        miejsce_udzielenia_pomocy: opt("Tekst5[0]"),
        organ_postepowania: opt("Tekst6[0]"),
        czy_wypadek_podczas_uzywania_maszyny: false,
        opis_maszyn: opt("Tekst4[0]"),
        czy_maszyna_posiada_atest: None,
        czy_maszyna_w_ewidencji: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::sample_data;

    #[test]
    fn test_known_mappings() {
        let map = document_to_fields(&sample_data());

        assert_eq!(map["PESEL[0]"], "44051401359");
        assert_eq!(map["Imię[0]"], "Jan");
        assert_eq!(map["Nazwisko[0]"], "Kowalski");
        assert_eq!(map["Dataurodzenia[0]"], "1985-03-14");
        assert_eq!(map["Poczta[0]"], "Warszawa");
        assert_eq!(map["Ulica3[0]"], "Przemysłowa");
        assert_eq!(map["Datawyp[0]"], "2024-11-08");
        assert_eq!(map["Godzina[0]"], "10:30:00");
        assert_eq!(map["Tekst7[0]"], "Złamanie lewego przedramienia");
    }

    #[test]
    fn test_empty_values_are_omitted() {
        let map = document_to_fields(&sample_data());

        // No correspondence address in the sample
        assert!(!map.contains_key("Ulica2A[0]"));
        // No reporting person either
        assert!(!map.contains_key("Imię[1]"));
    }

    #[test]
    fn test_round_trip_through_fields() {
        let data = sample_data();
        let map = document_to_fields(&data);
        let back = fields_to_document(&map);

        assert_eq!(back.pesel, data.pesel);
        assert_eq!(back.imie, data.imie);
        assert_eq!(back.nazwisko, data.nazwisko);
        assert_eq!(back.data_urodzenia, data.data_urodzenia);
        assert_eq!(back.miejscowosc, data.miejscowosc);
        assert_eq!(back.data_wypadku, data.data_wypadku);
        assert_eq!(back.godzina_wypadku, data.godzina_wypadku);
        assert_eq!(back.rodzaj_urazow, data.rodzaj_urazow);
        assert_eq!(back.szczegoly_okolicznosci, data.szczegoly_okolicznosci);
        assert_eq!(
            back.miejsce_udzielenia_pomocy,
            data.miejsce_udzielenia_pomocy
        );
    }

    #[test]
    fn test_fields_to_document_tolerates_garbage() {
        let mut fields = BTreeMap::new();
        fields.insert("Dataurodzenia[0]".to_string(), "unreadable".to_string());
        fields.insert("Godzina[0]".to_string(), "25:99".to_string());
        fields.insert("Imię[0]".to_string(), "  Jan  ".to_string());

        let data = fields_to_document(&fields);
        assert_eq!(data.imie, "Jan");
        assert_eq!(data.data_urodzenia, NaiveDate::default());
        assert_eq!(data.godzina_wypadku, chrono::NaiveTime::default());
    }
}
