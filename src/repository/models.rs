//! Diesel ORM models for database tables.
//!
//! These models provide compile-time type checking for database operations.
//! Timestamps are stored as RFC 3339 TEXT; form dates and times use the
//! SQLite Date/Time mappings from diesel's chrono support.

use chrono::{NaiveDate, NaiveTime};
use diesel::prelude::*;

use crate::schema;

/// Document record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::documents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DocumentRecord {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub pesel: String,
    pub nr_dowodu: String,
    pub imie: String,
    pub nazwisko: String,
    pub data_urodzenia: NaiveDate,
    pub miejsce_urodzenia: String,
    pub numer_telefonu: Option<String>,
    pub ulica: String,
    pub nr_domu: String,
    pub nr_lokalu: Option<String>,
    pub miejscowosc: String,
    pub kod_pocztowy: String,
    pub nazwa_panstwa: Option<String>,
    pub ulica_ostatniego_zamieszkania: Option<String>,
    pub nr_domu_ostatniego_zamieszkania: Option<String>,
    pub nr_lokalu_ostatniego_zamieszkania: Option<String>,
    pub miejscowosc_ostatniego_zamieszkania: Option<String>,
    pub kod_pocztowy_ostatniego_zamieszkania: Option<String>,
    pub typ_korespondencji: Option<String>,
    pub ulica_korespondencji: Option<String>,
    pub nr_domu_korespondencji: Option<String>,
    pub nr_lokalu_korespondencji: Option<String>,
    pub miejscowosc_korespondencji: Option<String>,
    pub kod_pocztowy_korespondencji: Option<String>,
    pub nazwa_panstwa_korespondencji: Option<String>,
    pub ulica_dzialalnosci: Option<String>,
    pub nr_domu_dzialalnosci: Option<String>,
    pub nr_lokalu_dzialalnosci: Option<String>,
    pub miejscowosc_dzialalnosci: Option<String>,
    pub kod_pocztowy_dzialalnosci: Option<String>,
    pub nr_telefonu_dzialalnosci: Option<String>,
    pub ulica_opieki: Option<String>,
    pub nr_domu_opieki: Option<String>,
    pub nr_lokalu_opieki: Option<String>,
    pub miejscowosc_opieki: Option<String>,
    pub kod_pocztowy_opieki: Option<String>,
    pub nr_telefonu_opieki: Option<String>,
    pub imie_zglaszajacego: Option<String>,
    pub nazwisko_zglaszajacego: Option<String>,
    pub pesel_zglaszajacego: Option<String>,
    pub nr_dowodu_zglaszajacego: Option<String>,
    pub data_urodzenia_zglaszajacego: Option<NaiveDate>,
    pub nr_telefonu_zglaszajacego: Option<String>,
    pub ulica_zglaszajacego: Option<String>,
    pub nr_domu_zglaszajacego: Option<String>,
    pub nr_lokalu_zglaszajacego: Option<String>,
    pub miejscowosc_zglaszajacego: Option<String>,
    pub kod_pocztowy_zglaszajacego: Option<String>,
    pub ulica_zglaszajacego_ostatniego_zamieszkania: Option<String>,
    pub nr_domu_zglaszajacego_ostatniego_zamieszkania: Option<String>,
    pub nr_lokalu_zglaszajacego_ostatniego_zamieszkania: Option<String>,
    pub miejscowosc_zglaszajacego_ostatniego_zamieszkania: Option<String>,
    pub kod_pocztowy_zglaszajacego_ostatniego_zamieszkania: Option<String>,
    pub typ_korespondencji_zglaszajacego: Option<String>,
    pub ulica_korespondencji_zglaszajacego: Option<String>,
    pub nr_domu_korespondencji_zglaszajacego: Option<String>,
    pub nr_lokalu_korespondencji_zglaszajacego: Option<String>,
    pub miejscowosc_korespondencji_zglaszajacego: Option<String>,
    pub kod_pocztowy_korespondencji_zglaszajacego: Option<String>,
    pub nazwa_panstwa_korespondencji_zglaszajacego: Option<String>,
    pub data_wypadku: NaiveDate,
    pub godzina_wypadku: NaiveTime,
    pub miejsce_wypadku: String,
    pub planowana_godzina_rozpoczecia_pracy: NaiveTime,
    pub planowana_godzina_zakonczenia_pracy: NaiveTime,
    pub rodzaj_urazow: String,
    pub szczegoly_okolicznosci: String,
    pub czy_udzielona_pomoc: bool,
    pub miejsce_udzielenia_pomocy: Option<String>,
    pub organ_postepowania: Option<String>,
    pub czy_wypadek_podczas_uzywania_maszyny: bool,
    pub opis_maszyn: Option<String>,
    pub czy_maszyna_posiada_atest: Option<bool>,
    pub czy_maszyna_w_ewidencji: Option<bool>,
}

/// New document for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::documents)]
pub struct NewDocument<'a> {
    pub id: &'a str,
    pub created_at: &'a str,
    pub updated_at: &'a str,
    pub pesel: &'a str,
    pub nr_dowodu: &'a str,
    pub imie: &'a str,
    pub nazwisko: &'a str,
    pub data_urodzenia: NaiveDate,
    pub miejsce_urodzenia: &'a str,
    pub numer_telefonu: Option<&'a str>,
    pub ulica: &'a str,
    pub nr_domu: &'a str,
    pub nr_lokalu: Option<&'a str>,
    pub miejscowosc: &'a str,
    pub kod_pocztowy: &'a str,
    pub nazwa_panstwa: Option<&'a str>,
    pub ulica_ostatniego_zamieszkania: Option<&'a str>,
    pub nr_domu_ostatniego_zamieszkania: Option<&'a str>,
    pub nr_lokalu_ostatniego_zamieszkania: Option<&'a str>,
    pub miejscowosc_ostatniego_zamieszkania: Option<&'a str>,
    pub kod_pocztowy_ostatniego_zamieszkania: Option<&'a str>,
    pub typ_korespondencji: Option<&'a str>,
    pub ulica_korespondencji: Option<&'a str>,
    pub nr_domu_korespondencji: Option<&'a str>,
    pub nr_lokalu_korespondencji: Option<&'a str>,
    pub miejscowosc_korespondencji: Option<&'a str>,
    pub kod_pocztowy_korespondencji: Option<&'a str>,
    pub nazwa_panstwa_korespondencji: Option<&'a str>,
    pub ulica_dzialalnosci: Option<&'a str>,
    pub nr_domu_dzialalnosci: Option<&'a str>,
    pub nr_lokalu_dzialalnosci: Option<&'a str>,
    pub miejscowosc_dzialalnosci: Option<&'a str>,
    pub kod_pocztowy_dzialalnosci: Option<&'a str>,
    pub nr_telefonu_dzialalnosci: Option<&'a str>,
    pub ulica_opieki: Option<&'a str>,
    pub nr_domu_opieki: Option<&'a str>,
    pub nr_lokalu_opieki: Option<&'a str>,
    pub miejscowosc_opieki: Option<&'a str>,
    pub kod_pocztowy_opieki: Option<&'a str>,
    pub nr_telefonu_opieki: Option<&'a str>,
    pub imie_zglaszajacego: Option<&'a str>,
    pub nazwisko_zglaszajacego: Option<&'a str>,
    pub pesel_zglaszajacego: Option<&'a str>,
    pub nr_dowodu_zglaszajacego: Option<&'a str>,
    pub data_urodzenia_zglaszajacego: Option<NaiveDate>,
    pub nr_telefonu_zglaszajacego: Option<&'a str>,
    pub ulica_zglaszajacego: Option<&'a str>,
    pub nr_domu_zglaszajacego: Option<&'a str>,
    pub nr_lokalu_zglaszajacego: Option<&'a str>,
    pub miejscowosc_zglaszajacego: Option<&'a str>,
    pub kod_pocztowy_zglaszajacego: Option<&'a str>,
    pub ulica_zglaszajacego_ostatniego_zamieszkania: Option<&'a str>,
    pub nr_domu_zglaszajacego_ostatniego_zamieszkania: Option<&'a str>,
    pub nr_lokalu_zglaszajacego_ostatniego_zamieszkania: Option<&'a str>,
    pub miejscowosc_zglaszajacego_ostatniego_zamieszkania: Option<&'a str>,
    pub kod_pocztowy_zglaszajacego_ostatniego_zamieszkania: Option<&'a str>,
    pub typ_korespondencji_zglaszajacego: Option<&'a str>,
    pub ulica_korespondencji_zglaszajacego: Option<&'a str>,
    pub nr_domu_korespondencji_zglaszajacego: Option<&'a str>,
    pub nr_lokalu_korespondencji_zglaszajacego: Option<&'a str>,
    pub miejscowosc_korespondencji_zglaszajacego: Option<&'a str>,
    pub kod_pocztowy_korespondencji_zglaszajacego: Option<&'a str>,
    pub nazwa_panstwa_korespondencji_zglaszajacego: Option<&'a str>,
    pub data_wypadku: NaiveDate,
    pub godzina_wypadku: NaiveTime,
    pub miejsce_wypadku: &'a str,
    pub planowana_godzina_rozpoczecia_pracy: NaiveTime,
    pub planowana_godzina_zakonczenia_pracy: NaiveTime,
    pub rodzaj_urazow: &'a str,
    pub szczegoly_okolicznosci: &'a str,
    pub czy_udzielona_pomoc: bool,
    pub miejsce_udzielenia_pomocy: Option<&'a str>,
    pub organ_postepowania: Option<&'a str>,
    pub czy_wypadek_podczas_uzywania_maszyny: bool,
    pub opis_maszyn: Option<&'a str>,
    pub czy_maszyna_posiada_atest: Option<bool>,
    pub czy_maszyna_w_ewidencji: Option<bool>,
}

/// Witness record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::witnesses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WitnessRecord {
    pub id: i64,
    pub document_id: String,
    pub imie: String,
    pub nazwisko: String,
    pub ulica: String,
    pub nr_domu: String,
    pub nr_lokalu: Option<String>,
    pub miejscowosc: String,
    pub kod_pocztowy: String,
    pub nazwa_panstwa: Option<String>,
}

/// New witness for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::witnesses)]
pub struct NewWitness<'a> {
    pub document_id: &'a str,
    pub imie: &'a str,
    pub nazwisko: &'a str,
    pub ulica: &'a str,
    pub nr_domu: &'a str,
    pub nr_lokalu: Option<&'a str>,
    pub miejscowosc: &'a str,
    pub kod_pocztowy: &'a str,
    pub nazwa_panstwa: Option<&'a str>,
}
