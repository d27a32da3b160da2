//! Diesel-based repository for accident notification records.
//!
//! Uses diesel-async's SyncConnectionWrapper for async SQLite support.
//! Witnesses are loaded per document and written together with the parent
//! record; deleting a record removes its witnesses.

use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::models::{DocumentRecord, NewDocument, NewWitness, WitnessRecord};
use super::pool::{AsyncSqlitePool, DieselError};
use super::util::parse_datetime;
use crate::models::{Document, DocumentData, Witness, WitnessData};
use crate::schema::{documents, witnesses};

/// Sort key for document listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    AccidentDate,
    Surname,
}

impl SortField {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "created_at" => Some(Self::CreatedAt),
            "data_wypadku" => Some(Self::AccidentDate),
            "nazwisko" => Some(Self::Surname),
            _ => None,
        }
    }
}

/// Sort direction for document listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filters for the list/count queries.
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    /// Substring match over name, surname, PESEL, and accident place.
    pub q: Option<String>,
    /// Accident date range (inclusive).
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub sort: SortField,
    pub order: SortOrder,
    pub limit: u32,
    pub offset: u32,
}

/// Diesel-based document repository with compile-time query checking.
#[derive(Clone)]
pub struct DocumentRepository {
    pool: AsyncSqlitePool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// Count all documents.
    pub async fn count_all(&self) -> Result<u64, DieselError> {
        let mut conn = self.pool.get().await?;

        use diesel::dsl::count_star;
        let count: i64 = documents::table
            .select(count_star())
            .first(&mut conn)
            .await?;

        Ok(count as u64)
    }

    /// Insert a record with its witnesses and return the stored document.
    pub async fn create(
        &self,
        data: &DocumentData,
        witnesses_data: &[WitnessData],
    ) -> Result<Document, DieselError> {
        let mut conn = self.pool.get().await?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let now_str = now.to_rfc3339();

        let record = new_document(&id, &now_str, data);
        diesel::insert_into(documents::table)
            .values(&record)
            .execute(&mut conn)
            .await?;

        for witness in witnesses_data {
            let new_witness = NewWitness {
                document_id: &id,
                imie: &witness.imie,
                nazwisko: &witness.nazwisko,
                ulica: &witness.ulica,
                nr_domu: &witness.nr_domu,
                nr_lokalu: witness.nr_lokalu.as_deref(),
                miejscowosc: &witness.miejscowosc,
                kod_pocztowy: &witness.kod_pocztowy,
                nazwa_panstwa: witness.nazwa_panstwa.as_deref(),
            };
            diesel::insert_into(witnesses::table)
                .values(&new_witness)
                .execute(&mut conn)
                .await?;
        }

        Ok(Document {
            id: id.clone(),
            created_at: now,
            updated_at: now,
            data: data.clone(),
            witnesses: self.load_witnesses(&id).await?,
        })
    }

    /// Get a document by ID with its witnesses.
    pub async fn get(&self, document_id: &str) -> Result<Option<Document>, DieselError> {
        let mut conn = self.pool.get().await?;

        let record: Option<DocumentRecord> = documents::table
            .find(document_id)
            .first(&mut conn)
            .await
            .optional()?;

        match record {
            Some(record) => {
                let witnesses = self.load_witnesses(document_id).await?;
                Ok(Some(record_to_document(record, witnesses)))
            }
            None => Ok(None),
        }
    }

    /// Delete a document and its witnesses. Returns false if absent.
    pub async fn delete(&self, document_id: &str) -> Result<bool, DieselError> {
        let mut conn = self.pool.get().await?;

        // The schema declares ON DELETE CASCADE; the explicit delete keeps
        // behavior identical on databases created before the pragma was set.
        diesel::delete(witnesses::table.filter(witnesses::document_id.eq(document_id)))
            .execute(&mut conn)
            .await?;
        let deleted = diesel::delete(documents::table.find(document_id))
            .execute(&mut conn)
            .await?;

        Ok(deleted > 0)
    }

    /// List documents with filters, sorting, and pagination.
    pub async fn list(&self, filter: &DocumentFilter) -> Result<Vec<Document>, DieselError> {
        let mut conn = self.pool.get().await?;

        let mut query = documents::table.into_boxed();
        if let Some(q) = &filter.q {
            let pattern = format!("%{}%", q);
            query = query.filter(
                documents::imie
                    .like(pattern.clone())
                    .or(documents::nazwisko.like(pattern.clone()))
                    .or(documents::pesel.like(pattern.clone()))
                    .or(documents::miejsce_wypadku.like(pattern)),
            );
        }
        if let Some(from) = filter.date_from {
            query = query.filter(documents::data_wypadku.ge(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(documents::data_wypadku.le(to));
        }

        query = match (filter.sort, filter.order) {
            (SortField::CreatedAt, SortOrder::Asc) => query.order(documents::created_at.asc()),
            (SortField::CreatedAt, SortOrder::Desc) => query.order(documents::created_at.desc()),
            (SortField::AccidentDate, SortOrder::Asc) => query.order(documents::data_wypadku.asc()),
            (SortField::AccidentDate, SortOrder::Desc) => {
                query.order(documents::data_wypadku.desc())
            }
            (SortField::Surname, SortOrder::Asc) => query.order(documents::nazwisko.asc()),
            (SortField::Surname, SortOrder::Desc) => query.order(documents::nazwisko.desc()),
        };

        let records: Vec<DocumentRecord> = query
            .limit(filter.limit as i64)
            .offset(filter.offset as i64)
            .load(&mut conn)
            .await?;

        let mut docs = Vec::with_capacity(records.len());
        for record in records {
            let witnesses = self.load_witnesses(&record.id).await?;
            docs.push(record_to_document(record, witnesses));
        }
        Ok(docs)
    }

    /// Count documents matching the filters (ignores pagination).
    pub async fn count(&self, filter: &DocumentFilter) -> Result<u64, DieselError> {
        let mut conn = self.pool.get().await?;

        use diesel::dsl::count_star;
        let mut query = documents::table.select(count_star()).into_boxed();

        if let Some(q) = &filter.q {
            let pattern = format!("%{}%", q);
            query = query.filter(
                documents::imie
                    .like(pattern.clone())
                    .or(documents::nazwisko.like(pattern.clone()))
                    .or(documents::pesel.like(pattern.clone()))
                    .or(documents::miejsce_wypadku.like(pattern)),
            );
        }
        if let Some(from) = filter.date_from {
            query = query.filter(documents::data_wypadku.ge(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(documents::data_wypadku.le(to));
        }

        let count: i64 = query.first(&mut conn).await?;
        Ok(count as u64)
    }

    /// Load witnesses for a document.
    pub async fn load_witnesses(&self, document_id: &str) -> Result<Vec<Witness>, DieselError> {
        let mut conn = self.pool.get().await?;

        let records: Vec<WitnessRecord> = witnesses::table
            .filter(witnesses::document_id.eq(document_id))
            .order(witnesses::id.asc())
            .load(&mut conn)
            .await?;

        Ok(records.into_iter().map(record_to_witness).collect())
    }
}

fn record_to_witness(record: WitnessRecord) -> Witness {
    Witness {
        id: record.id,
        document_id: record.document_id,
        data: WitnessData {
            imie: record.imie,
            nazwisko: record.nazwisko,
            ulica: record.ulica,
            nr_domu: record.nr_domu,
            nr_lokalu: record.nr_lokalu,
            miejscowosc: record.miejscowosc,
            kod_pocztowy: record.kod_pocztowy,
            nazwa_panstwa: record.nazwa_panstwa,
        },
    }
}

fn record_to_document(record: DocumentRecord, witnesses: Vec<Witness>) -> Document {
    Document {
        created_at: parse_datetime(&record.created_at),
        updated_at: parse_datetime(&record.updated_at),
        id: record.id,
        data: DocumentData {
            pesel: record.pesel,
            nr_dowodu: record.nr_dowodu,
            imie: record.imie,
            nazwisko: record.nazwisko,
            data_urodzenia: record.data_urodzenia,
            miejsce_urodzenia: record.miejsce_urodzenia,
            numer_telefonu: record.numer_telefonu,
            ulica: record.ulica,
            nr_domu: record.nr_domu,
            nr_lokalu: record.nr_lokalu,
            miejscowosc: record.miejscowosc,
            kod_pocztowy: record.kod_pocztowy,
            nazwa_panstwa: record.nazwa_panstwa,
            ulica_ostatniego_zamieszkania: record.ulica_ostatniego_zamieszkania,
            nr_domu_ostatniego_zamieszkania: record.nr_domu_ostatniego_zamieszkania,
            nr_lokalu_ostatniego_zamieszkania: record.nr_lokalu_ostatniego_zamieszkania,
            miejscowosc_ostatniego_zamieszkania: record.miejscowosc_ostatniego_zamieszkania,
            kod_pocztowy_ostatniego_zamieszkania: record.kod_pocztowy_ostatniego_zamieszkania,
            typ_korespondencji: record.typ_korespondencji,
            ulica_korespondencji: record.ulica_korespondencji,
            nr_domu_korespondencji: record.nr_domu_korespondencji,
            nr_lokalu_korespondencji: record.nr_lokalu_korespondencji,
            miejscowosc_korespondencji: record.miejscowosc_korespondencji,
            kod_pocztowy_korespondencji: record.kod_pocztowy_korespondencji,
            nazwa_panstwa_korespondencji: record.nazwa_panstwa_korespondencji,
            ulica_dzialalnosci: record.ulica_dzialalnosci,
            nr_domu_dzialalnosci: record.nr_domu_dzialalnosci,
            nr_lokalu_dzialalnosci: record.nr_lokalu_dzialalnosci,
            miejscowosc_dzialalnosci: record.miejscowosc_dzialalnosci,
            kod_pocztowy_dzialalnosci: record.kod_pocztowy_dzialalnosci,
            nr_telefonu_dzialalnosci: record.nr_telefonu_dzialalnosci,
            ulica_opieki: record.ulica_opieki,
            nr_domu_opieki: record.nr_domu_opieki,
            nr_lokalu_opieki: record.nr_lokalu_opieki,
            miejscowosc_opieki: record.miejscowosc_opieki,
            kod_pocztowy_opieki: record.kod_pocztowy_opieki,
            nr_telefonu_opieki: record.nr_telefonu_opieki,
            imie_zglaszajacego: record.imie_zglaszajacego,
            nazwisko_zglaszajacego: record.nazwisko_zglaszajacego,
            pesel_zglaszajacego: record.pesel_zglaszajacego,
            nr_dowodu_zglaszajacego: record.nr_dowodu_zglaszajacego,
            data_urodzenia_zglaszajacego: record.data_urodzenia_zglaszajacego,
            nr_telefonu_zglaszajacego: record.nr_telefonu_zglaszajacego,
            ulica_zglaszajacego: record.ulica_zglaszajacego,
            nr_domu_zglaszajacego: record.nr_domu_zglaszajacego,
            nr_lokalu_zglaszajacego: record.nr_lokalu_zglaszajacego,
            miejscowosc_zglaszajacego: record.miejscowosc_zglaszajacego,
            kod_pocztowy_zglaszajacego: record.kod_pocztowy_zglaszajacego,
            ulica_zglaszajacego_ostatniego_zamieszkania: record
                .ulica_zglaszajacego_ostatniego_zamieszkania,
            nr_domu_zglaszajacego_ostatniego_zamieszkania: record
                .nr_domu_zglaszajacego_ostatniego_zamieszkania,
            nr_lokalu_zglaszajacego_ostatniego_zamieszkania: record
                .nr_lokalu_zglaszajacego_ostatniego_zamieszkania,
            miejscowosc_zglaszajacego_ostatniego_zamieszkania: record
                .miejscowosc_zglaszajacego_ostatniego_zamieszkania,
            kod_pocztowy_zglaszajacego_ostatniego_zamieszkania: record
                .kod_pocztowy_zglaszajacego_ostatniego_zamieszkania,
            typ_korespondencji_zglaszajacego: record.typ_korespondencji_zglaszajacego,
            ulica_korespondencji_zglaszajacego: record.ulica_korespondencji_zglaszajacego,
            nr_domu_korespondencji_zglaszajacego: record.nr_domu_korespondencji_zglaszajacego,
            nr_lokalu_korespondencji_zglaszajacego: record.nr_lokalu_korespondencji_zglaszajacego,
            miejscowosc_korespondencji_zglaszajacego: record
                .miejscowosc_korespondencji_zglaszajacego,
            kod_pocztowy_korespondencji_zglaszajacego: record
                .kod_pocztowy_korespondencji_zglaszajacego,
            nazwa_panstwa_korespondencji_zglaszajacego: record
                .nazwa_panstwa_korespondencji_zglaszajacego,
            data_wypadku: record.data_wypadku,
            godzina_wypadku: record.godzina_wypadku,
            miejsce_wypadku: record.miejsce_wypadku,
            planowana_godzina_rozpoczecia_pracy: record.planowana_godzina_rozpoczecia_pracy,
            planowana_godzina_zakonczenia_pracy: record.planowana_godzina_zakonczenia_pracy,
            rodzaj_urazow: record.rodzaj_urazow,
            szczegoly_okolicznosci: record.szczegoly_okolicznosci,
            czy_udzielona_pomoc: record.czy_udzielona_pomoc,
            miejsce_udzielenia_pomocy: record.miejsce_udzielenia_pomocy,
            organ_postepowania: record.organ_postepowania,
            czy_wypadek_podczas_uzywania_maszyny: record.czy_wypadek_podczas_uzywania_maszyny,
            opis_maszyn: record.opis_maszyn,
            czy_maszyna_posiada_atest: record.czy_maszyna_posiada_atest,
            czy_maszyna_w_ewidencji: record.czy_maszyna_w_ewidencji,
        },
        witnesses,
    }
}

fn new_document<'a>(id: &'a str, now: &'a str, data: &'a DocumentData) -> NewDocument<'a> {
    NewDocument {
        id,
        created_at: now,
        updated_at: now,
        pesel: &data.pesel,
        nr_dowodu: &data.nr_dowodu,
        imie: &data.imie,
        nazwisko: &data.nazwisko,
        data_urodzenia: data.data_urodzenia,
        miejsce_urodzenia: &data.miejsce_urodzenia,
        numer_telefonu: data.numer_telefonu.as_deref(),
        ulica: &data.ulica,
        nr_domu: &data.nr_domu,
        nr_lokalu: data.nr_lokalu.as_deref(),
        miejscowosc: &data.miejscowosc,
        kod_pocztowy: &data.kod_pocztowy,
        nazwa_panstwa: data.nazwa_panstwa.as_deref(),
        ulica_ostatniego_zamieszkania: data.ulica_ostatniego_zamieszkania.as_deref(),
        nr_domu_ostatniego_zamieszkania: data.nr_domu_ostatniego_zamieszkania.as_deref(),
        nr_lokalu_ostatniego_zamieszkania: data.nr_lokalu_ostatniego_zamieszkania.as_deref(),
        miejscowosc_ostatniego_zamieszkania: data.miejscowosc_ostatniego_zamieszkania.as_deref(),
        kod_pocztowy_ostatniego_zamieszkania: data.kod_pocztowy_ostatniego_zamieszkania.as_deref(),
        typ_korespondencji: data.typ_korespondencji.as_deref(),
        ulica_korespondencji: data.ulica_korespondencji.as_deref(),
        nr_domu_korespondencji: data.nr_domu_korespondencji.as_deref(),
        nr_lokalu_korespondencji: data.nr_lokalu_korespondencji.as_deref(),
        miejscowosc_korespondencji: data.miejscowosc_korespondencji.as_deref(),
        kod_pocztowy_korespondencji: data.kod_pocztowy_korespondencji.as_deref(),
        nazwa_panstwa_korespondencji: data.nazwa_panstwa_korespondencji.as_deref(),
        ulica_dzialalnosci: data.ulica_dzialalnosci.as_deref(),
        nr_domu_dzialalnosci: data.nr_domu_dzialalnosci.as_deref(),
        nr_lokalu_dzialalnosci: data.nr_lokalu_dzialalnosci.as_deref(),
        miejscowosc_dzialalnosci: data.miejscowosc_dzialalnosci.as_deref(),
        kod_pocztowy_dzialalnosci: data.kod_pocztowy_dzialalnosci.as_deref(),
        nr_telefonu_dzialalnosci: data.nr_telefonu_dzialalnosci.as_deref(),
        ulica_opieki: data.ulica_opieki.as_deref(),
        nr_domu_opieki: data.nr_domu_opieki.as_deref(),
        nr_lokalu_opieki: data.nr_lokalu_opieki.as_deref(),
        miejscowosc_opieki: data.miejscowosc_opieki.as_deref(),
        kod_pocztowy_opieki: data.kod_pocztowy_opieki.as_deref(),
        nr_telefonu_opieki: data.nr_telefonu_opieki.as_deref(),
        imie_zglaszajacego: data.imie_zglaszajacego.as_deref(),
        nazwisko_zglaszajacego: data.nazwisko_zglaszajacego.as_deref(),
        pesel_zglaszajacego: data.pesel_zglaszajacego.as_deref(),
        nr_dowodu_zglaszajacego: data.nr_dowodu_zglaszajacego.as_deref(),
        data_urodzenia_zglaszajacego: data.data_urodzenia_zglaszajacego,
        nr_telefonu_zglaszajacego: data.nr_telefonu_zglaszajacego.as_deref(),
        ulica_zglaszajacego: data.ulica_zglaszajacego.as_deref(),
        nr_domu_zglaszajacego: data.nr_domu_zglaszajacego.as_deref(),
        nr_lokalu_zglaszajacego: data.nr_lokalu_zglaszajacego.as_deref(),
        miejscowosc_zglaszajacego: data.miejscowosc_zglaszajacego.as_deref(),
        kod_pocztowy_zglaszajacego: data.kod_pocztowy_zglaszajacego.as_deref(),
        ulica_zglaszajacego_ostatniego_zamieszkania: data
            .ulica_zglaszajacego_ostatniego_zamieszkania
            .as_deref(),
        nr_domu_zglaszajacego_ostatniego_zamieszkania: data
            .nr_domu_zglaszajacego_ostatniego_zamieszkania
            .as_deref(),
        nr_lokalu_zglaszajacego_ostatniego_zamieszkania: data
            .nr_lokalu_zglaszajacego_ostatniego_zamieszkania
            .as_deref(),
        miejscowosc_zglaszajacego_ostatniego_zamieszkania: data
            .miejscowosc_zglaszajacego_ostatniego_zamieszkania
            .as_deref(),
        kod_pocztowy_zglaszajacego_ostatniego_zamieszkania: data
            .kod_pocztowy_zglaszajacego_ostatniego_zamieszkania
            .as_deref(),
        typ_korespondencji_zglaszajacego: data.typ_korespondencji_zglaszajacego.as_deref(),
        ulica_korespondencji_zglaszajacego: data.ulica_korespondencji_zglaszajacego.as_deref(),
        nr_domu_korespondencji_zglaszajacego: data
            .nr_domu_korespondencji_zglaszajacego
            .as_deref(),
        nr_lokalu_korespondencji_zglaszajacego: data
            .nr_lokalu_korespondencji_zglaszajacego
            .as_deref(),
        miejscowosc_korespondencji_zglaszajacego: data
            .miejscowosc_korespondencji_zglaszajacego
            .as_deref(),
        kod_pocztowy_korespondencji_zglaszajacego: data
            .kod_pocztowy_korespondencji_zglaszajacego
            .as_deref(),
        nazwa_panstwa_korespondencji_zglaszajacego: data
            .nazwa_panstwa_korespondencji_zglaszajacego
            .as_deref(),
        data_wypadku: data.data_wypadku,
        godzina_wypadku: data.godzina_wypadku,
        miejsce_wypadku: &data.miejsce_wypadku,
        planowana_godzina_rozpoczecia_pracy: data.planowana_godzina_rozpoczecia_pracy,
        planowana_godzina_zakonczenia_pracy: data.planowana_godzina_zakonczenia_pracy,
        rodzaj_urazow: &data.rodzaj_urazow,
        szczegoly_okolicznosci: &data.szczegoly_okolicznosci,
        czy_udzielona_pomoc: data.czy_udzielona_pomoc,
        miejsce_udzielenia_pomocy: data.miejsce_udzielenia_pomocy.as_deref(),
        organ_postepowania: data.organ_postepowania.as_deref(),
        czy_wypadek_podczas_uzywania_maszyny: data.czy_wypadek_podczas_uzywania_maszyny,
        opis_maszyn: data.opis_maszyn.as_deref(),
        czy_maszyna_posiada_atest: data.czy_maszyna_posiada_atest,
        czy_maszyna_w_ewidencji: data.czy_maszyna_w_ewidencji,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::{sample_data, sample_witness};
    use crate::repository::context::DbContext;

    async fn test_repo() -> (DocumentRepository, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let ctx = DbContext::from_sqlite_path(&dir.path().join("test.db"));
        ctx.init_schema().await.unwrap();
        (ctx.documents(), dir)
    }

    #[tokio::test]
    async fn test_create_and_get_round_trip() {
        let (repo, _dir) = test_repo().await;

        let created = repo
            .create(&sample_data(), &[sample_witness()])
            .await
            .unwrap();
        let fetched = repo.get(&created.id).await.unwrap().unwrap();

        assert_eq!(fetched.data, sample_data());
        assert_eq!(fetched.witnesses.len(), 1);
        assert_eq!(fetched.witnesses[0].data, sample_witness());
        assert_eq!(fetched.witnesses[0].document_id, created.id);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let (repo, _dir) = test_repo().await;
        assert!(repo.get("no-such-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_cascades_to_witnesses() {
        let (repo, _dir) = test_repo().await;

        let created = repo
            .create(&sample_data(), &[sample_witness(), sample_witness()])
            .await
            .unwrap();
        assert_eq!(repo.load_witnesses(&created.id).await.unwrap().len(), 2);

        assert!(repo.delete(&created.id).await.unwrap());
        assert!(repo.get(&created.id).await.unwrap().is_none());
        assert!(repo.load_witnesses(&created.id).await.unwrap().is_empty());

        // Second delete is a no-op
        assert!(!repo.delete(&created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_filters_and_pagination() {
        let (repo, _dir) = test_repo().await;

        let mut other = sample_data();
        other.nazwisko = "Nowak".to_string();
        other.data_wypadku = chrono::NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();

        repo.create(&sample_data(), &[]).await.unwrap();
        repo.create(&other, &[]).await.unwrap();

        let all = DocumentFilter {
            limit: 50,
            ..Default::default()
        };
        assert_eq!(repo.list(&all).await.unwrap().len(), 2);
        assert_eq!(repo.count(&all).await.unwrap(), 2);

        let by_name = DocumentFilter {
            q: Some("Nowak".to_string()),
            limit: 50,
            ..Default::default()
        };
        let found = repo.list(&by_name).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].data.nazwisko, "Nowak");

        let by_date = DocumentFilter {
            date_from: chrono::NaiveDate::from_ymd_opt(2024, 1, 1),
            limit: 50,
            ..Default::default()
        };
        let found = repo.list(&by_date).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].data.nazwisko, "Kowalski");

        let paged = DocumentFilter {
            sort: SortField::Surname,
            order: SortOrder::Asc,
            limit: 1,
            offset: 1,
            ..Default::default()
        };
        let found = repo.list(&paged).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].data.nazwisko, "Nowak");
    }
}
