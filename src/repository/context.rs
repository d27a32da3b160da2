//! Database context for managing connections and repository access.
//!
//! Provides a unified entry point for database operations using Diesel ORM
//! over SQLite.

use std::path::Path;

use diesel_async::SimpleAsyncConnection;

use super::document::DocumentRepository;
use super::pool::{AsyncSqlitePool, DieselError};

/// Database context that manages the connection pool and provides repository
/// access. Create one context per command or service.
#[derive(Clone)]
pub struct DbContext {
    pool: AsyncSqlitePool,
}

impl DbContext {
    /// Create a new database context from a database URL.
    pub fn from_url(database_url: &str) -> Self {
        Self {
            pool: AsyncSqlitePool::new(database_url),
        }
    }

    /// Create a new database context from a file path.
    pub fn from_sqlite_path(db_path: &Path) -> Self {
        Self {
            pool: AsyncSqlitePool::from_path(db_path),
        }
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &AsyncSqlitePool {
        &self.pool
    }

    /// Get a document repository.
    pub fn documents(&self) -> DocumentRepository {
        DocumentRepository::new(self.pool.clone())
    }

    /// Initialize the database schema.
    ///
    /// Creates the necessary tables if they don't exist.
    pub async fn init_schema(&self) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;
        conn.batch_execute(
            r#"
            -- Accident notification records
            CREATE TABLE IF NOT EXISTS documents (
                id TEXT PRIMARY KEY,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                pesel TEXT NOT NULL,
                nr_dowodu TEXT NOT NULL,
                imie TEXT NOT NULL,
                nazwisko TEXT NOT NULL,
                data_urodzenia DATE NOT NULL,
                miejsce_urodzenia TEXT NOT NULL,
                numer_telefonu TEXT,
                ulica TEXT NOT NULL,
                nr_domu TEXT NOT NULL,
                nr_lokalu TEXT,
                miejscowosc TEXT NOT NULL,
                kod_pocztowy TEXT NOT NULL,
                nazwa_panstwa TEXT,
                ulica_ostatniego_zamieszkania TEXT,
                nr_domu_ostatniego_zamieszkania TEXT,
                nr_lokalu_ostatniego_zamieszkania TEXT,
                miejscowosc_ostatniego_zamieszkania TEXT,
                kod_pocztowy_ostatniego_zamieszkania TEXT,
                typ_korespondencji TEXT,
                ulica_korespondencji TEXT,
                nr_domu_korespondencji TEXT,
                nr_lokalu_korespondencji TEXT,
                miejscowosc_korespondencji TEXT,
                kod_pocztowy_korespondencji TEXT,
                nazwa_panstwa_korespondencji TEXT,
                ulica_dzialalnosci TEXT,
                nr_domu_dzialalnosci TEXT,
                nr_lokalu_dzialalnosci TEXT,
                miejscowosc_dzialalnosci TEXT,
                kod_pocztowy_dzialalnosci TEXT,
                nr_telefonu_dzialalnosci TEXT,
                ulica_opieki TEXT,
                nr_domu_opieki TEXT,
                nr_lokalu_opieki TEXT,
                miejscowosc_opieki TEXT,
                kod_pocztowy_opieki TEXT,
                nr_telefonu_opieki TEXT,
                imie_zglaszajacego TEXT,
                nazwisko_zglaszajacego TEXT,
                pesel_zglaszajacego TEXT,
                nr_dowodu_zglaszajacego TEXT,
                data_urodzenia_zglaszajacego DATE,
                nr_telefonu_zglaszajacego TEXT,
                ulica_zglaszajacego TEXT,
                nr_domu_zglaszajacego TEXT,
                nr_lokalu_zglaszajacego TEXT,
                miejscowosc_zglaszajacego TEXT,
                kod_pocztowy_zglaszajacego TEXT,
                ulica_zglaszajacego_ostatniego_zamieszkania TEXT,
                nr_domu_zglaszajacego_ostatniego_zamieszkania TEXT,
                nr_lokalu_zglaszajacego_ostatniego_zamieszkania TEXT,
                miejscowosc_zglaszajacego_ostatniego_zamieszkania TEXT,
                kod_pocztowy_zglaszajacego_ostatniego_zamieszkania TEXT,
                typ_korespondencji_zglaszajacego TEXT,
                ulica_korespondencji_zglaszajacego TEXT,
                nr_domu_korespondencji_zglaszajacego TEXT,
                nr_lokalu_korespondencji_zglaszajacego TEXT,
                miejscowosc_korespondencji_zglaszajacego TEXT,
                kod_pocztowy_korespondencji_zglaszajacego TEXT,
                nazwa_panstwa_korespondencji_zglaszajacego TEXT,
                data_wypadku DATE NOT NULL,
                godzina_wypadku TIME NOT NULL,
                miejsce_wypadku TEXT NOT NULL,
                planowana_godzina_rozpoczecia_pracy TIME NOT NULL,
                planowana_godzina_zakonczenia_pracy TIME NOT NULL,
                rodzaj_urazow TEXT NOT NULL,
                szczegoly_okolicznosci TEXT NOT NULL,
                czy_udzielona_pomoc BOOLEAN NOT NULL DEFAULT 0,
                miejsce_udzielenia_pomocy TEXT,
                organ_postepowania TEXT,
                czy_wypadek_podczas_uzywania_maszyny BOOLEAN NOT NULL DEFAULT 0,
                opis_maszyn TEXT,
                czy_maszyna_posiada_atest BOOLEAN,
                czy_maszyna_w_ewidencji BOOLEAN
            );

            -- Witnesses, owned by a single document
            CREATE TABLE IF NOT EXISTS witnesses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                document_id TEXT NOT NULL,
                imie TEXT NOT NULL,
                nazwisko TEXT NOT NULL,
                ulica TEXT NOT NULL,
                nr_domu TEXT NOT NULL,
                nr_lokalu TEXT,
                miejscowosc TEXT NOT NULL,
                kod_pocztowy TEXT NOT NULL,
                nazwa_panstwa TEXT,
                FOREIGN KEY (document_id) REFERENCES documents(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_documents_nazwisko ON documents(nazwisko);
            CREATE INDEX IF NOT EXISTS idx_documents_data_wypadku ON documents(data_wypadku);
            CREATE INDEX IF NOT EXISTS idx_witnesses_document_id ON witnesses(document_id);
            "#,
        )
        .await
    }
}
