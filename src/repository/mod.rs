//! Repository layer for database persistence.
//!
//! All database access uses Diesel ORM with compile-time query checking
//! over SQLite.

pub mod context;
pub mod document;
pub mod models;
pub mod pool;
pub mod util;

pub use context::DbContext;
pub use document::{DocumentFilter, DocumentRepository, SortField, SortOrder};
pub use pool::{AsyncSqlitePool, DieselError};
