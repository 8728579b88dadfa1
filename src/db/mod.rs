//! Database module: the reader's embedded record store.
//!
//! Layout:
//! - `models.rs`: record structs, `RecordKind` and the `SingletonRecord` trait
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `sqlite.rs`: `RecordStore`, typed get/upsert over the four tables

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{
    AppSettings, Credential, ReadingPreferences, ReadingProgress, RecordKind, SingletonRecord,
};
pub use schema::SQLITE_INIT;
pub use sqlite::{RecordStore, SqlitePool};
