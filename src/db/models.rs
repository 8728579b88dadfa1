use crate::pagination::FontTier;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite};
use std::fmt;

pub const DEFAULT_BACKGROUND_COLOR: &str = "#FFF8E8";

/// Query type the record traits bind their columns into.
pub type SqliteQuery<'q> =
    sqlx::query::Query<'q, Sqlite, <Sqlite as sqlx::Database>::Arguments<'q>>;

/// The four logical record kinds persisted by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Credential,
    AppSettings,
    ReadingPreferences,
    ReadingProgress,
}

impl RecordKind {
    pub const fn table(self) -> &'static str {
        match self {
            RecordKind::Credential => "credential",
            RecordKind::AppSettings => "app_settings",
            RecordKind::ReadingPreferences => "reading_preferences",
            RecordKind::ReadingProgress => "reading_progress",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// A record kind that occupies at most one row of its table.
///
/// Rows carry a surrogate `id` the store manages; implementors only describe
/// their own columns, in the same order for `COLUMNS` and `bind_columns`.
pub trait SingletonRecord: Sized + Send + Sync + Unpin {
    const KIND: RecordKind;
    const COLUMNS: &'static [&'static str];

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error>;

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub secret: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl SingletonRecord for Credential {
    const KIND: RecordKind = RecordKind::Credential;
    const COLUMNS: &'static [&'static str] = &["secret"];

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            secret: row.try_get("secret")?,
        })
    }

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query.bind(self.secret.as_str())
    }
}

/// App-wide toggles. `exit_lock_enabled` implies `startup_password_enabled`
/// whenever the settings toggles are used to change them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppSettings {
    pub keep_screen_on: bool,
    pub startup_password_enabled: bool,
    pub exit_lock_enabled: bool,
}

impl SingletonRecord for AppSettings {
    const KIND: RecordKind = RecordKind::AppSettings;
    const COLUMNS: &'static [&'static str] = &[
        "keep_screen_on",
        "startup_password_enabled",
        "exit_lock_enabled",
    ];

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            keep_screen_on: row.try_get("keep_screen_on")?,
            startup_password_enabled: row.try_get("startup_password_enabled")?,
            exit_lock_enabled: row.try_get("exit_lock_enabled")?,
        })
    }

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.keep_screen_on)
            .bind(self.startup_password_enabled)
            .bind(self.exit_lock_enabled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingPreferences {
    /// Font size in points; one of the [`FontTier`] sizes when written by a session.
    pub font_size: u32,
    pub background_color: String,
}

impl Default for ReadingPreferences {
    fn default() -> Self {
        Self {
            font_size: FontTier::default().points(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
        }
    }
}

impl SingletonRecord for ReadingPreferences {
    const KIND: RecordKind = RecordKind::ReadingPreferences;
    const COLUMNS: &'static [&'static str] = &["font_size", "background_color"];

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            font_size: row.try_get("font_size")?,
            background_color: row.try_get("background_color")?,
        })
    }

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.font_size)
            .bind(self.background_color.as_str())
    }
}

/// Last page read for one imported file, keyed by bare file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingProgress {
    pub file_name: String,
    pub last_page: u32,
}

impl ReadingProgress {
    pub fn new(file_name: impl Into<String>, last_page: u32) -> Self {
        Self {
            file_name: file_name.into(),
            last_page,
        }
    }

    pub(crate) fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            file_name: row.try_get("file_name")?,
            last_page: row.try_get("last_page")?,
        })
    }
}
