//! SQL DDL for the reader's local record store.

/// SQLite schema with:
/// - three singleton tables (`credential`, `app_settings`, `reading_preferences`),
///   each with an `id` INTEGER PRIMARY KEY AUTOINCREMENT
/// - `reading_progress` keyed by bare `file_name` (not path)
/// - booleans stored as INTEGER 0/1
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS credential (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    secret TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS app_settings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    keep_screen_on INTEGER NOT NULL DEFAULT 0,
    startup_password_enabled INTEGER NOT NULL DEFAULT 0,
    exit_lock_enabled INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS reading_preferences (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    font_size INTEGER NOT NULL DEFAULT 18,
    background_color TEXT NOT NULL DEFAULT '#FFF8E8'
);

CREATE TABLE IF NOT EXISTS reading_progress (
    file_name TEXT NOT NULL PRIMARY KEY,
    last_page INTEGER NOT NULL DEFAULT 0 CHECK (last_page >= 0)
);
"#;
