use crate::db::models::{AppSettings, ReadingPreferences, ReadingProgress, SingletonRecord};
use crate::db::schema::SQLITE_INIT;
use crate::error::ReaderError;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteConnection, SqliteJournalMode, SqlitePoolOptions,
    SqliteSynchronous,
};
use sqlx::{Pool, Row, Sqlite};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

pub type SqlitePool = Pool<Sqlite>;

/// Typed access to the four record tables.
///
/// Every write runs in its own transaction and is committed with
/// `synchronous=FULL` before the call returns.
#[derive(Clone)]
pub struct RecordStore {
    pool: SqlitePool,
}

impl RecordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Open (creating if needed) the database file at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, ReaderError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ReaderError::Storage(sqlx::Error::Io(e)))?;
        }
        let connect_opts = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Self::connect_with(connect_opts).await
    }

    /// Connect using a `sqlite:` URL.
    pub async fn connect(database_url: &str) -> Result<Self, ReaderError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        Self::connect_with(connect_opts).await
    }

    async fn connect_with(connect_opts: SqliteConnectOptions) -> Result<Self, ReaderError> {
        let connect_opts = connect_opts
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Full);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        Ok(Self::new(pool))
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Create the tables and seed the default settings rows. Idempotent.
    pub async fn initialize(&self) -> Result<(), ReaderError> {
        // sqlx::query runs a single statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }

        let mut tx = self.pool.begin().await?;
        let seeded_settings = insert_default_if_absent::<AppSettings>(&mut *tx).await?;
        let seeded_preferences = insert_default_if_absent::<ReadingPreferences>(&mut *tx).await?;
        tx.commit().await?;

        info!(
            seeded_settings,
            seeded_preferences, "record store initialized"
        );
        Ok(())
    }

    pub async fn get_singleton<T: SingletonRecord>(&self) -> Result<Option<T>, ReaderError> {
        let mut conn = self.pool.acquire().await?;
        let row = fetch_first::<T>(&mut *conn).await?;
        Ok(row.map(|(_, record)| record))
    }

    /// Read-modify-write of the singleton row; inserts it when absent.
    pub async fn upsert_singleton<T: SingletonRecord>(&self, record: &T) -> Result<(), ReaderError> {
        let mut tx = self.pool.begin().await?;
        match fetch_first::<T>(&mut *tx).await? {
            Some((id, _)) => update_by_id(&mut *tx, id, record).await?,
            None => insert(&mut *tx, record).await?,
        }
        tx.commit().await?;
        debug!(kind = %T::KIND, "singleton upserted");
        Ok(())
    }

    /// Delete every row of the kind, then insert `record`, as one transaction.
    pub async fn replace_singleton<T: SingletonRecord>(
        &self,
        record: &T,
    ) -> Result<(), ReaderError> {
        let mut tx = self.pool.begin().await?;
        let removed = delete_rows::<T>(&mut *tx).await?;
        insert(&mut *tx, record).await?;
        tx.commit().await?;
        debug!(kind = %T::KIND, removed, "singleton replaced");
        Ok(())
    }

    pub async fn delete_all<T: SingletonRecord>(&self) -> Result<u64, ReaderError> {
        let mut conn = self.pool.acquire().await?;
        let removed = delete_rows::<T>(&mut *conn).await?;
        debug!(kind = %T::KIND, removed, "rows deleted");
        Ok(removed)
    }

    pub async fn count<T: SingletonRecord>(&self) -> Result<i64, ReaderError> {
        let sql = format!("SELECT COUNT(*) FROM {}", T::KIND.table());
        let n: i64 = sqlx::query_scalar::<_, i64>(&sql).fetch_one(&self.pool).await?;
        Ok(n)
    }

    pub async fn get_by_key(&self, file_name: &str) -> Result<Option<ReadingProgress>, ReaderError> {
        let row = sqlx::query(
            "SELECT file_name, last_page FROM reading_progress WHERE file_name = ?",
        )
        .bind(file_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(ReadingProgress::from_row).transpose()?)
    }

    /// Upsert by unique file_name.
    pub async fn upsert_by_key(&self, progress: &ReadingProgress) -> Result<(), ReaderError> {
        sqlx::query(
            r#"
            INSERT INTO reading_progress (file_name, last_page) VALUES (?, ?)
            ON CONFLICT(file_name) DO UPDATE SET last_page = excluded.last_page
            "#,
        )
        .bind(progress.file_name.as_str())
        .bind(progress.last_page)
        .execute(&self.pool)
        .await?;
        debug!(file = %progress.file_name, page = progress.last_page, "progress saved");
        Ok(())
    }
}

fn column_list<T: SingletonRecord>() -> String {
    T::COLUMNS.join(", ")
}

async fn fetch_first<T: SingletonRecord>(
    conn: &mut SqliteConnection,
) -> Result<Option<(i64, T)>, sqlx::Error> {
    let sql = format!(
        "SELECT id, {} FROM {} ORDER BY id LIMIT 1",
        column_list::<T>(),
        T::KIND.table()
    );
    let Some(row) = sqlx::query(&sql).fetch_optional(&mut *conn).await? else {
        return Ok(None);
    };
    let id: i64 = row.try_get("id")?;
    Ok(Some((id, T::from_row(&row)?)))
}

async fn insert<T: SingletonRecord>(
    conn: &mut SqliteConnection,
    record: &T,
) -> Result<(), sqlx::Error> {
    let placeholders = vec!["?"; T::COLUMNS.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        T::KIND.table(),
        column_list::<T>(),
        placeholders
    );
    record
        .bind_columns(sqlx::query(&sql))
        .execute(&mut *conn)
        .await?;
    Ok(())
}

async fn update_by_id<T: SingletonRecord>(
    conn: &mut SqliteConnection,
    id: i64,
    record: &T,
) -> Result<(), sqlx::Error> {
    let assignments = T::COLUMNS
        .iter()
        .map(|c| format!("{c} = ?"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!("UPDATE {} SET {} WHERE id = ?", T::KIND.table(), assignments);
    record
        .bind_columns(sqlx::query(&sql))
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

async fn delete_rows<T: SingletonRecord>(conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
    let sql = format!("DELETE FROM {}", T::KIND.table());
    let res = sqlx::query(&sql).execute(&mut *conn).await?;
    Ok(res.rows_affected())
}

async fn insert_default_if_absent<T: SingletonRecord + Default>(
    conn: &mut SqliteConnection,
) -> Result<bool, sqlx::Error> {
    if fetch_first::<T>(conn).await?.is_some() {
        return Ok(false);
    }
    insert(conn, &T::default()).await?;
    Ok(true)
}
