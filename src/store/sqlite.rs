use std::sync::{Arc, Mutex};

use anyhow::Context;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use super::{migrations, BookingStore, ValueInputMode};
use crate::errors::StoreError;

/// Worksheets kept in a local SQLite file, one JSON-encoded row per record.
///
/// Queries run on the blocking pool so a slow disk cannot stall the runtime
/// and the engine's store timeout still fires.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn open(path: &str) -> anyhow::Result<Self> {
        let conn = Connection::open(path).context("failed to open database")?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("failed to set database pragmas")?;

        migrations::run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = conn
                .lock()
                .map_err(|_| StoreError::Lock("sqlite connection lock poisoned".to_string()))?;
            f(&mut conn)
        })
        .await?
    }
}

fn encode_cells(values: &[String]) -> Result<String, StoreError> {
    serde_json::to_string(values).map_err(|e| StoreError::Malformed(e.to_string()))
}

#[async_trait]
impl BookingStore for SqliteStore {
    async fn ensure_table(&self, table: &str, header: &[&str]) -> Result<(), StoreError> {
        let table = table.to_string();
        let header: Vec<String> = header.iter().map(|h| h.to_string()).collect();

        self.with_conn(move |conn| {
            let tx = conn.transaction()?;

            let exists = tx
                .query_row(
                    "SELECT name FROM worksheets WHERE name = ?1",
                    params![table],
                    |row| row.get::<_, String>(0),
                )
                .optional()?
                .is_some();

            if !exists {
                tx.execute("INSERT INTO worksheets (name) VALUES (?1)", params![table])?;
                tx.execute(
                    "INSERT INTO worksheet_rows (worksheet, cells) VALUES (?1, ?2)",
                    params![table, encode_cells(&header)?],
                )?;
                tracing::info!(table = %table, "created worksheet with header row");
            }

            tx.commit()?;
            Ok(())
        })
        .await
    }

    async fn read_all_rows(&self, table: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let table = table.to_string();

        self.with_conn(move |conn| {
            let mut stmt = conn
                .prepare("SELECT cells FROM worksheet_rows WHERE worksheet = ?1 ORDER BY id ASC")?;

            let rows = stmt.query_map(params![table], |row| row.get::<_, String>(0))?;

            let mut out = vec![];
            for row in rows {
                let cells: Vec<String> = serde_json::from_str(&row?)
                    .map_err(|e| StoreError::Malformed(format!("worksheet {table}: {e}")))?;
                out.push(cells);
            }
            Ok(out)
        })
        .await
    }

    /// Cells are stored verbatim in either mode; SQLite does no auto-typing.
    async fn append_row(
        &self,
        table: &str,
        values: &[String],
        _mode: ValueInputMode,
    ) -> Result<(), StoreError> {
        let table = table.to_string();
        let cells = encode_cells(values)?;

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO worksheet_rows (worksheet, cells) VALUES (?1, ?2)",
                params![table, cells],
            )?;
            Ok(())
        })
        .await
    }
}
