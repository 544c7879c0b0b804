use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{BookingStore, ValueInputMode};
use crate::errors::StoreError;

/// In-process tables, lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<Vec<String>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a table with raw rows, header included. Useful for replaying
    /// hand-edited sheets.
    pub fn with_rows(table: &str, rows: Vec<Vec<String>>) -> Self {
        let store = Self::new();
        if let Ok(mut tables) = store.tables.lock() {
            tables.insert(table.to_string(), rows);
        }
        store
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<Vec<String>>>>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Lock("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn ensure_table(&self, table: &str, header: &[&str]) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        tables
            .entry(table.to_string())
            .or_insert_with(|| vec![header.iter().map(|h| h.to_string()).collect()]);
        Ok(())
    }

    async fn read_all_rows(&self, table: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.get(table).cloned().unwrap_or_default())
    }

    async fn append_row(
        &self,
        table: &str,
        values: &[String],
        _mode: ValueInputMode,
    ) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        tables
            .entry(table.to_string())
            .or_default()
            .push(values.to_vec());
        Ok(())
    }
}
