use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Result as SqliteResult};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Failed to create storage directory: {0}")]
    IoError(#[from] std::io::Error),
}

/// String key/value storage backed by a single SQLite table.
///
/// Values are opaque text; the typed helpers store JSON.
pub struct LocalStorage {
    conn: Connection,
}

impl LocalStorage {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let storage = Self::new(Connection::open(path)?);
        storage.initialize()?;
        Ok(storage)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let storage = Self::new(Connection::open_in_memory()?);
        storage.initialize()?;
        Ok(storage)
    }

    pub fn initialize(&self) -> Result<(), StorageError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS local_storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO local_storage (key, value) VALUES (?1, ?2)",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.conn.execute("DELETE FROM local_storage WHERE key = ?1", [key])?;
        Ok(())
    }

    pub fn save_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let data = serde_json::to_string(value)?;
        self.set_item(key, &data)
    }

    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.get_item(key)? {
            Some(data) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    pub fn table_exists(&self, table_name: &str) -> bool {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            [table_name],
            |row| row.get(0),
        );
        result.unwrap_or(0) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        id: String,
        count: u32,
    }

    fn create_test_storage() -> LocalStorage {
        LocalStorage::open_in_memory().unwrap()
    }

    #[test]
    fn creates_database_schema() {
        let storage = LocalStorage::new(Connection::open_in_memory().unwrap());
        assert!(!storage.table_exists("local_storage"));

        storage.initialize().unwrap();

        assert!(storage.table_exists("local_storage"));
    }

    #[test]
    fn stores_and_reads_item() {
        let storage = create_test_storage();

        storage.set_item("theme", "dark").unwrap();

        assert_eq!(storage.get_item("theme").unwrap(), Some("dark".to_string()));
    }

    #[test]
    fn missing_item_returns_none() {
        let storage = create_test_storage();
        assert_eq!(storage.get_item("nonexistent").unwrap(), None);
    }

    #[test]
    fn set_item_overwrites_existing_value() {
        let storage = create_test_storage();
        storage.set_item("key", "first").unwrap();

        storage.set_item("key", "second").unwrap();

        assert_eq!(storage.get_item("key").unwrap(), Some("second".to_string()));
    }

    #[test]
    fn removes_item() {
        let storage = create_test_storage();
        storage.set_item("key", "value").unwrap();

        storage.remove_item("key").unwrap();

        assert_eq!(storage.get_item("key").unwrap(), None);
    }

    #[test]
    fn typed_json_round_trip() {
        let storage = create_test_storage();
        let record = Record { id: "r1".to_string(), count: 3 };

        storage.save_json("record", &record).unwrap();

        assert_eq!(storage.load_json::<Record>("record").unwrap(), Some(record));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let storage = create_test_storage();
        storage.set_item("record", "{not json").unwrap();

        let result = storage.load_json::<Record>("record");

        assert!(matches!(result, Err(StorageError::SerializationError(_))));
    }

    #[test]
    fn file_backed_storage_persists_across_connections() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("local.db");

        LocalStorage::open(&path).unwrap().set_item("key", "kept").unwrap();
        let reopened = LocalStorage::open(&path).unwrap();

        assert_eq!(reopened.get_item("key").unwrap(), Some("kept".to_string()));
    }
}
