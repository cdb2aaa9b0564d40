use rusqlite::{params, Connection, OptionalExtension};

/// Errors raised by a storage backend. The record store never lets these escape.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Quota exceeded: {size} bytes written, {quota} allowed")]
    QuotaExceeded { size: usize, quota: usize },
}

/// String key-value storage with the shape of browser local storage.
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

fn check_quota(value: &str, quota: Option<usize>) -> Result<(), StorageError> {
    match quota {
        Some(quota) if value.len() > quota => Err(StorageError::QuotaExceeded {
            size: value.len(),
            quota,
        }),
        _ => Ok(()),
    }
}

// ─── SQLite ──────────────────────────────────────────────────────────────────

pub struct SqliteBackend {
    conn: Connection,
    quota: Option<usize>,
}

impl SqliteBackend {
    pub fn new(conn: Connection) -> Self {
        Self { conn, quota: None }
    }

    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }
}

impl StorageBackend for SqliteBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        check_quota(value, self.quota)?;
        self.conn.execute(
            "INSERT INTO local_storage (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }
}

// ─── In memory ───────────────────────────────────────────────────────────────

/// Backend for tests. Holds items in a map and honours the same quota rule.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryBackend {
    items: std::collections::HashMap<String, String>,
    quota: Option<usize>,
}

#[cfg(test)]
impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// Seed a raw value, bypassing the quota.
    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }
}

#[cfg(test)]
impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        check_quota(value, self.quota)?;
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn sqlite() -> SqliteBackend {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        SqliteBackend::new(conn)
    }

    #[test]
    fn test_sqlite_set_then_get() {
        let mut backend = sqlite();
        assert_eq!(backend.get_item("k").unwrap(), None);
        backend.set_item("k", "one").unwrap();
        backend.set_item("k", "two").unwrap();
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_sqlite_quota() {
        let mut backend = sqlite().with_quota(4);
        backend.set_item("k", "1234").unwrap();
        let err = backend.set_item("k", "12345").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { size: 5, quota: 4 }));
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("1234"));
    }

    #[test]
    fn test_memory_quota_keeps_previous_value() {
        let mut backend = MemoryBackend::new().with_item("k", "old").with_quota(3);
        assert!(backend.set_item("k", "newer").is_err());
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("old"));
    }
}
