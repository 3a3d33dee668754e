//! String key-value persistence behind which the transaction list and the
//! theme preference are stored.

use rusqlite::{Connection, OptionalExtension};

use crate::error::Result;

pub trait KeyValueStore {
    /// Fetch the value for `key`, or `None` if it was never set.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite the value for `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Key-value pairs kept in the `kv` table of a SQLite database.
pub struct SqliteKv {
    conn: Connection,
}

impl SqliteKv {
    /// Wrap a connection whose schema has already been initialized.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, datetime('now')) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            rusqlite::params![key, value],
        )?;
        tracing::debug!(key, bytes = value.len(), "wrote key");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        tracing::debug!(key, "removed key");
        Ok(())
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
