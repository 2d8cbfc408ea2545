// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// SQLite-backed storage port.
//
// Schema:
//   kv(
//     key        TEXT PRIMARY KEY,
//     value      BLOB NOT NULL,
//     updated_at TEXT NOT NULL   -- RFC 3339
//   )

use std::path::Path;

use chrono::Utc;
use fileforge_core::error::{FileforgeError, Result};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, instrument};

use crate::store::StoragePort;

/// Convert a `rusqlite::Error` into a `FileforgeError::Database`.
fn db_err(e: rusqlite::Error) -> FileforgeError {
    FileforgeError::Database(e.to_string())
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS kv (
    key        TEXT PRIMARY KEY,
    value      BLOB NOT NULL,
    updated_at TEXT NOT NULL
);";

/// Key/value table in a SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(db_err)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")
            .map_err(db_err)?;
        conn.execute_batch(SCHEMA).map_err(db_err)?;

        debug!("sqlite store opened");
        Ok(Self { conn })
    }

    /// Open an in-memory database (useful for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(db_err)?;
        conn.execute_batch(SCHEMA).map_err(db_err)?;
        Ok(Self { conn })
    }
}

impl StoragePort for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()
            .map_err(db_err)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                                updated_at = excluded.updated_at",
                params![key, value, updated_at],
            )
            .map_err(db_err)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(db_err)?;
        Ok(())
    }
}
