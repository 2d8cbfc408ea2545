// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// fileforge-history — the activity history: a bounded, newest-first log of
// every artifact the tools produced, persisted through a swappable storage
// port (JSON file, SQLite, or memory).

pub mod log;
pub mod sqlite;
pub mod store;

pub use log::{ActivityLog, HISTORY_CAPACITY, HISTORY_KEY};
pub use sqlite::SqliteStore;
pub use store::{FileStore, MemoryStore, StoragePort};
