// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Activity log — newest-first, capped list of produced artifacts.
//
// The whole list is stored as one JSON array under a fixed key. Reading a
// missing or unreadable value yields an empty history; a failed write is
// logged and dropped so that saving an artifact is never blocked by the log.

use fileforge_core::ActivityRecord;
use fileforge_core::error::FileforgeError;
use tracing::{debug, instrument, warn};

use crate::store::StoragePort;

/// Storage key of the serialised history.
pub const HISTORY_KEY: &str = "fileforge-download-history";

/// Maximum number of records kept; older ones are discarded on append.
pub const HISTORY_CAPACITY: usize = 50;

/// The activity history.
pub struct ActivityLog {
    /// `None` when the environment offers no persistence at all.
    store: Option<Box<dyn StoragePort>>,
}

impl ActivityLog {
    /// History persisted through `store`.
    pub fn new(store: impl StoragePort + 'static) -> Self {
        Self {
            store: Some(Box::new(store)),
        }
    }

    /// History without any persistence: `list` is always empty and `append`
    /// only returns the record it built.
    pub fn detached() -> Self {
        Self { store: None }
    }

    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    /// Current records, most recent first.
    pub fn list(&self) -> Vec<ActivityRecord> {
        let Some(store) = self.store.as_deref() else {
            return Vec::new();
        };

        let raw = match store.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(error = %err, "could not read activity history");
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<ActivityRecord>>(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "activity history is unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    /// Record that `file_name` (of `size_bytes`) was produced by `tool_name`.
    ///
    /// The new record goes to the front; the list is cut to
    /// [`HISTORY_CAPACITY`]. The record is returned even if it could not be
    /// persisted.
    #[instrument(skip(self, file_name, tool_name), fields(file = %file_name.as_ref(), tool = %tool_name.as_ref()))]
    pub fn append(
        &self,
        file_name: impl AsRef<str>,
        tool_name: impl AsRef<str>,
        size_bytes: u64,
    ) -> ActivityRecord {
        let record = ActivityRecord::new(file_name.as_ref(), tool_name.as_ref(), size_bytes);

        let Some(store) = self.store.as_deref() else {
            return record;
        };

        let mut records = self.list();
        records.insert(0, record.clone());
        records.truncate(HISTORY_CAPACITY);

        let persisted = serde_json::to_vec(&records)
            .map_err(FileforgeError::from)
            .and_then(|bytes| store.set(HISTORY_KEY, &bytes));
        match persisted {
            Ok(()) => debug!(id = %record.id, total = records.len(), "activity recorded"),
            Err(err) => warn!(error = %err, "could not persist activity history"),
        }

        record
    }

    /// Remove every record.
    pub fn clear(&self) {
        if let Some(store) = self.store.as_deref()
            && let Err(err) = store.remove(HISTORY_KEY)
        {
            warn!(error = %err, "could not clear activity history");
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::{FileStore, SqliteStore};
    use fileforge_core::error::Result;

    /// A store whose writes always fail, like a full or disabled disk.
    struct FailingStore;

    impl StoragePort for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &[u8]) -> Result<()> {
            Err(FileforgeError::Storage("quota exceeded".into()))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(FileforgeError::Storage("storage disabled".into()))
        }
    }

    #[test]
    fn starts_empty() {
        let log = ActivityLog::new(MemoryStore::new());
        assert!(log.list().is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn newest_first() {
        let log = ActivityLog::new(MemoryStore::new());
        log.append("a.pdf", "Merge PDFs", 10);
        log.append("b.pdf", "Split PDF", 20);
        log.append("c.pdf", "Rotate PDF", 30);

        let names: Vec<_> = log.list().into_iter().map(|r| r.file_name).collect();
        assert_eq!(names, ["c.pdf", "b.pdf", "a.pdf"]);
    }

    #[test]
    fn capped_at_fifty_most_recent() {
        let log = ActivityLog::new(MemoryStore::new());
        for i in 0..51 {
            log.append(format!("file_{i}.pdf"), "Split PDF", i);
        }

        let records = log.list();
        assert_eq!(records.len(), HISTORY_CAPACITY);
        assert_eq!(records[0].file_name, "file_50.pdf");
        assert_eq!(records[49].file_name, "file_1.pdf");
        assert!(records.iter().all(|r| r.file_name != "file_0.pdf"));
    }

    #[test]
    fn clear_empties_until_next_append() {
        let log = ActivityLog::new(MemoryStore::new());
        log.append("a.pdf", "Compress PDF", 1);
        log.clear();
        assert!(log.list().is_empty());

        log.append("b.pdf", "Compress PDF", 2);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn append_returns_the_stored_record() {
        let log = ActivityLog::new(MemoryStore::new());
        let record = log.append("out.txt", "PDF to Text", 512);
        assert_eq!(record.tool_name, "PDF to Text");
        assert_eq!(record.size_bytes, 512);
        assert_eq!(log.list()[0], record);
    }

    #[test]
    fn corrupted_data_reads_as_empty() {
        let store = MemoryStore::new();
        store.set(HISTORY_KEY, b"{not json").unwrap();
        let log = ActivityLog::new(store);
        assert!(log.list().is_empty());

        // The next append replaces the corrupted value.
        log.append("a.pdf", "Merge PDFs", 1);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn wrong_shape_reads_as_empty() {
        let store = MemoryStore::new();
        store.set(HISTORY_KEY, br#"[{"id": 7}]"#).unwrap();
        assert!(ActivityLog::new(store).list().is_empty());
    }

    #[test]
    fn reads_records_written_by_older_builds() {
        let store = MemoryStore::new();
        store
            .set(
                HISTORY_KEY,
                br#"[{"id":"x","fileName":"merged.pdf","tool":"Merge PDFs","timestamp":1700000000000,"size":4096}]"#,
            )
            .unwrap();
        let records = ActivityLog::new(store).list();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file_name, "merged.pdf");
        assert_eq!(records[0].size_bytes, 4096);
    }

    #[test]
    fn persistence_failure_is_swallowed() {
        let log = ActivityLog::new(FailingStore);
        let record = log.append("a.pdf", "Watermark PDF", 99);
        assert_eq!(record.file_name, "a.pdf");
        log.clear();
        assert!(log.list().is_empty());
    }

    #[test]
    fn detached_log_never_stores() {
        let log = ActivityLog::detached();
        assert!(!log.is_persistent());
        let record = log.append("a.pdf", "Merge PDFs", 1);
        assert_eq!(record.size_bytes, 1);
        assert!(log.list().is_empty());
        log.clear();
    }

    #[test]
    fn file_backed_history_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        ActivityLog::new(FileStore::new(dir.path())).append("a.pdf", "Merge PDFs", 1);

        let reopened = ActivityLog::new(FileStore::new(dir.path()));
        assert_eq!(reopened.list()[0].file_name, "a.pdf");
    }

    #[test]
    fn sqlite_backed_history() {
        let log = ActivityLog::new(SqliteStore::open_in_memory().unwrap());
        log.append("a.pdf", "Merge PDFs", 1);
        log.append("b.pdf", "Merge PDFs", 2);
        assert_eq!(log.list()[0].file_name, "b.pdf");
        log.clear();
        assert!(log.is_empty());
    }
}
