use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};

use super::{Operation, RemoteError, TaskStore};
use crate::model::{Record, RecordId};

#[derive(Debug)]
struct Table {
    rows: Vec<Record>,
    next_id: RecordId,
    /// Server clock; advances one second per insert so ordering is stable
    clock: DateTime<Utc>,
    /// Errors returned by the next call of each operation
    failures: HashMap<Operation, RemoteError>,
    calls: HashMap<Operation, usize>,
}

/// An in-process [`TaskStore`].
///
/// Behaves like the hosted table: ids and timestamps are assigned on insert,
/// reads come back newest first, and updating or deleting a missing id
/// succeeds without touching anything. Failures can be queued per operation.
#[derive(Debug)]
pub struct MemoryStore {
    table: Mutex<Table>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            table: Mutex::new(Table {
                rows: Vec::new(),
                next_id: 1,
                clock: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().unwrap_or_default(),
                failures: HashMap::new(),
                calls: HashMap::new(),
            }),
        }
    }

    /// A store pre-seeded with rows; new ids continue after the largest one
    pub fn with_rows(rows: Vec<Record>) -> Self {
        let store = Self::new();
        {
            let mut table = store.lock();
            table.next_id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
            if let Some(latest) = rows.iter().map(|r| r.created_at).max() {
                table.clock = table.clock.max(latest);
            }
            table.rows = rows;
        }
        store
    }

    /// Make the next call of `op` fail with `error`
    pub fn fail_next(&self, op: Operation, error: RemoteError) {
        self.lock().failures.insert(op, error);
    }

    /// How many times `op` has been called, failed calls included
    pub fn calls(&self, op: Operation) -> usize {
        self.lock().calls.get(&op).copied().unwrap_or(0)
    }

    /// Current table contents, newest first
    pub fn rows(&self) -> Vec<Record> {
        sorted(&self.lock().rows)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Table> {
        // A poisoned lock only means a test thread panicked mid-call; the
        // table itself is still consistent.
        self.table.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn begin(&self, op: Operation) -> Result<std::sync::MutexGuard<'_, Table>, RemoteError> {
        let mut table = self.lock();
        *table.calls.entry(op).or_insert(0) += 1;
        match table.failures.remove(&op) {
            Some(err) => Err(err),
            None => Ok(table),
        }
    }
}

fn sorted(rows: &[Record]) -> Vec<Record> {
    let mut rows = rows.to_vec();
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    rows
}

impl TaskStore for MemoryStore {
    fn fetch_all(&self) -> Result<Vec<Record>, RemoteError> {
        let table = self.begin(Operation::Fetch)?;
        Ok(sorted(&table.rows))
    }

    fn insert(&self, task: &str) -> Result<Record, RemoteError> {
        let mut table = self.begin(Operation::Insert)?;
        table.clock += Duration::seconds(1);
        let record = Record::new(table.next_id, task, table.clock);
        table.next_id += 1;
        table.rows.push(record.clone());
        Ok(record)
    }

    fn update(&self, id: RecordId, task: &str) -> Result<(), RemoteError> {
        let mut table = self.begin(Operation::Update)?;
        if let Some(row) = table.rows.iter_mut().find(|r| r.id == id) {
            row.task = task.to_string();
        }
        Ok(())
    }

    fn delete(&self, id: RecordId) -> Result<(), RemoteError> {
        let mut table = self.begin(Operation::Delete)?;
        table.rows.retain(|r| r.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_assigns_increasing_ids_and_times() {
        let store = MemoryStore::new();
        let a = store.insert("A").unwrap();
        let b = store.insert("B").unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert!(b.created_at > a.created_at);
    }

    #[test]
    fn fetch_is_newest_first() {
        let store = MemoryStore::new();
        store.insert("A").unwrap();
        store.insert("B").unwrap();
        let tasks: Vec<String> = store.fetch_all().unwrap().into_iter().map(|r| r.task).collect();
        assert_eq!(tasks, vec!["B", "A"]);
    }

    #[test]
    fn queued_failure_fires_once() {
        let store = MemoryStore::new();
        store.fail_next(Operation::Insert, RemoteError::http(500, None));
        assert!(store.insert("A").is_err());
        assert!(store.insert("A").is_ok());
        assert_eq!(store.calls(Operation::Insert), 2);
        assert_eq!(store.rows().len(), 1);
    }

    #[test]
    fn with_rows_continues_ids() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let store = MemoryStore::with_rows(vec![Record::new(5, "old", at)]);
        let record = store.insert("new").unwrap();
        assert_eq!(record.id, 6);
        assert!(record.created_at > at);
    }

    #[test]
    fn update_and_delete_missing_id_succeed() {
        let store = MemoryStore::new();
        assert!(store.update(42, "x").is_ok());
        assert!(store.delete(42).is_ok());
    }
}
