use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned row id
pub type RecordId = i64;

/// One row of the remote tasks table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub task: String,
    pub created_at: DateTime<Utc>,
}

impl Record {
    pub fn new(id: RecordId, task: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Record {
            id,
            task: task.into(),
            created_at,
        }
    }

    /// Creation time in the local timezone, e.g. `2025-05-14 09:30:00`
    pub fn created_local(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}

/// Body of an insert: the client never sends `id` or `created_at`
#[derive(Debug, Clone, Serialize)]
pub struct NewRecord<'a> {
    pub task: &'a str,
}

/// Body of an update
#[derive(Debug, Clone, Serialize)]
pub struct RecordPatch<'a> {
    pub task: &'a str,
}

/// Find a record by id in a snapshot
pub fn find_record(records: &[Record], id: RecordId) -> Option<&Record> {
    records.iter().find(|r| r.id == id)
}
