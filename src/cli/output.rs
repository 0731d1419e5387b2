use chrono::SecondsFormat;
use serde::Serialize;

use crate::model::Record;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct RecordJson {
    pub id: i64,
    pub task: String,
    /// RFC 3339, UTC
    pub created_at: String,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn record_to_json(record: &Record) -> RecordJson {
    RecordJson {
        id: record.id,
        task: record.task.clone(),
        created_at: record
            .created_at
            .to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}

pub fn records_to_json(records: &[Record]) -> Vec<RecordJson> {
    records.iter().map(record_to_json).collect()
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One listing line: right-aligned id, task, local creation time
pub fn format_record_line(record: &Record, id_width: usize) -> String {
    format!(
        "{:>width$}  {}  ({})",
        record.id,
        record.task,
        record.created_local(),
        width = id_width
    )
}

/// Format a full snapshot, newest first
pub fn format_listing(records: &[Record]) -> Vec<String> {
    if records.is_empty() {
        return vec!["No tasks found".to_string()];
    }
    let id_width = records
        .iter()
        .map(|r| r.id.to_string().len())
        .max()
        .unwrap_or(1);
    records
        .iter()
        .map(|r| format_record_line(r, id_width))
        .collect()
}
