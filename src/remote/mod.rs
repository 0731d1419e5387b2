//! The remote tasks table and the ways of reaching it.
//!
//! [`TaskStore`] is the four-operation contract the list manager depends on.
//! [`RestStore`] speaks the PostgREST dialect served by Supabase;
//! [`MemoryStore`] keeps the table in process.

pub mod memory;
pub mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use crate::model::{Record, RecordId};

/// Error type for remote table operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// The server answered with a non-success status
    #[error("{message}")]
    Http { status: u16, message: String },
    /// The request never produced a response
    #[error("network error: {0}")]
    Transport(String),
    /// The response body was not what the table contract promises
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl RemoteError {
    /// An HTTP failure, with a generic message when the server sent none
    pub fn http(status: u16, message: Option<String>) -> Self {
        let message = match message {
            Some(m) if !m.trim().is_empty() => m,
            _ => format!("request failed with status {}", status),
        };
        RemoteError::Http { status, message }
    }
}

/// The four remote operations, for diagnostics and failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Fetch,
    Insert,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Fetch => "fetch",
            Operation::Insert => "insert",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The remote collaborator: one hosted table of [`Record`]s.
///
/// Implementations are shared with background request threads, hence the
/// `Send + Sync` bound.
pub trait TaskStore: Send + Sync {
    /// All rows, newest `created_at` first
    fn fetch_all(&self) -> Result<Vec<Record>, RemoteError>;
    /// Insert a row; the server assigns `id` and `created_at`
    fn insert(&self, task: &str) -> Result<Record, RemoteError>;
    /// Replace the `task` column of row `id`
    fn update(&self, id: RecordId, task: &str) -> Result<(), RemoteError>;
    /// Remove row `id`
    fn delete(&self, id: RecordId) -> Result<(), RemoteError>;
}
