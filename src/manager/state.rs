use crate::model::{Record, RecordId};
use crate::remote::{Operation, RemoteError};

/// The record currently open for in-place editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub id: RecordId,
    pub buffer: String,
}

/// Everything the front-end shows, owned by a single controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    /// Last snapshot of the remote table, newest first
    pub records: Vec<Record>,
    /// A fetch has been issued and has not completed yet
    pub loading: bool,
    /// User-visible message from the most recent failure
    pub error: Option<String>,
    /// New-task input field
    pub input: String,
    /// Edit-target and its buffer; at most one at a time
    pub editing: Option<EditState>,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ListState {
    /// Initial state: nothing fetched yet, first fetch pending
    pub fn new() -> Self {
        ListState {
            records: Vec::new(),
            loading: true,
            error: None,
            input: String::new(),
            editing: None,
        }
    }

    pub fn editing_id(&self) -> Option<RecordId> {
        self.editing.as_ref().map(|e| e.id)
    }

    pub fn is_editing(&self, id: RecordId) -> bool {
        self.editing_id() == Some(id)
    }
}

/// A call to the remote table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    FetchAll,
    Insert { task: String },
    Update { id: RecordId, task: String },
    Delete { id: RecordId },
}

impl Request {
    pub fn operation(&self) -> Operation {
        match self {
            Request::FetchAll => Operation::Fetch,
            Request::Insert { .. } => Operation::Insert,
            Request::Update { .. } => Operation::Update,
            Request::Delete { .. } => Operation::Delete,
        }
    }
}

/// Completion of a [`Request`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Fetched(Result<Vec<Record>, RemoteError>),
    Inserted(Result<Record, RemoteError>),
    Updated {
        id: RecordId,
        result: Result<(), RemoteError>,
    },
    Deleted {
        id: RecordId,
        result: Result<(), RemoteError>,
    },
}

impl Outcome {
    /// The completion of `request` when it could not be sent at all
    pub fn failure(request: &Request, error: RemoteError) -> Self {
        match request {
            Request::FetchAll => Outcome::Fetched(Err(error)),
            Request::Insert { .. } => Outcome::Inserted(Err(error)),
            Request::Update { id, .. } => Outcome::Updated {
                id: *id,
                result: Err(error),
            },
            Request::Delete { id } => Outcome::Deleted {
                id: *id,
                result: Err(error),
            },
        }
    }
}

/// Inputs to [`transition`](super::transition): user intents and remote completions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// fetchAll()
    Refresh,
    /// create(text)
    Create(String),
    /// beginEdit(id)
    BeginEdit(RecordId),
    /// saveEdit(id), sending the current edit buffer
    SaveEdit(RecordId),
    /// cancelEdit()
    CancelEdit,
    /// delete(id)
    Delete(RecordId),
    /// Replace the new-task input field
    SetInput(String),
    /// Replace the edit buffer (ignored when nothing is being edited)
    SetEditBuffer(String),
    /// Clear the visible error message
    DismissError,
    /// A remote request finished
    Completed(Outcome),
}

/// Error type for list operations; `Display` is the user-visible message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    #[error("task cannot be empty")]
    EmptyTask,
    #[error("no task with id {0}")]
    UnknownRecord(RecordId),
    #[error("task {0} is not being edited")]
    NotEditing(RecordId),
    #[error("{source}")]
    Remote {
        op: Operation,
        #[source]
        source: RemoteError,
    },
}

impl ListError {
    pub fn is_validation(&self) -> bool {
        !matches!(self, ListError::Remote { .. })
    }
}

/// Result of one state transition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    /// Remote call to issue next, if any
    pub request: Option<Request>,
    /// Failure surfaced by this transition (already written to `error`)
    pub error: Option<ListError>,
}

impl Transition {
    pub fn none() -> Self {
        Transition::default()
    }

    pub fn request(request: Request) -> Self {
        Transition {
            request: Some(request),
            error: None,
        }
    }

    pub fn failed(error: ListError) -> Self {
        Transition {
            request: None,
            error: Some(error),
        }
    }
}
