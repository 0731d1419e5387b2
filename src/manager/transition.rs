use tracing::{debug, error, warn};

use super::state::{Action, EditState, ListError, ListState, Outcome, Request, Transition};
use crate::model::find_record;
use crate::remote::{Operation, RemoteError};

/// Apply one action to the list state.
///
/// This is the only place `ListState` changes. Successful mutations never
/// patch `records`; they always answer with [`Request::FetchAll`] so the
/// list is rebuilt from the remote table.
pub fn transition(state: &mut ListState, action: Action) -> Transition {
    match action {
        Action::Refresh => {
            state.loading = true;
            Transition::request(Request::FetchAll)
        }

        Action::Create(text) => {
            if text.trim().is_empty() {
                return surface(state, ListError::EmptyTask);
            }
            Transition::request(Request::Insert { task: text })
        }

        Action::BeginEdit(id) => match find_record(&state.records, id) {
            Some(record) => {
                state.editing = Some(EditState {
                    id,
                    buffer: record.task.clone(),
                });
                Transition::none()
            }
            None => surface(state, ListError::UnknownRecord(id)),
        },

        Action::SaveEdit(id) => match &state.editing {
            Some(edit) if edit.id == id => Transition::request(Request::Update {
                id,
                task: edit.buffer.clone(),
            }),
            _ => surface(state, ListError::NotEditing(id)),
        },

        Action::CancelEdit => {
            state.editing = None;
            Transition::none()
        }

        Action::Delete(id) => Transition::request(Request::Delete { id }),

        Action::SetInput(text) => {
            state.input = text;
            Transition::none()
        }

        Action::SetEditBuffer(text) => {
            if let Some(edit) = &mut state.editing {
                edit.buffer = text;
            }
            Transition::none()
        }

        Action::DismissError => {
            state.error = None;
            Transition::none()
        }

        Action::Completed(outcome) => complete(state, outcome),
    }
}

fn complete(state: &mut ListState, outcome: Outcome) -> Transition {
    match outcome {
        Outcome::Fetched(Ok(records)) => {
            debug!(count = records.len(), "fetched tasks");
            state.records = records;
            state.loading = false;
            Transition::none()
        }
        Outcome::Fetched(Err(err)) => {
            state.loading = false;
            remote_failure(state, Operation::Fetch, err)
        }

        Outcome::Inserted(Ok(record)) => {
            debug!(id = record.id, "inserted task");
            state.input.clear();
            resync(state)
        }
        Outcome::Inserted(Err(err)) => remote_failure(state, Operation::Insert, err),

        Outcome::Updated { id, result: Ok(()) } => {
            debug!(id, "updated task");
            // A newer beginEdit on another record stays open.
            if state.is_editing(id) {
                state.editing = None;
            }
            resync(state)
        }
        Outcome::Updated { id, result: Err(err) } => {
            warn!(id, "update failed; edit stays open");
            remote_failure(state, Operation::Update, err)
        }

        Outcome::Deleted { id, result: Ok(()) } => {
            debug!(id, "deleted task");
            resync(state)
        }
        Outcome::Deleted { result: Err(err), .. } => {
            remote_failure(state, Operation::Delete, err)
        }
    }
}

fn resync(state: &mut ListState) -> Transition {
    state.loading = true;
    Transition::request(Request::FetchAll)
}

fn remote_failure(state: &mut ListState, op: Operation, source: RemoteError) -> Transition {
    error!(%op, error = %source, "remote call failed");
    surface(state, ListError::Remote { op, source })
}

fn surface(state: &mut ListState, err: ListError) -> Transition {
    if err.is_validation() {
        debug!(error = %err, "rejected before any remote call");
    }
    state.error = Some(err.to_string());
    Transition::failed(err)
}
