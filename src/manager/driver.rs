use tracing::debug;

use super::state::{Action, ListError, ListState, Outcome, Request};
use super::transition::transition;
use crate::model::RecordId;
use crate::remote::TaskStore;

/// Run one request against the store and package the completion
pub fn execute<S: TaskStore + ?Sized>(store: &S, request: Request) -> Outcome {
    debug!(op = %request.operation(), "sending request");
    match request {
        Request::FetchAll => Outcome::Fetched(store.fetch_all()),
        Request::Insert { task } => Outcome::Inserted(store.insert(&task)),
        Request::Update { id, task } => Outcome::Updated {
            id,
            result: store.update(id, &task),
        },
        Request::Delete { id } => Outcome::Deleted {
            id,
            result: store.delete(id),
        },
    }
}

/// Drives the list state synchronously: every request runs to completion
/// before the operation returns, including the resync after a mutation.
pub struct ListManager<S: TaskStore> {
    store: S,
    state: ListState,
}

impl<S: TaskStore> ListManager<S> {
    pub fn new(store: S) -> Self {
        ListManager {
            store,
            state: ListState::new(),
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply an action and keep feeding completions back until no request
    /// is left. Returns the first failure, if any.
    pub fn dispatch(&mut self, action: Action) -> Result<(), ListError> {
        let mut step = transition(&mut self.state, action);
        let mut first_error = step.error.take();
        while let Some(request) = step.request.take() {
            let outcome = execute(&self.store, request);
            step = transition(&mut self.state, Action::Completed(outcome));
            if first_error.is_none() {
                first_error = step.error.take();
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn fetch_all(&mut self) -> Result<(), ListError> {
        self.dispatch(Action::Refresh)
    }

    pub fn create(&mut self, text: &str) -> Result<(), ListError> {
        self.dispatch(Action::Create(text.to_string()))
    }

    pub fn begin_edit(&mut self, id: RecordId) -> Result<(), ListError> {
        self.dispatch(Action::BeginEdit(id))
    }

    /// Local only: no request, no failure
    pub fn set_edit_buffer(&mut self, text: &str) {
        transition(&mut self.state, Action::SetEditBuffer(text.to_string()));
    }

    pub fn save_edit(&mut self, id: RecordId) -> Result<(), ListError> {
        self.dispatch(Action::SaveEdit(id))
    }

    pub fn cancel_edit(&mut self) {
        transition(&mut self.state, Action::CancelEdit);
    }

    pub fn delete(&mut self, id: RecordId) -> Result<(), ListError> {
        self.dispatch(Action::Delete(id))
    }
}
