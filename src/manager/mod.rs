//! The list manager: an in-memory snapshot of the remote table and the
//! rules for keeping it in step.
//!
//! All state lives in [`ListState`] and changes only through [`transition`].
//! A transition may ask for one remote [`Request`]; the request's
//! [`Outcome`] comes back in as [`Action::Completed`]. Successful mutations
//! are always followed by a full fetch, never by a local patch.
//!
//! [`ListManager`] runs requests inline (CLI, tests). [`ListController`]
//! runs them on background threads for the TUI, where overlapping requests
//! may complete in any order.

pub mod driver;
pub mod pool;
pub mod state;
pub mod transition;

pub use driver::{ListManager, execute};
pub use pool::{ListController, RequestPool};
pub use state::*;
pub use transition::transition;
