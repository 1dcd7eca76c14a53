//! Session layer: page state, the event reducer, and the orchestrator that
//! performs the reducer's side effects against the backend and the UI.

pub mod events;
pub mod orchestrator;
pub mod state;

pub use events::{Event, RowRef};
pub use orchestrator::Orchestrator;
pub use state::Selection;
