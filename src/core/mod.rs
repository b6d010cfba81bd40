//! Core step types and transition history.
//!
//! This module holds the pieces every line-driven program shares:
//! - Step definitions via the `State` trait
//! - The `state_enum!` shorthand for fieldless steps
//! - Append-only transition history
//!
//! Nothing here performs I/O; sessions and programs build on top of it.

mod macros;
mod history;
mod state;

pub use history::{StateHistory, StateTransition};
pub use state::State;
