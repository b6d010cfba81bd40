//! The seam between a session and the program it drives.

use crate::core::State;

/// Outcome of interpreting one line.
#[derive(Clone, Debug, PartialEq)]
pub struct Reply<S: State> {
    /// Step the session moves to.
    pub next: S,

    /// Result text for the line. The session appends the prompt for `next`.
    pub text: String,
}

impl<S: State> Reply<S> {
    pub fn new(next: S, text: impl Into<String>) -> Self {
        Self {
            next,
            text: text.into(),
        }
    }

    /// Move to `next` without any result text; only the prompt is shown.
    pub fn silent(next: S) -> Self {
        Self {
            next,
            text: String::new(),
        }
    }
}

/// A line-driven console program.
///
/// The program owns its staging buffer and collection. The session owns the
/// current step and the alive flag, and hands the step back on every call so
/// that programs stay free of session bookkeeping.
pub trait Program {
    type Step: State;

    /// Discard all program data and return the step a fresh session starts in.
    fn reset(&mut self) -> Self::Step;

    /// Text emitted once when a session starts, before the first prompt.
    fn greeting(&self) -> String {
        String::new()
    }

    /// Prompt for the line expected in `step`.
    fn prompt(&self, step: &Self::Step) -> String;

    /// Interpret one line received while in `step`.
    fn handle(&mut self, step: &Self::Step, line: &str) -> Reply<Self::Step>;

    /// Check restored program data against `step` before a session resumes.
    ///
    /// Programs whose data carries cross-field invariants override this; the
    /// message becomes a checkpoint validation failure.
    fn validate(&self, _step: &Self::Step) -> Result<(), String> {
        Ok(())
    }

    /// Response to input that arrives after the session has ended.
    fn ended(&self, _step: &Self::Step) -> String {
        "Session ended. Please re-initialize to start a new session.\n".to_string()
    }
}
