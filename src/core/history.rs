//! Transition history for a session.
//!
//! Every line a session processes produces one [`StateTransition`], even when
//! the step does not change (a display at the menu, a rejected guess).

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single processed input line.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// Step the line was interpreted in.
    pub from: S,

    /// Step the session moved to.
    pub to: S,

    /// When the line was processed.
    pub timestamp: DateTime<Utc>,

    /// 1-based ordinal of the line within the session.
    pub line: usize,
}

impl<S: State> StateTransition<S> {
    /// Whether the line left the session on the same step.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Append-only log of transitions since the session was last started.
///
/// # Example
///
/// ```rust
/// use stepform::core::{State, StateHistory, StateTransition};
/// use serde::{Deserialize, Serialize};
/// use chrono::Utc;
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Step { Menu, Name, Done }
///
/// impl State for Step {
///     fn name(&self) -> &str {
///         match self {
///             Self::Menu => "Menu",
///             Self::Name => "Name",
///             Self::Done => "Done",
///         }
///     }
/// }
///
/// let history = StateHistory::new()
///     .record(StateTransition { from: Step::Menu, to: Step::Name, timestamp: Utc::now(), line: 1 })
///     .record(StateTransition { from: Step::Name, to: Step::Menu, timestamp: Utc::now(), line: 2 });
///
/// assert_eq!(history.get_path(), vec![&Step::Menu, &Step::Name, &Step::Menu]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append a transition, returning the extended history.
    pub fn record(mut self, transition: StateTransition<S>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Sequence of steps visited: the first `from`, then every `to`.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded line.
    ///
    /// Returns `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Number of transitions that entered a step satisfying `predicate`
    /// from a different step.
    pub fn entries_into<F>(&self, predicate: F) -> usize
    where
        F: Fn(&S) -> bool,
    {
        self.transitions
            .iter()
            .filter(|t| !t.is_self_loop() && predicate(&t.to))
            .count()
    }
}
