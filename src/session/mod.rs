//! Line-at-a-time sessions over a console program.
//!
//! A [`Session`] owns the program (staging buffer and collection), the
//! current step, the alive flag and the transition history.
//!
//! The caller contract has two entry points:
//! - [`Session::start_session`] reinitializes everything and returns the
//!   first prompt.
//! - [`Session::submit_line`] feeds one line and returns the response.
//!
//! Every call is fully processed before it returns; there is no deferred
//! output and no error crosses the call boundary.

mod program;

pub use program::{Program, Reply};

use crate::checkpoint::{Checkpoint, CheckpointError, CHECKPOINT_VERSION};
use crate::core::{State, StateHistory, StateTransition};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

/// Bookkeeping carried alongside a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// When the session object was created.
    pub created_at: DateTime<Utc>,

    /// Last time a line was processed or the session was restarted.
    pub updated_at: DateTime<Utc>,

    /// Lines interpreted since the last start.
    pub lines_processed: usize,

    /// How many times `start_session` has been called.
    pub starts: usize,
}

impl Default for SessionMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            lines_processed: 0,
            starts: 0,
        }
    }
}

/// Interactive session driving one [`Program`].
pub struct Session<P: Program> {
    id: Uuid,
    program: P,
    current: P::Step,
    alive: bool,
    history: StateHistory<P::Step>,
    metadata: SessionMetadata,
}

impl<P: Program> Session<P> {
    /// Wrap `program` in a live session sitting at its initial step.
    ///
    /// Call [`start_session`](Self::start_session) to obtain the first prompt.
    pub fn new(mut program: P) -> Self {
        let current = program.reset();
        Self {
            id: Uuid::new_v4(),
            alive: !current.is_final(),
            program,
            current,
            history: StateHistory::new(),
            metadata: SessionMetadata::default(),
        }
    }

    /// Reinitialize the session, discarding any prior collection, and return
    /// the initial prompt.
    pub fn start_session(&mut self) -> String {
        self.current = self.program.reset();
        self.alive = !self.current.is_final();
        self.history = StateHistory::new();
        self.metadata.lines_processed = 0;
        self.metadata.starts += 1;
        self.metadata.updated_at = Utc::now();

        info!(session = %self.id, step = self.current.name(), "session started");

        let mut out = self.program.greeting();
        out.push_str(&self.program.prompt(&self.current));
        out
    }

    /// Feed one line of input and return the resulting text.
    ///
    /// A trailing line terminator is ignored. Once the session has ended,
    /// every line is answered with the program's ended message and nothing
    /// else changes.
    pub fn submit_line(&mut self, line: &str) -> String {
        let line = line.trim_end_matches(&['\r', '\n'][..]);

        if !self.alive {
            debug!(session = %self.id, "input after session end");
            return self.program.ended(&self.current);
        }

        let from = self.current.clone();
        let Reply { next, text } = self.program.handle(&from, line);

        self.metadata.lines_processed += 1;
        self.metadata.updated_at = Utc::now();

        debug!(
            session = %self.id,
            from = from.name(),
            to = next.name(),
            line = self.metadata.lines_processed,
            "transition"
        );

        let transition = StateTransition {
            from,
            to: next.clone(),
            timestamp: self.metadata.updated_at,
            line: self.metadata.lines_processed,
        };
        self.history = std::mem::take(&mut self.history).record(transition);
        self.current = next;

        if self.current.is_final() {
            self.alive = false;
            info!(session = %self.id, step = self.current.name(), "session ended");
        }

        let mut out = text;
        out.push_str(&self.program.prompt(&self.current));
        out
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn current_step(&self) -> &P::Step {
        &self.current
    }

    pub fn history(&self) -> &StateHistory<P::Step> {
        &self.history
    }

    pub fn metadata(&self) -> &SessionMetadata {
        &self.metadata
    }

    pub fn program(&self) -> &P {
        &self.program
    }

    /// Capture everything needed to resume this session later.
    pub fn checkpoint(&self) -> Checkpoint<P::Step, P>
    where
        P: Clone,
    {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: self.id,
            timestamp: Utc::now(),
            alive: self.alive,
            current_step: self.current.clone(),
            program: self.program.clone(),
            history: self.history.clone(),
            metadata: self.metadata.clone(),
        }
    }

    /// Rebuild a session from a checkpoint.
    ///
    /// The checkpoint and the program data it carries are validated first;
    /// the restored session continues from the captured step without
    /// emitting a prompt.
    pub fn restore(checkpoint: Checkpoint<P::Step, P>) -> Result<Self, CheckpointError> {
        checkpoint.validate()?;
        checkpoint
            .program
            .validate(&checkpoint.current_step)
            .map_err(CheckpointError::ValidationFailed)?;

        info!(
            session = %checkpoint.id,
            step = checkpoint.current_step.name(),
            "session restored"
        );

        Ok(Self {
            id: checkpoint.id,
            program: checkpoint.program,
            current: checkpoint.current_step,
            alive: checkpoint.alive,
            history: checkpoint.history,
            metadata: checkpoint.metadata,
        })
    }
}
