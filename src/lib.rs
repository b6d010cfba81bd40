//! Stepform: resumable step-wise input state machines.
//!
//! A console program that collects a multi-field record one line at a time
//! is a small state machine: the session knows whether it is alive, which
//! record is being built and which field comes next, and it keeps the
//! partially filled record in a staging buffer until the last field commits
//! it to a collection.
//!
//! # Core Concepts
//!
//! - **Step**: an exhaustively matchable enum implementing [`State`]
//! - **Program**: owns the staging buffer and collection, interprets lines
//! - **Session**: the context object tying a program to its current step,
//!   alive flag and transition history
//! - **Checkpoint**: a serializable snapshot a session can resume from
//!
//! # Example
//!
//! ```rust
//! use stepform::programs::Inventory;
//! use stepform::Session;
//!
//! let mut session = Session::new(Inventory::default());
//! session.start_session();
//!
//! for line in ["1", "Widget", "10", "2.50", "0", "A small widget"] {
//!     session.submit_line(line);
//! }
//!
//! let widget = session.program().products().front().unwrap();
//! assert_eq!(widget.name, "Widget");
//! assert_eq!(widget.quantity, 10);
//! ```

pub mod checkpoint;
pub mod coerce;
pub mod collection;
pub mod config;
pub mod core;
pub mod programs;
pub mod session;

// Re-export commonly used types
pub use checkpoint::{Checkpoint, CheckpointError};
pub use collection::{Collection, CollectionError, Keyed};
pub use config::{Config, ConfigError};
pub use crate::core::{State, StateHistory, StateTransition};
pub use session::{Program, Reply, Session};
