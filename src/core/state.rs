//! Core State trait for console program steps.
//!
//! Every step enum a [`Program`](crate::session::Program) drives implements
//! this trait, which provides pure methods for inspecting where the session
//! currently is without touching the staging buffer or the collection.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for the steps of a line-driven program.
///
/// All methods are pure. A step describes which kind of line the program
/// expects next: a menu choice, a particular field of a record under
/// construction, or nothing at all once the session has ended.
///
/// # Required Traits
///
/// - `Clone`: steps are copied into the transition history
/// - `PartialEq`: tests and checkpoints compare steps
/// - `Debug`: steps show up in `tracing` output
/// - `Serialize` + `Deserialize`: steps are written into checkpoints
///
/// # Example
///
/// ```rust
/// use stepform::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum SignupStep {
///     AtMenu,
///     Email,
///     Password,
///     Closed,
/// }
///
/// impl State for SignupStep {
///     fn name(&self) -> &str {
///         match self {
///             Self::AtMenu => "AtMenu",
///             Self::Email => "Email",
///             Self::Password => "Password",
///             Self::Closed => "Closed",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Closed)
///     }
/// }
///
/// assert!(SignupStep::Closed.is_final());
/// assert_eq!(SignupStep::Email.name(), "Email");
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the step's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this step ends the session.
    ///
    /// Once a session enters a final step it stops interpreting input until
    /// it is started again.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this step represents a failure outcome.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}
