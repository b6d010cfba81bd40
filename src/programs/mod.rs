//! The console programs a session can drive.

pub mod gradebook;
pub mod inventory;
pub mod minigame;

pub use gradebook::{Gradebook, GradebookOp, GradebookStep};
pub use inventory::{Details, Inventory, InventoryStep};
pub use minigame::{GamePhase, Minigame};
