//! Checkpoint and resume for sessions.
//!
//! A checkpoint captures a session mid-flight (alive flag, current step,
//! the program's staging buffer and collection, history) so a half-entered
//! record survives a process restart. Checkpoints are written as JSON for
//! files and as compact binary for embedding.

use crate::core::{State, StateHistory};
use crate::session::SessionMetadata;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serialized snapshot of a session.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(serialize = "P: Serialize", deserialize = "P: Deserialize<'de>"))]
pub struct Checkpoint<S: State, P> {
    /// Format version, checked on restore
    pub version: u32,

    /// Session identifier
    pub id: uuid::Uuid,

    /// When the checkpoint was taken
    pub timestamp: DateTime<Utc>,

    /// Whether the session was still accepting input
    pub alive: bool,

    /// Step the session was in
    pub current_step: S,

    /// Program data, including any partially filled record
    pub program: P,

    /// Transitions since the session last started
    pub history: StateHistory<S>,

    pub metadata: SessionMetadata,
}

impl<S: State, P> Checkpoint<S, P> {
    /// Check version support and that the alive flag agrees with the step.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        if self.alive == self.current_step.is_final() {
            return Err(CheckpointError::ValidationFailed(format!(
                "alive flag {} contradicts step '{}'",
                self.alive,
                self.current_step.name()
            )));
        }

        if self.history.len() != self.metadata.lines_processed {
            return Err(CheckpointError::ValidationFailed(format!(
                "history holds {} transitions but {} lines were processed",
                self.history.len(),
                self.metadata.lines_processed
            )));
        }

        Ok(())
    }
}

impl<S: State, P: Serialize + DeserializeOwned> Checkpoint<S, P> {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// Write the checkpoint as JSON, replacing `path` atomically.
    pub fn save(&self, path: &Path) -> Result<(), CheckpointError> {
        let json = self.to_json()?;
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, path)?;
        tracing::info!(path = %path.display(), "checkpoint saved");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, CheckpointError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StateTransition;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestStep {
        AtMenu,
        Field(usize),
        Closed,
    }

    impl State for TestStep {
        fn name(&self) -> &str {
            match self {
                Self::AtMenu => "AtMenu",
                Self::Field(_) => "Field",
                Self::Closed => "Closed",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Closed)
        }
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Draft {
        name: String,
        grades: Vec<f32>,
    }

    fn checkpoint() -> Checkpoint<TestStep, Draft> {
        let history = StateHistory::new().record(StateTransition {
            from: TestStep::AtMenu,
            to: TestStep::Field(1),
            timestamp: Utc::now(),
            line: 1,
        });
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: uuid::Uuid::new_v4(),
            timestamp: Utc::now(),
            alive: true,
            current_step: TestStep::Field(1),
            program: Draft {
                name: "Ada".to_string(),
                grades: vec![90.0, 85.5],
            },
            history,
            metadata: SessionMetadata {
                lines_processed: 1,
                ..SessionMetadata::default()
            },
        }
    }

    #[test]
    fn json_round_trip_keeps_step_and_program() {
        let original = checkpoint();
        let restored = Checkpoint::<TestStep, Draft>::from_json(&original.to_json().unwrap()).unwrap();

        assert_eq!(restored.current_step, TestStep::Field(1));
        assert_eq!(restored.program, original.program);
        assert_eq!(restored.id, original.id);
    }

    #[test]
    fn binary_round_trip_keeps_history() {
        let original = checkpoint();
        let bytes = original.to_bytes().unwrap();
        let restored = Checkpoint::<TestStep, Draft>::from_bytes(&bytes).unwrap();

        assert_eq!(restored.history.len(), 1);
        assert_eq!(restored.metadata, original.metadata);
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut cp = checkpoint();
        cp.version = 99;

        assert!(matches!(
            cp.validate(),
            Err(CheckpointError::UnsupportedVersion {
                found: 99,
                supported: CHECKPOINT_VERSION
            })
        ));
    }

    #[test]
    fn alive_flag_must_agree_with_step() {
        let mut cp = checkpoint();
        cp.current_step = TestStep::Closed;
        assert!(matches!(
            cp.validate(),
            Err(CheckpointError::ValidationFailed(_))
        ));
    }

    #[test]
    fn history_length_must_match_line_count() {
        let mut cp = checkpoint();
        cp.metadata.lines_processed = 4;
        assert!(matches!(
            cp.validate(),
            Err(CheckpointError::ValidationFailed(_))
        ));
    }

    #[test]
    fn garbage_fails_to_deserialize() {
        let result = Checkpoint::<TestStep, Draft>::from_json("{not json");
        assert!(matches!(
            result,
            Err(CheckpointError::DeserializationFailed(_))
        ));
    }

    #[test]
    fn save_and_load_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let original = checkpoint();
        original.save(&path).unwrap();
        let loaded = Checkpoint::<TestStep, Draft>::load(&path).unwrap();

        assert_eq!(loaded.program, original.program);
        assert!(!dir.path().join("session.tmp").exists());
    }
}
