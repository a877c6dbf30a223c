//! State management errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position};

/// Errors raised while populating or querying [`GameState`](super::GameState).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// Entity ID allocation overflow (all IDs exhausted).
    #[error("entity id overflow (current: {current})")]
    EntityIdOverflow { current: u32 },

    /// A blocking actor already stands on the tile.
    #[error("position {position} is already occupied by {occupant}")]
    PositionOccupied {
        position: Position,
        occupant: EntityId,
    },

    #[error("a player is already present")]
    DuplicatePlayer,

    #[error("unknown actor {0}")]
    UnknownActor(EntityId),
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            EntityIdOverflow { .. } => ErrorSeverity::Fatal,
            PositionOccupied { .. } | DuplicatePlayer => ErrorSeverity::Validation,
            UnknownActor(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            EntityIdOverflow { .. } => "STATE_ENTITY_ID_OVERFLOW",
            PositionOccupied { .. } => "STATE_POSITION_OCCUPIED",
            DuplicatePlayer => "STATE_DUPLICATE_PLAYER",
            UnknownActor(_) => "STATE_UNKNOWN_ACTOR",
        }
    }
}
