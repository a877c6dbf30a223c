//! Errors that escape a round.

use crate::action::ActionError;
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::EntityId;

/// Failure that aborts [`advance_round`](super::GameEngine::advance_round).
///
/// Recoverable action rejections never end up here; only logic errors and
/// missing actors do.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("the game state has no player")]
    NoPlayer,

    #[error("actor {0} not found")]
    UnknownActor(EntityId),

    #[error("action failed in round {}: {source}", .context.round)]
    Action {
        source: ActionError,
        context: ErrorContext,
    },
}

impl TurnError {
    pub fn action(source: ActionError, context: ErrorContext) -> Self {
        Self::Action {
            context: context.with_message(source.error_code()),
            source,
        }
    }
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoPlayer => ErrorSeverity::Fatal,
            Self::UnknownActor(_) => ErrorSeverity::Internal,
            Self::Action { source, .. } => source.severity(),
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Action { context, .. } => Some(context),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoPlayer => "TURN_NO_PLAYER",
            Self::UnknownActor(_) => "TURN_UNKNOWN_ACTOR",
            Self::Action { .. } => "TURN_ACTION_FAILED",
        }
    }
}
