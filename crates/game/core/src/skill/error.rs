use crate::action::Impossible;
use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillError {
    /// Activated while on cooldown or unaffordable. Callers must check
    /// readiness first.
    #[error("skill '{skill}' is not ready")]
    NotReady { skill: String },

    #[error("skill '{skill}' cannot run: {reason}")]
    InvalidDirective { skill: String, reason: &'static str },

    #[error(transparent)]
    Impossible(#[from] Impossible),

    #[error("actor {0} not found")]
    UnknownActor(EntityId),
}

impl GameError for SkillError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotReady { .. } | Self::InvalidDirective { .. } | Self::UnknownActor(_) => {
                ErrorSeverity::Internal
            }
            Self::Impossible(reason) => reason.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotReady { .. } => "SKILL_NOT_READY",
            Self::InvalidDirective { .. } => "SKILL_INVALID_DIRECTIVE",
            Self::Impossible(reason) => reason.error_code(),
            Self::UnknownActor(_) => "SKILL_UNKNOWN_ACTOR",
        }
    }
}
