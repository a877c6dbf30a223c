//! Common error infrastructure for delve-core.
//!
//! Domain errors (`ActionError`, `SkillError`, `TurnError`, ...) live next to
//! the code that raises them. They all implement [`GameError`] so callers can
//! branch on [`ErrorSeverity`] instead of matching concrete variants: the AI
//! and the scheduler swallow only recoverable errors and let everything else
//! propagate.

use crate::state::{EntityId, Position};

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The attempt was not possible right now; nothing was charged.
    ///
    /// Examples: not enough time, target out of range, inventory full
    Recoverable,

    /// Invalid input that should not be retried without changes.
    Validation,

    /// A violated precondition upstream. Indicates a bug in the caller.
    ///
    /// Examples: activating a skill that is not ready, unknown actor id
    Internal,

    /// Game state corrupted, cannot continue.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    pub actor: Option<EntityId>,
    pub position: Option<Position>,
    /// Round counter at the time of error.
    pub round: u64,
    pub message: Option<&'static str>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(round: u64) -> Self {
        Self {
            actor: None,
            position: None,
            round,
            message: None,
        }
    }

    #[must_use]
    pub const fn with_actor(mut self, actor: EntityId) -> Self {
        self.actor = Some(actor);
        self
    }

    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Common trait for all delve-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Static identifier for this error variant, stable across releases.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
