//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::Position;

/// Errors raised while building or querying oracle data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// Position is outside the map bounds.
    #[error("position {0} is out of map bounds")]
    PositionOutOfBounds(Position),

    #[error("map layout has no tiles")]
    EmptyLayout,

    #[error("map row {row} has a different width from the first row")]
    RaggedRow { row: usize },

    #[error("unknown map glyph {glyph:?} at {position}")]
    UnknownGlyph { glyph: char, position: Position },
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            PositionOutOfBounds(_) => "ORACLE_POSITION_OUT_OF_BOUNDS",
            EmptyLayout => "ORACLE_EMPTY_LAYOUT",
            RaggedRow { .. } => "ORACLE_RAGGED_ROW",
            UnknownGlyph { .. } => "ORACLE_UNKNOWN_GLYPH",
        }
    }
}
