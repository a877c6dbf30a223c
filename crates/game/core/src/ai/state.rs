use crate::state::{EntityId, Position};

/// Behaviour an NPC is currently in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AiMode {
    /// Hunts the target.
    #[default]
    Hostile,
    /// Runs from the target until it is lost.
    Fleeing,
    /// Stumbles at random; `previous` comes back when the counter runs out.
    Confused {
        turns_remaining: u32,
        previous: Box<AiMode>,
    },
}

impl AiMode {
    pub fn is_confused(&self) -> bool {
        matches!(self, Self::Confused { .. })
    }
}

/// Per-NPC decision state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiState {
    pub mode: AiMode,
    pub target: Option<EntityId>,
    /// Remaining steps of the last computed route, next step first.
    pub path: Vec<Position>,
    /// Picks up, equips and loads gear on its own.
    pub item_user: bool,
}

impl AiState {
    pub fn hostile() -> Self {
        Self::default()
    }

    pub fn item_user(mut self) -> Self {
        self.item_user = true;
        self
    }

    /// Scrambles the AI for `turns` segments. Re-confusing keeps the mode
    /// saved by the first confusion.
    pub fn confuse(&mut self, turns: u32) {
        let previous = match std::mem::take(&mut self.mode) {
            AiMode::Confused { previous, .. } => previous,
            mode => Box::new(mode),
        };
        self.mode = AiMode::Confused {
            turns_remaining: turns,
            previous,
        };
        self.path.clear();
    }

    /// Restores the mode saved by [`confuse`](Self::confuse).
    pub fn recover(&mut self) {
        if let AiMode::Confused { previous, .. } = std::mem::take(&mut self.mode) {
            self.mode = *previous;
        }
    }

    pub fn forget_target(&mut self) {
        self.target = None;
        self.path.clear();
        if self.mode == AiMode::Fleeing {
            self.mode = AiMode::Hostile;
        }
    }
}
