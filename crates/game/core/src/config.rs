//! Rule constants and tunable parameters.
use crate::state::Tick;

/// Game configuration constants and tunable parameters.
///
/// Capacities are compile-time constants because they parameterise the
/// bounded collections held by every actor. Everything else is a runtime
/// default that content loaders may override.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Time budget refilled at the start of each actor segment.
    pub time_budget: Tick,
    /// Cost of a single step.
    pub move_cost: Tick,
    /// Cost of an unarmed strike.
    pub unarmed_cost: Tick,
    pub equip_cost: Tick,
    pub pickup_cost: Tick,
    pub drop_cost: Tick,
    /// Cost charged per tile travelled by a dash skill.
    pub dash_step_cost: Tick,
    /// Additive path cost for tiles holding a movement-blocking actor.
    pub blocking_penalty: u32,
    /// Multiplier applied when inverting an approach field into a flee field.
    pub flee_scale: f32,
    /// Default radius for area combat units.
    pub area_radius: u32,
    /// Critical chance (percent) every actor starts with.
    pub base_crit_chance: u32,
    /// Upper bound on decision steps an NPC may take inside one segment.
    pub max_ai_steps_per_segment: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_INVENTORY_SLOTS: usize = 26;
    pub const MAX_ABILITIES: usize = 16;
    pub const MAX_STATUS_EFFECTS: usize = 16;
    pub const MAX_CONDITIONS: usize = 16;
    pub const MAX_DAMAGE_LOG: usize = 8;
    pub const MAX_WAND_SKILLS: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TIME_BUDGET: Tick = Tick::whole(6);
    pub const DEFAULT_MOVE_COST: Tick = Tick::whole(4);
    pub const DEFAULT_UNARMED_COST: Tick = Tick::whole(5);
    pub const DEFAULT_EQUIP_COST: Tick = Tick::tenths(5);
    pub const DEFAULT_PICKUP_COST: Tick = Tick::tenths(5);
    pub const DEFAULT_DROP_COST: Tick = Tick::tenths(1);
    pub const DEFAULT_DASH_STEP_COST: Tick = Tick::tenths(5);
    pub const DEFAULT_BLOCKING_PENALTY: u32 = 10;
    pub const DEFAULT_FLEE_SCALE: f32 = 1.2;
    pub const DEFAULT_AREA_RADIUS: u32 = 2;
    pub const DEFAULT_BASE_CRIT_CHANCE: u32 = 5;
    pub const DEFAULT_MAX_AI_STEPS: u32 = 32;

    pub fn new() -> Self {
        Self {
            time_budget: Self::DEFAULT_TIME_BUDGET,
            move_cost: Self::DEFAULT_MOVE_COST,
            unarmed_cost: Self::DEFAULT_UNARMED_COST,
            equip_cost: Self::DEFAULT_EQUIP_COST,
            pickup_cost: Self::DEFAULT_PICKUP_COST,
            drop_cost: Self::DEFAULT_DROP_COST,
            dash_step_cost: Self::DEFAULT_DASH_STEP_COST,
            blocking_penalty: Self::DEFAULT_BLOCKING_PENALTY,
            flee_scale: Self::DEFAULT_FLEE_SCALE,
            area_radius: Self::DEFAULT_AREA_RADIUS,
            base_crit_chance: Self::DEFAULT_BASE_CRIT_CHANCE,
            max_ai_steps_per_segment: Self::DEFAULT_MAX_AI_STEPS,
        }
    }

    pub fn with_time_budget(time_budget: Tick) -> Self {
        Self {
            time_budget,
            ..Self::new()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
