//! Game configuration loader.
//!
//! A config file is a partial override: every key is optional and anything
//! left out keeps its [`GameConfig::default`] value. Unknown keys are
//! rejected so a typo never silently falls back to a default.
//!
//! Time values are written in whole units and may carry one decimal:
//!
//! ```toml
//! time_budget = 6
//! move_cost = 4
//! pickup_cost = 0.5
//! blocking_penalty = 10
//! ```

use std::path::Path;

use delve_core::GameConfig;
use delve_core::state::Tick;
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Partial [`GameConfig`] as written in TOML.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverride {
    pub time_budget: Option<f32>,
    pub move_cost: Option<f32>,
    pub unarmed_cost: Option<f32>,
    pub equip_cost: Option<f32>,
    pub pickup_cost: Option<f32>,
    pub drop_cost: Option<f32>,
    pub dash_step_cost: Option<f32>,
    pub blocking_penalty: Option<u32>,
    pub flee_scale: Option<f32>,
    pub area_radius: Option<u32>,
    pub base_crit_chance: Option<u32>,
    pub max_ai_steps_per_segment: Option<u32>,
}

impl ConfigOverride {
    /// Applies every present key onto `config`.
    pub fn apply(&self, config: &mut GameConfig) -> LoadResult<()> {
        let ticks = [
            ("time_budget", self.time_budget, &mut config.time_budget),
            ("move_cost", self.move_cost, &mut config.move_cost),
            ("unarmed_cost", self.unarmed_cost, &mut config.unarmed_cost),
            ("equip_cost", self.equip_cost, &mut config.equip_cost),
            ("pickup_cost", self.pickup_cost, &mut config.pickup_cost),
            ("drop_cost", self.drop_cost, &mut config.drop_cost),
            ("dash_step_cost", self.dash_step_cost, &mut config.dash_step_cost),
        ];
        for (key, value, slot) in ticks {
            if let Some(units) = value {
                *slot = to_tick(key, units)?;
            }
        }

        if let Some(scale) = self.flee_scale {
            if !scale.is_finite() || scale <= 0.0 {
                anyhow::bail!("flee_scale must be a positive number, got {scale}");
            }
            config.flee_scale = scale;
        }
        if let Some(penalty) = self.blocking_penalty {
            config.blocking_penalty = penalty;
        }
        if let Some(radius) = self.area_radius {
            config.area_radius = radius;
        }
        if let Some(chance) = self.base_crit_chance {
            if chance > 100 {
                anyhow::bail!("base_crit_chance is a percentage, got {chance}");
            }
            config.base_crit_chance = chance;
        }
        if let Some(steps) = self.max_ai_steps_per_segment {
            config.max_ai_steps_per_segment = steps.max(1);
        }
        Ok(())
    }
}

fn to_tick(key: &str, units: f32) -> LoadResult<Tick> {
    if !units.is_finite() || units < 0.0 {
        anyhow::bail!("{key} must be a non-negative time, got {units}");
    }
    Ok(Tick::tenths((units * 10.0).round() as u32))
}

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a config override from a TOML file and merge it onto the
    /// defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
    }

    /// Parse TOML text and merge it onto the defaults.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let overrides: ConfigOverride = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        let mut config = GameConfig::default();
        overrides.apply(&mut config)?;
        tracing::debug!(?config, "game config loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn omitted_keys_keep_their_defaults() {
        let config = ConfigLoader::parse("move_cost = 3\npickup_cost = 0.2\n").unwrap();
        assert_eq!(config.move_cost, Tick::whole(3));
        assert_eq!(config.pickup_cost, Tick::tenths(2));
        assert_eq!(config.time_budget, GameConfig::DEFAULT_TIME_BUDGET);
        assert_eq!(config.blocking_penalty, GameConfig::DEFAULT_BLOCKING_PENALTY);
    }

    #[test]
    fn empty_file_is_the_default_config() {
        assert_eq!(ConfigLoader::parse("").unwrap(), GameConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = ConfigLoader::parse("move_cots = 3\n").unwrap_err();
        assert!(error.to_string().contains("move_cots"), "{error}");
    }

    #[test]
    fn nonsense_values_are_rejected() {
        assert!(ConfigLoader::parse("move_cost = -1.0\n").is_err());
        assert!(ConfigLoader::parse("flee_scale = 0.0\n").is_err());
        assert!(ConfigLoader::parse("base_crit_chance = 150\n").is_err());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "time_budget = 8\nflee_scale = 1.5").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.time_budget, Tick::whole(8));
        assert_eq!(config.flee_scale, 1.5);
        assert_eq!(config.move_cost, GameConfig::DEFAULT_MOVE_COST);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let error = ConfigLoader::load(&path).unwrap_err();
        assert!(error.to_string().contains("nope.toml"));
    }
}
