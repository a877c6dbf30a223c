//! Demo configuration from environment variables.
use std::env;
use std::path::PathBuf;

/// Settings for one demo run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliConfig {
    /// TOML rule overrides, applied on top of the defaults.
    pub config_path: Option<PathBuf>,
    /// Content directory with `maps/arena.ron` and `actors.ron`. Without it
    /// the built-in catalog arena is used.
    pub data_dir: Option<PathBuf>,
    pub rounds: u32,
    pub seed: u64,
    /// Also write diagnostics to `delve.log` in this directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            data_dir: None,
            rounds: Self::DEFAULT_ROUNDS,
            seed: Self::DEFAULT_SEED,
            log_dir: None,
        }
    }
}

impl CliConfig {
    pub const DEFAULT_ROUNDS: u32 = 10;
    pub const DEFAULT_SEED: u64 = 0x5eed;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DELVE_CONFIG` - TOML rule overrides (default: built-in rules)
    /// - `DELVE_DATA_DIR` - Content directory (default: built-in catalog)
    /// - `DELVE_ROUNDS` - Rounds to play (default: 10)
    /// - `DELVE_SEED` - Game seed (default: fixed)
    /// - `DELVE_LOG_DIR` - Directory for a log file (default: stderr only)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        config.config_path = lookup("DELVE_CONFIG").map(PathBuf::from);
        config.data_dir = lookup("DELVE_DATA_DIR").map(PathBuf::from);
        if let Some(rounds) = parse(&lookup, "DELVE_ROUNDS") {
            config.rounds = rounds;
        }
        if let Some(seed) = parse(&lookup, "DELVE_SEED") {
            config.seed = seed;
        }
        config.log_dir = lookup("DELVE_LOG_DIR").map(PathBuf::from);
        config
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable environment variable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(CliConfig::from_lookup(lookup(&[])), CliConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = CliConfig::from_lookup(lookup(&[
            ("DELVE_CONFIG", "rules.toml"),
            ("DELVE_ROUNDS", "25"),
            ("DELVE_SEED", "7"),
            ("DELVE_LOG_DIR", "/tmp/delve"),
        ]));
        assert_eq!(config.config_path, Some(PathBuf::from("rules.toml")));
        assert_eq!(config.rounds, 25);
        assert_eq!(config.seed, 7);
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/delve")));
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn garbage_numbers_fall_back() {
        let config = CliConfig::from_lookup(lookup(&[("DELVE_ROUNDS", "lots")]));
        assert_eq!(config.rounds, CliConfig::DEFAULT_ROUNDS);
    }
}
