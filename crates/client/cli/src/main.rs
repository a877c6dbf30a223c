//! Headless demo: plays a few rounds in the arena and prints the narration.
mod autopilot;
mod config;

use anyhow::{Context, Result};
use config::CliConfig;
use delve_content::{ActorLoader, ConfigLoader, ContentFactory, catalog};
use delve_core::env::GridMap;
use delve_core::state::{EntityId, GameState, Position};
use delve_core::stats::StatKind;
use delve_core::{GameConfig, GameEngine, GameEnv, PcgRng};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = setup_logging(&config)?;

    let (rules, map, mut state) = setup_game(&config)?;
    let rng = PcgRng;
    let env = GameEnv::new(&map, &rng, &rules);
    let mut engine = GameEngine::new(&mut state, env);

    for _ in 0..config.rounds {
        let actions = autopilot::plan(engine.state(), &map, &rules);
        let mut narration: Vec<String> = Vec::new();
        let report = engine.advance_round(&actions, &mut narration)?;

        println!("-- round {} --", report.round + 1);
        for line in &narration {
            println!("{line}");
        }
        tracing::debug!(?report, "round finished");

        if !report.player_alive {
            println!("Game over.");
            break;
        }
        while engine.level_up(EntityId::PLAYER, StatKind::Constitution)? {
            println!("You feel more resilient.");
        }
        let foes_left = engine
            .state()
            .actors
            .iter()
            .filter(|actor| actor.ai.is_some() && actor.is_alive())
            .count();
        if foes_left == 0 {
            println!("The arena falls silent.");
            break;
        }
    }
    Ok(())
}

/// Rules, map and populated state, from the data directory when one is set
/// and from the built-in catalog otherwise.
fn setup_game(config: &CliConfig) -> Result<(GameConfig, GridMap, GameState)> {
    let factory = config.data_dir.as_ref().map(ContentFactory::new);

    let rules = match (&config.config_path, &factory) {
        (Some(path), _) => ConfigLoader::load(path)?,
        (None, Some(factory)) => factory.load_config()?,
        (None, None) => GameConfig::default(),
    };

    let (map, state) = match &factory {
        Some(factory) => {
            let map = factory.load_map("arena")?;
            let roster = factory.load_actors()?;
            let state = ActorLoader::populate(&roster, config.seed, &rules)?;
            (map, state)
        }
        None => {
            let map = catalog::arena().context("building the catalog arena")?;
            (map, default_roster(config.seed, &rules)?)
        }
    };
    tracing::info!(
        seed = config.seed,
        actors = state.actors.len(),
        "game ready"
    );
    Ok((rules, map, state))
}

fn default_roster(seed: u64, rules: &GameConfig) -> Result<GameState> {
    use catalog::actors;

    let mut state = GameState::new(seed);
    state.add_player(actors::player().spawn(Position::new(3, 3), rules))?;
    state.spawn(actors::orc().spawn(Position::new(15, 4), rules))?;
    state.spawn(actors::kobold().spawn(Position::new(17, 6), rules))?;
    state.spawn(actors::orc_gunner().spawn(Position::new(16, 3), rules))?;
    state.spawn(actors::troll().spawn(Position::new(10, 3), rules))?;
    Ok(state)
}

/// Setup logging to stderr, plus a log file when `DELVE_LOG_DIR` is set.
fn setup_logging(config: &CliConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating log directory {}", dir.display()))?;
            let file_appender = tracing_appender::rolling::never(dir, "delve.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(dir) = &config.log_dir {
        tracing::info!("Log file: {}/delve.log", dir.display());
    }
    Ok(guard)
}
