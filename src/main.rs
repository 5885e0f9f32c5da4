//! Brick Breaker entry point
//!
//! Runs a headless session with the autopilot at the paddle. Useful for soak
//! testing the simulation and for reproducing a seed.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use brick_breaker::audio::AudioManager;
use brick_breaker::{FileHighScoreStore, Game, GameConfig, Settings};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Run a headless brick breaker session on autopilot", version)]
struct Args {
    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many ticks
    #[arg(long, default_value_t = 36_000)]
    ticks: u64,
    #[arg(long, default_value = "assets/highscore.json")]
    high_score_file: PathBuf,
    /// JSON game configuration overriding the built-in levels and constants
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Print the final session state as JSON
    #[arg(long)]
    dump_state: bool,
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Brick Breaker (headless) starting...");

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let settings = args
        .settings
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();

    let seed = args.seed.unwrap_or_else(time_seed);
    let store = FileHighScoreStore::new(&args.high_score_file);
    log::info!("High score file: {}", store.path().display());
    let mut game = Game::new(config, seed, Box::new(store), AudioManager::new(None, &settings));
    game.input.idle_mode = true;

    let mut ticks = 0;
    while ticks < args.ticks && !game.state.phase.is_terminal() {
        let input = game.input.clone();
        game.step(&input);
        ticks += 1;
    }

    game.quit();
    let hud = game.hud().with_settings(&settings);
    log::info!("Finished after {} ticks", ticks);
    println!("{}", hud.status_line());

    if args.dump_state {
        println!("{}", serde_json::to_string_pretty(&game.state)?);
    }
    Ok(())
}
