//! Brick Breaker - a paddle-and-ball arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, power-ups, levels)
//! - `config`: Playfield constants and the level table
//! - `hud`: Read-only presentation queries for an external renderer
//! - `game`: Fixed-timestep driver wiring the simulation to storage and audio
//! - `highscores`: Persisted high score record
//! - `settings`: User preferences (audio)

pub mod audio;
pub mod config;
pub mod game;
pub mod highscores;
pub mod hud;
pub mod settings;
pub mod sim;

pub use config::{GameConfig, LevelConfig};
pub use game::Game;
pub use highscores::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Canonical simulation rate (one tick per rendered frame)
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Distance from the bottom edge to the paddle's top
    pub const PADDLE_BOTTOM_OFFSET: f32 = 50.0;
    /// Pixels per tick
    pub const PADDLE_SPEED: f32 = 10.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Distance from the bottom edge where a fresh ball spawns
    pub const BALL_SPAWN_OFFSET: f32 = 70.0;

    /// Brick grid layout
    pub const BRICK_WIDTH: f32 = 80.0;
    pub const BRICK_HEIGHT: f32 = 30.0;
    pub const BRICK_GAP: f32 = 5.0;
    pub const BRICK_TOP: f32 = 50.0;

    /// Brick animation timing (ticks)
    pub const HIT_FLASH_FRAMES: u32 = 5;
    pub const HIT_SHAKE_FRAMES: u32 = 3;
    pub const DESTROY_FRAMES: u32 = 15;
    /// Lifetime that maps to a fully opaque particle
    pub const PARTICLE_FADE_TICKS: f32 = 20.0;

    /// Power-ups
    pub const POWER_UP_SIZE: f32 = 30.0;
    pub const POWER_UP_FALL_SPEED: f32 = 3.0;
    /// 10 seconds at 60 ticks per second
    pub const POWER_UP_DURATION_TICKS: u32 = 600;
    pub const POWER_UP_DROP_CHANCE: f64 = 0.2;
    pub const SLOW_FACTOR: f32 = 0.7;

    /// Scoring
    pub const SCORE_BRICK_HIT: u64 = 1;
    pub const SCORE_BRICK_DESTROYED: u64 = 10;
}
