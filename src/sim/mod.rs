//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio or storage dependencies

pub mod brick;
pub mod collision;
pub mod level;
pub mod powerup;
pub mod rect;
pub mod state;
pub mod tick;

pub use brick::{Brick, BrickState, BrickVisual, HitOutcome, Particle};
pub use collision::{CollisionResult, Edge, ball_rect_collision, brick_bounce, paddle_bounce};
pub use level::{brick_layout, generate_level};
pub use powerup::{apply_power_up, tick_effect_timers};
pub use rect::Rect;
pub use state::{
    ActiveEffects, Ball, GameEvent, GamePhase, GameState, Paddle, PowerUp, PowerUpKind,
};
pub use tick::{TickInput, tick};
