//! Game state and core simulation types
//!
//! The session owns every entity collection. Only the tick mutates it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::brick::Brick;
use super::level::generate_level;
use super::rect::Rect;
use crate::config::{GameConfig, LevelConfig, Rgb};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation frozen, input still polled
    Paused,
    /// Every brick cleared, waiting for the next-level command
    LevelComplete,
    /// Last ball lost
    GameOver,
    /// Final level cleared
    GameWon,
}

impl GamePhase {
    /// Phases that only a restart leaves
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::GameWon)
    }
}

/// Things that happened during a tick, for the driver to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PaddleBounce,
    BrickHit { destroyed: bool },
    PowerUpSpawned(PowerUpKind),
    PowerUpCollected(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    BallLost,
    LevelComplete { level: u32 },
    GameOver,
    GameWon,
    /// The session's high score was raised to this value
    NewHighScore(u64),
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Scalar speed; `vel` always has this magnitude
    pub speed: f32,
    pub radius: f32,
    /// Cleared when the ball falls past the bottom edge
    pub active: bool,
}

impl Ball {
    /// Ball leaving `pos` at `angle` radians above the horizontal
    pub fn launched(pos: Vec2, angle: f32, speed: f32, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::new(angle.cos() * speed, -angle.sin() * speed),
            speed,
            radius,
            active: true,
        }
    }

    /// Move one tick and bounce off the side and top walls
    pub fn update(&mut self, screen_width: f32, screen_height: f32) {
        self.pos += self.vel;

        if self.pos.x <= self.radius {
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x >= screen_width - self.radius {
            self.vel.x = -self.vel.x.abs();
        }
        if self.pos.y <= self.radius {
            self.vel.y = self.vel.y.abs();
        }

        if self.pos.y >= screen_height {
            self.active = false;
        }
    }

    /// Change speed, keeping the direction of travel
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
        if self.vel.length_squared() > 0.0 {
            self.vel = self.vel.normalize() * speed;
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed)
    pub y: f32,
    pub width: f32,
    pub base_width: f32,
    pub height: f32,
}

impl Paddle {
    /// Centered paddle at its canonical size
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: config.screen_width / 2.0 - config.paddle_width / 2.0,
            y: config.paddle_y(),
            width: config.paddle_width,
            base_width: config.paddle_width,
            height: config.paddle_height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Slide horizontally, staying fully on screen
    pub fn move_by(&mut self, dx: f32, screen_width: f32) {
        let max_x = (screen_width - self.width).max(0.0);
        self.x = (self.x + dx).clamp(0.0, max_x);
    }

    /// Double the width, limited by the space to the right of the paddle
    pub fn enlarge(&mut self, screen_width: f32) {
        self.width = (self.base_width * 2.0).min(screen_width - self.x);
    }

    pub fn reset_width(&mut self) {
        self.width = self.base_width;
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    EnlargePaddle,
    ExtraBall,
    SlowBall,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::EnlargePaddle,
        PowerUpKind::ExtraBall,
        PowerUpKind::SlowBall,
    ];

    /// Uniformly random kind
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Whether the effect runs on a countdown (ExtraBall is instantaneous)
    pub fn is_timed(&self) -> bool {
        !matches!(self, PowerUpKind::ExtraBall)
    }

    /// HUD label
    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::EnlargePaddle => "Enlarged Paddle",
            PowerUpKind::ExtraBall => "Extra Ball",
            PowerUpKind::SlowBall => "Slow Ball",
        }
    }

    /// Letter drawn on the falling pickup
    pub fn symbol(&self) -> char {
        match self {
            PowerUpKind::EnlargePaddle => 'P',
            PowerUpKind::ExtraBall => 'B',
            PowerUpKind::SlowBall => 'S',
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            PowerUpKind::EnlargePaddle => [128, 0, 128],
            PowerUpKind::ExtraBall => [0, 255, 255],
            PowerUpKind::SlowBall => [0, 255, 0],
        }
    }
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub kind: PowerUpKind,
    /// Cleared once it falls past the bottom edge
    pub active: bool,
}

impl PowerUp {
    /// Drop a pickup centered under `brick`
    pub fn from_brick(brick: &Rect, kind: PowerUpKind, config: &GameConfig) -> Self {
        let size = config.power_up_size;
        Self {
            pos: Vec2::new(brick.x + brick.width / 2.0 - size / 2.0, brick.bottom()),
            vel: Vec2::new(0.0, config.power_up_fall_speed),
            size,
            kind,
            active: true,
        }
    }

    pub fn update(&mut self, screen_height: f32) {
        self.pos += self.vel;
        if self.pos.y > screen_height {
            self.active = false;
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

/// Remaining ticks of the timed power-up effects (0 = inactive)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub enlarge_ticks: u32,
    pub slow_ticks: u32,
}

impl ActiveEffects {
    pub fn remaining(&self, kind: PowerUpKind) -> u32 {
        match kind {
            PowerUpKind::EnlargePaddle => self.enlarge_ticks,
            PowerUpKind::SlowBall => self.slow_ticks,
            PowerUpKind::ExtraBall => 0,
        }
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub(super) rng: Pcg32,
    pub config: GameConfig,
    /// Current level index (0-based)
    pub level_index: u32,
    pub score: u64,
    /// Best score known to this session (loaded from storage at startup)
    pub high_score: u64,
    /// Simulation tick counter (not advanced while paused)
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub bricks: Vec<Brick>,
    pub power_ups: Vec<PowerUp>,
    pub effects: ActiveEffects,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a new game at level 0
    pub fn new(config: GameConfig, seed: u64, high_score: u64) -> Self {
        let paddle = Paddle::new(&config);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            config,
            level_index: 0,
            score: 0,
            high_score,
            time_ticks: 0,
            phase: GamePhase::Playing,
            paddle,
            balls: Vec::new(),
            bricks: Vec::new(),
            power_ups: Vec::new(),
            effects: ActiveEffects::default(),
            events: Vec::new(),
        };
        state.reset_level();
        state
    }

    /// New game with the canonical configuration and no prior high score
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GameConfig::default(), seed, 0)
    }

    pub fn level_config(&self) -> LevelConfig {
        self.config.level(self.level_index)
    }

    /// The level's canonical ball speed
    pub fn base_ball_speed(&self) -> f32 {
        self.level_config().ball_speed
    }

    /// Rebuild paddle, ball, bricks and power-up state for the current level
    pub fn reset_level(&mut self) {
        self.paddle = Paddle::new(&self.config);
        self.power_ups.clear();
        self.effects = ActiveEffects::default();
        self.balls.clear();
        self.spawn_serve_ball();
        generate_level(self);
    }

    /// Place a fresh ball above the paddle heading up-left or up-right
    pub fn spawn_serve_ball(&mut self) {
        let speed = self.base_ball_speed();
        let dir_x = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let pos = Vec2::new(
            self.config.screen_width / 2.0,
            self.config.screen_height - self.config.ball_spawn_offset,
        );
        self.balls.push(Ball {
            pos,
            vel: Vec2::new(dir_x, -1.0).normalize() * speed,
            speed,
            radius: self.config.ball_radius,
            active: true,
        });
    }

    /// Back to level 0 with a zero score
    pub fn restart(&mut self) {
        self.level_index = 0;
        self.score = 0;
        self.reset_level();
        self.phase = GamePhase::Playing;
        log::info!("Game restarted");
    }

    /// Move on to the next level, or finish the game after the last one
    pub fn advance_level(&mut self) {
        self.level_index += 1;
        if self.level_index < self.config.level_count() {
            self.reset_level();
            self.phase = GamePhase::Playing;
            log::info!("Starting level {} with score {}", self.level_index + 1, self.score);
        } else {
            self.level_index = self.config.level_count() - 1;
            self.phase = GamePhase::GameWon;
            self.events.push(GameEvent::GameWon);
            self.record_high_score();
        }
    }

    /// Raise the high score if the current score beats it
    pub fn record_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            self.events.push(GameEvent::NewHighScore(self.score));
            log::info!("New high score: {}", self.score);
            true
        } else {
            false
        }
    }

    /// Every brick has been destroyed (animations may still be running)
    pub fn all_bricks_cleared(&self) -> bool {
        self.bricks.iter().all(Brick::counts_as_destroyed)
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_layout() {
        let state = GameState::with_seed(42);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.bricks.len(), 24);
        assert_eq!(state.paddle.width, 100.0);
        assert_eq!(state.paddle.x, 350.0);
        assert_eq!(state.paddle.y, 550.0);
    }

    #[test]
    fn test_serve_ball_speed_matches_velocity() {
        let state = GameState::with_seed(7);
        let ball = &state.balls[0];
        assert_eq!(ball.speed, 5.0);
        assert!((ball.vel.length() - ball.speed).abs() < 1e-5);
        assert!(ball.vel.y < 0.0);
        assert_eq!(ball.pos, Vec2::new(400.0, 530.0));
    }

    #[test]
    fn test_ball_update_adds_velocity() {
        let mut ball = Ball::launched(Vec2::new(100.0, 100.0), 1.0, 5.0, 10.0);
        let before = ball.pos;
        ball.update(800.0, 600.0);
        assert_eq!(ball.pos, before + ball.vel);
    }

    #[test]
    fn test_ball_wall_bounces_keep_speed() {
        let mut ball = Ball {
            pos: Vec2::new(12.0, 300.0),
            vel: Vec2::new(-3.0, 4.0),
            speed: 5.0,
            radius: 10.0,
            active: true,
        };
        ball.update(800.0, 600.0);
        assert_eq!(ball.vel, Vec2::new(3.0, 4.0));

        ball.pos = Vec2::new(789.0, 300.0);
        ball.update(800.0, 600.0);
        assert_eq!(ball.vel, Vec2::new(-3.0, 4.0));

        ball.vel = Vec2::new(3.0, -4.0);
        ball.pos = Vec2::new(400.0, 12.0);
        ball.update(800.0, 600.0);
        assert_eq!(ball.vel, Vec2::new(3.0, 4.0));
        assert!((ball.vel.length() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_ball_lost_at_bottom() {
        let mut ball = Ball::launched(Vec2::new(400.0, 597.0), -std::f32::consts::FRAC_PI_2, 5.0, 10.0);
        ball.update(800.0, 600.0);
        assert!(!ball.active);
        // No bounce off the floor
        assert!(ball.vel.y > 0.0);
    }

    #[test]
    fn test_set_speed_renormalizes() {
        let mut ball = Ball::launched(Vec2::ZERO, 0.3, 5.0, 10.0);
        let dir = ball.vel.normalize();
        ball.set_speed(3.5);
        assert!((ball.vel.length() - 3.5).abs() < 1e-5);
        assert!(ball.vel.normalize().distance(dir) < 1e-5);
    }

    #[test]
    fn test_paddle_clamped_to_screen() {
        let config = GameConfig::default();
        let mut paddle = Paddle::new(&config);
        paddle.move_by(-1000.0, config.screen_width);
        assert_eq!(paddle.x, 0.0);
        paddle.move_by(1000.0, config.screen_width);
        assert_eq!(paddle.x, 700.0);
    }

    #[test]
    fn test_enlarge_limited_by_right_edge() {
        let config = GameConfig::default();
        let mut paddle = Paddle::new(&config);
        paddle.enlarge(config.screen_width);
        assert_eq!(paddle.width, 200.0);

        paddle.reset_width();
        paddle.x = 650.0;
        paddle.enlarge(config.screen_width);
        assert_eq!(paddle.width, 150.0);
    }

    #[test]
    fn test_power_up_falls_and_expires() {
        let config = GameConfig::default();
        let brick = Rect::new(65.0, 55.0, 80.0, 30.0);
        let mut p = PowerUp::from_brick(&brick, PowerUpKind::SlowBall, &config);
        assert_eq!(p.pos, Vec2::new(90.0, 85.0));
        p.update(config.screen_height);
        assert_eq!(p.pos.y, 88.0);
        p.pos.y = 599.0;
        p.update(config.screen_height);
        assert!(!p.active);
    }

    #[test]
    fn test_record_high_score_only_when_beaten() {
        let mut state = GameState::new(GameConfig::default(), 1, 100);
        state.score = 90;
        assert!(!state.record_high_score());
        state.score = 120;
        assert!(state.record_high_score());
        assert_eq!(state.high_score, 120);
        assert_eq!(state.drain_events(), vec![GameEvent::NewHighScore(120)]);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_advance_past_last_level_wins() {
        let mut state = GameState::with_seed(3);
        state.level_index = 3;
        state.score = 50;
        state.advance_level();
        assert_eq!(state.phase, GamePhase::GameWon);
        assert_eq!(state.level_index, 3);
        assert_eq!(state.high_score, 50);
    }
}
