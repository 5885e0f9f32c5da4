//! Playfield configuration and the level table
//!
//! Everything the simulation would otherwise read from globals lives in
//! [`GameConfig`], which the session owns for its whole lifetime. A config can
//! be loaded from JSON; omitted fields fall back to the canonical values.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// RGB color triple
pub type Rgb = [u8; 3];

pub const RED: Rgb = [255, 0, 0];
pub const ORANGE: Rgb = [255, 165, 0];
pub const YELLOW: Rgb = [255, 255, 0];
pub const GREEN: Rgb = [0, 255, 0];
pub const BLUE: Rgb = [0, 0, 255];

/// One entry of the level table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub rows: u32,
    pub cols: u32,
    /// Base ball speed in pixels per tick
    pub ball_speed: f32,
    /// Brick health is drawn from `1..=brick_health_max`
    pub brick_health_max: u32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        DEFAULT_LEVELS[0]
    }
}

/// Canonical level progression
pub const DEFAULT_LEVELS: [LevelConfig; 4] = [
    LevelConfig { rows: 3, cols: 8, ball_speed: 5.0, brick_health_max: 1 },
    LevelConfig { rows: 5, cols: 10, ball_speed: 6.0, brick_health_max: 2 },
    LevelConfig { rows: 6, cols: 12, ball_speed: 7.0, brick_health_max: 2 },
    LevelConfig { rows: 7, cols: 14, ball_speed: 8.0, brick_health_max: 3 },
];

/// Immutable game configuration, passed to the session at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_bottom_offset: f32,
    pub paddle_speed: f32,

    pub ball_radius: f32,
    pub ball_spawn_offset: f32,

    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_gap: f32,
    pub brick_top: f32,
    /// Row colors, cycled by row index
    pub palette: Vec<Rgb>,

    pub power_up_size: f32,
    pub power_up_fall_speed: f32,
    pub power_up_duration_ticks: u32,
    /// Probability that a destroyed brick drops a power-up
    pub power_up_drop_chance: f64,
    pub slow_factor: f32,

    pub levels: Vec<LevelConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_bottom_offset: PADDLE_BOTTOM_OFFSET,
            paddle_speed: PADDLE_SPEED,

            ball_radius: BALL_RADIUS,
            ball_spawn_offset: BALL_SPAWN_OFFSET,

            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_gap: BRICK_GAP,
            brick_top: BRICK_TOP,
            palette: vec![RED, ORANGE, YELLOW, GREEN, BLUE],

            power_up_size: POWER_UP_SIZE,
            power_up_fall_speed: POWER_UP_FALL_SPEED,
            power_up_duration_ticks: POWER_UP_DURATION_TICKS,
            power_up_drop_chance: POWER_UP_DROP_CHANCE,
            slow_factor: SLOW_FACTOR,

            levels: DEFAULT_LEVELS.to_vec(),
        }
    }
}

impl GameConfig {
    /// Level config for an index, clamped to the last table entry
    pub fn level(&self, index: u32) -> LevelConfig {
        let last = self.levels.len().saturating_sub(1);
        self.levels
            .get((index as usize).min(last))
            .copied()
            .unwrap_or_default()
    }

    /// Number of levels in the progression (at least one)
    pub fn level_count(&self) -> u32 {
        self.levels.len().max(1) as u32
    }

    /// Whether `index` is the final level
    pub fn is_last_level(&self, index: u32) -> bool {
        index + 1 >= self.level_count()
    }

    /// Brick width for a row of `cols` bricks, shrunk to fit the screen
    pub fn fitted_brick_width(&self, cols: u32) -> f32 {
        let cols = cols.max(1) as f32;
        let fitted = (self.screen_width - self.brick_gap * (cols + 1.0)) / cols;
        self.brick_width.min(fitted)
    }

    /// Y coordinate of the paddle's top edge
    pub fn paddle_y(&self) -> f32 {
        self.screen_height - self.paddle_bottom_offset
    }

    /// Palette color for a brick row
    pub fn row_color(&self, row: u32) -> Rgb {
        if self.palette.is_empty() {
            return [255, 255, 255];
        }
        self.palette[row as usize % self.palette.len()]
    }

    /// Reject configurations the simulation cannot run
    pub fn validate(&self) -> Result<()> {
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            bail!("screen size must be positive");
        }
        if self.paddle_width <= 0.0 || self.paddle_width * 2.0 > self.screen_width {
            bail!("paddle width must fit twice across the screen");
        }
        if self.levels.is_empty() {
            bail!("level table is empty");
        }
        for (i, level) in self.levels.iter().enumerate() {
            if level.rows == 0 || level.cols == 0 {
                bail!("level {i} has an empty brick grid");
            }
            if level.rows.checked_mul(level.cols).is_none() {
                bail!("level {i} has too many bricks");
            }
            if self.fitted_brick_width(level.cols) <= 0.0 {
                bail!("level {i} has too many columns to fit on screen");
            }
            if level.brick_health_max == 0 {
                bail!("level {i} has zero brick health");
            }
            if level.ball_speed <= 0.0 {
                bail!("level {i} has a non-positive ball speed");
            }
        }
        if !(0.0..=1.0).contains(&self.power_up_drop_chance) {
            bail!("power-up drop chance must be within [0, 1]");
        }
        Ok(())
    }

    /// Load a config from a JSON file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        log::info!("Loaded game config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_index_clamped_to_last_entry() {
        let config = GameConfig::default();
        assert_eq!(config.level(0).rows, 3);
        assert_eq!(config.level(3).cols, 14);
        assert_eq!(config.level(99), config.level(3));
    }

    #[test]
    fn test_last_level() {
        let config = GameConfig::default();
        assert!(!config.is_last_level(2));
        assert!(config.is_last_level(3));
    }

    #[test]
    fn test_row_color_cycles() {
        let config = GameConfig::default();
        assert_eq!(config.row_color(0), RED);
        assert_eq!(config.row_color(5), RED);
        assert_eq!(config.row_color(6), ORANGE);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{ "paddle_speed": 12.0 }"#).unwrap();
        assert_eq!(config.paddle_speed, 12.0);
        assert_eq!(config.screen_width, SCREEN_WIDTH);
        assert_eq!(config.levels.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_levels() {
        let config = GameConfig {
            levels: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
        // Lookup still degrades gracefully
        assert_eq!(config.level(2), LevelConfig::default());
    }

    #[test]
    fn test_validate_rejects_levels_too_wide_for_screen() {
        let level = LevelConfig {
            rows: 1,
            cols: 200,
            ball_speed: 5.0,
            brick_health_max: 1,
        };
        let config = GameConfig {
            levels: vec![level],
            ..Default::default()
        };
        assert!(config.fitted_brick_width(200) <= 0.0);
        assert!(config.validate().is_err());

        // The widest default level still fits
        assert!(GameConfig::default().fitted_brick_width(14) > 0.0);
    }

    #[test]
    fn test_validate_rejects_overflowing_grid() {
        let level = LevelConfig {
            rows: u32::MAX,
            cols: 2,
            ball_speed: 5.0,
            brick_health_max: 1,
        };
        let config = GameConfig {
            levels: vec![level],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "levels": [{"rows": 1, "cols": 2, "ball_speed": 4.0, "brick_health_max": 1}] }"#)
            .unwrap();
        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.level_count(), 1);
        assert!(GameConfig::load(&dir.path().join("missing.json")).is_err());
    }
}
