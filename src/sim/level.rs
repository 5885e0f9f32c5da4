//! Brick grid generation for a level

use rand::Rng;

use super::brick::Brick;
use super::rect::Rect;
use super::state::GameState;
use crate::config::{GameConfig, LevelConfig};

/// Brick rectangles for a level, row-major, paired with their row index
///
/// The grid is centered horizontally. Wide levels shrink the bricks so the
/// whole grid stays on screen.
pub fn brick_layout(config: &GameConfig, level: &LevelConfig) -> Vec<(u32, Rect)> {
    let gap = config.brick_gap;
    let cols = level.cols.max(1) as f32;
    let brick_width = config.fitted_brick_width(level.cols);
    let offset_x = (config.screen_width - cols * (brick_width + gap)) / 2.0;

    let mut layout = Vec::with_capacity(level.rows.saturating_mul(level.cols) as usize);
    for row in 0..level.rows {
        for col in 0..level.cols {
            let x = col as f32 * (brick_width + gap) + gap + offset_x;
            let y = row as f32 * (config.brick_height + gap) + gap + config.brick_top;
            layout.push((row, Rect::new(x, y, brick_width, config.brick_height)));
        }
    }
    layout
}

/// Populate the session's bricks for its current level
pub fn generate_level(state: &mut GameState) {
    let level = state.level_config();
    let layout = brick_layout(&state.config, &level);
    let max_health = level.brick_health_max.max(1);

    state.bricks = layout
        .into_iter()
        .map(|(row, rect)| {
            let health = state.rng.random_range(1..=max_health);
            Brick::new(rect, state.config.row_color(row), health)
        })
        .collect();

    log::info!(
        "Level {}: {}x{} bricks, ball speed {}, max health {}",
        state.level_index + 1,
        level.rows,
        level.cols,
        level.ball_speed,
        max_health
    );
}
