//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session by one frame.

use rand::Rng;

use super::brick::HitOutcome;
use super::collision::{ball_rect_collision, brick_bounce, paddle_bounce};
use super::powerup::{apply_power_up, tick_effect_timers};
use super::state::{GameEvent, GamePhase, GameState, PowerUp, PowerUpKind};
use crate::consts::{SCORE_BRICK_DESTROYED, SCORE_BRICK_HIT};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move paddle left (held)
    pub left: bool,
    /// Move paddle right (held)
    pub right: bool,
    /// Pause toggle
    pub pause: bool,
    /// Restart after game over or victory
    pub restart: bool,
    /// Continue after a level is complete
    pub next_level: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input);
    }
    let input = &input;

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
            _ => {}
        }
    }

    if input.restart && state.phase.is_terminal() {
        state.restart();
    }

    if input.next_level && state.phase == GamePhase::LevelComplete {
        state.advance_level();
    }

    if state.phase == GamePhase::Paused {
        return;
    }

    state.time_ticks += 1;

    // Paddle responds in every unpaused phase
    let speed = state.config.paddle_speed;
    let screen_width = state.config.screen_width;
    if input.left {
        state.paddle.move_by(-speed, screen_width);
    }
    if input.right {
        state.paddle.move_by(speed, screen_width);
    }

    match state.phase {
        GamePhase::Playing => update_playing(state),
        // Let debris finish flying behind the overlays
        GamePhase::LevelComplete | GamePhase::GameOver | GamePhase::GameWon => {
            advance_bricks(state)
        }
        GamePhase::Paused => {}
    }
}

fn update_playing(state: &mut GameState) {
    tick_effect_timers(state);

    update_balls(state);
    update_power_ups(state);
    advance_bricks(state);

    // Check if all balls lost
    if state.balls.is_empty() {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver);
        log::info!("Game over at level {} with score {}", state.level_index + 1, state.score);
        state.record_high_score();
        return;
    }

    if state.all_bricks_cleared() {
        if state.config.is_last_level(state.level_index) {
            state.phase = GamePhase::GameWon;
            state.events.push(GameEvent::GameWon);
            log::info!("All levels cleared with score {}", state.score);
        } else {
            state.phase = GamePhase::LevelComplete;
            state.events.push(GameEvent::LevelComplete {
                level: state.level_index,
            });
            log::info!("Level {} complete, score {}", state.level_index + 1, state.score);
        }
        state.record_high_score();
    }
}

/// Move balls, then resolve paddle and brick contacts for each
fn update_balls(state: &mut GameState) {
    let screen_width = state.config.screen_width;
    let screen_height = state.config.screen_height;
    let drop_chance = state.config.power_up_drop_chance;
    let paddle_rect = state.paddle.rect();
    let mut spawned: Vec<PowerUp> = Vec::new();

    for ball in state.balls.iter_mut() {
        ball.update(screen_width, screen_height);

        let contact = ball_rect_collision(ball.pos, ball.radius, &paddle_rect);
        if contact.hit {
            ball.vel = paddle_bounce(ball.vel, ball.speed, &contact, &paddle_rect);
            state.events.push(GameEvent::PaddleBounce);
        }

        for brick in state.bricks.iter_mut() {
            if !brick.is_hittable() {
                continue;
            }
            let contact = ball_rect_collision(ball.pos, ball.radius, &brick.rect);
            if !contact.hit {
                continue;
            }

            let Some(outcome) = brick.hit(&mut state.rng) else {
                continue;
            };
            let destroyed = outcome == HitOutcome::Destroyed;
            if destroyed {
                state.score += SCORE_BRICK_DESTROYED;
                if state.rng.random_bool(drop_chance) {
                    let kind = PowerUpKind::random(&mut state.rng);
                    spawned.push(PowerUp::from_brick(&brick.rect, kind, &state.config));
                    state.events.push(GameEvent::PowerUpSpawned(kind));
                }
            } else {
                state.score += SCORE_BRICK_HIT;
            }

            ball.vel = brick_bounce(ball.vel, contact.edge);
            state.events.push(GameEvent::BrickHit { destroyed });
        }
    }

    state.power_ups.extend(spawned);

    let before = state.balls.len();
    state.balls.retain(|b| b.active);
    for _ in state.balls.len()..before {
        state.events.push(GameEvent::BallLost);
    }
}

/// Drop power-ups, collect those touching the paddle, discard fallen ones
fn update_power_ups(state: &mut GameState) {
    let screen_height = state.config.screen_height;
    for power_up in state.power_ups.iter_mut() {
        power_up.update(screen_height);
    }

    let paddle_rect = state.paddle.rect();
    let mut collected: Vec<PowerUpKind> = Vec::new();
    state.power_ups.retain(|power_up| {
        if power_up.rect().overlaps(&paddle_rect) {
            collected.push(power_up.kind);
            false
        } else {
            power_up.active
        }
    });

    for kind in collected {
        apply_power_up(state, kind);
    }
}

/// Step brick animations and drop bricks whose animation has finished
fn advance_bricks(state: &mut GameState) {
    for brick in state.bricks.iter_mut() {
        brick.advance(&mut state.rng);
    }
    state.bricks.retain(|b| !b.is_gone());
}

/// Synthesize input for demo play
fn autopilot(state: &GameState, input: &mut TickInput) {
    input.left = false;
    input.right = false;

    match state.phase {
        GamePhase::LevelComplete => {
            input.next_level = true;
            return;
        }
        GamePhase::Playing => {}
        _ => return,
    }

    let paddle = &state.paddle;

    // Most dangerous ball: the lowest one heading down
    let threat = state
        .balls
        .iter()
        .filter(|b| b.vel.y > 0.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    let target_x = if let Some(ball) = threat {
        // Aim off-center by a slowly drifting amount so rallies vary
        let drift = (state.time_ticks as f32 * 0.013).sin() * paddle.width * 0.3;
        ball.pos.x + drift
    } else if let Some(power_up) = state
        .power_ups
        .iter()
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    {
        power_up.rect().center().x
    } else if let Some(ball) = state.balls.first() {
        ball.pos.x
    } else {
        return;
    };

    let dead_zone = state.config.paddle_speed / 2.0;
    let center = paddle.center_x();
    if target_x < center - dead_zone {
        input.left = true;
    } else if target_x > center + dead_zone {
        input.right = true;
    }
}
