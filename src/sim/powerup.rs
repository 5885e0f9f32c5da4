//! Power-up effects: application on pickup and expiry of timed effects

use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{Ball, GameEvent, GameState, PowerUpKind};

/// Apply a caught power-up to the session
pub fn apply_power_up(state: &mut GameState, kind: PowerUpKind) {
    let duration = state.config.power_up_duration_ticks;
    match kind {
        PowerUpKind::EnlargePaddle => {
            // Refreshes the timer; the width never stacks past 2x
            state.paddle.enlarge(state.config.screen_width);
            state.effects.enlarge_ticks = duration;
        }
        PowerUpKind::ExtraBall => {
            if let Some(source) = state.balls.choose(&mut state.rng).cloned() {
                let angle = state.rng.random_range(0.0..=std::f32::consts::PI);
                state
                    .balls
                    .push(Ball::launched(source.pos, angle, source.speed, source.radius));
            }
        }
        PowerUpKind::SlowBall => {
            let factor = state.config.slow_factor;
            for ball in state.balls.iter_mut() {
                ball.set_speed(ball.speed * factor);
            }
            state.effects.slow_ticks = duration;
        }
    }
    log::debug!("Power-up collected: {:?}", kind);
    state.events.push(GameEvent::PowerUpCollected(kind));
}

/// Count down the timed effects, undoing any that run out
pub fn tick_effect_timers(state: &mut GameState) {
    if state.effects.enlarge_ticks > 0 {
        state.effects.enlarge_ticks -= 1;
        if state.effects.enlarge_ticks == 0 {
            expire(state, PowerUpKind::EnlargePaddle);
        }
    }

    if state.effects.slow_ticks > 0 {
        state.effects.slow_ticks -= 1;
        if state.effects.slow_ticks == 0 {
            expire(state, PowerUpKind::SlowBall);
        }
    }
}

fn expire(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::EnlargePaddle => state.paddle.reset_width(),
        PowerUpKind::SlowBall => {
            // Back to the level's canonical speed, however many slows stacked
            let base = state.base_ball_speed();
            for ball in state.balls.iter_mut() {
                ball.set_speed(base);
            }
        }
        PowerUpKind::ExtraBall => return,
    }
    log::debug!("Power-up expired: {:?}", kind);
    state.events.push(GameEvent::PowerUpExpired(kind));
}
