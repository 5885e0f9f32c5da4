//! HUD and overlay queries
//!
//! Read-only snapshots of the session for an external renderer. Nothing here
//! mutates simulation state.

use crate::config::Rgb;
use crate::consts::TICKS_PER_SECOND;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, PowerUpKind, Rect};

/// Full-screen message drawn over the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Paused,
    LevelComplete,
    GameOver,
    GameWon,
}

impl Overlay {
    pub fn for_phase(phase: GamePhase) -> Option<Self> {
        match phase {
            GamePhase::Playing => None,
            GamePhase::Paused => Some(Overlay::Paused),
            GamePhase::LevelComplete => Some(Overlay::LevelComplete),
            GamePhase::GameOver => Some(Overlay::GameOver),
            GamePhase::GameWon => Some(Overlay::GameWon),
        }
    }

    /// Headline text
    pub fn message(&self) -> &'static str {
        match self {
            Overlay::Paused => "GAME PAUSED",
            Overlay::LevelComplete => "Level Complete! Press N for next level",
            Overlay::GameOver => "Game Over! Press R to restart",
            Overlay::GameWon => "You Win! Press R to restart",
        }
    }

    /// Secondary lines under the headline
    pub fn details(&self, high_score: u64) -> Vec<String> {
        match self {
            Overlay::Paused => vec![
                "Press P to resume".to_string(),
                "Arrow keys to move paddle".to_string(),
            ],
            Overlay::GameOver | Overlay::GameWon => vec![format!("High Score: {}", high_score)],
            Overlay::LevelComplete => Vec::new(),
        }
    }
}

/// A timed power-up still running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUpTimer {
    pub kind: PowerUpKind,
    /// Whole seconds left (rounded down)
    pub seconds_left: u32,
}

impl PowerUpTimer {
    pub fn label(&self) -> String {
        format!("{}: {}s", self.kind.label(), self.seconds_left)
    }
}

/// A falling power-up as drawn: colored square with a letter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUpSprite {
    pub rect: Rect,
    pub color: Rgb,
    pub symbol: char,
}

/// Sprites for every power-up still falling
pub fn power_up_sprites(state: &GameState) -> Vec<PowerUpSprite> {
    state
        .power_ups
        .iter()
        .map(|p| PowerUpSprite {
            rect: p.rect(),
            color: p.kind.color(),
            symbol: p.kind.symbol(),
        })
        .collect()
}

/// Everything the HUD shows for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudSnapshot {
    pub score: u64,
    /// 1-based level number
    pub level: u32,
    pub high_score: u64,
    pub power_ups: Vec<PowerUpTimer>,
    pub overlay: Option<Overlay>,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        let power_ups = PowerUpKind::ALL
            .iter()
            .filter(|kind| kind.is_timed())
            .filter_map(|&kind| {
                let ticks = state.effects.remaining(kind);
                (ticks > 0).then_some(PowerUpTimer {
                    kind,
                    seconds_left: ticks / TICKS_PER_SECOND,
                })
            })
            .collect();

        Self {
            score: state.score,
            level: state.level_index + 1,
            high_score: state.high_score,
            power_ups,
            overlay: Overlay::for_phase(state.phase),
        }
    }

    /// Drop the power-up timers when the player turned them off
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        if !settings.show_power_up_timers {
            self.power_ups.clear();
        }
        self
    }

    /// One-line summary, used for logging headless runs
    pub fn status_line(&self) -> String {
        let mut line = format!(
            "Score: {}  Level: {}  High Score: {}",
            self.score, self.level, self.high_score
        );
        for timer in &self.power_ups {
            line.push_str("  ");
            line.push_str(&timer.label());
        }
        if let Some(overlay) = self.overlay {
            line.push_str("  [");
            line.push_str(overlay.message());
            line.push(']');
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{PowerUp, apply_power_up};

    #[test]
    fn test_fresh_game_snapshot() {
        let state = GameState::with_seed(1);
        let hud = HudSnapshot::from_state(&state);
        assert_eq!(hud.score, 0);
        assert_eq!(hud.level, 1);
        assert!(hud.power_ups.is_empty());
        assert_eq!(hud.overlay, None);
    }

    #[test]
    fn test_timers_in_whole_seconds() {
        let mut state = GameState::with_seed(2);
        apply_power_up(&mut state, PowerUpKind::SlowBall);
        state.effects.slow_ticks = 599;
        apply_power_up(&mut state, PowerUpKind::EnlargePaddle);
        let hud = HudSnapshot::from_state(&state);
        assert_eq!(
            hud.power_ups,
            vec![
                PowerUpTimer {
                    kind: PowerUpKind::EnlargePaddle,
                    seconds_left: 10
                },
                PowerUpTimer {
                    kind: PowerUpKind::SlowBall,
                    seconds_left: 9
                },
            ]
        );
        assert!(hud.status_line().contains("Slow Ball: 9s"));

        let hidden = Settings {
            show_power_up_timers: false,
            ..Default::default()
        };
        assert!(hud.with_settings(&hidden).power_ups.is_empty());
    }

    #[test]
    fn test_power_up_sprites() {
        let mut state = GameState::with_seed(4);
        let brick = state.bricks[0].rect;
        state
            .power_ups
            .push(PowerUp::from_brick(&brick, PowerUpKind::ExtraBall, &state.config));
        let sprites = power_up_sprites(&state);
        assert_eq!(sprites.len(), 1);
        assert_eq!(sprites[0].symbol, PowerUpKind::ExtraBall.symbol());
        assert_eq!(sprites[0].color, PowerUpKind::ExtraBall.color());
    }

    #[test]
    fn test_overlay_follows_phase() {
        let mut state = GameState::with_seed(3);
        state.phase = GamePhase::GameOver;
        state.high_score = 77;
        let hud = HudSnapshot::from_state(&state);
        assert_eq!(hud.overlay, Some(Overlay::GameOver));
        assert_eq!(Overlay::GameOver.details(hud.high_score), vec!["High Score: 77"]);
        assert!(hud.status_line().ends_with("[Game Over! Press R to restart]"));
    }
}
