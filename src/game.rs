//! Game driver
//!
//! Owns the session together with its external collaborators (high score
//! storage and audio) and runs the fixed-timestep loop. After every tick the
//! driver drains the session's events and turns them into side effects.

use crate::audio::{AudioManager, SoundEffect};
use crate::config::GameConfig;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::highscores::{HighScoreStore, load_or_default, save_best_effort};
use crate::hud::HudSnapshot;
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// Game instance holding all state
pub struct Game {
    pub state: GameState,
    /// Input applied on the next tick; one-shot commands clear after use
    pub input: TickInput,
    store: Box<dyn HighScoreStore>,
    audio: AudioManager,
    accumulator: f32,
}

impl Game {
    pub fn new(
        config: GameConfig,
        seed: u64,
        store: Box<dyn HighScoreStore>,
        audio: AudioManager,
    ) -> Self {
        let high_score = load_or_default(store.as_ref());
        log::info!("Started new game with seed: {}", seed);
        Self {
            state: GameState::new(config, seed, high_score),
            input: TickInput::default(),
            store,
            audio,
            accumulator: 0.0,
        }
    }

    pub fn store(&self) -> &dyn HighScoreStore {
        self.store.as_ref()
    }

    /// Run exactly one tick with the given input
    pub fn step(&mut self, input: &TickInput) {
        tick(&mut self.state, input);
        self.handle_events();
    }

    /// Feed real elapsed time; runs as many fixed ticks as fit
    ///
    /// Returns the number of ticks run.
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, 0.1)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.clone();
            self.step(&input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.pause = false;
            self.input.restart = false;
            self.input.next_level = false;
        }
        substeps
    }

    /// Persist any pending high score before shutting down
    pub fn quit(&mut self) {
        self.state.record_high_score();
        self.handle_events();
        log::info!("Quit with score {}", self.state.score);
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot::from_state(&self.state)
    }

    fn handle_events(&mut self) {
        for event in self.state.drain_events() {
            if let Some(effect) = SoundEffect::for_event(&event) {
                self.audio.play(effect);
            }
            if let GameEvent::NewHighScore(score) = event {
                save_best_effort(self.store.as_mut(), score);
            }
        }
    }
}
