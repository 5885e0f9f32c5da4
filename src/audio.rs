//! Sound effect dispatch
//!
//! The simulation never touches audio. The driver maps [`GameEvent`]s to
//! [`SoundEffect`]s and hands them to whatever [`SoundBackend`] the platform
//! provides. Without a backend every effect is a silent no-op.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle or brick
    Bounce,
    /// Power-up caught
    PowerUp,
    /// Level cleared
    LevelComplete,
    /// Last ball lost
    GameOver,
    /// Final level cleared
    Victory,
}

impl SoundEffect {
    /// Effect for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PaddleBounce | GameEvent::BrickHit { .. } => Some(SoundEffect::Bounce),
            GameEvent::PowerUpCollected(_) => Some(SoundEffect::PowerUp),
            GameEvent::LevelComplete { .. } => Some(SoundEffect::LevelComplete),
            GameEvent::GameOver => Some(SoundEffect::GameOver),
            GameEvent::GameWon => Some(SoundEffect::Victory),
            _ => None,
        }
    }
}

/// Platform audio output
pub trait SoundBackend {
    /// Play an effect at `volume` in [0, 1]
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn SoundBackend>>,
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(None, &Settings::default())
    }
}

impl AudioManager {
    pub fn new(backend: Option<Box<dyn SoundBackend>>, settings: &Settings) -> Self {
        if backend.is_none() {
            log::warn!("No sound backend available - audio disabled");
        }
        Self {
            backend,
            volume: settings.effective_sfx_volume(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some() && self.volume > 0.0
    }

    /// Re-read volume and mute from settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_sfx_volume();
    }

    pub fn play(&mut self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }
        if let Some(backend) = self.backend.as_mut() {
            backend.play(effect, self.volume);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Backend that records what it was asked to play
    #[derive(Clone, Default)]
    pub(crate) struct RecordingBackend {
        pub played: Rc<RefCell<Vec<(SoundEffect, f32)>>>,
    }

    impl SoundBackend for RecordingBackend {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.played.borrow_mut().push((effect, volume));
        }
    }

    #[test]
    fn test_collisions_map_to_bounce() {
        assert_eq!(SoundEffect::for_event(&GameEvent::PaddleBounce), Some(SoundEffect::Bounce));
        assert_eq!(
            SoundEffect::for_event(&GameEvent::BrickHit { destroyed: true }),
            Some(SoundEffect::Bounce)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::BallLost), None);
    }

    #[test]
    fn test_plays_through_backend_at_settings_volume() {
        let backend = RecordingBackend::default();
        let played = backend.played.clone();
        let mut audio = AudioManager::new(Some(Box::new(backend)), &Settings::default());
        audio.play(SoundEffect::Bounce);
        assert_eq!(played.borrow().len(), 1);
        assert_eq!(played.borrow()[0].0, SoundEffect::Bounce);
        assert!((played.borrow()[0].1 - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_muted_and_missing_backend_are_silent() {
        let backend = RecordingBackend::default();
        let played = backend.played.clone();
        let muted = Settings {
            muted: true,
            ..Default::default()
        };
        let mut audio = AudioManager::new(Some(Box::new(backend)), &muted);
        audio.play(SoundEffect::Bounce);
        assert!(played.borrow().is_empty());
        assert!(!audio.is_enabled());

        let mut silent = AudioManager::default();
        silent.play(SoundEffect::Bounce);
        assert!(!silent.is_enabled());
    }

    #[test]
    fn test_unmute_via_settings() {
        let backend = RecordingBackend::default();
        let played = backend.played.clone();
        let mut settings = Settings {
            muted: true,
            ..Default::default()
        };
        let mut audio = AudioManager::new(Some(Box::new(backend)), &settings);
        settings.muted = false;
        audio.apply_settings(&settings);
        assert!(audio.is_enabled());
        audio.play(SoundEffect::Victory);
        assert_eq!(played.borrow().len(), 1);
    }
}
