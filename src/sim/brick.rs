//! Bricks, their hit/destruction animation and debris particles
//!
//! The animation is gameplay state: a destroyed brick stays in the session
//! until its shrink animation has finished and every particle has expired.
//! [`Brick::advance`] moves that state forward once per tick; [`Brick::visual`]
//! is a read-only query for whoever draws the brick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::Rgb;
use crate::consts::*;

/// Animation state of a brick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BrickState {
    /// Intact, resting
    Alive,
    /// Intact, flashing and shaking after a hit
    JustHit { frame: u32, jitter: Vec2 },
    /// Health reached zero; shrinking while debris flies
    Destroying { frame: u32 },
    /// Animation finished, ready to be dropped from the session
    Gone,
}

/// A single piece of debris
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Ticks left before the particle disappears
    pub lifetime: u32,
    /// Opacity in [0, 1]
    pub alpha: f32,
}

impl Particle {
    /// Move one tick. Returns false once expired.
    pub fn step(&mut self) -> bool {
        self.pos += self.vel;
        self.lifetime = self.lifetime.saturating_sub(1);
        self.alpha = self.lifetime as f32 / PARTICLE_FADE_TICKS;
        self.lifetime > 0
    }
}

/// Outcome of a ball hitting a brick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Lost one health point and survived
    Damaged,
    /// Health reached zero
    Destroyed,
}

/// What a renderer needs to draw a brick body this frame
#[derive(Debug, Clone, PartialEq)]
pub struct BrickVisual {
    pub rect: Rect,
    pub color: Rgb,
    /// Opacity in [0, 1]
    pub alpha: f32,
    /// Remaining health, shown for multi-hit bricks
    pub label: Option<u32>,
}

/// A brick entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub color: Rgb,
    pub health: u32,
    pub max_health: u32,
    pub state: BrickState,
    pub particles: Vec<Particle>,
}

impl Brick {
    pub fn new(rect: Rect, color: Rgb, health: u32) -> Self {
        Self {
            rect,
            color,
            health,
            max_health: health,
            state: BrickState::Alive,
            particles: Vec::new(),
        }
    }

    /// Balls only interact with bricks that still have health
    pub fn is_hittable(&self) -> bool {
        self.health > 0
    }

    /// Destroyed bricks count toward level completion even mid-animation
    pub fn counts_as_destroyed(&self) -> bool {
        self.health == 0
    }

    pub fn is_gone(&self) -> bool {
        self.state == BrickState::Gone
    }

    /// Apply one point of damage. Returns `None` for already-destroyed bricks.
    pub fn hit<R: Rng>(&mut self, rng: &mut R) -> Option<HitOutcome> {
        if !self.is_hittable() {
            return None;
        }
        self.health -= 1;
        if self.health == 0 {
            self.state = BrickState::Destroying { frame: 0 };
            self.spawn_particles(rng);
            Some(HitOutcome::Destroyed)
        } else {
            self.state = BrickState::JustHit {
                frame: 0,
                jitter: Vec2::ZERO,
            };
            Some(HitOutcome::Damaged)
        }
    }

    fn spawn_particles<R: Rng>(&mut self, rng: &mut R) {
        let count = rng.random_range(8..=12);
        self.particles = (0..count)
            .map(|_| Particle {
                pos: Vec2::new(
                    rng.random_range(self.rect.left()..=self.rect.right()),
                    rng.random_range(self.rect.top()..=self.rect.bottom()),
                ),
                vel: Vec2::new(rng.random_range(-3.0..=3.0), rng.random_range(-3.0..=3.0)),
                size: rng.random_range(2..=6) as f32,
                lifetime: rng.random_range(10..=20),
                alpha: 1.0,
            })
            .collect();
    }

    /// Advance the animation by one tick
    pub fn advance<R: Rng>(&mut self, rng: &mut R) {
        self.state = match self.state {
            BrickState::Alive => BrickState::Alive,
            BrickState::Gone => BrickState::Gone,
            BrickState::JustHit { frame, .. } => {
                let frame = frame + 1;
                if frame >= HIT_FLASH_FRAMES {
                    BrickState::Alive
                } else {
                    let jitter = if frame < HIT_SHAKE_FRAMES {
                        Vec2::new(
                            rng.random_range(-2..=2) as f32,
                            rng.random_range(-2..=2) as f32,
                        )
                    } else {
                        Vec2::ZERO
                    };
                    BrickState::JustHit { frame, jitter }
                }
            }
            BrickState::Destroying { frame } => {
                self.particles.retain_mut(Particle::step);
                let frame = frame + 1;
                if frame >= DESTROY_FRAMES && self.particles.is_empty() {
                    BrickState::Gone
                } else {
                    BrickState::Destroying { frame }
                }
            }
        };
    }

    /// Current draw state of the brick body (particles are drawn separately)
    pub fn visual(&self) -> BrickVisual {
        let label = (self.max_health > 1 && self.health > 0).then_some(self.health);
        match self.state {
            BrickState::Alive => {
                let factor = self.health as f32 / self.max_health.max(1) as f32;
                BrickVisual {
                    rect: self.rect,
                    color: self.color.map(|c| (c as f32 * factor + 100.0).min(255.0) as u8),
                    alpha: 1.0,
                    label,
                }
            }
            BrickState::JustHit { frame, jitter } => {
                let flash = 255.0 * (1.0 - frame as f32 / HIT_FLASH_FRAMES as f32);
                BrickVisual {
                    rect: self.rect.translated(jitter),
                    color: self.color.map(|c| (c as f32 + flash).min(255.0) as u8),
                    alpha: 1.0,
                    label,
                }
            }
            BrickState::Destroying { frame } => {
                let scale = (1.0 - frame as f32 / DESTROY_FRAMES as f32).max(0.0);
                BrickVisual {
                    rect: self.rect.scaled_about_center(scale),
                    color: self.color,
                    alpha: scale,
                    label: None,
                }
            }
            BrickState::Gone => BrickVisual {
                rect: self.rect.scaled_about_center(0.0),
                color: self.color,
                alpha: 0.0,
                label: None,
            },
        }
    }
}
