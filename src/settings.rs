//! Game settings and preferences
//!
//! Held for the lifetime of the process and carried across restarts. Never
//! written to storage.

use serde::{Deserialize, Serialize};

use crate::consts::{DIFFICULTY_EASY, DIFFICULTY_NORMAL};
use crate::error::GameError;

/// How quickly the astronaut converges on the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    /// Astronaut snaps to the pointer every tick
    Easy,
    #[default]
    Normal,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
        }
    }

    /// Map the easy-mode checkbox to a difficulty
    pub fn from_easy_mode(easy: bool) -> Self {
        if easy { Difficulty::Easy } else { Difficulty::Normal }
    }

    /// Divisor applied to the horizontal follow step
    pub fn divisor(&self) -> f32 {
        match self {
            Difficulty::Easy => DIFFICULTY_EASY,
            Difficulty::Normal => DIFFICULTY_NORMAL,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Easy mode checkbox
    pub easy_mode: bool,

    // === Visual Effects ===
    /// Spawn the particle burst on each collision
    pub explosions: bool,
    /// Particles per explosion burst
    pub explosion_particles: u32,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            easy_mode: false,

            explosions: true,
            explosion_particles: 20,

            show_fps: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON (missing keys use defaults)
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize settings to JSON
    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Current difficulty derived from the easy-mode toggle
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_easy_mode(self.easy_mode)
    }

    /// Toggle easy mode, logging the change
    pub fn set_easy_mode(&mut self, easy: bool) {
        if self.easy_mode != easy {
            log::info!("Difficulty set to {}", Difficulty::from_easy_mode(easy).as_str());
        }
        self.easy_mode = easy;
    }

    /// Effective particle count per explosion
    pub fn particles_per_explosion(&self) -> u32 {
        if !self.explosions {
            0
        } else {
            self.explosion_particles
        }
    }
}
