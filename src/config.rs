//! Immutable game configuration record.
//!
//! [`GameConfig`] mirrors every constant in [`crate::consts`] and is handed to
//! the controller at construction. It can be parsed from JSON; missing keys
//! fall back to the compile-time defaults, so a minimal document can override
//! just the values you care about.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Game dimensions, rates and gameplay tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Field ────────────────────────────────────────────────────────────────
    pub width: f32,
    pub height: f32,
    pub background_color: String,

    // ── Clocks ───────────────────────────────────────────────────────────────
    pub fps: u32,
    /// Animation timer interval in seconds
    pub timer_interval: f32,

    // ── Entities ─────────────────────────────────────────────────────────────
    pub entity_size: f32,
    pub astronaut_start: (f32, f32),
    pub pointer_offset: f32,

    // ── Obstacle pool ────────────────────────────────────────────────────────
    pub initial_asteroids: usize,
    pub refill_below: usize,
    pub despawn_y: f32,
    pub spawn_margin: f32,
    pub spawn_row_start: f32,
    pub spawn_step: f32,
    pub spawn_jitter: f32,

    // ── Physics ──────────────────────────────────────────────────────────────
    pub floor_y: f32,
    pub shift_distance: f32,
    pub shift_start_vel: f32,
    pub shift_decel: f32,
    pub jump_start_vel: f32,
    pub jump_accel: f32,
    pub jump_accel_ceiling: f32,

    // ── Scoring ──────────────────────────────────────────────────────────────
    pub first_hit_score: u64,
    pub hit_score_step: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            background_color: BACKGROUND_COLOR.to_string(),

            fps: FPS,
            timer_interval: TIMER_DT,

            entity_size: ENTITY_SIZE,
            astronaut_start: (ASTRONAUT_START_X, ASTRONAUT_START_Y),
            pointer_offset: POINTER_OFFSET,

            initial_asteroids: INITIAL_ASTEROIDS,
            refill_below: REFILL_BELOW,
            despawn_y: DESPAWN_Y,
            spawn_margin: SPAWN_MARGIN,
            spawn_row_start: SPAWN_ROW_START,
            spawn_step: SPAWN_STEP,
            spawn_jitter: SPAWN_JITTER,

            floor_y: FLOOR_Y,
            shift_distance: SHIFT_DISTANCE,
            shift_start_vel: SHIFT_START_VEL,
            shift_decel: SHIFT_DECEL,
            jump_start_vel: JUMP_START_VEL,
            jump_accel: JUMP_ACCEL,
            jump_accel_ceiling: JUMP_ACCEL_CEILING,

            first_hit_score: FIRST_HIT_SCORE,
            hit_score_step: HIT_SCORE_STEP,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config document
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Fixed main-tick timestep in seconds
    pub fn sim_dt(&self) -> f32 {
        1.0 / self.fps as f32
    }

    /// Background color as RGBA, falling back to black on a malformed value
    pub fn background_rgba(&self) -> [f32; 4] {
        crate::parse_hex_color(&self.background_color).unwrap_or([0.0, 0.0, 0.0, 1.0])
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |field, reason| Err(GameError::InvalidConfig { field, reason });

        if self.fps == 0 {
            return invalid("fps", "must be positive");
        }
        if !(self.timer_interval > 0.0) {
            return invalid("timer_interval", "must be positive");
        }
        if !(self.entity_size > 0.0) {
            return invalid("entity_size", "must be positive");
        }
        if self.width <= 2.0 * self.spawn_margin {
            return invalid("width", "must exceed twice the spawn margin");
        }
        if self.initial_asteroids == 0 {
            return invalid("initial_asteroids", "must be at least one");
        }
        if self.refill_below < self.initial_asteroids {
            return invalid("refill_below", "must not be below initial_asteroids");
        }
        if !(self.spawn_step > 0.0) || self.spawn_jitter < 0.0 {
            return invalid("spawn_step", "step must be positive and jitter non-negative");
        }
        if !(self.shift_start_vel > 0.0) {
            return invalid("shift_start_vel", "must be positive or asteroids stay drawn above their boxes");
        }
        if !(self.shift_decel > 0.0) {
            return invalid("shift_decel", "must be positive or the shift never ends");
        }
        if self.astronaut_start.1 > self.floor_y {
            return invalid("astronaut_start", "must start above the floor");
        }
        if crate::parse_hex_color(&self.background_color).is_none() {
            return invalid("background_color", "must be #rgb or #rrggbb");
        }
        Ok(())
    }
}
