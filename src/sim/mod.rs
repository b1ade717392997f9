//! Simulation module
//!
//! All gameplay logic lives here. This module never draws and never touches
//! the platform:
//! - Main tick at a fixed rate, animation timers on their own fixed interval
//! - Seeded RNG only
//! - Stable iteration order (pool order = spawn order)
//! - Output goes through [`DisplayAdapter`] and the [`GameEvent`] queue

pub mod collision;
pub mod display;
pub mod entity;
pub mod game;
pub mod palette;
pub mod state;
pub mod tick;
pub mod timers;

pub use collision::{boxes_overlap, is_collided_with};
pub use display::{DisplayAdapter, SceneNode};
pub use entity::{Asteroid, Astronaut, EntityId, EntityKind, Movable};
pub use game::Game;
pub use palette::{random_color, random_explosion_color};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, step_timers, sync_display, tick};
pub use timers::{TimerHandle, TimerStatus, Timers};
