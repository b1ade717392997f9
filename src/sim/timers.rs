//! Cancellable animation timers
//!
//! Jump and shift animations run on their own 10 ms clock, independent of
//! the 60 Hz main tick. Each running animation is a small state object owned
//! by the session's [`Timers`] set and identified by a [`TimerHandle`].
//!
//! Handles carry the session generation they were issued in. A handle from an
//! earlier session never matches anything in a later one, so cancelling it is
//! a no-op.

use super::entity::{Asteroid, Astronaut, EntityId};
use crate::config::GameConfig;

/// Identifies one running animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    generation: u32,
    id: u32,
}

impl TimerHandle {
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Whether an animation wants more steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    Running,
    Finished,
}

/// Astronaut jump: constant upward kick, gravity only above the ceiling line
///
/// There is no apex detection. The jump runs until it is replaced by the next
/// jump or cancelled at game over.
#[derive(Debug, Clone)]
pub struct JumpAnimation {
    pub vel: f32,
}

impl JumpAnimation {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            vel: config.jump_start_vel,
        }
    }

    pub fn step(&mut self, astronaut: &mut Astronaut, config: &GameConfig) -> TimerStatus {
        astronaut.pos.y += self.vel;
        if astronaut.pos.y < config.jump_accel_ceiling {
            self.vel += config.jump_accel;
        }
        TimerStatus::Running
    }
}

/// Decelerating ease of one asteroid's drawn position after a collision shift
#[derive(Debug, Clone)]
pub struct ShiftAnimation {
    pub target: EntityId,
    pub vel: f32,
}

impl ShiftAnimation {
    pub fn new(target: EntityId, config: &GameConfig) -> Self {
        Self {
            target,
            vel: config.shift_start_vel,
        }
    }

    pub fn step(&mut self, asteroids: &mut [Asteroid], config: &GameConfig) -> TimerStatus {
        let Some(asteroid) = asteroids.iter_mut().find(|a| a.id == self.target) else {
            // Target despawned or was hit
            return TimerStatus::Finished;
        };

        asteroid.ease_shift(self.vel);
        self.vel -= config.shift_decel;
        if self.vel <= 0.0 {
            TimerStatus::Finished
        } else {
            TimerStatus::Running
        }
    }
}

/// A running animation
#[derive(Debug, Clone)]
pub enum Animation {
    Jump(JumpAnimation),
    Shift(ShiftAnimation),
}

/// The set of animations owned by one session
#[derive(Debug, Clone)]
pub struct Timers {
    generation: u32,
    next_id: u32,
    active: Vec<(TimerHandle, Animation)>,
}

impl Timers {
    pub fn new(generation: u32) -> Self {
        Self {
            generation,
            next_id: 1,
            active: Vec::new(),
        }
    }

    /// Start an animation; it first runs on the next timer step
    pub fn start(&mut self, animation: Animation) -> TimerHandle {
        let handle = TimerHandle {
            generation: self.generation,
            id: self.next_id,
        };
        self.next_id += 1;
        self.active.push((handle, animation));
        handle
    }

    /// Stop an animation. Returns false if it was not running.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.active.len();
        self.active.retain(|(h, _)| *h != handle);
        self.active.len() != before
    }

    /// Stop every animation
    pub fn cancel_all(&mut self) {
        if !self.active.is_empty() {
            log::debug!("Cancelling {} timers", self.active.len());
        }
        self.active.clear();
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.active.iter().any(|(h, _)| *h == handle)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Number of running shift animations
    pub fn shift_count(&self) -> usize {
        self.active
            .iter()
            .filter(|(_, a)| matches!(a, Animation::Shift(_)))
            .count()
    }

    /// Advance every animation by one timer interval, dropping finished ones
    pub fn step(
        &mut self,
        astronaut: &mut Astronaut,
        asteroids: &mut [Asteroid],
        config: &GameConfig,
    ) {
        self.active.retain_mut(|(_, animation)| {
            let status = match animation {
                Animation::Jump(jump) => jump.step(astronaut, config),
                Animation::Shift(shift) => shift.step(asteroids, config),
            };
            status == TimerStatus::Running
        });
    }
}
