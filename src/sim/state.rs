//! Game state and core simulation types
//!
//! One [`GameState`] is one session: created at start or restart, mutated by
//! the tick and the animation timers, discarded on the next restart. Only the
//! high score is carried into the next session.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::display::{DisplayAdapter, SceneNode};
use super::entity::{Asteroid, Astronaut, EntityId};
use super::palette::random_color;
use super::timers::{Animation, JumpAnimation, ShiftAnimation, TimerHandle, Timers};
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Events raised for the UI shell, drained once per frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Score text needs redrawing (in a fresh random color)
    ScoreChanged { score: u64, color: &'static str },
    /// Fire-and-forget particle burst at the astronaut
    Explosion { pos: Vec2 },
    /// Run ended; show the end-of-game modal
    GameOver { final_score: u64, high_score: u64 },
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session counter, stamped into every timer handle
    pub generation: u32,
    /// Seed the session RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    /// Points awarded by the next collision
    pub hit_value: u64,
    /// Asteroids hit this session
    pub collisions: u32,
    /// Best score seen in this process
    pub high_score: u64,
    /// Row where the next asteroid spawns
    pub spawn_row: f32,
    /// Main ticks run this session
    pub time_ticks: u64,
    pub astronaut: Astronaut,
    /// Live obstacles in spawn order
    pub asteroids: Vec<Asteroid>,
    pub timers: Timers,
    /// The in-flight jump, if any
    pub jump: Option<TimerHandle>,
    /// Primary action still allowed to start the first jump
    pub jump_armed: bool,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Set up a fresh session and register its entities with the display
    pub fn new(
        config: &GameConfig,
        seed: u64,
        generation: u32,
        high_score: u64,
        display: &mut dyn DisplayAdapter,
    ) -> Self {
        let (start_x, start_y) = config.astronaut_start;
        let mut state = Self {
            generation,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            score: 0,
            hit_value: config.first_hit_score,
            collisions: 0,
            high_score,
            spawn_row: config.spawn_row_start,
            time_ticks: 0,
            astronaut: Astronaut::new(0, Vec2::new(start_x, start_y), config.entity_size),
            asteroids: Vec::with_capacity(config.refill_below),
            timers: Timers::new(generation),
            jump: None,
            jump_armed: true,
            events: Vec::new(),
            next_id: 1,
        };
        state.astronaut.id = state.next_entity_id();

        display.clear();
        display.add_entity(SceneNode::from_entity(&state.astronaut));
        for _ in 0..config.initial_asteroids {
            state.spawn_asteroid(config, display);
        }

        let color = random_color(&mut state.rng);
        state.events.push(GameEvent::ScoreChanged { score: 0, color });

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Row spacing for the next spawn: base step plus up to half the jitter
    fn spawn_step(&mut self, config: &GameConfig) -> f32 {
        let mut deviation: f32 = self.rng.random();
        if deviation > 0.5 {
            deviation -= 0.5;
        }
        (config.spawn_step + config.spawn_jitter * deviation).floor()
    }

    /// Spawn one asteroid at the next row, at a random column inside the margins
    pub fn spawn_asteroid(&mut self, config: &GameConfig, display: &mut dyn DisplayAdapter) -> EntityId {
        self.spawn_row -= self.spawn_step(config);

        let span = config.width - 2.0 * config.spawn_margin;
        let x = (self.rng.random::<f32>() * span + config.spawn_margin).floor();
        let color = random_color(&mut self.rng);

        let id = self.next_entity_id();
        let asteroid = Asteroid::new(id, Vec2::new(x, self.spawn_row), config.entity_size, color);
        display.add_entity(SceneNode::from_entity(&asteroid));
        self.asteroids.push(asteroid);
        id
    }

    /// Remove an asteroid from the pool and the display
    ///
    /// Unknown ids are a no-op and return `None`.
    pub fn remove_asteroid(&mut self, id: EntityId, display: &mut dyn DisplayAdapter) -> Option<Asteroid> {
        let index = self.asteroids.iter().position(|a| a.id == id)?;
        display.remove_entity(id);
        Some(self.asteroids.remove(index))
    }

    /// Cancel any in-flight jump and start a new one
    pub fn start_jump(&mut self, config: &GameConfig) {
        if let Some(previous) = self.jump.take() {
            self.timers.cancel(previous);
        }
        let handle = self
            .timers
            .start(Animation::Jump(JumpAnimation::new(config)));
        self.jump = Some(handle);
    }

    /// Drop every asteroid by the shift distance and open up the spawn cursor
    ///
    /// Positions move immediately; a shift animation eases each drawn
    /// position down after them.
    pub fn shift_asteroids(&mut self, config: &GameConfig) {
        for asteroid in &mut self.asteroids {
            asteroid.shift_down(config.shift_distance);
            self.timers
                .start(Animation::Shift(ShiftAnimation::new(asteroid.id, config)));
        }
        self.spawn_row += config.shift_distance;
    }

    /// Resolve a hit against one asteroid
    pub fn handle_collision(&mut self, id: EntityId, config: &GameConfig, display: &mut dyn DisplayAdapter) {
        if self.remove_asteroid(id, display).is_none() {
            return;
        }

        self.score += self.hit_value;
        self.hit_value += config.hit_score_step;
        self.collisions += 1;
        log::debug!(
            "Hit asteroid {} (collision {}), score {}",
            id,
            self.collisions,
            self.score
        );

        let color = random_color(&mut self.rng);
        self.events.push(GameEvent::ScoreChanged {
            score: self.score,
            color,
        });
        self.events.push(GameEvent::Explosion {
            pos: self.astronaut.pos,
        });

        self.shift_asteroids(config);
        self.start_jump(config);
    }

    /// Take all pending UI events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
