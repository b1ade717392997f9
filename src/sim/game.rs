//! Game controller
//!
//! [`Game`] owns the configuration, the player's settings, the leaderboard
//! and the current session. It turns wall-clock frame deltas into a stream of
//! 60 Hz main ticks interleaved with 10 ms animation timer steps, each run in
//! order of when it falls due.

use super::display::DisplayAdapter;
use super::state::{GameEvent, GamePhase, GameState};
use super::tick::{TickInput, step_timers, sync_display, tick};
use crate::config::GameConfig;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};
use crate::error::GameError;
use crate::highscores::{HighScoreEntry, HighScores};
use crate::settings::{Difficulty, Settings};

/// Controller for one player across any number of sessions
pub struct Game {
    config: GameConfig,
    settings: Settings,
    high_scores: HighScores,
    state: GameState,
    /// Follow divisor for this session; back to Normal on every restart
    difficulty: Difficulty,
    /// Last pointer x seen, persists between frames
    pointer_x: Option<f32>,
    /// Click waiting for the next main tick
    pending_action: bool,
    /// Session clock (seconds since the session started)
    clock: f64,
    next_tick_at: f64,
    next_timer_at: f64,
}

impl Game {
    /// Validate the config and start the first session
    pub fn new(
        config: GameConfig,
        settings: Settings,
        seed: u64,
        display: &mut dyn DisplayAdapter,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let state = GameState::new(&config, seed, 1, 0, display);
        log::info!("Session 1 started with seed {}", seed);

        let mut game = Self {
            config,
            difficulty: settings.difficulty(),
            settings,
            high_scores: HighScores::new(),
            state,
            pointer_x: None,
            pending_action: false,
            clock: 0.0,
            next_tick_at: 0.0,
            next_timer_at: 0.0,
        };
        game.reset_clock();
        Ok(game)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn high_score(&self) -> u64 {
        self.state.high_score
    }

    /// Easy-mode checkbox changed; applies until the next restart
    pub fn set_easy_mode(&mut self, easy: bool) {
        self.settings.set_easy_mode(easy);
        self.difficulty = self.settings.difficulty();
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Pointer moved (play-field coordinates)
    pub fn pointer_moved(&mut self, x: f32) {
        self.pointer_x = Some(x);
    }

    /// Click or tap on the play field
    pub fn primary_action(&mut self) {
        self.pending_action = true;
    }

    /// Input for the next main tick
    fn tick_input(&self) -> TickInput {
        TickInput {
            pointer_x: self.pointer_x,
            primary_action: self.pending_action,
            difficulty: self.difficulty(),
        }
    }

    /// Run one main tick now
    pub fn tick_once(&mut self, display: &mut dyn DisplayAdapter) {
        let input = self.tick_input();
        let was_playing = self.state.phase == GamePhase::Playing;

        tick(&mut self.state, &input, &self.config, display);
        self.pending_action = false;

        if was_playing && self.state.phase == GamePhase::GameOver {
            self.record_run();
        }
    }

    /// Run one animation timer step now
    pub fn step_timers_once(&mut self) {
        step_timers(&mut self.state, &self.config);
    }

    /// Advance both clocks by a frame delta and flush the display
    ///
    /// Returns the number of main ticks run.
    pub fn advance(&mut self, dt: f32, display: &mut dyn DisplayAdapter) -> u32 {
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        let target = self.clock + dt as f64;
        let sim_dt = self.config.sim_dt() as f64;
        let timer_dt = self.config.timer_interval as f64;
        let mut ticks = 0;

        for _ in 0..MAX_SUBSTEPS {
            let due = self.next_tick_at.min(self.next_timer_at);
            if due > target {
                break;
            }
            if self.next_timer_at <= self.next_tick_at {
                self.step_timers_once();
                self.next_timer_at += timer_dt;
            } else {
                self.tick_once(display);
                self.next_tick_at += sim_dt;
                ticks += 1;
            }
        }
        // Backlog left by the cap resumes from now instead of piling up
        self.clock = target;
        self.next_tick_at = self.next_tick_at.max(target);
        self.next_timer_at = self.next_timer_at.max(target);

        sync_display(&self.state, display);
        display.update();
        ticks
    }

    /// Take all UI events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Start a new session after game over
    ///
    /// Rejected while a run is still in progress.
    pub fn restart(&mut self, seed: u64, display: &mut dyn DisplayAdapter) -> Result<(), GameError> {
        if self.state.phase == GamePhase::Playing {
            log::warn!("Ignoring restart while playing");
            return Err(GameError::RestartWhilePlaying {
                phase: self.state.phase,
            });
        }
        self.force_restart(seed, display);
        Ok(())
    }

    /// Start a new session regardless of phase
    pub fn force_restart(&mut self, seed: u64, display: &mut dyn DisplayAdapter) {
        // Every timer of the old session goes before the new one exists
        self.state.timers.cancel_all();

        let generation = self.state.generation + 1;
        let high_score = self.state.high_score;
        self.state = GameState::new(&self.config, seed, generation, high_score, display);
        self.pending_action = false;
        self.reset_clock();

        // The checkbox has to be toggled again to get easy mode back
        if self.difficulty != Difficulty::Normal {
            log::info!("Difficulty reset to {}", Difficulty::Normal.as_str());
            self.difficulty = Difficulty::Normal;
        }

        log::info!("Session {} started with seed {}", generation, seed);
    }

    fn reset_clock(&mut self) {
        self.clock = 0.0;
        // First tick and first timer step fall one interval in
        self.next_tick_at = self.config.sim_dt() as f64;
        self.next_timer_at = self.config.timer_interval as f64;
    }

    fn record_run(&mut self) {
        self.high_scores.record(HighScoreEntry {
            score: self.state.score,
            collisions: self.state.collisions,
            ticks: self.state.time_ticks,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::SceneGraph;

    fn new_game(seed: u64) -> (Game, SceneGraph) {
        let mut scene = SceneGraph::new();
        let game = Game::new(GameConfig::default(), Settings::default(), seed, &mut scene).unwrap();
        (game, scene)
    }

    /// Drop the astronaut past the floor and let one tick notice
    fn force_game_over(game: &mut Game, scene: &mut SceneGraph) {
        game.state.astronaut.pos.y = 551.0;
        game.tick_once(scene);
        assert_eq!(game.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut scene = SceneGraph::new();
        let config = GameConfig {
            fps: 0,
            ..Default::default()
        };
        assert!(Game::new(config, Settings::default(), 1, &mut scene).is_err());
    }

    #[test]
    fn test_advance_runs_both_clocks() {
        let (mut game, mut scene) = new_game(1);
        game.primary_action();

        // One second: 60 ticks and 100 timer steps, fed in 50 ms frames
        let mut ticks = 0;
        for _ in 0..20 {
            ticks += game.advance(0.05, &mut scene);
        }
        assert!((59..=61).contains(&ticks), "ticks {ticks}");
        assert!(game.state().time_ticks as u32 <= ticks);
        assert!(!game.state().jump_armed);
        // The jump has been running for ~100 steps; the astronaut left the ground
        assert!(game.state().astronaut.pos.y < 510.0 || game.phase() == GamePhase::GameOver);
        assert_eq!(scene.flushes(), 20);
    }

    #[test]
    fn test_advance_clamps_long_frames() {
        let (mut game, mut scene) = new_game(2);
        let ticks = game.advance(5.0, &mut scene);
        assert!(ticks <= 6);
        assert_eq!(game.advance(f32::NAN, &mut scene), 0);
    }

    #[test]
    fn test_restart_while_playing_rejected() {
        let (mut game, mut scene) = new_game(3);
        game.state.score = 70;
        let result = game.restart(99, &mut scene);
        assert!(matches!(result, Err(GameError::RestartWhilePlaying { .. })));
        assert_eq!(game.state().score, 70);
        assert_eq!(game.state().generation, 1);
    }

    #[test]
    fn test_restart_after_game_over() {
        let (mut game, mut scene) = new_game(4);
        game.state.score = 150;
        game.state.collisions = 5;
        force_game_over(&mut game, &mut scene);
        assert_eq!(game.high_score(), 150);
        assert_eq!(game.high_scores().best(), 150);

        game.restart(5, &mut scene).unwrap();
        let state = game.state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.hit_value, 10);
        assert_eq!(state.asteroids.len(), 6);
        assert_eq!(state.generation, 2);
        assert!(state.jump_armed);
        assert_eq!(game.high_score(), 150);
        assert_eq!(scene.len(), 7);

        // Lower score next run keeps the old best
        game.state.score = 20;
        force_game_over(&mut game, &mut scene);
        assert_eq!(game.high_score(), 150);
        assert_eq!(game.high_scores().entries.len(), 2);
    }

    #[test]
    fn test_old_timers_never_fire_after_restart() {
        let (mut game, mut scene) = new_game(6);
        game.state.start_jump(&game.config);
        let old_jump = game.state.jump.unwrap();
        game.force_restart(7, &mut scene);

        assert!(!game.state().timers.is_active(old_jump));
        let y = game.state().astronaut.pos.y;
        for _ in 0..10 {
            game.step_timers_once();
        }
        assert_eq!(game.state().astronaut.pos.y, y);
    }

    #[test]
    fn test_restart_resets_difficulty_until_toggled() {
        let (mut game, mut scene) = new_game(8);
        game.set_easy_mode(true);
        assert_eq!(game.difficulty(), Difficulty::Easy);
        force_game_over(&mut game, &mut scene);
        game.restart(9, &mut scene).unwrap();
        assert_eq!(game.difficulty(), Difficulty::Normal);

        // Normal divisor: 380 + (124 - 380 - 24) / 8
        game.pointer_moved(124.0);
        game.tick_once(&mut scene);
        assert_eq!(game.state().astronaut.pos.x, 345.0);

        game.set_easy_mode(true);
        assert_eq!(game.difficulty(), Difficulty::Easy);
        game.tick_once(&mut scene);
        assert_eq!(game.state().astronaut.pos.x, 100.0);
    }

    #[test]
    fn test_game_over_event_carries_high_score() {
        let (mut game, mut scene) = new_game(10);
        game.drain_events();
        game.state.score = 40;
        force_game_over(&mut game, &mut scene);
        let events = game.drain_events();
        assert_eq!(
            events,
            vec![GameEvent::GameOver {
                final_score: 40,
                high_score: 40,
            }]
        );
    }
}
