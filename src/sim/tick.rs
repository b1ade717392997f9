//! Fixed timestep simulation tick
//!
//! The main tick owns the discrete game logic (follow, collisions, spawning,
//! cleanup, game over). Continuous motion belongs to the animation timers,
//! advanced separately by [`step_timers`].

use super::collision::is_collided_with;
use super::display::DisplayAdapter;
use super::entity::{EntityId, Movable};
use super::state::{GameEvent, GamePhase, GameState};
use crate::config::GameConfig;
use crate::settings::Difficulty;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer x in play-field coordinates (None until the pointer is seen)
    pub pointer_x: Option<f32>,
    /// Click/tap; starts the first jump while armed
    pub primary_action: bool,
    /// Follow responsiveness, read every tick
    pub difficulty: Difficulty,
}

/// Advance the game state by one main tick
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    config: &GameConfig,
    display: &mut dyn DisplayAdapter,
) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    // First click of the session kicks off the first jump
    if input.primary_action && state.jump_armed {
        state.jump_armed = false;
        state.start_jump(config);
        log::debug!("First jump at tick {}", state.time_ticks);
    }

    // Horizontal follow
    if let Some(pointer_x) = input.pointer_x {
        state
            .astronaut
            .follow_pointer(pointer_x, config.pointer_offset, input.difficulty.divisor());
    }

    check_collisions(state, config, display);
    fill_asteroids(state, config, display);
    clean_up_asteroids(state, config, display);
    check_game_over(state, config);
}

/// Resolve every asteroid overlapping the astronaut this tick
///
/// Overlaps are gathered before any hit is resolved, so the shift caused by
/// one hit cannot create or hide another hit in the same tick.
fn check_collisions(state: &mut GameState, config: &GameConfig, display: &mut dyn DisplayAdapter) {
    let hits: Vec<EntityId> = state
        .asteroids
        .iter()
        .filter(|asteroid| is_collided_with(&state.astronaut, *asteroid))
        .map(|asteroid| asteroid.id())
        .collect();

    for id in hits {
        state.handle_collision(id, config, display);
    }
}

/// Top the pool up by at most one asteroid per tick
fn fill_asteroids(state: &mut GameState, config: &GameConfig, display: &mut dyn DisplayAdapter) {
    if state.asteroids.len() < config.refill_below {
        state.spawn_asteroid(config, display);
    }
}

/// Replace every asteroid that fell off the bottom
fn clean_up_asteroids(state: &mut GameState, config: &GameConfig, display: &mut dyn DisplayAdapter) {
    let fallen: Vec<EntityId> = state
        .asteroids
        .iter()
        .filter(|asteroid| asteroid.pos.y >= config.despawn_y)
        .map(|asteroid| asteroid.id)
        .collect();

    for id in fallen {
        if state.remove_asteroid(id, display).is_some() {
            state.spawn_asteroid(config, display);
        }
    }
}

/// Freeze the session once the astronaut drops past the floor
fn check_game_over(state: &mut GameState, config: &GameConfig) {
    if state.astronaut.pos.y <= config.floor_y {
        return;
    }

    state.timers.cancel_all();
    state.jump = None;
    state.astronaut.pos.y = config.floor_y;
    state.high_score = state.high_score.max(state.score);
    state.phase = GamePhase::GameOver;

    log::info!(
        "Game over after {} ticks: score {}, high score {}",
        state.time_ticks,
        state.score,
        state.high_score
    );
    state.events.push(GameEvent::GameOver {
        final_score: state.score,
        high_score: state.high_score,
    });
}

/// Advance every animation timer by one interval
pub fn step_timers(state: &mut GameState, config: &GameConfig) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state
        .timers
        .step(&mut state.astronaut, &mut state.asteroids, config);
}

/// Push current drawn positions to the display
pub fn sync_display(state: &GameState, display: &mut dyn DisplayAdapter) {
    display.set_position(state.astronaut.id, state.astronaut.display_pos());
    for asteroid in &state.asteroids {
        display.set_position(asteroid.id, asteroid.display_pos());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::SceneGraph;
    use glam::Vec2;
    use proptest::prelude::*;

    fn new_state(seed: u64) -> (GameConfig, SceneGraph, GameState) {
        let config = GameConfig::default();
        let mut scene = SceneGraph::new();
        let state = GameState::new(&config, seed, 1, 0, &mut scene);
        (config, scene, state)
    }

    /// Park an asteroid right on top of the astronaut
    fn place_on_astronaut(state: &mut GameState, index: usize) -> EntityId {
        let pos = state.astronaut.pos;
        state.asteroids[index].pos = pos;
        state.asteroids[index].id
    }

    /// Move every asteroid far away from the astronaut
    fn clear_area(state: &mut GameState) {
        for (i, asteroid) in state.asteroids.iter_mut().enumerate() {
            asteroid.pos = Vec2::new(40.0 + i as f32 * 45.0, -2000.0 - i as f32 * 100.0);
        }
    }

    #[test]
    fn test_pool_refills_one_per_tick() {
        let (config, mut scene, mut state) = new_state(11);
        clear_area(&mut state);
        let input = TickInput::default();
        for expected in 7..=12 {
            tick(&mut state, &input, &config, &mut scene);
            assert_eq!(state.asteroids.len(), expected);
        }
        tick(&mut state, &input, &config, &mut scene);
        assert_eq!(state.asteroids.len(), 12);
        assert_eq!(scene.len(), 13);
    }

    #[test]
    fn test_two_collisions_score_ten_then_thirty() {
        let (config, mut scene, mut state) = new_state(21);
        clear_area(&mut state);
        let input = TickInput::default();

        place_on_astronaut(&mut state, 0);
        tick(&mut state, &input, &config, &mut scene);
        assert_eq!(state.score, 10);

        clear_area(&mut state);
        place_on_astronaut(&mut state, 0);
        tick(&mut state, &input, &config, &mut scene);
        assert_eq!(state.score, 30);
        assert_eq!(state.hit_value, 30);
    }

    #[test]
    fn test_simultaneous_collisions_all_resolve() {
        let (config, mut scene, mut state) = new_state(22);
        clear_area(&mut state);
        let a = place_on_astronaut(&mut state, 1);
        let b = place_on_astronaut(&mut state, 4);

        tick(&mut state, &TickInput::default(), &config, &mut scene);
        assert_eq!(state.collisions, 2);
        assert_eq!(state.score, 30);
        assert!(!scene.contains(a));
        assert!(!scene.contains(b));

        let astronaut = state.astronaut.pos;
        let explosions: Vec<Vec2> = state
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::Explosion { pos } => Some(pos),
                _ => None,
            })
            .collect();
        assert_eq!(explosions, vec![astronaut, astronaut]);
    }

    #[test]
    fn test_fallen_asteroids_replaced() {
        let (config, mut scene, mut state) = new_state(23);
        clear_area(&mut state);
        let fallen = state.asteroids[3].id;
        state.asteroids[3].pos.y = 600.0;
        let before = state.asteroids.len();

        tick(&mut state, &TickInput::default(), &config, &mut scene);
        // +1 from refill, cleanup is net zero
        assert_eq!(state.asteroids.len(), before + 1);
        assert!(state.asteroids.iter().all(|a| a.id != fallen));
        assert!(!scene.contains(fallen));
    }

    #[test]
    fn test_game_over_clamps_and_freezes() {
        let (config, mut scene, mut state) = new_state(31);
        clear_area(&mut state);
        state.high_score = 500;
        state.score = 120;
        state.start_jump(&config);
        state.astronaut.pos.y = 551.0;

        tick(&mut state, &TickInput::default(), &config, &mut scene);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.astronaut.pos.y, 550.0);
        assert_eq!(state.high_score, 500);
        assert!(state.timers.is_empty());
        assert!(state.jump.is_none());

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameOver {
            final_score: 120,
            high_score: 500,
        }));

        // Frozen: neither tick nor timers move anything
        let ticks = state.time_ticks;
        let input = TickInput {
            pointer_x: Some(0.0),
            primary_action: true,
            difficulty: Difficulty::Easy,
        };
        tick(&mut state, &input, &config, &mut scene);
        step_timers(&mut state, &config);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.astronaut.pos.y, 550.0);
    }

    #[test]
    fn test_game_over_raises_high_score() {
        let (config, mut scene, mut state) = new_state(32);
        clear_area(&mut state);
        state.high_score = 40;
        state.score = 90;
        state.astronaut.pos.y = 551.0;
        tick(&mut state, &TickInput::default(), &config, &mut scene);
        assert_eq!(state.high_score, 90);
    }

    #[test]
    fn test_primary_action_is_one_shot() {
        let (config, mut scene, mut state) = new_state(41);
        clear_area(&mut state);
        let click = TickInput {
            primary_action: true,
            ..Default::default()
        };

        tick(&mut state, &click, &config, &mut scene);
        assert!(!state.jump_armed);
        let first = state.jump.unwrap();

        tick(&mut state, &click, &config, &mut scene);
        assert_eq!(state.jump, Some(first));
    }

    #[test]
    fn test_no_pointer_no_horizontal_motion() {
        let (config, mut scene, mut state) = new_state(42);
        clear_area(&mut state);
        let x = state.astronaut.pos.x;
        tick(&mut state, &TickInput::default(), &config, &mut scene);
        assert_eq!(state.astronaut.pos.x, x);
    }

    #[test]
    fn test_sync_display_uses_drawn_position() {
        let (config, mut scene, mut state) = new_state(43);
        state.asteroids[0].pos.y = 0.0;
        state.shift_asteroids(&config);
        sync_display(&state, &mut scene);
        let node = scene.node(state.asteroids[0].id).unwrap();
        assert_eq!(node.pos.y, 0.0);
        assert_eq!(state.asteroids[0].pos.y, 120.0);
    }

    proptest! {
        #[test]
        fn prop_score_is_triangular(hits in 0u32..12) {
            let (config, mut scene, mut state) = new_state(hits as u64);
            for _ in 0..hits {
                clear_area(&mut state);
                place_on_astronaut(&mut state, 0);
                tick(&mut state, &TickInput::default(), &config, &mut scene);
            }
            let n = hits as u64;
            prop_assert_eq!(state.collisions, hits);
            prop_assert_eq!(state.score, 5 * n * (n + 1));
        }

        #[test]
        fn prop_pool_stays_in_bounds(seed in any::<u64>(), pointer in 0.0f32..800.0, ticks in 1usize..300) {
            let (config, mut scene, mut state) = new_state(seed);
            let input = TickInput {
                pointer_x: Some(pointer),
                primary_action: true,
                difficulty: Difficulty::Normal,
            };
            for _ in 0..ticks {
                tick(&mut state, &input, &config, &mut scene);
                step_timers(&mut state, &config);
                prop_assert!(state.asteroids.len() >= 6);
                prop_assert!(state.asteroids.len() <= 12);
            }
        }

        #[test]
        fn prop_difficulty_never_changes_vertical_motion(seed in any::<u64>(), pointer in 0.0f32..800.0) {
            let (config, mut easy_scene, mut easy) = new_state(seed);
            let (_, mut normal_scene, mut normal) = new_state(seed);
            clear_area(&mut easy);
            clear_area(&mut normal);

            for difficulty in [Difficulty::Easy, Difficulty::Normal] {
                let (state, scene) = match difficulty {
                    Difficulty::Easy => (&mut easy, &mut easy_scene),
                    Difficulty::Normal => (&mut normal, &mut normal_scene),
                };
                let input = TickInput {
                    pointer_x: Some(pointer),
                    primary_action: true,
                    difficulty,
                };
                for _ in 0..20 {
                    tick(state, &input, &config, scene);
                    step_timers(state, &config);
                }
            }
            prop_assert_eq!(easy.astronaut.pos.y, normal.astronaut.pos.y);
        }
    }
}
