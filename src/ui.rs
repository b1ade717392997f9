//! UI shell contract
//!
//! The simulation queues [`GameEvent`]s; once per frame the host drains them
//! and hands them to a [`UiShell`], which owns score text, modals and the
//! explosion effect.

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;

use crate::sim::{GameEvent, random_explosion_color};

/// Presentation callbacks driven by game events
pub trait UiShell {
    /// Redraw the score text in the given color
    fn on_score_changed(&mut self, score: u64, color: &'static str);
    /// Play the fire-and-forget particle burst at a play-field position
    fn on_explosion(&mut self, pos: Vec2);
    /// Show the end-of-run modal
    fn on_game_over(&mut self, final_score: u64, high_score: u64);
}

/// Deliver events to the shell in the order they were raised
pub fn dispatch(events: impl IntoIterator<Item = GameEvent>, shell: &mut dyn UiShell) {
    for event in events {
        match event {
            GameEvent::ScoreChanged { score, color } => shell.on_score_changed(score, color),
            GameEvent::Explosion { pos } => shell.on_explosion(pos),
            GameEvent::GameOver {
                final_score,
                high_score,
            } => shell.on_game_over(final_score, high_score),
        }
    }
}

/// One particle of an explosion burst
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Final offset from the burst centre, in pixels
    pub offset: Vec2,
    pub color: &'static str,
}

/// Lay out a burst of `count` particles thrown 80-150 px outward
///
/// The angular step is jittered per particle so bursts look ragged.
pub fn explosion_particles<R: Rng + ?Sized>(rng: &mut R, count: u32) -> Vec<Particle> {
    let spread_min = count.saturating_sub(10).max(1);
    (0..count)
        .map(|i| {
            let distance = rng.random_range(80.0..=150.0_f32);
            let spread = rng.random_range(spread_min..=count + 10) as f32;
            let angle = 2.0 * PI * i as f32 / spread;
            Particle {
                offset: Vec2::new(angle.cos(), angle.sin()) * distance,
                color: random_explosion_color(rng),
            }
        })
        .collect()
}

/// Shell that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogShell {
    pub score: u64,
    pub explosions: u32,
    /// (final score, high score) once the run is over
    pub result: Option<(u64, u64)>,
}

impl UiShell for LogShell {
    fn on_score_changed(&mut self, score: u64, color: &'static str) {
        log::debug!("Score {} ({})", score, color);
        self.score = score;
    }

    fn on_explosion(&mut self, pos: Vec2) {
        log::debug!("Explosion at ({:.0}, {:.0})", pos.x, pos.y);
        self.explosions += 1;
    }

    fn on_game_over(&mut self, final_score: u64, high_score: u64) {
        log::info!("Game over: score {}, best {}", final_score, high_score);
        self.result = Some((final_score, high_score));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[derive(Default)]
    struct RecordingShell {
        calls: Vec<String>,
    }

    impl UiShell for RecordingShell {
        fn on_score_changed(&mut self, score: u64, color: &'static str) {
            self.calls.push(format!("score {score} {color}"));
        }

        fn on_explosion(&mut self, pos: Vec2) {
            self.calls.push(format!("boom {} {}", pos.x, pos.y));
        }

        fn on_game_over(&mut self, final_score: u64, high_score: u64) {
            self.calls.push(format!("over {final_score} {high_score}"));
        }
    }

    #[test]
    fn test_dispatch_preserves_order() {
        let events = vec![
            GameEvent::ScoreChanged {
                score: 10,
                color: "#fff",
            },
            GameEvent::Explosion {
                pos: Vec2::new(5.0, 6.0),
            },
            GameEvent::GameOver {
                final_score: 10,
                high_score: 30,
            },
        ];
        let mut shell = RecordingShell::default();
        dispatch(events, &mut shell);
        assert_eq!(shell.calls, vec!["score 10 #fff", "boom 5 6", "over 10 30"]);
    }

    #[test]
    fn test_explosion_particles_ring() {
        let mut rng = rand_pcg::Pcg32::seed_from_u64(7);
        let particles = explosion_particles(&mut rng, 20);
        assert_eq!(particles.len(), 20);
        for p in &particles {
            let d = p.offset.length();
            assert!((80.0 - 1e-3..=150.0 + 1e-3).contains(&d), "distance {d}");
            assert!(p.color.starts_with('#'));
        }
        assert!(explosion_particles(&mut rng, 0).is_empty());
    }

    #[test]
    fn test_log_shell_tracks_result() {
        let mut shell = LogShell::default();
        dispatch(
            vec![
                GameEvent::Explosion { pos: Vec2::ZERO },
                GameEvent::GameOver {
                    final_score: 60,
                    high_score: 60,
                },
            ],
            &mut shell,
        );
        assert_eq!(shell.explosions, 1);
        assert_eq!(shell.result, Some((60, 60)));
    }
}
