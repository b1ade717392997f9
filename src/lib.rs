//! Astro Jump - dodge-and-bounce asteroid arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, animation timers, game controller)
//! - `renderer`: Retained scene graph and WebGPU rendering pipeline
//! - `ui`: Events raised for the UI shell (score text, modals, explosions)
//! - `config`: Immutable game configuration record
//! - `settings`: Player-facing options (easy mode)
//! - `highscores`: In-memory leaderboard of finished runs

pub mod config;
pub mod error;
pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use config::GameConfig;
pub use error::GameError;
pub use highscores::HighScores;
pub use settings::{Difficulty, Settings};

/// Game configuration constants
///
/// These are the compile-time defaults behind [`GameConfig::default`].
pub mod consts {
    /// Main simulation rate (ticks per second)
    pub const FPS: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / FPS as f32;
    /// Animation timer interval (jump and shift timers run at 100 Hz)
    pub const TIMER_DT: f32 = 0.010;
    /// Largest frame delta fed to the scheduler (prevents spiral of death)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Most ticks plus timer steps run for one frame
    pub const MAX_SUBSTEPS: u32 = 32;

    /// Play-field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 550.0;
    pub const BACKGROUND_COLOR: &str = "#111";

    /// Every entity is a 40x40 box anchored at its top-left corner
    pub const ENTITY_SIZE: f32 = 40.0;

    /// Astronaut spawn point
    pub const ASTRONAUT_START_X: f32 = 380.0;
    pub const ASTRONAUT_START_Y: f32 = 510.0;
    /// Pointer is aimed at the astronaut's visual centre, not its corner
    pub const POINTER_OFFSET: f32 = 24.0;

    /// Horizontal follow divisors
    pub const DIFFICULTY_EASY: f32 = 1.0;
    pub const DIFFICULTY_NORMAL: f32 = 8.0;

    /// Obstacle pool
    pub const INITIAL_ASTEROIDS: usize = 6;
    pub const REFILL_BELOW: usize = 12;
    pub const DESPAWN_Y: f32 = 600.0;
    /// Horizontal spawn margin on each side
    pub const SPAWN_MARGIN: f32 = 40.0;

    /// Spawn cursor
    pub const SPAWN_ROW_START: f32 = 550.0;
    pub const SPAWN_STEP: f32 = 80.0;
    /// Jitter scale; the step grows by up to half of this
    pub const SPAWN_JITTER: f32 = 10.0;

    /// Falling past this line ends the run
    pub const FLOOR_Y: f32 = 550.0;

    /// Collision shift (obstacles drop, spawn cursor rises)
    pub const SHIFT_DISTANCE: f32 = 120.0;
    pub const SHIFT_START_VEL: f32 = 6.0;
    pub const SHIFT_DECEL: f32 = 0.15;

    /// Jump physics (pixels per timer step)
    pub const JUMP_START_VEL: f32 = -4.0;
    pub const JUMP_ACCEL: f32 = 0.15;
    /// Gravity only applies above this line
    pub const JUMP_ACCEL_CEILING: f32 = 350.0;

    /// Scoring
    pub const FIRST_HIT_SCORE: u64 = 10;
    pub const HIT_SCORE_STEP: u64 = 10;
}

/// Parse a `#rgb` or `#rrggbb` hex color into RGBA components in 0..=1
pub fn parse_hex_color(hex: &str) -> Option<[f32; 4]> {
    let digits = hex.strip_prefix('#').filter(|d| d.is_ascii())?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f32 / 255.0);

    let (r, g, b) = match digits.len() {
        3 => {
            let expand = |i: usize| {
                let c = &digits[i..i + 1];
                channel(&format!("{c}{c}"))
            };
            (expand(0)?, expand(1)?, expand(2)?)
        }
        6 => (
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        ),
        _ => return None,
    };
    Some([r, g, b, 1.0])
}
