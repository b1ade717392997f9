//! Fixed color palettes for score text, asteroids and explosion particles

use rand::Rng;

/// Bright colors used for the score text and asteroid tints
pub const COLORS: [&str; 6] = ["#5bc0eb", "#fde74c", "#9bc53d", "#e55934", "#fa7921", "#c879ff"];

/// Warm colors used for explosion particles
pub const EXPLOSION_COLORS: [&str; 4] = ["#ff4500", "#ffa500", "#ffd700", "#ff6347"];

/// Pick a random palette color
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    COLORS[rng.random_range(0..COLORS.len())]
}

/// Pick a random explosion particle color
pub fn random_explosion_color<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    EXPLOSION_COLORS[rng.random_range(0..EXPLOSION_COLORS.len())]
}
