//! Indexed particle palette.
//! Index 0 is transparent; rainbow particles draw from 1..PALETTE_LEN.

use bevy::prelude::*;
use pfx_config::PALETTE_LEN;

pub const PARTICLE_COLORS: [Color; PALETTE_LEN as usize] = [
    Color::NONE,                   // transparent
    Color::srgb(1.0, 1.0, 1.0),    // white
    Color::srgb(1.0, 0.13, 0.13),  // red
    Color::srgb(1.0, 0.58, 0.77),  // pink
    Color::srgb(1.0, 0.51, 0.21),  // orange
    Color::srgb(1.0, 0.96, 0.04),  // yellow
    Color::srgb(0.14, 0.61, 0.64), // teal
    Color::srgb(0.47, 0.86, 0.32), // green
    Color::srgb(0.0, 0.25, 0.68),  // blue
    Color::srgb(0.53, 0.95, 1.0),  // light blue
    Color::srgb(0.56, 0.18, 0.77), // purple
    Color::srgb(0.64, 0.51, 0.62), // mauve
    Color::srgb(0.36, 0.25, 0.42), // dark purple
    Color::srgb(0.90, 0.80, 0.77), // tan
    Color::srgb(0.57, 0.27, 0.24), // brown
    Color::srgb(0.0, 0.0, 0.0),    // black
];

/// Color for a palette index; out-of-range indices wrap.
#[inline]
pub fn color_for_index(i: u8) -> Color {
    PARTICLE_COLORS[usize::from(i) % PARTICLE_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_behavior() {
        assert_eq!(color_for_index(1), PARTICLE_COLORS[1]);
        assert_eq!(color_for_index(PALETTE_LEN), PARTICLE_COLORS[0]);
        assert_eq!(color_for_index(PALETTE_LEN + 2), PARTICLE_COLORS[2]);
    }

    #[test]
    fn visible_colors_distinct() {
        for (i, c1) in PARTICLE_COLORS.iter().enumerate().skip(1) {
            for (j, c2) in PARTICLE_COLORS.iter().enumerate().skip(1) {
                if i != j {
                    assert!(c1 != c2, "duplicate colors at {i} and {j}");
                }
            }
        }
    }
}
