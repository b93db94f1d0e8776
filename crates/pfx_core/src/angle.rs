//! Direction helpers for the upward-zero convention.
//!
//! `atan2` measures from the positive x axis; emission measures from "up".
//! Both [`aim_direction`] and [`direction_vector`] go through [`UPWARD_OFFSET`],
//! so an aimed effect and the sampled velocity always agree.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

/// Offset between the `atan2` convention (0 = right) and emission (0 = up).
pub const UPWARD_OFFSET: f32 = FRAC_PI_2;

pub const RADIANS_IN_A_DEGREE: f32 = PI / 180.0;

/// An angle tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Angle {
    Degrees(f32),
    Radians(f32),
}

impl Angle {
    #[inline]
    pub fn to_radians(self) -> f32 {
        match self {
            Angle::Degrees(d) => d * RADIANS_IN_A_DEGREE,
            Angle::Radians(r) => r,
        }
    }
}

/// Direction from `from` towards `to`, 0 = up.
pub fn aim_direction(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x) + UPWARD_OFFSET
}

/// Unit screen-space vector for an upward-zero direction.
#[inline]
pub fn direction_vector(direction: f32) -> Vec2 {
    Vec2::from_angle(direction - UPWARD_OFFSET)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn degrees_convert_to_radians() {
        assert!((Angle::Degrees(180.0).to_radians() - Angle::Radians(PI).to_radians()).abs() < EPS);
        assert!((Angle::Degrees(90.0).to_radians() - FRAC_PI_2).abs() < EPS);
        assert_eq!(Angle::Radians(0.25).to_radians(), 0.25);
    }

    #[test]
    fn aim_straight_up_is_zero() {
        let from = Vec2::new(80.0, 60.0);
        let dir = aim_direction(from, Vec2::new(80.0, 10.0));
        assert!(dir.abs() < EPS, "got {dir}");
    }

    #[test]
    fn aim_right_is_quarter_turn() {
        let from = Vec2::new(80.0, 60.0);
        let dir = aim_direction(from, Vec2::new(150.0, 60.0));
        assert!((dir - FRAC_PI_2).abs() < EPS, "got {dir}");
    }

    #[test]
    fn aimed_direction_points_at_target() {
        let from = Vec2::new(10.0, 10.0);
        let to = Vec2::new(40.0, 50.0);
        let v = direction_vector(aim_direction(from, to));
        let expected = (to - from).normalize();
        assert!((v - expected).length() < EPS, "{v} vs {expected}");
    }

    #[test]
    fn zero_direction_points_up_screen_space() {
        let v = direction_vector(0.0);
        assert!(v.x.abs() < EPS);
        assert!((v.y + 1.0).abs() < EPS);
    }
}
