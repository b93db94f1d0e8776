//! Per-particle sampling.
//!
//! Every draw is independent: two size draws, one angle, one speed, one
//! lifespan and (for rainbow) one colour per particle. Callers must have run
//! [`ParticleSettings::check`] first; the `gen_range` calls below assume
//! non-inverted ranges.

use glam::Vec2;
use pfx_config::{ParticleColor, ParticleSettings, PALETTE_LEN};
use rand::Rng;

use crate::angle::direction_vector;

/// Attributes drawn for one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSample {
    pub width: u32,
    pub height: u32,
    /// Emission angle, 0 = up.
    pub angle: f32,
    pub speed: f32,
    /// Screen-space initial velocity in pixels per second.
    pub velocity: Vec2,
    pub acceleration_y: f32,
    pub lifespan_ms: u32,
    pub color: u8,
    pub bouncy: bool,
}

pub fn sample_particle<R: Rng + ?Sized>(
    settings: &ParticleSettings,
    rng: &mut R,
) -> ParticleSample {
    let width = sample_size(settings.min_size, settings.max_size, rng);
    let height = sample_size(settings.min_size, settings.max_size, rng);
    let angle = sample_angle(settings.direction, settings.spread_angle, rng);
    let speed = sample_speed(settings.speed, settings.speed_varies, rng);
    let lifespan_ms = sample_lifespan(settings.lifespan, settings.lifespan_varies, rng);
    let color = sample_color(settings.color, rng);
    ParticleSample {
        width,
        height,
        angle,
        speed,
        velocity: direction_vector(angle) * speed,
        acceleration_y: settings.gravity,
        lifespan_ms,
        color,
        bouncy: settings.bouncy,
    }
}

#[inline]
pub fn sample_size<R: Rng + ?Sized>(min: u32, max: u32, rng: &mut R) -> u32 {
    rng.gen_range(min..=max)
}

/// Uniform in `[direction - spread/2, direction + spread/2]`.
pub fn sample_angle<R: Rng + ?Sized>(direction: f32, spread: f32, rng: &mut R) -> f32 {
    let half = spread * 0.5;
    if half > 0.0 {
        rng.gen_range(direction - half..=direction + half)
    } else {
        direction
    }
}

/// Uniform in `[0, speed]` when `varies`, else exactly `speed`.
pub fn sample_speed<R: Rng + ?Sized>(speed: f32, varies: bool, rng: &mut R) -> f32 {
    if varies && speed > 0.0 {
        rng.gen_range(0.0..=speed)
    } else {
        speed
    }
}

/// Uniform in `[1, lifespan]` when `varies`, else exactly `lifespan`.
pub fn sample_lifespan<R: Rng + ?Sized>(lifespan: u32, varies: bool, rng: &mut R) -> u32 {
    if varies && lifespan >= 1 {
        rng.gen_range(1..=lifespan)
    } else {
        lifespan
    }
}

/// Rainbow skips palette index 0, which is transparent.
pub fn sample_color<R: Rng + ?Sized>(color: ParticleColor, rng: &mut R) -> u8 {
    match color {
        ParticleColor::Rainbow => rng.gen_range(1..PALETTE_LEN),
        ParticleColor::Index(i) => i,
    }
}
