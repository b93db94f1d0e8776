//! A single emission request and its scheduled snapshot.

use glam::Vec2;
use pfx_config::{ConfigError, EffectSpec, ParticleColor, ParticleConfig, ParticleSettings, Preset};
use rand::Rng;
use tracing::{debug, trace, warn};

use crate::angle::{aim_direction, Angle};
use crate::host::{ParticleHost, Scheduler, SpriteFlag};
use crate::kinematics::sample_particle;

/// Centre of the default 160x120 arena.
pub const DEFAULT_POSITION: Vec2 = Vec2::new(80.0, 60.0);

/// Particle count, delay, position and resolved settings for one burst.
///
/// Setters chain on `&mut Self`. Emitting takes a snapshot, so mutating the
/// effect afterwards never changes an emission that is already scheduled.
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    count: usize,
    delay_ms: u32,
    position: Vec2,
    kind: Option<u32>,
    settings: ParticleSettings,
}

impl Effect {
    /// `count` particles with the circle preset.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            delay_ms: 0,
            position: DEFAULT_POSITION,
            kind: None,
            settings: Preset::Circle.settings(),
        }
    }

    /// `count` particles with `config` merged against the circle preset.
    pub fn with_config(count: usize, config: &ParticleConfig) -> Self {
        let mut fx = Self::new(count);
        fx.set_config(config);
        fx
    }

    pub fn from_preset(count: usize, preset: Preset) -> Self {
        Self::with_config(count, &preset.config())
    }

    pub fn from_spec(spec: &EffectSpec) -> Self {
        let mut fx = Self::new(spec.count);
        fx.settings = spec.settings();
        fx.delay_ms = spec.delay_ms;
        fx.kind = spec.kind;
        if let Some((x, y)) = spec.position {
            fx.position = Vec2::new(x, y);
        }
        fx
    }

    pub fn count(&self) -> usize {
        self.count
    }
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }
    pub fn position(&self) -> Vec2 {
        self.position
    }
    pub fn kind(&self) -> Option<u32> {
        self.kind
    }
    pub fn settings(&self) -> &ParticleSettings {
        &self.settings
    }

    /// Replace the settings with `config` merged against the circle preset.
    /// Fields `config` leaves unset go back to circle values.
    pub fn set_config(&mut self, config: &ParticleConfig) -> &mut Self {
        self.settings = config.resolve();
        self
    }

    pub fn set_count(&mut self, count: usize) -> &mut Self {
        self.count = count;
        self
    }

    pub fn rainbow(&mut self) -> &mut Self {
        self.settings.color = ParticleColor::Rainbow;
        self
    }

    pub fn set_color(&mut self, color: u8) -> &mut Self {
        self.settings.color = ParticleColor::Index(color);
        self
    }

    pub fn set_size(&mut self, min: u32, max: u32) -> &mut Self {
        self.settings.min_size = min;
        self.settings.max_size = max;
        self
    }

    pub fn set_position(&mut self, x: f32, y: f32) -> &mut Self {
        self.position = Vec2::new(x, y);
        self
    }

    pub fn set_kind(&mut self, kind: u32) -> &mut Self {
        self.kind = Some(kind);
        self
    }

    pub fn set_direction(&mut self, direction: Angle) -> &mut Self {
        self.settings.direction = direction.to_radians();
        self
    }

    /// Rotate the current direction by `delta`.
    pub fn add_direction(&mut self, delta: Angle) -> &mut Self {
        self.settings.direction += delta.to_radians();
        self
    }

    /// Point the emission cone at `target` (screen space).
    pub fn aim_towards(&mut self, target: Vec2) -> &mut Self {
        self.settings.direction = aim_direction(self.position, target);
        self
    }

    pub fn set_spread_angle(&mut self, spread: Angle) -> &mut Self {
        self.settings.spread_angle = spread.to_radians();
        self
    }

    pub fn set_delay(&mut self, ms: u32) -> &mut Self {
        self.delay_ms = ms;
        self
    }

    /// `varies: None` keeps the current flag.
    pub fn set_lifespan(&mut self, ms: u32, varies: Option<bool>) -> &mut Self {
        self.settings.lifespan = ms;
        if let Some(v) = varies {
            self.settings.lifespan_varies = v;
        }
        self
    }

    /// `varies: None` keeps the current flag.
    pub fn set_speed(&mut self, speed: f32, varies: Option<bool>) -> &mut Self {
        self.settings.speed = speed;
        if let Some(v) = varies {
            self.settings.speed_varies = v;
        }
        self
    }

    pub fn set_gravity(&mut self, gravity: f32) -> &mut Self {
        self.settings.gravity = gravity;
        self
    }

    pub fn set_bouncy(&mut self, bouncy: bool) -> &mut Self {
        self.settings.bouncy = bouncy;
        self
    }

    /// Validated, immutable copy of the current state.
    pub fn snapshot(&self) -> Result<Emission, ConfigError> {
        self.settings.check()?;
        Ok(Emission {
            count: self.count,
            position: self.position,
            kind: self.kind,
            settings: self.settings,
        })
    }

    /// Validate, snapshot and schedule after the effect's delay.
    pub fn emit<S: Scheduler + ?Sized>(&self, scheduler: &mut S) -> Result<(), ConfigError> {
        self.emit_after(scheduler, 0)
    }

    pub(crate) fn emit_after<S: Scheduler + ?Sized>(
        &self,
        scheduler: &mut S,
        extra_ms: u32,
    ) -> Result<(), ConfigError> {
        let emission = self.snapshot().inspect_err(|e| {
            warn!("particle emission rejected: {e}");
        })?;
        if emission.count == 0 {
            debug!("particle effect with count 0 ignored");
            return Ok(());
        }
        let delay_ms = self.delay_ms.saturating_add(extra_ms);
        debug!(count = emission.count, delay_ms, "scheduling particle emission");
        scheduler.schedule_once(delay_ms, emission);
        Ok(())
    }
}

/// A scheduled effect, frozen at emit time. Only built by
/// [`Effect::snapshot`], so its settings always pass
/// [`ParticleSettings::check`].
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    count: usize,
    position: Vec2,
    kind: Option<u32>,
    settings: ParticleSettings,
}

impl Emission {
    pub fn count(&self) -> usize {
        self.count
    }
    pub fn position(&self) -> Vec2 {
        self.position
    }
    pub fn kind(&self) -> Option<u32> {
        self.kind
    }
    pub fn settings(&self) -> &ParticleSettings {
        &self.settings
    }

    /// Create all `count` particles at once.
    pub fn spawn<H, R>(&self, host: &mut H, rng: &mut R) -> Vec<H::Sprite>
    where
        H: ParticleHost + ?Sized,
        R: Rng + ?Sized,
    {
        trace!(count = self.count, x = self.position.x, y = self.position.y, "spawning particles");
        (0..self.count).map(|_| self.spawn_one(host, rng)).collect()
    }

    fn spawn_one<H, R>(&self, host: &mut H, rng: &mut R) -> H::Sprite
    where
        H: ParticleHost + ?Sized,
        R: Rng + ?Sized,
    {
        let p = sample_particle(&self.settings, rng);
        let mut s = host.create_sprite(p.width, p.height);
        host.fill(&mut s, p.color);
        host.set_position(&mut s, self.position);
        host.set_lifespan(&mut s, p.lifespan_ms);
        host.set_velocity(&mut s, p.velocity);
        host.set_acceleration_y(&mut s, p.acceleration_y);
        host.set_flag(&mut s, SpriteFlag::BounceOnWall, p.bouncy);
        host.set_flag(&mut s, SpriteFlag::AutoDestroy, true);
        if let Some(kind) = self.kind {
            host.set_kind(&mut s, kind);
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn constructor_merges_against_circle() {
        let fx = Effect::with_config(
            5,
            &ParticleConfig {
                speed: Some(7.0),
                ..Default::default()
            },
        );
        assert_eq!(fx.settings().speed, 7.0);
        assert_eq!(fx.settings().lifespan, 1000);
        assert_eq!(fx.position(), DEFAULT_POSITION);
    }

    #[test]
    fn set_config_resets_unset_fields_to_circle() {
        let mut fx = Effect::new(1);
        fx.set_gravity(30.0).set_config(&ParticleConfig {
            bouncy: Some(false),
            ..Default::default()
        });
        assert_eq!(fx.settings().gravity, 0.0);
        assert!(!fx.settings().bouncy);
    }

    #[test]
    fn direction_setters() {
        let mut a = Effect::new(1);
        a.set_direction(Angle::Degrees(180.0));
        let mut b = Effect::new(1);
        b.set_direction(Angle::Radians(PI));
        assert!((a.settings().direction - b.settings().direction).abs() < 1e-5);

        a.add_direction(Angle::Degrees(-90.0)).add_direction(Angle::Radians(PI / 4.0));
        assert!((a.settings().direction - (PI * 0.75)).abs() < 1e-5);

        a.set_spread_angle(Angle::Degrees(8.0));
        assert!((a.settings().spread_angle - 8.0 * PI / 180.0).abs() < 1e-6);
    }

    #[test]
    fn aim_uses_current_position() {
        let mut fx = Effect::new(1);
        fx.set_position(10.0, 10.0).aim_towards(Vec2::new(10.0, 100.0));
        // Straight down.
        assert!((fx.settings().direction - PI).abs() < 1e-5);
    }

    #[test]
    fn varies_flag_untouched_when_none() {
        let mut fx = Effect::new(1);
        fx.set_speed(10.0, None).set_lifespan(50, Some(false));
        assert!(fx.settings().speed_varies);
        assert!(!fx.settings().lifespan_varies);
        assert_eq!(fx.settings().lifespan, 50);
    }

    #[test]
    fn emit_snapshots_state() {
        let mut scheduled: Vec<(u32, Emission)> = Vec::new();
        let mut fx = Effect::new(3);
        fx.set_delay(20).set_color(5);
        fx.emit(&mut scheduled).expect("valid");
        fx.set_color(9).set_count(100).set_delay(0);
        assert_eq!(scheduled.len(), 1);
        let (delay, emission) = &scheduled[0];
        assert_eq!(*delay, 20);
        assert_eq!(emission.count(), 3);
        assert_eq!(emission.settings().color, ParticleColor::Index(5));
    }

    #[test]
    fn zero_count_is_noop() {
        let mut scheduled: Vec<(u32, Emission)> = Vec::new();
        Effect::new(0).emit(&mut scheduled).expect("no-op is ok");
        assert!(scheduled.is_empty());
    }

    #[test]
    fn inverted_size_reported_before_scheduling() {
        let mut scheduled: Vec<(u32, Emission)> = Vec::new();
        let mut fx = Effect::new(4);
        fx.set_size(8, 2);
        let err = fx.emit(&mut scheduled).unwrap_err();
        assert!(matches!(err, ConfigError::InvertedRange { field: "size", .. }));
        assert!(scheduled.is_empty());
    }

    #[test]
    fn inverted_snapshot_is_an_error() {
        let mut fx = Effect::new(1);
        fx.set_size(5, 2);
        assert!(matches!(
            fx.snapshot(),
            Err(ConfigError::InvertedRange { field: "size", .. })
        ));
        fx.set_size(2, 5).set_spread_angle(Angle::Radians(f32::INFINITY));
        assert!(fx.snapshot().is_err());
        fx.set_spread_angle(Angle::Degrees(30.0));
        assert_eq!(fx.snapshot().expect("valid").count(), 1);
    }

    #[test]
    fn from_spec_applies_everything() {
        let spec = EffectSpec {
            count: 12,
            preset: Preset::Line,
            config: ParticleConfig {
                gravity: Some(5.0),
                ..Default::default()
            },
            delay_ms: 250,
            position: Some((1.0, 2.0)),
            kind: Some(3),
        };
        let fx = Effect::from_spec(&spec);
        assert_eq!(fx.count(), 12);
        assert_eq!(fx.delay_ms(), 250);
        assert_eq!(fx.position(), Vec2::new(1.0, 2.0));
        assert_eq!(fx.kind(), Some(3));
        assert_eq!(fx.settings().gravity, 5.0);
        assert_eq!(fx.settings().spread_angle, 0.0);
    }
}
