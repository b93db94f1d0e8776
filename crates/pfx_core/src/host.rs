//! Capabilities the host engine provides.

use glam::Vec2;

use crate::effect::Emission;

/// Behaviour flags set on every spawned particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteFlag {
    /// Reflect off the arena edges.
    BounceOnWall,
    /// Remove the sprite once its lifespan elapses.
    AutoDestroy,
}

/// Sprite registry and physics setters of the host.
///
/// All positions, velocities and accelerations are in screen space (y down).
pub trait ParticleHost {
    /// Handle the host returns for a created sprite.
    type Sprite;

    fn create_sprite(&mut self, width: u32, height: u32) -> Self::Sprite;
    fn set_position(&mut self, sprite: &mut Self::Sprite, position: Vec2);
    fn set_velocity(&mut self, sprite: &mut Self::Sprite, velocity: Vec2);
    fn set_acceleration_y(&mut self, sprite: &mut Self::Sprite, ay: f32);
    /// Fill the sprite's bitmap with a palette index.
    fn fill(&mut self, sprite: &mut Self::Sprite, color: u8);
    fn set_flag(&mut self, sprite: &mut Self::Sprite, flag: SpriteFlag, on: bool);
    fn set_lifespan(&mut self, sprite: &mut Self::Sprite, ms: u32);
    /// Tag the sprite with a host-defined kind. Hosts without kinds ignore it.
    fn set_kind(&mut self, _sprite: &mut Self::Sprite, _kind: u32) {}
}

/// Schedule-once timer. Fire-and-forget: no cancellation, no backpressure.
pub trait Scheduler {
    fn schedule_once(&mut self, delay_ms: u32, emission: Emission);
}

/// Records `(delay_ms, emission)` pairs without ever firing them.
impl Scheduler for Vec<(u32, Emission)> {
    fn schedule_once(&mut self, delay_ms: u32, emission: Emission) {
        self.push((delay_ms, emission));
    }
}
