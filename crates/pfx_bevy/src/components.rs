use bevy::prelude::*;

/// Marker for every entity spawned by an emission.
#[derive(Component, Debug)]
pub struct Particle;

/// Host-defined kind tag copied from the effect.
#[derive(Component, Debug, Deref, DerefMut, Copy, Clone, PartialEq, Eq)]
pub struct ParticleKind(pub u32);

/// World-space velocity (y up) in units per second.
#[derive(Component, Debug, Deref, DerefMut, Copy, Clone, PartialEq, Default)]
pub struct ParticleVelocity(pub Vec2);

/// Constant world-space acceleration.
#[derive(Component, Debug, Deref, DerefMut, Copy, Clone, PartialEq, Default)]
pub struct ParticleAcceleration(pub Vec2);

/// Remaining lifetime. Despawns the particle when it finishes and the entity
/// carries [`AutoDestroy`].
#[derive(Component, Debug, Deref, DerefMut, Clone)]
pub struct Lifespan(pub Timer);

impl Lifespan {
    pub fn from_millis(ms: u32) -> Self {
        Self(Timer::new(
            std::time::Duration::from_millis(u64::from(ms)),
            TimerMode::Once,
        ))
    }
}

#[derive(Component, Debug, Default)]
pub struct BounceOnWall;

#[derive(Component, Debug, Default)]
pub struct AutoDestroy;
