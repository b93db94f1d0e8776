//! [`ParticleHost`] backed by Bevy `Commands`.
//!
//! Each setter queues a component insert on the particle entity; screen-space
//! values from the core are flipped into world space (y up) via [`PfxArena`].

use bevy::prelude::*;
use pfx_core::{ParticleHost, SpriteFlag};

use crate::components::{
    AutoDestroy, BounceOnWall, Lifespan, Particle, ParticleAcceleration, ParticleKind,
    ParticleVelocity,
};
use crate::palette::{color_for_index, PARTICLE_COLORS};
use crate::resources::PfxArena;

/// Entity handle plus the pixel size needed to refill its sprite.
#[derive(Debug, Clone, Copy)]
pub struct SpawnedParticle {
    pub entity: Entity,
    pub size: Vec2,
}

pub struct CommandsHost<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    arena: PfxArena,
}

impl<'a, 'w, 's> CommandsHost<'a, 'w, 's> {
    pub fn new(commands: &'a mut Commands<'w, 's>, arena: PfxArena) -> Self {
        Self { commands, arena }
    }
}

#[inline]
fn to_bevy(v: pfx_core::Vec2) -> Vec2 {
    Vec2::new(v.x, v.y)
}

impl ParticleHost for CommandsHost<'_, '_, '_> {
    type Sprite = SpawnedParticle;

    fn create_sprite(&mut self, width: u32, height: u32) -> SpawnedParticle {
        let size = Vec2::new(width as f32, height as f32);
        let entity = self
            .commands
            .spawn((
                Particle,
                Sprite::from_color(PARTICLE_COLORS[1], size),
                Transform::default(),
            ))
            .id();
        SpawnedParticle { entity, size }
    }

    fn set_position(&mut self, sprite: &mut SpawnedParticle, position: pfx_core::Vec2) {
        let world = self.arena.screen_to_world(to_bevy(position));
        self.commands
            .entity(sprite.entity)
            .insert(Transform::from_translation(world.extend(0.0)));
    }

    fn set_velocity(&mut self, sprite: &mut SpawnedParticle, velocity: pfx_core::Vec2) {
        let v = self.arena.screen_to_world_vector(to_bevy(velocity));
        self.commands
            .entity(sprite.entity)
            .insert(ParticleVelocity(v));
    }

    fn set_acceleration_y(&mut self, sprite: &mut SpawnedParticle, ay: f32) {
        let a = self.arena.screen_to_world_vector(Vec2::new(0.0, ay));
        self.commands
            .entity(sprite.entity)
            .insert(ParticleAcceleration(a));
    }

    fn fill(&mut self, sprite: &mut SpawnedParticle, color: u8) {
        self.commands
            .entity(sprite.entity)
            .insert(Sprite::from_color(color_for_index(color), sprite.size));
    }

    fn set_flag(&mut self, sprite: &mut SpawnedParticle, flag: SpriteFlag, on: bool) {
        let mut e = self.commands.entity(sprite.entity);
        match (flag, on) {
            (SpriteFlag::BounceOnWall, true) => {
                e.insert(BounceOnWall);
            }
            (SpriteFlag::BounceOnWall, false) => {
                e.remove::<BounceOnWall>();
            }
            (SpriteFlag::AutoDestroy, true) => {
                e.insert(AutoDestroy);
            }
            (SpriteFlag::AutoDestroy, false) => {
                e.remove::<AutoDestroy>();
            }
        }
    }

    fn set_lifespan(&mut self, sprite: &mut SpawnedParticle, ms: u32) {
        self.commands
            .entity(sprite.entity)
            .insert(Lifespan::from_millis(ms));
    }

    fn set_kind(&mut self, sprite: &mut SpawnedParticle, kind: u32) {
        self.commands
            .entity(sprite.entity)
            .insert(ParticleKind(kind));
    }
}
