//! Emission and host-side particle systems.
//!
//! Request flow: events -> [`queue_emissions`] validates and schedules into
//! [`PendingEmissions`] -> [`tick_pending_emissions`] spawns due emissions
//! through [`CommandsHost`]. The remaining systems are the minimal host motion
//! the spawned particles need: velocity/acceleration integration, arena
//! bouncing and lifespan expiry.

use bevy::prelude::*;
use pfx_config::ConfigError;
use pfx_core::{Batch, Effect};
use rand::SeedableRng;

use crate::components::{
    AutoDestroy, BounceOnWall, Lifespan, Particle, ParticleAcceleration, ParticleVelocity,
};
use crate::events::{EmitBatch, EmitEffect, EmitNamed};
use crate::host::CommandsHost;
use crate::resources::{ParticleRng, PendingEmissions, PfxArena, PfxConfigRes, RngSeed};

// Salt mixed into the seed for the particle stream.
const PARTICLE_SEED_SALT: u64 = 0x9F1E_C0DE;

/// System: initialize the particle RNG if not already present.
/// Seed order: `RngSeed` resource, then the config seed, then entropy.
pub fn pfx_init(
    mut commands: Commands,
    seed: Option<Res<RngSeed>>,
    cfg: Option<Res<PfxConfigRes>>,
    has_rng: Option<Res<ParticleRng>>,
) {
    if has_rng.is_some() {
        return;
    }
    let base = seed
        .map(|s| s.0)
        .or_else(|| cfg.and_then(|c| c.0.seed));
    let rng = match base {
        Some(base) => rand::rngs::StdRng::seed_from_u64(base.wrapping_add(PARTICLE_SEED_SALT)),
        None => rand::rngs::StdRng::from_entropy(),
    };
    debug!(seeded = base.is_some(), "particle RNG initialized");
    commands.insert_resource(ParticleRng(rng));
}

fn named_request(req: &EmitNamed, cfg: &PfxConfigRes) -> Result<Batch, ConfigError> {
    let place = |fx: &mut Effect| {
        if let Some(p) = req.at {
            fx.set_position(p.x, p.y);
        }
        if let Some(t) = req.aim {
            fx.aim_towards(pfx_core::Vec2::new(t.x, t.y));
        }
    };
    if let Some(spec) = cfg.0.effects.get(&req.name) {
        let mut fx = Effect::from_spec(spec);
        place(&mut fx);
        return Ok(Batch::from_effects(vec![fx]));
    }
    let spec = cfg
        .0
        .batches
        .get(&req.name)
        .ok_or_else(|| ConfigError::UnknownEffect(req.name.clone()))?;
    let resolved = Batch::from_spec(spec, &cfg.0)?;
    let mut placed: Vec<Effect> = resolved.iter().cloned().collect();
    placed.iter_mut().for_each(place);
    let mut batch = Batch::from_effects(placed);
    batch.set_delay(Some(resolved.stagger_ms()));
    Ok(batch)
}

/// System: validate requested effects and schedule them.
pub fn queue_emissions(
    mut effects: EventReader<EmitEffect>,
    mut batches: EventReader<EmitBatch>,
    mut named: EventReader<EmitNamed>,
    cfg: Option<Res<PfxConfigRes>>,
    mut pending: ResMut<PendingEmissions>,
) {
    for EmitEffect(fx) in effects.read() {
        if let Err(e) = fx.emit(&mut *pending) {
            warn!("EmitEffect rejected: {e}");
        }
    }
    for EmitBatch(batch) in batches.read() {
        if let Err(e) = batch.emit(&mut *pending) {
            warn!("EmitBatch rejected: {e}");
        }
    }
    for req in named.read() {
        let Some(cfg) = cfg.as_deref() else {
            warn!(name = %req.name, "EmitNamed without PfxConfigRes; ignored");
            continue;
        };
        match named_request(req, cfg).and_then(|b| b.emit(&mut *pending).map(|_| ())) {
            Ok(()) => debug!(name = %req.name, "named particle effect queued"),
            Err(e) => warn!(name = %req.name, "EmitNamed rejected: {e}"),
        }
    }
}

/// System: spawn every emission whose delay elapsed this frame.
pub fn tick_pending_emissions(
    mut commands: Commands,
    time: Res<Time>,
    arena: Res<PfxArena>,
    rng: Option<ResMut<ParticleRng>>,
    mut pending: ResMut<PendingEmissions>,
) {
    // RNG is created by pfx_init.
    let Some(mut rng) = rng else { return };
    let due = pending.tick(time.delta());
    if due.is_empty() {
        return;
    }
    let mut host = CommandsHost::new(&mut commands, *arena);
    for emission in &due {
        emission.spawn(&mut host, &mut rng.0);
    }
}

/// System: semi-implicit Euler step for particle motion.
pub fn integrate_motion(
    time: Res<Time>,
    mut q: Query<
        (
            &mut Transform,
            &mut ParticleVelocity,
            Option<&ParticleAcceleration>,
        ),
        With<Particle>,
    >,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    for (mut t, mut v, a) in &mut q {
        if let Some(a) = a {
            v.0 += a.0 * dt;
        }
        t.translation += (v.0 * dt).extend(0.0);
    }
}

/// System: keep bouncy particles inside the arena by reflecting velocity.
pub fn bounce_on_walls(
    arena: Res<PfxArena>,
    mut q: Query<
        (&mut Transform, &mut ParticleVelocity, Option<&Sprite>),
        (With<Particle>, With<BounceOnWall>),
    >,
) {
    let half = arena.half_extents();
    for (mut t, mut v, sprite) in &mut q {
        let half_size = sprite
            .and_then(|s| s.custom_size)
            .unwrap_or(Vec2::ZERO)
            * 0.5;
        let limit = (half - half_size).max(Vec2::ZERO);
        if t.translation.x < -limit.x {
            t.translation.x = -limit.x;
            v.0.x = v.0.x.abs();
        } else if t.translation.x > limit.x {
            t.translation.x = limit.x;
            v.0.x = -v.0.x.abs();
        }
        if t.translation.y < -limit.y {
            t.translation.y = -limit.y;
            v.0.y = v.0.y.abs();
        } else if t.translation.y > limit.y {
            t.translation.y = limit.y;
            v.0.y = -v.0.y.abs();
        }
    }
}

/// System: tick lifespans and despawn expired auto-destroy particles.
pub fn expire_particles(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Lifespan, Has<AutoDestroy>), With<Particle>>,
) {
    for (entity, mut lifespan, auto_destroy) in &mut q {
        lifespan.tick(time.delta());
        if lifespan.finished() && auto_destroy {
            commands.entity(entity).despawn();
        }
    }
}
