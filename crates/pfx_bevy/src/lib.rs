// Bevy host for the particle emission core.
// Implements the core's ParticleHost / Scheduler over Commands and one-shot
// Timers, and owns the small amount of per-frame particle motion the host needs.

use bevy::prelude::*;

mod components;
mod events;
mod host;
mod palette;
mod resources;
mod systems;

pub use components::{
    AutoDestroy, BounceOnWall, Lifespan, Particle, ParticleAcceleration, ParticleKind,
    ParticleVelocity,
};
pub use events::{EmitBatch, EmitEffect, EmitNamed};
pub use host::{CommandsHost, SpawnedParticle};
pub use palette::{color_for_index, PARTICLE_COLORS};
pub use resources::{ParticleRng, PendingEmissions, PfxArena, PfxConfigRes, RngSeed};

/// Ordering of the particle systems within `Update`.
#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub enum PfxSet {
    /// Read emission requests and schedule them.
    Queue,
    /// Spawn emissions whose delay elapsed.
    Spawn,
    /// Move, bounce and expire live particles.
    Simulate,
}

pub struct PfxPlugin;

impl Plugin for PfxPlugin {
    fn build(&self, app: &mut App) {
        // Arena: explicit resource wins, then the loaded config, then 160x120.
        if !app.world().contains_resource::<PfxArena>() {
            let arena = app
                .world()
                .get_resource::<PfxConfigRes>()
                .map(|c| PfxArena::from(c.0.arena()))
                .unwrap_or_default();
            app.insert_resource(arena);
        }
        app.init_resource::<PendingEmissions>()
            .add_event::<EmitEffect>()
            .add_event::<EmitBatch>()
            .add_event::<EmitNamed>()
            .configure_sets(
                Update,
                (PfxSet::Queue, PfxSet::Spawn, PfxSet::Simulate).chain(),
            )
            .add_systems(Startup, systems::pfx_init)
            .add_systems(Update, systems::queue_emissions.in_set(PfxSet::Queue))
            .add_systems(
                Update,
                systems::tick_pending_emissions.in_set(PfxSet::Spawn),
            )
            .add_systems(
                Update,
                (
                    systems::integrate_motion,
                    systems::bounce_on_walls,
                    systems::expire_particles,
                )
                    .chain()
                    .in_set(PfxSet::Simulate),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pfx_config::PfxConfig;

    #[test]
    fn plugin_adds() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(PfxPlugin);
        app.update();
        assert!(app.world().get_resource::<ParticleRng>().is_some(), "ParticleRng missing");
        assert!(app.world().get_resource::<PendingEmissions>().is_some());
    }

    #[test]
    fn arena_taken_from_config() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        let cfg = PfxConfig::from_ron("(arena: (width: 320.0, height: 200.0))").expect("parse");
        app.insert_resource(PfxConfigRes(cfg));
        app.add_plugins(PfxPlugin);
        let arena = app.world().resource::<PfxArena>();
        assert_eq!((arena.width, arena.height), (320.0, 200.0));
    }

    #[test]
    fn explicit_arena_wins() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(PfxArena {
            width: 64.0,
            height: 64.0,
        });
        app.insert_resource(PfxConfigRes::default());
        app.add_plugins(PfxPlugin);
        assert_eq!(app.world().resource::<PfxArena>().width, 64.0);
    }
}
