use std::time::Duration;

use bevy::prelude::*;
use pfx_config::{ArenaConfig, PfxConfig};
use pfx_core::{Emission, Scheduler};

/// Screen-space arena mapped onto the world with its centre at the origin.
/// Screen space is y down from the top-left corner; world space is y up.
#[derive(Resource, Debug, Copy, Clone, PartialEq)]
pub struct PfxArena {
    pub width: f32,
    pub height: f32,
}

impl Default for PfxArena {
    fn default() -> Self {
        ArenaConfig::default().into()
    }
}

impl From<ArenaConfig> for PfxArena {
    fn from(a: ArenaConfig) -> Self {
        Self {
            width: a.width,
            height: a.height,
        }
    }
}

impl PfxArena {
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }

    pub fn screen_to_world(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x - self.width * 0.5, self.height * 0.5 - p.y)
    }

    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x + self.width * 0.5, self.height * 0.5 - p.y)
    }

    /// Directions and rates only flip y.
    pub fn screen_to_world_vector(&self, v: Vec2) -> Vec2 {
        Vec2::new(v.x, -v.y)
    }
}

/// Deterministic RNG seed resource (set once at startup / tests for reproducible particles).
#[derive(Resource, Debug, Copy, Clone, Default)]
pub struct RngSeed(pub u64);

/// RNG dedicated to particle sampling.
#[derive(Resource)]
pub struct ParticleRng(pub rand::rngs::StdRng);

/// Loaded effect library as a Bevy resource.
#[derive(Resource, Debug, Clone, Default)]
pub struct PfxConfigRes(pub PfxConfig);

#[derive(Debug)]
struct ScheduledEmission {
    timer: Timer,
    emission: Emission,
    /// Queued since the last tick; the elapsed frame time predates it.
    fresh: bool,
}

/// Emissions waiting for their delay, ticked once per frame.
#[derive(Resource, Debug, Default)]
pub struct PendingEmissions {
    queue: Vec<ScheduledEmission>,
}

impl PendingEmissions {
    pub fn len(&self) -> usize {
        self.queue.len()
    }
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Advance every timer by `delta` and take the finished emissions in
    /// scheduling order. Entries queued since the previous tick only advance
    /// by zero, so zero delays fire now and nothing fires early.
    pub fn tick(&mut self, delta: Duration) -> Vec<Emission> {
        let mut due = Vec::new();
        let mut waiting = Vec::with_capacity(self.queue.len());
        for mut entry in self.queue.drain(..) {
            let step = if entry.fresh { Duration::ZERO } else { delta };
            entry.fresh = false;
            entry.timer.tick(step);
            if entry.timer.finished() {
                due.push(entry.emission);
            } else {
                waiting.push(entry);
            }
        }
        self.queue = waiting;
        due
    }
}

impl Scheduler for PendingEmissions {
    fn schedule_once(&mut self, delay_ms: u32, emission: Emission) {
        self.queue.push(ScheduledEmission {
            timer: Timer::new(Duration::from_millis(u64::from(delay_ms)), TimerMode::Once),
            emission,
            fresh: true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pfx_core::Effect;

    #[test]
    fn arena_centre_maps_to_origin() {
        let arena = PfxArena::default();
        assert_eq!(arena.screen_to_world(Vec2::new(80.0, 60.0)), Vec2::ZERO);
        assert_eq!(arena.screen_to_world(Vec2::ZERO), Vec2::new(-80.0, 60.0));
        let p = Vec2::new(13.0, 101.0);
        assert_eq!(arena.world_to_screen(arena.screen_to_world(p)), p);
        assert_eq!(
            arena.screen_to_world_vector(Vec2::new(3.0, -100.0)),
            Vec2::new(3.0, 100.0)
        );
    }

    #[test]
    fn pending_fires_in_delay_order() {
        let mut pending = PendingEmissions::default();
        let mut fx = Effect::new(1);
        fx.set_delay(100).emit(&mut pending).unwrap();
        fx.set_delay(0).set_count(2).emit(&mut pending).unwrap();
        assert_eq!(pending.len(), 2);

        let due = pending.tick(Duration::from_millis(10));
        assert_eq!(due.iter().map(|e| e.count()).collect::<Vec<_>>(), vec![2]);
        assert!(pending.tick(Duration::from_millis(60)).is_empty());
        let due = pending.tick(Duration::from_millis(40));
        assert_eq!(due.len(), 1);
        assert!(pending.is_empty());
    }

    #[test]
    fn frame_time_before_scheduling_is_not_counted() {
        let mut pending = PendingEmissions::default();
        Effect::new(1).set_delay(50).emit(&mut pending).unwrap();
        assert!(pending.tick(Duration::from_millis(50)).is_empty());
        assert!(pending.tick(Duration::from_millis(49)).is_empty());
        assert_eq!(pending.tick(Duration::from_millis(1)).len(), 1);
    }
}
