//! Engine-agnostic particle emission.
//!
//! An [`Effect`] owns a resolved [`ParticleSettings`] record plus count, delay and
//! position. Emitting validates it, snapshots it into an [`Emission`] and hands
//! that to a [`Scheduler`]; when the delay elapses the host calls
//! [`Emission::spawn`], which samples every particle independently and drives
//! the host through [`ParticleHost`].
//!
//! Coordinates are host screen space: x right, y down. Direction 0 is straight
//! up and grows clockwise.

pub mod angle;
pub mod batch;
pub mod effect;
pub mod host;
pub mod kinematics;
pub mod timer_queue;

pub use angle::{aim_direction, direction_vector, Angle, UPWARD_OFFSET};
pub use batch::Batch;
pub use effect::{Effect, Emission, DEFAULT_POSITION};
pub use glam::Vec2;
pub use host::{ParticleHost, Scheduler, SpriteFlag};
pub use kinematics::{sample_particle, ParticleSample};
pub use timer_queue::TimerQueue;

pub use pfx_config::{
    ConfigError, ParticleColor, ParticleConfig, ParticleSettings, Preset, PALETTE_LEN,
};
