use bevy::prelude::*;
use pfx_core::{Batch, Effect};

/// Emit a fully built effect.
#[derive(Event, Debug, Clone)]
pub struct EmitEffect(pub Effect);

/// Emit a staggered batch.
#[derive(Event, Debug, Clone)]
pub struct EmitBatch(pub Batch);

/// Emit an effect or batch from the loaded [`PfxConfigRes`](crate::PfxConfigRes)
/// by name. Effects are looked up first, then batches.
#[derive(Event, Debug, Clone)]
pub struct EmitNamed {
    pub name: String,
    /// Screen-space position override.
    pub at: Option<Vec2>,
    /// Screen-space point to aim at (after `at` is applied).
    pub aim: Option<Vec2>,
}

impl EmitNamed {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            at: None,
            aim: None,
        }
    }

    pub fn at(mut self, p: Vec2) -> Self {
        self.at = Some(p);
        self
    }

    pub fn aimed_at(mut self, p: Vec2) -> Self {
        self.aim = Some(p);
        self
    }
}
