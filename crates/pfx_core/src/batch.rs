//! Staggered sequences of effects.

use pfx_config::{BatchSpec, ConfigError, PfxConfig};
use tracing::debug;

use crate::effect::Effect;
use crate::host::Scheduler;

/// Ordered effects fired `index * stagger_ms` apart, on top of each effect's
/// own delay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    effects: Vec<Effect>,
    stagger_ms: u32,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_effects(effects: Vec<Effect>) -> Self {
        Self {
            effects,
            stagger_ms: 0,
        }
    }

    /// Build from a library entry, resolving effect names against `cfg`.
    pub fn from_spec(spec: &BatchSpec, cfg: &PfxConfig) -> Result<Self, ConfigError> {
        let mut batch = Self::new();
        for name in &spec.effects {
            let fx = Effect::from_spec(cfg.effect(name)?);
            batch.add_times(&fx, spec.repeat as usize);
        }
        batch.set_delay(Some(spec.stagger_ms));
        Ok(batch)
    }

    pub fn add(&mut self, effect: &Effect) -> &mut Self {
        self.add_times(effect, 1)
    }

    /// Append `times` copies of `effect` so it fires that many times in a row.
    pub fn add_times(&mut self, effect: &Effect, times: usize) -> &mut Self {
        self.effects.extend(std::iter::repeat(effect).take(times).cloned());
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.effects.clear();
        self
    }

    /// Delay between consecutive effects; `None` resets it to 0.
    pub fn set_delay(&mut self, ms: Option<u32>) -> &mut Self {
        self.stagger_ms = ms.unwrap_or(0);
        self
    }

    pub fn stagger_ms(&self) -> u32 {
        self.stagger_ms
    }
    pub fn len(&self) -> usize {
        self.effects.len()
    }
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Effect> {
        self.effects.iter()
    }

    /// Schedule every effect. All effects are validated first, so a malformed
    /// one means nothing is scheduled.
    pub fn emit<S: Scheduler + ?Sized>(&self, scheduler: &mut S) -> Result<&Self, ConfigError> {
        for fx in &self.effects {
            fx.settings().check()?;
        }
        debug!(
            effects = self.effects.len(),
            stagger_ms = self.stagger_ms,
            "emitting particle batch"
        );
        for (i, fx) in self.effects.iter().enumerate() {
            let offset = u32::try_from(i)
                .unwrap_or(u32::MAX)
                .saturating_mul(self.stagger_ms);
            fx.emit_after(scheduler, offset)?;
        }
        Ok(self)
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a Effect;
    type IntoIter = std::slice::Iter<'a, Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.effects.iter()
    }
}
