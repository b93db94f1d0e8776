// Pure data crate (no Bevy dependency).
// Provides: particle records, preset templates, the effect library file format,
// layered loading, and validation producing warnings (non-fatal).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{fs, path::Path};

mod error;
mod particle;
mod preset;

pub use error::ConfigError;
pub use particle::{ParticleColor, ParticleConfig, ParticleSettings, PALETTE_LEN};
pub use preset::{Preset, CIRCLE};

/// Screen-space arena the particles live in. Origin top-left, y down.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
}
impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 160.0,
            height: 120.0,
        }
    }
}

/// One named effect in an effect library file.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct EffectSpec {
    pub count: usize,
    /// Template the overrides are layered onto.
    pub preset: Preset,
    /// Partial overrides applied on top of `preset`.
    pub config: ParticleConfig,
    pub delay_ms: u32,
    /// Screen-space spawn position; `None` keeps the effect default.
    pub position: Option<(f32, f32)>,
    /// Host sprite kind tagged onto every particle.
    pub kind: Option<u32>,
}
impl Default for EffectSpec {
    fn default() -> Self {
        Self {
            count: 10,
            preset: Preset::Circle,
            config: ParticleConfig::default(),
            delay_ms: 0,
            position: None,
            kind: None,
        }
    }
}

impl EffectSpec {
    /// Overrides, then preset, then circle defaults.
    pub fn settings(&self) -> ParticleSettings {
        self.config.merged_over(&self.preset.config()).resolve()
    }
}

/// A staggered sequence of named effects.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct BatchSpec {
    pub effects: Vec<String>,
    /// Each listed effect is appended this many times in a row.
    pub repeat: u32,
    /// Extra delay between consecutive effects in milliseconds.
    pub stagger_ms: u32,
}
impl Default for BatchSpec {
    fn default() -> Self {
        Self {
            effects: Vec::new(),
            repeat: 1,
            stagger_ms: 0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct PfxConfig {
    /// RNG seed for particle sampling; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub arena: Option<ArenaConfig>,
    pub effects: BTreeMap<String, EffectSpec>,
    pub batches: BTreeMap<String, BatchSpec>,
}

fn ron_options() -> ron::Options {
    ron::Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

impl PfxConfig {
    /// Parse a RON document (`implicit_some` enabled, so `Some(..)` is optional).
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron_options().from_str(text)?)
    }

    /// Load from a single RON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(&path)?;
        Self::from_ron(&data)
    }

    /// Load file; on failure returns default config plus error string.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e.to_string())),
        }
    }

    /// Load multiple layers; later overrides earlier.
    /// Skips unreadable files; returns (config, used_paths, errors).
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        let mut merged = PfxConfig::default();
        let mut used = Vec::new();
        let mut errors = Vec::new();
        for p in paths {
            let path_ref = p.as_ref();
            match Self::load_from_file(path_ref) {
                Ok(layer) => {
                    merged.merge_layer(layer);
                    used.push(path_ref.as_os_str().to_string_lossy().to_string());
                }
                Err(e) => errors.push(format!("{}: {e}", path_ref.display())),
            }
        }
        (merged, used, errors)
    }

    /// Overlay a later layer: scalars replace when present, effects and batches
    /// replace by name.
    pub fn merge_layer(&mut self, layer: PfxConfig) {
        self.seed = layer.seed.or(self.seed);
        self.arena = layer.arena.or(self.arena);
        self.effects.extend(layer.effects);
        self.batches.extend(layer.batches);
    }

    pub fn arena(&self) -> ArenaConfig {
        self.arena.unwrap_or_default()
    }

    pub fn effect(&self, name: &str) -> Result<&EffectSpec, ConfigError> {
        self.effects
            .get(name)
            .ok_or_else(|| ConfigError::UnknownEffect(name.to_string()))
    }

    /// Produce validation warnings (non-fatal) for suspicious values.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        let arena = self.arena();
        if arena.width <= 0.0 || arena.height <= 0.0 {
            w.push("arena dimensions must be > 0".into());
        }
        for (name, fx) in &self.effects {
            let label = format!("effects.{name}");
            if fx.count == 0 {
                w.push(format!("{label}.count is 0; nothing will spawn"));
            }
            if fx.count > 10_000 {
                w.push(format!(
                    "{label}.count {} very high; performance may suffer",
                    fx.count
                ));
            }
            if let Some((x, y)) = fx.position {
                if x < 0.0 || y < 0.0 || x > arena.width || y > arena.height {
                    w.push(format!("{label}.position ({x}, {y}) outside arena"));
                }
            }
            w.extend(fx.settings().warnings(&label));
        }
        for (name, batch) in &self.batches {
            let label = format!("batches.{name}");
            if batch.effects.is_empty() {
                w.push(format!("{label} lists no effects"));
            }
            if batch.repeat == 0 {
                w.push(format!("{label}.repeat is 0; nothing will spawn"));
            }
            for fx in &batch.effects {
                if !self.effects.contains_key(fx) {
                    w.push(format!("{label} references unknown effect `{fx}`"));
                }
            }
        }
        w
    }
}
