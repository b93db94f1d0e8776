//! Particle configuration records.
//!
//! [`ParticleConfig`] is the partial form users write (every field optional) and
//! [`ParticleSettings`] is the complete form emission reads. Resolving a partial
//! config always goes through a base record, so an unset field can never reach
//! the sampler.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::preset::CIRCLE;

/// Number of indexed palette colours available to particles.
pub const PALETTE_LEN: u8 = 16;

/// Particle fill colour.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParticleColor {
    /// Draw a fresh palette colour for every particle.
    #[default]
    Rainbow,
    /// Fill every particle with this palette index.
    Index(u8),
}

/// Partial particle configuration. `None` means "take the base value"; any
/// `Some`, including `Some(0)` and `Some(false)`, is an explicit override.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct ParticleConfig {
    /// Minimum particle size in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size: Option<u32>,
    /// Maximum particle size in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ParticleColor>,
    /// Initial speed in pixels per second.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
    /// Draw the speed uniformly from `[0, speed]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_varies: Option<bool>,
    /// Lifespan in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifespan: Option<u32>,
    /// Draw the lifespan uniformly from `[1, lifespan]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifespan_varies: Option<bool>,
    /// Bounce off the arena edges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bouncy: Option<bool>,
    /// Emission direction in radians, 0 = straight up, clockwise positive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<f32>,
    /// Width of the emission cone in radians.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spread_angle: Option<f32>,
    /// Constant downward acceleration in pixels per second squared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravity: Option<f32>,
}

impl ParticleConfig {
    /// Field-wise overlay of `self` on top of `base`. Neither input changes.
    pub fn merged_over(&self, base: &ParticleConfig) -> ParticleConfig {
        ParticleConfig {
            min_size: self.min_size.or(base.min_size),
            max_size: self.max_size.or(base.max_size),
            color: self.color.or(base.color),
            speed: self.speed.or(base.speed),
            speed_varies: self.speed_varies.or(base.speed_varies),
            lifespan: self.lifespan.or(base.lifespan),
            lifespan_varies: self.lifespan_varies.or(base.lifespan_varies),
            bouncy: self.bouncy.or(base.bouncy),
            direction: self.direction.or(base.direction),
            spread_angle: self.spread_angle.or(base.spread_angle),
            gravity: self.gravity.or(base.gravity),
        }
    }

    /// Fill every unset field from a complete base record.
    pub fn resolve_against(&self, base: &ParticleSettings) -> ParticleSettings {
        ParticleSettings {
            min_size: self.min_size.unwrap_or(base.min_size),
            max_size: self.max_size.unwrap_or(base.max_size),
            color: self.color.unwrap_or(base.color),
            speed: self.speed.unwrap_or(base.speed),
            speed_varies: self.speed_varies.unwrap_or(base.speed_varies),
            lifespan: self.lifespan.unwrap_or(base.lifespan),
            lifespan_varies: self.lifespan_varies.unwrap_or(base.lifespan_varies),
            bouncy: self.bouncy.unwrap_or(base.bouncy),
            direction: self.direction.unwrap_or(base.direction),
            spread_angle: self.spread_angle.unwrap_or(base.spread_angle),
            gravity: self.gravity.unwrap_or(base.gravity),
        }
    }

    /// Resolve against the circle preset, the global default.
    pub fn resolve(&self) -> ParticleSettings {
        self.resolve_against(&CIRCLE)
    }

    /// True when every field is set.
    pub fn is_complete(&self) -> bool {
        self.min_size.is_some()
            && self.max_size.is_some()
            && self.color.is_some()
            && self.speed.is_some()
            && self.speed_varies.is_some()
            && self.lifespan.is_some()
            && self.lifespan_varies.is_some()
            && self.bouncy.is_some()
            && self.direction.is_some()
            && self.spread_angle.is_some()
            && self.gravity.is_some()
    }
}

/// Fully resolved particle configuration used by emission.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct ParticleSettings {
    pub min_size: u32,
    pub max_size: u32,
    pub color: ParticleColor,
    pub speed: f32,
    pub speed_varies: bool,
    pub lifespan: u32,
    pub lifespan_varies: bool,
    pub bouncy: bool,
    pub direction: f32,
    pub spread_angle: f32,
    pub gravity: f32,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        CIRCLE
    }
}

impl From<ParticleSettings> for ParticleConfig {
    fn from(s: ParticleSettings) -> Self {
        Self {
            min_size: Some(s.min_size),
            max_size: Some(s.max_size),
            color: Some(s.color),
            speed: Some(s.speed),
            speed_varies: Some(s.speed_varies),
            lifespan: Some(s.lifespan),
            lifespan_varies: Some(s.lifespan_varies),
            bouncy: Some(s.bouncy),
            direction: Some(s.direction),
            spread_angle: Some(s.spread_angle),
            gravity: Some(s.gravity),
        }
    }
}

impl ParticleSettings {
    /// Reject settings whose sampling ranges cannot be drawn from.
    pub fn check(&self) -> Result<(), ConfigError> {
        for (field, v) in [
            ("speed", self.speed),
            ("direction", self.direction),
            ("spread_angle", self.spread_angle),
            ("gravity", self.gravity),
        ] {
            if !v.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        if self.min_size > self.max_size {
            return Err(ConfigError::inverted("size", self.min_size, self.max_size));
        }
        if self.spread_angle < 0.0 {
            let half = self.spread_angle * 0.5;
            return Err(ConfigError::inverted(
                "spread_angle",
                self.direction - half,
                self.direction + half,
            ));
        }
        if self.speed_varies && self.speed < 0.0 {
            return Err(ConfigError::inverted("speed", 0.0f32, self.speed));
        }
        if self.lifespan_varies && self.lifespan == 0 {
            return Err(ConfigError::inverted("lifespan", 1u32, 0u32));
        }
        Ok(())
    }

    /// Non-fatal warnings for values that are legal but probably unintended.
    pub fn warnings(&self, label: &str) -> Vec<String> {
        let mut w = Vec::new();
        if let Err(e) = self.check() {
            w.push(format!("{label}: {e}"));
        }
        if self.max_size == 0 {
            w.push(format!("{label}: max_size is 0; particles are invisible"));
        } else if self.min_size == 0 {
            w.push(format!("{label}: min_size is 0; some particles may be invisible"));
        }
        if self.lifespan == 0 {
            w.push(format!("{label}: lifespan is 0; particles vanish immediately"));
        }
        if let ParticleColor::Index(i) = self.color {
            if i == 0 {
                w.push(format!("{label}: color index 0 is transparent"));
            } else if i >= PALETTE_LEN {
                w.push(format!(
                    "{label}: color index {i} outside palette (0..{PALETTE_LEN})"
                ));
            }
        }
        if self.spread_angle > std::f32::consts::TAU + 1e-4 {
            w.push(format!(
                "{label}: spread_angle {} exceeds a full turn",
                self.spread_angle
            ));
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::Preset;

    #[test]
    fn omitted_color_means_rainbow() {
        assert_eq!(ParticleColor::default(), ParticleColor::Rainbow);
        let cfg = ParticleConfig {
            speed: Some(3.0),
            ..Default::default()
        };
        assert_eq!(cfg.color, None);
        assert_eq!(cfg.resolve().color, ParticleColor::Rainbow);
    }

    #[test]
    fn explicit_false_and_zero_override_base() {
        let partial = ParticleConfig {
            bouncy: Some(false),
            gravity: Some(0.0),
            min_size: Some(0),
            ..Default::default()
        };
        let base = ParticleSettings {
            bouncy: true,
            gravity: 12.0,
            ..Preset::Circle.settings()
        };
        let s = partial.resolve_against(&base);
        assert!(!s.bouncy);
        assert_eq!(s.gravity, 0.0);
        assert_eq!(s.min_size, 0);
        assert_eq!(s.max_size, base.max_size);
    }

    #[test]
    fn merge_is_idempotent_for_complete_configs() {
        let complete: ParticleConfig = Preset::Smoke.settings().into();
        assert!(complete.is_complete());
        for preset in Preset::ALL {
            assert_eq!(complete.merged_over(&preset.config()), complete);
            assert_eq!(
                complete.resolve_against(&preset.settings()),
                Preset::Smoke.settings()
            );
        }
    }

    #[test]
    fn merge_leaves_inputs_untouched() {
        let partial = ParticleConfig {
            speed: Some(5.0),
            ..Default::default()
        };
        let base = Preset::Line.config();
        let mut merged = partial.merged_over(&base);
        merged.spread_angle = Some(1.0);
        assert_eq!(partial.spread_angle, None);
        assert_eq!(base.spread_angle, Some(0.0));
        assert_eq!(Preset::Line.config().spread_angle, Some(0.0));
    }

    #[test]
    fn check_rejects_inverted_ranges() {
        let base = ParticleSettings::default();
        let sizes = ParticleSettings {
            min_size: 5,
            max_size: 2,
            ..base
        };
        assert!(matches!(
            sizes.check(),
            Err(ConfigError::InvertedRange { field: "size", .. })
        ));
        let speed = ParticleSettings {
            speed: -1.0,
            speed_varies: true,
            ..base
        };
        assert!(matches!(
            speed.check(),
            Err(ConfigError::InvertedRange { field: "speed", .. })
        ));
        // A fixed negative speed just reverses the direction.
        let reversed = ParticleSettings {
            speed: -1.0,
            speed_varies: false,
            ..base
        };
        assert!(reversed.check().is_ok());
        let lifespan = ParticleSettings {
            lifespan: 0,
            lifespan_varies: true,
            ..base
        };
        assert!(matches!(
            lifespan.check(),
            Err(ConfigError::InvertedRange { field: "lifespan", .. })
        ));
        let spread = ParticleSettings {
            spread_angle: -0.5,
            ..base
        };
        assert!(matches!(
            spread.check(),
            Err(ConfigError::InvertedRange { field: "spread_angle", .. })
        ));
    }

    #[test]
    fn check_rejects_non_finite() {
        let s = ParticleSettings {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            s.check(),
            Err(ConfigError::NonFinite { field: "gravity" })
        ));
    }

    #[test]
    fn warnings_flag_transparent_color() {
        let s = ParticleSettings {
            color: ParticleColor::Index(0),
            ..Default::default()
        };
        let w = s.warnings("spark");
        assert!(w.iter().any(|m| m.contains("transparent")), "{w:?}");
        assert!(ParticleSettings::default().warnings("circle").is_empty());
    }
}
