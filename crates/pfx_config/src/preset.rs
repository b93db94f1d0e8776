//! Named preset templates.
//!
//! Templates are constants: [`Preset::config`] and [`Preset::settings`] return
//! fresh values, so mutating a result never reaches the template.

use std::f32::consts::{FRAC_PI_2, TAU};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::particle::{ParticleColor, ParticleConfig, ParticleSettings};

/// Wide random burst. Every other preset falls back to these values.
pub const CIRCLE: ParticleSettings = ParticleSettings {
    min_size: 1,
    max_size: 4,
    color: ParticleColor::Rainbow,
    speed: 100.0,
    speed_varies: true,
    lifespan: 1000,
    lifespan_varies: true,
    bouncy: true,
    direction: 0.0,
    spread_angle: TAU,
    gravity: 0.0,
};

const LINE: ParticleConfig = ParticleConfig {
    min_size: None,
    max_size: None,
    color: None,
    speed: None,
    speed_varies: Some(false),
    lifespan: None,
    lifespan_varies: Some(false),
    bouncy: None,
    direction: None,
    spread_angle: Some(0.0),
    gravity: None,
};

const RING: ParticleConfig = ParticleConfig {
    min_size: None,
    max_size: None,
    color: None,
    speed: None,
    speed_varies: Some(false),
    lifespan: None,
    lifespan_varies: Some(true),
    bouncy: None,
    direction: None,
    spread_angle: None,
    gravity: None,
};

// Negative gravity drifts upward.
const SMOKE: ParticleSettings = ParticleSettings {
    min_size: 1,
    max_size: 6,
    color: ParticleColor::Index(1),
    speed: 20.0,
    speed_varies: true,
    lifespan: 3000,
    lifespan_varies: true,
    bouncy: false,
    direction: 0.0,
    spread_angle: FRAC_PI_2,
    gravity: -10.0,
};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Preset {
    #[default]
    Circle,
    /// Fixed narrow jet.
    Line,
    /// Constant speed, so particles travel as an expanding ring.
    Ring,
    Smoke,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Preset::Circle, Preset::Line, Preset::Ring, Preset::Smoke];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Circle => "circle",
            Preset::Line => "line",
            Preset::Ring => "ring",
            Preset::Smoke => "smoke",
        }
    }

    /// The template as written (partial for line and ring).
    pub fn config(self) -> ParticleConfig {
        match self {
            Preset::Circle => CIRCLE.into(),
            Preset::Line => LINE,
            Preset::Ring => RING,
            Preset::Smoke => SMOKE.into(),
        }
    }

    /// The template resolved against the circle defaults.
    pub fn settings(self) -> ParticleSettings {
        self.config().resolve_against(&CIRCLE)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown preset `{s}`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_presets_fall_back_to_circle() {
        let line = Preset::Line.settings();
        assert!(!line.speed_varies);
        assert!(!line.lifespan_varies);
        assert_eq!(line.spread_angle, 0.0);
        assert_eq!(line.speed, CIRCLE.speed);
        assert_eq!(line.color, ParticleColor::Rainbow);

        let ring = Preset::Ring.settings();
        assert!(!ring.speed_varies);
        assert!(ring.lifespan_varies);
        assert_eq!(ring.spread_angle, TAU);
    }

    #[test]
    fn smoke_drifts_upward() {
        let smoke = Preset::Smoke.settings();
        assert!(smoke.gravity < 0.0);
        assert!(!smoke.bouncy);
        assert_eq!(smoke.color, ParticleColor::Index(1));
    }

    #[test]
    fn templates_are_independent_copies() {
        let mut c = Preset::Circle.config();
        c.speed = Some(1.0);
        assert_eq!(Preset::Circle.config().speed, Some(100.0));
        let mut s = Preset::Smoke.settings();
        s.gravity = 50.0;
        assert_eq!(Preset::Smoke.settings().gravity, -10.0);
    }

    #[test]
    fn parse_names() {
        assert_eq!("Smoke".parse::<Preset>(), Ok(Preset::Smoke));
        assert_eq!(" line ".parse::<Preset>(), Ok(Preset::Line));
        assert!("fog".parse::<Preset>().is_err());
        for p in Preset::ALL {
            assert_eq!(p.to_string().parse::<Preset>(), Ok(p));
        }
    }
}
