use std::path::PathBuf;

use pfx_config::{ParticleColor, PfxConfig, Preset};

fn shipped_library() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets/config/effects.ron")
}

#[test]
fn shipped_library_parses_and_validates_clean() {
    let cfg = PfxConfig::load_from_file(shipped_library()).expect("shipped effects.ron parses");
    let warnings = cfg.validate();
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    assert_eq!(cfg.arena().width, 160.0);
    assert!(cfg.effects.contains_key("burst"));
    assert!(cfg.batches.contains_key("finale"));
}

#[test]
fn shipped_overrides_layer_onto_presets() {
    let cfg = PfxConfig::load_from_file(shipped_library()).expect("parse");
    let ring = cfg.effect("ring").expect("ring");
    assert_eq!(ring.preset, Preset::Ring);
    let s = ring.settings();
    assert_eq!(s.color, ParticleColor::Index(9));
    assert!(!s.speed_varies);

    let sparks = cfg.effect("sparks").expect("sparks").settings();
    assert_eq!((sparks.min_size, sparks.max_size), (1, 1));
    assert_eq!(sparks.lifespan, 400);
    assert!(!sparks.bouncy);
}

#[test]
fn missing_local_layer_is_reported_not_fatal() {
    let missing = shipped_library().with_file_name("does_not_exist.local.ron");
    let (cfg, used, errors) = PfxConfig::load_layered([shipped_library(), missing]);
    assert_eq!(used.len(), 1);
    assert_eq!(errors.len(), 1);
    assert_eq!(cfg.effects.len(), 5);
}
