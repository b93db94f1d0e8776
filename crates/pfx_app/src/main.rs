/*!
Particle effects playground.

* Layered effect library (`assets/config/effects.ron` + `effects.local.ron`).
* Load issues and validation warnings are logged at startup, never fatal.
* Left click fires the selected effect or batch at the cursor; right click fires
  it from its configured position aimed at the cursor. Tab cycles the selection.
*/

use anyhow::anyhow;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use pfx_bevy::{EmitNamed, PfxArena, PfxConfigRes, PfxPlugin, PfxSet};
use pfx_config::{EffectSpec, PfxConfig, Preset};

/// Window pixels per arena unit.
const ZOOM: f32 = 4.0;

// ---------------- Config Loading ----------------

const CONFIG_LAYERS: [&str; 2] = [
    "assets/config/effects.ron",
    "assets/config/effects.local.ron",
];

/// Outcome of loading the effect library, logged once the log plugin is up.
#[derive(Resource, Debug, Default)]
struct ConfigReport {
    used: Vec<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
    preset_fallback: bool,
}

fn load_config<P: AsRef<std::path::Path>>(layers: &[P]) -> (PfxConfig, ConfigReport) {
    let (mut cfg, used, errors) = PfxConfig::load_layered(layers);
    let preset_fallback = cfg.effects.is_empty() && cfg.batches.is_empty();
    if preset_fallback {
        for preset in Preset::ALL {
            cfg.effects.insert(
                preset.name().to_string(),
                EffectSpec {
                    count: 20,
                    preset,
                    ..Default::default()
                },
            );
        }
    }
    let report = ConfigReport {
        used,
        errors,
        warnings: cfg.validate(),
        preset_fallback,
    };
    (cfg, report)
}

fn log_config_report(report: Res<ConfigReport>, cfg: Res<PfxConfigRes>) {
    for e in &report.errors {
        warn!("CONFIG LOAD ISSUE: {e}");
    }
    if report.used.is_empty() {
        info!("No config layers found; using defaults");
    } else {
        info!(used = ?report.used, "Config layers loaded");
    }
    if report.preset_fallback {
        info!("Effect library empty; registered one effect per preset");
    }
    for w in &report.warnings {
        warn!("CONFIG WARNING: {w}");
    }
    let arena = cfg.0.arena();
    info!(
        effects = cfg.0.effects.len(),
        batches = cfg.0.batches.len(),
        width = arena.width,
        height = arena.height,
        seeded = cfg.0.seed.is_some(),
        "Effect library summary"
    );
}

// ---------------- Selection ----------------

/// Every effect then every batch name, in library order.
#[derive(Resource, Debug, Default)]
struct Library {
    names: Vec<String>,
    selected: usize,
}

impl Library {
    fn from_config(cfg: &PfxConfig) -> Self {
        let names = cfg
            .effects
            .keys()
            .chain(cfg.batches.keys())
            .cloned()
            .collect();
        Self { names, selected: 0 }
    }

    fn current(&self) -> Option<&str> {
        self.names.get(self.selected).map(String::as_str)
    }
}

fn setup(mut commands: Commands, arena: Res<PfxArena>, library: Res<Library>) {
    commands.spawn((Camera2d, Transform::from_scale(Vec3::splat(1.0 / ZOOM))));
    commands.spawn((
        Sprite::from_color(
            Color::srgb(0.06, 0.06, 0.09),
            Vec2::new(arena.width, arena.height),
        ),
        Transform::from_xyz(0.0, 0.0, -1.0),
    ));
    if let Some(name) = library.current() {
        info!(effect = name, "selected");
    }
}

fn cycle_selection(keys: Res<ButtonInput<KeyCode>>, mut library: ResMut<Library>) {
    if !keys.just_pressed(KeyCode::Tab) || library.names.is_empty() {
        return;
    }
    library.selected = (library.selected + 1) % library.names.len();
    if let Some(name) = library.current() {
        info!(effect = name, "selected");
    }
}

fn cursor_screen_pos(
    window: &Window,
    camera_q: &Query<(&Camera, &GlobalTransform)>,
    arena: &PfxArena,
) -> Option<Vec2> {
    let cursor = window.cursor_position()?;
    let (camera, cam_tf) = camera_q.iter().next()?;
    let world = camera.viewport_to_world_2d(cam_tf, cursor).ok()?;
    Some(arena.world_to_screen(world))
}

fn fire_on_click(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    arena: Res<PfxArena>,
    library: Res<Library>,
    mut emit: EventWriter<EmitNamed>,
) {
    let left = buttons.just_pressed(MouseButton::Left);
    let right = buttons.just_pressed(MouseButton::Right);
    if !(left || right) {
        return;
    }
    let Some(name) = library.current() else { return };
    let Ok(window) = windows.single() else { return };
    let Some(target) = cursor_screen_pos(window, &camera_q, &arena) else {
        return;
    };
    let request = EmitNamed::new(name);
    if left {
        emit.write(request.at(target));
    } else {
        emit.write(request.aimed_at(target));
    }
}

// ---------------- Main ----------------

fn main() -> anyhow::Result<()> {
    let (cfg, report) = load_config(&CONFIG_LAYERS);
    let arena = cfg.arena();
    let library = Library::from_config(&cfg);

    let mut app = App::new();
    app.insert_resource(PfxConfigRes(cfg))
        .insert_resource(library)
        .insert_resource(report)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "pfx playground".into(),
                resolution: (arena.width * ZOOM, arena.height * ZOOM).into(),
                resizable: true,
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_plugins(PfxPlugin)
        .add_systems(Startup, (log_config_report, setup))
        .add_systems(
            Update,
            (cycle_selection, fire_on_click)
                .chain()
                .before(PfxSet::Queue),
        );

    match app.run() {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => Err(anyhow!("pfx playground exited with code {code}")),
    }
}
