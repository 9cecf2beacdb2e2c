use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::{ExitCondition, PresentMode, WindowResolution};
use clap::Parser;

use hemopicker::app::shell::Teardown;
use hemopicker::core::config::{AppConfig, Scheduling};
use hemopicker::rendering::textures::TextureSet;
use hemopicker::HemopickerPlugin;

#[derive(Parser, Debug)]
#[command(name = "hemopicker", version, about = "Pick, generate and copy caste blood colors", long_about = None)]
struct Cli {
    /// Base config; `<name>.local.ron` next to it is layered on top when present.
    #[arg(long, default_value = "assets/config/hemopicker.ron")]
    config: PathBuf,
    /// Texture directory (overrides `textures.dir`).
    #[arg(long)]
    textures: Option<String>,
    /// Fixed RNG seed.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum)]
    scheduling: Option<Scheduling>,
    /// Exit after this many seconds.
    #[arg(long)]
    auto_close: Option<f32>,
}

/// Config loading outcome, logged once the log plugin is up.
#[derive(Resource, Debug, Default)]
struct ConfigReport {
    used: Vec<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

fn load_config(cli: &Cli) -> (AppConfig, ConfigReport) {
    let overlay = cli.config.with_extension("local.ron");
    let paths: Vec<PathBuf> = if overlay.exists() { vec![cli.config.clone(), overlay] } else { vec![cli.config.clone()] };
    let (mut cfg, used, errors) = AppConfig::load_layered(&paths);
    if let Some(dir) = &cli.textures {
        cfg.textures.dir.clone_from(dir);
    }
    if let Some(seed) = cli.seed {
        cfg.picker.seed = Some(seed);
    }
    if let Some(scheduling) = cli.scheduling {
        cfg.shell.scheduling = scheduling;
    }
    if let Some(secs) = cli.auto_close {
        cfg.window.auto_close = secs;
    }
    let warnings = cfg.validate();
    (cfg, ConfigReport { used, errors, warnings })
}

fn report_config(report: Res<ConfigReport>) {
    for path in &report.used {
        info!(target: "config", "loaded {path}");
    }
    for e in &report.errors {
        warn!(target: "config", "{e}");
    }
    for w in &report.warnings {
        warn!(target: "config", "{w}");
    }
}

fn build_app(cfg: AppConfig, report: ConfigReport, textures: TextureSet, teardown: Teardown) -> App {
    let window = Window {
        title: cfg.window.title.clone(),
        resolution: WindowResolution::new(cfg.window.width, cfg.window.height),
        resizable: cfg.window.resizable,
        present_mode: if cfg.window.vsync { PresentMode::AutoVsync } else { PresentMode::AutoNoVsync },
        ..default()
    };
    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(window),
                // The shell turns close requests into an exit signal.
                exit_condition: ExitCondition::DontExit,
                close_when_requested: false,
            })
            .set(LogPlugin { filter: cfg.shell.log_filter.clone(), ..default() })
            .set(ImagePlugin::default_nearest()),
    )
    .insert_resource(teardown)
    .insert_resource(textures)
    .insert_resource(report)
    .add_systems(Startup, report_config)
    .add_plugins(HemopickerPlugin { config: cfg });
    app
}

fn main() -> AppExit {
    let cli = Cli::parse();
    let (cfg, report) = load_config(&cli);
    let textures = match TextureSet::load(&cfg.textures) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e:#}");
            return AppExit::from_code(1);
        }
    };
    let teardown = Teardown::default();
    let mut app = build_app(cfg, report, textures, teardown.clone());
    match panic::catch_unwind(AssertUnwindSafe(move || app.run())) {
        Ok(exit) => exit,
        Err(_) => {
            eprintln!("error: main loop panicked");
            teardown.0.run();
            AppExit::from_code(1)
        }
    }
}
