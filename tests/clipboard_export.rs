use std::sync::Arc;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use hemopicker::app::shell::PendingTasks;
use hemopicker::colorset::layout;
use hemopicker::core::color::ExportFormat;
use hemopicker::core::config::Scheduling;
use hemopicker::interaction::clipboard::{Clipboard, MemoryClipboard};
use hemopicker::interaction::inputmap::types::Action;
use hemopicker::{AppConfig, ColorSet, HemopickerPlugin, ShellInput};

fn headless(scheduling: Scheduling) -> (App, Arc<MemoryClipboard>) {
    let mut cfg = AppConfig::default();
    cfg.shell.fps_cap = 0;
    cfg.shell.scheduling = scheduling;
    cfg.picker.seed = Some(3);
    let (clipboard, sink) = Clipboard::memory();
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(clipboard);
    app.add_plugins(HemopickerPlugin { config: cfg });
    app.update();
    (app, sink)
}

fn copy_all(scheduling: Scheduling) {
    let (mut app, sink) = headless(scheduling);
    app.world_mut().send_event(ShellInput::Action(Action::Generate));
    app.update();
    for (i, format) in ExportFormat::ALL.into_iter().enumerate() {
        let r = layout::copy_rect(i);
        let pos = Vec2::new(r.x as f32 + 5.0, r.y as f32 + 5.0);
        app.world_mut().send_event(ShellInput::MouseDown { button: MouseButton::Left, pos });
        app.update();
        // Joined before the tick ended, whichever scheduling is used.
        assert!(app.world().resource::<PendingTasks>().is_empty());
        let color = app.world().resource::<ColorSet>().color();
        assert_eq!(sink.last(), Some(format.export(color)));
    }
    assert_eq!(sink.writes().len(), 3);
}

#[test]
fn synchronous_copy_writes_inline() {
    copy_all(Scheduling::Synchronous);
}

#[test]
fn cooperative_copy_is_joined_within_the_tick() {
    copy_all(Scheduling::Cooperative);
}

#[test]
fn hex_shortcut_matches_reference_format() {
    let (mut app, sink) = headless(Scheduling::Cooperative);
    app.world_mut().send_event(ShellInput::Action(Action::CopyHex));
    app.update();
    assert_eq!(sink.last().as_deref(), Some("#000000"));
}
