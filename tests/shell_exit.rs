use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::window::WindowCloseRequested;
use hemopicker::app::shell::{ShellStatus, Teardown};
use hemopicker::interaction::clipboard::Clipboard;
use hemopicker::interaction::inputmap::types::Action;
use hemopicker::{AppConfig, ExitReason, ExitSignal, HemopickerPlugin, Screen, ShellInput};

fn headless(cfg: AppConfig) -> (App, Teardown) {
    let teardown = Teardown::default();
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(Clipboard::memory().0);
    app.insert_resource(teardown.clone());
    app.add_plugins(HemopickerPlugin { config: cfg });
    (app, teardown)
}

fn quiet() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.shell.fps_cap = 0;
    cfg
}

fn status(app: &App) -> Option<ExitReason> {
    app.world().resource::<ShellStatus>().exit.clone()
}

#[test]
fn cancel_exits_cleanly_and_tears_down_once() {
    let (mut app, teardown) = headless(quiet());
    app.update();
    assert!(app.should_exit().is_none());
    app.world_mut().send_event(ShellInput::Action(Action::Cancel));
    app.update();
    assert_eq!(status(&app), Some(ExitReason::Cancelled));
    assert_eq!(app.should_exit(), Some(AppExit::Success));
    assert!(teardown.0.has_run());
    // A second run (panic path) is a no-op.
    assert!(!teardown.0.run());
}

#[test]
fn window_close_request_is_intercepted() {
    let (mut app, teardown) = headless(quiet());
    app.update();
    app.world_mut().send_event(WindowCloseRequested { window: Entity::PLACEHOLDER });
    app.update();
    assert_eq!(status(&app), Some(ExitReason::WindowClosed));
    assert_eq!(app.should_exit(), Some(AppExit::Success));
    assert!(teardown.0.has_run());
}

#[test]
fn unknown_initial_screen_fails() {
    let mut cfg = quiet();
    cfg.shell.initial_state = "settings".into();
    let (mut app, teardown) = headless(cfg);
    app.update();
    assert_eq!(
        status(&app),
        Some(ExitReason::Failure("application state settings is not defined".into()))
    );
    assert!(app.should_exit().is_some_and(|e| e.is_error()));
    assert_eq!(*app.world().resource::<State<Screen>>().get(), Screen::Boot);
    assert!(teardown.0.has_run());
}

#[test]
fn failure_wins_over_other_signals_in_the_same_tick() {
    let (mut app, _) = headless(quiet());
    app.update();
    app.world_mut().send_event(ExitSignal(ExitReason::Cancelled));
    app.world_mut().send_event(ExitSignal(ExitReason::Failure("boom".into())));
    app.update();
    assert_eq!(status(&app), Some(ExitReason::Failure("boom".into())));
    assert!(app.should_exit().is_some_and(|e| e.is_error()));
}

#[test]
fn exit_is_settled_only_once() {
    let (mut app, _) = headless(quiet());
    app.update();
    app.world_mut().send_event(ExitSignal(ExitReason::Cancelled));
    app.update();
    app.world_mut().send_event(ExitSignal(ExitReason::Failure("late".into())));
    app.update();
    assert_eq!(status(&app), Some(ExitReason::Cancelled));
}

#[test]
fn auto_close_raises_exit() {
    let mut cfg = quiet();
    cfg.window.auto_close = 0.02;
    let (mut app, _) = headless(cfg);
    for _ in 0..200 {
        app.update();
        if app.should_exit().is_some() {
            break;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    assert_eq!(status(&app), Some(ExitReason::AutoClose));
    assert_eq!(app.should_exit(), Some(AppExit::Success));
}
