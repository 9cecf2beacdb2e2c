use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use hemopicker::app::shell::ShellStatus;
use hemopicker::core::color::Rgba;
use hemopicker::interaction::clipboard::Clipboard;
use hemopicker::{AppConfig, ColorSet, ExitReason, HemopickerPlugin, Screen};

fn headless() -> App {
    let mut cfg = AppConfig::default();
    cfg.shell.fps_cap = 0;
    cfg.picker.seed = Some(11);
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(Clipboard::memory().0);
    app.add_plugins(HemopickerPlugin { config: cfg });
    app.update();
    app
}

fn keys(app: &mut App) -> Mut<'_, ButtonInput<KeyCode>> {
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>()
}

#[test]
fn space_generates_once_while_held() {
    let mut app = headless();
    keys(&mut app).press(KeyCode::Space);
    app.update();
    let first = app.world().resource::<ColorSet>().color();
    assert_ne!(first, Rgba::BLACK);
    assert!(app.world().resource::<ColorSet>().generate.pressed);
    // Held, not repeated.
    app.update();
    assert_eq!(app.world().resource::<ColorSet>().color(), first);
    keys(&mut app).release(KeyCode::Space);
    app.update();
    let set = app.world().resource::<ColorSet>();
    assert!(!set.generate.pressed);
    assert_eq!(set.color(), first);
}

#[test]
fn toggles_from_keyboard() {
    let mut app = headless();
    keys(&mut app).press(KeyCode::KeyM);
    app.update();
    assert!(app.world().resource::<ColorSet>().mutant.active);
    keys(&mut app).release(KeyCode::KeyM);
    app.update();
    let set = app.world().resource::<ColorSet>();
    assert!(set.mutant.active && !set.mutant.pressed);
}

#[test]
fn control_chord_shadows_plain_key() {
    let mut app = headless();
    {
        let mut k = keys(&mut app);
        k.press(KeyCode::ControlLeft);
        k.press(KeyCode::KeyR);
    }
    app.update();
    let set = app.world().resource::<ColorSet>();
    assert!(!set.random.active, "Ctrl+R copies, it must not toggle random");
    assert!(set.copy_buttons[1].pressed);
}

#[test]
fn generate_all_refreshes_every_slot() {
    let mut app = headless();
    keys(&mut app).press(KeyCode::KeyA);
    app.update();
    let set = app.world().resource::<ColorSet>();
    assert!(set.history().iter().all(|s| s.color != Rgba::BLACK));
}

#[test]
fn escape_exits_and_f1_opens_help() {
    let mut app = headless();
    keys(&mut app).press(KeyCode::F1);
    app.update();
    app.update();
    assert_eq!(*app.world().resource::<State<Screen>>().get(), Screen::Help);
    keys(&mut app).release(KeyCode::F1);
    app.update();
    keys(&mut app).press(KeyCode::Escape);
    app.update();
    app.update();
    // Escape on the help screen goes back rather than quitting.
    assert_eq!(*app.world().resource::<State<Screen>>().get(), Screen::Picker);
    assert!(app.world().resource::<ShellStatus>().exit.is_none());
    keys(&mut app).release(KeyCode::Escape);
    app.update();
    keys(&mut app).press(KeyCode::Escape);
    app.update();
    assert_eq!(app.world().resource::<ShellStatus>().exit, Some(ExitReason::Cancelled));
}
