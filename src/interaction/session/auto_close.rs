use crate::app::shell::{ExitReason, ExitSignal};
use crate::core::config::AppConfig;
use crate::core::system::system_order::ShellPhase;
use bevy::prelude::*;

#[derive(Resource, Deref, DerefMut)]
struct AutoCloseTimer(Timer);

/// Raises an exit signal once `window.autoClose` seconds have passed (0 disables).
pub struct AutoClosePlugin;

impl Plugin for AutoClosePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_autoclose)
            .add_systems(Update, check_autoclose.in_set(ShellPhase::Logic));
    }
}

fn setup_autoclose(mut commands: Commands, cfg: Res<AppConfig>) {
    let secs = cfg.window.auto_close;
    if secs > 0.0 {
        info!(target: "shell", seconds = secs, "AutoClose: will exit after {secs} seconds");
        commands.insert_resource(AutoCloseTimer(Timer::from_seconds(secs, TimerMode::Once)));
    }
}

fn check_autoclose(
    time: Res<Time>,
    mut timer: Option<ResMut<AutoCloseTimer>>,
    mut exit: EventWriter<ExitSignal>,
) {
    if let Some(t) = timer.as_mut() {
        if t.tick(time.delta()).just_finished() {
            info!(target: "shell", "AutoClose: timer finished, raising exit signal");
            exit.write(ExitSignal(ExitReason::AutoClose));
        }
    }
}
