use bevy::ecs::schedule::ScheduleLabel;
use bevy::prelude::*;

/// Screen currently driving the window.
/// Boot -> (initial screen from config) -> Picker <-> Help
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum Screen {
    /// Before the initial screen has been resolved from the registry.
    #[default]
    Boot,
    /// Color menu.
    Picker,
    /// Key binding reference.
    Help,
}

/// Exit hook schedule of a screen, run once by the shell when an exit
/// signal reaches it while that screen is current.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct OnShutdown(pub Screen);
