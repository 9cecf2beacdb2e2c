//! Central system ordering labels to make the per-tick pipeline explicit.
//! Stages (configured chained in `Update` by the shell):
//! 1. Pump (raw window / mouse / key input -> `ShellInput`, close -> exit signal)
//! 2. Events (current screen consumes `ShellInput`)
//! 3. Logic (current screen per-frame evaluation)
//! 4. Settle (outstanding cooperative tasks of this tick joined)
//! 5. Display (render entities synced from screen state)
//!
//! Exit handling and the frame limiter run afterwards in `Last`.
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum ShellPhase {
    Pump,
    Events,
    Logic,
    Settle,
    Display,
}
