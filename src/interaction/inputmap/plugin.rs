use bevy::prelude::*;

use super::parse::{default_input_map, parse_input_toml};
use super::systems::system_evaluate_bindings;
use super::types::InputMap;
use crate::core::system::system_order::ShellPhase;

pub struct InputActionsPlugin;
impl Plugin for InputActionsPlugin { fn build(&self, app: &mut App) { app
        .init_resource::<InputMap>()
        .init_resource::<ButtonInput<KeyCode>>()
        .add_systems(PreStartup, load_initial_input_map)
        .add_systems(Update, system_evaluate_bindings.in_set(ShellPhase::Pump)); } }

/// `INPUT_CONFIG_PATH` or `assets/config/input.toml`; the bundled defaults
/// when the file is missing or yields no bindings. A map already inserted
/// (tests, embedders) is left alone.
fn load_initial_input_map(mut commands: Commands, existing: Res<InputMap>) {
    if !existing.bindings.is_empty() { return; }
    let path = std::env::var("INPUT_CONFIG_PATH").unwrap_or_else(|_| "assets/config/input.toml".into());
    let mut parsed = match std::fs::read_to_string(&path) {
        Ok(raw) => parse_input_toml(&raw, cfg!(feature = "debug")),
        Err(e) => { warn!(target: "input", "{path}: {e}; using bundled bindings"); default_input_map() }
    };
    if parsed.input_map.bindings.is_empty() { warn!(target: "input", "{path} defines no usable bindings; using bundled bindings"); parsed.input_map = default_input_map().input_map; }
    if !parsed.errors.is_empty() { for e in parsed.errors { error!(target: "input", "INPUT MAP ERROR: {e}"); } } else { info!(target: "input", "Input map loaded: {} bindings", parsed.input_map.bindings.len()); }
    commands.insert_resource(parsed.input_map); }
