//! Systems for input action evaluation.
use bevy::prelude::*;
use super::types::*;
use crate::app::shell::ShellInput;

/// Resolve held keys into action edges and forward them to the shell's input stream.
pub fn system_evaluate_bindings(keyboard: Res<ButtonInput<KeyCode>>, mut input_map: ResMut<InputMap>, mut out: EventWriter<ShellInput>) {
    let edges = input_map.evaluate(|k| keyboard.pressed(k));
    for action in edges.pressed { debug!(target: "input", action = action.name(), frame = input_map.frame_counter, "action pressed"); out.write(ShellInput::Action(action)); }
    for action in edges.released { out.write(ShellInput::ActionReleased(action)); }
}
