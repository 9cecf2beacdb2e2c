use bevy::prelude::*;

use super::shell::{RegisterScreen, ShellInput};
use super::state::Screen;
use crate::core::color::Rgba;
use crate::core::system::system_order::ShellPhase;
use crate::interaction::inputmap::types::{Action, InputMap};
use crate::rendering::sprite::{text_sprite, FreeSprite, TextSprite};

const LINE_LEFT: f32 = 60.0;
const LINE_TOP: f32 = 60.0;
const LINE_STEP: f32 = 34.0;
/// Pixels per tick.
const SLIDE_SPEED: f32 = 40.0;
const FONT_SIZE: f32 = 22.0;

pub struct HelpPlugin;

impl Plugin for HelpPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputMap>()
            .register_screen("help", Screen::Help)
            .add_systems(OnEnter(Screen::Help), spawn_help)
            .add_systems(
                Update,
                (
                    handle_help_input.in_set(ShellPhase::Events),
                    slide_help_lines.in_set(ShellPhase::Logic),
                )
                    .run_if(in_state(Screen::Help)),
            )
            .add_systems(OnExit(Screen::Help), despawn_help);
    }
}

/// One text line and where it comes to rest.
#[derive(Component, Debug, Clone, Copy)]
pub struct HelpLine {
    pub dest: Vec2,
}

/// Title, one line per action with its bound chords, and the way back.
pub fn help_lines(map: &InputMap) -> Vec<String> {
    let mut lines = vec!["Key bindings".to_string()];
    for action in Action::ALL {
        let labels = map.labels(action);
        let keys = if labels.is_empty() { "unbound".to_string() } else { labels.join(" / ") };
        lines.push(format!("{:<13} {keys}", action.name()));
    }
    let back: Vec<&str> = [Action::Accept, Action::Cancel, Action::Help].into_iter().flat_map(|a| map.labels(a)).collect();
    lines.push(format!("Back to the picker: {}", back.join(", ")));
    lines
}

fn spawn_help(mut commands: Commands, map: Res<InputMap>) {
    for (i, line) in help_lines(&map).into_iter().enumerate() {
        let y = LINE_TOP + LINE_STEP * i as f32;
        // Each line starts further off-screen so they arrive staggered.
        let start = Vec2::new(-400.0 - 60.0 * i as f32, y);
        let color = if i == 0 { Rgba::from_hex(0xA10000) } else { Rgba::WHITE };
        commands.spawn((HelpLine { dest: Vec2::new(LINE_LEFT, y) }, text_sprite(TextSprite::new(line, color), start, FONT_SIZE, 4.0)));
    }
}

fn handle_help_input(mut inputs: EventReader<ShellInput>, mut next: ResMut<NextState<Screen>>) {
    for input in inputs.read() {
        if let ShellInput::Action(Action::Accept | Action::Cancel | Action::Help) = input {
            next.set(Screen::Picker);
        }
    }
}

fn slide_help_lines(mut q: Query<(&HelpLine, &mut FreeSprite)>) {
    for (line, mut sprite) in &mut q {
        if sprite.pos != line.dest {
            sprite.move_to(line.dest, SLIDE_SPEED);
        }
    }
}

fn despawn_help(mut commands: Commands, q: Query<Entity, With<HelpLine>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
