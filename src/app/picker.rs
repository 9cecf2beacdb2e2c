use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::shell::{ExitReason, ExitSignal, PendingTasks, RegisterScreen, ShellInput};
use super::state::{OnShutdown, Screen};
use crate::colorset::layout::{self, READOUTS};
use crate::colorset::{ColorSet, Hit};
use crate::core::color::{ExportFormat, Rgba};
use crate::core::config::PickerConfig;
use crate::core::system::system_order::ShellPhase;
use crate::interaction::button::{Button, PixelRect};
use crate::interaction::clipboard::{self, Clipboard};
use crate::interaction::inputmap::types::Action;
use crate::rendering::sprite::{color_sprite, image_sprite, text_sprite, AnchorPoint, FreeSprite, TextSprite, Viewport};
use crate::rendering::textures::Textures;

const READOUT_FONT_SIZE: f32 = 22.0;

/// Random source for every generation on the picker.
#[derive(Resource, Debug, Clone)]
pub struct PickerRng(pub StdRng);

impl PickerRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

pub struct PickerPlugin {
    pub picker: PickerConfig,
}

impl Plugin for PickerPlugin {
    fn build(&self, app: &mut App) {
        let cfg = &self.picker;
        app.insert_resource(ColorSet::new(cfg.history_len, cfg.hue_jitter, cfg.generate_all_count()))
            .insert_resource(PickerRng::new(cfg.seed))
            .init_resource::<Clipboard>()
            .init_resource::<Viewport>()
            .register_screen("picker", Screen::Picker)
            .add_systems(OnEnter(Screen::Picker), spawn_picker)
            .add_systems(
                Update,
                (
                    handle_picker_input.in_set(ShellPhase::Events),
                    (sync_widget_faces, update_readouts).in_set(ShellPhase::Logic),
                    paint_swatches.in_set(ShellPhase::Display),
                )
                    .run_if(in_state(Screen::Picker)),
            )
            .add_systems(OnExit(Screen::Picker), despawn_picker)
            .add_systems(OnShutdown(Screen::Picker), log_final_color);
    }
}

/// Everything spawned for the picker; removed on exit.
#[derive(Component)]
pub struct PickerEntity;

/// Which [`ColorSet`] button an entity draws.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    Generate,
    GenerateAll,
    Mutant,
    Random,
    Caste(usize),
    HistoryFrame(usize),
    Copy(usize),
}

impl Widget {
    pub fn button<'a>(&self, set: &'a ColorSet) -> Option<&'a Button> {
        match *self {
            Widget::Generate => Some(&set.generate),
            Widget::GenerateAll => Some(&set.generate_all),
            Widget::Mutant => Some(&set.mutant),
            Widget::Random => Some(&set.random),
            Widget::Caste(i) => set.castes.get(i),
            Widget::HistoryFrame(i) => set.history_buttons.get(i),
            Widget::Copy(i) => set.copy_buttons.get(i),
        }
    }
}

#[derive(Component)]
pub struct PanelColor;

#[derive(Component, Debug, Clone, Copy)]
pub struct HistorySwatch(pub usize);

#[derive(Component, Debug, Clone, Copy)]
pub struct Readout(pub ExportFormat);

mod z {
    pub const PANEL_COLOR: f32 = 1.0;
    pub const BUTTON: f32 = 2.0;
    pub const SWATCH: f32 = 2.0;
    pub const FRAME: f32 = 3.0;
    pub const TEXT: f32 = 4.0;
    pub const OVERLAY: f32 = 5.0;
    pub const MASCOT: f32 = 6.0;
}

fn spawn_widget(commands: &mut Commands, textures: Option<&Textures>, widget: Widget, button: &Button, layer: f32) {
    let free = FreeSprite::new(button.rect, layer).with_clip(button.clip());
    let mut entity = commands.spawn((PickerEntity, widget, Transform::default(), Visibility::default()));
    match textures {
        Some(t) => {
            entity.insert(image_sprite(t.buttons.clone(), free));
        }
        // Headless: keep geometry and faces so state stays observable.
        None => {
            entity.insert(free);
        }
    }
}

fn spawn_picker(
    mut commands: Commands,
    set: Res<ColorSet>,
    viewport: Res<Viewport>,
    textures: Option<Res<Textures>>,
) {
    let textures = textures.as_deref();
    commands.spawn((PickerEntity, PanelColor, color_sprite(set.color(), FreeSprite::new(layout::PANEL, z::PANEL_COLOR))));

    for (i, swatch) in set.history().iter().enumerate() {
        let rect = layout::history_rect(i);
        commands.spawn((PickerEntity, HistorySwatch(i), color_sprite(swatch.color, FreeSprite::new(rect, z::SWATCH))));
    }

    let fixed = [
        (Widget::Generate, &set.generate),
        (Widget::GenerateAll, &set.generate_all),
        (Widget::Mutant, &set.mutant),
        (Widget::Random, &set.random),
    ];
    for (widget, button) in fixed {
        spawn_widget(&mut commands, textures, widget, button, z::BUTTON);
    }
    for (i, button) in set.castes.iter().enumerate() {
        spawn_widget(&mut commands, textures, Widget::Caste(i), button, z::BUTTON);
    }
    for (i, button) in set.history_buttons.iter().enumerate() {
        spawn_widget(&mut commands, textures, Widget::HistoryFrame(i), button, z::FRAME);
    }
    for (i, button) in set.copy_buttons.iter().enumerate() {
        spawn_widget(&mut commands, textures, Widget::Copy(i), button, z::BUTTON);
    }

    for (format, at) in ExportFormat::ALL.into_iter().zip(READOUTS) {
        commands.spawn((
            PickerEntity,
            Readout(format),
            text_sprite(TextSprite::new(format.readout(set.color()), Rgba::WHITE), at, READOUT_FONT_SIZE, z::TEXT),
        ));
    }

    if let Some(t) = textures {
        let size = t.panel_size;
        let overlay = FreeSprite::new(PixelRect::new(0, 0, size.x, size.y), z::OVERLAY);
        commands.spawn((PickerEntity, image_sprite(t.panel.clone(), overlay)));

        let size = t.mascot_size;
        let mut mascot = FreeSprite::new(PixelRect::new(0, 0, size.x, size.y), z::MASCOT);
        mascot.set_anchor(AnchorPoint::TopRight, viewport.top_right());
        commands.spawn((PickerEntity, image_sprite(t.mascot.clone(), mascot)));
    }
    info!(target: "picker", "picker ready: {} ({})", set.color(), set.base_caste().name());
}

fn apply_hit(set: &mut ColorSet, rng: &mut StdRng, hit: Hit, copy: &mut impl FnMut(String)) {
    match hit {
        Hit::Generate => {
            let color = set.generate(rng);
            debug!(target: "picker", "generated {color}");
        }
        Hit::GenerateAll => {
            set.generate_all(rng);
        }
        Hit::Mutant => {
            let on = set.toggle_mutant();
            info!(target: "picker", "mutant mode {}", if on { "on" } else { "off" });
        }
        Hit::Random => {
            let on = set.toggle_random();
            info!(target: "picker", "random caste {}", if on { "on" } else { "off" });
        }
        Hit::Caste(caste) => set.set_caste(caste),
        Hit::History(idx) => {
            set.swap_color(idx);
        }
        Hit::Copy(format) => copy(set.clip_color(format)),
    }
}

fn action_hit(action: Action) -> Option<Hit> {
    match action {
        Action::Accept | Action::Generate => Some(Hit::Generate),
        Action::GenerateAll => Some(Hit::GenerateAll),
        Action::ToggleMutant => Some(Hit::Mutant),
        Action::ToggleRandom => Some(Hit::Random),
        Action::CopyHex => Some(Hit::Copy(ExportFormat::Hex)),
        Action::CopyRgb => Some(Hit::Copy(ExportFormat::Rgb)),
        Action::CopyHsv => Some(Hit::Copy(ExportFormat::Hsv)),
        Action::Cancel | Action::Help => None,
    }
}

fn handle_picker_input(
    mut inputs: EventReader<ShellInput>,
    mut set: ResMut<ColorSet>,
    mut rng: ResMut<PickerRng>,
    clipboard: Res<Clipboard>,
    mut pending: ResMut<PendingTasks>,
    mut next: ResMut<NextState<Screen>>,
    mut exit: EventWriter<ExitSignal>,
) {
    let mut copy = |text: String| clipboard::export(&mut pending, &clipboard, text);
    for input in inputs.read() {
        match input {
            ShellInput::MouseDown { button: MouseButton::Left, pos } => {
                if let Some(hit) = set.hit_test(*pos) {
                    apply_hit(&mut set, &mut rng.0, hit, &mut copy);
                }
            }
            ShellInput::MouseUp { button: MouseButton::Left } | ShellInput::ActionReleased(_) => set.unpress(),
            ShellInput::Action(Action::Cancel) => {
                exit.write(ExitSignal(ExitReason::Cancelled));
            }
            ShellInput::Action(Action::Help) => next.set(Screen::Help),
            ShellInput::Action(action) => {
                if let Some(hit) = action_hit(*action) {
                    apply_hit(&mut set, &mut rng.0, hit, &mut copy);
                }
            }
            _ => {}
        }
    }
}

fn sync_widget_faces(set: Res<ColorSet>, mut q: Query<(&Widget, &mut FreeSprite)>) {
    for (widget, mut sprite) in &mut q {
        let Some(button) = widget.button(&set) else { continue };
        let clip = Some(button.clip());
        if sprite.clip != clip {
            sprite.clip = clip;
        }
    }
}

fn update_readouts(set: Res<ColorSet>, mut q: Query<(&Readout, &mut TextSprite)>) {
    let color = set.color();
    for (readout, mut text) in &mut q {
        let line = readout.0.readout(color);
        if text.text() != line {
            text.set_text(line);
        }
    }
}

fn paint_swatches(
    set: Res<ColorSet>,
    mut panel: Query<&mut Sprite, (With<PanelColor>, Without<HistorySwatch>)>,
    mut swatches: Query<(&HistorySwatch, &mut Sprite), Without<PanelColor>>,
) {
    let current = set.color().to_bevy();
    for mut sprite in &mut panel {
        if sprite.color != current {
            sprite.color = current;
        }
    }
    for (slot, mut sprite) in &mut swatches {
        let Some(swatch) = set.history().get(slot.0) else { continue };
        let color = swatch.color.to_bevy();
        if sprite.color != color {
            sprite.color = color;
        }
    }
}

fn despawn_picker(mut commands: Commands, q: Query<Entity, With<PickerEntity>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}

fn log_final_color(set: Res<ColorSet>) {
    info!(
        target: "picker",
        "leaving with {} / {} ({})",
        ExportFormat::Hex.export(set.color()),
        ExportFormat::Rgb.export(set.color()),
        set.color_caste().name()
    );
}
