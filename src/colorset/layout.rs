//! Fixed pixel layout of the picker window and the sheet offsets of every
//! button face in `buttons.png`.

use bevy::math::{UVec2, Vec2};

use super::caste::Caste;
use crate::interaction::button::{Button, PixelRect};

pub const CASTE_BUTTON: u32 = 39;
pub const CASTE_GAP: i32 = 40;
pub const HISTORY_BUTTON: u32 = 40;
pub const HISTORY_ROWS: usize = 5;
pub const COPY_BUTTON: u32 = 38;

pub const PANEL: PixelRect = PixelRect::new(40, 40, 200, 200);
pub const GENERATE: PixelRect = PixelRect::new(344, 205, 78, 30);
pub const GENERATE_ALL: PixelRect = PixelRect::new(427, 205, 78, 30);
pub const MUTANT: PixelRect = PixelRect::new(465, 245, CASTE_BUTTON, CASTE_BUTTON);
pub const RANDOM: PixelRect = PixelRect::new(405, 100, CASTE_BUTTON, CASTE_BUTTON);

/// Top-left of the hex / rgb / hsv readouts.
pub const READOUTS: [Vec2; 3] = [Vec2::new(90.0, 251.0), Vec2::new(90.0, 291.0), Vec2::new(90.0, 331.0)];

/// Sheet column of the random toggle; the mutant toggle uses column 0.
const RANDOM_COLUMN: u32 = 507;

/// Ring position (column, row) of each caste in a 4x4 grid.
fn caste_cell(i: usize) -> (i32, i32) {
    let col = match i {
        4..=7 => 3,
        3 | 8 => 2,
        2 | 9 => 1,
        _ => 0,
    };
    let row = match i {
        7..=10 => 0,
        6 | 11 => 1,
        0 | 5 => 2,
        _ => 3,
    };
    (col, row)
}

pub fn caste_rect(caste: Caste) -> PixelRect {
    let (col, row) = caste_cell(caste.index());
    PixelRect::new(345 + CASTE_GAP * col, 40 + CASTE_GAP * row, CASTE_BUTTON, CASTE_BUTTON)
}

/// History slots fill columns of five, left to right.
pub fn history_rect(idx: usize) -> PixelRect {
    let col = (idx / HISTORY_ROWS) as i32;
    let row = (idx % HISTORY_ROWS) as i32;
    PixelRect::new(250 + 45 * col, 40 + CASTE_GAP * row, HISTORY_BUTTON, HISTORY_BUTTON)
}

pub fn copy_rect(idx: usize) -> PixelRect {
    PixelRect::new(40, 246 + CASTE_GAP * idx as i32, COPY_BUTTON, COPY_BUTTON)
}

pub fn caste_button(caste: Caste) -> Button {
    Button::sticky(caste_rect(caste), CASTE_BUTTON * (caste.index() as u32 + 1))
}

pub fn mutant_button() -> Button {
    Button::sticky(MUTANT, 0)
}

pub fn random_button() -> Button {
    Button::sticky(RANDOM, RANDOM_COLUMN)
}

pub fn generate_button() -> Button {
    Button::momentary(GENERATE, UVec2::new(0, 156), UVec2::new(0, 186))
}

pub fn generate_all_button() -> Button {
    Button::momentary(GENERATE_ALL, UVec2::new(78, 156), UVec2::new(78, 186))
}

pub fn copy_button(idx: usize) -> Button {
    Button::momentary(copy_rect(idx), UVec2::new(156, 156), UVec2::new(156, 194))
}

/// Frame drawn over a history swatch.
pub fn history_button(idx: usize) -> Button {
    Button::momentary(history_rect(idx), UVec2::new(194, 156), UVec2::new(194, 196))
}
