//! Button rectangles, press/active flags and sprite-sheet face selection.

use bevy::math::{UVec2, Vec2};

/// Integer pixel rectangle in window space (top-left origin, y down).
/// Containment is half-open: `x <= px < x + w`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn size(&self) -> UVec2 {
        UVec2::new(self.w, self.h)
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w as i32
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h as i32
    }

    pub fn contains(&self, p: Vec2) -> bool {
        let (px, py) = (p.x.floor() as i32, p.y.floor() as i32);
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    pub fn intersects(&self, other: &PixelRect) -> bool {
        self.x < other.right() && other.x < self.right() && self.y < other.bottom() && other.y < self.bottom()
    }
}

/// Index of the first rectangle containing `p`.
pub fn first_hit<'a, I>(rects: I, p: Vec2) -> Option<usize>
where
    I: IntoIterator<Item = &'a PixelRect>,
{
    rects.into_iter().position(|r| r.contains(p))
}

/// How a button picks its sprite-sheet sub-image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// Swaps between two sheet offsets.
    Momentary { idle: UVec2, pressed: UVec2 },
    /// Fixed column; row is `2 * active + pressed`.
    Sticky { column: u32 },
}

/// One on-screen button. `pressed` clears on release, `active` only changes
/// through explicit toggles or selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub rect: PixelRect,
    pub face: Face,
    pub pressed: bool,
    pub active: bool,
}

impl Button {
    pub const fn momentary(rect: PixelRect, idle: UVec2, pressed: UVec2) -> Self {
        Self { rect, face: Face::Momentary { idle, pressed }, pressed: false, active: false }
    }

    pub const fn sticky(rect: PixelRect, column: u32) -> Self {
        Self { rect, face: Face::Sticky { column }, pressed: false, active: false }
    }

    #[inline]
    pub fn hit(&self, p: Vec2) -> bool {
        self.rect.contains(p)
    }

    pub fn press(&mut self) {
        self.pressed = true;
    }

    pub fn release(&mut self) {
        self.pressed = false;
    }

    pub fn toggle(&mut self) {
        self.active = !self.active;
    }

    /// Sheet region to draw for the current flags.
    pub fn clip(&self) -> PixelRect {
        let (w, h) = (self.rect.w, self.rect.h);
        let origin = match self.face {
            Face::Momentary { idle, pressed } => if self.pressed { pressed } else { idle },
            Face::Sticky { column } => UVec2::new(column, h * (2 * self.active as u32 + self.pressed as u32)),
        };
        PixelRect::new(origin.x as i32, origin.y as i32, w, h)
    }
}
