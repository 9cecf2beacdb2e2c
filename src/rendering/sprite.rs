//! Window-space sprites: an integer rectangle, an optional sheet clip and a
//! float anchor position, synced onto Bevy's `Sprite` / `Text2d` entities.

use bevy::prelude::*;
use bevy::sprite::Anchor;

use crate::core::color::Rgba;
use crate::core::geometry::{dcos, direction_cos, direction_sin, distance, dsin};
use crate::interaction::button::PixelRect;

/// Size of the drawable area in window pixels. World space is centered on it.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub size: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { size: Vec2::new(800.0, 600.0) }
    }
}

impl Viewport {
    /// Window pixel (top-left origin, y down) to world coordinates (center origin, y up).
    pub fn to_world(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x - self.size.x * 0.5, self.size.y * 0.5 - p.y)
    }

    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.size.x, 0.0)
    }
}

/// Point of a rectangle that an anchor position refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorPoint {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct FreeSprite {
    pub rect: PixelRect,
    /// Source-image region; `None` draws the whole image.
    pub clip: Option<PixelRect>,
    /// Float-precision anchor, the rect center unless moved otherwise.
    pub pos: Vec2,
    pub layer: f32,
}

impl FreeSprite {
    pub fn new(rect: PixelRect, layer: f32) -> Self {
        let pos = Vec2::new(rect.x as f32 + rect.w as f32 / 2.0, rect.y as f32 + rect.h as f32 / 2.0);
        Self { rect, clip: None, pos, layer }
    }

    pub fn with_clip(mut self, clip: PixelRect) -> Self {
        self.clip = Some(clip);
        self
    }

    /// Place the rect so that `anchor` lands on `at` (rounded to the pixel grid).
    pub fn set_anchor(&mut self, anchor: AnchorPoint, at: Vec2) {
        self.place(anchor, at);
        self.pos = Vec2::new(
            self.rect.x as f32 + self.rect.w as f32 / 2.0,
            self.rect.y as f32 + self.rect.h as f32 / 2.0,
        );
    }

    fn place(&mut self, anchor: AnchorPoint, at: Vec2) {
        let (w, h) = (self.rect.w as f32, self.rect.h as f32);
        let top_left = match anchor {
            AnchorPoint::TopLeft => at,
            AnchorPoint::TopRight => at - Vec2::new(w, 0.0),
            AnchorPoint::BottomLeft => at - Vec2::new(0.0, h),
            AnchorPoint::BottomRight => at - Vec2::new(w, h),
            AnchorPoint::Center => at - Vec2::new(w, h) * 0.5,
        };
        self.rect.x = top_left.x.round() as i32;
        self.rect.y = top_left.y.round() as i32;
    }

    /// Resize keeping the top-left corner.
    pub fn resize(&mut self, w: u32, h: u32) {
        self.rect.w = w;
        self.rect.h = h;
    }

    fn recenter(&mut self) {
        let pos = self.pos;
        self.place(AnchorPoint::Center, pos);
    }

    /// Offset on the pixel grid.
    pub fn move_xy(&mut self, dx: f32, dy: f32) {
        self.pos += Vec2::new(dx, dy);
        self.recenter();
    }

    /// Move `dist` pixels in direction `angle` (degrees, y down).
    pub fn move_rt(&mut self, dist: f32, angle: f32) {
        self.pos += Vec2::new(dist * dcos(angle), dist * dsin(angle));
        self.recenter();
    }

    /// Step towards `dest` by at most `dist`. Returns true once arrived.
    pub fn move_to(&mut self, dest: Vec2, dist: f32) -> bool {
        let arrived = distance(self.pos, dest) <= dist;
        if arrived {
            self.pos = dest;
        } else {
            self.pos += Vec2::new(dist * direction_cos(self.pos, dest), dist * direction_sin(self.pos, dest));
        }
        self.recenter();
        arrived
    }
}

/// Text regenerated whenever its content or color changes.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct TextSprite {
    text: String,
    color: Rgba,
}

impl TextSprite {
    pub fn new(text: impl Into<String>, color: Rgba) -> Self {
        Self { text: text.into(), color }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }
}

/// Entity parts for an image sprite drawn from its top-left corner.
pub fn image_sprite(image: Handle<Image>, sprite: FreeSprite) -> (FreeSprite, Sprite) {
    let rect = sprite.clip.map(to_sheet_rect);
    (
        sprite,
        Sprite { image, rect, anchor: Anchor::TopLeft, ..default() },
    )
}

/// Solid block of color the size of the sprite rect.
pub fn color_sprite(color: Rgba, sprite: FreeSprite) -> (FreeSprite, Sprite) {
    let size = sprite.rect.size().as_vec2();
    (
        sprite,
        Sprite { color: color.to_bevy(), custom_size: Some(size), anchor: Anchor::TopLeft, ..default() },
    )
}

pub fn text_sprite(text: TextSprite, at: Vec2, font_size: f32, layer: f32) -> impl Bundle {
    let sprite = FreeSprite::new(PixelRect::new(at.x as i32, at.y as i32, 0, 0), layer);
    let color = TextColor(text.color().to_bevy());
    (
        Text2d::new(text.text().to_owned()),
        TextFont { font_size, ..default() },
        color,
        Anchor::TopLeft,
        text,
        sprite,
    )
}

fn to_sheet_rect(r: PixelRect) -> Rect {
    Rect::new(r.x as f32, r.y as f32, r.right() as f32, r.bottom() as f32)
}

/// Push moved / re-clipped sprites into their transforms and sheet rects.
pub fn place_free_sprites(
    viewport: Res<Viewport>,
    mut q: Query<(Ref<FreeSprite>, &mut Transform, Option<&mut Sprite>)>,
) {
    let viewport_changed = viewport.is_changed();
    for (free, mut transform, sprite) in &mut q {
        if !(free.is_changed() || viewport_changed) {
            continue;
        }
        let top_left = viewport.to_world(Vec2::new(free.rect.x as f32, free.rect.y as f32));
        transform.translation = top_left.extend(free.layer);
        if let Some(mut sprite) = sprite {
            let rect = free.clip.map(to_sheet_rect);
            if sprite.rect != rect {
                sprite.rect = rect;
            }
        }
    }
}

/// Re-render text whose content or color changed.
pub fn render_text_sprites(mut q: Query<(&TextSprite, &mut Text2d, &mut TextColor), Changed<TextSprite>>) {
    for (text, mut rendered, mut color) in &mut q {
        if rendered.0 != text.text {
            rendered.0.clone_from(&text.text);
        }
        color.0 = text.color.to_bevy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_maps_corners() {
        let vp = Viewport::default();
        assert_eq!(vp.to_world(Vec2::ZERO), Vec2::new(-400.0, 300.0));
        assert_eq!(vp.to_world(Vec2::new(800.0, 600.0)), Vec2::new(400.0, -300.0));
    }

    #[test]
    fn anchors_place_rect() {
        let mut s = FreeSprite::new(PixelRect::new(0, 0, 100, 50), 0.0);
        s.set_anchor(AnchorPoint::TopRight, Vec2::new(800.0, 0.0));
        assert_eq!((s.rect.x, s.rect.y), (700, 0));
        s.set_anchor(AnchorPoint::Center, Vec2::new(400.0, 300.0));
        assert_eq!((s.rect.x, s.rect.y), (350, 275));
        s.set_anchor(AnchorPoint::BottomLeft, Vec2::new(10.0, 600.0));
        assert_eq!((s.rect.x, s.rect.y), (10, 550));
        assert_eq!(s.pos, Vec2::new(60.0, 575.0));
    }

    #[test]
    fn move_xy_and_rt_keep_float_precision() {
        let mut s = FreeSprite::new(PixelRect::new(0, 0, 10, 10), 0.0);
        for _ in 0..4 {
            s.move_xy(0.25, 0.0);
        }
        assert_eq!(s.pos, Vec2::new(6.0, 5.0));
        assert_eq!(s.rect.x, 1);
        s.move_rt(2.0, 90.0);
        assert!((s.pos.y - 7.0).abs() < 1e-4);
    }

    #[test]
    fn move_to_approaches_then_snaps() {
        let mut s = FreeSprite::new(PixelRect::new(0, 0, 2, 2), 0.0);
        let dest = Vec2::new(31.0, 41.0);
        assert!(!s.move_to(dest, 25.0));
        assert!((distance(s.pos, dest) - 25.0).abs() < 1e-3);
        assert!(s.move_to(dest, 30.0));
        assert_eq!(s.pos, dest);
        assert_eq!((s.rect.x, s.rect.y), (30, 40));
    }

    #[test]
    fn text_sprite_setters() {
        let mut t = TextSprite::new("HEX", Rgba::WHITE);
        t.set_text("RGB");
        t.set_color(Rgba::BLACK);
        assert_eq!(t.text(), "RGB");
        assert_eq!(t.color(), Rgba::BLACK);
    }
}
