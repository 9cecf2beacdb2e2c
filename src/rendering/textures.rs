//! Texture loading from the `textures` directory with colorkey transparency.
//!
//! Files are decoded with the `image` crate before the window opens so a
//! missing or corrupt texture fails startup instead of rendering blank.

use std::path::{Path, PathBuf};

use anyhow::Context;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::prelude::*;
use image::{DynamicImage, RgbaImage};

use crate::core::config::TextureConfig;

pub const MAGENTA_KEY: [u8; 3] = [0xFF, 0x00, 0xFF];
pub const GREEN_KEY: [u8; 3] = [0x00, 0xFF, 0x00];

/// Replace every pixel matching `key` (alpha ignored) with full transparency.
pub fn apply_colorkey(img: &mut RgbaImage, key: [u8; 3]) -> usize {
    let mut keyed = 0;
    for px in img.pixels_mut() {
        if px.0[..3] == key {
            px.0 = [0, 0, 0, 0];
            keyed += 1;
        }
    }
    keyed
}

pub fn load_image(path: &Path, colorkey: Option<[u8; 3]>) -> anyhow::Result<RgbaImage> {
    let decoded = image::open(path).with_context(|| format!("image loading failed: {}", path.display()))?;
    let mut rgba = decoded.to_rgba8();
    if let Some(key) = colorkey {
        apply_colorkey(&mut rgba, key);
    }
    Ok(rgba)
}

/// Decoded picker textures, waiting to be uploaded as Bevy images.
#[derive(Resource, Debug)]
pub struct TextureSet {
    pub buttons: RgbaImage,
    pub panel: RgbaImage,
    pub mascot: RgbaImage,
}

impl TextureSet {
    pub fn load(cfg: &TextureConfig) -> anyhow::Result<Self> {
        let path = |name: &str| -> PathBuf { Path::new(&cfg.dir).join(name) };
        Ok(Self {
            buttons: load_image(&path(&cfg.buttons), Some(MAGENTA_KEY))?,
            panel: load_image(&path(&cfg.panel), Some(MAGENTA_KEY))?,
            mascot: load_image(&path(&cfg.mascot), Some(GREEN_KEY))?,
        })
    }
}

/// Handles of the uploaded textures plus their pixel sizes.
#[derive(Resource, Debug, Clone)]
pub struct Textures {
    pub buttons: Handle<Image>,
    pub panel: Handle<Image>,
    pub panel_size: UVec2,
    pub mascot: Handle<Image>,
    pub mascot_size: UVec2,
}

fn upload(images: &mut Assets<Image>, img: RgbaImage) -> Handle<Image> {
    images.add(Image::from_dynamic(DynamicImage::ImageRgba8(img), true, RenderAssetUsages::default()))
}

/// Startup: move decoded textures into `Assets<Image>`.
pub fn install_textures(world: &mut World) {
    let Some(set) = world.remove_resource::<TextureSet>() else {
        warn!(target: "textures", "no decoded textures present; picker will render without sprites");
        return;
    };
    let panel_size = UVec2::new(set.panel.width(), set.panel.height());
    let mascot_size = UVec2::new(set.mascot.width(), set.mascot.height());
    let mut images = world.resource_mut::<Assets<Image>>();
    let textures = Textures {
        buttons: upload(&mut images, set.buttons),
        panel: upload(&mut images, set.panel),
        panel_size,
        mascot: upload(&mut images, set.mascot),
        mascot_size,
    };
    info!(target: "textures", "textures installed (panel {panel_size}, mascot {mascot_size})");
    world.insert_resource(textures);
}
