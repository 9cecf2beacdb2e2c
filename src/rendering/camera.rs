use bevy::prelude::*;

use super::sprite::{place_free_sprites, render_text_sprites, Viewport};
use super::textures::install_textures;

/// Camera, clear color, texture upload and the sprite sync that runs after
/// every screen's display phase.
pub struct SpriteRenderPlugin;

impl Plugin for SpriteRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Viewport>()
            .insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, (install_textures, setup_camera))
            .add_systems(
                PostUpdate,
                (place_free_sprites, render_text_sprites).before(bevy::transform::TransformSystem::TransformPropagate),
            );
    }
}

fn setup_camera(mut commands: Commands) {
    // Bevy 0.16+: spawn Camera2d component directly; Required Components supply defaults.
    commands.spawn(Camera2d);
}
