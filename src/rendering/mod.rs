pub mod camera;
pub mod sprite;
pub mod textures;
