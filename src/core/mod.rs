pub mod color;
pub mod config;
pub mod geometry;
pub mod system;
