pub mod config;

pub use config::{AppConfig, PickerConfig, Scheduling, ShellConfig, TextureConfig, WindowConfig};
