pub mod app;
pub mod colorset;
pub mod core;
pub mod interaction;
pub mod rendering;

// Curated re-exports
pub use app::game::HemopickerPlugin;
pub use app::shell::{ExitReason, ExitSignal, ShellInput};
pub use app::state::Screen;
pub use colorset::ColorSet;
pub use self::core::config::{AppConfig, WindowConfig};
