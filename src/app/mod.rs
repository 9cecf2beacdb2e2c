pub mod game;
pub mod help;
pub mod picker;
pub mod shell;
pub mod state;
