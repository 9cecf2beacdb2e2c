pub mod button;
pub mod clipboard;
pub mod inputmap;
pub mod session;
