use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    pub resizable: bool,
    pub vsync: bool,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            title: "Fantroll Hemopicker".into(),
            resizable: false,
            vsync: true,
            auto_close: 0.0,
        }
    }
}

/// How the per-tick phases are executed.
/// Written as a string in RON (`scheduling: "Cooperative"`) so layered
/// configs survive the untyped merge step.
#[derive(Debug, Deserialize, Resource, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(try_from = "String")]
pub enum Scheduling {
    /// Single-threaded; every phase runs to completion in order.
    #[default]
    Synchronous,
    /// Multi-threaded; side effects of the events phase run as tasks joined before display.
    Cooperative,
}

impl TryFrom<String> for Scheduling {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "synchronous" | "sync" => Ok(Scheduling::Synchronous),
            "cooperative" | "async" => Ok(Scheduling::Cooperative),
            _ => Err(format!("unknown scheduling '{value}' (expected Synchronous|Cooperative)")),
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct ShellConfig {
    /// Frame cap; 0 disables the limiter.
    pub fps_cap: u32,
    pub scheduling: Scheduling,
    /// Registered screen name to start in.
    pub initial_state: String,
    /// `LogPlugin` filter (overridden by `RUST_LOG`).
    pub log_filter: String,
}
impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            fps_cap: 30,
            scheduling: Scheduling::Synchronous,
            initial_state: "picker".into(),
            log_filter: "info,wgpu=error,naga=warn".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PickerConfig {
    pub history_len: usize,
    /// Max hue drift (degrees) in caste mode.
    pub hue_jitter: f64,
    /// Generations per "generate all"; defaults to `history_len + 1`.
    pub generate_all_count: Option<usize>,
    /// Fixed RNG seed for reproducible sessions.
    pub seed: Option<u64>,
}
impl Default for PickerConfig {
    fn default() -> Self {
        Self { history_len: 10, hue_jitter: 7.5, generate_all_count: None, seed: None }
    }
}
impl PickerConfig {
    pub fn generate_all_count(&self) -> usize {
        self.generate_all_count.unwrap_or(self.history_len + 1)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TextureConfig {
    pub dir: String,
    pub buttons: String,
    pub panel: String,
    pub mascot: String,
}
impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            dir: "textures".into(),
            buttons: "buttons.png".into(),
            panel: "panel.png".into(),
            mascot: "gamzee.png".into(),
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub shell: ShellConfig,
    pub picker: PickerConfig,
    pub textures: TextureConfig,
}

impl AppConfig {
    /// Deep-merge every readable file in order (later wins), returning the
    /// config, the files used and the errors met along the way.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut ron::value::Value, overlay: ron::value::Value) {
            use ron::value::Value;
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        if let Some((_, ev)) = bm.iter_mut().find(|(ek, _)| **ek == k) {
                            if let Some(val) = incoming.take() {
                                merge_value(ev, val);
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        match merged {
            Some(val) => match val.into_rust::<AppConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => {
                    errors.push(format!("failed to deserialize merged config; using defaults: {e}"));
                    (AppConfig::default(), used, errors)
                }
            },
            None => (AppConfig::default(), used, errors),
        }
    }
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.width < 800.0 || self.window.height < 600.0 {
            w.push(format!(
                "window {}x{} smaller than the 800x600 picker layout; widgets will be clipped",
                self.window.width, self.window.height
            ));
        }
        if self.window.resizable {
            w.push("window.resizable: layout is fixed and will not follow resizes".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        } else if self.window.auto_close > 0.0 && self.window.auto_close < 0.01 {
            w.push(format!(
                "window.autoClose {} very small; closes almost immediately",
                self.window.auto_close
            ));
        }
        if self.shell.fps_cap > 240 {
            w.push(format!("shell.fps_cap {} very high; the limiter barely sleeps", self.shell.fps_cap));
        }
        if self.shell.initial_state.trim().is_empty() {
            w.push("shell.initial_state is empty".into());
        }
        if self.picker.history_len == 0 {
            w.push("picker.history_len is 0; one slot will be used".into());
        }
        if self.picker.history_len > 10 {
            w.push(format!(
                "picker.history_len {} exceeds the two history columns; extra slots overlap the caste ring",
                self.picker.history_len
            ));
        }
        if !(0.0..=30.0).contains(&self.picker.hue_jitter) {
            w.push(format!(
                "picker.hue_jitter {} outside 0..30 degrees; colors may leave their caste",
                self.picker.hue_jitter
            ));
        }
        if self.picker.generate_all_count() == 0 {
            w.push("picker.generate_all_count is 0; generate-all does nothing".into());
        } else if self.picker.generate_all_count() < self.picker.history_len {
            w.push(format!(
                "picker.generate_all_count {} < history_len {}; older history survives generate-all",
                self.picker.generate_all_count(),
                self.picker.history_len
            ));
        }
        w
    }
}
