// This file is part of Hemopicker.
// Copyright (C) 2025 virtuNat and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::app::help::HelpPlugin;
use crate::app::picker::PickerPlugin;
use crate::app::shell::ShellPlugin;
use crate::core::config::AppConfig;
use crate::interaction::inputmap::plugin::InputActionsPlugin;
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::rendering::camera::SpriteRenderPlugin;
use crate::rendering::sprite::Viewport;

/// Everything except the window and renderer: add after `DefaultPlugins`
/// (or `MinimalPlugins` + `StatesPlugin` when headless).
pub struct HemopickerPlugin {
    pub config: AppConfig,
}

impl Plugin for HemopickerPlugin {
    fn build(&self, app: &mut App) {
        let cfg = &self.config;
        app.insert_resource(cfg.clone())
            .insert_resource(Viewport { size: Vec2::new(cfg.window.width, cfg.window.height) })
            .add_plugins((
                ShellPlugin { shell: cfg.shell.clone() },
                InputActionsPlugin,
                SpriteRenderPlugin,
                PickerPlugin { picker: cfg.picker.clone() },
                HelpPlugin,
                AutoClosePlugin,
            ));
    }
}
