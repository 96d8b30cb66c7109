// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Application configuration.
//!
//! This module manages the application configuration file and exposes the
//! options the screen reads through the [`Settings`] trait.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{display::VideoSize, input::idle::DEFAULT_IDLE_TIMEOUT, screen::REFERENCE_SIZE};

const CONFIG_NAME: &str = "screenctl";

/// Read access to the options the screen depends on.
pub(crate) trait Settings {
    fn force_fullscreen(&self) -> bool;
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,
    /// Go fullscreen whenever a display is toggled.
    pub force_fullscreen: bool,
    /// Switch on keyboard and mouse capture whenever a display is toggled.
    pub show_cursor: bool,
    /// Announce keyboard and mouse support at startup.
    pub keyboard_mouse: bool,
    pub reference_width: u32,
    pub reference_height: u32,
    pub idle_hide_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            force_fullscreen: false,
            show_cursor: false,
            keyboard_mouse: true,
            reference_width: REFERENCE_SIZE.w,
            reference_height: REFERENCE_SIZE.h,
            idle_hide_ms: DEFAULT_IDLE_TIMEOUT.as_millis() as u64,
        }
    }
}

impl AppConfig {
    pub(crate) fn reference_size(&self) -> VideoSize {
        VideoSize::new(self.reference_width, self.reference_height)
    }

    pub(crate) fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_hide_ms)
    }
}

impl Settings for AppConfig {
    fn force_fullscreen(&self) -> bool {
        self.force_fullscreen
    }
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

pub fn save_config(cfg: &AppConfig) -> Result<(), confy::ConfyError> {
    confy::store(CONFIG_NAME, None, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn defaults_match_the_reference_frame() {
        let config = AppConfig::default();

        assert_eq!(config.reference_size(), VideoSize::new(640, 480));
        assert_eq!(config.idle_timeout(), Duration::from_millis(2000));
        assert!(!config.force_fullscreen());
    }
}
