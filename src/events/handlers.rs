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

//! Event handlers.
//!
//! Handlers returning `bool` report whether the shell needs a redraw.

use std::time::Instant;

use anyhow::Result;
use log::{error, info};

use crate::{
    App, config,
    display::DisplayId,
    events::AppEvent,
    screen::{PointerMove, PointerPress},
};

pub(super) fn handle_show_display(app: &mut App, id: DisplayId) {
    app.screen.toggle(&mut app.displays, Some(id), Some(true));
}

/// Feeds mouse activity to the idle timer.
///
/// A redraw is only needed while the pointer is drawn, or when it was hidden
/// and comes back.
pub(super) fn handle_pointer_activity(app: &mut App, column: u16, row: u16) -> bool {
    app.input_status.mouse_cell = Some((column, row));

    let was_hidden = app.idler.is_hidden();
    app.idler.activity(Instant::now());
    was_hidden || app.idler.is_armed()
}

pub(super) fn handle_mouse_moved(app: &mut App, delta: PointerMove) -> bool {
    app.input_status.apply_move(delta);
    true
}

pub(super) fn handle_mouse_pressed(app: &mut App, press: PointerPress) -> bool {
    app.input_status.apply_press(press);
    true
}

pub(super) fn handle_pad_polled(app: &mut App) -> bool {
    app.input_status.pad_polls += 1;
    false
}

pub(super) fn handle_toggle_force_fullscreen(app: &mut App) -> Result<()> {
    app.config.force_fullscreen = !app.config.force_fullscreen;
    info!("force fullscreen set to {}", app.config.force_fullscreen);

    if let Err(e) = config::save_config(&app.config) {
        app.event_tx
            .send(AppEvent::Error(format!("Failed to save settings: {}", e)))?;
    }
    app.event_tx.send(AppEvent::SettingsChanged)?;

    Ok(())
}

pub(super) fn handle_error(app: &mut App, message: String) -> bool {
    error!("{}", message);
    app.last_error = Some(message);
    true
}

pub(super) fn handle_tick(app: &mut App) -> bool {
    app.idler.tick(Instant::now());
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, input::PointerIdler};

    fn app(idle_hide_ms: u64) -> App {
        App::new(AppConfig {
            idle_hide_ms,
            force_fullscreen: false,
            show_cursor: false,
            ..AppConfig::default()
        })
    }

    #[test_log::test]
    fn idle_pointer_hides_and_comes_back_on_activity() {
        let mut app = app(0);
        app.idler.clone().hide();

        assert!(handle_tick(&mut app));
        assert!(app.idler.is_hidden());
        assert_eq!(crate::render::pointer_cell(&app), None);

        assert!(handle_pointer_activity(&mut app, 7, 3));
        assert!(!app.idler.is_hidden());
        assert_eq!(crate::render::pointer_cell(&app), Some((7, 3)));

        app.idler.clone().show();
        assert!(!handle_pointer_activity(&mut app, 8, 3));
        assert_eq!(crate::render::pointer_cell(&app), None);
    }

    #[test_log::test]
    fn pointer_stays_visible_until_the_timeout() {
        let mut app = app(60_000);
        app.idler.clone().hide();

        handle_tick(&mut app);
        assert!(!app.idler.is_hidden());
        assert!(handle_pointer_activity(&mut app, 1, 1));
        assert_eq!(crate::render::pointer_cell(&app), Some((1, 1)));
    }

    #[test_log::test]
    fn pad_polls_are_counted_without_redraw() {
        let mut app = app(2000);

        assert!(!handle_pad_polled(&mut app));
        assert!(!handle_pad_polled(&mut app));
        assert_eq!(app.input_status.pad_polls, 2);
    }
}
