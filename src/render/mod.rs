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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called after
//! every event that changes what the shell shows. While windowed, the shell
//! draws a header and a status bar around the current display. In fullscreen
//! the current display gets the whole frame.
//!
//! While the idle timer is armed the terminal cursor stands in for the
//! pointer: it is drawn over the last mouse cell and disappears once the
//! pointer is idle.

mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::{
    App,
    render::status::{draw_header, draw_status},
    theme::Theme,
};

pub(crate) trait Render {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme);
}

/// Renders the shell to the terminal frame.
///
/// The height of the area given to the current display is recorded in the
/// viewport, the screen compares it with the terminal height to tell whether
/// it is fullscreen.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    let root = if app.viewport.is_fullscreen() {
        area
    } else {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        draw_header(f, outer[0], app);
        draw_status(f, outer[2], app);
        outer[1]
    };

    app.viewport.set_root_height(root.height);

    if let Some(display) = app.screen.current().and_then(|id| app.displays.get_mut(id)) {
        display.draw(f, root, &app.theme);
    }

    if let Some(cell) = pointer_cell(app) {
        f.set_cursor_position(cell);
    }
}

/// The cell the pointer is drawn over, if it is visible under the idle timer.
pub(crate) fn pointer_cell(app: &App) -> Option<(u16, u16)> {
    if !app.idler.is_armed() || app.idler.is_hidden() {
        return None;
    }
    app.input_status.mouse_cell
}
