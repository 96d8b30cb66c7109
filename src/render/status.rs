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

//! Render the shell header and status bar.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Paragraph,
};

use crate::App;

pub(crate) fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let name = app
        .screen
        .current()
        .and_then(|id| app.displays.get(id))
        .map_or("-", |display| display.name());

    let force = if app.screen.state().force_fullscreen {
        " | always fullscreen"
    } else {
        ""
    };

    f.render_widget(
        Paragraph::new(format!(" screenctl | {}{}", name, force)).style(
            Style::default()
                .fg(app.theme.accent_colour)
                .bg(app.theme.background_colour),
        ),
        area,
    );
}

pub(crate) fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(40)])
        .horizontal_margin(1)
        .split(area);

    let state = app.screen.state();
    let input = &app.input_status;

    let kbm = match (state.kbm_support, state.kbm_skip) {
        (false, _) => "kbm: n/a",
        (true, false) => "kbm: on",
        (true, true) => "kbm: skipped",
    };
    let pointer = match (app.idler.is_armed(), app.idler.is_hidden()) {
        (_, true) => "hidden",
        (true, false) => "auto-hide",
        (false, false) => "visible",
    };
    let press = input
        .last_press
        .map(|p| format!("btn {} {}", p.button, if p.pressed { "down" } else { "up" }))
        .unwrap_or_default();

    let text = format!(
        "{} | capture: {} | pointer: {} {:.0},{:.0} {} | pad polls: {}",
        kbm,
        if app.screen.is_tracking() { "on" } else { "off" },
        pointer,
        input.x,
        input.y,
        press,
        input.pad_polls,
    );

    let style = Style::default()
        .fg(app.theme.status_fg)
        .bg(app.theme.status_bg);

    f.render_widget(Paragraph::new(text).style(style), chunks[0]);

    if let Some(error) = &app.last_error {
        f.render_widget(
            Paragraph::new(error.as_str()).style(style.fg(app.theme.error_fg)),
            chunks[1],
        );
    }
}
