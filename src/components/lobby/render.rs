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

//! UI rendering logic for the lobby.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    prelude::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::{components::LobbyView, render::Render, theme::Theme};

const HELP: [&str; 7] = [
    "1  lobby           2  stream",
    "Tab  toggle the current display again",
    "f / F11  fullscreen, Esc leaves it",
    "s  switch between keyboard/mouse and controllers",
    "o  always go fullscreen on switch",
    "c  capture the pointer on switch",
    "q  quit",
];

impl Render for LobbyView {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        if !self.is_active {
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        let header_block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border_colour))
            .padding(Padding::horizontal(1));

        let header = Paragraph::new("Lobby")
            .style(Style::default().fg(theme.accent_colour))
            .block(header_block);

        let help: Vec<Line> = HELP.iter().map(|line| Line::from(*line)).collect();
        let body = Paragraph::new(help)
            .style(Style::default().fg(theme.dim_fg))
            .block(Block::default().padding(Padding::uniform(1)));

        f.render_widget(header, chunks[0]);
        f.render_widget(body, chunks[1]);
    }
}
