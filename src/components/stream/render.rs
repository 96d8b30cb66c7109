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

//! UI rendering logic for the game stream.
//!
//! There is no real picture in a terminal, the stream is drawn as a framed
//! placeholder stating its size and mode.

use ratatui::{
    Frame,
    layout::Alignment,
    prelude::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::{components::StreamView, render::Render, theme::Theme};

impl Render for StreamView {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        if !self.is_active {
            return;
        }

        let title = format!(" Stream {}x{} ", self.video.w, self.video.h);
        let mode = if self.fullscreen { "fullscreen" } else { "windowed" };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_colour))
            .title(title);

        let lines = vec![
            Line::from(""),
            Line::from(mode).style(Style::default().fg(theme.accent_colour)),
            Line::from("f for fullscreen, s to switch input")
                .style(Style::default().fg(theme.dim_fg)),
        ];

        let body = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);

        f.render_widget(body, area);
    }
}
