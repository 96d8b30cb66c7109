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

//! The lobby display.

mod render;

use crate::display::{Capabilities, Display};

pub(crate) struct LobbyView {
    pub(crate) is_active: bool,
}

impl LobbyView {
    pub(crate) fn new() -> Self {
        Self { is_active: false }
    }
}

impl Display for LobbyView {
    fn name(&self) -> &str {
        "lobby"
    }

    fn toggle(&mut self, show: Option<bool>) {
        self.is_active = show.unwrap_or(!self.is_active);
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            no_fullscreen: true,
            has_display: false,
        }
    }
}
