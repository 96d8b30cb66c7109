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

//! Pointer and controller activity as seen by the shell.
//!
//! The shell listens to the scaled pointer output of the screen and keeps a
//! virtual pointer position inside the reference frame, the last button
//! press, and a count of controller polls. It also remembers the terminal
//! cell the mouse was last seen over.

use crate::{
    display::VideoSize,
    screen::{PointerMove, PointerPress},
};

#[derive(Debug)]
pub(crate) struct InputStatus {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) last_press: Option<PointerPress>,
    pub(crate) pad_polls: u64,
    pub(crate) mouse_cell: Option<(u16, u16)>,
    bounds: VideoSize,
}

impl InputStatus {
    /// Creates a status with the pointer centred in `bounds`.
    pub(crate) fn new(bounds: VideoSize) -> Self {
        Self {
            x: f64::from(bounds.w) / 2.0,
            y: f64::from(bounds.h) / 2.0,
            last_press: None,
            pad_polls: 0,
            mouse_cell: None,
            bounds,
        }
    }

    /// Moves the virtual pointer, keeping it inside the bounds.
    pub(crate) fn apply_move(&mut self, delta: PointerMove) {
        self.x = (self.x + delta.dx).clamp(0.0, f64::from(self.bounds.w));
        self.y = (self.y + delta.dy).clamp(0.0, f64::from(self.bounds.h));
    }

    pub(crate) fn apply_press(&mut self, press: PointerPress) {
        self.last_press = Some(press);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn starts_centred() {
        let status = InputStatus::new(VideoSize::new(640, 480));

        assert_eq!((status.x, status.y), (320.0, 240.0));
        assert!(status.last_press.is_none());
    }

    #[test_log::test]
    fn moves_are_clamped_to_the_bounds() {
        let mut status = InputStatus::new(VideoSize::new(640, 480));

        status.apply_move(PointerMove::new(10.0, -5.0));
        assert_eq!((status.x, status.y), (330.0, 235.0));

        status.apply_move(PointerMove::new(1000.0, -1000.0));
        assert_eq!((status.x, status.y), (640.0, 0.0));
    }

    #[test_log::test]
    fn keeps_the_last_press() {
        let mut status = InputStatus::new(VideoSize::new(640, 480));

        status.apply_press(PointerPress { button: 0, pressed: true });
        status.apply_press(PointerPress { button: 2, pressed: false });

        assert_eq!(status.last_press, Some(PointerPress { button: 2, pressed: false }));
    }
}
