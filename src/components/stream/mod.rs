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

//! The game stream display.

mod render;

use log::debug;

use crate::display::{Capabilities, Display, VideoSize};

pub(crate) struct StreamView {
    pub(crate) is_active: bool,
    pub(crate) fullscreen: bool,
    video: VideoSize,
}

impl StreamView {
    pub(crate) fn new(video: VideoSize) -> Self {
        Self {
            is_active: false,
            fullscreen: false,
            video,
        }
    }
}

impl Display for StreamView {
    fn name(&self) -> &str {
        "stream"
    }

    fn toggle(&mut self, show: Option<bool>) {
        self.is_active = show.unwrap_or(!self.is_active);
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            no_fullscreen: false,
            has_display: true,
        }
    }

    fn video_size(&self) -> Option<VideoSize> {
        Some(self.video)
    }

    fn on_fullscreen(&mut self, fullscreen: bool) {
        debug!("stream fullscreen: {}", fullscreen);
        self.fullscreen = fullscreen;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn reports_its_picture() {
        let stream = StreamView::new(VideoSize::new(320, 240));

        assert!(stream.capabilities().has_display);
        assert_eq!(stream.video_size(), Some(VideoSize::new(320, 240)));
    }

    #[test_log::test]
    fn follows_fullscreen_changes() {
        let mut stream = StreamView::new(VideoSize::new(320, 240));

        stream.on_fullscreen(true);
        assert!(stream.fullscreen);
        stream.on_fullscreen(false);
        assert!(!stream.fullscreen);
    }
}
