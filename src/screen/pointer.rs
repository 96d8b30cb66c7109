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

//! Pointer payloads and delta scaling.

use crate::display::VideoSize;

/// The frame pointer deltas are reported in when a display has a picture.
pub(crate) const REFERENCE_SIZE: VideoSize = VideoSize::new(640, 480);

/// Relative pointer movement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PointerMove {
    pub(crate) dx: f64,
    pub(crate) dy: f64,
}

impl PointerMove {
    pub(crate) const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// A pointer button going down or up.
///
/// Buttons use DOM numbering: 0 primary, 1 auxiliary, 2 secondary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PointerPress {
    pub(crate) button: u8,
    pub(crate) pressed: bool,
}

/// Converts raw device deltas into the reference frame of a display.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DpiScaler {
    ratio: f64,
}

impl Default for DpiScaler {
    fn default() -> Self {
        Self { ratio: 1.0 }
    }
}

impl DpiScaler {
    pub(crate) fn new(ratio: f64) -> Self {
        if ratio.is_finite() && ratio > 0.0 {
            Self { ratio }
        } else {
            Self::default()
        }
    }

    /// Rescales `delta` from a picture of `video` size to `reference`.
    ///
    /// A degenerate video size leaves the delta untouched.
    pub(crate) fn scale(
        &self,
        delta: PointerMove,
        video: VideoSize,
        reference: VideoSize,
    ) -> PointerMove {
        if video.w == 0 || video.h == 0 {
            return delta;
        }

        let sx = f64::from(reference.w) / f64::from(video.w);
        let sy = f64::from(reference.h) / f64::from(video.h);

        PointerMove::new(delta.dx * self.ratio * sx, delta.dy * self.ratio * sy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn scales_to_the_reference_frame() {
        let scaler = DpiScaler::default();
        let scaled = scaler.scale(
            PointerMove::new(3.0, -2.0),
            VideoSize::new(320, 240),
            REFERENCE_SIZE,
        );

        assert_eq!(scaled, PointerMove::new(6.0, -4.0));
    }

    #[test_log::test]
    fn same_size_is_identity() {
        let scaler = DpiScaler::default();
        let delta = PointerMove::new(1.5, 7.0);

        assert_eq!(scaler.scale(delta, REFERENCE_SIZE, REFERENCE_SIZE), delta);
    }

    #[test_log::test]
    fn applies_the_pixel_ratio() {
        let scaler = DpiScaler::new(2.0);
        let scaled = scaler.scale(
            PointerMove::new(1.0, 1.0),
            VideoSize::new(1280, 960),
            REFERENCE_SIZE,
        );

        assert_eq!(scaled, PointerMove::new(1.0, 1.0));
    }

    #[test_log::test]
    fn degenerate_video_passes_through() {
        let scaler = DpiScaler::default();
        let delta = PointerMove::new(4.0, 2.0);

        assert_eq!(scaler.scale(delta, VideoSize::new(0, 240), REFERENCE_SIZE), delta);
    }

    #[test_log::test]
    fn invalid_ratio_falls_back_to_one() {
        let scaler = DpiScaler::new(f64::NAN);
        let delta = PointerMove::new(4.0, 2.0);

        assert_eq!(scaler.scale(delta, REFERENCE_SIZE, REFERENCE_SIZE), delta);
        assert_eq!(DpiScaler::new(-1.0).ratio, 1.0);
    }
}
