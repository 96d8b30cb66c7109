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

//! Host environment and input device interfaces.
//!
//! The screen does not talk to devices directly. It drives a small set of
//! collaborators, each behind a trait so the host can supply its own:
//!
//! * [`Environment`]: host identity, fullscreen primitive and geometry.
//! * [`PointerDriver`]: pointer lock and raw pointer tracking.
//! * [`KeyboardDriver`]: keyboard lock.
//! * [`PadPoller`]: controller polling.
//! * [`PointerIdler`]: hiding the pointer while idle.
//!
//! # Sub-modules
//!
//! * [`idle`]: the idle-hide timer.
//! * [`pad`]: the controller poll worker.
//! * [`terminal`]: `crossterm` implementations of the traits above.

pub(crate) mod idle;
pub(crate) mod pad;
pub(crate) mod terminal;

use thiserror::Error;

/// Failure to acquire or release an input capture.
///
/// Capture is an enhancement, so callers are expected to log these and carry
/// on.
#[derive(Debug, Error)]
pub(crate) enum CaptureError {
    #[error("capture denied: {0}")]
    Denied(String),

    #[error("{0} is not supported by this host")]
    Unsupported(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Host identity, as far as input quirks are concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Browser {
    Firefox,
    Unknown,
}

pub(crate) trait Environment {
    fn browser(&self) -> Browser;

    fn is_mobile_device(&self) -> bool;

    /// Whether a fullscreen element is currently set.
    fn is_fullscreen(&self) -> bool;

    /// Enters fullscreen when `enter` is set, leaves it otherwise.
    fn toggle_fullscreen(&mut self, enter: bool);

    /// Height of the root element as laid out.
    fn root_height(&self) -> u16;

    /// Inner height of the host window.
    fn window_height(&self) -> u16;

    fn device_pixel_ratio(&self) -> f64 {
        1.0
    }
}

/// Handle for an active pointer tracking registration.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct TrackHandle(pub(crate) u64);

pub(crate) trait PointerDriver {
    fn request_lock(&mut self) -> Result<(), CaptureError>;

    /// Starts delivering raw pointer moves.
    ///
    /// With `single_events` set, moves are delivered one by one instead of
    /// being coalesced.
    fn track(&mut self, single_events: bool) -> Result<TrackHandle, CaptureError>;

    fn untrack(&mut self, handle: TrackHandle);

    /// Installs or removes the pointer down/up handlers.
    fn set_press_handlers(&mut self, enabled: bool);
}

pub(crate) trait KeyboardDriver {
    fn lock(&mut self, enabled: bool) -> Result<(), CaptureError>;
}

pub(crate) trait PadPoller {
    fn enable(&mut self);

    fn disable(&mut self);
}

pub(crate) trait PointerIdler {
    /// Shows the pointer and stops hiding it.
    fn show(&mut self);

    /// Hides the pointer whenever it stays idle for long enough.
    fn hide(&mut self);
}
