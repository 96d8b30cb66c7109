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

//! The screen: display switching, fullscreen and input capture.
//!
//! [`Screen`] keeps the list of registered displays and the current one, and
//! coordinates what happens around a switch:
//!
//! * every registered display is hidden before the current one is toggled;
//! * fullscreen is requested when the forced fullscreen option is set;
//! * pointer lock, raw pointer tracking and keyboard lock follow the
//!   fullscreen state, the keyboard/mouse support flag and the skip flag;
//! * controller polling is switched on whenever keyboard/mouse input is
//!   skipped.
//!
//! The screen owns none of the displays, see [`Displays`]. Devices are
//! reached through the traits in [`crate::input`], and pointer input is
//! published back onto the application event bus.
//!
//! Capture is best-effort. A failed pointer or keyboard lock is logged and the
//! rest of the transition still runs.

mod pointer;

pub(crate) use pointer::{DpiScaler, PointerMove, PointerPress, REFERENCE_SIZE};

use std::sync::mpsc::Sender;

use log::{debug, warn};

use crate::{
    config::Settings,
    display::{Capabilities, DisplayId, Displays, VideoSize},
    events::AppEvent,
    input::{
        Browser, Environment, KeyboardDriver, PadPoller, PointerDriver, PointerIdler, TrackHandle,
    },
};

// Deliver every pointer move on its own instead of coalescing them.
const SINGLE_EVENTS: bool = true;

#[derive(Debug, Default)]
pub(crate) struct ScreenState {
    pub(crate) kbm_skip: bool,
    pub(crate) kbm_support: bool,
    pub(crate) components: Vec<DisplayId>,
    pub(crate) current: Option<DisplayId>,
    pub(crate) force_fullscreen: bool,
    pub(crate) show_cursor: bool,
}

/// The collaborators a [`Screen`] drives.
pub(crate) struct Devices {
    pub(crate) env: Box<dyn Environment>,
    pub(crate) pointer: Box<dyn PointerDriver>,
    pub(crate) keyboard: Box<dyn KeyboardDriver>,
    pub(crate) pad: Box<dyn PadPoller>,
    pub(crate) idler: Box<dyn PointerIdler>,
}

pub(crate) struct Screen {
    state: ScreenState,
    devices: Devices,
    event_tx: Sender<AppEvent>,
    scaler: DpiScaler,
    reference: VideoSize,
    tracking: Option<TrackHandle>,
    single_events: bool,
}

impl Screen {
    /// Creates a screen with no displays.
    ///
    /// # Arguments
    ///
    /// * `devices` - The host environment and input devices.
    /// * `event_tx` - The bus pointer input is published on.
    /// * `reference` - The frame pointer deltas are scaled to for displays
    ///   with a picture, usually [`REFERENCE_SIZE`].
    pub(crate) fn new(devices: Devices, event_tx: Sender<AppEvent>, reference: VideoSize) -> Self {
        let scaler = DpiScaler::new(devices.env.device_pixel_ratio());

        Self {
            state: ScreenState::default(),
            devices,
            event_tx,
            scaler,
            reference,
            tracking: None,
            single_events: SINGLE_EVENTS,
        }
    }

    /// Loads the options the screen depends on.
    pub(crate) fn init(&mut self, settings: &dyn Settings) {
        self.settings_changed(settings);
    }

    /// Re-reads the options after the settings changed.
    pub(crate) fn settings_changed(&mut self, settings: &dyn Settings) {
        self.state.force_fullscreen = settings.force_fullscreen();
        debug!("force fullscreen: {}", self.state.force_fullscreen);
    }

    pub(crate) fn state(&self) -> &ScreenState {
        &self.state
    }

    pub(crate) fn current(&self) -> Option<DisplayId> {
        self.state.current
    }

    pub(crate) fn is_fullscreen(&self) -> bool {
        self.devices.env.is_fullscreen()
    }

    pub(crate) fn is_tracking(&self) -> bool {
        self.tracking.is_some()
    }

    pub(crate) fn set_show_cursor(&mut self, show: bool) {
        self.state.show_cursor = show;
    }

    /// Registers displays, in order.
    pub(crate) fn add(&mut self, ids: impl IntoIterator<Item = DisplayId>) {
        self.state.components.extend(ids);
    }

    /// Switches to `component`, or re-toggles the current display when none
    /// is given.
    ///
    /// Every registered display is hidden first, then the current one is
    /// toggled with `force`.
    pub(crate) fn toggle(
        &mut self,
        displays: &mut Displays,
        component: Option<DisplayId>,
        force: Option<bool>,
    ) {
        if let Some(id) = component {
            self.state.current = Some(id);
        }

        for &id in &self.state.components {
            if let Some(display) = displays.get_mut(id) {
                display.toggle(Some(false));
            }
        }

        if let Some(display) = self.state.current.and_then(|id| displays.get_mut(id)) {
            debug!("toggling display {} ({:?})", display.name(), force);
            display.toggle(force);
        }

        if self.state.force_fullscreen {
            self.request_fullscreen(displays);
        }

        if self.state.show_cursor {
            self.switch_keyboard_mouse(displays, true);
        }
    }

    /// Toggles fullscreen for the current display.
    ///
    /// Does nothing when the current display opts out of fullscreen.
    pub(crate) fn fullscreen(&mut self, displays: &Displays) {
        if self.current_capabilities(displays).no_fullscreen {
            return;
        }

        // The root only fills the window while fullscreen. This is an
        // approximation and can be wrong with zoomed or multi-monitor
        // layouts.
        let env = &mut self.devices.env;
        let enter = env.root_height() != env.window_height();
        env.toggle_fullscreen(enter);
    }

    /// Leaves fullscreen, whatever the current display declares.
    pub(crate) fn exit_fullscreen(&mut self) {
        if self.devices.env.is_fullscreen() {
            self.devices.env.toggle_fullscreen(false);
        }
    }

    /// Switches controls between windowed and fullscreen mode.
    pub(crate) fn toggle_controls(&mut self, displays: &Displays, enable: bool) {
        if self.devices.env.is_mobile_device() {
            return;
        }

        if enable && !self.state.kbm_support {
            self.devices.idler.hide();
        } else {
            self.devices.idler.show();
        }

        self.switch_keyboard_mouse(displays, enable);

        if self.state.kbm_support {
            self.apply_pad_polling();
        }
    }

    /// Handles a change of the host fullscreen state.
    pub(crate) fn fullscreen_changed(&mut self, displays: &mut Displays) {
        let fullscreen = self.devices.env.is_fullscreen();
        debug!("fullscreen changed: {}", fullscreen);

        self.toggle_controls(displays, fullscreen);

        if let Some(display) = self.state.current.and_then(|id| displays.get_mut(id)) {
            display.on_fullscreen(fullscreen);
        }
    }

    /// Marks keyboard and mouse input as supported.
    pub(crate) fn keyboard_mouse_supported(&mut self, displays: &Displays) {
        self.state.kbm_support = true;

        if self.devices.env.is_fullscreen() {
            self.toggle_controls(displays, true);
        }
    }

    /// Sets whether keyboard and mouse input is skipped in favour of
    /// controllers.
    pub(crate) fn set_keyboard_mouse_skip(&mut self, skip: bool) {
        self.state.kbm_skip = skip;
        self.apply_pad_polling();
    }

    /// Publishes a raw pointer move, scaled to the reference frame when the
    /// current display has a picture.
    pub(crate) fn pointer_moved(&self, displays: &Displays, raw: PointerMove) {
        let delta = self
            .state
            .current
            .and_then(|id| displays.get(id))
            .filter(|display| display.capabilities().has_display)
            .and_then(|display| display.video_size())
            .map(|video| self.scaler.scale(raw, video, self.reference))
            .unwrap_or(raw);

        self.publish(AppEvent::MouseMoved(delta));
    }

    pub(crate) fn pointer_down(&self, button: u8) {
        self.publish(AppEvent::MousePressed(PointerPress {
            button,
            pressed: true,
        }));
    }

    pub(crate) fn pointer_up(&self, button: u8) {
        self.publish(AppEvent::MousePressed(PointerPress {
            button,
            pressed: false,
        }));
    }

    fn current_capabilities(&self, displays: &Displays) -> Capabilities {
        self.state
            .current
            .and_then(|id| displays.get(id))
            .map(|display| display.capabilities())
            .unwrap_or_default()
    }

    // Only ever enters fullscreen, toggling here would leave it when a
    // display is switched while already fullscreen.
    fn request_fullscreen(&mut self, displays: &Displays) {
        if self.current_capabilities(displays).no_fullscreen {
            return;
        }

        if !self.devices.env.is_fullscreen() {
            self.devices.env.toggle_fullscreen(true);
        }
    }

    fn switch_keyboard_mouse(&mut self, displays: &Displays, enabled: bool) {
        if !self.current_capabilities(displays).has_display || !self.state.kbm_support {
            return;
        }

        let lock = enabled && !self.state.kbm_skip;

        if lock {
            if let Err(e) = self.devices.pointer.request_lock() {
                warn!("pointer lock failed: {}", e);
            }
        }

        self.track_pointer(lock);

        if let Err(e) = self.devices.keyboard.lock(lock) {
            warn!("keyboard lock failed: {}", e);
        }
    }

    fn track_pointer(&mut self, enabled: bool) {
        if enabled {
            if self.tracking.is_none() {
                // coalesced events are broken since Firefox 120
                let single = self.devices.env.browser() == Browser::Firefox || self.single_events;
                match self.devices.pointer.track(single) {
                    Ok(handle) => self.tracking = Some(handle),
                    Err(e) => warn!("pointer tracking failed: {}", e),
                }
            }
        } else if let Some(handle) = self.tracking.take() {
            self.devices.pointer.untrack(handle);
        }

        self.devices.pointer.set_press_handlers(enabled);
    }

    fn apply_pad_polling(&mut self) {
        if self.state.kbm_skip {
            self.devices.pad.enable();
        } else {
            self.devices.pad.disable();
        }
    }

    fn publish(&self, event: AppEvent) {
        if let Err(e) = self.event_tx.send(event) {
            warn!("event bus closed: {}", e);
        }
    }
}
