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

//! Display components and the registry that owns them.
//!
//! A display is anything the screen can switch to: a game stream, a lobby,
//! a help page. The [`Screen`](crate::screen::Screen) never owns displays, it
//! only keeps [`DisplayId`] handles into a [`Displays`] registry held by the
//! application. A handle whose display has been removed simply resolves to
//! nothing.

use crate::render::Render;

/// The native size of the picture a display shows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct VideoSize {
    pub(crate) w: u32,
    pub(crate) h: u32,
}

impl VideoSize {
    pub(crate) const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}

/// Optional capabilities a display can declare.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Capabilities {
    /// The display must never be switched to fullscreen.
    pub(crate) no_fullscreen: bool,
    /// The display has a picture surface, so pointer and keyboard capture
    /// apply to it.
    pub(crate) has_display: bool,
}

/// The contract between the screen and a registered display.
///
/// Only [`Display::toggle`] is required, everything else has a neutral
/// default.
pub(crate) trait Display: Render {
    /// A short name, used in logs and the shell header.
    fn name(&self) -> &str;

    /// Shows or hides the display.
    ///
    /// `None` leaves the decision to the display itself.
    fn toggle(&mut self, show: Option<bool>);

    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }

    fn video_size(&self) -> Option<VideoSize> {
        None
    }

    /// Called after the fullscreen state changed while this display was
    /// current.
    fn on_fullscreen(&mut self, _fullscreen: bool) {}
}

/// A non-owning handle to a display in a [`Displays`] registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct DisplayId(usize);

/// Owns the display components of the application.
///
/// Slots are never reused, so a stale [`DisplayId`] can never point at a
/// different display.
#[derive(Default)]
pub(crate) struct Displays {
    slots: Vec<Option<Box<dyn Display>>>,
}

impl Displays {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, display: Box<dyn Display>) -> DisplayId {
        self.slots.push(Some(display));
        DisplayId(self.slots.len() - 1)
    }

    pub(crate) fn get(&self, id: DisplayId) -> Option<&dyn Display> {
        self.slots.get(id.0).and_then(|slot| slot.as_deref())
    }

    pub(crate) fn get_mut(&mut self, id: DisplayId) -> Option<&mut (dyn Display + 'static)> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_deref_mut())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{cell::RefCell, rc::Rc};

    use ratatui::{Frame, layout::Rect};

    use super::*;
    use crate::theme::Theme;

    /// A display that records every call it receives.
    pub(crate) struct MockDisplay {
        pub(crate) name: String,
        pub(crate) capabilities: Capabilities,
        pub(crate) video_size: Option<VideoSize>,
        pub(crate) toggles: Rc<RefCell<Vec<Option<bool>>>>,
        pub(crate) fullscreen_calls: Rc<RefCell<Vec<bool>>>,
    }

    impl MockDisplay {
        pub(crate) fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                capabilities: Capabilities::default(),
                video_size: None,
                toggles: Rc::default(),
                fullscreen_calls: Rc::default(),
            }
        }

        pub(crate) fn with_display(mut self, w: u32, h: u32) -> Self {
            self.capabilities.has_display = true;
            self.video_size = Some(VideoSize::new(w, h));
            self
        }

        pub(crate) fn without_fullscreen(mut self) -> Self {
            self.capabilities.no_fullscreen = true;
            self
        }
    }

    impl Displays {
        pub(crate) fn remove(&mut self, id: DisplayId) -> Option<Box<dyn Display>> {
            self.slots.get_mut(id.0).and_then(Option::take)
        }
    }

    impl Render for MockDisplay {
        fn draw(&mut self, _f: &mut Frame, _area: Rect, _theme: &Theme) {}
    }

    impl Display for MockDisplay {
        fn name(&self) -> &str {
            &self.name
        }

        fn toggle(&mut self, show: Option<bool>) {
            self.toggles.borrow_mut().push(show);
        }

        fn capabilities(&self) -> Capabilities {
            self.capabilities
        }

        fn video_size(&self) -> Option<VideoSize> {
            self.video_size
        }

        fn on_fullscreen(&mut self, fullscreen: bool) {
            self.fullscreen_calls.borrow_mut().push(fullscreen);
        }
    }

    #[test_log::test]
    fn removed_display_resolves_to_nothing() {
        let mut displays = Displays::new();
        let a = displays.insert(Box::new(MockDisplay::new("a")));
        let b = displays.insert(Box::new(MockDisplay::new("b")));

        assert!(displays.remove(a).is_some());
        assert!(displays.get(a).is_none());
        assert!(displays.remove(a).is_none());
        assert_eq!(displays.get(b).map(|d| d.name()), Some("b"));
    }

    #[test_log::test]
    fn slots_are_not_reused() {
        let mut displays = Displays::new();
        let a = displays.insert(Box::new(MockDisplay::new("a")));
        displays.remove(a);
        let c = displays.insert(Box::new(MockDisplay::new("c")));

        assert_ne!(a, c);
        assert!(displays.get(a).is_none());
    }

    #[test_log::test]
    fn default_capabilities_are_empty() {
        struct Plain;
        impl Render for Plain {
            fn draw(&mut self, _f: &mut Frame, _area: Rect, _theme: &Theme) {}
        }
        impl Display for Plain {
            fn name(&self) -> &str {
                "plain"
            }
            fn toggle(&mut self, _show: Option<bool>) {}
        }

        let plain = Plain;
        assert_eq!(plain.capabilities(), Capabilities::default());
        assert!(plain.video_size().is_none());
    }
}
