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

//! Terminal host for the screen.
//!
//! Maps the screen's view of the world onto a terminal driven by `crossterm`:
//!
//! * **Fullscreen** means the current display owns the whole terminal and the
//!   shell chrome is hidden. The flag lives in a [`Viewport`] shared with the
//!   renderer.
//! * **Pointer lock** is terminal mouse capture.
//! * **Keyboard lock** pushes the keyboard enhancement flags, so that keys the
//!   terminal would otherwise swallow or fold together are reported.
//! * **Idle hide** needs mouse motion reports as well, so [`TerminalIdler`]
//!   turns mouse reporting on while its timer is armed.
//!
//! Raw input is read on a background thread by [`spawn_input_reader`] and
//! forwarded to the main loop as [`AppEvent`]s.

use std::{
    cell::Cell,
    io,
    rc::Rc,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::Sender,
    },
    thread,
    time::Duration,
};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        MouseButton, MouseEventKind, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, terminal,
    tty::IsTty,
};
use log::{debug, trace, warn};

use crate::{
    events::AppEvent,
    input::{
        Browser, CaptureError, Environment, KeyboardDriver, PointerDriver, PointerIdler,
        TrackHandle, idle::IdleHandle,
    },
    screen::PointerMove,
};

#[derive(Debug, Default)]
struct ViewportState {
    fullscreen: Cell<bool>,
    root_height: Cell<u16>,
}

/// Layout state shared between the terminal environment and the renderer.
#[derive(Clone, Debug, Default)]
pub(crate) struct Viewport(Rc<ViewportState>);

impl Viewport {
    pub(crate) fn is_fullscreen(&self) -> bool {
        self.0.fullscreen.get()
    }

    pub(crate) fn root_height(&self) -> u16 {
        self.0.root_height.get()
    }

    /// Records the height the current display was last drawn with.
    pub(crate) fn set_root_height(&self, height: u16) {
        self.0.root_height.set(height);
    }
}

/// Pointer state shared with the input reader thread.
#[derive(Debug, Default)]
pub(crate) struct PointerShared {
    captured: AtomicBool,
    reporting: AtomicBool,
    tracking: AtomicBool,
    single_events: AtomicBool,
    press_handlers: AtomicBool,
}

impl PointerShared {
    pub(crate) fn is_captured(&self) -> bool {
        self.captured.load(Ordering::Relaxed)
    }

    /// Whether mouse reporting is on for the idle timer alone.
    pub(crate) fn is_reporting(&self) -> bool {
        self.reporting.load(Ordering::Relaxed)
    }

    pub(crate) fn is_tracking(&self) -> bool {
        self.tracking.load(Ordering::Relaxed)
    }

    fn single_events(&self) -> bool {
        self.single_events.load(Ordering::Relaxed)
    }

    fn press_handlers(&self) -> bool {
        self.press_handlers.load(Ordering::Relaxed)
    }
}

pub(crate) struct TerminalEnvironment {
    viewport: Viewport,
    pointer: Arc<PointerShared>,
    event_tx: Sender<AppEvent>,
}

impl TerminalEnvironment {
    pub(crate) fn new(
        viewport: Viewport,
        pointer: Arc<PointerShared>,
        event_tx: Sender<AppEvent>,
    ) -> Self {
        Self {
            viewport,
            pointer,
            event_tx,
        }
    }
}

impl Environment for TerminalEnvironment {
    fn browser(&self) -> Browser {
        Browser::Unknown
    }

    fn is_mobile_device(&self) -> bool {
        false
    }

    fn is_fullscreen(&self) -> bool {
        self.viewport.is_fullscreen()
    }

    fn toggle_fullscreen(&mut self, enter: bool) {
        if self.viewport.is_fullscreen() == enter {
            return;
        }

        self.viewport.0.fullscreen.set(enter);

        // Leaving fullscreen drops the pointer lock, like a browser does.
        let released = !enter && self.pointer.captured.swap(false, Ordering::Relaxed);
        if released && !self.pointer.is_reporting() {
            if let Err(e) = execute!(io::stdout(), DisableMouseCapture) {
                warn!("failed to release mouse capture: {}", e);
            }
        }

        let _ = self.event_tx.send(AppEvent::FullscreenChanged);
    }

    fn root_height(&self) -> u16 {
        self.viewport.root_height()
    }

    fn window_height(&self) -> u16 {
        terminal::size().map(|(_, rows)| rows).unwrap_or_default()
    }
}

pub(crate) struct TerminalPointer {
    shared: Arc<PointerShared>,
    next_handle: u64,
}

impl TerminalPointer {
    pub(crate) fn new(shared: Arc<PointerShared>) -> Self {
        Self {
            shared,
            next_handle: 0,
        }
    }
}

impl PointerDriver for TerminalPointer {
    fn request_lock(&mut self) -> Result<(), CaptureError> {
        if !self.shared.is_captured() {
            if !io::stdout().is_tty() {
                return Err(CaptureError::Denied("stdout is not a terminal".to_string()));
            }
            if !self.shared.is_reporting() {
                execute!(io::stdout(), EnableMouseCapture)?;
            }
            self.shared.captured.store(true, Ordering::Relaxed);
        }
        Ok(())
    }

    fn track(&mut self, single_events: bool) -> Result<TrackHandle, CaptureError> {
        self.next_handle += 1;
        self.shared
            .single_events
            .store(single_events, Ordering::Relaxed);
        self.shared.tracking.store(true, Ordering::Relaxed);
        debug!("pointer tracking {} started", self.next_handle);

        Ok(TrackHandle(self.next_handle))
    }

    fn untrack(&mut self, handle: TrackHandle) {
        self.shared.tracking.store(false, Ordering::Relaxed);
        debug!("pointer tracking {} stopped", handle.0);
    }

    fn set_press_handlers(&mut self, enabled: bool) {
        self.shared.press_handlers.store(enabled, Ordering::Relaxed);
    }
}

#[derive(Default)]
pub(crate) struct TerminalKeyboard {
    pushed: bool,
}

impl KeyboardDriver for TerminalKeyboard {
    fn lock(&mut self, enabled: bool) -> Result<(), CaptureError> {
        if enabled == self.pushed {
            return Ok(());
        }

        if enabled {
            if !terminal::supports_keyboard_enhancement()? {
                return Err(CaptureError::Unsupported("keyboard lock"));
            }
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                )
            )?;
        } else {
            execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
        }

        self.pushed = enabled;
        Ok(())
    }
}

/// The idle-hide timer, plus the mouse reporting it depends on.
///
/// Mouse capture that is already held for the pointer lock is left alone.
pub(crate) struct TerminalIdler {
    idle: IdleHandle,
    shared: Arc<PointerShared>,
}

impl TerminalIdler {
    pub(crate) fn new(idle: IdleHandle, shared: Arc<PointerShared>) -> Self {
        Self { idle, shared }
    }
}

impl PointerIdler for TerminalIdler {
    fn show(&mut self) {
        self.idle.show();

        if self.shared.reporting.swap(false, Ordering::Relaxed) && !self.shared.is_captured() {
            if let Err(e) = execute!(io::stdout(), DisableMouseCapture) {
                warn!("failed to stop mouse reporting: {}", e);
            }
        }
    }

    fn hide(&mut self) {
        self.idle.hide();

        if self.shared.is_captured() || self.shared.is_reporting() {
            return;
        }
        if !io::stdout().is_tty() {
            debug!("stdout is not a terminal, pointer activity is not reported");
            return;
        }

        match execute!(io::stdout(), EnableMouseCapture) {
            Ok(()) => self.shared.reporting.store(true, Ordering::Relaxed),
            Err(e) => warn!("failed to start mouse reporting: {}", e),
        }
    }
}

/// Turns absolute mouse cells into relative moves.
#[derive(Debug, Default)]
struct MouseTracker {
    last: Option<(u16, u16)>,
}

impl MouseTracker {
    fn delta(&mut self, column: u16, row: u16) -> PointerMove {
        let delta = match self.last {
            Some((c, r)) => PointerMove::new(
                f64::from(column) - f64::from(c),
                f64::from(row) - f64::from(r),
            ),
            None => PointerMove::new(0.0, 0.0),
        };
        self.last = Some((column, row));
        delta
    }
}

// DOM button numbering.
fn button_id(button: MouseButton) -> u8 {
    match button {
        MouseButton::Left => 0,
        MouseButton::Middle => 1,
        MouseButton::Right => 2,
    }
}

fn is_move(kind: MouseEventKind) -> bool {
    matches!(kind, MouseEventKind::Moved | MouseEventKind::Drag(_))
}

/// Spawns a thread translating terminal input into application events.
///
/// A read failure is reported as a fatal application event.
pub(crate) fn spawn_input_reader(event_tx: Sender<AppEvent>, pointer: Arc<PointerShared>) {
    let error_tx = event_tx.clone();

    thread::spawn(move || {
        if let Err(e) = read_input(&event_tx, &pointer) {
            let _ = error_tx.send(AppEvent::FatalError(format!("Input reader failure: {:?}", e)));
        }
    });
}

/// The input read loop, returns once the application stops listening.
fn read_input(event_tx: &Sender<AppEvent>, pointer: &PointerShared) -> Result<()> {
    let mut tracker = MouseTracker::default();
    let mut pending: Option<Event> = None;

    loop {
        let event = match pending.take() {
            Some(event) => event,
            None => event::read()?,
        };

        let app_event = match event {
            Event::Key(key) => Some(AppEvent::Key(key)),
            Event::Resize(_, _) => Some(AppEvent::Resize),
            Event::Mouse(mouse) => {
                let activity = AppEvent::PointerActivity(mouse.column, mouse.row);
                if event_tx.send(activity).is_err() {
                    return Ok(());
                }

                match mouse.kind {
                    kind if is_move(kind) => {
                        let mut delta = tracker.delta(mouse.column, mouse.row);

                        // Coalesce whatever moves are already queued.
                        if !pointer.single_events() {
                            while event::poll(Duration::ZERO)? {
                                match event::read()? {
                                    Event::Mouse(next) if is_move(next.kind) => {
                                        let more = tracker.delta(next.column, next.row);
                                        delta = PointerMove::new(
                                            delta.dx + more.dx,
                                            delta.dy + more.dy,
                                        );
                                    }
                                    other => {
                                        pending = Some(other);
                                        break;
                                    }
                                }
                            }
                        }

                        let moved = delta.dx != 0.0 || delta.dy != 0.0;
                        (pointer.is_tracking() && moved).then_some(AppEvent::PointerMoved(delta))
                    }
                    MouseEventKind::Down(button) if pointer.press_handlers() => {
                        Some(AppEvent::PointerDown(button_id(button)))
                    }
                    MouseEventKind::Up(button) if pointer.press_handlers() => {
                        Some(AppEvent::PointerUp(button_id(button)))
                    }
                    _ => None,
                }
            }
            _ => None,
        };

        if let Some(app_event) = app_event {
            trace!("input: {:?}", app_event);
            if event_tx.send(app_event).is_err() {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    fn environment() -> (TerminalEnvironment, Viewport, mpsc::Receiver<AppEvent>) {
        let (event_tx, event_rx) = mpsc::channel();
        let viewport = Viewport::default();
        let env = TerminalEnvironment::new(viewport.clone(), Arc::default(), event_tx);
        (env, viewport, event_rx)
    }

    #[test_log::test]
    fn fullscreen_change_is_published_once() {
        let (mut env, viewport, event_rx) = environment();

        env.toggle_fullscreen(true);
        env.toggle_fullscreen(true);
        assert!(viewport.is_fullscreen());
        assert!(env.is_fullscreen());
        assert_eq!(event_rx.try_iter().count(), 1);

        env.toggle_fullscreen(false);
        assert!(!viewport.is_fullscreen());
        assert_eq!(event_rx.try_iter().count(), 1);
    }

    #[test_log::test]
    fn root_height_comes_from_the_renderer() {
        let (env, viewport, _event_rx) = environment();

        viewport.set_root_height(17);

        assert_eq!(env.root_height(), 17);
        assert!(!env.is_mobile_device());
    }

    #[test_log::test]
    fn tracking_hands_out_fresh_handles() {
        let shared = Arc::new(PointerShared::default());
        let mut pointer = TerminalPointer::new(shared.clone());

        let first = pointer.track(true).unwrap();
        assert!(shared.is_tracking());
        assert!(shared.single_events());
        pointer.untrack(first);
        assert!(!shared.is_tracking());

        let second = pointer.track(false).unwrap();
        assert_ne!(second, TrackHandle(1));
        assert!(!shared.single_events());

        pointer.set_press_handlers(true);
        assert!(shared.press_handlers());
    }

    #[test_log::test]
    fn idler_leaves_pointer_lock_capture_alone() {
        let shared = Arc::new(PointerShared::default());
        shared.captured.store(true, Ordering::Relaxed);
        let idle = IdleHandle::new(Duration::from_millis(2000));
        let mut idler = TerminalIdler::new(idle.clone(), shared.clone());

        idler.hide();
        assert!(idle.is_armed());
        assert!(!shared.is_reporting());

        idler.show();
        assert!(!idle.is_armed());
        assert!(shared.is_captured());
    }

    #[test_log::test]
    fn leaving_fullscreen_keeps_reporting_for_the_idler() {
        let (event_tx, _event_rx) = mpsc::channel();
        let shared = Arc::new(PointerShared::default());
        shared.reporting.store(true, Ordering::Relaxed);
        shared.captured.store(true, Ordering::Relaxed);
        let mut env = TerminalEnvironment::new(Viewport::default(), shared.clone(), event_tx);

        env.toggle_fullscreen(true);
        env.toggle_fullscreen(false);

        assert!(shared.is_reporting());
        assert!(!shared.is_captured());
    }

    #[test_log::test]
    fn mouse_cells_become_deltas() {
        let mut tracker = MouseTracker::default();

        assert_eq!(tracker.delta(10, 5), PointerMove::new(0.0, 0.0));
        assert_eq!(tracker.delta(12, 4), PointerMove::new(2.0, -1.0));
        assert_eq!(tracker.delta(12, 4), PointerMove::new(0.0, 0.0));
    }

    #[test_log::test]
    fn buttons_use_dom_numbering() {
        assert_eq!(button_id(MouseButton::Left), 0);
        assert_eq!(button_id(MouseButton::Middle), 1);
        assert_eq!(button_id(MouseButton::Right), 2);
    }
}
