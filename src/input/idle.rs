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

//! Pointer idle-hide timer.
//!
//! Once armed with [`PointerIdler::hide`], the pointer is reported hidden
//! after it has been idle over the root element for the configured timeout,
//! and shown again on the next activity. [`PointerIdler::show`] disarms the
//! timer and shows the pointer straight away.
//!
//! The timer is driven from the outside: the shell forwards pointer activity
//! and periodic ticks, the screen arms and disarms it.

use std::{
    cell::RefCell,
    rc::Rc,
    time::{Duration, Instant},
};

use log::trace;

use crate::input::PointerIdler;

pub(crate) const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_millis(2000);

#[derive(Debug)]
pub(crate) struct IdleHide {
    timeout: Duration,
    armed: bool,
    hidden: bool,
    last_activity: Instant,
}

impl IdleHide {
    pub(crate) fn new(timeout: Duration, now: Instant) -> Self {
        Self {
            timeout,
            armed: false,
            hidden: false,
            last_activity: now,
        }
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.armed
    }

    pub(crate) fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub(crate) fn arm(&mut self, now: Instant) {
        if !self.armed {
            self.armed = true;
            self.last_activity = now;
        }
    }

    pub(crate) fn disarm(&mut self) {
        self.armed = false;
        self.hidden = false;
    }

    /// Records pointer activity, revealing the pointer if it was hidden.
    pub(crate) fn activity(&mut self, now: Instant) {
        self.last_activity = now;
        self.hidden = false;
    }

    /// Advances the timer, returning `true` when the pointer just became
    /// hidden.
    pub(crate) fn tick(&mut self, now: Instant) -> bool {
        if !self.armed || self.hidden {
            return false;
        }

        if now.saturating_duration_since(self.last_activity) >= self.timeout {
            trace!("pointer idle for {:?}, hiding", self.timeout);
            self.hidden = true;
            return true;
        }

        false
    }
}

/// Shared handle to an [`IdleHide`] timer.
///
/// The shell keeps one clone to feed activity and ticks, the screen gets
/// another as its [`PointerIdler`].
#[derive(Clone, Debug)]
pub(crate) struct IdleHandle(Rc<RefCell<IdleHide>>);

impl IdleHandle {
    pub(crate) fn new(timeout: Duration) -> Self {
        Self(Rc::new(RefCell::new(IdleHide::new(timeout, Instant::now()))))
    }

    pub(crate) fn activity(&self, now: Instant) {
        self.0.borrow_mut().activity(now);
    }

    pub(crate) fn tick(&self, now: Instant) -> bool {
        self.0.borrow_mut().tick(now)
    }

    pub(crate) fn is_hidden(&self) -> bool {
        self.0.borrow().is_hidden()
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.0.borrow().is_armed()
    }
}

impl PointerIdler for IdleHandle {
    fn show(&mut self) {
        self.0.borrow_mut().disarm();
    }

    fn hide(&mut self) {
        self.0.borrow_mut().arm(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = DEFAULT_IDLE_TIMEOUT;

    #[test_log::test]
    fn stays_visible_until_armed() {
        let start = Instant::now();
        let mut idle = IdleHide::new(TIMEOUT, start);

        assert!(!idle.tick(start + TIMEOUT * 2));
        assert!(!idle.is_hidden());
    }

    #[test_log::test]
    fn hides_after_timeout_once_armed() {
        let start = Instant::now();
        let mut idle = IdleHide::new(TIMEOUT, start);
        idle.arm(start);

        assert!(!idle.tick(start + Duration::from_millis(1999)));
        assert!(idle.tick(start + TIMEOUT));
        assert!(idle.is_hidden());

        // already hidden, nothing changes
        assert!(!idle.tick(start + TIMEOUT * 3));
    }

    #[test_log::test]
    fn activity_reveals_and_restarts_the_timer() {
        let start = Instant::now();
        let mut idle = IdleHide::new(TIMEOUT, start);
        idle.arm(start);
        idle.tick(start + TIMEOUT);

        let moved = start + TIMEOUT + Duration::from_millis(10);
        idle.activity(moved);
        assert!(!idle.is_hidden());
        assert!(!idle.tick(moved + Duration::from_millis(1000)));
        assert!(idle.tick(moved + TIMEOUT));
    }

    #[test_log::test]
    fn show_disarms_and_reveals() {
        let mut handle = IdleHandle::new(TIMEOUT);
        handle.hide();
        assert!(handle.is_armed());

        handle.tick(Instant::now() + TIMEOUT);
        assert!(handle.is_hidden());

        handle.show();
        assert!(!handle.is_armed());
        assert!(!handle.is_hidden());
    }
}
