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

//! Controller polling.
//!
//! [`PadPoll`] is a command proxy for a background worker thread. While
//! enabled, the worker emits an [`AppEvent::PadPolled`] on every poll
//! interval so the shell can sample the attached controllers. Reading the
//! controllers themselves is left to whoever consumes that event.

use std::{
    sync::mpsc::{self, Receiver, RecvTimeoutError, Sender},
    thread,
    time::Duration,
};

use log::{debug, warn};

use crate::{events::AppEvent, input::PadPoller};

pub(crate) const POLL_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug)]
pub(crate) enum PadPollCommand {
    Enable,
    Disable,
}

/// A handle to the controller poll worker.
pub(crate) struct PadPoll {
    command_tx: Sender<PadPollCommand>,
}

impl PadPoll {
    /// Spawns the poll worker, initially disabled, and returns its handle.
    pub(crate) fn new(event_tx: Sender<AppEvent>, interval: Duration) -> Self {
        let (command_tx, command_rx) = mpsc::channel();

        thread::spawn(move || pad_poll_worker(command_rx, event_tx, interval));

        Self { command_tx }
    }

    fn send(&self, command: PadPollCommand) {
        if let Err(e) = self.command_tx.send(command) {
            warn!("controller poll worker is gone: {}", e);
        }
    }
}

impl PadPoller for PadPoll {
    fn enable(&mut self) {
        self.send(PadPollCommand::Enable);
    }

    fn disable(&mut self) {
        self.send(PadPollCommand::Disable);
    }
}

/// The poll loop.
///
/// While disabled the worker blocks on the command channel, so it costs
/// nothing. It exits once either channel is closed.
fn pad_poll_worker(
    command_rx: Receiver<PadPollCommand>,
    event_tx: Sender<AppEvent>,
    interval: Duration,
) {
    let mut enabled = false;

    loop {
        let command = if enabled {
            match command_rx.recv_timeout(interval) {
                Ok(command) => Some(command),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        } else {
            match command_rx.recv() {
                Ok(command) => Some(command),
                Err(_) => break,
            }
        };

        match command {
            Some(PadPollCommand::Enable) => enabled = true,
            Some(PadPollCommand::Disable) => enabled = false,
            None => {
                if event_tx.send(AppEvent::PadPolled).is_err() {
                    break;
                }
            }
        }
    }

    debug!("controller poll worker stopped");
}
