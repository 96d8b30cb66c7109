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

//! Application event bus and dispatch.
//!
//! Every signal in the application is an [`AppEvent`] sent over one channel.
//! Publishing is a `send` on a clone of the sender; subscribing is an arm in
//! [`process_events`], which drains the channel on the main thread and
//! redraws after each event.
//!
//! The events fall into a few groups:
//!
//! * **Raw input** from the input reader thread: keys, pointer moves and
//!   presses, resizes.
//! * **Screen signals** consumed by the [`Screen`](crate::screen::Screen):
//!   fullscreen changes, keyboard/mouse support and skip, settings changes.
//! * **Pointer output** published by the screen: scaled moves and presses.
//! * **Housekeeping**: ticks, controller polls, errors and exit.

mod handlers;
use handlers::*;

use std::io::Stdout;

use anyhow::{Result, anyhow};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App,
    render::draw,
    screen::{PointerMove, PointerPress},
};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Resize,

    PointerMoved(PointerMove),
    PointerDown(u8),
    PointerUp(u8),
    /// Any mouse report, with the terminal cell it happened over.
    PointerActivity(u16, u16),

    MouseMoved(PointerMove),
    MousePressed(PointerPress),

    FullscreenChanged,
    KeyboardMouseSupported,
    KeyboardMouseSkip(bool),
    SettingsChanged,

    PadPolled,
    Tick,

    ExitApplication,

    Error(String),
    FatalError(String),
}

/// Runs the main application loop, handling events and rendering the UI in
/// the terminal.
///
/// This function loops until an exit event is received or the event channel
/// is closed. A fatal error ends the loop with that error.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        let redraw = match event {
            AppEvent::ExitApplication => break,
            AppEvent::FatalError(e) => return Err(anyhow!(e)),

            AppEvent::Key(key) => {
                process_key_event(app, key)?;
                true
            }

            AppEvent::PointerMoved(raw) => {
                app.screen.pointer_moved(&app.displays, raw);
                false
            }
            AppEvent::PointerDown(button) => {
                app.screen.pointer_down(button);
                false
            }
            AppEvent::PointerUp(button) => {
                app.screen.pointer_up(button);
                false
            }
            AppEvent::PointerActivity(column, row) => handle_pointer_activity(app, column, row),

            AppEvent::MouseMoved(delta) => handle_mouse_moved(app, delta),
            AppEvent::MousePressed(press) => handle_mouse_pressed(app, press),

            AppEvent::FullscreenChanged => {
                app.screen.fullscreen_changed(&mut app.displays);
                true
            }
            AppEvent::KeyboardMouseSupported => {
                app.screen.keyboard_mouse_supported(&app.displays);
                true
            }
            AppEvent::KeyboardMouseSkip(skip) => {
                app.screen.set_keyboard_mouse_skip(skip);
                true
            }
            AppEvent::SettingsChanged => {
                app.screen.settings_changed(&app.config);
                true
            }

            AppEvent::PadPolled => handle_pad_polled(app),
            AppEvent::Error(e) => handle_error(app, e),
            AppEvent::Resize | AppEvent::Tick => handle_tick(app),
        };

        if redraw {
            terminal.draw(|f| draw(f, app))?;
        }
    }

    Ok(())
}

/// Maps keyboard input to screen actions.
///
/// * `1` / `2`: switch to the lobby or the stream.
/// * `Tab`: toggle the current display again.
/// * `f` / `F11`: toggle fullscreen, `Esc` leaves it.
/// * `s`: flip between keyboard/mouse and controller input.
/// * `o`: flip the forced fullscreen option.
/// * `c`: flip capturing the pointer whenever a display is toggled.
/// * `q`: quit.
///
/// # Errors
///
/// Returns an error if an event cannot be published.
fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        KeyCode::Char('1') => {
            let lobby = app.lobby;
            handle_show_display(app, lobby);
        }
        KeyCode::Char('2') => {
            let stream = app.stream;
            handle_show_display(app, stream);
        }
        KeyCode::Tab => app.screen.toggle(&mut app.displays, None, None),

        KeyCode::Char('f') | KeyCode::F(11) => app.screen.fullscreen(&app.displays),
        KeyCode::Esc => app.screen.exit_fullscreen(),

        KeyCode::Char('s') => {
            let skip = !app.screen.state().kbm_skip;
            app.event_tx.send(AppEvent::KeyboardMouseSkip(skip))?;
        }
        KeyCode::Char('o') => handle_toggle_force_fullscreen(app)?,
        KeyCode::Char('c') => {
            let show = !app.screen.state().show_cursor;
            app.screen.set_show_cursor(show);
        }

        _ => {}
    }

    Ok(())
}
