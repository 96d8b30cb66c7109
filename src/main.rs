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

//! # Screen control shell.
//!
//! A terminal shell around a single interactive display surface. It switches
//! between displays, manages fullscreen, and moves pointer and keyboard
//! capture in and out depending on what the display supports and what the
//! user asked for.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** owns the [`Screen`], the displays and all devices,
//!   and renders the shell.
//! * **Background Workers** read terminal input, emit ticks and poll
//!   controllers, and only ever talk to the main thread through events.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the main thread and the workers is handled via `std::sync::mpsc`
//! channels.

mod components;
mod config;
mod display;
mod events;
mod input;
mod model;
mod render;
mod screen;
mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, PopKeyboardEnhancementFlags},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{LevelFilter, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    fs::File,
    io::{self},
    sync::{
        Arc,
        mpsc::{self, Receiver, Sender},
    },
    thread,
    time::Duration,
};

use crate::{
    components::{LobbyView, StreamView},
    config::AppConfig,
    display::{DisplayId, Displays, VideoSize},
    events::{AppEvent, process_events},
    input::{
        idle::IdleHandle,
        pad::{POLL_INTERVAL, PadPoll},
        terminal::{
            PointerShared, TerminalEnvironment, TerminalIdler, TerminalKeyboard, TerminalPointer,
            Viewport, spawn_input_reader,
        },
    },
    model::status::InputStatus,
    screen::{Devices, Screen},
    theme::Theme,
};

const LOG_FILE: &str = "screenctl.log";

const STREAM_SIZE: VideoSize = VideoSize::new(320, 240);

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub screen: Screen,
    pub displays: Displays,
    pub lobby: DisplayId,
    pub stream: DisplayId,

    pub viewport: Viewport,
    pub pointer: Arc<PointerShared>,
    pub idler: IdleHandle,

    pub input_status: InputStatus,
    pub last_error: Option<String>,
}

impl App {
    /// Create a new instance of application state.
    ///
    /// Registers the lobby and the stream with the screen and shows the
    /// lobby.
    pub fn new(config: AppConfig) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        let viewport = Viewport::default();
        let pointer = Arc::new(PointerShared::default());
        let idler = IdleHandle::new(config.idle_timeout());

        let devices = Devices {
            env: Box::new(TerminalEnvironment::new(
                viewport.clone(),
                pointer.clone(),
                event_tx.clone(),
            )),
            pointer: Box::new(TerminalPointer::new(pointer.clone())),
            keyboard: Box::new(TerminalKeyboard::default()),
            pad: Box::new(PadPoll::new(event_tx.clone(), POLL_INTERVAL)),
            idler: Box::new(TerminalIdler::new(idler.clone(), pointer.clone())),
        };

        let mut screen = Screen::new(devices, event_tx.clone(), config.reference_size());
        screen.init(&config);
        screen.set_show_cursor(config.show_cursor);

        let mut displays = Displays::new();
        let lobby = displays.insert(Box::new(LobbyView::new()));
        let stream = displays.insert(Box::new(StreamView::new(STREAM_SIZE)));
        screen.add([lobby, stream]);
        screen.toggle(&mut displays, Some(lobby), Some(true));

        let input_status = InputStatus::new(config.reference_size());

        Self {
            config,
            theme: Theme::default(),
            event_tx,
            event_rx,
            screen,
            displays,
            lobby,
            stream,
            viewport,
            pointer,
            idler,
            input_status,
            last_error: None,
        }
    }
}

/// The entry point of the application.
///
/// Sets up logging and the application state, manages the terminal
/// lifecycle, and returns an error if any part of the execution fails.
fn main() -> Result<()> {
    init_logging();

    let config = config::load_config();
    info!("configuration loaded: {:?}", config);

    let mut app = App::new(config);

    let mut terminal = setup_terminal()?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal);

    res.context("Application error occurred")
}

/// Initializes the logger.
///
/// The terminal belongs to the shell, so log output goes to a file. The
/// default filter is "info" if `RUST_LOG` is not set.
fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.format_timestamp_micros();

    match File::create(LOG_FILE) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.filter_level(LevelFilter::Off);
        }
    }

    builder.init();
}

/// Prepares the terminal for the shell.
///
/// Enables raw mode and switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`] and releases any
/// input capture still held, then makes the cursor visible again.
///
/// This function is "best-effort" and does not return a result, as it is
/// called during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    execute!(
        terminal.backend_mut(),
        PopKeyboardEnhancementFlags,
        DisableMouseCapture
    )
    .ok();
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();
}

/// Starts the background workers and enters the main event loop.
///
/// This function spawns:
/// * An input thread translating terminal input into application events.
/// * A tick thread driving the pointer idle timer and periodic redraws.
///
/// It then announces keyboard/mouse support if configured and hands control
/// to [`process_events`].
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    spawn_input_reader(app.event_tx.clone(), app.pointer.clone());

    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(Duration::from_millis(250));
        }
    });

    if app.config.keyboard_mouse {
        app.event_tx.send(AppEvent::KeyboardMouseSupported)?;
    }

    terminal.draw(|f| render::draw(f, app))?;

    process_events(terminal, app)
}
