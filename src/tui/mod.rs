//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Busy** (a request the user waits on is in flight): draws every ~80ms
//!   so the spinner turns.
//! - **Idle**: sleeps up to 500ms, only redraws on events, task results or
//!   terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
pub mod keymap;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::api::{BookApi, HttpBookApi};
use crate::core::action::{Action, Effect, Task, update};
use crate::core::config::ResolvedConfig;
use crate::core::session::SessionStore;
use crate::core::state::App;
use crate::core::tasks;
use crate::tui::event::{poll_event_immediate, poll_event_timeout};

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // The keyboard enhancement protocol is ignored by terminals that lack it
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let api: Arc<dyn BookApi> = Arc::new(HttpBookApi::new(&config.api_base_url));
    let store = Arc::new(SessionStore::new(config.storage_path.clone()));
    info!(
        "Starting with API origin {} and storage {}",
        config.api_base_url,
        config.storage_path.display()
    );
    let mut app = App::new(config.api_base_url.clone());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        let busy = app.is_busy();
        if busy {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short while busy (~12fps), long when idle
        let timeout = if busy {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = keymap::action_for(&app, &event) else {
                continue;
            };
            match update(&mut app, action) {
                Effect::Quit => break 'main,
                Effect::Spawn(task) => spawn_task(task, &api, &store, tx.clone()),
                Effect::None => {}
            }
        }

        // Handle background task results
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            match update(&mut app, action) {
                Effect::Quit => break 'main,
                Effect::Spawn(task) => spawn_task(task, &api, &store, tx.clone()),
                Effect::None => {}
            }
        }
    }

    ratatui::restore();
    Ok(())
}

fn spawn_task(
    task: Task,
    api: &Arc<dyn BookApi>,
    store: &Arc<SessionStore>,
    tx: mpsc::Sender<Action>,
) {
    info!(
        "Spawning request: {} (generation {})",
        task.request.label(),
        task.generation
    );
    let api = Arc::clone(api);
    let store = Arc::clone(store);
    tokio::spawn(async move {
        let action = tasks::run(task, api.as_ref(), &store).await;
        if tx.send(action).is_err() {
            warn!("Failed to send task result: receiver dropped");
        }
    });
}
