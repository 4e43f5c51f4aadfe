pub mod commands;
pub mod events;
pub mod state;
pub mod ui;
pub mod utils;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use datamint_client::GenerationBackend;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::CliError;
use crate::workspace::{Settings, WorkspacePaths};
use events::handle_key;
use state::{App, AppEvent};
use ui::draw_ui;

const TICK: Duration = Duration::from_millis(100);

/// Raw-mode alternate screen, restored on drop even when the loop fails.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn enter() -> Result<Self, CliError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

pub fn run(
    runtime: tokio::runtime::Handle,
    paths: WorkspacePaths,
    settings: Settings,
    backend: Arc<dyn GenerationBackend>,
) -> Result<(), CliError> {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let mut app = App::new(runtime, tx, backend, paths, settings);
    app.push_message("Type /help to see commands, or plain text to set the context.");
    app.request_health();

    let mut session = TerminalSession::enter()?;
    tracing::info!(event = "tui_started");
    let result = run_loop(&mut session.terminal, &mut app, &mut rx);
    tracing::info!(event = "tui_stopped", ok = result.is_ok());
    result
}

fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: &mut UnboundedReceiver<AppEvent>,
) -> Result<(), CliError> {
    while !app.should_quit {
        terminal.draw(|frame| draw_ui(frame, app))?;

        while let Ok(event) = rx.try_recv() {
            app.apply_event(event);
        }
        app.spinner_idx = app.spinner_idx.wrapping_add(1);

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) => handle_key(app, key)?,
                Event::Mouse(mouse) => scroll_messages(app, mouse.kind),
                _ => {}
            }
        }
    }
    Ok(())
}

fn scroll_messages(app: &mut App, kind: MouseEventKind) {
    match kind {
        MouseEventKind::ScrollUp => app.scroll_offset = app.scroll_offset.saturating_add(1),
        MouseEventKind::ScrollDown => app.scroll_offset = app.scroll_offset.saturating_sub(1),
        _ => {}
    }
}
