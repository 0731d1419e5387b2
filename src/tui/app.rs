use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{info, warn};

use crate::io::config_io::{LoadedConfig, validate_remote};
use crate::manager::{Action, ListController, ListError, ListState};
use crate::model::{Record, UiConfig};
use crate::remote::{RestStore, TaskStore};

use super::input;
use super::render;
use super::theme::Theme;

/// How long quitting waits for outstanding requests
const QUIT_GRACE: Duration = Duration::from_secs(3);

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Moving through the list
    Navigate,
    /// Typing into the new-task field
    Input,
    /// Editing the selected record in place
    Edit,
}

/// Main application state
pub struct App {
    pub controller: ListController,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub title: String,
    /// Index of the selected record
    pub cursor: usize,
    /// First visible list row
    pub scroll_offset: usize,
    /// Byte offset of the caret in the new-task field
    pub input_cursor: usize,
    /// Byte offset of the caret in the edit buffer
    pub edit_cursor: usize,
}

impl App {
    pub fn new(controller: ListController, ui: &UiConfig) -> Self {
        App {
            controller,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(ui),
            title: ui.title.clone().unwrap_or_else(|| "Tasks".to_string()),
            cursor: 0,
            scroll_offset: 0,
            input_cursor: 0,
            edit_cursor: 0,
        }
    }

    pub fn state(&self) -> &ListState {
        self.controller.state()
    }

    /// The record under the cursor
    pub fn selected(&self) -> Option<&Record> {
        self.state().records.get(self.cursor)
    }

    /// A request is outstanding or a fetch has not landed yet
    pub fn is_syncing(&self) -> bool {
        self.state().loading || self.controller.in_flight() > 0
    }

    /// Apply an action and bring view state back in line with the new list state.
    pub fn dispatch(&mut self, action: Action) -> Option<ListError> {
        let err = self.controller.dispatch(action);
        self.sync_view();
        err
    }

    /// Apply finished remote requests. Returns true if anything changed.
    pub fn pump(&mut self) -> bool {
        let applied = self.controller.pump();
        if applied > 0 {
            self.sync_view();
        }
        applied > 0
    }

    /// Block until every outstanding request has been applied
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let idle = self.controller.wait_idle(timeout);
        self.sync_view();
        idle
    }

    /// Clamp cursors after the list or the text fields changed underneath us.
    fn sync_view(&mut self) {
        let len = self.state().records.len();
        self.cursor = self.cursor.min(len.saturating_sub(1));

        let input_len = self.state().input.len();
        if self.input_cursor > input_len || !self.state().input.is_char_boundary(self.input_cursor)
        {
            self.input_cursor = input_len;
        }

        let edit_cursor = self.edit_cursor;
        let buffer = self
            .state()
            .editing
            .as_ref()
            .map(|edit| (edit.buffer.len(), edit.buffer.is_char_boundary(edit_cursor)));
        match buffer {
            Some((len, on_boundary)) => {
                if !on_boundary {
                    self.edit_cursor = len;
                }
            }
            None => {
                self.edit_cursor = 0;
                if self.mode == Mode::Edit {
                    self.mode = Mode::Navigate;
                }
            }
        }
    }
}

/// Build the REST store from config and run the TUI application
pub fn run(loaded: &LoadedConfig) -> Result<(), Box<dyn std::error::Error>> {
    validate_remote(&loaded.config.remote)?;
    let store: Arc<dyn TaskStore> = Arc::new(RestStore::from_config(&loaded.config.remote)?);
    info!(config = %loaded.path.display(), "starting tui");

    let mut app = App::new(ListController::new(store), &loaded.config.ui);
    app.dispatch(Action::Refresh);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Let pending writes reach the table before the process exits
    if app.controller.in_flight() > 0 && !app.wait_idle(QUIT_GRACE) {
        warn!(in_flight = app.controller.in_flight(), "requests abandoned on exit");
    }
    info!("tui exited");
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        // Short poll so remote completions show up promptly
        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        app.pump();

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
