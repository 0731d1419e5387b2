use crossterm::event::{KeyCode, KeyEvent};

use crate::manager::Action;
use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    let len = app.state().records.len();

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Char('j') | KeyCode::Down => {
            if app.cursor + 1 < len {
                app.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => app.cursor = len.saturating_sub(1),

        KeyCode::Char('a') | KeyCode::Char('i') => {
            app.input_cursor = app.state().input.len();
            app.mode = Mode::Input;
        }

        KeyCode::Char('e') | KeyCode::Enter => begin_edit_selected(app),

        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = app.selected().map(|r| r.id) {
                app.dispatch(Action::Delete(id));
            }
        }

        KeyCode::Char('r') => {
            app.dispatch(Action::Refresh);
        }

        KeyCode::Esc => {
            app.dispatch(Action::DismissError);
        }

        _ => {}
    }
}

fn begin_edit_selected(app: &mut App) {
    let Some(id) = app.selected().map(|r| r.id) else {
        return;
    };
    if app.dispatch(Action::BeginEdit(id)).is_none() {
        app.edit_cursor = app
            .state()
            .editing
            .as_ref()
            .map_or(0, |edit| edit.buffer.len());
        app.mode = Mode::Edit;
    }
}
