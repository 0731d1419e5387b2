use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::manager::Action;
use crate::tui::app::{App, Mode};
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

/// What a key did to a single-line text field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEdit {
    /// Text changed; the new contents
    Changed(String),
    /// Only the caret moved
    Moved,
    Submit,
    Cancel,
    Ignored,
}

/// Apply a key to `text` with the caret at byte offset `cursor`.
///
/// The caret always lands on a grapheme boundary. The text itself is not
/// modified; callers route `Changed` through the list state.
pub fn edit_line(text: &str, cursor: &mut usize, key: KeyEvent) -> LineEdit {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    *cursor = (*cursor).min(text.len());

    match key.code {
        KeyCode::Enter => LineEdit::Submit,
        KeyCode::Esc => LineEdit::Cancel,

        // Ctrl-U: delete to start of line
        KeyCode::Char('u') if ctrl => {
            let rest = text[*cursor..].to_string();
            *cursor = 0;
            LineEdit::Changed(rest)
        }
        KeyCode::Char('a') if ctrl => {
            *cursor = 0;
            LineEdit::Moved
        }
        KeyCode::Char('e') if ctrl => {
            *cursor = text.len();
            LineEdit::Moved
        }
        KeyCode::Char(_) if ctrl => LineEdit::Ignored,

        KeyCode::Char(c) => {
            let mut new = text.to_string();
            new.insert(*cursor, c);
            *cursor += c.len_utf8();
            LineEdit::Changed(new)
        }

        KeyCode::Backspace => match prev_grapheme_boundary(text, *cursor) {
            Some(start) => {
                let mut new = text.to_string();
                new.replace_range(start..*cursor, "");
                *cursor = start;
                LineEdit::Changed(new)
            }
            None => LineEdit::Ignored,
        },
        KeyCode::Delete => match next_grapheme_boundary(text, *cursor) {
            Some(end) => {
                let mut new = text.to_string();
                new.replace_range(*cursor..end, "");
                LineEdit::Changed(new)
            }
            None => LineEdit::Ignored,
        },

        KeyCode::Left => {
            if let Some(prev) = prev_grapheme_boundary(text, *cursor) {
                *cursor = prev;
            }
            LineEdit::Moved
        }
        KeyCode::Right => {
            if let Some(next) = next_grapheme_boundary(text, *cursor) {
                *cursor = next;
            }
            LineEdit::Moved
        }
        KeyCode::Home => {
            *cursor = 0;
            LineEdit::Moved
        }
        KeyCode::End => {
            *cursor = text.len();
            LineEdit::Moved
        }

        _ => LineEdit::Ignored,
    }
}

/// Keys while typing a new task
pub(super) fn handle_input(app: &mut App, key: KeyEvent) {
    let text = app.state().input.clone();
    match edit_line(&text, &mut app.input_cursor, key) {
        LineEdit::Changed(new) => {
            app.dispatch(Action::SetInput(new));
        }
        LineEdit::Submit => {
            // Blank input stays open so the user can keep typing
            if app.dispatch(Action::Create(text)).is_none() {
                app.mode = Mode::Navigate;
            }
        }
        LineEdit::Cancel => app.mode = Mode::Navigate,
        LineEdit::Moved | LineEdit::Ignored => {}
    }
}

/// Keys while editing a record in place
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let Some((id, buffer)) = app
        .state()
        .editing
        .as_ref()
        .map(|edit| (edit.id, edit.buffer.clone()))
    else {
        app.mode = Mode::Navigate;
        return;
    };

    match edit_line(&buffer, &mut app.edit_cursor, key) {
        LineEdit::Changed(new) => {
            app.dispatch(Action::SetEditBuffer(new));
        }
        // Edit stays open until the update lands
        LineEdit::Submit => {
            app.dispatch(Action::SaveEdit(id));
        }
        LineEdit::Cancel => {
            app.dispatch(Action::CancelEdit);
        }
        LineEdit::Moved | LineEdit::Ignored => {}
    }
}
