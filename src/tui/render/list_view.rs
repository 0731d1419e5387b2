use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::helpers::{pad_to_width, spans_width, text_with_caret};
use crate::model::Record;
use crate::tui::app::{App, Mode};
use crate::util::unicode::{display_width, truncate_to_width};

/// Metadata suffix shown after each task
pub fn record_meta(record: &Record) -> String {
    format!("  (ID: {}, Created: {})", record.id, record.created_local())
}

/// Render the snapshot, one record per row, keeping the cursor in view
pub fn render_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let records = &app.controller.state().records;

    if records.is_empty() {
        let message = if app.controller.state().loading {
            " Loading..."
        } else {
            " No tasks found"
        };
        let empty = Paragraph::new(message).style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let visible_height = area.height as usize;
    let width = area.width as usize;

    // Adjust scroll so the cursor row is visible
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if visible_height > 0 && app.cursor >= app.scroll_offset + visible_height {
        app.scroll_offset = app.cursor + 1 - visible_height;
    }

    let state = app.controller.state();
    let editing = state.editing.as_ref();
    let mut lines: Vec<Line> = Vec::new();

    for (i, record) in state
        .records
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(visible_height)
    {
        let is_cursor = i == app.cursor;
        let row_bg = if is_cursor {
            app.theme.selection_bg
        } else {
            bg
        };
        let mut spans: Vec<Span> = Vec::new();

        match editing.filter(|e| e.id == record.id) {
            Some(edit) => {
                spans.push(Span::styled(
                    " \u{270E} ", // ✎
                    Style::default().fg(app.theme.highlight).bg(row_bg),
                ));
                let text_style = Style::default().fg(app.theme.text_bright).bg(row_bg);
                if app.mode == Mode::Edit {
                    spans.extend(text_with_caret(
                        &edit.buffer,
                        app.edit_cursor,
                        text_style,
                        Style::default().fg(app.theme.highlight).bg(row_bg),
                    ));
                } else {
                    spans.push(Span::styled(edit.buffer.clone(), text_style));
                }
                spans.push(Span::styled(
                    format!("  (editing ID: {})", record.id),
                    Style::default().fg(app.theme.dim).bg(row_bg),
                ));
            }
            None => {
                let marker = if is_cursor { " \u{203A} " } else { "   " }; // ›
                spans.push(Span::styled(
                    marker,
                    Style::default().fg(app.theme.highlight).bg(row_bg),
                ));

                let meta = record_meta(record);
                let budget = width.saturating_sub(spans_width(&spans) + display_width(&meta));
                let mut task_style = Style::default().fg(app.theme.text).bg(row_bg);
                if is_cursor {
                    task_style = task_style
                        .fg(app.theme.text_bright)
                        .add_modifier(Modifier::BOLD);
                }
                spans.push(Span::styled(truncate_to_width(&record.task, budget), task_style));
                spans.push(Span::styled(
                    meta,
                    Style::default().fg(app.theme.dim).bg(row_bg),
                ));
            }
        }

        if is_cursor {
            pad_to_width(&mut spans, width, Style::default().bg(row_bg));
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
