use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::helpers::{pad_to_width, spans_width, text_with_caret};
use crate::tui::app::{App, Mode};

/// Title row, input row, error row, separator
pub const HEADER_HEIGHT: u16 = 4;

pub const INPUT_PLACEHOLDER: &str = "Enter a task";

/// Render the header: title with record count, the new-task field, and the
/// current error message (blank row when there is none)
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let state = app.state();

    // Title row
    let mut title = vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            app.title.clone(),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    let count = match state.records.len() {
        1 => "1 task ".to_string(),
        n => format!("{} tasks ", n),
    };
    let used = spans_width(&title);
    if used + count.len() < width {
        title.push(Span::styled(
            " ".repeat(width - used - count.len()),
            Style::default().bg(bg),
        ));
        title.push(Span::styled(count, Style::default().fg(app.theme.dim).bg(bg)));
    }

    // Input row
    let active = app.mode == Mode::Input;
    let prompt_color = if active {
        app.theme.highlight
    } else {
        app.theme.dim
    };
    let mut input = vec![Span::styled(
        " > ",
        Style::default().fg(prompt_color).bg(bg),
    )];
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    if active {
        input.extend(text_with_caret(
            &state.input,
            app.input_cursor,
            text_style,
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    } else if state.input.is_empty() {
        input.push(Span::styled(
            INPUT_PLACEHOLDER,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else {
        input.push(Span::styled(state.input.clone(), text_style));
    }
    pad_to_width(&mut input, width, Style::default().bg(bg));

    // Error row
    let error = match &state.error {
        Some(message) => Line::from(Span::styled(
            format!(" Error: {}", message),
            Style::default().fg(app.theme.red).bg(bg),
        )),
        None => Line::from(""),
    };

    let separator = Line::from(Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(app.theme.dim).bg(bg),
    ));

    let paragraph = Paragraph::new(vec![Line::from(title), Line::from(input), error, separator])
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
