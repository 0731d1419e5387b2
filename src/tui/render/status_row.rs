use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::helpers::spans_width;
use crate::tui::app::{App, Mode};

pub const SYNCING_LABEL: &str = "syncing\u{2026}";

/// Key hints for the current mode
pub fn mode_hints(mode: Mode) -> &'static str {
    match mode {
        Mode::Navigate => "a add  e edit  d delete  r refresh  q quit",
        Mode::Input => "Enter add  Esc back",
        Mode::Edit => "Enter save  Esc cancel",
    }
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = vec![Span::styled(
        format!(" {}", mode_hints(app.mode)),
        Style::default().fg(app.theme.dim).bg(bg),
    )];

    if app.is_syncing() {
        let content_width = spans_width(&spans);
        let label_width = SYNCING_LABEL.chars().count() + 1;
        if content_width + label_width < width {
            let padding = width - content_width - label_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(
                format!("{} ", SYNCING_LABEL),
                Style::default().fg(app.theme.green).bg(bg),
            ));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
