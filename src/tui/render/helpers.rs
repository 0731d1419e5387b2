use ratatui::style::Style;
use ratatui::text::Span;

use crate::util::unicode;

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Pad spans with `style` out to `width` cells
pub(super) fn pad_to_width(spans: &mut Vec<Span<'_>>, width: usize, style: Style) {
    let used = spans_width(spans);
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), style));
    }
}

/// Split `text` at the caret and draw a block cursor between the halves
pub(super) fn text_with_caret<'a>(
    text: &str,
    caret: usize,
    text_style: Style,
    caret_style: Style,
) -> Vec<Span<'a>> {
    let caret = if text.is_char_boundary(caret) {
        caret
    } else {
        text.len()
    };
    vec![
        Span::styled(text[..caret].to_string(), text_style),
        Span::styled("\u{258C}", caret_style), // ▌ cursor
        Span::styled(text[caret..].to_string(), text_style),
    ]
}
