use std::sync::Arc;

use chrono::{TimeZone, Utc};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::manager::{Action, ListController, Outcome};
use crate::model::{Record, UiConfig};
use crate::remote::MemoryStore;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Three records, newest first.
pub fn sample_records() -> Vec<Record> {
    let at = |minute| Utc.with_ymd_and_hms(2025, 5, 14, 9, minute, 0).unwrap();
    vec![
        Record::new(3, "Buy milk", at(2)),
        Record::new(2, "Write report", at(1)),
        Record::new(1, "Call mom", at(0)),
    ]
}

/// An App whose first fetch has not completed.
pub fn app_loading() -> App {
    let store = Arc::new(MemoryStore::new());
    App::new(ListController::new(store), &UiConfig::default())
}

/// An App whose list already holds `records`, backed by a store seeded with them.
pub fn app_with_store(records: Vec<Record>) -> (App, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_rows(records.clone()));
    let mut app = App::new(ListController::new(store.clone()), &UiConfig::default());
    app.dispatch(Action::Completed(Outcome::Fetched(Ok(records))));
    (app, store)
}

/// An App whose list already holds `records`.
pub fn app_with_records(records: Vec<Record>) -> App {
    app_with_store(records).0
}
