use ratatui::layout::{Constraint, Layout, Rect};

use super::constants::HISTORY_WIDTH_PERCENT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub history: Rect,
    pub messages: Rect,
    pub input: Rect,
    pub status: Rect,
}

/// History column on the left, conversation on the right with the input
/// box and a one-line status/error row pinned to its bottom.
pub fn split(area: Rect) -> AppLayout {
    let [history, chat] = Layout::horizontal([
        Constraint::Percentage(HISTORY_WIDTH_PERCENT),
        Constraint::Percentage(100 - HISTORY_WIDTH_PERCENT),
    ])
    .areas(area);

    let [messages, input, status] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(chat);

    AppLayout {
        history,
        messages,
        input,
        status,
    }
}
