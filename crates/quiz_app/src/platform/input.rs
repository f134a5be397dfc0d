//! Keyboard handling: maps terminal events to core messages and local UI state.

use quiz_core::{AppViewModel, Msg};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Lines moved per PageUp/PageDown.
const SCROLL_STEP: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    History,
}

/// Presentation state that the core does not care about.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub focus: Focus,
    pub history_cursor: usize,
    /// Lines scrolled up from the bottom of the conversation; 0 follows new output.
    pub scroll_from_bottom: u16,
    pub should_quit: bool,
    seen_revision: u64,
}

impl UiState {
    /// Snaps the conversation back to the bottom whenever the message list changed.
    pub fn observe_messages(&mut self, revision: u64) {
        if self.seen_revision != revision {
            self.seen_revision = revision;
            self.scroll_from_bottom = 0;
        }
    }

    /// Keeps the cursor inside the history list after it was replaced.
    pub fn clamp_cursor(&mut self, history_len: usize) {
        self.history_cursor = self.history_cursor.min(history_len.saturating_sub(1));
    }
}

pub fn handle_key(ui: &mut UiState, view: &AppViewModel, key: KeyEvent) -> Option<Msg> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
            ui.should_quit = true;
            return None;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            ui.focus = match ui.focus {
                Focus::Input => Focus::History,
                Focus::History => Focus::Input,
            };
            return None;
        }
        KeyCode::Esc => {
            return view.error_text.as_ref().map(|_| Msg::ErrorDismissed);
        }
        KeyCode::PageUp => {
            ui.scroll_from_bottom = ui.scroll_from_bottom.saturating_add(SCROLL_STEP);
            return None;
        }
        KeyCode::PageDown => {
            ui.scroll_from_bottom = ui.scroll_from_bottom.saturating_sub(SCROLL_STEP);
            return None;
        }
        _ => {}
    }

    match ui.focus {
        Focus::Input => handle_input_key(view, key, ctrl),
        Focus::History => handle_history_key(ui, view, key),
    }
}

/// Bracketed paste into the URL box. Line breaks are dropped.
pub fn handle_paste(ui: &UiState, view: &AppViewModel, pasted: &str) -> Option<Msg> {
    if ui.focus != Focus::Input {
        return None;
    }
    let cleaned: String = pasted.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    if cleaned.is_empty() {
        return None;
    }
    Some(Msg::InputChanged(format!("{}{}", view.input, cleaned)))
}

fn handle_input_key(view: &AppViewModel, key: KeyEvent, ctrl: bool) -> Option<Msg> {
    match key.code {
        KeyCode::Enter => Some(Msg::InputSubmitted),
        KeyCode::Backspace => {
            let mut text = view.input.clone();
            text.pop()?;
            Some(Msg::InputChanged(text))
        }
        KeyCode::Char('u') if ctrl => Some(Msg::InputChanged(String::new())),
        KeyCode::Char(c) if !ctrl => Some(Msg::InputChanged(format!("{}{}", view.input, c))),
        _ => None,
    }
}

fn handle_history_key(ui: &mut UiState, view: &AppViewModel, key: KeyEvent) -> Option<Msg> {
    let len = view.history.len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            ui.history_cursor = ui.history_cursor.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if ui.history_cursor + 1 < len {
                ui.history_cursor += 1;
            }
            None
        }
        KeyCode::Home => {
            ui.history_cursor = 0;
            None
        }
        KeyCode::End => {
            ui.history_cursor = len.saturating_sub(1);
            None
        }
        KeyCode::Enter => view.history.get(ui.history_cursor).map(|row| Msg::HistorySelected {
            id: row.id.clone(),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::{update, AppState, HistoryRowView};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn view_with_history(ids: &[&str]) -> AppViewModel {
        AppViewModel {
            history: ids
                .iter()
                .map(|id| HistoryRowView {
                    id: id.to_string(),
                    title: format!("Title {id}"),
                    url: String::new(),
                    date_generated: String::new(),
                    selected: false,
                })
                .collect(),
            ..AppViewModel::default()
        }
    }

    #[test]
    fn typing_extends_and_backspace_shrinks_input() {
        let mut ui = UiState::default();
        let view = AppViewModel {
            input: "http".to_string(),
            ..AppViewModel::default()
        };

        assert_eq!(
            handle_key(&mut ui, &view, key(KeyCode::Char('s'))),
            Some(Msg::InputChanged("https".to_string()))
        );
        assert_eq!(
            handle_key(&mut ui, &view, key(KeyCode::Backspace)),
            Some(Msg::InputChanged("htt".to_string()))
        );
        assert_eq!(
            handle_key(&mut ui, &view, ctrl('u')),
            Some(Msg::InputChanged(String::new()))
        );
        assert_eq!(
            handle_key(&mut ui, &AppViewModel::default(), key(KeyCode::Backspace)),
            None
        );
    }

    #[test]
    fn enter_submits_from_input() {
        let mut ui = UiState::default();
        assert_eq!(
            handle_key(&mut ui, &AppViewModel::default(), key(KeyCode::Enter)),
            Some(Msg::InputSubmitted)
        );
    }

    #[test]
    fn history_navigation_and_selection() {
        let mut ui = UiState::default();
        let view = view_with_history(&["a", "b", "c"]);

        assert_eq!(handle_key(&mut ui, &view, key(KeyCode::Tab)), None);
        assert_eq!(ui.focus, Focus::History);

        handle_key(&mut ui, &view, key(KeyCode::Down));
        handle_key(&mut ui, &view, key(KeyCode::Down));
        handle_key(&mut ui, &view, key(KeyCode::Down));
        assert_eq!(ui.history_cursor, 2);
        handle_key(&mut ui, &view, key(KeyCode::Up));

        assert_eq!(
            handle_key(&mut ui, &view, key(KeyCode::Enter)),
            Some(Msg::HistorySelected {
                id: "b".to_string()
            })
        );
        // Letters do not leak into the URL box while the list has focus.
        assert_eq!(handle_key(&mut ui, &view, key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn enter_on_empty_history_does_nothing() {
        let mut ui = UiState {
            focus: Focus::History,
            ..UiState::default()
        };
        assert_eq!(
            handle_key(&mut ui, &AppViewModel::default(), key(KeyCode::Enter)),
            None
        );
    }

    #[test]
    fn escape_dismisses_only_when_error_shown() {
        let mut ui = UiState::default();
        assert_eq!(
            handle_key(&mut ui, &AppViewModel::default(), key(KeyCode::Esc)),
            None
        );
        let view = AppViewModel {
            error_text: Some("\"Network Error\"".to_string()),
            ..AppViewModel::default()
        };
        assert_eq!(
            handle_key(&mut ui, &view, key(KeyCode::Esc)),
            Some(Msg::ErrorDismissed)
        );
    }

    #[test]
    fn ctrl_q_quits() {
        let mut ui = UiState::default();
        assert_eq!(handle_key(&mut ui, &AppViewModel::default(), ctrl('q')), None);
        assert!(ui.should_quit);
    }

    #[test]
    fn paste_strips_newlines_and_respects_focus() {
        let mut ui = UiState::default();
        let view = AppViewModel::default();
        assert_eq!(
            handle_paste(&ui, &view, "https://en.wikipedia.org/wiki/Rust\n"),
            Some(Msg::InputChanged(
                "https://en.wikipedia.org/wiki/Rust".to_string()
            ))
        );
        ui.focus = Focus::History;
        assert_eq!(handle_paste(&ui, &view, "x"), None);
    }

    #[test]
    fn new_messages_reset_scroll() {
        let mut ui = UiState::default();
        let (state, _) = update(
            AppState::new(),
            Msg::InputChanged("https://example.org".to_string()),
        );
        ui.observe_messages(state.view().messages_revision);
        ui.scroll_from_bottom = 20;

        // Typing does not touch the conversation.
        let (state, _) = update(state, Msg::InputChanged("https://example.org/x".to_string()));
        ui.observe_messages(state.view().messages_revision);
        assert_eq!(ui.scroll_from_bottom, 20);

        let (state, _) = update(state, Msg::InputSubmitted);
        ui.observe_messages(state.view().messages_revision);
        assert_eq!(ui.scroll_from_bottom, 0);
    }

    #[test]
    fn cursor_is_clamped_to_list() {
        let mut ui = UiState {
            history_cursor: 5,
            ..UiState::default()
        };
        ui.clamp_cursor(2);
        assert_eq!(ui.history_cursor, 1);
        ui.clamp_cursor(0);
        assert_eq!(ui.history_cursor, 0);
    }
}
