use chrono::{DateTime, Utc};
use quiz_core::{AppViewModel, MessageView, Role};
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::constants::*;
use super::layout;
use crate::platform::input::{Focus, UiState};

pub fn render(frame: &mut Frame, view: &AppViewModel, ui: &UiState) {
    let areas = layout::split(frame.area());
    render_history(frame, areas.history, view, ui);
    render_messages(frame, areas.messages, view, ui);
    render_input(frame, areas.input, view, ui);
    render_status(frame, areas.status, view);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    }
}

fn render_history(frame: &mut Frame, area: Rect, view: &AppViewModel, ui: &UiState) {
    let focused = ui.focus == Focus::History;
    let block = Block::bordered()
        .title(HISTORY_TITLE)
        .border_style(focus_style(focused));

    if let Some(hint) = view.history_empty_hint() {
        let hint = Paragraph::new(Span::styled(hint, Style::default().fg(MUTED))).block(block);
        frame.render_widget(hint, area);
        return;
    }

    let items: Vec<ListItem> = view
        .history
        .iter()
        .map(|row| {
            let title = if row.title.is_empty() {
                "(untitled)"
            } else {
                row.title.as_str()
            };
            let lines = vec![
                Line::styled(title.to_string(), Style::default().add_modifier(Modifier::BOLD)),
                Line::styled(row.url.clone(), Style::default().fg(MUTED)),
                Line::styled(
                    format_generated_date(&row.date_generated),
                    Style::default().fg(MUTED),
                ),
            ];
            let item = ListItem::new(lines);
            if row.selected {
                item.style(Style::default().bg(SELECTED_BG))
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_symbol("> ")
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default();
    if focused {
        state.select(Some(ui.history_cursor));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_messages(frame: &mut Frame, area: Rect, view: &AppViewModel, ui: &UiState) {
    let block = Block::bordered()
        .title(CHAT_TITLE)
        .border_style(Style::default().fg(MUTED));
    let inner = block.inner(area);
    let lines = message_lines(&view.messages, inner.width);

    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_offset = total.saturating_sub(inner.height);
    let offset = max_offset.saturating_sub(ui.scroll_from_bottom);

    let paragraph = Paragraph::new(lines).block(block).scroll((offset, 0));
    frame.render_widget(paragraph, area);
}

fn message_lines(messages: &[MessageView], width: u16) -> Vec<Line<'static>> {
    let bubble_width = usize::from(width) * usize::from(BUBBLE_WIDTH_PERCENT) / 100;
    let mut lines = Vec::new();
    for message in messages {
        let (alignment, style) = match message.role {
            Role::User => (
                Alignment::Right,
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Role::Assistant | Role::System => (Alignment::Left, Style::default().fg(ASSISTANT_FG)),
        };
        if let Some(title) = message.title.as_deref().filter(|t| !t.is_empty()) {
            lines.extend(
                wrap_text(title, bubble_width)
                    .into_iter()
                    .map(|l| Line::styled(l, Style::default().fg(MUTED)).alignment(alignment)),
            );
        }
        lines.extend(
            wrap_text(&message.text, bubble_width)
                .into_iter()
                .map(|l| Line::styled(l, style).alignment(alignment)),
        );
        lines.push(Line::default());
    }
    lines
}

fn render_input(frame: &mut Frame, area: Rect, view: &AppViewModel, ui: &UiState) {
    let focused = ui.focus == Focus::Input;
    let send_style = if view.send_enabled() {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    };
    let block = Block::bordered()
        .border_style(focus_style(focused))
        .title_top(
            Line::from(Span::styled(format!("[ {} ]", view.send_label()), send_style))
                .right_aligned(),
        );
    let inner = block.inner(area);

    let visible = tail_columns(&view.input, usize::from(inner.width.saturating_sub(1)));
    let content = if view.input.is_empty() {
        Span::styled(INPUT_PLACEHOLDER, Style::default().fg(MUTED))
    } else {
        Span::raw(visible.to_string())
    };
    frame.render_widget(Paragraph::new(content).block(block), area);

    if focused {
        let cursor_x = u16::try_from(visible.width()).unwrap_or(inner.width);
        frame.set_cursor_position(Position::new(inner.x + cursor_x, inner.y));
    }
}

fn render_status(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let line = match &view.error_text {
        Some(error) => Line::styled(error.clone(), Style::default().fg(ERROR_FG)),
        None => Line::styled(KEY_HINTS, Style::default().fg(MUTED)),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// The longest suffix of `text` that fits in `max` terminal columns.
fn tail_columns(text: &str, max: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();
    for (idx, c) in text.char_indices().rev() {
        used += c.width().unwrap_or(0);
        if used > max {
            break;
        }
        start = idx;
    }
    &text[start..]
}

/// Backend dates look like `2025-11-02 10:15:00+00:00`; anything else is shown as-is.
fn format_generated_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%:z"))
        .map(|dt| dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Greedy word wrap on display columns, so wide (CJK) characters count twice.
/// Words wider than `width` are split between characters.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for raw in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0;
        for word in raw.split(' ') {
            let word_width = word.width();
            if line_width > 0 {
                if line_width + 1 + word_width <= width {
                    line.push(' ');
                    line_width += 1;
                } else {
                    out.push(std::mem::take(&mut line));
                    line_width = 0;
                }
            }
            if line_width + word_width <= width {
                line.push_str(word);
                line_width += word_width;
                continue;
            }
            for c in word.chars() {
                let w = c.width().unwrap_or(0);
                if line_width > 0 && line_width + w > width {
                    out.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                line.push(c);
                line_width += w;
            }
        }
        out.push(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use quiz_core::{update, AppState, HistoryEntry, Msg, HISTORY_EMPTY_HINT};
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;

    fn screen_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn draw_buffer(view: &AppViewModel, ui: &UiState) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, view, ui)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn draw(view: &AppViewModel, ui: &UiState) -> String {
        screen_text(&draw_buffer(view, ui))
    }

    /// Foreground color of the first cell that starts `needle` on screen.
    fn fg_of(buffer: &Buffer, needle: &str) -> Option<ratatui::style::Color> {
        let area = buffer.area;
        let first = needle.chars().next()?.to_string();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if buffer[(x, y)].symbol() != first {
                    continue;
                }
                let found: String = (x..area.right())
                    .take(needle.chars().count())
                    .map(|cx| buffer[(cx, y)].symbol().to_string())
                    .collect();
                if found == needle {
                    return Some(buffer[(x, y)].fg);
                }
            }
        }
        None
    }

    #[test]
    fn wraps_on_words_and_splits_long_words() {
        assert_eq!(
            wrap_text("one two three", 7),
            vec!["one two".to_string(), "three".to_string()]
        );
        assert_eq!(
            wrap_text("abcdefghij", 4),
            vec!["abcd".to_string(), "efgh".to_string(), "ij".to_string()]
        );
        assert_eq!(
            wrap_text("a\n\nb", 10),
            vec!["a".to_string(), String::new(), "b".to_string()]
        );
    }

    #[test]
    fn wide_characters_wrap_on_display_width() {
        assert_eq!(
            wrap_text("字字字", 4),
            vec!["字字".to_string(), "字".to_string()]
        );
        assert_eq!(
            wrap_text("東京 大阪", 4),
            vec!["東京".to_string(), "大阪".to_string()]
        );
        // A wide char never lands on a line with only one column left.
        assert_eq!(
            wrap_text("a字", 2),
            vec!["a".to_string(), "字".to_string()]
        );
    }

    #[test]
    fn tail_keeps_end_of_long_input() {
        assert_eq!(tail_columns("https://example.org", 7), "ple.org");
        assert_eq!(tail_columns("short", 10), "short");
        assert_eq!(tail_columns("ééé", 2), "éé");
        assert_eq!(tail_columns("字字字", 4), "字字");
        assert_eq!(tail_columns("字字字", 5), "字字");
    }

    #[test]
    fn long_wide_message_is_not_clipped() {
        let mut view = AppState::new().view();
        let text = format!("{}終", "字".repeat(39));
        view.messages = Arc::new(vec![MessageView {
            role: Role::Assistant,
            title: None,
            text,
        }]);

        let screen = draw(&view, &UiState::default());
        assert!(screen.contains('終'));
    }

    #[test]
    fn dates_are_normalized_when_parseable() {
        assert_eq!(
            format_generated_date("2025-11-02 10:15:00+00:00"),
            "2025-11-02 10:15 UTC"
        );
        assert_eq!(
            format_generated_date("2025-11-02T12:15:00+02:00"),
            "2025-11-02 10:15 UTC"
        );
        assert_eq!(format_generated_date("yesterday"), "yesterday");
    }

    #[test]
    fn initial_screen_shows_greeting_and_empty_history() {
        let screen = draw(&AppState::new().view(), &UiState::default());

        assert!(screen.contains("Hi! Paste a Wikipedia article URL"));
        assert!(screen.contains(HISTORY_EMPTY_HINT));
        assert!(screen.contains(INPUT_PLACEHOLDER));
        assert!(screen.contains("[ Send ]"));
    }

    #[test]
    fn loading_and_errors_are_visible() {
        let (state, _) = update(
            AppState::new(),
            Msg::InputChanged("https://en.wikipedia.org/wiki/Rust".to_string()),
        );
        let (state, _) = update(state, Msg::InputSubmitted);
        let screen = draw(&state.view(), &UiState::default());
        assert!(screen.contains("[ Generating... ]"));
        assert!(screen.contains("https://en.wikipedia.org/wiki/Rust"));

        let (state, _) = update(
            state,
            Msg::QuizGenerated(Err(quiz_core::ErrorValue::from_message("Network Error"))),
        );
        let screen = draw(&state.view(), &UiState::default());
        assert!(screen.contains("Error: \"Network Error\""));
        assert!(screen.contains("[ Send ]"));
    }

    #[test]
    fn history_rows_render_title_url_and_date() {
        let (state, _) = update(
            AppState::new(),
            Msg::HistoryLoaded(Ok(vec![HistoryEntry {
                id: "1".to_string(),
                title: Some("Alan Turing".to_string()),
                url: Some("wiki/Alan_Turing".to_string()),
                date_generated: Some("2025-11-02 10:15:00+00:00".to_string()),
            }])),
        );
        let screen = draw(&state.view(), &UiState::default());

        assert!(screen.contains("Alan Turing"));
        assert!(screen.contains("wiki/Alan_Turing"));
        assert!(screen.contains("2025-11-02 10:15 UTC"));
        assert!(!screen.contains(HISTORY_EMPTY_HINT));
    }

    #[test]
    fn conversation_follows_the_bottom() {
        let mut view = AppState::new().view();
        view.messages = Arc::new(
            (0..60)
                .map(|i| MessageView {
                    role: Role::Assistant,
                    title: None,
                    text: format!("line {i}"),
                })
                .collect(),
        );

        let screen = draw(&view, &UiState::default());
        assert!(screen.contains("line 59"));
        assert!(!screen.contains("line 0 "));

        let mut scrolled = UiState::default();
        scrolled.scroll_from_bottom = 200;
        let screen = draw(&view, &scrolled);
        assert!(screen.contains("line 0 "));
        assert!(!screen.contains("line 59"));
    }

    #[test]
    fn user_text_is_accented_and_titles_are_dimmed() {
        let mut view = AppState::new().view();
        view.messages = Arc::new(vec![
            MessageView {
                role: Role::User,
                title: None,
                text: "https://example.org".to_string(),
            },
            MessageView {
                role: Role::Assistant,
                title: Some("Alan Turing".to_string()),
                text: "Extracted article text:".to_string(),
            },
        ]);

        let buffer = draw_buffer(&view, &UiState::default());
        assert_eq!(fg_of(&buffer, "https://example.org"), Some(ACCENT));
        assert_eq!(fg_of(&buffer, "Alan Turing"), Some(MUTED));
        assert_eq!(fg_of(&buffer, "Extracted"), Some(ASSISTANT_FG));
    }
}
