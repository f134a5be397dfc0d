use quiz_logging::{quiz_debug, quiz_warn};

use crate::format::{format_generated_quiz, format_history_intro, format_history_quiz};
use crate::{AppState, ChatMessage, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => vec![Effect::FetchHistory],
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::InputSubmitted => {
            // One generation at a time; the send control is disabled meanwhile.
            if state.is_loading() {
                quiz_debug!("submit ignored: request outstanding");
                return (state, Vec::new());
            }
            let url = state.input().trim().to_string();
            if url.is_empty() {
                return (state, Vec::new());
            }
            state.clear_error();
            state.push_message(ChatMessage::user(url.clone()));
            state.take_input();
            state.set_loading(true);
            quiz_debug!("submit url_len={}", url.len());
            vec![Effect::GenerateQuiz { url }]
        }
        Msg::QuizGenerated(Ok(quiz)) => {
            let text = format_generated_quiz(&quiz);
            state.push_message(ChatMessage::assistant(text, quiz.title));
            state.set_loading(false);
            vec![Effect::FetchHistory]
        }
        Msg::QuizGenerated(Err(err)) => {
            quiz_warn!("quiz generation failed: {}", err);
            state.push_message(ChatMessage::assistant(format!("Error: {err}"), None));
            state.set_error(err);
            state.set_loading(false);
            Vec::new()
        }
        Msg::HistoryLoaded(Ok(entries)) => {
            quiz_debug!("history loaded entries={}", entries.len());
            state.replace_history(entries);
            state.clear_error();
            Vec::new()
        }
        Msg::HistoryLoaded(Err(err)) => {
            quiz_warn!("history fetch failed: {}", err);
            state.set_error(err);
            Vec::new()
        }
        Msg::HistorySelected { id } => vec![Effect::FetchQuiz { id }],
        Msg::HistoryItemLoaded {
            id,
            result: Ok(detail),
        } => {
            let mut messages = Vec::with_capacity(2);
            if let Some(intro) = format_history_intro(&detail) {
                messages.push(ChatMessage::assistant(intro, detail.title.clone()));
            }
            messages.push(ChatMessage::assistant(
                format_history_quiz(&detail),
                detail.title,
            ));
            state.replace_messages(messages);
            state.select_history(id);
            vec![Effect::FetchHistory]
        }
        Msg::HistoryItemLoaded {
            id,
            result: Err(err),
        } => {
            quiz_warn!("history item {} failed: {}", id, err);
            state.set_error(err);
            Vec::new()
        }
        Msg::ErrorDismissed => {
            state.clear_error();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
