use std::sync::Arc;

use crate::Role;

pub const SEND_LABEL: &str = "Send";
pub const HISTORY_EMPTY_HINT: &str = "No history yet.";
pub const SEND_LABEL_LOADING: &str = "Generating...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    /// Visible messages in display order; system messages are already dropped.
    pub messages: Arc<Vec<MessageView>>,
    /// Changes whenever the message list changes; lets the UI detect new output.
    pub messages_revision: u64,
    pub history: Vec<HistoryRowView>,
    pub input: String,
    pub loading: bool,
    pub error_text: Option<String>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn send_enabled(&self) -> bool {
        !self.loading && !self.input.is_empty()
    }

    pub fn history_empty_hint(&self) -> Option<&'static str> {
        self.history.is_empty().then_some(HISTORY_EMPTY_HINT)
    }

    pub fn send_label(&self) -> &'static str {
        if self.loading {
            SEND_LABEL_LOADING
        } else {
            SEND_LABEL
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub role: Role,
    pub title: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRowView {
    pub id: String,
    pub title: String,
    pub url: String,
    pub date_generated: String,
    pub selected: bool,
}
