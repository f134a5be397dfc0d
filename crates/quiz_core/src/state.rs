use std::sync::Arc;

use crate::view_model::{AppViewModel, HistoryRowView, MessageView};
use crate::{ErrorValue, HistoryEntry, HistoryId};

pub const GREETING: &str = "Hi! Paste a Wikipedia article URL and I will generate a short quiz.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    pub title: Option<String>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            title: None,
        }
    }

    pub fn assistant(text: impl Into<String>, title: Option<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    input: String,
    loading: bool,
    messages: Vec<ChatMessage>,
    /// Render-ready copy of `messages`, rebuilt only when they change.
    visible: Arc<Vec<MessageView>>,
    /// Bumped on every change to `messages`.
    revision: u64,
    history: Vec<HistoryEntry>,
    selected_history: Option<HistoryId>,
    error: Option<ErrorValue>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        let messages = vec![ChatMessage::assistant(GREETING, None)];
        Self {
            input: String::new(),
            loading: false,
            visible: visible_messages(&messages),
            messages,
            revision: 0,
            history: Vec::new(),
            selected_history: None,
            error: None,
            dirty: false,
        }
    }
}

fn visible_messages(messages: &[ChatMessage]) -> Arc<Vec<MessageView>> {
    Arc::new(
        messages
            .iter()
            .filter(|m| m.role != Role::System)
            .map(|m| MessageView {
                role: m.role,
                title: m.title.clone(),
                text: m.text.clone(),
            })
            .collect(),
    )
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cheap to call per event: the message list is shared, not copied.
    pub fn view(&self) -> AppViewModel {
        let history = self
            .history
            .iter()
            .map(|entry| HistoryRowView {
                id: entry.id.clone(),
                title: entry.title.clone().unwrap_or_default(),
                url: entry.url.clone().unwrap_or_default(),
                date_generated: entry.date_generated.clone().unwrap_or_default(),
                selected: self.selected_history.as_ref() == Some(&entry.id),
            })
            .collect();

        AppViewModel {
            messages: Arc::clone(&self.visible),
            messages_revision: self.revision,
            history,
            input: self.input.clone(),
            loading: self.loading,
            error_text: self.error.as_ref().map(ToString::to_string),
            dirty: self.dirty,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ErrorValue> {
        self.error.as_ref()
    }

    pub fn selected_history(&self) -> Option<&HistoryId> {
        self.selected_history.as_ref()
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn take_input(&mut self) -> String {
        self.mark_dirty();
        std::mem::take(&mut self.input)
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.mark_dirty();
    }

    pub(crate) fn push_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.messages_changed();
    }

    pub(crate) fn replace_messages(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages;
        self.messages_changed();
    }

    fn messages_changed(&mut self) {
        self.visible = visible_messages(&self.messages);
        self.revision += 1;
        self.mark_dirty();
    }

    pub(crate) fn replace_history(&mut self, entries: Vec<HistoryEntry>) {
        self.history = entries;
        self.mark_dirty();
    }

    pub(crate) fn select_history(&mut self, id: HistoryId) {
        self.selected_history = Some(id);
        self.mark_dirty();
    }

    pub(crate) fn set_error(&mut self, error: ErrorValue) {
        self.error = Some(error);
        self.mark_dirty();
    }

    pub(crate) fn clear_error(&mut self) {
        if self.error.take().is_some() {
            self.mark_dirty();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
