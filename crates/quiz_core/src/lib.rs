//! Quiz chat core: pure state machine, text formatting and view-model helpers.
mod effect;
mod format;
mod msg;
mod state;
mod types;
mod update;
mod view_model;

pub use effect::Effect;
pub use format::{format_generated_quiz, format_history_intro, format_history_quiz};
pub use msg::Msg;
pub use state::{AppState, ChatMessage, Role, GREETING};
pub use types::{ErrorValue, GeneratedQuiz, HistoryEntry, HistoryId, QuizDetail, QuizQuestion};
pub use update::update;
pub use view_model::{
    AppViewModel, HistoryRowView, MessageView, HISTORY_EMPTY_HINT, SEND_LABEL, SEND_LABEL_LOADING,
};
